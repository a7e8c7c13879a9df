//! Collection Module
//!
//! Pure transforms over a loaded collection. No I/O happens here; the
//! accessor loads, calls into these, and persists the result.

use crate::error::{CatalogError, Result};
use crate::store::Item;

// == Search ==
/// Keeps items whose name or category contains `term`, ignoring case.
///
/// An absent or empty term keeps everything. The term is used as given,
/// surrounding whitespace included.
pub fn search(items: Vec<Item>, term: Option<&str>) -> Vec<Item> {
    match term.filter(|t| !t.is_empty()) {
        None => items,
        Some(term) => {
            let needle = term.to_lowercase();
            items.into_iter().filter(|item| item.matches(&needle)).collect()
        }
    }
}

// == Position ==
/// Index of the item with `id`, by linear scan.
pub fn position(items: &[Item], id: i64) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

// == Next Id ==
/// Wall-clock derived id that is strictly greater than every existing id.
///
/// Two creations inside the same millisecond get consecutive ids instead of
/// colliding. Fails once the largest id is `i64::MAX`.
pub fn next_id(items: &[Item], now_ms: i64) -> Result<i64> {
    match items.iter().map(|item| item.id).max() {
        Some(max) if max >= now_ms => max.checked_add(1).ok_or_else(|| {
            CatalogError::StoreUnavailable(format!("id space exhausted after {}", max))
        }),
        _ => Ok(now_ms),
    }
}

// == Paginate ==
/// Slices out 1-based `page` of size `limit`. Pages past the end are empty.
pub fn paginate(items: Vec<Item>, page: usize, limit: usize) -> Vec<Item> {
    let start = page.saturating_sub(1).saturating_mul(limit);
    items.into_iter().skip(start).take(limit).collect()
}
