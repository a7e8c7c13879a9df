//! Store Module
//!
//! Item persistence over a single JSON document: whole-document reads and
//! writes, pure collection transforms, and the accessor tying them together.

mod accessor;
pub mod collection;
mod document;
mod item;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use accessor::ItemStore;
pub use document::{ensure_document, read_items, write_items};
pub use item::Item;
