//! Stats Snapshot Module
//!
//! Aggregate metrics derived from the full collection.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::store::Item;

// == Empty Stats Policy ==
/// What an average over zero items means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyStatsPolicy {
    /// Report an average price of 0
    #[default]
    Zero,
    /// Fail with `CatalogError::EmptyCollection`
    Reject,
}

impl FromStr for EmptyStatsPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(Self::Zero),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown empty stats policy '{}'", other)),
        }
    }
}

// == Stats Snapshot ==
/// Count and mean price of the collection at `cached_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total: usize,
    pub average_price: f64,
    pub cached_at: DateTime<Utc>,
}

impl StatsSnapshot {
    // == Compute ==
    /// Derives a snapshot from `items`, stamped with `now`.
    ///
    /// `total` counts every record. The average covers only records with a
    /// numeric price and is 0 when none has one.
    pub fn compute(items: &[Item], now: DateTime<Utc>, policy: EmptyStatsPolicy) -> Result<Self> {
        let total = items.len();
        if total == 0 && policy == EmptyStatsPolicy::Reject {
            return Err(CatalogError::EmptyCollection);
        }

        let (sum, priced) = items
            .iter()
            .filter_map(|item| item.price)
            .fold((0.0, 0usize), |(sum, count), price| (sum + price, count + 1));
        let average_price = if priced == 0 { 0.0 } else { sum / priced as f64 };

        Ok(Self {
            total,
            average_price,
            cached_at: now,
        })
    }
}
