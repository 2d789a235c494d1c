use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::asset::AssetType;

/// Body of `GET /api/price/{type}/{symbol}`.
///
/// Only `price` is required; the backend also reports the normalized
/// symbol and which source answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    #[serde(default)]
    pub symbol: String,
    pub price: f64,
    #[serde(default)]
    pub source: String,
}

/// A resolved price lookup for one asset.
///
/// Carries the asset id from the read phase into the write phase so each
/// write uses its own asset's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub id: i64,
    pub symbol: String,
    pub asset_type: AssetType,
    pub price: f64,
}

impl PriceUpdate {
    /// Build an update, rejecting prices that are NaN, infinite or negative.
    pub fn checked(
        id: i64,
        symbol: impl Into<String>,
        asset_type: AssetType,
        price: f64,
    ) -> Result<Self, CoreError> {
        let symbol = symbol.into();
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::InvalidPrice { symbol, price });
        }
        Ok(Self {
            id,
            symbol,
            asset_type,
            price,
        })
    }
}

/// Outcome of an all-or-nothing price refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefreshReport {
    /// `true` when there was no snapshot to refresh.
    pub skipped: bool,
    /// One entry per asset, in portfolio order.
    pub updated: Vec<PriceUpdate>,
}

impl RefreshReport {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            updated: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.updated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updated.is_empty()
    }
}

/// Outcome of refreshing a single asset in a settled refresh.
#[derive(Debug)]
pub struct ItemRefresh {
    pub id: i64,
    pub symbol: String,
    pub asset_type: AssetType,
    /// The price written, or the error from the lookup or the write.
    pub result: Result<f64, CoreError>,
}

impl ItemRefresh {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
