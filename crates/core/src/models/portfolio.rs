use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::asset::{Asset, AssetType};

/// One row of the portfolio view: an asset plus the value and P/L the
/// backend computed for it. Never persisted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub asset: Asset,

    /// amount × current_price
    pub value: f64,

    /// value − amount × buy_price
    pub pnl: f64,
}

/// Body of `GET /api/portfolio`.
///
/// Treated as an immutable snapshot: the client replaces it wholesale on
/// every successful fetch and never edits it in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub total_value: f64,
    pub items: Vec<PortfolioItem>,
}

impl Portfolio {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by its asset id.
    pub fn find(&self, id: i64) -> Option<&PortfolioItem> {
        self.items.iter().find(|i| i.asset.id == id)
    }

    pub fn items_of_type(&self, asset_type: AssetType) -> Vec<&PortfolioItem> {
        self.items
            .iter()
            .filter(|i| i.asset.asset_type == asset_type)
            .collect()
    }

    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.items.iter().map(|i| &i.asset)
    }
}

/// A fetched portfolio together with the time it was received.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub portfolio: Portfolio,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(portfolio: Portfolio) -> Self {
        Self {
            portfolio,
            fetched_at: Utc::now(),
        }
    }
}
