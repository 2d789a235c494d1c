use serde::{Deserialize, Serialize};

use super::asset::AssetType;

/// Aggregate figures derived from one portfolio snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Sum of item values
    pub total_value: f64,

    /// `total_value` as reported by the backend
    pub reported_total_value: f64,

    /// Σ amount × buy_price
    pub total_cost: f64,

    /// Σ pnl
    pub total_pnl: f64,

    /// (total_pnl / total_cost) * 100, or 0 with no cost basis
    pub total_return_pct: f64,

    pub asset_count: usize,

    /// Per-asset share of the total, largest first
    pub allocations: Vec<AllocationSlice>,

    /// Per-type share of the total, largest first
    pub by_type: Vec<TypeAllocation>,
}

/// One asset's share of the portfolio (a pie-chart slice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub id: i64,
    /// "{symbol} ({type})"
    pub label: String,
    pub asset_type: AssetType,
    pub value: f64,
    pub allocation_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAllocation {
    pub asset_type: AssetType,
    pub value: f64,
    pub allocation_pct: f64,
}
