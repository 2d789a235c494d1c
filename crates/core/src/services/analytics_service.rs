use std::collections::HashMap;

use crate::models::analytics::{AllocationSlice, PortfolioSummary, TypeAllocation};
use crate::models::asset::AssetType;
use crate::models::portfolio::Portfolio;

/// Computes totals, returns and allocation breakdowns from a snapshot.
///
/// Pure: works only on the values the backend already computed.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, portfolio: &Portfolio) -> PortfolioSummary {
        let total_value: f64 = portfolio.items.iter().map(|i| i.value).sum();
        let total_cost: f64 = portfolio.assets().map(|a| a.cost()).sum();
        let total_pnl: f64 = portfolio.items.iter().map(|i| i.pnl).sum();
        let total_return_pct = if total_cost > 0.0 {
            (total_pnl / total_cost) * 100.0
        } else {
            0.0
        };

        let mut allocations: Vec<AllocationSlice> = portfolio
            .items
            .iter()
            .map(|item| AllocationSlice {
                id: item.asset.id,
                label: format!("{} ({})", item.asset.symbol, item.asset.asset_type),
                asset_type: item.asset.asset_type,
                value: item.value,
                allocation_pct: share(item.value, total_value),
            })
            .collect();
        allocations.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        PortfolioSummary {
            total_value,
            reported_total_value: portfolio.total_value,
            total_cost,
            total_pnl,
            total_return_pct,
            asset_count: portfolio.len(),
            allocations,
            by_type: self.allocation_by_type(portfolio),
        }
    }

    /// Value per asset type, only for types present in the snapshot.
    pub fn allocation_by_type(&self, portfolio: &Portfolio) -> Vec<TypeAllocation> {
        let total_value: f64 = portfolio.items.iter().map(|i| i.value).sum();

        let mut per_type: HashMap<AssetType, f64> = HashMap::new();
        for item in &portfolio.items {
            *per_type.entry(item.asset.asset_type).or_insert(0.0) += item.value;
        }

        let mut by_type: Vec<TypeAllocation> = per_type
            .into_iter()
            .map(|(asset_type, value)| TypeAllocation {
                asset_type,
                value,
                allocation_pct: share(value, total_value),
            })
            .collect();
        // Ties fall back to declaration order so output is deterministic.
        by_type.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| type_rank(a.asset_type).cmp(&type_rank(b.asset_type)))
        });
        by_type
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

fn share(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        (value / total) * 100.0
    } else {
        0.0
    }
}

fn type_rank(asset_type: AssetType) -> usize {
    AssetType::ALL
        .iter()
        .position(|t| *t == asset_type)
        .unwrap_or(AssetType::ALL.len())
}
