use futures::future::{join_all, try_join_all};
use tracing::{debug, info, warn};

use crate::api::traits::PortfolioApi;
use crate::errors::CoreError;
use crate::models::asset::{Asset, AssetPatch};
use crate::models::portfolio::Portfolio;
use crate::models::price::{ItemRefresh, PriceUpdate, RefreshReport};

/// Refreshes every asset's `current_price` from its type's price endpoint.
///
/// Two phases, each fanned out concurrently on the calling task:
/// 1. one price lookup per asset,
/// 2. one `{current_price}` write per asset.
///
/// The caller reloads the snapshot afterwards; this service never touches
/// local state.
pub struct RefreshService;

impl RefreshService {
    pub fn new() -> Self {
        Self
    }

    /// All-or-nothing refresh.
    ///
    /// - No snapshot → skipped, no requests.
    /// - Any lookup fails → error, no writes are issued.
    /// - Any write fails → error (other writes may already have landed).
    pub async fn refresh_all(
        &self,
        api: &dyn PortfolioApi,
        portfolio: Option<&Portfolio>,
    ) -> Result<RefreshReport, CoreError> {
        let Some(portfolio) = portfolio else {
            debug!("price refresh skipped: no portfolio loaded");
            return Ok(RefreshReport::skipped());
        };

        // Phase 1: look up every price. try_join_all drops the remaining
        // lookups on the first error.
        let updates = try_join_all(portfolio.assets().map(|asset| lookup(api, asset))).await?;

        // Phase 2: write each asset's own result back.
        try_join_all(updates.iter().map(|u| write(api, u))).await?;

        info!(assets = updates.len(), "prices refreshed");
        Ok(RefreshReport {
            skipped: false,
            updated: updates,
        })
    }

    /// Per-item refresh: every lookup runs, each successful lookup is
    /// written, and each asset reports its own outcome.
    pub async fn refresh_settled(
        &self,
        api: &dyn PortfolioApi,
        portfolio: Option<&Portfolio>,
    ) -> Vec<ItemRefresh> {
        let Some(portfolio) = portfolio else {
            return Vec::new();
        };

        let results = join_all(portfolio.assets().map(|asset| async move {
            let result = match lookup(api, asset).await {
                Ok(update) => write(api, &update).await.map(|_| update.price),
                Err(e) => Err(e),
            };
            if let Err(e) = &result {
                warn!(id = asset.id, symbol = %asset.symbol, error = %e, "price refresh failed");
            }
            ItemRefresh {
                id: asset.id,
                symbol: asset.symbol.clone(),
                asset_type: asset.asset_type,
                result,
            }
        }))
        .await;

        let ok = results.iter().filter(|r| r.is_ok()).count();
        info!(ok, failed = results.len() - ok, "settled price refresh finished");
        results
    }
}

impl Default for RefreshService {
    fn default() -> Self {
        Self::new()
    }
}

async fn lookup(api: &dyn PortfolioApi, asset: &Asset) -> Result<PriceUpdate, CoreError> {
    let quote = api.fetch_price(asset.asset_type, &asset.symbol).await?;
    PriceUpdate::checked(asset.id, asset.symbol.clone(), asset.asset_type, quote.price)
}

async fn write(api: &dyn PortfolioApi, update: &PriceUpdate) -> Result<(), CoreError> {
    api.update_asset(update.id, &AssetPatch::price(update.price))
        .await
        .map(|_| ())
}
