use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::asset::{Asset, AssetPatch, AssetType, NewAsset};
use crate::models::portfolio::Portfolio;
use crate::models::price::PriceQuote;

/// Everything the client needs from the portfolio backend.
///
/// `HttpPortfolioApi` talks to the real service; tests swap in in-memory
/// implementations. Services only ever see this trait.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PortfolioApi: Send + Sync {
    /// `GET /api/portfolio`
    async fn fetch_portfolio(&self) -> Result<Portfolio, CoreError>;

    /// `GET /api/price/{type}/{symbol}`
    async fn fetch_price(
        &self,
        asset_type: AssetType,
        symbol: &str,
    ) -> Result<PriceQuote, CoreError>;

    /// `POST /api/assets/`
    async fn create_asset(&self, asset: &NewAsset) -> Result<Asset, CoreError>;

    /// `PUT /api/assets/{id}`
    async fn update_asset(&self, id: i64, patch: &AssetPatch) -> Result<Asset, CoreError>;

    /// `DELETE /api/assets/{id}`
    async fn delete_asset(&self, id: i64) -> Result<(), CoreError>;
}
