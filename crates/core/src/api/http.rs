use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::asset::{Asset, AssetPatch, AssetType, NewAsset};
use crate::models::portfolio::Portfolio;
use crate::models::price::PriceQuote;
use crate::models::settings::Settings;
use super::traits::PortfolioApi;

/// reqwest client for the portfolio backend.
///
/// - **Portfolio**: `GET /api/portfolio`
/// - **Prices**: `GET /api/price/{stock|crypto|bond|cash}/{symbol}`
/// - **Assets**: `POST /api/assets/`, `PUT|DELETE /api/assets/{id}`
///
/// Paths are appended to the configured base URL segment by segment, so a
/// symbol like "BRK/B" stays one (percent-encoded) segment.
pub struct HttpPortfolioApi {
    client: Client,
    base_url: Url,
}

impl HttpPortfolioApi {
    pub fn new(settings: &Settings) -> Result<Self, CoreError> {
        settings.validate()?;

        let base_url = Url::parse(settings.base_url.trim()).map_err(|e| {
            CoreError::Config(format!("Invalid base URL '{}': {e}", settings.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CoreError::Config(format!(
                "Base URL '{}' cannot carry a path",
                settings.base_url
            )));
        }

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(settings.request_timeout);
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn portfolio_url(&self) -> Result<Url, CoreError> {
        self.endpoint(&["api", "portfolio"])
    }

    /// Price endpoint for `(asset_type, symbol)`. The asset type alone picks
    /// the source.
    pub fn price_url(&self, asset_type: AssetType, symbol: &str) -> Result<Url, CoreError> {
        self.endpoint(&["api", "price", asset_type.price_source(), symbol])
    }

    /// Collection endpoint, with the trailing slash the backend routes on.
    pub fn assets_url(&self) -> Result<Url, CoreError> {
        self.endpoint(&["api", "assets", ""])
    }

    pub fn asset_url(&self, id: i64) -> Result<Url, CoreError> {
        let id = id.to_string();
        self.endpoint(&["api", "assets", &id])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CoreError::Config(format!("Base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

// ── Response handling ───────────────────────────────────────────────

fn check_status(resp: Response) -> Result<Response, CoreError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(CoreError::HttpStatus {
            status: status.as_u16(),
            url: resp.url().path().to_string(),
        });
    }
    Ok(resp)
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, CoreError> {
    let resp = check_status(resp)?;
    let endpoint = resp.url().path().to_string();
    resp.json::<T>().await.map_err(|e| {
        if e.is_decode() {
            CoreError::MalformedResponse {
                endpoint,
                message: e.to_string(),
            }
        } else {
            // Body cut off or timed out mid-read.
            CoreError::from(e)
        }
    })
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PortfolioApi for HttpPortfolioApi {
    async fn fetch_portfolio(&self) -> Result<Portfolio, CoreError> {
        let url = self.portfolio_url()?;
        debug!(%url, "fetching portfolio");
        let resp = self.client.get(url).send().await?;
        read_json(resp).await
    }

    async fn fetch_price(
        &self,
        asset_type: AssetType,
        symbol: &str,
    ) -> Result<PriceQuote, CoreError> {
        let url = self.price_url(asset_type, symbol)?;
        debug!(%url, %asset_type, symbol, "fetching price");
        let resp = self.client.get(url).send().await?;
        read_json(resp).await
    }

    async fn create_asset(&self, asset: &NewAsset) -> Result<Asset, CoreError> {
        let url = self.assets_url()?;
        debug!(%url, symbol = %asset.symbol, "creating asset");
        let resp = self.client.post(url).json(asset).send().await?;
        read_json(resp).await
    }

    async fn update_asset(&self, id: i64, patch: &AssetPatch) -> Result<Asset, CoreError> {
        let url = self.asset_url(id)?;
        debug!(%url, "updating asset");
        let resp = self.client.put(url).json(patch).send().await?;
        read_json(resp).await
    }

    async fn delete_asset(&self, id: i64) -> Result<(), CoreError> {
        let url = self.asset_url(id)?;
        debug!(%url, "deleting asset");
        let resp = self.client.delete(url).send().await?;
        // Body is `{"ok": true}`; the status is all that matters.
        check_status(resp)?;
        Ok(())
    }
}
