pub mod api;
pub mod errors;
pub mod models;
pub mod services;

use std::sync::Arc;

use api::{http::HttpPortfolioApi, traits::PortfolioApi};
use models::{
    analytics::PortfolioSummary,
    asset::{Asset, AssetPatch},
    form::{AssetForm, FormAction},
    portfolio::{Portfolio, Snapshot},
    price::{ItemRefresh, RefreshReport},
    settings::Settings,
};
use services::{
    analytics_service::AnalyticsService, asset_service::AssetService,
    refresh_service::RefreshService,
};
use tracing::info;

use errors::CoreError;

/// Main entry point for the Portfolio Tracker core library.
///
/// Owns the latest portfolio snapshot and the asset form. The snapshot is
/// only ever replaced wholesale by [`PortfolioTracker::reload`]; mutations
/// and price refreshes go to the backend first and then reload.
#[must_use]
pub struct PortfolioTracker {
    api: Arc<dyn PortfolioApi>,
    settings: Settings,
    snapshot: Option<Snapshot>,
    form: AssetForm,
    refresh_service: RefreshService,
    asset_service: AssetService,
    analytics_service: AnalyticsService,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("settings", &self.settings)
            .field("assets", &self.portfolio().map(|p| p.len()))
            .field("form", &self.form)
            .finish()
    }
}

impl PortfolioTracker {
    /// Build a tracker talking to the backend at `settings.base_url`.
    pub fn connect(settings: Settings) -> Result<Self, CoreError> {
        let api = HttpPortfolioApi::new(&settings)?;
        Ok(Self::with_api(Arc::new(api), settings))
    }

    /// Build a tracker over any backend implementation.
    pub fn with_api(api: Arc<dyn PortfolioApi>, settings: Settings) -> Self {
        Self {
            api,
            settings,
            snapshot: None,
            form: AssetForm::default(),
            refresh_service: RefreshService::new(),
            asset_service: AssetService::new(),
            analytics_service: AnalyticsService::new(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Snapshot ────────────────────────────────────────────────────

    /// Fetch the portfolio and replace the snapshot with it.
    /// On failure the previous snapshot is kept.
    pub async fn reload(&mut self) -> Result<&Portfolio, CoreError> {
        let portfolio = self.api.fetch_portfolio().await?;
        info!(assets = portfolio.len(), total_value = portfolio.total_value, "portfolio reloaded");
        let snapshot = self.snapshot.insert(Snapshot::new(portfolio));
        Ok(&snapshot.portfolio)
    }

    /// The last successfully fetched portfolio, if any.
    #[must_use]
    pub fn portfolio(&self) -> Option<&Portfolio> {
        self.snapshot.as_ref().map(|s| &s.portfolio)
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    // ── Prices ──────────────────────────────────────────────────────

    /// Refresh every asset's price, then reload.
    ///
    /// A no-op when nothing has been loaded yet. Fails as a whole if any
    /// lookup or write fails, in which case no reload is issued.
    pub async fn refresh_prices(&mut self) -> Result<RefreshReport, CoreError> {
        let report = self
            .refresh_service
            .refresh_all(self.api.as_ref(), self.portfolio())
            .await?;
        if !report.skipped {
            self.reload().await?;
        }
        Ok(report)
    }

    /// Refresh every asset's price independently and report per asset.
    /// Reloads when at least one asset was updated.
    pub async fn refresh_prices_settled(&mut self) -> Result<Vec<ItemRefresh>, CoreError> {
        let results = self
            .refresh_service
            .refresh_settled(self.api.as_ref(), self.portfolio())
            .await;
        if results.iter().any(|r| r.is_ok()) {
            self.reload().await?;
        }
        Ok(results)
    }

    // ── Asset Form ──────────────────────────────────────────────────

    #[must_use]
    pub fn form(&self) -> &AssetForm {
        &self.form
    }

    /// Apply one change to the form.
    pub fn dispatch(&mut self, action: FormAction) {
        let form = std::mem::take(&mut self.form);
        self.form = form.reduce(action);
    }

    /// Load the asset with `id` from the current snapshot into the form.
    pub fn edit_asset(&mut self, id: i64) -> Result<(), CoreError> {
        let asset = self
            .portfolio()
            .ok_or(CoreError::NotLoaded)?
            .find(id)
            .map(|item| item.asset.clone())
            .ok_or(CoreError::AssetNotFound(id))?;
        self.dispatch(FormAction::Edit(asset));
        Ok(())
    }

    /// Create or update from the form, then clear the form and reload.
    ///
    /// If the backend rejects the submission the form is left as it was.
    /// The form is cleared as soon as the backend accepts it, even if the
    /// follow-up reload fails.
    pub async fn submit_form(&mut self) -> Result<Asset, CoreError> {
        let asset = self
            .asset_service
            .submit(self.api.as_ref(), &self.form)
            .await?;
        self.dispatch(FormAction::Reset);
        self.reload().await?;
        Ok(asset)
    }

    // ── Asset Mutations ─────────────────────────────────────────────

    /// Apply a partial update to an asset, then reload.
    pub async fn update_asset(&mut self, id: i64, patch: AssetPatch) -> Result<Asset, CoreError> {
        let asset = self
            .asset_service
            .update(self.api.as_ref(), id, &patch)
            .await?;
        self.reload().await?;
        Ok(asset)
    }

    /// Delete an asset, then reload. The local snapshot is not touched
    /// before the reload.
    pub async fn delete_asset(&mut self, id: i64) -> Result<(), CoreError> {
        self.asset_service.delete(self.api.as_ref(), id).await?;
        self.reload().await?;
        Ok(())
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Totals, P/L and allocation for the current snapshot.
    pub fn summary(&self) -> Result<PortfolioSummary, CoreError> {
        let portfolio = self.portfolio().ok_or(CoreError::NotLoaded)?;
        Ok(self.analytics_service.summarize(portfolio))
    }

    // ── Polling ─────────────────────────────────────────────────────

    /// Reload now and then every `settings.refresh_interval` until
    /// `shutdown` resolves, calling `on_snapshot` after each successful
    /// reload. Failed reloads keep the previous snapshot.
    ///
    /// Returns the number of successful reloads, or `CoreError::Config`
    /// without polling when the refresh interval is zero.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn poll_until<S, F>(
        &mut self,
        shutdown: S,
        mut on_snapshot: F,
    ) -> Result<usize, CoreError>
    where
        S: std::future::Future<Output = ()>,
        F: FnMut(&Snapshot),
    {
        if self.settings.refresh_interval.is_zero() {
            return Err(CoreError::Config(
                "refresh_interval must be greater than zero".into(),
            ));
        }

        let mut ticker = tokio::time::interval(self.settings.refresh_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut reloads = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }

            let result = self.reload().await.map(|_| ());
            match result {
                Ok(()) => {
                    reloads += 1;
                    if let Some(snapshot) = &self.snapshot {
                        on_snapshot(snapshot);
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "portfolio reload failed, keeping previous snapshot");
                }
            }
        }
        Ok(reloads)
    }
}
