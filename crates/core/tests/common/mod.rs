// ═══════════════════════════════════════════════════════════════════
// Shared test helpers — in-memory backend that records every request
// ═══════════════════════════════════════════════════════════════════

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use portfolio_tracker_core::api::traits::PortfolioApi;
use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::models::asset::{Asset, AssetPatch, AssetType, NewAsset};
use portfolio_tracker_core::models::portfolio::{Portfolio, PortfolioItem};
use portfolio_tracker_core::models::price::PriceQuote;

/// One request as the backend saw it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchPortfolio,
    FetchPrice(AssetType, String),
    /// Recorded when a price lookup answers (after any configured delay).
    PriceAnswered(String),
    Create(NewAsset),
    Update(i64, AssetPatch),
    Delete(i64),
}

/// Fake backend: keeps assets in memory, computes value/P&L the way the
/// real service does, and records every call in order.
pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    assets: Mutex<Vec<Asset>>,
    prices: HashMap<(AssetType, String), f64>,
    price_delays: HashMap<String, Duration>,
    failing_prices: HashSet<String>,
    failing_updates: HashSet<i64>,
    fail_portfolio: AtomicBool,
    fail_mutations: AtomicBool,
    next_id: AtomicI64,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            assets: Mutex::new(Vec::new()),
            prices: HashMap::new(),
            price_delays: HashMap::new(),
            failing_prices: HashSet::new(),
            failing_updates: HashSet::new(),
            fail_portfolio: AtomicBool::new(false),
            fail_mutations: AtomicBool::new(false),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn with_asset(self, asset: Asset) -> Self {
        let next = asset.id + 1;
        if next > self.next_id.load(Ordering::SeqCst) {
            self.next_id.store(next, Ordering::SeqCst);
        }
        self.assets.lock().unwrap().push(asset);
        self
    }

    pub fn with_price(mut self, asset_type: AssetType, symbol: &str, price: f64) -> Self {
        self.prices.insert((asset_type, symbol.to_string()), price);
        self
    }

    /// Delay the price answer for `symbol` (needs a paused or real tokio clock).
    pub fn with_price_delay(mut self, symbol: &str, delay: Duration) -> Self {
        self.price_delays.insert(symbol.to_string(), delay);
        self
    }

    /// Price lookups for `symbol` answer with HTTP 502.
    pub fn failing_price(mut self, symbol: &str) -> Self {
        self.failing_prices.insert(symbol.to_string());
        self
    }

    /// Updates of asset `id` answer with HTTP 500.
    pub fn failing_update(mut self, id: i64) -> Self {
        self.failing_updates.insert(id);
        self
    }

    pub fn set_fail_portfolio(&self, fail: bool) {
        self.fail_portfolio.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn price_reads(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::FetchPrice(..)))
            .count()
    }

    pub fn price_writes(&self) -> Vec<(i64, AssetPatch)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Update(id, patch) => Some((id, patch)),
                _ => None,
            })
            .collect()
    }

    pub fn portfolio_reads(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::FetchPortfolio))
            .count()
    }

    pub fn stored_asset(&self, id: i64) -> Option<Asset> {
        self.assets.lock().unwrap().iter().find(|a| a.id == id).cloned()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_mutations(&self, path: &str) -> Result<(), CoreError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(CoreError::HttpStatus {
                status: 500,
                url: path.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioApi for FakeBackend {
    async fn fetch_portfolio(&self) -> Result<Portfolio, CoreError> {
        self.record(Call::FetchPortfolio);
        if self.fail_portfolio.load(Ordering::SeqCst) {
            return Err(CoreError::Network("connection refused".into()));
        }
        let assets = self.assets.lock().unwrap().clone();
        let items: Vec<PortfolioItem> = assets
            .into_iter()
            .map(|asset| {
                let value = asset.current_price * asset.amount;
                let pnl = (asset.current_price - asset.buy_price) * asset.amount;
                PortfolioItem { asset, value, pnl }
            })
            .collect();
        let total_value = items.iter().map(|i| i.value).sum();
        Ok(Portfolio { total_value, items })
    }

    async fn fetch_price(
        &self,
        asset_type: AssetType,
        symbol: &str,
    ) -> Result<PriceQuote, CoreError> {
        self.record(Call::FetchPrice(asset_type, symbol.to_string()));
        if let Some(delay) = self.price_delays.get(symbol) {
            tokio::time::sleep(*delay).await;
        }
        self.record(Call::PriceAnswered(symbol.to_string()));

        let path = format!("/api/price/{}/{symbol}", asset_type.price_source());
        if self.failing_prices.contains(symbol) {
            return Err(CoreError::HttpStatus { status: 502, url: path });
        }
        let price = self
            .prices
            .get(&(asset_type, symbol.to_string()))
            .copied()
            .ok_or(CoreError::HttpStatus { status: 404, url: path })?;
        Ok(PriceQuote {
            symbol: symbol.to_string(),
            price,
            source: "fake".into(),
        })
    }

    async fn create_asset(&self, asset: &NewAsset) -> Result<Asset, CoreError> {
        self.record(Call::Create(asset.clone()));
        self.check_mutations("/api/assets/")?;
        let created = Asset {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: asset.name.clone(),
            symbol: asset.symbol.to_uppercase(),
            asset_type: asset.asset_type,
            amount: asset.amount,
            buy_price: asset.buy_price,
            current_price: 0.0,
        };
        self.assets.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_asset(&self, id: i64, patch: &AssetPatch) -> Result<Asset, CoreError> {
        self.record(Call::Update(id, patch.clone()));
        let path = format!("/api/assets/{id}");
        self.check_mutations(&path)?;
        if self.failing_updates.contains(&id) {
            return Err(CoreError::HttpStatus { status: 500, url: path });
        }
        let mut assets = self.assets.lock().unwrap();
        let asset = assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(CoreError::HttpStatus { status: 404, url: path })?;
        if let Some(name) = &patch.name {
            asset.name = name.clone();
        }
        if let Some(symbol) = &patch.symbol {
            asset.symbol = symbol.to_uppercase();
        }
        if let Some(asset_type) = patch.asset_type {
            asset.asset_type = asset_type;
        }
        if let Some(amount) = patch.amount {
            asset.amount = amount;
        }
        if let Some(buy_price) = patch.buy_price {
            asset.buy_price = buy_price;
        }
        if let Some(current_price) = patch.current_price {
            asset.current_price = current_price;
        }
        Ok(asset.clone())
    }

    async fn delete_asset(&self, id: i64) -> Result<(), CoreError> {
        self.record(Call::Delete(id));
        let path = format!("/api/assets/{id}");
        self.check_mutations(&path)?;
        let mut assets = self.assets.lock().unwrap();
        let before = assets.len();
        assets.retain(|a| a.id != id);
        if assets.len() == before {
            return Err(CoreError::HttpStatus { status: 404, url: path });
        }
        Ok(())
    }
}

pub fn asset(id: i64, symbol: &str, asset_type: AssetType, amount: f64, buy: f64, current: f64) -> Asset {
    Asset {
        id,
        name: format!("{symbol} holding"),
        symbol: symbol.to_string(),
        asset_type,
        amount,
        buy_price: buy,
        current_price: current,
    }
}

pub fn item(asset: Asset) -> PortfolioItem {
    let value = asset.value();
    let pnl = value - asset.cost();
    PortfolioItem { asset, value, pnl }
}

pub fn portfolio_of(assets: Vec<Asset>) -> Portfolio {
    let items: Vec<PortfolioItem> = assets.into_iter().map(item).collect();
    let total_value = items.iter().map(|i| i.value).sum();
    Portfolio { total_value, items }
}

/// A four-asset backend with one holding of each type and a price for each.
pub fn mixed_backend() -> FakeBackend {
    FakeBackend::new()
        .with_asset(asset(1, "ACME", AssetType::Stock, 10.0, 8.0, 10.0))
        .with_asset(asset(2, "BTC", AssetType::Crypto, 0.5, 30000.0, 40000.0))
        .with_asset(asset(3, "UST10", AssetType::Bond, 5.0, 100.0, 98.0))
        .with_asset(asset(4, "EUR", AssetType::Cash, 1000.0, 1.05, 1.08))
        .with_price(AssetType::Stock, "ACME", 12.0)
        .with_price(AssetType::Crypto, "BTC", 42000.0)
        .with_price(AssetType::Bond, "UST10", 100.0)
        .with_price(AssetType::Cash, "EUR", 1.1)
}
