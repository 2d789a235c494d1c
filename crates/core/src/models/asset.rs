use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// The type/category of a tracked asset.
/// Determines which price endpoint is queried for market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Stocks / equities (AAPL, MSFT, etc.)
    #[default]
    Stock,
    /// Cryptocurrencies (BTC, ETH, etc.)
    Crypto,
    /// Bonds / fixed income
    Bond,
    /// Cash holdings, priced as an FX rate to USD
    Cash,
}

impl AssetType {
    pub const ALL: [AssetType; 4] = [
        AssetType::Stock,
        AssetType::Crypto,
        AssetType::Bond,
        AssetType::Cash,
    ];

    /// Path segment of the price endpoint for this type:
    /// `/api/price/{segment}/{symbol}`.
    pub fn price_source(&self) -> &'static str {
        match self {
            AssetType::Stock => "stock",
            AssetType::Crypto => "crypto",
            AssetType::Bond => "bond",
            AssetType::Cash => "cash",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.price_source())
    }
}

impl std::str::FromStr for AssetType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stock" => Ok(AssetType::Stock),
            "crypto" => Ok(AssetType::Crypto),
            "bond" => Ok(AssetType::Bond),
            "cash" => Ok(AssetType::Cash),
            other => Err(CoreError::ValidationError(format!(
                "Unknown asset type '{other}': expected stock, crypto, bond or cash"
            ))),
        }
    }
}

/// A single holding as stored by the backend.
///
/// **Equality** is based solely on `id`; the backend assigns it and never
/// reuses it, so two copies of the same asset with different prices are
/// still the same holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,

    /// Human-readable name (e.g., "Apple Inc.", "Bitcoin")
    pub name: String,

    /// Lookup key for the price source (e.g., "AAPL", "BTC", "EUR")
    pub symbol: String,

    /// Asset category, determines the price endpoint
    #[serde(rename = "type")]
    pub asset_type: AssetType,

    /// Held quantity
    pub amount: f64,

    pub buy_price: f64,

    /// Last price written by a manual edit or a price refresh
    pub current_price: f64,
}

impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Asset {}

impl Asset {
    /// Market value of the holding at its current price.
    pub fn value(&self) -> f64 {
        self.amount * self.current_price
    }

    /// Cost of the holding at its buy price.
    pub fn cost(&self) -> f64 {
        self.amount * self.buy_price
    }
}

/// Body of `POST /api/assets/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAsset {
    pub name: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub amount: f64,
    pub buy_price: f64,
}

impl NewAsset {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        asset_type: AssetType,
        amount: f64,
        buy_price: f64,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            asset_type,
            amount,
            buy_price,
        }
    }

    /// Reject payloads that cannot be priced or that the backend would
    /// refuse: a blank symbol, negative or non-finite numbers. The name is
    /// free text and may be empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        non_empty("symbol", &self.symbol)?;
        non_negative("amount", self.amount)?;
        non_negative("buy_price", self.buy_price)?;
        Ok(())
    }
}

/// Body of `PUT /api/assets/{id}`. Absent fields are left untouched by the
/// backend and are omitted from the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<AssetType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
}

impl AssetPatch {
    /// The write issued by a price refresh: `{"current_price": price}`.
    pub fn price(price: f64) -> Self {
        Self {
            current_price: Some(price),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.is_empty() {
            return Err(CoreError::ValidationError(
                "Update must change at least one field".into(),
            ));
        }
        if let Some(symbol) = &self.symbol {
            non_empty("symbol", symbol)?;
        }
        for (field, value) in [
            ("amount", self.amount),
            ("buy_price", self.buy_price),
            ("current_price", self.current_price),
        ] {
            if let Some(v) = value {
                non_negative(field, v)?;
            }
        }
        Ok(())
    }
}

fn non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::ValidationError(format!("{field} must not be empty")));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::ValidationError(format!(
            "{field} must be a finite, non-negative number (got {value})"
        )));
    }
    Ok(())
}
