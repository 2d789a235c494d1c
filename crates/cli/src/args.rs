//! CLI argument parsing for the portfolio tracker.
//!
//! Uses clap with environment variable fallbacks for the connection settings.

use std::time::Duration;

use clap::{Parser, Subcommand, ValueHint};
use portfolio_tracker_core::models::asset::AssetType;
use portfolio_tracker_core::models::settings::{
    Settings, DEFAULT_BASE_URL, DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Portfolio Tracker - track holdings, value and allocation
///
/// Talks to the portfolio backend: lists assets, adds/edits/deletes them
/// and refreshes market prices per asset type.
#[derive(Parser, Debug)]
#[command(name = "portfolio-tracker", author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL
    #[arg(
        long = "api-url",
        env = "PORTFOLIO_API_URL",
        default_value = DEFAULT_BASE_URL,
        value_hint = ValueHint::Url,
        global = true
    )]
    pub api_url: String,

    /// Seconds between background reloads in `watch`
    #[arg(
        long = "interval",
        env = "PORTFOLIO_REFRESH_SECS",
        default_value_t = DEFAULT_REFRESH_INTERVAL_SECS,
        global = true
    )]
    pub interval: u64,

    /// Per-request timeout in seconds
    #[arg(
        long = "timeout",
        env = "PORTFOLIO_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        global = true
    )]
    pub timeout: u64,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show total value, allocation and all assets
    Show,

    /// Add a new asset
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        symbol: String,
        /// stock, crypto, bond or cash
        #[arg(long = "type", default_value = "stock")]
        asset_type: AssetType,
        #[arg(long, default_value_t = 0.0)]
        amount: f64,
        #[arg(long = "buy-price", default_value_t = 0.0)]
        buy_price: f64,
    },

    /// Edit an existing asset; omitted fields keep their current value
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long = "type")]
        asset_type: Option<AssetType>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long = "buy-price")]
        buy_price: Option<f64>,
    },

    /// Set an asset's current price by hand
    SetPrice { id: i64, price: f64 },

    /// Delete an asset
    Delete { id: i64 },

    /// Fetch fresh prices for every asset and write them back
    Refresh {
        /// Keep going when some lookups fail and report per asset
        #[arg(long)]
        settled: bool,
    },

    /// Reload and print the portfolio every `--interval` seconds until Ctrl-C
    Watch,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            base_url: self.api_url.clone(),
            refresh_interval: Duration::from_secs(self.interval),
            request_timeout: Duration::from_secs(self.timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_parses_type() {
        let cli = Cli::try_parse_from([
            "portfolio-tracker", "add", "--name", "Bitcoin", "--symbol", "BTC", "--type", "crypto",
            "--amount", "0.5", "--buy-price", "30000",
        ])
        .unwrap();
        match cli.command {
            Command::Add { asset_type, amount, .. } => {
                assert_eq!(asset_type, AssetType::Crypto);
                assert_eq!(amount, 0.5);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result = Cli::try_parse_from([
            "portfolio-tracker", "add", "--name", "Gold", "--symbol", "XAU", "--type", "metal",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn settings_from_flags() {
        let cli = Cli::try_parse_from([
            "portfolio-tracker", "--api-url", "http://example.test", "--interval", "5", "show",
        ])
        .unwrap();
        let settings = cli.settings();
        assert_eq!(settings.base_url, "http://example.test");
        assert_eq!(settings.refresh_interval, Duration::from_secs(5));
    }
}
