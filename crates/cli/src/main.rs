//! Portfolio tracker terminal front end.
//!
//! Run with:
//! ```bash
//! portfolio-tracker --api-url http://localhost:8000 show
//! portfolio-tracker add --name Bitcoin --symbol BTC --type crypto --amount 0.5 --buy-price 30000
//! portfolio-tracker refresh
//! ```

mod args;
mod logging;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use portfolio_tracker_core::models::asset::AssetPatch;
use portfolio_tracker_core::models::form::FormAction;
use portfolio_tracker_core::PortfolioTracker;
use tracing::{info, warn};

use args::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let settings = cli.settings();
    info!(base_url = %settings.base_url, "using backend");

    let mut tracker = PortfolioTracker::connect(settings).context("invalid configuration")?;

    match cli.command {
        Command::Show => {
            tracker.reload().await.context("failed to load portfolio")?;
            print_portfolio(&tracker, cli.json)?;
        }

        Command::Add {
            name,
            symbol,
            asset_type,
            amount,
            buy_price,
        } => {
            for action in [
                FormAction::SetName(name),
                FormAction::SetSymbol(symbol),
                FormAction::SetType(asset_type),
                FormAction::SetAmount(amount),
                FormAction::SetBuyPrice(buy_price),
            ] {
                tracker.dispatch(action);
            }
            let created = tracker.submit_form().await.context("failed to add asset")?;
            println!("Added asset {} ({})", created.id, created.symbol);
            print_portfolio(&tracker, cli.json)?;
        }

        Command::Edit {
            id,
            name,
            symbol,
            asset_type,
            amount,
            buy_price,
        } => {
            tracker.reload().await.context("failed to load portfolio")?;
            tracker.edit_asset(id)?;
            let overrides = [
                name.map(FormAction::SetName),
                symbol.map(FormAction::SetSymbol),
                asset_type.map(FormAction::SetType),
                amount.map(FormAction::SetAmount),
                buy_price.map(FormAction::SetBuyPrice),
            ];
            for action in overrides.into_iter().flatten() {
                tracker.dispatch(action);
            }
            let updated = tracker
                .submit_form()
                .await
                .with_context(|| format!("failed to update asset {id}"))?;
            println!("Saved asset {} ({})", updated.id, updated.symbol);
            print_portfolio(&tracker, cli.json)?;
        }

        Command::SetPrice { id, price } => {
            tracker
                .update_asset(id, AssetPatch::price(price))
                .await
                .with_context(|| format!("failed to set price of asset {id}"))?;
            print_portfolio(&tracker, cli.json)?;
        }

        Command::Delete { id } => {
            tracker
                .delete_asset(id)
                .await
                .with_context(|| format!("failed to delete asset {id}"))?;
            println!("Deleted asset {id}");
            print_portfolio(&tracker, cli.json)?;
        }

        Command::Refresh { settled } => {
            tracker.reload().await.context("failed to load portfolio")?;
            if settled {
                let results = tracker.refresh_prices_settled().await?;
                print!("{}", render::settled_report(&results));
            } else {
                let report = tracker
                    .refresh_prices()
                    .await
                    .context("price refresh failed, no prices were reloaded")?;
                print!("{}", render::refresh_report(&report));
            }
            print_portfolio(&tracker, cli.json)?;
        }

        Command::Watch => {
            let json = cli.json;
            let shutdown = until_signal(tokio::signal::ctrl_c());
            let reloads = tracker
                .poll_until(shutdown, |snapshot| {
                    println!("── {} ──", snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"));
                    if json {
                        match serde_json::to_string_pretty(&snapshot.portfolio) {
                            Ok(text) => println!("{text}"),
                            Err(e) => tracing::error!(error = %e, "failed to encode portfolio"),
                        }
                    } else {
                        print!("{}", render::assets_table(&snapshot.portfolio));
                    }
                })
                .await
                .context("cannot watch portfolio")?;
            info!(reloads, "stopped watching");
        }
    }

    Ok(())
}

/// Resolves when `signal` does. A listener that fails to install is
/// logged and also resolves, ending `watch`.
async fn until_signal<F>(signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "cannot listen for Ctrl-C, stopping");
    }
}

fn print_portfolio(tracker: &PortfolioTracker, json: bool) -> Result<()> {
    let Some(portfolio) = tracker.portfolio() else {
        return Ok(());
    };
    let summary = tracker.summary()?;
    if json {
        let body = serde_json::json!({ "portfolio": portfolio, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{}", render::summary(&summary));
        println!();
        print!("{}", render::assets_table(portfolio));
    }
    Ok(())
}
