use std::fmt::Write as _;

use portfolio_tracker_core::models::analytics::PortfolioSummary;
use portfolio_tracker_core::models::portfolio::Portfolio;
use portfolio_tracker_core::models::price::{ItemRefresh, RefreshReport};

/// Header card plus allocation, as plain text.
pub fn summary(summary: &PortfolioSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Portfolio Value: ${:.2}", summary.reported_total_value);
    let _ = writeln!(
        out,
        "P/L: {:+.2} ({:+.2}%) on cost {:.2}",
        summary.total_pnl, summary.total_return_pct, summary.total_cost
    );

    if !summary.by_type.is_empty() {
        let _ = writeln!(out, "\nBy type:");
        for t in &summary.by_type {
            let _ = writeln!(out, "  {:<8} {:>14.2} {:>6.1}%", t.asset_type, t.value, t.allocation_pct);
        }
    }
    if !summary.allocations.is_empty() {
        let _ = writeln!(out, "\nAllocation:");
        for slice in &summary.allocations {
            let _ = writeln!(out, "  {:<20} {:>14.2} {:>6.1}%", slice.label, slice.value, slice.allocation_pct);
        }
    }
    out
}

/// The assets table: one row per item, in backend order.
pub fn assets_table(portfolio: &Portfolio) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<10} {:<7} {:>12} {:>14} {:>14} {:>12}",
        "ID", "Symbol", "Type", "Amount", "Current Price", "Value", "P/L"
    );
    if portfolio.is_empty() {
        let _ = writeln!(out, "(no assets)");
        return out;
    }
    for item in &portfolio.items {
        let a = &item.asset;
        let _ = writeln!(
            out,
            "{:>4}  {:<10} {:<7} {:>12} {:>14} {:>14} {:>12.2}",
            a.id,
            a.symbol,
            a.asset_type.to_string(),
            a.amount,
            format!("${:.2}", a.current_price),
            format!("${:.2}", item.value),
            item.pnl,
        );
    }
    out
}

pub fn refresh_report(report: &RefreshReport) -> String {
    if report.skipped {
        return "Nothing to refresh: portfolio not loaded\n".to_string();
    }
    let mut out = format!("Updated {} price(s)\n", report.len());
    for u in &report.updated {
        let _ = writeln!(out, "  {:<10} {:<7} {:.4}", u.symbol, u.asset_type.to_string(), u.price);
    }
    out
}

pub fn settled_report(results: &[ItemRefresh]) -> String {
    let ok = results.iter().filter(|r| r.is_ok()).count();
    let mut out = format!("Updated {ok} of {} price(s)\n", results.len());
    for r in results {
        match &r.result {
            Ok(price) => {
                let _ = writeln!(out, "  {:<10} {:<7} {:.4}", r.symbol, r.asset_type.to_string(), price);
            }
            Err(e) => {
                let _ = writeln!(out, "  {:<10} {:<7} FAILED: {e}", r.symbol, r.asset_type.to_string());
            }
        }
    }
    out
}
