//! Bounds command implementation
//!
//! Checks closed-form prices against the European no-arbitrage bounds and
//! prints intrinsic value alongside.

use pricer_models::analytical::{intrinsic_value, AnalyticPricer, EuropeanBounds};
use pricer_models::instruments::OptionKind;
use serde::Serialize;
use tracing::{info, warn};

use super::{fmt_value, print_json, print_table, Format};
use crate::config::CliConfig;
use crate::Result;

/// Absolute slack allowed before a price counts as outside its bounds.
const BOUND_TOLERANCE: f64 = 1e-9;

/// Price, bounds and intrinsic value at one spot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundsRow {
    pub spot: f64,
    pub price: f64,
    pub lower: f64,
    pub upper: f64,
    pub intrinsic: f64,
    pub violated: bool,
}

/// Evaluates every spot.
pub fn evaluate(config: &CliConfig, kind: OptionKind, spots: &[f64]) -> Result<Vec<BoundsRow>> {
    let spec = config.option_spec(kind)?;
    let prices = AnalyticPricer::new(spec).price(spots);
    let bounds = EuropeanBounds::new(&spec);
    let lower = bounds.lower(spots);
    let upper = bounds.upper(spots);
    let intrinsic = intrinsic_value(kind, spec.strike(), spots);
    let violations = bounds.violations(spots, &prices, BOUND_TOLERANCE);

    if !violations.is_empty() {
        warn!(%kind, count = violations.len(), "prices outside no-arbitrage bounds");
    }

    Ok(spots
        .iter()
        .enumerate()
        .map(|(i, &spot)| BoundsRow {
            spot,
            price: prices[i],
            lower: lower[i],
            upper: upper[i],
            intrinsic: intrinsic[i],
            violated: violations.contains(&i),
        })
        .collect())
}

/// Run the bounds command
pub fn run(config: &CliConfig, kind: OptionKind, spots: &[f64], format: Format) -> Result<()> {
    info!(%kind, spots = spots.len(), "checking bounds");
    let rows = evaluate(config, kind, spots)?;

    match format {
        Format::Json => print_json(&rows)?,
        Format::Table => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        fmt_value(r.spot),
                        fmt_value(r.price),
                        fmt_value(r.lower),
                        fmt_value(r.upper),
                        fmt_value(r.intrinsic),
                        if r.violated { "VIOLATED" } else { "ok" }.to_string(),
                    ]
                })
                .collect();
            print_table(
                &["Spot", "Price", "Lower", "Upper", "Intrinsic", "Check"],
                &cells,
            );
        }
    }
    Ok(())
}
