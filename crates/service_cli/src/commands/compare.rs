//! Compare command implementation
//!
//! Prices one option with the closed-form and the Monte Carlo engine on the
//! same spots and reports how far apart they are in units of the Monte
//! Carlo standard deviation.

use pricer_core::types::Greek;
use pricer_models::analytical::AnalyticPricer;
use pricer_models::instruments::OptionKind;
use pricer_pricing::mc::MonteCarloPricer;
use serde::Serialize;
use tracing::info;

use super::{fmt_value, print_json, print_table, Format};
use crate::config::CliConfig;
use crate::Result;

/// One Greek at one spot from both engines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub greek: Greek,
    pub spot: f64,
    pub analytic: f64,
    pub mc_mean: f64,
    pub mc_std: f64,
    /// |MC − analytic| / std; infinite when std is zero and they differ.
    pub deviation: f64,
}

#[derive(Debug, Serialize)]
struct Comparison {
    analytic: String,
    monte_carlo: String,
    rows: Vec<ComparisonRow>,
}

/// Runs both engines and pairs their outputs, Greek-major.
pub fn compare(
    config: &CliConfig,
    kind: OptionKind,
    spots: &[f64],
    greeks: &[Greek],
) -> Result<(AnalyticPricer, MonteCarloPricer, Vec<ComparisonRow>)> {
    let spec = config.option_spec(kind)?;
    let analytic = AnalyticPricer::new(spec);
    let mc = MonteCarloPricer::new(spec, config.monte_carlo_config()?)?;

    let expected = analytic.calculate(spots, greeks)?;
    let (values, dispersion) = mc.calculate(spots, greeks)?;

    let mut rows = Vec::with_capacity(expected.len() * spots.len());
    for (greek, reference) in expected.columns() {
        let (Some(mean), Some(std_dev)) = (values.get(greek), dispersion.get(greek)) else {
            continue;
        };
        for (i, &spot) in spots.iter().enumerate() {
            let error = (mean[i] - reference[i]).abs();
            rows.push(ComparisonRow {
                greek,
                spot,
                analytic: reference[i],
                mc_mean: mean[i],
                mc_std: std_dev[i],
                deviation: if error == 0.0 { 0.0 } else { error / std_dev[i] },
            });
        }
    }
    Ok((analytic, mc, rows))
}

/// Run the compare command
pub fn run(
    config: &CliConfig,
    kind: OptionKind,
    spots: &[f64],
    greeks: &[Greek],
    format: Format,
) -> Result<()> {
    info!(%kind, spots = spots.len(), "comparing engines");
    let (analytic, mc, rows) = compare(config, kind, spots, greeks)?;

    match format {
        Format::Json => print_json(&Comparison {
            analytic: analytic.spec().to_string(),
            monte_carlo: mc.to_string(),
            rows,
        })?,
        Format::Table => {
            println!("{}", analytic.spec());
            println!("{mc}");
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        r.greek.to_string(),
                        fmt_value(r.spot),
                        fmt_value(r.analytic),
                        fmt_value(r.mc_mean),
                        fmt_value(r.mc_std),
                        format!("{:.3}", r.deviation),
                    ]
                })
                .collect();
            print_table(
                &["Greek", "Spot", "Analytic", "MC mean", "MC std", "|Δ|/std"],
                &cells,
            );
        }
    }
    Ok(())
}
