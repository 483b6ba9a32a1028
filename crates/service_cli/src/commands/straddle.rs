//! Straddle command implementation
//!
//! Runs a call and a put leg as a simulation batch, either directly or
//! through the asynchronous task workers, and sets the merged result
//! against the closed-form straddle.

use pricer_core::types::{DispersionTable, Greek, GreekTable};
use pricer_models::analytical::AnalyticPricer;
use pricer_models::instruments::OptionKind;
use pricer_pricing::task::SimulationBatch;
use serde::Serialize;
use tracing::{info, warn};

use super::{fmt_value, print_json, print_table, Format};
use crate::config::CliConfig;
use crate::Result;

#[derive(Debug, Serialize)]
struct StraddleReport {
    spots: Vec<f64>,
    concurrent: bool,
    monte_carlo: GreekTable,
    dispersion: DispersionTable,
    analytic: GreekTable,
}

/// Closed-form call plus put.
pub fn analytic_straddle(
    config: &CliConfig,
    spots: &[f64],
    greeks: &[Greek],
) -> Result<GreekTable> {
    let call = AnalyticPricer::new(config.option_spec(OptionKind::Call)?);
    let put = AnalyticPricer::new(config.option_spec(OptionKind::Put)?);
    let mut table = call.calculate(spots, greeks)?;
    table.accumulate(&put.calculate(spots, greeks)?)?;
    Ok(table)
}

/// Builds the two-leg batch and runs it.
pub fn simulate(
    config: &CliConfig,
    spots: &[f64],
    greeks: &[Greek],
    concurrent: bool,
) -> Result<(GreekTable, DispersionTable)> {
    let mut batch = SimulationBatch::straddle(
        config.option_spec(OptionKind::Call)?,
        config.monte_carlo_config()?,
        greeks,
    )?;

    if !concurrent {
        return Ok(batch.run_synchronous(spots)?);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()?;
    let output = runtime.block_on(async {
        batch.start()?;
        let result = batch.run_concurrent(spots).await;
        // Workers are always joined, even when the run failed.
        if let Err(e) = batch.join().await {
            warn!(error = %e, "straddle workers did not stop cleanly");
        }
        result
    })?;
    Ok(output)
}

/// Run the straddle command
pub fn run(
    config: &CliConfig,
    spots: &[f64],
    greeks: &[Greek],
    concurrent: bool,
    format: Format,
) -> Result<()> {
    info!(spots = spots.len(), concurrent, "pricing straddle");
    let (values, dispersion) = simulate(config, spots, greeks, concurrent)?;
    let analytic = analytic_straddle(config, spots, greeks)?;

    match format {
        Format::Json => print_json(&StraddleReport {
            spots: spots.to_vec(),
            concurrent,
            monte_carlo: values,
            dispersion,
            analytic,
        })?,
        Format::Table => {
            let mut cells = Vec::new();
            for (greek, mc) in values.columns() {
                let reference = analytic.get(greek);
                let std_dev = dispersion.get(greek);
                for (i, &spot) in spots.iter().enumerate() {
                    cells.push(vec![
                        greek.to_string(),
                        fmt_value(spot),
                        fmt_value(mc[i]),
                        std_dev.map_or_else(|| "undefined".to_string(), |s| fmt_value(s[i])),
                        reference.map_or_else(String::new, |r| fmt_value(r[i])),
                    ]);
                }
            }
            print_table(&["Greek", "Spot", "MC straddle", "MC std", "Analytic"], &cells);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_config() -> CliConfig {
        let mut config = CliConfig::default();
        config.monte_carlo.iterations = 10_000;
        config.monte_carlo.seed = Some(3);
        config
    }

    #[test]
    fn test_analytic_straddle_is_call_plus_put() {
        let config = small_config();
        let spots = [40.0, 50.0];
        let table = analytic_straddle(&config, &spots, &[Greek::Delta]).unwrap();

        let call = AnalyticPricer::new(config.option_spec(OptionKind::Call).unwrap());
        let put = AnalyticPricer::new(config.option_spec(OptionKind::Put).unwrap());
        let expected: Vec<f64> = call
            .delta(&spots)
            .iter()
            .zip(put.delta(&spots))
            .map(|(c, p)| c + p)
            .collect();

        let got = table.get(Greek::Delta).unwrap();
        for i in 0..spots.len() {
            assert_relative_eq!(got[i], expected[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_concurrent_and_synchronous_agree_when_seeded() {
        let config = small_config();
        let spots = [45.0, 55.0];
        let sync = simulate(&config, &spots, &[Greek::Vega], false).unwrap();
        let conc = simulate(&config, &spots, &[Greek::Vega], true).unwrap();
        assert_eq!(sync, conc);
        assert!(sync.1.is_undefined(Greek::Price));
    }
}
