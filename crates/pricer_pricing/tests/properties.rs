//! Properties of the Monte Carlo engine and the batch merge that hold for
//! any draw batch, not just the pinned regression draws.

use std::sync::Arc;

use pricer_core::types::Greek;
use pricer_models::instruments::{OptionKind, OptionSpec};
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
use pricer_pricing::rng::FixedDrawProvider;
use pricer_pricing::task::{SimulationBatch, SimulationTask};
use proptest::prelude::*;

fn fixed_pricer(spec: OptionSpec, draws: &[f64]) -> Arc<MonteCarloPricer> {
    let config = MonteCarloConfig::builder()
        .n_iterations(draws.len())
        .build()
        .unwrap();
    let provider = Arc::new(FixedDrawProvider::new(draws.to_vec()));
    Arc::new(MonteCarloPricer::with_provider(spec, config, provider).unwrap())
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-8 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_seeded_estimates_are_finite(
        strike in 10.0f64..200.0,
        vol in 0.05f64..0.8,
        rate in -0.02f64..0.10,
        maturity in 0.05f64..3.0,
        spot in 5.0f64..400.0,
        seed in any::<u64>(),
        is_call in any::<bool>(),
    ) {
        let kind = if is_call { OptionKind::Call } else { OptionKind::Put };
        let spec = OptionSpec::new(strike, vol, rate, maturity, kind).unwrap();
        let config = MonteCarloConfig::builder().n_iterations(512).seed(seed).build().unwrap();
        let pricer = MonteCarloPricer::new(spec, config).unwrap();

        let (values, dispersion) = pricer.calculate(&[spot], &Greek::ALL).unwrap();
        for greek in Greek::ALL {
            let mean = values.get(greek).unwrap()[0];
            let std = dispersion.get(greek).unwrap()[0];
            prop_assert!(mean.is_finite(), "{greek} mean {mean}");
            prop_assert!(std.is_finite() && std >= 0.0, "{greek} std {std}");
        }
        prop_assert!(values.get(Greek::Price).unwrap()[0] >= 0.0);
    }

    #[test]
    fn prop_pathwise_put_call_parity(
        draws in prop::collection::vec(-4.0f64..4.0, 1..64),
        strike in 10.0f64..200.0,
        vol in 0.05f64..0.5,
        rate in -0.02f64..0.10,
        maturity in 0.05f64..2.0,
        spot in 5.0f64..400.0,
    ) {
        let spec = OptionSpec::new(strike, vol, rate, maturity, OptionKind::Call).unwrap();
        let call = fixed_pricer(spec, &draws).price(&[spot]).mean[0];
        let put = fixed_pricer(spec.with_kind(OptionKind::Put), &draws).price(&[spot]).mean[0];

        // C − P = DF·(S·E[g] − K) holds draw by draw, so it holds exactly
        // for the sample mean as well.
        let drift = (rate - 0.5 * vol * vol) * maturity;
        let diffusion = vol * maturity.sqrt();
        let mean_growth = draws.iter().map(|z| (drift + diffusion * z).exp()).sum::<f64>()
            / draws.len() as f64;
        let forward_value = (spot * mean_growth - strike) * (-rate * maturity).exp();
        prop_assert!(close(call - put, forward_value), "{} vs {}", call - put, forward_value);
    }

    #[test]
    fn prop_batch_sums_every_leg(
        draws in prop::collection::vec(-4.0f64..4.0, 1..32),
        strike in 20.0f64..100.0,
        spots in prop::collection::vec(10.0f64..200.0, 1..6),
    ) {
        let call = OptionSpec::new(strike, 0.25, 0.02, 1.0, OptionKind::Call).unwrap();
        let put = call.with_kind(OptionKind::Put);
        let greeks = [Greek::Delta, Greek::Rho];
        let batch = SimulationBatch::new()
            .with_task(SimulationTask::new("call", fixed_pricer(call, &draws), &greeks))
            .with_task(SimulationTask::new("put", fixed_pricer(put, &draws), &greeks));

        let (values, dispersion) = batch.run_synchronous(&spots).unwrap();
        let (c, _) = batch.tasks()[0].calculate(&spots).unwrap();
        let (p, _) = batch.tasks()[1].calculate(&spots).unwrap();

        prop_assert_eq!(values.rows(), spots.len());
        for greek in [Greek::Price, Greek::Delta, Greek::Rho] {
            prop_assert!(dispersion.is_undefined(greek));
            let merged = values.get(greek).unwrap();
            let (c, p) = (c.get(greek).unwrap(), p.get(greek).unwrap());
            for i in 0..spots.len() {
                prop_assert!(close(merged[i], c[i] + p[i]));
            }
        }
    }
}
