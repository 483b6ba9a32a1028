//! Analytic engine against externally computed reference values.
//!
//! Inputs: K = 50, σ = 0.2, r = 0.01, T = 1, spots = [25, 45, 65].
//! The reference source reports vega and rho per unit move and theta per
//! year with the opposite sign; the conversions below map them onto the
//! engine's reporting units.

use approx::assert_abs_diff_eq;
use pricer_core::types::Greek;
use pricer_models::analytical::{AnalyticPricer, DAYS_PER_YEAR, PER_POINT};
use pricer_models::instruments::{OptionKind, OptionSpec};

const SPOTS: [f64; 3] = [25.0, 45.0, 65.0];
const TOLERANCE: f64 = 1e-5;

const CALL_PRICE: [f64; 3] = [0.000_570_232_0, 1.930_706_657_4, 15.948_160_099_0];
const PUT_PRICE: [f64; 3] = [24.503_061_919_5, 6.433_198_344_9, 0.450_651_786_5];
const CALL_DELTA: [f64; 3] = [0.000_457_068_2, 0.353_160_215_6, 0.928_104_872_5];
const PUT_DELTA: [f64; 3] = [-0.999_542_931_8, -0.646_839_784_4, -0.071_895_127_5];
const GAMMA: [f64; 3] = [0.000_327_039_8, 0.041_289_245_9, 0.010_542_414_5];
const VEGA_RAW: [f64; 3] = [0.040_879_972_9, 16.722_144_601_4, 8.908_340_275_0];
const CALL_RHO_RAW: [f64; 3] = [0.010_856_472_4, 13.961_503_044_8, 44.378_656_610_8];
const PUT_RHO_RAW: [f64; 3] = [-49.491_635_215_0, -35.540_988_642_6, -5.123_835_076_6];
const CALL_THETA_RAW: [f64; 3] = [0.004_196_562_0, 1.811_829_490_6, 1.334_620_593_6];
const PUT_THETA_RAW: [f64; 3] = [-0.490_828_354_9, 1.316_804_573_7, 0.839_595_676_7];

fn pricer(kind: OptionKind) -> AnalyticPricer {
    AnalyticPricer::new(OptionSpec::new(50.0, 0.2, 0.01, 1.0, kind).unwrap())
}

fn assert_close(actual: &[f64], expected: impl IntoIterator<Item = f64>) {
    for (a, e) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(*a, e, epsilon = TOLERANCE);
    }
}

#[test]
fn test_call_price() {
    assert_close(&pricer(OptionKind::Call).price(&SPOTS), CALL_PRICE);
}

#[test]
fn test_put_price() {
    assert_close(&pricer(OptionKind::Put).price(&SPOTS), PUT_PRICE);
}

#[test]
fn test_call_delta() {
    assert_close(&pricer(OptionKind::Call).delta(&SPOTS), CALL_DELTA);
}

#[test]
fn test_put_delta() {
    assert_close(&pricer(OptionKind::Put).delta(&SPOTS), PUT_DELTA);
}

#[test]
fn test_gamma() {
    assert_close(&pricer(OptionKind::Call).gamma(&SPOTS), GAMMA);
    assert_close(&pricer(OptionKind::Put).gamma(&SPOTS), GAMMA);
}

#[test]
fn test_vega() {
    let expected = VEGA_RAW.map(|v| v * PER_POINT);
    assert_close(&pricer(OptionKind::Call).vega(&SPOTS), expected);
    assert_close(&pricer(OptionKind::Put).vega(&SPOTS), expected);
}

#[test]
fn test_rho() {
    assert_close(
        &pricer(OptionKind::Call).rho(&SPOTS),
        CALL_RHO_RAW.map(|v| v * PER_POINT),
    );
    assert_close(
        &pricer(OptionKind::Put).rho(&SPOTS),
        PUT_RHO_RAW.map(|v| v * PER_POINT),
    );
}

#[test]
fn test_theta() {
    assert_close(
        &pricer(OptionKind::Call).theta(&SPOTS),
        CALL_THETA_RAW.map(|v| -v / DAYS_PER_YEAR),
    );
    assert_close(
        &pricer(OptionKind::Put).theta(&SPOTS),
        PUT_THETA_RAW.map(|v| -v / DAYS_PER_YEAR),
    );
}

#[test]
fn test_calculate_matches_individual_methods() {
    let call = pricer(OptionKind::Call);
    let table = call.calculate(&SPOTS, &Greek::ALL).unwrap();
    for greek in Greek::ALL {
        assert_eq!(table.get(greek).unwrap(), call.value(greek, &SPOTS).as_slice());
    }
}
