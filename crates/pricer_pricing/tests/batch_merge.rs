//! Simulation task lifecycle and batch merge behaviour.

use std::sync::Arc;
use std::time::Duration;

use approx::assert_relative_eq;
use pricer_core::types::Greek;
use pricer_models::instruments::{OptionKind, OptionSpec};
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
use pricer_pricing::rng::FixedDrawProvider;
use pricer_pricing::task::{SimulationBatch, SimulationTask, TaskError, TaskState};

const POLL: Duration = Duration::from_millis(10);
const SPOTS: [f64; 3] = [40.0, 50.0, 60.0];
const GREEKS: [Greek; 2] = [Greek::Delta, Greek::Vega];

fn fixed_pricer(kind: OptionKind) -> Arc<MonteCarloPricer> {
    let spec = OptionSpec::new(50.0, 0.2, 0.01, 1.0, kind).unwrap();
    let draws = vec![-1.3, -0.7, -0.1, 0.4, 0.9, 1.5];
    let config = MonteCarloConfig::builder()
        .n_iterations(draws.len())
        .build()
        .unwrap();
    let provider = Arc::new(FixedDrawProvider::new(draws));
    Arc::new(MonteCarloPricer::with_provider(spec, config, provider).unwrap())
}

fn fixed_task(name: &str, kind: OptionKind) -> SimulationTask {
    SimulationTask::new(name, fixed_pricer(kind), &GREEKS)
        .with_poll_interval(POLL)
        .unwrap()
}

fn fixed_straddle() -> SimulationBatch {
    SimulationBatch::new()
        .with_task(fixed_task("call", OptionKind::Call))
        .with_task(fixed_task("put", OptionKind::Put))
}

// ============================================================================
// Merge rules
// ============================================================================

#[test]
fn test_synchronous_straddle_sums_legs() {
    let batch = fixed_straddle();
    let (values, _) = batch.run_synchronous(&SPOTS).unwrap();

    let (call, _) = batch.tasks()[0].calculate(&SPOTS).unwrap();
    let (put, _) = batch.tasks()[1].calculate(&SPOTS).unwrap();

    for greek in [Greek::Price, Greek::Delta, Greek::Vega] {
        let merged = values.get(greek).unwrap();
        let c = call.get(greek).unwrap();
        let p = put.get(greek).unwrap();
        for i in 0..SPOTS.len() {
            assert_relative_eq!(merged[i], c[i] + p[i], epsilon = 1e-12);
        }
    }
}

#[test]
fn test_shared_keys_have_undefined_dispersion() {
    let (_, dispersion) = fixed_straddle().run_synchronous(&SPOTS).unwrap();
    for greek in [Greek::Price, Greek::Delta, Greek::Vega] {
        assert!(dispersion.contains(greek));
        assert!(dispersion.is_undefined(greek));
        assert_eq!(dispersion.get(greek), None);
    }
}

#[test]
fn test_disjoint_keys_keep_dispersion() {
    let batch = SimulationBatch::new()
        .with_task(SimulationTask::new("call", fixed_pricer(OptionKind::Call), &[Greek::Delta]))
        .with_task(SimulationTask::new("put", fixed_pricer(OptionKind::Put), &[Greek::Rho]));
    let (values, dispersion) = batch.run_synchronous(&SPOTS).unwrap();

    assert!(dispersion.is_undefined(Greek::Price));
    assert_eq!(dispersion.get(Greek::Delta).map(<[f64]>::len), Some(SPOTS.len()));
    assert_eq!(dispersion.get(Greek::Rho).map(<[f64]>::len), Some(SPOTS.len()));

    let order: Vec<_> = values.greeks().collect();
    assert_eq!(order, vec![Greek::Price, Greek::Delta, Greek::Rho]);
}

#[test]
fn test_single_task_batch_is_the_task() {
    let batch = SimulationBatch::new().with_task(fixed_task("call", OptionKind::Call));
    let merged = batch.run_synchronous(&SPOTS).unwrap();
    let direct = batch.tasks()[0].calculate(&SPOTS).unwrap();
    assert_eq!(merged, direct);
}

#[test]
fn test_empty_batch_yields_empty_tables() {
    let batch = SimulationBatch::new();
    assert!(batch.is_empty());
    let (values, dispersion) = batch.run_synchronous(&SPOTS).unwrap();
    assert!(values.is_empty());
    assert!(dispersion.is_empty());
    assert_eq!(values.rows(), SPOTS.len());
}

#[test]
fn test_seeded_straddle_offsets_put_seed() {
    let spec = OptionSpec::new(50.0, 0.2, 0.01, 1.0, OptionKind::Put).unwrap();
    let config = MonteCarloConfig::builder().n_iterations(1_000).seed(11).build().unwrap();
    let batch = SimulationBatch::straddle(spec, config, &[Greek::Gamma]).unwrap();

    assert_eq!(batch.len(), 2);
    let call = batch.tasks()[0].pricer();
    let put = batch.tasks()[1].pricer();
    assert!(call.spec().kind().is_call());
    assert!(!put.spec().kind().is_call());
    assert_eq!(call.config().seed(), Some(11));
    assert_eq!(put.config().seed(), Some(12));
    assert_eq!(batch.tasks()[0].greeks(), &[Greek::Price, Greek::Gamma]);
}

// ============================================================================
// Concurrent path
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_matches_synchronous() {
    let mut batch = fixed_straddle();
    let synchronous = batch.run_synchronous(&SPOTS).unwrap();

    batch.start().unwrap();
    let concurrent = batch.run_concurrent(&SPOTS).await.unwrap();
    batch.join().await.unwrap();

    assert_eq!(concurrent, synchronous);
    for task in batch.tasks() {
        assert_eq!(task.state(), TaskState::Stopped);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_requires_started_tasks() {
    let mut batch = fixed_straddle();
    let err = batch.run_concurrent(&SPOTS).await.unwrap_err();
    assert_eq!(err, TaskError::NotStarted("call".to_string()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_after_join_is_rejected() {
    let mut batch = fixed_straddle();
    batch.start().unwrap();
    batch.join().await.unwrap();
    let err = batch.run_concurrent(&SPOTS).await.unwrap_err();
    assert_eq!(err, TaskError::Stopped("call".to_string()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_repeated_concurrent_runs() {
    let mut batch = fixed_straddle();
    batch.start().unwrap();
    let first = batch.run_concurrent(&SPOTS).await.unwrap();
    let second = batch.run_concurrent(&[55.0]).await.unwrap();
    batch.join().await.unwrap();

    assert_eq!(first.0.rows(), 3);
    assert_eq!(second.0.rows(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_skips_uncollected_results() {
    let mut batch = fixed_straddle();
    let expected = batch.run_synchronous(&SPOTS).unwrap();
    batch.start().unwrap();

    // A result nobody collects, with the same row count as the real run.
    batch.tasks()[0].submit(vec![10.0, 20.0, 30.0]).unwrap();

    let concurrent = batch.run_concurrent(&SPOTS).await.unwrap();
    batch.join().await.unwrap();
    assert_eq!(concurrent, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_run_after_cancelled_run() {
    let mut batch = fixed_straddle();
    let expected = batch.run_synchronous(&SPOTS).unwrap();
    batch.start().unwrap();

    let cancelled =
        tokio::time::timeout(Duration::from_nanos(1), batch.run_concurrent(&[10.0, 20.0, 30.0]))
            .await;
    if let Ok(result) = cancelled {
        result.unwrap();
    }

    let concurrent = batch.run_concurrent(&SPOTS).await.unwrap();
    batch.join().await.unwrap();
    assert_eq!(concurrent, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_retrieve_request_skips_older_results() {
    let mut task = fixed_task("call", OptionKind::Call);
    task.start().unwrap();

    assert_eq!(task.submit(vec![40.0]).unwrap(), 0);
    let wanted = task.submit(SPOTS.to_vec()).unwrap();
    assert_eq!(wanted, 1);

    let output = task.retrieve_request(wanted).await.unwrap();
    assert_eq!(output, task.calculate(&SPOTS).unwrap());
    task.join().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_retrieve_request_already_taken() {
    let mut task = fixed_task("call", OptionKind::Call);
    task.start().unwrap();

    let first = task.submit(vec![40.0]).unwrap();
    task.retrieve().await.unwrap();
    task.submit(vec![50.0]).unwrap();

    assert_eq!(
        task.retrieve_request(first).await,
        Err(TaskError::ResultTaken {
            task: "call".to_string(),
            request: first,
        })
    );
    task.join().await.unwrap();
}

// ============================================================================
// Task lifecycle
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_results_come_back_in_submission_order() {
    let mut task = fixed_task("call", OptionKind::Call);
    task.start().unwrap();

    task.submit(vec![40.0]).unwrap();
    task.submit(vec![50.0, 60.0]).unwrap();
    task.submit(vec![45.0, 55.0, 65.0, 75.0]).unwrap();

    for rows in [1, 2, 4] {
        let (values, dispersion) = task.retrieve().await.unwrap();
        assert_eq!(values.rows(), rows);
        assert_eq!(dispersion.rows(), rows);
    }
    task.join().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_inputs_queued_before_start_are_processed() {
    let mut task = fixed_task("put", OptionKind::Put);
    task.submit(SPOTS.to_vec()).unwrap();
    task.start().unwrap();

    let output = task.retrieve().await.unwrap();
    assert_eq!(output, task.calculate(&SPOTS).unwrap());
    task.join().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_state_transitions() {
    let mut task = fixed_task("call", OptionKind::Call);
    assert_eq!(task.state(), TaskState::Idle);

    task.start().unwrap();
    assert_eq!(task.state(), TaskState::Running);
    assert_eq!(task.start(), Err(TaskError::AlreadyStarted("call".to_string())));

    task.stop();
    assert!(task.state().is_stopping_or_stopped());

    task.join().await.unwrap();
    assert_eq!(task.state(), TaskState::Stopped);

    // Joining again is a no-op.
    task.join().await.unwrap();
    assert_eq!(task.state(), TaskState::Stopped);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_submit_after_stop_is_rejected() {
    let mut task = fixed_task("call", OptionKind::Call);
    task.start().unwrap();
    task.stop();
    assert_eq!(task.submit(vec![50.0]), Err(TaskError::Stopped("call".to_string())));
    task.join().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_retrieve_before_join_then_channel_closes() {
    let mut task = fixed_task("call", OptionKind::Call);
    task.start().unwrap();
    task.submit(SPOTS.to_vec()).unwrap();

    let output = task.retrieve().await.unwrap();
    task.join().await.unwrap();

    assert_eq!(output.0.rows(), SPOTS.len());
    assert_eq!(
        task.retrieve().await,
        Err(TaskError::ChannelClosed("call".to_string()))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stop_during_calculation_keeps_result() {
    let spec = OptionSpec::new(50.0, 0.2, 0.01, 1.0, OptionKind::Call).unwrap();
    let config = MonteCarloConfig::builder()
        .n_iterations(500_000)
        .seed(3)
        .build()
        .unwrap();
    let pricer = Arc::new(MonteCarloPricer::new(spec, config).unwrap());
    let mut task = SimulationTask::new("call", pricer, &Greek::ALL)
        .with_poll_interval(POLL)
        .unwrap();
    task.start().unwrap();
    task.submit(SPOTS.to_vec()).unwrap();

    // Let the worker dequeue the input before the stop arrives.
    tokio::time::sleep(Duration::from_millis(20)).await;
    task.stop();
    task.join().await.unwrap();

    let (values, dispersion) = task.retrieve().await.unwrap();
    assert_eq!(values.rows(), SPOTS.len());
    assert_eq!(dispersion.rows(), SPOTS.len());
    assert_eq!(
        task.retrieve().await,
        Err(TaskError::ChannelClosed("call".to_string()))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_join_wakes_idle_worker() {
    let mut task = SimulationTask::new("call", fixed_pricer(OptionKind::Call), &GREEKS)
        .with_poll_interval(Duration::from_secs(60))
        .unwrap();
    task.start().unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    tokio::time::timeout(Duration::from_secs(5), task.join())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.state(), TaskState::Stopped);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stop_before_start() {
    let mut task = fixed_task("call", OptionKind::Call);
    task.stop();
    assert_eq!(task.state(), TaskState::Stopped);
    assert_eq!(task.start(), Err(TaskError::Stopped("call".to_string())));
    assert_eq!(
        task.retrieve().await,
        Err(TaskError::ChannelClosed("call".to_string()))
    );
    task.join().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_state_watch_sees_stopped() {
    let mut task = fixed_task("call", OptionKind::Call);
    let mut states = task.subscribe();
    task.start().unwrap();
    task.stop();

    tokio::time::timeout(Duration::from_secs(5), states.wait_for(|s| *s == TaskState::Stopped))
        .await
        .unwrap()
        .unwrap();
    task.join().await.unwrap();
}

#[test]
fn test_start_outside_runtime_fails() {
    let mut task = fixed_task("call", OptionKind::Call);
    assert_eq!(task.start(), Err(TaskError::NoRuntime("call".to_string())));
    assert_eq!(task.state(), TaskState::Idle);
}

#[test]
fn test_zero_poll_interval_rejected() {
    let task = SimulationTask::new("call", fixed_pricer(OptionKind::Call), &[]);
    assert_eq!(task.poll_interval(), Duration::from_secs(1));
    assert!(task.with_poll_interval(Duration::ZERO).is_err());
}
