use portfolio_projection::core::{ExecutionMode, SimulationConfig, SimulationError};
use portfolio_projection::engine::{simulate, simulate_with_cancel};
use portfolio_projection::mc::CancelFlag;
use portfolio_projection::model::AssetModel;

fn basket() -> AssetModel {
    AssetModel::new(
        ["stocks", "bonds"],
        vec![0.07, 0.03],
        vec![0.17, 0.05],
        vec![vec![1.0, -0.1], vec![-0.1, 1.0]],
    )
    .unwrap()
}

fn config(execution: ExecutionMode, simulations: usize) -> SimulationConfig {
    SimulationConfig::builder()
        .years(10)
        .simulations(simulations)
        .seed(2026)
        .execution(execution)
        .build()
        .unwrap()
}

#[test]
fn sharded_median_matches_sequential_within_three_percent() {
    let weights = [0.7, 0.3];
    let sequential = simulate(
        &config(ExecutionMode::Sequential, 20_000),
        &basket(),
        Some(&weights),
    )
    .unwrap();
    let sharded = simulate(
        &config(ExecutionMode::Sharded { shards: 8 }, 20_000),
        &basket(),
        Some(&weights),
    )
    .unwrap();

    let rel = (sharded.summary.median / sequential.summary.median - 1.0).abs();
    assert!(
        rel <= 0.03,
        "sequential={} sharded={} rel={rel}",
        sequential.summary.median,
        sharded.summary.median
    );
}

#[test]
fn sharded_output_is_independent_of_scheduling() {
    let cfg = config(ExecutionMode::Sharded { shards: 6 }, 301);
    let first = simulate(&cfg, &basket(), None).unwrap();
    for _ in 0..4 {
        assert_eq!(simulate(&cfg, &basket(), None).unwrap(), first);
    }
    assert_eq!(first.trajectories.len(), 301);
}

#[test]
fn more_shards_than_runs_is_allowed() {
    let result = simulate(
        &config(ExecutionMode::Sharded { shards: 16 }, 3),
        &basket(),
        None,
    )
    .unwrap();
    assert_eq!(result.final_values.len(), 3);
}

#[test]
fn cancelled_sharded_batch_returns_cancelled() {
    let flag = CancelFlag::new();
    flag.cancel();
    let err = simulate_with_cancel(
        &config(ExecutionMode::Sharded { shards: 4 }, 1_000),
        &basket(),
        None,
        &flag,
    )
    .unwrap_err();
    assert_eq!(err, SimulationError::Cancelled);
}

#[test]
fn untouched_flag_does_not_interfere() {
    let flag = CancelFlag::new();
    let cfg = config(ExecutionMode::Sequential, 50);
    let with_flag = simulate_with_cancel(&cfg, &basket(), None, &flag).unwrap();
    let without = simulate(&cfg, &basket(), None).unwrap();
    assert_eq!(with_flag, without);
}
