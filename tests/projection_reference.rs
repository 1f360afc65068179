use approx::assert_relative_eq;
use portfolio_projection::core::{SimulationConfig, SimulationError, WealthFloor};
use portfolio_projection::engine::simulate;
use portfolio_projection::model::AssetModel;

fn config(initial: f64, years: usize, simulations: usize, seed: u64) -> SimulationConfig {
    SimulationConfig::builder()
        .initial_investment(initial)
        .years(years)
        .simulations(simulations)
        .seed(seed)
        .build()
        .expect("valid config")
}

fn three_asset(correlation: Vec<Vec<f64>>) -> Result<AssetModel, SimulationError> {
    AssetModel::new(
        ["us_equity", "intl_equity", "bonds"],
        vec![0.08, 0.075, 0.03],
        vec![0.16, 0.16, 0.05],
        correlation,
    )
}

#[test]
fn flat_single_asset_keeps_initial_investment() {
    let flat = AssetModel::single("cash", 0.0, 0.0).unwrap();
    let result = simulate(&config(10_000.0, 1, 1, 42), &flat, None).unwrap();
    assert_eq!(result.trajectories.len(), 1);
    assert_eq!(result.trajectories[0].values(), &[10_000.0, 10_000.0]);
    assert_eq!(result.final_values, vec![10_000.0]);
    assert_eq!(result.summary.min, 10_000.0);
    assert_eq!(result.summary.max, 10_000.0);
}

#[test]
fn trajectory_shapes_and_year_zero() {
    let result = simulate(
        &config(25_000.0, 12, 40, 9),
        &AssetModel::default_equity(),
        None,
    )
    .unwrap();
    assert_eq!(result.final_values.len(), 40);
    assert_eq!(result.envelope.len(), 13);
    for (trajectory, final_value) in result.trajectories.iter().zip(&result.final_values) {
        assert_eq!(trajectory.len(), 13);
        assert_eq!(trajectory.initial_value(), Some(25_000.0));
        assert_eq!(trajectory.final_value(), Some(*final_value));
    }
}

#[test]
fn thirty_year_projection_has_non_degenerate_spread() {
    let result = simulate(
        &config(10_000.0, 30, 100, 42),
        &AssetModel::default_equity(),
        None,
    )
    .unwrap();
    let s = result.summary;
    assert!(s.min < s.median && s.median < s.max);
    assert!(s.min <= s.p10 && s.p10 <= s.median && s.median <= s.p90 && s.p90 <= s.max);
    // 7% drift over 30 years: the median lands well above the start.
    assert!(s.median > 10_000.0);
}

#[test]
fn percentile_bands_are_ordered_every_year() {
    let model = three_asset(vec![
        vec![1.0, 0.8, 0.1],
        vec![0.8, 1.0, 0.1],
        vec![0.1, 0.1, 1.0],
    ])
    .unwrap();
    let result = simulate(&config(1_000.0, 25, 150, 3), &model, Some(&[0.5, 0.3, 0.2])).unwrap();
    for year in 0..result.envelope.len() {
        let (p10, median, p90) = result.envelope.at(year).unwrap();
        assert!(p10 <= median && median <= p90, "year {year}");
    }
    assert_eq!(result.envelope.at(0), Some((1_000.0, 1_000.0, 1_000.0)));
}

#[test]
fn summary_and_envelope_agree_at_horizon() {
    let result = simulate(
        &config(10_000.0, 15, 77, 11),
        &AssetModel::default_equity(),
        None,
    )
    .unwrap();
    let last = result.envelope.len() - 1;
    assert_eq!(result.summary.p10, result.envelope.p10[last]);
    assert_eq!(result.summary.median, result.envelope.median[last]);
    assert_eq!(result.summary.p90, result.envelope.p90[last]);
}

#[test]
fn fixed_seed_reproduces_whole_result() {
    let cfg = config(10_000.0, 30, 100, 42);
    let a = simulate(&cfg, &AssetModel::default_equity(), None).unwrap();
    let b = simulate(&cfg, &AssetModel::default_equity(), None).unwrap();
    assert_eq!(a, b);
}

#[test]
fn zero_weights_raise_degenerate_weights() {
    let model = three_asset(vec![
        vec![1.0, 0.5, 0.0],
        vec![0.5, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
    ])
    .unwrap();
    let err = simulate(&config(10_000.0, 10, 10, 1), &model, Some(&[0.0, 0.0, 0.0])).unwrap_err();
    assert!(matches!(err, SimulationError::DegenerateWeights(_)));
}

#[test]
fn unit_correlation_between_equal_vol_assets_is_valid() {
    let model = three_asset(vec![
        vec![1.0, 1.0, 0.2],
        vec![1.0, 1.0, 0.2],
        vec![0.2, 0.2, 1.0],
    ])
    .expect("rank-deficient PSD covariance is valid");
    let result = simulate(&config(10_000.0, 20, 50, 8), &model, Some(&[1.0, 1.0, 1.0])).unwrap();
    assert!(result.final_values.iter().all(|v| v.is_finite()));
}

#[test]
fn all_negative_unit_correlations_are_invalid() {
    let err = three_asset(vec![
        vec![1.0, -1.0, -1.0],
        vec![-1.0, 1.0, -1.0],
        vec![-1.0, -1.0, 1.0],
    ])
    .unwrap_err();
    assert!(matches!(err, SimulationError::InvalidModel(_)));
}

#[test]
fn zero_volatility_basket_compounds_weighted_mean() {
    let model = AssetModel::new(
        ["a", "b"],
        vec![0.10, 0.0],
        vec![0.0, 0.0],
        vec![vec![1.0, 0.3], vec![0.3, 1.0]],
    )
    .unwrap();
    let result = simulate(&config(10_000.0, 2, 3, 5), &model, Some(&[1.0, 1.0])).unwrap();
    for trajectory in &result.trajectories {
        assert_relative_eq!(trajectory.values()[1], 10_500.0, epsilon = 1.0e-9);
        assert_relative_eq!(trajectory.values()[2], 11_025.0, epsilon = 1.0e-9);
    }
}

#[test]
fn extreme_volatility_produces_negative_wealth_unless_floored() {
    let wild = AssetModel::single("lottery", 0.0, 3.0).unwrap();
    let cfg = config(10_000.0, 10, 200, 13);
    let unclamped = simulate(&cfg, &wild, None).unwrap();
    assert!(unclamped.trajectories.iter().flat_map(|t| t.values()).any(|v| *v < 0.0));

    let floored_cfg = SimulationConfig {
        wealth_floor: WealthFloor::Zero,
        ..cfg
    };
    let floored = simulate(&floored_cfg, &wild, None).unwrap();
    assert!(floored.trajectories.iter().flat_map(|t| t.values()).all(|v| *v >= 0.0));
}

#[test]
fn invalid_config_values_are_rejected() {
    let model = AssetModel::default_equity();
    for bad in [
        SimulationConfig {
            initial_investment: 0.0,
            ..SimulationConfig::default()
        },
        SimulationConfig {
            years: 0,
            ..SimulationConfig::default()
        },
        SimulationConfig {
            simulations: 0,
            ..SimulationConfig::default()
        },
    ] {
        assert!(matches!(
            simulate(&bad, &model, None),
            Err(SimulationError::InvalidConfig(_))
        ));
    }
}
