use remc_core::{ProbabilityModel, RemcError};
use remc_engine::ReplicaEngine;

struct StdNormal;

impl ProbabilityModel for StdNormal {
    fn log_cond(&self, param: &[f64]) -> Result<f64, RemcError> {
        Ok(param.iter().map(|x| -0.5 * x * x).sum())
    }

    fn log_prior(&self, _param: &[f64]) -> Result<f64, RemcError> {
        Ok(0.0)
    }
}

#[test]
fn single_chain_recovers_standard_normal_moments() {
    // Plain Metropolis-Hastings: one chain, exchanges pushed past the target.
    let target = 10_000;
    let mut engine = ReplicaEngine::new(
        StdNormal,
        vec!["x_0".into()],
        vec![1.0],
        vec![vec![1.0]],
        target,
        vec![vec![0.0]],
        42,
    )
    .unwrap();
    engine.sample(target).unwrap();

    let draws: Vec<f64> = engine
        .history()
        .samples(0)
        .iter()
        .map(|row| row[0])
        .collect();
    let n = draws.len() as f64;
    let mean = draws.iter().sum::<f64>() / n;
    let variance = draws.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;

    assert!(mean.abs() < 0.15, "sample mean drifted: {mean}");
    assert!(
        (0.8..1.2).contains(&variance),
        "sample variance off target: {variance}"
    );
    // Unit-width proposals on a unit target land acceptance mid-range.
    let acceptance = engine.history().acceptance_rate(0);
    assert!(
        (0.2..0.95).contains(&acceptance),
        "implausible acceptance rate {acceptance}"
    );
}

#[test]
fn ladder_exchange_rates_are_neither_frozen_nor_saturated() {
    let mut engine = ReplicaEngine::new(
        StdNormal,
        vec!["x_0".into()],
        vec![1.0, 0.5, 0.1],
        vec![vec![1.0], vec![1.5], vec![3.0]],
        2,
        vec![vec![0.0]; 3],
        2024,
    )
    .unwrap();
    engine.sample(4001).unwrap();
    assert_eq!(engine.exchange_count(), 2000);

    for pair in 0..2usize {
        let rate = engine.history().exchange_rate(pair);
        assert!(
            rate > 0.0 && rate < 1.0,
            "pair {pair} exchange rate degenerate: {rate}"
        );
    }
    // Hot chains roam wider than cold ones.
    let spread = |k: usize| {
        let draws: Vec<f64> = engine
            .history()
            .samples(k)
            .iter()
            .map(|row| row[0])
            .collect();
        let n = draws.len() as f64;
        let mean = draws.iter().sum::<f64>() / n;
        draws.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n
    };
    assert!(spread(2) > spread(0));
}
