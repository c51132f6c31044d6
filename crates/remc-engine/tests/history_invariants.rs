use remc_core::{ProbabilityModel, RemcError};
use remc_engine::{ReplicaEngine, NOT_APPLICABLE};

struct StdNormal;

impl ProbabilityModel for StdNormal {
    fn log_cond(&self, param: &[f64]) -> Result<f64, RemcError> {
        Ok(param.iter().map(|x| -0.5 * x * x).sum())
    }

    fn log_prior(&self, _param: &[f64]) -> Result<f64, RemcError> {
        Ok(0.0)
    }
}

fn build_engine(betas: Vec<f64>, exchange_step: usize) -> ReplicaEngine<StdNormal> {
    let k = betas.len();
    ReplicaEngine::new(
        StdNormal,
        vec!["x_0".into(), "x_1".into()],
        betas,
        vec![vec![1.0, 1.0]; k],
        exchange_step,
        vec![vec![0.0, 0.0]; k],
        7,
    )
    .unwrap()
}

#[test]
fn series_stay_aligned_across_sample_calls() {
    let mut engine = build_engine(vec![1.0, 0.5, 0.1], 4);
    assert_eq!(engine.loop_count(), 1);
    assert_eq!(engine.history().len(), 1);
    assert!(engine.history().is_aligned());

    for target in [10, 25, 60] {
        engine.sample(target).unwrap();
        let history = engine.history();
        assert!(history.is_aligned());
        assert_eq!(history.len(), engine.loop_count());
        for k in 0..3 {
            assert_eq!(history.samples(k).len(), history.len());
            assert_eq!(history.accept_markers(k).len(), history.len());
        }
        for pair in 0..2 {
            assert_eq!(history.exchange_outcomes(pair).len(), history.len());
        }
    }
}

#[test]
fn loop_count_lands_exactly_when_target_is_reachable() {
    // Each driver iteration advances by exchange_step; 13 - 1 = 3 * 4.
    let mut engine = build_engine(vec![1.0, 0.5], 4);
    engine.sample(13).unwrap();
    assert_eq!(engine.loop_count(), 13);
    assert_eq!(engine.exchange_count(), 3);

    engine.sample(17).unwrap();
    assert_eq!(engine.loop_count(), 17);
}

#[test]
fn loop_count_overshoots_by_less_than_one_batch() {
    for target in 2..=20 {
        let mut engine = build_engine(vec![1.0, 0.5], 4);
        engine.sample(target).unwrap();
        let landed = engine.loop_count();
        assert!(landed >= target);
        assert!(
            landed - target < 4,
            "target {target} landed at {landed}, more than a batch past"
        );
        assert_eq!((landed - 1) % 4, 0);
    }
}

#[test]
fn already_reached_target_is_a_no_op() {
    let mut engine = build_engine(vec![1.0], 3);
    engine.sample(10).unwrap();
    let rows = engine.loop_count();
    engine.sample(rows).unwrap();
    engine.sample(rows - 1).unwrap();
    assert_eq!(engine.loop_count(), rows);
    assert_eq!(engine.history().len(), rows);
}

#[test]
fn single_chain_bookkeeping_matches_the_ladder_case() {
    let mut engine = build_engine(vec![1.0], 3);
    engine.sample(10).unwrap();
    // 1 -> 4 -> 7 -> 10: two Metropolis rows and one exchange row per iteration.
    assert_eq!(engine.loop_count(), 10);
    assert_eq!(engine.exchange_count(), 3);
    let history = engine.history();
    assert!(history.is_aligned());
    assert_eq!(history.n_chains(), 1);

    // Exchange rows carry only bookkeeping markers.
    for row in [3usize, 6, 9] {
        assert!(history.accept_markers(0)[row]
            .iter()
            .all(|&m| m == NOT_APPLICABLE));
    }
    // Metropolis rows never do.
    for row in [1usize, 2, 4, 5, 7, 8] {
        assert!(history.accept_markers(0)[row].iter().all(|&m| m >= 0));
    }
}

#[test]
fn first_row_seeds_initial_state() {
    let engine = build_engine(vec![1.0, 0.5], 2);
    let history = engine.history();
    for k in 0..2 {
        assert_eq!(history.samples(k)[0], vec![0.0, 0.0]);
        assert_eq!(history.log_cond_series(k)[0], 0.0);
        assert_eq!(history.log_prior_series(k)[0], 0.0);
        assert!(history.accept_markers(k)[0]
            .iter()
            .all(|&m| m == NOT_APPLICABLE));
    }
    assert_eq!(history.exchange_outcomes(0), &[NOT_APPLICABLE]);
}
