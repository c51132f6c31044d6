use remc_core::{ProbabilityModel, RemcError};
use remc_engine::{LadderPolicy, ReplicaEngine, SamplerConfig, StepWidthPolicy};

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
fn minimal_yaml_fills_defaults() {
    let config = SamplerConfig::from_yaml_str("param_names: [x_0]").unwrap();
    assert_eq!(config.param_names, vec!["x_0"]);
    assert_eq!(config.exchange_step, 10);
    assert_eq!(config.ladder.build(), vec![1.0]);
    let widths = config.step_widths.build(1, 1).unwrap();
    assert_eq!(widths, vec![vec![1.0]]);
    assert!(config.seed_policy.label.is_none());
}

#[test]
fn ladder_and_widths_parse_from_yaml() {
    let text = r#"
param_names: [x_0, x_1]
ladder:
  type: log-space
  start: -2.0
  stop: 0.0
  count: 5
step_widths:
  type: per-chain
  widths: [3.0, 2.0, 1.5, 1.2, 1.0]
exchange_step: 5
seed_policy:
  master_seed: 99
  label: yaml-run
"#;
    let config = SamplerConfig::from_yaml_str(text).unwrap();
    let betas = config.ladder.build();
    assert_eq!(betas.len(), 5);
    assert!((betas[0] - 0.01).abs() < 1e-12);
    assert!((betas[4] - 1.0).abs() < 1e-12);
    let widths = config.step_widths.build(5, 2).unwrap();
    assert_eq!(widths[0], vec![3.0, 3.0]);
    assert_eq!(widths[4], vec![1.0, 1.0]);
    assert_eq!(config.seed_policy.master_seed, 99);
    assert_eq!(config.seed_policy.label.as_deref(), Some("yaml-run"));
}

#[test]
fn log_space_ladder_covers_both_endpoints() {
    let ladder = LadderPolicy::LogSpace {
        start: -5.0,
        stop: 5.0,
        count: 21,
    };
    let betas = ladder.build();
    assert_eq!(betas.len(), 21);
    assert!((betas[0] - 1e-5).abs() < 1e-17);
    assert!((betas[10] - 1.0).abs() < 1e-12);
    assert!((betas[20] - 1e5).abs() < 1e-7);
    // Strictly increasing when start < stop.
    assert!(betas.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn per_chain_widths_must_match_the_ladder() {
    let policy = StepWidthPolicy::PerChain {
        widths: vec![1.0, 2.0],
    };
    let err = policy.build(3, 2).unwrap_err();
    match err {
        RemcError::Shape(info) => assert_eq!(info.code, "step-widths-shape"),
        other => panic!("expected shape error, got {other}"),
    }

    let policy = StepWidthPolicy::Explicit {
        widths: vec![vec![1.0], vec![1.0, 2.0]],
    };
    assert!(policy.build(2, 2).is_err());
}

#[test]
fn engine_builds_and_runs_from_config() {
    let config = SamplerConfig::from_yaml_str(
        r#"
param_names: [x_0]
ladder:
  type: manual
  betas: [1.0, 0.5]
exchange_step: 3
"#,
    )
    .unwrap();
    let mut engine =
        ReplicaEngine::from_config(StdNormal, &config, vec![vec![0.0], vec![0.0]]).unwrap();
    engine.sample(10).unwrap();
    assert_eq!(engine.loop_count(), 10);
    assert_eq!(engine.betas(), &[1.0, 0.5]);
    assert_eq!(engine.exchange_step(), 3);
}

#[test]
fn config_survives_yaml_round_trip() {
    let config = SamplerConfig::from_yaml_str(
        r#"
param_names: [x_0, x_1]
ladder:
  type: log-space
  start: -1.0
  stop: 0.0
  count: 3
"#,
    )
    .unwrap();
    let text = serde_yaml::to_string(&config).unwrap();
    let reparsed = SamplerConfig::from_yaml_str(&text).unwrap();
    assert_eq!(reparsed.ladder.build(), config.ladder.build());
    assert_eq!(reparsed.exchange_step, config.exchange_step);
}
