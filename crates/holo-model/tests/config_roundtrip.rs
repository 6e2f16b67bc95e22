use holo_model::{ModelConfig, ModelKind};

const CONFIG: &str = r#"
kind: holography
priors:
  x: [0.0, 1.0]
  y: [0.0, 1.0]
  z: [10.0, 1.0]
  n: [1.5, 0.05]
  r: [0.5, 0.05]
  alpha: [1.0, 0.1]
  noise_sd: [0.05, 0.1]
seed_policy:
  master_seed: 17
"#;

#[test]
fn yaml_config_keeps_prior_order() {
    let config = ModelConfig::from_yaml_str(CONFIG).unwrap();
    assert_eq!(config.kind, ModelKind::Holography);
    assert_eq!(
        config.priors.names().collect::<Vec<_>>(),
        vec!["x", "y", "z", "n", "r", "alpha", "noise_sd"]
    );
    let n = config.priors.get("n").unwrap();
    assert_eq!((n.loc, n.scale), (1.5, 0.05));
    assert_eq!(config.seed_policy.master_seed, 17);
    assert!(config.seed_policy.label.is_none());
    config.validate().unwrap();
}

#[test]
fn yaml_round_trip() {
    let config = ModelConfig::from_yaml_str(CONFIG).unwrap();
    let rendered = config.to_yaml_string().unwrap();
    let decoded = ModelConfig::from_yaml_str(&rendered).unwrap();
    assert_eq!(decoded, config);
}

#[test]
fn seed_policy_defaults_when_absent() {
    let config = ModelConfig::from_yaml_str("kind: gaussian\npriors:\n  a: [0.0, 1.0]\n").unwrap();
    assert_eq!(config.kind, ModelKind::Gaussian);
    assert_eq!(config.seed_policy, holo_model::SeedPolicy::default());
}

#[test]
fn noisy_kind_requires_noise_prior() {
    let config =
        ModelConfig::from_yaml_str("kind: noisy-gaussian\npriors:\n  a: [0.0, 1.0]\n").unwrap();
    let err = config.validate().unwrap_err();
    assert_eq!(err.info().code, "missing-priors");
    assert_eq!(err.info().context["missing"], "noise_sd");
}

#[test]
fn malformed_yaml_is_a_config_error() {
    let err = ModelConfig::from_yaml_str("kind: spline\npriors: {}\n").unwrap_err();
    assert_eq!(err.info().code, "config-parse");
}

#[test]
fn load_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.yaml");
    std::fs::write(&path, CONFIG).unwrap();
    assert!(ModelConfig::load(&path).is_ok());

    let missing = dir.path().join("absent.yaml");
    let err = ModelConfig::load(&missing).unwrap_err();
    assert_eq!(err.info().code, "config-read");
    assert!(err.info().context.contains_key("path"));
}
