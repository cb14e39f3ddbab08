use fat_distribution_sim::config::ModelConfig;
use fat_distribution_sim::error::ConfigError;
use fat_distribution_sim::model::SensitivityPolicy;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");
    let (config, resolved) = ModelConfig::load(Some(path.clone())).expect("load");

    assert_eq!(resolved, Some(path));
    assert_eq!(config.distribution.to_policy().label(), "clamped");
}

#[test]
fn written_config_reads_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("model.toml");

    let mut config = ModelConfig::default();
    config.distribution.policy = "linear".to_string();
    config.distribution.sensitivity = Some(0.2);
    config.impact.baseline_percent = 31.5;
    config.write(&path).expect("write");

    let read = ModelConfig::read(&path).expect("read");
    assert_eq!(read, config);
    assert_eq!(
        read.distribution.to_policy(),
        SensitivityPolicy::Linear { scale: 0.2 }
    );
}

#[test]
fn malformed_file_reports_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.toml");
    std::fs::write(&path, "[distribution\npolicy = ").expect("write");

    match ModelConfig::read(&path) {
        Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn shipped_config_matches_defaults() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config/model.toml");
    let config = ModelConfig::read(&path).expect("shipped config");
    assert_eq!(config, ModelConfig::default());
}
