//! Tests for configuration loading and application wiring


use face_follow::{
    app::{AppConfig, DetectionInput, FaceFollowApp},
    config::{Config, SinkKind, EXAMPLE_CONFIG},
    controller::{Dimensions, Position},
    Error,
};
use std::{fs, path::PathBuf};
use test_helpers::{detection_with_moves, features_with_moves, VIEWPORT};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("face-follow-{}-{name}", std::process::id()))
}

#[test]
fn test_config_file_roundtrip() {
    let path = temp_path("roundtrip.yaml");

    let mut config = Config::default();
    config.controller.strength = 12.0;
    config.viewport = Some(Dimensions::new(1920, 1080));
    config.output.sink = SinkKind::Json;
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_missing_config_file() {
    assert!(matches!(Config::from_file(temp_path("missing.yaml")), Err(Error::Io(_))));
}

#[test]
fn test_malformed_config_file() {
    let path = temp_path("malformed.yaml");
    fs::write(&path, "controller: [not, a, map]\n").unwrap();
    let result = Config::from_file(&path);
    fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_example_config_builds_controller() {
    let config: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
    let controller = config.build_controller(config.viewport.unwrap()).unwrap();

    assert_eq!(controller.viewport(), Dimensions::new(1000, 800));
    assert_eq!(controller.frame(), Dimensions::new(320, 240));
    assert_eq!(controller.position(), Position::ORIGIN);
    assert_eq!(config.confidence_gate().unwrap().threshold(), 0.99);
}

#[test]
fn test_app_runs_recording() {
    let path = temp_path("recording.jsonl");
    let frame = serde_json::to_string(&vec![detection_with_moves(40.0, 0.0, 0.999)]).unwrap();
    fs::write(&path, format!("{frame}\n[]\n{frame}\n")).unwrap();

    let mut config = Config::default();
    config.controller.easing = "snap".to_string();
    config.viewport = Some(Dimensions::new(1000, 800));

    let mut app = FaceFollowApp::new(AppConfig {
        input: DetectionInput::File(path.clone()),
        config,
    })
    .unwrap();
    let stats = app.run().unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(stats.frames, 3);
    assert_eq!(stats.tracked, 2);
    assert_eq!(app.position(), Position::new(840.0, 740.0));
}

#[test]
fn test_app_rejects_invalid_config() {
    let mut config = Config::default();
    config.tracking.confidence_threshold = 2.0;

    let app = FaceFollowApp::new(AppConfig {
        input: DetectionInput::Stdin,
        config,
    });
    assert!(matches!(app, Err(Error::ConfigError(_))));
}

#[test]
fn test_inline_easing_strength_is_rejected() {
    let yaml = "controller:\n  easing: \"exponential:10\"\n  strength: 30.0\n";
    let config: Config = serde_yaml::from_str(yaml).unwrap();

    assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    assert!(config.build_controller(VIEWPORT).is_err());
}

#[test]
fn test_strength_setting_drives_controller() {
    let config: Config = serde_yaml::from_str("controller:\n  strength: 10.0\n").unwrap();
    config.validate().unwrap();

    let mut controller = config.build_controller(VIEWPORT).unwrap();
    let position = controller.sync(&features_with_moves(40.0, 0.0));

    assert!((position.x - 84.0).abs() < 1e-9);
    assert!((position.y - 74.0).abs() < 1e-9);
    assert!(config.to_yaml().unwrap().contains("strength: 10.0"));
}
