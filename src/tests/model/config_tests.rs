use super::*;

use std::time::Duration;

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);

    let mut config = FeedConfig::new("http://localhost:8000");
    config.token = Some("dev".to_string());
    config.refresh_secs = Some(5);
    config.save(&path).unwrap();

    let loaded = FeedConfig::load(&path).unwrap();
    assert_eq!(loaded.version, 1);
    assert_eq!(loaded.base_url, "http://localhost:8000");
    assert_eq!(loaded.token.as_deref(), Some("dev"));
    assert_eq!(loaded.refresh_interval(), Duration::from_secs(5));
}

#[test]
fn refresh_interval_defaults_to_thirty_seconds() {
    let config = FeedConfig::new("http://localhost:8000");
    assert_eq!(config.refresh_interval(), Duration::from_secs(30));
}

#[test]
fn loading_a_missing_config_points_at_init() {
    let dir = tempfile::tempdir().unwrap();
    let err = FeedConfig::load(&dir.path().join(CONFIG_FILE)).unwrap_err();
    assert!(format!("{:#}", err).contains("wardmap init"));
}

#[test]
fn minimal_config_json_decodes() {
    let config: FeedConfig =
        serde_json::from_str(r#"{ "version": 1, "base_url": "http://host" }"#).unwrap();
    assert!(config.token.is_none());
    assert!(config.refresh_secs.is_none());
}
