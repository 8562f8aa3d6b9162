use hhub_domain::config::{ApiConfig, CalendarsConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 8380);
    assert!(server.ssl.is_none());

    let calendars = CalendarsConfig::default();
    assert_eq!(calendars.data_dir, std::path::PathBuf::from("calendars"));
    assert_eq!(calendars.default_locale, "en");
    assert!(calendars.cache_capacity > 0);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "calendars": { "data_dir": "/tmp/defs", "cache_capacity": 8, "default_locale": "de" }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.calendars.data_dir, std::path::PathBuf::from("/tmp/defs"));
    assert_eq!(cfg.calendars.default_locale, "de");
}

#[test]
fn api_config_tolerates_partial_input() {
    let cfg: ApiConfig = serde_json::from_value(json!({})).expect("empty config");
    assert_eq!(cfg.server.port, ServerConfig::default().port);
    assert_eq!(cfg.calendars.cache_capacity, CalendarsConfig::default().cache_capacity);
}
