//! Integration tests for the planka-config crate.

use std::fs;

use planka::config::persistence::find_config_file_in;
use planka::config::{Config, CredentialsConfig, GapSetting, ServerConfig};
use planka::{Credentials, PositionGap};
use tempfile::TempDir;

#[test]
fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("planka.json5");

    fs::write(
        &config_path,
        r#"
        {
            // Configuration for planka
            server: {
                url: "https://planka.example.com/",
                timeout_secs: 10,
                language: "en-US",
            },
            credentials: { username: "demo", password: "demo" },
            position_gap: "legacy",
        }
        "#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.server.url, "https://planka.example.com/");
    assert_eq!(config.server.timeout_secs, 10);
    assert_eq!(config.server.language.as_deref(), Some("en-US"));
    assert_eq!(config.gap(), PositionGap::LEGACY);
    assert!(matches!(
        config.resolved_credentials(),
        Some(Credentials::Password { ref username, .. }) if username == "demo"
    ));
}

#[test]
fn config_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("nested").join("config.json");

    let original = Config {
        server: ServerConfig::with_url("http://localhost:3000"),
        credentials: CredentialsConfig {
            api_key: Some("key".to_string()),
            ..Default::default()
        },
        position_gap: GapSetting::custom(1024).unwrap(),
    };

    original.save_to(&config_path).unwrap();
    let loaded = Config::load_from(&config_path).unwrap();

    assert_eq!(original, loaded);
    assert_eq!(loaded.gap().get(), 1024);
}

#[test]
fn config_load_nonexistent_fails() {
    let result = Config::load_from("/nonexistent/path/config.json");
    assert!(result.is_err());
}

#[test]
fn config_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();

    let bad_url = dir.path().join("url.json5");
    fs::write(&bad_url, r#"{ server: { url: "ftp://planka.example.com" } }"#).unwrap();
    assert!(Config::load_from(&bad_url).is_err());

    let bad_gap = dir.path().join("gap.json5");
    fs::write(&bad_gap, r#"{ position_gap: 0 }"#).unwrap();
    assert!(Config::load_from(&bad_gap).is_err());

    let bad_timeout = dir.path().join("timeout.json5");
    fs::write(&bad_timeout, r#"{ server: { timeout_secs: 0 } }"#).unwrap();
    assert!(Config::load_from(&bad_timeout).is_err());
}

#[test]
fn environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("planka.json");
    fs::write(
        &config_path,
        r#"{"server": {"url": "http://file.example.com"}, "position_gap": "legacy"}"#,
    )
    .unwrap();

    let mut config = Config::load_from(&config_path).unwrap();
    config
        .apply_env_with(|name| match name {
            "PLANKA_URL" => Some("https://env.example.com".to_string()),
            "PLANKA_API_KEY" => Some("env-key".to_string()),
            "PLANKA_POSITION_GAP" => Some("current".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.server.url, "https://env.example.com");
    assert_eq!(config.gap(), PositionGap::CURRENT);
    assert!(matches!(
        config.resolved_credentials(),
        Some(Credentials::ApiKey(_))
    ));
}

#[test]
fn local_config_wins_over_user_config() {
    let local = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    fs::write(local.path().join("planka.json"), "{}").unwrap();
    fs::create_dir(user.path().join("planka")).unwrap();
    fs::write(user.path().join("planka").join("config.json5"), "{}").unwrap();

    let found = find_config_file_in(local.path(), Some(user.path())).unwrap();
    assert_eq!(found, local.path().join("planka.json"));

    fs::remove_file(local.path().join("planka.json")).unwrap();
    let found = find_config_file_in(local.path(), Some(user.path())).unwrap();
    assert_eq!(found, user.path().join("planka").join("config.json5"));
}
