use super::{load_settings_from, prepare_assets_dir, Settings};

use std::{collections::HashMap, fs};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn missing_file_and_env_yield_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(&dir.path().join("server.toml"), env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.relay_endpoint, "https://api.web3forms.com/submit");
    assert!(settings.relay_access_key.is_none());
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        "bind_addr = \"0.0.0.0:9000\"\ncatalog_path = \"events.toml\"\nassets_dir = \"public\"\n",
    )
    .expect("write");

    let settings = load_settings_from(&path, env_from(&[]));
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.catalog_path.as_deref(), Some("events.toml"));
    assert_eq!(settings.assets_dir.as_deref(), Some("public"));
}

#[test]
fn env_overrides_file_and_prefixed_keys_win() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "bind_addr = \"0.0.0.0:9000\"\n").expect("write");

    let settings = load_settings_from(
        &path,
        env_from(&[
            ("SERVER_BIND", "127.0.0.1:7000"),
            ("APP__BIND_ADDR", "127.0.0.1:7001"),
            ("WEB3FORMS_ACCESS_KEY", "plain-key"),
            ("APP__RELAY_ACCESS_KEY", "app-key"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:7001");
    assert_eq!(settings.relay_access_key.as_deref(), Some("app-key"));
}

#[test]
fn blank_access_key_counts_as_unset() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(
        &dir.path().join("server.toml"),
        env_from(&[("WEB3FORMS_ACCESS_KEY", "   ")]),
    );
    assert!(settings.relay_access_key.is_none());
}

#[test]
fn malformed_file_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "this is = = not toml").expect("write");
    assert_eq!(load_settings_from(&path, env_from(&[])), Settings::default());
}

#[test]
fn assets_dir_is_optional() {
    assert_eq!(prepare_assets_dir(None).expect("none"), None);
    assert_eq!(prepare_assets_dir(Some("  ")).expect("blank"), None);
}

#[test]
fn assets_dir_must_exist_and_be_a_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let resolved = prepare_assets_dir(dir.path().to_str()).expect("dir");
    assert_eq!(resolved.as_deref(), Some(dir.path()));

    let file = dir.path().join("logo.png");
    fs::write(&file, b"png").expect("write");
    assert!(prepare_assets_dir(file.to_str()).is_err());
    assert!(prepare_assets_dir(dir.path().join("missing").to_str()).is_err());
}
