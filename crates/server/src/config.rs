use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use registration::relay::{DEFAULT_RECIPIENT, DEFAULT_RELAY_ENDPOINT};

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub catalog_path: Option<String>,
    pub assets_dir: Option<String>,
    pub relay_endpoint: String,
    pub relay_access_key: Option<String>,
    pub relay_recipient: String,
    pub main_site_url: Option<String>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            catalog_path: None,
            assets_dir: None,
            relay_endpoint: DEFAULT_RELAY_ENDPOINT.into(),
            relay_access_key: None,
            relay_recipient: DEFAULT_RECIPIENT.into(),
            main_site_url: None,
            log_filter: "info".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then `settings_file`, then environment. Later sources win.
pub fn load_settings_from(
    settings_file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(settings_file) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("catalog_path") {
                settings.catalog_path = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("assets_dir") {
                settings.assets_dir = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("relay_endpoint") {
                settings.relay_endpoint = v.clone();
            }
            if let Some(v) = file_cfg.get("relay_recipient") {
                settings.relay_recipient = v.clone();
            }
            if let Some(v) = file_cfg.get("main_site_url") {
                settings.main_site_url = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("log_filter") {
                settings.log_filter = v.clone();
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("APP__CATALOG_PATH") {
        settings.catalog_path = Some(v);
    }
    if let Some(v) = env("APP__ASSETS_DIR") {
        settings.assets_dir = Some(v);
    }

    if let Some(v) = env("APP__RELAY_ENDPOINT") {
        settings.relay_endpoint = v;
    }
    if let Some(v) = env("WEB3FORMS_ACCESS_KEY") {
        settings.relay_access_key = Some(v);
    }
    if let Some(v) = env("APP__RELAY_ACCESS_KEY") {
        settings.relay_access_key = Some(v);
    }
    if let Some(v) = env("APP__RELAY_RECIPIENT") {
        settings.relay_recipient = v;
    }

    if let Some(v) = env("APP__MAIN_SITE_URL") {
        settings.main_site_url = Some(v);
    }
    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }

    settings.relay_access_key = settings
        .relay_access_key
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());

    settings
}

/// Resolves the configured assets directory, which must exist when set.
pub fn prepare_assets_dir(raw_assets_dir: Option<&str>) -> anyhow::Result<Option<PathBuf>> {
    let Some(raw) = raw_assets_dir.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    let path = PathBuf::from(raw);
    let metadata = fs::metadata(&path)
        .with_context(|| format!("failed to read assets directory '{}'", path.display()))?;
    if !metadata.is_dir() {
        bail!("assets path '{}' is not a directory", path.display());
    }
    Ok(Some(path))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
