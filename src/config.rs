use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::network::Endpoints;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Deserialize, Serialize)]
#[allow(unused)]
pub struct Settings {
    pub base_url: String,
    /// Sent verbatim as the `Cookie` header, e.g. `session=...`.
    pub session_cookie: Option<String>,
    pub log_file: Option<String>,
    pub all_photos_delete_path: String,
    pub album_delete_path: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let endpoints = Endpoints::default();
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("all_photos_delete_path", endpoints.all_photos_delete_path)?
            .set_default("album_delete_path", endpoints.album_delete_path)?;

        // 1. User's global config, if any.
        if let Some(user_config_path) = get_user_config_path() {
            builder = builder.add_source(File::from(user_config_path).required(false));
        }

        let s = builder
            // 2. Local curator.toml from CWD. Optional override.
            .add_source(File::with_name("curator.toml").required(false))
            // 3. CURATOR_BASE_URL and friends.
            .add_source(Environment::with_prefix("CURATOR"))
            .build()?;

        s.try_deserialize()
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            all_photos_delete_path: self.all_photos_delete_path.clone(),
            album_delete_path: self.album_delete_path.clone(),
        }
    }
}

pub fn get_user_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("album-curator");
    path.push("curator.toml");
    Some(path)
}

pub fn save_session_cookie(cookie: &str) -> Result<PathBuf, anyhow::Error> {
    let user_config_path =
        get_user_config_path().ok_or_else(|| anyhow::anyhow!("No config directory available"))?;
    set_config_value(&user_config_path, "session_cookie", cookie)?;
    Ok(user_config_path)
}

fn set_config_value(path: &PathBuf, key: &str, value: &str) -> Result<(), anyhow::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config_str = fs::read_to_string(path).unwrap_or_else(|_| "".to_string());
    let mut doc = config_str.parse::<toml::Table>()?;

    doc.insert(key.to_string(), toml::Value::String(value.to_string()));

    fs::write(path, doc.to_string())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn set_value_keeps_other_keys() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested").join("curator.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "base_url = \"http://photos.local\"\n").unwrap();

        set_config_value(&path, "session_cookie", "session=abc").unwrap();

        let doc = fs::read_to_string(&path).unwrap().parse::<toml::Table>().unwrap();
        assert_eq!(doc["base_url"].as_str(), Some("http://photos.local"));
        assert_eq!(doc["session_cookie"].as_str(), Some("session=abc"));
    }

    #[test]
    fn set_value_creates_missing_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("album-curator").join("curator.toml");

        set_config_value(&path, "session_cookie", "session=xyz").unwrap();

        let doc = fs::read_to_string(&path).unwrap().parse::<toml::Table>().unwrap();
        assert_eq!(doc["session_cookie"].as_str(), Some("session=xyz"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn settings_endpoints_mirror_fields() {
        let settings = Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_cookie: None,
            log_file: None,
            all_photos_delete_path: "/a".into(),
            album_delete_path: "/b".into(),
        };
        let endpoints = settings.endpoints();
        assert_eq!(endpoints.all_photos_delete_path, "/a");
        assert_eq!(endpoints.album_delete_path, "/b");
    }
}
