use std::{collections::HashMap, fs, io::ErrorKind, path::Path};

use anyhow::{bail, Context};
use client_core::{
    transport::{DEFAULT_API_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_REGION},
    view::DEFAULT_POSTER_SIZE,
    TmdbSettings,
};
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "now_playing.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub api_key: String,
    pub language: String,
    pub region: String,
    pub poster_size: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            api_key: String::new(),
            language: DEFAULT_LANGUAGE.into(),
            region: DEFAULT_REGION.into(),
            poster_size: DEFAULT_POSTER_SIZE.into(),
        }
    }
}

impl Settings {
    pub fn tmdb(&self) -> TmdbSettings {
        TmdbSettings {
            base_url: self.api_base_url.clone(),
            api_key: self.api_key.clone(),
            language: self.language.clone(),
            region: self.region.clone(),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            bail!("missing API key; set TMDB_API_KEY, api_key in {DEFAULT_CONFIG_FILE}, or pass --api-key");
        }
        Url::parse(&self.api_base_url)
            .with_context(|| format!("invalid api_base_url '{}'", self.api_base_url))?;
        Ok(())
    }

    fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file_cfg = toml::from_str::<HashMap<String, String>>(raw)
            .context("config file must be a flat table of string values")?;

        if let Some(v) = file_cfg.get("api_base_url") {
            self.api_base_url = v.clone();
        }
        if let Some(v) = file_cfg.get("api_key") {
            self.api_key = v.clone();
        }
        if let Some(v) = file_cfg.get("language") {
            self.language = v.clone();
        }
        if let Some(v) = file_cfg.get("region") {
            self.region = v.clone();
        }
        if let Some(v) = file_cfg.get("poster_size") {
            self.poster_size = v.clone();
        }
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("TMDB_API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = var("APP__API_BASE_URL") {
            self.api_base_url = v;
        }

        if let Some(v) = var("TMDB_API_KEY") {
            self.api_key = v;
        }
        if let Some(v) = var("APP__API_KEY") {
            self.api_key = v;
        }

        if let Some(v) = var("APP__LANGUAGE") {
            self.language = v;
        }
        if let Some(v) = var("APP__REGION") {
            self.region = v;
        }
        if let Some(v) = var("APP__POSTER_SIZE") {
            self.poster_size = v;
        }
    }
}

/// Defaults, then the config file, then environment variables.
///
/// A missing default config file is fine; an explicitly named one must exist.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = explicit_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(raw) => settings
            .apply_file(&raw)
            .with_context(|| format!("failed to parse '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound && explicit_path.is_none() => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()));
        }
    }

    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_file(contents: &str) -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("now_playing_config_test_{suffix}.toml"));
        fs::write(&path, contents).expect("write config");
        path
    }

    #[test]
    fn file_values_override_defaults() {
        let mut settings = Settings::default();
        settings
            .apply_file("api_key = \"file-key\"\nregion = \"US\"\n")
            .expect("parse");

        assert_eq!(settings.api_key, "file-key");
        assert_eq!(settings.region, "US");
        assert_eq!(settings.language, "en-US");
        assert_eq!(settings.poster_size, "w342");
    }

    #[test]
    fn app_prefixed_env_wins_over_plain_env() {
        let mut settings = Settings::default();
        settings.apply_env(|key| match key {
            "TMDB_API_KEY" => Some("plain".into()),
            "APP__API_KEY" => Some("prefixed".into()),
            "APP__POSTER_SIZE" => Some("w500".into()),
            _ => None,
        });

        assert_eq!(settings.api_key, "prefixed");
        assert_eq!(settings.poster_size, "w500");
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn validate_requires_key_and_parseable_url() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_err());

        settings.api_key = "k".into();
        assert!(settings.validate().is_ok());

        settings.api_base_url = "::nope".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn explicit_config_file_is_read() {
        let path = temp_file("api_base_url = \"http://localhost:9000/3\"\n");
        let settings = load_settings(Some(&path)).expect("load");
        assert_eq!(settings.api_base_url, "http://localhost:9000/3");
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let path = env::temp_dir().join("now_playing_config_test_does_not_exist.toml");
        assert!(load_settings(Some(&path)).is_err());
    }

    #[test]
    fn non_string_values_are_rejected() {
        let mut settings = Settings::default();
        assert!(settings.apply_file("api_key = 42\n").is_err());
    }
}
