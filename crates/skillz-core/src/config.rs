//! Settings: defaults, then `skillz.toml`, then `SKILLZ_*` environment
//!
//! Command-line flags are applied last by the binaries themselves.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::catalog::{DEFAULT_APP_NAME, MANIFEST_FILE};
use crate::constants::config::{
    CONFIG_FILE, DEFAULT_ORIGIN, DEFAULT_PORT, DEFAULT_PUBLIC_DIR, DEFAULT_SKILLS_DIR,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Label injected into the catalog root
    pub app_name: String,
    /// Directory holding `<category>/<skill>/SKILL.md`
    pub skills_dir: PathBuf,
    /// Hand-written manifest read by `prepare`
    pub manifest_path: PathBuf,
    /// Where the prepared `skills.json` and `layout.json` live
    pub public_dir: PathBuf,
    /// Substituted for `${baseUrl}` in documents
    pub origin: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            skills_dir: PathBuf::from(DEFAULT_SKILLS_DIR),
            manifest_path: PathBuf::from(".").join(MANIFEST_FILE),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            origin: DEFAULT_ORIGIN.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Load from `skillz.toml` in `working_dir` (if present) and the
    /// process environment
    pub async fn load(working_dir: &Path) -> Result<Self> {
        let mut settings = Self::from_file(working_dir).await?;
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    async fn from_file(working_dir: &Path) -> Result<Self> {
        let config_path = working_dir.join(CONFIG_FILE);

        if !config_path.exists() {
            tracing::debug!("No {} found at {:?}", CONFIG_FILE, config_path);
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(&config_path)
            .await
            .with_context(|| format!("Failed to read {:?}", config_path))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", config_path))?;

        tracing::info!("Loaded settings from {:?}", config_path);
        Ok(settings)
    }

    /// Apply `SKILLZ_*` overrides looked up through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(name) = lookup("SKILLZ_APP_NAME") {
            self.app_name = name;
        }
        if let Some(dir) = lookup("SKILLZ_DIR") {
            self.skills_dir = dir.into();
        }
        if let Some(path) = lookup("SKILLZ_MANIFEST") {
            self.manifest_path = path.into();
        }
        if let Some(dir) = lookup("SKILLZ_PUBLIC_DIR") {
            self.public_dir = dir.into();
        }
        if let Some(origin) = lookup("SKILLZ_ORIGIN") {
            self.origin = origin;
        }
        if let Some(port) = lookup("SKILLZ_PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("Invalid SKILLZ_PORT: {}", port))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_defaults_without_file() {
        let temp = tempdir().unwrap();
        let settings = Settings::from_file(temp.path()).await.unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.app_name, "skillz");
        assert_eq!(settings.port, 3000);
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join("skillz.toml"),
            "app_name = \"loadouts\"\nport = 8080\n",
        )
        .unwrap();

        let settings = Settings::from_file(temp.path()).await.unwrap();
        assert_eq!(settings.app_name, "loadouts");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.skills_dir, PathBuf::from("./skills"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("skillz.toml"), "port = \"many\"").unwrap();
        assert!(Settings::from_file(temp.path()).await.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SKILLZ_DIR", "/srv/skills"),
            ("SKILLZ_ORIGIN", "https://skills.example.com"),
            ("SKILLZ_PORT", "4000"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(settings.skills_dir, PathBuf::from("/srv/skills"));
        assert_eq!(settings.origin, "https://skills.example.com");
        assert_eq!(settings.port, 4000);
        assert_eq!(settings.app_name, "skillz");
    }

    #[test]
    fn test_invalid_port_env() {
        let mut settings = Settings::default();
        let result = settings.apply_env(|key| (key == "SKILLZ_PORT").then(|| "http".to_string()));
        assert!(result.is_err());
    }
}
