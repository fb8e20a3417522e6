use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::info;

use crate::{catalog::Catalog, provider::ProviderId, query::Ranking};

/// Settings for a single forecast provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Overrides the provider's built-in endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Artificial delay added to every call, in milliseconds.
    #[serde(default)]
    pub latency_ms: u64,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Forecast provider id, e.g. "simulated" or "open-meteo".
    pub default_provider: Option<String>,

    #[serde(default)]
    pub ranking: Ranking,

    /// JSON catalog used instead of the bundled destinations.
    pub catalog_path: Option<PathBuf>,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_level: Option<String>,

    /// Kept last so plain keys serialize before the provider tables.
    ///
    /// Example TOML:
    /// [providers.open-meteo]
    /// base_url = "https://air-quality-api.open-meteo.com"
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Config {
    /// Forecast provider to use when none is given explicitly.
    /// Falls back to the simulated provider, which needs no setup.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        match self.default_provider.as_deref() {
            Some(s) => ProviderId::try_from(s).map_err(|e| {
                anyhow!(
                    "{e}\n\
                     Hint: run `travel configure <provider>` to pick a valid default provider."
                )
            }),
            None => Ok(ProviderId::Simulated),
        }
    }

    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    /// Replace a provider's settings; becomes the default if none is set yet.
    pub fn upsert_provider(&mut self, id: ProviderId, provider: ProviderConfig) {
        self.providers.insert(id.as_str().to_string(), provider);

        if self.default_provider.is_none() {
            self.default_provider = Some(id.to_string());
        }
    }

    pub fn is_provider_configured(&self, id: ProviderId) -> bool {
        self.providers.contains_key(id.as_str())
    }

    /// The configured catalog file, or the bundled destinations.
    pub fn catalog(&self) -> Result<Arc<Catalog>> {
        match &self.catalog_path {
            Some(path) => Ok(Arc::new(Catalog::load(path)?)),
            None => Ok(Catalog::builtin()),
        }
    }

    /// Load config from the platform config directory, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!(path = %path.display(), "loaded configuration");
        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "eco-travel", "travel-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderId;

    #[test]
    fn default_provider_falls_back_to_simulated() {
        let cfg = Config::default();
        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::Simulated);
    }

    #[test]
    fn default_provider_rejects_unknown_id() {
        let cfg = Config { default_provider: Some("nope".into()), ..Default::default() };
        let msg = cfg.default_provider_id().unwrap_err().to_string();

        assert!(msg.contains("Unknown provider"));
        assert!(msg.contains("Hint: run `travel configure"));
    }

    #[test]
    fn upsert_sets_default_when_missing() {
        let mut cfg = Config::default();
        cfg.upsert_provider(ProviderId::OpenMeteo, ProviderConfig::default());

        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::OpenMeteo);
        assert!(cfg.is_provider_configured(ProviderId::OpenMeteo));
        assert!(!cfg.is_provider_configured(ProviderId::Simulated));
    }

    #[test]
    fn upsert_does_not_override_existing_default() {
        let mut cfg = Config::default();
        cfg.upsert_provider(ProviderId::Simulated, ProviderConfig::default());
        cfg.upsert_provider(
            ProviderId::OpenMeteo,
            ProviderConfig { base_url: Some("http://localhost:8080".into()), latency_ms: 0 },
        );

        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::Simulated);
        assert_eq!(
            cfg.provider_config(ProviderId::OpenMeteo).and_then(|p| p.base_url.as_deref()),
            Some("http://localhost:8080")
        );
    }

    #[test]
    fn set_default_provider_overrides_default() {
        let mut cfg = Config::default();
        cfg.upsert_provider(ProviderId::Simulated, ProviderConfig::default());
        cfg.set_default_provider(ProviderId::OpenMeteo);

        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::OpenMeteo);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert!(cfg.default_provider.is_none());
        assert_eq!(cfg.ranking, Ranking::Cascade);
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config { ranking: Ranking::Composite, ..Default::default() };
        cfg.upsert_provider(
            ProviderId::Simulated,
            ProviderConfig { base_url: None, latency_ms: 250 },
        );
        cfg.log_level = Some("debug".into());
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.ranking, Ranking::Composite);
        assert_eq!(loaded.default_provider.as_deref(), Some("simulated"));
        assert_eq!(loaded.provider_config(ProviderId::Simulated).map(|p| p.latency_ms), Some(250));
        assert_eq!(loaded.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn parses_hand_written_toml() {
        let cfg: Config = toml::from_str(
            r#"
            default_provider = "open-meteo"
            ranking = "composite"

            [providers.open-meteo]
            base_url = "http://127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::OpenMeteo);
        assert_eq!(cfg.ranking, Ranking::Composite);
        assert_eq!(
            cfg.provider_config(ProviderId::OpenMeteo),
            Some(&ProviderConfig { base_url: Some("http://127.0.0.1:9000".into()), latency_ms: 0 })
        );
    }

    #[test]
    fn catalog_defaults_to_builtin() {
        let cfg = Config::default();
        assert_eq!(cfg.catalog().unwrap().len(), 6);
    }

    #[test]
    fn catalog_errors_on_missing_file() {
        let cfg = Config { catalog_path: Some("/definitely/not/here.json".into()), ..Default::default() };
        let err = cfg.catalog().unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog file"));
    }
}
