//! Configuration types and loading.
//!
//! [`MedcalcConfig`] is assembled from three layers, later ones winning:
//!
//! 1. built-in defaults,
//! 2. `.medcalc/config.yaml`, when a `.medcalc/` directory was found,
//! 3. `MEDCALC_*` environment variables, with `__` separating nested keys
//!    (`MEDCALC_EXPLAIN__MODEL=...`).
//!
//! `GEMINI_API_KEY` is read as a last resort for `explain.api_key`.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the configuration file inside `.medcalc/`.
pub const CONFIG_FILE: &str = "config.yaml";

const ENV_PREFIX: &str = "MEDCALC_";
const API_KEY_FALLBACK_ENV: &str = "GEMINI_API_KEY";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("failed to write config file: {0}")]
    WriteError(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),

    #[error("no .medcalc directory found (run 'medcalc config init' first)")]
    MedcalcDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Catalog integrity policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IntegrityConfig {
    /// Refuse to start when a calculation name is registered twice.
    #[serde(default)]
    pub deny_collisions: bool,
}

/// Settings for the explanation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainConfig {
    /// Base URL of the generative-language API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full medcalc configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MedcalcConfig {
    /// Catalog document replacing the built-in one. Relative paths resolve
    /// against the directory holding `.medcalc/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Output JSON instead of human-readable text.
    #[serde(default)]
    pub json: bool,

    #[serde(default)]
    pub integrity: IntegrityConfig,

    #[serde(default)]
    pub explain: ExplainConfig,
}

impl MedcalcConfig {
    /// Absolute catalog path, if one is configured.
    pub fn catalog_path(&self, medcalc_dir: Option<&Path>) -> Option<PathBuf> {
        let path = self.catalog.as_ref()?;
        if path.is_absolute() {
            return Some(path.clone());
        }
        match medcalc_dir.and_then(Path::parent) {
            Some(root) => Some(root.join(path)),
            None => Some(path.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The layered provider stack, before extraction.
pub fn figment(medcalc_dir: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(MedcalcConfig::default()));
    if let Some(dir) = medcalc_dir {
        figment = figment.merge(Yaml::file(dir.join(CONFIG_FILE)));
    }
    figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["dir"]).split("__"))
}

/// Load configuration, reading `config.yaml` from `medcalc_dir` when given.
///
/// A missing file contributes nothing.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when a layer holds a value of the wrong
/// shape (malformed YAML, `MEDCALC_JSON=maybe`, ...).
pub fn load_config(medcalc_dir: Option<&Path>) -> Result<MedcalcConfig> {
    let mut config: MedcalcConfig = figment(medcalc_dir).extract()?;

    if config.explain.api_key.is_none() {
        config.explain.api_key = std::env::var(API_KEY_FALLBACK_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
    }
    Ok(config)
}

/// Write `config` to `config.yaml` inside `medcalc_dir`, creating the
/// directory if needed.
pub fn save_config(medcalc_dir: &Path, config: &MedcalcConfig) -> Result<()> {
    std::fs::create_dir_all(medcalc_dir)?;
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(medcalc_dir.join(CONFIG_FILE), yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let cfg = MedcalcConfig::default();
        assert!(cfg.catalog.is_none());
        assert!(!cfg.json);
        assert!(!cfg.integrity.deny_collisions);
        assert_eq!(cfg.explain.model, "gemini-2.0-flash");
        assert_eq!(cfg.explain.timeout_secs, 30);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "json: true\nexplain:\n  model: gemini-pro\n";
        let cfg: MedcalcConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(cfg.json);
        assert_eq!(cfg.explain.model, "gemini-pro");
        assert_eq!(cfg.explain.endpoint, default_endpoint());
    }

    #[test]
    fn test_file_layer() {
        Jail::expect_with(|jail| {
            std::fs::create_dir(jail.directory().join(".medcalc")).map_err(|e| e.to_string())?;
            jail.create_file(
                ".medcalc/config.yaml",
                "catalog: data/catalog.json\nintegrity:\n  deny_collisions: true\n",
            )?;
            let dir = jail.directory().join(".medcalc");
            let cfg = load_config(Some(&dir)).map_err(|e| e.to_string())?;
            assert!(cfg.integrity.deny_collisions);
            assert_eq!(
                cfg.catalog_path(Some(&dir)),
                Some(jail.directory().join("data/catalog.json"))
            );
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            std::fs::create_dir(jail.directory().join(".medcalc")).map_err(|e| e.to_string())?;
            jail.create_file(".medcalc/config.yaml", "json: false\n")?;
            jail.set_env("MEDCALC_JSON", "true");
            jail.set_env("MEDCALC_EXPLAIN__TIMEOUT_SECS", "5");
            jail.set_env("MEDCALC_DIR", "/somewhere/else");
            let dir = jail.directory().join(".medcalc");
            let cfg = load_config(Some(&dir)).map_err(|e| e.to_string())?;
            assert!(cfg.json);
            assert_eq!(cfg.explain.timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn test_api_key_fallback() {
        Jail::expect_with(|jail| {
            jail.set_env("GEMINI_API_KEY", "fallback-key");
            let cfg = load_config(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg.explain.api_key.as_deref(), Some("fallback-key"));

            jail.set_env("MEDCALC_EXPLAIN__API_KEY", "primary-key");
            let cfg = load_config(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg.explain.api_key.as_deref(), Some("primary-key"));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_env_value() {
        Jail::expect_with(|jail| {
            jail.set_env("MEDCALC_JSON", "perhaps");
            assert!(matches!(load_config(None), Err(ConfigError::Invalid(_))));
            Ok(())
        });
    }

    #[test]
    fn test_roundtrip_config() {
        let dir = tempfile::tempdir().unwrap();
        let medcalc_dir = dir.path().join(".medcalc");

        let mut cfg = MedcalcConfig::default();
        cfg.catalog = Some(PathBuf::from("catalog.yaml"));
        cfg.integrity.deny_collisions = true;

        save_config(&medcalc_dir, &cfg).unwrap();
        let text = std::fs::read_to_string(medcalc_dir.join(CONFIG_FILE)).unwrap();
        let loaded: MedcalcConfig = serde_yaml::from_str(&text).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_absolute_catalog_path_is_kept() {
        let cfg = MedcalcConfig {
            catalog: Some(PathBuf::from("/opt/catalog.json")),
            ..MedcalcConfig::default()
        };
        assert_eq!(
            cfg.catalog_path(Some(Path::new("/home/x/.medcalc"))),
            Some(PathBuf::from("/opt/catalog.json"))
        );
    }
}
