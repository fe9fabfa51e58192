use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Used when neither the flag, the environment nor the config file name a backend.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TailorConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Unset means requests may wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl TailorConfig {
    /// Load config from ~/.config/tailor/config.toml. A missing file yields defaults;
    /// nothing is written back.
    pub fn load() -> crate::error::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: TailorConfig = toml::from_str(&contents).map_err(|e| {
            crate::error::TailorError::Config(format!("Failed to parse config: {e}"))
        })?;
        Ok(config)
    }

    /// Get the config file path.
    pub fn config_path() -> crate::error::Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::error::TailorError::Config("Could not determine config directory".into())
        })?;
        Ok(config_dir.join("tailor").join("config.toml"))
    }

    /// Apply a base URL coming from the command line or environment.
    /// Blank values are ignored so an empty variable falls through to the file/default.
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            let url = url.trim();
            if !url.is_empty() {
                self.api.base_url = url.to_string();
            }
        }
        if self.api.base_url.trim().is_empty() {
            self.api.base_url = default_base_url();
        }
        self
    }

    /// The base URL without trailing slashes, ready for joining endpoint paths.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = TailorConfig::default();
        assert_eq!(config.base_url(), "http://localhost:8000/api");
        assert_eq!(config.api.request_timeout_secs, None);
    }

    #[test]
    fn loads_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://tailor.example.com/api/\"").unwrap();

        let config = TailorConfig::load_from(file.path()).unwrap();
        assert_eq!(config.base_url(), "https://tailor.example.com/api");
        assert_eq!(config.api.request_timeout_secs, None);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = TailorConfig::load_from(file.path()).unwrap();
        assert_eq!(config, TailorConfig::default());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();

        let err = TailorConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, crate::error::TailorError::Config(_)));
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TailorConfig::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, crate::error::TailorError::Io(_)));
    }

    #[test]
    fn override_wins_over_file_value() {
        let config = TailorConfig::default()
            .with_base_url_override(Some("http://10.0.0.5:9000/api".to_string()));
        assert_eq!(config.base_url(), "http://10.0.0.5:9000/api");
    }

    #[test]
    fn blank_override_falls_through() {
        let mut config = TailorConfig::default();
        config.api.base_url = "http://from-file/api".to_string();

        let config = config.with_base_url_override(Some("   ".to_string()));
        assert_eq!(config.base_url(), "http://from-file/api");
    }
}
