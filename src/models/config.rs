use serde::Deserialize;
use std::path::Path;

/// Application configuration loaded from an optional YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Largest accepted request body (the references travel inline)
    pub max_reference_bytes: usize,

    /// Largest decoded image, in pixels
    pub max_pixels: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            max_reference_bytes: 32 * 1024 * 1024,
            max_pixels: 64 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Load from `path` if given, falling back to defaults on any problem.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        bind_addr = %config.bind_addr,
                        max_pixels = config.max_pixels,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load using the `CONFIG_FILE` and `BIND_ADDR` environment variables.
    pub fn from_env() -> Self {
        let config_file = std::env::var("CONFIG_FILE").ok();
        let config = Self::load(config_file.as_deref().map(Path::new));
        config.with_bind_addr(std::env::var("BIND_ADDR").ok())
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Override the bind address when one is supplied.
    pub fn with_bind_addr(mut self, bind_addr: Option<String>) -> Self {
        if let Some(addr) = bind_addr.filter(|a| !a.is_empty()) {
            self.bind_addr = addr;
        }
        self
    }
}
