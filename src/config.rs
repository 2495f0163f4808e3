//! Process-wide configuration, fixed at startup. Values come from built-in
//! defaults, an optional `altgen.toml` file, and `ALTGEN_*` environment
//! variables, in increasing order of precedence.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Base URL of the Ollama instance
    pub ollama_url: String,
    /// Vision-capable model identifier
    pub model: String,
    /// Sampling temperature for generation
    pub temperature: f32,
    /// Per-file upload limit, in bytes
    pub max_file_size: usize,
    /// Maximum number of images per batch
    pub max_files: usize,
    /// Bound on each inference call
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("port", 3000)?
            .set_default("ollama_url", "http://localhost:11434")?
            .set_default("model", "llava:latest")?
            .set_default("temperature", 0.3)?
            .set_default("max_file_size", 10 * 1024 * 1024)?
            .set_default("max_files", 10)?
            .set_default("request_timeout_secs", 120)?
            .add_source(File::with_name("altgen").required(false))
            .add_source(Environment::with_prefix("ALTGEN"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.ollama_url, "http://localhost:11434");
        assert_eq!(settings.model, "llava:latest");
        assert_eq!(settings.max_file_size, 10 * 1024 * 1024);
        assert_eq!(settings.max_files, 10);
    }
}
