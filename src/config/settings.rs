//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variables consulted for the Gemini API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Settings for the hosted proofreading model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the Gemini REST API.
    ///
    /// Default: `https://generativelanguage.googleapis.com`
    pub base_url: String,
    /// API key stored in the settings file.  Environment variables
    /// (see [`API_KEY_ENV_VARS`]) take precedence over this value.
    pub api_key: Option<String>,
    /// Model identifier (e.g. `"gemini-2.5-flash"`).
    pub model: String,
    /// Optional sampling temperature.  `None` leaves the model default.
    pub temperature: Option<f32>,
    /// Maximum seconds to wait for the model before timing out.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".into(),
            api_key: None,
            model: "gemini-2.5-flash".into(),
            temperature: None,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key from the process environment, falling back to the
    /// value in the settings file.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key using `lookup` in place of `std::env::var`.
    ///
    /// Blank values are skipped at every level.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .chain(self.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial inner window size `(width, height)` in points.
    pub window_size: (f32, f32),
    /// Body text size in points for the editor and result panes.
    pub font_size: f32,
    /// Font file with Thai glyphs.  `None` probes common system locations.
    ///
    /// Must be a `.ttf`, `.otf` or `.ttc` file; any other path is ignored
    /// with a warning, since egui aborts on font data it cannot parse.
    pub thai_font_path: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_size: (1100.0, 720.0),
            font_size: 17.0,
            thai_font_path: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use thai_proofreader::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// println!("model = {}", config.llm.model);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Hosted model settings.
    pub llm: LlmConfig,
    /// Window settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.llm.base_url, loaded.llm.base_url);
        assert_eq!(original.llm.api_key, loaded.llm.api_key);
        assert_eq!(original.llm.model, loaded.llm.model);
        assert_eq!(original.llm.timeout_secs, loaded.llm.timeout_secs);
        assert_eq!(original.llm.temperature, loaded.llm.temperature);
        assert_eq!(original.ui.window_size, loaded.ui.window_size);
        assert_eq!(original.ui.font_size, loaded.ui.font_size);
        assert_eq!(original.ui.thai_font_path, loaded.ui.thai_font_path);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert_eq!(config.llm.timeout_secs, 60);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.llm.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(cfg.llm.model, "gemini-2.5-flash");
        assert!(cfg.llm.api_key.is_none());
        assert!(cfg.llm.temperature.is_none());
        assert!(cfg.ui.thai_font_path.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[llm]\nmodel = \"gemini-2.5-pro\"\n").expect("write");

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.llm.model, "gemini-2.5-pro");
        assert_eq!(cfg.llm.timeout_secs, 60);
        assert_eq!(cfg.ui.font_size, 17.0);
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.llm.api_key = Some("test-key".into());
        cfg.llm.temperature = Some(0.2);
        cfg.llm.timeout_secs = 30;
        cfg.ui.thai_font_path = Some(PathBuf::from("/tmp/Sarabun.ttf"));

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.llm.api_key.as_deref(), Some("test-key"));
        assert_eq!(loaded.llm.temperature, Some(0.2));
        assert_eq!(loaded.llm.timeout_secs, 30);
        assert_eq!(
            loaded.ui.thai_font_path,
            Some(PathBuf::from("/tmp/Sarabun.ttf"))
        );
    }

    // ---- API key resolution ---

    #[test]
    fn env_key_wins_over_file() {
        let mut cfg = LlmConfig::default();
        cfg.api_key = Some("from-file".into());
        let key = cfg.resolve_api_key_with(|name| {
            (name == "API_KEY").then(|| "from-env".to_string())
        });
        assert_eq!(key.as_deref(), Some("from-env"));
    }

    #[test]
    fn gemini_env_var_is_second_choice() {
        let cfg = LlmConfig::default();
        let key = cfg.resolve_api_key_with(|name| {
            (name == "GEMINI_API_KEY").then(|| "gemini".to_string())
        });
        assert_eq!(key.as_deref(), Some("gemini"));
    }

    #[test]
    fn blank_env_falls_back_to_file() {
        let mut cfg = LlmConfig::default();
        cfg.api_key = Some("from-file".into());
        let key = cfg.resolve_api_key_with(|_| Some("   ".to_string()));
        assert_eq!(key.as_deref(), Some("from-file"));
    }

    #[test]
    fn no_key_anywhere_is_none() {
        let mut cfg = LlmConfig::default();
        cfg.api_key = Some(String::new());
        assert!(cfg.resolve_api_key_with(|_| None).is_none());
    }
}
