//! Configuration module for Thai Proofreader.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the model and
//! the window, `AppPaths` for cross-platform config directories, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, LlmConfig, UiConfig, API_KEY_ENV_VARS};
