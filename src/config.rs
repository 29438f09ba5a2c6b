//! Runtime configuration from environment variables.
//!
//! - FOOD_STACK_DATA_DIR: catalog JSON directory (default: data)
//! - FOOD_STACK_STATE_DIR: where the stack slot is persisted (default: .food_stack)
//! - FOOD_STACK_EXPORT_DIR: where exports are written (default: .)

use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_STATE_DIR: &str = ".food_stack";
pub const DEFAULT_EXPORT_DIR: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; empty values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            data_dir: read("FOOD_STACK_DATA_DIR", DEFAULT_DATA_DIR),
            state_dir: read("FOOD_STACK_STATE_DIR", DEFAULT_STATE_DIR),
            export_dir: read("FOOD_STACK_EXPORT_DIR", DEFAULT_EXPORT_DIR),
        }
    }

    pub fn log(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  FOOD_STACK_DATA_DIR: {:?}", self.data_dir);
        tracing::info!("  FOOD_STACK_STATE_DIR: {:?}", self.state_dir);
        tracing::info!("  FOOD_STACK_EXPORT_DIR: {:?}", self.export_dir);
    }
}
