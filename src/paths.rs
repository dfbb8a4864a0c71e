/// Default locations for the index, model cache and config file
///
/// Uses the XDG base directories, falling back to `$HOME` and then the working directory.
use std::path::PathBuf;

const APP_DIR: &str = "doc-intel";

pub struct PlatformPaths;

impl PlatformPaths {
    /// `$XDG_DATA_HOME` or `~/.local/share`
    pub fn data_dir() -> PathBuf {
        base_dir("XDG_DATA_HOME", ".local/share")
    }

    /// `$XDG_CACHE_HOME` or `~/.cache`
    pub fn cache_dir() -> PathBuf {
        base_dir("XDG_CACHE_HOME", ".cache")
    }

    /// `$XDG_CONFIG_HOME` or `~/.config`
    pub fn config_dir() -> PathBuf {
        base_dir("XDG_CONFIG_HOME", ".config")
    }

    /// Returns: {data_dir}/doc-intel/lancedb
    pub fn default_persist_dir() -> PathBuf {
        Self::data_dir().join(APP_DIR).join("lancedb")
    }

    /// Where fastembed keeps downloaded models unless a model path is given
    ///
    /// Returns: {cache_dir}/doc-intel/models
    pub fn default_model_cache_dir() -> PathBuf {
        Self::cache_dir().join(APP_DIR).join("models")
    }

    /// Returns: {config_dir}/doc-intel/config.toml
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join(APP_DIR).join("config.toml")
    }
}

fn base_dir(xdg_var: &str, home_suffix: &str) -> PathBuf {
    std::env::var_os(xdg_var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(home_suffix)))
        .unwrap_or_else(|| PathBuf::from("."))
}
