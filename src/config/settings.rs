//! Server settings read from the environment.

use std::path::PathBuf;

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
/// Default state file.
pub const DEFAULT_STATE_PATH: &str = "shiftcash_state.json";
/// Default catalog directory.
pub const DEFAULT_CATALOG_DIR: &str = "config/default";

/// Settings for the HTTP server binary.
///
/// | Variable            | Default                |
/// |---------------------|------------------------|
/// | `SHIFTCASH_ADDR`    | `127.0.0.1:3000`       |
/// | `SHIFTCASH_STATE`   | `shiftcash_state.json` |
/// | `SHIFTCASH_CATALOG` | `config/default`       |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address the server listens on.
    pub addr: String,
    /// Path of the persisted state file.
    pub state_path: PathBuf,
    /// Directory holding `shift_types.yaml` and `variables.yaml`.
    pub catalog_dir: PathBuf,
}

impl ServerSettings {
    /// Loads settings from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            addr: var("SHIFTCASH_ADDR").unwrap_or_else(|| DEFAULT_ADDR.into()),
            state_path: var("SHIFTCASH_STATE")
                .unwrap_or_else(|| DEFAULT_STATE_PATH.into())
                .into(),
            catalog_dir: var("SHIFTCASH_CATALOG")
                .unwrap_or_else(|| DEFAULT_CATALOG_DIR.into())
                .into(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ServerSettings::default();
        assert_eq!(settings.addr, "127.0.0.1:3000");
        assert_eq!(settings.state_path, PathBuf::from("shiftcash_state.json"));
        assert_eq!(settings.catalog_dir, PathBuf::from("config/default"));
    }

    #[test]
    fn test_overrides_and_empty_values() {
        let settings = ServerSettings::from_lookup(|key| match key {
            "SHIFTCASH_ADDR" => Some("0.0.0.0:8080".to_string()),
            "SHIFTCASH_STATE" => Some("/tmp/state.json".to_string()),
            "SHIFTCASH_CATALOG" => Some(String::new()),
            _ => None,
        });
        assert_eq!(settings.addr, "0.0.0.0:8080");
        assert_eq!(settings.state_path, PathBuf::from("/tmp/state.json"));
        assert_eq!(settings.catalog_dir, PathBuf::from("config/default"));
    }
}
