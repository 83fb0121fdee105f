//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the shift type
//! and variable catalog from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{Catalog, ShiftTypesConfig, VariablesConfig};

const BUILTIN_SHIFT_TYPES: &str = include_str!("../../config/default/shift_types.yaml");
const BUILTIN_VARIABLES: &str = include_str!("../../config/default/variables.yaml");

/// Loads and provides access to the catalog configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── shift_types.yaml   # Shift types and daily rates
/// └── variables.yaml     # Bonus and allowance variables
/// ```
///
/// # Example
///
/// ```no_run
/// use shiftcash_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("{} shift types", loader.catalog().shift_types().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    catalog: Catalog,
}

impl ConfigLoader {
    /// Loads the catalog from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if either file is
    /// missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let shift_types_path = path.join("shift_types.yaml");
        let shift_types = Self::load_yaml::<ShiftTypesConfig>(&shift_types_path)?;

        let variables_path = path.join("variables.yaml");
        let variables = Self::load_yaml::<VariablesConfig>(&variables_path)?;

        let catalog = Catalog::new(shift_types.shift_types, variables.variables);
        info!(
            path = %path.display(),
            shift_types = catalog.shift_types().len(),
            variables = catalog.variables().len(),
            "Loaded catalog configuration"
        );

        Ok(Self { catalog })
    }

    /// Builds a loader from the catalog compiled into the crate.
    ///
    /// This is the same content as `config/default/`.
    pub fn builtin() -> EngineResult<Self> {
        let shift_types = Self::parse_yaml::<ShiftTypesConfig>(
            BUILTIN_SHIFT_TYPES,
            "<builtin>/shift_types.yaml",
        )?;
        let variables =
            Self::parse_yaml::<VariablesConfig>(BUILTIN_VARIABLES, "<builtin>/variables.yaml")?;

        Ok(Self {
            catalog: Catalog::new(shift_types.shift_types, variables.variables),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&content, &path_str)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, path: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Consumes the loader, returning the catalog.
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }
}
