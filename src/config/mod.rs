//! Catalog configuration for the shift earnings engine.
//!
//! This module loads the shift types and variables a user starts with from
//! YAML files, and provides the [`Catalog`] that the calculations read
//! rates and amounts from. Server settings come from the environment.
//!
//! # Example
//!
//! ```no_run
//! use shiftcash_engine::config::ConfigLoader;
//!
//! let catalog = ConfigLoader::load("./config/default").unwrap().into_catalog();
//! println!("Sunday rate: {}", catalog.sunday_rate());
//! ```

mod loader;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use settings::ServerSettings;
pub use types::{Catalog, ShiftTypesConfig, VariablesConfig};
