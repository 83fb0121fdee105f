//! Error types for the shift earnings engine.
//!
//! The computation functions never fail (unparseable date-times resolve to a
//! neutral zero). Everything around them, such as the catalog, the ledger and
//! persistence, reports failures through [`EngineError`].

use thiserror::Error;

/// The main error type for the shift earnings engine.
///
/// # Example
///
/// ```
/// use shiftcash_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/shift_types.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/shift_types.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A shift referenced a shift type that is not in the catalog.
    #[error("Shift type not found: {id}")]
    ShiftTypeNotFound {
        /// The shift type identifier that was not found.
        id: String,
    },

    /// No shift with the given identifier exists in the ledger.
    #[error("Shift not found: {id}")]
    ShiftNotFound {
        /// The shift identifier that was not found.
        id: String,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift (empty for unsaved drafts).
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// Attempted to delete one of the system-managed variables.
    #[error("Variable '{id}' is system-managed and cannot be removed")]
    CoreVariableProtected {
        /// The core variable identifier.
        id: String,
    },

    /// The state file could not be read or written.
    #[error("State file I/O error at '{path}': {source}")]
    StateIo {
        /// The state file path.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The state file exists but does not contain a valid application state.
    #[error("Failed to parse state file '{path}': {message}")]
    StateParseError {
        /// The state file path.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An imported backup is missing required sections.
    #[error("Invalid import: {message}")]
    InvalidImport {
        /// A description of what is missing.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
