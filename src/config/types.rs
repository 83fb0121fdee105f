//! Catalog types.
//!
//! The catalog is the user's configuration: which shift types exist and which
//! variables can be applied. It is deserialized from YAML configuration files
//! and persisted inside the application state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::DEFAULT_SUNDAY_RATE;
use crate::error::{EngineError, EngineResult};
use crate::models::{ShiftType, ShiftVariable, V_SUN, is_core_variable};

/// `shift_types.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftTypesConfig {
    /// Shift types in display order.
    pub shift_types: Vec<ShiftType>,
}

/// `variables.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct VariablesConfig {
    /// Variables in display order.
    pub variables: Vec<ShiftVariable>,
}

/// The configured shift types and variables.
///
/// Lookups are by identifier. Order is preserved because it is the display
/// and report order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Configured shift types.
    shift_types: Vec<ShiftType>,
    /// Configured variables.
    variables: Vec<ShiftVariable>,
}

impl Catalog {
    /// Creates a catalog from its component parts.
    pub fn new(shift_types: Vec<ShiftType>, variables: Vec<ShiftVariable>) -> Self {
        Self {
            shift_types,
            variables,
        }
    }

    /// Returns all shift types.
    pub fn shift_types(&self) -> &[ShiftType] {
        &self.shift_types
    }

    /// Returns all variables.
    pub fn variables(&self) -> &[ShiftVariable] {
        &self.variables
    }

    /// Finds a shift type by id.
    pub fn find_shift_type(&self, id: &str) -> Option<&ShiftType> {
        self.shift_types.iter().find(|t| t.id == id)
    }

    /// Gets a shift type by id, or `ShiftTypeNotFound`.
    pub fn shift_type(&self, id: &str) -> EngineResult<&ShiftType> {
        self.find_shift_type(id)
            .ok_or_else(|| EngineError::ShiftTypeNotFound { id: id.to_string() })
    }

    /// Finds a variable by id.
    pub fn variable(&self, id: &str) -> Option<&ShiftVariable> {
        self.variables.iter().find(|v| v.id == id)
    }

    /// Resolves variable ids into definitions, one entry per occurrence.
    ///
    /// Ids without a definition are dropped.
    pub fn applied_variables<'a>(&'a self, ids: &[String]) -> Vec<&'a ShiftVariable> {
        ids.iter().filter_map(|id| self.variable(id)).collect()
    }

    /// The Sunday base rate: the `v_sun` amount, or [`DEFAULT_SUNDAY_RATE`].
    pub fn sunday_rate(&self) -> Decimal {
        self.variable(V_SUN)
            .map(|v| v.amount)
            .unwrap_or(DEFAULT_SUNDAY_RATE)
    }

    /// Inserts a shift type, replacing any existing one with the same id.
    pub fn upsert_shift_type(&mut self, shift_type: ShiftType) {
        match self.shift_types.iter_mut().find(|t| t.id == shift_type.id) {
            Some(existing) => *existing = shift_type,
            None => self.shift_types.push(shift_type),
        }
    }

    /// Removes a shift type. Returns `ShiftTypeNotFound` if it does not exist.
    ///
    /// Shifts that reference the removed type keep their id; they simply stop
    /// resolving.
    pub fn remove_shift_type(&mut self, id: &str) -> EngineResult<ShiftType> {
        let index = self
            .shift_types
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| EngineError::ShiftTypeNotFound { id: id.to_string() })?;
        debug!(shift_type_id = %id, "Removing shift type");
        Ok(self.shift_types.remove(index))
    }

    /// Inserts a variable, replacing any existing one with the same id.
    pub fn upsert_variable(&mut self, variable: ShiftVariable) {
        match self.variables.iter_mut().find(|v| v.id == variable.id) {
            Some(existing) => *existing = variable,
            None => self.variables.push(variable),
        }
    }

    /// Removes a variable.
    ///
    /// Core variables are refused with `CoreVariableProtected`. Returns the
    /// removed definition, or `None` if the id was unknown.
    pub fn remove_variable(&mut self, id: &str) -> EngineResult<Option<ShiftVariable>> {
        if is_core_variable(id) {
            return Err(EngineError::CoreVariableProtected { id: id.to_string() });
        }
        let removed = self
            .variables
            .iter()
            .position(|v| v.id == id)
            .map(|index| self.variables.remove(index));
        debug!(variable_id = %id, removed = removed.is_some(), "Removing variable");
        Ok(removed)
    }
}
