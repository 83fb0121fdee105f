//! Shift type model and category normalisation.
//!
//! Shift types are user-configurable, but a handful of reserved names change
//! how a shift is computed. Those names are resolved once into a
//! [`ShiftCategory`] so the calculation code can match on variants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reserved name for a day off.
pub const LIBRE: &str = "LIBRE";
/// Reserved name for a vacation day.
pub const VACACIONES: &str = "VACACIONES";
/// Reserved name for an outbound travel leg.
pub const IDA: &str = "IDA";
/// Reserved name for a return travel leg.
pub const VUELTA: &str = "VUELTA";
/// Reserved name for a same-day outbound and return trip.
pub const IDA_VUELTA: &str = "IDA/VUELTA";

/// The computation category of a shift type.
///
/// # Example
///
/// ```
/// use shiftcash_engine::models::ShiftCategory;
///
/// assert_eq!(ShiftCategory::from_name("libre"), ShiftCategory::Libre);
/// assert_eq!(ShiftCategory::from_name("Ida/Vuelta"), ShiftCategory::IdaVuelta);
/// assert_eq!(ShiftCategory::from_name("Mañana"), ShiftCategory::Regular);
/// assert!(ShiftCategory::Vacaciones.is_special());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftCategory {
    /// Any shift type without a reserved name.
    Regular,
    /// Day off. Earns nothing and carries no variables.
    Libre,
    /// Vacation day. Carries no variables and previews zero earnings.
    Vacaciones,
    /// Outbound travel leg.
    Ida,
    /// Return travel leg.
    Vuelta,
    /// Outbound and return on the same shift.
    IdaVuelta,
}

impl ShiftCategory {
    /// Resolves a shift type display name into its category.
    ///
    /// Matching is case-insensitive; names that are not reserved map to
    /// [`ShiftCategory::Regular`].
    pub fn from_name(name: &str) -> Self {
        match name.to_uppercase().as_str() {
            LIBRE => ShiftCategory::Libre,
            VACACIONES => ShiftCategory::Vacaciones,
            IDA => ShiftCategory::Ida,
            VUELTA => ShiftCategory::Vuelta,
            IDA_VUELTA => ShiftCategory::IdaVuelta,
            _ => ShiftCategory::Regular,
        }
    }

    /// Returns true for categories that suppress variables and zero earnings.
    pub fn is_special(self) -> bool {
        matches!(self, ShiftCategory::Libre | ShiftCategory::Vacaciones)
    }
}

impl std::fmt::Display for ShiftCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftCategory::Regular => write!(f, "Regular"),
            ShiftCategory::Libre => write!(f, "{}", LIBRE),
            ShiftCategory::Vacaciones => write!(f, "{}", VACACIONES),
            ShiftCategory::Ida => write!(f, "{}", IDA),
            ShiftCategory::Vuelta => write!(f, "{}", VUELTA),
            ShiftCategory::IdaVuelta => write!(f, "{}", IDA_VUELTA),
        }
    }
}

/// A category of work with its flat daily rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftType {
    /// Unique identifier for the shift type.
    pub id: String,
    /// Display name. Reserved names select a special [`ShiftCategory`].
    pub name: String,
    /// Flat amount earned for a non-Sunday shift of this type.
    #[serde(default, with = "crate::models::serde_helpers::decimal_number")]
    pub daily_rate: Decimal,
    /// Display color, passed through untouched.
    #[serde(default)]
    pub color: String,
}

impl ShiftType {
    /// Returns the computation category for this shift type.
    pub fn category(&self) -> ShiftCategory {
        ShiftCategory::from_name(&self.name)
    }
}
