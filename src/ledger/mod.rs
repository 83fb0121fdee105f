//! The saved shifts and their persistence.
//!
//! [`Ledger`] owns the application state (shifts, catalog and presentation
//! preferences) and applies every edit through the preview pipeline so the
//! cached values on each shift stay consistent. [`StateStore`] writes that
//! state to a JSON file and reads it back.

mod state;
mod store;

pub use state::Ledger;
pub use store::{BACKUP_FILE_PREFIX, StateStore};
