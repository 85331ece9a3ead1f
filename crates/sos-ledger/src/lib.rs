//! Line-item ledger for service orders.
//!
//! Owns the ordered row collection, derives per-row and grand totals, and
//! enforces the structural guards: at least one row is always present, totals
//! are never set directly, and only confirmed rows reach the export snapshot.

pub mod error;
pub mod ledger;

pub use error::{ConfirmError, LedgerError};
pub use ledger::{ItemEdit, Ledger};
