use thiserror::Error;

use sos_model::{FieldIssue, ItemId, summarize_issues};

/// Structural ledger failures. All leave the ledger unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The addressed row does not exist. The original form silently ignored
    /// edits to unknown rows; here the caller gets told.
    #[error("no line item with id {0}")]
    UnknownItem(ItemId),

    /// Removing the sole remaining row is not allowed.
    #[error("a service order keeps at least one line item")]
    MinimumRows,

    /// Export requires at least one confirmed row.
    #[error("confirm at least one line item before exporting")]
    NothingConfirmed,
}

/// Failure to confirm a row: either it does not exist or one or more of its
/// fields fail validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfirmError {
    #[error("no line item with id {0}")]
    UnknownItem(ItemId),

    #[error("line item cannot be confirmed: {}", summarize_issues(issues))]
    Invalid { issues: Vec<FieldIssue> },
}
