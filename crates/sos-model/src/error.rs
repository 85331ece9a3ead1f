use thiserror::Error;

/// A single field-level validation failure.
///
/// Non-fatal: issues block only the action that produced them (confirming a
/// line item or submitting the order) and are cleared by correcting the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldIssue {
    /// Form field the issue refers to (e.g. `customer_name`, `unit_price`).
    pub field: String,
    /// Human-readable message suitable for direct display.
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Join issue messages for compact single-line display.
pub fn summarize_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
