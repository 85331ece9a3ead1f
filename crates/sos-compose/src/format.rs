//! Display formatting for the pt-BR locale used by the exported document.

use sos_model::parse_header_date;

/// Placeholder printed for absent or unparsable values.
pub const PLACEHOLDER: &str = "-";

/// Format a header date for display as `dd/mm/yyyy`, falling back to the
/// placeholder when the field is empty or does not parse.
pub fn format_date(raw: &str) -> String {
    match parse_header_date(raw) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a monetary amount as Brazilian currency with two decimals.
/// Amounts arrive already rounded to cents, so `{:.2}` only fixes the width.
pub fn format_currency(amount: f64) -> String {
    format!("R$ {amount:.2}")
}

/// Format a quantity: whole values print without a decimal point, fractional
/// values keep their natural representation.
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{quantity:.0}")
    } else {
        format!("{quantity}")
    }
}

/// Format an optional mileage reading, placeholder when absent.
pub fn format_mileage(mileage_km: Option<f64>) -> String {
    match mileage_km {
        Some(km) => format_quantity(km),
        None => PLACEHOLDER.to_string(),
    }
}

/// A display value with the empty-field fallback applied.
pub fn or_placeholder(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() { PLACEHOLDER } else { trimmed }
}

/// Deterministic export file stem derived from the customer name:
/// lower-cased, whitespace runs collapsed to a single `-`.
pub fn export_file_stem(customer_name: &str) -> String {
    let slug = customer_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("ordem-servico-{slug}")
}
