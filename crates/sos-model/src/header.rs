use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FieldIssue;

/// Which tax identifier the customer supplied: CPF (individual) or CNPJ
/// (company). Selects the label printed in the exported document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxIdKind {
    #[default]
    Cpf,
    Cnpj,
}

impl TaxIdKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaxIdKind::Cpf => "CPF",
            TaxIdKind::Cnpj => "CNPJ",
        }
    }
}

/// Which identity document the customer supplied: RG or state registration
/// (Inscrição Estadual). Selects the label printed in the exported document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdDocumentKind {
    #[default]
    Rg,
    StateRegistration,
}

impl IdDocumentKind {
    pub fn label(&self) -> &'static str {
        match self {
            IdDocumentKind::Rg => "RG",
            IdDocumentKind::StateRegistration => "Inscrição Estadual",
        }
    }
}

/// Header fields of a service order: service dates, customer identity,
/// address, and vehicle identity.
///
/// A flat record with no derived state. Text fields default to empty, which
/// the composer renders as a `-` placeholder. Dates are ISO-8601
/// (`YYYY-MM-DD`) strings and must parse when non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderHeader {
    pub entry_date: String,
    pub exit_date: String,
    pub customer_name: String,
    pub phone: String,
    pub tax_id: String,
    pub tax_id_kind: TaxIdKind,
    pub id_document: String,
    pub id_document_kind: IdDocumentKind,
    pub postal_code: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub make: String,
    pub model: String,
    pub model_year: String,
    pub engine: String,
    pub plate: String,
    /// Odometer reading in kilometers. Accepts a JSON number or a numeric
    /// string, matching the form's loose coercion.
    #[serde(deserialize_with = "coerce_opt_f64")]
    pub mileage_km: Option<f64>,
}

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 100;

/// Validate the header schema, returning every failing field in declaration
/// order. The submission surface reports the first issue; the rest are
/// available for diagnostics.
pub fn validate_header(header: &OrderHeader) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    if let Some(issue) = date_issue("entry_date", &header.entry_date) {
        issues.push(issue);
    }
    if let Some(issue) = date_issue("exit_date", &header.exit_date) {
        issues.push(issue);
    }
    let name_len = header.customer_name.trim().chars().count();
    if name_len < NAME_MIN {
        issues.push(FieldIssue::new(
            "customer_name",
            format!("customer name must have at least {NAME_MIN} characters"),
        ));
    } else if name_len > NAME_MAX {
        issues.push(FieldIssue::new(
            "customer_name",
            format!("customer name may have at most {NAME_MAX} characters"),
        ));
    }
    if let Some(km) = header.mileage_km
        && !km.is_finite()
    {
        issues.push(FieldIssue::new("mileage_km", "mileage must be a number"));
    }
    issues
}

/// Parse an ISO-8601 header date, treating the empty string as absent.
pub fn parse_header_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

fn date_issue(field: &str, raw: &str) -> Option<FieldIssue> {
    if raw.trim().is_empty() || parse_header_date(raw).is_some() {
        None
    } else {
        Some(FieldIssue::new(field, format!("invalid date: {raw:?}")))
    }
}

/// Deserialize an optional numeric field from a number, a numeric string, or
/// null/absent. Empty strings count as absent.
fn coerce_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid number: {text:?}")))
        }
    }
}
