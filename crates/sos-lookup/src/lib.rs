//! Postal-code (CEP) address lookup.
//!
//! Wraps the ViaCEP HTTP API behind a blocking client. Lookup failures are
//! never fatal to the form session: callers log them and leave address
//! fields untouched. Each response is applied through [`apply_address`],
//! which discards it when the header's postal code has changed since the
//! lookup was triggered, so a slow response can no longer clobber newer
//! input.

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

use sos_model::OrderHeader;

/// A Brazilian CEP has exactly eight digits.
pub const CEP_LENGTH: usize = 8;

const DEFAULT_BASE_URL: &str = "https://viacep.com.br";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// True when the field content is a complete CEP and a lookup should fire.
pub fn is_lookup_ready(code: &str) -> bool {
    code.len() == CEP_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// Address record returned by the lookup service.
///
/// ViaCEP marks unknown codes with an `erro` member that has appeared both
/// as a bool and as the string `"true"`; both forms map to `not_found`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CepAddress {
    #[serde(default, rename = "logradouro")]
    pub street: String,
    #[serde(default, rename = "bairro")]
    pub neighborhood: String,
    #[serde(default, rename = "localidade")]
    pub city: String,
    #[serde(default, rename = "uf")]
    pub state_code: String,
    #[serde(default, rename = "erro", deserialize_with = "flag_from_bool_or_string")]
    pub not_found: bool,
}

/// Lookup failures. All are recoverable; the caller keeps existing field
/// values and may retry.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("postal code must be exactly {CEP_LENGTH} digits, got {0:?}")]
    InvalidCode(String),

    #[error("lookup request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("postal code {0} not found")]
    NotFound(String),
}

/// Blocking ViaCEP client.
pub struct CepClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl CepClient {
    pub fn new() -> Result<Self, LookupError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (used by tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve an eight-digit CEP to an address record.
    pub fn lookup(&self, code: &str) -> Result<CepAddress, LookupError> {
        if !is_lookup_ready(code) {
            return Err(LookupError::InvalidCode(code.to_string()));
        }
        let url = format!("{}/ws/{}/json", self.base_url, code);
        debug!(%code, "cep lookup");
        let address: CepAddress = self
            .http
            .get(&url)
            .send()?
            .error_for_status()?
            .json()?;
        if address.not_found {
            return Err(LookupError::NotFound(code.to_string()));
        }
        Ok(address)
    }
}

/// Copy a lookup result into the header's address fields.
///
/// `requested_code` is the CEP that triggered the lookup. When the header's
/// postal code no longer matches, the response is stale and is dropped;
/// returns whether the fields were applied.
pub fn apply_address(
    header: &mut OrderHeader,
    requested_code: &str,
    address: &CepAddress,
) -> bool {
    if header.postal_code != requested_code {
        debug!(
            requested = %requested_code,
            current = %header.postal_code,
            "discarding stale cep response"
        );
        return false;
    }
    header.street = address.street.clone();
    header.neighborhood = address.neighborhood.clone();
    header.city = address.city.clone();
    header.state = address.state_code.clone();
    true
}

fn flag_from_bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(text) => text.eq_ignore_ascii_case("true"),
    })
}
