use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use sos_compose::Letterhead;
use sos_lookup::{CepClient, apply_address, is_lookup_ready};
use sos_model::{OrderHeader, validate_header};
use sos_output::write_docx;

use sos_cli::order_file::load_order;
use sos_cli::pipeline::{PreparedExport, build_ledger, prepare_export};

use crate::cli::{CheckArgs, ExportArgs, LookupCepArgs};

/// Result of a successful export run.
pub struct ExportOutcome {
    pub prepared: PreparedExport,
    /// None on --dry-run.
    pub output_path: Option<PathBuf>,
}

/// Result of a check run: issues, plus what the export would contain.
pub struct CheckReport {
    pub issues: Vec<String>,
    pub confirmed_items: usize,
    pub grand_total: f64,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn run_export(args: &ExportArgs) -> Result<ExportOutcome> {
    let mut order = load_order(&args.order_file)?;
    if !args.no_cep_lookup {
        resolve_address(&mut order.header);
    }
    let letterhead = letterhead_from_args(args);
    let prepared = prepare_export(order, &letterhead)?;

    let output_path = if args.dry_run {
        info!(file = %prepared.file_name, "dry run, skipping document write");
        None
    } else {
        let output_dir = args.output_dir.clone().unwrap_or_else(|| {
            args.order_file
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
        });
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("create output directory {}", output_dir.display()))?;
        let path = output_dir.join(&prepared.file_name);
        write_docx(&path, &prepared.blocks)?;
        info!(path = %path.display(), "document written");
        Some(path)
    };
    Ok(ExportOutcome {
        prepared,
        output_path,
    })
}

pub fn run_check(args: &CheckArgs) -> Result<CheckReport> {
    let order = load_order(&args.order_file)?;
    let mut issues: Vec<String> = validate_header(&order.header)
        .iter()
        .map(|issue| issue.to_string())
        .collect();

    let mut confirmed_items = 0;
    let mut grand_total = 0.0;
    match build_ledger(&order.items) {
        Ok(ledger) => {
            confirmed_items = ledger
                .items()
                .iter()
                .filter(|item| item.confirmed)
                .count();
            grand_total = ledger.grand_total();
            if confirmed_items == 0 {
                issues.push("confirm at least one line item before exporting".to_string());
            }
        }
        Err(error) => issues.push(error.to_string()),
    }
    Ok(CheckReport {
        issues,
        confirmed_items,
        grand_total,
    })
}

pub fn run_lookup_cep(args: &LookupCepArgs) -> Result<()> {
    let client = CepClient::new()?;
    let address = client.lookup(&args.code)?;
    println!("Endereço: {}", address.street);
    println!("Bairro: {}", address.neighborhood);
    println!("Cidade/UF: {} - {}", address.city, address.state_code);
    Ok(())
}

/// Fill empty address fields from the CEP when the code is complete.
///
/// Failures are logged and swallowed: the order keeps whatever address was
/// typed, matching the form's fire-and-forget lookup.
fn resolve_address(header: &mut OrderHeader) {
    if !is_lookup_ready(&header.postal_code) {
        return;
    }
    if !header.street.trim().is_empty() {
        return;
    }
    let code = header.postal_code.clone();
    let result = CepClient::new().and_then(|client| client.lookup(&code));
    match result {
        Ok(address) => {
            apply_address(header, &code, &address);
            info!(%code, city = %header.city, "address resolved from cep");
        }
        Err(error) => {
            warn!(%code, %error, "cep lookup failed, keeping address fields");
        }
    }
}

fn letterhead_from_args(args: &ExportArgs) -> Letterhead {
    let mut letterhead = Letterhead::default();
    if let Some(name) = &args.shop_name {
        letterhead.shop_name = name.clone();
    }
    if let Some(contact) = &args.shop_contact {
        letterhead.contact_line = contact.clone();
    }
    letterhead
}
