//! CLI argument definitions for the service-order tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "service-order",
    version,
    about = "Service Order Studio - validate order files and export documents",
    long_about = "Validate service-order files and export them as formatted\n\
                  .docx documents: customer and vehicle data, confirmed\n\
                  parts/services line items, and the grand total."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Export an order file as a .docx document.
    Export(ExportArgs),

    /// Validate an order file without exporting.
    Check(CheckArgs),

    /// Resolve a postal code (CEP) to an address.
    LookupCep(LookupCepArgs),
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Path to the order file (JSON).
    #[arg(value_name = "ORDER_FILE")]
    pub order_file: PathBuf,

    /// Output directory for the document (default: the order file's folder).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Validate and compose without writing the document.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip the postal-code address lookup even when the CEP is complete.
    #[arg(long = "no-cep-lookup")]
    pub no_cep_lookup: bool,

    /// Shop name printed in the document banner.
    #[arg(long = "shop-name", value_name = "NAME")]
    pub shop_name: Option<String>,

    /// Contact line printed in the document banner.
    #[arg(long = "shop-contact", value_name = "TEXT")]
    pub shop_contact: Option<String>,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the order file (JSON).
    #[arg(value_name = "ORDER_FILE")]
    pub order_file: PathBuf,
}

#[derive(Parser)]
pub struct LookupCepArgs {
    /// Eight-digit postal code.
    #[arg(value_name = "CEP")]
    pub code: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
