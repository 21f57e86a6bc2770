//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// ecsprobe -- verify that a provisioned ECS stack exists as recorded.
///
/// Use `ecsprobe <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "ecsprobe", version, about, long_about = None)]
pub struct Cli {
    /// Path to the ecsprobe.toml configuration file.
    #[arg(short, long, default_value = "ecsprobe.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify the provisioned resources exist.
    Verify(VerifyArgs),

    /// List the known checks.
    Checks,

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- verify ----

/// Run existence checks against the live account.
#[derive(Args, Debug, Default)]
pub struct VerifyArgs {
    /// Read provisioning outputs from this JSON file.
    #[arg(long, value_name = "FILE", conflicts_with = "terraform_dir")]
    pub outputs: Option<PathBuf>,

    /// Read provisioning outputs with `terraform output -json` in this directory.
    #[arg(long, value_name = "DIR")]
    pub terraform_dir: Option<PathBuf>,

    /// Enable a feature flag (repeatable), e.g. with_service_discovery.
    #[arg(long = "enable", value_name = "FEATURE")]
    pub features: Vec<String>,

    /// Run only this check (repeatable).
    #[arg(long = "check", value_name = "NAME", conflicts_with = "minimal")]
    pub checks: Vec<String>,

    /// Run only the cluster, service and task definition checks.
    #[arg(long)]
    pub minimal: bool,

    /// AWS region override.
    #[arg(long)]
    pub region: Option<String>,

    /// Named AWS profile.
    #[arg(long)]
    pub profile: Option<String>,

    /// Send all API calls to this endpoint (LocalStack and similar).
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Fail checks still pending after this many seconds (0 disables).
    #[arg(long, value_name = "N")]
    pub deadline_secs: Option<u64>,
}

// ---- config ----

/// Manage ecsprobe configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, aws, outputs, verify).
        #[arg(long)]
        section: Option<String>,
    },
}
