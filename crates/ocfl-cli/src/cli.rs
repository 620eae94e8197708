use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ocfl_validate::ValidateConfig;

#[derive(Parser)]
#[command(
    name = "ocfl",
    about = "Validate OCFL object inventories and their version history",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with validation settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Preferred language for diagnostic messages
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Include warnings in the report
    #[arg(long, global = true)]
    pub show_warnings: bool,

    /// Accept any digest algorithm and digest format
    #[arg(long, global = true)]
    pub lax_digests: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate inventories, oldest first, checking each against the one before
    Validate(ValidateArgs),
    /// Validate one inventory and list its versions and logical files
    Show(ShowArgs),
}

#[derive(Args)]
pub struct ValidateArgs {
    #[arg(required = true)]
    pub inventories: Vec<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub inventory: PathBuf,
}

impl Cli {
    /// Settings from `--config` (or defaults), overridden by flags.
    pub fn validate_config(&self) -> ocfl_validate::Result<ValidateConfig> {
        let mut config = match &self.config {
            Some(path) => ValidateConfig::load(path)?,
            None => ValidateConfig::default(),
        };
        if let Some(lang) = &self.lang {
            config.lang = lang.clone();
        }
        config.show_warnings |= self.show_warnings;
        config.lax_digests |= self.lax_digests;
        Ok(config)
    }
}
