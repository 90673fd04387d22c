pub mod convert;
pub mod merge;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use scansheet_common::config::Config;

#[derive(Parser)]
#[command(name = "scansheet")]
#[command(version, about = "Turns vulnerability scan reports into ranked spreadsheets.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Hide decorative output (-q drops headers, -qq also drops the summary)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Log more detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Write spreadsheets without header and row fills
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a scan report into a severity-sorted table
    #[command(alias = "c")]
    Convert {
        /// Scan report to read
        #[arg(value_parser = report_path)]
        input: PathBuf,
        /// Table to write (.xlsx or .csv)
        #[arg(value_parser = table_path)]
        output: PathBuf,
        /// Prepend a Host column so the output can be deduplicated by `merge`
        #[arg(long)]
        with_host: bool,
    },
    /// Merge several tables into one deduplicated table
    #[command(alias = "m")]
    Merge {
        /// Number of inputs that follow the output path
        count: usize,
        /// Table to write (.xlsx or .csv)
        #[arg(value_parser = table_path)]
        output: PathBuf,
        /// Tables to merge, in priority order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        let include_host = match self.command {
            Commands::Convert { with_host, .. } => with_host,
            Commands::Merge { .. } => false,
        };

        Config {
            quiet: self.quiet,
            no_banner: self.no_banner,
            include_host,
            stripe: !self.plain,
        }
    }
}

fn has_extension(path: &str, allowed: &[&str]) -> bool {
    PathBuf::from(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| allowed.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

fn report_path(raw: &str) -> Result<PathBuf, String> {
    if has_extension(raw, &["nessus"]) {
        Ok(PathBuf::from(raw))
    } else {
        Err("expected a .nessus report".to_string())
    }
}

fn table_path(raw: &str) -> Result<PathBuf, String> {
    if has_extension(raw, &["xlsx", "csv"]) {
        Ok(PathBuf::from(raw))
    } else {
        Err("expected a .xlsx or .csv file".to_string())
    }
}
