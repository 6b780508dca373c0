use std::path::PathBuf;

use clap::{Parser, Subcommand};
use common::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(
    name = "issue-report",
    version,
    about = "Normalize an issue-tracker export and report on labels, creators and time",
    long_about = None
)]
pub struct Cli {
    /// Directory searched for `config.json` and `config/{default,local}`.
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    /// Issue export to read; overrides `file_path` from configuration.
    #[arg(long, global = true)]
    pub file_path: Option<PathBuf>,

    /// Focus on events authored by this user.
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Restrict label analyses to this label.
    #[arg(short, long, global = true)]
    pub label: Option<String>,

    /// Restrict label analyses to issues opened by this creator.
    #[arg(short, long, global = true)]
    pub creator: Option<String>,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Event totals, top creators, state split, top labels and resolution times.
    Summary,
    /// Users who closed the most issues.
    Closers {
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Issues opened and closed per calendar month.
    Months,
    /// Average time to close per label.
    CloseTime,
    /// Opened/closed counts per creator and label after filtering.
    Labels,
    /// Write the normalized table as JSON.
    Export {
        /// One row per (issue, label) pair.
        #[arg(long)]
        explode: bool,
    },
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            file_path: self.file_path.clone(),
            user: self.user.clone(),
            label: self.label.clone(),
            creator: self.creator.clone(),
        }
    }
}
