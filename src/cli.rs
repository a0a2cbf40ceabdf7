//! Command-line interface definitions for the `ltms` binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::domain::filter::FilterSpec;
use crate::domain::record::{PaymentStatus, Theme};
use crate::domain::statistics::DateRange;

/// ltms - Lawyer Transactions Management System
///
/// Keeps lawyers and their billable transactions in a local data
/// directory and reports paid/unpaid totals, rankings and monthly trends.
#[derive(Debug, Parser)]
#[command(name = "ltms")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the storage directory from the config
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print storage metrics after the command finishes
    #[arg(long, global = true)]
    pub print_metrics: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Log level implied by `-v`/`-q`, if either was given.
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else {
            match self.verbose {
                0 => None,
                1 => Some("debug"),
                _ => Some("trace"),
            }
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Seed sample data if the store is empty
    Init,

    /// Manage lawyers
    #[command(subcommand)]
    Lawyer(LawyerCommand),

    /// Manage transactions
    #[command(subcommand, name = "tx")]
    Transaction(TransactionCommand),

    /// Global paid/unpaid statistics
    Stats,

    /// Statement for one lawyer
    Report(ReportArgs),

    /// Lawyers ranked by total billed amount
    Ranking,

    /// This month against last month
    Monthly(MonthlyArgs),

    /// Dashboard overview
    Dashboard {
        /// Keep running and refresh on the configured interval
        #[arg(short, long)]
        watch: bool,
    },

    /// Write a JSON backup into a directory
    Export {
        /// Target directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Replace stored collections from a JSON backup
    Import {
        /// Backup file to read
        file: PathBuf,
    },

    /// Delete all lawyers and transactions, then reseed sample data
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Remove transactions whose lawyer no longer exists
    Repair,

    /// Show or set the theme preference
    Theme {
        /// New theme; omit to show the current one
        value: Option<ThemeArg>,
    },
}

/// Lawyer subcommands.
#[derive(Debug, Subcommand)]
pub enum LawyerCommand {
    /// Add a lawyer
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        professional_id: String,
        #[arg(long)]
        phone: String,
    },

    /// List lawyers
    List {
        /// Case-insensitive search across all fields
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show one lawyer
    Show { id: String },

    /// Change fields of an existing lawyer
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        professional_id: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Delete a lawyer and all of their transactions
    Delete { id: String },
}

/// Transaction subcommands.
#[derive(Debug, Subcommand)]
pub enum TransactionCommand {
    /// Record a transaction
    Add {
        /// Owning lawyer id
        #[arg(long)]
        lawyer: String,
        /// Number of documents
        #[arg(long)]
        documents: u32,
        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        amount: Decimal,
        /// Mark as already paid
        #[arg(long)]
        paid: bool,
    },

    /// List transactions
    List(TransactionFilterArgs),

    /// Show one transaction
    Show { id: String },

    /// Change fields of an existing transaction
    Update {
        id: String,
        #[arg(long)]
        lawyer: Option<String>,
        #[arg(long)]
        documents: Option<u32>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        amount: Option<Decimal>,
        /// New payment state
        #[arg(long)]
        paid: Option<bool>,
    },

    /// Delete a transaction
    Delete { id: String },
}

/// Filters for `tx list`.
#[derive(Debug, Args)]
pub struct TransactionFilterArgs {
    /// Only this lawyer's transactions
    #[arg(long)]
    pub lawyer: Option<String>,
    /// Case-insensitive search across all fields
    #[arg(short, long, default_value = "")]
    pub search: String,
    /// Inclusive start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Payment status
    #[arg(long, value_enum, default_value_t = StatusArg::All)]
    pub status: StatusArg,
}

impl TransactionFilterArgs {
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            search: self.search.clone(),
            date_from: self.from,
            date_to: self.to,
            payment_status: self.status.into(),
        }
    }
}

/// Arguments for `report`.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Lawyer id
    pub lawyer: String,
    /// Inclusive start date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Also list the matching transactions
    #[arg(long)]
    pub details: bool,
}

impl ReportArgs {
    pub const fn range(&self) -> DateRange {
        DateRange {
            from: self.from,
            to: self.to,
        }
    }
}

/// Arguments for `monthly`.
#[derive(Debug, Args)]
pub struct MonthlyArgs {
    /// Reference day (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub on: Option<NaiveDate>,
}

/// Payment status as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    All,
    Paid,
    Unpaid,
}

impl From<StatusArg> for PaymentStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::All => Self::All,
            StatusArg::Paid => Self::Paid,
            StatusArg::Unpaid => Self::Unpaid,
        }
    }
}

/// Theme as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_name(), "ltms");
    }

    #[test]
    fn test_parse_tx_add() {
        let cli = Cli::try_parse_from([
            "ltms", "tx", "add", "--lawyer", "1", "--documents", "3", "--date", "2025-01-07",
            "--amount", "1500.50", "--paid",
        ])
        .unwrap();

        match cli.command {
            Command::Transaction(TransactionCommand::Add {
                lawyer,
                documents,
                date,
                amount,
                paid,
            }) => {
                assert_eq!(lawyer, "1");
                assert_eq!(documents, 3);
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 7));
                assert_eq!(amount, dec!(1500.50));
                assert!(paid);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_tx_list_filters() {
        let cli = Cli::try_parse_from([
            "ltms", "--json", "tx", "list", "--status", "unpaid", "--from", "2025-01-01", "-s",
            "law",
        ])
        .unwrap();
        assert!(cli.json);

        let Command::Transaction(TransactionCommand::List(args)) = cli.command else {
            panic!("expected tx list");
        };
        let spec = args.to_spec();
        assert_eq!(spec.payment_status, PaymentStatus::Unpaid);
        assert_eq!(spec.date_from, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(spec.search, "law");
    }

    #[test]
    fn test_log_level_override() {
        let quiet = Cli::try_parse_from(["ltms", "-q", "stats"]).unwrap();
        assert_eq!(quiet.log_level_override(), Some("error"));
        let verbose = Cli::try_parse_from(["ltms", "-vv", "stats"]).unwrap();
        assert_eq!(verbose.log_level_override(), Some("trace"));
        let normal = Cli::try_parse_from(["ltms", "stats"]).unwrap();
        assert_eq!(normal.log_level_override(), None);
    }
}
