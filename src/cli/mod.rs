//! Command-line arguments.
//!
//! Each invocation restores the session from the database, performs one action and
//! persists whatever changed. Feature commands go through the same guards as the routes
//! they belong to.

/// Dispatch of parsed commands
pub mod app;

pub use app::App;

use crate::{
    config::app::DEFAULT_CONFIG_PATH,
    core::{currency::Currency, document::DocumentType, transaction::TransactionKind},
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level arguments.
#[derive(Debug, Parser)]
#[command(name = "fingoal")]
#[command(about = "Personal financial-goal tracker")]
#[command(
    after_help = "Environment:\n  DATABASE_URL      SQLite database (default sqlite://data/fingoal.sqlite?mode=rwc)\n  FINGOAL_USER_ID   User the objectives belong to (default u1)\n  GEMINI_API_KEY    Key for milestone generation (API_KEY also accepted)\n  RUST_LOG          Log filter (default info)"
)]
pub struct Cli {
    /// Path to the TOML configuration
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// Action to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level actions.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in with e-mail and password
    Login {
        /// E-mail
        email: String,
        /// Password
        password: String,
    },
    /// Log out and forget the active objective
    Logout,
    /// List the user's objectives
    Objectives,
    /// Create an objective
    NewObjective(NewObjectiveArgs),
    /// Make an objective active
    Select {
        /// Objective id
        id: String,
    },
    /// Forget the active objective
    Clear,
    /// Show the page at a path, following guard redirects
    Open {
        /// Path such as `/dashboard` or `/finance`
        #[arg(default_value = "/")]
        path: String,
    },
    /// Transactions of the active objective
    Tx {
        /// Transaction action
        #[command(subcommand)]
        command: TxCommand,
    },
    /// Milestones of the active objective
    Milestone {
        /// Milestone action
        #[command(subcommand)]
        command: MilestoneCommand,
    },
    /// Documents of the active objective
    Doc {
        /// Document action
        #[command(subcommand)]
        command: DocCommand,
    },
}

/// Fields of a new objective.
#[derive(Debug, clap::Args)]
pub struct NewObjectiveArgs {
    /// Name
    pub name: String,
    /// Target amount
    pub target: f64,
    /// Deadline (YYYY-MM-DD)
    pub deadline: NaiveDate,
    /// Currency of the target
    #[arg(long, value_enum, default_value_t = CurrencyArg::Brl)]
    pub currency: CurrencyArg,
    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,
}

/// Transaction actions.
#[derive(Debug, Subcommand)]
pub enum TxCommand {
    /// Log a transaction
    Add {
        /// Income or expense
        #[arg(value_enum)]
        kind: KindArg,
        /// Amount in `--currency`
        amount: f64,
        /// Description
        description: String,
        /// Category
        #[arg(long, default_value = "Outros")]
        category: String,
        /// Currency the amount was paid in
        #[arg(long, value_enum, default_value_t = CurrencyArg::Brl)]
        currency: CurrencyArg,
        /// Day of the transaction (default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete a transaction
    Rm {
        /// Transaction id
        id: String,
    },
    /// List transactions whose description or category contains the query
    Search {
        /// Text to look for
        #[arg(default_value = "")]
        query: String,
    },
}

/// Milestone actions.
#[derive(Debug, Subcommand)]
pub enum MilestoneCommand {
    /// Add a milestone at the end of the list
    Add {
        /// Title
        title: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Flip a milestone between done and open
    Toggle {
        /// Milestone id
        id: String,
    },
    /// Delete a milestone
    Rm {
        /// Milestone id
        id: String,
    },
    /// Ask the text-generation service for milestones and append them
    Generate,
}

/// Document actions.
#[derive(Debug, Subcommand)]
pub enum DocCommand {
    /// Register a document
    Add {
        /// File name; an extension is added for PDF and image when missing
        name: String,
        /// Category
        #[arg(long, default_value = "Documentação")]
        category: String,
        /// Declared type
        #[arg(long = "type", value_enum, default_value_t = DocTypeArg::Pdf)]
        file_type: DocTypeArg,
    },
    /// Delete a document
    Rm {
        /// Document id
        id: String,
    },
    /// List documents whose name or category contains the query
    Search {
        /// Text to look for
        #[arg(default_value = "")]
        query: String,
    },
}

/// Currency choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CurrencyArg {
    /// Brazilian real
    Brl,
    /// US dollar
    Usd,
    /// Euro
    Eur,
}

impl From<CurrencyArg> for Currency {
    fn from(value: CurrencyArg) -> Self {
        match value {
            CurrencyArg::Brl => Self::Brl,
            CurrencyArg::Usd => Self::Usd,
            CurrencyArg::Eur => Self::Eur,
        }
    }
}

/// Transaction kind choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Money saved
    Income,
    /// Money spent
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Income => Self::Income,
            KindArg::Expense => Self::Expense,
        }
    }
}

/// Document type choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocTypeArg {
    /// PDF file
    Pdf,
    /// Picture
    Image,
    /// Anything else
    Other,
}

impl From<DocTypeArg> for DocumentType {
    fn from(value: DocTypeArg) -> Self {
        match value {
            DocTypeArg::Pdf => Self::Pdf,
            DocTypeArg::Image => Self::Image,
            DocTypeArg::Other => Self::Other,
        }
    }
}
