//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::{StructuralFilter, ViewMode};

/// Organization chart engine: reporting-line and org-unit hierarchies with search and filters
#[derive(Parser, Debug)]
#[command(name = "orgchart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the filtered hierarchy
    Tree {
        /// Employee table (CSV)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// reporting | organization (default from config)
        #[arg(long)]
        view: Option<ViewMode>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show manpower, headcount and vacancies by corporate title
    Summary {
        /// Employee table (CSV)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List values offered for each filter
    Options {
        /// Employee table (CSV)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show an employee and their managers up to the top
    Chain {
        /// Employee table (CSV)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Node id (employee id or generated vacant id)
        id: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Search query and structural constraints shared by the data commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Search tokens (all must match)
    #[arg(short, long)]
    pub search: Option<String>,
    /// Exact group name
    #[arg(long)]
    pub group: Option<String>,
    /// Exact division name
    #[arg(long)]
    pub division: Option<String>,
    /// Exact department name
    #[arg(long)]
    pub department: Option<String>,
    /// Exact unit name
    #[arg(long)]
    pub unit: Option<String>,
    /// Exact corporate title
    #[arg(long)]
    pub title: Option<String>,
}

/// "all" (any case) means no constraint.
fn constraint(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(str::to_string)
}

impl FilterArgs {
    pub fn to_filter(&self) -> StructuralFilter {
        StructuralFilter {
            group: constraint(&self.group),
            division: constraint(&self.division),
            department: constraint(&self.department),
            unit: constraint(&self.unit),
            corporate_title: constraint(&self.title),
        }
    }

    pub fn query(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented tree / plain text
    #[default]
    Tree,
    /// JSON
    Json,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show {
        /// Directory whose local config is merged in
        #[arg(value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },

    /// Create config template
    Init {
        /// Create global config instead of ./.orgchart.toml
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
