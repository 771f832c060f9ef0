//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    action::ActionCommands, cause::CauseCommands, cmp::CmpCommands, completions::CompletionsArgs,
    ctrl::CtrlCommands, effect::EffectCommands, fm::FmCommands, init::InitArgs,
    org::OrgCommands, project::ProjectCommands, report::ReportCommands,
};

#[derive(Parser)]
#[command(name = "fmx")]
#[command(author, version, about = "FMX FMEA Toolkit")]
#[command(
    long_about = "A CLI for managing FMEA studies - organizations, projects, components, and failure modes with risk scoring - in a single JSON workspace store."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new FMX workspace
    Init(InitArgs),

    /// Organization management (tenants, plans, invitations)
    #[command(subcommand)]
    Org(OrgCommands),

    /// Project management (FMEA studies)
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Component management (analyzed items)
    #[command(subcommand)]
    Cmp(CmpCommands),

    /// Failure mode management (with computed RPN and risk band)
    #[command(subcommand)]
    Fm(FmCommands),

    /// Cause management (occurrence-rated)
    #[command(subcommand)]
    Cause(CauseCommands),

    /// Effect management (severity-rated)
    #[command(subcommand)]
    Effect(EffectCommands),

    /// Control management (prevention/detection)
    #[command(subcommand)]
    Ctrl(CtrlCommands),

    /// Action item management
    #[command(subcommand)]
    Action(ActionCommands),

    /// Generate FMEA reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (json for show, table for list)
    #[default]
    Auto,
    /// JSON format (full fidelity)
    Json,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
