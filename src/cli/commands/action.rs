//! `fmx action` commands - corrective action items

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{fm::resolve_fm, open_store, resolve_id, save_store};
use crate::cli::helpers::{escape_csv, format_short_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::{Action, ActionStatus};

#[derive(Subcommand, Debug)]
pub enum ActionCommands {
    /// Add an action item to a failure mode
    Add(AddActionArgs),

    /// List a failure mode's action items
    List {
        /// Failure mode ID (full or unique prefix)
        #[arg(long)]
        fm: String,
    },

    /// Set an action item's status
    SetStatus {
        /// Action ID (full or unique prefix)
        id: String,

        /// New status (open, in_progress, completed, verified)
        status: ActionStatus,
    },

    /// Remove an action item
    Rm {
        /// Action ID (full or unique prefix)
        id: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct AddActionArgs {
    /// What needs to be done
    pub title: String,

    /// Owning failure mode (full ID or unique prefix)
    #[arg(long)]
    pub fm: String,

    /// Who owns the action
    #[arg(long)]
    pub owner: String,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,
}

pub fn run(cmd: ActionCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ActionCommands::Add(args) => add_action(args, global),
        ActionCommands::List { fm } => list_actions(&fm, global),
        ActionCommands::SetStatus { id, status } => set_status(&id, status, global),
        ActionCommands::Rm { id } => rm_action(&id, global),
    }
}

fn add_action(args: AddActionArgs, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let fm_id = resolve_fm(&store, &args.fm)?;

    let action = Action::new(fm_id, args.title, args.owner, args.due);
    let id = action.id.clone();
    store
        .insert_action(action)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    match global.format {
        OutputFormat::Id => println!("{}", id),
        _ => {
            if !global.quiet {
                println!("{} Added action {}", style("✓").green(), style(&id).cyan());
            } else {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

fn list_actions(fm_query: &str, global: &GlobalOpts) -> Result<()> {
    let (_ws, store) = open_store()?;
    let fm_id = resolve_fm(&store, fm_query)?;
    let actions = store.actions_of(&fm_id);

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&actions).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for a in &actions {
                println!("{}", a.id);
            }
        }
        OutputFormat::Tsv => {
            println!("id\ttitle\towner\tdue\tstatus");
            for a in &actions {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    a.id,
                    a.title,
                    a.owner,
                    a.due_date.map(|d| d.to_string()).unwrap_or_default(),
                    a.status
                );
            }
        }
        OutputFormat::Csv => {
            println!("id,title,owner,due,status");
            for a in &actions {
                println!(
                    "{},{},{},{},{}",
                    a.id,
                    escape_csv(&a.title),
                    escape_csv(&a.owner),
                    a.due_date.map(|d| d.to_string()).unwrap_or_default(),
                    a.status
                );
            }
        }
        _ => {
            if actions.is_empty() {
                println!("No actions on this failure mode.");
                return Ok(());
            }
            println!(
                "{:<17} {:<36} {:<16} {:<11} {:<12}",
                style("ID").bold(),
                style("TITLE").bold(),
                style("OWNER").bold(),
                style("DUE").bold(),
                style("STATUS").bold()
            );
            for a in &actions {
                let status = match a.status {
                    ActionStatus::Open => style("open").red().to_string(),
                    ActionStatus::InProgress => style("in_progress").yellow().to_string(),
                    ActionStatus::Completed => style("completed").green().to_string(),
                    ActionStatus::Verified => style("verified").green().bold().to_string(),
                };
                println!(
                    "{:<17} {:<36} {:<16} {:<11} {}",
                    format_short_id(&a.id),
                    truncate_str(&a.title, 36),
                    truncate_str(&a.owner, 16),
                    a.due_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
                    status
                );
            }
        }
    }
    Ok(())
}

fn set_status(query: &str, status: ActionStatus, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_id(store.actions().iter().map(|a| &a.id), query, "action")?;

    store
        .set_action_status(&id, status)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    if !global.quiet {
        println!(
            "{} Set action {} to {}",
            style("✓").green(),
            style(&id).cyan(),
            status
        );
    }
    Ok(())
}

fn rm_action(query: &str, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_id(store.actions().iter().map(|a| &a.id), query, "action")?;

    store
        .delete_action(&id)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    if !global.quiet {
        println!("{} Removed action {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}
