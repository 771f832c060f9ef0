//! `fmx cause` commands - occurrence-rated causes of a failure mode

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{fm::resolve_fm, open_store, resolve_id, save_store};
use crate::cli::helpers::{escape_csv, format_short_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::Cause;

#[derive(Subcommand, Debug)]
pub enum CauseCommands {
    /// Add a cause to a failure mode
    Add(AddCauseArgs),

    /// List a failure mode's causes
    List {
        /// Failure mode ID (full or unique prefix)
        #[arg(long)]
        fm: String,
    },

    /// Remove a cause
    Rm {
        /// Cause ID (full or unique prefix)
        id: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct AddCauseArgs {
    /// What makes the failure happen
    pub description: String,

    /// Owning failure mode (full ID or unique prefix)
    #[arg(long)]
    pub fm: String,

    /// Occurrence rating (1 = rare, scale max = constant)
    #[arg(long, short = 'o')]
    pub occurrence: u8,
}

pub fn run(cmd: CauseCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CauseCommands::Add(args) => add_cause(args, global),
        CauseCommands::List { fm } => list_causes(&fm, global),
        CauseCommands::Rm { id } => rm_cause(&id, global),
    }
}

fn add_cause(args: AddCauseArgs, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let fm_id = resolve_fm(&store, &args.fm)?;

    let cause = Cause::new(fm_id, args.description, args.occurrence);
    let id = cause.id.clone();
    store
        .insert_cause(cause)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    match global.format {
        OutputFormat::Id => println!("{}", id),
        _ => {
            if !global.quiet {
                println!("{} Added cause {}", style("✓").green(), style(&id).cyan());
            } else {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

fn list_causes(fm_query: &str, global: &GlobalOpts) -> Result<()> {
    let (_ws, store) = open_store()?;
    let fm_id = resolve_fm(&store, fm_query)?;
    let causes = store.causes_of(&fm_id);

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&causes).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for c in &causes {
                println!("{}", c.id);
            }
        }
        OutputFormat::Tsv => {
            println!("id\tdescription\toccurrence");
            for c in &causes {
                println!("{}\t{}\t{}", c.id, c.description, c.occurrence);
            }
        }
        OutputFormat::Csv => {
            println!("id,description,occurrence");
            for c in &causes {
                println!("{},{},{}", c.id, escape_csv(&c.description), c.occurrence);
            }
        }
        _ => {
            if causes.is_empty() {
                println!("No causes on this failure mode.");
                return Ok(());
            }
            println!(
                "{:<17} {:<50} {:>3}",
                style("ID").bold(),
                style("DESCRIPTION").bold(),
                style("O").bold()
            );
            for c in &causes {
                println!(
                    "{:<17} {:<50} {:>3}",
                    format_short_id(&c.id),
                    truncate_str(&c.description, 50),
                    c.occurrence
                );
            }
        }
    }
    Ok(())
}

fn rm_cause(query: &str, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_id(store.causes().iter().map(|c| &c.id), query, "cause")?;

    store
        .delete_cause(&id)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    if !global.quiet {
        println!("{} Removed cause {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}
