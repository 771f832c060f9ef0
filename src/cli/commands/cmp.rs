//! `fmx cmp` commands - components of the analyzed asset

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{open_store, project::resolve_project, resolve_id, save_store};
use crate::cli::helpers::{escape_csv, format_short_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::entities::Component;

#[derive(Subcommand, Debug)]
pub enum CmpCommands {
    /// Create a new component
    New(NewCmpArgs),

    /// List a project's components in display order
    List {
        /// Project ID (full or unique prefix)
        #[arg(long)]
        project: String,
    },

    /// Rename a component
    Rename {
        /// Component ID (full or unique prefix)
        id: String,

        /// New name
        name: String,
    },

    /// Change a component's display order
    Reorder {
        /// Component ID (full or unique prefix)
        id: String,

        /// New display order
        order: u32,
    },

    /// Delete a component and its failure modes
    Delete {
        /// Component ID (full or unique prefix)
        id: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct NewCmpArgs {
    /// Component name
    pub name: String,

    /// Owning project (full ID or unique prefix)
    #[arg(long)]
    pub project: String,

    /// Display order (defaults to the end of the list)
    #[arg(long)]
    pub order: Option<u32>,
}

pub fn run(cmd: CmpCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CmpCommands::New(args) => new_cmp(args, global),
        CmpCommands::List { project } => list_cmps(&project, global),
        CmpCommands::Rename { id, name } => rename_cmp(&id, name, global),
        CmpCommands::Reorder { id, order } => reorder_cmp(&id, order, global),
        CmpCommands::Delete { id } => delete_cmp(&id, global),
    }
}

/// Resolve a component ID query against the store
pub(crate) fn resolve_component(
    store: &crate::core::Store,
    query: &str,
) -> Result<crate::core::EntityId> {
    resolve_id(store.components().iter().map(|c| &c.id), query, "component")
}

fn new_cmp(args: NewCmpArgs, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let config = Config::load();
    let project_id = resolve_project(&store, &args.project)?;

    let order = args.order.unwrap_or_else(|| {
        store
            .components_of(&project_id)
            .last()
            .map(|c| c.order + 1)
            .unwrap_or(0)
    });

    let cmp = Component::new(project_id, args.name, order, config.author());
    let id = cmp.id.clone();
    store
        .insert_component(cmp)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    match global.format {
        OutputFormat::Id => println!("{}", id),
        _ => {
            if !global.quiet {
                println!("{} Created component {}", style("✓").green(), style(&id).cyan());
            } else {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

fn list_cmps(project_query: &str, global: &GlobalOpts) -> Result<()> {
    let (_ws, store) = open_store()?;
    let project_id = resolve_project(&store, project_query)?;
    let cmps = store.components_of(&project_id);

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cmps).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for c in &cmps {
                println!("{}", c.id);
            }
        }
        OutputFormat::Tsv => {
            println!("id\tname\torder\tfailure_modes");
            for c in &cmps {
                println!(
                    "{}\t{}\t{}\t{}",
                    c.id,
                    c.name,
                    c.order,
                    store.failure_modes_of(&c.id).len()
                );
            }
        }
        OutputFormat::Csv => {
            println!("id,name,order,failure_modes");
            for c in &cmps {
                println!(
                    "{},{},{},{}",
                    c.id,
                    escape_csv(&c.name),
                    c.order,
                    store.failure_modes_of(&c.id).len()
                );
            }
        }
        _ => {
            if cmps.is_empty() {
                println!("No components in this project.");
                return Ok(());
            }
            println!(
                "{:<17} {:<30} {:>5} {:>4}",
                style("ID").bold(),
                style("NAME").bold(),
                style("ORDER").bold(),
                style("FMS").bold()
            );
            for c in &cmps {
                println!(
                    "{:<17} {:<30} {:>5} {:>4}",
                    format_short_id(&c.id),
                    truncate_str(&c.name, 30),
                    c.order,
                    store.failure_modes_of(&c.id).len()
                );
            }
        }
    }
    Ok(())
}

fn rename_cmp(query: &str, name: String, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_component(&store, query)?;

    store
        .rename_component(&id, name)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    if !global.quiet {
        println!("{} Renamed component {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}

fn reorder_cmp(query: &str, order: u32, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_component(&store, query)?;

    store
        .reorder_component(&id, order)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    if !global.quiet {
        println!(
            "{} Moved component {} to order {}",
            style("✓").green(),
            style(&id).cyan(),
            order
        );
    }
    Ok(())
}

fn delete_cmp(query: &str, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_component(&store, query)?;

    let report = store
        .delete_component(&id)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
        }
        _ => {
            if !global.quiet {
                println!(
                    "{} Deleted component {} ({} record(s) removed)",
                    style("✓").green(),
                    style(&id).cyan(),
                    report.total_removed()
                );
                if global.verbose {
                    super::org::print_cascade_detail(&report);
                }
            }
        }
    }
    Ok(())
}
