//! `fmx ctrl` commands - prevention and detection controls

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{fm::resolve_fm, open_store, resolve_id, save_store};
use crate::cli::helpers::{escape_csv, format_short_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::{Control, ControlType};

#[derive(Subcommand, Debug)]
pub enum CtrlCommands {
    /// Add a control to a failure mode
    Add(AddCtrlArgs),

    /// List a failure mode's controls
    List {
        /// Failure mode ID (full or unique prefix)
        #[arg(long)]
        fm: String,
    },

    /// Remove a control
    Rm {
        /// Control ID (full or unique prefix)
        id: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct AddCtrlArgs {
    /// What the control does
    pub description: String,

    /// Owning failure mode (full ID or unique prefix)
    #[arg(long)]
    pub fm: String,

    /// Control type (prevention or detection)
    #[arg(long = "type", default_value = "prevention")]
    pub control_type: ControlType,

    /// Detection rating (1 = certain to catch, scale max = blind)
    #[arg(long, short = 'd')]
    pub detection: u8,

    /// Effectiveness rating (1 = weak, scale max = strong)
    #[arg(long, short = 'e')]
    pub effectiveness: u8,
}

pub fn run(cmd: CtrlCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CtrlCommands::Add(args) => add_ctrl(args, global),
        CtrlCommands::List { fm } => list_ctrls(&fm, global),
        CtrlCommands::Rm { id } => rm_ctrl(&id, global),
    }
}

fn add_ctrl(args: AddCtrlArgs, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let fm_id = resolve_fm(&store, &args.fm)?;

    let control = Control::new(
        fm_id,
        args.description,
        args.control_type,
        args.detection,
        args.effectiveness,
    );
    let id = control.id.clone();
    store
        .insert_control(control)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    match global.format {
        OutputFormat::Id => println!("{}", id),
        _ => {
            if !global.quiet {
                println!("{} Added control {}", style("✓").green(), style(&id).cyan());
            } else {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

fn list_ctrls(fm_query: &str, global: &GlobalOpts) -> Result<()> {
    let (_ws, store) = open_store()?;
    let fm_id = resolve_fm(&store, fm_query)?;
    let controls = store.controls_of(&fm_id);

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&controls).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for c in &controls {
                println!("{}", c.id);
            }
        }
        OutputFormat::Tsv => {
            println!("id\tdescription\ttype\tdetection\teffectiveness");
            for c in &controls {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    c.id, c.description, c.control_type, c.detection, c.effectiveness
                );
            }
        }
        OutputFormat::Csv => {
            println!("id,description,type,detection,effectiveness");
            for c in &controls {
                println!(
                    "{},{},{},{},{}",
                    c.id,
                    escape_csv(&c.description),
                    c.control_type,
                    c.detection,
                    c.effectiveness
                );
            }
        }
        _ => {
            if controls.is_empty() {
                println!("No controls on this failure mode.");
                return Ok(());
            }
            println!(
                "{:<17} {:<44} {:<11} {:>3} {:>3}",
                style("ID").bold(),
                style("DESCRIPTION").bold(),
                style("TYPE").bold(),
                style("D").bold(),
                style("E").bold()
            );
            for c in &controls {
                println!(
                    "{:<17} {:<44} {:<11} {:>3} {:>3}",
                    format_short_id(&c.id),
                    truncate_str(&c.description, 44),
                    c.control_type,
                    c.detection,
                    c.effectiveness
                );
            }
        }
    }
    Ok(())
}

fn rm_ctrl(query: &str, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_id(store.controls().iter().map(|c| &c.id), query, "control")?;

    store
        .delete_control(&id)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    if !global.quiet {
        println!("{} Removed control {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}
