//! `fmx effect` commands - severity-rated effects of a failure mode

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{fm::resolve_fm, open_store, resolve_id, save_store};
use crate::cli::helpers::{escape_csv, format_short_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::Effect;

#[derive(Subcommand, Debug)]
pub enum EffectCommands {
    /// Add an effect to a failure mode
    Add(AddEffectArgs),

    /// List a failure mode's effects
    List {
        /// Failure mode ID (full or unique prefix)
        #[arg(long)]
        fm: String,
    },

    /// Remove an effect
    Rm {
        /// Effect ID (full or unique prefix)
        id: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct AddEffectArgs {
    /// What the failure does downstream
    pub description: String,

    /// Owning failure mode (full ID or unique prefix)
    #[arg(long)]
    pub fm: String,

    /// Severity rating (1 = negligible, scale max = catastrophic)
    #[arg(long, short = 's')]
    pub severity: u8,

    /// Residual severity after mitigation
    #[arg(long)]
    pub residual_severity: Option<u8>,

    /// Residual occurrence after mitigation
    #[arg(long)]
    pub residual_occurrence: Option<u8>,

    /// Residual detection after mitigation
    #[arg(long)]
    pub residual_detection: Option<u8>,
}

pub fn run(cmd: EffectCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        EffectCommands::Add(args) => add_effect(args, global),
        EffectCommands::List { fm } => list_effects(&fm, global),
        EffectCommands::Rm { id } => rm_effect(&id, global),
    }
}

fn add_effect(args: AddEffectArgs, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let fm_id = resolve_fm(&store, &args.fm)?;

    let mut effect = Effect::new(fm_id, args.description, args.severity);
    effect.residual.severity = args.residual_severity;
    effect.residual.occurrence = args.residual_occurrence;
    effect.residual.detection = args.residual_detection;

    let id = effect.id.clone();
    store
        .insert_effect(effect)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    match global.format {
        OutputFormat::Id => println!("{}", id),
        _ => {
            if !global.quiet {
                println!("{} Added effect {}", style("✓").green(), style(&id).cyan());
            } else {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

fn list_effects(fm_query: &str, global: &GlobalOpts) -> Result<()> {
    let (_ws, store) = open_store()?;
    let fm_id = resolve_fm(&store, fm_query)?;
    let effects = store.effects_of(&fm_id);

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&effects).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for e in &effects {
                println!("{}", e.id);
            }
        }
        OutputFormat::Tsv => {
            println!("id\tdescription\tseverity\tresidual_severity");
            for e in &effects {
                println!(
                    "{}\t{}\t{}\t{}",
                    e.id,
                    e.description,
                    e.severity,
                    e.residual
                        .severity
                        .map(|s| s.to_string())
                        .unwrap_or_default()
                );
            }
        }
        OutputFormat::Csv => {
            println!("id,description,severity,residual_severity");
            for e in &effects {
                println!(
                    "{},{},{},{}",
                    e.id,
                    escape_csv(&e.description),
                    e.severity,
                    e.residual
                        .severity
                        .map(|s| s.to_string())
                        .unwrap_or_default()
                );
            }
        }
        _ => {
            if effects.is_empty() {
                println!("No effects on this failure mode.");
                return Ok(());
            }
            println!(
                "{:<17} {:<50} {:>3} {:<8}",
                style("ID").bold(),
                style("DESCRIPTION").bold(),
                style("S").bold(),
                style("RESIDUAL").bold()
            );
            for e in &effects {
                let residual = if e.residual.is_empty() {
                    "-".to_string()
                } else {
                    format!(
                        "S={} O={} D={}",
                        e.residual.severity.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
                        e.residual.occurrence.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
                        e.residual.detection.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
                    )
                };
                println!(
                    "{:<17} {:<50} {:>3} {}",
                    format_short_id(&e.id),
                    truncate_str(&e.description, 50),
                    e.severity,
                    residual
                );
            }
        }
    }
    Ok(())
}

fn rm_effect(query: &str, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_id(store.effects().iter().map(|e| &e.id), query, "effect")?;

    store
        .delete_effect(&id)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    if !global.quiet {
        println!("{} Removed effect {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}
