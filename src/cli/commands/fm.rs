//! `fmx fm` commands - failure modes with computed risk
//!
//! RPN and band are never stored; list and show recompute them from the
//! current causes, effects, and controls on every invocation.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{
    cmp::resolve_component, open_store, project::resolve_project, resolve_id, save_store,
};
use crate::cli::helpers::{escape_csv, format_short_id, style_banded, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Store};
use crate::entities::{FailureMode, FailureModeStatus};
use crate::risk::classify;

#[derive(Subcommand, Debug)]
pub enum FmCommands {
    /// Create a new failure mode
    New(NewFmArgs),

    /// List failure modes with computed RPN and band
    List(ListFmArgs),

    /// Show a failure mode in detail, with its risk breakdown
    Show {
        /// Failure mode ID (full or unique prefix)
        id: String,
    },

    /// Set a failure mode's analysis status
    SetStatus {
        /// Failure mode ID (full or unique prefix)
        id: String,

        /// New status (identified, analyzed, mitigated, closed)
        status: FailureModeStatus,
    },

    /// Delete a failure mode and its causes, effects, controls, and actions
    Delete {
        /// Failure mode ID (full or unique prefix)
        id: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct NewFmArgs {
    /// What the failure looks like
    pub title: String,

    /// Owning component (full ID or unique prefix)
    #[arg(long)]
    pub cmp: String,

    /// Detailed description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ListFmArgs {
    /// Limit to one project (full ID or unique prefix)
    #[arg(long)]
    pub project: Option<String>,

    /// Limit to one component (full ID or unique prefix)
    #[arg(long)]
    pub cmp: Option<String>,

    /// Only failure modes at or above this RPN
    #[arg(long)]
    pub min_rpn: Option<u16>,
}

pub fn run(cmd: FmCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        FmCommands::New(args) => new_fm(args, global),
        FmCommands::List(args) => list_fms(args, global),
        FmCommands::Show { id } => show_fm(&id, global),
        FmCommands::SetStatus { id, status } => set_status(&id, status, global),
        FmCommands::Delete { id } => delete_fm(&id, global),
    }
}

/// Resolve a failure mode ID query against the store
pub(crate) fn resolve_fm(store: &Store, query: &str) -> Result<crate::core::EntityId> {
    resolve_id(
        store.failure_modes().iter().map(|f| &f.id),
        query,
        "failure mode",
    )
}

fn new_fm(args: NewFmArgs, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let config = Config::load();
    let cmp_id = resolve_component(&store, &args.cmp)?;
    let project_id = store
        .component(&cmp_id)
        .map(|c| c.project_id.clone())
        .ok_or_else(|| miette::miette!("No component found matching '{}'", args.cmp))?;

    let fm = FailureMode::new(
        project_id,
        cmp_id,
        args.title,
        args.description,
        config.author(),
    );
    let id = fm.id.clone();
    store
        .insert_failure_mode(fm)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    match global.format {
        OutputFormat::Id => println!("{}", id),
        _ => {
            if !global.quiet {
                println!("{} Created failure mode {}", style("✓").green(), style(&id).cyan());
            } else {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

fn list_fms(args: ListFmArgs, global: &GlobalOpts) -> Result<()> {
    let (_ws, store) = open_store()?;

    let fms: Vec<&FailureMode> = if let Some(cmp) = &args.cmp {
        let cmp_id = resolve_component(&store, cmp)?;
        store.failure_modes_of(&cmp_id)
    } else if let Some(project) = &args.project {
        let project_id = resolve_project(&store, project)?;
        store.failure_modes_of_project(&project_id)
    } else {
        store.failure_modes().iter().collect()
    };

    // Recompute risk for every row, then sort worst-first.
    let mut rows: Vec<(&FailureMode, crate::risk::RiskSummary)> = fms
        .into_iter()
        .map(|fm| {
            let summary = store.risk_summary(&fm.id).unwrap_or_default();
            (fm, summary)
        })
        .filter(|(_, s)| args.min_rpn.map(|min| s.max_rpn >= min).unwrap_or(true))
        .collect();
    rows.sort_by(|a, b| b.1.max_rpn.cmp(&a.1.max_rpn));

    match global.format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = rows
                .iter()
                .map(|(fm, summary)| {
                    let band = band_for(&store, fm, summary.max_rpn);
                    serde_json::json!({
                        "failure_mode": fm,
                        "risk": summary,
                        "band": band,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for (fm, _) in &rows {
                println!("{}", fm.id);
            }
        }
        OutputFormat::Tsv => {
            println!("id\ttitle\tstatus\tseverity\toccurrence\tdetection\trpn\tband");
            for (fm, summary) in &rows {
                let band = band_for(&store, fm, summary.max_rpn);
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    fm.id,
                    fm.title,
                    fm.status,
                    summary.max_severity,
                    summary.max_occurrence,
                    summary.max_detection,
                    summary.max_rpn,
                    band.label
                );
            }
        }
        OutputFormat::Csv => {
            println!("id,title,status,severity,occurrence,detection,rpn,band");
            for (fm, summary) in &rows {
                let band = band_for(&store, fm, summary.max_rpn);
                println!(
                    "{},{},{},{},{},{},{},{}",
                    fm.id,
                    escape_csv(&fm.title),
                    fm.status,
                    summary.max_severity,
                    summary.max_occurrence,
                    summary.max_detection,
                    summary.max_rpn,
                    escape_csv(&band.label)
                );
            }
        }
        OutputFormat::Md => {
            println!("| ID | Title | Status | S | O | D | RPN | Band |");
            println!("|---|---|---|---|---|---|---|---|");
            for (fm, summary) in &rows {
                let band = band_for(&store, fm, summary.max_rpn);
                println!(
                    "| {} | {} | {} | {} | {} | {} | {} | {} |",
                    format_short_id(&fm.id),
                    fm.title,
                    fm.status,
                    summary.max_severity,
                    summary.max_occurrence,
                    summary.max_detection,
                    summary.max_rpn,
                    band.label
                );
            }
        }
        _ => {
            if rows.is_empty() {
                println!("No failure modes.");
                return Ok(());
            }
            println!(
                "{:<17} {:<34} {:<11} {:>3} {:>3} {:>3} {:>5} {:<9}",
                style("ID").bold(),
                style("TITLE").bold(),
                style("STATUS").bold(),
                style("S").bold(),
                style("O").bold(),
                style("D").bold(),
                style("RPN").bold(),
                style("BAND").bold()
            );
            for (fm, summary) in &rows {
                let band = band_for(&store, fm, summary.max_rpn);
                println!(
                    "{:<17} {:<34} {:<11} {:>3} {:>3} {:>3} {:>5} {}",
                    format_short_id(&fm.id),
                    truncate_str(&fm.title, 34),
                    fm.status,
                    summary.max_severity,
                    summary.max_occurrence,
                    summary.max_detection,
                    summary.max_rpn,
                    style_banded(&band.label, &band)
                );
            }
        }
    }
    Ok(())
}

/// Classify an RPN against the owning project's bands
fn band_for(store: &Store, fm: &FailureMode, rpn: u16) -> crate::risk::BandMatch {
    let bands = store
        .project(&fm.project_id)
        .map(|p| p.settings.bands.clone())
        .unwrap_or_else(|| crate::risk::default_bands(Default::default()));
    classify(rpn, &bands)
}

fn show_fm(query: &str, global: &GlobalOpts) -> Result<()> {
    let (_ws, store) = open_store()?;
    let id = resolve_fm(&store, query)?;
    let fm = store
        .failure_mode(&id)
        .ok_or_else(|| miette::miette!("No failure mode found matching '{}'", query))?;

    let summary = store
        .risk_summary(&id)
        .map_err(|e| miette::miette!("{}", e))?;
    let band = band_for(&store, fm, summary.max_rpn);

    match global.format {
        OutputFormat::Id => {
            println!("{}", fm.id);
            return Ok(());
        }
        OutputFormat::Json | OutputFormat::Auto => {
            let output = serde_json::json!({
                "failure_mode": fm,
                "causes": store.causes_of(&id),
                "effects": store.effects_of(&id),
                "controls": store.controls_of(&id),
                "actions": store.actions_of(&id),
                "risk": summary,
                "band": band,
            });
            println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            return Ok(());
        }
        _ => {}
    }

    println!("{}: {}", style("Failure Mode").bold(), fm.title);
    println!("  ID:        {}", fm.id);
    println!("  Component: {}", fm.component_id);
    println!("  Status:    {}", fm.status);
    if let Some(desc) = &fm.description {
        println!("  Detail:    {}", desc);
    }
    println!();
    if summary.is_zero() {
        println!(
            "  {} risk not computable (needs at least one cause and one effect)",
            style("Risk:").bold()
        );
    } else {
        println!(
            "  {} S={} O={} D={} RPN={} [{}]",
            style("Risk:").bold(),
            summary.max_severity,
            summary.max_occurrence,
            summary.max_detection,
            summary.max_rpn,
            style_banded(&band.label, &band)
        );
    }

    let causes = store.causes_of(&id);
    if !causes.is_empty() {
        println!();
        println!("  {}:", style("Causes").bold());
        for c in causes {
            println!(
                "    {} O={} {}",
                format_short_id(&c.id),
                c.occurrence,
                truncate_str(&c.description, 50)
            );
        }
    }

    let effects = store.effects_of(&id);
    if !effects.is_empty() {
        println!();
        println!("  {}:", style("Effects").bold());
        for e in effects {
            println!(
                "    {} S={} {}",
                format_short_id(&e.id),
                e.severity,
                truncate_str(&e.description, 50)
            );
        }
    }

    let controls = store.controls_of(&id);
    if !controls.is_empty() {
        println!();
        println!("  {}:", style("Controls").bold());
        for c in controls {
            println!(
                "    {} D={} {} ({})",
                format_short_id(&c.id),
                c.detection,
                truncate_str(&c.description, 45),
                c.control_type
            );
        }
    }

    let actions = store.actions_of(&id);
    if !actions.is_empty() {
        println!();
        println!("  {}:", style("Actions").bold());
        for a in actions {
            let due = a
                .due_date
                .map(|d| format!(" due {}", d))
                .unwrap_or_default();
            println!(
                "    {} [{}] {} ({}{})",
                format_short_id(&a.id),
                a.status,
                truncate_str(&a.title, 40),
                a.owner,
                due
            );
        }
    }
    Ok(())
}

fn set_status(query: &str, status: FailureModeStatus, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_fm(&store, query)?;

    store
        .set_failure_mode_status(&id, status)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    if !global.quiet {
        println!(
            "{} Set failure mode {} to {}",
            style("✓").green(),
            style(&id).cyan(),
            status
        );
    }
    Ok(())
}

fn delete_fm(query: &str, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_fm(&store, query)?;

    let report = store
        .delete_failure_mode(&id)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
        }
        _ => {
            if !global.quiet {
                println!(
                    "{} Deleted failure mode {} ({} record(s) removed)",
                    style("✓").green(),
                    style(&id).cyan(),
                    report.total_removed()
                );
            }
        }
    }
    Ok(())
}
