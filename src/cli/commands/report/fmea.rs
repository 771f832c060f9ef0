//! FMEA (Failure Mode and Effects Analysis) worksheet

use miette::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::{open_store, project::resolve_project};
use crate::cli::helpers::{format_short_id, truncate_str};
use crate::cli::GlobalOpts;
use crate::risk::classify;

use super::write_output;

#[derive(clap::Args, Debug)]
pub struct FmeaArgs {
    /// Project to report on (full ID or unique prefix)
    #[arg(long)]
    pub project: String,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Minimum RPN to include (default: 0)
    #[arg(long, default_value = "0")]
    pub min_rpn: u16,
}

pub fn run(args: FmeaArgs, _global: &GlobalOpts) -> Result<()> {
    let (_ws, store) = open_store()?;
    let project_id = resolve_project(&store, &args.project)?;
    let project = store
        .project(&project_id)
        .ok_or_else(|| miette::miette!("No project found matching '{}'", args.project))?;

    // One worksheet row per failure mode, worst-case scores
    struct FmeaRow {
        component: String,
        id: String,
        failure_mode: String,
        s: String,
        o: String,
        d: String,
        rpn: String,
        band: String,
        actions: String,
    }
    let mut rows: Vec<FmeaRow> = Vec::new();
    let mut total_rpn: u32 = 0;
    let mut scored = 0usize;
    let mut unmitigated = 0usize;
    let mut by_band: HashMap<String, usize> = HashMap::new();

    // Walk components in display order so the worksheet groups naturally
    let mut fms_with_risk = Vec::new();
    for cmp in store.components_of(&project_id) {
        for fm in store.failure_modes_of(&cmp.id) {
            let summary = store
                .risk_summary(&fm.id)
                .map_err(|e| miette::miette!("{}", e))?;
            fms_with_risk.push((cmp, fm, summary));
        }
    }
    fms_with_risk.retain(|(_, _, s)| s.max_rpn >= args.min_rpn);
    fms_with_risk.sort_by(|a, b| b.2.max_rpn.cmp(&a.2.max_rpn));

    for (cmp, fm, summary) in &fms_with_risk {
        let band = classify(summary.max_rpn, &project.settings.bands);
        let action_count = store.actions_of(&fm.id).len();
        let control_count = store.controls_of(&fm.id).len();

        if !summary.is_zero() {
            total_rpn += summary.max_rpn as u32;
            scored += 1;
        }
        if control_count == 0 && action_count == 0 {
            unmitigated += 1;
        }
        *by_band.entry(band.label.clone()).or_insert(0) += 1;

        let score = |v: u8| {
            if summary.is_zero() {
                "-".to_string()
            } else {
                v.to_string()
            }
        };
        rows.push(FmeaRow {
            component: truncate_str(&cmp.name, 18),
            id: format_short_id(&fm.id),
            failure_mode: truncate_str(&fm.title, 28),
            s: score(summary.max_severity),
            o: score(summary.max_occurrence),
            d: score(summary.max_detection),
            rpn: if summary.is_zero() {
                "-".to_string()
            } else {
                summary.max_rpn.to_string()
            },
            band: band.label,
            actions: if action_count == 0 {
                "None".to_string()
            } else {
                format!("{} action(s)", action_count)
            },
        });
    }

    // Generate report
    let mut output = String::new();
    output.push_str(&format!("# FMEA Worksheet: {}\n\n", project.name));
    if let Some(asset) = &project.asset {
        output.push_str(&format!("Asset: {}\n\n", asset));
    }

    // Build table with tabled
    let mut builder = Builder::default();
    builder.push_record([
        "Component",
        "ID",
        "Failure Mode",
        "S",
        "O",
        "D",
        "RPN",
        "Band",
        "Actions",
    ]);
    for row in &rows {
        builder.push_record([
            &row.component,
            &row.id,
            &row.failure_mode,
            &row.s,
            &row.o,
            &row.d,
            &row.rpn,
            &row.band,
            &row.actions,
        ]);
    }
    output.push_str(&builder.build().with(Style::markdown()).to_string());

    // Summary
    output.push_str("\n\n## Summary\n\n");
    output.push_str(&format!("- **Failure Modes:** {}\n", rows.len()));
    if scored > 0 {
        output.push_str(&format!(
            "- **Average RPN:** {:.1}\n",
            total_rpn as f64 / scored as f64
        ));
    }
    for band in &project.settings.bands {
        output.push_str(&format!(
            "- **{}:** {}\n",
            band.label,
            by_band.get(&band.label).unwrap_or(&0)
        ));
    }
    output.push_str(&format!("- **Unmitigated:** {}\n", unmitigated));

    write_output(&output, args.output)?;
    Ok(())
}
