//! `fmx project` commands - FMEA studies and their scoring settings

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{open_store, org::resolve_org_arg, resolve_id, save_store};
use crate::cli::helpers::{escape_csv, format_short_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::entities::{Project, ProjectSettings};
use crate::risk::{continuity_findings, resolve_color, RiskBand, ScoringScale};

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a new project
    New(NewProjectArgs),

    /// List projects
    List {
        /// Limit to one organization (full ID or unique prefix)
        #[arg(long)]
        org: Option<String>,
    },

    /// Show a project in detail
    Show {
        /// Project ID (full or unique prefix)
        id: String,
    },

    /// Delete a project and everything under it
    Delete {
        /// Project ID (full or unique prefix)
        id: String,
    },

    /// Show or edit a project's scoring settings
    Settings(SettingsArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewProjectArgs {
    /// Project name
    pub name: String,

    /// Owning organization (full ID or unique prefix)
    #[arg(long)]
    pub org: Option<String>,

    /// Asset under analysis
    #[arg(long)]
    pub asset: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    /// Project ID (full or unique prefix)
    pub id: String,

    /// Scoring scale (1-10 or 1-5). Resets bands to the scale's defaults
    /// unless --bands is also given.
    #[arg(long)]
    pub scale: Option<ScoringScale>,

    /// Threshold bands as "Label:min:max:color,..." (ordered, inclusive)
    #[arg(long)]
    pub bands: Option<String>,
}

pub fn run(cmd: ProjectCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProjectCommands::New(args) => new_project(args, global),
        ProjectCommands::List { org } => list_projects(org.as_deref(), global),
        ProjectCommands::Show { id } => show_project(&id, global),
        ProjectCommands::Delete { id } => delete_project(&id, global),
        ProjectCommands::Settings(args) => settings(args, global),
    }
}

/// Resolve a project ID query against the store
pub(crate) fn resolve_project(
    store: &crate::core::Store,
    query: &str,
) -> Result<crate::core::EntityId> {
    resolve_id(store.projects().iter().map(|p| &p.id), query, "project")
}

fn new_project(args: NewProjectArgs, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let config = Config::load();
    let org_id = resolve_org_arg(&store, args.org.as_deref())?;

    let project = Project::new(org_id, args.name, args.asset, config.author());
    let id = project.id.clone();
    store
        .insert_project(project)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    match global.format {
        OutputFormat::Id => println!("{}", id),
        _ => {
            if !global.quiet {
                println!("{} Created project {}", style("✓").green(), style(&id).cyan());
            } else {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

fn list_projects(org: Option<&str>, global: &GlobalOpts) -> Result<()> {
    let (_ws, store) = open_store()?;

    let projects: Vec<&Project> = match org {
        Some(query) => {
            let org_id = resolve_id(
                store.organizations().iter().map(|o| &o.id),
                query,
                "organization",
            )?;
            store.projects_of(&org_id)
        }
        None => store.projects().iter().collect(),
    };

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&projects).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for p in &projects {
                println!("{}", p.id);
            }
        }
        OutputFormat::Tsv => {
            println!("id\tname\tasset\tscale\tcomponents\tfailure_modes");
            for p in &projects {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    p.id,
                    p.name,
                    p.asset.as_deref().unwrap_or(""),
                    p.settings.scale,
                    store.components_of(&p.id).len(),
                    store.failure_modes_of_project(&p.id).len()
                );
            }
        }
        OutputFormat::Csv => {
            println!("id,name,asset,scale,components,failure_modes");
            for p in &projects {
                println!(
                    "{},{},{},{},{},{}",
                    p.id,
                    escape_csv(&p.name),
                    escape_csv(p.asset.as_deref().unwrap_or("")),
                    p.settings.scale,
                    store.components_of(&p.id).len(),
                    store.failure_modes_of_project(&p.id).len()
                );
            }
        }
        _ => {
            if projects.is_empty() {
                println!("No projects. Create one with 'fmx project new <name> --org <id>'.");
                return Ok(());
            }
            println!(
                "{:<17} {:<30} {:<7} {:>5} {:>4}",
                style("ID").bold(),
                style("NAME").bold(),
                style("SCALE").bold(),
                style("CMPS").bold(),
                style("FMS").bold()
            );
            for p in &projects {
                println!(
                    "{:<17} {:<30} {:<7} {:>5} {:>4}",
                    format_short_id(&p.id),
                    truncate_str(&p.name, 30),
                    p.settings.scale,
                    store.components_of(&p.id).len(),
                    store.failure_modes_of_project(&p.id).len()
                );
            }
        }
    }
    Ok(())
}

fn show_project(query: &str, global: &GlobalOpts) -> Result<()> {
    let (_ws, store) = open_store()?;
    let id = resolve_project(&store, query)?;
    let project = store
        .project(&id)
        .ok_or_else(|| miette::miette!("No project found matching '{}'", query))?;

    match global.format {
        OutputFormat::Id => println!("{}", project.id),
        OutputFormat::Json | OutputFormat::Auto => {
            println!("{}", serde_json::to_string_pretty(project).into_diagnostic()?);
        }
        _ => {
            println!("{}: {}", style("Project").bold(), project.name);
            println!("  ID:           {}", project.id);
            println!("  Organization: {}", project.organization_id);
            if let Some(asset) = &project.asset {
                println!("  Asset:        {}", asset);
            }
            println!("  Scale:        {}", project.settings.scale);
            println!("  Created:      {}", project.created.format("%Y-%m-%d %H:%M"));
            print_bands(&project.settings);
        }
    }
    Ok(())
}

fn delete_project(query: &str, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_project(&store, query)?;

    let report = store
        .delete_project(&id)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
        }
        _ => {
            if !global.quiet {
                println!(
                    "{} Deleted project {} ({} record(s) removed)",
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

fn settings(args: SettingsArgs, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_project(&store, &args.id)?;
    let current = store
        .project(&id)
        .ok_or_else(|| miette::miette!("No project found matching '{}'", args.id))?
        .settings
        .clone();

    if args.scale.is_none() && args.bands.is_none() {
        match global.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&current).into_diagnostic()?);
            }
            _ => {
                println!("  Scale: {}", current.scale);
                print_bands(&current);
            }
        }
        return Ok(());
    }

    let scale = args.scale.unwrap_or(current.scale);
    let bands = match &args.bands {
        Some(spec) => parse_bands(spec)?,
        None => match args.scale {
            // Scale changed without explicit bands: the old thresholds no
            // longer fit the new RPN range, so reset to the scale defaults.
            Some(s) => crate::risk::default_bands(s),
            None => current.bands,
        },
    };

    for finding in continuity_findings(&bands, scale) {
        eprintln!("{} {}", style("warning:").yellow().bold(), finding);
    }

    let settings = ProjectSettings { scale, bands };
    store
        .set_project_settings(&id, settings)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    if !global.quiet {
        println!("{} Updated settings for {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}

/// Parse a band list of the form "Label:min:max:color,Label:min:max:color".
///
/// Colors may be symbolic names or literal hex; they are stored as given and
/// resolved to hex at classification time.
fn parse_bands(spec: &str) -> Result<Vec<RiskBand>> {
    let mut bands = Vec::new();
    for part in spec.split(',') {
        let fields: Vec<&str> = part.trim().split(':').collect();
        if fields.len() != 4 {
            return Err(miette::miette!(
                "Invalid band '{}'. Expected Label:min:max:color",
                part.trim()
            ));
        }
        let min: u16 = fields[1]
            .parse()
            .map_err(|_| miette::miette!("Invalid band min '{}' in '{}'", fields[1], part.trim()))?;
        let max: u16 = fields[2]
            .parse()
            .map_err(|_| miette::miette!("Invalid band max '{}' in '{}'", fields[2], part.trim()))?;
        if min > max {
            return Err(miette::miette!(
                "Band '{}' has min {} greater than max {}",
                fields[0],
                min,
                max
            ));
        }
        bands.push(RiskBand::new(fields[0], min, max, fields[3]));
    }
    if bands.is_empty() {
        return Err(miette::miette!("Band list is empty"));
    }
    Ok(bands)
}

fn print_bands(settings: &ProjectSettings) {
    println!("  Bands:");
    for band in &settings.bands {
        println!(
            "    {:<10} {:>4}-{:<4} {}",
            band.label,
            band.min,
            band.max,
            resolve_color(&band.color)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bands() {
        let bands = parse_bands("Low:1:99:green,High:100:1000:red").unwrap();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].label, "Low");
        assert_eq!(bands[0].min, 1);
        assert_eq!(bands[0].max, 99);
        assert_eq!(bands[1].color, "red");
    }

    #[test]
    fn test_parse_bands_rejects_malformed() {
        assert!(parse_bands("Low:1:99").is_err());
        assert!(parse_bands("Low:x:99:green").is_err());
        assert!(parse_bands("Low:100:1:green").is_err());
        assert!(parse_bands("").is_err());
    }
}
