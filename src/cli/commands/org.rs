//! `fmx org` commands - organizations, plans, and invitations

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{open_store, resolve_id, save_store};
use crate::cli::helpers::format_short_id;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::entities::{Invitation, InvitationStatus, Organization, Plan, Role};

#[derive(Subcommand, Debug)]
pub enum OrgCommands {
    /// Create a new organization
    New(NewOrgArgs),

    /// List organizations
    List,

    /// Show an organization in detail
    Show {
        /// Organization ID (full or unique prefix)
        id: String,
    },

    /// Delete an organization and everything under it
    Delete {
        /// Organization ID (full or unique prefix)
        id: String,
    },

    /// Invite a member to an organization
    Invite(InviteArgs),

    /// List an organization's invitations
    Invites {
        /// Organization ID (full or unique prefix)
        org: String,
    },

    /// Cancel a pending invitation
    Revoke {
        /// Invitation ID (full or unique prefix)
        id: String,
    },

    /// Accept a pending invitation
    Accept {
        /// Invitation ID (full or unique prefix)
        id: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct NewOrgArgs {
    /// Organization name
    pub name: String,

    /// Subscription plan (free, pro, enterprise)
    #[arg(long, default_value = "free")]
    pub plan: Plan,
}

#[derive(clap::Args, Debug)]
pub struct InviteArgs {
    /// Organization ID (full or unique prefix)
    #[arg(long)]
    pub org: Option<String>,

    /// Email address to invite
    pub email: String,

    /// Member role (admin, editor, viewer)
    #[arg(long, default_value = "editor")]
    pub role: Role,
}

pub fn run(cmd: OrgCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        OrgCommands::New(args) => new_org(args, global),
        OrgCommands::List => list_orgs(global),
        OrgCommands::Show { id } => show_org(&id, global),
        OrgCommands::Delete { id } => delete_org(&id, global),
        OrgCommands::Invite(args) => invite(args, global),
        OrgCommands::Invites { org } => list_invites(&org, global),
        OrgCommands::Revoke { id } => revoke(&id, global),
        OrgCommands::Accept { id } => accept(&id, global),
    }
}

/// Resolve an `--org` argument, falling back to the configured default
pub(crate) fn resolve_org_arg(
    store: &crate::core::Store,
    org: Option<&str>,
) -> Result<crate::core::EntityId> {
    let config = Config::load();
    let query = match org {
        Some(q) => q.to_string(),
        None => config.default_org.clone().ok_or_else(|| {
            miette::miette!("No organization given. Pass --org or set default_org in the config.")
        })?,
    };
    resolve_id(
        store.organizations().iter().map(|o| &o.id),
        &query,
        "organization",
    )
}

fn new_org(args: NewOrgArgs, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let config = Config::load();

    let org = Organization::new(args.name, args.plan, config.author());
    let id = org.id.clone();
    store.insert_organization(org);
    save_store(&ws, &store)?;

    match global.format {
        OutputFormat::Json => {
            let org = store.organization(&id).ok_or_else(|| {
                miette::miette!("organization vanished after insert")
            })?;
            println!(
                "{}",
                serde_json::to_string_pretty(org).into_diagnostic()?
            );
        }
        OutputFormat::Id => println!("{}", id),
        _ => {
            if !global.quiet {
                println!("{} Created organization {}", style("✓").green(), style(&id).cyan());
            } else {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

fn list_orgs(global: &GlobalOpts) -> Result<()> {
    let (_ws, store) = open_store()?;
    let orgs = store.organizations();

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(orgs).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for org in orgs {
                println!("{}", org.id);
            }
        }
        OutputFormat::Tsv => {
            println!("id\tname\tplan\tprojects\tmax_projects");
            for org in orgs {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    org.id,
                    org.name,
                    org.plan,
                    store.projects_of(&org.id).len(),
                    org.max_projects
                );
            }
        }
        OutputFormat::Csv => {
            println!("id,name,plan,projects,max_projects");
            for org in orgs {
                println!(
                    "{},{},{},{},{}",
                    org.id,
                    crate::cli::helpers::escape_csv(&org.name),
                    org.plan,
                    store.projects_of(&org.id).len(),
                    org.max_projects
                );
            }
        }
        _ => {
            if orgs.is_empty() {
                println!("No organizations. Create one with 'fmx org new <name>'.");
                return Ok(());
            }
            println!(
                "{:<17} {:<30} {:<11} {:>8}",
                style("ID").bold(),
                style("NAME").bold(),
                style("PLAN").bold(),
                style("PROJECTS").bold()
            );
            for org in orgs {
                println!(
                    "{:<17} {:<30} {:<11} {:>5}/{}",
                    format_short_id(&org.id),
                    crate::cli::helpers::truncate_str(&org.name, 30),
                    org.plan,
                    store.projects_of(&org.id).len(),
                    org.max_projects
                );
            }
        }
    }
    Ok(())
}

fn show_org(query: &str, global: &GlobalOpts) -> Result<()> {
    let (_ws, store) = open_store()?;
    let id = resolve_id(store.organizations().iter().map(|o| &o.id), query, "organization")?;
    let org = store
        .organization(&id)
        .ok_or_else(|| miette::miette!("No organization found matching '{}'", query))?;

    match global.format {
        OutputFormat::Id => println!("{}", org.id),
        OutputFormat::Json | OutputFormat::Auto => {
            println!("{}", serde_json::to_string_pretty(org).into_diagnostic()?);
        }
        _ => {
            println!("{}: {}", style("Organization").bold(), org.name);
            println!("  ID:       {}", org.id);
            println!("  Plan:     {}", org.plan);
            println!(
                "  Projects: {}/{}",
                store.projects_of(&org.id).len(),
                org.max_projects
            );
            println!("  Members:  max {}", org.max_users);
            println!("  Created:  {}", org.created.format("%Y-%m-%d %H:%M"));
            println!("  Author:   {}", org.author);
        }
    }
    Ok(())
}

fn delete_org(query: &str, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_id(store.organizations().iter().map(|o| &o.id), query, "organization")?;

    let report = store
        .delete_organization(&id)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
        }
        _ => {
            if !global.quiet {
                println!(
                    "{} Deleted organization {} ({} record(s) removed, {} invitation(s) cancelled)",
                    style("✓").green(),
                    style(&id).cyan(),
                    report.total_removed(),
                    report.invitations_cancelled
                );
                if global.verbose {
                    print_cascade_detail(&report);
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn print_cascade_detail(report: &crate::core::CascadeReport) {
    let rows = [
        ("organizations", report.organizations),
        ("projects", report.projects),
        ("components", report.components),
        ("failure modes", report.failure_modes),
        ("causes", report.causes),
        ("effects", report.effects),
        ("controls", report.controls),
        ("actions", report.actions),
    ];
    for (kind, count) in rows {
        if count > 0 {
            println!("    {} {}", count, kind);
        }
    }
}

fn invite(args: InviteArgs, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let org_id = resolve_org_arg(&store, args.org.as_deref())?;

    let invitation = Invitation::new(org_id, args.email.clone(), args.role);
    let id = invitation.id.clone();
    store
        .insert_invitation(invitation)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    match global.format {
        OutputFormat::Id => println!("{}", id),
        _ => {
            if !global.quiet {
                println!(
                    "{} Invited {} as {} ({})",
                    style("✓").green(),
                    style(&args.email).cyan(),
                    args.role,
                    id
                );
            } else {
                println!("{}", id);
            }
        }
    }
    Ok(())
}

fn list_invites(org_query: &str, global: &GlobalOpts) -> Result<()> {
    let (_ws, store) = open_store()?;
    let org_id = resolve_id(
        store.organizations().iter().map(|o| &o.id),
        org_query,
        "organization",
    )?;
    let invitations = store.invitations_of(&org_id);

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&invitations).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for inv in &invitations {
                println!("{}", inv.id);
            }
        }
        OutputFormat::Tsv => {
            println!("id\temail\trole\tstatus");
            for inv in &invitations {
                println!("{}\t{}\t{}\t{}", inv.id, inv.email, inv.role, inv.status);
            }
        }
        _ => {
            if invitations.is_empty() {
                println!("No invitations for this organization.");
                return Ok(());
            }
            println!(
                "{:<17} {:<30} {:<8} {:<10}",
                style("ID").bold(),
                style("EMAIL").bold(),
                style("ROLE").bold(),
                style("STATUS").bold()
            );
            for inv in &invitations {
                let status = match inv.status {
                    InvitationStatus::Pending => style("pending").yellow().to_string(),
                    InvitationStatus::Accepted => style("accepted").green().to_string(),
                    InvitationStatus::Cancelled => style("cancelled").dim().to_string(),
                };
                println!(
                    "{:<17} {:<30} {:<8} {}",
                    format_short_id(&inv.id),
                    crate::cli::helpers::truncate_str(&inv.email, 30),
                    inv.role,
                    status
                );
            }
        }
    }
    Ok(())
}

fn revoke(query: &str, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_id(store.invitations().iter().map(|i| &i.id), query, "invitation")?;

    store
        .cancel_invitation(&id)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    if !global.quiet {
        println!("{} Cancelled invitation {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}

fn accept(query: &str, global: &GlobalOpts) -> Result<()> {
    let (ws, mut store) = open_store()?;
    let id = resolve_id(store.invitations().iter().map(|i| &i.id), query, "invitation")?;

    store
        .accept_invitation(&id)
        .map_err(|e| miette::miette!("{}", e))?;
    save_store(&ws, &store)?;

    if !global.quiet {
        println!("{} Accepted invitation {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}
