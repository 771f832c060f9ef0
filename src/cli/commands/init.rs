//! `fmx init` command - Initialize a new FMX workspace

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::workspace::{Workspace, WorkspaceError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Force initialization even if .fmx/ already exists (resets the store)
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let ws = if args.force {
        Workspace::init_force(&path)
    } else {
        Workspace::init(&path)
    };

    match ws {
        Ok(ws) => {
            println!(
                "{} Initialized FMX workspace at {}",
                style("✓").green(),
                style(ws.root().display()).cyan()
            );
            println!();
            println!("Next steps:");
            println!(
                "  {} Create an organization",
                style("fmx org new \"My Org\"").yellow()
            );
            println!(
                "  {} Create a project under it",
                style("fmx project new --org ORG-... \"My Study\"").yellow()
            );
            println!(
                "  {} Generate the FMEA worksheet",
                style("fmx report fmea --project PROJ-...").yellow()
            );
            Ok(())
        }
        Err(WorkspaceError::AlreadyExists(path)) => {
            println!(
                "{} FMX workspace already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!("Use {} to reinitialize.", style("--force").yellow());
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
