use clap::Parser;
use miette::Result;
use fmx::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => fmx::cli::commands::init::run(args),
        Commands::Org(cmd) => fmx::cli::commands::org::run(cmd, &global),
        Commands::Project(cmd) => fmx::cli::commands::project::run(cmd, &global),
        Commands::Cmp(cmd) => fmx::cli::commands::cmp::run(cmd, &global),
        Commands::Fm(cmd) => fmx::cli::commands::fm::run(cmd, &global),
        Commands::Cause(cmd) => fmx::cli::commands::cause::run(cmd, &global),
        Commands::Effect(cmd) => fmx::cli::commands::effect::run(cmd, &global),
        Commands::Ctrl(cmd) => fmx::cli::commands::ctrl::run(cmd, &global),
        Commands::Action(cmd) => fmx::cli::commands::action::run(cmd, &global),
        Commands::Report(cmd) => fmx::cli::commands::report::run(cmd, &global),
        Commands::Completions(args) => fmx::cli::commands::completions::run(args),
    }
}
