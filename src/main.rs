use carangos::cli::commands::{
    access, completions, dashboard, emp, fin, init, menu, prod, stock, users,
};
use carangos::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
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

    let default_level = if cli.global.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let global = &cli.global;
    match cli.command {
        Commands::Init(args) => init::run(args, global),
        Commands::Whoami => users::run_whoami(global),
        Commands::Users(cmd) => users::run(cmd, global),
        Commands::Access(cmd) => access::run(cmd, global),
        Commands::Emp(cmd) => emp::run(cmd, global),
        Commands::Prod(cmd) => prod::run(cmd, global),
        Commands::Stock(cmd) => stock::run(cmd, global),
        Commands::Fin(cmd) => fin::run(cmd, global),
        Commands::Dashboard => dashboard::run(global),
        Commands::Menu => menu::run(global),
        Commands::Completions(args) => completions::run(args),
    }
}
