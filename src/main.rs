use clap::Parser;
use pwvault::cli::commands;
use pwvault::cli::{output, Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `pwvault=trace`).
const LOG_ENV: &str = "PWVAULT_LOG";

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::List { ref query } => commands::list::execute(&cli, query.as_deref()),
        Commands::Get {
            ref service,
            ref username,
            copy,
        } => commands::get::execute(&cli, service, username.as_deref(), copy),
        Commands::Add {
            ref service,
            ref username,
            generate,
        } => commands::add::execute(&cli, service, username, generate),
        Commands::Set {
            ref service,
            ref username,
            generate,
        } => commands::set::execute(&cli, service, username.as_deref(), generate),
        Commands::Edit {
            ref service,
            ref username,
            ref new_service,
            ref new_username,
        } => commands::edit::execute(
            &cli,
            service,
            username.as_deref(),
            new_service.as_deref(),
            new_username.as_deref(),
        ),
        Commands::Delete {
            ref service,
            ref username,
            force,
        } => commands::delete::execute(&cli, service, username.as_deref(), force),
        Commands::Generate { length } => commands::generate::execute(length),
        Commands::RotateKey => commands::rotate::execute(&cli),
        Commands::Export { stdout } => commands::export::execute(&cli, stdout),
        Commands::Import { ref file, force } => commands::import_cmd::execute(&cli, file, force),
        Commands::Audit { last, ref since } => {
            commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { ref shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `PWVAULT_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
