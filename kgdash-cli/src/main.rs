mod cli;
mod commands;
mod config;
mod error;
mod input;
mod output;

use clap::Parser;
use cli::{Cli, Commands, QueriesCommands};
use error::exit_with_error;
use kgdash_api::ApiClient;

fn init_tracing(cli: &Cli) {
    // CLI tracing policy:
    //   --quiet  → always "off"
    //   --verbose → "info" level (RUST_LOG honoured when set)
    //   default  → "off" (clean terminal output)
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    let ansi = !(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_tracing(&cli);

    if let Err(e) = run(cli).await {
        exit_with_error(e);
    }
}

async fn run(cli: Cli) -> error::CliResult<()> {
    let client = ApiClient::new(&config::resolve_server(cli.server.as_deref()));

    match cli.command {
        Commands::Init => commands::init::run(),

        Commands::Status => commands::status::run(&client).await,

        Commands::Run { file, download } => {
            commands::pipeline::run(&file, download.as_deref(), &client).await
        }

        Commands::Import => commands::import::run(&client).await,

        Commands::Clear { force } => commands::clear::run(force, &client).await,

        Commands::Queries { command } => match command {
            QueriesCommands::List => commands::queries::list(&client).await,
            QueriesCommands::Run { name, format } => {
                commands::queries::run(&name, &format, &client).await
            }
        },

        Commands::Translate {
            question,
            run,
            format,
        } => commands::translate::run(&question, run, &format, &client).await,

        Commands::Raw { file, expr, format } => {
            commands::raw::run(file.as_deref(), expr.as_deref(), &format, &client).await
        }
    }
}
