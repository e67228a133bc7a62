use std::process::ExitCode;

use clap::Parser;

mod commands;
mod settings;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Record expenses and summarise them.
#[derive(Debug, Parser)]
#[command(name = "koltseg", version)]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override the file backing the entry store.
    #[arg(long, global = true)]
    store: Option<String>,
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = match settings::Settings::new(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(store) = cli.store {
        settings.store.path = store;
    }

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "koltseg={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    match commands::run(cli.command, &settings) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
