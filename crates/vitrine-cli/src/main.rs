//! Vitrine CLI

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vitrine_cli::commands::{self, App};
use vitrine_cli::config_handlers::handle_config_command;
use vitrine_cli::{Cli, Command, VitrineConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "info,vitrine=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let (mut config, config_file) =
        VitrineConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(path) = &config_file {
        tracing::debug!(path = %path.display(), "Loaded config file");
    }
    config.apply_env(|key| std::env::var(key).ok());
    config.apply_flags(cli.data_dir.as_deref(), cli.base_url.as_deref());
    config.ensure_source();

    let output = match cli.command {
        Command::Config { action } => {
            handle_config_command(cli.config.as_deref(), action, &config)?
        }
        command => run(config, command).await?,
    };
    print!("{output}");
    Ok(())
}

async fn run(config: VitrineConfig, command: Command) -> Result<String> {
    let app = App::new(config).context("invalid configuration")?;

    let output = match command {
        Command::List(args) => {
            let snapshot = app.listing(&args).await?;
            if args.json {
                serde_json::to_string_pretty(&snapshot)? + "\n"
            } else {
                commands::render_listing(&args.resource, &snapshot)
            }
        }
        Command::Show { resource, id } => {
            let record = app.record(&resource, &id).await?;
            commands::render_record(&resource, &record)?
        }
        Command::Bench { programs } => {
            let (state, aggregator) = app.bench(programs.as_deref()).await;
            commands::render_bench(&state, &aggregator)
        }
        Command::Posts(args) => {
            let snapshot = app
                .posts(&args)
                .await
                .with_context(|| format!("failed to load {}", app.content_dir().display()))?;
            commands::render_posts(&snapshot)
        }
        Command::Config { .. } => String::new(),
    };
    Ok(output)
}
