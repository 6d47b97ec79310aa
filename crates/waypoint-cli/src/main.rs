//! Waypoint CLI — build the retrieval index, search the corpus, ask
//! grounded questions, score assessments, and compare providers.

use anyhow::Result;
use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use waypoint_cli::cli::{Cli, Command};
use waypoint_cli::commands;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let settings = waypoint_core::Settings::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Command::BuildIndex {
            source_dir,
            index_dir,
        } => commands::build_index(&settings, source_dir, index_dir).await?,
        Command::Search { query, top_k } => commands::search(&settings, &query, top_k).await?,
        Command::Ask {
            question,
            provider,
            model,
            reasoning,
        } => {
            commands::ask(
                &settings,
                &question,
                &provider,
                model.as_deref(),
                reasoning.as_deref(),
            )
            .await?;
        }
        Command::Assess { answers } => commands::assess(&settings, &answers).await?,
        Command::Providers => commands::providers(&settings).await?,
        Command::Evaluate {
            provider,
            runs,
            output,
        } => commands::evaluate(&settings, provider, runs, output.as_deref()).await?,
    }

    Ok(())
}
