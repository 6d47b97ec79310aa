//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Maturity assessment and framework chat over a fixed document corpus.
#[derive(Parser)]
#[command(name = "waypoint", version, about)]
pub struct Cli {
    /// Path to a TOML settings file; defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Chunk the source corpus, embed every chunk, and persist the index.
    BuildIndex {
        /// Override the configured source document directory.
        #[arg(long)]
        source_dir: Option<PathBuf>,
        /// Override the configured index directory.
        #[arg(long)]
        index_dir: Option<PathBuf>,
    },
    /// Search the corpus and print the ranked hits as JSON.
    Search {
        /// Query text.
        query: String,
        /// Maximum number of results.
        #[arg(long, default_value_t = 5)]
        top_k: usize,
    },
    /// Ask a grounded question through an LLM provider.
    Ask {
        /// The question to ask.
        question: String,
        /// Provider name, or "auto" for the first available.
        #[arg(long, default_value = "auto")]
        provider: String,
        /// Model override for the selected provider.
        #[arg(long)]
        model: Option<String>,
        /// Reasoning value for models that support one.
        #[arg(long)]
        reasoning: Option<String>,
    },
    /// Score an answers file and print the placement as JSON.
    Assess {
        /// Path to a JSON file mapping question ids to answers.
        #[arg(long)]
        answers: PathBuf,
    },
    /// List registered providers with availability status.
    Providers,
    /// Run the golden-question evaluation across providers.
    Evaluate {
        /// Provider names to evaluate; all available when omitted.
        #[arg(long)]
        provider: Vec<String>,
        /// Runs per question, for consistency measurement.
        #[arg(long, default_value_t = 1)]
        runs: usize,
        /// Write the full JSON report to this path.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
