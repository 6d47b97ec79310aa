//! Subcommand implementations.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::info;

use waypoint_assessment::{AnswerMap, placement, score_assessment};
use waypoint_core::{
    ChatMessage, ContextPassage, Error, GenerateRequest, Result, Settings, UsageTracker,
    grounded_system_prompt,
};
use waypoint_providers::{ProviderRegistry, reasoning_config_for};
use waypoint_retrieval::{OpenAiEmbeddingClient, SearchEngine, SearchHit};

use crate::eval;

/// Open the search engine with the configured paths and embedder.
fn open_engine(settings: &Settings) -> Result<SearchEngine<OpenAiEmbeddingClient>> {
    let embedder = OpenAiEmbeddingClient::from_settings(settings);
    SearchEngine::open(
        &settings.paths.index_dir,
        &settings.paths.source_dir,
        embedder,
    )
}

/// Convert search hits into prompt passages.
pub fn hits_to_passages(hits: &[SearchHit]) -> Vec<ContextPassage> {
    hits.iter()
        .map(|hit| ContextPassage {
            source: hit.chunk.source_file.clone(),
            section: hit.chunk.section_title.clone(),
            text: hit.chunk.text.clone(),
        })
        .collect()
}

/// Build and persist the retrieval index.
pub async fn build_index(
    settings: &Settings,
    source_dir: Option<PathBuf>,
    index_dir: Option<PathBuf>,
) -> Result<()> {
    let source = source_dir.unwrap_or_else(|| settings.paths.source_dir.clone());
    let index = index_dir.unwrap_or_else(|| settings.paths.index_dir.clone());

    let embedder = OpenAiEmbeddingClient::from_settings(settings);
    let summary = waypoint_retrieval::build_index(&source, &index, &embedder).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Search the corpus and print hits as JSON.
pub async fn search(settings: &Settings, query: &str, top_k: usize) -> Result<()> {
    let engine = open_engine(settings)?;
    let hits = engine.search(query, top_k).await;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "query": query, "results": hits }))?
    );
    Ok(())
}

/// Ask a grounded question through a provider.
pub async fn ask(
    settings: &Settings,
    question: &str,
    provider_name: &str,
    model: Option<&str>,
    reasoning_value: Option<&str>,
) -> Result<()> {
    let tracker = UsageTracker::new(settings.budget.daily_token_budget);

    // The budget gate runs before any retrieval or provider spend.
    if !tracker.check_budget().await {
        let stats = tracker.stats().await;
        return Err(Error::BudgetExhausted {
            used: stats.tokens_used,
            budget: stats.budget,
        });
    }

    let engine = open_engine(settings)?;
    let hits = engine.search(question, 5).await;
    let system_prompt = grounded_system_prompt(&hits_to_passages(&hits));

    let registry = ProviderRegistry::from_settings(settings);
    let requested = if provider_name == "auto" {
        settings.default_provider.as_deref().unwrap_or("auto")
    } else {
        provider_name
    };
    let provider = registry.get(requested).await?;

    let mut request = GenerateRequest::new(system_prompt, vec![ChatMessage::user(question)]);
    if let Some(model) = model {
        if let Some(reasoning) = reasoning_value.and_then(|value| reasoning_config_for(model, value))
        {
            request = request.with_reasoning(reasoning);
        }
        request = request.with_model(model);
    }

    let response = provider.generate(&request).await?;
    let stats = tracker
        .record(
            response.input_tokens.unwrap_or(0),
            response.output_tokens.unwrap_or(0),
        )
        .await;
    info!(
        "Answered via {} ({}) in {}ms",
        response.provider, response.model, response.latency_ms
    );

    let sources: Vec<_> = hits
        .iter()
        .map(|hit| {
            json!({
                "file": hit.chunk.source_file,
                "section": hit.chunk.section_title,
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "response": response.text,
            "provider": response.provider,
            "model": response.model,
            "latency_ms": response.latency_ms,
            "sources": sources,
            "usage": stats,
        }))?
    );
    Ok(())
}

/// Score an answers file and print the placement with supporting passages.
pub async fn assess(settings: &Settings, answers_path: &Path) -> Result<()> {
    let raw = fs::read_to_string(answers_path)?;
    let answers: AnswerMap = serde_json::from_str(&raw)?;

    let score = score_assessment(&answers);
    let placed = placement(score);

    // Attach supporting passages for the computed cell; empty results are
    // "no supporting context", not an error.
    let engine = open_engine(settings)?;
    let query = format!(
        "growth path for SAE L{} {}",
        placed.score.level,
        placed.score.stage.letter()
    );
    let hits = engine.search(&query, 5).await;
    let growth_chunks: Vec<_> = hits
        .iter()
        .map(|hit| {
            json!({
                "text": hit.chunk.text,
                "section": hit.chunk.section_title,
                "source": hit.chunk.source_file,
            })
        })
        .collect();

    let mut value = serde_json::to_value(&placed)?;
    value["growth_chunks"] = json!(growth_chunks);
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// List registered providers with availability status.
pub async fn providers(settings: &Settings) -> Result<()> {
    let registry = ProviderRegistry::from_settings(settings);
    let statuses = registry.available_providers().await;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "providers": statuses }))?
    );
    Ok(())
}

/// Run the golden-question evaluation and print the summary.
pub async fn evaluate(
    settings: &Settings,
    providers: Vec<String>,
    runs: usize,
    output: Option<&Path>,
) -> Result<()> {
    let engine = open_engine(settings)?;
    let registry = ProviderRegistry::from_settings(settings);

    let report = eval::run_evaluation(&registry, &engine, providers, runs.max(1)).await?;
    eval::print_summary(&report);

    if let Some(path) = output {
        fs::write(path, serde_json::to_vec_pretty(&report)?)?;
        info!("Wrote evaluation report to {}", path.display());
    }
    Ok(())
}
