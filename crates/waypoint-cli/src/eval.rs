//! Evaluation harness: run golden questions against providers and compare
//! answer quality, latency, and cost.

use serde::Serialize;

use waypoint_core::{ChatMessage, GenerateRequest, Result, grounded_system_prompt};
use waypoint_providers::ProviderRegistry;
use waypoint_retrieval::{EmbeddingProvider, SearchEngine};

use crate::commands::hits_to_passages;

/// A golden question with the themes a good answer should cover.
pub struct GoldenQuestion {
    /// Stable question id.
    pub id: &'static str,
    /// Question text.
    pub question: &'static str,
    /// Keywords/phrases a grounded answer should mention.
    pub expected_themes: &'static [&'static str],
    /// Question category, for report grouping.
    pub category: &'static str,
}

/// The golden question set.
pub const GOLDEN_QUESTIONS: &[GoldenQuestion] = &[
    GoldenQuestion {
        id: "g01",
        question: "What SAE level am I at if I use ChatGPT to brainstorm design ideas but rewrite everything?",
        expected_themes: &["SAE L1", "AI-Assisted", "human drives", "suggest", "direct each step", "rewrite"],
        category: "level_identification",
    },
    GoldenQuestion {
        id: "g02",
        question: "What's the difference between an Explorer and a Practitioner at L2?",
        expected_themes: &["Explorer", "Practitioner", "trying", "repeatable", "consistent", "definition of done", "rework"],
        category: "stage_distinction",
    },
    GoldenQuestion {
        id: "g03",
        question: "I use Bolt.new to generate React components from specs. Am I at L2 or L3?",
        expected_themes: &["L2", "app-builders", "bounded chunks", "screens", "components", "Bolt"],
        category: "level_identification",
    },
    GoldenQuestion {
        id: "g04",
        question: "What does it mean to be a Steward at L1?",
        expected_themes: &["Steward", "L1", "standards", "team", "governs", "mentor", "judgment", "review"],
        category: "role_description",
    },
    GoldenQuestion {
        id: "g05",
        question: "How do I transition from L2 to L3?",
        expected_themes: &["screens", "runs", "IDE", "multi-step", "context engineering", "checkpoints", "workflow"],
        category: "transition_guidance",
    },
    GoldenQuestion {
        id: "g06",
        question: "Is a Steward at L1 more mature than an Explorer at L4?",
        expected_themes: &["yes", "depth", "judgment", "breadth", "tooling", "more valuable", "more mature"],
        category: "framework_principles",
    },
    GoldenQuestion {
        id: "g07",
        question: "What's the key difference between L3 and L4?",
        expected_themes: &["close laptop", "stops", "continues", "away", "exceptions", "harness", "IDE"],
        category: "level_distinction",
    },
    GoldenQuestion {
        id: "g08",
        question: "What concrete things should I do to move from L3 Practitioner to L3 Integrator?",
        expected_themes: &["decision framing", "failure mode", "escalation", "approval", "eval", "ownership"],
        category: "growth_actions",
    },
    GoldenQuestion {
        id: "g09",
        question: "What tools do designers typically use at L3?",
        expected_themes: &["VS Code", "Cursor", "IDE", "Copilot", "LangChain", "MCP", "workflow"],
        category: "tooling",
    },
    GoldenQuestion {
        id: "g10",
        question: "Should I skip L2 and jump straight to L3?",
        expected_themes: &["judgment", "deeper", "carry forward", "don't race", "reliability", "L2"],
        category: "framework_principles",
    },
];

/// Fraction of expected themes mentioned in the response
/// (case-insensitive).
pub fn theme_coverage_score(response_text: &str, expected_themes: &[&str]) -> f64 {
    if expected_themes.is_empty() {
        return 0.0;
    }
    let response_lower = response_text.to_lowercase();
    let hits = expected_themes
        .iter()
        .filter(|theme| response_lower.contains(&theme.to_lowercase()))
        .count();
    hits as f64 / expected_themes.len() as f64
}

/// Ideal word-count band for a grounded answer.
const MIN_WORDS: usize = 50;
/// Upper end of the ideal word-count band.
const MAX_WORDS: usize = 500;

/// Score response length: 1.0 inside the ideal band, scaled down outside.
pub fn response_length_score(response_text: &str) -> f64 {
    let word_count = response_text.split_whitespace().count();
    if word_count < MIN_WORDS {
        word_count as f64 / MIN_WORDS as f64
    } else if word_count > MAX_WORDS {
        (MAX_WORDS as f64 / word_count as f64).max(0.5)
    } else {
        1.0
    }
}

/// Approximate USD token rates per provider (early 2026).
const PRICING: &[(&str, f64, f64)] = &[
    ("openai", 2.50 / 1_000_000.0, 10.00 / 1_000_000.0),
    ("anthropic", 3.00 / 1_000_000.0, 15.00 / 1_000_000.0),
    ("google", 0.15 / 1_000_000.0, 0.60 / 1_000_000.0),
    ("ollama", 0.0, 0.0),
];

/// Estimate request cost in USD from reported token counts.
pub fn estimate_cost(provider: &str, input_tokens: Option<u64>, output_tokens: Option<u64>) -> f64 {
    let (input_rate, output_rate) = PRICING
        .iter()
        .find(|(name, _, _)| *name == provider)
        .map_or((0.0, 0.0), |(_, input, output)| (*input, *output));
    input_tokens.unwrap_or(0) as f64 * input_rate + output_tokens.unwrap_or(0) as f64 * output_rate
}

/// One generation attempt for one question.
#[derive(Debug, Serialize)]
pub struct RunResult {
    /// Run index.
    pub run: usize,
    /// First 500 chars of the response.
    pub response_preview: String,
    /// Theme coverage, 0.0-1.0.
    pub theme_coverage: f64,
    /// Length score, 0.0-1.0.
    pub length_score: f64,
    /// Provider latency in milliseconds.
    pub latency_ms: u64,
    /// Estimated cost in USD.
    pub cost_usd: f64,
    /// Error text, when the attempt failed.
    pub error: Option<String>,
}

/// Aggregated results for one question.
#[derive(Debug, Serialize)]
pub struct QuestionResult {
    /// Question id.
    pub question_id: &'static str,
    /// Question text.
    pub question: &'static str,
    /// Question category.
    pub category: &'static str,
    /// All attempts.
    pub runs: Vec<RunResult>,
    /// Mean theme coverage across successful runs.
    pub avg_theme_coverage: f64,
    /// Mean latency across successful runs.
    pub avg_latency_ms: f64,
    /// Total cost across all runs.
    pub total_cost_usd: f64,
    /// 1.0 minus the coverage spread across runs.
    pub consistency: f64,
    /// Failed attempt count.
    pub errors: usize,
}

/// Per-provider rollup.
#[derive(Debug, Serialize)]
pub struct ProviderSummary {
    /// Mean theme coverage across questions.
    pub avg_theme_coverage: f64,
    /// Mean latency across questions.
    pub avg_latency_ms: f64,
    /// Total cost across questions.
    pub total_cost_usd: f64,
    /// Mean consistency across questions.
    pub avg_consistency: f64,
    /// Total failed attempts.
    pub total_errors: usize,
}

/// All results for one provider.
#[derive(Debug, Serialize)]
pub struct ProviderResult {
    /// Provider name.
    pub provider: String,
    /// Model the provider defaulted to.
    pub model: String,
    /// Per-question results.
    pub questions: Vec<QuestionResult>,
    /// Rollup summary.
    pub summary: ProviderSummary,
}

/// Full evaluation report.
#[derive(Debug, Serialize)]
pub struct EvaluationReport {
    /// When the evaluation ran (RFC 3339, UTC).
    pub timestamp: String,
    /// Runs per question.
    pub num_runs: usize,
    /// Number of golden questions.
    pub num_questions: usize,
    /// Per-provider results.
    pub providers: Vec<ProviderResult>,
}

/// Run all golden questions against the selected providers.
///
/// With an empty provider list, every available provider is evaluated.
///
/// # Errors
/// Returns an error when a named provider cannot be resolved; generation
/// failures are recorded per run, not raised.
pub async fn run_evaluation<E: EmbeddingProvider>(
    registry: &ProviderRegistry,
    engine: &SearchEngine<E>,
    providers: Vec<String>,
    num_runs: usize,
) -> Result<EvaluationReport> {
    let provider_names = if providers.is_empty() {
        registry
            .available_providers()
            .await
            .into_iter()
            .filter(|status| status.available)
            .map(|status| status.name)
            .collect()
    } else {
        providers
    };

    let mut results = Vec::new();
    for provider_name in provider_names {
        let provider = registry.get(&provider_name).await?;
        let mut question_results = Vec::new();

        for question in GOLDEN_QUESTIONS {
            let mut runs = Vec::new();
            for run_index in 0..num_runs {
                let hits = engine.search(question.question, 5).await;
                let system_prompt = grounded_system_prompt(&hits_to_passages(&hits));
                let request = GenerateRequest::new(
                    system_prompt,
                    vec![ChatMessage::user(question.question)],
                );

                match provider.generate(&request).await {
                    Ok(response) => {
                        let coverage =
                            theme_coverage_score(&response.text, question.expected_themes);
                        runs.push(RunResult {
                            run: run_index,
                            response_preview: response.text.chars().take(500).collect(),
                            theme_coverage: coverage,
                            length_score: response_length_score(&response.text),
                            latency_ms: response.latency_ms,
                            cost_usd: estimate_cost(
                                &provider_name,
                                response.input_tokens,
                                response.output_tokens,
                            ),
                            error: None,
                        });
                    }
                    Err(error) => runs.push(RunResult {
                        run: run_index,
                        response_preview: String::new(),
                        theme_coverage: 0.0,
                        length_score: 0.0,
                        latency_ms: 0,
                        cost_usd: 0.0,
                        error: Some(error.to_string()),
                    }),
                }
            }
            question_results.push(aggregate_question(question, runs));
        }

        let summary = summarize_provider(&question_results);
        results.push(ProviderResult {
            provider: provider_name,
            model: provider.default_model().to_owned(),
            questions: question_results,
            summary,
        });
    }

    Ok(EvaluationReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        num_runs,
        num_questions: GOLDEN_QUESTIONS.len(),
        providers: results,
    })
}

/// Aggregate run attempts into a per-question result.
fn aggregate_question(question: &GoldenQuestion, runs: Vec<RunResult>) -> QuestionResult {
    let successful: Vec<&RunResult> = runs.iter().filter(|run| run.error.is_none()).collect();
    let (avg_coverage, consistency, avg_latency) = if successful.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let coverages: Vec<f64> = successful.iter().map(|run| run.theme_coverage).collect();
        let avg = coverages.iter().sum::<f64>() / coverages.len() as f64;
        let consistency = if coverages.len() > 1 {
            let max = coverages.iter().copied().fold(f64::MIN, f64::max);
            let min = coverages.iter().copied().fold(f64::MAX, f64::min);
            1.0 - (max - min)
        } else {
            1.0
        };
        let latency = successful
            .iter()
            .map(|run| run.latency_ms as f64)
            .sum::<f64>()
            / successful.len() as f64;
        (avg, consistency, latency)
    };

    QuestionResult {
        question_id: question.id,
        question: question.question,
        category: question.category,
        avg_theme_coverage: avg_coverage,
        avg_latency_ms: avg_latency,
        total_cost_usd: runs.iter().map(|run| run.cost_usd).sum(),
        consistency,
        errors: runs.iter().filter(|run| run.error.is_some()).count(),
        runs,
    }
}

/// Roll question results up into the provider summary.
fn summarize_provider(questions: &[QuestionResult]) -> ProviderSummary {
    let count = questions.len().max(1) as f64;
    ProviderSummary {
        avg_theme_coverage: questions
            .iter()
            .map(|question| question.avg_theme_coverage)
            .sum::<f64>()
            / count,
        avg_latency_ms: questions
            .iter()
            .map(|question| question.avg_latency_ms)
            .sum::<f64>()
            / count,
        total_cost_usd: questions.iter().map(|question| question.total_cost_usd).sum(),
        avg_consistency: questions
            .iter()
            .map(|question| question.consistency)
            .sum::<f64>()
            / count,
        total_errors: questions.iter().map(|question| question.errors).sum(),
    }
}

/// Print a human-readable summary of the report.
pub fn print_summary(report: &EvaluationReport) {
    println!("{}", "=".repeat(70));
    println!("Framework Evaluation Report");
    println!("Time: {}", report.timestamp);
    println!(
        "Questions: {} | Runs per question: {}",
        report.num_questions, report.num_runs
    );
    println!("{}", "=".repeat(70));

    for provider in &report.providers {
        let summary = &provider.summary;
        println!(
            "\n  {} ({})",
            provider.provider.to_uppercase(),
            provider.model
        );
        println!(
            "    Theme Coverage: {:.1}%",
            summary.avg_theme_coverage * 100.0
        );
        println!("    Avg Latency:    {:.0}ms", summary.avg_latency_ms);
        println!("    Total Cost:     ${:.4}", summary.total_cost_usd);
        println!(
            "    Consistency:    {:.1}%",
            summary.avg_consistency * 100.0
        );
        println!("    Errors:         {}", summary.total_errors);
    }

    println!("\n{}", "=".repeat(70));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_coverage_counts_case_insensitive_mentions() {
        let text = "At SAE L1 you are ai-assisted; you direct each step.";
        let score = theme_coverage_score(text, &["SAE L1", "AI-Assisted", "direct each step", "harness"]);
        assert!((score - 0.75).abs() < 1e-9);
        assert!((theme_coverage_score(text, &[]) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn length_score_bands() {
        let short = "too short";
        assert!(response_length_score(short) < 0.1);

        let ideal: String = (0..100).map(|index| format!("word{index} ")).collect();
        assert!((response_length_score(&ideal) - 1.0).abs() < 1e-9);

        let long: String = (0..2000).map(|index| format!("word{index} ")).collect();
        let score = response_length_score(&long);
        assert!((0.5..1.0).contains(&score));
    }

    #[test]
    fn cost_estimates_follow_provider_rates() {
        let openai = estimate_cost("openai", Some(1_000_000), Some(1_000_000));
        assert!((openai - 12.50).abs() < 1e-9);
        assert!((estimate_cost("ollama", Some(1_000_000), Some(1_000_000)) - 0.0).abs() < 1e-9);
        assert!((estimate_cost("unknown", Some(100), Some(100)) - 0.0).abs() < 1e-9);
        assert!((estimate_cost("openai", None, None) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn ten_golden_questions_with_themes() {
        assert_eq!(GOLDEN_QUESTIONS.len(), 10);
        for question in GOLDEN_QUESTIONS {
            assert!(!question.expected_themes.is_empty());
        }
    }

    #[test]
    fn single_run_is_fully_consistent() {
        let question = &GOLDEN_QUESTIONS[0];
        let result = aggregate_question(
            question,
            vec![RunResult {
                run: 0,
                response_preview: String::new(),
                theme_coverage: 0.5,
                length_score: 1.0,
                latency_ms: 10,
                cost_usd: 0.0,
                error: None,
            }],
        );
        assert!((result.consistency - 1.0).abs() < 1e-9);
        assert!((result.avg_theme_coverage - 0.5).abs() < 1e-9);
    }

    #[test]
    fn failed_runs_zero_the_aggregates() {
        let question = &GOLDEN_QUESTIONS[0];
        let result = aggregate_question(
            question,
            vec![RunResult {
                run: 0,
                response_preview: String::new(),
                theme_coverage: 0.0,
                length_score: 0.0,
                latency_ms: 0,
                cost_usd: 0.0,
                error: Some("boom".to_owned()),
            }],
        );
        assert_eq!(result.errors, 1);
        assert!((result.consistency - 0.0).abs() < 1e-9);
    }
}
