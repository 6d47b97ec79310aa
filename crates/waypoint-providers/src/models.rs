//! Model catalog: every selectable model, its provider, and the reasoning
//! parameter it accepts.

use serde::Serialize;
use waypoint_core::ReasoningConfig;

/// Which reasoning knob a model exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningParam {
    /// OpenAI reasoning effort.
    Effort,
    /// Anthropic extended-thinking token budget.
    Thinking,
    /// Gemini 2.5 thinking budget (tokens, `-1` = dynamic).
    ThinkingBudget,
    /// Gemini 3 named thinking level.
    ThinkingLevel,
}

/// Catalog entry describing one model.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelInfo {
    /// Provider name this model belongs to.
    pub provider: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Reasoning parameter kind, when the model supports one.
    pub reasoning_param: Option<ReasoningParam>,
    /// Accepted values for the reasoning parameter.
    pub reasoning_options: &'static [&'static str],
    /// Default value for the reasoning parameter.
    pub reasoning_default: Option<&'static str>,
}

/// All selectable models, grouped by provider.
pub const MODEL_CATALOG: &[(&str, ModelInfo)] = &[
    // OpenAI (Responses API)
    (
        "gpt-5.2",
        ModelInfo {
            provider: "openai",
            label: "GPT-5.2",
            description: "Latest flagship — strongest reasoning",
            reasoning_param: Some(ReasoningParam::Effort),
            reasoning_options: &["none", "low", "medium", "high", "xhigh"],
            reasoning_default: Some("high"),
        },
    ),
    (
        "gpt-5.1",
        ModelInfo {
            provider: "openai",
            label: "GPT-5.1",
            description: "Strong general purpose",
            reasoning_param: Some(ReasoningParam::Effort),
            reasoning_options: &["none", "low", "medium", "high"],
            reasoning_default: Some("high"),
        },
    ),
    (
        "gpt-4.1",
        ModelInfo {
            provider: "openai",
            label: "GPT-4.1",
            description: "Coding and instruction specialist",
            reasoning_param: None,
            reasoning_options: &[],
            reasoning_default: None,
        },
    ),
    (
        "gpt-4.1-mini",
        ModelInfo {
            provider: "openai",
            label: "GPT-4.1 Mini",
            description: "Fast and affordable",
            reasoning_param: None,
            reasoning_options: &[],
            reasoning_default: None,
        },
    ),
    (
        "o3",
        ModelInfo {
            provider: "openai",
            label: "o3",
            description: "Frontier reasoning model",
            reasoning_param: Some(ReasoningParam::Effort),
            reasoning_options: &["low", "medium", "high"],
            reasoning_default: Some("medium"),
        },
    ),
    (
        "o4-mini",
        ModelInfo {
            provider: "openai",
            label: "o4-mini",
            description: "Fast reasoning model",
            reasoning_param: Some(ReasoningParam::Effort),
            reasoning_options: &["low", "medium", "high"],
            reasoning_default: Some("medium"),
        },
    ),
    // Anthropic (Messages API)
    (
        "claude-opus-4-6",
        ModelInfo {
            provider: "anthropic",
            label: "Claude Opus 4.6",
            description: "Latest flagship — 1M context, adaptive thinking",
            reasoning_param: Some(ReasoningParam::Thinking),
            reasoning_options: &["off", "1024", "4096", "10000", "32000"],
            reasoning_default: Some("off"),
        },
    ),
    (
        "claude-sonnet-4-5",
        ModelInfo {
            provider: "anthropic",
            label: "Claude Sonnet 4.5",
            description: "Strong general purpose",
            reasoning_param: Some(ReasoningParam::Thinking),
            reasoning_options: &["off", "1024", "4096", "10000", "32000"],
            reasoning_default: Some("off"),
        },
    ),
    (
        "claude-haiku-4-5",
        ModelInfo {
            provider: "anthropic",
            label: "Claude Haiku 4.5",
            description: "Fast and affordable",
            reasoning_param: Some(ReasoningParam::Thinking),
            reasoning_options: &["off", "1024", "4096", "10000"],
            reasoning_default: Some("off"),
        },
    ),
    // Google (Generative AI)
    (
        "gemini-2.5-pro",
        ModelInfo {
            provider: "google",
            label: "Gemini 2.5 Pro",
            description: "Strong reasoning",
            reasoning_param: Some(ReasoningParam::ThinkingBudget),
            reasoning_options: &["0", "1024", "4096", "8192", "-1"],
            reasoning_default: Some("-1"),
        },
    ),
    (
        "gemini-2.5-flash",
        ModelInfo {
            provider: "google",
            label: "Gemini 2.5 Flash",
            description: "Fast and affordable",
            reasoning_param: Some(ReasoningParam::ThinkingBudget),
            reasoning_options: &["0", "1024", "4096", "8192", "-1"],
            reasoning_default: Some("-1"),
        },
    ),
    (
        "gemini-3-pro-preview",
        ModelInfo {
            provider: "google",
            label: "Gemini 3 Pro (Preview)",
            description: "Latest reasoning model",
            reasoning_param: Some(ReasoningParam::ThinkingLevel),
            reasoning_options: &["low", "high"],
            reasoning_default: Some("high"),
        },
    ),
    (
        "gemini-3-flash-preview",
        ModelInfo {
            provider: "google",
            label: "Gemini 3 Flash (Preview)",
            description: "Latest fast model",
            reasoning_param: Some(ReasoningParam::ThinkingLevel),
            reasoning_options: &["minimal", "low", "medium", "high"],
            reasoning_default: Some("medium"),
        },
    ),
];

/// Catalog entry for a model id, when known.
pub fn get_model_info(model_id: &str) -> Option<&'static ModelInfo> {
    MODEL_CATALOG
        .iter()
        .find(|(id, _)| *id == model_id)
        .map(|(_, info)| info)
}

/// All catalog entries belonging to one provider.
pub fn models_for_provider(provider: &str) -> Vec<(&'static str, &'static ModelInfo)> {
    MODEL_CATALOG
        .iter()
        .filter(|(_, info)| info.provider == provider)
        .map(|(id, info)| (*id, info))
        .collect()
}

/// Map a raw reasoning value to the typed config the model accepts.
///
/// Returns `None` for unknown models, models without a reasoning knob, and
/// values that disable reasoning ("off", or budgets that fail to parse).
pub fn reasoning_config_for(model_id: &str, value: &str) -> Option<ReasoningConfig> {
    let info = get_model_info(model_id)?;
    match info.reasoning_param? {
        ReasoningParam::Effort => Some(ReasoningConfig::Effort(value.to_owned())),
        ReasoningParam::Thinking => {
            if value == "off" {
                return None;
            }
            value.parse().ok().map(ReasoningConfig::ThinkingTokens)
        }
        ReasoningParam::ThinkingBudget => {
            value.parse().ok().map(ReasoningConfig::ThinkingBudget)
        }
        ReasoningParam::ThinkingLevel => Some(ReasoningConfig::ThinkingLevel(value.to_owned())),
    }
}
