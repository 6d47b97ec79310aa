//! Core types and traits for the Waypoint assessment service.
//!
//! This crate provides the error type, shared chat/response types, the
//! model provider trait, configuration, and the budget/rate accounting
//! used around LLM calls.

/// Configuration loading and defaults.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Per-client sliding-window rate limiting.
pub mod limiter;
/// Grounded system prompt assembly.
pub mod prompts;
/// Trait definitions for model providers.
pub mod traits;
/// Core data types for requests, responses, and reasoning options.
pub mod types;
/// Daily token usage tracking with budget enforcement.
pub mod usage;

pub use config::Settings;
pub use error::{Error, Result};
pub use limiter::RateLimiter;
pub use prompts::{ContextPassage, grounded_system_prompt};
pub use traits::ModelProvider;
pub use types::{ChatMessage, GenerateRequest, LlmResponse, ReasoningConfig, Role};
pub use usage::{UsageStats, UsageStore, UsageTracker};
