//! Assessment scoring and placement for the automation-level × maturity
//! matrix.
//!
//! Scoring is a two-stage pipeline: the automation level comes from the
//! level-identification questions, and that level selects which maturity
//! question set derives the stage.

/// Placement matrix data and growth path lookup.
pub mod matrix;
/// Static questionnaire definitions.
pub mod questions;
/// Anonymous result aggregation.
pub mod results;
/// Two-stage median scoring.
pub mod scorer;

pub use matrix::{GrowthPath, Placement, full_matrix, placement};
pub use questions::{LevelQuestion, StageQuestion, level_questions, stage_questions};
pub use results::{Heatmap, InMemoryResultStore, ResultStore, heatmap};
pub use scorer::{Answer, AnswerMap, Score, Stage, level_emoji, level_name, score_assessment};
