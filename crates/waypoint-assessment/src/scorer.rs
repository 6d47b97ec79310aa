//! Two-stage median scoring of questionnaire answers.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::questions::{level_questions, stage_questions};

/// Maturity stage, ordered from least to most process ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Exploring, inconsistent results.
    #[serde(rename = "E")]
    Explorer,
    /// Consistent personal practice.
    #[serde(rename = "P")]
    Practitioner,
    /// Integrated, traceable workflow.
    #[serde(rename = "I")]
    Integrator,
    /// Builds systems others adopt.
    #[serde(rename = "A")]
    Architect,
    /// Sets organizational standards.
    #[serde(rename = "S")]
    Steward,
}

impl Stage {
    /// All stages in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Explorer,
        Self::Practitioner,
        Self::Integrator,
        Self::Architect,
        Self::Steward,
    ];

    /// Single-letter code.
    pub fn letter(self) -> char {
        match self {
            Self::Explorer => 'E',
            Self::Practitioner => 'P',
            Self::Integrator => 'I',
            Self::Architect => 'A',
            Self::Steward => 'S',
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Explorer => "Explorer",
            Self::Practitioner => "Practitioner",
            Self::Integrator => "Integrator",
            Self::Architect => "Architect",
            Self::Steward => "Steward",
        }
    }

    /// Ordinal position, 1 (Explorer) through 5 (Steward).
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Explorer => 1,
            Self::Practitioner => 2,
            Self::Integrator => 3,
            Self::Architect => 4,
            Self::Steward => 5,
        }
    }

    /// Stage for an ordinal, when in range.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal).checked_sub(1)?).copied()
    }

    /// Stage for a letter code, when valid.
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|stage| stage.letter() == letter.to_ascii_uppercase())
            .copied()
    }
}

/// Human-readable names for the six automation levels.
const LEVEL_NAMES: [&str; 6] = [
    "Manual",
    "AI-Assisted",
    "Partially Automated",
    "Guided Automation",
    "Mostly Automated",
    "Full Automation",
];

/// Emoji badges for the six automation levels.
const LEVEL_EMOJIS: [&str; 6] = [
    "\u{1f697}\u{1f4a8}",
    "\u{1f697}\u{2795}",
    "\u{1f697}\u{1f9e0}",
    "\u{1f697}\u{1f634}",
    "\u{1f695}\u{1f916}",
    "\u{1f697}\u{2728}",
];

/// Name for an automation level (levels above 5 clamp to 5).
pub fn level_name(level: u8) -> &'static str {
    LEVEL_NAMES[usize::from(level.min(5))]
}

/// Emoji badge for an automation level.
pub fn level_emoji(level: u8) -> &'static str {
    LEVEL_EMOJIS[usize::from(level.min(5))]
}

/// A raw questionnaire answer: a numeric level choice or a stage letter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// Answer to a level-identification question.
    Level(u8),
    /// Answer to a maturity question.
    Stage(Stage),
}

/// Raw answers keyed by question id.
pub type AnswerMap = HashMap<String, Answer>;

/// A derived placement on the matrix, plus the answers it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Score {
    /// Automation level, 0-5.
    pub level: u8,
    /// Human-readable level name.
    pub level_name: &'static str,
    /// Level emoji badge.
    pub level_emoji: &'static str,
    /// Maturity stage.
    pub stage: Stage,
    /// Human-readable stage name.
    pub stage_name: &'static str,
    /// Raw answers to every level question, answered or not.
    pub level_answers: BTreeMap<String, Option<Answer>>,
    /// Raw answers to the selected level's stage questions.
    pub stage_answers: BTreeMap<String, Option<Answer>>,
}

/// Median with the lower-of-two-middle rule: the sorted element at index
/// `n / 2` is never averaged, so an even count picks the lower-middle value.
fn lower_median(mut values: Vec<u8>) -> Option<u8> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    Some(values[values.len() / 2])
}

/// Score raw answers into an automation level and maturity stage.
///
/// Stage 1 takes the median of answered level questions (default level 1,
/// clamped to 0-5). Stage 2 runs the same median over the stage questions
/// belonging to the level stage 1 produced; the question set selection is
/// what makes this a dependent pipeline rather than one flat computation.
/// Missing answers are excluded, not defaulted.
pub fn score_assessment(answers: &AnswerMap) -> Score {
    let mut level_values = Vec::new();
    for question in level_questions() {
        if let Some(Answer::Level(value)) = answers.get(question.id) {
            level_values.push(*value);
        }
    }
    let level = lower_median(level_values).unwrap_or(1).min(5);

    let selected = stage_questions(level);
    let mut stage_values = Vec::new();
    for question in selected {
        if let Some(Answer::Stage(stage)) = answers.get(question.id) {
            stage_values.push(stage.ordinal());
        }
    }
    let stage = lower_median(stage_values)
        .and_then(Stage::from_ordinal)
        .unwrap_or(Stage::Explorer);

    Score {
        level,
        level_name: level_name(level),
        level_emoji: level_emoji(level),
        stage,
        stage_name: stage.name(),
        level_answers: level_questions()
            .iter()
            .map(|question| (question.id.to_owned(), answers.get(question.id).copied()))
            .collect(),
        stage_answers: selected
            .iter()
            .map(|question| (question.id.to_owned(), answers.get(question.id).copied()))
            .collect(),
    }
}
