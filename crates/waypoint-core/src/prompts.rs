//! Grounded system prompt assembly for framework chat.

use serde::{Deserialize, Serialize};

/// A retrieved passage attached to a prompt as grounding context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextPassage {
    /// Source document name.
    pub source: String,
    /// Section title the passage came from.
    pub section: String,
    /// Passage text.
    pub text: String,
}

/// Expert persona and answering instructions for framework chat.
const CHAT_PREAMBLE: &str = "You are an expert on the Design in Tech Report 2026 \
E-P-I-A-S x SAE Framework by John Maeda for AI upskilling product designers. \
Answer questions based on the following framework content. \
Cite specific SAE levels and EPIAS stages when relevant. \
Be helpful and concrete in your advice.";

/// Builds the system prompt for a grounded chat turn.
///
/// Each passage is tagged with its source and section so the model can cite
/// where guidance came from. An empty passage list yields a prompt with an
/// empty context block; retrieval coming up empty is not an error.
pub fn grounded_system_prompt(passages: &[ContextPassage]) -> String {
    let context = passages
        .iter()
        .map(|passage| {
            format!(
                "[Source: {}, Section: {}]\n{}",
                passage.source, passage.section, passage.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    format!("{CHAT_PREAMBLE}\n\nFRAMEWORK CONTEXT:\n{context}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_tags_each_passage() {
        let passages = vec![
            ContextPassage {
                source: "framework.md".to_owned(),
                section: "SAE L2".to_owned(),
                text: "Partial automation guidance.".to_owned(),
            },
            ContextPassage {
                source: "transitions.md".to_owned(),
                section: "L2 -> L3".to_owned(),
                text: "Move from screens to runs.".to_owned(),
            },
        ];

        let prompt = grounded_system_prompt(&passages);
        assert!(prompt.contains("[Source: framework.md, Section: SAE L2]"));
        assert!(prompt.contains("[Source: transitions.md, Section: L2 -> L3]"));
        assert!(prompt.contains("\n\n---\n\n"));
    }

    #[test]
    fn empty_retrieval_still_produces_a_prompt() {
        let prompt = grounded_system_prompt(&[]);
        assert!(prompt.contains("FRAMEWORK CONTEXT:"));
        assert!(prompt.ends_with("FRAMEWORK CONTEXT:\n"));
    }
}
