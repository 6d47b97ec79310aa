//! Level and stage tag extraction from heading paths.

use regex::Regex;
use std::sync::OnceLock;

/// Maturity keywords in stage order; the first keyword present wins, so a
/// path naming several stages tags as the earliest stage mentioned.
const STAGE_KEYWORDS: [(&str, char); 5] = [
    ("explorer", 'E'),
    ("practitioner", 'P'),
    ("integrator", 'I'),
    ("architect", 'A'),
    ("steward", 'S'),
];

fn level_marker() -> &'static Regex {
    static LEVEL_MARKER: OnceLock<Regex> = OnceLock::new();
    LEVEL_MARKER.get_or_init(|| Regex::new(r"\bL(\d)\b").expect("static pattern compiles"))
}

/// Extracts an automation level from a heading path.
///
/// Matches the first standalone `L<digit>` marker ("SAE L3" or "L3" yields
/// 3); digits embedded in longer words do not count.
pub fn extract_level(heading_path: &str) -> Option<u8> {
    level_marker()
        .captures(heading_path)
        .and_then(|captures| captures.get(1))
        .and_then(|digit| digit.as_str().parse().ok())
}

/// Extracts a maturity stage letter from a heading path.
///
/// When the path contains a transition arrow ("Explorer -> Practitioner"),
/// only text before the arrow is searched first, so transition headings tag
/// as their source stage; a path with nothing before the arrow falls back
/// to a whole-path search.
pub fn extract_stage(heading_path: &str) -> Option<char> {
    let lower = heading_path.to_lowercase();

    let arrow = lower.find("->").or_else(|| lower.find('→'));
    if let Some(index) = arrow {
        let before = &lower[..index];
        for (word, code) in STAGE_KEYWORDS {
            if before.contains(word) {
                return Some(code);
            }
        }
    }

    for (word, code) in STAGE_KEYWORDS {
        if lower.contains(word) {
            return Some(code);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_marker_with_and_without_prefix() {
        assert_eq!(extract_level("SAE L3: Guided Automation"), Some(3));
        assert_eq!(extract_level("The L1 Toolkit"), Some(1));
        assert_eq!(extract_level("Level guidance"), None);
        assert_eq!(extract_level("URL3 parsing"), None);
    }

    #[test]
    fn first_marker_wins() {
        assert_eq!(extract_level("L2 compared with L4"), Some(2));
    }

    #[test]
    fn transition_arrow_tags_source_stage() {
        assert_eq!(extract_stage("Explorer -> Practitioner"), Some('E'));
        assert_eq!(extract_stage("Practitioner → Integrator"), Some('P'));
    }

    #[test]
    fn arrow_with_no_leading_stage_falls_back_to_whole_path() {
        assert_eq!(extract_stage("Moving up -> Practitioner habits"), Some('P'));
    }

    #[test]
    fn keyword_order_breaks_multi_stage_paths() {
        assert_eq!(extract_stage("Practitioner and Explorer notes"), Some('E'));
    }

    #[test]
    fn plain_mentions_and_absences() {
        assert_eq!(extract_stage("The Steward role"), Some('S'));
        assert_eq!(extract_stage("General guidance"), None);
    }
}
