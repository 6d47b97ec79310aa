//! TF-IDF lexical index used as the fallback search tier.
//!
//! English stopwords are removed and the vocabulary is capped at the most
//! frequent terms; rows are tf-idf weighted and L2-normalized so scoring a
//! query is a cosine similarity. Zero-similarity documents are never
//! returned.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Vocabulary cap: only the most frequent terms across the corpus index.
pub const MAX_VOCABULARY: usize = 5000;

/// Common stop words that should not influence scoring
fn stopwords() -> &'static HashSet<&'static str> {
    static STOPWORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOPWORDS.get_or_init(|| {
        [
            "the", "and", "for", "with", "that", "from", "this", "have", "will", "into",
            "when", "where", "what", "your", "their", "about", "which", "there", "been",
            "while", "without", "should", "could", "would", "using", "used", "they", "them",
            "then", "than", "only", "also", "over", "under", "after", "before", "each",
            "every", "more", "most", "some", "such", "within", "between", "because", "again",
            "almost", "always", "never", "being", "having", "through", "across", "please",
            "however", "though", "whereas", "among", "amongst", "whose", "are", "was",
            "were", "has", "had", "does", "did", "not", "can", "cannot", "you", "our",
            "ours", "its", "his", "her", "hers", "who", "whom", "how", "why", "all",
            "any", "but", "nor", "too", "very", "own", "same", "other", "both", "these",
            "those", "out", "off", "down", "further", "once", "here", "few", "in", "of",
            "to", "at", "on", "as", "by", "an", "or", "be", "is", "it", "if", "so",
            "no", "do", "up", "we", "me", "my", "us", "am",
        ]
        .into_iter()
        .collect()
    })
}

/// Tokenize text into lowercase alphanumeric terms, dropping stopwords and
/// one-character fragments.
fn tokenize(text: &str) -> Vec<String> {
    let stopwords = stopwords();
    text.split(|character: char| !character.is_alphanumeric())
        .filter_map(|word| {
            let lower = word.to_lowercase();
            (lower.len() > 1 && !stopwords.contains(lower.as_str())).then_some(lower)
        })
        .collect()
}

/// A document row: sparse tf-idf weights by vocabulary index, L2-normalized.
struct DocumentRow {
    weights: Vec<(usize, f32)>,
}

/// TF-IDF vector space over the chunk corpus.
pub struct TfIdfIndex {
    /// Term to vocabulary index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per vocabulary index.
    idf: Vec<f32>,
    /// One normalized row per document.
    rows: Vec<DocumentRow>,
}

impl TfIdfIndex {
    /// Build the index over all document texts.
    ///
    /// Vocabulary selection keeps the `MAX_VOCABULARY` most frequent terms;
    /// ties break alphabetically so rebuilds are deterministic.
    pub fn build(texts: &[String]) -> Self {
        let tokenized: Vec<Vec<String>> = texts.iter().map(|text| tokenize(text)).collect();

        // Corpus-wide term frequency for the vocabulary cap.
        let mut corpus_freq: HashMap<&str, usize> = HashMap::new();
        for terms in &tokenized {
            for term in terms {
                *corpus_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        let mut ranked: Vec<(&str, usize)> = corpus_freq.into_iter().collect();
        ranked.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(right.0)));
        ranked.truncate(MAX_VOCABULARY);

        let vocabulary: HashMap<String, usize> = ranked
            .iter()
            .enumerate()
            .map(|(index, (term, _))| ((*term).to_owned(), index))
            .collect();

        // Document frequency per vocabulary term.
        let mut doc_freq = vec![0_usize; vocabulary.len()];
        for terms in &tokenized {
            let mut seen: HashSet<usize> = HashSet::new();
            for term in terms {
                if let Some(&index) = vocabulary.get(term) {
                    seen.insert(index);
                }
            }
            for index in seen {
                doc_freq[index] += 1;
            }
        }

        let document_count = tokenized.len() as f32;
        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| ((1.0 + document_count) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let rows = tokenized
            .iter()
            .map(|terms| DocumentRow {
                weights: Self::weigh(terms, &vocabulary, &idf),
            })
            .collect();

        Self {
            vocabulary,
            idf,
            rows,
        }
    }

    /// Compute normalized tf-idf weights for one bag of terms.
    fn weigh(
        terms: &[String],
        vocabulary: &HashMap<String, usize>,
        idf: &[f32],
    ) -> Vec<(usize, f32)> {
        let mut term_freq: HashMap<usize, usize> = HashMap::new();
        for term in terms {
            if let Some(&index) = vocabulary.get(term) {
                *term_freq.entry(index).or_insert(0) += 1;
            }
        }

        let mut weights: Vec<(usize, f32)> = term_freq
            .into_iter()
            .map(|(index, count)| (index, count as f32 * idf[index]))
            .collect();

        let norm = weights
            .iter()
            .map(|(_, weight)| weight * weight)
            .sum::<f32>()
            .sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut weights {
                *weight /= norm;
            }
        }
        weights.sort_by_key(|(index, _)| *index);
        weights
    }

    /// Score a query against every document, returning `(document index,
    /// similarity)` pairs in descending score order.
    ///
    /// Only strictly positive similarities are returned, even when fewer
    /// than `top_k` documents match; results are never padded with
    /// irrelevant documents.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<(usize, f32)> {
        let terms = tokenize(query);
        let query_weights: HashMap<usize, f32> =
            Self::weigh(&terms, &self.vocabulary, &self.idf)
                .into_iter()
                .collect();
        if query_weights.is_empty() {
            return Vec::new();
        }

        let mut scores: Vec<(usize, f32)> = self
            .rows
            .iter()
            .enumerate()
            .filter_map(|(document, row)| {
                let score: f32 = row
                    .weights
                    .iter()
                    .filter_map(|(index, weight)| {
                        query_weights.get(index).map(|query_weight| weight * query_weight)
                    })
                    .sum();
                (score > 0.0).then_some((document, score))
            })
            .collect();

        scores.sort_by(|left, right| {
            right
                .1
                .partial_cmp(&left.1)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scores.truncate(top_k);
        scores
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "Automation harness pipelines run evaluations autonomously overnight".to_owned(),
            "Designers explore prompt libraries together, sharing structured context".to_owned(),
            "Evaluation gates decide pass retry escalate outcomes in pipelines".to_owned(),
        ]
    }

    #[test]
    fn relevant_documents_rank_first() {
        let index = TfIdfIndex::build(&corpus());
        let results = index.search("evaluation pipelines", 3);
        assert!(!results.is_empty());
        assert_eq!(results[0].0, 2);
    }

    #[test]
    fn zero_similarity_documents_are_excluded() {
        let index = TfIdfIndex::build(&corpus());
        let results = index.search("zebra quantum", 3);
        assert!(results.is_empty());
    }

    #[test]
    fn results_never_pad_to_top_k() {
        let index = TfIdfIndex::build(&corpus());
        let results = index.search("designers", 3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, 1);
    }

    #[test]
    fn scores_are_descending() {
        let index = TfIdfIndex::build(&corpus());
        let results = index.search("pipelines evaluation gates", 3);
        for window in results.windows(2) {
            assert!(window[0].1 >= window[1].1);
        }
    }

    #[test]
    fn stopwords_carry_no_signal() {
        let index = TfIdfIndex::build(&corpus());
        assert!(index.search("the and with", 3).is_empty());
    }

    #[test]
    fn empty_corpus_yields_empty_results() {
        let index = TfIdfIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.search("anything", 3).is_empty());
    }
}
