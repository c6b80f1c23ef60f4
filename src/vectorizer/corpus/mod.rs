use indexmap::IndexMap;

use crate::vectorizer::token::TokenFrequency;

/// Corpus statistics gathered while fitting.
///
/// Does not keep any document text. It only tracks:
/// - the number of documents
/// - for each token, the number of documents containing it (document frequency)
/// - for each token, its total number of occurrences (used to rank the vocabulary)
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// number of documents added
    doc_num: u64,
    /// token -> number of documents containing it
    doc_freq: IndexMap<Box<str>, u64>,
    /// token -> occurrences over every document, in first-seen order
    occurrences: TokenFrequency,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build statistics for a whole set of texts.
    pub fn from_texts<T>(texts: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        let mut corpus = Self::new();
        for text in texts {
            corpus.add_doc(&TokenFrequency::from_text(text.as_ref()));
        }
        corpus
    }

    /// Add one document's token counts to the corpus
    pub fn add_doc(&mut self, doc: &TokenFrequency) {
        self.doc_num += 1;
        for token in doc.token_set_ref_str() {
            match self.doc_freq.get_mut(token) {
                Some(count) => *count += 1,
                None => {
                    self.doc_freq.insert(token.into(), 1);
                }
            }
        }
        self.occurrences.merge(doc);
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `token`
    #[inline]
    pub fn get_doc_freq(&self, token: &str) -> u64 {
        self.doc_freq.get(token).copied().unwrap_or(0)
    }

    /// Total occurrences of `token` across the corpus
    #[inline]
    pub fn get_occurrences(&self, token: &str) -> u64 {
        self.occurrences.token_count(token) as u64
    }

    /// Total tokens added, repeats included
    #[inline]
    pub fn token_total(&self) -> u64 {
        self.occurrences.token_sum()
    }

    /// Number of distinct tokens seen
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.doc_freq.len()
    }

    /// The `limit` most frequent tokens by total occurrences, descending.
    /// Ties are broken by first appearance in the corpus.
    pub fn top_tokens(&self, limit: usize) -> Vec<&str> {
        self.occurrences
            .most_frequent_tokens(limit)
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }
}
