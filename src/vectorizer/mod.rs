pub mod corpus;
pub mod tfidf;
pub mod token;
pub mod serde;

use std::marker::PhantomData;

use indexmap::IndexSet;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, TemplaterError};
use crate::utils::math::vector::normalize_l2;
use crate::vectorizer::{
    corpus::Corpus,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    token::TokenFrequency,
};

/// TF-IDF Vectorizer
///
/// Learns a fixed vocabulary and IDF table from a corpus once (`fit`), then
/// turns any text into a dense, L2-normalized term-weight vector (`transform`).
///
/// Vocabulary slots are assigned by descending corpus occurrence count, ties
/// broken by first appearance. Both the vocabulary and the IDF table are
/// immutable after `fit`.
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine + Send + Sync,
{
    max_features: usize,
    /// token dimension sample; the index of a token is its slot
    vocabulary: IndexSet<String>,
    /// IDF weight per slot
    idf: Vec<f64>,
    fitted: bool,
    _marker: PhantomData<E>,
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine + Send + Sync,
{
    /// Create an unfitted vectorizer keeping at most `max_features` tokens
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            vocabulary: IndexSet::new(),
            idf: Vec::new(),
            fitted: false,
            _marker: PhantomData,
        }
    }

    /// Learn vocabulary and IDF from `texts`. Replaces any previous fit.
    pub fn fit<T>(&mut self, texts: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        let corpus = Corpus::from_texts(texts);
        let top_tokens = corpus.top_tokens(self.max_features);
        let idf = E::idf_vec(&corpus, &top_tokens);
        let vocabulary: IndexSet<String> = top_tokens.into_iter().map(str::to_string).collect();
        debug!(
            docs = corpus.get_doc_num(),
            tokens = corpus.token_total(),
            distinct_tokens = corpus.vocab_size(),
            vocabulary = vocabulary.len(),
            "vectorizer fitted"
        );
        self.vocabulary = vocabulary;
        self.idf = idf;
        self.fitted = true;
        self
    }

    /// Vectorize every text in order.
    pub fn transform<T>(&self, texts: &[T]) -> Result<Vec<Vec<f64>>>
    where
        T: AsRef<str>,
    {
        self.ensure_fitted()?;
        Ok(texts.iter().map(|t| self.vectorize(t.as_ref())).collect())
    }

    /// Same as [`transform`](Self::transform), rows spread over the rayon pool.
    /// Output order and values are identical.
    pub fn par_transform<T>(&self, texts: &[T]) -> Result<Vec<Vec<f64>>>
    where
        T: AsRef<str> + Sync,
    {
        self.ensure_fitted()?;
        Ok(texts.par_iter().map(|t| self.vectorize(t.as_ref())).collect())
    }

    pub fn transform_one(&self, text: &str) -> Result<Vec<f64>> {
        self.ensure_fitted()?;
        Ok(self.vectorize(text))
    }

    pub fn fit_transform<T>(&mut self, texts: &[T]) -> Result<Vec<Vec<f64>>>
    where
        T: AsRef<str>,
    {
        self.fit(texts);
        self.transform(texts)
    }

    fn ensure_fitted(&self) -> Result<()> {
        if self.fitted {
            Ok(())
        } else {
            Err(TemplaterError::NotFitted)
        }
    }

    fn vectorize(&self, text: &str) -> Vec<f64> {
        let freq = TokenFrequency::from_text(text);
        let mut vec = E::tf_idf_vec(&freq, |token| self.vocabulary.get_index_of(token), &self.idf);
        normalize_l2(&mut vec);
        vec
    }
}

/// 情報取得
impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine + Send + Sync,
{
    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    #[inline]
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    #[inline]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    #[inline]
    pub fn slot_of(&self, token: &str) -> Option<usize> {
        self.vocabulary.get_index_of(token)
    }

    #[inline]
    pub fn idf_of(&self, token: &str) -> Option<f64> {
        self.slot_of(token).map(|slot| self.idf[slot])
    }

    /// Vocabulary tokens in slot order
    #[inline]
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.iter().map(String::as_str)
    }

    /// Approximate heap footprint of the vocabulary and IDF table in bytes
    pub fn approx_size_bytes(&self) -> usize {
        let tokens: usize = self.vocabulary.iter().map(|t| t.len() + std::mem::size_of::<String>()).sum();
        tokens + self.idf.len() * std::mem::size_of::<f64>()
    }
}
