use crate::vectorizer::{corpus::Corpus, token::TokenFrequency};

pub trait TFIDFEngine {
    /// IDFベクトルを生成するメソッド
    /// # Arguments
    /// * `corpus` - コーパス
    /// * `vocabulary` - vocabulary tokens in slot order
    /// # Returns
    /// * `Vec<f64>` - IDF weight per slot
    fn idf_vec<T>(corpus: &Corpus, vocabulary: &[T]) -> Vec<f64>
    where
        T: AsRef<str>;

    /// Raw (unnormalized) TF-IDF weights for one document.
    /// Tokens outside the vocabulary contribute nothing.
    /// # Arguments
    /// * `freq` - token counts of the document
    /// * `slot_of` - vocabulary lookup
    /// * `idf` - IDF weight per slot
    fn tf_idf_vec<F>(freq: &TokenFrequency, slot_of: F, idf: &[f64]) -> Vec<f64>
    where
        F: Fn(&str) -> Option<usize>;
}

/// デフォルトのTF-IDFエンジン
///
/// - IDF is smoothed: `ln((N + 1) / (df + 1)) + 1`, so it is always >= 1
/// - TF is the raw count
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    #[inline]
    pub fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((doc_num as f64 + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0
    }
}

impl TFIDFEngine for DefaultTFIDFEngine {
    fn idf_vec<T>(corpus: &Corpus, vocabulary: &[T]) -> Vec<f64>
    where
        T: AsRef<str>,
    {
        let doc_num = corpus.get_doc_num();
        vocabulary
            .iter()
            .map(|token| Self::idf(doc_num, corpus.get_doc_freq(token.as_ref())))
            .collect()
    }

    fn tf_idf_vec<F>(freq: &TokenFrequency, slot_of: F, idf: &[f64]) -> Vec<f64>
    where
        F: Fn(&str) -> Option<usize>,
    {
        let mut vec = vec![0.0; idf.len()];
        for (token, count) in freq.iter() {
            if let Some(slot) = slot_of(token) {
                vec[slot] = count as f64 * idf[slot];
            }
        }
        vec
    }
}
