use std::marker::PhantomData;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TemplaterError};
use crate::vectorizer::{tfidf::TFIDFEngine, TFIDFVectorizer};

/// Serializable form of a fitted `TFIDFVectorizer`.
///
/// The vocabulary is stored as token -> slot and the IDF table as
/// token -> weight. Use `into_tf_idf_vectorizer` to rebuild the vectorizer;
/// it checks that the two tables describe the same dense slot range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerData {
    pub max_features: usize,
    pub vocabulary: IndexMap<String, usize>,
    pub idf: IndexMap<String, f64>,
}

impl VectorizerData {
    /// `VectorizerData`から`TFIDFVectorizer`に変換します。
    pub fn into_tf_idf_vectorizer<E>(self) -> Result<TFIDFVectorizer<E>>
    where
        E: TFIDFEngine + Send + Sync,
    {
        let len = self.vocabulary.len();
        let mut by_slot: Vec<Option<(String, f64)>> = vec![None; len];
        for (token, slot) in self.vocabulary {
            if slot >= len {
                return Err(TemplaterError::InvalidModel(format!(
                    "slot {slot} of token {token:?} is outside vocabulary of size {len}"
                )));
            }
            if by_slot[slot].is_some() {
                return Err(TemplaterError::InvalidModel(format!("slot {slot} is assigned twice")));
            }
            let weight = *self.idf.get(&token).ok_or_else(|| {
                TemplaterError::InvalidModel(format!("token {token:?} has no idf weight"))
            })?;
            by_slot[slot] = Some((token, weight));
        }
        if self.idf.len() != len {
            return Err(TemplaterError::InvalidModel(format!(
                "idf table has {} entries for a vocabulary of {len}",
                self.idf.len()
            )));
        }

        let mut vocabulary = IndexSet::with_capacity(len);
        let mut idf = Vec::with_capacity(len);
        // every slot below len was filled exactly once above
        for (token, weight) in by_slot.into_iter().flatten() {
            vocabulary.insert(token);
            idf.push(weight);
        }
        Ok(TFIDFVectorizer {
            max_features: self.max_features,
            vocabulary,
            idf,
            fitted: true,
            _marker: PhantomData,
        })
    }
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine + Send + Sync,
{
    /// Snapshot the fitted state. Fails with `NotFitted` before `fit`.
    pub fn to_data(&self) -> Result<VectorizerData> {
        if !self.fitted {
            return Err(TemplaterError::NotFitted);
        }
        Ok(VectorizerData {
            max_features: self.max_features,
            vocabulary: self
                .vocabulary
                .iter()
                .enumerate()
                .map(|(slot, token)| (token.clone(), slot))
                .collect(),
            idf: self
                .vocabulary
                .iter()
                .zip(self.idf.iter())
                .map(|(token, &weight)| (token.clone(), weight))
                .collect(),
        })
    }
}
