use std::io::{Read, Write};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{Backend, ModelConfig};
use crate::error::Result;
use crate::index::SimilarityIndex;
use crate::model::TemplateModel;
use crate::vectorizer::{serde::VectorizerData, tfidf::TFIDFEngine};

/// Persisted model state.
///
/// Vectors only make sense next to the vocabulary and IDF table that produced
/// them, so everything is stored and restored as one record. The backend is
/// not part of it; it is chosen again at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelData {
    pub n_neighbors: usize,
    pub max_features: usize,
    pub vocabulary: IndexMap<String, usize>,
    pub idf: IndexMap<String, f64>,
    pub training_inputs: Vec<String>,
    pub training_outputs: Vec<String>,
    pub training_vectors: Vec<Vec<f64>>,
}

impl ModelData {
    /// Rebuild a trained model.
    ///
    /// Fails with `LengthMismatch` when inputs and outputs differ in length,
    /// `DimensionMismatch` when a vector is not as wide as the vocabulary and
    /// `InvalidModel` when vocabulary and IDF disagree. Nothing is truncated
    /// or padded.
    pub fn into_model<E>(self, backend: Backend) -> Result<TemplateModel<E>>
    where
        E: TFIDFEngine + Send + Sync,
    {
        let config = ModelConfig {
            n_neighbors: self.n_neighbors,
            max_features: self.max_features,
            backend,
        };
        config.validate()?;
        let vectorizer = VectorizerData {
            max_features: self.max_features,
            vocabulary: self.vocabulary,
            idf: self.idf,
        }
        .into_tf_idf_vectorizer::<E>()?;
        let index = SimilarityIndex::new(
            self.training_inputs,
            self.training_outputs,
            self.training_vectors,
            vectorizer.vocabulary_len(),
        )?;
        Ok(TemplateModel {
            config,
            vectorizer,
            index: Some(index),
        })
    }
}

impl<E> TemplateModel<E>
where
    E: TFIDFEngine + Send + Sync,
{
    /// Snapshot a trained model. Fails with `NotTrained` otherwise.
    pub fn to_data(&self) -> Result<ModelData> {
        let index = self.trained_index()?;
        let VectorizerData {
            max_features,
            vocabulary,
            idf,
        } = self.vectorizer.to_data()?;
        Ok(ModelData {
            n_neighbors: self.config.n_neighbors,
            max_features,
            vocabulary,
            idf,
            training_inputs: index.inputs().to_vec(),
            training_outputs: index.outputs().to_vec(),
            training_vectors: index.vectors().to_vec(),
        })
    }

    /// Write the model as CBOR
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        let data = self.to_data()?;
        serde_cbor::to_writer(writer, &data)?;
        info!(
            examples = data.training_inputs.len(),
            vocabulary = data.vocabulary.len(),
            "model saved"
        );
        Ok(())
    }

    /// Read a model written by [`save`](Self::save)
    pub fn load<R: Read>(reader: R, backend: Backend) -> Result<Self> {
        let data: ModelData = serde_cbor::from_reader(reader)?;
        let model = data.into_model(backend)?;
        info!(
            examples = model.index.as_ref().map_or(0, SimilarityIndex::len),
            vocabulary = model.vectorizer.vocabulary_len(),
            "model loaded"
        );
        Ok(model)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_cbor::to_vec(&self.to_data()?)?)
    }

    pub fn from_bytes(bytes: &[u8], backend: Backend) -> Result<Self> {
        let data: ModelData = serde_cbor::from_slice(bytes)?;
        data.into_model(backend)
    }
}
