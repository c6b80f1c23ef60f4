pub mod hits;

use rayon::prelude::*;

use crate::config::Backend;
use crate::error::{Result, TemplaterError};
use crate::index::hits::{HitEntry, Hits};
use crate::utils::math::vector::dot;

/// Nearest-neighbour index over the training set.
///
/// Sole owner of the training pairs and their term-weight vectors. The three
/// lists always have the same length; every constructor checks it.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityIndex {
    inputs: Vec<String>,
    outputs: Vec<String>,
    vectors: Vec<Vec<f64>>,
    /// width every vector must have (vocabulary size)
    dim: usize,
}

impl SimilarityIndex {
    /// Build an index from parallel lists.
    ///
    /// Fails with `LengthMismatch` if the lists differ in length and with
    /// `DimensionMismatch` if any vector is not `dim` wide.
    pub fn new(
        inputs: Vec<String>,
        outputs: Vec<String>,
        vectors: Vec<Vec<f64>>,
        dim: usize,
    ) -> Result<Self> {
        if inputs.len() != outputs.len() {
            return Err(TemplaterError::LengthMismatch {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        if vectors.len() != inputs.len() {
            return Err(TemplaterError::InvalidModel(format!(
                "{} training vectors for {} training examples",
                vectors.len(),
                inputs.len()
            )));
        }
        if let Some((row, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != dim) {
            return Err(TemplaterError::DimensionMismatch {
                row,
                expected: dim,
                found: v.len(),
            });
        }
        Ok(Self {
            inputs,
            outputs,
            vectors,
            dim,
        })
    }

    /// Rank training examples by cosine similarity to `query` and keep the top `k`.
    ///
    /// Vectors are unit length (or zero), so the dot product is the cosine.
    /// Equal scores rank the lower training index first.
    pub fn search(&self, query: &[f64], k: usize, backend: Backend) -> Result<Hits> {
        if query.len() != self.dim {
            return Err(TemplaterError::DimensionMismatch {
                row: 0,
                expected: self.dim,
                found: query.len(),
            });
        }
        let score = |(index, v): (usize, &Vec<f64>)| HitEntry {
            index,
            score: dot(query, v),
        };
        let list: Vec<HitEntry> = if backend.is_parallel() {
            self.vectors.par_iter().enumerate().map(score).collect()
        } else {
            self.vectors.iter().enumerate().map(score).collect()
        };
        let mut hits = Hits::new(list);
        hits.sort_by_score_desc().truncate(k);
        Ok(hits)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn input(&self, index: usize) -> Option<&str> {
        self.inputs.get(index).map(String::as_str)
    }

    #[inline]
    pub fn output(&self, index: usize) -> Option<&str> {
        self.outputs.get(index).map(String::as_str)
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn vectors(&self) -> &[Vec<f64>] {
        &self.vectors
    }

    /// Approximate heap footprint in bytes
    pub fn approx_size_bytes(&self) -> usize {
        let text: usize = self
            .inputs
            .iter()
            .chain(self.outputs.iter())
            .map(|s| s.len() + std::mem::size_of::<String>())
            .sum();
        text + self.vectors.len() * self.dim * std::mem::size_of::<f64>()
    }
}
