pub mod serde;

use std::fmt::Display;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::{Backend, ModelConfig};
use crate::dataset::TrainingExample;
use crate::error::{Result, TemplaterError};
use crate::index::{hits::Hits, SimilarityIndex};
use crate::template::{adapt, generate_fallback, EXPECTED_SECTIONS, HEADING_MARKER, TASK_MARKER};
use crate::vectorizer::{
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    TFIDFVectorizer,
};

/// Best matches scoring below this fall back to the generic skeleton
pub const ACCEPTANCE_THRESHOLD: f64 = 0.1;

/// Summary returned by [`TemplateModel::train`]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub n_examples: usize,
    pub vocabulary_size: usize,
    pub backend: Backend,
}

impl Display for TrainReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "examples: {}, vocabulary: {}, backend: {}",
            self.n_examples, self.vocabulary_size, self.backend
        )
    }
}

/// Structural quality of predictions, see [`TemplateModel::evaluate`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalReport {
    /// fraction of predictions with a title, a description and a task list
    pub structural_accuracy: f64,
    /// fraction of expected section headers present, averaged over predictions
    pub avg_section_coverage: f64,
}

/// Nearest-template issue formatter.
///
/// Owns a TF-IDF vectorizer and, once trained, the similarity index over the
/// training examples. A model is an ordinary value: callers create, train,
/// share (read-only) and persist it explicitly.
///
/// # Examples
/// ```
/// use issue_templater::{ModelConfig, TemplateModel};
///
/// let mut model: TemplateModel = TemplateModel::new(ModelConfig::default()).unwrap();
/// model.train(
///     vec!["crash on login".to_string()],
///     vec!["## Bug Report: Crash On Login\n### Description\noriginal text\n### Proposed Tasks\n- [ ] task".to_string()],
/// ).unwrap();
/// let doc = model.predict("crash on login").unwrap();
/// assert!(doc.starts_with("## Bug Report: Crash On Login"));
/// ```
#[derive(Debug, Clone)]
pub struct TemplateModel<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine + Send + Sync,
{
    config: ModelConfig,
    vectorizer: TFIDFVectorizer<E>,
    index: Option<SimilarityIndex>,
}

impl<E> TemplateModel<E>
where
    E: TFIDFEngine + Send + Sync,
{
    /// Create an untrained model. The backend is fixed from here on.
    pub fn new(config: ModelConfig) -> Result<Self> {
        config.validate()?;
        debug!(backend = %config.backend, "model created");
        Ok(Self {
            vectorizer: TFIDFVectorizer::new(config.max_features),
            config,
            index: None,
        })
    }

    /// Fit the vectorizer on `inputs` and index the (input, output) pairs.
    ///
    /// Mismatched lengths fail with `LengthMismatch` before anything changes.
    /// Retraining replaces the previous state as a whole.
    pub fn train(&mut self, inputs: Vec<String>, outputs: Vec<String>) -> Result<TrainReport> {
        if inputs.len() != outputs.len() {
            return Err(TemplaterError::LengthMismatch {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        info!(examples = inputs.len(), "training");

        let mut vectorizer = TFIDFVectorizer::<E>::new(self.config.max_features);
        vectorizer.fit(&inputs);
        let vectors = if self.config.backend.is_parallel() {
            vectorizer.par_transform(&inputs)?
        } else {
            vectorizer.transform(&inputs)?
        };
        let index = SimilarityIndex::new(inputs, outputs, vectors, vectorizer.vocabulary_len())?;

        let report = TrainReport {
            n_examples: index.len(),
            vocabulary_size: vectorizer.vocabulary_len(),
            backend: self.config.backend,
        };
        self.vectorizer = vectorizer;
        self.index = Some(index);
        info!(%report, "training complete");
        Ok(report)
    }

    /// Train from dataset records
    pub fn train_examples(&mut self, examples: &[TrainingExample]) -> Result<TrainReport> {
        let (inputs, outputs) = examples
            .iter()
            .map(|ex| (ex.input.clone(), ex.output.clone()))
            .unzip();
        self.train(inputs, outputs)
    }

    /// Format raw input as a Markdown issue.
    ///
    /// Adapts the closest training output, or renders the generic skeleton
    /// when nothing scores at least [`ACCEPTANCE_THRESHOLD`].
    pub fn predict(&self, raw_input: &str) -> Result<String> {
        let index = self.trained_index()?;
        let hits = self.neighbors(raw_input)?;
        let template = hits
            .best()
            .filter(|hit| hit.score >= ACCEPTANCE_THRESHOLD)
            .and_then(|hit| index.output(hit.index).map(|output| (hit, output)));

        match template {
            Some((hit, output)) => {
                debug!(index = hit.index, score = hit.score, "adapting nearest template");
                Ok(adapt(raw_input, output))
            }
            None => {
                debug!(
                    best = hits.best().map(|h| h.score),
                    "no template above threshold, using fallback"
                );
                Ok(generate_fallback(raw_input))
            }
        }
    }

    /// Predict every input, keeping order
    pub fn predict_batch<T>(&self, raw_inputs: &[T]) -> Result<Vec<String>>
    where
        T: AsRef<str> + Sync,
    {
        if self.config.backend.is_parallel() {
            raw_inputs.par_iter().map(|raw| self.predict(raw.as_ref())).collect()
        } else {
            raw_inputs.iter().map(|raw| self.predict(raw.as_ref())).collect()
        }
    }

    /// Top-`n_neighbors` training examples for `raw_input`
    pub fn neighbors(&self, raw_input: &str) -> Result<Hits> {
        let index = self.trained_index()?;
        let query = self.vectorizer.transform_one(raw_input)?;
        index.search(&query, self.config.n_neighbors, self.config.backend)
    }

    /// Top-`k` training examples for an already vectorized query
    pub fn search(&self, query: &[f64], k: usize) -> Result<Hits> {
        self.trained_index()?.search(query, k, self.config.backend)
    }

    /// Structural checks of predictions on held-out inputs.
    ///
    /// `expected_outputs` only has to line up with `inputs`; predictions are
    /// scored on their shape, not compared text for text.
    pub fn evaluate<T>(&self, inputs: &[T], expected_outputs: &[T]) -> Result<EvalReport>
    where
        T: AsRef<str> + Sync,
    {
        self.trained_index()?;
        if inputs.len() != expected_outputs.len() {
            return Err(TemplaterError::LengthMismatch {
                inputs: inputs.len(),
                outputs: expected_outputs.len(),
            });
        }
        if inputs.is_empty() {
            return Ok(EvalReport {
                structural_accuracy: 0.0,
                avg_section_coverage: 0.0,
            });
        }

        let mut well_formed = 0usize;
        let mut sections_found = 0usize;
        for predicted in self.predict_batch(inputs)? {
            let has_title = predicted.starts_with(HEADING_MARKER);
            let has_description = predicted.contains("### Description");
            let has_tasks = predicted.contains("### Proposed Tasks") || predicted.contains(TASK_MARKER);
            if has_title && has_description && has_tasks {
                well_formed += 1;
            }
            sections_found += EXPECTED_SECTIONS
                .iter()
                .filter(|section| predicted.contains(&format!("### {section}")))
                .count();
        }

        let n = inputs.len() as f64;
        let report = EvalReport {
            structural_accuracy: well_formed as f64 / n,
            avg_section_coverage: sections_found as f64 / (n * EXPECTED_SECTIONS.len() as f64),
        };
        info!(
            structural_accuracy = report.structural_accuracy,
            avg_section_coverage = report.avg_section_coverage,
            "evaluation complete"
        );
        Ok(report)
    }

    fn trained_index(&self) -> Result<&SimilarityIndex> {
        self.index.as_ref().ok_or(TemplaterError::NotTrained)
    }
}

/// 情報取得
impl<E> TemplateModel<E>
where
    E: TFIDFEngine + Send + Sync,
{
    #[inline]
    pub fn is_trained(&self) -> bool {
        self.index.is_some()
    }

    #[inline]
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    #[inline]
    pub fn vectorizer(&self) -> &TFIDFVectorizer<E> {
        &self.vectorizer
    }

    #[inline]
    pub fn index(&self) -> Option<&SimilarityIndex> {
        self.index.as_ref()
    }

    /// Approximate in-memory size of the training data, vectors and vocabulary
    pub fn approx_size_bytes(&self) -> usize {
        self.vectorizer.approx_size_bytes() + self.index.as_ref().map_or(0, SimilarityIndex::approx_size_bytes)
    }
}
