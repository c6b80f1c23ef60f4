/// This crate turns a short free-text problem description into a structured
/// Markdown issue by retrieving the most similar known example with a TF-IDF
/// vectorizer and reshaping that example around the new text.
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod error;
pub mod index;
pub mod model;
pub mod template;
pub mod utils;
pub mod vectorizer;

/// Template Model
/// The top-level struct of this crate.
///
/// Internally, it holds:
/// - A TF-IDF vectorizer (vocabulary + IDF table)
/// - A similarity index over the training (input, output) pairs
///
/// `predict` vectorizes raw text, finds the nearest training input by cosine
/// similarity, and adapts that example's output; when nothing scores at least
/// `ACCEPTANCE_THRESHOLD` a generic skeleton is produced instead.
///
/// # Serialization
/// Supported through `ModelData` (CBOR via `save` / `load`).
pub use model::{EvalReport, TemplateModel, TrainReport, ACCEPTANCE_THRESHOLD};

/// Model Data Structure for Serialization
/// Holds `n_neighbors`, `max_features`, the vocabulary, the IDF table and the
/// training lists as one unit. Converting back validates every invariant.
pub use model::serde::ModelData;

/// Model construction parameters and execution backend
pub use config::{Backend, ModelConfig};

/// Crate error type
pub use error::{Result, TemplaterError};

/// TF-IDF Vectorizer
/// Builds a fixed vocabulary and smoothed IDF weights at fit time, then turns
/// text into dense L2-normalized term-weight vectors.
pub use vectorizer::TFIDFVectorizer;

/// TF IDF Calculation Engine Trait
/// Plug a different weighting scheme into `TFIDFVectorizer<E>`.
/// `DefaultTFIDFEngine` uses raw counts and `ln((N+1)/(df+1)) + 1`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Token Frequency structure
pub use vectorizer::token::{tokenize, TokenFrequency};

/// Similarity index and search results
/// - `Hits`: ranked list of matches
/// - `HitEntry`: training index and score
pub use index::{
    hits::{HitEntry, Hits},
    SimilarityIndex,
};

/// Keyword heuristic categories
pub use classifier::{classify, IssueCategory};

/// Training records
pub use dataset::TrainingExample;
