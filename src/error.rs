/// Errors raised by the vectorizer, the similarity index and the model.
#[derive(Debug, thiserror::Error)]
pub enum TemplaterError {
    #[error("vectorizer must be fitted before transform")]
    NotFitted,

    #[error("model must be trained before use")]
    NotTrained,

    #[error("vector dimension mismatch at row {row}: expected {expected}, found {found}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("length mismatch: {inputs} inputs but {outputs} outputs")]
    LengthMismatch { inputs: usize, outputs: usize },

    #[error("invalid model data: {0}")]
    InvalidModel(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("model codec error: {0}")]
    Codec(#[from] serde_cbor::Error),

    #[error("dataset error: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TemplaterError>;
