use serde::{Deserialize, Serialize};

use crate::error::{Result, TemplaterError};

/// Execution backend for the row-wise loops (batch transform, index scoring).
///
/// `Accelerated` spreads rows over the rayon thread pool. Each row is still
/// computed sequentially, so scores and ordering do not depend on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Default,
    Accelerated,
}

impl Backend {
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Backend::Accelerated)
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Default => write!(f, "default"),
            Backend::Accelerated => write!(f, "accelerated"),
        }
    }
}

/// Model construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// number of neighbours ranked per prediction (only rank 0 is used for output)
    pub n_neighbors: usize,
    /// vocabulary size cap
    pub max_features: usize,
    pub backend: Backend,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_neighbors: 3,
            max_features: 500,
            backend: Backend::Default,
        }
    }
}

impl ModelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_neighbors(mut self, n_neighbors: usize) -> Self {
        self.n_neighbors = n_neighbors;
        self
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Parse a config from TOML text. Missing keys fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| TemplaterError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_neighbors == 0 {
            return Err(TemplaterError::InvalidConfig(
                "n_neighbors must be at least 1".to_string(),
            ));
        }
        if self.max_features == 0 {
            return Err(TemplaterError::InvalidConfig(
                "max_features must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ModelConfig::default();
        assert_eq!(config.n_neighbors, 3);
        assert_eq!(config.max_features, 500);
        assert_eq!(config.backend, Backend::Default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let config = ModelConfig::from_toml_str("max_features = 64\nbackend = \"accelerated\"\n").unwrap();
        assert_eq!(config.n_neighbors, 3);
        assert_eq!(config.max_features, 64);
        assert_eq!(config.backend, Backend::Accelerated);
    }

    #[test]
    fn zero_neighbors_is_rejected() {
        let err = ModelConfig::new().with_n_neighbors(0).validate().unwrap_err();
        assert!(matches!(err, TemplaterError::InvalidConfig(_)));
        assert!(ModelConfig::from_toml_str("max_features = 0").is_err());
    }
}
