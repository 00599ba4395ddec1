//! Engine settings, loadable from YAML.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimilarError};
use crate::fusion::DEFAULT_RRF_K;

/// Which catalog items are eligible as candidates for a reference item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolScope {
    /// Only items sharing the reference item's category
    #[default]
    SameCategory,
    /// Every item in the catalog
    Catalog,
}

/// Settings for [`crate::SimilarityEngine`].
///
/// ```yaml
/// rrf_k: 60
/// tag_delimiter: ","
/// text_delimiter: ", "
/// pool_scope: same_category
/// limit: 20
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimilarConfig {
    /// RRF smoothing constant (k=60 for recall-oriented fusion)
    pub rrf_k: f64,
    /// Delimiter between tags in a record's tag field
    pub tag_delimiter: String,
    /// Delimiter between ingredient tokens in a record's text field
    pub text_delimiter: String,
    /// Candidate pool scoping
    pub pool_scope: PoolScope,
    /// Maximum number of fused rows returned (None = all)
    pub limit: Option<usize>,
}

impl Default for SimilarConfig {
    fn default() -> Self {
        Self {
            rrf_k: DEFAULT_RRF_K,
            tag_delimiter: ",".to_string(),
            text_delimiter: ", ".to_string(),
            pool_scope: PoolScope::SameCategory,
            limit: None,
        }
    }
}

impl SimilarConfig {
    /// Parse and validate settings from YAML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::Yaml`] on a parse failure and
    /// [`SimilarError::InvalidConfig`] when a value is out of range.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::InvalidConfig`] for a negative or non-finite
    /// `rrf_k`, or an empty or all-whitespace delimiter.
    pub fn validate(&self) -> Result<()> {
        validate_rrf_k(self.rrf_k)?;
        for (name, delimiter) in [
            ("tag_delimiter", &self.tag_delimiter),
            ("text_delimiter", &self.text_delimiter),
        ] {
            if delimiter.trim().is_empty() {
                return Err(SimilarError::InvalidConfig(format!(
                    "{name} must not be empty or whitespace"
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_rrf_k(k: f64) -> Result<()> {
    if k.is_finite() && k >= 0.0 {
        Ok(())
    } else {
        Err(SimilarError::InvalidConfig(format!(
            "rrf_k must be finite and >= 0, got {k}"
        )))
    }
}
