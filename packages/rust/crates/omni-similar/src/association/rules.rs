//! Rule rows: raw input shape, normalized form and the confidence-ordered table.

use std::collections::{BTreeSet, HashSet};

use serde::Deserialize;

use crate::error::{Result, SimilarError};

/// One side of a raw rule: whitespace-delimited text or a token list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RuleSide {
    /// `"milk bread"`
    Text(String),
    /// `["milk", "bread"]`
    Tokens(Vec<String>),
}

impl RuleSide {
    /// Tokens in first-seen order, deduplicated.
    fn normalize(self, field: &str) -> Result<Vec<String>> {
        let tokens: Vec<String> = match self {
            Self::Text(text) => text.split_whitespace().map(str::to_string).collect(),
            Self::Tokens(tokens) => tokens
                .into_iter()
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .collect(),
        };
        let mut seen = HashSet::with_capacity(tokens.len());
        let tokens: Vec<String> = tokens
            .into_iter()
            .filter(|token| seen.insert(token.clone()))
            .collect();
        if tokens.is_empty() {
            return Err(SimilarError::malformed(field, "no items"));
        }
        Ok(tokens)
    }
}

/// A rule row as supplied by the mining layer.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRule {
    /// Left-hand side
    #[serde(alias = "antecedent")]
    pub antecedents: RuleSide,
    /// Right-hand side
    #[serde(alias = "consequent")]
    pub consequents: RuleSide,
    /// Rule confidence in [0, 1]
    pub confidence: f64,
}

impl RawRule {
    /// Decode an untyped JSON row.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::MalformedInput`] for a missing field or a side
    /// that is neither a string nor a list of strings.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| SimilarError::malformed("rule", e.to_string()))
    }
}

/// A normalized rule: set-typed sides and a validated confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    antecedent: BTreeSet<String>,
    consequent: Vec<String>,
    confidence: f64,
}

impl Rule {
    /// Build a rule from already-split sides.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::MalformedInput`] for an empty side or a
    /// confidence outside [0, 1].
    pub fn new(
        antecedent: impl IntoIterator<Item = impl Into<String>>,
        consequent: impl IntoIterator<Item = impl Into<String>>,
        confidence: f64,
    ) -> Result<Self> {
        Self::try_from(RawRule {
            antecedents: RuleSide::Tokens(antecedent.into_iter().map(Into::into).collect()),
            consequents: RuleSide::Tokens(consequent.into_iter().map(Into::into).collect()),
            confidence,
        })
    }

    /// True when `item` is in the antecedent.
    #[must_use]
    pub fn applies_to(&self, item: &str) -> bool {
        self.antecedent.contains(item)
    }

    /// Antecedent items.
    #[must_use]
    pub fn antecedent(&self) -> &BTreeSet<String> {
        &self.antecedent
    }

    /// Consequent items in first-seen order.
    #[must_use]
    pub fn consequent(&self) -> &[String] {
        &self.consequent
    }

    /// Confidence in [0, 1].
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

impl TryFrom<RawRule> for Rule {
    type Error = SimilarError;

    fn try_from(raw: RawRule) -> Result<Self> {
        if !(raw.confidence.is_finite() && (0.0..=1.0).contains(&raw.confidence)) {
            return Err(SimilarError::malformed(
                "confidence",
                format!("expected a value in [0, 1], got {}", raw.confidence),
            ));
        }
        Ok(Self {
            antecedent: raw.antecedents.normalize("antecedents")?.into_iter().collect(),
            consequent: raw.consequents.normalize("consequents")?,
            confidence: raw.confidence,
        })
    }
}

/// Rules ordered by confidence descending; equal confidences keep input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Order `rules` by confidence (stable).
    #[must_use]
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Self { rules }
    }

    /// Normalize untyped JSON rows, failing on the first bad row.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::MalformedInput`] naming the row index.
    pub fn from_values(values: &[serde_json::Value]) -> Result<Self> {
        let raw = values
            .iter()
            .enumerate()
            .map(|(row, value)| RawRule::from_value(value).map_err(|e| e.at_row(row)))
            .collect::<Result<Vec<_>>>()?;
        normalize_rules(raw)
    }

    /// Rules at or above `threshold`, order preserved.
    #[must_use]
    pub fn with_min_confidence(&self, threshold: f64) -> Self {
        Self {
            rules: self
                .rules
                .iter()
                .filter(|rule| rule.confidence >= threshold)
                .cloned()
                .collect(),
        }
    }

    /// Rules in traversal order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Normalize raw rows into a confidence-ordered [`RuleTable`].
///
/// # Errors
///
/// Returns [`SimilarError::MalformedInput`] naming the first bad row.
pub fn normalize_rules(raw: Vec<RawRule>) -> Result<RuleTable> {
    let rules = raw
        .into_iter()
        .enumerate()
        .map(|(row, rule)| Rule::try_from(rule).map_err(|e| e.at_row(row)))
        .collect::<Result<Vec<_>>>()?;
    log::debug!("normalize_rules: {} rules", rules.len());
    Ok(RuleTable::new(rules))
}
