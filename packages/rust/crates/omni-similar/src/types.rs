//! Catalog data model: identifiers, items, the catalog and candidate pools.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{PoolScope, SimilarConfig};
use crate::error::{Result, SimilarError};
use crate::tokenize::DelimitedTokenizer;

/// Opaque, stable item identifier. Ordered byte-wise for tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier as it arrives from a loader: text or integer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// String identifier
    Text(String),
    /// Integer identifier
    Number(i64),
}

impl From<RawId> for ItemId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => Self(text),
            RawId::Number(n) => Self(n.to_string()),
        }
    }
}

/// One catalog row as supplied by an external loader.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    /// Item identifier
    pub id: RawId,
    /// Display name
    pub name: String,
    /// Optional grouping used for pool scoping
    #[serde(default)]
    pub category: Option<String>,
    /// Delimiter-joined tags
    pub tags: String,
    /// Delimiter-joined ingredient tokens
    pub text: String,
}

/// A validated catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Optional grouping used for pool scoping
    pub category: Option<String>,
    /// Deduplicated tag set (case-sensitive)
    pub tags: HashSet<String>,
    /// Ingredient tokens in field order
    pub text: Vec<String>,
    /// Tag field as supplied, kept for display
    pub raw_tags: String,
    /// Text field as supplied, kept for display
    pub raw_text: String,
}

impl Item {
    /// Build an item from already-split fields.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
        text: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        let text: Vec<String> = text.into_iter().map(Into::into).collect();
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            raw_tags: tags.join(", "),
            raw_text: text.join(", "),
            tags: tags.into_iter().collect(),
            text,
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Validate a loader record and split its fields.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::MalformedInput`] for an empty identifier.
    pub fn from_record(record: CatalogRecord, config: &SimilarConfig) -> Result<Self> {
        let id = ItemId::from(record.id);
        if id.as_str().trim().is_empty() {
            return Err(SimilarError::malformed("id", "identifier is empty"));
        }
        let tags = DelimitedTokenizer::new(config.tag_delimiter.as_str()).token_set(&record.tags);
        let text = DelimitedTokenizer::new(config.text_delimiter.as_str()).tokens(&record.text);
        Ok(Self {
            id,
            name: record.name,
            category: record.category,
            tags,
            text,
            raw_tags: record.tags,
            raw_text: record.text,
        })
    }

    /// Validate an untyped JSON row.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::MalformedInput`] when a field is missing or has
    /// the wrong type (e.g. a non-string `tags`).
    pub fn from_value(value: &serde_json::Value, config: &SimilarConfig) -> Result<Self> {
        let record = CatalogRecord::deserialize(value)
            .map_err(|e| SimilarError::malformed("record", e.to_string()))?;
        Self::from_record(record, config)
    }
}

fn check_unique<'a>(ids: impl IntoIterator<Item = &'a ItemId>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SimilarError::DuplicateIdentifier(id.to_string()));
        }
    }
    Ok(())
}

/// The full immutable item collection a search runs against.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::DuplicateIdentifier`] if two items share an id.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        check_unique(items.iter().map(|item| &item.id))?;
        let index = items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id.clone(), pos))
            .collect();
        Ok(Self { items, index })
    }

    /// Build a catalog from untyped JSON rows, failing on the first bad row.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::MalformedInput`] for a bad row (the field names
    /// the row index) or [`SimilarError::DuplicateIdentifier`].
    pub fn from_values(values: &[serde_json::Value], config: &SimilarConfig) -> Result<Self> {
        let items = values
            .iter()
            .enumerate()
            .map(|(row, value)| Item::from_value(value, config).map_err(|e| e.at_row(row)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(items)
    }

    /// Look up an item.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::UnknownIdentifier`] if `id` is not present.
    pub fn get(&self, id: &str) -> Result<&Item> {
        self.index
            .get(&ItemId::from(id))
            .map(|&pos| &self.items[pos])
            .ok_or_else(|| SimilarError::UnknownIdentifier(id.to_string()))
    }

    /// Items in load order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the catalog holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ordered candidates compared against one reference item.
///
/// Identifiers are unique and the reference item is never a member.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    items: Vec<Item>,
}

impl CandidatePool {
    /// Build a pool from explicit items.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::DuplicateIdentifier`] if two items share an id.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        check_unique(items.iter().map(|item| &item.id))?;
        Ok(Self { items })
    }

    /// Candidates for `reference` under `scope`, in catalog order, excluding
    /// the reference itself.
    #[must_use]
    pub fn scoped(catalog: &Catalog, reference: &Item, scope: PoolScope) -> Self {
        let items = catalog
            .items()
            .iter()
            .filter(|item| item.id != reference.id)
            .filter(|item| match scope {
                PoolScope::Catalog => true,
                PoolScope::SameCategory => item.category == reference.category,
            })
            .cloned()
            .collect();
        Self { items }
    }

    /// Candidates in pool order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Find a candidate by id.
    ///
    /// # Errors
    ///
    /// Returns [`SimilarError::UnknownIdentifier`] if `id` is not in the pool.
    pub fn position(&self, id: &str) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id.as_str() == id)
            .ok_or_else(|| SimilarError::UnknownIdentifier(id.to_string()))
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
