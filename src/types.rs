//! Item and field value types exchanged with the host indexing pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A run of plain text paired with its effective boost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFragment {
    /// Decoded plain text.
    pub text: String,
    /// Product of all enclosing tag weights.
    pub score: f64,
}

impl ScoredFragment {
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// Value of a single field as it moves through the processors.
///
/// Processors that only clean text keep a `Text` value; processors that
/// weight parts of the text turn it into `Tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Tokens(Vec<ScoredFragment>),
}

impl FieldValue {
    /// Joins the field back into one string, dropping scores.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Tokens(tokens) => tokens
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn as_tokens(&self) -> Option<&[ScoredFragment]> {
        match self {
            Self::Tokens(tokens) => Some(tokens),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Tokenized for free-text search.
    Fulltext,
    /// Stored as an exact-match value.
    String,
    Integer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub kind: FieldKind,
    pub value: FieldValue,
}

impl Field {
    pub fn fulltext(value: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Fulltext,
            value: FieldValue::Text(value.into()),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::String,
            value: FieldValue::Text(value.into()),
        }
    }
}

/// An entity prepared for indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    /// Bundle (sub-type) of the entity, when its type defines bundles.
    #[serde(default)]
    pub bundle: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, Field>,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bundle: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_bundle(mut self, bundle: impl Into<String>) -> Self {
        self.bundle = Some(bundle.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.insert(name.into(), field);
        self
    }
}

/// What the host knows about the index a pipeline is built for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexInfo {
    pub id: String,
    /// Entity type indexed, if the index holds entities.
    #[serde(default)]
    pub entity_type: Option<String>,
}
