//! Tag boost table: which elements raise or suppress the weight of their text.

use super::info::{self, InfoValue};
use crate::error::{TagWeightError, TagWeightErrors};
use ahash::AHashMap;

/// Weight applied to text inside elements the table does not mention.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Elements that never carry text. Boosting them is meaningless, so they are
/// dropped from every table.
pub const EMPTY_ELEMENTS: &[&str] = &["br", "hr"];

/// Source text of the table used when none is configured.
pub const DEFAULT_TAGS: &str = "h1 = 5\nh2 = 3\nh3 = 2\nstrong = 2\nb = 2\nem = 1.5\nu = 1.5";

/// Validated mapping from lower-cased tag name to boost.
///
/// A weight of zero suppresses the text of the element and everything
/// nested in it.
#[derive(Debug, Clone, PartialEq)]
pub struct TagWeights {
    weights: AHashMap<String, f64>,
}

impl TagWeights {
    /// A table with no entries. Tokenizing with it yields plain text.
    pub fn empty() -> Self {
        Self {
            weights: AHashMap::new(),
        }
    }

    /// Parses and validates a boost table, failing with every error found.
    pub fn parse(source: &str) -> Result<Self, TagWeightErrors> {
        let mut weights = AHashMap::new();
        let mut errors = Vec::new();

        for entry in info::parse(source) {
            match check_entry(&entry.key, &entry.value) {
                Ok(weight) => {
                    weights.insert(entry.key.to_lowercase(), weight);
                }
                Err(error) => errors.push(error),
            }
        }

        if !errors.is_empty() {
            return Err(TagWeightErrors(errors));
        }

        for name in EMPTY_ELEMENTS {
            weights.remove(*name);
        }
        Ok(Self { weights })
    }

    /// Collects the errors [`TagWeights::parse`] would report, without
    /// building the table.
    pub fn validate(source: &str) -> Vec<TagWeightError> {
        match Self::parse(source) {
            Ok(_) => Vec::new(),
            Err(TagWeightErrors(errors)) => errors,
        }
    }

    /// Builds a table from already-checked pairs. Negative and non-finite
    /// weights are clamped to zero.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut weights: AHashMap<String, f64> = pairs
            .into_iter()
            .map(|(tag, weight)| {
                let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
                (tag.to_lowercase(), weight)
            })
            .collect();
        for name in EMPTY_ELEMENTS {
            weights.remove(*name);
        }
        Self { weights }
    }

    /// Boost for `tag`, or [`DEFAULT_WEIGHT`] when the tag is not listed.
    pub fn weight(&self, tag: &str) -> f64 {
        self.lookup(tag).unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.lookup(tag).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Configured tag names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.weights.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn lookup(&self, tag: &str) -> Option<f64> {
        if let Some(weight) = self.weights.get(tag) {
            return Some(*weight);
        }
        self.weights.get(&tag.to_lowercase()).copied()
    }
}

impl Default for TagWeights {
    fn default() -> Self {
        Self::from_pairs([
            ("h1", 5.0),
            ("h2", 3.0),
            ("h3", 2.0),
            ("strong", 2.0),
            ("b", 2.0),
            ("em", 1.5),
            ("u", 1.5),
        ])
    }
}

fn check_entry(tag: &str, value: &InfoValue) -> Result<f64, TagWeightError> {
    let raw = match value {
        InfoValue::Array => {
            return Err(TagWeightError::Array {
                tag: tag.to_string(),
            });
        }
        InfoValue::Scalar(raw) => raw,
    };

    let weight = parse_number(raw).ok_or_else(|| TagWeightError::NotNumeric {
        tag: tag.to_string(),
        value: raw.clone(),
    })?;

    if weight < 0.0 {
        return Err(TagWeightError::Negative {
            tag: tag.to_string(),
            value: raw.clone(),
        });
    }
    Ok(weight)
}

/// Decimal and exponent notation only; `inf` and `NaN` are not numbers here.
fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || (raw.chars().any(char::is_alphabetic) && !is_exponent_form(raw)) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|w| w.is_finite())
}

fn is_exponent_form(raw: &str) -> bool {
    raw.chars()
        .filter(|c| c.is_alphabetic())
        .all(|c| c == 'e' || c == 'E')
}
