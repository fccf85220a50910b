//! Index-time processing steps invoked by the host pipeline.

pub mod bundle_filter;
pub mod html_filter;
pub mod pipeline;

pub use bundle_filter::{BundleFilter, BundleInfo, EntityInfoProvider, EntityTypeInfo};
pub use html_filter::HtmlFilter;
pub use pipeline::Pipeline;

use crate::types::{FieldKind, FieldValue, Item, ScoredFragment};

/// Static description of a processor, shown by the host's admin UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Processors run in ascending weight order.
    pub weight: i32,
}

/// One step of item preprocessing.
///
/// Implementors either filter whole items (override
/// [`preprocess_items`](Processor::preprocess_items)) or transform fulltext
/// field values (override
/// [`process_field_value`](Processor::process_field_value)).
pub trait Processor: std::fmt::Debug + Send + Sync {
    fn info(&self) -> &ProcessorInfo;

    /// Runs the step over a batch of items about to be indexed.
    fn preprocess_items(&self, items: &mut Vec<Item>) {
        for item in items.iter_mut() {
            for field in item.fields.values_mut() {
                if field.kind != FieldKind::Fulltext {
                    continue;
                }
                let value = std::mem::replace(&mut field.value, FieldValue::Text(String::new()));
                field.value = self.process_field(value);
            }
        }
    }

    /// Applies [`process_field_value`](Processor::process_field_value) to a
    /// field, token by token if it was already split. Scores produced for a
    /// token are multiplied by that token's score.
    fn process_field(&self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::Text(text) => self.process_field_value(&text),
            FieldValue::Tokens(tokens) => {
                let mut out = Vec::with_capacity(tokens.len());
                for token in tokens {
                    match self.process_field_value(&token.text) {
                        FieldValue::Text(text) => out.push(ScoredFragment::new(text, token.score)),
                        FieldValue::Tokens(inner) => out.extend(
                            inner
                                .into_iter()
                                .map(|t| ScoredFragment::new(t.text, t.score * token.score)),
                        ),
                    }
                }
                FieldValue::Tokens(out)
            }
        }
    }

    /// Transforms a single text value. The default leaves it unchanged.
    fn process_field_value(&self, value: &str) -> FieldValue {
        FieldValue::Text(value.to_string())
    }
}
