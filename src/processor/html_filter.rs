//! Strips markup from fulltext fields and boosts text inside chosen elements.

use super::{Processor, ProcessorInfo};
use crate::config::HtmlFilterConfig;
use crate::error::ConfigError;
use crate::html::BoostTokenizer;
use crate::types::FieldValue;

pub const HTML_FILTER: ProcessorInfo = ProcessorInfo {
    id: "html_filter",
    name: "HTML filter",
    description: "Strips HTML tags from fulltext fields and decodes HTML entities. \
                  Text inside configured elements is boosted (or ignored, with a boost of 0).",
    weight: 10,
};

#[derive(Debug, Clone, Default)]
pub struct HtmlFilter {
    tokenizer: BoostTokenizer,
}

impl HtmlFilter {
    pub fn new(tokenizer: BoostTokenizer) -> Self {
        Self { tokenizer }
    }

    /// Builds the filter, rejecting invalid boost tables.
    pub fn from_config(config: &HtmlFilterConfig) -> Result<Self, ConfigError> {
        let tokenizer = BoostTokenizer::from_config(config).inspect_err(|e| {
            tracing::warn!("Rejected HTML filter configuration: {}", e);
        })?;
        Ok(Self::new(tokenizer))
    }

    pub fn tokenizer(&self) -> &BoostTokenizer {
        &self.tokenizer
    }
}

impl Processor for HtmlFilter {
    fn info(&self) -> &ProcessorInfo {
        &HTML_FILTER
    }

    fn process_field_value(&self, value: &str) -> FieldValue {
        self.tokenizer.tokenize(value)
    }
}
