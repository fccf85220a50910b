//! Ordered set of processors run over each batch of items.

use super::{BundleFilter, EntityInfoProvider, HtmlFilter, Processor};
use crate::config::PipelineConfig;
use crate::error::ConfigError;
use crate::types::{FieldValue, IndexInfo, Item};

#[derive(Debug, Default)]
pub struct Pipeline {
    /// Sorted by ascending processor weight.
    processors: Vec<Box<dyn Processor>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a processor after every processor of lower or equal weight.
    pub fn push(&mut self, processor: Box<dyn Processor>) {
        let weight = processor.info().weight;
        let at = self
            .processors
            .partition_point(|p| p.info().weight <= weight);
        self.processors.insert(at, processor);
    }

    #[must_use]
    pub fn with(mut self, processor: Box<dyn Processor>) -> Self {
        self.push(processor);
        self
    }

    /// Builds the processors enabled in `config` that support `index`.
    pub fn from_config(
        config: &PipelineConfig,
        index: &IndexInfo,
        entities: &dyn EntityInfoProvider,
    ) -> Result<Self, ConfigError> {
        let mut pipeline = Self::new();

        if let Some(bundle_config) = &config.bundle_filter {
            if BundleFilter::supports_index(index, entities) {
                pipeline.push(Box::new(BundleFilter::new(bundle_config)));
            } else {
                tracing::info!(
                    "Skipping bundle filter: items of index '{}' have no bundles",
                    index.id
                );
            }
        }

        if let Some(html_config) = &config.html_filter {
            pipeline.push(Box::new(HtmlFilter::from_config(html_config)?));
        }

        tracing::info!(
            "Built processor pipeline for index '{}': [{}]",
            index.id,
            pipeline.processor_ids().join(", ")
        );
        Ok(pipeline)
    }

    pub fn processor_ids(&self) -> Vec<&'static str> {
        self.processors.iter().map(|p| p.info().id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Runs every processor over the batch, in weight order.
    pub fn preprocess_items(&self, items: &mut Vec<Item>) {
        for processor in &self.processors {
            processor.preprocess_items(items);
        }
    }

    /// Runs the field-level part of every processor over one value.
    pub fn process_field(&self, value: FieldValue) -> FieldValue {
        self.processors
            .iter()
            .fold(value, |value, processor| processor.process_field(value))
    }
}
