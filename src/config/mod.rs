//! Processor configuration: boost tables and the pipeline settings file.

pub mod info;
pub mod weights;

pub use info::{InfoEntry, InfoValue};
pub use weights::{DEFAULT_TAGS, DEFAULT_WEIGHT, EMPTY_ELEMENTS, TagWeights};

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Nesting depth past which opening tags stop opening new boost frames.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Highest accepted nesting depth. The boost scan recurses once per open
/// frame, so larger settings are lowered to this.
pub const MAX_DEPTH_LIMIT: usize = 1024;

/// Settings of the HTML filter step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HtmlFilterConfig {
    /// Index the contents of `title` attributes.
    pub title: bool,
    /// Index the alternative text of images.
    pub alt: bool,
    /// Boost table in `tag = weight` lines.
    pub tags: String,
    /// Nesting depth past which elements keep the enclosing boost. Capped at
    /// [`MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
}

impl Default for HtmlFilterConfig {
    fn default() -> Self {
        Self {
            title: false,
            alt: true,
            tags: DEFAULT_TAGS.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl HtmlFilterConfig {
    /// Validated boost table for these settings.
    pub fn tag_weights(&self) -> Result<TagWeights, ConfigError> {
        TagWeights::parse(&self.tags).map_err(ConfigError::from)
    }
}

/// Settings of the bundle filter step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleFilterConfig {
    /// `true` indexes everything except the selected bundles, `false` only
    /// the selected bundles.
    #[serde(default = "default_exclude")]
    pub default: bool,
    /// Selected bundle ids. Without a selection nothing is filtered.
    #[serde(default)]
    pub bundles: Option<Vec<String>>,
}

fn default_exclude() -> bool {
    true
}

/// Pipeline settings file. A step is enabled by the presence of its table.
///
/// ```toml
/// [html_filter]
/// title = true
/// tags = """
/// h1 = 5
/// strong = 2
/// """
///
/// [bundle_filter]
/// default = false
/// bundles = ["article"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub html_filter: Option<HtmlFilterConfig>,
    pub bundle_filter: Option<BundleFilterConfig>,
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
