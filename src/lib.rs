//! Index-time processors for a search pipeline.
//!
//! The host owns storage, scheduling and index lifecycle; this crate supplies
//! the steps it runs over items before they are indexed:
//!
//! - [`processor::BundleFilter`] drops items by bundle.
//! - [`processor::HtmlFilter`] strips markup from fulltext fields and splits
//!   them into [`ScoredFragment`]s weighted by the elements that enclose them
//!   (see [`html::BoostTokenizer`]).

pub mod cli;
pub mod config;
pub mod error;
pub mod html;
pub mod processor;
pub mod tracing;
pub mod types;

pub use config::{HtmlFilterConfig, PipelineConfig, TagWeights};
pub use error::{ConfigError, TagWeightError, TagWeightErrors};
pub use html::{BoostTokenizer, HtmlOptions, tokenize};
pub use processor::{Pipeline, Processor};
pub use types::{Field, FieldKind, FieldValue, IndexInfo, Item, ScoredFragment};
