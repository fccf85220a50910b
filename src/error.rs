//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for file-facing operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` at the file and CLI boundaries.
pub type Result<T> = anyhow::Result<T>;

/// A single rejected entry in a tag boost table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagWeightError {
    #[error("Boost value for tag <{tag}> can't be an array.")]
    Array { tag: String },
    #[error("Boost value for tag <{tag}> must be numeric.")]
    NotNumeric { tag: String, value: String },
    #[error("Boost value for tag <{tag}> must be non-negative.")]
    Negative { tag: String, value: String },
}

impl TagWeightError {
    /// Tag the error was reported for.
    pub fn tag(&self) -> &str {
        match self {
            Self::Array { tag } | Self::NotNumeric { tag, .. } | Self::Negative { tag, .. } => tag,
        }
    }
}

/// Every error found in one boost table, reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagWeightErrors(pub Vec<TagWeightError>);

impl TagWeightErrors {
    pub fn errors(&self) -> &[TagWeightError] {
        &self.0
    }
}

impl std::fmt::Display for TagWeightErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for TagWeightErrors {}

/// Error returned when building processors from configuration fails.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid tag boosts:\n{0}")]
    TagWeights(#[from] TagWeightErrors),
    #[error("failed to read configuration at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
