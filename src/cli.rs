//! Command-line front end: tokenize markup or check a boost table.

use crate::config::{HtmlFilterConfig, PipelineConfig, TagWeights};
use crate::error::Result;
use crate::html::BoostTokenizer;
use crate::types::FieldValue;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "search-processors")]
#[command(about = "Run search index processors over text", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Strip markup and print boosted text fragments
    Tokenize {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,
        /// Pipeline settings file; its [html_filter] table is used
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Boost table, one `tag = weight` per line (overrides the config)
        #[arg(short, long)]
        tags: Option<String>,
        /// Index title attributes
        #[arg(long)]
        title: bool,
        /// Do not index image alt text
        #[arg(long)]
        no_alt: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a boost table (`tag = weight` lines) or a pipeline settings file (.toml)
    Validate { file: PathBuf },
}

/// Executes `command`, reading input from `stdin` when no file is given.
pub fn run(command: Commands, stdin: &mut dyn Read, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Tokenize {
            file,
            config,
            tags,
            title,
            no_alt,
            json,
        } => {
            let mut settings = match config {
                Some(path) => load_html_config(&path)?,
                None => HtmlFilterConfig::default(),
            };
            if let Some(tags) = tags {
                settings.tags = tags;
            }
            settings.title |= title;
            settings.alt &= !no_alt;

            let tokenizer = BoostTokenizer::from_config(&settings)?;
            let input = read_input(file.as_deref(), stdin)?;
            let value = tokenizer.tokenize(&input);
            write_value(&value, json, out)
        }
        Commands::Validate { file } => validate(&file, out),
    }
}

fn load_html_config(path: &Path) -> Result<HtmlFilterConfig> {
    let config = PipelineConfig::load(path)?;
    Ok(config.html_filter.unwrap_or_else(|| {
        tracing::warn!(
            "{} has no [html_filter] table, using defaults",
            path.display()
        );
        HtmlFilterConfig::default()
    }))
}

fn read_input(file: Option<&Path>, stdin: &mut dyn Read) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input at {}", path.display())),
        None => {
            let mut input = String::new();
            stdin
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn write_value(value: &FieldValue, json: bool, out: &mut dyn Write) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, value).context("Failed to encode result")?;
        writeln!(out)?;
        return Ok(());
    }
    match value {
        FieldValue::Text(text) => writeln!(out, "{}", text)?,
        FieldValue::Tokens(tokens) => {
            for token in tokens {
                writeln!(out, "{}\t{}", token.score, token.text)?;
            }
        }
    }
    Ok(())
}

fn validate(path: &Path, out: &mut dyn Write) -> Result<()> {
    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let tags = if is_toml {
        PipelineConfig::load(path)?
            .html_filter
            .map(|html| html.tags)
            .unwrap_or_default()
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read boost table at {}", path.display()))?
    };

    let errors = TagWeights::validate(&tags);
    if errors.is_empty() {
        writeln!(out, "{}: ok", path.display())?;
        return Ok(());
    }
    for error in &errors {
        writeln!(out, "{}: {}", path.display(), error)?;
    }
    anyhow::bail!("{} invalid boost value(s) in {}", errors.len(), path.display())
}
