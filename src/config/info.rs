//! Reader for the line-oriented `key = value` boost table format.
//!
//! ```text
//! ; headings
//! [headings]
//! h1 = 5
//! h2 = "3"
//! ```
//!
//! Comment and section lines are accepted and skipped. Keys written with a
//! bracket suffix (`key[]`, `key[name]`) produce array entries, which the
//! boost table rejects.

/// Value side of one `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoValue {
    Scalar(String),
    /// The key carried a `[...]` suffix.
    Array,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoEntry {
    pub key: String,
    pub value: InfoValue,
}

/// Parses every assignment line in `source`, in order.
///
/// Lines that are neither comments, sections nor assignments are skipped.
/// When a key repeats, the later line wins.
pub fn parse(source: &str) -> Vec<InfoEntry> {
    let mut entries: Vec<InfoEntry> = Vec::new();

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('[') {
            continue;
        }
        let Some((raw_key, raw_value)) = line.split_once('=') else {
            continue;
        };
        let raw_key = raw_key.trim();
        if raw_key.is_empty() {
            continue;
        }

        let entry = match raw_key.split_once('[') {
            Some((base, _)) => InfoEntry {
                key: base.trim().to_string(),
                value: InfoValue::Array,
            },
            None => InfoEntry {
                key: raw_key.to_string(),
                value: InfoValue::Scalar(unquote(raw_value.trim()).to_string()),
            },
        };

        if let Some(existing) = entries.iter_mut().find(|e| e.key == entry.key) {
            *existing = entry;
        } else {
            entries.push(entry);
        }
    }

    entries
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
