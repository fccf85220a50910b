//! Pre-pass over raw markup: word separation, attribute extraction and tag
//! stripping.

use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

/// `title` attribute on any opening tag. Groups: tag head, quoted value
/// (double, single), tag tail.
static TITLE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<[-a-z_]+[^>]+)\btitle\s*=\s*(?:"([^"]+)"|'([^']+)')([^>]*>)"#)
        .expect("title attribute pattern")
});

/// Whole `<img>` tag carrying an `alt` attribute. Groups: quoted value
/// (double, single).
static IMG_ALT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]+\balt\s*=\s*(?:"([^"]+)"|'([^']+)')[^>]*>"#)
        .expect("img alt pattern")
});

/// Any `<img>` opening or closing tag.
static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?img\b[^>]*>").expect("img tag pattern"));

/// Markup removed by [`strip_tags`]: comments, declarations and processing
/// instructions, and element tags (group 1 is the tag name).
static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<[!?][^>]*>|</?([A-Za-z][-:_A-Za-z0-9]*)(?:\s[^>]*)?/?>")
        .expect("markup pattern")
});

/// Puts a space before every `<` and after every `>`, so text on either side
/// of a removed tag does not run together.
pub fn separate_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '<' => out.push_str(" <"),
            '>' => out.push_str("> "),
            _ => out.push(c),
        }
    }
    out
}

/// Moves the value of each `title` attribute out of its tag, right after it.
pub fn extract_titles(text: &str) -> String {
    TITLE_ATTR
        .replace_all(text, |caps: &Captures<'_>| {
            format!(
                "{} {} {} ",
                &caps[1],
                &caps[4],
                quoted_value(caps, 2, 3)
            )
        })
        .into_owned()
}

/// Replaces each `<img ... alt="VALUE">` with `<img>VALUE</img>`, so the
/// alternative text becomes the element's content.
///
/// Every other `img` tag (no `alt`, an empty one, or a stray `</img>`) is
/// removed, so the wrappers are the only `img` elements left.
pub fn extract_alts(text: &str) -> String {
    IMG_TAG
        .replace_all(text, |tag: &Captures<'_>| match IMG_ALT.captures(&tag[0]) {
            Some(caps) => format!(" <img>{}</img> ", quoted_value(&caps, 1, 2)),
            None => String::new(),
        })
        .into_owned()
}

/// Removes all markup except tags named in `allowed` (lower-case names).
///
/// A `<` that does not start a tag is left as text.
pub fn strip_tags(text: &str, allowed: &HashSet<String>) -> String {
    MARKUP
        .replace_all(text, |caps: &Captures<'_>| {
            let keep = caps
                .get(1)
                .is_some_and(|name| allowed.contains(&name.as_str().to_lowercase()));
            if keep {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

fn quoted_value<'t>(caps: &Captures<'t>, double: usize, single: usize) -> &'t str {
    caps.get(double)
        .or_else(|| caps.get(single))
        .map_or("", |m| m.as_str())
}
