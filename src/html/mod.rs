//! Boost-weighted HTML tokenizer.
//!
//! Markup is handled in two passes:
//!
//! 1. [`prepare`] separates words from tags, surfaces `title`/`alt` attribute
//!    text and strips every tag the boost table does not mention.
//! 2. The boost scan walks what is left, descending into each remaining
//!    element with its weight multiplied into the enclosing one, and emits a
//!    [`ScoredFragment`] for every run of text.
//!
//! ```text
//! <h1>Intro <strong>key</strong></h1> rest      h1 = 5, strong = 2
//!   → ("Intro", 5.0) ("key", 10.0) ("rest", 1.0)
//! ```

pub mod entities;
pub mod prepare;

pub use entities::decode_entities;
pub use prepare::{extract_alts, extract_titles, separate_tags, strip_tags};

use crate::config::{DEFAULT_MAX_DEPTH, HtmlFilterConfig, MAX_DEPTH_LIMIT, TagWeights};
use crate::error::ConfigError;
use crate::types::{FieldValue, ScoredFragment};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Synthetic element wrapping image alternative text.
const ALT_ELEMENT: &str = "img";

/// Element tag in prepared text. Groups: closing slash, name, self-closing
/// slash.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][-:_A-Za-z0-9]*)(?:\s[^>]*?)?(/?)>").expect("tag pattern")
});

/// Attribute and depth switches of the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Index `title` attribute values.
    pub title: bool,
    /// Index image `alt` text.
    pub alt: bool,
    /// Deepest element nesting that still opens a boost frame. Values above
    /// [`MAX_DEPTH_LIMIT`] are lowered to it.
    pub max_depth: usize,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: false,
            alt: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The element currently being scanned and the boost in effect inside it.
#[derive(Debug, Clone, Copy)]
struct Frame<'t> {
    /// `None` for the document root.
    tag: Option<&'t str>,
    weight: f64,
}

impl<'t> Frame<'t> {
    const ROOT: Self = Self {
        tag: None,
        weight: 1.0,
    };

    fn closes_on(&self, name: &str) -> bool {
        self.tag.is_some_and(|tag| tag.eq_ignore_ascii_case(name))
    }
}

/// Turns markup into weighted text fragments.
///
/// Holds no per-call state, so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct BoostTokenizer {
    weights: TagWeights,
    options: HtmlOptions,
    /// Tags that survive stripping.
    kept_tags: HashSet<String>,
}

impl BoostTokenizer {
    pub fn new(weights: TagWeights, mut options: HtmlOptions) -> Self {
        if options.max_depth > MAX_DEPTH_LIMIT {
            tracing::warn!(
                max_depth = options.max_depth,
                limit = MAX_DEPTH_LIMIT,
                "nesting limit too high, lowering it"
            );
            options.max_depth = MAX_DEPTH_LIMIT;
        }

        let mut kept_tags: HashSet<String> =
            weights.names().into_iter().map(str::to_string).collect();
        // `img` is void, so only the alt wrappers may open an element.
        if options.alt {
            kept_tags.insert(ALT_ELEMENT.to_string());
        } else {
            kept_tags.remove(ALT_ELEMENT);
        }
        Self {
            weights,
            options,
            kept_tags,
        }
    }

    pub fn from_config(config: &HtmlFilterConfig) -> Result<Self, ConfigError> {
        let options = HtmlOptions {
            title: config.title,
            alt: config.alt,
            max_depth: config.max_depth,
        };
        Ok(Self::new(config.tag_weights()?, options))
    }

    pub fn weights(&self) -> &TagWeights {
        &self.weights
    }

    pub fn options(&self) -> HtmlOptions {
        self.options
    }

    /// Tokenizes one field value.
    ///
    /// With an empty boost table the markup is only stripped and the decoded
    /// text comes back as [`FieldValue::Text`]; otherwise the result is the
    /// fragment list in document order.
    pub fn tokenize(&self, raw: &str) -> FieldValue {
        let mut text = separate_tags(raw);
        if self.options.title {
            text = extract_titles(&text);
        }
        if self.options.alt {
            text = extract_alts(&text);
        }

        if self.weights.is_empty() {
            let stripped = strip_tags(&text, &HashSet::new());
            return FieldValue::Text(decode_entities(&stripped).into_owned());
        }

        let text = strip_tags(&text, &self.kept_tags);
        FieldValue::Tokens(self.scan(&text))
    }

    /// Runs the boost scan over text whose tags were already filtered.
    pub fn scan(&self, text: &str) -> Vec<ScoredFragment> {
        let mut fragments = Vec::new();
        self.scan_frame(text, Frame::ROOT, 0, &mut fragments);
        tracing::trace!(fragments = fragments.len(), "scanned boosted text");
        fragments
    }

    /// Scans until the frame's closing tag or the end of input and returns
    /// the text after the closing tag.
    ///
    /// Elements opened past the depth limit get no frame of their own. Their
    /// names are kept in `skipped` so their closing tags are consumed there
    /// instead of ending this frame.
    fn scan_frame<'t>(
        &self,
        mut rest: &'t str,
        frame: Frame<'t>,
        depth: usize,
        out: &mut Vec<ScoredFragment>,
    ) -> &'t str {
        let mut skipped: Vec<&'t str> = Vec::new();
        while let Some(caps) = TAG.captures(rest) {
            let Some(whole) = caps.get(0) else { break };
            let closing = caps.get(1).is_some_and(|m| !m.is_empty());
            let self_closing = caps.get(3).is_some_and(|m| !m.is_empty());
            let name = caps.get(2).map_or("", |m| m.as_str());

            emit(&rest[..whole.start()], frame.weight, out);
            rest = &rest[whole.end()..];

            if closing {
                if let Some(i) = skipped.iter().rposition(|s| s.eq_ignore_ascii_case(name)) {
                    skipped.remove(i);
                    continue;
                }
                if frame.closes_on(name) {
                    return rest;
                }
                // Stray closing tag.
                continue;
            }
            if self_closing {
                continue;
            }
            if depth >= self.options.max_depth {
                if skipped.is_empty() {
                    tracing::debug!(
                        tag = name,
                        max_depth = self.options.max_depth,
                        "nesting limit reached, keeping enclosing boost"
                    );
                }
                skipped.push(name);
                continue;
            }

            let child = Frame {
                tag: Some(name),
                weight: frame.weight * self.weights.weight(name),
            };
            rest = self.scan_frame(rest, child, depth + 1, out);
        }

        emit(rest, frame.weight, out);
        ""
    }
}

impl Default for BoostTokenizer {
    fn default() -> Self {
        Self::new(TagWeights::default(), HtmlOptions::default())
    }
}

/// One-shot form of [`BoostTokenizer::tokenize`].
pub fn tokenize(raw: &str, weights: &TagWeights, title: bool, alt: bool) -> FieldValue {
    let options = HtmlOptions {
        title,
        alt,
        ..HtmlOptions::default()
    };
    BoostTokenizer::new(weights.clone(), options).tokenize(raw)
}

/// Pushes `text` as a fragment unless it is blank or suppressed.
fn emit(text: &str, weight: f64, out: &mut Vec<ScoredFragment>) {
    if weight == 0.0 {
        return;
    }
    let decoded = decode_entities(text);
    let trimmed = decoded.trim();
    if !trimmed.is_empty() {
        out.push(ScoredFragment::new(trimmed, weight));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn frag(text: &str, score: f64) -> ScoredFragment {
        ScoredFragment::new(text, score)
    }

    fn tokens(tokenizer: &BoostTokenizer, raw: &str) -> Vec<ScoredFragment> {
        match tokenizer.tokenize(raw) {
            FieldValue::Tokens(tokens) => tokens,
            FieldValue::Text(text) => panic!("expected tokens, got text {text:?}"),
        }
    }

    fn words(fragment: &ScoredFragment) -> Vec<&str> {
        fragment.text.split_whitespace().collect()
    }

    fn with_tags(source: &str) -> BoostTokenizer {
        BoostTokenizer::new(TagWeights::parse(source).unwrap(), HtmlOptions::default())
    }

    #[test]
    fn test_scan_nested_weights_multiply() {
        let tokenizer = with_tags("h1 = 5\nstrong = 2");
        let out = tokenizer.scan("<h1>Intro <strong>key</strong> end</h1> rest");
        check!(
            out == vec![
                frag("Intro", 5.0),
                frag("key", 10.0),
                frag("end", 5.0),
                frag("rest", 1.0),
            ]
        );
    }

    #[test]
    fn test_scan_zero_weight_suppresses_descendants() {
        let tokenizer = with_tags("nav = 0\nb = 3");
        let out = tokenizer.scan("a<nav>skip <b>this</b> too</nav>b");
        check!(out == vec![frag("a", 1.0), frag("b", 1.0)]);
    }

    #[test]
    fn test_scan_unmatched_open_runs_to_end() {
        let tokenizer = with_tags("em = 1.5");
        let out = tokenizer.scan("x <em>never closed");
        check!(out == vec![frag("x", 1.0), frag("never closed", 1.5)]);
    }

    #[test]
    fn test_scan_unmatched_zero_weight_open_drops_tail() {
        let tokenizer = with_tags("del = 0");
        check!(tokenizer.scan("kept <del>gone") == vec![frag("kept", 1.0)]);
    }

    #[test]
    fn test_scan_stray_close_inside_frame_is_ignored() {
        let tokenizer = with_tags("h1 = 5\nb = 2");
        let out = tokenizer.scan("<b>x</h1>y</b>z");
        check!(out == vec![frag("x", 2.0), frag("y", 2.0), frag("z", 1.0)]);
    }

    #[test]
    fn test_scan_close_matches_case_insensitively() {
        let tokenizer = with_tags("b = 2");
        check!(tokenizer.scan("<B>x</b>y") == vec![frag("x", 2.0), frag("y", 1.0)]);
    }

    #[test]
    fn test_scan_self_closing_opens_no_frame() {
        let tokenizer = with_tags("b = 2");
        check!(tokenizer.scan("a<b/>c") == vec![frag("a", 1.0), frag("c", 1.0)]);
    }

    #[test]
    fn test_scan_text_after_self_closing_keeps_boost() {
        let tokenizer = with_tags("h1 = 5\nb = 2");
        let out = tokenizer.scan("<h1>a<b/>c</h1> d");
        check!(out == vec![frag("a", 5.0), frag("c", 5.0), frag("d", 1.0)]);
    }

    #[test]
    fn test_scan_literal_angle_bracket_is_text() {
        let tokenizer = with_tags("b = 2");
        check!(tokenizer.scan("1 < 2 <b>yes</b>") == vec![frag("1 < 2", 1.0), frag("yes", 2.0)]);
    }

    #[test]
    fn test_depth_limit_keeps_enclosing_weight() {
        let options = HtmlOptions {
            max_depth: 2,
            ..HtmlOptions::default()
        };
        let tokenizer = BoostTokenizer::new(TagWeights::parse("b = 2").unwrap(), options);
        let out = tokenizer.scan("<b><b><b>deep</b></b></b>");
        check!(out == vec![frag("deep", 4.0)]);
    }

    #[test]
    fn test_close_past_depth_limit_keeps_frame_open() {
        let options = HtmlOptions {
            max_depth: 2,
            ..HtmlOptions::default()
        };
        let tokenizer = BoostTokenizer::new(TagWeights::parse("b = 2").unwrap(), options);
        let out = tokenizer.scan("<b><b><b>deep</b>after</b></b>tail");
        check!(out == vec![frag("deep", 4.0), frag("after", 4.0), frag("tail", 1.0)]);
    }

    #[test]
    fn test_mixed_closes_past_depth_limit() {
        let options = HtmlOptions {
            max_depth: 1,
            ..HtmlOptions::default()
        };
        let tokenizer = BoostTokenizer::new(TagWeights::parse("h1 = 5\nb = 2").unwrap(), options);
        let out = tokenizer.scan("<h1><b><i>x</B>y</h1>z");
        check!(out == vec![frag("x", 5.0), frag("y", 5.0), frag("z", 1.0)]);
    }

    #[test]
    fn test_max_depth_is_lowered_to_limit() {
        let options = HtmlOptions {
            max_depth: usize::MAX,
            ..HtmlOptions::default()
        };
        let tokenizer = BoostTokenizer::new(TagWeights::parse("b = 1").unwrap(), options);
        check!(tokenizer.options().max_depth == MAX_DEPTH_LIMIT);

        let raw = "<b>".repeat(100_000) + "deep";
        check!(tokenizer.scan(&raw) == vec![frag("deep", 1.0)]);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let tokenizer = with_tags("b = 1");
        let raw = "<b>".repeat(100_000) + "deep";
        let out = tokenizer.scan(&raw);
        check!(out == vec![frag("deep", 1.0)]);
    }

    #[test]
    fn test_tokenize_strips_unconfigured_tags() {
        let tokenizer = with_tags("h1 = 5");
        check!(tokens(&tokenizer, "<span>Y</span>") == vec![frag("Y", 1.0)]);
    }

    #[test]
    fn test_tokenize_decodes_fragment_entities() {
        let tokenizer = with_tags("b = 2");
        check!(
            tokens(&tokenizer, "Tom &amp; Jerry <b>&lt;3</b>")
                == vec![frag("Tom & Jerry", 1.0), frag("<3", 2.0)]
        );
    }

    #[test]
    fn test_tokenize_title_attribute() {
        let options = HtmlOptions {
            title: true,
            ..HtmlOptions::default()
        };
        let tokenizer = BoostTokenizer::new(TagWeights::default(), options);
        let out = tokens(&tokenizer, r#"<strong title="tip">bold</strong>"#);
        check!(out.len() == 1);
        check!(out[0].score == 2.0);
        check!(words(&out[0]) == vec!["tip", "bold"]);
    }

    #[rstest]
    #[case(r#"<a title="hi">link</a>"#, vec![frag("link", 1.0)])]
    #[case(r#"<a title='hi'>link</a>"#, vec![frag("link", 1.0)])]
    #[case(r#"<span TITLE="hi">link</span>"#, vec![frag("link", 1.0)])]
    #[case(r#"<strong title="hi">link</strong> x"#, vec![frag("link", 2.0), frag("x", 1.0)])]
    fn test_tokenize_title_off_by_default(
        #[case] raw: &str,
        #[case] expected: Vec<ScoredFragment>,
    ) {
        check!(tokens(&BoostTokenizer::default(), raw) == expected);
    }

    #[test]
    fn test_tokenize_alt_nested_in_boosted_element() {
        let out = tokens(
            &BoostTokenizer::default(),
            r#"<h2>Logo <img src="l.png" alt="ACME"></h2>"#,
        );
        check!(out == vec![frag("Logo", 3.0), frag("ACME", 3.0)]);
    }

    #[rstest]
    #[case(r#"<h1><img src="a.png">Title</h1> body"#, vec![frag("Title", 5.0), frag("body", 1.0)])]
    #[case(
        r#"<h1>Logo <img src="a.png" alt=""></h1> body text"#,
        vec![frag("Logo", 5.0), frag("body text", 1.0)]
    )]
    fn test_tokenize_img_without_alt_opens_no_element(
        #[case] raw: &str,
        #[case] expected: Vec<ScoredFragment>,
    ) {
        check!(tokens(&BoostTokenizer::default(), raw) == expected);
    }

    #[test]
    fn test_tokenize_text_after_kept_void_tag_in_heading() {
        let tokenizer = with_tags("h1 = 5\nimg = 2");
        let out = tokens(&tokenizer, r#"<h1>Logo <img src="a.png" alt="ACME"> <img src="b.png">name</h1> rest"#);
        check!(
            out == vec![
                frag("Logo", 5.0),
                frag("ACME", 10.0),
                frag("name", 5.0),
                frag("rest", 1.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_configured_img_without_alt_support() {
        let options = HtmlOptions {
            alt: false,
            ..HtmlOptions::default()
        };
        let tokenizer = BoostTokenizer::new(TagWeights::parse("h1 = 5\nimg = 2").unwrap(), options);
        let out = tokens(&tokenizer, r#"<h1><img src="a.png" alt="x">Title</h1> body"#);
        check!(out == vec![frag("Title", 5.0), frag("body", 1.0)]);
    }

    #[test]
    fn test_tokenize_alt_uses_configured_img_weight() {
        let tokenizer = with_tags("img = 0.5");
        let out = tokens(&tokenizer, r#"<img alt="small print">"#);
        check!(out == vec![frag("small print", 0.5)]);
    }

    #[test]
    fn test_tokenize_alt_disabled() {
        let options = HtmlOptions {
            alt: false,
            ..HtmlOptions::default()
        };
        let tokenizer = BoostTokenizer::new(TagWeights::default(), options);
        let out = tokens(&tokenizer, r#"a <img alt="cat"> b"#);
        check!(out.len() == 1);
        check!(words(&out[0]) == vec!["a", "b"]);
    }

    #[test]
    fn test_tokenize_empty_table_returns_text() {
        let tokenizer = BoostTokenizer::new(TagWeights::empty(), HtmlOptions::default());
        let value = tokenizer.tokenize(r#"<p>Hi <img alt="wave"> &amp; bye</p>"#);
        let FieldValue::Text(text) = value else {
            panic!("expected text");
        };
        check!(text.split_whitespace().collect::<Vec<_>>() == vec!["Hi", "wave", "&", "bye"]);
    }

    #[rstest]
    #[case("")]
    #[case("<")]
    #[case(">")]
    #[case("<<>>")]
    #[case("</b>")]
    #[case("<b")]
    #[case("&")]
    #[case("<img alt=\"\">")]
    #[case("<h1><h2><h3>")]
    #[case("日本 <b>🦀</b>")]
    fn test_tokenize_is_total(#[case] raw: &str) {
        let _ = BoostTokenizer::default().tokenize(raw);
    }
}
