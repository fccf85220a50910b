//! HTML character reference decoding.

use quick_xml::escape::resolve_html5_entity;
use std::borrow::Cow;

/// Longest reference body considered (`&CounterClockwiseContourIntegral;`).
const MAX_REFERENCE_LEN: usize = 32;

/// Resolves named (`&amp;`, `&nbsp;`) and numeric (`&#39;`, `&#x27;`)
/// character references.
///
/// References that are unknown, unterminated or point at an invalid code
/// point are kept verbatim.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after
            .char_indices()
            .take(MAX_REFERENCE_LEN + 1)
            .find(|(_, c)| *c == ';')
            .and_then(|(end, _)| resolve(&after[..end]).map(|value| (value, end)));

        match decoded {
            Some((value, end)) => {
                out.push_str(&value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

fn resolve(body: &str) -> Option<Cow<'static, str>> {
    if let Some(number) = body.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        if code == 0 {
            return None;
        }
        return char::from_u32(code).map(|c| Cow::Owned(c.to_string()));
    }

    if body.is_empty() || !body.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    resolve_html5_entity(body).map(Cow::Borrowed)
}
