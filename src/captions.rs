//! Timed-text caption parsing.
//!
//! YouTube serves caption tracks as a small XML document:
//!
//! ```text
//! <transcript>
//!   <text start="0.24" dur="3.12">Hello &amp;amp; welcome</text>
//! </transcript>
//! ```
//!
//! Text bodies are entity-escaped twice (once for XML, once for HTML) and may
//! contain inline formatting tags. Each `<text>` element becomes one
//! [`TranscriptEntry`]; elements with no visible text are dropped.

use crate::transcript::{Transcript, TranscriptEntry};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static TEXT_ELEMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text\b([^>]*?)(?:/>|>(.*?)</text>)").unwrap());
static ATTRIBUTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z_][\w-]*)\s*=\s*"([^"]*)""#).unwrap());
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z]+);").unwrap());
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Parse a timed-text XML document into a transcript.
pub fn parse_timed_text(xml: &str) -> Transcript {
    let entries = TEXT_ELEMENT_REGEX
        .captures_iter(xml)
        .filter_map(|captures| {
            let attributes = captures.get(1).map_or("", |m| m.as_str());
            let body = captures.get(2).map_or("", |m| m.as_str());

            let text = clean_text(body);
            if text.is_empty() {
                return None;
            }

            Some(TranscriptEntry {
                text,
                start: attribute_seconds(attributes, "start"),
                duration: attribute_seconds(attributes, "dur"),
            })
        })
        .collect();

    Transcript::new(entries)
}

/// Read a non-negative seconds attribute; missing or malformed means zero.
fn attribute_seconds(attributes: &str, name: &str) -> f64 {
    ATTRIBUTE_REGEX
        .captures_iter(attributes)
        .find(|captures| &captures[1] == name)
        .and_then(|captures| captures[2].trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(0.0)
}

/// Decode both entity layers, strip inline tags, normalize whitespace and
/// apply Unicode NFC normalization.
fn clean_text(text: &str) -> String {
    let text = decode_html_entities(&decode_html_entities(text));
    let text = TAG_REGEX.replace_all(&text, "");
    let text = WHITESPACE_REGEX.replace_all(&text, " ");

    text.trim().nfc().collect()
}

/// Decode one layer of named and numeric character references.
fn decode_html_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |captures: &Captures| {
            let entity = &captures[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                }
            };

            decoded.map_or_else(|| captures[0].to_string(), |ch| ch.to_string())
        })
        .into_owned()
}
