//! Mention extraction from free text.
//!
//! A "mention" is a Markdown-style inline link `[label](target)` whose target
//! resolves to another document in the same export. Extraction is a small
//! scanner with an explicit grammar for reference spans vs plain text rather
//! than a single expression, so escaping and bracket nesting are handled (and
//! testable) in isolation from target normalization.

use std::collections::BTreeSet;

use percent_encoding::percent_decode_str;

/// Link targets starting with one of these are external and never mentions.
/// Matched case-insensitively. `capacities://` is the exporting application's
/// own internal URI scheme.
const EXCLUDED_SCHEMES: &[&str] = &["http://", "https://", "mailto:", "capacities://"];

/// Extension a normalized target must carry to count as a document reference.
pub const DOC_EXTENSION: &str = ".md";

/// One raw `[label](target)` occurrence, before target normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSpan<'a> {
    pub label: &'a str,
    pub target: &'a str,
}

/// Iterator over every inline link span in a text, in order of appearance.
///
/// Grammar: a span opens at an unescaped `[`, the label runs to the matching
/// `]` (brackets nest, `\[` `\]` `\(` `\)` escapes are skipped), and a `(`
/// must immediately follow; the target runs to the first unescaped `)`.
/// Anything that fails the grammar is plain text and scanning resumes one
/// byte past the candidate `[`.
#[derive(Debug, Clone)]
pub struct MentionScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> MentionScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        MentionScanner { text, pos: 0 }
    }

    /// Try to read a full link span with its label opening at `open`.
    /// Returns the span and the scan position just past its closing `)`.
    fn try_span(&self, open: usize) -> Option<(LinkSpan<'a>, usize)> {
        let bytes = self.text.as_bytes();
        let mut depth = 1usize;
        let mut i = open + 1;
        while i < bytes.len() && depth > 0 {
            match bytes[i] {
                b'\\' => i += 2,
                b'[' => {
                    depth += 1;
                    i += 1;
                }
                b']' => {
                    depth -= 1;
                    if depth > 0 {
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        }
        if depth > 0 || i >= bytes.len() {
            return None;
        }
        let label = &self.text[open + 1..i];
        if label.is_empty() {
            return None;
        }

        let paren = i + 1;
        if bytes.get(paren) != Some(&b'(') {
            return None;
        }
        let mut j = paren + 1;
        while j < bytes.len() && bytes[j] != b')' {
            if bytes[j] == b'\\' {
                j += 2;
            } else {
                j += 1;
            }
        }
        if j >= bytes.len() {
            return None;
        }
        let target = &self.text[paren + 1..j];
        if target.is_empty() {
            return None;
        }
        Some((LinkSpan { label, target }, j + 1))
    }
}

impl<'a> Iterator for MentionScanner<'a> {
    type Item = LinkSpan<'a>;

    fn next(&mut self) -> Option<LinkSpan<'a>> {
        let bytes = self.text.as_bytes();
        let mut i = self.pos;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'[' => {
                    if let Some((span, end)) = self.try_span(i) {
                        self.pos = end;
                        return Some(span);
                    }
                    i += 1;
                }
                _ => i += 1,
            }
        }
        self.pos = i;
        None
    }
}

/// Normalize a raw link target into a document identifier.
///
/// Surrounding whitespace is stripped, excluded schemes rejected, anchors and
/// query fragments discarded, directory prefixes dropped, and the remaining
/// file name percent-decoded. Targets without the document extension return
/// `None`.
pub fn normalize_target(raw: &str) -> Option<String> {
    let mut cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }
    let lowered = cleaned.to_ascii_lowercase();
    if EXCLUDED_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }
    for delimiter in ['#', '?'] {
        if let Some(idx) = cleaned.find(delimiter) {
            cleaned = &cleaned[..idx];
        }
    }
    let file_name = cleaned.rsplit('/').next().unwrap_or_default();
    if !file_name.to_ascii_lowercase().ends_with(DOC_EXTENSION) {
        return None;
    }
    Some(percent_decode_str(file_name).decode_utf8_lossy().into_owned())
}

/// Every qualifying mention occurrence in `text`, normalized, in order of
/// appearance. Repeats are included; the graph builder counts them into edge
/// weights.
pub fn scan_mentions(text: &str) -> impl Iterator<Item = String> + '_ {
    MentionScanner::new(text).filter_map(|span| normalize_target(span.target))
}

/// The ordered, deduplicated list of document identifiers referenced in
/// `text`. Pure function; empty input yields an empty list.
pub fn extract_mentions(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut mentions = Vec::new();
    for mention in scan_mentions(text) {
        if seen.insert(mention.clone()) {
            mentions.push(mention);
        }
    }
    mentions
}
