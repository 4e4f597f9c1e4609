//! Span index: resolved markdown and hyperlink scopes for one string.
//!
//! All offsets here are 1-based inclusive byte offsets over the raw
//! string. Grapheme iteration in the element builder produces the same
//! kind of offset for each cluster's first byte, so containment queries
//! line up without any translation layer.
//!
//! Markdown scopes are consumed pre-resolved from an annotator; only the
//! hyperlink syntax `(label)[handler]` is scanned here.
//!
//! # Fail-fast scanning
//!
//! The hyperlink scanner halts for the remainder of the string on the
//! first rejected match (a bracket group with no adjacent parenthesis
//! group, or no bracket group at all). It does not resynchronize and does
//! not attempt partial recovery. This mirrors the system this library
//! replaces and is covered by tests as present behavior; see the
//! `halts_*` tests below before relying on anything after a malformed
//! span.

use std::sync::Arc;

use smallvec::SmallVec;
use tracing::trace;

/// One matched markdown span over the raw string.
///
/// `template` wraps the rendered text of every covered grapheme; `{}` marks
/// the insertion point (for example `"<b>{}</b>"`). Overlapping scopes all
/// apply, in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownScope {
    /// First byte of the span, 1-based inclusive (start of the opening marker).
    pub start: usize,
    /// Last byte of the span, 1-based inclusive (end of the closing marker).
    pub end: usize,
    /// Length in bytes of the opening and closing marker runs.
    pub marker_len: usize,
    /// Wrapping format template with a `{}` placeholder.
    pub template: Arc<str>,
}

/// One `(label)[handler]` span over the raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperlinkScope {
    /// The visible label between the parentheses.
    pub content: String,
    /// The handler key between the brackets; never rendered as text.
    pub key: String,
    /// Offset of the opening parenthesis, 1-based inclusive.
    pub start: usize,
    /// Offset of the last visible label byte. Equals `start` for an empty label.
    pub content_end: usize,
    /// Offset of the closing bracket, 1-based inclusive.
    pub end: usize,
}

/// Supplies pre-resolved markdown spans for a string.
///
/// The concrete grammar is the host's business; glyphflow only consumes
/// the resulting scope list. A built-in delimiter-pair annotator lives in
/// [`crate::annotate`] behind the `annotate` feature.
pub trait MarkdownAnnotator {
    /// Produce the ordered markdown scopes for `text`.
    fn annotate(&self, text: &str) -> Vec<MarkdownScope>;
}

/// Annotator that finds no markdown at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMarkdown;

impl MarkdownAnnotator for NoMarkdown {
    fn annotate(&self, _text: &str) -> Vec<MarkdownScope> {
        Vec::new()
    }
}

/// A fixed scope list is itself an annotator; handy for tests and for
/// hosts that annotate out of band.
impl MarkdownAnnotator for Vec<MarkdownScope> {
    fn annotate(&self, _text: &str) -> Vec<MarkdownScope> {
        self.clone()
    }
}

/// Resolved scopes for one input string, answering point queries.
#[derive(Debug, Clone, Default)]
pub struct SpanIndex {
    markdown: Vec<MarkdownScope>,
    hyperlinks: Vec<HyperlinkScope>,
}

impl SpanIndex {
    /// Build an index from pre-resolved markdown scopes plus a hyperlink
    /// scan of `text`.
    #[must_use]
    pub fn new(text: &str, markdown: Vec<MarkdownScope>) -> Self {
        Self {
            markdown,
            hyperlinks: scan_hyperlinks(text),
        }
    }

    /// The hyperlink scope covering `offset`, if any.
    ///
    /// Coverage spans the full syntax `[start, end]`; callers filter
    /// syntax offsets first via [`is_syntax_offset`](Self::is_syntax_offset).
    #[must_use]
    pub fn scope_containing(&self, offset: usize) -> Option<&HyperlinkScope> {
        self.hyperlinks
            .iter()
            .find(|scope| offset >= scope.start && offset <= scope.end)
    }

    /// The ordered format templates of every markdown scope covering `offset`.
    #[must_use]
    pub fn formats_containing(&self, offset: usize) -> SmallVec<[Arc<str>; 2]> {
        self.markdown
            .iter()
            .filter(|scope| offset >= scope.start && offset <= scope.end)
            .map(|scope| Arc::clone(&scope.template))
            .collect()
    }

    /// Whether `offset` falls on markup syntax rather than renderable text.
    ///
    /// True inside a markdown scope's opening or closing marker run, on a
    /// hyperlink's leading parenthesis, or anywhere after a hyperlink's
    /// visible label but still inside its full span.
    #[must_use]
    pub fn is_syntax_offset(&self, offset: usize) -> bool {
        let in_marker = self.markdown.iter().any(|scope| {
            let in_open = offset >= scope.start && offset < scope.start + scope.marker_len;
            let in_close = offset <= scope.end && offset + scope.marker_len > scope.end;
            in_open || in_close
        });
        if in_marker {
            return true;
        }
        self.hyperlinks.iter().any(|scope| {
            offset == scope.start || (offset > scope.content_end && offset <= scope.end)
        })
    }

    /// The resolved hyperlink scopes, in source order.
    #[must_use]
    pub fn hyperlinks(&self) -> &[HyperlinkScope] {
        &self.hyperlinks
    }

    /// The markdown scopes, in annotator order.
    #[must_use]
    pub fn markdown(&self) -> &[MarkdownScope] {
        &self.markdown
    }
}

/// Find the next balanced `open...close` group starting at or after `from`.
///
/// Returns 0-based byte indices of the opening and matching closing
/// delimiter. Only ASCII delimiters are used, so the indices always fall
/// on character boundaries.
fn find_balanced(bytes: &[u8], from: usize, open: u8, close: u8) -> Option<(usize, usize)> {
    let start = (from..bytes.len()).find(|&i| bytes[i] == open)?;
    let mut depth = 0usize;
    for (i, &byte) in bytes.iter().enumerate().skip(start) {
        if byte == open {
            depth += 1;
        } else if byte == close {
            depth -= 1;
            if depth == 0 {
                return Some((start, i));
            }
        }
    }
    None
}

/// Scan `text` for `(label)[handler]` spans.
///
/// A match is accepted only when a bracket group exists after the scan
/// point, a parenthesis group exists as well, and the byte immediately
/// preceding the bracket group is `)`. The first rejection halts the scan
/// for the remainder of the string.
#[must_use]
pub fn scan_hyperlinks(text: &str) -> Vec<HyperlinkScope> {
    let bytes = text.as_bytes();
    let mut scopes = Vec::new();
    let mut pos = 0usize;

    loop {
        let Some((bracket_start, bracket_end)) = find_balanced(bytes, pos, b'[', b']') else {
            break;
        };
        let Some((paren_start, paren_end)) = find_balanced(bytes, pos, b'(', b')') else {
            trace!(pos, "hyperlink scan halted: bracket group without parenthesis group");
            break;
        };
        if bracket_start == 0 || bytes[bracket_start - 1] != b')' {
            trace!(
                pos,
                bracket_start,
                "hyperlink scan halted: bracket group not adjacent to a parenthesis group"
            );
            break;
        }

        scopes.push(HyperlinkScope {
            content: text[paren_start + 1..paren_end].to_string(),
            key: text[bracket_start + 1..bracket_end].to_string(),
            start: paren_start + 1,
            content_end: paren_end,
            end: bracket_end + 1,
        });
        pos = bracket_end + 1;
    }

    scopes
}
