//! Built-in delimiter-pair markdown annotator.
//!
//! Recognizes symmetric marker pairs (`**bold**`, `*italic*`, `~~strike~~`,
//! `` `code` ``) and emits [`MarkdownScope`]s for the span index. The rule
//! table is open: hosts can start from [`DelimiterAnnotator::empty`] and
//! register their own marker/template pairs.
//!
//! Matching is a single left-to-right pass. At each position the longest
//! matching marker wins, so `**` is never misread as two `*`. An opening
//! marker with no closing partner renders as plain text. A closing marker
//! found inside an outer span still participates, which is what makes
//! `**a *b* c**` nest.

use std::sync::Arc;

use tracing::warn;

use crate::span::{MarkdownAnnotator, MarkdownScope};

/// One marker/template pair.
#[derive(Debug, Clone)]
pub struct DelimiterRule {
    /// The marker text, used verbatim for both the opening and closing run.
    pub marker: String,
    /// Wrapping format template with a `{}` placeholder.
    pub template: Arc<str>,
}

/// Annotator over a fixed table of symmetric delimiter rules.
#[derive(Debug, Clone, Default)]
pub struct DelimiterAnnotator {
    // Sorted by marker length, longest first.
    rules: Vec<DelimiterRule>,
}

impl DelimiterAnnotator {
    /// Annotator with the stock rule table.
    #[must_use]
    pub fn new() -> Self {
        let mut annotator = Self::empty();
        annotator.rule("**", "<b>{}</b>");
        annotator.rule("~~", "<s>{}</s>");
        annotator.rule("*", "<i>{}</i>");
        annotator.rule("`", "<code>{}</code>");
        annotator
    }

    /// Annotator with no rules at all.
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a marker/template pair. Empty markers are ignored.
    pub fn rule(&mut self, marker: impl Into<String>, template: impl Into<Arc<str>>) -> &mut Self {
        let marker = marker.into();
        if marker.is_empty() {
            warn!("empty delimiter marker ignored");
            return self;
        }
        self.rules.push(DelimiterRule {
            marker,
            template: template.into(),
        });
        self.rules
            .sort_by(|a, b| b.marker.len().cmp(&a.marker.len()));
        self
    }

    /// The registered rules, longest marker first.
    #[must_use]
    pub fn rules(&self) -> &[DelimiterRule] {
        &self.rules
    }

    /// The longest rule whose marker matches at byte position `pos`.
    fn rule_at(&self, bytes: &[u8], pos: usize) -> Option<&DelimiterRule> {
        self.rules
            .iter()
            .find(|rule| bytes[pos..].starts_with(rule.marker.as_bytes()))
    }

    /// First position at or after `from` where exactly this marker matches.
    fn find_close(&self, bytes: &[u8], from: usize, marker: &str) -> Option<usize> {
        (from..bytes.len()).find(|&pos| {
            self.rule_at(bytes, pos)
                .is_some_and(|rule| rule.marker == marker)
        })
    }
}

impl MarkdownAnnotator for DelimiterAnnotator {
    fn annotate(&self, text: &str) -> Vec<MarkdownScope> {
        let bytes = text.as_bytes();
        let mut scopes = Vec::new();
        // Closing runs already paired with an earlier opener, so the scan
        // does not reopen them when it walks into a span's interior.
        let mut consumed_closings: Vec<(usize, usize)> = Vec::new();
        let mut pos = 0usize;

        while pos < bytes.len() {
            if let Some(&(_, len)) = consumed_closings.iter().find(|&&(at, _)| at == pos) {
                pos += len;
                continue;
            }
            let Some(rule) = self.rule_at(bytes, pos) else {
                pos += 1;
                continue;
            };
            let marker_len = rule.marker.len();
            match self.find_close(bytes, pos + marker_len, &rule.marker) {
                Some(close) => {
                    scopes.push(MarkdownScope {
                        start: pos + 1,
                        end: close + marker_len,
                        marker_len,
                        template: Arc::clone(&rule.template),
                    });
                    consumed_closings.push((close, marker_len));
                    // Step inside the span so nested markers still match.
                    pos += marker_len;
                }
                None => {
                    pos += marker_len;
                }
            }
        }

        scopes
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn annotate_never_panics(s in "\\PC{0,120}") {
            let _ = DelimiterAnnotator::new().annotate(&s);
        }

        #[test]
        fn scopes_are_ordered_and_contained(content in "[a-z ]{0,20}") {
            let text = format!("**{content}**");
            let scopes = DelimiterAnnotator::new().annotate(&text);
            for scope in scopes {
                prop_assert!(scope.start >= 1);
                prop_assert!(scope.end <= text.len());
                prop_assert!(scope.start + 2 * scope.marker_len - 1 <= scope.end);
            }
        }
    }
}
