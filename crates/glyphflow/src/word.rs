//! Word resolution: mapping an offset to its whitespace-delimited word.
//!
//! Words are delimited by single spaces; consecutive delimiters are not
//! coalesced, so two adjacent spaces enclose a valid zero-length word.
//! Ranges are 1-based inclusive byte offsets assigned sequentially, one
//! byte of gap (the space) between consecutive words. The space offsets
//! themselves belong to no word.

/// Word table for one raw string.
#[derive(Debug, Clone, Default)]
pub struct WordResolver {
    /// `(word, start)` pairs where `start` is a 1-based byte offset.
    words: Vec<(String, usize)>,
}

impl WordResolver {
    /// Split `text` on single-space boundaries.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut words = Vec::new();
        let mut cursor = 1usize;
        for word in text.split(' ') {
            words.push((word.to_string(), cursor));
            cursor += word.len() + 1;
        }
        Self { words }
    }

    /// The word whose inclusive range contains `offset`, with its start.
    ///
    /// Space offsets (and anything past the end of the string) return
    /// `None`; zero-length words occupy an empty range and therefore never
    /// match.
    #[must_use]
    pub fn word_at(&self, offset: usize) -> Option<(&str, usize)> {
        self.words
            .iter()
            .find(|(word, start)| offset >= *start && offset < start + word.len())
            .map(|(word, start)| (word.as_str(), *start))
    }

    /// Number of words, counting zero-length ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the table holds no words at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn word_starts_resolve_to_their_word(parts in proptest::collection::vec("[a-z]{1,8}", 1..6)) {
            let text = parts.join(" ");
            let words = WordResolver::new(&text);
            let mut cursor = 1usize;
            for part in &parts {
                let resolved = words.word_at(cursor);
                prop_assert_eq!(resolved, Some((part.as_str(), cursor)));
                cursor += part.len() + 1;
            }
        }

        #[test]
        fn every_offset_resolves_consistently(text in "[a-z ]{0,60}") {
            let words = WordResolver::new(&text);
            for (i, byte) in text.bytes().enumerate() {
                let offset = i + 1;
                match words.word_at(offset) {
                    Some((word, start)) => {
                        prop_assert_ne!(byte, b' ');
                        let slice = &text[start - 1..start - 1 + word.len()];
                        prop_assert_eq!(word, slice);
                    }
                    None => prop_assert_eq!(byte, b' '),
                }
            }
        }
    }
}
