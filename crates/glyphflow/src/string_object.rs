//! The configured string object: registries plus the `generate` entry point.
//!
//! A [`StringObject`] owns the handler and replacement registries for one
//! configuration and turns raw markup strings into ordered
//! [`VisualElement`] sequences. Registries are append-only: re-registering
//! an existing key is rejected and leaves the registry untouched.
//!
//! # Example
//! ```
//! use glyphflow::{StringObject, StringConfig};
//! use glyphflow_core::Font;
//!
//! let mut strings = StringObject::new(StringConfig::default());
//! strings.define("greet", |content, key| {
//!     println!("pressed {content} via {key}");
//! }).unwrap();
//!
//! let elements = strings.generate("Hello (world)[greet]!", Font::new(1)).unwrap();
//! // H,e,l,l,o,space + w,o,r,l,d + ! -- the link syntax itself produces nothing.
//! assert_eq!(elements.len(), 12);
//! ```

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::warn;

use glyphflow_core::Font;

use crate::element::{HyperHandler, Replacement, VisualElement, build_elements};
use crate::error::{Error, Result};
use crate::span::{MarkdownAnnotator, NoMarkdown, SpanIndex};
use crate::word::WordResolver;

/// Configuration for a [`StringObject`].
#[derive(Debug, Clone, Copy)]
pub struct StringConfig {
    /// Whether the annotator runs at all. When false, generation treats
    /// the input as markdown-free and only hyperlink syntax applies.
    pub markdown_enabled: bool,
    /// Whether elements generated here are meant to be refit on resize.
    ///
    /// Generation itself is size-agnostic; this is a contract with the
    /// layout side. For non-responsive strings, lay out with
    /// [`LayoutConfig::pinned`](crate::flow::LayoutConfig::pinned) and skip
    /// [`bind_resize`](crate::flow::bind_resize).
    pub responsive_sizing: bool,
}

impl Default for StringConfig {
    fn default() -> Self {
        Self {
            markdown_enabled: true,
            responsive_sizing: true,
        }
    }
}

/// Per-generation options beyond the text and font.
#[derive(Default)]
pub struct GenerateOptions<'a> {
    /// Invoked with each element as it is appended, in order.
    pub per_element: Option<&'a mut dyn FnMut(&VisualElement)>,
    /// Render every literal as an interactive node even outside hyperlink
    /// scopes.
    pub force_interactive: bool,
}

impl std::fmt::Debug for GenerateOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateOptions")
            .field("has_per_element", &self.per_element.is_some())
            .field("force_interactive", &self.force_interactive)
            .finish()
    }
}

/// Owns the markup configuration and registries for one family of strings.
pub struct StringObject {
    config: StringConfig,
    annotator: Box<dyn MarkdownAnnotator>,
    handlers: FxHashMap<String, HyperHandler>,
    replacements: FxHashMap<String, Replacement>,
}

impl StringObject {
    /// Create a string object with the default annotator.
    ///
    /// With the `annotate` feature (default) that is the built-in
    /// delimiter-pair annotator; without it, no markdown is recognized.
    #[must_use]
    pub fn new(config: StringConfig) -> Self {
        #[cfg(feature = "annotate")]
        let annotator: Box<dyn MarkdownAnnotator> =
            Box::new(crate::annotate::DelimiterAnnotator::new());
        #[cfg(not(feature = "annotate"))]
        let annotator: Box<dyn MarkdownAnnotator> = Box::new(NoMarkdown);
        Self::with_annotator(config, annotator)
    }

    /// Create a string object with a host-supplied annotator.
    #[must_use]
    pub fn with_annotator(config: StringConfig, annotator: Box<dyn MarkdownAnnotator>) -> Self {
        Self {
            config,
            annotator,
            handlers: FxHashMap::default(),
            replacements: FxHashMap::default(),
        }
    }

    /// Register a hyperlink handler under `key`.
    ///
    /// The registry is append-only; defining the same key twice is rejected
    /// with the registry unchanged.
    pub fn define(
        &mut self,
        key: impl Into<String>,
        handler: impl Fn(&str, &str) + 'static,
    ) -> Result<()> {
        let key = key.into();
        if self.handlers.contains_key(&key) {
            warn!(key = %key, "duplicate handler definition rejected");
            return Err(Error::DuplicateHandler { key });
        }
        self.handlers.insert(key, Rc::new(handler));
        Ok(())
    }

    /// Register a replacement for an exact, case-sensitive keyword.
    ///
    /// Append-only like [`define`](Self::define).
    pub fn replace(&mut self, keyword: impl Into<String>, replacement: Replacement) -> Result<()> {
        let keyword = keyword.into();
        if self.replacements.contains_key(&keyword) {
            warn!(keyword = %keyword, "duplicate replacement registration rejected");
            return Err(Error::DuplicateReplacement { keyword });
        }
        self.replacements.insert(keyword, replacement);
        Ok(())
    }

    /// Segment `text` into its ordered element sequence.
    pub fn generate(&self, text: &str, font: Font) -> Result<Vec<VisualElement>> {
        self.generate_with(text, font, GenerateOptions::default())
    }

    /// Segment `text` with a per-element callback and/or forced interactivity.
    pub fn generate_with(
        &self,
        text: &str,
        font: Font,
        options: GenerateOptions<'_>,
    ) -> Result<Vec<VisualElement>> {
        let markdown = if self.config.markdown_enabled {
            self.annotator.annotate(text)
        } else {
            NoMarkdown.annotate(text)
        };
        let index = SpanIndex::new(text, markdown);
        let words = WordResolver::new(text);
        build_elements(
            text,
            &index,
            &words,
            &self.replacements,
            &self.handlers,
            font,
            options.per_element,
            options.force_interactive,
        )
    }

    /// Whether a handler is defined for `key`.
    #[must_use]
    pub fn has_handler(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    /// Whether a replacement is registered for `keyword`.
    #[must_use]
    pub fn has_replacement(&self, keyword: &str) -> bool {
        self.replacements.contains_key(keyword)
    }

    /// The configuration this object was created with.
    #[must_use]
    pub fn config(&self) -> StringConfig {
        self.config
    }
}

impl std::fmt::Debug for StringObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringObject")
            .field("config", &self.config)
            .field("handlers", &self.handlers.len())
            .field("replacements", &self.replacements.len())
            .finish()
    }
}
