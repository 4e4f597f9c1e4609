//! Visual elements and the grapheme-level element builder.
//!
//! Segmentation walks the raw string one grapheme cluster at a time and
//! emits at most one element per cluster: a [`LiteralElement`] for rendered
//! text, a [`SubstitutedElement`] when a replacement factory swallowed the
//! whole enclosing word, or nothing for clusters consumed by markup syntax
//! or by the tail of a substituted word. The emitted order always matches
//! left-to-right source order.

use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{trace, warn};
use unicode_segmentation::UnicodeSegmentation;

use glyphflow_core::{Font, VisualNode};

use crate::error::{Error, Result};
use crate::span::SpanIndex;
use crate::word::WordResolver;

/// Callback invoked when a hyperlink element is activated, receiving the
/// scope's visible content and its handler key.
pub type HyperHandler = Rc<dyn Fn(&str, &str)>;

/// A registered substitution for a whole matched word.
pub enum Replacement {
    /// Replace the word's rendered text with a fixed string.
    Text(String),
    /// Replace the word with a host visual node produced on demand.
    ///
    /// Yielding `None` violates the replacement contract and aborts the
    /// generation call with [`Error::ReplacementContract`].
    Factory(Rc<dyn Fn() -> Option<Box<dyn VisualNode>>>),
}

impl Replacement {
    /// Convenience constructor for a fixed-string replacement.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Convenience constructor for a node-factory replacement.
    pub fn factory(factory: impl Fn() -> Option<Box<dyn VisualNode>> + 'static) -> Self {
        Self::Factory(Rc::new(factory))
    }
}

impl std::fmt::Debug for Replacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of one produced element, used as the placement key in
/// layout results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

impl ElementId {
    fn next() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One rendered grapheme (or replaced word) with its styling metadata.
pub struct LiteralElement {
    id: ElementId,
    /// The rendered text: a single grapheme cluster, or the replacement
    /// string when a text replacement matched the enclosing word.
    pub text: String,
    /// The font requested for this generation pass.
    pub font: Font,
    /// Format templates to wrap the rendered text with, in order.
    pub formats: SmallVec<[Arc<str>; 2]>,
    /// Whether the host should render this as an interactive node.
    pub interactive: bool,
    /// Handler key of the covering hyperlink scope, if any.
    pub handler_key: Option<String>,
    /// Visible content of the covering hyperlink scope, if any.
    pub link_content: Option<String>,
    handler: Option<HyperHandler>,
    disposed: bool,
}

impl LiteralElement {
    /// Stable identity.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The text with every format template applied, innermost first.
    #[must_use]
    pub fn formatted(&self) -> String {
        self.formats
            .iter()
            .fold(self.text.clone(), |text, template| {
                template.replacen("{}", &text, 1)
            })
    }

    /// Invoke the wired hyperlink handler, if one was registered.
    pub fn activate(&self) {
        if let Some(handler) = &self.handler {
            handler(
                self.link_content.as_deref().unwrap_or(""),
                self.handler_key.as_deref().unwrap_or(""),
            );
        }
    }

    /// Whether a handler is wired to this element.
    #[must_use]
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Whether the element was disposed by a layout-context teardown.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub(crate) fn mark_disposed(&mut self) {
        self.disposed = true;
    }
}

impl std::fmt::Debug for LiteralElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiteralElement")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("formats", &self.formats)
            .field("interactive", &self.interactive)
            .field("handler_key", &self.handler_key)
            .field("has_handler", &self.handler.is_some())
            .field("disposed", &self.disposed)
            .finish()
    }
}

/// A factory-produced host node standing in for a whole matched word.
pub struct SubstitutedElement {
    id: ElementId,
    node: Box<dyn VisualNode>,
    /// Handler key of the covering hyperlink scope, if any.
    pub handler_key: Option<String>,
}

impl SubstitutedElement {
    /// Stable identity.
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The produced host node.
    #[must_use]
    pub fn node(&self) -> &dyn VisualNode {
        self.node.as_ref()
    }

    /// Mutable access to the produced host node.
    pub fn node_mut(&mut self) -> &mut dyn VisualNode {
        self.node.as_mut()
    }
}

impl std::fmt::Debug for SubstitutedElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubstitutedElement")
            .field("id", &self.id)
            .field("handler_key", &self.handler_key)
            .finish()
    }
}

/// One positioned, styled visual glyph-group.
#[derive(Debug)]
pub enum VisualElement {
    /// A rendered grapheme or replaced word.
    Literal(LiteralElement),
    /// A factory-produced host node.
    Substituted(SubstitutedElement),
}

impl VisualElement {
    /// Stable identity, shared with layout placements.
    #[must_use]
    pub fn id(&self) -> ElementId {
        match self {
            Self::Literal(literal) => literal.id,
            Self::Substituted(substituted) => substituted.id,
        }
    }

    /// Whether the element reacts to activation.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        match self {
            Self::Literal(literal) => literal.interactive,
            Self::Substituted(substituted) => substituted.handler_key.is_some(),
        }
    }

    /// The literal payload, when this is a literal.
    #[must_use]
    pub fn as_literal(&self) -> Option<&LiteralElement> {
        match self {
            Self::Literal(literal) => Some(literal),
            Self::Substituted(_) => None,
        }
    }

    /// The substituted payload, when this is a substitution.
    #[must_use]
    pub fn as_substituted(&self) -> Option<&SubstitutedElement> {
        match self {
            Self::Literal(_) => None,
            Self::Substituted(substituted) => Some(substituted),
        }
    }
}

/// Walk `text` grapheme by grapheme and emit the ordered element sequence.
///
/// Fatal only when a replacement factory violates its contract; undefined
/// handler keys degrade to inert elements with a `warn!` diagnostic.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_elements(
    text: &str,
    index: &SpanIndex,
    words: &WordResolver,
    replacements: &FxHashMap<String, Replacement>,
    handlers: &FxHashMap<String, HyperHandler>,
    font: Font,
    mut per_element: Option<&mut dyn FnMut(&VisualElement)>,
    force_interactive: bool,
) -> Result<Vec<VisualElement>> {
    let mut elements = Vec::new();

    for (byte_index, grapheme) in text.grapheme_indices(true) {
        let start = byte_index + 1;

        if index.is_syntax_offset(start) {
            continue;
        }

        let scope = index.scope_containing(start);
        let handler = scope.and_then(|scope| handlers.get(&scope.key)).cloned();
        if let Some(scope) = scope
            && handler.is_none()
        {
            warn!(key = %scope.key, "hyperlink handler not defined; element stays inert");
        }
        let formats = index.formats_containing(start);

        // Space clusters never trigger replacement, even though the word
        // table assigns them to no word anyway.
        let replacement = if grapheme == " " {
            None
        } else {
            words
                .word_at(start)
                .and_then(|(word, word_start)| {
                    replacements.get(word).map(|replacement| (word, word_start, replacement))
                })
        };

        if let Some((word, word_start, replacement)) = replacement {
            if start != word_start {
                // The word start already produced the substitution.
                continue;
            }
            let element = match replacement {
                Replacement::Text(replaced) => VisualElement::Literal(LiteralElement {
                    id: ElementId::next(),
                    text: replaced.clone(),
                    font,
                    formats,
                    interactive: scope.is_some() || force_interactive,
                    handler_key: scope.map(|scope| scope.key.clone()),
                    link_content: scope.map(|scope| scope.content.clone()),
                    handler,
                    disposed: false,
                }),
                Replacement::Factory(factory) => {
                    let Some(mut node) = factory() else {
                        return Err(Error::ReplacementContract {
                            keyword: word.to_string(),
                        });
                    };
                    node.set_font(font);
                    if let (Some(scope), Some(handler)) = (scope, handler) {
                        let content = scope.content.clone();
                        let key = scope.key.clone();
                        let wired =
                            node.on_activate(Box::new(move || handler(&content, &key)));
                        if !wired {
                            trace!(key = %scope.key, "replacement node refused activation wiring");
                        }
                    }
                    VisualElement::Substituted(SubstitutedElement {
                        id: ElementId::next(),
                        node,
                        handler_key: scope.map(|scope| scope.key.clone()),
                    })
                }
            };
            if let Some(callback) = per_element.as_mut() {
                callback(&element);
            }
            elements.push(element);
            continue;
        }

        let element = VisualElement::Literal(LiteralElement {
            id: ElementId::next(),
            text: grapheme.to_string(),
            font,
            formats,
            interactive: scope.is_some() || force_interactive,
            handler_key: scope.map(|scope| scope.key.clone()),
            link_content: scope.map(|scope| scope.content.clone()),
            handler,
            disposed: false,
        });
        if let Some(callback) = per_element.as_mut() {
            callback(&element);
        }
        elements.push(element);
    }

    Ok(elements)
}
