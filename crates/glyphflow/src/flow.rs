//! Responsive flow layout over ordered render groups.
//!
//! A [`LayoutContext`] owns a caller-managed ordered collection of named
//! groups, each holding an element sequence plus the font to lay it out
//! in. Every [`update`](LayoutContext::update) recomputes the whole layout
//! from scratch: per group the fit solver picks the font size, then
//! elements flow left to right with wraparound on overflow or embedded
//! newlines, and non-text elements occupy fixed boxes on the current line.
//! Re-running with unchanged inputs yields identical placements; there is
//! no incremental patching of prior passes.
//!
//! Line advance uses one benchmark font for every group, so paragraphs
//! mixing fonts stay vertically aligned.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use glyphflow_core::{
    Container, FONT_SIZE_MAX, Font, MeasureOracle, Point, ResizeSource, Size, Subscription,
};

use crate::element::{ElementId, VisualElement};
use crate::error::{Error, Result};
use crate::fit::{self, BENCHMARK_FONT};
use crate::measure_cache::MeasureCache;

/// Configuration for a [`LayoutContext`].
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    /// Smallest font size the fit solver may settle on.
    pub min_font_size: u32,
    /// Largest font size the fit solver may settle on.
    pub max_font_size: u32,
    /// Extra size added onto the aggregate content size.
    pub padding: Size,
    /// Resize the container to the aggregate size after every pass.
    ///
    /// Also switches the fitting bounds to the parent's box (or the
    /// viewport when no parent exists), since the container's own size is
    /// an output rather than an input in that mode.
    pub bind_size_to_content: bool,
}

impl LayoutConfig {
    /// Configuration with the font size pinned to `size`.
    ///
    /// The solver degenerates to a single probe, for content whose string
    /// object opted out of responsive sizing.
    #[must_use]
    pub fn pinned(size: u32) -> Self {
        Self {
            min_font_size: size,
            max_font_size: size,
            ..Self::default()
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_font_size: 0,
            max_font_size: FONT_SIZE_MAX,
            padding: Size::ZERO,
            bind_size_to_content: false,
        }
    }
}

/// Final size and position of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Measured size of the element.
    pub size: Size,
    /// Top-left position relative to the container.
    pub position: Point,
}

/// Snapshot produced by one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Placement of every element, keyed by element identity.
    pub placements: FxHashMap<ElementId, Placement>,
    /// Total content size including padding.
    pub aggregate: Size,
}

/// A named, ordered batch of elements sharing one font.
pub struct RenderGroup {
    key: String,
    font: Font,
    elements: Vec<VisualElement>,
}

impl RenderGroup {
    /// The registration key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The group's font.
    #[must_use]
    pub fn font(&self) -> Font {
        self.font
    }

    /// The group's elements, in reading order.
    #[must_use]
    pub fn elements(&self) -> &[VisualElement] {
        &self.elements
    }
}

impl std::fmt::Debug for RenderGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderGroup")
            .field("key", &self.key)
            .field("font", &self.font)
            .field("elements", &self.elements.len())
            .finish()
    }
}

/// Flow-layout state machine over a container and its render groups.
pub struct LayoutContext {
    container: Box<dyn Container>,
    oracle: Rc<dyn MeasureOracle>,
    config: LayoutConfig,
    groups: Vec<RenderGroup>,
    cache: MeasureCache,
    last_aggregate: Option<Size>,
}

impl LayoutContext {
    /// Create a context over a container and measurement oracle.
    ///
    /// Fails fast when the configured font-size range is inverted or
    /// outside the legal range.
    pub fn new(
        container: Box<dyn Container>,
        oracle: Rc<dyn MeasureOracle>,
        config: LayoutConfig,
    ) -> Result<Self> {
        if config.min_font_size > config.max_font_size {
            return Err(Error::FontSizeRange {
                min: config.min_font_size,
                max: config.max_font_size,
            });
        }
        if config.max_font_size > FONT_SIZE_MAX {
            return Err(Error::FontSizeOutOfRange {
                size: config.max_font_size,
            });
        }
        Ok(Self {
            container,
            oracle,
            config,
            groups: Vec::new(),
            cache: MeasureCache::default(),
            last_aggregate: None,
        })
    }

    /// Register a group under a unique key, after all existing groups.
    pub fn add_group(
        &mut self,
        key: impl Into<String>,
        elements: Vec<VisualElement>,
        font: Font,
    ) -> Result<()> {
        let key = key.into();
        if self.groups.iter().any(|group| group.key == key) {
            warn!(key = %key, "duplicate render group rejected");
            return Err(Error::DuplicateGroup { key });
        }
        self.groups.push(RenderGroup {
            key,
            font,
            elements,
        });
        Ok(())
    }

    /// Remove a group, returning its elements to the caller.
    ///
    /// Removal only affects future layout passes; nothing already placed
    /// is destroyed.
    pub fn remove_group(&mut self, key: &str) -> Option<Vec<VisualElement>> {
        let index = self.groups.iter().position(|group| group.key == key)?;
        Some(self.groups.remove(index).elements)
    }

    /// The registered groups, in insertion order.
    #[must_use]
    pub fn groups(&self) -> &[RenderGroup] {
        &self.groups
    }

    /// Aggregate size computed by the most recent pass, if any ran.
    #[must_use]
    pub fn aggregate_size(&self) -> Option<Size> {
        self.last_aggregate
    }

    /// Run a full layout pass.
    ///
    /// Returns `Ok(None)` without touching anything when the container is
    /// detached. Otherwise returns the fresh placement snapshot; calling
    /// again with unchanged inputs returns an identical snapshot.
    pub fn update(&mut self) -> Result<Option<LayoutResult>> {
        let Some(own_bounds) = self.container.bounds() else {
            warn!("layout pass skipped: container is detached");
            return Ok(None);
        };
        let bounds = if self.config.bind_size_to_content {
            self.container
                .parent_bounds()
                .unwrap_or_else(|| self.container.viewport())
        } else {
            own_bounds
        };

        let mut placements: FxHashMap<ElementId, Placement> = FxHashMap::default();
        let mut cursor = Point::ORIGIN;
        let mut max_x = 0f32;
        let mut max_y = 0f32;
        let mut wrapped = false;
        let mut first_line_height: Option<f32> = None;

        for group in &mut self.groups {
            let font_size = fit::solve(
                self.oracle.as_ref(),
                bounds,
                group.font,
                self.config.min_font_size,
                self.config.max_font_size,
            )?;
            // One benchmark font for the line advance, regardless of the
            // group's own font.
            let line_height = self
                .cache
                .measure(self.oracle.as_ref(), " ", font_size, BENCHMARK_FONT, Size::MAX)
                .height;
            first_line_height.get_or_insert(line_height);
            trace!(key = %group.key, font_size, line_height, "laying out group");

            for element in &mut group.elements {
                let text = match element {
                    VisualElement::Literal(literal) => Some(literal.text.clone()),
                    VisualElement::Substituted(substituted) => substituted.node().text(),
                };

                match text {
                    None => {
                        // Image-like: fixed box, advances by the font size,
                        // never wraps.
                        let size = Size::splat(font_size.saturating_sub(2) as f32);
                        let position = cursor;
                        if let VisualElement::Substituted(substituted) = element {
                            substituted.node_mut().set_size(size);
                            substituted.node_mut().set_position(position);
                        }
                        placements.insert(element.id(), Placement { size, position });
                        cursor.x += font_size as f32;
                    }
                    Some(text) => {
                        // Formats are wrapping transforms applied at render
                        // time; measurement sees the bare text.
                        let measured = self.cache.measure(
                            self.oracle.as_ref(),
                            &text,
                            font_size,
                            group.font,
                            Size::MAX,
                        );
                        if text.contains('\n') || cursor.x + measured.width > bounds.width {
                            cursor.x = 0.0;
                            cursor.y += line_height;
                            wrapped = true;
                        }
                        let position = cursor;
                        if let VisualElement::Substituted(substituted) = element {
                            substituted.node_mut().set_font_size(font_size);
                            substituted.node_mut().set_size(measured);
                            substituted.node_mut().set_position(position);
                        }
                        placements.insert(
                            element.id(),
                            Placement {
                                size: measured,
                                position,
                            },
                        );
                        cursor.x += measured.width;
                    }
                }
                max_x = max_x.max(cursor.x);
                max_y = max_y.max(cursor.y);
            }
        }

        let aggregate = Size::new(
            if wrapped { bounds.width } else { max_x },
            max_y + first_line_height.unwrap_or(0.0),
        )
        .grow(self.config.padding);

        if self.config.bind_size_to_content {
            self.container.set_size(aggregate);
        }
        self.last_aggregate = Some(aggregate);

        Ok(Some(LayoutResult {
            placements,
            aggregate,
        }))
    }

    /// Tear down every placed element and consume the context.
    ///
    /// The optional callback sees each element before it is released;
    /// substituted nodes are destroyed on the host, literals are marked
    /// disposed.
    pub fn destroy(mut self, mut teardown: Option<&mut dyn FnMut(&VisualElement)>) {
        for group in &mut self.groups {
            for element in &mut group.elements {
                if let Some(callback) = teardown.as_mut() {
                    callback(element);
                }
                match element {
                    VisualElement::Literal(literal) => literal.mark_disposed(),
                    VisualElement::Substituted(substituted) => substituted.node_mut().destroy(),
                }
            }
        }
        self.groups.clear();
    }
}

impl std::fmt::Debug for LayoutContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutContext")
            .field("config", &self.config)
            .field("groups", &self.groups)
            .field("last_aggregate", &self.last_aggregate)
            .finish()
    }
}

/// Re-run layout on every notification from `source`.
///
/// Notifications arriving while a pass is already borrowing the context
/// are dropped rather than re-entered; the next notification runs a fresh
/// full pass, which recomputes everything anyway.
pub fn bind_resize(context: Rc<RefCell<LayoutContext>>, source: &ResizeSource) -> Subscription {
    source.subscribe(move || {
        if let Ok(mut context) = context.try_borrow_mut() {
            if let Err(error) = context.update() {
                warn!(%error, "resize-triggered layout pass failed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Replacement;
    use crate::span::NoMarkdown;
    use crate::string_object::{StringConfig, StringObject};
    use glyphflow_core::{FixedMetricsOracle, RecordingNode, VisualNode};
    use std::cell::RefCell;

    /// Container with scriptable bounds that records applied sizes.
    struct TestContainer {
        bounds: Option<Size>,
        parent: Option<Size>,
        viewport: Size,
        applied: Rc<RefCell<Option<Size>>>,
    }

    impl TestContainer {
        fn attached(width: f32, height: f32) -> (Self, Rc<RefCell<Option<Size>>>) {
            let applied = Rc::new(RefCell::new(None));
            (
                Self {
                    bounds: Some(Size::new(width, height)),
                    parent: None,
                    viewport: Size::new(1920.0, 1080.0),
                    applied: Rc::clone(&applied),
                },
                applied,
            )
        }

        fn detached() -> Self {
            Self {
                bounds: None,
                parent: None,
                viewport: Size::new(1920.0, 1080.0),
                applied: Rc::new(RefCell::new(None)),
            }
        }
    }

    impl Container for TestContainer {
        fn bounds(&self) -> Option<Size> {
            self.bounds
        }

        fn parent_bounds(&self) -> Option<Size> {
            self.parent
        }

        fn viewport(&self) -> Size {
            self.viewport
        }

        fn set_size(&mut self, size: Size) {
            *self.applied.borrow_mut() = Some(size);
        }
    }

    fn generate(text: &str) -> Vec<VisualElement> {
        StringObject::with_annotator(StringConfig::default(), Box::new(NoMarkdown))
            .generate(text, Font::new(1))
            .unwrap()
    }

    /// Context with a pinned font size of 10 (cell width 5, line height 10).
    fn pinned_context(width: f32, height: f32) -> LayoutContext {
        let (container, _applied) = TestContainer::attached(width, height);
        LayoutContext::new(
            Box::new(container),
            Rc::new(FixedMetricsOracle::new()),
            LayoutConfig::pinned(10),
        )
        .unwrap()
    }

    // =========================================================================
    // Basic flow
    // =========================================================================

    #[test]
    fn single_line_advances_left_to_right() {
        let mut context = pinned_context(100.0, 100.0);
        let elements = generate("ab");
        let ids: Vec<_> = elements.iter().map(VisualElement::id).collect();
        context.add_group("main", elements, Font::new(1)).unwrap();

        let result = context.update().unwrap().unwrap();
        assert_eq!(result.placements[&ids[0]].position, Point::new(0.0, 0.0));
        assert_eq!(result.placements[&ids[1]].position, Point::new(5.0, 0.0));
        assert_eq!(result.aggregate, Size::new(10.0, 10.0));
    }

    #[test]
    fn unwrapped_height_is_exactly_one_line() {
        let mut context = pinned_context(500.0, 100.0);
        context.add_group("main", generate("hello"), Font::new(1)).unwrap();
        let result = context.update().unwrap().unwrap();
        assert_eq!(result.aggregate.height, 10.0);
    }

    #[test]
    fn third_element_wraps_in_two_char_container() {
        // Container fits exactly two 5px characters.
        let mut context = pinned_context(10.0, 100.0);
        let elements = generate("abc");
        let ids: Vec<_> = elements.iter().map(VisualElement::id).collect();
        context.add_group("main", elements, Font::new(1)).unwrap();

        let result = context.update().unwrap().unwrap();
        assert_eq!(result.placements[&ids[0]].position, Point::new(0.0, 0.0));
        assert_eq!(result.placements[&ids[1]].position, Point::new(5.0, 0.0));
        assert_eq!(result.placements[&ids[2]].position, Point::new(0.0, 10.0));
        // Wrapped content reports the bounds width.
        assert_eq!(result.aggregate, Size::new(10.0, 20.0));
    }

    #[test]
    fn newline_element_breaks_the_line() {
        let mut context = pinned_context(500.0, 100.0);
        let elements = generate("a\nb");
        let ids: Vec<_> = elements.iter().map(VisualElement::id).collect();
        context.add_group("main", elements, Font::new(1)).unwrap();

        let result = context.update().unwrap().unwrap();
        assert_eq!(result.placements[&ids[0]].position, Point::new(0.0, 0.0));
        assert_eq!(result.placements[&ids[2]].position, Point::new(0.0, 10.0));
        assert_eq!(result.aggregate.height, 20.0);
    }

    #[test]
    fn groups_flow_in_insertion_order() {
        let mut context = pinned_context(500.0, 100.0);
        let first = generate("ab");
        let second = generate("c");
        let second_id = second[0].id();
        context.add_group("first", first, Font::new(1)).unwrap();
        context.add_group("second", second, Font::new(2)).unwrap();

        let result = context.update().unwrap().unwrap();
        assert_eq!(result.placements[&second_id].position, Point::new(10.0, 0.0));
    }

    // =========================================================================
    // Idempotence
    // =========================================================================

    #[test]
    fn update_is_idempotent_without_mutation() {
        let mut context = pinned_context(10.0, 100.0);
        context.add_group("main", generate("abcde"), Font::new(1)).unwrap();

        let first = context.update().unwrap().unwrap();
        let second = context.update().unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(context.aggregate_size(), Some(first.aggregate));
    }

    // =========================================================================
    // Substituted / image-like elements
    // =========================================================================

    fn elements_with_icon(text: &str) -> (Vec<VisualElement>, Rc<RefCell<Option<Rc<RefCell<glyphflow_core::NodeState>>>>>) {
        let slot = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&slot);
        let mut strings =
            StringObject::with_annotator(StringConfig::default(), Box::new(NoMarkdown));
        strings
            .replace(
                "icon",
                Replacement::factory(move || {
                    let (node, state) = RecordingNode::new();
                    *sink.borrow_mut() = Some(state);
                    Some(Box::new(node))
                }),
            )
            .unwrap();
        let elements = strings.generate(text, Font::new(1)).unwrap();
        (elements, slot)
    }

    #[test]
    fn image_like_node_gets_fixed_box() {
        let (elements, state_slot) = elements_with_icon("x icon y");
        let mut context = pinned_context(500.0, 100.0);
        context.add_group("main", elements, Font::new(1)).unwrap();
        context.update().unwrap().unwrap();

        let state_slot = state_slot.borrow();
        let state = state_slot.as_ref().unwrap().borrow();
        assert_eq!(state.size, Some(Size::splat(8.0)));
        assert_eq!(state.position, Some(Point::new(10.0, 0.0)));
    }

    #[test]
    fn image_like_node_advances_cursor_by_font_size() {
        let (elements, _) = elements_with_icon("x icon y");
        let ids: Vec<_> = elements.iter().map(VisualElement::id).collect();
        let mut context = pinned_context(500.0, 100.0);
        context.add_group("main", elements, Font::new(1)).unwrap();
        let result = context.update().unwrap().unwrap();

        // x, space, icon, space, y: icon at x=10 advances 10, spaces 5 each.
        assert_eq!(result.placements[&ids[4]].position, Point::new(25.0, 0.0));
    }

    #[test]
    fn image_like_node_never_wraps() {
        let (elements, state_slot) = elements_with_icon("ab icon");
        let mut context = pinned_context(10.0, 100.0);
        context.add_group("main", elements, Font::new(1)).unwrap();
        context.update().unwrap().unwrap();

        // Cursor sits at the bound after "ab" and the space wrapped; the
        // icon is placed wherever the cursor is without forcing a break.
        let state_slot = state_slot.borrow();
        let state = state_slot.as_ref().unwrap().borrow();
        assert_eq!(state.position.unwrap().y, 10.0);
    }

    #[test]
    fn substituted_text_node_is_measured_as_text() {
        let slot = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&slot);
        let mut strings =
            StringObject::with_annotator(StringConfig::default(), Box::new(NoMarkdown));
        strings
            .replace(
                "word",
                Replacement::factory(move || {
                    let (mut node, state) = RecordingNode::new();
                    node.set_text("long");
                    *sink.borrow_mut() = Some(state);
                    Some(Box::new(node))
                }),
            )
            .unwrap();
        let elements = strings.generate("word", Font::new(1)).unwrap();
        let mut context = pinned_context(500.0, 100.0);
        context.add_group("main", elements, Font::new(1)).unwrap();
        context.update().unwrap().unwrap();

        let slot = slot.borrow();
        let state = slot.as_ref().unwrap().borrow();
        // "long" at size 10 measures 20x10 and gets the solved font size.
        assert_eq!(state.size, Some(Size::new(20.0, 10.0)));
        assert_eq!(state.font_size, Some(10));
    }

    // =========================================================================
    // Container interaction
    // =========================================================================

    #[test]
    fn detached_container_skips_update() {
        let mut context = LayoutContext::new(
            Box::new(TestContainer::detached()),
            Rc::new(FixedMetricsOracle::new()),
            LayoutConfig::default(),
        )
        .unwrap();
        context.add_group("main", generate("ab"), Font::new(1)).unwrap();
        assert!(context.update().unwrap().is_none());
        assert_eq!(context.aggregate_size(), None);
    }

    #[test]
    fn bind_size_to_content_applies_aggregate() {
        let (mut container, applied) = TestContainer::attached(10.0, 10.0);
        container.parent = Some(Size::new(500.0, 100.0));
        let mut context = LayoutContext::new(
            Box::new(container),
            Rc::new(FixedMetricsOracle::new()),
            LayoutConfig {
                bind_size_to_content: true,
                ..LayoutConfig::pinned(10)
            },
        )
        .unwrap();
        context.add_group("main", generate("ab"), Font::new(1)).unwrap();
        let result = context.update().unwrap().unwrap();

        // Fitting used the parent bounds, not the container's tiny box, so
        // nothing wrapped.
        assert_eq!(result.aggregate, Size::new(10.0, 10.0));
        assert_eq!(*applied.borrow(), Some(result.aggregate));
    }

    #[test]
    fn unbound_container_is_left_untouched() {
        let (container, applied) = TestContainer::attached(500.0, 100.0);
        let mut context = LayoutContext::new(
            Box::new(container),
            Rc::new(FixedMetricsOracle::new()),
            LayoutConfig::pinned(10),
        )
        .unwrap();
        context.add_group("main", generate("ab"), Font::new(1)).unwrap();
        context.update().unwrap().unwrap();
        assert_eq!(*applied.borrow(), None);
    }

    #[test]
    fn pinned_config_probes_exactly_one_size() {
        let config = LayoutConfig::pinned(24);
        assert_eq!(config.min_font_size, 24);
        assert_eq!(config.max_font_size, 24);
        assert!(!config.bind_size_to_content);
    }

    #[test]
    fn padding_grows_aggregate() {
        let (container, _applied) = TestContainer::attached(500.0, 100.0);
        let mut context = LayoutContext::new(
            Box::new(container),
            Rc::new(FixedMetricsOracle::new()),
            LayoutConfig {
                padding: Size::new(4.0, 6.0),
                ..LayoutConfig::pinned(10)
            },
        )
        .unwrap();
        context.add_group("main", generate("ab"), Font::new(1)).unwrap();
        let result = context.update().unwrap().unwrap();
        assert_eq!(result.aggregate, Size::new(14.0, 16.0));
    }

    // =========================================================================
    // Group registry
    // =========================================================================

    #[test]
    fn duplicate_group_key_rejected() {
        let mut context = pinned_context(100.0, 100.0);
        context.add_group("main", generate("a"), Font::new(1)).unwrap();
        let result = context.add_group("main", generate("b"), Font::new(1));
        assert_eq!(
            result.unwrap_err(),
            Error::DuplicateGroup { key: "main".into() }
        );
        assert_eq!(context.groups().len(), 1);
    }

    #[test]
    fn removed_group_stops_participating() {
        let mut context = pinned_context(500.0, 100.0);
        let kept = generate("k");
        let kept_id = kept[0].id();
        context.add_group("gone", generate("ab"), Font::new(1)).unwrap();
        context.add_group("kept", kept, Font::new(1)).unwrap();

        let removed = context.remove_group("gone").unwrap();
        assert_eq!(removed.len(), 2);
        assert!(context.remove_group("gone").is_none());

        let result = context.update().unwrap().unwrap();
        assert_eq!(result.placements.len(), 1);
        assert_eq!(result.placements[&kept_id].position, Point::new(0.0, 0.0));
    }

    // =========================================================================
    // Config preconditions
    // =========================================================================

    #[test]
    fn inverted_font_range_is_fatal_at_construction() {
        let (container, _applied) = TestContainer::attached(10.0, 10.0);
        let result = LayoutContext::new(
            Box::new(container),
            Rc::new(FixedMetricsOracle::new()),
            LayoutConfig {
                min_font_size: 50,
                max_font_size: 20,
                ..LayoutConfig::default()
            },
        );
        assert_eq!(
            result.unwrap_err(),
            Error::FontSizeRange { min: 50, max: 20 }
        );
    }

    #[test]
    fn oversized_font_range_is_fatal_at_construction() {
        let (container, _applied) = TestContainer::attached(10.0, 10.0);
        let result = LayoutContext::new(
            Box::new(container),
            Rc::new(FixedMetricsOracle::new()),
            LayoutConfig {
                max_font_size: 120,
                ..LayoutConfig::default()
            },
        );
        assert_eq!(
            result.unwrap_err(),
            Error::FontSizeOutOfRange { size: 120 }
        );
    }

    // =========================================================================
    // Destruction
    // =========================================================================

    #[test]
    fn destroy_tears_down_every_element() {
        let (elements, state_slot) = elements_with_icon("a icon");
        let mut context = pinned_context(500.0, 100.0);
        context.add_group("main", elements, Font::new(1)).unwrap();
        context.update().unwrap().unwrap();

        let mut seen = 0usize;
        let mut teardown = |_: &VisualElement| seen += 1;
        context.destroy(Some(&mut teardown));

        // a, space, icon
        assert_eq!(seen, 3);
        let state_slot = state_slot.borrow();
        assert!(state_slot.as_ref().unwrap().borrow().destroyed);
    }

    #[test]
    fn destroy_without_callback_is_fine() {
        let mut context = pinned_context(500.0, 100.0);
        context.add_group("main", generate("ab"), Font::new(1)).unwrap();
        context.destroy(None);
    }

    // =========================================================================
    // Resize binding
    // =========================================================================

    #[test]
    fn resize_notification_reruns_layout() {
        let context = Rc::new(RefCell::new(pinned_context(500.0, 100.0)));
        context
            .borrow_mut()
            .add_group("main", generate("ab"), Font::new(1))
            .unwrap();

        let source = ResizeSource::new();
        let subscription = bind_resize(Rc::clone(&context), &source);
        assert!(context.borrow().aggregate_size().is_none());

        source.notify();
        assert_eq!(
            context.borrow().aggregate_size(),
            Some(Size::new(10.0, 10.0))
        );

        subscription.cancel();
    }

    #[test]
    fn cancelled_binding_stops_relayout() {
        let context = Rc::new(RefCell::new(pinned_context(500.0, 100.0)));
        let source = ResizeSource::new();
        let subscription = bind_resize(Rc::clone(&context), &source);
        subscription.cancel();
        source.notify();
        assert!(context.borrow().aggregate_size().is_none());
    }
}
