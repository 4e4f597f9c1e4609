//! Leaf visual-node and container capabilities.
//!
//! The host owns the scene graph. Glyphflow only needs to push properties
//! onto leaf nodes it was handed (replacement nodes from factories) and to
//! query the box it is laying out into. Both are modeled as injected trait
//! objects rather than concrete scene types.

use crate::font::Font;
use crate::geometry::{Point, Size};

/// A host scene-graph leaf that layout can drive.
///
/// Replacement factories yield these; flow layout sizes, positions and
/// eventually destroys them. Activation support is optional: hosts whose
/// nodes have no press interaction return `false` from
/// [`on_activate`](VisualNode::on_activate) and layout proceeds without
/// wiring.
pub trait VisualNode {
    /// Set the node's displayed text, if it displays text.
    fn set_text(&mut self, text: &str);

    /// Set the node's font.
    fn set_font(&mut self, font: Font);

    /// Set the node's font size.
    fn set_font_size(&mut self, size: u32);

    /// Set the node's size in pixels.
    fn set_size(&mut self, size: Size);

    /// Set the node's position in pixels, relative to its container.
    fn set_position(&mut self, position: Point);

    /// Install a press/activate callback. Returns `false` when the node
    /// has no activation interaction; the callback is dropped in that case.
    fn on_activate(&mut self, callback: Box<dyn Fn()>) -> bool;

    /// The node's current text, or `None` for image-like nodes.
    ///
    /// Flow layout treats `None` as a fixed-box element that never wraps.
    fn text(&self) -> Option<String> {
        None
    }

    /// Release the underlying host resource.
    fn destroy(&mut self);
}

/// The box a layout context flows into.
///
/// `bounds` returning `None` means the container is detached from the host
/// tree; layout passes on a detached container are silently skipped.
pub trait Container {
    /// The container's own bounding box, or `None` when detached.
    fn bounds(&self) -> Option<Size>;

    /// The parent's bounding box, when a parent exists.
    fn parent_bounds(&self) -> Option<Size>;

    /// The global viewport, used as the last-resort bounding box when a
    /// size-to-content container has no parent.
    fn viewport(&self) -> Size;

    /// Resize the container (used when layout binds size to content).
    fn set_size(&mut self, size: Size);
}

#[cfg(feature = "test-helpers")]
pub use recording::{NodeState, RecordingNode};

#[cfg(feature = "test-helpers")]
mod recording {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Observable state of a [`RecordingNode`], shared with the test.
    #[derive(Default)]
    pub struct NodeState {
        /// Last text pushed onto the node.
        pub text: Option<String>,
        /// Last font pushed onto the node.
        pub font: Option<Font>,
        /// Last font size pushed onto the node.
        pub font_size: Option<u32>,
        /// Last size pushed onto the node.
        pub size: Option<Size>,
        /// Last position pushed onto the node.
        pub position: Option<Point>,
        /// Whether `destroy` was called.
        pub destroyed: bool,
        /// Installed activation callback, if any.
        pub activation: Option<Rc<dyn Fn()>>,
    }

    impl NodeState {
        /// Invoke the installed activation callback, as a host press would.
        pub fn press(&self) {
            if let Some(activation) = &self.activation {
                activation();
            }
        }
    }

    impl std::fmt::Debug for NodeState {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("NodeState")
                .field("text", &self.text)
                .field("font", &self.font)
                .field("font_size", &self.font_size)
                .field("size", &self.size)
                .field("position", &self.position)
                .field("destroyed", &self.destroyed)
                .field("has_activation", &self.activation.is_some())
                .finish()
        }
    }

    /// A [`VisualNode`] that records every property write for inspection.
    #[derive(Debug)]
    pub struct RecordingNode {
        state: Rc<RefCell<NodeState>>,
        supports_activation: bool,
    }

    impl RecordingNode {
        /// Create a node plus a shared handle onto its recorded state.
        #[must_use]
        pub fn new() -> (Self, Rc<RefCell<NodeState>>) {
            let state = Rc::new(RefCell::new(NodeState::default()));
            (
                Self {
                    state: Rc::clone(&state),
                    supports_activation: true,
                },
                state,
            )
        }

        /// Like [`new`](Self::new) but refusing activation callbacks, to
        /// model hosts whose nodes have no press interaction.
        #[must_use]
        pub fn without_activation() -> (Self, Rc<RefCell<NodeState>>) {
            let (mut node, state) = Self::new();
            node.supports_activation = false;
            (node, state)
        }
    }

    impl VisualNode for RecordingNode {
        fn set_text(&mut self, text: &str) {
            self.state.borrow_mut().text = Some(text.to_string());
        }

        fn set_font(&mut self, font: Font) {
            self.state.borrow_mut().font = Some(font);
        }

        fn set_font_size(&mut self, size: u32) {
            self.state.borrow_mut().font_size = Some(size);
        }

        fn set_size(&mut self, size: Size) {
            self.state.borrow_mut().size = Some(size);
        }

        fn set_position(&mut self, position: Point) {
            self.state.borrow_mut().position = Some(position);
        }

        fn on_activate(&mut self, callback: Box<dyn Fn()>) -> bool {
            if !self.supports_activation {
                return false;
            }
            self.state.borrow_mut().activation = Some(Rc::from(callback));
            true
        }

        fn text(&self) -> Option<String> {
            self.state.borrow().text.clone()
        }

        fn destroy(&mut self) {
            self.state.borrow_mut().destroyed = true;
        }
    }
}
