#![forbid(unsafe_code)]

//! Host-facing capabilities and primitives for glyphflow.
//!
//! This crate defines everything the layout library needs from its host,
//! without depending on any concrete scene graph:
//! - [`Size`] / [`Point`] - pixel geometry
//! - [`Font`] - opaque font handle the host and oracle agree on
//! - [`MeasureOracle`] - external text-measurement capability
//! - [`VisualNode`] / [`Container`] - scene-graph leaf and box capabilities
//! - [`ResizeSource`] / [`Subscription`] - resize notification stream
//!
//! The `test-helpers` feature adds [`FixedMetricsOracle`] (deterministic
//! monospace metrics) and [`RecordingNode`] (a node that records every
//! property write) so layout behavior can be asserted exactly in tests.

pub mod event;
pub mod font;
pub mod geometry;
pub mod measure;
pub mod node;

pub use event::{ResizeSource, Subscription};
pub use font::{FONT_SIZE_MAX, FONT_SIZE_MIN, Font};
pub use geometry::{Point, Size};
pub use measure::MeasureOracle;
pub use node::{Container, VisualNode};

#[cfg(feature = "test-helpers")]
pub use measure::FixedMetricsOracle;
#[cfg(feature = "test-helpers")]
pub use node::{NodeState, RecordingNode};
