//! Rendering
//!
//! The chart never draws directly: a `Scene` is mounted onto a `Surface`
//! once, then drag moves are patched onto the mounted nodes.

pub mod scene;
pub mod svg;
pub mod sync;

pub use scene::{HandleScene, Scene, SegmentScene, palette};
pub use svg::{NodeId, SvgDocument};
pub use sync::{CircleNode, HandleNodes, LineNode, MountedChart, PathNode, SegmentNodes, Surface, TextNode};
