//! Geometry and interaction engine
//!
//! Pure and platform-free:
//! - Segment angles live in `state`
//! - Paths, connectors and handles are derived in `arc`
//! - The drag state machine in `drag` is the only writer

pub mod arc;
pub mod collision;
pub mod drag;
pub mod state;

pub use arc::{ArcDescriptor, ArcGeometry, LineDescriptor, SegmentGeometry, label_for, large_arc_flag};
pub use collision::{Aabb, CollisionReport, detect_collision};
pub use drag::{Chart, DragState, PatchSet, ScreenRect, SegmentPatch};
pub use state::{BoundaryUpdate, Segment, SegmentStore};
