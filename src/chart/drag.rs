//! Pointer-drag controller
//!
//! Owns the segment store and turns press/move/release into boundary
//! rotations. Each move returns a [`PatchSet`] with the recomputed geometry of
//! the two affected segments and the dragged handle, ready for render sync.

use glam::DVec2;
use serde::Serialize;

use super::arc::{ArcGeometry, LineDescriptor, SegmentGeometry};
use super::collision::{Aabb, CollisionReport, detect_collision};
use super::state::SegmentStore;
use crate::error::ConfigError;
use crate::pointer_to_angle;
use crate::settings::{BoundaryPolicy, ChartConfig};

/// Screen-space bounding rectangle of the mounted chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Drag state machine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No handle held
    #[default]
    Idle,
    /// A handle is held; `center` is the chart center in screen space at press time
    Dragging { boundary: usize, center: DVec2 },
}

/// Recomputed geometry for one segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentPatch {
    pub index: usize,
    pub geometry: SegmentGeometry,
}

/// Everything render sync needs after one pointer move
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchSet {
    pub boundary: usize,
    /// Angle actually written to the store (after the boundary policy)
    pub angle: f64,
    /// Segment ending at the boundary, then the one starting there
    pub segments: [SegmentPatch; 2],
    pub handle: LineDescriptor,
    /// Diagnostic only
    pub collision: CollisionReport,
}

/// An interactive donut chart
#[derive(Debug, Clone)]
pub struct Chart {
    config: ChartConfig,
    geometry: ArcGeometry,
    store: SegmentStore,
    drag: DragState,
}

impl Chart {
    /// Validate the configuration and partition the circle evenly
    pub fn new(config: ChartConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "Donut chart: {} segments, viewBox {}, border {}, {} boundaries",
            config.segments,
            config.view_box,
            config.border_size,
            config.boundary_policy.as_str()
        );
        Ok(Self {
            geometry: ArcGeometry::from_config(&config),
            store: SegmentStore::new(config.segments),
            drag: DragState::Idle,
            config,
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn geometry(&self) -> &ArcGeometry {
        &self.geometry
    }

    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Geometry of segment `index`; a lone segment is drawn as a full ring
    pub fn segment_geometry(&self, index: usize) -> Option<SegmentGeometry> {
        let segment = self.store.get(index)?;
        Some(if self.store.is_full_ring() {
            self.geometry.ring(segment)
        } else {
            self.geometry.segment(segment)
        })
    }

    /// Handle line for boundary `k`
    pub fn handle(&self, boundary: usize) -> Option<LineDescriptor> {
        self.store
            .boundary_angle(boundary)
            .map(|angle| self.geometry.handle(angle))
    }

    /// Press on handle `k`; `rect` is the chart's on-screen bounds right now
    ///
    /// Returns whether a drag started. A single segment has no neighbor to
    /// trade angle with, so its handle ignores presses.
    pub fn press(&mut self, boundary: usize, rect: ScreenRect) -> bool {
        if self.store.len() < 2 {
            log::warn!("Ignoring press on boundary {boundary}: chart has a single segment");
            return false;
        }
        if boundary >= self.store.len() {
            log::warn!("Ignoring press on unknown boundary {boundary}");
            return false;
        }

        let center = rect.center();
        if let DragState::Dragging { boundary: held, .. } = self.drag {
            log::debug!("Press on boundary {boundary} while holding {held}; switching");
        }
        self.drag = DragState::Dragging { boundary, center };
        log::debug!("Drag start: boundary {boundary}, center ({}, {})", center.x, center.y);
        true
    }

    /// Pointer moved to `pointer` (screen space)
    ///
    /// Does nothing while idle. Otherwise rotates the held boundary to the
    /// pointer's angle around the chart center.
    pub fn pointer_move(&mut self, pointer: DVec2) -> Option<PatchSet> {
        let DragState::Dragging { boundary, center } = self.drag else {
            return None;
        };

        let delta = center - pointer;
        let raw = pointer_to_angle(delta.x, delta.y);
        let angle = match self.config.boundary_policy {
            BoundaryPolicy::Permissive => raw,
            BoundaryPolicy::Clamp => self.store.clamp_to_neighbors(boundary, raw),
        };

        let update = self.store.rotate_boundary(boundary, angle)?;
        log::trace!("Boundary {boundary} -> {angle:.2} (pointer {raw:.2})");

        let prev = self.segment_geometry(update.prev)?;
        let next = self.segment_geometry(update.next)?;
        let handle = self.geometry.handle(angle);
        let collision = self.probe_neighbors(boundary, &handle);

        Some(PatchSet {
            boundary,
            angle,
            segments: [
                SegmentPatch {
                    index: update.prev,
                    geometry: prev,
                },
                SegmentPatch {
                    index: update.next,
                    geometry: next,
                },
            ],
            handle,
            collision,
        })
    }

    /// Pointer released anywhere; returns whether a drag ended
    pub fn release(&mut self) -> bool {
        match std::mem::take(&mut self.drag) {
            DragState::Dragging { boundary, .. } => {
                log::debug!("Drag end: boundary {boundary}");
                true
            }
            DragState::Idle => false,
        }
    }

    /// Compare the dragged handle's box with both neighboring handles
    fn probe_neighbors(&self, boundary: usize, handle: &LineDescriptor) -> CollisionReport {
        let pad = self.config.theme.handle_width / 2.0;
        let bbox = |line: &LineDescriptor| Aabb::from_line(line.from, line.to, pad);
        let active = bbox(handle);

        let probe = |k: usize| {
            self.handle(k)
                .map(|line| detect_collision(&active, &bbox(&line)))
                .unwrap_or(false)
        };
        let report = CollisionReport {
            prev: probe(self.store.prev_index(boundary)),
            next: probe(self.store.next_index(boundary)),
        };

        if report.any() {
            log::debug!(
                "Handle {boundary} collides with neighbor (prev: {}, next: {})",
                report.prev,
                report.next
            );
        }
        report
    }
}
