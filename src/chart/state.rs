//! Segment state
//!
//! The only mutable chart data: N segments in circular order. Segment i's end
//! boundary is segment (i+1 mod N)'s start boundary; boundary k is the start
//! of segment k.

use serde::{Deserialize, Serialize};

use crate::consts::FULL_TURN;
use crate::{angular_span, normalize_degrees};

/// One angular wedge, degrees clockwise from 12 o'clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Segment {
    pub fn new(start_angle: f64, end_angle: f64) -> Self {
        Self {
            start_angle,
            end_angle,
        }
    }

    /// Clockwise span in degrees (handles wraparound)
    pub fn span(&self) -> f64 {
        angular_span(self.start_angle, self.end_angle)
    }

    /// Angle halfway along the segment
    ///
    /// A segment wrapping past 0° (start > end) takes the midpoint of the
    /// short way round, not of the reflex arc.
    pub fn mid_angle(&self) -> f64 {
        let sum = if self.start_angle > self.end_angle {
            self.start_angle + self.end_angle + FULL_TURN
        } else {
            self.start_angle + self.end_angle
        };
        normalize_degrees(sum / 2.0)
    }
}

/// Indices of the two segments touched by a boundary rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryUpdate {
    /// Segment whose end moved
    pub prev: usize,
    /// Segment whose start moved
    pub next: usize,
}

/// Ordered, circular list of segments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentStore {
    segments: Vec<Segment>,
}

impl SegmentStore {
    /// Equal partition of the circle into `count` segments
    ///
    /// Angles are stored in [0, 360), so the last segment ends at 0.
    pub fn new(count: usize) -> Self {
        let n = count.max(1) as f64;
        let at = |i: usize| normalize_degrees(FULL_TURN * i as f64 / n);
        let segments = (0..count).map(|i| Segment::new(at(i), at(i + 1))).collect();
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Whether the store holds one segment covering the whole circle
    pub fn is_full_ring(&self) -> bool {
        self.len() == 1
    }

    /// Clockwise span of segment `index`
    ///
    /// A lone segment's start and end coincide, which here means a full turn
    /// rather than zero width.
    pub fn span(&self, index: usize) -> Option<f64> {
        let segment = self.get(index)?;
        Some(if self.is_full_ring() { FULL_TURN } else { segment.span() })
    }

    /// Clockwise span of every segment, in order
    pub fn spans(&self) -> Vec<f64> {
        (0..self.len()).filter_map(|i| self.span(i)).collect()
    }

    /// Index of the segment before `index`, wrapping
    pub fn prev_index(&self, index: usize) -> usize {
        let n = self.len().max(1);
        (index % n + n - 1) % n
    }

    /// Index of the segment after `index`, wrapping
    pub fn next_index(&self, index: usize) -> usize {
        let n = self.len().max(1);
        (index % n + 1) % n
    }

    /// Angle of boundary `k` (the start of segment k)
    pub fn boundary_angle(&self, boundary: usize) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.segments[boundary % self.len()].start_angle)
    }

    /// Move boundary `k` to `angle`, normalized into [0, 360)
    ///
    /// Sets segment k's start and segment (k-1 mod N)'s end. No ordering
    /// check is made against the other edge of either segment. With a single
    /// segment both fields belong to the same segment.
    pub fn rotate_boundary(&mut self, boundary: usize, angle: f64) -> Option<BoundaryUpdate> {
        if self.is_empty() {
            return None;
        }
        let next = boundary % self.len();
        let prev = self.prev_index(next);
        let angle = normalize_degrees(angle);

        self.segments[next].start_angle = angle;
        self.segments[prev].end_angle = angle;

        Some(BoundaryUpdate { prev, next })
    }

    /// Clamp `angle` into the clockwise interval between boundaries k-1 and k+1
    ///
    /// With fewer than three segments those two boundaries coincide (or do
    /// not exist), so the angle is returned unchanged. Out-of-range angles snap
    /// to whichever neighbor is circularly closer.
    pub fn clamp_to_neighbors(&self, boundary: usize, angle: f64) -> f64 {
        if self.len() < 3 {
            return angle;
        }
        let k = boundary % self.len();
        let lo = normalize_degrees(self.segments[self.prev_index(k)].start_angle);
        let hi = normalize_degrees(self.segments[k].end_angle);

        let width = (hi - lo).rem_euclid(FULL_TURN);
        let offset = (angle - lo).rem_euclid(FULL_TURN);
        if offset <= width {
            return angle;
        }

        let past_hi = offset - width;
        let before_lo = FULL_TURN - offset;
        if past_hi <= before_lo { hi } else { lo }
    }
}
