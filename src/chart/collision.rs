//! Handle collision probe
//!
//! Compares axis-aligned bounding boxes of boundary handles. Drags only log
//! the result today; nothing stops a handle from passing its neighbor.

use glam::DVec2;
use serde::Serialize;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box around a line segment, grown by `pad` on every side (half the stroke width)
    pub fn from_line(a: DVec2, b: DVec2, pad: f64) -> Self {
        let pad = DVec2::splat(pad.max(0.0));
        Self::new(a.min(b) - pad, a.max(b) + pad)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Strict overlap: boxes that only touch along an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Result of probing the active handle against both neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CollisionReport {
    pub prev: bool,
    pub next: bool,
}

impl CollisionReport {
    pub fn any(&self) -> bool {
        self.prev || self.next
    }
}

/// Check whether two boxes overlap
#[inline]
pub fn detect_collision(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes() {
        let a = Aabb::new(DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0));
        let b = Aabb::new(DVec2::new(5.0, 5.0), DVec2::new(15.0, 15.0));
        assert!(detect_collision(&a, &b));
        assert!(detect_collision(&b, &a));
    }

    #[test]
    fn test_separated_boxes() {
        let a = Aabb::new(DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0));
        let b = Aabb::new(DVec2::new(20.0, 0.0), DVec2::new(30.0, 10.0));
        assert!(!detect_collision(&a, &b));
        // Overlap on x only
        let c = Aabb::new(DVec2::new(5.0, 20.0), DVec2::new(15.0, 30.0));
        assert!(!detect_collision(&a, &c));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::new(DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0));
        let b = Aabb::new(DVec2::new(10.0, 0.0), DVec2::new(20.0, 10.0));
        assert!(!detect_collision(&a, &b));
    }

    #[test]
    fn test_contained_box() {
        let outer = Aabb::new(DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0));
        let inner = Aabb::new(DVec2::new(2.0, 2.0), DVec2::new(3.0, 3.0));
        assert!(detect_collision(&outer, &inner));
    }

    #[test]
    fn test_from_line_pads_and_orders() {
        let bb = Aabb::from_line(DVec2::new(10.0, 0.0), DVec2::new(0.0, 5.0), 2.0);
        assert_eq!(bb.min, DVec2::new(-2.0, -2.0));
        assert_eq!(bb.max, DVec2::new(12.0, 7.0));
        assert_eq!(bb.width(), 14.0);
        assert_eq!(bb.height(), 9.0);
    }

    #[test]
    fn test_vertical_lines_collide_only_with_padding() {
        let a = Aabb::from_line(DVec2::new(0.0, 0.0), DVec2::new(0.0, 10.0), 0.0);
        let b = Aabb::from_line(DVec2::new(3.0, 0.0), DVec2::new(3.0, 10.0), 0.0);
        assert!(!detect_collision(&a, &b));
        let a = Aabb::from_line(DVec2::new(0.0, 0.0), DVec2::new(0.0, 10.0), 2.0);
        let b = Aabb::from_line(DVec2::new(3.0, 0.0), DVec2::new(3.0, 10.0), 2.0);
        assert!(detect_collision(&a, &b));
    }

    #[test]
    fn test_report_any() {
        assert!(!CollisionReport::default().any());
        assert!(CollisionReport { prev: false, next: true }.any());
    }
}
