//! Arc geometry for donut segments
//!
//! Every segment is drawn as an annulus wedge between the outer radius and
//! `outer - border`. Angles are degrees clockwise from 12 o'clock; see
//! [`crate::polar_to_cartesian`].

use glam::DVec2;
use serde::Serialize;

use super::state::Segment;
use crate::consts::HALF_TURN;
use crate::{normalize_degrees, polar_to_cartesian};
use crate::settings::ChartConfig;

/// Wedge outline plus the point where the outer arc begins
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcDescriptor {
    /// SVG path data
    pub path: String,
    /// Outer point at the segment's end angle (where the path starts)
    pub point: DVec2,
}

/// A straight line between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineDescriptor {
    pub from: DVec2,
    pub to: DVec2,
}

/// Everything derived from one segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentGeometry {
    pub arc: ArcDescriptor,
    /// Radial stick from mid-band outwards; the label sits at `connector.to`
    pub connector: LineDescriptor,
}

/// Large-arc flag for a clockwise span in degrees
#[inline]
pub fn large_arc_flag(span: f64) -> &'static str {
    if span > HALF_TURN { "1" } else { "0" }
}

/// Label letter for a segment: A, B, C, ... cycling after Z
pub fn label_for(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// Static geometry shared by every segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub center: DVec2,
    pub radius: f64,
    pub border: f64,
}

impl ArcGeometry {
    pub fn new(center: DVec2, radius: f64, border: f64) -> Self {
        Self {
            center,
            radius,
            border,
        }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.center(), config.radius(), config.border_size)
    }

    #[inline]
    pub fn inner_radius(&self) -> f64 {
        self.radius - self.border
    }

    /// Closed wedge path for a segment
    ///
    /// Outer arc runs from the end angle back to the start angle, a line drops
    /// to the inner edge, the inner arc returns to the end angle and a line
    /// closes the shape. Coincident start and end give a zero-width wedge.
    pub fn describe_arc(&self, segment: &Segment) -> ArcDescriptor {
        let (start, end) = (segment.start_angle, segment.end_angle);
        let flag = large_arc_flag(segment.span());
        let r = self.radius;
        let ri = self.inner_radius();

        let outer_end = polar_to_cartesian(self.center, r, end);
        let outer_start = polar_to_cartesian(self.center, r, start);
        let inner_start = polar_to_cartesian(self.center, ri, start);
        let inner_end = polar_to_cartesian(self.center, ri, end);

        let mut d = String::new();
        push_command(&mut d, "M", &[outer_end.x, outer_end.y]);
        push_arc(&mut d, r, flag, 0, outer_start);
        push_command(&mut d, "L", &[inner_start.x, inner_start.y]);
        push_arc(&mut d, ri, flag, 1, inner_end);
        push_command(&mut d, "L", &[outer_end.x, outer_end.y]);

        ArcDescriptor {
            path: d,
            point: outer_end,
        }
    }

    /// Closed band around the whole circle, starting and ending at `at`
    ///
    /// Each edge is drawn as two half arcs because a single arc between
    /// coincident points draws nothing.
    pub fn describe_ring(&self, at: f64) -> ArcDescriptor {
        let mid = at + HALF_TURN;
        let r = self.radius;
        let ri = self.inner_radius();

        let outer = polar_to_cartesian(self.center, r, at);
        let outer_mid = polar_to_cartesian(self.center, r, mid);
        let inner = polar_to_cartesian(self.center, ri, at);
        let inner_mid = polar_to_cartesian(self.center, ri, mid);

        let mut d = String::new();
        push_command(&mut d, "M", &[outer.x, outer.y]);
        push_arc(&mut d, r, "0", 0, outer_mid);
        push_arc(&mut d, r, "0", 0, outer);
        push_command(&mut d, "L", &[inner.x, inner.y]);
        push_arc(&mut d, ri, "0", 1, inner_mid);
        push_arc(&mut d, ri, "0", 1, inner);
        push_command(&mut d, "L", &[outer.x, outer.y]);

        ArcDescriptor {
            path: d,
            point: outer,
        }
    }

    /// Connector stick at the segment's mid angle, half a border either side of the outer edge
    pub fn connector(&self, segment: &Segment) -> LineDescriptor {
        let mid = segment.mid_angle();
        let half = self.border / 2.0;
        LineDescriptor {
            from: polar_to_cartesian(self.center, self.radius - half, mid),
            to: polar_to_cartesian(self.center, self.radius + half, mid),
        }
    }

    /// Handle line across the band at a boundary angle
    pub fn handle(&self, angle: f64) -> LineDescriptor {
        LineDescriptor {
            from: polar_to_cartesian(self.center, self.radius, angle),
            to: polar_to_cartesian(self.center, self.inner_radius(), angle),
        }
    }

    pub fn segment(&self, segment: &Segment) -> SegmentGeometry {
        SegmentGeometry {
            arc: self.describe_arc(segment),
            connector: self.connector(segment),
        }
    }

    /// Geometry of a lone segment covering the whole circle from its start
    pub fn ring(&self, segment: &Segment) -> SegmentGeometry {
        let at = segment.start_angle;
        let half = self.border / 2.0;
        let mid = normalize_degrees(at + HALF_TURN);
        SegmentGeometry {
            arc: self.describe_ring(at),
            connector: LineDescriptor {
                from: polar_to_cartesian(self.center, self.radius - half, mid),
                to: polar_to_cartesian(self.center, self.radius + half, mid),
            },
        }
    }
}

fn push_command(d: &mut String, cmd: &str, args: &[f64]) {
    if !d.is_empty() {
        d.push(' ');
    }
    d.push_str(cmd);
    for arg in args {
        d.push_str(&format!(" {arg}"));
    }
}

fn push_arc(d: &mut String, radius: f64, large_arc: &str, sweep: u8, to: DVec2) {
    d.push_str(&format!(" A {radius} {radius} 0 {large_arc} {sweep} {} {}", to.x, to.y));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock() -> ArcGeometry {
        ArcGeometry::new(DVec2::new(75.0, 75.0), 75.0, 35.0)
    }

    fn tokens(path: &str) -> Vec<&str> {
        path.split_whitespace().collect()
    }

    #[test]
    fn test_large_arc_flag_boundary() {
        assert_eq!(large_arc_flag(180.0), "0");
        assert_eq!(large_arc_flag(181.0), "1");
        assert_eq!(large_arc_flag(60.0), "0");
    }

    #[test]
    fn test_describe_arc_command_order() {
        let arc = stock().describe_arc(&Segment::new(0.0, 60.0));
        let t = tokens(&arc.path);
        // M x y A r r 0 f 0 x y L x y A ri ri 0 f 1 x y L x y
        assert_eq!(t.len(), 3 + 8 + 3 + 8 + 3);
        assert_eq!(t[0], "M");
        assert_eq!(t[3], "A");
        assert_eq!(&t[4..9], &["75", "75", "0", "0", "0"]);
        assert_eq!(t[11], "L");
        assert_eq!(t[14], "A");
        assert_eq!(&t[15..20], &["40", "40", "0", "0", "1"]);
        assert_eq!(t[22], "L");
        // Closing line returns to the starting point
        assert_eq!(t[1], t[23]);
        assert_eq!(t[2], t[24]);
    }

    #[test]
    fn test_describe_arc_start_point_is_outer_end() {
        let arc = stock().describe_arc(&Segment::new(0.0, 90.0));
        assert!((arc.point - DVec2::new(150.0, 75.0)).length() < 1e-9);
    }

    #[test]
    fn test_describe_arc_large_flag_on_both_arcs() {
        let arc = stock().describe_arc(&Segment::new(0.0, 181.0));
        let t = tokens(&arc.path);
        assert_eq!(t[7], "1");
        assert_eq!(t[18], "1");

        let arc = stock().describe_arc(&Segment::new(0.0, 180.0));
        let t = tokens(&arc.path);
        assert_eq!(t[7], "0");
    }

    #[test]
    fn test_describe_arc_wrapped_segment_is_short() {
        let arc = stock().describe_arc(&Segment::new(350.0, 10.0));
        let t = tokens(&arc.path);
        assert_eq!(t[7], "0");
    }

    #[test]
    fn test_describe_full_ring_uses_two_halves() {
        let arc = stock().describe_ring(0.0);
        let arcs = tokens(&arc.path).iter().filter(|t| **t == "A").count();
        assert_eq!(arcs, 4);
        // Outer half arc passes through the bottom of the ring
        let t = tokens(&arc.path);
        let x: f64 = t[9].parse().unwrap();
        let y: f64 = t[10].parse().unwrap();
        assert!((x - 75.0).abs() < 1e-9);
        assert!((y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_coincident_edges_draw_zero_width() {
        let arc = stock().describe_arc(&Segment::new(0.0, 0.0));
        let t = tokens(&arc.path);
        assert_eq!(t.iter().filter(|t| **t == "A").count(), 2);
        assert_eq!(t[7], "0");
        // Outer arc ends where it began
        assert_eq!((t[1], t[2]), (t[9], t[10]));

        let line = stock().connector(&Segment::new(0.0, 0.0));
        assert!((line.to - DVec2::new(75.0, 75.0 - 92.5)).length() < 1e-9);
    }

    #[test]
    fn test_ring_connector_opposite_start() {
        let geo = stock().ring(&Segment::new(90.0, 90.0));
        // Start at 3 o'clock, connector at 9 o'clock
        assert!((geo.connector.from - DVec2::new(75.0 - 57.5, 75.0)).length() < 1e-9);
        assert!((geo.arc.point - DVec2::new(150.0, 75.0)).length() < 1e-9);
    }

    #[test]
    fn test_connector_at_mid_angle() {
        let line = stock().connector(&Segment::new(60.0, 120.0));
        // Mid angle 90 points right
        assert!((line.from - DVec2::new(75.0 + 57.5, 75.0)).length() < 1e-9);
        assert!((line.to - DVec2::new(75.0 + 92.5, 75.0)).length() < 1e-9);
    }

    #[test]
    fn test_connector_wrapped_segment_points_up() {
        let line = stock().connector(&Segment::new(350.0, 10.0));
        assert!((line.to.x - 75.0).abs() < 1e-9);
        assert!(line.to.y < 75.0);
    }

    #[test]
    fn test_handle_spans_band() {
        let line = stock().handle(0.0);
        assert!((line.from - DVec2::new(75.0, 0.0)).length() < 1e-9);
        assert!((line.to - DVec2::new(75.0, 35.0)).length() < 1e-9);
    }

    #[test]
    fn test_labels() {
        assert_eq!(label_for(0), 'A');
        assert_eq!(label_for(5), 'F');
        assert_eq!(label_for(25), 'Z');
        assert_eq!(label_for(26), 'A');
    }

    #[test]
    fn test_from_config() {
        let geom = ArcGeometry::from_config(&ChartConfig::default());
        assert_eq!(geom, stock());
        assert_eq!(geom.inner_radius(), 40.0);
    }
}
