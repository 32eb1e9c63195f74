//! Donut Split - an interactive donut chart with draggable segment boundaries
//!
//! Core modules:
//! - `chart`: Geometry and interaction engine (segments, arcs, drag state machine)
//! - `renderer`: Scene description, render sync and the in-memory SVG surface
//! - `platform`: Browser DOM surface and global pointer wiring
//! - `settings`: Chart configuration and theme

pub mod chart;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;

pub use chart::Chart;
pub use error::{ConfigError, PlatformError};
pub use settings::{BoundaryPolicy, ChartConfig, Theme};

use glam::DVec2;

/// Chart configuration constants
pub mod consts {
    /// Degrees in a full turn
    pub const FULL_TURN: f64 = 360.0;
    /// Spans above this need the large-arc flag
    pub const HALF_TURN: f64 = 180.0;
    /// Polar angle 0 points up; trig angle 0 points right
    pub const ANGLE_OFFSET: f64 = -90.0;

    /// Defaults matching the stock chart
    pub const DEFAULT_VIEW_BOX: f64 = 150.0;
    pub const DEFAULT_SEGMENTS: usize = 6;
    pub const DEFAULT_BORDER_SIZE: f64 = 35.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(consts::FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= consts::FULL_TURN { 0.0 } else { a }
}

/// Convert polar (center, r, degrees clockwise from 12 o'clock) to cartesian
#[inline]
pub fn polar_to_cartesian(center: DVec2, r: f64, angle_deg: f64) -> DVec2 {
    let theta = (angle_deg + consts::ANGLE_OFFSET).to_radians();
    DVec2::new(center.x + r * theta.cos(), center.y + r * theta.sin())
}

/// Convert a pointer offset to an angle in degrees, clockwise from 12 o'clock
///
/// `delta_x`/`delta_y` are `center - pointer` in screen coordinates. The
/// `atan2` result is counter-clockwise from top, so negative values are
/// folded into [0, 360) and the result is mirrored to match
/// [`polar_to_cartesian`]. Total: `(0, 0)` maps to 0.
#[inline]
pub fn pointer_to_angle(delta_x: f64, delta_y: f64) -> f64 {
    let mut deg = delta_x.atan2(delta_y).to_degrees();
    if deg < 0.0 {
        deg += consts::FULL_TURN;
    }
    normalize_degrees(consts::FULL_TURN - deg)
}

/// Clockwise span from `start` to `end` in degrees, in [0, 360)
///
/// Coincident angles give 0; a full turn is never inferred here.
#[inline]
pub fn angular_span(start: f64, end: f64) -> f64 {
    normalize_degrees(end - start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    /// Circular distance between two angles in degrees
    fn angle_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn test_polar_zero_points_up() {
        let p = polar_to_cartesian(DVec2::new(75.0, 75.0), 75.0, 0.0);
        assert!((p.x - 75.0).abs() < EPS);
        assert!(p.y.abs() < EPS);
    }

    #[test]
    fn test_polar_quarter_turns_are_clockwise() {
        let c = DVec2::ZERO;
        let right = polar_to_cartesian(c, 10.0, 90.0);
        let down = polar_to_cartesian(c, 10.0, 180.0);
        let left = polar_to_cartesian(c, 10.0, 270.0);
        assert!((right - DVec2::new(10.0, 0.0)).length() < EPS);
        assert!((down - DVec2::new(0.0, 10.0)).length() < EPS);
        assert!((left - DVec2::new(-10.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_pointer_to_angle_cardinal_directions() {
        // Pointer above center: delta points down the screen
        assert!(angle_distance(pointer_to_angle(0.0, 10.0), 0.0) < EPS);
        // Pointer right of center
        assert!((pointer_to_angle(-10.0, 0.0) - 90.0).abs() < EPS);
        // Pointer below center
        assert!((pointer_to_angle(0.0, -10.0) - 180.0).abs() < EPS);
        // Pointer left of center
        assert!((pointer_to_angle(10.0, 0.0) - 270.0).abs() < EPS);
    }

    #[test]
    fn test_pointer_to_angle_at_center() {
        assert_eq!(pointer_to_angle(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert!(normalize_degrees(-1e-20) < 360.0);
    }

    #[test]
    fn test_angular_span() {
        assert_eq!(angular_span(0.0, 60.0), 60.0);
        assert_eq!(angular_span(350.0, 10.0), 20.0);
        assert_eq!(angular_span(0.0, 360.0), 0.0);
        assert_eq!(angular_span(100.0, 100.0), 0.0);
        assert_eq!(angular_span(100.0, 40.0), 300.0);
    }

    proptest! {
        #[test]
        fn prop_polar_round_trip(
            angle in 0.0f64..360.0,
            cx in -500.0f64..500.0,
            cy in -500.0f64..500.0,
            r in 1.0f64..500.0,
        ) {
            let center = DVec2::new(cx, cy);
            let p = polar_to_cartesian(center, r, angle);
            let delta = center - p;
            let recovered = pointer_to_angle(delta.x, delta.y);
            prop_assert!((0.0..360.0).contains(&recovered));
            prop_assert!(angle_distance(recovered, angle) < 1e-6);
        }

        #[test]
        fn prop_pointer_angle_in_range(dx in -1e6f64..1e6, dy in -1e6f64..1e6) {
            let a = pointer_to_angle(dx, dy);
            prop_assert!((0.0..360.0).contains(&a));
        }
    }
}
