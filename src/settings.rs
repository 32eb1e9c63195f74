//! Chart configuration and theme
//!
//! Everything is fixed at construction time. Hosts may pass the
//! configuration as JSON (camelCase keys); missing fields take defaults.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BORDER_SIZE, DEFAULT_SEGMENTS, DEFAULT_VIEW_BOX};
use crate::error::ConfigError;

/// What happens when a boundary is dragged past a neighboring boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Boundaries may cross; a segment can collapse or invert
    #[default]
    Permissive,
    /// The dragged boundary stays between its two non-adjacent neighbors
    Clamp,
}

impl BoundaryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryPolicy::Permissive => "permissive",
            BoundaryPolicy::Clamp => "clamp",
        }
    }
}

/// Paint for the chart elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    /// Fill for every arc; `None` picks a random color per segment
    pub arc_fill: Option<String>,
    /// Seed for the random palette (wasm falls back to the clock)
    pub palette_seed: Option<u64>,

    // === Handles ===
    pub handle_color: String,
    pub handle_width: f64,

    // === Connectors and labels ===
    pub connector_color: String,
    pub connector_width: f64,
    /// Radius of the circular label marker
    pub label_radius: f64,
    pub label_font_size: f64,
    pub label_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            arc_fill: Some("#f6692e".to_string()),
            palette_seed: None,

            handle_color: "#fff".to_string(),
            handle_width: 4.0,

            connector_color: "#8a000c".to_string(),
            connector_width: 2.0,
            label_radius: 8.0,
            label_font_size: 8.0,
            label_color: "#fff".to_string(),
        }
    }
}

/// Construction-time chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    /// Side of the square drawing area
    pub view_box: f64,
    /// Number of segments (N >= 1)
    pub segments: usize,
    /// Annulus thickness
    pub border_size: f64,
    pub boundary_policy: BoundaryPolicy,
    pub theme: Theme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            view_box: DEFAULT_VIEW_BOX,
            segments: DEFAULT_SEGMENTS,
            border_size: DEFAULT_BORDER_SIZE,
            boundary_policy: BoundaryPolicy::default(),
            theme: Theme::default(),
        }
    }
}

impl ChartConfig {
    /// Parse a JSON configuration and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Center of the drawing area
    pub fn center(&self) -> DVec2 {
        DVec2::splat(self.view_box / 2.0)
    }

    /// Outer radius of the donut
    pub fn radius(&self) -> f64 {
        self.view_box / 2.0
    }

    /// Radius of the inner edge of the band
    pub fn inner_radius(&self) -> f64 {
        self.radius() - self.border_size
    }

    /// Reject configurations that would produce degenerate geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segments == 0 {
            return Err(ConfigError::NoSegments);
        }
        if !self.view_box.is_finite() || self.view_box <= 0.0 {
            return Err(ConfigError::InvalidViewBox(self.view_box));
        }
        let max = self.radius();
        if !self.border_size.is_finite() || self.border_size <= 0.0 || self.border_size > max {
            return Err(ConfigError::InvalidBorder {
                got: self.border_size,
                max,
            });
        }

        let theme = &self.theme;
        for (field, got) in [
            ("handleWidth", theme.handle_width),
            ("connectorWidth", theme.connector_width),
            ("labelRadius", theme.label_radius),
            ("labelFontSize", theme.label_font_size),
        ] {
            if !got.is_finite() || got < 0.0 {
                return Err(ConfigError::InvalidTheme { field, got });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_chart() {
        let config = ChartConfig::default();
        assert_eq!(config.view_box, 150.0);
        assert_eq!(config.segments, 6);
        assert_eq!(config.border_size, 35.0);
        assert_eq!(config.center(), DVec2::new(75.0, 75.0));
        assert_eq!(config.inner_radius(), 40.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ChartConfig::from_json(r#"{"segments": 4, "boundaryPolicy": "clamp"}"#).unwrap();
        assert_eq!(config.segments, 4);
        assert_eq!(config.boundary_policy, BoundaryPolicy::Clamp);
        assert_eq!(config.view_box, 150.0);
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn test_from_json_theme() {
        let config =
            ChartConfig::from_json(r##"{"theme": {"arcFill": null, "paletteSeed": 7, "handleColor": "#000"}}"##)
                .unwrap();
        assert_eq!(config.theme.arc_fill, None);
        assert_eq!(config.theme.palette_seed, Some(7));
        assert_eq!(config.theme.handle_color, "#000");
        assert_eq!(config.theme.connector_color, "#8a000c");
    }

    #[test]
    fn test_rejects_zero_segments() {
        let err = ChartConfig::from_json(r#"{"segments": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoSegments));
    }

    #[test]
    fn test_rejects_bad_border() {
        let config = ChartConfig {
            border_size: 80.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBorder { .. })));

        let config = ChartConfig {
            border_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBorder { .. })));

        // A border equal to the radius is a pie without a hole
        let config = ChartConfig {
            border_size: 75.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_view_box() {
        let config = ChartConfig {
            view_box: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidViewBox(_))));
    }

    #[test]
    fn test_rejects_negative_theme_width() {
        let mut config = ChartConfig::default();
        config.theme.connector_width = -1.0;
        match config.validate() {
            Err(ConfigError::InvalidTheme { field, .. }) => assert_eq!(field, "connectorWidth"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(ChartConfig::from_json("{"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            ChartConfig::from_json(r#"{"segments": -3}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(BoundaryPolicy::Clamp.as_str(), "clamp");
        let json = serde_json::to_string(&BoundaryPolicy::Permissive).unwrap();
        assert_eq!(json, "\"permissive\"");
    }
}
