//! Declarative scene for the initial mount
//!
//! Pairs the chart's geometry with theme paint. Built once per mount; drags
//! afterwards only patch geometry.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::chart::{Chart, LineDescriptor, SegmentGeometry, label_for};
use crate::settings::Theme;

/// One segment's nodes: wedge, connector and lettered marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentScene {
    pub index: usize,
    pub label: char,
    pub fill: String,
    pub geometry: SegmentGeometry,
}

/// One boundary handle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandleScene {
    pub index: usize,
    pub line: LineDescriptor,
}

/// Full chart description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub view_box: f64,
    pub theme: Theme,
    pub segments: Vec<SegmentScene>,
    pub handles: Vec<HandleScene>,
}

impl Scene {
    pub fn from_chart(chart: &Chart) -> Self {
        let config = chart.config();
        let fills = palette(&config.theme, chart.store().len());

        let segments = fills
            .into_iter()
            .enumerate()
            .filter_map(|(index, fill)| {
                chart.segment_geometry(index).map(|geometry| SegmentScene {
                    index,
                    label: label_for(index),
                    fill,
                    geometry,
                })
            })
            .collect();

        let handles = (0..chart.store().len())
            .filter_map(|index| chart.handle(index).map(|line| HandleScene { index, line }))
            .collect();

        Self {
            view_box: config.view_box,
            theme: config.theme.clone(),
            segments,
            handles,
        }
    }
}

/// Fill color per segment
///
/// A fixed `arc_fill` is used for every segment; otherwise each segment gets
/// a random 24-bit color from a seeded generator.
pub fn palette(theme: &Theme, count: usize) -> Vec<String> {
    if let Some(fill) = &theme.arc_fill {
        return vec![fill.clone(); count];
    }

    let seed = theme.palette_seed.unwrap_or_else(default_seed);
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..count)
        .map(|_| format!("#{:06x}", rng.random_range(0..=0xff_ffff_u32)))
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn default_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn default_seed() -> u64 {
    0
}
