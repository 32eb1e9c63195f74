//! Render sync
//!
//! A [`Surface`] draws primitives and hands back node handles. The chart is
//! mounted once; during a drag only the geometric attributes of existing
//! nodes are overwritten, so nothing is recreated while the pointer is held.

use glam::DVec2;

use super::scene::Scene;
use crate::chart::{LineDescriptor, PatchSet, SegmentGeometry};

/// Filled wedge
#[derive(Debug, Clone, PartialEq)]
pub struct PathNode<'a> {
    pub d: &'a str,
    pub fill: &'a str,
}

/// Stroked line
#[derive(Debug, Clone, PartialEq)]
pub struct LineNode<'a> {
    pub line: LineDescriptor,
    pub stroke: &'a str,
    pub width: f64,
    pub round_cap: bool,
    pub class: Option<&'a str>,
}

/// Filled circle
#[derive(Debug, Clone, PartialEq)]
pub struct CircleNode<'a> {
    pub center: DVec2,
    pub r: f64,
    pub fill: &'a str,
}

/// Centered single-line text
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode<'a> {
    pub at: DVec2,
    pub text: &'a str,
    pub font_size: f64,
    pub color: &'a str,
}

/// Rendering collaborator
pub trait Surface {
    type Node: Clone;
    type Error;

    /// Root drawing area, `view_box` units square
    fn create_root(&mut self, view_box: f64) -> Result<Self::Node, Self::Error>;
    fn create_group(&mut self, parent: &Self::Node, class: Option<&str>) -> Result<Self::Node, Self::Error>;
    fn draw_path(&mut self, parent: &Self::Node, path: &PathNode) -> Result<Self::Node, Self::Error>;
    fn draw_line(&mut self, parent: &Self::Node, line: &LineNode) -> Result<Self::Node, Self::Error>;
    fn draw_circle(&mut self, parent: &Self::Node, circle: &CircleNode) -> Result<Self::Node, Self::Error>;
    fn draw_text(&mut self, parent: &Self::Node, text: &TextNode) -> Result<Self::Node, Self::Error>;

    // === In-place patches ===
    fn patch_path(&mut self, node: &Self::Node, d: &str) -> Result<(), Self::Error>;
    fn patch_line(&mut self, node: &Self::Node, line: &LineDescriptor) -> Result<(), Self::Error>;
    fn patch_circle(&mut self, node: &Self::Node, center: DVec2) -> Result<(), Self::Error>;
    fn patch_text(&mut self, node: &Self::Node, at: DVec2) -> Result<(), Self::Error>;
}

/// Nodes drawn for one segment
#[derive(Debug, Clone)]
pub struct SegmentNodes<N> {
    pub group: N,
    pub path: N,
    pub connector: N,
    pub marker: N,
    pub label: N,
}

/// Nodes drawn for one handle
///
/// `hit_line` is the element that reports presses; `line` is what shows.
#[derive(Debug, Clone)]
pub struct HandleNodes<N> {
    pub group: N,
    pub line: N,
    pub hit_line: N,
}

/// A chart drawn on a surface, with handles to every node
#[derive(Debug, Clone)]
pub struct MountedChart<N> {
    pub root: N,
    pub segments: Vec<SegmentNodes<N>>,
    pub handles: Vec<HandleNodes<N>>,
}

impl<N: Clone> MountedChart<N> {
    /// Draw every node of `scene`; handles go on top of the wedges
    pub fn mount<S>(surface: &mut S, scene: &Scene) -> Result<Self, S::Error>
    where
        S: Surface<Node = N>,
    {
        let theme = &scene.theme;
        let root = surface.create_root(scene.view_box)?;

        let mut segments = Vec::with_capacity(scene.segments.len());
        for seg in &scene.segments {
            let group = surface.create_group(&root, None)?;
            let path = surface.draw_path(
                &group,
                &PathNode {
                    d: &seg.geometry.arc.path,
                    fill: &seg.fill,
                },
            )?;
            let connector = surface.draw_line(
                &group,
                &LineNode {
                    line: seg.geometry.connector,
                    stroke: &theme.connector_color,
                    width: theme.connector_width,
                    round_cap: false,
                    class: None,
                },
            )?;
            let marker = surface.draw_circle(
                &group,
                &CircleNode {
                    center: seg.geometry.connector.to,
                    r: theme.label_radius,
                    fill: &theme.connector_color,
                },
            )?;
            let letter = seg.label.to_string();
            let label = surface.draw_text(
                &group,
                &TextNode {
                    at: seg.geometry.connector.to,
                    text: &letter,
                    font_size: theme.label_font_size,
                    color: &theme.label_color,
                },
            )?;
            segments.push(SegmentNodes {
                group,
                path,
                connector,
                marker,
                label,
            });
        }

        let layer = surface.create_group(&root, Some("handlers"))?;
        let mut handles = Vec::with_capacity(scene.handles.len());
        for handle in &scene.handles {
            let group = surface.create_group(&layer, Some("handler-item"))?;
            let mut node = LineNode {
                line: handle.line,
                stroke: &theme.handle_color,
                width: theme.handle_width,
                round_cap: true,
                class: None,
            };
            let line = surface.draw_line(&group, &node)?;
            node.class = Some("handler-hit");
            let hit_line = surface.draw_line(&group, &node)?;
            handles.push(HandleNodes {
                group,
                line,
                hit_line,
            });
        }

        log::info!(
            "Mounted chart: {} segments, {} handles",
            segments.len(),
            handles.len()
        );
        Ok(Self {
            root,
            segments,
            handles,
        })
    }

    /// Overwrite one segment's path, connector, marker and label position
    pub fn patch_segment<S>(
        &self,
        surface: &mut S,
        index: usize,
        geometry: &SegmentGeometry,
    ) -> Result<(), S::Error>
    where
        S: Surface<Node = N>,
    {
        let Some(nodes) = self.segments.get(index) else {
            log::warn!("No mounted segment {index}");
            return Ok(());
        };
        surface.patch_path(&nodes.path, &geometry.arc.path)?;
        surface.patch_line(&nodes.connector, &geometry.connector)?;
        surface.patch_circle(&nodes.marker, geometry.connector.to)?;
        surface.patch_text(&nodes.label, geometry.connector.to)
    }

    /// Overwrite both lines of one handle
    pub fn patch_handle<S>(&self, surface: &mut S, index: usize, line: &LineDescriptor) -> Result<(), S::Error>
    where
        S: Surface<Node = N>,
    {
        let Some(nodes) = self.handles.get(index) else {
            log::warn!("No mounted handle {index}");
            return Ok(());
        };
        surface.patch_line(&nodes.line, line)?;
        surface.patch_line(&nodes.hit_line, line)
    }

    /// Push one drag move onto the surface
    pub fn apply<S>(&self, surface: &mut S, patch: &PatchSet) -> Result<(), S::Error>
    where
        S: Surface<Node = N>,
    {
        for seg in &patch.segments {
            self.patch_segment(surface, seg.index, &seg.geometry)?;
        }
        self.patch_handle(surface, patch.boundary, &patch.handle)
    }
}
