//! In-memory SVG surface
//!
//! A flat element arena implementing [`Surface`]. Used by the native demo
//! and by tests to observe exactly which attributes render sync touches.

use std::convert::Infallible;
use std::fmt::Write;

use glam::DVec2;

use super::sync::{CircleNode, LineNode, PathNode, Surface, TextNode};
use crate::chart::LineDescriptor;

/// Handle to an element in an [`SvgDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    fn set(&mut self, name: &'static str, value: impl ToString) {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
    }
}

/// SVG element tree
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    elements: Vec<Element>,
    root: Option<NodeId>,
}

impl SvgDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements ever created
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Attribute value of an element
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.elements
            .get(node.0)?
            .attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Text content of an element
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.elements.get(node.0)?.text.as_deref()
    }

    pub fn tag(&self, node: NodeId) -> Option<&'static str> {
        self.elements.get(node.0).map(|e| e.tag)
    }

    /// Serialize the tree under the root as SVG markup
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root {
            self.write_element(&mut out, root, 0);
        }
        out
    }

    fn write_element(&self, out: &mut String, node: NodeId, depth: usize) {
        let el = &self.elements[node.0];
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", el.tag);
        for (name, value) in &el.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }

        if el.children.is_empty() && el.text.is_none() {
            out.push_str("/>\n");
            return;
        }
        out.push('>');
        if let Some(text) = &el.text {
            out.push_str(&escape(text));
        }
        if !el.children.is_empty() {
            out.push('\n');
            for child in &el.children {
                self.write_element(out, *child, depth + 1);
            }
            out.push_str(&indent);
        }
        let _ = writeln!(out, "</{}>", el.tag);
    }

    fn push(&mut self, parent: Option<NodeId>, element: Element) -> NodeId {
        let id = NodeId(self.elements.len());
        self.elements.push(element);
        if let Some(parent) = parent {
            self.elements[parent.0].children.push(id);
        }
        id
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.0)
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn set_line(el: &mut Element, line: &LineDescriptor) {
    el.set("x1", line.from.x);
    el.set("y1", line.from.y);
    el.set("x2", line.to.x);
    el.set("y2", line.to.y);
}

impl Surface for SvgDocument {
    type Node = NodeId;
    type Error = Infallible;

    fn create_root(&mut self, view_box: f64) -> Result<NodeId, Infallible> {
        let mut el = Element::new("svg");
        el.set("viewBox", format!("0 0 {view_box} {view_box}"));
        el.set("xmlns", "http://www.w3.org/2000/svg");
        let id = self.push(None, el);
        self.root = Some(id);
        Ok(id)
    }

    fn create_group(&mut self, parent: &NodeId, class: Option<&str>) -> Result<NodeId, Infallible> {
        let mut el = Element::new("g");
        if let Some(class) = class {
            el.set("class", class);
        }
        Ok(self.push(Some(*parent), el))
    }

    fn draw_path(&mut self, parent: &NodeId, path: &PathNode) -> Result<NodeId, Infallible> {
        let mut el = Element::new("path");
        el.set("d", path.d);
        el.set("fill", path.fill);
        el.set("stroke-width", 0);
        el.set("stroke", "black");
        Ok(self.push(Some(*parent), el))
    }

    fn draw_line(&mut self, parent: &NodeId, line: &LineNode) -> Result<NodeId, Infallible> {
        let mut el = Element::new("line");
        if let Some(class) = line.class {
            el.set("class", class);
        }
        set_line(&mut el, &line.line);
        el.set("stroke", line.stroke);
        el.set("stroke-width", line.width);
        if line.round_cap {
            el.set("stroke-linecap", "round");
        }
        Ok(self.push(Some(*parent), el))
    }

    fn draw_circle(&mut self, parent: &NodeId, circle: &CircleNode) -> Result<NodeId, Infallible> {
        let mut el = Element::new("circle");
        el.set("cx", circle.center.x);
        el.set("cy", circle.center.y);
        el.set("r", circle.r);
        el.set("fill", circle.fill);
        Ok(self.push(Some(*parent), el))
    }

    fn draw_text(&mut self, parent: &NodeId, text: &TextNode) -> Result<NodeId, Infallible> {
        let mut el = Element::new("text");
        el.set("x", text.at.x);
        el.set("y", text.at.y);
        el.set("text-anchor", "middle");
        el.set("font-size", text.font_size);
        el.set("stroke", text.color);
        el.set("dy", ".3em");
        el.text = Some(text.text.to_string());
        Ok(self.push(Some(*parent), el))
    }

    fn patch_path(&mut self, node: &NodeId, d: &str) -> Result<(), Infallible> {
        if let Some(el) = self.element_mut(*node) {
            el.set("d", d);
        }
        Ok(())
    }

    fn patch_line(&mut self, node: &NodeId, line: &LineDescriptor) -> Result<(), Infallible> {
        if let Some(el) = self.element_mut(*node) {
            set_line(el, line);
        }
        Ok(())
    }

    fn patch_circle(&mut self, node: &NodeId, center: DVec2) -> Result<(), Infallible> {
        if let Some(el) = self.element_mut(*node) {
            el.set("cx", center.x);
            el.set("cy", center.y);
        }
        Ok(())
    }

    fn patch_text(&mut self, node: &NodeId, at: DVec2) -> Result<(), Infallible> {
        if let Some(el) = self.element_mut(*node) {
            el.set("x", at.x);
            el.set("y", at.y);
        }
        Ok(())
    }
}
