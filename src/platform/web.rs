//! Browser platform
//!
//! Mounts the chart as SVG inside a host element and wires pointer input:
//! `mousedown` on each handle starts a drag, `mousemove`/`mouseup` on the
//! window drive and end it. Dropping the [`ChartHandle`] removes the global
//! listeners and the SVG.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent, Window};

use crate::chart::{Chart, LineDescriptor, ScreenRect};
use crate::error::PlatformError;
use crate::renderer::{CircleNode, LineNode, MountedChart, PathNode, Scene, Surface, TextNode};
use crate::settings::ChartConfig;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

fn dom_err(err: JsValue) -> PlatformError {
    PlatformError::Dom(format!("{err:?}"))
}

/// Surface backed by live SVG elements
pub struct DomSurface {
    document: Document,
    host: Element,
}

impl DomSurface {
    pub fn new(document: Document, host: Element) -> Self {
        Self { document, host }
    }

    fn create(&self, parent: &Element, tag: &str) -> Result<Element, PlatformError> {
        let el = self.document.create_element_ns(Some(SVG_NS), tag).map_err(dom_err)?;
        parent.append_child(&el).map_err(dom_err)?;
        Ok(el)
    }
}

fn set(el: &Element, name: &str, value: impl ToString) -> Result<(), PlatformError> {
    el.set_attribute(name, &value.to_string()).map_err(dom_err)
}

fn set_line(el: &Element, line: &LineDescriptor) -> Result<(), PlatformError> {
    set(el, "x1", line.from.x)?;
    set(el, "y1", line.from.y)?;
    set(el, "x2", line.to.x)?;
    set(el, "y2", line.to.y)
}

impl Surface for DomSurface {
    type Node = Element;
    type Error = PlatformError;

    fn create_root(&mut self, view_box: f64) -> Result<Element, PlatformError> {
        let host = self.host.clone();
        let svg = self.create(&host, "svg")?;
        set(&svg, "viewBox", format!("0 0 {view_box} {view_box}"))?;
        set(&svg, "xmlns", SVG_NS)?;
        Ok(svg)
    }

    fn create_group(&mut self, parent: &Element, class: Option<&str>) -> Result<Element, PlatformError> {
        let g = self.create(parent, "g")?;
        if let Some(class) = class {
            set(&g, "class", class)?;
        }
        Ok(g)
    }

    fn draw_path(&mut self, parent: &Element, path: &PathNode) -> Result<Element, PlatformError> {
        let el = self.create(parent, "path")?;
        set(&el, "d", path.d)?;
        set(&el, "fill", path.fill)?;
        set(&el, "stroke-width", 0)?;
        set(&el, "stroke", "black")?;
        Ok(el)
    }

    fn draw_line(&mut self, parent: &Element, line: &LineNode) -> Result<Element, PlatformError> {
        let el = self.create(parent, "line")?;
        if let Some(class) = line.class {
            set(&el, "class", class)?;
        }
        set_line(&el, &line.line)?;
        set(&el, "stroke", line.stroke)?;
        set(&el, "stroke-width", line.width)?;
        if line.round_cap {
            set(&el, "stroke-linecap", "round")?;
        }
        Ok(el)
    }

    fn draw_circle(&mut self, parent: &Element, circle: &CircleNode) -> Result<Element, PlatformError> {
        let el = self.create(parent, "circle")?;
        set(&el, "cx", circle.center.x)?;
        set(&el, "cy", circle.center.y)?;
        set(&el, "r", circle.r)?;
        set(&el, "fill", circle.fill)?;
        Ok(el)
    }

    fn draw_text(&mut self, parent: &Element, text: &TextNode) -> Result<Element, PlatformError> {
        let el = self.create(parent, "text")?;
        set(&el, "x", text.at.x)?;
        set(&el, "y", text.at.y)?;
        set(&el, "text-anchor", "middle")?;
        set(&el, "font-size", text.font_size)?;
        set(&el, "stroke", text.color)?;
        set(&el, "dy", ".3em")?;
        el.set_text_content(Some(text.text));
        Ok(el)
    }

    fn patch_path(&mut self, node: &Element, d: &str) -> Result<(), PlatformError> {
        set(node, "d", d)
    }

    fn patch_line(&mut self, node: &Element, line: &LineDescriptor) -> Result<(), PlatformError> {
        set_line(node, line)
    }

    fn patch_circle(&mut self, node: &Element, center: DVec2) -> Result<(), PlatformError> {
        set(node, "cx", center.x)?;
        set(node, "cy", center.y)
    }

    fn patch_text(&mut self, node: &Element, at: DVec2) -> Result<(), PlatformError> {
        set(node, "x", at.x)?;
        set(node, "y", at.y)
    }
}

/// State shared by every listener
struct Mounted {
    chart: Chart,
    surface: DomSurface,
    nodes: MountedChart<Element>,
}

type MouseListener = Closure<dyn FnMut(MouseEvent)>;

/// A chart living in the page
///
/// Global listeners stay registered for as long as this value lives.
pub struct ChartHandle {
    state: Rc<RefCell<Mounted>>,
    window: Window,
    root: Element,
    on_move: MouseListener,
    on_release: MouseListener,
    _on_press: Vec<MouseListener>,
}

impl ChartHandle {
    /// Mount into the element with id `host_id`
    ///
    /// An optional JSON configuration is read from the host's `data-config`
    /// attribute.
    pub fn mount(host_id: &str) -> Result<Self, PlatformError> {
        let window = web_sys::window().ok_or_else(|| PlatformError::MissingElement("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| PlatformError::MissingElement("document".into()))?;
        let host = document
            .get_element_by_id(host_id)
            .ok_or_else(|| PlatformError::MissingElement(format!("#{host_id}")))?;

        let config = match host.get_attribute("data-config") {
            Some(json) => ChartConfig::from_json(&json)?,
            None => ChartConfig::default(),
        };
        let chart = Chart::new(config)?;

        let mut surface = DomSurface::new(document, host);
        let nodes = MountedChart::mount(&mut surface, &Scene::from_chart(&chart))?;
        let root = nodes.root.clone();
        let state = Rc::new(RefCell::new(Mounted {
            chart,
            surface,
            nodes,
        }));

        // Handle presses, scoped to each handle's hit line
        let mut on_press = Vec::new();
        let hit_lines: Vec<Element> = state
            .borrow()
            .nodes
            .handles
            .iter()
            .map(|h| h.hit_line.clone())
            .collect();
        for (boundary, hit_line) in hit_lines.iter().enumerate() {
            let state = state.clone();
            let closure = MouseListener::new(move |event: MouseEvent| {
                event.prevent_default();
                let mut m = state.borrow_mut();
                let r = m.nodes.root.get_bounding_client_rect();
                let rect = ScreenRect::new(r.left(), r.top(), r.width(), r.height());
                m.chart.press(boundary, rect);
            });
            hit_line
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .map_err(dom_err)?;
            on_press.push(closure);
        }

        // Move anywhere on the page
        let on_move = {
            let state = state.clone();
            MouseListener::new(move |event: MouseEvent| {
                let mut guard = state.borrow_mut();
                let m = &mut *guard;
                let pointer = DVec2::new(f64::from(event.client_x()), f64::from(event.client_y()));
                if let Some(patch) = m.chart.pointer_move(pointer) {
                    if let Err(err) = m.nodes.apply(&mut m.surface, &patch) {
                        log::error!("Render sync failed: {err}");
                    }
                }
            })
        };
        window
            .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())
            .map_err(dom_err)?;

        // Release anywhere on the page
        let on_release = {
            let state = state.clone();
            MouseListener::new(move |_event: MouseEvent| {
                state.borrow_mut().chart.release();
            })
        };
        window
            .add_event_listener_with_callback("mouseup", on_release.as_ref().unchecked_ref())
            .map_err(dom_err)?;

        log::info!("Chart mounted into #{host_id}");
        Ok(Self {
            state,
            window,
            root,
            on_move,
            on_release,
            _on_press: on_press,
        })
    }

    /// Current boundary angles, one per segment start
    pub fn boundaries(&self) -> Vec<f64> {
        let m = self.state.borrow();
        m.chart.store().segments().iter().map(|s| s.start_angle).collect()
    }

    /// Share of the circle held by each segment, in [0, 1]
    pub fn proportions(&self) -> Vec<f64> {
        let m = self.state.borrow();
        m.chart
            .store()
            .spans()
            .into_iter()
            .map(|span| span / crate::consts::FULL_TURN)
            .collect()
    }
}

impl Drop for ChartHandle {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("mousemove", self.on_move.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("mouseup", self.on_release.as_ref().unchecked_ref());
        self.root.remove();
        log::info!("Chart unmounted");
    }
}

/// JavaScript-facing chart; `free()` tears it down
#[wasm_bindgen]
pub struct DonutChart {
    handle: ChartHandle,
}

#[wasm_bindgen]
impl DonutChart {
    #[wasm_bindgen(constructor)]
    pub fn new(host_id: &str) -> Result<DonutChart, JsValue> {
        ChartHandle::mount(host_id)
            .map(|handle| Self { handle })
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    pub fn boundaries(&self) -> Vec<f64> {
        self.handle.boundaries()
    }

    pub fn proportions(&self) -> Vec<f64> {
        self.handle.proportions()
    }
}
