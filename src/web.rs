//! Browser backend over `web-sys` (feature `web`).

use std::time::Duration;

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent, Node, SvgElement, SvgGraphicsElement};

use crate::defaults::SVG_NS;
use crate::errors::SvgError;
use crate::host::{Clock, LegacyClip, PointerEvent, SvgHost, find_group_depth_first};
use crate::log::warn;
use crate::types::{Matrix, Rect};

/// [`SvgHost`] over the live browser DOM.
#[derive(Debug, Clone)]
pub struct WebHost {
    document: Document,
}

impl WebHost {
    /// Host for the current window's document.
    pub fn new() -> Result<Self, SvgError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SvgError::Host {
                message: "no window document available".to_string(),
            })?;
        Ok(Self { document })
    }

    pub fn with_document(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn js_error(err: JsValue) -> SvgError {
    SvgError::Host {
        message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}

fn not_an_element(node: &Node) -> SvgError {
    SvgError::Host {
        message: format!("{} is not an element", node.node_name()),
    }
}

/// Textual form of a JS value, like string concatenation would produce.
fn js_to_text(value: &JsValue) -> Option<String> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    if let Some(s) = value.as_string() {
        return Some(s);
    }
    if let Some(n) = value.as_f64() {
        return Some(ryu_js::Buffer::new().format(n).to_string());
    }
    Some(String::from(value.unchecked_ref::<js_sys::Object>().to_string()))
}

fn property(target: &JsValue, name: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

impl SvgHost for WebHost {
    type Node = Node;

    fn bounding_client_rect(&self, node: &Node) -> Rect {
        match node.dyn_ref::<Element>() {
            Some(el) => {
                let rect = el.get_bounding_client_rect();
                Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
            }
            None => Rect::default(),
        }
    }

    fn legacy_clip(&self, node: &Node) -> Option<LegacyClip> {
        let clip = property(node, "clip")?;
        Some(LegacyClip {
            value: js_to_text(&clip)?,
            width: property(&clip, "width").and_then(|v| js_to_text(&v)),
            height: property(&clip, "height").and_then(|v| js_to_text(&v)),
        })
    }

    fn legacy_pixel_width(&self, node: &Node) -> Option<String> {
        let style = node.dyn_ref::<SvgElement>()?.style();
        property(&style, "pixelWidth").and_then(|v| js_to_text(&v))
    }

    fn style_property(&self, node: &Node, name: &str) -> Option<String> {
        node.dyn_ref::<SvgElement>()?
            .style()
            .get_property_value(name)
            .ok()
            .filter(|v| !v.is_empty())
    }

    fn attribute(&self, node: &Node, name: &str) -> Option<String> {
        node.dyn_ref::<Element>()?.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Node, name: &str, value: &str) -> Result<(), SvgError> {
        node.dyn_ref::<Element>()
            .ok_or_else(|| not_an_element(node))?
            .set_attribute(name, value)
            .map_err(js_error)
    }

    fn set_attribute_ns(
        &mut self,
        node: &Node,
        namespace: Option<&str>,
        qualified_name: &str,
        value: &str,
    ) -> Result<(), SvgError> {
        node.dyn_ref::<Element>()
            .ok_or_else(|| not_an_element(node))?
            .set_attribute_ns(namespace, qualified_name, value)
            .map_err(js_error)
    }

    fn tag_name(&self, node: &Node) -> Option<String> {
        node.dyn_ref::<Element>().map(Element::tag_name)
    }

    fn parent_node(&self, node: &Node) -> Option<Node> {
        node.parent_node()
    }

    fn child_nodes(&self, node: &Node) -> Vec<Node> {
        let list = node.child_nodes();
        (0..list.length()).filter_map(|i| list.get(i)).collect()
    }

    fn create_svg_element(&mut self, local_name: &str) -> Result<Node, SvgError> {
        let el = self
            .document
            .create_element_ns(Some(SVG_NS), local_name)
            .map_err(js_error)?;
        Ok(el.unchecked_into::<Node>())
    }

    fn append_child(&mut self, parent: &Node, child: &Node) -> Result<(), SvgError> {
        parent.append_child(child).map(|_| ()).map_err(js_error)
    }

    fn screen_ctm(&self, node: &Node) -> Option<Matrix> {
        let m = node.dyn_ref::<SvgGraphicsElement>()?.get_screen_ctm()?;
        Some(Matrix::new(
            f64::from(m.a()),
            f64::from(m.b()),
            f64::from(m.c()),
            f64::from(m.d()),
            f64::from(m.e()),
            f64::from(m.f()),
        ))
    }

    fn owner_svg_element(&self, node: &Node) -> Option<Node> {
        node.dyn_ref::<SvgElement>()?
            .owner_svg_element()
            .map(|svg| svg.unchecked_into::<Node>())
    }

    fn corresponding_element(&self, node: &Node) -> Option<Node> {
        property(node, "correspondingElement")?.dyn_into::<Node>().ok()
    }

    fn find_group_with_class(&self, root: &Node, class: &str) -> Option<Node> {
        let element = root.dyn_ref::<Element>()?;
        let selector = format!("g.{}", web_sys::css::escape(class));
        match element.query_selector(&selector) {
            Ok(found) => found.map(|el| el.unchecked_into::<Node>()),
            Err(_err) => {
                warn!(selector = %selector, error = ?_err, "selector rejected, walking the tree");
                find_group_depth_first(self, root, class)
            }
        }
    }
}

impl PointerEvent<Node> {
    /// View of a DOM mouse event; `None` when its target is not a node.
    pub fn from_mouse_event(event: &MouseEvent) -> Option<Self> {
        let target = event.target()?.dyn_into::<Node>().ok()?;
        Some(Self::new(
            f64::from(event.client_x()),
            f64::from(event.client_y()),
            target,
        ))
    }
}

/// [`Clock`] reading `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateClock;

impl Clock for DateClock {
    fn now(&self) -> Duration {
        Duration::from_millis(js_sys::Date::now().max(0.0) as u64)
    }
}
