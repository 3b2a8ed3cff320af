//! The host DOM/SVG environment, seen through a trait.
//!
//! Everything this crate knows about a document goes through [`SvgHost`]. The browser
//! binding lives in [`crate::web`] (feature `web`); [`crate::dom::SvgDocument`] is an
//! in-memory implementation used for tests and headless tooling.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::errors::SvgError;
use crate::types::{Matrix, Rect, ScreenPoint};

/// Legacy `clip` property exposed by old engines on SVG roots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LegacyClip {
    /// Textual form of the property itself, probed with `parseFloat`
    pub value: String,
    pub width: Option<String>,
    pub height: Option<String>,
}

/// Access to the host document.
///
/// `Node` is a handle with identity semantics: two handles compare equal only when they
/// refer to the same node.
pub trait SvgHost {
    type Node: Clone + PartialEq + fmt::Debug;

    /// Rendered box of the element in client pixels.
    fn bounding_client_rect(&self, node: &Self::Node) -> Rect;

    fn legacy_clip(&self, node: &Self::Node) -> Option<LegacyClip>;

    /// Legacy `style.pixelWidth`.
    fn legacy_pixel_width(&self, node: &Self::Node) -> Option<String>;

    /// Inline style property (`width`, `height`, ...). Empty values read as `None`.
    fn style_property(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<(), SvgError>;

    fn set_attribute_ns(
        &mut self,
        node: &Self::Node,
        namespace: Option<&str>,
        qualified_name: &str,
        value: &str,
    ) -> Result<(), SvgError>;

    /// Tag name as the host reports it; `None` for non-element nodes.
    fn tag_name(&self, node: &Self::Node) -> Option<String>;

    fn parent_node(&self, node: &Self::Node) -> Option<Self::Node>;

    /// All child nodes (elements and text) in document order.
    fn child_nodes(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Create a detached element in the SVG namespace.
    fn create_svg_element(&mut self, local_name: &str) -> Result<Self::Node, SvgError>;

    /// Append `child` to `parent`, detaching it from its current parent first.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), SvgError>;

    /// Live screen CTM; `None` when the element is not rendered.
    fn screen_ctm(&self, node: &Self::Node) -> Option<Matrix>;

    fn owner_svg_element(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Real element behind a `<use>` instance.
    fn corresponding_element(&self, node: &Self::Node) -> Option<Self::Node>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// First descendant `<g>` carrying `class`, in document order (`g.class` selector).
    fn find_group_with_class(&self, root: &Self::Node, class: &str) -> Option<Self::Node> {
        find_group_depth_first(self, root, class)
    }
}

/// Depth-first walk over `child_nodes` for the first `<g>` below `root` carrying `class`.
///
/// Class names are compared verbatim, so names that are not valid CSS identifiers
/// (`2d`, `pz:root`) still match.
pub fn find_group_depth_first<H: SvgHost + ?Sized>(
    host: &H,
    root: &H::Node,
    class: &str,
) -> Option<H::Node> {
    let mut stack: Vec<H::Node> = host.child_nodes(root).into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        if host.tag_name(&node).as_deref() == Some("g") && host.has_class(&node, class) {
            return Some(node);
        }
        stack.extend(host.child_nodes(&node).into_iter().rev());
    }
    None
}

/// Host-independent view of a mouse or pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent<N> {
    pub client_x: f64,
    pub client_y: f64,
    pub target: N,
}

impl<N> PointerEvent<N> {
    pub fn new(client_x: f64, client_y: f64, target: N) -> Self {
        Self {
            client_x,
            client_y,
            target,
        }
    }

    /// Raw client coordinates, no transform applied.
    pub fn client_point(&self) -> ScreenPoint {
        ScreenPoint::from_xy(self.client_x, self.client_y)
    }
}

// ============================================================================
// Time sources
// ============================================================================

/// Monotonic time source for cache staleness checks.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by `std::time::Instant`.
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one handle and
/// give another to a cache.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(Duration::from_millis(120));
        assert_eq!(clock.now(), Duration::from_millis(120));
        clock.set(Duration::from_secs(2));
        assert_eq!(handle.now(), Duration::from_secs(2));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn depth_first_search_matches_class_tokens_verbatim() {
        let doc = crate::dom::SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g class="x"><g class="pz:root 2d"/></g><g class="2d"/></svg>"#,
        )
        .unwrap();
        let svg = doc.root().unwrap();
        let outer = doc.children(svg)[0];
        let nested = doc.children(outer)[0];

        assert_eq!(find_group_depth_first(&doc, &svg, "2d"), Some(nested));
        assert_eq!(find_group_depth_first(&doc, &svg, "pz:root"), Some(nested));
        assert_eq!(find_group_depth_first(&doc, &svg, "pz"), None);
        assert_eq!(find_group_depth_first(&doc, &svg, "x"), Some(outer));
    }

    #[test]
    fn pointer_event_client_point() {
        let event = PointerEvent::new(12.5, -4.0, ());
        assert_eq!(event.client_point(), ScreenPoint::from_xy(12.5, -4.0));
    }
}
