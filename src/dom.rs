//! In-memory SVG document.
//!
//! Nodes live in an arena and are addressed by [`NodeId`], so a node handle has identity
//! semantics just like a browser element reference. Layout facts a browser would compute
//! (bounding boxes, screen CTMs) are plain values set by whoever drives the document.

use std::cell::Cell;
use std::fmt;

use crate::defaults::{SVG_NS, XML_NS, XMLNS_NS};
use crate::errors::{DomError, SvgError};
use crate::host::{LegacyClip, SvgHost};
use crate::log::debug;
use crate::parse;
use crate::types::{Matrix, Rect};

/// Handle to a node in an [`SvgDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single attribute; `name` is the qualified name (`xlink:href`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attr {
    pub namespace: Option<String>,
    pub name: String,
    pub value: String,
}

/// Host-computed facts about an element.
#[derive(Clone, Debug, Default)]
struct Layout {
    bounding_box: Rect,
    screen_ctm: Option<Matrix>,
    legacy_clip: Option<LegacyClip>,
    pixel_width: Option<String>,
    corresponding: Option<NodeId>,
}

#[derive(Clone, Debug)]
struct ElementData {
    namespace: Option<String>,
    tag_name: String,
    attrs: Vec<Attr>,
    layout: Layout,
}

#[derive(Clone, Debug)]
enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed SVG document implementing [`SvgHost`].
#[derive(Debug)]
pub struct SvgDocument {
    nodes: Vec<Node>,
    ctm_queries: Cell<usize>,
}

impl Default for SvgDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgDocument {
    /// Create a document holding only its document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
            ctm_queries: Cell::new(0),
        }
    }

    /// Parse SVG (or any XML) markup. The root element becomes a child of the
    /// document node. Comments and processing instructions are dropped.
    pub fn parse(markup: &str) -> Result<Self, DomError> {
        let xml = roxmltree::Document::parse(markup)?;
        let mut doc = Self::new();
        let root = doc.import(xml.root_element())?;
        doc.append(doc.document(), root)?;
        debug!(nodes = doc.nodes.len(), "parsed svg document");
        Ok(doc)
    }

    fn import(&mut self, node: roxmltree::Node<'_, '_>) -> Result<NodeId, DomError> {
        let tag = node.tag_name();
        let mut attrs = Vec::new();

        // Namespace declarations are not attributes in roxmltree; re-create the ones
        // this element introduces so serialization stays well-formed.
        let inherited: Vec<(Option<&str>, &str)> = node
            .parent_element()
            .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
            .unwrap_or_default();
        let mut introduced: Vec<(Option<&str>, &str)> = node
            .namespaces()
            .map(|ns| (ns.name(), ns.uri()))
            .filter(|ns| ns.0 != Some("xml") && !inherited.contains(ns))
            .collect();
        // Default namespace first, then prefixes alphabetically.
        introduced.sort();
        for (prefix, uri) in introduced {
            let name = match prefix {
                Some(prefix) => format!("xmlns:{prefix}"),
                None => "xmlns".to_string(),
            };
            attrs.push(Attr {
                namespace: Some(XMLNS_NS.to_string()),
                name,
                value: uri.to_string(),
            });
        }

        for attr in node.attributes() {
            // Attributes never use the default namespace, so only a named prefix will do.
            let prefix = attr.namespace().and_then(|uri| {
                if uri == XML_NS {
                    return Some("xml");
                }
                node.namespaces()
                    .find(|ns| ns.uri() == uri && ns.name().is_some())
                    .and_then(|ns| ns.name())
            });
            let name = match prefix {
                Some(prefix) => format!("{prefix}:{}", attr.name()),
                None => attr.name().to_string(),
            };
            attrs.push(Attr {
                namespace: attr.namespace().map(str::to_string),
                name,
                value: attr.value().to_string(),
            });
        }

        let id = self.alloc(NodeKind::Element(ElementData {
            // `xmlns=""` resolves to an empty URI, which means no namespace.
            namespace: tag
                .namespace()
                .filter(|ns| !ns.is_empty())
                .map(str::to_string),
            tag_name: tag.name().to_string(),
            attrs,
            layout: Layout::default(),
        }));

        for child in node.children() {
            let child_id = if child.is_element() {
                self.import(child)?
            } else if child.is_text() {
                self.create_text(child.text().unwrap_or_default())
            } else {
                continue;
            };
            self.append(id, child_id)?;
        }
        Ok(id)
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.0).ok_or(DomError::UnknownNode { id: id.0 })
    }

    fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(DomError::UnknownNode { id: id.0 })?;
        match &mut node.kind {
            NodeKind::Element(data) => Ok(data),
            _ => Err(DomError::NotAnElement { id: id.0 }),
        }
    }

    // =======================================================================
    // Structure
    // =======================================================================

    /// The document node (parent of the root element).
    pub fn document(&self) -> NodeId {
        NodeId(0)
    }

    /// The root element, if one has been attached.
    pub fn root(&self) -> Option<NodeId> {
        self.nodes[0]
            .children
            .iter()
            .copied()
            .find(|id| self.element(*id).is_some())
    }

    pub fn create_element(&mut self, namespace: Option<&str>, tag_name: &str) -> NodeId {
        self.alloc(NodeKind::Element(ElementData {
            namespace: namespace.map(str::to_string),
            tag_name: tag_name.to_string(),
            attrs: Vec::new(),
            layout: Layout::default(),
        }))
    }

    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.alloc(NodeKind::Text(data.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it from its old parent.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if matches!(self.node(parent)?.kind, NodeKind::Text(_)) {
            return Err(DomError::NotAnElement { id: parent.0 });
        }
        self.node(child)?;
        if self.is_inclusive_ancestor(child, parent) || child == self.document() {
            return Err(DomError::HierarchyRequest {
                parent: parent.0,
                child: child.0,
            });
        }

        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes.get(node.0).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Text content of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Text(data) => Some(data),
            _ => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag_name.as_str())
    }

    pub fn namespace(&self, id: NodeId) -> Option<&str> {
        self.element(id)?.namespace.as_deref()
    }

    // =======================================================================
    // Attributes
    // =======================================================================

    /// Attribute by qualified name.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn attrs(&self, id: NodeId) -> &[Attr] {
        self.element(id).map(|e| e.attrs.as_slice()).unwrap_or(&[])
    }

    /// `setAttribute`: match on qualified name, append when absent.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let element = self.element_mut(id)?;
        match element.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => element.attrs.push(Attr {
                namespace: None,
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
        Ok(())
    }

    /// `setAttributeNS`: match on namespace and qualified name, append when absent.
    pub fn set_attr_ns(
        &mut self,
        id: NodeId,
        namespace: Option<&str>,
        qualified_name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let element = self.element_mut(id)?;
        let existing = element
            .attrs
            .iter_mut()
            .find(|a| a.namespace.as_deref() == namespace && a.name == qualified_name);
        match existing {
            Some(attr) => attr.value = value.to_string(),
            None => element.attrs.push(Attr {
                namespace: namespace.map(str::to_string),
                name: qualified_name.to_string(),
                value: value.to_string(),
            }),
        }
        Ok(())
    }

    // =======================================================================
    // Layout facts
    // =======================================================================

    pub fn set_bounding_box(&mut self, id: NodeId, rect: Rect) -> Result<(), DomError> {
        self.element_mut(id)?.layout.bounding_box = rect;
        Ok(())
    }

    pub fn set_screen_ctm(&mut self, id: NodeId, ctm: Option<Matrix>) -> Result<(), DomError> {
        self.element_mut(id)?.layout.screen_ctm = ctm;
        Ok(())
    }

    pub fn set_legacy_clip(
        &mut self,
        id: NodeId,
        clip: Option<LegacyClip>,
    ) -> Result<(), DomError> {
        self.element_mut(id)?.layout.legacy_clip = clip;
        Ok(())
    }

    pub fn set_pixel_width(&mut self, id: NodeId, width: Option<&str>) -> Result<(), DomError> {
        self.element_mut(id)?.layout.pixel_width = width.map(str::to_string);
        Ok(())
    }

    /// Mark `instance` as a `<use>` instance of `real`.
    pub fn set_corresponding_element(
        &mut self,
        instance: NodeId,
        real: NodeId,
    ) -> Result<(), DomError> {
        self.node(real)?;
        self.element_mut(instance)?.layout.corresponding = Some(real);
        Ok(())
    }

    /// How many times the live screen CTM has been queried.
    pub fn screen_ctm_queries(&self) -> usize {
        self.ctm_queries.get()
    }

    // =======================================================================
    // Serialization
    // =======================================================================

    /// Serialize `id` and its subtree as markup.
    pub fn to_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, &mut out, &mut NsScope::new());
        out
    }

    fn write_markup(&self, id: NodeId, out: &mut String, scope: &mut NsScope) {
        let Some(node) = self.nodes.get(id.0) else {
            return;
        };
        let element = match &node.kind {
            NodeKind::Document => {
                for child in &node.children {
                    self.write_markup(*child, out, scope);
                }
                return;
            }
            NodeKind::Text(data) => return escape_into(out, data, false),
            NodeKind::Element(element) => element,
        };

        let frame = scope.len();
        let mut declares_default = false;
        for attr in &element.attrs {
            if let Some(prefix) = declared_prefix(&attr.name) {
                declares_default |= prefix.is_none();
                scope.bind(prefix, &attr.value);
            }
        }

        // Declarations the stored attributes do not provide.
        let mut extra: Vec<(String, String)> = Vec::new();
        let local = local_name(&element.tag_name);
        let tag = match element.namespace.as_deref() {
            Some(uri) if scope.resolve(None) == Some(uri) => local.to_string(),
            Some(uri) => match scope.prefix_for(uri) {
                Some(prefix) => format!("{prefix}:{local}"),
                None if !declares_default => {
                    scope.bind(None, uri);
                    extra.push(("xmlns".to_string(), uri.to_string()));
                    local.to_string()
                }
                None => {
                    let prefix = scope.fresh_prefix();
                    scope.bind(Some(prefix.as_str()), uri);
                    extra.push((format!("xmlns:{prefix}"), uri.to_string()));
                    format!("{prefix}:{local}")
                }
            },
            None => {
                if !declares_default && scope.resolve(None).is_some_and(|d| !d.is_empty()) {
                    scope.bind(None, "");
                    extra.push(("xmlns".to_string(), String::new()));
                }
                local.to_string()
            }
        };

        let names: Vec<String> = element
            .attrs
            .iter()
            .map(|attr| attribute_name(attr, scope, &mut extra))
            .collect();

        out.push('<');
        out.push_str(&tag);
        for (name, value) in &extra {
            write_attribute(out, name, value);
        }
        for (name, attr) in names.iter().zip(&element.attrs) {
            write_attribute(out, name, &attr.value);
        }
        if node.children.is_empty() {
            out.push_str("/>");
        } else {
            out.push('>');
            for child in &node.children {
                self.write_markup(*child, out, scope);
            }
            out.push_str("</");
            out.push_str(&tag);
            out.push('>');
        }
        scope.truncate(frame);
    }
}

/// Namespace bindings in scope while serializing; later bindings shadow earlier ones.
struct NsScope {
    bindings: Vec<(Option<String>, String)>,
}

impl NsScope {
    fn new() -> Self {
        Self {
            bindings: vec![(Some("xml".to_string()), XML_NS.to_string())],
        }
    }

    fn len(&self) -> usize {
        self.bindings.len()
    }

    fn truncate(&mut self, len: usize) {
        self.bindings.truncate(len);
    }

    fn bind(&mut self, prefix: Option<&str>, uri: &str) {
        self.bindings.push((prefix.map(str::to_string), uri.to_string()));
    }

    fn resolve(&self, prefix: Option<&str>) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|(p, _)| p.as_deref() == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// A prefix currently bound to `uri` and not shadowed.
    fn prefix_for(&self, uri: &str) -> Option<String> {
        self.bindings
            .iter()
            .rev()
            .filter(|(_, u)| u == uri)
            .filter_map(|(p, _)| p.as_deref())
            .find(|p| self.resolve(Some(*p)) == Some(uri))
            .map(str::to_string)
    }

    fn fresh_prefix(&self) -> String {
        let mut n = 0;
        loop {
            let prefix = format!("ns{n}");
            if self.resolve(Some(prefix.as_str())).is_none() {
                return prefix;
            }
            n += 1;
        }
    }
}

/// `Some(None)` for `xmlns`, `Some(Some(p))` for `xmlns:p`.
fn declared_prefix(name: &str) -> Option<Option<&str>> {
    match name.strip_prefix("xmlns") {
        Some("") => Some(None),
        Some(rest) => rest.strip_prefix(':').map(Some),
        None => None,
    }
}

fn local_name(qualified: &str) -> &str {
    qualified.rsplit_once(':').map_or(qualified, |(_, local)| local)
}

/// Name to serialize `attr` under, binding its namespace when nothing in scope does.
fn attribute_name(attr: &Attr, scope: &mut NsScope, extra: &mut Vec<(String, String)>) -> String {
    let Some(uri) = attr.namespace.as_deref() else {
        return attr.name.clone();
    };
    if declared_prefix(&attr.name).is_some() {
        return attr.name.clone();
    }
    let (prefix, local) = match attr.name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, attr.name.as_str()),
    };
    if let Some(prefix) = prefix {
        match scope.resolve(Some(prefix)).map(str::to_string) {
            Some(bound) if bound == uri => return attr.name.clone(),
            None => {
                scope.bind(Some(prefix), uri);
                extra.push((format!("xmlns:{prefix}"), uri.to_string()));
                return attr.name.clone();
            }
            Some(_) => {}
        }
    }
    let prefix = match scope.prefix_for(uri) {
        Some(prefix) => prefix,
        None => {
            let prefix = scope.fresh_prefix();
            scope.bind(Some(prefix.as_str()), uri);
            extra.push((format!("xmlns:{prefix}"), uri.to_string()));
            prefix
        }
    };
    format!("{prefix}:{local}")
}

fn write_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_into(out, value, true);
    out.push('"');
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup(self.document()))
    }
}

impl SvgHost for SvgDocument {
    type Node = NodeId;

    fn bounding_client_rect(&self, node: &NodeId) -> Rect {
        self.element(*node)
            .map(|e| e.layout.bounding_box)
            .unwrap_or_default()
    }

    fn legacy_clip(&self, node: &NodeId) -> Option<LegacyClip> {
        self.element(*node)?.layout.legacy_clip.clone()
    }

    fn legacy_pixel_width(&self, node: &NodeId) -> Option<String> {
        self.element(*node)?.layout.pixel_width.clone()
    }

    fn style_property(&self, node: &NodeId, name: &str) -> Option<String> {
        parse::style_property(self.attr(*node, "style")?, name)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.attr(*node, name).map(str::to_string)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), SvgError> {
        Ok(self.set_attr(*node, name, value)?)
    }

    fn set_attribute_ns(
        &mut self,
        node: &NodeId,
        namespace: Option<&str>,
        qualified_name: &str,
        value: &str,
    ) -> Result<(), SvgError> {
        Ok(self.set_attr_ns(*node, namespace, qualified_name, value)?)
    }

    fn tag_name(&self, node: &NodeId) -> Option<String> {
        self.tag(*node).map(str::to_string)
    }

    fn parent_node(&self, node: &NodeId) -> Option<NodeId> {
        self.parent(*node)
    }

    fn child_nodes(&self, node: &NodeId) -> Vec<NodeId> {
        self.children(*node).to_vec()
    }

    fn create_svg_element(&mut self, local_name: &str) -> Result<NodeId, SvgError> {
        Ok(self.create_element(Some(SVG_NS), local_name))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), SvgError> {
        Ok(self.append(*parent, *child)?)
    }

    fn screen_ctm(&self, node: &NodeId) -> Option<Matrix> {
        self.ctm_queries.set(self.ctm_queries.get() + 1);
        self.element(*node)?.layout.screen_ctm
    }

    fn owner_svg_element(&self, node: &NodeId) -> Option<NodeId> {
        let mut current = self.parent(*node);
        while let Some(id) = current {
            if self.tag(id) == Some("svg") {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    fn corresponding_element(&self, node: &NodeId) -> Option<NodeId> {
        self.element(*node)?.layout.corresponding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::XLINK_NS;
    use insta::assert_snapshot;

    const SAMPLE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="200"><rect id="r" x="1"/><use xlink:href="#r"/>hi &amp; bye</svg>"##;

    #[test]
    fn parse_and_serialize_round_trip() {
        let doc = SvgDocument::parse(SAMPLE).unwrap();
        assert_snapshot!(doc.to_string(), @r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="200"><rect id="r" x="1"/><use xlink:href="#r"/>hi &amp; bye</svg>"##);
    }

    #[test]
    fn parsed_root_hangs_off_the_document_node() {
        let doc = SvgDocument::parse(SAMPLE).unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc.parent(root), Some(doc.document()));
        assert_eq!(doc.tag(root), Some("svg"));
        assert_eq!(doc.namespace(root), Some(SVG_NS));
        assert_eq!(doc.children(root).len(), 3);
    }

    #[test]
    fn namespaced_attributes_keep_their_prefix() {
        let doc = SvgDocument::parse(SAMPLE).unwrap();
        let root = doc.root().unwrap();
        let use_el = doc.children(root)[1];
        let href = &doc.attrs(use_el)[0];
        assert_eq!(href.name, "xlink:href");
        assert_eq!(href.namespace.as_deref(), Some("http://www.w3.org/1999/xlink"));
    }

    #[test]
    fn prefixed_elements_keep_their_namespace() {
        let markup = r#"<s:svg xmlns:s="http://www.w3.org/2000/svg"><s:rect/></s:svg>"#;
        let mut doc = SvgDocument::parse(markup).unwrap();
        let root = doc.root().unwrap();
        assert_snapshot!(doc.to_markup(root), @r#"<s:svg xmlns:s="http://www.w3.org/2000/svg"><s:rect/></s:svg>"#);

        let g = doc.create_element(Some(SVG_NS), "g");
        doc.append(root, g).unwrap();
        let out = doc.to_markup(root);
        assert_snapshot!(out, @r#"<s:svg xmlns:s="http://www.w3.org/2000/svg"><s:rect/><s:g/></s:svg>"#);

        let reparsed = SvgDocument::parse(&out).unwrap();
        let root = reparsed.root().unwrap();
        for child in reparsed.children(root) {
            assert_eq!(reparsed.namespace(*child), Some(SVG_NS));
        }
    }

    #[test]
    fn namespaced_attribute_without_declaration_gets_one() {
        let mut doc =
            SvgDocument::parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><use/></svg>"#).unwrap();
        let root = doc.root().unwrap();
        let use_el = doc.children(root)[0];
        doc.set_attr_ns(use_el, Some(XLINK_NS), "xlink:href", "#a").unwrap();

        let out = doc.to_markup(root);
        assert_snapshot!(out, @r##"<svg xmlns="http://www.w3.org/2000/svg"><use xmlns:xlink="http://www.w3.org/1999/xlink" xlink:href="#a"/></svg>"##);

        let reparsed = SvgDocument::parse(&out).unwrap();
        let use_el = reparsed.children(reparsed.root().unwrap())[0];
        let href = reparsed
            .attrs(use_el)
            .iter()
            .find(|a| a.name == "xlink:href")
            .unwrap();
        assert_eq!(href.namespace.as_deref(), Some(XLINK_NS));
        assert_eq!(href.value, "#a");
    }

    #[test]
    fn namespaced_attribute_with_clashing_prefix_is_renamed() {
        let mut doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="urn:other"><use/></svg>"#,
        )
        .unwrap();
        let root = doc.root().unwrap();
        let use_el = doc.children(root)[0];
        doc.set_attr_ns(use_el, Some(XLINK_NS), "xlink:href", "#a").unwrap();

        let out = doc.to_markup(root);
        assert_snapshot!(out, @r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="urn:other"><use xmlns:ns0="http://www.w3.org/1999/xlink" ns0:href="#a"/></svg>"##);
        assert!(SvgDocument::parse(&out).is_ok());
    }

    #[test]
    fn element_outside_any_namespace_resets_the_default() {
        let mut doc = SvgDocument::parse(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();
        let root = doc.root().unwrap();
        let plain = doc.create_element(None, "metadata");
        doc.append(root, plain).unwrap();

        let out = doc.to_markup(root);
        assert_snapshot!(out, @r#"<svg xmlns="http://www.w3.org/2000/svg"><metadata xmlns=""/></svg>"#);
        let reparsed = SvgDocument::parse(&out).unwrap();
        let plain = reparsed.children(reparsed.root().unwrap())[0];
        assert_eq!(reparsed.namespace(plain), None);
    }

    #[test]
    fn detached_subtree_declares_what_it_uses() {
        let mut doc = SvgDocument::new();
        let g = doc.create_element(Some(SVG_NS), "g");
        let rect = doc.create_element(Some(SVG_NS), "rect");
        doc.append(g, rect).unwrap();
        assert_snapshot!(doc.to_markup(g), @r#"<g xmlns="http://www.w3.org/2000/svg"><rect/></g>"#);
    }

    #[test]
    fn append_moves_node_between_parents() {
        let mut doc = SvgDocument::new();
        let a = doc.create_element(Some(SVG_NS), "g");
        let b = doc.create_element(Some(SVG_NS), "g");
        let leaf = doc.create_element(Some(SVG_NS), "circle");
        doc.append(a, leaf).unwrap();
        doc.append(b, leaf).unwrap();
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[leaf]);
        assert_eq!(doc.parent(leaf), Some(b));
    }

    #[test]
    fn append_rejects_cycles() {
        let mut doc = SvgDocument::new();
        let outer = doc.create_element(Some(SVG_NS), "g");
        let inner = doc.create_element(Some(SVG_NS), "g");
        doc.append(outer, inner).unwrap();
        assert!(matches!(
            doc.append(inner, outer),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert!(matches!(
            doc.append(outer, outer),
            Err(DomError::HierarchyRequest { .. })
        ));
    }

    #[test]
    fn text_nodes_cannot_have_children() {
        let mut doc = SvgDocument::new();
        let text = doc.create_text("x");
        let g = doc.create_element(Some(SVG_NS), "g");
        assert!(matches!(doc.append(text, g), Err(DomError::NotAnElement { .. })));
        assert!(matches!(
            doc.set_attr(text, "class", "a"),
            Err(DomError::NotAnElement { .. })
        ));
    }

    #[test]
    fn set_attr_ns_updates_matching_declaration() {
        let mut doc = SvgDocument::parse(SAMPLE).unwrap();
        let root = doc.root().unwrap();
        doc.set_attr_ns(root, Some(XMLNS_NS), "xmlns:xlink", "urn:other").unwrap();
        let declarations = doc
            .attrs(root)
            .iter()
            .filter(|a| a.name == "xmlns:xlink")
            .count();
        assert_eq!(declarations, 1);
        assert_eq!(doc.attr(root, "xmlns:xlink"), Some("urn:other"));
    }

    #[test]
    fn owner_svg_is_nearest_svg_ancestor() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g><svg><rect/></svg></g></svg>"#,
        )
        .unwrap();
        let outer = doc.root().unwrap();
        let g = doc.children(outer)[0];
        let inner = doc.children(g)[0];
        let rect = doc.children(inner)[0];
        assert_eq!(doc.owner_svg_element(&rect), Some(inner));
        assert_eq!(doc.owner_svg_element(&inner), Some(outer));
        assert_eq!(doc.owner_svg_element(&outer), None);
    }

    #[test]
    fn inline_style_lookup() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" style="width: 300px; height: 50%"/>"#,
        )
        .unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc.style_property(&root, "width").as_deref(), Some("300px"));
        assert_eq!(doc.style_property(&root, "height").as_deref(), Some("50%"));
        assert_eq!(doc.style_property(&root, "overflow"), None);
    }

    #[test]
    fn screen_ctm_queries_are_counted() {
        let mut doc = SvgDocument::new();
        let svg = doc.create_element(Some(SVG_NS), "svg");
        doc.set_screen_ctm(svg, Some(Matrix::translate(1.0, 2.0))).unwrap();
        assert_eq!(doc.screen_ctm(&svg), Some(Matrix::translate(1.0, 2.0)));
        assert_eq!(doc.screen_ctm(&svg), Some(Matrix::translate(1.0, 2.0)));
        assert_eq!(doc.screen_ctm_queries(), 2);
    }

    #[test]
    fn invalid_markup_is_a_parse_error() {
        assert!(matches!(
            SvgDocument::parse("<svg><g></svg>"),
            Err(DomError::Parse(_))
        ));
    }
}
