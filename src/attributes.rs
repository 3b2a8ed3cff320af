//! Namespace declarations and overflow fix-up for an SVG root.

use crate::defaults::{XLINK_NS, XML_EVENTS_NS, XMLNS_NS};
use crate::errors::SvgError;
use crate::host::SvgHost;

/// Declare the XLink and XML Events namespaces on `svg` and, when it is attached to a
/// parent, make sure its inline style hides overflow. Safe to call repeatedly.
pub fn setup_attributes<H: SvgHost>(host: &mut H, svg: &H::Node) -> Result<(), SvgError> {
    host.set_attribute_ns(svg, Some(XMLNS_NS), "xmlns:xlink", XLINK_NS)?;
    host.set_attribute_ns(svg, Some(XMLNS_NS), "xmlns:ev", XML_EVENTS_NS)?;

    // Nested viewports otherwise overflow their box in some engines.
    if host.parent_node(svg).is_some() {
        let style = host.attribute(svg, "style").unwrap_or_default();
        if !style.to_lowercase().contains("overflow") {
            host.set_attribute(svg, "style", &format!("overflow: hidden; {style}"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::SVG_NS;
    use crate::dom::SvgDocument;
    use insta::assert_snapshot;

    #[test]
    fn declares_namespaces_and_hides_overflow() {
        let mut doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" style="width: 10px"/>"#,
        )
        .unwrap();
        let svg = doc.root().unwrap();
        setup_attributes(&mut doc, &svg).unwrap();
        assert_snapshot!(doc.to_markup(svg), @r#"<svg xmlns="http://www.w3.org/2000/svg" style="overflow: hidden; width: 10px" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:ev="http://www.w3.org/2001/xml-events"/>"#);
    }

    #[test]
    fn running_twice_changes_nothing() {
        let mut doc = SvgDocument::parse(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();
        let svg = doc.root().unwrap();
        setup_attributes(&mut doc, &svg).unwrap();
        let once = doc.to_markup(svg);
        setup_attributes(&mut doc, &svg).unwrap();
        assert_eq!(doc.to_markup(svg), once);
        assert_eq!(doc.attr(svg, "style"), Some("overflow: hidden; "));
    }

    #[test]
    fn existing_overflow_is_respected_case_insensitively() {
        let mut doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" style="OVERFLOW: visible"/>"#,
        )
        .unwrap();
        let svg = doc.root().unwrap();
        setup_attributes(&mut doc, &svg).unwrap();
        assert_eq!(doc.attr(svg, "style"), Some("OVERFLOW: visible"));
    }

    #[test]
    fn detached_svg_keeps_its_style() {
        let mut doc = SvgDocument::new();
        let svg = doc.create_element(Some(SVG_NS), "svg");
        setup_attributes(&mut doc, &svg).unwrap();
        assert_eq!(doc.attr(svg, "style"), None);
        assert_eq!(doc.attr(svg, "xmlns:xlink"), Some(XLINK_NS));
        assert_eq!(doc.attr(svg, "xmlns:ev"), Some(XML_EVENTS_NS));
    }
}
