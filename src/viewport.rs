//! The viewport group: one `<g>` wrapping all of an SVG's drawable content.
//!
//! Pan/zoom transforms are written to this group only, so the root's own attributes
//! never change during a gesture.

use crate::errors::SvgError;
use crate::host::SvgHost;
use crate::log::debug;

/// Return the viewport group of `svg`, creating it on first use.
///
/// The group is found by its `class` marker anywhere below the root. When missing, a new
/// `<g class="{class}">` adopts every existing child of the root, in order, and is
/// appended to the root.
pub fn get_or_create_viewport<H: SvgHost>(
    host: &mut H,
    svg: &H::Node,
    class: &str,
) -> Result<H::Node, SvgError> {
    if let Some(existing) = host.find_group_with_class(svg, class) {
        return Ok(existing);
    }

    let viewport = host.create_svg_element("g")?;
    host.set_attribute(&viewport, "class", class)?;

    // Snapshot first; re-parenting mutates the live child list.
    let children = host.child_nodes(svg);
    debug!(children = children.len(), class = class, "creating viewport group");
    for child in &children {
        host.append_child(&viewport, child)?;
    }
    host.append_child(svg, &viewport)?;
    Ok(viewport)
}
