//! Declared size of an SVG root.
//!
//! Hosts disagree about where an SVG's size lives, so sources are probed in a fixed
//! order and the first one that yields a non-zero number wins:
//!
//! 1. legacy `clip` property (width and height from the clip)
//! 2. legacy `style.pixelWidth` (used for *both* width and height)
//! 3. inline CSS `width` / `height`
//! 4. `width` / `height` attributes
//!
//! Percentages are unsupported and resolve to 0, as does anything unparseable.

use crate::host::SvgHost;
use crate::log::debug;
use crate::parse::{js_float_is_truthy, js_parse_float};
use crate::types::{Dimensions, Rect};

/// Which source produced the declared size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeSource {
    LegacyClip,
    LegacyPixelWidth,
    Style,
    Attributes,
}

/// Declared size alongside the rendered box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedDimensions {
    /// Size from style or attributes; this is what callers use
    pub declared: Dimensions,
    /// Rendered bounding box. Not combined into `declared`.
    pub rendered: Rect,
    pub source: SizeSource,
}

/// Width and height of `svg` from its declared size. Never fails.
pub fn resolve_dimensions<H: SvgHost>(host: &H, svg: &H::Node) -> Dimensions {
    resolve_dimensions_detailed(host, svg).declared
}

pub fn resolve_dimensions_detailed<H: SvgHost>(host: &H, svg: &H::Node) -> ResolvedDimensions {
    let rendered = host.bounding_client_rect(svg);

    let (source, width, height) =
        if let Some(clip) = host.legacy_clip(svg).filter(|c| js_float_is_truthy(&c.value)) {
            (SizeSource::LegacyClip, clip.width, clip.height)
        } else if let Some(px) = host
            .legacy_pixel_width(svg)
            .filter(|w| js_float_is_truthy(w))
        {
            // Height mirrors width here.
            (SizeSource::LegacyPixelWidth, Some(px.clone()), Some(px))
        } else if let Some(w) = host
            .style_property(svg, "width")
            .filter(|w| js_float_is_truthy(w))
        {
            (SizeSource::Style, Some(w), host.style_property(svg, "height"))
        } else {
            (
                SizeSource::Attributes,
                host.attribute(svg, "width"),
                host.attribute(svg, "height"),
            )
        };

    let declared = Dimensions::new(declared_length(width), declared_length(height));
    debug!(
        ?source,
        width = declared.width,
        height = declared.height,
        rendered_width = rendered.width,
        rendered_height = rendered.height,
        "resolved svg dimensions"
    );
    ResolvedDimensions {
        declared,
        rendered,
        source,
    }
}

fn declared_length(raw: Option<String>) -> f64 {
    let Some(text) = raw.filter(|t| !t.is_empty()) else {
        return 0.0;
    };
    if text.contains('%') {
        return 0.0;
    }
    js_parse_float(&text).unwrap_or(0.0)
}
