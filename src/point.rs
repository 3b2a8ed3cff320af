//! Points from pointer events and element geometry.
//!
//! Every function here says which space it returns: [`ScreenPoint`] for raw client
//! coordinates, [`UserPoint`] for SVG user units.

use crate::cache::ScreenCtmCache;
use crate::errors::SvgError;
use crate::host::{Clock, PointerEvent, SvgHost};
use crate::types::{ScreenPoint, UserPoint};

/// Pointer position in `svg`'s user space.
///
/// The client point is mapped through the inverse of the *cached* screen CTM, so a burst
/// of pointer moves costs one host query per staleness window.
pub fn relative_mouse_point<H, C>(
    host: &H,
    cache: &mut ScreenCtmCache<H::Node, C>,
    svg: &H::Node,
    event: &PointerEvent<H::Node>,
) -> Result<UserPoint, SvgError>
where
    H: SvgHost,
    C: Clock,
{
    let ctm = cache.get(host, svg)?;
    let inverse = ctm.inverse().ok_or(SvgError::NonInvertible {
        determinant: ctm.determinant(),
    })?;
    Ok(UserPoint::from_dvec2(
        inverse.transform_vec(event.client_point().to_dvec2()),
    ))
}

/// The SVG root an event belongs to.
///
/// Either the target itself (an `<svg>`), the target's owner SVG, or, for `<use>`
/// instances, the owner SVG of the element the instance stands for.
pub fn event_svg_root<H: SvgHost>(host: &H, event: &PointerEvent<H::Node>) -> Option<H::Node> {
    let target = &event.target;
    if matches!(host.tag_name(target).as_deref(), Some("svg" | "SVG")) {
        return Some(target.clone());
    }
    host.owner_svg_element(target).or_else(|| {
        host.corresponding_element(target)
            .and_then(|real| host.owner_svg_element(&real))
    })
}

/// Raw client coordinates of `event`, no transform applied.
///
/// Fails with [`SvgError::NoOwnerSvg`] when the target is not inside an SVG.
pub fn event_point<H: SvgHost>(
    host: &H,
    event: &PointerEvent<H::Node>,
) -> Result<ScreenPoint, SvgError> {
    event_svg_root(host, event).ok_or(SvgError::NoOwnerSvg)?;
    Ok(event.client_point())
}

/// Center of `svg`'s rendered box, relative to the box (screen pixels).
pub fn svg_center_point<H: SvgHost>(host: &H, svg: &H::Node) -> ScreenPoint {
    let rect = host.bounding_client_rect(svg);
    ScreenPoint::from_xy(rect.width / 2.0, rect.height / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::SVG_NS;
    use crate::dom::{NodeId, SvgDocument};
    use crate::host::ManualClock;
    use crate::types::{Matrix, Rect};

    fn doc_with_ctm(ctm: Matrix) -> (SvgDocument, NodeId) {
        let mut doc = SvgDocument::parse(
            r##"<svg xmlns="http://www.w3.org/2000/svg"><g><rect id="r"/></g><use href="#r"/></svg>"##,
        )
        .unwrap();
        let svg = doc.root().unwrap();
        doc.set_screen_ctm(svg, Some(ctm)).unwrap();
        (doc, svg)
    }

    #[test]
    fn identity_ctm_leaves_client_coordinates() {
        let (doc, svg) = doc_with_ctm(Matrix::IDENTITY);
        let mut cache = ScreenCtmCache::new(ManualClock::new());
        let event = PointerEvent::new(42.0, 17.5, svg);
        let p = relative_mouse_point(&doc, &mut cache, &svg, &event).unwrap();
        assert_eq!(p, UserPoint::from_xy(42.0, 17.5));
    }

    #[test]
    fn translation_is_subtracted() {
        let (doc, svg) = doc_with_ctm(Matrix::translate(100.0, 50.0));
        let mut cache = ScreenCtmCache::new(ManualClock::new());
        let event = PointerEvent::new(130.0, 80.0, svg);
        let p = relative_mouse_point(&doc, &mut cache, &svg, &event).unwrap();
        assert_eq!(p, UserPoint::from_xy(30.0, 30.0));
    }

    #[test]
    fn scale_and_translation_are_inverted() {
        let ctm = Matrix::new(2.0, 0.0, 0.0, 4.0, 10.0, 20.0);
        let (doc, svg) = doc_with_ctm(ctm);
        let mut cache = ScreenCtmCache::new(ManualClock::new());
        let event = PointerEvent::new(30.0, 60.0, svg);
        let p = relative_mouse_point(&doc, &mut cache, &svg, &event).unwrap();
        assert_eq!(p, UserPoint::from_xy(10.0, 10.0));
    }

    #[test]
    fn relative_point_goes_through_the_cache() {
        let (mut doc, svg) = doc_with_ctm(Matrix::translate(100.0, 50.0));
        let mut cache = ScreenCtmCache::new(ManualClock::new());
        let event = PointerEvent::new(100.0, 50.0, svg);
        relative_mouse_point(&doc, &mut cache, &svg, &event).unwrap();
        doc.set_screen_ctm(svg, Some(Matrix::IDENTITY)).unwrap();
        let p = relative_mouse_point(&doc, &mut cache, &svg, &event).unwrap();
        assert_eq!(p, UserPoint::from_xy(0.0, 0.0));
        assert_eq!(doc.screen_ctm_queries(), 1);
    }

    #[test]
    fn singular_ctm_is_reported() {
        let (doc, svg) = doc_with_ctm(Matrix::scale(0.0, 0.0));
        let mut cache = ScreenCtmCache::new(ManualClock::new());
        let event = PointerEvent::new(1.0, 1.0, svg);
        assert!(matches!(
            relative_mouse_point(&doc, &mut cache, &svg, &event),
            Err(SvgError::NonInvertible { .. })
        ));
    }

    #[test]
    fn event_root_for_svg_target_and_descendants() {
        let (doc, svg) = doc_with_ctm(Matrix::IDENTITY);
        let g = doc.children(svg)[0];
        let rect = doc.children(g)[0];

        assert_eq!(event_svg_root(&doc, &PointerEvent::new(0.0, 0.0, svg)), Some(svg));
        assert_eq!(event_svg_root(&doc, &PointerEvent::new(0.0, 0.0, rect)), Some(svg));

        let p = event_point(&doc, &PointerEvent::new(7.0, 9.0, rect)).unwrap();
        assert_eq!(p, ScreenPoint::from_xy(7.0, 9.0));
    }

    #[test]
    fn uppercase_svg_tag_counts_as_root() {
        let mut doc = SvgDocument::new();
        let svg = doc.create_element(Some(SVG_NS), "SVG");
        assert_eq!(event_svg_root(&doc, &PointerEvent::new(0.0, 0.0, svg)), Some(svg));
    }

    #[test]
    fn use_instance_resolves_through_corresponding_element() {
        let (mut doc, svg) = doc_with_ctm(Matrix::IDENTITY);
        let rect = doc.children(doc.children(svg)[0])[0];
        // An instance living in a shadow tree: no parent, only a corresponding element.
        let instance = doc.create_element(Some(SVG_NS), "rect");
        doc.set_corresponding_element(instance, rect).unwrap();

        let event = PointerEvent::new(3.0, 4.0, instance);
        assert_eq!(event_svg_root(&doc, &event), Some(svg));
        assert_eq!(event_point(&doc, &event).unwrap(), ScreenPoint::from_xy(3.0, 4.0));
    }

    #[test]
    fn orphan_target_has_no_owner() {
        let mut doc = SvgDocument::new();
        let stray = doc.create_element(Some(SVG_NS), "circle");
        assert!(matches!(
            event_point(&doc, &PointerEvent::new(1.0, 2.0, stray)),
            Err(SvgError::NoOwnerSvg)
        ));
    }

    #[test]
    fn center_of_rendered_box() {
        let (mut doc, svg) = doc_with_ctm(Matrix::IDENTITY);
        doc.set_bounding_box(svg, Rect::new(40.0, 40.0, 200.0, 100.0)).unwrap();
        assert_eq!(svg_center_point(&doc, &svg), ScreenPoint::from_xy(100.0, 50.0));
    }
}
