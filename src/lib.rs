//! Geometry and DOM bookkeeping for SVG pan/zoom widgets.
//!
//! A pan/zoom controller needs a handful of primitives around the SVG it drives:
//!
//! - the SVG's declared size ([`resolve_dimensions`])
//! - a single wrapper group that receives every transform ([`get_or_create_viewport`])
//! - namespace and overflow set-up ([`setup_attributes`])
//! - writing `matrix(...)` transforms ([`apply_transform`])
//! - pointer positions in SVG user space ([`relative_mouse_point`]), backed by a
//!   time-bounded cache of the screen CTM ([`ScreenCtmCache`])
//!
//! The host document is abstracted by [`SvgHost`]. [`SvgDocument`] is an in-memory
//! implementation; with the `web` feature, `web::WebHost` drives a real browser DOM.
//!
//! ```rust
//! use svgpan::{ManualClock, Matrix, PointerEvent, SvgDocument, SvgToolkit, UserPoint};
//!
//! let mut doc = SvgDocument::parse(
//!     r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300"><rect/></svg>"#,
//! )?;
//! let svg = doc.root().unwrap();
//! doc.set_screen_ctm(svg, Some(Matrix::translate(100.0, 50.0)))?;
//!
//! let mut kit = SvgToolkit::new(doc, ManualClock::new());
//! let viewport = kit.get_or_create_viewport(&svg)?;
//! kit.apply_transform(&viewport, &Matrix::scale(2.0, 2.0))?;
//!
//! let point = kit.relative_mouse_point(&svg, &PointerEvent::new(110.0, 60.0, svg))?;
//! assert_eq!(point, UserPoint::from_xy(10.0, 10.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod attributes;
pub mod cache;
pub mod defaults;
pub mod dimensions;
pub mod dom;
pub mod errors;
pub mod host;
pub mod log;
mod parse;
pub mod point;
pub mod toolkit;
pub mod transform;
pub mod types;
pub mod viewport;
#[cfg(feature = "web")]
pub mod web;

pub use attributes::setup_attributes;
pub use cache::ScreenCtmCache;
pub use defaults::Config;
pub use dimensions::{
    ResolvedDimensions, SizeSource, resolve_dimensions, resolve_dimensions_detailed,
};
pub use dom::{NodeId, SvgDocument};
pub use errors::{DomError, SvgError};
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
pub use host::SystemClock;
pub use host::{
    Clock, LegacyClip, ManualClock, PointerEvent, SvgHost, find_group_depth_first,
};
pub use point::{event_point, event_svg_root, relative_mouse_point, svg_center_point};
pub use toolkit::SvgToolkit;
pub use transform::{apply_transform, format_matrix};
pub use types::{Dimensions, Matrix, Point, Rect, ScreenPoint, ScreenPx, UserPoint, UserUnit};
pub use viewport::get_or_create_viewport;
