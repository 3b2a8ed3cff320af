//! Error types with diagnostics using miette
//!
//! Data problems (unparseable sizes, odd styles) never surface here: they degrade to
//! defaults. These errors are for host failures and caller contract violations.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Document Errors
// ============================================================================

/// Errors raised by the in-memory [`SvgDocument`](crate::dom::SvgDocument)
#[derive(Error, Diagnostic, Debug)]
pub enum DomError {
    #[error("unknown node id {id}")]
    #[diagnostic(code(svgpan::dom::unknown_node))]
    UnknownNode { id: usize },

    #[error("node {id} is not an element")]
    #[diagnostic(code(svgpan::dom::not_an_element))]
    NotAnElement { id: usize },

    #[error("cannot append node {child} to node {parent}")]
    #[diagnostic(
        code(svgpan::dom::hierarchy_request),
        help("a node cannot become a child of itself or of one of its descendants")
    )]
    HierarchyRequest { parent: usize, child: usize },

    #[error("invalid markup: {0}")]
    #[diagnostic(code(svgpan::dom::parse))]
    Parse(#[from] roxmltree::Error),
}

// ============================================================================
// Toolkit Errors
// ============================================================================

/// Errors returned by the pan/zoom primitives
#[derive(Error, Diagnostic, Debug)]
pub enum SvgError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Dom(#[from] DomError),

    #[error("element has no screen transform")]
    #[diagnostic(
        code(svgpan::no_screen_ctm),
        help("the SVG element must be attached to a rendered document")
    )]
    NoScreenCtm,

    #[error("screen transform is not invertible (determinant {determinant})")]
    #[diagnostic(code(svgpan::non_invertible))]
    NonInvertible { determinant: f64 },

    #[error("event target has no owner SVG element")]
    #[diagnostic(
        code(svgpan::no_owner_svg),
        help("only pass events whose target lives inside an <svg> element")
    )]
    NoOwnerSvg,

    #[error("host call failed: {message}")]
    #[diagnostic(code(svgpan::host))]
    Host { message: String },
}
