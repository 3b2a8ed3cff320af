//! Writing affine matrices to `transform` attributes.

use crate::errors::SvgError;
use crate::host::SvgHost;
use crate::types::Matrix;

/// Serialize as `matrix(a,b,c,d,e,f)`.
///
/// Numbers print the way JavaScript prints them (`1`, `0.5`, `1e21`, `NaN`, `Infinity`),
/// so output is identical to what a browser-side controller would write.
pub fn format_matrix(matrix: &Matrix) -> String {
    let mut buf = ryu_js::Buffer::new();
    let mut out = String::from("matrix(");
    for (i, v) in matrix.to_array().into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(js_number(v, &mut buf));
    }
    out.push(')');
    out
}

fn js_number(mut v: f64, buf: &mut ryu_js::Buffer) -> &str {
    if v == 0.0 {
        // -0 prints as 0
        v = 0.0;
    }
    buf.format(v)
}

/// Set `element`'s `transform` attribute to `matrix`. Coefficients are not validated.
pub fn apply_transform<H: SvgHost>(
    host: &mut H,
    element: &H::Node,
    matrix: &Matrix,
) -> Result<(), SvgError> {
    host.set_attribute(element, "transform", &format_matrix(matrix))
}
