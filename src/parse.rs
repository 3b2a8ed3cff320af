//! Parsing helpers for the loosely-typed values hosts hand back.
//!
//! Hosts report sizes as strings (`"300px"`, `"50%"`, `"auto"`) and inline styles as a
//! single attribute. Both are parsed with the pest grammar in `style.pest`.

use pest::Parser;
use pest_derive::Parser;

use crate::log::warn;

#[derive(Parser)]
#[grammar = "style.pest"]
struct StyleParser;

/// Split an inline `style` attribute into `(property, value)` pairs, in source order.
///
/// Property names are lowercased; values are trimmed. Unparseable styles yield no
/// declarations.
pub(crate) fn style_declarations(style: &str) -> Vec<(String, String)> {
    let pairs = match StyleParser::parse(Rule::declarations, style) {
        Ok(mut pairs) => match pairs.next() {
            Some(list) => list.into_inner(),
            None => return Vec::new(),
        },
        Err(_err) => {
            warn!(style = style, error = %_err, "ignoring unparseable inline style");
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    for decl in pairs {
        if decl.as_rule() != Rule::declaration {
            continue;
        }
        let mut inner = decl.into_inner();
        let (Some(property), Some(value)) = (inner.next(), inner.next()) else {
            continue;
        };
        out.push((
            property.as_str().to_ascii_lowercase(),
            value.as_str().trim().to_string(),
        ));
    }
    out
}

/// Value of `name` in an inline style; the last declaration wins. Empty values read as
/// absent, like `CSSStyleDeclaration` returning `""`.
pub(crate) fn style_property(style: &str, name: &str) -> Option<String> {
    style_declarations(style)
        .into_iter()
        .rev()
        .find(|(property, _)| property.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// JavaScript `parseFloat`: the longest numeric prefix after leading whitespace.
///
/// Returns `None` where JavaScript would return `NaN`.
pub(crate) fn js_parse_float(text: &str) -> Option<f64> {
    let mut pairs = StyleParser::parse(Rule::float_prefix, text).ok()?;
    let float = pairs.next()?.into_inner().find(|p| p.as_rule() == Rule::float)?;
    float.as_str().parse::<f64>().ok()
}

/// `!!parseFloat(text)`: parses and is neither zero nor NaN.
pub(crate) fn js_float_is_truthy(text: &str) -> bool {
    matches!(js_parse_float(text), Some(v) if v != 0.0)
}
