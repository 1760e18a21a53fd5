//! Literal rendering shared by the match builder (quoted `idShort`
//! predicates) and the condition lowerer (quoted string literals).

/// Wraps `s` in `quote` characters, escaping any occurrence of `quote`
/// inside `s` with a backslash.
pub(crate) fn quote_str(s: &str, quote: char) -> String {
    let escaped = s.replace(quote, &format!("\\{quote}"));
    format!("{quote}{escaped}{quote}")
}

/// Renders a number verbatim: no trailing `.0` for integral values, plain
/// decimal otherwise.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
