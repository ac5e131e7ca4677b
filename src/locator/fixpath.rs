//! Fix path to query expression translation.
//!
//! A fix path names a field to inspect or set, optionally with the value to
//! set after `=`: `spec.template.spec.containers[0].securityContext.runAsNonRoot=true`.
//! Only the path part matters for locating it.

/// Converts a fix path into a query expression.
///
/// Everything from the first `=` on is dropped and the rest is prefixed with
/// the root `.`. No trimming or validation happens here; malformed paths are
/// rejected when the expression is parsed.
///
/// ```
/// use fixpath_locator::locator::fixpath::to_query_expression;
///
/// assert_eq!(
///     to_query_expression("metadata.namespace=YOUR_NAMESPACE"),
///     ".metadata.namespace"
/// );
/// assert_eq!(to_query_expression(""), ".");
/// ```
pub fn to_query_expression(fix_path: &str) -> String {
    let path = match fix_path.find('=') {
        Some(end) => &fix_path[..end],
        None => fix_path,
    };
    format!(".{}", path)
}

/// Drops the last `.segment` of an expression, dot included.
///
/// `.a.b[0]` becomes `.a` and `.a` becomes the empty string. An expression
/// without a dot is returned unchanged.
pub fn strip_last_segment(expression: &str) -> &str {
    match expression.rfind('.') {
        Some(dot) => &expression[..dot],
        None => expression,
    }
}
