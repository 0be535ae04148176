//! Deterministic operation-id derivation for synthesized documents.

/// Builds a stable `operationId` from a route's tag, resolved method and path.
///
/// The path is sanitized first: every `{name}` placeholder becomes `_name_`,
/// every maximal run of non-ASCII-alphanumeric characters becomes a single
/// `_`, leading/trailing underscores are stripped and the result is
/// lowercased. The id is the non-empty pieces of
/// `[tag or "controller", method, sanitized path]` joined with `_`.
///
/// Identical `(tag, method, path)` inputs always yield the identical id.
///
/// # Example
///
/// ```
/// use openapi_from_routes::operation_id::build_operation_id;
///
/// assert_eq!(build_operation_id(Some("users"), "get", "/users/{id}"), "users_get_users_id");
/// ```
pub fn build_operation_id(tag: Option<&str>, method: &str, path: &str) -> String {
    let sanitized = sanitize_path(path);
    [tag.unwrap_or("controller"), method, &sanitized]
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}

/// Renders a route path as an identifier-safe lowercase token.
fn sanitize_path(path: &str) -> String {
    let expanded = expand_placeholders(path);

    let mut sanitized = String::with_capacity(expanded.len());
    let mut previous_was_separator = false;
    for ch in expanded.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            previous_was_separator = false;
        } else if !previous_was_separator {
            sanitized.push('_');
            previous_was_separator = true;
        }
    }

    sanitized.trim_matches('_').to_string()
}

/// Rewrites `{name}` placeholders as `_name_`; unmatched or empty braces are
/// left alone and fall through to the separator collapse above.
fn expand_placeholders(path: &str) -> String {
    let mut expanded = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        expanded.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if close > 0 => {
                expanded.push('_');
                expanded.push_str(&after[..close]);
                expanded.push('_');
                rest = &after[close + 1..];
            }
            _ => {
                expanded.push('{');
                rest = after;
            }
        }
    }
    expanded.push_str(rest);
    expanded
}
