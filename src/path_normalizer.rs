//! Path normalization shared by both route extractors.
//!
//! Base paths from controller annotations and relative paths from route
//! declarations come in every imaginable shape (`users`, `/users/`, `\\users`,
//! empty strings). This module combines such fragments into one canonical
//! absolute path so downstream deduplication and document synthesis can key
//! on plain string equality.

/// Combines path fragments into a canonical absolute route path.
///
/// The rules, applied in order:
///
/// 1. Each fragment is trimmed; empty fragments are dropped.
/// 2. Surviving fragments are joined with `/`.
/// 3. Backslashes become forward slashes.
/// 4. Runs of consecutive `/` collapse into a single `/`.
/// 5. The result starts with exactly one `/`; a trailing `/` is stripped
///    unless the result is the root path itself.
///
/// If every fragment is empty the result is `/`. The function is pure and
/// idempotent: normalizing an already-normalized path returns it unchanged.
///
/// # Example
///
/// ```
/// use openapi_from_routes::path_normalizer::normalize_path;
///
/// assert_eq!(normalize_path(&["users", "/"]), "/users");
/// assert_eq!(normalize_path(&["", "/health"]), "/health");
/// assert_eq!(normalize_path(&["api\\v1", "users//{id}"]), "/api/v1/users/{id}");
/// ```
pub fn normalize_path(fragments: &[&str]) -> String {
    let segments: Vec<&str> = fragments
        .iter()
        .map(|fragment| fragment.trim())
        .filter(|fragment| !fragment.is_empty())
        .collect();

    if segments.is_empty() {
        return "/".to_string();
    }

    let combined = segments.join("/");

    let mut normalized = String::with_capacity(combined.len() + 1);
    normalized.push('/');
    let mut previous_was_slash = true;
    for ch in combined.chars() {
        let ch = if ch == '\\' { '/' } else { ch };
        if ch == '/' {
            if !previous_was_slash {
                normalized.push('/');
            }
            previous_was_slash = true;
        } else {
            normalized.push(ch);
            previous_was_slash = false;
        }
    }

    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}
