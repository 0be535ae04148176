//! Route extraction module for parsing web framework route declarations.
//!
//! This module provides a unified interface for extracting route information
//! from the two route-declaration conventions found in TypeScript/JavaScript
//! web projects. Each convention has its own extractor implementation that
//! knows how to recognize framework-specific declarations.
//!
//! # Supported conventions
//!
//! - **Annotation controllers** (`@Controller` classes with `@Get`/`@Post`/…
//!   decorated methods): see [`annotation::AnnotationExtractor`]
//! - **Call-chain routers** (`router.get(path, handler)` style fluent calls):
//!   see [`call_chain::CallChainExtractor`]
//!
//! The two extractors are independent and order-insensitive; callers run both
//! over every parsed file and concatenate the results before deduplication.
//!
//! # Example
//!
//! ```no_run
//! use openapi_from_routes::extractor::{RouteExtractor, call_chain::CallChainExtractor};
//! use openapi_from_routes::parser::AstParser;
//! use std::path::Path;
//!
//! let parsed = AstParser::parse_file(Path::new("src/routes/health.router.ts")).unwrap();
//! let routes = CallChainExtractor.extract(&parsed, Path::new("."));
//! println!("Found {} routes", routes.len());
//! ```

pub mod annotation;
pub mod call_chain;

use crate::parser::ParsedFile;
use std::path::Path;
use tree_sitter::Node;

/// HTTP methods recognized in route declarations.
///
/// `All` is the catch-all registration offered by fluent routers; the
/// document synthesizer later maps it onto `get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
    /// HTTP OPTIONS method
    Options,
    /// HTTP HEAD method
    Head,
    /// Catch-all registration matching every method
    All,
}

impl HttpMethod {
    /// Parses a method from a declaration name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            "all" => Some(HttpMethod::All),
            _ => None,
        }
    }

    /// Lowercase method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::All => "all",
        }
    }
}

/// Which extraction strategy produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOrigin {
    /// Decorated controller class
    Annotation,
    /// Fluent router member call
    CallChain,
}

impl RouteOrigin {
    /// Stable name used in generated operation descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteOrigin::Annotation => "annotation",
            RouteOrigin::CallChain => "call-chain",
        }
    }
}

/// One discovered endpoint with its provenance metadata.
///
/// A `Route` is immutable once produced: `path` always starts with exactly
/// one `/`, contains no repeated `/` and no backslashes (see
/// [`crate::path_normalizer::normalize_path`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// HTTP method of the declaration
    pub method: HttpMethod,
    /// Canonical absolute path, `{name}` placeholders allowed
    pub path: String,
    /// One-line description, doc-comment derived or generated
    pub summary: String,
    /// Optional grouping label (controller class or containing folder)
    pub tag: Option<String>,
    /// Source file path relative to the scan root, `/`-separated
    pub source_file: String,
    /// 1-based line of the declaration
    pub line: usize,
    /// Containing directory relative to the scan root, omitted at the root
    pub folder: Option<String>,
    /// Extraction strategy that produced this route
    pub origin: RouteOrigin,
}

/// Trait for extracting routes from a parsed source file.
///
/// Both extraction strategies implement the same "file in, route list out"
/// contract; callers compose them by concatenating their outputs.
pub trait RouteExtractor {
    /// Extracts every route declared in `file`.
    ///
    /// # Arguments
    ///
    /// * `file` - A successfully parsed source file
    /// * `scan_root` - The scan working directory; `source_file` and `folder`
    ///   on the produced routes are relative to it
    fn extract(&self, file: &ParsedFile, scan_root: &Path) -> Vec<Route>;
}

/// Source text covered by a node.
pub(crate) fn node_text(node: Node<'_>, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or_default().to_string()
}

/// Resolves a statically-known string value from an expression node.
///
/// Only plain string literals and template literals with zero substitutions
/// resolve; a template with any interpolation, or any other expression, is
/// runtime-dependent and yields `None`. No partial evaluation is attempted.
pub(crate) fn resolve_string_literal(node: Node<'_>, source: &str) -> Option<String> {
    match node.kind() {
        "string" => Some(unquote(&node_text(node, source))),
        "template_string" => {
            let mut cursor = node.walk();
            let interpolated = node
                .named_children(&mut cursor)
                .any(|child| child.kind() == "template_substitution");
            if interpolated {
                return None;
            }
            let raw = node_text(node, source);
            Some(raw.trim_start_matches('`').trim_end_matches('`').to_string())
        }
        _ => None,
    }
}

fn unquote(raw: &str) -> String {
    let trimmed = raw.trim();
    let bytes = trimmed.as_bytes();
    if trimmed.len() >= 2 {
        let matching_quotes = (bytes[0] == b'"' && bytes[trimmed.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[trimmed.len() - 1] == b'\'');
        if matching_quotes {
            return trimmed[1..trimmed.len() - 1].to_string();
        }
    }
    trimmed.to_string()
}

/// Decorators attached to a declaration.
///
/// Decorators on an exported class may attach to the wrapping export
/// statement instead of the class node itself; both placements are collected.
pub(crate) fn decorator_nodes<'a>(node: Node<'a>) -> Vec<Node<'a>> {
    let mut decorators = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "decorator" {
            decorators.push(child);
        }
    }
    if let Some(parent) = node.parent() {
        if parent.kind() == "export_statement" {
            let mut cursor = parent.walk();
            for child in parent.named_children(&mut cursor) {
                if child.kind() == "decorator" {
                    decorators.push(child);
                }
            }
        }
    }
    decorators
}

/// Splits a decorator into its name and call arguments.
///
/// `@Get("/users")` yields `("Get", [string node])`; a bare `@Get` yields
/// `("Get", [])`. Qualified names keep only the last segment.
pub(crate) fn decorator_name_and_args<'a>(
    node: Node<'a>,
    source: &str,
) -> Option<(String, Vec<Node<'a>>)> {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "call_expression" {
            let Some(callee) = child.child_by_field_name("function") else {
                continue;
            };
            let raw = node_text(callee, source);
            let name = raw.rsplit('.').next().unwrap_or(&raw).to_string();
            return Some((name, call_arguments(child)));
        }
    }

    let raw = node_text(node, source);
    let name = raw
        .trim_start_matches('@')
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_string();
    if name.is_empty() {
        None
    } else {
        Some((name, Vec::new()))
    }
}

/// Argument expression nodes of a call expression.
pub(crate) fn call_arguments<'a>(node: Node<'a>) -> Vec<Node<'a>> {
    let Some(arguments) = node.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = arguments.walk();
    arguments.named_children(&mut cursor).collect()
}

/// 1-based source line on which a node starts.
pub(crate) fn start_line(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

/// Source file path relative to the scan root, `/`-separated.
pub(crate) fn relative_source_file(path: &Path, scan_root: &Path) -> String {
    let relative = path.strip_prefix(scan_root).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}

/// Containing directory relative to the scan root, `None` for files directly
/// at the root.
pub(crate) fn derive_folder(path: &Path, scan_root: &Path) -> Option<String> {
    let directory = path.parent()?;
    let relative = directory.strip_prefix(scan_root).ok()?;
    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative.to_string_lossy().replace('\\', "/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{AstParser, SourceLanguage};
    use std::path::PathBuf;

    fn parse_ts(code: &str) -> ParsedFile {
        AstParser::parse_source(
            &PathBuf::from("test.ts"),
            code.to_string(),
            SourceLanguage::TypeScript,
        )
        .expect("failed to parse fixture")
    }

    fn first_call_argument(file: &ParsedFile) -> String {
        let root = file.tree.root_node();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.kind() == "call_expression" {
                let args = call_arguments(node);
                let arg = args.first().expect("call has no arguments");
                return resolve_string_literal(*arg, &file.source)
                    .unwrap_or_else(|| "<unresolved>".to_string());
            }
            let mut cursor = node.walk();
            stack.extend(node.named_children(&mut cursor));
        }
        panic!("no call expression in fixture");
    }

    #[test]
    fn test_http_method_from_name_case_insensitive() {
        assert_eq!(HttpMethod::from_name("Get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_name("POST"), Some(HttpMethod::Post));
        assert_eq!(HttpMethod::from_name("all"), Some(HttpMethod::All));
        assert_eq!(HttpMethod::from_name("trace"), None);
    }

    #[test]
    fn test_resolve_plain_string_literal() {
        let file = parse_ts("register('/users');");
        assert_eq!(first_call_argument(&file), "/users");
    }

    #[test]
    fn test_resolve_single_quoted_literal() {
        let file = parse_ts("register('/health');");
        assert_eq!(first_call_argument(&file), "/health");
    }

    #[test]
    fn test_resolve_template_without_interpolation() {
        let file = parse_ts("register(`/static`);");
        assert_eq!(first_call_argument(&file), "/static");
    }

    #[test]
    fn test_interpolated_template_is_unresolved() {
        let file = parse_ts("register(`/users/${prefix}`);");
        assert_eq!(first_call_argument(&file), "<unresolved>");
    }

    #[test]
    fn test_identifier_argument_is_unresolved() {
        let file = parse_ts("register(somePath);");
        assert_eq!(first_call_argument(&file), "<unresolved>");
    }

    #[test]
    fn test_relative_source_file() {
        let root = PathBuf::from("/project");
        let file = PathBuf::from("/project/src/users/users.controller.ts");
        assert_eq!(relative_source_file(&file, &root), "src/users/users.controller.ts");
    }

    #[test]
    fn test_derive_folder_at_root_is_none() {
        let root = PathBuf::from("/project");
        let file = PathBuf::from("/project/app.ts");
        assert_eq!(derive_folder(&file, &root), None);
    }

    #[test]
    fn test_derive_folder_nested() {
        let root = PathBuf::from("/project");
        let file = PathBuf::from("/project/src/routes/health.router.ts");
        assert_eq!(derive_folder(&file, &root), Some("src/routes".to_string()));
    }
}
