use crate::extractor::{
    call_arguments, derive_folder, node_text, relative_source_file, resolve_string_literal,
    start_line, HttpMethod, Route, RouteExtractor, RouteOrigin,
};
use crate::parser::ParsedFile;
use crate::path_normalizer::normalize_path;
use std::path::Path;
use tree_sitter::Node;

/// Extractor for fluent-router-style member calls.
///
/// Recognizes every call expression of the shape
/// `<expr>.<member>(firstArg, …)` where the member, lowercased, names an HTTP
/// verb and the first argument is a statically-known string:
///
/// ```text
/// router.get('/health', (req, res) => res.send('ok'));
/// app.post('/users', createUser);
/// ```
///
/// Calls whose first argument is runtime-dependent (an interpolated template,
/// a variable) are skipped. The route tag is derived from the directory
/// immediately containing the file, with `-`/`_` rendered as spaces.
pub struct CallChainExtractor;

impl RouteExtractor for CallChainExtractor {
    fn extract(&self, file: &ParsedFile, scan_root: &Path) -> Vec<Route> {
        let mut routes = Vec::new();
        visit(file.tree.root_node(), file, scan_root, &mut routes);
        routes
    }
}

fn visit(node: Node<'_>, file: &ParsedFile, scan_root: &Path, routes: &mut Vec<Route>) {
    if node.kind() == "call_expression" {
        if let Some((method, path)) = resolve_router_call(node, &file.source) {
            let base_name = file
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            routes.push(Route {
                method,
                path,
                summary: format!("来自 {} 行 {}", base_name, start_line(node)),
                tag: folder_tag(&file.path, scan_root),
                source_file: relative_source_file(&file.path, scan_root),
                line: start_line(node),
                folder: derive_folder(&file.path, scan_root),
                origin: RouteOrigin::CallChain,
            });
        }
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        visit(child, file, scan_root, routes);
    }
}

/// Matches `<expr>.<verb>(<string literal>, …)` and returns the method plus
/// the normalized path.
fn resolve_router_call(node: Node<'_>, source: &str) -> Option<(HttpMethod, String)> {
    let callee = node.child_by_field_name("function")?;
    if callee.kind() != "member_expression" {
        return None;
    }
    let member = callee.child_by_field_name("property")?;
    let method = HttpMethod::from_name(&node_text(member, source))?;

    let arguments = call_arguments(node);
    let literal = resolve_string_literal(*arguments.first()?, source)?;

    Some((method, normalize_path(&["", &literal])))
}

/// Human-readable tag from the file's immediate directory, `None` for files
/// directly at the scan root.
fn folder_tag(path: &Path, scan_root: &Path) -> Option<String> {
    let directory = path.parent()?;
    if directory == scan_root {
        return None;
    }
    let name = directory.file_name()?.to_string_lossy();
    Some(name.replace(['-', '_'], " "))
}
