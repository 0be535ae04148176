use crate::extractor::{
    decorator_name_and_args, decorator_nodes, derive_folder, node_text, relative_source_file,
    resolve_string_literal, start_line, HttpMethod, Route, RouteExtractor, RouteOrigin,
};
use crate::parser::ParsedFile;
use crate::path_normalizer::normalize_path;
use log::debug;
use std::path::Path;
use tree_sitter::Node;

/// Extractor for decorator-based controller classes.
///
/// Recognizes top-level classes carrying a `Controller` decorator and emits
/// one route per method member whose decorator names an HTTP verb:
///
/// ```text
/// @Controller('users')
/// export class UsersController {
///     /** 获取用户列表 */
///     @Get('/')
///     findAll() {}
/// }
/// ```
///
/// The controller decorator's first string argument is the base path, the
/// verb decorator's first string argument the method path; both run through
/// the path normalizer. A method path that is present but not statically
/// resolvable (an interpolated template, a computed expression) causes that
/// route candidate to be skipped silently.
pub struct AnnotationExtractor;

impl RouteExtractor for AnnotationExtractor {
    fn extract(&self, file: &ParsedFile, scan_root: &Path) -> Vec<Route> {
        let mut routes = Vec::new();
        let root = file.tree.root_node();
        let mut cursor = root.walk();
        for item in root.named_children(&mut cursor) {
            if let Some(class_node) = class_declaration(item) {
                extract_class_routes(class_node, file, scan_root, &mut routes);
            }
        }
        routes
    }
}

/// Unwraps a top-level item to a class declaration, looking through `export`.
fn class_declaration(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "class_declaration" | "abstract_class_declaration" => Some(node),
        "export_statement" => {
            let declaration = node.child_by_field_name("declaration")?;
            matches!(
                declaration.kind(),
                "class_declaration" | "abstract_class_declaration"
            )
            .then_some(declaration)
        }
        _ => None,
    }
}

fn extract_class_routes(
    class_node: Node<'_>,
    file: &ParsedFile,
    scan_root: &Path,
    routes: &mut Vec<Route>,
) {
    let controller_args = decorator_nodes(class_node).into_iter().find_map(|decorator| {
        let (name, args) = decorator_name_and_args(decorator, &file.source)?;
        (name == "Controller").then_some(args)
    });
    let Some(controller_args) = controller_args else {
        return;
    };

    let base_path = controller_args
        .first()
        .and_then(|arg| resolve_string_literal(*arg, &file.source))
        .unwrap_or_default();

    let class_name = class_node
        .child_by_field_name("name")
        .map(|name| node_text(name, &file.source));
    let tag = class_name
        .as_deref()
        .map(|name| name.strip_suffix("Controller").unwrap_or(name).to_string());

    debug!(
        "Found controller class {} (base path {:?})",
        class_name.as_deref().unwrap_or("<anonymous>"),
        base_path
    );

    let Some(body) = class_node.child_by_field_name("body") else {
        return;
    };

    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        if member.kind() != "method_definition" {
            continue;
        }

        let verb = decorator_nodes(member).into_iter().find_map(|decorator| {
            let (name, args) = decorator_name_and_args(decorator, &file.source)?;
            HttpMethod::from_name(&name).map(|method| (method, args))
        });
        let Some((method, verb_args)) = verb else {
            continue;
        };

        let method_path = match verb_args.first() {
            None => String::new(),
            Some(arg) => match resolve_string_literal(*arg, &file.source) {
                Some(value) => value,
                // interpolated or computed path: not statically known
                None => continue,
            },
        };

        let method_name = member
            .child_by_field_name("name")
            .map(|name| node_text(name, &file.source))
            .unwrap_or_else(|| method.as_str().to_string());

        let summary = doc_comment_text(member, &file.source).unwrap_or_else(|| {
            format!("{}.{}", class_name.as_deref().unwrap_or("Controller"), method_name)
        });

        routes.push(Route {
            method,
            path: normalize_path(&[&base_path, &method_path]),
            summary,
            tag: tag.clone(),
            source_file: relative_source_file(&file.path, scan_root),
            line: start_line(member),
            folder: derive_folder(&file.path, scan_root),
            origin: RouteOrigin::Annotation,
        });
    }
}

/// Text of a leading `/** … */` documentation comment, if any.
///
/// The description lines before the first `@tag` line are kept; comment
/// markers are stripped. Returns `None` when the text would be empty.
fn doc_comment_text(node: Node<'_>, source: &str) -> Option<String> {
    let previous = node.prev_named_sibling()?;
    if previous.kind() != "comment" {
        return None;
    }
    let raw = node_text(previous, source);
    if !raw.starts_with("/**") {
        return None;
    }

    let body = raw.trim_start_matches("/**").trim_end_matches("*/");
    let mut lines = Vec::new();
    for line in body.lines() {
        let line = line.trim().trim_start_matches('*').trim();
        if line.starts_with('@') {
            break;
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }

    let text = lines.join("\n");
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
