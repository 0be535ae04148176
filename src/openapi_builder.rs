use crate::extractor::{HttpMethod, Route};
use crate::operation_id::build_operation_id;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Default response description attached to every generated operation.
pub const DEFAULT_RESPONSE_DESCRIPTION: &str = "自动生成的接口，默认返回 200 OK。";

const DEFAULT_DOCUMENT_DESCRIPTION: &str = "由控制器扫描结果生成";

/// Document-level options for a synthesis run.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// `info.title`
    pub title: String,
    /// `info.version`, defaults to `1.0.0`
    pub version: Option<String>,
    /// `info.description`, defaults to a generated note
    pub description: Option<String>,
    /// Optional single server URL
    pub server_url: Option<String>,
    /// Overrides [`DEFAULT_RESPONSE_DESCRIPTION`]
    pub default_response_description: Option<String>,
}

/// OpenAPI document builder.
///
/// Folds a deduplicated route list into a structured API document: one
/// path-item per distinct path, one operation per `(path, method)`, a tag
/// catalogue in first-seen order, and generated operation ids. The document
/// is a fresh value built once per synthesis call; synthesis never fails for
/// well-formed routes.
pub struct OpenApiBuilder {
    info: Info,
    servers: Option<Vec<Server>>,
    response_description: String,
    paths: BTreeMap<String, PathItem>,
    tags: Vec<Tag>,
    seen_tags: HashSet<String>,
}

/// OpenAPI Info object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,
    /// API version
    pub version: String,
    /// API description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// OpenAPI Server object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Server base URL
    pub url: String,
}

/// OpenAPI Tag object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name
    pub name: String,
}

/// OpenAPI PathItem object - represents all operations for a single path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// POST operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// PUT operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// DELETE operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// PATCH operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// OPTIONS operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
}

impl PathItem {
    fn set(&mut self, method: DocumentMethod, operation: Operation) {
        match method {
            DocumentMethod::Get => self.get = Some(operation),
            DocumentMethod::Post => self.post = Some(operation),
            DocumentMethod::Put => self.put = Some(operation),
            DocumentMethod::Delete => self.delete = Some(operation),
            DocumentMethod::Patch => self.patch = Some(operation),
            DocumentMethod::Options => self.options = Some(operation),
            DocumentMethod::Head => self.head = Some(operation),
        }
    }

    /// Number of operations carried by this path-item.
    pub fn operation_count(&self) -> usize {
        [
            &self.get,
            &self.post,
            &self.put,
            &self.delete,
            &self.patch,
            &self.options,
            &self.head,
        ]
        .iter()
        .filter(|operation| operation.is_some())
        .count()
    }
}

/// OpenAPI Operation object - represents a single API operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Operation summary
    #[serde(default)]
    pub summary: String,
    /// Auto-generated description referencing the origin file and line
    #[serde(default)]
    pub description: String,
    /// Grouping tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Operation ID
    #[serde(rename = "operationId", default)]
    pub operation_id: String,
    /// Responses
    #[serde(default)]
    pub responses: HashMap<String, Response>,
    /// Folder extension carrying the source directory
    #[serde(rename = "x-apifox-folder", skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

/// OpenAPI Response object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Response description
    pub description: String,
}

/// Complete OpenAPI document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDocument {
    /// OpenAPI version
    pub openapi: String,
    /// API info
    pub info: Info,
    /// Server list, present only when a server URL was configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
    /// API paths
    pub paths: BTreeMap<String, PathItem>,
    /// Tag catalogue in first-seen order
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Methods representable in a document path-item. A route registered for
/// `all` is documented as `get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl DocumentMethod {
    fn as_str(&self) -> &'static str {
        match self {
            DocumentMethod::Get => "get",
            DocumentMethod::Post => "post",
            DocumentMethod::Put => "put",
            DocumentMethod::Delete => "delete",
            DocumentMethod::Patch => "patch",
            DocumentMethod::Options => "options",
            DocumentMethod::Head => "head",
        }
    }
}

fn document_method(method: HttpMethod) -> DocumentMethod {
    match method {
        HttpMethod::Get | HttpMethod::All => DocumentMethod::Get,
        HttpMethod::Post => DocumentMethod::Post,
        HttpMethod::Put => DocumentMethod::Put,
        HttpMethod::Delete => DocumentMethod::Delete,
        HttpMethod::Patch => DocumentMethod::Patch,
        HttpMethod::Options => DocumentMethod::Options,
        HttpMethod::Head => DocumentMethod::Head,
    }
}

impl OpenApiBuilder {
    /// Creates a builder with the given document-level options.
    pub fn new(options: BuildOptions) -> Self {
        debug!("Initializing OpenApiBuilder for '{}'", options.title);
        Self {
            info: Info {
                title: options.title,
                version: options.version.unwrap_or_else(|| "1.0.0".to_string()),
                description: Some(
                    options
                        .description
                        .unwrap_or_else(|| DEFAULT_DOCUMENT_DESCRIPTION.to_string()),
                ),
            },
            servers: options.server_url.map(|url| vec![Server { url }]),
            response_description: options
                .default_response_description
                .unwrap_or_else(|| DEFAULT_RESPONSE_DESCRIPTION.to_string()),
            paths: BTreeMap::new(),
            tags: Vec::new(),
            seen_tags: HashSet::new(),
        }
    }

    /// Adds a route to the document.
    ///
    /// The operation is assigned at `paths[route.path][method]`, overwriting
    /// any previous entry for that slot; after deduplication such collisions
    /// only arise from same-path/same-method routes with different tags, and
    /// the last one in route order wins.
    pub fn add_route(&mut self, route: &Route) {
        let method = document_method(route.method);
        debug!("Adding route: {} {}", method.as_str(), route.path);

        let tag = route.tag.as_deref().filter(|tag| !tag.is_empty());

        let operation = Operation {
            summary: route.summary.clone(),
            description: format!(
                "自动从 {}:{} 生成 ({})",
                route.source_file,
                route.line,
                route.origin.as_str()
            ),
            tags: tag.map(|tag| vec![tag.to_string()]),
            operation_id: build_operation_id(route.tag.as_deref(), method.as_str(), &route.path),
            responses: HashMap::from([(
                "200".to_string(),
                Response {
                    description: self.response_description.clone(),
                },
            )]),
            folder: route
                .folder
                .as_deref()
                .map(|folder| folder.split('/').collect::<Vec<_>>().join(" / ")),
        };

        self.paths
            .entry(route.path.clone())
            .or_default()
            .set(method, operation);

        if let Some(tag) = tag {
            if self.seen_tags.insert(tag.to_string()) {
                self.tags.push(Tag {
                    name: tag.to_string(),
                });
            }
        }
    }

    /// Builds the final document.
    pub fn build(self) -> ApiDocument {
        debug!("Building final OpenAPI document");
        ApiDocument {
            openapi: "3.1.0".to_string(),
            info: self.info,
            servers: self.servers,
            paths: self.paths,
            tags: self.tags,
        }
    }
}

/// Synthesizes a document from a route list in one call.
pub fn build_document(routes: &[Route], options: BuildOptions) -> ApiDocument {
    let mut builder = OpenApiBuilder::new(options);
    for route in routes {
        builder.add_route(route);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::RouteOrigin;
    use pretty_assertions::assert_eq;

    fn route(method: HttpMethod, path: &str, tag: Option<&str>) -> Route {
        Route {
            method,
            path: path.to_string(),
            summary: format!("summary of {path}"),
            tag: tag.map(str::to_string),
            source_file: "src/test.controller.ts".to_string(),
            line: 7,
            folder: Some("src".to_string()),
            origin: RouteOrigin::Annotation,
        }
    }

    fn options(title: &str) -> BuildOptions {
        BuildOptions {
            title: title.to_string(),
            ..BuildOptions::default()
        }
    }

    #[test]
    fn test_defaults() {
        let document = build_document(&[], options("Test APIs"));

        assert_eq!(document.openapi, "3.1.0");
        assert_eq!(document.info.title, "Test APIs");
        assert_eq!(document.info.version, "1.0.0");
        assert_eq!(
            document.info.description,
            Some(DEFAULT_DOCUMENT_DESCRIPTION.to_string())
        );
        assert!(document.servers.is_none());
        assert!(document.paths.is_empty());
        assert!(document.tags.is_empty());
    }

    #[test]
    fn test_custom_info_and_server() {
        let document = build_document(
            &[],
            BuildOptions {
                title: "My APIs".to_string(),
                version: Some("2.1.0".to_string()),
                description: Some("Custom description".to_string()),
                server_url: Some("https://api.example.com".to_string()),
                default_response_description: None,
            },
        );

        assert_eq!(document.info.version, "2.1.0");
        assert_eq!(document.info.description, Some("Custom description".to_string()));
        assert_eq!(
            document.servers,
            Some(vec![Server {
                url: "https://api.example.com".to_string()
            }])
        );
    }

    #[test]
    fn test_same_path_collapses_into_one_path_item() {
        let document = build_document(
            &[
                route(HttpMethod::Get, "/users", Some("Users")),
                route(HttpMethod::Post, "/users", Some("Users")),
            ],
            options("Test APIs"),
        );

        assert_eq!(document.paths.len(), 1);
        let path_item = &document.paths["/users"];
        assert!(path_item.get.is_some());
        assert!(path_item.post.is_some());
        assert_eq!(path_item.operation_count(), 2);
    }

    #[test]
    fn test_operation_fields() {
        let document = build_document(
            &[route(HttpMethod::Get, "/users/{id}", Some("Users"))],
            options("Test APIs"),
        );

        let operation = document.paths["/users/{id}"].get.as_ref().unwrap();
        assert_eq!(operation.summary, "summary of /users/{id}");
        assert_eq!(
            operation.description,
            "自动从 src/test.controller.ts:7 生成 (annotation)"
        );
        assert_eq!(operation.tags, Some(vec!["Users".to_string()]));
        assert_eq!(operation.operation_id, "Users_get_users_id");
        assert_eq!(
            operation.responses["200"].description,
            DEFAULT_RESPONSE_DESCRIPTION
        );
        assert_eq!(operation.folder, Some("src".to_string()));
    }

    #[test]
    fn test_folder_extension_renders_separators() {
        let mut r = route(HttpMethod::Get, "/health", None);
        r.folder = Some("src/routes/internal".to_string());

        let document = build_document(&[r], options("Test APIs"));

        let operation = document.paths["/health"].get.as_ref().unwrap();
        assert_eq!(operation.folder, Some("src / routes / internal".to_string()));
    }

    #[test]
    fn test_route_without_folder_has_no_extension() {
        let mut r = route(HttpMethod::Get, "/health", None);
        r.folder = None;

        let document = build_document(&[r], options("Test APIs"));

        let operation = document.paths["/health"].get.as_ref().unwrap();
        assert_eq!(operation.folder, None);
        assert_eq!(operation.tags, None);
    }

    #[test]
    fn test_all_method_is_documented_as_get() {
        let document = build_document(
            &[route(HttpMethod::All, "/anything", Some("Misc"))],
            options("Test APIs"),
        );

        let path_item = &document.paths["/anything"];
        assert!(path_item.get.is_some());
        assert_eq!(path_item.operation_count(), 1);
        assert_eq!(
            path_item.get.as_ref().unwrap().operation_id,
            "Misc_get_anything"
        );
    }

    #[test]
    fn test_same_path_and_method_last_write_wins() {
        // distinct tags survive dedup but collide on the same document slot
        let mut first = route(HttpMethod::Get, "/users", Some("Users"));
        first.summary = "first".to_string();
        let mut second = route(HttpMethod::Get, "/users", Some("Admin"));
        second.summary = "second".to_string();

        let document = build_document(&[first, second], options("Test APIs"));

        let operation = document.paths["/users"].get.as_ref().unwrap();
        assert_eq!(operation.summary, "second");
        assert_eq!(operation.tags, Some(vec!["Admin".to_string()]));
        // both tags still appear in the catalogue
        let names: Vec<&str> = document.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Users", "Admin"]);
    }

    #[test]
    fn test_tag_catalogue_first_seen_order() {
        let document = build_document(
            &[
                route(HttpMethod::Get, "/b", Some("Beta")),
                route(HttpMethod::Get, "/a", Some("Alpha")),
                route(HttpMethod::Post, "/b", Some("Beta")),
                route(HttpMethod::Get, "/c", None),
            ],
            options("Test APIs"),
        );

        let names: Vec<&str> = document.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Alpha"]);
    }

    #[test]
    fn test_empty_tag_is_not_catalogued() {
        let document = build_document(
            &[route(HttpMethod::Get, "/users", Some(""))],
            options("Test APIs"),
        );

        assert!(document.tags.is_empty());
        let operation = document.paths["/users"].get.as_ref().unwrap();
        assert_eq!(operation.tags, None);
    }

    #[test]
    fn test_operation_count_matches_route_count() {
        let routes = vec![
            route(HttpMethod::Get, "/users", Some("Users")),
            route(HttpMethod::Post, "/users", Some("Users")),
            route(HttpMethod::Get, "/health", None),
            route(HttpMethod::All, "/fallback", None),
        ];

        let document = build_document(&routes, options("Test APIs"));

        let operations: usize = document
            .paths
            .values()
            .map(PathItem::operation_count)
            .sum();
        assert_eq!(operations, routes.len());
    }

    #[test]
    fn test_custom_response_description() {
        let document = build_document(
            &[route(HttpMethod::Get, "/users", None)],
            BuildOptions {
                title: "Test APIs".to_string(),
                default_response_description: Some("一切正常".to_string()),
                ..BuildOptions::default()
            },
        );

        let operation = document.paths["/users"].get.as_ref().unwrap();
        assert_eq!(operation.responses["200"].description, "一切正常");
    }

    #[test]
    fn test_call_chain_origin_in_description() {
        let mut r = route(HttpMethod::Get, "/health", Some("routes"));
        r.origin = RouteOrigin::CallChain;
        r.source_file = "src/routes/health.router.ts".to_string();
        r.line = 3;

        let document = build_document(&[r], options("Test APIs"));

        let operation = document.paths["/health"].get.as_ref().unwrap();
        assert_eq!(
            operation.description,
            "自动从 src/routes/health.router.ts:3 生成 (call-chain)"
        );
    }
}
