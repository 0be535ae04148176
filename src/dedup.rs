//! Route deduplication.
//!
//! The same endpoint can be discovered more than once, e.g. when a file
//! matches several include patterns or a route is re-registered across
//! modules. Routes are folded by `(method, path, tag)`: the first occurrence
//! wins and input order is preserved.

use crate::extractor::Route;
use std::collections::HashSet;

/// Collapses routes with identical `(method, path, tag)` into one.
///
/// The first route seen for a key wins; later duplicates are discarded. The
/// output keeps the surviving routes in input order.
pub fn deduplicate_routes(routes: Vec<Route>) -> Vec<Route> {
    let mut seen = HashSet::new();
    let mut deduplicated = Vec::with_capacity(routes.len());

    for route in routes {
        let key = format!(
            "{}:{}:{}",
            route.method.as_str(),
            route.path,
            route.tag.as_deref().unwrap_or("")
        );
        if seen.insert(key) {
            deduplicated.push(route);
        }
    }

    deduplicated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{HttpMethod, RouteOrigin};

    fn route(method: HttpMethod, path: &str, tag: Option<&str>, summary: &str) -> Route {
        Route {
            method,
            path: path.to_string(),
            summary: summary.to_string(),
            tag: tag.map(str::to_string),
            source_file: "src/test.controller.ts".to_string(),
            line: 1,
            folder: Some("src".to_string()),
            origin: RouteOrigin::Annotation,
        }
    }

    #[test]
    fn test_first_seen_wins() {
        let routes = vec![
            route(HttpMethod::Get, "/users", Some("Users"), "first"),
            route(HttpMethod::Get, "/users", Some("Users"), "second"),
        ];

        let deduplicated = deduplicate_routes(routes);

        assert_eq!(deduplicated.len(), 1);
        assert_eq!(deduplicated[0].summary, "first");
    }

    #[test]
    fn test_distinct_methods_are_kept() {
        let routes = vec![
            route(HttpMethod::Get, "/users", Some("Users"), "list"),
            route(HttpMethod::Post, "/users", Some("Users"), "create"),
        ];

        let deduplicated = deduplicate_routes(routes);

        assert_eq!(deduplicated.len(), 2);
    }

    #[test]
    fn test_distinct_tags_are_kept() {
        let routes = vec![
            route(HttpMethod::Get, "/users", Some("Users"), "a"),
            route(HttpMethod::Get, "/users", Some("Admin"), "b"),
            route(HttpMethod::Get, "/users", None, "c"),
        ];

        let deduplicated = deduplicate_routes(routes);

        assert_eq!(deduplicated.len(), 3);
    }

    #[test]
    fn test_input_order_is_preserved() {
        let routes = vec![
            route(HttpMethod::Get, "/c", None, "c"),
            route(HttpMethod::Get, "/a", None, "a"),
            route(HttpMethod::Get, "/b", None, "b"),
            route(HttpMethod::Get, "/a", None, "a-dup"),
        ];

        let deduplicated = deduplicate_routes(routes);

        let paths: Vec<&str> = deduplicated.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/c", "/a", "/b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(deduplicate_routes(Vec::new()).is_empty());
    }

    #[test]
    fn test_exactly_one_route_per_key() {
        let routes = vec![
            route(HttpMethod::Get, "/users", Some("Users"), "1"),
            route(HttpMethod::Get, "/users", Some("Users"), "2"),
            route(HttpMethod::Post, "/users", Some("Users"), "3"),
            route(HttpMethod::Get, "/users", None, "4"),
            route(HttpMethod::All, "/users", Some("Users"), "5"),
        ];

        let deduplicated = deduplicate_routes(routes);

        let mut keys: Vec<String> = deduplicated
            .iter()
            .map(|r| {
                format!(
                    "{}:{}:{}",
                    r.method.as_str(),
                    r.path,
                    r.tag.as_deref().unwrap_or("")
                )
            })
            .collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(before, keys.len());
        assert_eq!(deduplicated.len(), 4);
    }
}
