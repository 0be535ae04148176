//! OpenAPI From Routes - Automatic OpenAPI documentation from TypeScript/JavaScript web projects.
//!
//! This library provides tools to automatically generate OpenAPI 3.1 documentation by statically
//! analyzing TypeScript/JavaScript source code. It discovers route declarations, normalizes them
//! into a uniform route model, and synthesizes a structured API description document.
//!
//! # Supported route conventions
//!
//! - **Decorator controllers**: classes annotated `@Controller` whose methods carry
//!   `@Get`/`@Post`/… decorators
//! - **Fluent routers**: `router.get(path, handler)` style member call chains
//!
//! # Architecture
//!
//! The library is organized into several modules that work together:
//!
//! 1. [`scanner`] - Resolves glob include/ignore patterns into a file list
//! 2. [`parser`] - Parses source files into syntax trees, skipping files that fail
//! 3. [`extractor`] - Extracts routes via the two independent strategies
//! 4. [`path_normalizer`] - Combines path fragments into canonical route paths
//! 5. [`dedup`] - Collapses duplicate `(method, path, tag)` routes, first seen wins
//! 6. [`openapi_builder`] - Folds the route list into the final API document
//! 7. [`operation_id`] - Derives deterministic operation identifiers
//! 8. [`serializer`] - Serializes the document to YAML or JSON
//!
//! The platform collaborators of the surrounding system are modeled as contracts:
//! [`platform`] (export/import client), [`cache`] (locale-keyed document memoization)
//! and [`exec`] (external CLI invocation).
//!
//! # Example Usage
//!
//! ```no_run
//! use openapi_from_routes::{
//!     scanner::FileScanner,
//!     parser::AstParser,
//!     extractor::{RouteExtractor, annotation::AnnotationExtractor, call_chain::CallChainExtractor},
//!     dedup::deduplicate_routes,
//!     openapi_builder::{build_document, BuildOptions},
//!     serializer::serialize_yaml,
//! };
//! use std::path::PathBuf;
//!
//! // Resolve candidate files
//! let root = PathBuf::from("./my-project");
//! let scanner = FileScanner::new(root.clone());
//! let scan_result = scanner.scan().unwrap();
//!
//! // Parse files, skipping any that fail
//! let parsed_files: Vec<_> = AstParser::parse_files(&scan_result.source_files)
//!     .into_iter()
//!     .filter_map(Result::ok)
//!     .collect();
//!
//! // Run both extraction strategies and merge their routes
//! let mut routes = Vec::new();
//! for file in &parsed_files {
//!     routes.extend(AnnotationExtractor.extract(file, &root));
//!     routes.extend(CallChainExtractor.extract(file, &root));
//! }
//! let routes = deduplicate_routes(routes);
//!
//! // Synthesize and serialize the document
//! let document = build_document(
//!     &routes,
//!     BuildOptions {
//!         title: "My APIs".to_string(),
//!         ..BuildOptions::default()
//!     },
//! );
//! println!("{}", serialize_yaml(&document).unwrap());
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete CLI application.

pub mod cache;
pub mod cli;
pub mod dedup;
pub mod error;
pub mod exec;
pub mod extractor;
pub mod openapi_builder;
pub mod operation_id;
pub mod parser;
pub mod path_normalizer;
pub mod platform;
pub mod scanner;
pub mod serializer;
