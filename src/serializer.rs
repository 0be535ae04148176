//! Serialization module for converting OpenAPI documents to YAML or JSON format.
//!
//! This module provides functions to serialize synthesized API documents into
//! standard formats and write them to files or return them as strings.

use crate::openapi_builder::ApiDocument;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes an API document to YAML format.
///
/// The output is formatted as standard YAML, suitable for use with OpenAPI
/// tools and documentation generators.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(document: &ApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to YAML");
    serde_yaml::to_string(document).context("Failed to serialize OpenAPI document to YAML")
}

/// Serializes an API document to JSON format with pretty printing.
///
/// The output is formatted with indentation for readability, making it
/// suitable for human review and version control.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(document: &ApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to JSON");
    serde_json::to_string_pretty(document).context("Failed to serialize OpenAPI document to JSON")
}

/// Writes string content to a file, creating parent directories as needed.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{HttpMethod, Route, RouteOrigin};
    use crate::openapi_builder::{build_document, BuildOptions};
    use tempfile::TempDir;

    fn test_route() -> Route {
        Route {
            method: HttpMethod::Get,
            path: "/users/{id}".to_string(),
            summary: "获取用户详情".to_string(),
            tag: Some("users".to_string()),
            source_file: "src/users/users.controller.ts".to_string(),
            line: 12,
            folder: Some("src/users".to_string()),
            origin: RouteOrigin::Annotation,
        }
    }

    fn create_test_document() -> ApiDocument {
        build_document(
            &[test_route()],
            BuildOptions {
                title: "Test API".to_string(),
                version: Some("1.0.0".to_string()),
                description: Some("A test API".to_string()),
                ..BuildOptions::default()
            },
        )
    }

    #[test]
    fn test_serialize_yaml() {
        let document = create_test_document();
        let yaml = serialize_yaml(&document).unwrap();

        assert!(yaml.contains("openapi:"));
        assert!(yaml.contains("3.1.0"));
        assert!(yaml.contains("title: Test API"));
        assert!(yaml.contains("version: 1.0.0"));
        assert!(yaml.contains("description: A test API"));
        assert!(yaml.contains("paths:"));
        assert!(yaml.contains("/users/{id}"));
        assert!(yaml.contains("operationId: users_get_users_id"));
        assert!(yaml.contains("x-apifox-folder: src / users"));
    }

    #[test]
    fn test_serialize_json() {
        let document = create_test_document();
        let json = serialize_json(&document).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["openapi"], "3.1.0");
        assert_eq!(parsed["info"]["title"], "Test API");
        assert!(parsed["paths"]["/users/{id}"]["get"].is_object());
        assert_eq!(
            parsed["paths"]["/users/{id}"]["get"]["operationId"],
            "users_get_users_id"
        );
        assert_eq!(
            parsed["paths"]["/users/{id}"]["get"]["x-apifox-folder"],
            "src / users"
        );
        assert_eq!(parsed["tags"][0]["name"], "users");
    }

    #[test]
    fn test_serialize_json_pretty_format() {
        let document = create_test_document();
        let json = serialize_json(&document).unwrap();

        assert!(json.contains('\n'));
        assert!(json.contains("  "));

        let line_count = json.lines().count();
        assert!(line_count > 5, "Pretty printed JSON should have multiple lines");
    }

    #[test]
    fn test_write_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.yaml");
        let content = "test content";

        let result = write_to_file(content, &file_path);

        assert!(result.is_ok());
        assert!(file_path.exists());

        let read_content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(read_content, content);
    }

    #[test]
    fn test_write_to_file_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("subdir").join("nested").join("test.yaml");
        let content = "test content";

        let result = write_to_file(content, &file_path);

        assert!(result.is_ok());
        assert!(file_path.exists());

        let read_content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(read_content, content);
    }

    #[test]
    fn test_write_to_file_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.yaml");

        write_to_file("initial content", &file_path).unwrap();

        let new_content = "new content";
        let result = write_to_file(new_content, &file_path);

        assert!(result.is_ok());

        let read_content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(read_content, new_content);
    }

    #[test]
    fn test_roundtrip_yaml_serialization() {
        let document = create_test_document();
        let yaml = serialize_yaml(&document).unwrap();

        let deserialized: ApiDocument = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(deserialized.openapi, document.openapi);
        assert_eq!(deserialized.info.title, document.info.title);
        assert_eq!(deserialized.paths.len(), document.paths.len());
        assert_eq!(deserialized.tags, document.tags);
    }

    #[test]
    fn test_roundtrip_json_serialization() {
        let document = create_test_document();
        let json = serialize_json(&document).unwrap();

        let deserialized: ApiDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.openapi, document.openapi);
        assert_eq!(deserialized.info.title, document.info.title);
        assert_eq!(deserialized.paths.len(), document.paths.len());
    }

    #[test]
    fn test_write_yaml_file_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("openapi.yaml");

        let document = create_test_document();
        let yaml = serialize_yaml(&document).unwrap();

        write_to_file(&yaml, &file_path).unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        let deserialized: ApiDocument = serde_yaml::from_str(&content).unwrap();

        assert_eq!(deserialized.info.title, "Test API");
    }
}
