//! Contract types for the API-management platform collaborator.
//!
//! The surrounding system talks to an external platform to export and import
//! OpenAPI documents. Only the request/response data model and the client
//! trait live here; transport, authentication and retries are implemented
//! elsewhere. The core consumes an exported payload through
//! [`crate::cache::DocumentCache`] and produces payloads via
//! [`crate::serializer`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned by a platform request: an HTTP-like status plus the raw
/// response payload when one was readable.
#[derive(Debug)]
pub struct RequestError {
    /// HTTP-like status code
    pub status: u16,
    /// Human-readable error message
    pub message: String,
    /// Response payload, if any
    pub details: Option<serde_json::Value>,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "平台 API 请求失败 {}: {}", self.status, self.message)
    }
}

impl std::error::Error for RequestError {}

/// Which part of the remote project an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeType {
    /// Every endpoint
    All,
    /// Endpoints selected by tags
    Tags,
    /// Endpoints selected by folder ids
    Folders,
}

/// Export scope selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportScope {
    /// Selector kind
    #[serde(rename = "type")]
    pub scope_type: ScopeType,
    /// Tags to include when `scope_type` is `Tags`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_by_tags: Option<Vec<String>>,
    /// Tags to exclude when `scope_type` is `Tags`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_by_tags: Option<Vec<String>>,
    /// Folder ids when `scope_type` is `Folders`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_ids: Option<Vec<u64>>,
}

impl Default for ExportScope {
    fn default() -> Self {
        Self {
            scope_type: ScopeType::All,
            included_by_tags: None,
            excluded_by_tags: None,
            folder_ids: None,
        }
    }
}

/// Export rendering options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    /// Keep platform extension properties (`x-…` fields) in the payload
    pub include_extension_properties: bool,
    /// Mirror the folder tree into document tags
    pub add_folders_to_tags: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_extension_properties: true,
            add_folders_to_tags: true,
        }
    }
}

/// Wire format of an exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExportFormat {
    /// JSON payload
    Json,
    /// YAML payload
    Yaml,
}

/// Export request sent to the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Scope selector
    pub scope: ExportScope,
    /// Rendering options
    pub options: ExportOptions,
    /// Requested OpenAPI version tag
    pub oas_version: String,
    /// Requested wire format
    pub export_format: ExportFormat,
    /// Response language, e.g. `zh-CN` or `en-US`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            scope: ExportScope::default(),
            options: ExportOptions::default(),
            oas_version: "3.1".to_string(),
            export_format: ExportFormat::Json,
            locale: None,
        }
    }
}

/// Merge behavior for entities that already exist remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverwriteBehavior {
    /// Replace the remote entity
    OverwriteExisting,
    /// Keep the remote entity untouched
    IgnoreExisting,
    /// Keep both versions
    KeepBoth,
    /// Merge field-by-field
    SmartMerge,
}

/// Import request sent to the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    /// Serialized OpenAPI document payload
    pub content: String,
    /// Merge behavior for endpoints
    pub endpoint_overwrite_behavior: OverwriteBehavior,
    /// Merge behavior for schemas
    pub schema_overwrite_behavior: OverwriteBehavior,
    /// Move changed endpoints into their imported folder
    pub update_folder_of_changed_endpoint: bool,
    /// Prepend the document base path to endpoint paths
    pub prepend_base_path: bool,
    /// Let the platform reconcile near-identical entities
    pub intelligent_merge: bool,
    /// Request language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl ImportRequest {
    /// Import request with the default merge behavior for `content`.
    pub fn new(content: String) -> Self {
        Self {
            content,
            endpoint_overwrite_behavior: OverwriteBehavior::SmartMerge,
            schema_overwrite_behavior: OverwriteBehavior::SmartMerge,
            update_folder_of_changed_endpoint: true,
            prepend_base_path: false,
            intelligent_merge: true,
            locale: None,
        }
    }
}

/// Per-entity-kind counters reported after an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportCounters {
    /// Endpoints newly created
    pub endpoint_created: u32,
    /// Endpoints updated in place
    pub endpoint_updated: u32,
    /// Endpoints the platform rejected
    pub endpoint_failed: u32,
    /// Endpoints skipped by the merge behavior
    pub endpoint_ignored: u32,
    /// Schemas newly created
    pub schema_created: u32,
    /// Schemas updated in place
    pub schema_updated: u32,
    /// Schemas the platform rejected
    pub schema_failed: u32,
    /// Schemas skipped by the merge behavior
    pub schema_ignored: u32,
}

/// Client contract for the platform API.
///
/// `export_openapi` returns the opaque document payload; `import_openapi`
/// returns the per-entity counters. Implementations live outside this crate;
/// tests use in-memory fakes.
pub trait PlatformClient {
    /// Exports the remote project as an OpenAPI payload.
    fn export_openapi(&self, request: &ExportRequest) -> Result<String, RequestError>;

    /// Imports an OpenAPI payload into the remote project.
    fn import_openapi(&self, request: &ImportRequest) -> Result<ImportCounters, RequestError>;
}
