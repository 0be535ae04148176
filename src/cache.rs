//! Locale-keyed memoization of the most recent exported document.
//!
//! Exporting the remote document is the slowest call in the surrounding
//! system, so the last export is kept in memory and reused until it is
//! explicitly cleared, force-refreshed, or a different locale is requested.

use crate::openapi_builder::ApiDocument;
use crate::platform::{ExportRequest, PlatformClient};
use anyhow::{Context, Result};
use log::debug;

/// Owned cache for one exported [`ApiDocument`], keyed by locale.
#[derive(Default)]
pub struct DocumentCache {
    document: Option<ApiDocument>,
    locale: Option<String>,
}

impl DocumentCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached document, if it is valid for `locale`.
    ///
    /// A request without a locale accepts whatever is cached; a request with
    /// a locale only hits when it equals the cached one.
    pub fn get(&self, locale: Option<&str>) -> Option<&ApiDocument> {
        let cached = self.document.as_ref()?;
        match locale {
            None => Some(cached),
            Some(locale) if self.locale.as_deref() == Some(locale) => Some(cached),
            Some(_) => None,
        }
    }

    /// Stores `document` as the cached export for `locale`.
    pub fn put(&mut self, locale: Option<String>, document: ApiDocument) {
        self.document = Some(document);
        self.locale = locale;
    }

    /// Drops the cached document.
    pub fn clear(&mut self) {
        self.document = None;
        self.locale = None;
    }

    /// Returns the cached document, exporting through `client` on a miss.
    ///
    /// `force_refresh` bypasses the cache. The exported payload must parse
    /// as a JSON document carrying a `paths` section; anything else is an
    /// error (an empty remote project or a permission problem, not a cache
    /// defect).
    pub fn load_via(
        &mut self,
        client: &dyn PlatformClient,
        locale: Option<&str>,
        force_refresh: bool,
    ) -> Result<&ApiDocument> {
        if force_refresh || self.get(locale).is_none() {
            debug!("Document cache miss (locale {:?}), exporting", locale);
            let request = ExportRequest {
                locale: locale.map(str::to_string),
                ..ExportRequest::default()
            };
            let payload = client.export_openapi(&request)?;
            let document: ApiDocument =
                serde_json::from_str(&payload).context("导出的 OpenAPI 文档解析 JSON 失败")?;
            self.put(locale.map(str::to_string), document);
        } else {
            debug!("Document cache hit (locale {:?})", locale);
        }

        self.get(locale).context("缓存中没有可用的 OpenAPI 文档")
    }
}
