//! Template resolution: reference → dialog body markup.
//!
//! A template reference is literal markup (when `plain`), a cache key, or a
//! fetchable resource identifier. Resolution is synchronous for the
//! placeholder, plain, and cache-hit paths; only a cache miss suspends on
//! the [`TemplateLoader`] collaborator. Fetched bodies are cached, so each
//! reference is fetched at most once per process.

use crate::error::{DialogError, DialogResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

/// Placeholder body mounted when a dialog is opened with no template.
/// Opening without a template is not an error.
pub const EMPTY_TEMPLATE: &str = "Empty template";

/// HTTP-like fetch capability for non-plain, non-cached template
/// references.
#[async_trait]
pub trait TemplateLoader: Send + Sync {
    async fn fetch(&self, reference: &str) -> anyhow::Result<String>;
}

/// Loader over a fixed in-memory map. Useful for hosts that register all
/// templates up front, and for tests.
#[derive(Debug, Default)]
pub struct StaticTemplateLoader {
    templates: HashMap<String, String>,
}

impl StaticTemplateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, key: impl Into<String>, body: impl Into<String>) -> Self {
        self.templates.insert(key.into(), body.into());
        self
    }
}

#[async_trait]
impl TemplateLoader for StaticTemplateLoader {
    async fn fetch(&self, reference: &str) -> anyhow::Result<String> {
        self.templates
            .get(reference)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown template '{reference}'"))
    }
}

/// Loader reading template files relative to a root directory.
#[derive(Debug)]
pub struct FileTemplateLoader {
    root: PathBuf,
}

impl FileTemplateLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl TemplateLoader for FileTemplateLoader {
    async fn fetch(&self, reference: &str) -> anyhow::Result<String> {
        let path = self.root.join(reference);
        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| anyhow::anyhow!("reading template {}: {e}", path.display()))?;
        Ok(body)
    }
}

/// Loader fetching templates over HTTP.
#[derive(Debug, Default)]
pub struct HttpTemplateLoader {
    client: reqwest::Client,
}

impl HttpTemplateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TemplateLoader for HttpTemplateLoader {
    async fn fetch(&self, reference: &str) -> anyhow::Result<String> {
        let response = self.client.get(reference).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Resolver combining the append-only process-wide cache with a loader.
pub struct TemplateResolver {
    cache: HashMap<String, String>,
    loader: Box<dyn TemplateLoader>,
}

impl TemplateResolver {
    pub fn new(loader: Box<dyn TemplateLoader>) -> Self {
        Self {
            cache: HashMap::new(),
            loader,
        }
    }

    /// Pre-seed the cache, the equivalent of registering an inline
    /// template under a key.
    pub fn prime(&mut self, key: impl Into<String>, body: impl Into<String>) {
        self.cache.insert(key.into(), body.into());
    }

    pub fn cached(&self, key: &str) -> Option<&str> {
        self.cache.get(key).map(String::as_str)
    }

    /// Resolve a template reference to body markup.
    ///
    /// Empty/absent references resolve to [`EMPTY_TEMPLATE`]. With `plain`
    /// the reference itself is the markup. Otherwise the cache is
    /// consulted, and on a miss the loader fetch is awaited; a fetch
    /// failure aborts the surrounding open with
    /// [`DialogError::TemplateResolution`].
    pub async fn resolve(&mut self, reference: Option<&str>, plain: bool) -> DialogResult<String> {
        let reference = match reference {
            Some(r) if !r.is_empty() => r,
            _ => return Ok(EMPTY_TEMPLATE.to_string()),
        };

        if plain {
            return Ok(reference.to_string());
        }

        if let Some(hit) = self.cache.get(reference) {
            return Ok(hit.clone());
        }

        let body = self
            .loader
            .fetch(reference)
            .await
            .map_err(DialogError::TemplateResolution)?;
        tracing::debug!(reference, "fetched and cached template");
        self.cache.insert(reference.to_string(), body.clone());
        Ok(body)
    }
}
