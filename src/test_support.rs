//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::Language;
use crate::catalog::{CatalogSource, CatalogStore, DataUrls, FetchError};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;

/// An in-memory source serving canned documents by URL.
/// Unknown URLs answer with HTTP 404. Every call is counted.
#[derive(Default)]
pub struct StaticSource {
    documents: HashMap<String, Value>,
    requests: AtomicUsize,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, document: Value) -> Self {
        self.documents.insert(url.to_string(), document);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Api {
                status: 404,
                message: format!("no document at {url}"),
            })
    }
}

/// A small but complete set of storefront documents.
pub fn sample_source() -> StaticSource {
    let urls = DataUrls::default();
    StaticSource::new()
        .with(
            &urls.header,
            json!({
                "en": { "images": [ { "filename": "logo.png" } ] },
                "de": { "images": [ { "filename": "logo.png" } ] }
            }),
        )
        .with(
            &urls.home,
            json!({
                "en": {
                    "slideshowImages": [ { "image": { "filename": "slide.jpg" } } ],
                    "contentRichText": [ { "children": [ { "text": "Welcome, it's open" } ] } ],
                    "socialMediaImages": []
                }
            }),
        )
        .with(
            &urls.products,
            json!({
                "en": {
                    "page": { "title": "Shop", "description": "All products" },
                    "docs": [ {
                        "id": "p1",
                        "name": "Linen Shirt",
                        "category": { "name": "Shirts" },
                        "price": 89,
                        "images": [ { "filename": "shirt.jpg" } ],
                        "contentHtml": [ { "type": "h2", "children": [ { "text": "Soft" } ] } ]
                    } ]
                }
            }),
        )
        .with(
            &urls.categories,
            json!({ "en": { "docs": [ { "id": "c1", "name": "Shirts" } ] } }),
        )
}

/// Creates a test App backed by the given source, English, default config.
pub fn test_app_with(source: Arc<dyn CatalogSource>) -> App {
    let config = ResolvedConfig {
        language: Language::En,
        ..ResolvedConfig::default()
    };
    let store = CatalogStore::new(source, config.data_urls.clone());
    App::from_config(&config, store)
}

/// Creates a test App serving [`sample_source`].
pub fn test_app() -> App {
    test_app_with(Arc::new(sample_source()))
}
