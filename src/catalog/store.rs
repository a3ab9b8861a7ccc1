//! # Catalog Store
//!
//! Lazily fetched, fetch-once cache for the shell's JSON resources.
//!
//! ```text
//! ensure([Products, Categories])
//!   ├── cached?  → nothing to do
//!   └── missing  → fetch all missing concurrently (one task, join_all)
//!                  ├── Ok   → decode, cache for the rest of the session
//!                  └── Err  → log, cache stays empty (no automatic retry)
//! ```
//!
//! There is no in-flight de-duplication: two overlapping `ensure` calls for
//! the same uncached resource both fetch, and the later result overwrites.

use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Language;
use crate::catalog::source::{CatalogSource, FetchError};
use crate::catalog::types::{
    CategoriesDoc, HeaderPage, HomePage, Localized, Product, ProductsDoc,
};

/// A remote JSON document the shell depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Header,
    Home,
    Products,
    Categories,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Header => "header",
            Resource::Home => "home",
            Resource::Products => "products",
            Resource::Categories => "categories",
        };
        f.write_str(name)
    }
}

/// Relative URLs of each resource.
#[derive(Debug, Clone, PartialEq)]
pub struct DataUrls {
    pub header: String,
    pub home: String,
    pub products: String,
    pub categories: String,
}

impl Default for DataUrls {
    fn default() -> Self {
        Self {
            header: "/assets/data/header.json".to_string(),
            home: "/assets/data/home.json".to_string(),
            products: "/assets/data/shop-products.json".to_string(),
            categories: "/assets/data/shop-categories.json".to_string(),
        }
    }
}

impl DataUrls {
    pub fn url(&self, resource: Resource) -> &str {
        match resource {
            Resource::Header => &self.header,
            Resource::Home => &self.home,
            Resource::Products => &self.products,
            Resource::Categories => &self.categories,
        }
    }
}

pub struct CatalogStore {
    source: Arc<dyn CatalogSource>,
    urls: DataUrls,
    header: Option<Localized<HeaderPage>>,
    home: Option<Localized<HomePage>>,
    products: Option<Localized<ProductsDoc>>,
    categories: Option<Localized<CategoriesDoc>>,
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, FetchError> {
    serde_json::from_value(value).map_err(|e| FetchError::Parse(e.to_string()))
}

impl CatalogStore {
    pub fn new(source: Arc<dyn CatalogSource>, urls: DataUrls) -> Self {
        Self {
            source,
            urls,
            header: None,
            home: None,
            products: None,
            categories: None,
        }
    }

    pub fn urls(&self) -> &DataUrls {
        &self.urls
    }

    pub fn is_loaded(&self, resource: Resource) -> bool {
        match resource {
            Resource::Header => self.header.is_some(),
            Resource::Home => self.home.is_some(),
            Resource::Products => self.products.is_some(),
            Resource::Categories => self.categories.is_some(),
        }
    }

    /// Fetches every uncached resource in `resources`.
    ///
    /// Returns `true` when all of them are available afterwards.
    pub async fn ensure(&mut self, resources: &[Resource]) -> bool {
        let mut missing: Vec<Resource> = Vec::new();
        for r in resources {
            if !self.is_loaded(*r) && !missing.contains(r) {
                missing.push(*r);
            }
        }
        if missing.is_empty() {
            return true;
        }

        debug!("Fetching {} resource(s) via {}", missing.len(), self.source.name());
        let fetches = missing.iter().map(|r| {
            let source = Arc::clone(&self.source);
            let url = self.urls.url(*r).to_string();
            async move {
                let result = source.fetch_json(&url).await;
                (*r, url, result)
            }
        });
        let results = join_all(fetches).await;

        let mut complete = true;
        for (resource, url, result) in results {
            match result.and_then(|value| self.store(resource, value)) {
                Ok(()) => info!("Loaded {} from {}", resource, url),
                Err(e) => {
                    error!("Failed to load {} from {}: {}", resource, url, e);
                    complete = false;
                }
            }
        }
        complete && resources.iter().all(|r| self.is_loaded(*r))
    }

    fn store(&mut self, resource: Resource, value: Value) -> Result<(), FetchError> {
        match resource {
            Resource::Header => self.header = Some(decode(value)?),
            Resource::Home => self.home = Some(decode(value)?),
            Resource::Products => self.products = Some(decode(value)?),
            Resource::Categories => self.categories = Some(decode(value)?),
        }
        Ok(())
    }

    pub fn header(&self, lang: Language) -> Option<&HeaderPage> {
        self.header.as_ref().and_then(|doc| doc.get(lang))
    }

    pub fn home(&self, lang: Language) -> Option<&HomePage> {
        self.home.as_ref().and_then(|doc| doc.get(lang))
    }

    pub fn products(&self, lang: Language) -> Option<&ProductsDoc> {
        self.products.as_ref().and_then(|doc| doc.get(lang))
    }

    pub fn categories(&self, lang: Language) -> Option<&CategoriesDoc> {
        self.categories.as_ref().and_then(|doc| doc.get(lang))
    }

    pub fn product(&self, lang: Language, id: &str) -> Option<&Product> {
        self.products(lang).and_then(|doc| doc.find(id))
    }
}
