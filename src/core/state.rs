//! # Application State
//!
//! Core business state for the storefront. Domain data only; markup
//! construction lives in the `view` module.
//!
//! ```text
//! App
//! ├── router: Router                 // location state + route table
//! ├── language: Language             // content language
//! ├── theme: String                  // passed through to the menu bar
//! ├── paths: AssetPaths              // asset and image base directories
//! ├── store: CatalogStore            // fetch-once JSON cache
//! ├── cart: Vec<Product>             // session cart, not persisted
//! └── completed_routes: HashSet      // routes whose data is fetched
//! ```
//!
//! Event-driven changes go through `update(state, action)` in action.rs.

use std::collections::HashSet;

use log::{debug, warn};

use crate::Language;
use crate::catalog::{CatalogStore, Product};
use crate::core::config::ResolvedConfig;
use crate::core::route::RouteTable;
use crate::core::router::{MemoryHistory, Router};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub assets: String,
    pub img: String,
}

pub struct App {
    pub router: Router,
    pub language: Language,
    pub theme: String,
    pub paths: AssetPaths,
    pub store: CatalogStore,
    pub cart: Vec<Product>,
    /// Paths of routes whose data dependencies have all been fetched.
    pub completed_routes: HashSet<String>,
}

impl App {
    /// Builds the app with an in-memory history starting at the origin root.
    pub fn from_config(config: &ResolvedConfig, store: CatalogStore) -> Self {
        let history = MemoryHistory::new(config.origin.clone());
        let router = Router::new(
            config.origin.clone(),
            config.home_path.clone(),
            RouteTable::storefront(),
            Box::new(history),
        );
        Self {
            router,
            language: config.language,
            theme: config.theme.clone(),
            paths: AssetPaths {
                assets: config.assets_dir.clone(),
                img: config.img_dir.clone(),
            },
            store,
            cart: Vec::new(),
            completed_routes: HashSet::new(),
        }
    }

    /// Fetches the current route's data dependencies unless the route is
    /// already marked complete. Returns true when the data is available.
    ///
    /// The flag is only set after every dependency loaded, so a failed
    /// fetch is attempted again on the next render of the route.
    pub async fn ensure_route_data(&mut self) -> bool {
        let route = self.router.current_route();
        if route.data.is_empty() || self.completed_routes.contains(&route.path) {
            return true;
        }
        let path = route.path.clone();
        let data = route.data.clone();

        debug!("Fetching data for route {}", path);
        let complete = self.store.ensure(&data).await;
        if complete {
            self.completed_routes.insert(path);
        }
        complete
    }

    /// Adds the product with `id` to the cart. Returns false if unknown.
    pub fn add_to_cart(&mut self, id: &str) -> bool {
        match self.store.product(self.language, id) {
            Some(product) => {
                self.cart.push(product.clone());
                true
            }
            None => {
                warn!("Cannot add unknown product {} to cart", id);
                false
            }
        }
    }
}
