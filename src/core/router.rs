//! # Router
//!
//! Owns the current location and is the only thing that changes it.
//!
//! ```text
//! anchor click ──► handle_internal_link_click ──► navigate ──► history.push
//!                                                    │
//! back/forward ──► handle_history_pop ───────────────┤ (no push)
//!                                                    ▼
//!                                     location updated, subscribers notified
//! ```
//!
//! The browser is abstracted behind [`History`]; [`MemoryHistory`] is the
//! headless implementation used by the CLI and tests.

use log::{debug, info, warn};
use reqwest::Url;

use crate::core::route::{RouteEntry, RouteTable};

/// The environment's session history.
pub trait History {
    /// URL of the active history entry.
    fn current(&self) -> Url;

    /// Records a new entry without loading the page, dropping forward entries.
    fn push(&mut self, url: Url);

    /// Moves one entry back. Returns false at the start of history.
    fn back(&mut self) -> bool;

    /// Moves one entry forward. Returns false at the end of history.
    fn forward(&mut self) -> bool;
}

/// In-memory history stack with a cursor, like a browser tab's.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Url>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new(initial: Url) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

}

impl History for MemoryHistory {
    fn current(&self) -> Url {
        self.entries[self.cursor].clone()
    }

    fn push(&mut self, url: Url) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(url);
        self.cursor = self.entries.len() - 1;
    }

    fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

/// Innermost element a click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// An anchor; `href` may be absolute or relative to the origin.
    Anchor { href: String },
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub target: ClickTarget,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn anchor(href: impl Into<String>) -> Self {
        Self {
            target: ClickTarget::Anchor { href: href.into() },
            default_prevented: false,
        }
    }

    pub fn other() -> Self {
        Self {
            target: ClickTarget::Other,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

type Listener = Box<dyn FnMut(&str)>;

pub struct Router {
    origin: Url,
    home_path: Option<String>,
    routes: RouteTable,
    history: Box<dyn History>,
    url: Url,
    listeners: Vec<Listener>,
}

/// Scheme, host and port all match, as for the browser's same-origin rule.
fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str().is_some()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
}

/// Path plus query, the part of a URL the history records for in-app links.
fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    }
}

impl Router {
    /// Creates a router and reads the initial location from `history`.
    /// A root initial location is redirected to the home path.
    pub fn new(
        origin: Url,
        home_path: Option<String>,
        routes: RouteTable,
        history: Box<dyn History>,
    ) -> Self {
        let url = history.current();
        let mut router = Self {
            origin,
            home_path,
            routes,
            history,
            url,
            listeners: Vec::new(),
        };
        if router.url.path() == "/" && router.home_path.is_some() {
            let target = path_and_query(&router.url);
            router.navigate(&target);
        }
        router
    }

    /// Current location path (no query). Drives route resolution.
    pub fn location(&self) -> &str {
        self.url.path()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn history(&self) -> &dyn History {
        self.history.as_ref()
    }

    pub fn history_mut(&mut self) -> &mut dyn History {
        self.history.as_mut()
    }

    /// First value of query parameter `name` in the current URL.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    pub fn resolve(&self, path: &str) -> &RouteEntry {
        self.routes.resolve(path)
    }

    pub fn current_route(&self) -> &RouteEntry {
        self.routes.resolve(self.location())
    }

    /// Registers a listener called with the new location after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&str) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Pushes `path` to history and makes it the current location.
    /// The root path is rewritten to the home path first. Paths that
    /// resolve outside the origin are refused.
    ///
    /// Returns true when a re-render is required.
    pub fn navigate(&mut self, path: &str) -> bool {
        let mut url = match self.origin.join(path) {
            Ok(url) => url,
            Err(e) => {
                warn!("Cannot navigate to {:?}: {}", path, e);
                return false;
            }
        };
        if !same_origin(&url, &self.origin) {
            warn!("Refusing to navigate to {} outside {}", url, self.origin);
            return false;
        }
        if url.path() == "/"
            && let Some(home) = &self.home_path
        {
            debug!("Rewriting root to home path {}", home);
            url.set_path(home);
        }
        self.history.push(url.clone());
        self.set_url(url);
        true
    }

    /// Handles a click anywhere in the document. Same-origin anchors are
    /// routed in-app and their default action is suppressed; everything
    /// else is left to the browser.
    pub fn handle_internal_link_click(&mut self, event: &mut ClickEvent) -> bool {
        let ClickTarget::Anchor { href } = &event.target else {
            return false;
        };
        let url = match self.origin.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!("Ignoring click on unparsable href {:?}: {}", href, e);
                return false;
            }
        };
        if !same_origin(&url, &self.origin) {
            debug!("Ignoring click on external link {}", url);
            return false;
        }

        info!("Internal anchor clicked: {}", url);
        event.prevent_default();
        self.navigate(&path_and_query(&url))
    }

    /// Re-reads the location after the environment moved through history.
    /// History is not touched; a root entry still maps to the home path.
    ///
    /// Returns true when the location changed.
    pub fn handle_history_pop(&mut self) -> bool {
        let mut url = self.history.current();
        if url.path() == "/"
            && let Some(home) = &self.home_path
        {
            url.set_path(home);
        }
        if url == self.url {
            return false;
        }
        info!("History pop to {}", url.path());
        self.set_url(url);
        true
    }

    fn set_url(&mut self, url: Url) {
        self.url = url;
        let location = self.url.path();
        for listener in &mut self.listeners {
            listener(location);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::route::Page;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn origin() -> Url {
        Url::parse("http://localhost:3000").unwrap()
    }

    fn router_at(path: &str) -> Router {
        let start = origin().join(path).unwrap();
        Router::new(
            origin(),
            Some("/home".to_string()),
            RouteTable::storefront(),
            Box::new(MemoryHistory::new(start)),
        )
    }

    #[test]
    fn test_initial_root_redirects_home() {
        let router = router_at("/");
        assert_eq!(router.location(), "/home");
        assert_eq!(router.history().current().path(), "/home");
    }

    #[test]
    fn test_navigate_root_records_home_path() {
        let mut router = router_at("/shop");
        assert!(router.navigate("/"));
        assert_eq!(router.location(), "/home");
        assert_eq!(router.history().current().path(), "/home");
    }

    #[test]
    fn test_navigate_without_home_keeps_root() {
        let mut router = Router::new(
            origin(),
            None,
            RouteTable::storefront(),
            Box::new(MemoryHistory::new(origin())),
        );
        router.navigate("/");
        assert_eq!(router.location(), "/");
        assert_eq!(router.current_route().page, Page::NotFound);
    }

    #[test]
    fn test_navigate_refuses_other_origins() {
        let mut router = router_at("/home");
        for target in [
            "//evil.example/x",
            "https://localhost:3000/shop",
            "http://localhost:4000/shop",
            "mailto:shop@example.com",
        ] {
            assert!(!router.navigate(target), "{target}");
        }
        assert_eq!(router.location(), "/home");
        assert_eq!(router.history().current().as_str(), "http://localhost:3000/home");

        assert!(router.navigate("http://localhost:3000/shop"));
        assert_eq!(router.location(), "/shop");
    }

    #[test]
    fn test_internal_click_is_routed() {
        let mut router = router_at("/home");
        let mut event = ClickEvent::anchor("http://localhost:3000/product?id=p1");
        assert!(router.handle_internal_link_click(&mut event));
        assert!(event.is_default_prevented());
        assert_eq!(router.location(), "/product");
        assert_eq!(router.query_param("id").as_deref(), Some("p1"));
        assert_eq!(router.current_route().page, Page::Product);
    }

    #[test]
    fn test_relative_href_is_internal() {
        let mut router = router_at("/home");
        let mut event = ClickEvent::anchor("/cart");
        assert!(router.handle_internal_link_click(&mut event));
        assert_eq!(router.location(), "/cart");
    }

    #[test]
    fn test_external_and_non_anchor_clicks_are_ignored() {
        let mut router = router_at("/home");

        let mut external = ClickEvent::anchor("https://example.com/shop");
        assert!(!router.handle_internal_link_click(&mut external));
        assert!(!external.is_default_prevented());

        let mut other_port = ClickEvent::anchor("http://localhost:8080/shop");
        assert!(!router.handle_internal_link_click(&mut other_port));
        assert!(!other_port.is_default_prevented());

        let mut mail = ClickEvent::anchor("mailto:shop@example.com");
        assert!(!router.handle_internal_link_click(&mut mail));

        let mut other = ClickEvent::other();
        assert!(!router.handle_internal_link_click(&mut other));
        assert!(!other.is_default_prevented());

        assert_eq!(router.location(), "/home");
    }

    #[test]
    fn test_history_pop_follows_environment() {
        let mut router = router_at("/home");
        router.navigate("/shop");
        router.navigate("/about");

        assert!(router.history_mut().back());
        assert!(router.handle_history_pop());
        assert_eq!(router.location(), "/shop");
        // Pop only reads history
        assert!(!router.handle_history_pop());

        assert!(router.history_mut().forward());
        assert!(router.handle_history_pop());
        assert_eq!(router.location(), "/about");
        assert!(!router.history_mut().forward());
    }

    #[test]
    fn test_history_pop_to_root_maps_home_without_push() {
        let mut router = router_at("/");
        // The initial redirect pushed /home over the root entry
        assert!(router.history_mut().back());
        assert_eq!(router.history().current().path(), "/");
        assert!(!router.handle_history_pop());
        assert_eq!(router.location(), "/home");
        assert_eq!(router.history().current().path(), "/");
    }

    #[test]
    fn test_subscribers_see_each_change() {
        let mut router = router_at("/home");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        router.subscribe(move |loc| sink.borrow_mut().push(loc.to_string()));

        router.navigate("/shop");
        router.navigate("/");
        assert_eq!(*seen.borrow(), vec!["/shop", "/home"]);
    }

    #[test]
    fn test_memory_history_push_drops_forward_entries() {
        let mut history = MemoryHistory::new(origin());
        history.push(origin().join("/a").unwrap());
        history.push(origin().join("/b").unwrap());
        assert!(history.back());
        history.push(origin().join("/c").unwrap());
        assert!(!history.forward());
        assert_eq!(history.current().path(), "/c");
        assert!(history.back());
        assert_eq!(history.current().path(), "/a");
        assert!(history.back());
        assert!(!history.back());
    }
}
