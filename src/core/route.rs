//! # Route Table
//!
//! Static mapping from URL path to page template and menu metadata.
//! Lookup is exact string equality; there are no patterns or wildcards.
//! The not-found entry lives outside the table and is only ever returned
//! as the fallback.

use crate::Language;
use crate::catalog::Resource;

/// Template selector for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Shop,
    Sale,
    Manufacture,
    Lookbook,
    About,
    Cart,
    Sizes,
    Agb,
    Product,
    NotFound,
}

/// Menu label in every supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTitle {
    pub en: String,
    pub de: String,
}

impl MenuTitle {
    pub fn new(en: &str, de: &str) -> Self {
        Self {
            en: en.to_string(),
            de: de.to_string(),
        }
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::De => &self.de,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub page: Page,
    /// `None` hides the route from the menu bar.
    pub menu: Option<MenuTitle>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Resources fetched lazily before the page template runs.
    pub data: Vec<Resource>,
}

impl RouteEntry {
    pub fn new(path: &str, page: Page) -> Self {
        Self {
            path: path.to_string(),
            page,
            menu: None,
            title: None,
            description: None,
            data: Vec::new(),
        }
    }

    pub fn menu(mut self, en: &str, de: &str) -> Self {
        self.menu = Some(MenuTitle::new(en, de));
        self
    }

    pub fn meta(mut self, title: &str, description: &str) -> Self {
        self.title = Some(title.to_string());
        self.description = Some(description.to_string());
        self
    }

    pub fn data(mut self, resources: &[Resource]) -> Self {
        self.data = resources.to_vec();
        self
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    not_found: RouteEntry,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>, not_found: RouteEntry) -> Self {
        Self { entries, not_found }
    }

    /// The storefront's routes, in menu order.
    pub fn storefront() -> Self {
        let entries = vec![
            RouteEntry::new("/home", Page::Home)
                .menu("Home", "Home")
                .data(&[Resource::Home]),
            RouteEntry::new("/shop", Page::Shop)
                .menu("Shop", "Shop")
                .data(&[Resource::Products, Resource::Categories]),
            RouteEntry::new("/sale", Page::Sale).menu("Sale", "Sale"),
            RouteEntry::new("/manufacture", Page::Manufacture).menu("Custom-made", "Anfertigungen"),
            RouteEntry::new("/lookbook", Page::Lookbook).menu("Lookbook", "Lookbook"),
            RouteEntry::new("/about", Page::About).menu("About", "About"),
            RouteEntry::new("/cart", Page::Cart).menu("Shopping Cart", "Warenkorb"),
            RouteEntry::new("/sizes", Page::Sizes).menu("Measuring", "Größen berechnen"),
            RouteEntry::new("/agb", Page::Agb).menu("AGBs", "AGBs"),
            RouteEntry::new("/product", Page::Product).data(&[Resource::Products]),
        ];
        let not_found = RouteEntry::new("404", Page::NotFound).meta("404", "Page not found");
        Self::new(entries, not_found)
    }

    /// Exact-match lookup, falling back to the not-found entry.
    pub fn resolve(&self, path: &str) -> &RouteEntry {
        self.get(path).unwrap_or(&self.not_found)
    }

    /// Exact-match lookup without fallback.
    pub fn get(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn not_found(&self) -> &RouteEntry {
        &self.not_found
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// `(path, label)` for every route shown in the menu, in registration order.
    pub fn menu_entries(&self, lang: Language) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .filter_map(|e| e.menu.as_ref().map(|m| (e.path.as_str(), m.get(lang))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_registered_path_resolves_to_itself() {
        let table = RouteTable::storefront();
        for entry in table.entries() {
            assert_eq!(table.resolve(&entry.path), entry);
        }
    }

    #[test]
    fn test_unregistered_paths_fall_back_to_not_found() {
        let table = RouteTable::storefront();
        for path in ["/", "", "/shop/", "/SHOP", "/nope", "404", "/product?id=1"] {
            assert_eq!(table.resolve(path).page, Page::NotFound, "path {path:?}");
        }
    }

    #[test]
    fn test_not_found_is_never_matched_by_equality() {
        let table = RouteTable::storefront();
        assert!(table.get("404").is_none());
        assert_eq!(table.not_found().title.as_deref(), Some("404"));
    }

    #[test]
    fn test_menu_hides_product_and_keeps_order() {
        let table = RouteTable::storefront();
        let menu = table.menu_entries(Language::De);
        assert_eq!(menu.len(), 9);
        assert_eq!(menu[0], ("/home", "Home"));
        assert_eq!(menu[3], ("/manufacture", "Anfertigungen"));
        assert_eq!(menu[6], ("/cart", "Warenkorb"));
        assert!(menu.iter().all(|(p, _)| *p != "/product"));
    }

    #[test]
    fn test_english_menu_titles() {
        let table = RouteTable::storefront();
        let menu = table.menu_entries(Language::En);
        assert_eq!(menu[7], ("/sizes", "Measuring"));
    }
}
