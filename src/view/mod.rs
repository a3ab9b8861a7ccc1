//! # View
//!
//! Turns application state into a markup tree.
//!
//! ```text
//! Shell::render()
//!   ├── fetch header data (cached after first success)
//!   ├── fetch current route's data (once per route)
//!   └── layout
//!        ├── <header>  header images
//!        ├── <nav>     menu bar from the route table
//!        └── <main>    page template for the current route
//! ```
//!
//! Event handling is explicit: the host translates DOM events into
//! [`Action`]s and passes them to [`Shell::dispatch`].

pub mod markup;
pub mod pages;

use log::info;

use crate::Language;
use crate::catalog::{PageMeta, Resource};
use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::view::markup::{Element, Markup, escape_attr, escape_text};
use crate::view::pages::{PageView, loading, render_page};

/// Values the host applies to the document head.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHead {
    pub lang: Language,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub markup: Markup,
    pub head: DocumentHead,
}

impl Rendered {
    pub fn html(&self) -> String {
        self.markup.to_html()
    }

    /// Standalone HTML document with the head values applied.
    pub fn to_document(&self) -> String {
        let mut head = String::from("<meta charset=\"utf-8\">");
        if let Some(title) = &self.head.title {
            head.push_str(&format!("<title>{}</title>", escape_text(title)));
        }
        if let Some(description) = &self.head.description {
            head.push_str(&format!(
                "<meta name=\"description\" content=\"{}\">",
                escape_attr(description)
            ));
        }
        format!(
            "<!DOCTYPE html>\n<html lang=\"{}\"><head>{}</head><body><un-app>{}</un-app></body></html>\n",
            self.head.lang.key(),
            head,
            self.html()
        )
    }
}

pub struct Shell {
    pub app: App,
}

impl Shell {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    /// Applies an event to the app state.
    pub fn dispatch(&mut self, action: Action<'_>) -> Effect {
        update(&mut self.app, action)
    }

    /// Renders the current route, fetching whatever data it still needs.
    pub async fn render(&mut self) -> Rendered {
        self.app.store.ensure(&[Resource::Header]).await;
        self.app.ensure_route_data().await;
        info!("Rendering {}", self.app.router.location());
        let view = render_page(&self.app, self.app.router.current_route());
        layout(&self.app, view)
    }

    /// The view shown while the current route's data is pending.
    pub fn render_pending(&self) -> Rendered {
        layout(
            &self.app,
            PageView {
                body: loading(),
                meta: None,
            },
        )
    }
}

fn header(app: &App) -> Markup {
    let images: Vec<Markup> = app
        .store
        .header(app.language)
        .map(|h| {
            h.images
                .iter()
                .map(|img| img.to_markup(&app.paths.img))
                .collect()
        })
        .unwrap_or_default();
    Element::new("header")
        .child(Element::new("un-header").children(images))
        .into()
}

fn menu_bar(app: &App) -> Markup {
    let links = app
        .router
        .routes()
        .menu_entries(app.language)
        .into_iter()
        .map(|(path, title)| {
            Element::new("a")
                .attr("slot", "left")
                .attr("href", path)
                .text(title)
                .into()
        });
    Element::new("nav")
        .child(
            Element::new("un-menu-bar")
                .attr("theme", app.theme.clone())
                .children(links),
        )
        .into()
}

fn layout(app: &App, view: PageView) -> Rendered {
    let main = Element::new("main")
        .attr("page", app.router.location())
        .child(view.body);
    let meta = view.meta.unwrap_or_else(PageMeta::default);
    let non_empty = |s: String| (!s.is_empty()).then_some(s);
    Rendered {
        markup: Markup::Fragment(vec![header(app), menu_bar(app), main.into()]),
        head: DocumentHead {
            lang: app.language,
            title: non_empty(meta.title),
            description: non_empty(meta.description),
        },
    }
}
