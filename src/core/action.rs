//! # Actions
//!
//! Everything that can happen in the storefront becomes an `Action`.
//! User clicks a link? That's `Action::LinkClicked(event)`.
//! Browser goes back? That's `Action::HistoryPopped`.
//!
//! The `update()` function applies an action to the state and reports
//! whether the shell needs to re-render. Fetching happens elsewhere.
//!
//! Clicks are borrowed from the host so it can read
//! `is_default_prevented()` afterwards and cancel the browser's own navigation.
//!
//! ```text
//! State + Action  →  update()  →  Effect
//! ```

use log::debug;

use crate::Language;
use crate::core::router::ClickEvent;
use crate::core::state::App;

#[derive(Debug, PartialEq)]
pub enum Action<'a> {
    LinkClicked(&'a mut ClickEvent),
    HistoryPopped,
    Navigate(String),
    /// Product id, as bound on the add-to-cart button.
    AddToCart(String),
    SetLanguage(Language),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Render,
}

impl Effect {
    fn from_changed(changed: bool) -> Effect {
        if changed { Effect::Render } else { Effect::None }
    }
}

pub fn update(app: &mut App, action: Action<'_>) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::LinkClicked(event) => {
            Effect::from_changed(app.router.handle_internal_link_click(event))
        }
        Action::HistoryPopped => Effect::from_changed(app.router.handle_history_pop()),
        Action::Navigate(path) => Effect::from_changed(app.router.navigate(&path)),
        Action::AddToCart(id) => Effect::from_changed(app.add_to_cart(&id)),
        Action::SetLanguage(lang) => {
            let changed = app.language != lang;
            app.language = lang;
            Effect::from_changed(changed)
        }
    }
}
