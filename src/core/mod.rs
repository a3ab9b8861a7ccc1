//! # Core Application Logic
//!
//! This module contains the storefront's routing and state.
//! It knows nothing about markup.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Router (location)    │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    View    │      │  Catalog   │      │  Browser   │
//!     │  (markup)  │      │  (fetch)   │      │  (future)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`route`]: The `RouteTable`, static path → page mapping
//! - [`router`]: The `Router`, owner of location state
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum, everything that can happen in the app
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod route;
pub mod router;
pub mod state;
