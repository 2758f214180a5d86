//! shopfront: a terminal storefront for a paginated product catalog.
//!
//! The binary wires these modules together; the library split exists so
//! integration tests can drive the API client, feed controller and contact
//! form against a mock server.

pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod keybindings;
pub mod motion;
pub mod theme;
pub mod ui;
pub mod util;
