//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `helpers` - Task spawning, panic catching and the load-more check
//! - `render` - View rendering dispatch
//! - `categories` - Category filter panel
//! - `products` - Product card list with sentinel and scroll progress
//! - `detail` - Product detail view
//! - `contact` - Contact form view
//! - `status` - Status bar widget
//! - `help` - Keybinding help overlay

mod categories;
mod contact;
mod detail;
mod events;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod products;
mod render;
mod status;

pub use helpers::{spawn_categories_load, spawn_feed_load};
pub use loop_runner::{run, Action};
