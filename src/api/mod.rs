//! Client for the storefront's remote API.
//!
//! Three endpoints are consumed, all relative to a configurable base URL:
//!
//! - `GET categories` - the category listing, fetched once at start-up
//! - `GET products` - the paginated product listing, optionally filtered by category
//! - `POST contact-us` - contact form submission
//!
//! # Architecture
//!
//! - [`types`] - serde wire types mirroring the JSON payloads
//! - [`client`] - the reqwest-backed [`ApiClient`] and [`ApiError`]

mod client;
mod types;

pub use client::{ApiClient, ApiError, ClientOptions, MAX_RESPONSE_SIZE};
pub use types::{
    CategoryRef, ContactRequest, Listing, Pagination, ProductQuery, RemoteProduct,
};
