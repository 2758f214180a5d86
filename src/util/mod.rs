//! Utility functions for common operations.
//!
//! - **Text processing**: Unicode-aware width calculation, truncation and
//!   stripping of terminal escapes from server-supplied strings
//! - **URL validation**: checks applied before an image URL is handed to
//!   the system browser

mod text;
mod url_validator;

pub use text::{display_width, pad_to_width, single_line, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_url_for_open, UrlValidationError};
