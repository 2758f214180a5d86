//! Application event handling.
//!
//! Folds completed background requests (categories, product pages,
//! contact submissions) into `App` state.

use crate::app::{App, AppEvent};
use crate::catalog::FeedOutcome;
use tokio::time::Instant;

/// Handle a completion event from a background task.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::CategoriesLoaded(result) => app.apply_categories(result),
        AppEvent::ProductsLoaded { ticket, result } => {
            match app.apply_feed_result(&ticket, result) {
                FeedOutcome::Replaced { count: 0 } => {
                    app.set_status(format!("No products in {}", app.active_category_name()));
                }
                FeedOutcome::NoData => {
                    tracing::debug!(page = ticket.page, "Product page carried no data");
                }
                FeedOutcome::Stale => {
                    tracing::debug!(generation = ticket.generation, "Ignored stale product page");
                }
                _ => {}
            }
        }
        AppEvent::ContactSubmitted(result) => {
            app.contact_handle = None;
            app.contact.apply_result(result, Instant::now());
        }
        AppEvent::TaskPanicked { task, error } => app.recover_from_panic(task, &error),
    }
}
