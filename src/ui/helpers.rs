//! Helper functions for UI operations.
//!
//! Spawning of network tasks lives here so input and tick handlers share one
//! path for cancellation, generation tracking and panic reporting.

use crate::app::{App, AppEvent, TASK_CATEGORIES, TASK_CONTACT, TASK_PRODUCTS};
use crate::catalog::FeedTicket;
use crate::util::validate_url_for_open;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// Instead of the task silently disappearing, a panic becomes
/// `Err(panic_message)` so the caller can report `AppEvent::TaskPanicked`.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Send an event, logging if the UI loop has gone away.
async fn send_event(tx: &mpsc::Sender<AppEvent>, event: AppEvent, name: &'static str) {
    if let Err(e) = tx.send(event).await {
        tracing::warn!(error = %e, event = name, "Channel send failed (receiver dropped)");
    }
}

async fn report_panic(tx: &mpsc::Sender<AppEvent>, task: &'static str, error: String) {
    send_event(tx, AppEvent::TaskPanicked { task, error }, "TaskPanicked").await;
}

/// Fetch the category list once.
pub fn spawn_categories_load(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if let Some(handle) = app.categories_handle.take() {
        handle.abort();
    }
    app.categories_loading = true;

    let api = app.api.clone();
    let tx = event_tx.clone();
    app.categories_handle = Some(tokio::spawn(async move {
        match catch_task_panic(api.fetch_categories()).await {
            Ok(result) => {
                send_event(&tx, AppEvent::CategoriesLoaded(result), "CategoriesLoaded").await
            }
            Err(panic_msg) => report_panic(&tx, TASK_CATEGORIES, panic_msg).await,
        }
    }));
}

/// Dispatch a product page request for `ticket`.
///
/// Any previous request is aborted; its ticket is already stale, so the
/// abort only saves the round trip.
pub fn spawn_feed_load(
    app: &mut App,
    ticket: FeedTicket,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    if let Some(handle) = app.feed_handle.take() {
        handle.abort();
        tracing::debug!("Aborted previous product request");
    }

    tracing::debug!(
        generation = ticket.generation,
        page = ticket.page,
        category = ticket.category.as_deref().unwrap_or("all"),
        kind = ?ticket.kind,
        "Requesting product page"
    );

    let api = app.api.clone();
    let tx = event_tx.clone();
    app.feed_handle = Some(tokio::spawn(async move {
        let query = ticket.query();
        match catch_task_panic(api.fetch_products(&query)).await {
            Ok(result) => {
                send_event(&tx, AppEvent::ProductsLoaded { ticket, result }, "ProductsLoaded")
                    .await
            }
            Err(panic_msg) => report_panic(&tx, TASK_PRODUCTS, panic_msg).await,
        }
    }));
}

/// Validate the contact form and post it if valid.
pub(super) fn submit_contact(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let request = match app.contact.begin_submit() {
        Ok(Some(request)) => request,
        Ok(None) => return,
        Err(e) => {
            tracing::debug!(error = %e, "Contact form rejected locally");
            return;
        }
    };

    let api = app.api.clone();
    let tx = event_tx.clone();
    app.contact_handle = Some(tokio::spawn(async move {
        match catch_task_panic(api.submit_contact(&request)).await {
            Ok(result) => {
                send_event(&tx, AppEvent::ContactSubmitted(result), "ContactSubmitted").await
            }
            Err(panic_msg) => report_panic(&tx, TASK_CONTACT, panic_msg).await,
        }
    }));
}

/// Issue a load-more request if the sentinel has come into view.
pub(super) fn check_load_more(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if let Some(ticket) = app.poll_load_more() {
        app.needs_redraw = true;
        spawn_feed_load(app, ticket, event_tx);
    }
}

/// Open the selected product's image in the system browser.
pub(super) fn open_selected_image(app: &mut App) {
    let Some(image) = app.selected_record().and_then(|r| r.image.clone()) else {
        app.set_status("No image for this product");
        return;
    };

    match validate_url_for_open(&image, app.api.base_url()) {
        Ok(url) => match open::that(url.as_str()) {
            Ok(()) => app.set_status("Opened image in browser"),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to open browser");
                app.set_status(format!("Failed to open browser: {}", e));
            }
        },
        Err(e) => app.set_status(format!("Cannot open image: {}", e)),
    }
}
