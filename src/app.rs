use crate::api::{ApiClient, ApiError, CategoryRef, Listing, RemoteProduct};
use crate::catalog::{
    sentinel_visible, DisplayRecord, FeedController, FeedOutcome, FeedTicket, SentinelTrigger,
    SortKey, Viewport, SENTINEL_ROWS,
};
use crate::contact::ContactForm;
use crate::keybindings::{Context, KeybindingRegistry};
use crate::motion::{driver_for, MotionControl, MotionDriver, MotionPreference};
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Rows taken by one product card in the list, including its spacer.
pub const CARD_HEIGHT: usize = 4;

/// How long a status message stays in the status bar.
const STATUS_TTL_SECS: u64 = 3;

pub const TASK_CATEGORIES: &str = "categories";
pub const TASK_PRODUCTS: &str = "products";
pub const TASK_CONTACT: &str = "contact";

// ============================================================================
// View / Focus
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Catalog,
    Detail,
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Categories,
    Products,
}

// ============================================================================
// Background Events
// ============================================================================

/// Completion events sent by spawned network tasks back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    CategoriesLoaded(Result<Vec<CategoryRef>, ApiError>),
    ProductsLoaded {
        ticket: FeedTicket,
        result: Result<Listing<RemoteProduct>, ApiError>,
    },
    ContactSubmitted(Result<Option<String>, ApiError>),
    /// A background task panicked; its flags must be released.
    TaskPanicked {
        task: &'static str,
        error: String,
    },
}

// ============================================================================
// App State
// ============================================================================

pub struct App {
    pub api: ApiClient,

    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,
    pub keybindings: KeybindingRegistry,

    /// Product list, pagination and request tickets.
    pub feed: FeedController,
    /// Edge trigger for the load-more sentinel.
    pub trigger: SentinelTrigger,

    pub categories: Vec<CategoryRef>,
    pub categories_loading: bool,

    pub view: View,
    pub focus: Focus,
    /// Cursor in the category panel. 0 is "All", `i` is `categories[i - 1]`.
    pub category_cursor: usize,
    /// Index into `feed.view()`.
    pub selected_product: usize,
    /// First visible row of the product list.
    pub list_offset: usize,
    /// Rows inside the product list border, refreshed on every render.
    pub list_viewport_rows: usize,

    pub contact: ContactForm,

    pub status_message: Option<(Cow<'static, str>, Instant)>,

    pub motion: Box<dyn MotionDriver>,
    motion_control: MotionControl,
    motion_pref: MotionPreference,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,

    pub show_help: bool,
    pub help_scroll_offset: usize,

    /// In-flight product request. Aborted when a newer request supersedes it.
    pub feed_handle: Option<JoinHandle<()>>,
    pub categories_handle: Option<JoinHandle<()>>,
    pub contact_handle: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(
        api: ApiClient,
        page_size: u32,
        motion_control: MotionControl,
        motion_pref: MotionPreference,
    ) -> Self {
        let reduced = motion_pref.reduced();
        Self {
            api,
            theme_variant: ThemeVariant::Dark,
            theme: StyleMap::from_palette(&ThemeVariant::Dark.palette()),
            keybindings: KeybindingRegistry::new(),
            feed: FeedController::new(page_size),
            trigger: SentinelTrigger::default(),
            categories: Vec::new(),
            categories_loading: false,
            view: View::Catalog,
            focus: Focus::Products,
            category_cursor: 0,
            selected_product: 0,
            list_offset: 0,
            list_viewport_rows: 0,
            contact: ContactForm::default(),
            status_message: None,
            motion: driver_for(reduced),
            motion_control,
            motion_pref,
            needs_redraw: true,
            show_help: false,
            help_scroll_offset: 0,
            feed_handle: None,
            categories_handle: None,
            contact_handle: None,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant, returning its name for the status bar.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Keybinding context for the current view and focus.
    pub fn key_context(&self) -> Context {
        match (self.view, self.focus) {
            (View::Contact, _) => Context::Contact,
            (View::Detail, _) => Context::Detail,
            (View::Catalog, Focus::Categories) => Context::Categories,
            (View::Catalog, Focus::Products) => Context::Products,
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Categories => Focus::Products,
            Focus::Products => Focus::Categories,
        };
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Number of entries in the category panel, "All" included.
    pub fn category_entries(&self) -> usize {
        self.categories.len() + 1
    }

    /// Category id under the cursor; `None` is "All".
    pub fn cursor_category_id(&self) -> Option<String> {
        self.category_cursor
            .checked_sub(1)
            .and_then(|i| self.categories.get(i))
            .map(|c| c.id.clone())
    }

    /// Display name of the active category filter.
    pub fn active_category_name(&self) -> &str {
        match self.feed.state().category.as_deref() {
            None => "All",
            Some(id) => self
                .categories
                .iter()
                .find(|c| c.id == id)
                .map_or(id, |c| c.name.as_str()),
        }
    }

    pub fn selected_record(&self) -> Option<&DisplayRecord> {
        self.feed.view().get(self.selected_product).copied()
    }

    pub fn nav_down(&mut self) {
        self.move_selection(1, false);
    }

    pub fn nav_up(&mut self) {
        self.move_selection(1, true);
    }

    pub fn page_down(&mut self) {
        let step = self.cards_per_page();
        self.move_selection(step, false);
    }

    pub fn page_up(&mut self) {
        let step = self.cards_per_page();
        self.move_selection(step, true);
    }

    fn cards_per_page(&self) -> usize {
        (self.list_viewport_rows / CARD_HEIGHT).max(1)
    }

    fn move_selection(&mut self, step: usize, up: bool) {
        match (self.view, self.focus) {
            (View::Catalog, Focus::Categories) => {
                let last = self.category_entries() - 1;
                self.category_cursor = if up {
                    self.category_cursor.saturating_sub(step)
                } else {
                    (self.category_cursor + step).min(last)
                };
            }
            (View::Catalog, Focus::Products) => {
                let len = self.feed.state().records.len();
                if len == 0 {
                    return;
                }
                self.selected_product = if up {
                    self.selected_product.saturating_sub(step)
                } else {
                    (self.selected_product + step).min(len - 1)
                };
                self.ensure_selected_visible();
            }
            _ => {}
        }
    }

    /// Rows occupied by all cards, excluding the sentinel.
    pub fn content_rows(&self) -> usize {
        self.feed.state().records.len() * CARD_HEIGHT
    }

    /// Scroll so the selected card is fully on screen. On the last card the
    /// sentinel row is brought into view too.
    pub fn ensure_selected_visible(&mut self) {
        let viewport = self.list_viewport_rows;
        if viewport == 0 {
            return;
        }
        let len = self.feed.state().records.len();
        let top = self.selected_product * CARD_HEIGHT;
        let mut bottom = top + CARD_HEIGHT;
        if self.selected_product + 1 >= len {
            bottom += usize::from(SENTINEL_ROWS);
        }
        if top < self.list_offset {
            self.list_offset = top;
        } else if bottom > self.list_offset + viewport {
            self.list_offset = bottom.saturating_sub(viewport).min(top);
        }
    }

    /// Keep the same product selected after the view order shifted.
    fn follow_selection(&mut self, source_id: Option<&str>) {
        let Some(id) = source_id else {
            return;
        };
        let pos = self.feed.view().iter().position(|r| r.source_id == id);
        if let Some(pos) = pos.filter(|&p| p != self.selected_product) {
            self.selected_product = pos;
            self.ensure_selected_visible();
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.feed.state().records.len();
        if self.selected_product >= len {
            self.selected_product = len.saturating_sub(1);
        }
        let max_offset = (self.content_rows() + usize::from(SENTINEL_ROWS))
            .saturating_sub(self.list_viewport_rows);
        self.list_offset = self.list_offset.min(max_offset);
    }

    // ------------------------------------------------------------------
    // Feed
    // ------------------------------------------------------------------

    /// Apply the category under the cursor and start page 1.
    pub fn select_category_at_cursor(&mut self) -> FeedTicket {
        let category = self.cursor_category_id();
        self.feed.set_category(category)
    }

    /// Back to all categories, featured order.
    pub fn reset_filters(&mut self) -> FeedTicket {
        self.category_cursor = 0;
        self.feed.reset_filters()
    }

    /// Advance the sort key. Returns the new key's label.
    pub fn cycle_sort(&mut self) -> &'static str {
        let next = self.feed.state().sort.next();
        if self.feed.set_sort(next) {
            self.selected_product = 0;
            self.list_offset = 0;
        }
        next.label()
    }

    pub fn set_sort(&mut self, key: SortKey) {
        if self.feed.set_sort(key) {
            self.selected_product = 0;
            self.list_offset = 0;
        }
    }

    /// Fold a product response into the feed and adjust selection around it.
    pub fn apply_feed_result(
        &mut self,
        ticket: &FeedTicket,
        result: Result<Listing<RemoteProduct>, ApiError>,
    ) -> FeedOutcome {
        let before = self.feed.state().records.len();
        let selected_id = self.selected_record().map(|r| r.source_id.clone());
        let outcome = self.feed.apply(ticket, result);
        match &outcome {
            FeedOutcome::Replaced { .. } => {
                self.selected_product = 0;
                self.list_offset = 0;
                self.motion.restart_reveal(0);
                self.trigger.rearm();
            }
            FeedOutcome::Appended { added, .. } => {
                if *added > 0 {
                    // Only arrival order puts new cards after the old ones
                    let from = if self.feed.state().sort == SortKey::Featured {
                        before
                    } else {
                        0
                    };
                    self.motion.restart_reveal(from);
                    self.follow_selection(selected_id.as_deref());
                }
                self.trigger.rearm();
            }
            FeedOutcome::Failed(msg) => {
                self.set_status(format!("Failed to load products: {}", msg));
            }
            FeedOutcome::NoData | FeedOutcome::Stale => {}
        }
        if outcome != FeedOutcome::Stale {
            self.feed_handle = None;
        }
        self.clamp_selection();
        outcome
    }

    /// Check the load-more sentinel; returns a ticket when a page should be
    /// requested now.
    pub fn poll_load_more(&mut self) -> Option<FeedTicket> {
        if self.view != View::Catalog {
            return None;
        }
        let viewport = Viewport {
            offset: self.list_offset,
            height: self.list_viewport_rows,
        };
        let visible = sentinel_visible(viewport, self.content_rows());
        if !self.trigger.update(visible) {
            return None;
        }
        let ticket = self.feed.load_more()?;
        self.trigger.fired();
        tracing::debug!(page = ticket.page, "Sentinel visible, loading more");
        Some(ticket)
    }

    pub fn apply_categories(&mut self, result: Result<Vec<CategoryRef>, ApiError>) {
        self.categories_loading = false;
        self.categories_handle = None;
        match result {
            Ok(categories) => {
                tracing::info!(count = categories.len(), "Categories loaded");
                self.categories = categories;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load categories");
                self.set_status("Could not load categories");
            }
        }
        self.category_cursor = self.category_cursor.min(self.category_entries() - 1);
    }

    /// Release whatever state a panicked task was holding.
    pub fn recover_from_panic(&mut self, task: &str, error: &str) {
        tracing::error!(task, error, "Background task panicked");
        match task {
            TASK_PRODUCTS => {
                self.feed_handle = None;
                self.feed.cancel_in_flight();
                self.trigger.rearm();
            }
            TASK_CATEGORIES => {
                self.categories_handle = None;
                self.categories_loading = false;
            }
            TASK_CONTACT => {
                self.contact_handle = None;
                self.contact.abort_submit();
            }
            _ => {}
        }
        self.set_status(format!("Internal error in {} task", task));
    }

    // ------------------------------------------------------------------
    // Motion
    // ------------------------------------------------------------------

    pub fn reduced_motion(&self) -> bool {
        self.motion_pref.reduced()
    }

    /// Flip reduced motion and swap the driver. Returns the new value.
    pub fn toggle_motion(&mut self) -> bool {
        let reduced = self.motion_control.toggle();
        self.sync_motion();
        reduced
    }

    /// Swap the motion driver if the preference changed. Returns true if it did.
    pub fn sync_motion(&mut self) -> bool {
        let Some(reduced) = self.motion_pref.take_change() else {
            return false;
        };
        tracing::info!(reduced, "Motion preference changed");
        self.motion = driver_for(reduced);
        true
    }

    /// Periodic housekeeping. Returns true if anything visible changed.
    pub fn on_tick(&mut self) -> bool {
        let mut changed = self.clear_expired_status();
        changed |= self.contact.tick(Instant::now());
        changed |= self.sync_motion();

        let total = self.feed.state().records.len();
        changed |= self.motion.advance(total);

        let state = self.feed.state();
        changed |= state.loading
            || state.loading_more
            || self.categories_loading
            || self.contact.is_submitting();
        changed
    }

    // ------------------------------------------------------------------
    // Status bar
    // ------------------------------------------------------------------

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired. Returns true if a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

/// Abort in-flight tasks so nothing outlives the event loop.
impl Drop for App {
    fn drop(&mut self) {
        for (name, handle) in [
            (TASK_PRODUCTS, self.feed_handle.take()),
            (TASK_CATEGORIES, self.categories_handle.take()),
            (TASK_CONTACT, self.contact_handle.take()),
        ] {
            if let Some(handle) = handle {
                handle.abort();
                tracing::debug!(task = name, "Aborted task on App drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClientOptions, Pagination};
    use pretty_assertions::assert_eq;
    use tokio::time::{self, Duration};

    fn test_app() -> App {
        let api = ApiClient::new("http://localhost:8080/api", ClientOptions::default()).unwrap();
        let (control, pref) = MotionControl::new(true);
        App::new(api, 12, control, pref)
    }

    fn listing(ids: &[&str], page: u32, total_pages: u32) -> Result<Listing<RemoteProduct>, ApiError> {
        let data = ids
            .iter()
            .map(|id| {
                serde_json::from_value(serde_json::json!({"id": id, "name": format!("Item {id}")}))
                    .unwrap()
            })
            .collect();
        Ok(Listing {
            data: Some(data),
            pagination: Some(Pagination {
                page,
                limit: 12,
                total: u64::from(total_pages) * 12,
                total_pages,
                has_next_page: page < total_pages,
                has_prev_page: page > 1,
            }),
        })
    }

    fn loaded_app(count: usize, total_pages: u32) -> App {
        let mut app = test_app();
        let ids: Vec<String> = (0..count).map(|i| format!("{:02x}", i + 1)).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let ticket = app.feed.load_initial();
        app.apply_feed_result(&ticket, listing(&refs, 1, total_pages));
        app
    }

    #[tokio::test]
    async fn test_nav_empty_list() {
        let mut app = test_app();
        app.nav_down();
        assert_eq!(app.selected_product, 0);
        assert!(app.selected_record().is_none());
    }

    #[tokio::test]
    async fn test_nav_clamps_to_list() {
        let mut app = loaded_app(3, 1);
        app.list_viewport_rows = 8;
        app.nav_down();
        app.nav_down();
        app.nav_down();
        assert_eq!(app.selected_product, 2);
        assert_eq!(app.selected_record().unwrap().source_id, "03");
        app.page_up();
        assert_eq!(app.selected_product, 0);
    }

    #[tokio::test]
    async fn test_last_card_brings_sentinel_into_view() {
        let mut app = loaded_app(3, 2);
        app.list_viewport_rows = 8;
        app.nav_down();
        app.nav_down();
        // 3 cards + sentinel = 14 rows, viewport 8
        assert_eq!(app.list_offset, 6);
    }

    #[tokio::test]
    async fn test_category_cursor() {
        let mut app = test_app();
        app.apply_categories(Ok(vec![
            CategoryRef { id: "a".into(), name: "Fish".into() },
            CategoryRef { id: "b".into(), name: "Meat".into() },
        ]));
        app.focus = Focus::Categories;
        assert_eq!(app.cursor_category_id(), None);
        app.nav_down();
        app.nav_down();
        app.nav_down();
        assert_eq!(app.cursor_category_id().as_deref(), Some("b"));

        let ticket = app.select_category_at_cursor();
        assert_eq!(ticket.category.as_deref(), Some("b"));
        assert_eq!(app.active_category_name(), "Meat");

        app.reset_filters();
        assert_eq!(app.category_cursor, 0);
        assert_eq!(app.active_category_name(), "All");
    }

    #[tokio::test]
    async fn test_failed_categories_keep_all_entry() {
        let mut app = test_app();
        app.categories_loading = true;
        app.apply_categories(Err(ApiError::HttpStatus(500)));
        assert!(!app.categories_loading);
        assert_eq!(app.category_entries(), 1);
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn test_key_context_follows_view() {
        let mut app = test_app();
        assert_eq!(app.key_context(), Context::Products);
        app.cycle_focus();
        assert_eq!(app.key_context(), Context::Categories);
        app.view = View::Contact;
        assert_eq!(app.key_context(), Context::Contact);
        app.view = View::Detail;
        assert_eq!(app.key_context(), Context::Detail);
    }

    #[tokio::test]
    async fn test_replace_resets_selection() {
        let mut app = loaded_app(5, 1);
        app.list_viewport_rows = 8;
        app.page_down();
        assert!(app.selected_product > 0);

        let ticket = app.feed.load_initial();
        let outcome = app.apply_feed_result(&ticket, listing(&["aa"], 1, 1));
        assert_eq!(outcome, FeedOutcome::Replaced { count: 1 });
        assert_eq!(app.selected_product, 0);
        assert_eq!(app.list_offset, 0);
    }

    #[tokio::test]
    async fn test_sentinel_fires_once_per_sighting() {
        let mut app = loaded_app(2, 3);
        app.list_viewport_rows = 20;

        let ticket = app.poll_load_more().unwrap();
        assert_eq!(ticket.page, 2);
        assert!(app.poll_load_more().is_none());

        // A failure leaves the trigger disarmed while the sentinel stays put
        app.apply_feed_result(&ticket, Err(ApiError::HttpStatus(500)));
        assert!(app.poll_load_more().is_none());
        assert!(app.status_message.is_some());

        // Scrolling the sentinel out and back in fires again
        app.list_viewport_rows = 4;
        assert!(app.poll_load_more().is_none());
        app.list_viewport_rows = 20;
        assert_eq!(app.poll_load_more().unwrap().page, 2);
    }

    #[tokio::test]
    async fn test_sentinel_rearms_after_append() {
        let mut app = loaded_app(2, 3);
        app.list_viewport_rows = 40;
        let ticket = app.poll_load_more().unwrap();
        let outcome = app.apply_feed_result(&ticket, listing(&["10", "11"], 2, 3));
        assert_eq!(outcome, FeedOutcome::Appended { added: 2, skipped: 0 });
        assert_eq!(app.poll_load_more().unwrap().page, 3);
    }

    fn rated_listing(
        items: &[(&str, f64)],
        page: u32,
        total_pages: u32,
    ) -> Result<Listing<RemoteProduct>, ApiError> {
        let mut listing = listing(&[], page, total_pages)?;
        listing.data = Some(
            items
                .iter()
                .map(|(id, rating)| {
                    serde_json::from_value(serde_json::json!({
                        "id": id, "name": format!("Item {id}"), "rating": rating
                    }))
                    .unwrap()
                })
                .collect(),
        );
        Ok(listing)
    }

    fn animated_app() -> App {
        let api = ApiClient::new("http://localhost:8080/api", ClientOptions::default()).unwrap();
        let (control, pref) = MotionControl::new(false);
        App::new(api, 12, control, pref)
    }

    #[tokio::test]
    async fn test_append_under_rating_sort_keeps_selected_product() {
        let mut app = animated_app();
        app.list_viewport_rows = 40;
        let ticket = app.feed.load_initial();
        app.apply_feed_result(&ticket, rated_listing(&[("01", 4.0), ("02", 3.0)], 1, 2));
        app.set_sort(SortKey::Rating);
        app.nav_down();
        assert_eq!(app.selected_record().unwrap().source_id, "02");

        let ticket = app.feed.load_more().unwrap();
        let outcome = app.apply_feed_result(&ticket, rated_listing(&[("03", 5.0)], 2, 2));
        assert_eq!(outcome, FeedOutcome::Appended { added: 1, skipped: 0 });

        // The new top-rated card lands first; the selection follows "02"
        assert_eq!(app.feed.view()[0].source_id, "03");
        assert_eq!(app.selected_product, 2);
        assert_eq!(app.selected_record().unwrap().source_id, "02");
        // Reveal restarts from the top since new cards are interleaved
        assert_eq!(app.motion.revealed(3), 0);
    }

    #[tokio::test]
    async fn test_append_in_arrival_order_reveals_only_new_cards() {
        let mut app = animated_app();
        app.list_viewport_rows = 40;
        let ticket = app.feed.load_initial();
        app.apply_feed_result(&ticket, rated_listing(&[("01", 4.0), ("02", 3.0)], 1, 2));
        app.nav_down();

        let ticket = app.feed.load_more().unwrap();
        app.apply_feed_result(&ticket, rated_listing(&[("03", 5.0)], 2, 2));
        assert_eq!(app.selected_product, 1);
        assert_eq!(app.selected_record().unwrap().source_id, "02");
        assert_eq!(app.motion.revealed(3), 2);
    }

    #[tokio::test]
    async fn test_no_load_more_outside_catalog() {
        let mut app = loaded_app(2, 3);
        app.list_viewport_rows = 20;
        app.view = View::Contact;
        assert!(app.poll_load_more().is_none());
    }

    #[tokio::test]
    async fn test_cycle_sort_keeps_fetch_state() {
        let mut app = loaded_app(3, 2);
        let generation = app.feed.generation();
        assert_eq!(app.cycle_sort(), "Top Rated");
        assert_eq!(app.cycle_sort(), "Newest");
        assert_eq!(app.feed.generation(), generation);
        assert_eq!(app.selected_record().unwrap().source_id, "03");
    }

    #[tokio::test]
    async fn test_panicked_products_task_releases_flags() {
        let mut app = loaded_app(2, 3);
        app.list_viewport_rows = 20;
        let ticket = app.poll_load_more().unwrap();
        app.recover_from_panic(TASK_PRODUCTS, "boom");
        assert!(!app.feed.state().loading_more);
        assert_eq!(
            app.apply_feed_result(&ticket, listing(&["x"], 2, 3)),
            FeedOutcome::Stale
        );
        assert!(app.poll_load_more().is_some());
    }

    #[tokio::test]
    async fn test_panicked_contact_task_unlocks_form() {
        let mut app = test_app();
        for (i, value) in ["Ada", "ada@example.com", "Hi", "Hello"].iter().enumerate() {
            if i > 0 {
                app.contact.focus_next();
            }
            for c in value.chars() {
                app.contact.insert_char(c);
            }
        }
        assert!(app.contact.begin_submit().unwrap().is_some());
        app.recover_from_panic(TASK_CONTACT, "boom");
        assert!(!app.contact.is_submitting());
    }

    #[tokio::test]
    async fn test_toggle_motion_swaps_driver() {
        let mut app = test_app();
        assert!(app.reduced_motion());
        assert!(!app.toggle_motion());
        assert!(!app.reduced_motion());
        app.motion.restart_reveal(0);
        assert_eq!(app.motion.revealed(10), 0);
        assert!(app.toggle_motion());
        assert_eq!(app.motion.revealed(10), 10);
    }

    #[tokio::test]
    async fn test_cycle_theme() {
        let mut app = test_app();
        assert_eq!(app.cycle_theme(), "Light");
        assert_eq!(app.theme_variant, ThemeVariant::Light);
        assert_eq!(app.cycle_theme(), "Dark");
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_expires_after_3_seconds() {
        let mut app = test_app();
        app.set_status("Test message");

        time::advance(Duration::from_secs(2)).await;
        assert!(!app.clear_expired_status());
        assert!(app.status_message.is_some());

        time::advance(Duration::from_secs(1)).await;
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_resets_contact_after_success() {
        let mut app = test_app();
        for (i, value) in ["Ada", "ada@example.com", "Hi", "Hello"].iter().enumerate() {
            if i > 0 {
                app.contact.focus_next();
            }
            for c in value.chars() {
                app.contact.insert_char(c);
            }
        }
        app.contact.begin_submit().unwrap();
        app.contact.apply_result(Ok(Some("Thanks".into())), Instant::now());

        time::advance(Duration::from_secs(5)).await;
        assert!(app.on_tick());
        assert_eq!(app.contact.value(crate::contact::Field::Name), "");
    }
}
