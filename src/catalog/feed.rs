//! Incrementally loaded, category-filtered product list.
//!
//! [`FeedController`] owns no I/O. Each operation that needs data hands back
//! a [`FeedTicket`]; the caller performs the request and feeds the result to
//! [`FeedController::apply`]. Tickets carry the generation they were issued
//! under, so a response that arrives after the category changed is dropped
//! instead of being spliced into the wrong list.

use std::collections::HashSet;

use super::display::{map_product, DisplayRecord};
use super::page::PageState;
use super::sort::{ordered_indices, SortKey};
use crate::api::{ApiError, Listing, ProductQuery, RemoteProduct};

/// Whether a request replaces the list or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Initial,
    More,
}

/// A product page request issued by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTicket {
    pub generation: u64,
    pub page: u32,
    pub limit: u32,
    pub category: Option<String>,
    pub kind: LoadKind,
}

impl FeedTicket {
    pub fn query(&self) -> ProductQuery {
        ProductQuery {
            page: self.page,
            limit: self.limit,
            category_id: self.category.clone(),
        }
    }
}

/// What [`FeedController::apply`] did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    Replaced { count: usize },
    Appended { added: usize, skipped: usize },
    /// The response had no `data` field; nothing changed.
    NoData,
    /// The request failed; records were kept.
    Failed(String),
    /// Superseded by a newer load; ignored.
    Stale,
}

/// Observable state of the feed.
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    /// Records in arrival order.
    pub records: Vec<DisplayRecord>,
    /// Selected category id, `None` for all.
    pub category: Option<String>,
    pub sort: SortKey,
    pub loading: bool,
    pub loading_more: bool,
    /// Pagination of the last successful load for the current selection.
    pub page: Option<PageState>,
}

#[derive(Debug)]
pub struct FeedController {
    state: FeedState,
    page_size: u32,
    generation: u64,
}

impl FeedController {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: FeedState::default(),
            page_size: page_size.max(1),
            generation: 0,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Select a category (`None` for all) and reload from page 1.
    ///
    /// Re-selecting the current category reloads as well.
    pub fn set_category(&mut self, category: Option<String>) -> FeedTicket {
        tracing::debug!(category = category.as_deref().unwrap_or("all"), "Category selected");
        self.state.category = category;
        self.load_initial()
    }

    /// Request page 1 of the current category.
    ///
    /// Supersedes any request in flight. Existing records stay visible until
    /// the response replaces them, but the old pagination is dropped so no
    /// further page of the previous listing can be requested.
    pub fn load_initial(&mut self) -> FeedTicket {
        self.generation += 1;
        self.state.loading = true;
        self.state.loading_more = false;
        self.state.page = None;
        self.ticket(1, LoadKind::Initial)
    }

    /// Whether a load-more request may be issued right now.
    pub fn can_load_more(&self) -> bool {
        !self.state.loading
            && !self.state.loading_more
            && self.state.page.is_some_and(|p| p.has_next)
    }

    /// Request the page after the current one.
    ///
    /// Returns `None` without side effects when there is no next page or a
    /// load is already in flight.
    pub fn load_more(&mut self) -> Option<FeedTicket> {
        if !self.can_load_more() {
            return None;
        }
        let next = self.state.page.map_or(1, |p| p.page + 1);
        self.state.loading_more = true;
        Some(self.ticket(next, LoadKind::More))
    }

    /// Abandon whatever request is in flight.
    ///
    /// Used when the task carrying a ticket died without reporting back.
    /// Bumps the generation so a late response is discarded.
    pub fn cancel_in_flight(&mut self) {
        if self.state.loading || self.state.loading_more {
            tracing::debug!(generation = self.generation, "Cancelling in-flight product load");
        }
        self.generation += 1;
        self.state.loading = false;
        self.state.loading_more = false;
    }

    /// Change the view ordering. Never triggers a fetch.
    pub fn set_sort(&mut self, sort: SortKey) -> bool {
        let changed = self.state.sort != sort;
        self.state.sort = sort;
        changed
    }

    /// Back to all categories in featured order, reloading from page 1.
    pub fn reset_filters(&mut self) -> FeedTicket {
        self.state.sort = SortKey::Featured;
        self.set_category(None)
    }

    /// Records in display order for the current sort key.
    pub fn view(&self) -> Vec<&DisplayRecord> {
        ordered_indices(&self.state.records, self.state.sort)
            .into_iter()
            .map(|i| &self.state.records[i])
            .collect()
    }

    /// `(shown, total)` for the list header.
    pub fn showing(&self) -> (usize, u64) {
        let shown = self.state.records.len();
        let total = self
            .state
            .page
            .map_or(shown as u64, |p| p.total.max(shown as u64));
        (shown, total)
    }

    /// Fold a completed request into the state.
    pub fn apply(
        &mut self,
        ticket: &FeedTicket,
        result: Result<Listing<RemoteProduct>, ApiError>,
    ) -> FeedOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket_generation = ticket.generation,
                current = self.generation,
                page = ticket.page,
                "Discarding stale product page"
            );
            return FeedOutcome::Stale;
        }

        match ticket.kind {
            LoadKind::Initial => self.state.loading = false,
            LoadKind::More => self.state.loading_more = false,
        }

        let listing = match result {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!(error = %e, page = ticket.page, kind = ?ticket.kind, "Product load failed");
                return FeedOutcome::Failed(e.to_string());
            }
        };

        let Some(products) = listing.data else {
            tracing::debug!(page = ticket.page, "Product response carried no data");
            return FeedOutcome::NoData;
        };

        let page = match listing.pagination {
            Some(p) => PageState::from_pagination(&p, ticket.page, self.page_size),
            None => PageState {
                page: ticket.page,
                page_size: self.page_size,
                total: 0,
                total_pages: ticket.page,
                has_next: false,
                has_prev: ticket.page > 1,
            },
        };

        match ticket.kind {
            LoadKind::Initial => {
                let mut seen = HashSet::new();
                self.state.records = products
                    .iter()
                    .filter(|p| seen.insert(p.id.clone()))
                    .map(map_product)
                    .collect();
                self.state.page = Some(page);
                let count = self.state.records.len();
                tracing::info!(count, has_next = page.has_next, "Product list replaced");
                FeedOutcome::Replaced { count }
            }
            LoadKind::More => {
                let mut seen: HashSet<String> = self
                    .state
                    .records
                    .iter()
                    .map(|r| r.source_id.clone())
                    .collect();
                let before = self.state.records.len();
                self.state.records.extend(
                    products
                        .iter()
                        .filter(|p| seen.insert(p.id.clone()))
                        .map(map_product),
                );
                let added = self.state.records.len() - before;
                let skipped = products.len() - added;
                // The page advances by one regardless of what the server echoes
                self.state.page = Some(PageState {
                    page: ticket.page,
                    ..page
                });
                tracing::info!(page = ticket.page, added, skipped, "Product page appended");
                FeedOutcome::Appended { added, skipped }
            }
        }
    }

    fn ticket(&self, page: u32, kind: LoadKind) -> FeedTicket {
        FeedTicket {
            generation: self.generation,
            page,
            limit: self.page_size,
            category: self.state.category.clone(),
            kind,
        }
    }
}
