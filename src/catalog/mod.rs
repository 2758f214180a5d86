//! Product catalog: mapping, pagination, ordering and the feed controller.

mod display;
mod feed;
mod page;
mod sort;
mod trigger;

pub use display::{map_product, synthetic_id, DisplayRecord};
pub use feed::{FeedController, FeedOutcome, FeedState, FeedTicket, LoadKind};
pub use page::PageState;
pub use sort::{ordered_indices, SortKey};
pub use trigger::{sentinel_visible, SentinelTrigger, Viewport, SENTINEL_ROWS, VISIBILITY_THRESHOLD};
