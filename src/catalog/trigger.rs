/// Fraction of the sentinel that must be on screen to count as visible.
pub const VISIBILITY_THRESHOLD: f32 = 0.1;

/// Height in rows of the "loading more" sentinel after the last card.
pub const SENTINEL_ROWS: u16 = 2;

/// The visible slice of a scrolled list, in content rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
}

/// Whether the sentinel following `content_rows` rows of list is visible.
pub fn sentinel_visible(viewport: Viewport, content_rows: usize) -> bool {
    let sentinel = usize::from(SENTINEL_ROWS);
    if viewport.height == 0 {
        return false;
    }
    let start = content_rows;
    let end = content_rows + sentinel;
    let view_end = viewport.offset.saturating_add(viewport.height);
    let overlap = end.min(view_end).saturating_sub(start.max(viewport.offset));
    overlap as f32 / sentinel as f32 >= VISIBILITY_THRESHOLD
}

/// Edge-triggered wrapper around sentinel visibility.
///
/// Fires once when the sentinel comes into view. After a request is issued
/// it stays quiet until the sentinel leaves the viewport or the list grows,
/// so a failing endpoint is not hammered while the sentinel sits on screen.
#[derive(Debug, Clone)]
pub struct SentinelTrigger {
    armed: bool,
}

impl Default for SentinelTrigger {
    fn default() -> Self {
        Self { armed: true }
    }
}

impl SentinelTrigger {
    /// Feed the current visibility; returns true when a load should be attempted.
    pub fn update(&mut self, visible: bool) -> bool {
        if !visible {
            self.armed = true;
            return false;
        }
        self.armed
    }

    /// A load was issued for this sighting.
    pub fn fired(&mut self) {
        self.armed = false;
    }

    /// New content arrived; the sentinel may be checked again.
    pub fn rearm(&mut self) {
        self.armed = true;
    }
}
