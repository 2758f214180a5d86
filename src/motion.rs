//! Decorative motion: the loading spinner, staggered reveal of new cards and
//! the scroll progress bar.
//!
//! Nothing here affects data. The reduced-motion preference is an injected
//! [`MotionPreference`] (a `watch` receiver) so the UI can swap drivers when
//! it flips at runtime.

use tokio::sync::watch;

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
const STATIC_SPINNER: &str = "…";

/// Cards revealed per UI tick while a stagger is running.
const REVEAL_PER_TICK: usize = 3;

/// Drives per-tick animation state.
pub trait MotionDriver: Send {
    /// Step one UI tick over a list of `total` cards. Returns true while a
    /// reveal is still in progress.
    fn advance(&mut self, total: usize) -> bool;

    /// Glyph shown next to "Loading...".
    fn spinner(&self) -> &'static str;

    /// How many of `total` cards are currently revealed.
    fn revealed(&self, total: usize) -> usize;

    /// Start revealing cards from index `from` onwards.
    fn restart_reveal(&mut self, from: usize);
}

/// Animated driver: spinning glyph and a few cards per tick.
#[derive(Debug, Default)]
pub struct StaggerMotion {
    frame: usize,
    reveal_from: usize,
    reveal_steps: usize,
    pending: bool,
}

impl MotionDriver for StaggerMotion {
    fn advance(&mut self, total: usize) -> bool {
        self.frame = self.frame.wrapping_add(1);
        if !self.pending {
            return false;
        }
        self.reveal_steps += 1;
        if self.revealed(total) >= total {
            self.pending = false;
        }
        true
    }

    fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }

    fn revealed(&self, total: usize) -> usize {
        if !self.pending {
            return total;
        }
        let shown = self
            .reveal_from
            .saturating_add(self.reveal_steps.saturating_mul(REVEAL_PER_TICK));
        shown.min(total)
    }

    fn restart_reveal(&mut self, from: usize) {
        self.reveal_from = from;
        self.reveal_steps = 0;
        self.pending = true;
    }
}

/// No-op driver for reduced motion.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMotion;

impl MotionDriver for NoMotion {
    fn advance(&mut self, _total: usize) -> bool {
        false
    }

    fn spinner(&self) -> &'static str {
        STATIC_SPINNER
    }

    fn revealed(&self, total: usize) -> usize {
        total
    }

    fn restart_reveal(&mut self, _from: usize) {}
}

/// Pick the driver for the given preference.
pub fn driver_for(reduced: bool) -> Box<dyn MotionDriver> {
    if reduced {
        Box::new(NoMotion)
    } else {
        Box::new(StaggerMotion::default())
    }
}

/// Read side of the reduced-motion preference.
#[derive(Debug, Clone)]
pub struct MotionPreference {
    rx: watch::Receiver<bool>,
}

impl MotionPreference {
    pub fn reduced(&self) -> bool {
        *self.rx.borrow()
    }

    /// The new value if it changed since the last call.
    pub fn take_change(&mut self) -> Option<bool> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }
}

/// Write side of the reduced-motion preference.
#[derive(Debug)]
pub struct MotionControl {
    tx: watch::Sender<bool>,
}

impl MotionControl {
    pub fn new(reduced: bool) -> (Self, MotionPreference) {
        let (tx, rx) = watch::channel(reduced);
        (Self { tx }, MotionPreference { rx })
    }

    /// Flip the preference, returning the new value.
    pub fn toggle(&self) -> bool {
        self.tx.send_modify(|current| *current = !*current);
        *self.tx.borrow()
    }
}

/// Reduced-motion request from the environment, if any.
///
/// `SHOPFRONT_REDUCED_MOTION` takes a boolean; a non-empty `NO_MOTION`
/// requests reduced motion.
pub fn reduced_motion_from_env<F>(lookup: F) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("SHOPFRONT_REDUCED_MOTION") {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => return Some(true),
            "0" | "false" | "no" | "off" => return Some(false),
            other => tracing::warn!(value = other, "Ignoring unrecognized SHOPFRONT_REDUCED_MOTION"),
        }
    }
    lookup("NO_MOTION")
        .filter(|v| !v.is_empty())
        .map(|_| true)
}

/// Scroll position as a percentage in `0.0..=100.0`.
///
/// Content that fits the viewport counts as fully scrolled.
pub fn scroll_progress(offset: usize, viewport: usize, content: usize) -> f64 {
    let scrollable = content.saturating_sub(viewport);
    if scrollable == 0 {
        return 100.0;
    }
    (offset as f64 / scrollable as f64 * 100.0).clamp(0.0, 100.0)
}
