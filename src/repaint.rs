//! Debounced repaint scheduling.
//!
//! Any number of changes within one turn of the embedding event loop
//! produce a single repaint. The scheduler is a single-slot flag: scheduling
//! while a repaint is already pending is absorbed, and taking the repaint
//! clears the flag.

/// Single-slot repaint flag.
///
/// Starts pending and not loaded, so nothing repaints during bootstrap; the
/// first `take` after `mark_loaded` yields the initial paint.
#[derive(Debug, Clone)]
pub struct RepaintScheduler {
    pending: bool,
    loaded: bool,
    repaints: u64,
}

impl Default for RepaintScheduler {
    fn default() -> Self {
        Self {
            pending: true,
            loaded: false,
            repaints: 0,
        }
    }
}

impl RepaintScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow repaints to be taken.
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Request a repaint. Returns true if this call enqueued it.
    pub fn schedule(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Consume the pending repaint, if any.
    pub fn take(&mut self) -> bool {
        if !self.loaded || !self.pending {
            return false;
        }
        self.pending = false;
        self.repaints += 1;
        true
    }

    /// Run `render` if a repaint is pending.
    pub fn run_pending<F: FnOnce()>(&mut self, render: F) -> bool {
        if self.take() {
            render();
            true
        } else {
            false
        }
    }

    /// Number of repaints taken so far.
    #[must_use]
    pub const fn repaints(&self) -> u64 {
        self.repaints
    }
}
