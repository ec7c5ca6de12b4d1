//! Single-deadline tick timer for the tokio event loop.

use std::time::Duration;

use tokio::time::Instant;

use crate::compositor::TickScheduler;

/// Holds at most one pending tick as an absolute deadline.
///
/// The event loop awaits [`DeadlineTimer::deadline`] and calls
/// [`DeadlineTimer::fire`] before running the tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeadlineTimer {
    deadline: Option<Instant>,
}

impl DeadlineTimer {
    #[must_use]
    pub const fn new() -> Self { Self { deadline: None } }

    /// When the pending tick is due, if one is pending.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> { self.deadline }

    /// Whether the pending tick is due at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool { self.deadline.is_some_and(|deadline| deadline <= now) }

    /// Consumes the pending tick. Returns `false` if nothing was pending.
    pub const fn fire(&mut self) -> bool { self.deadline.take().is_some() }
}

impl TickScheduler for DeadlineTimer {
    fn schedule(&mut self, delay: Duration) { self.deadline = Some(Instant::now() + delay); }

    fn cancel(&mut self) { self.deadline = None; }

    fn is_pending(&self) -> bool { self.deadline.is_some() }
}
