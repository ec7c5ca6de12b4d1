//! Event loop turning host events and timer deadlines into compositor calls.
//!
//! Runs on a single-threaded tokio runtime. Host events arrive on an unbounded
//! channel; the pending tick is a single deadline held by [`DeadlineTimer`].

use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use super::timer::DeadlineTimer;
use crate::compositor::{CompositorLoop, Surface, TickOutcome};
use crate::opacity::Clock;

/// Lifecycle signals a host sends to the compositor.
#[derive(Debug)]
pub enum HostEvent<S> {
    /// A drawable surface became available.
    SurfaceCreated(S),
    /// The surface was resized.
    SurfaceChanged { width: u32, height: u32 },
    /// The surface went away.
    SurfaceDestroyed,
    /// The wallpaper was shown or hidden.
    VisibilityChanged(bool),
    /// Stop the loop.
    Shutdown,
}

/// Counters collected while the loop ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Ticks that fired.
    pub ticks: usize,
    /// Ticks that presented a frame.
    pub presented: usize,
    /// Ticks skipped because the surface was unavailable.
    pub skipped: usize,
}

impl LoopStats {
    const fn record(&mut self, outcome: TickOutcome) {
        self.ticks += 1;
        match outcome {
            TickOutcome::Presented => self.presented += 1,
            TickOutcome::SurfaceUnavailable => self.skipped += 1,
            TickOutcome::NoSurface | TickOutcome::NotVisible => {}
        }
    }
}

/// Forwards one host event to the compositor. Returns `false` on shutdown.
pub fn dispatch<S, C>(
    compositor: &mut CompositorLoop<S, DeadlineTimer, C>,
    event: HostEvent<S>,
) -> bool
where
    S: Surface,
    C: Clock,
{
    match event {
        HostEvent::SurfaceCreated(surface) => compositor.on_surface_created(surface),
        HostEvent::SurfaceChanged { width, height } => compositor.on_surface_changed(width, height),
        HostEvent::SurfaceDestroyed => compositor.on_surface_destroyed(),
        HostEvent::VisibilityChanged(visible) => compositor.on_visibility_changed(visible),
        HostEvent::Shutdown => return false,
    }
    true
}

/// Waits until `deadline`, or forever if there is none.
async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

/// Runs the compositor until a `Shutdown` event, a closed channel, or `shutdown`
/// resolving.
///
/// On `shutdown` the wallpaper is hidden and its surface destroyed before
/// returning.
pub async fn run_event_loop<S, C, F>(
    compositor: &mut CompositorLoop<S, DeadlineTimer, C>,
    events: &mut mpsc::UnboundedReceiver<HostEvent<S>>,
    shutdown: F,
) -> LoopStats
where
    S: Surface,
    C: Clock,
    F: Future<Output = ()>,
{
    let mut stats = LoopStats::default();
    tokio::pin!(shutdown);

    loop {
        let deadline = compositor.scheduler().deadline();

        tokio::select! {
            biased;

            event = events.recv() => {
                let Some(event) = event else {
                    tracing::debug!("host event channel closed");
                    break;
                };
                if !dispatch(compositor, event) {
                    tracing::debug!("shutdown requested by host");
                    break;
                }
            }
            () = wait_for(deadline) => {
                compositor.scheduler_mut().fire();
                stats.record(compositor.tick());
            }
            () = &mut shutdown => {
                tracing::info!("shutting down");
                compositor.on_visibility_changed(false);
                compositor.on_surface_destroyed();
                break;
            }
        }
    }

    tracing::debug!(
        ticks = stats.ticks,
        presented = stats.presented,
        skipped = stats.skipped,
        "event loop stopped"
    );
    stats
}
