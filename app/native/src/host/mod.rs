//! Desktop host.
//!
//! Drives a [`CompositorLoop`] on a single-threaded tokio runtime, painting into
//! an in-memory canvas and handing every frame to the operating system as the
//! desktop wallpaper.
//!
//! - [`desktop`] - The surface and the wallpaper presenter
//! - [`runtime`] - Event loop over host events and the tick deadline
//! - [`timer`] - The single-deadline tick scheduler

pub mod desktop;
pub mod runtime;
pub mod timer;

use std::path::Path;

use tokio::sync::mpsc;

pub use desktop::{DesktopOptions, DesktopSurface, PresentError, set_wallpaper, write_jpeg};
pub use runtime::{HostEvent, LoopStats, dispatch, run_event_loop};
pub use timer::DeadlineTimer;

use crate::compositor::{CompositorLoop, LayerSet};
use crate::config::DynwallConfig;
use crate::error::DynwallError;
use crate::opacity::{OpacityCurve, SystemClock};

/// Resolves when the process receives Ctrl-C.
async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for Ctrl-C; stop the process to exit");
        std::future::pending::<()>().await;
    }
}

/// Runs the wallpaper daemon until Ctrl-C.
///
/// Layer assets are resolved against `base_dir` and decoded before the loop
/// starts.
///
/// # Errors
///
/// Returns an error if an asset cannot be loaded or the runtime cannot start.
pub fn run_desktop(config: &DynwallConfig, base_dir: &Path) -> Result<LoopStats, DynwallError> {
    let paths = config.assets.resolve(base_dir);
    let layers = LayerSet::load(&paths)?;
    let curve = OpacityCurve::day_night()?;
    let clock = SystemClock::new(config.refresh.fractional_hours);
    let options = DesktopOptions::from_config(&config.output);

    tracing::info!(
        assets = %config.assets.directory(base_dir).display(),
        width = options.width,
        height = options.height,
        interval_ms = config.refresh.interval_ms,
        set_desktop = options.set_desktop,
        "starting dynamic wallpaper"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| DynwallError::RuntimeError(e.to_string()))?;

    let stats = runtime.block_on(async {
        let (events, mut receiver) = mpsc::unbounded_channel();
        let mut compositor = CompositorLoop::new(layers, curve, clock, DeadlineTimer::new())
            .with_tick_delay(config.refresh.interval());

        let startup = [
            HostEvent::SurfaceCreated(DesktopSurface::new(options.clone())),
            HostEvent::SurfaceChanged { width: options.width, height: options.height },
            HostEvent::VisibilityChanged(true),
        ];
        for event in startup {
            if events.send(event).is_err() {
                tracing::warn!("host event channel closed before startup");
            }
        }

        let stats = run_event_loop(&mut compositor, &mut receiver, ctrl_c()).await;
        drop(events);
        stats
    });

    tracing::info!(presented = stats.presented, skipped = stats.skipped, "dynamic wallpaper stopped");
    Ok(stats)
}
