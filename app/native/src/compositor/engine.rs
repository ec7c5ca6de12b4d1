//! The redraw loop.
//!
//! [`CompositorLoop`] reacts to host lifecycle signals and, on every tick while
//! visible, paints a black background followed by the three layers with alphas
//! taken from the opacity curve. It keeps at most one tick pending: every
//! transition that schedules cancels first.

use std::fmt;
use std::time::Duration;

use image::Rgb;

use super::layers::LayerSet;
use super::state::{Phase, RenderState};
use super::surface::{Canvas, Frame, Rect, Surface, TickScheduler};
use crate::constants::DEFAULT_TICK_DELAY_MS;
use crate::opacity::{Clock, Layer, OpacityCurve, OpacityVector};

/// Background painted under the base layer.
pub const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

/// Default delay between two redraws.
pub const DEFAULT_TICK_DELAY: Duration = Duration::from_millis(DEFAULT_TICK_DELAY_MS);

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was painted and posted.
    Presented,
    /// The surface could not be locked; the frame was skipped.
    SurfaceUnavailable,
    /// No surface is attached; nothing was rescheduled.
    NoSurface,
    /// The wallpaper is not visible; nothing was rescheduled.
    NotVisible,
}

impl fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Presented => "presented",
            Self::SurfaceUnavailable => "surface unavailable",
            Self::NoSurface => "no surface",
            Self::NotVisible => "not visible",
        })
    }
}

/// Drives a [`Surface`] from host lifecycle signals and timer ticks.
pub struct CompositorLoop<S, T, C>
where
    S: Surface,
    T: TickScheduler,
    C: Clock,
{
    state: RenderState,
    surface: Option<S>,
    layers: LayerSet,
    curve: OpacityCurve,
    clock: C,
    scheduler: T,
    tick_delay: Duration,
}

impl<S, T, C> CompositorLoop<S, T, C>
where
    S: Surface,
    T: TickScheduler,
    C: Clock,
{
    /// Creates a loop in the `Created` phase with no surface attached.
    #[must_use]
    pub const fn new(layers: LayerSet, curve: OpacityCurve, clock: C, scheduler: T) -> Self {
        Self {
            state: RenderState::new(),
            surface: None,
            layers,
            curve,
            clock,
            scheduler,
            tick_delay: DEFAULT_TICK_DELAY,
        }
    }

    /// Overrides the delay between redraws.
    #[must_use]
    pub fn with_tick_delay(mut self, delay: Duration) -> Self {
        self.tick_delay = delay;
        self
    }

    #[must_use]
    pub const fn state(&self) -> &RenderState { &self.state }

    #[must_use]
    pub const fn phase(&self) -> Phase { self.state.phase() }

    #[must_use]
    pub const fn tick_delay(&self) -> Duration { self.tick_delay }

    #[must_use]
    pub const fn scheduler(&self) -> &T { &self.scheduler }

    pub const fn scheduler_mut(&mut self) -> &mut T { &mut self.scheduler }

    #[must_use]
    pub const fn surface(&self) -> Option<&S> { self.surface.as_ref() }

    pub const fn surface_mut(&mut self) -> Option<&mut S> { self.surface.as_mut() }

    /// A drawable surface became available.
    pub fn on_surface_created(&mut self, surface: S) {
        self.surface = Some(surface);
        self.state.surface_attached();
        tracing::debug!(phase = %self.state.phase(), "surface created");

        if self.state.is_visible() {
            self.reschedule(Duration::ZERO);
        }
    }

    /// The surface was resized. Repaints immediately while visible.
    pub fn on_surface_changed(&mut self, width: u32, height: u32) {
        let changed = self.state.resize(width, height);
        tracing::debug!(width, height, changed, "surface changed");

        if self.state.is_visible() {
            self.reschedule(Duration::ZERO);
        }
    }

    /// The surface went away. The loop goes hidden and stops ticking.
    pub fn on_surface_destroyed(&mut self) {
        self.surface = None;
        self.state.set_visible(false);
        self.scheduler.cancel();
        tracing::debug!("surface destroyed");
    }

    /// The wallpaper was shown or hidden.
    pub fn on_visibility_changed(&mut self, visible: bool) {
        let phase = self.state.set_visible(visible);
        tracing::debug!(phase = %phase, "visibility changed");

        if visible {
            self.reschedule(Duration::ZERO);
        } else {
            self.scheduler.cancel();
        }
    }

    /// Runs one redraw and reschedules the next one while visible.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_visible() {
            tracing::trace!("tick ignored while hidden");
            return TickOutcome::NotVisible;
        }

        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!("tick without surface");
            return TickOutcome::NoSurface;
        };

        let rect = self.state.surface_rect();
        let outcome = match Frame::acquire(surface, rect) {
            Some(mut frame) => {
                paint_frame(
                    frame.canvas(),
                    rect,
                    &mut self.layers,
                    &self.curve,
                    &self.clock,
                );
                TickOutcome::Presented
            }
            None => TickOutcome::SurfaceUnavailable,
        };

        tracing::debug!(outcome = %outcome, "tick");
        self.reschedule(self.tick_delay);
        outcome
    }

    fn reschedule(&mut self, delay: Duration) {
        self.scheduler.cancel();
        self.scheduler.schedule(delay);
    }
}

impl<S, T, C> fmt::Debug for CompositorLoop<S, T, C>
where
    S: Surface,
    T: TickScheduler,
    C: Clock,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositorLoop")
            .field("state", &self.state)
            .field("has_surface", &self.surface.is_some())
            .field("tick_delay", &self.tick_delay)
            .finish_non_exhaustive()
    }
}

/// Paints one frame: black background, then every layer stretched to `rect`.
///
/// The hour is read from `clock` once, after the background is painted.
/// Returns the opacities used.
pub fn paint_frame<K, C>(
    canvas: &mut K,
    rect: Rect,
    layers: &mut LayerSet,
    curve: &OpacityCurve,
    clock: &C,
) -> OpacityVector
where
    K: Canvas + ?Sized,
    C: Clock + ?Sized,
{
    canvas.fill_rect(rect, BACKGROUND);

    let opacities = curve.opacities_by_time(clock);
    let alphas = opacities.to_alpha();
    let images = layers.fitted(rect.width, rect.height);

    for layer in Layer::ALL {
        canvas.draw_layer(&images[layer.index()], rect, alphas[layer.index()]);
    }

    opacities
}
