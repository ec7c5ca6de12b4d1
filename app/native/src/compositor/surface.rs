//! Host-facing seams of the compositor.
//!
//! The compositor does not know how frames reach the screen or how delayed
//! callbacks are run. A host supplies a [`Surface`] that can be locked for one
//! frame and a [`TickScheduler`] that holds at most one pending tick.

use std::time::Duration;

use image::Rgb;

use super::layers::LayerImage;

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self { Self { x, y, width, height } }

    /// Rectangle anchored at the origin covering `width` x `height`.
    #[must_use]
    pub const fn from_size(width: u32, height: u32) -> Self { Self::new(0, 0, width, height) }

    #[must_use]
    pub const fn is_empty(&self) -> bool { self.width == 0 || self.height == 0 }
}

/// Drawing operations the compositor needs from a locked surface.
pub trait Canvas {
    /// Fills `rect` with an opaque color.
    fn fill_rect(&mut self, rect: Rect, color: Rgb<u8>);

    /// Draws `image` stretched to `dst`, modulated by `alpha` (0 = invisible, 255 = as-is).
    fn draw_layer(&mut self, image: &LayerImage, dst: Rect, alpha: u8);
}

/// A drawable target owned by the host.
pub trait Surface {
    type Canvas: Canvas;

    /// Locks the surface for one frame with a canvas of `width` x `height`, the size
    /// last reported by the host. Returns `None` when no drawable target is available.
    fn lock_canvas(&mut self, width: u32, height: u32) -> Option<Self::Canvas>;

    /// Releases the canvas and presents whatever was painted on it.
    fn unlock_and_post(&mut self, canvas: &mut Self::Canvas);
}

/// Exclusive access to a surface for the duration of one frame.
///
/// Dropping the frame posts the canvas, so the surface is released on every exit
/// path, including unwinding out of a paint call.
pub struct Frame<'a, S: Surface> {
    surface: &'a mut S,
    canvas: S::Canvas,
}

impl<'a, S: Surface> Frame<'a, S> {
    /// Locks `surface` for a frame covering `rect`, or returns `None` if the host
    /// has no drawable target.
    pub fn acquire(surface: &'a mut S, rect: Rect) -> Option<Self> {
        let canvas = surface.lock_canvas(rect.width, rect.height)?;
        Some(Self { surface, canvas })
    }

    pub const fn canvas(&mut self) -> &mut S::Canvas { &mut self.canvas }
}

impl<S: Surface> Drop for Frame<'_, S> {
    fn drop(&mut self) { self.surface.unlock_and_post(&mut self.canvas); }
}

impl<S: Surface> std::fmt::Debug for Frame<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame").finish_non_exhaustive()
    }
}

/// Delayed single-shot timer for the redraw tick.
///
/// Implementations hold at most one pending tick: scheduling replaces whatever
/// was pending.
pub trait TickScheduler {
    /// Arms the tick to fire after `delay`.
    fn schedule(&mut self, delay: Duration);

    /// Removes the pending tick, if any.
    fn cancel(&mut self);

    /// Whether a tick is currently pending.
    fn is_pending(&self) -> bool;
}
