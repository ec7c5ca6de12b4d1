//! Render state owned by the compositor loop.

use std::fmt;

use super::surface::Rect;

/// Lifecycle phase of the wallpaper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Constructed, no surface seen yet.
    #[default]
    Created,
    /// A surface exists or existed, but the wallpaper is not on screen.
    Hidden,
    /// On screen; ticks repaint and reschedule.
    Visible,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Hidden => "hidden",
            Self::Visible => "visible",
        })
    }
}

/// Mutable state of the compositor: phase plus last known surface size.
///
/// Dimensions survive visibility changes so a wallpaper shown again repaints at
/// the previous size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderState {
    phase: Phase,
    width: u32,
    height: u32,
}

impl RenderState {
    #[must_use]
    pub const fn new() -> Self { Self { phase: Phase::Created, width: 0, height: 0 } }

    #[must_use]
    pub const fn phase(&self) -> Phase { self.phase }

    #[must_use]
    pub const fn is_visible(&self) -> bool { matches!(self.phase, Phase::Visible) }

    #[must_use]
    pub const fn width(&self) -> u32 { self.width }

    #[must_use]
    pub const fn height(&self) -> u32 { self.height }

    /// The full surface rectangle, anchored at the origin.
    #[must_use]
    pub const fn surface_rect(&self) -> Rect { Rect::from_size(self.width, self.height) }

    /// Records new surface dimensions. Returns `true` if they changed.
    pub const fn resize(&mut self, width: u32, height: u32) -> bool {
        let changed = self.width != width || self.height != height;
        self.width = width;
        self.height = height;
        changed
    }

    /// A surface appeared. `Created` moves to `Hidden`; other phases are kept.
    pub const fn surface_attached(&mut self) {
        if matches!(self.phase, Phase::Created) {
            self.phase = Phase::Hidden;
        }
    }

    /// Applies a visibility signal and returns the resulting phase.
    pub const fn set_visible(&mut self, visible: bool) -> Phase {
        self.phase = if visible { Phase::Visible } else { Phase::Hidden };
        self.phase
    }
}
