//! Wallpaper compositing.
//!
//! - [`surface`] - Seams to the host: surface, canvas, frame guard, tick scheduler
//! - [`layers`] - Decoded layer images and their size-fitted copies
//! - [`canvas`] - Software raster canvas
//! - [`state`] - Lifecycle phase and surface dimensions
//! - [`engine`] - The redraw loop

pub mod canvas;
pub mod engine;
pub mod layers;
pub mod state;
pub mod surface;

pub use canvas::RasterCanvas;
pub use engine::{BACKGROUND, CompositorLoop, DEFAULT_TICK_DELAY, TickOutcome, paint_frame};
pub use layers::{AssetError, LayerImage, LayerSet, stretch};
pub use state::{Phase, RenderState};
pub use surface::{Canvas, Frame, Rect, Surface, TickScheduler};
