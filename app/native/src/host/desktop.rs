//! Desktop surface: paints into memory and hands finished frames to the OS.
//!
//! Each presented frame is encoded as JPEG into the cache `frames/` directory and,
//! unless disabled, set as the desktop wallpaper. Two file names are used in
//! alternation so desktop environments that cache by path pick up every change.
//! Frames identical to the previous one are not written again.

use std::collections::hash_map::DefaultHasher;
use std::fs::{self, File};
use std::hash::{Hash, Hasher};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::codecs::jpeg::JpegEncoder;
use thiserror::Error;

use crate::cache;
use crate::compositor::{RasterCanvas, Surface};
use crate::config::OutputConfig;

/// File names the presenter alternates between.
const FRAME_FILE_NAMES: [&str; 2] = ["frame-a.jpg", "frame-b.jpg"];

/// Errors that can occur while presenting a frame. Logged, never fatal.
#[derive(Debug, Error)]
pub enum PresentError {
    /// The frames directory could not be created.
    #[error("Failed to create frame directory {}: {message}", .path.display())]
    CreateDir { path: PathBuf, message: String },
    /// The frame could not be encoded or written.
    #[error("Failed to write frame {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },
    /// The operating system refused the wallpaper.
    #[error("Failed to set wallpaper {}: {message}", .path.display())]
    SetWallpaper { path: PathBuf, message: String },
}

/// Options of a [`DesktopSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopOptions {
    /// Initial surface width reported to the compositor.
    pub width: u32,
    /// Initial surface height reported to the compositor.
    pub height: u32,
    /// JPEG quality, 1-100.
    pub quality: u8,
    /// Set presented frames as the desktop wallpaper.
    pub set_desktop: bool,
    /// Directory frames are written to.
    pub frames_dir: PathBuf,
}

impl DesktopOptions {
    /// Options from the `output` configuration section, writing to the cache.
    #[must_use]
    pub fn from_config(output: &OutputConfig) -> Self {
        Self {
            width: output.width,
            height: output.height,
            quality: output.quality,
            set_desktop: output.set_desktop,
            frames_dir: cache::get_frames_dir(),
        }
    }
}

/// A [`Surface`] backed by an in-memory canvas and the desktop wallpaper.
#[derive(Debug)]
pub struct DesktopSurface {
    options: DesktopOptions,
    next_slot: usize,
    last_hash: Option<u64>,
    last_frame: Option<PathBuf>,
    presented: usize,
}

impl DesktopSurface {
    #[must_use]
    pub const fn new(options: DesktopOptions) -> Self {
        Self {
            options,
            next_slot: 0,
            last_hash: None,
            last_frame: None,
            presented: 0,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &DesktopOptions { &self.options }

    /// Path of the most recently written frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&Path> { self.last_frame.as_deref() }

    /// Number of frames written so far, not counting skipped duplicates.
    #[must_use]
    pub const fn presented(&self) -> usize { self.presented }

    /// Writes `pixels` and optionally sets it as the wallpaper.
    ///
    /// Returns `Ok(None)` when the frame is identical to the previous one.
    ///
    /// # Errors
    ///
    /// Returns a `PresentError` if the frame cannot be written or set.
    pub fn present(&mut self, pixels: &RgbaImage) -> Result<Option<PathBuf>, PresentError> {
        let hash = frame_hash(pixels);
        if self.last_hash == Some(hash) {
            tracing::debug!("frame unchanged, skipping present");
            return Ok(None);
        }

        let path = self.options.frames_dir.join(FRAME_FILE_NAMES[self.next_slot]);
        write_jpeg(pixels, &path, self.options.quality)?;

        if self.options.set_desktop {
            set_wallpaper(&path)?;
        }

        self.next_slot = (self.next_slot + 1) % FRAME_FILE_NAMES.len();
        self.last_hash = Some(hash);
        self.last_frame = Some(path.clone());
        self.presented += 1;
        tracing::debug!(path = %path.display(), set_desktop = self.options.set_desktop, "presented frame");

        Ok(Some(path))
    }
}

impl Surface for DesktopSurface {
    type Canvas = RasterCanvas;

    fn lock_canvas(&mut self, width: u32, height: u32) -> Option<RasterCanvas> {
        if width == 0 || height == 0 {
            return None;
        }

        if let Err(err) = fs::create_dir_all(&self.options.frames_dir) {
            let err = PresentError::CreateDir {
                path: self.options.frames_dir.clone(),
                message: err.to_string(),
            };
            tracing::warn!(error = %err, "desktop surface unavailable");
            return None;
        }

        Some(RasterCanvas::new(width, height))
    }

    fn unlock_and_post(&mut self, canvas: &mut RasterCanvas) {
        let pixels = canvas.take_pixels();
        if let Err(err) = self.present(&pixels) {
            tracing::warn!(error = %err, "failed to present frame");
        }
    }
}

fn frame_hash(pixels: &RgbaImage) -> u64 {
    let mut hasher = DefaultHasher::new();
    pixels.dimensions().hash(&mut hasher);
    pixels.as_raw().hash(&mut hasher);
    hasher.finish()
}

/// Encodes `pixels` as JPEG at `path`, dropping the alpha channel.
///
/// # Errors
///
/// Returns `PresentError::Encode` if the file cannot be created or encoded.
pub fn write_jpeg(pixels: &RgbaImage, path: &Path, quality: u8) -> Result<(), PresentError> {
    let encode_error = |message: String| PresentError::Encode { path: path.to_path_buf(), message };

    let file = File::create(path).map_err(|e| encode_error(e.to_string()))?;
    let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality);
    image::DynamicImage::ImageRgba8(pixels.clone())
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| encode_error(e.to_string()))
}

/// Sets the desktop wallpaper for all screens.
///
/// # Errors
///
/// Returns `PresentError::SetWallpaper` if the file is missing or the desktop
/// refuses it.
pub fn set_wallpaper(path: &Path) -> Result<(), PresentError> {
    let set_error = |message: String| PresentError::SetWallpaper { path: path.to_path_buf(), message };

    if !path.exists() {
        return Err(set_error("file not found".to_string()));
    }

    let path_str = path.display().to_string();
    wallpaper::set_from_path(&path_str).map_err(|e| set_error(e.to_string()))
}
