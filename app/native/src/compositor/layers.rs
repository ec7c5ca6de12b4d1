//! Decoded layer images.
//!
//! The three wallpaper layers are decoded once at startup. Copies stretched to the
//! current surface size are cached and only rebuilt when the surface dimensions
//! change.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbaImage};
use thiserror::Error;

use crate::opacity::{LAYER_COUNT, Layer};

/// Errors that can occur while loading layer assets. These are fatal at startup.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The asset file does not exist.
    #[error("Missing {layer} layer asset: {path}")]
    Missing { layer: Layer, path: String },
    /// The asset exists but could not be read or decoded.
    #[error("Failed to decode {layer} layer asset {path}: {message}")]
    Decode {
        layer: Layer,
        path: String,
        message: String,
    },
}

/// An immutable decoded raster for one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerImage {
    layer: Layer,
    pixels: RgbaImage,
}

impl LayerImage {
    #[must_use]
    pub fn new(layer: Layer, image: DynamicImage) -> Self {
        Self { layer, pixels: image.into_rgba8() }
    }

    /// Decodes the image at `path`.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::Missing` if the file does not exist, or
    /// `AssetError::Decode` if it cannot be decoded.
    pub fn load(layer: Layer, path: &Path) -> Result<Self, AssetError> {
        if !path.is_file() {
            return Err(AssetError::Missing { layer, path: path.display().to_string() });
        }

        let decode_error = |message: String| AssetError::Decode {
            layer,
            path: path.display().to_string(),
            message,
        };

        let image = ImageReader::open(path)
            .map_err(|e| decode_error(e.to_string()))?
            .with_guessed_format()
            .map_err(|e| decode_error(e.to_string()))?
            .decode()
            .map_err(|e| decode_error(e.to_string()))?;

        tracing::debug!(
            layer = %layer,
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "decoded layer asset"
        );

        Ok(Self::new(layer, image))
    }

    #[must_use]
    pub const fn layer(&self) -> Layer { self.layer }

    #[must_use]
    pub const fn pixels(&self) -> &RgbaImage { &self.pixels }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) { self.pixels.dimensions() }

    /// Returns a copy stretched to exactly `width` x `height`.
    #[must_use]
    pub fn stretched(&self, width: u32, height: u32) -> Self {
        Self { layer: self.layer, pixels: stretch(&self.pixels, width, height) }
    }
}

/// Stretches `pixels` to exactly `width` x `height`, ignoring aspect ratio.
#[must_use]
pub fn stretch(pixels: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if pixels.dimensions() == (width, height) {
        return pixels.clone();
    }
    // CatmullRom: good quality, much faster than Lanczos3
    image::imageops::resize(pixels, width, height, FilterType::CatmullRom)
}

/// Copies of every layer stretched to one surface size.
#[derive(Debug, Clone)]
struct FittedLayers {
    width: u32,
    height: u32,
    images: [LayerImage; LAYER_COUNT],
}

/// The three layers of the wallpaper in paint order.
#[derive(Debug, Clone)]
pub struct LayerSet {
    images: [LayerImage; LAYER_COUNT],
    fitted: Option<FittedLayers>,
}

impl LayerSet {
    /// Builds a set from images given in paint order.
    #[must_use]
    pub const fn new(images: [LayerImage; LAYER_COUNT]) -> Self { Self { images, fitted: None } }

    /// Decodes the three layer assets, given in paint order.
    ///
    /// # Errors
    ///
    /// Returns the first `AssetError` encountered.
    pub fn load(paths: &[PathBuf; LAYER_COUNT]) -> Result<Self, AssetError> {
        let [base, overlay1, overlay2] = paths;
        Ok(Self::new([
            LayerImage::load(Layer::Base, base)?,
            LayerImage::load(Layer::Overlay1, overlay1)?,
            LayerImage::load(Layer::Overlay2, overlay2)?,
        ]))
    }

    #[must_use]
    pub const fn get(&self, layer: Layer) -> &LayerImage { &self.images[layer.index()] }

    /// Returns the layers stretched to `width` x `height`, rebuilding the cache if
    /// the size changed since the last call.
    pub fn fitted(&mut self, width: u32, height: u32) -> &[LayerImage; LAYER_COUNT] {
        if width == 0 || height == 0 {
            return &self.images;
        }

        let stale = self.fitted.as_ref().is_none_or(|f| f.width != width || f.height != height);
        if stale {
            tracing::debug!(width, height, "stretching layers to surface size");
            self.fitted = Some(FittedLayers {
                width,
                height,
                images: self.images.each_ref().map(|image| image.stretched(width, height)),
            });
        }

        match &self.fitted {
            Some(fitted) => &fitted.images,
            None => &self.images,
        }
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;
    use tempfile::TempDir;

    use super::*;

    fn solid(layer: Layer, width: u32, height: u32, color: [u8; 4]) -> LayerImage {
        LayerImage::new(
            layer,
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color))),
        )
    }

    fn solid_set(width: u32, height: u32) -> LayerSet {
        LayerSet::new([
            solid(Layer::Base, width, height, [200, 100, 50, 255]),
            solid(Layer::Overlay1, width, height, [0, 0, 80, 255]),
            solid(Layer::Overlay2, width, height, [10, 10, 10, 128]),
        ])
    }

    // ========================================================================
    // stretch
    // ========================================================================

    #[test]
    fn test_stretch_to_wider_target() {
        let pixels = RgbaImage::from_pixel(10, 20, Rgba([1, 2, 3, 255]));
        let stretched = stretch(&pixels, 64, 16);
        assert_eq!(stretched.dimensions(), (64, 16));
    }

    #[test]
    fn test_stretch_same_size_is_identity() {
        let pixels = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        assert_eq!(stretch(&pixels, 4, 4), pixels);
    }

    #[test]
    fn test_stretch_preserves_solid_color() {
        let pixels = RgbaImage::from_pixel(8, 8, Rgba([90, 90, 90, 255]));
        let stretched = stretch(&pixels, 32, 20);
        assert!(stretched.pixels().all(|p| p.0[0].abs_diff(90) <= 1 && p.0[3] >= 254));
    }

    // ========================================================================
    // LayerSet
    // ========================================================================

    #[test]
    fn test_fitted_layers_match_surface_size() {
        let mut set = solid_set(16, 9);
        let fitted = set.fitted(32, 18);
        for (image, layer) in fitted.iter().zip(Layer::ALL) {
            assert_eq!(image.dimensions(), (32, 18));
            assert_eq!(image.layer(), layer);
        }
    }

    #[test]
    fn test_fitted_layers_rebuild_on_resize() {
        let mut set = solid_set(16, 9);
        assert_eq!(set.fitted(32, 18)[0].dimensions(), (32, 18));
        assert_eq!(set.fitted(8, 8)[0].dimensions(), (8, 8));
        // Originals are untouched.
        assert_eq!(set.get(Layer::Base).dimensions(), (16, 9));
    }

    #[test]
    fn test_fitted_with_empty_surface_returns_originals() {
        let mut set = solid_set(16, 9);
        assert_eq!(set.fitted(0, 0)[2].dimensions(), (16, 9));
    }

    // ========================================================================
    // Loading
    // ========================================================================

    #[test]
    fn test_load_missing_asset() {
        let err = LayerImage::load(Layer::Overlay1, Path::new("/nonexistent/night.png")).unwrap_err();
        assert!(matches!(err, AssetError::Missing { layer: Layer::Overlay1, .. }));
        assert!(err.to_string().contains("overlay1"));
    }

    #[test]
    fn test_load_undecodable_asset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = LayerImage::load(Layer::Base, &path).unwrap_err();
        assert!(matches!(err, AssetError::Decode { layer: Layer::Base, .. }));
        assert!(err.to_string().contains("Failed to decode base layer asset"));
    }

    #[test]
    fn test_load_set_from_png_files() {
        let dir = TempDir::new().unwrap();
        let paths = ["base.png", "night1.png", "night2.png"].map(|name| dir.path().join(name));
        for path in &paths {
            RgbaImage::from_pixel(6, 4, Rgba([10, 20, 30, 255])).save(path).unwrap();
        }

        let set = LayerSet::load(&paths).unwrap();
        assert_eq!(set.get(Layer::Base).dimensions(), (6, 4));
        assert_eq!(set.get(Layer::Overlay2).layer(), Layer::Overlay2);
    }

    #[test]
    fn test_load_set_reports_first_missing_layer() {
        let dir = TempDir::new().unwrap();
        let paths = ["base.png", "night1.png", "night2.png"].map(|name| dir.path().join(name));
        RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])).save(&paths[0]).unwrap();

        let err = LayerSet::load(&paths).unwrap_err();
        assert!(matches!(err, AssetError::Missing { layer: Layer::Overlay1, .. }));
    }
}
