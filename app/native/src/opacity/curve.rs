//! Per-layer opacity curves.
//!
//! The wallpaper is made of three layers painted in a fixed order. The base layer
//! is always opaque; the two night overlays follow keyframe tables tuned to peak
//! at night and fade out in the afternoon.

use std::fmt;

use super::clock::Clock;
use super::keyframes::{CurveError, Keyframe, KeyframeTable};

/// Number of layers in the wallpaper.
pub const LAYER_COUNT: usize = 3;

/// Overlay 1 keyframes (hour, opacity).
pub const OVERLAY1_KEYFRAMES: [Keyframe; 9] = [
    Keyframe::new(0.0, 0.85),
    Keyframe::new(3.0, 0.9),
    Keyframe::new(6.0, 0.85),
    Keyframe::new(9.0, 0.7),
    Keyframe::new(12.0, 0.3),
    Keyframe::new(15.0, 0.0),
    Keyframe::new(18.0, 0.3),
    Keyframe::new(21.0, 0.5),
    Keyframe::new(23.0, 0.85),
];

/// Overlay 2 keyframes (hour, opacity).
pub const OVERLAY2_KEYFRAMES: [Keyframe; 9] = [
    Keyframe::new(0.0, 0.3),
    Keyframe::new(3.0, 0.35),
    Keyframe::new(6.0, 0.3),
    Keyframe::new(9.0, 0.2),
    Keyframe::new(12.0, 0.1),
    Keyframe::new(15.0, 0.0),
    Keyframe::new(18.0, 0.1),
    Keyframe::new(21.0, 0.2),
    Keyframe::new(23.0, 0.3),
];

/// The layers of the wallpaper, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The base image, always fully opaque.
    Base,
    /// First night overlay.
    Overlay1,
    /// Second night overlay.
    Overlay2,
}

impl Layer {
    /// All layers in paint order.
    pub const ALL: [Self; LAYER_COUNT] = [Self::Base, Self::Overlay1, Self::Overlay2];

    /// Logical asset name of the layer.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Overlay1 => "overlay1",
            Self::Overlay2 => "overlay2",
        }
    }

    /// Position of the layer in paint order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Base => 0,
            Self::Overlay1 => 1,
            Self::Overlay2 => 2,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// One opacity per layer, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityVector([f32; LAYER_COUNT]);

impl OpacityVector {
    /// Builds a vector, clamping every value into `[0, 1]`.
    #[must_use]
    pub fn new(values: [f32; LAYER_COUNT]) -> Self { Self(values.map(|v| v.clamp(0.0, 1.0))) }

    #[must_use]
    pub const fn get(&self, layer: Layer) -> f32 { self.0[layer.index()] }

    #[must_use]
    pub const fn as_array(&self) -> &[f32; LAYER_COUNT] { &self.0 }

    /// Returns the 8-bit form used for painting: `floor(opacity * 255)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_alpha(&self) -> [u8; LAYER_COUNT] { self.0.map(|v| (v * 255.0) as u8) }
}

/// How a single layer's opacity is derived.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerCurve {
    /// Always the same opacity.
    Fixed(f32),
    /// Interpolated from a keyframe table.
    Keyframed(KeyframeTable),
}

impl LayerCurve {
    #[must_use]
    pub fn sample(&self, hour: f32) -> f32 {
        match self {
            Self::Fixed(value) => *value,
            Self::Keyframed(table) => table.sample(hour),
        }
    }
}

/// Maps hour of day to the opacity of every layer.
#[derive(Debug, Clone, PartialEq)]
pub struct OpacityCurve {
    layers: [LayerCurve; LAYER_COUNT],
}

impl OpacityCurve {
    /// Builds a curve from explicit overlay tables. The base layer stays opaque.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidCurveConfiguration` if either table is malformed.
    pub fn new(overlay1: &[Keyframe], overlay2: &[Keyframe]) -> Result<Self, CurveError> {
        Ok(Self {
            layers: [
                LayerCurve::Fixed(1.0),
                LayerCurve::Keyframed(KeyframeTable::new(overlay1)?),
                LayerCurve::Keyframed(KeyframeTable::new(overlay2)?),
            ],
        })
    }

    /// Builds the built-in day/night curve.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in tables are malformed, which the test suite rules out.
    pub fn day_night() -> Result<Self, CurveError> { Self::new(&OVERLAY1_KEYFRAMES, &OVERLAY2_KEYFRAMES) }

    #[must_use]
    pub const fn layer(&self, layer: Layer) -> &LayerCurve { &self.layers[layer.index()] }

    /// Evaluates every layer at the given hour.
    #[must_use]
    pub fn opacities_at(&self, hour: f32) -> OpacityVector {
        OpacityVector::new(Layer::ALL.map(|layer| self.layer(layer).sample(hour)))
    }

    /// Reads the hour from `clock` once and evaluates every layer.
    pub fn opacities_by_time<C: Clock + ?Sized>(&self, clock: &C) -> OpacityVector {
        let hour = clock.hour_of_day();
        let opacities = self.opacities_at(hour);
        tracing::debug!(
            hour,
            base = opacities.get(Layer::Base),
            overlay1 = opacities.get(Layer::Overlay1),
            overlay2 = opacities.get(Layer::Overlay2),
            "computed layer opacities"
        );
        opacities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opacity::clock::FixedClock;

    fn curve() -> OpacityCurve { OpacityCurve::day_night().unwrap() }

    // ========================================================================
    // Built-in tables
    // ========================================================================

    #[test]
    fn test_builtin_tables_are_valid() {
        assert!(KeyframeTable::new(&OVERLAY1_KEYFRAMES).is_ok());
        assert!(KeyframeTable::new(&OVERLAY2_KEYFRAMES).is_ok());
    }

    #[test]
    fn test_base_layer_is_always_opaque() {
        let curve = curve();
        for hour in 0..24 {
            #[allow(clippy::cast_precision_loss)]
            let opacities = curve.opacities_at(hour as f32);
            assert_eq!(opacities.get(Layer::Base), 1.0);
            assert_eq!(opacities.to_alpha()[0], 255);
        }
    }

    #[test]
    fn test_overlays_peak_at_night_and_trough_in_afternoon() {
        let curve = curve();
        let night = curve.opacities_at(3.0);
        let afternoon = curve.opacities_at(15.0);
        assert!(night.get(Layer::Overlay1) > afternoon.get(Layer::Overlay1));
        assert!(night.get(Layer::Overlay2) > afternoon.get(Layer::Overlay2));
        assert_eq!(afternoon.get(Layer::Overlay1), 0.0);
        assert_eq!(afternoon.get(Layer::Overlay2), 0.0);
    }

    #[test]
    fn test_keyframe_hours_return_table_values() {
        let curve = curve();
        for (k1, k2) in OVERLAY1_KEYFRAMES.iter().zip(OVERLAY2_KEYFRAMES.iter()) {
            let opacities = curve.opacities_at(k1.hour);
            assert_eq!(opacities.as_array(), &[1.0, k1.opacity, k2.opacity], "hour {}", k1.hour);
        }
    }

    #[test]
    fn test_hour_zero_overlay1_is_boundary_value() {
        assert_eq!(curve().opacities_at(0.0).get(Layer::Overlay1), 0.85);
    }

    #[test]
    fn test_midnight_clamps_instead_of_wrapping() {
        // Pins the boundary: no interpolation between 23:00 and 00:00.
        let curve = curve();
        for hour in [23.0, 23.5, 23.99] {
            let opacities = curve.opacities_at(hour);
            assert_eq!(opacities.get(Layer::Overlay1), 0.85);
            assert_eq!(opacities.get(Layer::Overlay2), 0.3);
        }
        for hour in [-0.5, 0.0] {
            let opacities = curve.opacities_at(hour);
            assert_eq!(opacities.get(Layer::Overlay1), 0.85);
            assert_eq!(opacities.get(Layer::Overlay2), 0.3);
        }
    }

    #[test]
    fn test_opacities_by_time_uses_clock() {
        let opacities = curve().opacities_by_time(&FixedClock::new(13.5));
        assert!((opacities.get(Layer::Overlay1) - 0.15).abs() < 1e-5);
        assert!((opacities.get(Layer::Overlay2) - 0.05).abs() < 1e-5);
    }

    // ========================================================================
    // OpacityVector
    // ========================================================================

    #[test]
    fn test_opacity_vector_alpha_truncates() {
        let vector = OpacityVector::new([1.0, 0.85, 0.3]);
        // 0.85 * 255 = 216.75 and 0.3 * 255 = 76.5
        assert_eq!(vector.to_alpha(), [255, 216, 76]);
    }

    #[test]
    fn test_opacity_vector_clamps_values() {
        let vector = OpacityVector::new([1.5, -0.2, 0.5]);
        assert_eq!(vector.as_array(), &[1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_opacity_vector_length_matches_layers() {
        assert_eq!(curve().opacities_at(8.0).as_array().len(), Layer::ALL.len());
    }

    // ========================================================================
    // Layer
    // ========================================================================

    #[test]
    fn test_layer_order_and_names() {
        let names: Vec<&str> = Layer::ALL.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["base", "overlay1", "overlay2"]);
        for (i, layer) in Layer::ALL.iter().enumerate() {
            assert_eq!(layer.index(), i);
        }
        assert_eq!(Layer::Overlay2.to_string(), "overlay2");
    }

    #[test]
    fn test_curve_rejects_malformed_overlay() {
        let short = [Keyframe::new(0.0, 0.5)];
        let result = OpacityCurve::new(&short, &OVERLAY2_KEYFRAMES);
        assert!(matches!(result, Err(CurveError::InvalidCurveConfiguration(_))));
    }

    #[test]
    fn test_fixed_layer_curve_ignores_hour() {
        let fixed = LayerCurve::Fixed(0.4);
        assert_eq!(fixed.sample(0.0), 0.4);
        assert_eq!(fixed.sample(17.0), 0.4);
    }
}
