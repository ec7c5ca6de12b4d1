//! Keyframe tables and piecewise-linear interpolation.
//!
//! A keyframe table is a sorted list of `(hour, opacity)` control points. Values
//! between two control points are linearly interpolated; values outside the table
//! are clamped to the first or last opacity. There is no wraparound at midnight.

use thiserror::Error;

/// Errors raised when a keyframe table is malformed.
///
/// These are programmer errors. The built-in tables are validated once at
/// construction and by the test suite, never per frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// The hour/opacity sequences are mismatched, too short, or out of range.
    #[error("Invalid curve configuration: {0}")]
    InvalidCurveConfiguration(String),
}

/// A single control point of a keyframe table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    /// Hour of day in `[0, 24)`.
    pub hour: f32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}

impl Keyframe {
    #[must_use]
    pub const fn new(hour: f32, opacity: f32) -> Self { Self { hour, opacity } }
}

/// Interpolates `value` over the curve described by `xs` (hours) and `ys` (opacities).
///
/// `xs` must be strictly increasing. Values at or below `xs[0]` return `ys[0]`;
/// values at or above the last hour return the last opacity.
///
/// # Errors
///
/// Returns `CurveError::InvalidCurveConfiguration` if the sequences have different
/// lengths or fewer than two points.
pub fn interpolate(value: f32, xs: &[f32], ys: &[f32]) -> Result<f32, CurveError> {
    if xs.len() < 2 || ys.len() < 2 || xs.len() != ys.len() {
        return Err(CurveError::InvalidCurveConfiguration(format!(
            "hour and opacity sequences must have the same length of at least 2 (got {} and {})",
            xs.len(),
            ys.len()
        )));
    }

    Ok(interpolate_unchecked(value, xs, ys))
}

/// Interpolation for sequences already known to be valid.
fn interpolate_unchecked(value: f32, xs: &[f32], ys: &[f32]) -> f32 {
    let last = xs.len() - 1;

    if value.is_nan() || value <= xs[0] {
        return ys[0];
    }
    if value >= xs[last] {
        return ys[last];
    }

    // Segment with xs[i] <= value < xs[i + 1]. The clamps above keep i in 0..last,
    // and a value on a keyframe lands at the start of its segment.
    let i = xs.partition_point(|&x| x <= value) - 1;
    let (y0, y1) = (ys[i], ys[i + 1]);

    let y = y0 + (value - xs[i]) * (y1 - y0) / (xs[i + 1] - xs[i]);
    y.max(y0.min(y1)).min(y0.max(y1))
}

/// An immutable, validated keyframe table for one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTable {
    hours: Vec<f32>,
    opacities: Vec<f32>,
}

impl KeyframeTable {
    /// Builds a table from control points.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidCurveConfiguration` if there are fewer than two
    /// points, hours are not strictly increasing or fall outside `[0, 24)`, or an
    /// opacity falls outside `[0, 1]`.
    pub fn new(points: &[Keyframe]) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::InvalidCurveConfiguration(format!(
                "a keyframe table needs at least 2 points (got {})",
                points.len()
            )));
        }

        for point in points {
            if !point.hour.is_finite() || !(0.0..24.0).contains(&point.hour) {
                return Err(CurveError::InvalidCurveConfiguration(format!(
                    "keyframe hour {} is outside [0, 24)",
                    point.hour
                )));
            }
            if !point.opacity.is_finite() || !(0.0..=1.0).contains(&point.opacity) {
                return Err(CurveError::InvalidCurveConfiguration(format!(
                    "keyframe opacity {} is outside [0, 1]",
                    point.opacity
                )));
            }
        }

        if let Some(pair) = points.windows(2).find(|pair| pair[1].hour <= pair[0].hour) {
            return Err(CurveError::InvalidCurveConfiguration(format!(
                "keyframe hours must be strictly increasing ({} is followed by {})",
                pair[0].hour, pair[1].hour
            )));
        }

        Ok(Self {
            hours: points.iter().map(|p| p.hour).collect(),
            opacities: points.iter().map(|p| p.opacity).collect(),
        })
    }

    /// Returns the opacity for the given hour.
    #[must_use]
    pub fn sample(&self, hour: f32) -> f32 { interpolate_unchecked(hour, &self.hours, &self.opacities) }

    #[must_use]
    pub fn hours(&self) -> &[f32] { &self.hours }

    #[must_use]
    pub fn opacities(&self) -> &[f32] { &self.opacities }

    /// Returns the number of control points.
    #[must_use]
    pub fn len(&self) -> usize { self.hours.len() }

    /// Always `false`: a valid table has at least two points.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.hours.is_empty() }
}
