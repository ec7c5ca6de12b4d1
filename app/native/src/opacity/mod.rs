//! Time-of-day opacity computation.
//!
//! Maps the hour of day to one opacity per wallpaper layer using piecewise-linear
//! keyframe tables.

pub mod clock;
pub mod curve;
pub mod keyframes;

pub use clock::{Clock, FixedClock, SystemClock};
pub use curve::{
    LAYER_COUNT, Layer, LayerCurve, OVERLAY1_KEYFRAMES, OVERLAY2_KEYFRAMES, OpacityCurve,
    OpacityVector,
};
pub use keyframes::{CurveError, Keyframe, KeyframeTable, interpolate};
