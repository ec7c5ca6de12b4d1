//! Time sources for opacity computation.
//!
//! The compositor never reads the wall clock directly. It asks a [`Clock`] for the
//! hour of day, so rendering can be driven by a fixed hour in tests and one-shot
//! renders.

use chrono::{Local, Timelike};

/// Abstraction over where the hour of day comes from.
pub trait Clock {
    /// Returns the current hour of day in `[0, 24)`.
    fn hour_of_day(&self) -> f32;
}

/// Clock backed by the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    fractional: bool,
}

impl SystemClock {
    /// Reports whole hours (0-23), ignoring minutes.
    #[must_use]
    pub const fn whole_hours() -> Self { Self { fractional: false } }

    /// Reports `hour + minute / 60`, giving smooth transitions within an hour.
    #[must_use]
    pub const fn fractional_hours() -> Self { Self { fractional: true } }

    #[must_use]
    pub const fn new(fractional: bool) -> Self { Self { fractional } }
}

impl Clock for SystemClock {
    #[allow(clippy::cast_precision_loss)]
    fn hour_of_day(&self) -> f32 {
        let now = Local::now();
        let hour = now.hour() as f32;
        if self.fractional {
            hour + now.minute() as f32 / 60.0
        } else {
            hour
        }
    }
}

/// Clock that always reports the same hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    hour: f32,
}

impl FixedClock {
    #[must_use]
    pub const fn new(hour: f32) -> Self { Self { hour } }
}

impl Clock for FixedClock {
    fn hour_of_day(&self) -> f32 { self.hour }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn hour_of_day(&self) -> f32 { (**self).hour_of_day() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_reports_its_hour() {
        assert_eq!(FixedClock::new(13.5).hour_of_day(), 13.5);
    }

    #[test]
    fn test_system_clock_whole_hours_are_integral() {
        let hour = SystemClock::whole_hours().hour_of_day();
        assert!((0.0..24.0).contains(&hour));
        assert_eq!(hour.fract(), 0.0);
    }

    #[test]
    fn test_system_clock_fractional_hours_in_range() {
        let hour = SystemClock::fractional_hours().hour_of_day();
        assert!((0.0..24.0).contains(&hour));
    }

    #[test]
    fn test_clock_reference_delegates() {
        fn read<C: Clock>(clock: C) -> f32 { clock.hour_of_day() }

        let clock = FixedClock::new(4.0);
        assert_eq!(read(&clock), 4.0);
    }
}
