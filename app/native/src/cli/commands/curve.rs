//! `dynwall curve`: print the opacity of every layer for each hour of the day.

use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::error::DynwallError;
use crate::opacity::{Clock, LAYER_COUNT, Layer, OpacityCurve, SystemClock};

/// Opacities of one hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveSample {
    pub hour: u8,
    pub base: f32,
    pub overlay1: f32,
    pub overlay2: f32,
    /// Paint alphas, `floor(opacity * 255)`.
    pub alpha: [u8; LAYER_COUNT],
}

/// Samples `curve` at every whole hour, 0 through 23.
#[must_use]
pub fn sample_day(curve: &OpacityCurve) -> Vec<CurveSample> {
    (0..24u8)
        .map(|hour| {
            let opacities = curve.opacities_at(f32::from(hour));
            CurveSample {
                hour,
                base: opacities.get(Layer::Base),
                overlay1: opacities.get(Layer::Overlay1),
                overlay2: opacities.get(Layer::Overlay2),
                alpha: opacities.to_alpha(),
            }
        })
        .collect()
}

/// Execute `dynwall curve`.
///
/// # Errors
///
/// Returns an error if the keyframe tables are invalid or the samples cannot be
/// serialized.
pub fn execute(json: bool) -> Result<(), DynwallError> {
    let curve = OpacityCurve::day_night()?;
    let samples = sample_day(&curve);

    if json {
        output::print_highlighted_json(&serde_json::to_value(&samples)?);
        return Ok(());
    }

    println!("{}", "Layer opacity by hour".bold());
    println!("{}", render_table(&samples, SystemClock::whole_hours().hour_of_day()));
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn render_table(samples: &[CurveSample], current_hour: f32) -> String {
    #[derive(Tabled)]
    struct CurveRow {
        #[tabled(rename = "Hour")]
        hour: String,
        #[tabled(rename = "Base")]
        base: String,
        #[tabled(rename = "Overlay 1")]
        overlay1: String,
        #[tabled(rename = "Overlay 2")]
        overlay2: String,
        #[tabled(rename = "Alpha")]
        alpha: String,
        #[tabled(rename = "Now")]
        now: String,
    }

    let current = current_hour as u8;
    let rows = samples.iter().map(|s| CurveRow {
        hour: format!("{:02}:00", s.hour),
        base: format!("{:.2}", s.base),
        overlay1: format!("{:.2}", s.overlay1),
        overlay2: format!("{:.2}", s.overlay2),
        alpha: format!("{} / {} / {}", s.alpha[0], s.alpha[1], s.alpha[2]),
        now: if s.hour == current { output::format_bool(true) } else { String::new() },
    });

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..5)).with(Alignment::right()))
        .with(Modify::new(Columns::new(5..6)).with(Alignment::center()))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<CurveSample> { sample_day(&OpacityCurve::day_night().unwrap()) }

    #[test]
    fn test_sample_day_covers_every_hour() {
        let samples = samples();
        assert_eq!(samples.len(), 24);
        assert_eq!(samples.first().unwrap().hour, 0);
        assert_eq!(samples.last().unwrap().hour, 23);
        assert!(samples.iter().all(|s| (s.base - 1.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_sample_day_midnight_and_afternoon() {
        let samples = samples();
        assert_eq!(samples[0].alpha, [255, 216, 76]);
        assert_eq!(samples[15].alpha, [255, 0, 0]);
    }

    #[test]
    fn test_sample_serializes_camel_case() {
        let value = serde_json::to_value(&samples()[15]).unwrap();
        assert_eq!(value["hour"], 15);
        assert_eq!(value["alpha"], serde_json::json!([255, 0, 0]));
        assert!(value.get("overlay1").is_some());
    }

    #[test]
    fn test_render_table_lists_every_hour() {
        let table = render_table(&samples(), 6.0);

        assert!(table.contains("Overlay 1"));
        assert!(table.contains("00:00"));
        assert!(table.contains("23:00"));
        assert!(table.contains("255 / 216 / 76"));
        assert_eq!(table.matches('✓').count(), 1);
    }
}
