//! `dynwall render`: composite a single frame to a file.
//!
//! Uses the same painting path as the daemon but writes the result to disk
//! instead of the desktop.

use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use image::RgbaImage;

use crate::compositor::{LayerSet, RasterCanvas, Rect, paint_frame};
use crate::config::{self, DynwallConfig};
use crate::error::DynwallError;
use crate::host::{PresentError, write_jpeg};
use crate::opacity::{Clock, FixedClock, Layer, OpacityCurve, OpacityVector, SystemClock};

/// Arguments of `dynwall render`.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct RenderArgs {
    /// Hour of day to render, 0-24. Fractions are allowed.
    /// Defaults to the current local time.
    #[arg(long, value_name = "HOUR")]
    pub hour: Option<f32>,

    /// Output width in pixels. Defaults to `output.width` from the config.
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Output height in pixels. Defaults to `output.height` from the config.
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// File to write. The extension selects the format (`.png`, `.jpg`).
    #[arg(long, short, value_name = "FILE")]
    pub output: PathBuf,
}

/// A frame written by [`render`].
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub path: PathBuf,
    pub hour: f32,
    pub opacities: OpacityVector,
}

/// Execute `dynwall render`.
///
/// # Errors
///
/// Returns an error if the arguments are out of range, the configuration or an
/// asset cannot be loaded, or the file cannot be written.
pub fn execute(args: &RenderArgs) -> Result<(), DynwallError> {
    let config = config::init()?;
    let rendered = render(args, config, &config::base_dir())?;

    println!(
        "{} {} {}",
        "Rendered".green(),
        rendered.path.display(),
        format!("at {:05.2}h", rendered.hour).dimmed()
    );
    for layer in Layer::ALL {
        println!("  {:<9} {:.3}", layer.name(), rendered.opacities.get(layer));
    }
    Ok(())
}

/// Paints one frame for `args` and writes it to `args.output`.
///
/// # Errors
///
/// See [`execute`].
pub fn render(
    args: &RenderArgs,
    config: &DynwallConfig,
    base_dir: &Path,
) -> Result<Rendered, DynwallError> {
    let hour = match args.hour {
        Some(hour) if (0.0..=24.0).contains(&hour) => hour,
        Some(hour) => {
            return Err(DynwallError::InvalidArguments(format!(
                "--hour must be between 0 and 24, got {hour}"
            )));
        }
        None => SystemClock::new(config.refresh.fractional_hours).hour_of_day(),
    };

    let width = args.width.unwrap_or(config.output.width);
    let height = args.height.unwrap_or(config.output.height);
    if width == 0 || height == 0 {
        return Err(DynwallError::InvalidArguments(
            "--width and --height must be greater than zero".to_string(),
        ));
    }

    let mut layers = LayerSet::load(&config.assets.resolve(base_dir))?;
    let curve = OpacityCurve::day_night()?;
    let mut canvas = RasterCanvas::new(width, height);
    let opacities = paint_frame(
        &mut canvas,
        Rect::from_size(width, height),
        &mut layers,
        &curve,
        &FixedClock::new(hour),
    );

    save_frame(canvas.pixels(), &args.output, config.output.quality)?;
    tracing::debug!(path = %args.output.display(), hour, width, height, "rendered frame");

    Ok(Rendered { path: args.output.clone(), hour, opacities })
}

/// Writes `pixels` to `path`, as JPEG for `.jpg`/`.jpeg` and by extension otherwise.
fn save_frame(pixels: &RgbaImage, path: &Path, quality: u8) -> Result<(), PresentError> {
    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));

    if is_jpeg {
        return write_jpeg(pixels, path, quality);
    }

    pixels.save(path).map_err(|e| PresentError::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
