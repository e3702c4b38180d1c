//! hexpack — embed an image in a C header as RGB565 data.
//!
//! ## Usage
//!
//! ```bash
//! # Pattern-compressed header, written to ./logo.h
//! hexpack logo.png
//!
//! # Plain hex dump
//! hexpack logo.png --variant raw
//!
//! # Colour macros, custom identifier and output path
//! hexpack logo.png -v palette -n splash -o include/splash.h
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use hx_compactor::{HeaderPipeline, Variant};
use hx_core::{ConverterConfig, PixelBuffer};

#[derive(Parser, Debug)]
#[command(name = "hexpack")]
#[command(version)]
#[command(about = "Convert an image to a C header of RGB565 data", long_about = None)]
struct Args {
    /// Image to convert
    input: PathBuf,

    /// Header layout (raw, palette, pattern)
    #[arg(short, long, default_value = "pattern")]
    variant: Variant,

    /// Output path, defaults to <input stem>.h in the working directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Identifier prefix, defaults to the input file stem
    #[arg(short, long)]
    name: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Decode `path` and pack it as little-endian RGB565.
fn load_pixels(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    Ok(PixelBuffer::from_rgb8(width, height, img.as_raw())?)
}

/// `-o` when given, otherwise `<stem>.h` in the working directory.
fn output_path(args: &Args, stem: &str) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{stem}.h")))
}

fn run(args: &Args) -> Result<PathBuf> {
    let config = match &args.config {
        Some(path) => ConverterConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ConverterConfig::default(),
    };

    let stem = args
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input path has no file name")?;
    let name = args.name.as_deref().unwrap_or(stem);

    let pixels = load_pixels(&args.input)?;
    info!(
        "Loaded {} ({}x{}, {} bytes)",
        args.input.display(),
        pixels.width(),
        pixels.height(),
        pixels.as_bytes().len()
    );

    let pipeline = HeaderPipeline::with_config(args.variant, config)?;
    let result = pipeline.convert(&pixels, name)?;

    let output = output_path(args, stem);
    std::fs::write(&output, &result.output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        "  Variant: {}  macros: {}  literal bytes: {}  reduction: {:.1}%",
        result.variant,
        result.macros_defined,
        result.literal_bytes,
        result.reduction_pct()
    );
    info!("Header generated: {}", output.display());
    Ok(output)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    run(&args)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let img = RgbImage::from_fn(16, 8, |x, _| {
            if x < 8 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) }
        });
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }

    fn args(input: PathBuf, output: PathBuf, variant: Variant) -> Args {
        Args {
            input,
            variant,
            output: Some(output),
            name: None,
            config: None,
            log_level: "info".into(),
        }
    }

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from(["hexpack", "logo.png", "-v", "palette", "-n", "splash"]);
        assert_eq!(args.variant, Variant::Palette);
        assert_eq!(args.name.as_deref(), Some("splash"));
        assert!(args.output.is_none());
    }

    #[test]
    fn test_parse_args_default_variant() {
        let args = Args::parse_from(["hexpack", "logo.png"]);
        assert_eq!(args.variant, Variant::Pattern);
    }

    #[test]
    fn test_parse_args_bad_variant() {
        assert!(Args::try_parse_from(["hexpack", "logo.png", "-v", "gzip"]).is_err());
    }

    #[test]
    fn test_output_defaults_to_input_stem() {
        let args = Args::parse_from(["hexpack", "assets/bar-chart.png", "-n", "splash"]);
        assert_eq!(output_path(&args, "bar-chart"), PathBuf::from("bar-chart.h"));
    }

    #[test]
    fn test_output_explicit_path_wins() {
        let args = Args::parse_from(["hexpack", "bar-chart.png", "-o", "include/chart.h"]);
        assert_eq!(output_path(&args, "bar-chart"), PathBuf::from("include/chart.h"));
    }

    #[test]
    fn test_load_pixels_rgb565() {
        let dir = TempDir::new().unwrap();
        let path = write_png(dir.path(), "bars.png");
        let pixels = load_pixels(&path).unwrap();
        assert_eq!((pixels.width(), pixels.height()), (16, 8));
        assert_eq!(&pixels.as_bytes()[..2], &[0x00, 0xF8]);
        assert_eq!(&pixels.as_bytes()[16..18], &[0x1F, 0x00]);
    }

    #[test]
    fn test_load_pixels_missing_file() {
        assert!(load_pixels(Path::new("/nonexistent/image.png")).is_err());
    }

    #[test]
    fn test_run_writes_header() {
        let dir = TempDir::new().unwrap();
        let input = write_png(dir.path(), "bar-chart.png");
        for variant in [Variant::Raw, Variant::Palette, Variant::Pattern] {
            let out = dir.path().join(format!("{variant}.h"));
            let written = run(&args(input.clone(), out.clone(), variant)).unwrap();
            assert_eq!(written, out);
            let text = std::fs::read_to_string(&out).unwrap();
            assert!(text.contains("const uint16_t bar_chart_width  = 16;"));
            assert!(text.contains("const char bar_chart_data[] PROGMEM ="));
        }
    }

    #[test]
    fn test_run_with_config_and_name() {
        let dir = TempDir::new().unwrap();
        let input = write_png(dir.path(), "bars.png");
        let config = dir.path().join("hexpack.json");
        std::fs::write(&config, r#"{"pattern":{"symbol_prefix":"BARS_"}}"#).unwrap();

        let out = dir.path().join("out.h");
        let mut a = args(input, out.clone(), Variant::Pattern);
        a.config = Some(config);
        a.name = Some("icon".into());
        run(&a).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.contains("#define BARS_0 \""));
        assert!(text.contains("#ifndef _icon_H_"));
    }

    #[test]
    fn test_run_bad_config() {
        let dir = TempDir::new().unwrap();
        let input = write_png(dir.path(), "bars.png");
        let config = dir.path().join("bad.json");
        std::fs::write(&config, r#"{"pattern":{"min_len":3}}"#).unwrap();

        let mut a = args(input, dir.path().join("out.h"), Variant::Pattern);
        a.config = Some(config);
        assert!(run(&a).is_err());
    }
}
