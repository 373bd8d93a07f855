//! `pasos-manage optimize-images`: shrink gallery photos for the web.
//!
//! Each `.jpg`/`.jpeg`/`.png` in the input directory is scaled down to fit
//! `--max-width` (never up) and re-encoded: JPEG at `--quality`, except PNGs
//! with transparency, which stay PNG. `--webp` also writes a lossless WebP.

use std::collections::HashSet;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};

use crate::cli::OptimizeImagesArgs;

const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
const DEFAULT_OUTPUT_SUBDIR: &str = "optimized";

#[derive(Debug, Clone, Copy)]
pub struct OptimizeOptions {
    pub max_width: u32,
    pub quality: u8,
    pub webp: bool,
}

/// Result for one source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedImage {
    pub source: PathBuf,
    pub output: PathBuf,
    pub webp: Option<PathBuf>,
    pub original_bytes: u64,
    pub optimized_bytes: u64,
}

#[derive(Debug, Default)]
pub struct OptimizeSummary {
    pub images: Vec<OptimizedImage>,
    pub skipped: Vec<PathBuf>,
}

impl OptimizeSummary {
    pub fn original_bytes(&self) -> u64 {
        self.images.iter().map(|i| i.original_bytes).sum()
    }

    pub fn optimized_bytes(&self) -> u64 {
        self.images.iter().map(|i| i.optimized_bytes).sum()
    }
}

pub fn run(args: OptimizeImagesArgs) -> anyhow::Result<()> {
    let output_dir = args
        .output
        .unwrap_or_else(|| args.input_dir.join(DEFAULT_OUTPUT_SUBDIR));
    let options = OptimizeOptions {
        max_width: args.max_width,
        quality: args.quality,
        webp: args.webp,
    };

    let summary = optimize_dir(&args.input_dir, &output_dir, options)?;

    for image in &summary.images {
        println!(
            "{} -> {}: {} -> {} bytes ({})",
            image.source.display(),
            image.output.display(),
            image.original_bytes,
            image.optimized_bytes,
            format_savings(image.original_bytes, image.optimized_bytes),
        );
    }
    println!(
        "{} optimised, {} skipped. Total {} -> {} bytes ({})",
        summary.images.len(),
        summary.skipped.len(),
        summary.original_bytes(),
        summary.optimized_bytes(),
        format_savings(summary.original_bytes(), summary.optimized_bytes()),
    );
    Ok(())
}

/// Optimise every supported image directly inside `input_dir`.
///
/// Unreadable or undecodable files are logged and listed as skipped. Outputs
/// are named by file stem, so a later source sharing a stem with an earlier
/// one (`hero.jpg`, `hero.png`) is skipped rather than overwriting it.
pub fn optimize_dir(
    input_dir: &Path,
    output_dir: &Path,
    options: OptimizeOptions,
) -> anyhow::Result<OptimizeSummary> {
    let mut sources: Vec<PathBuf> = fs::read_dir(input_dir)
        .with_context(|| format!("Cannot read input directory {}", input_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_supported(path))
        .collect();
    sources.sort();

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Cannot create output directory {}", output_dir.display()))?;

    let mut summary = OptimizeSummary::default();
    let mut claimed_stems = HashSet::new();
    for source in sources {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !claimed_stems.insert(stem) {
            tracing::warn!(source = %source.display(), "Output name already taken, skipping image");
            summary.skipped.push(source);
            continue;
        }
        match optimize_file(&source, output_dir, options) {
            Ok(image) => {
                tracing::info!(
                    source = %image.source.display(),
                    original_bytes = image.original_bytes,
                    optimized_bytes = image.optimized_bytes,
                    "Image optimised"
                );
                summary.images.push(image);
            }
            Err(e) => {
                tracing::warn!(source = %source.display(), error = %e, "Skipping image");
                summary.skipped.push(source);
            }
        }
    }
    Ok(summary)
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

pub fn optimize_file(
    source: &Path,
    output_dir: &Path,
    options: OptimizeOptions,
) -> anyhow::Result<OptimizedImage> {
    let original_bytes = fs::metadata(source)?.len();
    let image = ImageReader::open(source)?.with_guessed_format()?.decode()?;
    let image = fit_width(image, options.max_width);

    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .context("Image file name is not valid UTF-8")?;

    let (bytes, extension) = if image.color().has_alpha() && is_png(source) {
        (encode_png(&image)?, "png")
    } else {
        (encode_jpeg(&image, options.quality)?, "jpg")
    };
    let output = output_dir.join(format!("{stem}.{extension}"));
    fs::write(&output, &bytes)?;

    let webp = if options.webp {
        let path = output_dir.join(format!("{stem}.webp"));
        fs::write(&path, encode_webp(&image)?)?;
        Some(path)
    } else {
        None
    };

    Ok(OptimizedImage {
        source: source.to_path_buf(),
        output,
        webp,
        original_bytes,
        optimized_bytes: bytes.len() as u64,
    })
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// Scale down to `max_width`, preserving aspect ratio. Never upscales.
pub fn fit_width(image: DynamicImage, max_width: u32) -> DynamicImage {
    if max_width == 0 || image.width() <= max_width {
        return image;
    }
    image.resize(max_width, image.height(), FilterType::Lanczos3)
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> anyhow::Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    // JPEG has no alpha channel.
    DynamicImage::ImageRgb8(image.to_rgb8())
        .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))?;
    Ok(buf.into_inner())
}

fn encode_png(image: &DynamicImage) -> anyhow::Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image.to_rgba8()).write_with_encoder(PngEncoder::new(&mut buf))?;
    Ok(buf.into_inner())
}

fn encode_webp(image: &DynamicImage) -> anyhow::Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
    rgba.write_with_encoder(WebPEncoder::new_lossless(&mut buf))?;
    Ok(buf.into_inner())
}

/// `"-12.3%"` style change from `original` to `optimized`.
pub fn format_savings(original: u64, optimized: u64) -> String {
    if original == 0 {
        return "n/a".to_string();
    }
    let change = (optimized as f64 - original as f64) / original as f64 * 100.0;
    format!("{change:+.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn options(max_width: u32, webp: bool) -> OptimizeOptions {
        OptimizeOptions {
            max_width,
            quality: 80,
            webp,
        }
    }

    fn write_rgb(path: &Path, w: u32, h: u32) {
        RgbImage::from_fn(w, h, |x, y| Rgb([(x % 255) as u8, (y % 255) as u8, 128]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn fit_width_downscales_preserving_aspect() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(400, 200));
        let out = fit_width(img, 100);
        assert_eq!((out.width(), out.height()), (100, 50));
    }

    #[test]
    fn fit_width_never_upscales() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(80, 60));
        let out = fit_width(img, 100);
        assert_eq!((out.width(), out.height()), (80, 60));
    }

    #[test]
    fn jpeg_and_opaque_png_become_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        write_rgb(&dir.path().join("studio.png"), 300, 150);
        write_rgb(&dir.path().join("class.jpg"), 120, 90);

        let summary = optimize_dir(dir.path(), &out_dir, options(200, false)).unwrap();
        assert_eq!(summary.images.len(), 2);
        assert!(summary.skipped.is_empty());

        let resized = image::open(out_dir.join("studio.jpg")).unwrap();
        assert_eq!((resized.width(), resized.height()), (200, 100));
        let untouched = image::open(out_dir.join("class.jpg")).unwrap();
        assert_eq!(untouched.width(), 120);
    }

    #[test]
    fn transparent_png_stays_png_and_webp_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(50, 50, Rgba([255, 0, 0, 100]))
            .save(dir.path().join("logo.png"))
            .unwrap();

        let out_dir = dir.path().join("out");
        let summary = optimize_dir(dir.path(), &out_dir, options(1600, true)).unwrap();
        let image = &summary.images[0];
        assert_eq!(image.output, out_dir.join("logo.png"));
        assert_eq!(image.webp.as_deref(), Some(out_dir.join("logo.webp").as_path()));
        assert!(image::open(out_dir.join("logo.png")).unwrap().color().has_alpha());
        assert!(out_dir.join("logo.webp").exists());
    }

    #[test]
    fn unreadable_files_are_skipped_and_others_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.jpg"), b"not an image").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();

        let summary =
            optimize_dir(dir.path(), &dir.path().join("out"), options(1600, false)).unwrap();
        assert!(summary.images.is_empty());
        assert_eq!(summary.skipped, vec![dir.path().join("broken.jpg")]);
    }

    #[test]
    fn sources_sharing_a_stem_do_not_overwrite_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        write_rgb(&dir.path().join("hero.jpg"), 120, 90);
        write_rgb(&dir.path().join("hero.png"), 300, 150);

        let summary = optimize_dir(dir.path(), &out_dir, options(1600, false)).unwrap();
        assert_eq!(summary.images.len(), 1);
        assert_eq!(summary.images[0].source, dir.path().join("hero.jpg"));
        assert_eq!(summary.skipped, vec![dir.path().join("hero.png")]);

        let written = image::open(out_dir.join("hero.jpg")).unwrap();
        assert_eq!(written.width(), 120);
        assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 1);
    }

    #[test]
    fn savings_formatting() {
        assert_eq!(format_savings(1000, 250), "-75.0%");
        assert_eq!(format_savings(100, 110), "+10.0%");
        assert_eq!(format_savings(0, 10), "n/a");
    }
}
