//! Preview loading and fit-to-box scaling

use crate::constants::PREVIEW_MAX_DIM;
use crate::error::{AppError, Result};
use image::imageops::FilterType;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A downscaled copy of an image on disk, ready for upload as a texture
#[derive(Clone)]
pub struct Preview {
    pub source: PathBuf,
    pub image: RgbaImage,
    pub original_size: (u32, u32),
}

/// Uniformly scale `(width, height)` so the longer side equals `max_dim`.
///
/// Small images are scaled up as well; both sides stay at least 1.
pub fn fit_dimensions(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let (width, height, max) = (width as u64, height as u64, max_dim as u64);
    let (w, h) = if width >= height {
        (max, height * max / width)
    } else {
        (width * max / height, max)
    };
    let w = (w as u32).max(1);
    let h = (h as u32).max(1);
    (w, h)
}

pub fn load_preview(path: &Path) -> Result<Preview> {
    let img = image::open(path)?;
    let original_size = (img.width(), img.height());
    let (w, h) = fit_dimensions(original_size.0, original_size.1, PREVIEW_MAX_DIM);
    if w == 0 {
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{} has no pixels", path.display()),
        )));
    }
    let image = image::imageops::resize(&img.to_rgba8(), w, h, FilterType::Lanczos3);
    debug!(
        path = %path.display(),
        from = ?original_size,
        to = ?(w, h),
        "Preview loaded"
    );
    Ok(Preview {
        source: path.to_path_buf(),
        image,
        original_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_fits(w: u32, h: u32) {
        let (rw, rh) = fit_dimensions(w, h, PREVIEW_MAX_DIM);
        assert!(rw.max(rh) <= PREVIEW_MAX_DIM, "{}x{} -> {}x{}", w, h, rw, rh);
        let expected = w as f64 / h as f64;
        let got = rw as f64 / rh as f64;
        // One pixel of truncation on the short side
        let tolerance = expected / rh as f64 + 1.0 / rh as f64;
        assert!(
            (expected - got).abs() <= tolerance,
            "{}x{} -> {}x{} ratio {} vs {}",
            w, h, rw, rh, expected, got
        );
    }

    #[test]
    fn preview_fits_box_and_keeps_aspect() {
        for (w, h) in [
            (300, 200),
            (200, 300),
            (4000, 3000),
            (1920, 1080),
            (10, 10),
            (401, 7),
            (1, 1000),
            (399, 400),
        ] {
            assert_fits(w, h);
        }
    }

    #[test]
    fn longer_side_hits_max() {
        assert_eq!(fit_dimensions(300, 200, 400), (400, 266));
        assert_eq!(fit_dimensions(800, 800, 400), (400, 400));
        assert_eq!(fit_dimensions(0, 5, 400), (0, 0));
    }

    #[test]
    fn loads_and_scales_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbaImage::from_pixel(800, 200, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let preview = load_preview(&path).unwrap();
        assert_eq!(preview.original_size, (800, 200));
        assert_eq!(preview.image.dimensions(), (400, 100));
        assert_eq!(preview.source, path);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"not really a png").unwrap();
        assert!(load_preview(&path).is_err());
        assert!(load_preview(&dir.path().join("missing.png")).is_err());
    }
}
