use std::path::Path;

use log::{debug, warn};
use opencv::{
    core::{Mat, Point, Scalar, Vec4i, Vector},
    imgcodecs,
    imgproc::{self, LINE_8},
    prelude::*,
};

use crate::error::{DetectError, Result};
use crate::geometry::LineSegment;

/// Decode `path` as a 3-channel BGR image.
pub fn load_image(path: &Path) -> Result<Mat> {
    let decode_failure = || DetectError::DecodeFailure {
        path: path.display().to_string(),
    };

    let path_str = path.to_str().ok_or_else(decode_failure)?;
    let image = imgcodecs::imread(path_str, imgcodecs::IMREAD_COLOR)?;
    if image.empty() {
        return Err(decode_failure());
    }

    debug!(
        "Loaded {} ({}x{}, {} channels)",
        path.display(),
        image.cols(),
        image.rows(),
        image.channels()
    );
    Ok(image)
}

pub fn to_segments(lines: &Vector<Vec4i>) -> Vec<LineSegment> {
    lines
        .iter()
        .map(|l| {
            let [x1, y1, x2, y2] = l.0;
            LineSegment::new(x1, y1, x2, y2)
        })
        .collect()
}

/// Draw a full-width horizontal line at row `y`.
pub fn draw_horizon(image: &mut Mat, y: i32, color: Scalar, thickness: i32) -> Result<()> {
    let width = image.cols();
    imgproc::line(
        image,
        Point::new(0, y),
        Point::new(width, y),
        color,
        thickness,
        LINE_8,
        0,
    )?;
    Ok(())
}

/// Write `image` to `path`, format chosen by extension.
///
/// Returns whether the file was written. An encoder that declines the write
/// is only logged.
pub fn write_debug_image(path: &Path, image: &Mat) -> Result<bool> {
    let Some(path_str) = path.to_str() else {
        warn!("Debug image path is not valid UTF-8: {}", path.display());
        return Ok(false);
    };

    let written = imgcodecs::imwrite(path_str, image, &Vector::default())?;
    if written {
        debug!("Wrote debug image to {}", path.display());
    } else {
        warn!("Could not write debug image to {}", path.display());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Vec3b, VecN, CV_8UC3};

    #[test]
    fn converts_hough_output_to_segments() {
        let mut lines = Vector::<Vec4i>::new();
        lines.push(VecN([1, 2, 3, 4]));
        lines.push(VecN([10, 20, 30, 40]));

        let segments = to_segments(&lines);
        assert_eq!(
            segments,
            vec![LineSegment::new(1, 2, 3, 4), LineSegment::new(10, 20, 30, 40)]
        );
    }

    #[test]
    fn missing_file_is_a_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, DetectError::DecodeFailure { .. }));
    }

    #[test]
    fn garbage_file_is_a_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, DetectError::DecodeFailure { .. }));
    }

    #[test]
    fn draws_line_across_full_width() {
        let mut image =
            Mat::new_rows_cols_with_default(20, 30, CV_8UC3, Scalar::all(0.0)).unwrap();
        draw_horizon(&mut image, 10, Scalar::new(0.0, 255.0, 0.0, 0.0), 2).unwrap();

        let left = image.at_2d::<Vec3b>(10, 0).unwrap();
        let right = image.at_2d::<Vec3b>(10, 29).unwrap();
        let far = image.at_2d::<Vec3b>(0, 15).unwrap();
        assert_eq!(left.0, [0, 255, 0]);
        assert_eq!(right.0, [0, 255, 0]);
        assert_eq!(far.0, [0, 0, 0]);
    }

    #[test]
    fn written_debug_image_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.jpg");
        let image =
            Mat::new_rows_cols_with_default(12, 16, CV_8UC3, Scalar::all(90.0)).unwrap();

        assert!(write_debug_image(&path, &image).unwrap());
        let loaded = load_image(&path).unwrap();
        assert_eq!((loaded.rows(), loaded.cols()), (12, 16));
    }
}
