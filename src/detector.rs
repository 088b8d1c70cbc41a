use std::f64::consts::PI;
use std::path::Path;

use log::{debug, info};
use opencv::{
    core::{Mat, Scalar, Size, Vec4i, Vector, BORDER_DEFAULT},
    imgproc::{self, COLOR_BGR2GRAY},
    prelude::*,
};

use crate::error::Result;
use crate::geometry::{estimate_horizon, GroundRect, HorizonSource, MAX_HORIZONTAL_SLOPE};
use crate::utils::{draw_horizon, to_segments, write_debug_image};

/// Debug artifact written by the CLI, relative to the working directory.
pub const DEBUG_IMAGE_PATH: &str = "processed_ground.jpg";

/// Fixed parameters of the blur / Canny / Hough pipeline.
#[derive(Debug, Clone)]
pub struct DetectorParams {
    pub blur_kernel: i32,
    pub canny_low: f64,
    pub canny_high: f64,
    pub canny_aperture: i32,
    pub hough_rho: f64,
    pub hough_theta: f64,
    pub hough_threshold: i32,
    pub min_line_length: f64,
    pub max_line_gap: f64,
    pub max_slope: f64,
    pub line_color: Scalar,
    pub line_thickness: i32,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            blur_kernel: 5,
            canny_low: 50.0,
            canny_high: 150.0,
            canny_aperture: 3,
            hough_rho: 1.0,
            hough_theta: PI / 180.0,
            hough_threshold: 50,
            min_line_length: 50.0,
            max_line_gap: 10.0,
            max_slope: MAX_HORIZONTAL_SLOPE,
            // BGR green
            line_color: Scalar::new(0.0, 255.0, 0.0, 0.0),
            line_thickness: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundDetection {
    pub horizon_y: i32,
    pub ground_rect: GroundRect,
    pub source: HorizonSource,
}

pub struct HorizonDetector {
    params: DetectorParams,
}

impl Default for HorizonDetector {
    fn default() -> Self {
        Self::new(DetectorParams::default())
    }
}

impl HorizonDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Edge map of `image`: grayscale, Gaussian blur, Canny.
    pub fn edges(&self, image: &Mat) -> Result<Mat> {
        let p = &self.params;

        let mut gray = Mat::default();
        imgproc::cvt_color(image, &mut gray, COLOR_BGR2GRAY, 0)?;

        let mut blurred = Mat::default();
        imgproc::gaussian_blur(
            &gray,
            &mut blurred,
            Size::new(p.blur_kernel, p.blur_kernel),
            0.0,
            0.0,
            BORDER_DEFAULT,
        )?;

        let mut edges = Mat::default();
        imgproc::canny(
            &blurred,
            &mut edges,
            p.canny_low,
            p.canny_high,
            p.canny_aperture,
            false,
        )?;
        Ok(edges)
    }

    /// Probabilistic Hough segments over an edge map.
    pub fn line_segments(&self, edges: &Mat) -> Result<Vector<Vec4i>> {
        let p = &self.params;
        let mut lines = Vector::<Vec4i>::new();
        imgproc::hough_lines_p(
            edges,
            &mut lines,
            p.hough_rho,
            p.hough_theta,
            p.hough_threshold,
            p.min_line_length,
            p.max_line_gap,
        )?;
        Ok(lines)
    }

    /// Estimate the horizon of `image` and the ground rectangle below it.
    ///
    /// The horizon is drawn onto `image` and the result written to
    /// `debug_path`, replacing any existing file.
    pub fn detect_ground(&self, image: &mut Mat, debug_path: &Path) -> Result<GroundDetection> {
        let (height, width) = (image.rows(), image.cols());

        let edges = self.edges(image)?;
        let lines = self.line_segments(&edges)?;
        let segments = to_segments(&lines);
        debug!("Hough produced {} segments", segments.len());

        let estimate = estimate_horizon(&segments, height, self.params.max_slope);
        match estimate.source {
            HorizonSource::Lines { count } => info!(
                "Horizon at row {} from {} near-horizontal segments",
                estimate.horizon_y, count
            ),
            HorizonSource::Fallback => info!(
                "No near-horizontal segments, horizon falls back to row {}",
                estimate.horizon_y
            ),
        }

        let ground_rect = GroundRect::below(estimate.horizon_y, width, height);

        draw_horizon(
            image,
            estimate.horizon_y,
            self.params.line_color,
            self.params.line_thickness,
        )?;
        write_debug_image(debug_path, image)?;

        Ok(GroundDetection {
            horizon_y: estimate.horizon_y,
            ground_rect,
            source: estimate.source,
        })
    }
}

/// [`HorizonDetector::detect_ground`] with default parameters.
pub fn detect_ground(image: &mut Mat, debug_path: &Path) -> Result<GroundDetection> {
    HorizonDetector::default().detect_ground(image, debug_path)
}
