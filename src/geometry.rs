//! Horizon geometry that does not touch pixels: segment filtering, midpoint
//! averaging, the fallback row and the ground rectangle.

use serde::Serialize;

/// Slope magnitude below which a segment counts as horizontal.
pub const MAX_HORIZONTAL_SLOPE: f64 = 0.2;

/// A detected straight segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// `|dy| < max_slope * |dx|`. Vertical and zero-length segments never pass.
    pub fn is_near_horizontal(&self, max_slope: f64) -> bool {
        let dy = (self.y2 - self.y1).abs() as f64;
        let dx = (self.x2 - self.x1).abs() as f64;
        dy < max_slope * dx
    }

    pub fn mid_y(&self) -> f64 {
        (self.y1 as f64 + self.y2 as f64) / 2.0
    }
}

/// Where a horizon row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizonSource {
    /// Averaged from this many near-horizontal segments.
    Lines { count: usize },
    /// No segment qualified; the two-thirds heuristic was used.
    Fallback,
}

impl HorizonSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, HorizonSource::Fallback)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonEstimate {
    pub horizon_y: i32,
    pub source: HorizonSource,
}

/// Full-width region from the horizon row down to the bottom edge.
///
/// Serialized as `[x, y, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "[i32; 4]")]
pub struct GroundRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl GroundRect {
    pub fn below(horizon_y: i32, width: i32, height: i32) -> Self {
        Self {
            x: 0,
            y: horizon_y,
            width,
            height: height - horizon_y,
        }
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

impl From<GroundRect> for [i32; 4] {
    fn from(rect: GroundRect) -> Self {
        [rect.x, rect.y, rect.width, rect.height]
    }
}

pub fn filter_horizontal(segments: &[LineSegment], max_slope: f64) -> Vec<LineSegment> {
    segments
        .iter()
        .copied()
        .filter(|s| s.is_near_horizontal(max_slope))
        .collect()
}

/// Mean of the segment midpoints, truncated toward zero.
pub fn average_mid_y(segments: &[LineSegment]) -> Option<i32> {
    if segments.is_empty() {
        return None;
    }
    let sum: f64 = segments.iter().map(LineSegment::mid_y).sum();
    Some((sum / segments.len() as f64) as i32)
}

/// Two thirds of the way down the frame.
pub fn fallback_horizon(height: i32) -> i32 {
    height * 2 / 3
}

pub fn estimate_horizon(segments: &[LineSegment], height: i32, max_slope: f64) -> HorizonEstimate {
    let horizontal = filter_horizontal(segments, max_slope);
    let (horizon_y, source) = match average_mid_y(&horizontal) {
        Some(y) => (
            y,
            HorizonSource::Lines {
                count: horizontal.len(),
            },
        ),
        None => (fallback_horizon(height), HorizonSource::Fallback),
    };

    HorizonEstimate {
        horizon_y: horizon_y.clamp(0, height.max(1) - 1),
        source,
    }
}
