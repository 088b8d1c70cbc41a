pub mod detector;
pub mod error;
pub mod geometry;
pub mod report;
pub mod utils;

pub use detector::{
    detect_ground, DetectorParams, GroundDetection, HorizonDetector, DEBUG_IMAGE_PATH,
};
pub use error::DetectError;
pub use geometry::{GroundRect, HorizonSource, LineSegment};
