//! JSON documents printed by the CLI.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::detector::GroundDetection;
use crate::geometry::GroundRect;

#[derive(Debug, Clone, Serialize)]
pub struct GroundReport {
    pub found: bool,
    pub horizon: i32,
    pub ground_rect: GroundRect,
}

impl From<&GroundDetection> for GroundReport {
    fn from(detection: &GroundDetection) -> Self {
        Self {
            // true whenever a horizon row was produced, fallback included
            found: true,
            horizon: detection.horizon_y,
            ground_rect: detection.ground_rect,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub error: String,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Compact single-line layout with `": "` and `", "` separators.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), SpacedFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(serializer.into_inner()).map_err(serde::ser::Error::custom)
}
