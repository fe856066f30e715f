//! Path-construction event extraction from page content streams.
//!
//! Only the handful of operators the rule detector cares about are
//! surfaced as distinct events; path-painting operators collapse into a
//! single ignored variant.

use crate::error::Result;
use crate::extract::object_number;

/// A point in page coordinates (origin bottom-left, Y increasing upward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A low-level path-construction event.
///
/// Curves carry only their end point; rule detection never classifies
/// them, but they still move the current point.
#[derive(Debug, Clone, PartialEq)]
pub enum PathEvent {
    /// `m`: begin a new subpath.
    MoveTo(Point),
    /// `l`: straight segment from the current point.
    LineTo(Point),
    /// `c`/`v`/`y`: Bézier segment; end point only.
    CurveTo(Point),
    /// `re`: axis-aligned rectangle, four corners in drawing order.
    Rect([Point; 4]),
    /// Any path-painting or clipping operator. Ignored downstream.
    Other,
}

/// Walk a page's content stream and collect path events in order.
pub(super) fn extract_path_events(content: &[u8]) -> Result<Vec<PathEvent>> {
    let content = lopdf::content::Content::decode(content)
        .map_err(|e| crate::error::Error::PdfParse(e.to_string()))?;

    let mut events = Vec::new();
    for op in content.operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "m" => {
                if let Some(p) = point_at(operands, 0) {
                    events.push(PathEvent::MoveTo(p));
                }
            }
            "l" => {
                if let Some(p) = point_at(operands, 0) {
                    events.push(PathEvent::LineTo(p));
                }
            }
            // Full Bézier: x1 y1 x2 y2 x3 y3
            "c" => {
                if let Some(p) = point_at(operands, 4) {
                    events.push(PathEvent::CurveTo(p));
                }
            }
            // Shorthand Béziers: both end in x3 y3
            "v" | "y" => {
                if let Some(p) = point_at(operands, 2) {
                    events.push(PathEvent::CurveTo(p));
                }
            }
            "re" => {
                if operands.len() >= 4 {
                    let x = object_number(&operands[0]);
                    let y = object_number(&operands[1]);
                    let w = object_number(&operands[2]);
                    let h = object_number(&operands[3]);
                    if let (Some(x), Some(y), Some(w), Some(h)) = (x, y, w, h) {
                        events.push(PathEvent::Rect([
                            Point::new(x, y),
                            Point::new(x + w, y),
                            Point::new(x + w, y + h),
                            Point::new(x, y + h),
                        ]));
                    }
                }
            }
            // Painting and clipping operators: no geometry of interest.
            "h" | "S" | "s" | "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" | "n" | "W" | "W*"
            | "sh" | "Do" => {
                events.push(PathEvent::Other);
            }
            _ => {}
        }
    }

    Ok(events)
}

fn point_at(operands: &[lopdf::Object], index: usize) -> Option<Point> {
    let x = object_number(operands.get(index)?)?;
    let y = object_number(operands.get(index + 1)?)?;
    Some(Point::new(x, y))
}
