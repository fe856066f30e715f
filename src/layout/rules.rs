//! Horizontal-rule detection from path-construction events.
//!
//! A near-flat `lineTo` segment or a thin filled rectangle is taken as
//! a visual rule. Bézier curves only move the current point; everything
//! else is ignored.

use serde::Serialize;

use crate::extract::{PathEvent, Point};
use crate::layout::LayoutOptions;

/// A detected horizontal rule, in document coordinates (top-left
/// origin, Y increasing downward).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizontalLine {
    pub y: f32,
    pub x1: f32,
    pub x2: f32,
}

/// Stateful detector for one page's event stream.
pub struct RuleDetector {
    current: Option<Point>,
    page_height: f32,
    segment_flatness: f32,
    bar_thickness: f32,
}

impl RuleDetector {
    /// Create a detector for a page of the given media-box height.
    pub fn new(page_height: f32, options: &LayoutOptions) -> Self {
        Self {
            current: None,
            page_height,
            segment_flatness: options.segment_flatness,
            bar_thickness: options.bar_thickness,
        }
    }

    /// Feed one event; returns a rule when the event completes one.
    pub fn handle(&mut self, event: &PathEvent) -> Option<HorizontalLine> {
        match event {
            PathEvent::MoveTo(p) => {
                self.current = Some(*p);
                None
            }
            PathEvent::LineTo(p) => {
                let detected = self.current.and_then(|start| {
                    if (start.y - p.y).abs() < self.segment_flatness {
                        Some(HorizontalLine {
                            y: self.page_height - p.y,
                            x1: start.x.min(p.x),
                            x2: start.x.max(p.x),
                        })
                    } else {
                        None
                    }
                });
                // Current point advances whether or not the segment
                // classified as a rule.
                self.current = Some(*p);
                detected
            }
            PathEvent::CurveTo(p) => {
                self.current = Some(*p);
                None
            }
            PathEvent::Rect(corners) => {
                let (p0, p2) = (corners[0], corners[2]);
                if (p0.y - p2.y).abs() < self.bar_thickness {
                    let mid = (p0.y + p2.y) / 2.0;
                    Some(HorizontalLine {
                        y: self.page_height - mid,
                        x1: p0.x.min(p2.x),
                        x2: p0.x.max(p2.x),
                    })
                } else {
                    None
                }
            }
            PathEvent::Other => None,
        }
    }
}

/// Run the detector over a page's full event stream.
pub fn detect_rules<'a, I>(events: I, page_height: f32, options: &LayoutOptions) -> Vec<HorizontalLine>
where
    I: IntoIterator<Item = &'a PathEvent>,
{
    let mut detector = RuleDetector::new(page_height, options);
    events
        .into_iter()
        .filter_map(|event| detector.handle(event))
        .collect()
}
