//! Layout reconstruction: glyph runs and path events become a single
//! top-to-bottom sequence of page content.
//!
//! Both inputs are expressed in document space (top-left origin) by the
//! time they reach this module, so the merge compares like with like.

mod lines;
mod merge;
mod rules;

pub use lines::{accumulate_lines, TextBlock};
pub use merge::{merge_page_content, PageContent};
pub use rules::{detect_rules, HorizontalLine, RuleDetector};

/// Empirical thresholds for layout reconstruction.
///
/// The defaults reproduce the tuning the reconstruction was validated
/// with; they are fields rather than inline literals so callers can
/// retune without patching the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    /// Vertical jumps up to `font_size * line_merge_factor` keep a glyph
    /// run on the current line.
    pub line_merge_factor: f32,

    /// Maximum |Δy| in page units for a `lineTo` segment to count as a
    /// horizontal rule.
    pub segment_flatness: f32,

    /// Maximum height in page units for a filled rectangle to count as a
    /// horizontal rule.
    pub bar_thickness: f32,
}

impl LayoutOptions {
    /// Create layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line-merge factor.
    pub fn with_line_merge_factor(mut self, factor: f32) -> Self {
        self.line_merge_factor = factor;
        self
    }

    /// Set the segment-flatness tolerance.
    pub fn with_segment_flatness(mut self, tolerance: f32) -> Self {
        self.segment_flatness = tolerance;
        self
    }

    /// Set the rectangle-thinness tolerance.
    pub fn with_bar_thickness(mut self, tolerance: f32) -> Self {
        self.bar_thickness = tolerance;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            line_merge_factor: 0.5,
            segment_flatness: 2.0,
            bar_thickness: 3.0,
        }
    }
}
