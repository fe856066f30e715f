//! Logical-line reconstruction from positioned glyph runs.
//!
//! Glyph runs arrive in paint order. Runs whose baselines stay within
//! half a font size of the pending line are treated as continuations;
//! a larger vertical jump closes the line. The pending line is an
//! explicit value folded over the run sequence, not hidden mutable
//! state.

use serde::Serialize;

use crate::extract::GlyphRun;
use crate::layout::LayoutOptions;

/// One reconstructed logical line of text on a page.
///
/// `y` is in document space. The recorded style is whatever the last
/// glyph run on the line carried; see [`accumulate_lines`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub y: f32,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
}

/// The line being accumulated, before it is trimmed and emitted.
#[derive(Debug, Clone)]
struct PendingLine {
    buffer: String,
    y: f32,
    font_size: f32,
    bold: bool,
    italic: bool,
}

impl PendingLine {
    fn start(run: GlyphRun) -> Self {
        let (bold, italic) = infer_style(&run.font_name);
        Self {
            buffer: run.text,
            y: run.y,
            font_size: run.font_size,
            bold,
            italic,
        }
    }

    /// Append a continuation run. The line's recorded position and
    /// style track the last run seen, not a majority or first-run
    /// policy.
    fn extend(&mut self, run: GlyphRun) {
        let (bold, italic) = infer_style(&run.font_name);
        self.buffer.push_str(&run.text);
        self.y = run.y;
        self.font_size = run.font_size;
        self.bold = bold;
        self.italic = italic;
    }

    fn accepts(&self, run: &GlyphRun, merge_factor: f32) -> bool {
        (run.y - self.y).abs() <= self.font_size * merge_factor
    }

    /// Trim and convert to a block; whitespace-only lines are dropped.
    fn into_block(self) -> Option<TextBlock> {
        let text = self.buffer.trim();
        if text.is_empty() {
            return None;
        }
        Some(TextBlock {
            text: text.to_string(),
            y: self.y,
            font_size: self.font_size,
            bold: self.bold,
            italic: self.italic,
        })
    }
}

/// Group a page's glyph runs into logical text lines.
///
/// Only a vertical-position jump starts a new line; formatting changes
/// alone never do.
pub fn accumulate_lines<I>(runs: I, options: &LayoutOptions) -> Vec<TextBlock>
where
    I: IntoIterator<Item = GlyphRun>,
{
    let mut blocks = Vec::new();

    let pending = runs.into_iter().fold(None::<PendingLine>, |state, run| {
        Some(match state {
            None => PendingLine::start(run),
            Some(mut line) => {
                if line.accepts(&run, options.line_merge_factor) {
                    line.extend(run);
                    line
                } else {
                    if let Some(block) = line.into_block() {
                        blocks.push(block);
                    }
                    PendingLine::start(run)
                }
            }
        })
    });

    // Page end: flush whatever is still pending.
    if let Some(block) = pending.and_then(PendingLine::into_block) {
        blocks.push(block);
    }

    blocks
}

/// Infer bold/italic from the font name.
///
/// These are substring heuristics over font names, not font-descriptor
/// flags: "bold" marks bold, "italic" or "oblique" marks italic,
/// case-insensitively.
fn infer_style(font_name: &str) -> (bool, bool) {
    let name = font_name.to_lowercase();
    let bold = name.contains("bold");
    let italic = name.contains("italic") || name.contains("oblique");
    (bold, italic)
}
