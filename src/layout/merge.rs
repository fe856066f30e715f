//! Merging text lines and rules into reading order.

use std::cmp::Ordering;

use serde::Serialize;

use crate::layout::{HorizontalLine, TextBlock};

/// One item of a page's merged content sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageContent {
    /// A reconstructed text line.
    Text(TextBlock),
    /// A detected horizontal rule.
    Rule(HorizontalLine),
}

impl PageContent {
    /// Vertical position in document space; the merge key.
    pub fn y(&self) -> f32 {
        match self {
            PageContent::Text(block) => block.y,
            PageContent::Rule(line) => line.y,
        }
    }
}

/// Combine a page's text blocks and rules into one sequence sorted
/// top-to-bottom.
///
/// The sort is stable: items with equal `y` keep their input order
/// (text before rules, each stream in encounter order); ties are not
/// otherwise broken.
pub fn merge_page_content(
    blocks: Vec<TextBlock>,
    rules: Vec<HorizontalLine>,
) -> Vec<PageContent> {
    let mut content: Vec<PageContent> = blocks
        .into_iter()
        .map(PageContent::Text)
        .chain(rules.into_iter().map(PageContent::Rule))
        .collect();

    content.sort_by(|a, b| a.y().partial_cmp(&b.y()).unwrap_or(Ordering::Equal));
    content
}
