//! The conversion pipeline: open a PDF, reconstruct every page, write
//! the Word document.
//!
//! Page-level extraction failures are downgraded to warnings so one
//! malformed page does not sink the whole document; opening the input
//! and writing the output stay fatal.

use std::path::Path;

use crate::docx::{document_paragraphs, write_docx, ParagraphSpec};
use crate::error::{Error, Result};
use crate::extract::PdfSource;
use crate::layout::{
    accumulate_lines, detect_rules, merge_page_content, LayoutOptions, PageContent,
};

/// Options controlling a conversion run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    pub layout: LayoutOptions,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the layout thresholds.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }
}

/// What a completed conversion produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    pub page_count: usize,
    pub paragraph_count: usize,
}

/// Convert `input` to a Word document at `output` with default options.
pub fn convert_file<P, Q>(input: P, output: Q) -> Result<ConvertSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    convert_file_with_options(input.as_ref(), output.as_ref(), &ConvertOptions::default())
}

/// Convert `input` to a Word document at `output`.
pub fn convert_file_with_options(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConvertSummary> {
    let source = open_source(input)?;
    let specs = extract_paragraphs_from(&source, options);
    write_docx(&specs, output)?;

    // Page count comes from the source document, not the emitted
    // sequence: a page may legitimately produce no paragraphs.
    Ok(ConvertSummary {
        page_count: source.page_count(),
        paragraph_count: specs.len(),
    })
}

/// Run the reconstruction without writing a document, returning the
/// paragraph sequence that would be emitted.
pub fn extract_paragraphs<P: AsRef<Path>>(
    input: P,
    options: &ConvertOptions,
) -> Result<Vec<ParagraphSpec>> {
    Ok(extract_paragraphs_from(
        &open_source(input.as_ref())?,
        options,
    ))
}

fn open_source(input: &Path) -> Result<PdfSource> {
    if !input.exists() {
        return Err(Error::InputNotFound(input.to_path_buf()));
    }
    PdfSource::open(input)
}

fn extract_paragraphs_from(source: &PdfSource, options: &ConvertOptions) -> Vec<ParagraphSpec> {
    document_paragraphs(&reconstruct_pages(source, options))
}

/// Reconstruct every page's merged content, in page order.
pub fn reconstruct_pages(source: &PdfSource, options: &ConvertOptions) -> Vec<Vec<PageContent>> {
    (0..source.page_count())
        .map(|index| reconstruct_page(source, index, options))
        .collect()
}

/// Reconstruct one page. Extraction errors empty the affected stream
/// and log a warning instead of propagating.
pub fn reconstruct_page(
    source: &PdfSource,
    page_index: usize,
    options: &ConvertOptions,
) -> Vec<PageContent> {
    let blocks = match source.glyph_runs(page_index) {
        Ok(runs) => accumulate_lines(runs, &options.layout),
        Err(e) => {
            log::warn!("page {}: text extraction failed: {}", page_index + 1, e);
            Vec::new()
        }
    };

    let rules = match source.path_events(page_index) {
        Ok(events) => detect_rules(
            &events,
            source.page_height(page_index).unwrap_or(crate::extract::DEFAULT_PAGE_HEIGHT),
            &options.layout,
        ),
        Err(e) => {
            log::warn!("page {}: graphics extraction failed: {}", page_index + 1, e);
            Vec::new()
        }
    };

    log::debug!(
        "page {}: {} text lines, {} rules",
        page_index + 1,
        blocks.len(),
        rules.len()
    );

    merge_page_content(blocks, rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_reported_before_parsing() {
        let err = convert_file("/no/such/file.pdf", "/tmp/out.docx").unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)));
    }

    #[test]
    fn test_options_builder() {
        let options = ConvertOptions::new().with_layout(LayoutOptions::new().with_bar_thickness(4.0));
        assert_eq!(options.layout.bar_thickness, 4.0);
    }
}
