//! # pdf2docx
//!
//! PDF to Word document conversion library for Rust.
//!
//! This library reconstructs the visible layout of a PDF (logical text
//! lines with bold/italic styling, and horizontal rules drawn as path
//! graphics) and rebuilds it as a Word (.docx) document with matching
//! paragraphs, rule borders, and page breaks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf2docx::convert_file;
//!
//! fn main() -> pdf2docx::Result<()> {
//!     let summary = convert_file("report.pdf", "report.docx")?;
//!     println!("{} pages, {} paragraphs", summary.page_count, summary.paragraph_count);
//!     Ok(())
//! }
//! ```
//!
//! ## How it works
//!
//! - **Text lines**: positioned glyph runs are grouped into lines by
//!   baseline proximity; bold and italic are inferred from font names
//! - **Rules**: near-horizontal `lineTo` segments and thin rectangles
//!   in the content stream become bottom-border paragraphs
//! - **Merge**: both streams are sorted top-to-bottom per page, and
//!   pages are separated by explicit page breaks
//! - **Resilience**: a page that fails to extract logs a warning and
//!   contributes no content instead of failing the conversion

pub mod convert;
pub mod docx;
pub mod error;
pub mod extract;
pub mod layout;

// Re-export commonly used types
pub use convert::{
    convert_file, convert_file_with_options, extract_paragraphs, reconstruct_page,
    reconstruct_pages, ConvertOptions, ConvertSummary,
};
pub use docx::{document_paragraphs, write_docx, ParagraphSpec};
pub use error::{Error, Result};
pub use extract::{GlyphRun, PathEvent, PdfSource, Point};
pub use layout::{
    accumulate_lines, detect_rules, merge_page_content, HorizontalLine, LayoutOptions, PageContent,
    TextBlock,
};
