//! Document assembly: mapping merged page content onto the Word
//! document model.
//!
//! The output model is deliberately narrow: styled single-run
//! paragraphs, bottom-border rule paragraphs, and page breaks. The
//! horizontal extents of detected rules are not propagated; a rule is
//! recorded only as present, a known limitation of the reconstruction.

use std::fs::File;
use std::path::Path;

use docx_rs::{
    BreakType, Docx, Paragraph, ParagraphBorder, ParagraphBorderPosition, ParagraphBorders, Run,
};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::layout::PageContent;

/// Border weight of a rule paragraph, in eighths of a point.
pub const RULE_BORDER_WEIGHT: usize = 6;
/// Spacing between a rule border and its paragraph, in points.
pub const RULE_BORDER_SPACE: usize = 1;
/// Rule border color.
pub const RULE_BORDER_COLOR: &str = "000000";

/// One structural element of the output document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParagraphSpec {
    /// A paragraph holding one styled text run.
    Text {
        text: String,
        /// Font size in half-points, as the Word format measures it.
        size_half_points: usize,
        bold: bool,
        italic: bool,
    },
    /// An empty paragraph with a bottom border, standing in for a
    /// horizontal rule.
    Rule,
    /// A paragraph whose single run forces a page break.
    PageBreak,
}

/// Flatten per-page merged content into the document's paragraph
/// sequence, inserting a page break before every page except the first.
pub fn document_paragraphs(pages: &[Vec<PageContent>]) -> Vec<ParagraphSpec> {
    let mut specs = Vec::new();

    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            specs.push(ParagraphSpec::PageBreak);
        }
        for item in page {
            match item {
                PageContent::Text(block) => specs.push(ParagraphSpec::Text {
                    text: block.text.clone(),
                    size_half_points: (block.font_size * 2.0).round() as usize,
                    bold: block.bold,
                    italic: block.italic,
                }),
                PageContent::Rule(_) => specs.push(ParagraphSpec::Rule),
            }
        }
    }

    specs
}

/// Assemble the in-memory Word document.
pub fn build_docx(specs: &[ParagraphSpec]) -> Docx {
    let mut docx = Docx::new();
    for spec in specs {
        docx = docx.add_paragraph(spec_paragraph(spec));
    }
    docx
}

/// Assemble and write the document package to disk.
pub fn write_docx<P: AsRef<Path>>(specs: &[ParagraphSpec], path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    build_docx(specs)
        .build()
        .pack(file)
        .map_err(|e| Error::DocxWrite(e.to_string()))?;
    Ok(())
}

fn spec_paragraph(spec: &ParagraphSpec) -> Paragraph {
    match spec {
        ParagraphSpec::Text {
            text,
            size_half_points,
            bold,
            italic,
        } => {
            let mut run = Run::new().add_text(text.as_str()).size(*size_half_points);
            if *bold {
                run = run.bold();
            }
            if *italic {
                run = run.italic();
            }
            Paragraph::new().add_run(run)
        }
        ParagraphSpec::Rule => Paragraph::new().set_borders(
            ParagraphBorders::with_empty().set(
                ParagraphBorder::new(ParagraphBorderPosition::Bottom)
                    .size(RULE_BORDER_WEIGHT)
                    .space(RULE_BORDER_SPACE)
                    .color(RULE_BORDER_COLOR.to_string()),
            ),
        ),
        ParagraphSpec::PageBreak => {
            Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
        }
    }
}
