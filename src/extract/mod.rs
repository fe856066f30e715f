//! Adapter over the PDF engine (`lopdf`).
//!
//! `PdfSource` is the only place the crate touches `lopdf`. Per page it
//! exposes the two streams the layout pipeline consumes: positioned
//! glyph runs and low-level path-construction events, both derived from
//! the page's decoded content stream.

mod glyphs;
mod paths;

pub use glyphs::GlyphRun;
pub use paths::{PathEvent, Point};

use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// Media-box height assumed when a page carries no `MediaBox` entry
/// anywhere in its page-tree chain (US Letter, in points).
pub const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// A loaded PDF document exposing per-page content streams.
pub struct PdfSource {
    doc: LopdfDocument,
    /// Page object ids in page order.
    pages: Vec<ObjectId>,
}

impl PdfSource {
    /// Load a PDF document from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Ok(Self::from_document(doc))
    }

    /// Load a PDF document from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: LopdfDocument) -> Self {
        // get_pages is keyed by 1-based page number; BTreeMap iteration
        // yields them in page order.
        let pages = doc.get_pages().into_values().collect();
        Self { doc, pages }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Glyph runs for a page, in paint order, with baseline Y already
    /// converted to document space (top-left origin).
    pub fn glyph_runs(&self, page_index: usize) -> Result<Vec<GlyphRun>> {
        let page_id = self.page_id(page_index)?;
        let height = self.height_of(page_id);
        let content = self.page_content(page_id)?;
        glyphs::extract_glyph_runs(&self.doc, page_id, &content, height)
            .map_err(|e| Error::TextExtract(e.to_string()))
    }

    /// Path-construction events for a page, in page coordinates
    /// (PDF convention: origin bottom-left).
    pub fn path_events(&self, page_index: usize) -> Result<Vec<PathEvent>> {
        let page_id = self.page_id(page_index)?;
        let content = self.page_content(page_id)?;
        paths::extract_path_events(&content).map_err(|e| Error::GraphicsExtract(e.to_string()))
    }

    /// Media-box height of a page, for page-to-document Y conversion.
    pub fn page_height(&self, page_index: usize) -> Result<f32> {
        let page_id = self.page_id(page_index)?;
        Ok(self.height_of(page_id))
    }

    fn page_id(&self, page_index: usize) -> Result<ObjectId> {
        self.pages
            .get(page_index)
            .copied()
            .ok_or(Error::PageOutOfRange(page_index, self.pages.len()))
    }

    /// Resolve the media-box height, walking `Parent` links since the
    /// entry is inheritable in the page tree.
    fn height_of(&self, page_id: ObjectId) -> f32 {
        let mut current = page_id;
        for _ in 0..32 {
            let Ok(dict) = self.doc.get_dictionary(current) else {
                break;
            };
            if let Ok(obj) = dict.get(b"MediaBox") {
                if let Some(height) = media_box_height(&self.doc, obj) {
                    return height;
                }
            }
            match dict.get(b"Parent") {
                Ok(Object::Reference(parent)) => current = *parent,
                _ => break,
            }
        }
        DEFAULT_PAGE_HEIGHT
    }

    /// Fetch and concatenate the page's decoded content stream(s).
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = page_dict
            .get(b"Contents")
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| Error::PdfParse(e.to_string()));
                }
                Err(Error::PdfParse("invalid content stream".to_string()))
            }
            Object::Stream(s) => s
                .decompressed_content()
                .map_err(|e| Error::PdfParse(e.to_string())),
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("invalid content stream".to_string())),
        }
    }
}

/// Height of a `[x0 y0 x1 y1]` media box, dereferencing the array if
/// it is indirect.
fn media_box_height(doc: &LopdfDocument, obj: &Object) -> Option<f32> {
    let arr = match obj {
        Object::Array(arr) => arr.clone(),
        Object::Reference(r) => match doc.get_object(*r) {
            Ok(Object::Array(arr)) => arr.clone(),
            _ => return None,
        },
        _ => return None,
    };
    if arr.len() != 4 {
        return None;
    }
    let y0 = object_number(&arr[1])?;
    let y1 = object_number(&arr[3])?;
    Some((y1 - y0).abs())
}

/// Extract a number from a PDF object.
pub(crate) fn object_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
