//! Glyph-run extraction from page content streams.
//!
//! Walks the text-showing operators of a decoded content stream and
//! emits one [`GlyphRun`] per paint operation, carrying the baseline
//! position, effective font size, and the font's base name. Runs are
//! emitted in paint order, which is not guaranteed to be top-to-bottom;
//! line reconstruction happens later in [`crate::layout`].

use std::collections::{BTreeMap, HashMap};

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::Result;
use crate::extract::object_number;

/// TJ adjustments beyond this many 1/1000 text-space units are treated
/// as word spaces.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A positioned fragment of text produced by one text-painting operation.
///
/// `y` is in document space (top-left origin, increasing downward); the
/// extractor flips the PDF baseline coordinate by the media-box height so
/// text and graphics share one convention before merging.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun {
    /// Decoded text content.
    pub text: String,
    /// Baseline Y in document space.
    pub y: f32,
    /// Effective font size in points.
    pub font_size: f32,
    /// Base font name (e.g. "Helvetica-Bold").
    pub font_name: String,
}

/// Walk a page's content stream and collect glyph runs.
pub(super) fn extract_glyph_runs(
    doc: &LopdfDocument,
    page_id: ObjectId,
    content: &[u8],
    page_height: f32,
) -> Result<Vec<GlyphRun>> {
    let lopdf_fonts = doc
        .get_page_fonts(page_id)
        .map_err(|e| crate::error::Error::PdfParse(e.to_string()))?;

    // Resource name -> base font name, for style inference downstream.
    let mut base_names = HashMap::new();
    for (name, font) in &lopdf_fonts {
        let base = font
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        base_names.insert(name.clone(), base);
    }

    let content = lopdf::content::Content::decode(content)
        .map_err(|e| crate::error::Error::PdfParse(e.to_string()))?;

    let mut runs = Vec::new();
    let mut current_font = String::new();
    let mut current_font_name: Vec<u8> = Vec::new();
    let mut current_font_size: f32 = 12.0;
    let mut matrix = TextMatrix::default();
    let mut in_text_block = false;

    for op in content.operations {
        match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                matrix = TextMatrix::default();
            }
            "ET" => {
                in_text_block = false;
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Object::Name(font_name) = &op.operands[0] {
                        current_font_name = font_name.clone();
                        current_font = base_names
                            .get(font_name.as_slice())
                            .cloned()
                            .unwrap_or_else(|| {
                                String::from_utf8_lossy(font_name.as_slice()).to_string()
                            });
                    }
                    current_font_size = object_number(&op.operands[1]).unwrap_or(12.0);
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = object_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = object_number(&op.operands[1]).unwrap_or(0.0);
                    matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    matrix.set(
                        object_number(&op.operands[0]).unwrap_or(1.0),
                        object_number(&op.operands[1]).unwrap_or(0.0),
                        object_number(&op.operands[2]).unwrap_or(0.0),
                        object_number(&op.operands[3]).unwrap_or(1.0),
                        object_number(&op.operands[4]).unwrap_or(0.0),
                        object_number(&op.operands[5]).unwrap_or(0.0),
                    );
                }
            }
            "T*" => {
                matrix.next_line();
            }
            "Tj" | "TJ" => {
                if in_text_block {
                    let text = decode_show_text(doc, &op, &current_font_name, &lopdf_fonts);
                    if !text.is_empty() {
                        runs.push(make_run(
                            text,
                            &matrix,
                            page_height,
                            current_font_size,
                            &current_font,
                        ));
                    }
                }
            }
            "'" | "\"" => {
                matrix.next_line();
                if in_text_block {
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let text = decode_string(doc, bytes, &current_font_name, &lopdf_fonts);
                        if !text.is_empty() {
                            runs.push(make_run(
                                text,
                                &matrix,
                                page_height,
                                current_font_size,
                                &current_font,
                            ));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    Ok(runs)
}

fn make_run(
    text: String,
    matrix: &TextMatrix,
    page_height: f32,
    font_size: f32,
    font_name: &str,
) -> GlyphRun {
    let (_, baseline) = matrix.position();
    GlyphRun {
        text,
        y: page_height - baseline,
        font_size: font_size * matrix.scale(),
        font_name: font_name.to_string(),
    }
}

/// Decode the operand of a `Tj` or `TJ` operator.
///
/// For `TJ`, string elements are concatenated; negative positioning
/// adjustments larger than [`TJ_SPACE_THRESHOLD`] become a single space,
/// since fonts commonly encode word gaps as kerning.
fn decode_show_text(
    doc: &LopdfDocument,
    op: &lopdf::content::Operation,
    font_name: &[u8],
    fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
) -> String {
    if op.operator == "TJ" {
        let Some(Object::Array(arr)) = op.operands.first() else {
            return String::new();
        };
        let mut combined = String::new();
        for item in arr {
            match item {
                Object::String(bytes, _) => {
                    combined.push_str(&decode_string(doc, bytes, font_name, fonts));
                }
                Object::Integer(n) => {
                    if -(*n as f32) > TJ_SPACE_THRESHOLD {
                        push_space(&mut combined);
                    }
                }
                Object::Real(n) => {
                    if -n > TJ_SPACE_THRESHOLD {
                        push_space(&mut combined);
                    }
                }
                _ => {}
            }
        }
        combined
    } else {
        match op.operands.first() {
            Some(Object::String(bytes, _)) => decode_string(doc, bytes, font_name, fonts),
            _ => String::new(),
        }
    }
}

fn push_space(buf: &mut String) {
    if !buf.is_empty() && !buf.ends_with(' ') && !buf.ends_with('\u{00A0}') {
        buf.push(' ');
    }
}

/// Decode a PDF string through the current font's encoding, falling
/// back to byte-level guessing when the font carries none.
fn decode_string(
    doc: &LopdfDocument,
    bytes: &[u8],
    font_name: &[u8],
    fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
) -> String {
    let encoding = fonts
        .get(font_name)
        .and_then(|f| f.get_font_encoding(doc).ok());

    match encoding {
        Some(enc) => LopdfDocument::decode_text(&enc, bytes).unwrap_or_default(),
        None => decode_text_simple(bytes),
    }
}

/// Text matrix tracking the baseline position across positioning ops.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default leading; TL is not tracked.
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Byte-level text decoding when no font encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Latin-1 fallback
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_matrix_translate() {
        let mut m = TextMatrix::default();
        m.translate(72.0, 700.0);
        assert_eq!(m.position(), (72.0, 700.0));
        m.translate(0.0, -14.0);
        assert_eq!(m.position(), (72.0, 686.0));
    }

    #[test]
    fn test_text_matrix_scale() {
        let mut m = TextMatrix::default();
        assert!((m.scale() - 1.0).abs() < f32::EPSILON);
        m.set(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
        assert!((m.scale() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_decode_text_simple_utf16() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_decode_text_simple_ascii() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_push_space_collapses() {
        let mut s = String::from("word");
        push_space(&mut s);
        push_space(&mut s);
        assert_eq!(s, "word ");

        let mut empty = String::new();
        push_space(&mut empty);
        assert_eq!(empty, "");
    }
}
