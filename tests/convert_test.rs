//! End-to-end conversion tests over synthetic PDF documents.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use pdf2docx::{
    convert_file, extract_paragraphs, reconstruct_pages, ConvertOptions, Error, ParagraphSpec,
    PdfSource,
};

/// Build a minimal multi-page document; each entry is one page's
/// content-stream operations. US Letter media box, Helvetica as `F1`
/// and Helvetica-Bold as `FB`.
fn build_pdf(page_ops: Vec<Vec<Operation>>) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
            "FB" => bold_font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    let count = page_ops.len() as i64;
    for operations in page_ops {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

fn pdf_bytes(mut doc: Document) -> Vec<u8> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("serialize document");
    buffer
}

fn text_ops(font: &str, size: i64, x: i64, y: i64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

fn rule_ops(x1: i64, x2: i64, y: i64) -> Vec<Operation> {
    vec![
        Operation::new("m", vec![x1.into(), y.into()]),
        Operation::new("l", vec![x2.into(), y.into()]),
        Operation::new("S", vec![]),
    ]
}

/// Page 1: "Hello" at 12pt with a rule just below; page 2: "World" in
/// bold 10pt.
fn two_page_fixture() -> Document {
    let mut page1 = text_ops("F1", 12, 72, 782, "Hello");
    page1.extend(rule_ops(72, 300, 772));
    let page2 = text_ops("FB", 10, 72, 782, "World");
    build_pdf(vec![page1, page2])
}

#[test]
fn test_two_page_reconstruction() {
    let source = PdfSource::from_bytes(&pdf_bytes(two_page_fixture())).unwrap();
    let pages = reconstruct_pages(&source, &ConvertOptions::default());
    let specs = pdf2docx::document_paragraphs(&pages);

    assert_eq!(
        specs,
        vec![
            ParagraphSpec::Text {
                text: "Hello".to_string(),
                size_half_points: 24,
                bold: false,
                italic: false,
            },
            ParagraphSpec::Rule,
            ParagraphSpec::PageBreak,
            ParagraphSpec::Text {
                text: "World".to_string(),
                size_half_points: 20,
                bold: true,
                italic: false,
            },
        ]
    );
}

#[test]
fn test_rule_sorts_below_text_above_it() {
    // Text baseline at 782 maps to document y 10; the rule at 772 maps
    // to y 20 and must come second even though path ops could be walked
    // in either order.
    let mut page = rule_ops(72, 300, 772);
    page.extend(text_ops("F1", 12, 72, 782, "Heading"));
    let source = PdfSource::from_bytes(&pdf_bytes(build_pdf(vec![page]))).unwrap();

    let pages = reconstruct_pages(&source, &ConvertOptions::default());
    let specs = pdf2docx::document_paragraphs(&pages);
    assert!(matches!(specs[0], ParagraphSpec::Text { .. }));
    assert!(matches!(specs[1], ParagraphSpec::Rule));
}

#[test]
fn test_page_break_count_is_pages_minus_one() {
    let doc = build_pdf(vec![
        text_ops("F1", 12, 72, 700, "one"),
        text_ops("F1", 12, 72, 700, "two"),
        text_ops("F1", 12, 72, 700, "three"),
    ]);
    let source = PdfSource::from_bytes(&pdf_bytes(doc)).unwrap();

    let pages = reconstruct_pages(&source, &ConvertOptions::default());
    let specs = pdf2docx::document_paragraphs(&pages);
    let breaks = specs
        .iter()
        .filter(|s| matches!(s, ParagraphSpec::PageBreak))
        .count();
    assert_eq!(breaks, 2);
    assert!(!matches!(specs[0], ParagraphSpec::PageBreak));
}

#[test]
fn test_blank_page_contributes_only_its_break() {
    let doc = build_pdf(vec![text_ops("F1", 12, 72, 700, "content"), vec![]]);
    let source = PdfSource::from_bytes(&pdf_bytes(doc)).unwrap();

    let pages = reconstruct_pages(&source, &ConvertOptions::default());
    assert_eq!(pages.len(), 2);
    assert!(pages[1].is_empty());

    let specs = pdf2docx::document_paragraphs(&pages);
    assert_eq!(specs.len(), 2);
    assert!(matches!(specs[1], ParagraphSpec::PageBreak));
}

#[test]
fn test_conversion_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fixture.pdf");
    std::fs::write(&input, pdf_bytes(two_page_fixture())).unwrap();

    let first = extract_paragraphs(&input, &ConvertOptions::default()).unwrap();
    let second = extract_paragraphs(&input, &ConvertOptions::default()).unwrap();

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_convert_file_writes_docx_package() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fixture.pdf");
    let output = dir.path().join("fixture.docx");
    std::fs::write(&input, pdf_bytes(two_page_fixture())).unwrap();

    let summary = convert_file(&input, &output).unwrap();
    assert_eq!(summary.page_count, 2);
    assert_eq!(summary.paragraph_count, 4);

    // A .docx is a zip package.
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_summary_counts_contentless_pages() {
    // A single page with an empty content stream emits no paragraphs,
    // but the summary must still report the document's real page count.
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("blank.pdf");
    let output = dir.path().join("blank.docx");
    std::fs::write(&input, pdf_bytes(build_pdf(vec![vec![]]))).unwrap();

    let summary = convert_file(&input, &output).unwrap();
    assert_eq!(summary.page_count, 1);
    assert_eq!(summary.paragraph_count, 0);
}

#[test]
fn test_missing_input_reports_input_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_file(dir.path().join("absent.pdf"), dir.path().join("out.docx"))
        .unwrap_err();
    assert!(matches!(err, Error::InputNotFound(_)));
}
