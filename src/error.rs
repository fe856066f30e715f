//! Error types for the pdf2docx library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdf2docx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not resolve to a readable document.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("document is encrypted")]
    Encrypted,

    /// Page number is out of range.
    #[error("page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// Error extracting text content from a page.
    #[error("text extraction error: {0}")]
    TextExtract(String),

    /// Error extracting vector graphics from a page.
    #[error("graphics extraction error: {0}")]
    GraphicsExtract(String),

    /// The destination document could not be assembled or written.
    #[error("DOCX assembly error: {0}")]
    DocxWrite(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
