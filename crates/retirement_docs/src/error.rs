//! Document-extraction error taxonomy, separate from the simulation
//! engine's own errors: field-level low-confidence results are not
//! errors here, only surfaced via `ExtractedDocument::low_confidence_fields`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("PDF_PARSE_FAILED: no extractable text (image-based PDF?)")]
    PdfParseFailed,
    #[error("PDF_FORM_UNRECOGNIZED: no form template scored above the identification threshold")]
    FormUnrecognized,
}

pub type Result<T> = std::result::Result<T, DocumentError>;
