//! Self-contained PDF blobs stored in `Lecture::pdf_url`.
//!
//! The whole document is embedded as a base64 data URL; there is no external
//! file to manage, at the cost of row size growing with the document.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::error::Error;
use std::fmt::{Display, Formatter};

const PDF_DATA_URL_PREFIX: &str = "data:application/pdf;base64,";

#[derive(Debug)]
pub enum PdfBlobError {
    /// Not a `data:application/pdf;base64,` URL.
    MissingPrefix,
    InvalidBase64(base64::DecodeError),
}

impl Display for PdfBlobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPrefix => write!(f, "value is not a base64 PDF data URL"),
            Self::InvalidBase64(err) => write!(f, "invalid base64 PDF payload: {err}"),
        }
    }
}

impl Error for PdfBlobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingPrefix => None,
            Self::InvalidBase64(err) => Some(err),
        }
    }
}

/// Encodes raw PDF bytes as a data URL.
pub fn encode_pdf_data_url(bytes: &[u8]) -> String {
    let mut url = String::with_capacity(PDF_DATA_URL_PREFIX.len() + bytes.len().div_ceil(3) * 4);
    url.push_str(PDF_DATA_URL_PREFIX);
    STANDARD.encode_string(bytes, &mut url);
    url
}

/// Decodes a data URL produced by [`encode_pdf_data_url`] back to bytes.
pub fn decode_pdf_data_url(url: &str) -> Result<Vec<u8>, PdfBlobError> {
    let payload = url
        .strip_prefix(PDF_DATA_URL_PREFIX)
        .ok_or(PdfBlobError::MissingPrefix)?;
    STANDARD.decode(payload).map_err(PdfBlobError::InvalidBase64)
}

#[cfg(test)]
mod tests {
    use super::{decode_pdf_data_url, encode_pdf_data_url, PdfBlobError};

    #[test]
    fn encoded_blob_is_self_describing() {
        let url = encode_pdf_data_url(b"%PDF-1.7\n");
        assert!(url.starts_with("data:application/pdf;base64,"));
        assert_eq!(decode_pdf_data_url(&url).unwrap(), b"%PDF-1.7\n");
    }

    #[test]
    fn external_urls_are_rejected() {
        let err = decode_pdf_data_url("https://example.com/slides.pdf").unwrap_err();
        assert!(matches!(err, PdfBlobError::MissingPrefix));
    }

    #[test]
    fn corrupt_payload_is_rejected() {
        let err = decode_pdf_data_url("data:application/pdf;base64,@@@").unwrap_err();
        assert!(matches!(err, PdfBlobError::InvalidBase64(_)));
    }
}
