//! PDF backend abstraction layer.
//!
//! [`PdfBackend`] is the seam between the concrete PDF library (lopdf) and
//! the span walker in [`super::layout`]. Tests drive the walker through
//! hand-written backends without building real documents.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object};

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Font resource name (key in the page's `/Font` dictionary) to base font name.
pub type PageFonts = HashMap<Vec<u8>, String>;

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Numeric value, if this operand is a number.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    /// Numeric operand at `idx`, or `default` when missing or not a number.
    pub fn number(&self, idx: usize, default: f32) -> f32 {
        self.operands
            .get(idx)
            .and_then(PdfValue::as_f32)
            .unwrap_or(default)
    }
}

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// All pages as (1-based page number, PageId), in page order.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Base font names of the fonts referenced by a page.
    fn page_fonts(&self, page: PageId) -> Result<PageFonts>;

    /// Decompressed content stream bytes for a page.
    ///
    /// Pages without a `/Contents` entry yield an empty stream.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a string operand with the encoding of `font` on `page`.
    ///
    /// Falls back to [`decode_text_simple`] when the font or its encoding is
    /// unavailable.
    fn decode_text(&self, page: PageId, font: &[u8], bytes: &[u8]) -> String;
}

/// Decoding used when no font encoding is available.
///
/// Tries UTF-16BE (with BOM), then UTF-8, then Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// [`PdfBackend`] backed by `lopdf::Document`.
///
/// The document is owned by the backend and released when it is dropped.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    ///
    /// The header is checked first so non-PDF input fails with
    /// [`Error::UnknownFormat`] instead of a parser error.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;
        let doc = LopdfDocument::load(path)?;
        Ok(Self { doc })
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc })
    }

    fn stream_content(&self, obj: &Object) -> Result<Vec<u8>> {
        let stream = match obj {
            Object::Reference(r) => self.doc.get_object(*r)?.as_stream()?,
            Object::Stream(s) => s,
            _ => return Err(Error::PdfParse("Invalid content stream".to_string())),
        };
        stream
            .decompressed_content()
            .or_else(|_| Ok(stream.content.clone()))
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_fonts(&self, page: PageId) -> Result<PageFonts> {
        let fonts = self.doc.get_page_fonts(page)?;

        Ok(fonts
            .into_iter()
            .map(|(name, dict)| {
                let base_font = dict
                    .get(b"BaseFont")
                    .and_then(Object::as_name)
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&name).to_string());
                (name, base_font)
            })
            .collect())
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page)?;

        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        match contents {
            Object::Array(parts) => {
                let mut content = Vec::new();
                for part in parts {
                    match self.stream_content(part) {
                        Ok(data) => {
                            content.extend_from_slice(&data);
                            content.push(b'\n');
                        }
                        Err(e) => log::debug!("Skipping unreadable content part: {}", e),
                    }
                }
                Ok(content)
            }
            other => self.stream_content(other),
        }
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content = lopdf::content::Content::decode(data)?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operands: op.operands.iter().map(convert_object).collect(),
                operator: op.operator,
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font: &[u8], bytes: &[u8]) -> String {
        self.doc
            .get_page_fonts(page)
            .ok()
            .and_then(|fonts| {
                let dict = fonts.get(font)?;
                let encoding = dict.get_font_encoding(&self.doc).ok()?;
                LopdfDocument::decode_text(&encoding, bytes).ok()
            })
            .unwrap_or_else(|| decode_text_simple(bytes))
    }
}

fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Overview"), "Overview");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        let bytes = [0x52, 0xE9, 0x73, 0x75, 0x6D, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Résumé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x31];
        assert_eq!(decode_text_simple(&bytes), "H1");
    }

    #[test]
    fn test_content_op_number() {
        let op = ContentOp::new(
            "Tf",
            vec![PdfValue::Name(b"F1".to_vec()), PdfValue::Real(14.5)],
        );
        assert_eq!(op.number(1, 12.0), 14.5);
        assert_eq!(op.number(0, 12.0), 12.0);
        assert_eq!(op.number(5, 1.0), 1.0);
        assert_eq!(PdfValue::Integer(18).as_f32(), Some(18.0));
    }

    #[test]
    fn test_load_bytes_rejects_non_pdf() {
        assert!(matches!(
            LopdfBackend::load_bytes(b"plain text, not a pdf"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_load_bytes_rejects_truncated_pdf() {
        let result = LopdfBackend::load_bytes(b"%PDF-1.4\n1 0 obj\n<<");
        assert!(result.is_err());
    }
}
