//! PDF parsing: backend access and page layout reconstruction.

mod backend;
mod layout;

pub use backend::{
    decode_text_simple, ContentOp, LopdfBackend, PageFonts, PageId, PdfBackend, PdfValue,
};
pub use layout::{LayoutAnalyzer, LayoutSource, PageLayout, TextBlock, TextLine, TextSpan};

use std::path::Path;

use crate::error::Result;

/// Open a PDF file and prepare it for layout analysis.
pub fn open_file<P: AsRef<Path>>(path: P) -> Result<LayoutAnalyzer<LopdfBackend>> {
    let backend = LopdfBackend::load_file(path)?;
    Ok(LayoutAnalyzer::new(backend))
}

/// Open a PDF held in memory and prepare it for layout analysis.
pub fn open_bytes(data: &[u8]) -> Result<LayoutAnalyzer<LopdfBackend>> {
    let backend = LopdfBackend::load_bytes(data)?;
    Ok(LayoutAnalyzer::new(backend))
}
