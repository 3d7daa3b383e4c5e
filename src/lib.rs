//! # pdf-outline
//!
//! Infers a document outline (title plus H1/H2/H3 headings with page
//! numbers) from PDF files using typographic signals only: font sizes and
//! the shape of the text. Bookmarks and metadata are ignored.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_outline, to_json, JsonFormat};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let outline = extract_outline("document.pdf");
//!     println!("{}", to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## How headings are found
//!
//! - The four largest distinct font sizes become the title, H1, H2 and H3
//!   sizes.
//! - A text run is a heading when its size matches one of the H1-H3 sizes
//!   exactly and its text looks like a heading (not a page number, caption,
//!   URL or sentence-case body text).
//! - The title is the first heading-shaped run on page 1 at the title size,
//!   or the file name when there is none.
//!
//! Unreadable or text-less documents yield `{"title": "", "outline": []}`.

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{
    resolve_directories, BatchEvent, BatchObserver, BatchProcessor, BatchReport,
    DirectoryCandidates, LogObserver,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, FailureKind, Result};
pub use model::{
    validate_outline_json, Heading, HeadingLevel, OutlineResult, StyleFlags, TextFragment,
};
pub use outline::{ErrorMode, OutlineExtractor, OutlineOptions};
pub use render::{to_json, write_outline, JsonFormat};

use std::path::Path;

/// Extract the outline of a PDF file with default options.
///
/// Never fails: unreadable documents give the empty outline.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::extract_outline;
///
/// let outline = extract_outline("document.pdf");
/// for heading in &outline.outline {
///     println!("{} {} (p. {})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> OutlineResult {
    OutlineExtractor::default().extract_file(path)
}

/// Extract the outline of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::{extract_outline_with_options, OutlineOptions};
///
/// let options = OutlineOptions::new()
///     .lenient()
///     .with_max_heading_length(120);
/// let outline = extract_outline_with_options("document.pdf", options);
/// ```
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    options: OutlineOptions,
) -> OutlineResult {
    OutlineExtractor::new(options).extract_file(path)
}

/// Extract the outline of a PDF held in memory.
///
/// `document_name` is used as the title when no title text is found.
pub fn extract_outline_bytes(data: &[u8], document_name: &str) -> OutlineResult {
    OutlineExtractor::default().extract_bytes(data, document_name)
}

/// Extract the outline of a PDF file, returning failures instead of the
/// empty outline.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::{try_extract_outline, FailureKind};
///
/// match try_extract_outline("document.pdf") {
///     Ok(outline) => println!("{} headings", outline.heading_count()),
///     Err(e) if e.kind() == FailureKind::EmptyDocument => println!("no text"),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn try_extract_outline<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    OutlineExtractor::default().try_extract_file(path)
}

/// Extract the outline of a PDF file and write it as pretty JSON.
pub fn extract_outline_to_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<()> {
    let outline = extract_outline(input);
    write_outline(&outline, output, JsonFormat::Pretty)
}
