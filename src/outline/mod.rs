//! Outline inference.
//!
//! The pipeline runs in four forward-only stages:
//!
//! 1. [`FragmentExtractor`] flattens page layouts into [`TextFragment`]s.
//! 2. [`FontHierarchy`] maps the four largest distinct sizes to title/H1/H2/H3.
//! 3. [`HeadingClassifier`] keeps fragments with a heading shape and a tier size.
//! 4. The assembler picks the title and deduplicates headings.
//!
//! Documents that cannot be opened or contain no text degrade to
//! [`OutlineResult::empty`] in the non-`try_` entry points.

mod assembler;
mod classifier;
mod extractor;
mod hierarchy;
mod options;

pub use assembler::{assemble, dedup_headings, extract_title};
pub use classifier::{is_title_text, is_upper_text, HeadingClassifier, Rejection};
pub use extractor::FragmentExtractor;
pub use hierarchy::{FontHierarchy, FontStatistics, Tier};
pub use options::{
    ErrorMode, OutlineOptions, DEFAULT_MAX_FONT_SIZE, DEFAULT_MAX_HEADING_LENGTH,
    DEFAULT_MIN_FONT_SIZE, DEFAULT_MIN_HEADING_LENGTH,
};

use std::path::Path;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::model::{OutlineResult, TextFragment};
use crate::parser::{self, LayoutSource};

/// Extracts outlines from PDF documents.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: OutlineOptions,
}

impl OutlineExtractor {
    pub fn new(options: OutlineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Run hierarchy analysis, classification and assembly on fragments.
    ///
    /// An empty fragment list gives the empty result, not a file-stem title.
    pub fn build_outline(&self, fragments: &[TextFragment], document_name: &str) -> OutlineResult {
        if fragments.is_empty() {
            return OutlineResult::empty();
        }

        let stats = FontStatistics::from_fragments(fragments);
        let hierarchy = FontHierarchy::from_statistics(&stats);
        log::debug!(
            "{}: tiers {:?}, size frequency {:?}",
            document_name,
            hierarchy.populated().collect::<Vec<_>>(),
            stats.frequency_ranking()
        );

        let classifier = HeadingClassifier::new(&self.options);
        let title = extract_title(fragments, &hierarchy, &classifier);
        let headings = classifier.classify_all(fragments, &hierarchy);

        assemble(title, headings, document_name)
    }

    /// Extract an outline from any layout source.
    ///
    /// Fails with [`Error::EmptyDocument`] when no fragment survives extraction.
    pub fn try_extract_source<S: LayoutSource + ?Sized>(
        &self,
        source: &S,
        document_name: &str,
    ) -> Result<OutlineResult> {
        let fragments = FragmentExtractor::new(&self.options).extract(source)?;
        if fragments.is_empty() {
            return Err(Error::EmptyDocument);
        }
        Ok(self.build_outline(&fragments, document_name))
    }

    /// Extract an outline from a PDF file.
    pub fn try_extract_file<P: AsRef<Path>>(&self, path: P) -> Result<OutlineResult> {
        let path = path.as_ref();
        let analyzer = parser::open_file(path)?;
        self.try_extract_source(&analyzer, &document_name(path))
    }

    /// Extract an outline from PDF bytes. `document_name` is the title fallback.
    pub fn try_extract_bytes(&self, data: &[u8], document_name: &str) -> Result<OutlineResult> {
        let analyzer = parser::open_bytes(data)?;
        self.try_extract_source(&analyzer, document_name)
    }

    /// Extract an outline from a PDF file, degrading failures to the empty result.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> OutlineResult {
        let path = path.as_ref();
        let start = Instant::now();
        let result = self.try_extract_file(path);
        finish(&path.display().to_string(), result, start)
    }

    /// Extract an outline from PDF bytes, degrading failures to the empty result.
    pub fn extract_bytes(&self, data: &[u8], document_name: &str) -> OutlineResult {
        let start = Instant::now();
        let result = self.try_extract_bytes(data, document_name);
        finish(document_name, result, start)
    }
}

fn finish(label: &str, result: Result<OutlineResult>, start: Instant) -> OutlineResult {
    match result {
        Ok(outline) => {
            log::info!(
                "Processed {} in {:.2} seconds",
                label,
                start.elapsed().as_secs_f64()
            );
            outline
        }
        Err(Error::EmptyDocument) => {
            log::warn!("{}: no extractable text", label);
            OutlineResult::empty()
        }
        Err(e) => {
            log::error!("Error processing {}: {}", label, e);
            OutlineResult::empty()
        }
    }
}

/// File name without extension, used as the fallback title.
pub fn document_name<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
