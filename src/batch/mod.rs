//! Batch processing of PDF directories.
//!
//! Every `*.pdf` in the input directory is processed independently and its
//! outline written to `<output>/<stem>.json`. Documents run in parallel on
//! the rayon pool unless [`OutlineOptions::parallel`] is off. A failure in
//! one document never affects the others.
//!
//! Progress is reported through a [`BatchObserver`]; [`LogObserver`]
//! forwards events to the `log` facade.
//!
//! [`OutlineOptions::parallel`]: crate::outline::OutlineOptions::parallel

mod dirs;

pub use dirs::{resolve_directories, DirectoryCandidates, DirectorySource, ResolvedDirectories};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::{Error, FailureKind, Result};
use crate::outline::{document_name, OutlineExtractor};
use crate::render::{write_outline, JsonFormat};

/// Progress events emitted during a batch run.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    /// PDFs were discovered and processing is about to start
    Started { input: PathBuf, total: usize },
    /// The input directory holds no PDFs
    NoFiles { input: PathBuf },
    /// One document was written
    FileDone(FileOutcome),
    /// One document could not be written
    FileFailed(FileFailure),
    /// All documents were handled
    Finished { succeeded: usize, total: usize },
}

/// Receives [`BatchEvent`]s. Called from worker threads.
pub trait BatchObserver: Send + Sync {
    fn on_event(&self, event: &BatchEvent);
}

impl<F> BatchObserver for F
where
    F: Fn(&BatchEvent) + Send + Sync,
{
    fn on_event(&self, event: &BatchEvent) {
        self(event)
    }
}

/// Observer that logs every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl BatchObserver for LogObserver {
    fn on_event(&self, event: &BatchEvent) {
        match event {
            BatchEvent::Started { input, total } => {
                log::info!("Found {} PDF files in {}", total, input.display())
            }
            BatchEvent::NoFiles { input } => {
                log::warn!("No PDF files found in {}", input.display())
            }
            BatchEvent::FileDone(outcome) => log::info!(
                "Saved outline to {} ({} headings)",
                outcome.output.display(),
                outcome.headings
            ),
            BatchEvent::FileFailed(failure) => log::error!(
                "Failed to process {}: {}",
                failure.input.display(),
                failure.message
            ),
            BatchEvent::Finished { succeeded, total } => {
                log::info!("Successfully processed {}/{} files", succeeded, total)
            }
        }
    }
}

/// A document whose outline was written.
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub headings: usize,
}

/// A document that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct FileFailure {
    pub input: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub succeeded: Vec<FileOutcome>,
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    /// Number of PDFs handled.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// PDF files directly inside `dir`, sorted by path.
///
/// The extension check is case-insensitive. Subdirectories are not searched.
pub fn discover_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

/// Output path for a PDF: `<output_dir>/<stem>.json`.
pub fn output_path_for<P: AsRef<Path>, Q: AsRef<Path>>(pdf: P, output_dir: Q) -> PathBuf {
    output_dir
        .as_ref()
        .join(format!("{}.json", document_name(pdf)))
}

/// Runs outline extraction over files and directories.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    extractor: OutlineExtractor,
    format: JsonFormat,
}

impl BatchProcessor {
    pub fn new(extractor: OutlineExtractor) -> Self {
        Self {
            extractor,
            format: JsonFormat::default(),
        }
    }

    /// Set the JSON format of written files.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    pub fn extractor(&self) -> &OutlineExtractor {
        &self.extractor
    }

    /// Extract one PDF and write its outline to `output`.
    ///
    /// Unreadable documents still produce the empty outline; only write
    /// failures are returned as errors.
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        pdf: P,
        output: Q,
    ) -> Result<FileOutcome> {
        let (pdf, output) = (pdf.as_ref(), output.as_ref());
        let result = self.extractor.extract_file(pdf);
        write_outline(&result, output, self.format)?;

        Ok(FileOutcome {
            input: pdf.to_path_buf(),
            output: output.to_path_buf(),
            headings: result.heading_count(),
        })
    }

    /// Process every PDF in `input`, writing JSON files into `output`.
    ///
    /// `output` is created if missing. Errors are returned only when the
    /// directories themselves cannot be used.
    pub fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        observer: &dyn BatchObserver,
    ) -> Result<BatchReport> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let pdfs = discover_pdfs(input)?;
        fs::create_dir_all(output)?;

        if pdfs.is_empty() {
            observer.on_event(&BatchEvent::NoFiles {
                input: input.to_path_buf(),
            });
            return Ok(BatchReport::default());
        }

        observer.on_event(&BatchEvent::Started {
            input: input.to_path_buf(),
            total: pdfs.len(),
        });

        let start = Instant::now();
        let process = |pdf: &PathBuf| {
            let outcome = self
                .process_file(pdf, output_path_for(pdf, output))
                .map_err(|e| failure(pdf, &e));
            match &outcome {
                Ok(done) => observer.on_event(&BatchEvent::FileDone(done.clone())),
                Err(failed) => observer.on_event(&BatchEvent::FileFailed(failed.clone())),
            }
            outcome
        };

        let outcomes: Vec<_> = if self.extractor.options().parallel {
            pdfs.par_iter().map(process).collect()
        } else {
            pdfs.iter().map(process).collect()
        };

        let mut report = BatchReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(done) => report.succeeded.push(done),
                Err(failed) => report.failed.push(failed),
            }
        }

        log::debug!(
            "Batch of {} files took {:.2} seconds",
            report.total(),
            start.elapsed().as_secs_f64()
        );
        observer.on_event(&BatchEvent::Finished {
            succeeded: report.success_count(),
            total: report.total(),
        });

        Ok(report)
    }
}

fn failure(pdf: &Path, err: &Error) -> FileFailure {
    FileFailure {
        input: pdf.to_path_buf(),
        kind: err.kind(),
        message: err.to_string(),
    }
}
