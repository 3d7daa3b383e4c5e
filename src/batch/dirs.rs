//! Input/output directory resolution for batch runs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Candidate directory layouts, tried in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryCandidates {
    /// Preferred input directory
    pub input: PathBuf,
    /// Output directory paired with `input`
    pub output: PathBuf,
    /// Fallback directory used for both input and output
    pub data: PathBuf,
}

impl DirectoryCandidates {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        data: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            data: data.into(),
        }
    }
}

impl Default for DirectoryCandidates {
    fn default() -> Self {
        Self::new("/app/input", "/app/output", "data")
    }
}

/// Which layout was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorySource {
    /// The input directory existed
    Input,
    /// The data directory existed
    Data,
    /// Neither existed; the input/output pair was created
    Created,
}

/// Resolved batch directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDirectories {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source: DirectorySource,
}

/// Pick the input and output directories for a batch run.
///
/// Prefers `input -> output` when `input` exists, then `data -> data`,
/// and otherwise creates the `input`/`output` pair.
pub fn resolve_directories(candidates: &DirectoryCandidates) -> Result<ResolvedDirectories> {
    if candidates.input.exists() {
        log::info!(
            "Using directory structure: {} -> {}",
            candidates.input.display(),
            candidates.output.display()
        );
        return Ok(ResolvedDirectories {
            input: candidates.input.clone(),
            output: candidates.output.clone(),
            source: DirectorySource::Input,
        });
    }

    if candidates.data.exists() {
        log::info!(
            "Using data directory structure: {0} -> {0}",
            candidates.data.display()
        );
        return Ok(ResolvedDirectories {
            input: candidates.data.clone(),
            output: candidates.data.clone(),
            source: DirectorySource::Data,
        });
    }

    create_dir(&candidates.input)?;
    create_dir(&candidates.output)?;
    log::info!(
        "Created default directory structure: {} -> {}",
        candidates.input.display(),
        candidates.output.display()
    );

    Ok(ResolvedDirectories {
        input: candidates.input.clone(),
        output: candidates.output.clone(),
        source: DirectorySource::Created,
    })
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}
