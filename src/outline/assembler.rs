//! Title selection and outline assembly.

use std::collections::HashSet;

use crate::model::{Heading, HeadingLevel, OutlineResult, TextFragment};

use super::classifier::HeadingClassifier;
use super::hierarchy::FontHierarchy;

/// First page-1 fragment at the title size that passes the structural gate.
pub fn extract_title(
    fragments: &[TextFragment],
    hierarchy: &FontHierarchy,
    classifier: &HeadingClassifier<'_>,
) -> Option<String> {
    let title_size = hierarchy.title_size()?;
    fragments
        .iter()
        .find(|f| {
            f.page == 1 && f.font_size == title_size && classifier.is_potential_heading(&f.text)
        })
        .map(|f| f.text.clone())
}

/// Keep the first occurrence of each (level, text, page), in order.
pub fn dedup_headings(headings: Vec<Heading>) -> Vec<Heading> {
    let mut seen: HashSet<(HeadingLevel, String, u32)> = HashSet::new();
    headings
        .into_iter()
        .filter(|h| seen.insert((h.level, h.text.clone(), h.page)))
        .collect()
}

/// Combine title and provisional headings into the final result.
///
/// `document_name` is used as the title when no fragment qualifies.
pub fn assemble(
    title: Option<String>,
    headings: Vec<Heading>,
    document_name: &str,
) -> OutlineResult {
    let title = title.unwrap_or_else(|| document_name.to_string());
    OutlineResult::new(title, dedup_headings(headings))
}
