//! Heading classification.
//!
//! A fragment becomes a heading when its text has a heading-like shape
//! (structural gate) and its font size is exactly one of the H1/H2/H3 tier
//! sizes (tier gate).

use std::sync::OnceLock;

use regex::{Regex, RegexSet};

use crate::model::{Heading, TextFragment};

use super::hierarchy::FontHierarchy;
use super::options::OutlineOptions;

/// Punctuation that lets a heading be written in sentence case.
const HEADING_ENDINGS: [char; 4] = ['.', ':', '?', '!'];

fn numeric_only() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d\s.\-()]+$").unwrap())
}

/// Prefixes of text that is never a heading: version numbers, page
/// numbers, captions, URLs and e-mail addresses.
fn non_heading_prefixes() -> &'static RegexSet {
    static SET: OnceLock<RegexSet> = OnceLock::new();
    SET.get_or_init(|| {
        RegexSet::new([
            r"(?i)^\d+\.\d+",
            r"(?i)^Page \d+",
            r"(?i)^Figure \d+",
            r"(?i)^Table \d+",
            r"(?i)^www\.",
            r"(?i)^https?://",
            r"(?i)^\w+@\w+",
        ])
        .unwrap()
    })
}

/// Why a text failed the structural gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    TooLong,
    NumericOnly,
    NonHeadingPattern,
    SentenceCase,
}

/// Applies the structural and tier gates.
#[derive(Debug, Clone)]
pub struct HeadingClassifier<'a> {
    options: &'a OutlineOptions,
}

impl<'a> HeadingClassifier<'a> {
    pub fn new(options: &'a OutlineOptions) -> Self {
        Self { options }
    }

    /// Run the structural gate, reporting the first failed check.
    pub fn check(&self, text: &str) -> Result<(), Rejection> {
        let len = text.chars().count();
        if len < self.options.min_heading_length {
            return Err(Rejection::TooShort);
        }
        if len > self.options.max_heading_length {
            return Err(Rejection::TooLong);
        }
        if numeric_only().is_match(text) {
            return Err(Rejection::NumericOnly);
        }
        if non_heading_prefixes().is_match(text) {
            return Err(Rejection::NonHeadingPattern);
        }
        if !text.ends_with(HEADING_ENDINGS.as_slice())
            && !is_upper_text(text)
            && !is_title_text(text)
        {
            return Err(Rejection::SentenceCase);
        }
        Ok(())
    }

    /// Whether `text` is shaped like a heading or title.
    pub fn is_potential_heading(&self, text: &str) -> bool {
        self.check(text).is_ok()
    }

    /// Heading for a fragment that passes both gates.
    pub fn classify(
        &self,
        fragment: &TextFragment,
        hierarchy: &FontHierarchy,
    ) -> Option<Heading> {
        if !self.is_potential_heading(&fragment.text) {
            return None;
        }
        let level = hierarchy.level_for(fragment.font_size)?;
        Some(Heading::new(level, fragment.text.as_str(), fragment.page))
    }

    /// Provisional headings for a fragment list, in fragment order.
    pub fn classify_all(
        &self,
        fragments: &[TextFragment],
        hierarchy: &FontHierarchy,
    ) -> Vec<Heading> {
        fragments
            .iter()
            .filter_map(|f| self.classify(f, hierarchy))
            .collect()
    }
}

/// At least one cased character and no lowercase ones.
pub fn is_upper_text(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Every cased run starts with an uppercase character followed only by
/// lowercase ones, and at least one cased character exists.
///
/// Runs are split by any uncased character, so `"Chapter 2: Overview"` and
/// `"Self-Test"` qualify while `"McDonald"` and `"Data and Methods"` do not.
pub fn is_title_text(text: &str) -> bool {
    let mut cased = false;
    let mut prev_cased = false;

    for c in text.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            cased = true;
        } else {
            prev_cased = false;
        }
    }

    cased
}
