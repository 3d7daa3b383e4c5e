//! Font size hierarchy.
//!
//! The distinct font sizes of a document, largest first, are mapped onto
//! four tiers: the largest is the title size, the next three are H1, H2 and
//! H3. Sizes are compared exactly; 12.0 and 12.01 are two different tiers.

use std::collections::HashMap;

use crate::model::{HeadingLevel, TextFragment};

/// A tier of the font hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Title,
    H1,
    H2,
    H3,
}

impl Tier {
    /// Tiers in the order they are populated.
    pub const ALL: [Tier; 4] = [Tier::Title, Tier::H1, Tier::H2, Tier::H3];

    /// Heading level for this tier. The title tier has none.
    pub fn heading_level(&self) -> Option<HeadingLevel> {
        match self {
            Tier::Title => None,
            Tier::H1 => Some(HeadingLevel::H1),
            Tier::H2 => Some(HeadingLevel::H2),
            Tier::H3 => Some(HeadingLevel::H3),
        }
    }
}

/// Tier to font size mapping of one document.
///
/// Populated tiers are a prefix of [`Tier::ALL`] and their sizes strictly
/// decrease.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontHierarchy {
    sizes: Vec<f32>,
}

impl FontHierarchy {
    /// Build the hierarchy from the sizes of a document's fragments.
    pub fn from_sizes<I: IntoIterator<Item = f32>>(sizes: I) -> Self {
        let mut stats = FontStatistics::default();
        for size in sizes {
            stats.add_size(size);
        }
        Self::from_statistics(&stats)
    }

    /// Build the hierarchy from a fragment list.
    pub fn analyze(fragments: &[TextFragment]) -> Self {
        Self::from_sizes(fragments.iter().map(|f| f.font_size))
    }

    /// Build the hierarchy from collected statistics.
    pub fn from_statistics(stats: &FontStatistics) -> Self {
        let mut sizes = stats.distinct_sizes_desc();
        sizes.truncate(Tier::ALL.len());
        Self { sizes }
    }

    /// Size assigned to a tier, if populated.
    pub fn size(&self, tier: Tier) -> Option<f32> {
        let idx = Tier::ALL.iter().position(|t| *t == tier)?;
        self.sizes.get(idx).copied()
    }

    pub fn title_size(&self) -> Option<f32> {
        self.size(Tier::Title)
    }

    /// Heading level for an exact font size. Checked H1, then H2, then H3.
    pub fn level_for(&self, font_size: f32) -> Option<HeadingLevel> {
        Tier::ALL
            .iter()
            .filter_map(|tier| Some((tier.heading_level()?, self.size(*tier)?)))
            .find(|(_, size)| *size == font_size)
            .map(|(level, _)| level)
    }

    /// Populated tiers with their sizes, title first.
    pub fn populated(&self) -> impl Iterator<Item = (Tier, f32)> + '_ {
        Tier::ALL.iter().copied().zip(self.sizes.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Font size histogram of a document.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    /// Observed sizes (by bit pattern) with their frequency
    histogram: HashMap<u32, usize>,
}

impl FontStatistics {
    /// Collect the sizes of a fragment list.
    pub fn from_fragments(fragments: &[TextFragment]) -> Self {
        let mut stats = Self::default();
        for fragment in fragments {
            stats.add_size(fragment.font_size);
        }
        stats
    }

    /// Add a font size observation. Non-finite sizes are ignored.
    pub fn add_size(&mut self, size: f32) {
        if !size.is_finite() {
            return;
        }
        // Adding 0.0 folds -0.0 into 0.0 so both share a key.
        let key = (size + 0.0).to_bits();
        *self.histogram.entry(key).or_insert(0) += 1;
    }

    /// Number of distinct sizes seen.
    pub fn distinct_count(&self) -> usize {
        self.histogram.len()
    }

    /// Distinct sizes, largest first.
    pub fn distinct_sizes_desc(&self) -> Vec<f32> {
        let mut sizes: Vec<f32> = self.histogram.keys().map(|k| f32::from_bits(*k)).collect();
        sizes.sort_by(|a, b| b.total_cmp(a));
        sizes
    }

    /// Sizes with their counts, most frequent first; ties go to the larger size.
    pub fn frequency_ranking(&self) -> Vec<(f32, usize)> {
        let mut ranking: Vec<(f32, usize)> = self
            .histogram
            .iter()
            .map(|(k, count)| (f32::from_bits(*k), *count))
            .collect();
        ranking.sort_by(|(size_a, count_a), (size_b, count_b)| {
            count_b.cmp(count_a).then_with(|| size_b.total_cmp(size_a))
        });
        ranking
    }

    /// The most frequent size, usually the body text size.
    pub fn dominant_size(&self) -> Option<f32> {
        self.frequency_ranking().first().map(|(size, _)| *size)
    }
}
