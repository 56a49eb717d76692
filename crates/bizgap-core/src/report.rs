//! Full analysis of one location: counts, headline totals, and ranked suggestions.

use serde::Serialize;

use crate::aggregate::group_by_category;
use crate::rank::{rank, Suggestion};
use crate::thresholds::ThresholdTable;
use crate::types::{CategoryCounts, GeoElement};

/// Number of categories listed in [`AnalysisReport::top_categories`].
pub const TOP_CATEGORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub total_businesses: u32,
    pub total_categories: usize,
    /// Most common categories, largest first; ties by name.
    pub top_categories: Vec<CategoryTotal>,
    pub counts: CategoryCounts,
    pub suggestions: Vec<Suggestion>,
}

impl AnalysisReport {
    #[must_use]
    pub fn build<'a, I>(elements: I, thresholds: &ThresholdTable) -> Self
    where
        I: IntoIterator<Item = &'a GeoElement>,
    {
        Self::from_counts(group_by_category(elements), thresholds)
    }

    #[must_use]
    pub fn from_counts(counts: CategoryCounts, thresholds: &ThresholdTable) -> Self {
        let total_businesses = counts.values().sum();
        let suggestions = rank(&counts, thresholds);

        let mut top: Vec<CategoryTotal> = counts
            .iter()
            .map(|(category, &count)| CategoryTotal {
                category: category.clone(),
                count,
            })
            .collect();
        // Stable sort over name-ordered input keeps ties alphabetical.
        top.sort_by(|a, b| b.count.cmp(&a.count));
        top.truncate(TOP_CATEGORY_LIMIT);

        Self {
            total_businesses,
            total_categories: counts.len(),
            top_categories: top,
            counts,
            suggestions,
        }
    }

    /// No categorised businesses were found. A valid result, not a failure.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
