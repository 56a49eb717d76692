//! Opportunity classification and ranking.

use std::cmp::Ordering;

use serde::Serialize;

use crate::thresholds::{ThresholdPair, ThresholdTable};
use crate::types::CategoryCounts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityTier {
    Excellent,
    Good,
    Consider,
    Saturated,
}

impl OpportunityTier {
    /// Classifies a competitor count against a category's thresholds.
    #[must_use]
    pub fn classify(count: u32, pair: ThresholdPair) -> Self {
        if count == 0 {
            Self::Excellent
        } else if count < pair.low {
            Self::Good
        } else if count < pair.high {
            Self::Consider
        } else {
            Self::Saturated
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "No competition - excellent opportunity!",
            Self::Good => "Low competition - good opportunity",
            Self::Consider => "Moderate competition - consider carefully",
            Self::Saturated => "High competition - market may be saturated",
        }
    }
}

impl std::fmt::Display for OpportunityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub category: String,
    pub count: u32,
    pub tier: OpportunityTier,
    pub suggestion: &'static str,
    /// Saturation threshold used for the competition ratio.
    #[serde(skip)]
    high: u32,
}

impl Suggestion {
    fn new(category: &str, count: u32, pair: ThresholdPair) -> Self {
        let tier = OpportunityTier::classify(count, pair);
        Self {
            category: category.to_owned(),
            count,
            tier,
            suggestion: tier.message(),
            high: pair.high,
        }
    }

    /// `count / high`, the value suggestions are ordered by.
    #[must_use]
    pub fn competition_ratio(&self) -> f64 {
        f64::from(self.count) / f64::from(self.high)
    }

    /// Zero-count entries first, then ascending `count / high`.
    ///
    /// Ratios are compared by cross-multiplication so equal fractions such as
    /// 1/2 and 2/4 compare equal.
    fn cmp_opportunity(&self, other: &Self) -> Ordering {
        match (self.count == 0, other.count == 0) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
        let lhs = u64::from(self.count) * u64::from(other.high);
        let rhs = u64::from(other.count) * u64::from(self.high);
        lhs.cmp(&rhs)
    }
}

/// Turns category counts into suggestions, most attractive first.
///
/// Every category in `counts` yields exactly one suggestion carrying the same
/// count. The sort is stable and `counts` iterates by name, so categories with
/// equal ratios appear in alphabetical order.
#[must_use]
pub fn rank(counts: &CategoryCounts, thresholds: &ThresholdTable) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = counts
        .iter()
        .map(|(category, &count)| Suggestion::new(category, count, thresholds.lookup(category)))
        .collect();
    suggestions.sort_by(Suggestion::cmp_opportunity);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u32)]) -> CategoryCounts {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect()
    }

    fn tier_for(category: &str, count: u32) -> OpportunityTier {
        let ranked = rank(&counts(&[(category, count)]), ThresholdTable::standard());
        ranked[0].tier
    }

    #[test]
    fn default_threshold_boundaries() {
        // "ice_cream" is not in the table, so it uses low=2, high=5.
        assert_eq!(tier_for("ice_cream", 0), OpportunityTier::Excellent);
        assert_eq!(tier_for("ice_cream", 1), OpportunityTier::Good);
        assert_eq!(tier_for("ice_cream", 2), OpportunityTier::Consider);
        assert_eq!(tier_for("ice_cream", 4), OpportunityTier::Consider);
        assert_eq!(tier_for("ice_cream", 5), OpportunityTier::Saturated);
        assert_eq!(tier_for("ice_cream", 100), OpportunityTier::Saturated);
    }

    #[test]
    fn pharmacy_thresholds() {
        assert_eq!(tier_for("pharmacy", 1), OpportunityTier::Consider);
        assert_eq!(tier_for("pharmacy", 2), OpportunityTier::Saturated);
    }

    #[test]
    fn tier_messages_are_fixed() {
        assert_eq!(
            OpportunityTier::Excellent.message(),
            "No competition - excellent opportunity!"
        );
        assert_eq!(OpportunityTier::Good.message(), "Low competition - good opportunity");
        assert_eq!(
            OpportunityTier::Consider.message(),
            "Moderate competition - consider carefully"
        );
        assert_eq!(
            OpportunityTier::Saturated.message(),
            "High competition - market may be saturated"
        );
    }

    #[test]
    fn zero_count_ranks_first_regardless_of_ratio() {
        let ranked = rank(&counts(&[("cafe", 0), ("bakery", 10)]), ThresholdTable::standard());
        let order: Vec<&str> = ranked.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(order, vec!["cafe", "bakery"]);
    }

    #[test]
    fn orders_by_ascending_ratio() {
        // restaurant 4/10 = 0.4, bakery 1/3 ≈ 0.33, pharmacy 2/2 = 1.0, cafe 2/7 ≈ 0.29
        let ranked = rank(
            &counts(&[("restaurant", 4), ("bakery", 1), ("pharmacy", 2), ("cafe", 2)]),
            ThresholdTable::standard(),
        );
        let order: Vec<&str> = ranked.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(order, vec!["cafe", "bakery", "restaurant", "pharmacy"]);
    }

    #[test]
    fn equal_ratios_keep_alphabetical_order() {
        // bar and pub share (2, 5); hairdresser 2/4 equals pharmacy 1/2.
        let ranked = rank(
            &counts(&[("pub", 3), ("bar", 3), ("pharmacy", 1), ("hairdresser", 2)]),
            ThresholdTable::standard(),
        );
        let order: Vec<&str> = ranked.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(order, vec!["hairdresser", "pharmacy", "bar", "pub"]);
    }

    #[test]
    fn every_category_appears_once_with_its_count() {
        let input = counts(&[("cafe", 3), ("bank", 1), ("hotel", 9), ("museum", 0)]);
        let ranked = rank(&input, ThresholdTable::standard());
        assert_eq!(ranked.len(), input.len());
        for suggestion in &ranked {
            assert_eq!(input.get(&suggestion.category), Some(&suggestion.count));
        }
    }

    #[test]
    fn empty_counts_rank_to_empty() {
        assert!(rank(&CategoryCounts::new(), ThresholdTable::standard()).is_empty());
    }

    #[test]
    fn custom_table_changes_classification() {
        let table = ThresholdTable::new(
            ThresholdPair::new(10, 20),
            [("cafe".to_owned(), ThresholdPair::new(1, 2))],
        )
        .expect("valid table");
        let ranked = rank(&counts(&[("cafe", 1), ("bakery", 1)]), &table);
        assert_eq!(ranked[0].category, "bakery");
        assert_eq!(ranked[0].tier, OpportunityTier::Good);
        assert_eq!(ranked[1].tier, OpportunityTier::Consider);
    }

    #[test]
    fn competition_ratio_uses_high_threshold() {
        let ranked = rank(&counts(&[("cafe", 2)]), ThresholdTable::standard());
        assert!((ranked[0].competition_ratio() - 2.0 / 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn suggestion_serializes_text_and_tier() {
        // cafe is (3, 7), so a single cafe is below `low`.
        let ranked = rank(&counts(&[("cafe", 1)]), ThresholdTable::standard());
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["category"], "cafe");
        assert_eq!(json["count"], 1);
        assert_eq!(json["tier"], "good");
        assert_eq!(json["suggestion"], "Low competition - good opportunity");
        assert!(json.get("high").is_none());
    }

    #[test]
    fn single_bakery_is_consider() {
        // bakery is (1, 3): one competitor already reaches `low`.
        let ranked = rank(&counts(&[("bakery", 1)]), ThresholdTable::standard());
        assert_eq!(ranked[0].tier, OpportunityTier::Consider);
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["tier"], "consider");
        assert_eq!(json["suggestion"], "Moderate competition - consider carefully");
    }
}
