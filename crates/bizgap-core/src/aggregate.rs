//! Tallying geographic elements by business category.

use crate::query::CATEGORY_TAG_KEYS;
use crate::types::{CategoryCounts, GeoElement};

/// Returns the business category of `element`: the first non-empty value among
/// [`CATEGORY_TAG_KEYS`], in priority order.
#[must_use]
pub fn category_of(element: &GeoElement) -> Option<&str> {
    let tags = element.tags.as_ref()?;
    CATEGORY_TAG_KEYS
        .iter()
        .filter_map(|key| tags.get(*key))
        .map(String::as_str)
        .find(|value| !value.is_empty())
}

/// Counts elements per category.
///
/// Elements without any category tag (including skeleton nodes with no tags
/// at all) are skipped. Each element counts once, under its highest-priority tag.
pub fn group_by_category<'a, I>(elements: I) -> CategoryCounts
where
    I: IntoIterator<Item = &'a GeoElement>,
{
    let mut counts = CategoryCounts::new();
    for category in elements.into_iter().filter_map(category_of) {
        *counts.entry(category.to_owned()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::types::ElementKind;

    fn element(id: u64, tags: &[(&str, &str)]) -> GeoElement {
        GeoElement {
            kind: ElementKind::Node,
            id,
            lat: None,
            lon: None,
            nodes: Vec::new(),
            tags: Some(
                tags.iter()
                    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                    .collect::<BTreeMap<_, _>>(),
            ),
        }
    }

    fn untagged(id: u64) -> GeoElement {
        GeoElement {
            tags: None,
            ..element(id, &[])
        }
    }

    #[test]
    fn shop_wins_over_amenity() {
        let elements = [element(1, &[("shop", "bakery"), ("amenity", "cafe")])];
        let counts = group_by_category(&elements);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("bakery"), Some(&1));
        assert!(!counts.contains_key("cafe"));
    }

    #[test]
    fn priority_order_is_respected_down_the_chain() {
        let e = element(1, &[("office", "lawyer"), ("leisure", "fitness_centre")]);
        assert_eq!(category_of(&e), Some("fitness_centre"));
        let e = element(2, &[("office", "lawyer"), ("tourism", "hotel")]);
        assert_eq!(category_of(&e), Some("hotel"));
        let e = element(3, &[("office", "lawyer"), ("name", "Smith & Co")]);
        assert_eq!(category_of(&e), Some("lawyer"));
    }

    #[test]
    fn empty_value_falls_through_to_next_key() {
        let e = element(1, &[("shop", ""), ("amenity", "pharmacy")]);
        assert_eq!(category_of(&e), Some("pharmacy"));
    }

    #[test]
    fn untagged_and_irrelevant_elements_are_skipped() {
        let elements = [
            untagged(1),
            element(2, &[]),
            element(3, &[("highway", "bus_stop")]),
        ];
        assert!(group_by_category(&elements).is_empty());
    }

    #[test]
    fn counts_are_order_independent() {
        let forward = vec![
            element(1, &[("amenity", "cafe")]),
            element(2, &[("shop", "bakery")]),
            element(3, &[("amenity", "cafe")]),
            untagged(4),
            element(5, &[("tourism", "hotel")]),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        let mut rotated = forward.clone();
        rotated.rotate_left(2);

        let expected = group_by_category(&forward);
        assert_eq!(group_by_category(&reversed), expected);
        assert_eq!(group_by_category(&rotated), expected);
        assert_eq!(expected.get("cafe"), Some(&2));
    }

    #[test]
    fn empty_input_yields_empty_counts() {
        let elements: Vec<GeoElement> = Vec::new();
        assert!(group_by_category(&elements).is_empty());
    }
}
