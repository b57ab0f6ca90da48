//! Deterministic property ordering.
//!
//! Properties are ordered by explicit serialization order (only when both
//! sides have one), then explicit index, then field position, with missing
//! values last. Ties keep their declaration order.

use crate::model::{OrderingHints, PropertyModel};
use crate::settings::OrderingPreference;
use std::cmp::Ordering;

pub fn compare_hints(a: &OrderingHints, b: &OrderingHints, preference: OrderingPreference) -> Ordering {
    let by_serialization = match (preference, a.serialization_index, b.serialization_index) {
        (OrderingPreference::SerializationOrder, Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    };
    by_serialization
        .then_with(|| nulls_last(a.index, b.index))
        .then_with(|| nulls_last(a.field_index, b.field_index))
}

fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn sort_properties(properties: &mut [PropertyModel], preference: OrderingPreference) {
    stable_sort_by(properties, |a, b| compare_hints(&a.ordering, &b.ordering, preference));
}

/// Stable insertion sort. The comparator above is not a total order when some
/// properties lack a serialization index, and `slice::sort_by` may panic on
/// such comparators; this only ever swaps strictly out-of-order neighbours.
pub fn stable_sort_by<T>(items: &mut [T], mut compare: impl FnMut(&T, &T) -> Ordering) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TargetType;
    use rstest::rstest;

    fn prop(name: &str, serialization: Option<usize>, index: Option<i64>, field: Option<usize>) -> PropertyModel {
        PropertyModel::new(name, TargetType::string()).with_ordering(OrderingHints {
            serialization_index: serialization,
            index,
            field_index: field,
        })
    }

    fn names(props: &[PropertyModel]) -> Vec<&str> {
        props.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_field_order_with_nulls_last() {
        let mut props = vec![
            prop("c", None, None, None),
            prop("b", None, None, Some(1)),
            prop("a", None, None, Some(0)),
        ];
        sort_properties(&mut props, OrderingPreference::SerializationOrder);
        assert_eq!(names(&props), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_explicit_index_beats_field_position() {
        let mut props = vec![
            prop("first", None, None, Some(0)),
            prop("pinned", None, Some(0), Some(5)),
        ];
        sort_properties(&mut props, OrderingPreference::SerializationOrder);
        assert_eq!(names(&props), vec!["pinned", "first"]);
    }

    #[rstest]
    #[case(OrderingPreference::SerializationOrder, vec!["y", "x"])]
    #[case(OrderingPreference::DeclaredIndex, vec!["x", "y"])]
    fn test_serialization_order_preference(#[case] preference: OrderingPreference, #[case] expected: Vec<&str>) {
        let mut props = vec![prop("x", Some(1), None, Some(0)), prop("y", Some(0), None, Some(1))];
        sort_properties(&mut props, preference);
        assert_eq!(names(&props), expected);
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let mut props = vec![
            prop("d", Some(2), None, Some(3)),
            prop("e", None, Some(1), None),
            prop("a", Some(0), None, Some(9)),
            prop("f", None, None, None),
            prop("b", None, Some(0), Some(1)),
            prop("c", Some(1), None, Some(2)),
        ];
        sort_properties(&mut props, OrderingPreference::SerializationOrder);
        let once: Vec<String> = props.iter().map(|p| p.name.clone()).collect();
        sort_properties(&mut props, OrderingPreference::SerializationOrder);
        let twice: Vec<String> = props.iter().map(|p| p.name.clone()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let mut props = vec![prop("z", None, None, None), prop("y", None, None, None)];
        sort_properties(&mut props, OrderingPreference::SerializationOrder);
        assert_eq!(names(&props), vec!["z", "y"]);
    }
}
