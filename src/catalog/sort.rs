use super::display::DisplayRecord;
use std::cmp::Ordering;

/// Client-side ordering of the product list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Arrival order.
    #[default]
    Featured,
    /// Highest rating first.
    Rating,
    /// Highest synthetic identifier first.
    Newest,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Featured, SortKey::Rating, SortKey::Newest];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::Rating => "Top Rated",
            SortKey::Newest => "Newest",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortKey::Featured => SortKey::Rating,
            SortKey::Rating => SortKey::Newest,
            SortKey::Newest => SortKey::Featured,
        }
    }

    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "featured" => Some(SortKey::Featured),
            "rating" | "top-rated" => Some(SortKey::Rating),
            "newest" => Some(SortKey::Newest),
            _ => None,
        }
    }
}

/// Indices of `records` in display order for `key`.
///
/// Returns positions rather than a reordered copy so the arrival order stays
/// untouched. `sort_by` is stable, ties keep arrival order.
pub fn ordered_indices(records: &[DisplayRecord], key: SortKey) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    match key {
        SortKey::Featured => {}
        SortKey::Rating => indices.sort_by(|&a, &b| {
            records[b]
                .rating
                .partial_cmp(&records[a].rating)
                .unwrap_or(Ordering::Equal)
        }),
        SortKey::Newest => {
            indices.sort_by(|&a, &b| records[b].synthetic_id.cmp(&records[a].synthetic_id))
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RemoteProduct;
    use crate::catalog::display::map_product;
    use proptest::prelude::*;

    fn record(id: &str, rating: f64) -> DisplayRecord {
        let product: RemoteProduct = serde_json::from_value(serde_json::json!({
            "id": id, "name": format!("p{id}"), "rating": rating
        }))
        .unwrap();
        map_product(&product)
    }

    #[test]
    fn test_sort_key_cycle() {
        let mut key = SortKey::default();
        for _ in 0..3 {
            key = key.next();
        }
        assert_eq!(key, SortKey::Featured);
    }

    #[test]
    fn test_from_str_name() {
        assert_eq!(SortKey::from_str_name("Rating"), Some(SortKey::Rating));
        assert_eq!(SortKey::from_str_name(" newest "), Some(SortKey::Newest));
        assert_eq!(SortKey::from_str_name("price"), None);
    }

    #[test]
    fn test_rating_descending_stable() {
        let records = vec![record("1", 4.0), record("2", 4.8), record("3", 4.0), record("4", 5.0)];
        let order = ordered_indices(&records, SortKey::Rating);
        assert_eq!(order, vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_newest_by_synthetic_id() {
        let records = vec![record("0a", 4.0), record("ff", 4.0), record("zz", 4.0), record("10", 4.0)];
        let order = ordered_indices(&records, SortKey::Newest);
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_featured_is_arrival_order() {
        let records = vec![record("3", 1.0), record("1", 5.0)];
        assert_eq!(ordered_indices(&records, SortKey::Featured), vec![0, 1]);
    }

    proptest! {
        #[test]
        fn prop_rating_sort_non_increasing_and_stable(
            ratings in prop::collection::vec(1u8..=10, 0..40)
        ) {
            let records: Vec<DisplayRecord> = ratings
                .iter()
                .enumerate()
                .map(|(i, r)| record(&format!("x{i}"), f64::from(*r) / 2.0))
                .collect();
            let order = ordered_indices(&records, SortKey::Rating);

            prop_assert_eq!(order.len(), records.len());
            for pair in order.windows(2) {
                let (a, b) = (&records[pair[0]], &records[pair[1]]);
                prop_assert!(a.rating >= b.rating);
                if a.rating == b.rating {
                    prop_assert!(pair[0] < pair[1]);
                }
            }
        }

        #[test]
        fn prop_featured_restores_arrival_order(n in 0usize..40, key_idx in 0usize..3) {
            let records: Vec<DisplayRecord> =
                (0..n).map(|i| record(&format!("{i:x}"), 4.0)).collect();
            // Any detour through another key leaves the source untouched
            let _ = ordered_indices(&records, SortKey::ALL[key_idx]);
            let order = ordered_indices(&records, SortKey::Featured);
            prop_assert_eq!(order, (0..n).collect::<Vec<_>>());
        }
    }
}
