//! # Collection Operations
//!
//! Immutable-update operations over ordered record collections. Each
//! function borrows the current collection and returns a new one; the
//! caller owns swapping it in.
//!
//! All three operations are total. Upsert replaces by id in place or
//! prepends; remove drops every record with the id and is a no-op when
//! nothing matches; filter is the identity under [`DistrictFilter::All`].

use crate::district::DistrictFilter;
use crate::record::{Record, RecordId};

/// Outcome of an upsert, reported alongside the new collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// An existing record at this index was replaced.
    Replaced(usize),
    /// No record had the id; the new record was prepended.
    Inserted,
}

/// Insert or replace `record` by id.
///
/// If a record with the same id exists, it is replaced at the same
/// position. Otherwise `record` is prepended.
pub fn upsert<T: Record>(collection: &[T], record: T) -> Vec<T> {
    upsert_with_outcome(collection, record).0
}

/// Like [`upsert`], also reporting whether the record was replaced or inserted.
pub fn upsert_with_outcome<T: Record>(collection: &[T], record: T) -> (Vec<T>, UpsertOutcome) {
    match collection.iter().position(|item| item.id() == record.id()) {
        Some(index) => {
            let mut next = collection.to_vec();
            // Any later duplicates of the id are replaced as well, matching a
            // map-over-all-items update.
            for item in next.iter_mut().skip(index) {
                if item.id() == record.id() {
                    *item = record.clone();
                }
            }
            (next, UpsertOutcome::Replaced(index))
        }
        None => {
            let mut next = Vec::with_capacity(collection.len() + 1);
            next.push(record);
            next.extend_from_slice(collection);
            (next, UpsertOutcome::Inserted)
        }
    }
}

/// Remove every record whose id equals `id`.
pub fn remove<T: Record>(collection: &[T], id: &RecordId) -> Vec<T> {
    collection
        .iter()
        .filter(|item| item.id() != id)
        .cloned()
        .collect()
}

/// Find a record by id.
pub fn find<'a, T: Record>(collection: &'a [T], id: &RecordId) -> Option<&'a T> {
    collection.iter().find(|item| item.id() == id)
}

/// Records inside the dashboard scope, in their original order.
pub fn filter_by_district<T: Record>(collection: &[T], filter: DistrictFilter) -> Vec<T> {
    match filter {
        DistrictFilter::All => collection.to_vec(),
        DistrictFilter::Only(_) => collection
            .iter()
            .filter(|item| filter.admits(item.district()))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::district::District;
    use crate::record::ForeignerRecord;

    fn wasnas(id: &str, district: District, count: u32) -> ForeignerRecord {
        ForeignerRecord {
            id: RecordId::new(id).unwrap(),
            district,
            count,
            institutions: 0,
            location_detail: None,
            activity_description: None,
        }
    }

    fn ids(records: &[ForeignerRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn upsert_prepends_new_record() {
        let base = vec![wasnas("a", District::Bima, 1), wasnas("b", District::Dompu, 2)];
        let (next, outcome) = upsert_with_outcome(&base, wasnas("c", District::Sumbawa, 3));
        assert_eq!(outcome, UpsertOutcome::Inserted);
        assert_eq!(ids(&next), vec!["c", "a", "b"]);
        assert_eq!(base.len(), 2, "input collection is untouched");
    }

    #[test]
    fn upsert_replaces_in_place() {
        let base = vec![
            wasnas("a", District::Bima, 1),
            wasnas("b", District::Dompu, 2),
            wasnas("c", District::Sumbawa, 3),
        ];
        let (next, outcome) = upsert_with_outcome(&base, wasnas("b", District::Dompu, 99));
        assert_eq!(outcome, UpsertOutcome::Replaced(1));
        assert_eq!(ids(&next), vec!["a", "b", "c"]);
        assert_eq!(next[1].count, 99);
    }

    #[test]
    fn upsert_into_empty_collection() {
        let next = upsert(&[], wasnas("a", District::Bima, 1));
        assert_eq!(ids(&next), vec!["a"]);
    }

    #[test]
    fn remove_drops_every_match() {
        let base = vec![
            wasnas("a", District::Bima, 1),
            wasnas("b", District::Dompu, 2),
            wasnas("a", District::Sumbawa, 3),
        ];
        let next = remove(&base, &RecordId::new("a").unwrap());
        assert_eq!(ids(&next), vec!["b"]);
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let base = vec![wasnas("a", District::Bima, 1)];
        let next = remove(&base, &RecordId::new("zzz").unwrap());
        assert_eq!(next, base);
    }

    #[test]
    fn find_by_id() {
        let base = vec![wasnas("a", District::Bima, 1), wasnas("b", District::Dompu, 2)];
        assert_eq!(find(&base, &RecordId::new("b").unwrap()).unwrap().count, 2);
        assert!(find(&base, &RecordId::new("x").unwrap()).is_none());
    }

    #[test]
    fn filter_only_keeps_selected_district_in_order() {
        let base = vec![
            wasnas("a", District::Bima, 1),
            wasnas("b", District::Dompu, 2),
            wasnas("c", District::Bima, 3),
        ];
        let next = filter_by_district(&base, DistrictFilter::Only(District::Bima));
        assert_eq!(ids(&next), vec!["a", "c"]);
    }

    #[test]
    fn filter_all_is_identity() {
        let base = vec![wasnas("a", District::Bima, 1), wasnas("b", District::Dompu, 2)];
        assert_eq!(filter_by_district(&base, DistrictFilter::All), base);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_district() -> impl Strategy<Value = District> {
            (0..District::ALL.len()).prop_map(|i| District::ALL[i])
        }

        fn arb_record() -> impl Strategy<Value = ForeignerRecord> {
            ("[a-e]", arb_district(), 0u32..1000).prop_map(|(id, d, n)| wasnas(&id, d, n))
        }

        /// Collections with unique ids, as maintained by upsert.
        fn arb_collection() -> impl Strategy<Value = Vec<ForeignerRecord>> {
            prop::collection::vec(arb_record(), 0..12).prop_map(|records| {
                records
                    .into_iter()
                    .fold(Vec::new(), |acc, r| upsert(&acc, r))
            })
        }

        proptest! {
            /// Applying the same upsert twice equals applying it once.
            #[test]
            fn upsert_is_idempotent(c in arb_collection(), r in arb_record()) {
                let once = upsert(&c, r.clone());
                let twice = upsert(&once, r);
                prop_assert_eq!(once, twice);
            }

            /// Upserting an existing id keeps length and position.
            #[test]
            fn upsert_replaces_at_same_position(
                c in arb_collection().prop_filter("non-empty", |c| !c.is_empty()),
                idx in any::<prop::sample::Index>(),
                count in 0u32..1000,
            ) {
                let k = idx.index(c.len());
                let mut replacement = c[k].clone();
                replacement.count = count;
                let next = upsert(&c, replacement.clone());
                prop_assert_eq!(next.len(), c.len());
                prop_assert_eq!(&next[k], &replacement);
            }

            /// Removing an absent id leaves the collection unchanged.
            #[test]
            fn remove_absent_id_is_total(c in arb_collection()) {
                let absent = RecordId::new("not-present").unwrap();
                prop_assert_eq!(remove(&c, &absent), c);
            }

            /// After removal no record carries the id.
            #[test]
            fn remove_leaves_no_match(c in arb_collection(), id in "[a-e]") {
                let id = RecordId::new(id).unwrap();
                let next = remove(&c, &id);
                prop_assert!(next.iter().all(|r| r.id != id));
            }

            /// Filtering by All returns the input unchanged.
            #[test]
            fn filter_all_identity(c in arb_collection()) {
                prop_assert_eq!(filter_by_district(&c, DistrictFilter::All), c);
            }

            /// Filtering by a district keeps exactly that district's records.
            #[test]
            fn filter_only_is_exact(c in arb_collection(), d in arb_district()) {
                let next = filter_by_district(&c, DistrictFilter::Only(d));
                prop_assert!(next.iter().all(|r| r.district == d));
                let expected = c.iter().filter(|r| r.district == d).count();
                prop_assert_eq!(next.len(), expected);
            }
        }
    }
}
