//! Property-based tests for local search and pagination.
//!
//! - Search is idempotent and a blank term is the identity
//! - A page never holds more than `page_size` items
//! - `total_pages` is `max(1, ceil(len / page_size))` for non-empty input

use backoffice_crud::{paginate, search, total_pages};
use backoffice_model::Record;
use proptest::prelude::*;
use serde_json::{Map, Value};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z ]{0,12}").unwrap()
}

fn term_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z]{1,3}").unwrap()
}

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((word_strategy(), word_strategy()), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, email))| {
                let mut fields = Map::new();
                fields.insert("name".into(), Value::String(name));
                fields.insert("email".into(), Value::String(email));
                Record::new(i as u64 + 1, fields)
            })
            .collect()
    })
}

const KEYS: [&str; 2] = ["name", "email"];

// =============================================================================
// SEARCH PROPERTIES
// =============================================================================

mod search_properties {
    use super::*;

    proptest! {
        /// search(search(C, t), t) == search(C, t)
        #[test]
        fn search_is_idempotent(records in records_strategy(), term in term_strategy()) {
            let once = search(&records, &term, &KEYS);
            let twice = search(once.iter().copied(), &term, &KEYS);
            prop_assert_eq!(once, twice);
        }

        /// search(C, "") == C
        #[test]
        fn empty_term_is_identity(records in records_strategy()) {
            let all = search(&records, "", &KEYS);
            let expected: Vec<&Record> = records.iter().collect();
            prop_assert_eq!(all, expected);
        }

        /// Every hit contains the term in at least one searched key.
        #[test]
        fn hits_contain_term(records in records_strategy(), term in term_strategy()) {
            let needle = term.to_lowercase();
            for record in search(&records, &term, &KEYS) {
                let found = KEYS.iter().any(|k| {
                    record.text(k).is_some_and(|t| t.to_lowercase().contains(&needle))
                });
                prop_assert!(found);
            }
        }

        /// Results keep the input order.
        #[test]
        fn search_preserves_order(records in records_strategy(), term in term_strategy()) {
            let ids: Vec<_> = search(&records, &term, &KEYS).iter().map(|r| r.id.clone()).collect();
            let mut sorted = ids.clone();
            sorted.sort();
            prop_assert_eq!(ids, sorted);
        }
    }
}

// =============================================================================
// PAGINATION PROPERTIES
// =============================================================================

mod paginate_properties {
    use super::*;

    proptest! {
        #[test]
        fn page_never_exceeds_page_size(
            len in 0usize..200,
            page in 0usize..30,
            page_size in 1usize..25,
        ) {
            let items: Vec<usize> = (0..len).collect();
            let p = paginate(&items, page, page_size);
            prop_assert!(p.items.len() <= page_size);
        }

        #[test]
        fn total_pages_covers_everything(len in 1usize..200, page_size in 1usize..25) {
            let items: Vec<usize> = (0..len).collect();
            let p = paginate(&items, 1, page_size);
            prop_assert_eq!(p.total_pages, std::cmp::max(1, len.div_ceil(page_size)));
        }

        /// Walking every page visits each item exactly once, in order.
        #[test]
        fn pages_partition_the_sequence(len in 0usize..120, page_size in 1usize..15) {
            let items: Vec<usize> = (0..len).collect();
            let mut seen = Vec::new();
            for page in 1..=total_pages(len, page_size) {
                seen.extend_from_slice(paginate(&items, page, page_size).items);
            }
            prop_assert_eq!(seen, items);
        }
    }
}
