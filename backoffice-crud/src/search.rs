//! Local search and structured filtering.
//!
//! Both functions borrow their input and return references into it, so a
//! result can be fed back in (`search(search(c))`) without copying records.

use backoffice_model::{FilterState, Record};

/// Records where at least one of `keys` contains `term`, case-insensitively.
///
/// A blank term returns every record. Missing and null values never match.
pub fn search<'a, I, K>(records: I, term: &str, keys: &[K]) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
    K: AsRef<str>,
{
    let term = term.trim();
    if term.is_empty() {
        return records.into_iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|record| {
            keys.iter().any(|key| {
                record
                    .text(key.as_ref())
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .collect()
}

/// Records satisfying every non-empty entry of `state`.
pub fn filter<'a, I>(records: I, state: &FilterState) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    if state.is_empty() {
        return records.into_iter().collect();
    }
    records
        .into_iter()
        .filter(|record| {
            state
                .active()
                .all(|(key, wanted)| wanted.matches(record.value(key).as_deref()))
        })
        .collect()
}
