use crate::field::SortValue;
use crate::record::Record;
use crate::schema::Schema;
use std::cmp::Ordering;

/// One element of a sort key. Absent values order after every present one.
#[derive(Debug, Clone, PartialEq, Eq)]
struct KeyPart(Option<SortValue>);

impl Ord for KeyPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for KeyPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Stable ascending sort by a chain of fields, left to right.
///
/// Records lacking a field sort last for that key.
pub fn sort_records(schema: &Schema, keys: &[usize], records: &mut [Record]) {
    if keys.is_empty() {
        return;
    }
    records.sort_by_cached_key(|record| {
        keys.iter()
            .map(|&field| KeyPart(schema.field(field).sort_key(record)))
            .collect::<Vec<_>>()
    });
}
