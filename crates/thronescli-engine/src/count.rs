use crate::record::Record;
use crate::schema::Schema;
use std::collections::HashMap;

/// Running tally for one counted field, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FieldCounts {
    pub field: usize,
    buckets: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FieldCounts {
    fn new(field: usize) -> Self {
        Self {
            field,
            ..Self::default()
        }
    }

    fn increment(&mut self, bucket: String) {
        match self.index.get(&bucket) {
            Some(&i) => self.buckets[i].1 += 1,
            None => {
                self.index.insert(bucket.clone(), self.buckets.len());
                self.buckets.push((bucket, 1));
            }
        }
    }

    /// Buckets by descending count; ties keep first-seen order.
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut items: Vec<(&str, usize)> = self
            .buckets
            .iter()
            .map(|(bucket, n)| (bucket.as_str(), *n))
            .collect();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        items
    }

    pub fn sum(&self) -> usize {
        self.buckets.iter().map(|(_, n)| n).sum()
    }
}

/// Tallies for every counted field plus the grand total.
#[derive(Debug, Clone, Default)]
pub struct CountTable {
    fields: Vec<FieldCounts>,
    total: usize,
}

impl CountTable {
    pub fn new(fields: &[usize]) -> Self {
        Self {
            fields: fields.iter().map(|&f| FieldCounts::new(f)).collect(),
            total: 0,
        }
    }

    /// Count one filtered record. Absent fields add no bucket.
    pub fn add(&mut self, schema: &Schema, record: &Record) {
        self.total += 1;
        for counts in &mut self.fields {
            let field = schema.field(counts.field);
            let Ok(value) = field.fetch(record) else {
                continue;
            };
            for bucket in field.count_buckets(&value) {
                counts.increment(bucket);
            }
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn fields(&self) -> &[FieldCounts] {
        &self.fields
    }
}
