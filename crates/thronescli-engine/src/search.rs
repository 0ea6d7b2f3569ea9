use crate::count::CountTable;
use crate::filter::Filter;
use crate::options::Options;
use crate::record::Record;
use crate::render::{Painter, Renderer};
use crate::schema::Schema;
use crate::sort::sort_records;
use std::io::{self, Write};

/// One invocation: filter, then sort, render and count the survivors.
pub struct Search<'a> {
    schema: &'a Schema,
    options: &'a Options,
    filter: Filter<'a>,
}

impl<'a> Search<'a> {
    pub fn new(schema: &'a Schema, options: &'a Options) -> Self {
        Self {
            schema,
            options,
            filter: Filter::new(schema, options),
        }
    }

    pub fn accepts(&self, record: &Record) -> bool {
        self.filter.accepts(record)
    }

    /// Keep the records every directive accepts, in input order.
    pub fn select<I>(&self, records: I) -> Vec<Record>
    where
        I: IntoIterator<Item = Record>,
    {
        records.into_iter().filter(|r| self.accepts(r)).collect()
    }

    /// Write the selected records and the count summary to `out`.
    pub fn report<W: Write>(
        &self,
        mut records: Vec<Record>,
        painter: Painter,
        out: &mut W,
    ) -> io::Result<CountTable> {
        sort_records(self.schema, &self.options.sort, &mut records);

        let renderer = Renderer::new(self.schema, self.options, painter);
        let mut counts = CountTable::new(&self.options.count);
        for record in &records {
            if !self.options.count_only {
                out.write_all(renderer.record(record).as_bytes())?;
            }
            counts.add(self.schema, record);
        }

        tracing::debug!(matched = counts.total(), "search finished");
        out.write_all(renderer.summary(&counts).as_bytes())?;
        Ok(counts)
    }
}
