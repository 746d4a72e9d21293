//! Delimited-text reading and writing.
//!
//! [`RecordReader`] turns a CSV source with a header line into a lazy stream of
//! [`Record`]s. [`RecordWriter`] writes records back out in header order.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecordsIntoIter, Terminator, WriterBuilder};
use indexmap::IndexMap;

use crate::error::{PipelineError, Result};
use crate::record::Record;

/// Lazy, single-pass reader over the rows of a CSV source.
///
/// Rows whose column count differs from the header are reported as
/// [`PipelineError::Csv`]; blank lines are skipped. A header that repeats a
/// column name is rejected with [`PipelineError::DuplicateHeader`].
pub struct RecordReader<R: Read> {
    headers: Vec<String>,
    rows: StringRecordsIntoIter<R>,
}

impl RecordReader<File> {
    /// Open a CSV file and read its header line
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
        tracing::debug!("Opened {} for reading", path.display());
        Self::from_reader(file)
    }
}

impl<R: Read> RecordReader<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect();

        // Records are keyed by header name, so a repeated name would drop a column
        let mut seen = HashSet::new();
        if let Some(field) = headers.iter().find(|h| !seen.insert(h.as_str())) {
            return Err(PipelineError::DuplicateHeader {
                field: field.clone(),
            });
        }

        Ok(Self {
            headers,
            rows: csv_reader.into_records(),
        })
    }

    /// Header fields in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e.into())),
        };

        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let fields: IndexMap<String, String> = self
            .headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();

        Some(Ok(Record::new(fields, line)))
    }
}

/// CSV writer that emits a header line followed by records in header order.
///
/// Records end with CRLF and fields are quoted only when they contain a
/// delimiter, quote or line break.
pub struct RecordWriter<W: Write> {
    writer: csv::Writer<W>,
    written: usize,
}

impl RecordWriter<File> {
    /// Create (or truncate) a CSV file and write the header line
    pub fn create<P: AsRef<Path>>(path: P, headers: &[String]) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
        tracing::debug!("Created {}", path.display());
        Self::from_writer(file, headers)
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn from_writer(writer: W, headers: &[String]) -> Result<Self> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .from_writer(writer);
        writer.write_record(headers)?;

        Ok(Self { writer, written: 0 })
    }

    /// Write one record's values verbatim
    pub fn write(&mut self, record: &Record) -> Result<()> {
        self.writer.write_record(record.values())?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far (header excluded)
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| PipelineError::Csv(csv::Error::from(e.into_error())))
    }
}
