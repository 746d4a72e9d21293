//! Ordered field-name to value mapping for one input row.
//!
//! A [`Record`] keeps fields in header order so a filtered record can be
//! written back out exactly as it was read.

use indexmap::IndexMap;

use crate::error::{PipelineError, Result};

/// One row of a delimited-text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Field values keyed by header name, in header order
    fields: IndexMap<String, String>,
    /// 1-based line in the source file
    line: u64,
}

impl Record {
    pub fn new(fields: IndexMap<String, String>, line: u64) -> Self {
        Self { fields, line }
    }

    /// Build a record from parallel header and value slices.
    ///
    /// Used by tests and by the reader; extra values past the header are dropped.
    pub fn from_pairs<H, V>(headers: &[H], values: &[V], line: u64) -> Self
    where
        H: AsRef<str>,
        V: AsRef<str>,
    {
        let fields = headers
            .iter()
            .zip(values.iter())
            .map(|(h, v)| (h.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        Self { fields, line }
    }

    /// Look up an optional field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|s| s.as_str())
    }

    /// Look up a field the pipeline cannot run without
    pub fn require(&self, field: &str) -> Result<&str> {
        self.get(field).ok_or_else(|| PipelineError::MissingField {
            field: field.to_string(),
            line: self.line,
        })
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Values in header order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.values().map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
