//! Badge rows and the SQL INSERT writers that emit them.
//!
//! Values are substituted into fixed statement templates; there is no
//! parameter binding. Every string literal goes through [`escape_sql`] as the
//! last step before it is written.

use std::fmt;
use std::io::{self, Write};

use crate::transforms::escape_sql;

/// Preamble of the multi-row county insert
pub const MULTI_ROW_PREAMBLE: &str = "INSERT INTO badges (id, title, description, icon_svg) VALUES";

/// Column list of the single-row state park insert
pub const SINGLE_ROW_PREFIX: &str = "INSERT INTO badges (id, title, description, icon_svg, points) VALUES";

/// One row of the `badges` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon_svg: Option<String>,
    pub points: Option<i64>,
}

/// Quoted and escaped text literal, or `NULL`
struct Literal<'a>(Option<&'a str>);

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(text) => write!(f, "'{}'", escape_sql(text)),
            None => write!(f, "NULL"),
        }
    }
}

impl Badge {
    /// `('id', 'title', 'description', icon)` as used by the multi-row insert
    pub fn tuple_without_points(&self) -> String {
        format!(
            "({}, {}, {}, {})",
            Literal(Some(self.id.as_str())),
            Literal(Some(self.title.as_str())),
            Literal(Some(self.description.as_str())),
            Literal(self.icon_svg.as_deref()),
        )
    }

    /// `('id', 'title', 'description', icon, points)` as used by the single-row insert
    pub fn tuple_with_points(&self) -> String {
        let points = match self.points {
            Some(p) => p.to_string(),
            None => "NULL".to_string(),
        };
        format!(
            "({}, {}, {}, {}, {})",
            Literal(Some(self.id.as_str())),
            Literal(Some(self.title.as_str())),
            Literal(Some(self.description.as_str())),
            Literal(self.icon_svg.as_deref()),
            points,
        )
    }
}

/// Writes one INSERT statement spanning many lines.
///
/// Output shape:
///
/// ```text
/// INSERT INTO badges (id, title, description, icon_svg) VALUES
/// ('a', 'A', 'desc', NULL),
/// ('b', 'B', 'desc', NULL);
/// ```
pub struct MultiRowInsertWriter<W: Write> {
    writer: W,
    first: bool,
    rows: usize,
}

impl<W: Write> MultiRowInsertWriter<W> {
    /// Create the writer and emit the statement preamble
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{}", MULTI_ROW_PREAMBLE)?;
        Ok(Self {
            writer,
            first: true,
            rows: 0,
        })
    }

    /// Append one tuple to the statement body
    pub fn write(&mut self, badge: &Badge) -> io::Result<()> {
        if !self.first {
            writeln!(self.writer, ",")?;
        }
        self.first = false;

        write!(self.writer, "{}", badge.tuple_without_points())?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Terminate the statement and flush
    pub fn finish(mut self) -> io::Result<W> {
        writeln!(self.writer, ";")?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Writes one complete INSERT statement per line
pub struct SingleRowInsertWriter<W: Write> {
    writer: W,
    rows: usize,
}

impl<W: Write> SingleRowInsertWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0 }
    }

    pub fn write(&mut self, badge: &Badge) -> io::Result<()> {
        writeln!(self.writer, "{} {};", SINGLE_ROW_PREFIX, badge.tuple_with_points())?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
