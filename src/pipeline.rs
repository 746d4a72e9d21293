//! The three record pipelines.
//!
//! Each pipeline is a single linear pass: read records, filter or map them,
//! write the result. The input is opened before the output is created, so a
//! missing source never produces an output file.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::badges::{
    county_badge, state_park_badge, DuplicatePolicy, DuplicateTracker, StateParkBadgeOptions,
};
use crate::config::Config;
use crate::csv_io::{RecordReader, RecordWriter};
use crate::error::{PipelineError, Result};
use crate::filter::Predicate;
use crate::sql::{MultiRowInsertWriter, SingleRowInsertWriter};

/// Which pipeline produced a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineKind {
    StateParks,
    CountyBadges,
    StateParkBadges,
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub pipeline: PipelineKind,
    pub input: PathBuf,
    pub output: PathBuf,
    pub records_read: usize,
    pub records_written: usize,
    pub duplicate_ids: usize,
}

impl PipelineSummary {
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for PipelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let output = self.output.display();
        match self.pipeline {
            PipelineKind::StateParks => write!(
                f,
                "Found {} active state parks and saved to {}",
                self.records_written, output
            ),
            PipelineKind::CountyBadges => write!(
                f,
                "SQL script generated with {} county badges: {}",
                self.records_written, output
            ),
            PipelineKind::StateParkBadges => write!(
                f,
                "SQL script generated safely with {} active state parks: {}",
                self.records_written, output
            ),
        }
    }
}

#[derive(Debug, Default)]
struct Counts {
    read: usize,
    written: usize,
    duplicates: usize,
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    tracing::debug!("Created {}", path.display());
    Ok(BufWriter::new(file))
}

/// Copy records that satisfy `filter` from `input` to `output`, header included.
pub fn filter_state_parks(input: &Path, output: &Path, filter: &Predicate) -> Result<PipelineSummary> {
    tracing::info!("Filtering {} into {}", input.display(), output.display());

    let reader = RecordReader::from_path(input)?;
    let writer = RecordWriter::create(output, reader.headers())?;
    let counts = filter_records(reader, writer, filter)?;

    tracing::info!("Kept {} of {} records", counts.written, counts.read);
    Ok(PipelineSummary {
        pipeline: PipelineKind::StateParks,
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        records_read: counts.read,
        records_written: counts.written,
        duplicate_ids: 0,
    })
}

fn filter_records<R: Read, W: Write>(
    reader: RecordReader<R>,
    mut writer: RecordWriter<W>,
    filter: &Predicate,
) -> Result<Counts> {
    let mut counts = Counts::default();

    for record in reader {
        let record = record?;
        counts.read += 1;

        if filter.matches(&record)? {
            writer.write(&record)?;
        } else {
            tracing::trace!("Skipping line {}", record.line());
        }
    }

    counts.written = writer.written();
    writer.finish()?;
    Ok(counts)
}

/// Emit one multi-row INSERT with a badge per county row.
pub fn generate_county_badges(
    input: &Path,
    output: &Path,
    duplicates: DuplicatePolicy,
) -> Result<PipelineSummary> {
    tracing::info!("Generating county badges from {} into {}", input.display(), output.display());

    let reader = RecordReader::from_path(input)?;
    let writer = create_output(output)?;
    let counts = write_county_badges(reader, writer, output, duplicates)?;

    if counts.written == 0 {
        tracing::warn!("No county rows in {}; {} holds an empty INSERT", input.display(), output.display());
    }

    Ok(PipelineSummary {
        pipeline: PipelineKind::CountyBadges,
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        records_read: counts.read,
        records_written: counts.written,
        duplicate_ids: counts.duplicates,
    })
}

fn write_county_badges<R: Read, W: Write>(
    reader: RecordReader<R>,
    writer: W,
    output: &Path,
    duplicates: DuplicatePolicy,
) -> Result<Counts> {
    let io_err = |e: std::io::Error| PipelineError::io(output, e);
    let mut sql = MultiRowInsertWriter::new(writer).map_err(io_err)?;
    let mut tracker = DuplicateTracker::new(duplicates);
    let mut counts = Counts::default();

    for record in reader {
        let record = record?;
        counts.read += 1;

        let badge = county_badge(&record)?;
        tracker.check(&badge.id, record.line())?;
        sql.write(&badge).map_err(io_err)?;
    }

    counts.written = sql.rows();
    counts.duplicates = tracker.duplicates();
    sql.finish().map_err(io_err)?;
    Ok(counts)
}

/// Emit one single-row INSERT per active state park row.
pub fn generate_state_park_badges(
    input: &Path,
    output: &Path,
    options: &StateParkBadgeOptions,
    duplicates: DuplicatePolicy,
) -> Result<PipelineSummary> {
    tracing::info!(
        "Generating state park badges from {} into {}",
        input.display(),
        output.display()
    );

    let reader = RecordReader::from_path(input)?;
    let writer = create_output(output)?;
    let counts = write_state_park_badges(reader, writer, output, options, duplicates)?;

    Ok(PipelineSummary {
        pipeline: PipelineKind::StateParkBadges,
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        records_read: counts.read,
        records_written: counts.written,
        duplicate_ids: counts.duplicates,
    })
}

fn write_state_park_badges<R: Read, W: Write>(
    reader: RecordReader<R>,
    writer: W,
    output: &Path,
    options: &StateParkBadgeOptions,
    duplicates: DuplicatePolicy,
) -> Result<Counts> {
    let io_err = |e: std::io::Error| PipelineError::io(output, e);
    let mut sql = SingleRowInsertWriter::new(writer);
    let mut tracker = DuplicateTracker::new(duplicates);
    let mut counts = Counts::default();

    for record in reader {
        let record = record?;
        counts.read += 1;

        let badge = state_park_badge(&record, options)?;
        tracker.check(&badge.id, record.line())?;
        sql.write(&badge).map_err(io_err)?;
    }

    counts.written = sql.rows();
    counts.duplicates = tracker.duplicates();
    sql.finish().map_err(io_err)?;
    Ok(counts)
}

/// Run the state park filter, then the state park badges, then the county badges.
///
/// The state park badges always read the file the filter just wrote.
/// `on_summary` is called as each pipeline finishes, so earlier results are
/// reported even if a later pipeline fails.
pub fn run_all<F>(config: &Config, mut on_summary: F) -> Result<Vec<PipelineSummary>>
where
    F: FnMut(&PipelineSummary),
{
    let parks = &config.state_parks;
    let park_badges = &config.state_park_badges;
    let counties = &config.county_badges;

    let filtered = config.resolve(&parks.output);
    let configured_input = config.resolve(&park_badges.input);
    if configured_input != filtered {
        tracing::warn!(
            "state_park_badges.input ({}) is ignored by `all`; reading filter output {}",
            configured_input.display(),
            filtered.display()
        );
    }

    let mut summaries = Vec::with_capacity(3);

    let summary = filter_state_parks(&config.resolve(&parks.input), &filtered, &parks.filter)?;
    on_summary(&summary);
    summaries.push(summary);

    let summary = generate_state_park_badges(
        &filtered,
        &config.resolve(&park_badges.output),
        &park_badges.badge_options(),
        config.duplicates,
    )?;
    on_summary(&summary);
    summaries.push(summary);

    let summary = generate_county_badges(
        &config.resolve(&counties.input),
        &config.resolve(&counties.output),
        config.duplicates,
    )?;
    on_summary(&summary);
    summaries.push(summary);

    Ok(summaries)
}
