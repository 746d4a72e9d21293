//! Badge derivation from input records.
//!
//! County badges come from `county_full`, `state_name` and `state_id`; state
//! park badges from `name` and `locationDesc`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::record::Record;
use crate::sql::Badge;
use crate::transforms::{
    county_badge_id, state_code_from_location, state_park_badge_id, state_park_title,
};

pub const DEFAULT_STATE_PARK_ICON: &str = "state_park.svg";
pub const DEFAULT_STATE_PARK_POINTS: i64 = 0;

/// Build the badge for one county row.
///
/// County, state and code are trimmed; the code is lowercased in the id.
pub fn county_badge(record: &Record) -> Result<Badge> {
    let county = record.require("county_full")?.trim();
    let state = record.require("state_name")?.trim();
    let state_id = record.require("state_id")?.trim();

    Ok(Badge {
        id: county_badge_id(county, state_id),
        title: format!("{}, {}", county, state),
        description: format!("Complete 3 trails in {}, {}", county, state),
        icon_svg: None,
        points: None,
    })
}

/// Fixed columns stamped on every state park badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateParkBadgeOptions {
    pub icon: String,
    pub points: i64,
}

impl Default for StateParkBadgeOptions {
    fn default() -> Self {
        Self {
            icon: DEFAULT_STATE_PARK_ICON.to_string(),
            points: DEFAULT_STATE_PARK_POINTS,
        }
    }
}

/// Build the badge for one active state park row
pub fn state_park_badge(record: &Record, options: &StateParkBadgeOptions) -> Result<Badge> {
    let name = record.require("name")?;
    let state_code = state_code_from_location(record.require("locationDesc")?);
    let title = state_park_title(name);

    Ok(Badge {
        id: state_park_badge_id(name, &state_code),
        description: format!("completed 2 trails and visited {}", title),
        title,
        icon_svg: Some(options.icon.clone()),
        points: Some(options.points),
    })
}

/// What to do when two rows derive the same badge id.
///
/// Both rows are always emitted under `ignore` and `warn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    Ignore,
    #[default]
    Warn,
    Reject,
}

/// Tracks ids seen during one run
#[derive(Debug)]
pub struct DuplicateTracker {
    policy: DuplicatePolicy,
    seen: HashMap<String, u64>,
    duplicates: usize,
}

impl DuplicateTracker {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            seen: HashMap::new(),
            duplicates: 0,
        }
    }

    /// Record an id produced by the row at `line`.
    ///
    /// # Errors
    /// Returns `DuplicateId` for a repeated id under [`DuplicatePolicy::Reject`].
    pub fn check(&mut self, id: &str, line: u64) -> Result<()> {
        let first_line = match self.seen.get(id).copied() {
            Some(first_line) => first_line,
            None => {
                self.seen.insert(id.to_string(), line);
                return Ok(());
            }
        };

        self.duplicates += 1;
        match self.policy {
            DuplicatePolicy::Ignore => Ok(()),
            DuplicatePolicy::Warn => {
                tracing::warn!(
                    "Badge id '{}' on line {} duplicates line {}",
                    id,
                    line,
                    first_line
                );
                Ok(())
            }
            DuplicatePolicy::Reject => Err(PipelineError::DuplicateId {
                id: id.to_string(),
                line,
            }),
        }
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}
