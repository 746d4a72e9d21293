//! Record filter predicates.
//!
//! Predicates are plain data so they can be loaded from the YAML config:
//!
//! ```yaml
//! filter:
//!   type: all
//!   predicates:
//!     - type: equals
//!       field: active
//!       value: "1"
//!     - type: contains
//!       field: name
//!       needle: State Park
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::Record;

/// A pure test applied to each record independently.
///
/// Comparisons are exact and case-sensitive; no whitespace or case
/// normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Predicate {
    /// Field text equals `value`
    Equals { field: String, value: String },

    /// Field text contains `needle`
    Contains { field: String, needle: String },

    /// Every inner predicate holds, evaluated left to right and stopping at the first miss
    All { predicates: Vec<Predicate> },
}

impl Predicate {
    /// `active == "1"` and `name` contains `"State Park"`
    pub fn active_state_park() -> Self {
        Predicate::All {
            predicates: vec![
                Predicate::Equals {
                    field: "active".to_string(),
                    value: "1".to_string(),
                },
                Predicate::Contains {
                    field: "name".to_string(),
                    needle: "State Park".to_string(),
                },
            ],
        }
    }

    /// Evaluate against a record.
    ///
    /// # Errors
    /// Returns `MissingField` if a field the predicate reaches is absent.
    pub fn matches(&self, record: &Record) -> Result<bool> {
        match self {
            Predicate::Equals { field, value } => Ok(record.require(field)? == value),
            Predicate::Contains { field, needle } => {
                Ok(record.require(field)?.contains(needle.as_str()))
            }
            Predicate::All { predicates } => {
                for predicate in predicates {
                    if !predicate.matches(record)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Self::active_state_park()
    }
}
