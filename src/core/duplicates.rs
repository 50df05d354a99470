//! Run-wide match pattern uniqueness
//!
//! Every match pattern of every group in a run is indexed by its full
//! `category:connection:pattern` text. A pattern seen more than once is
//! a duplicate, whether the copies live in one file or in several.
//!
//! The index is ordered by pattern text so reports come out sorted and
//! stable between runs.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::types::Group;

/// Where a match pattern was declared
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchOccurrence {
    pub path: PathBuf,

    /// Line of the match declaring the pattern
    pub line: usize,
}

/// A pattern declared by two or more groups
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DuplicateMatch {
    /// The verbatim pattern text
    pub pattern: String,

    /// All declarations in the order they were added (always 2 or more)
    pub occurrences: Vec<MatchOccurrence>,
}

impl DuplicateMatch {
    /// Every declaration after the first
    pub fn extra_occurrences(&self) -> &[MatchOccurrence] {
        self.occurrences.get(1..).unwrap_or(&[])
    }
}

/// Indexes match patterns across all groups of a run.
#[derive(Debug, Default)]
pub struct DuplicateDetector {
    /// Maps pattern text to every group declaring it.
    matches: BTreeMap<String, Vec<MatchOccurrence>>,
}

impl DuplicateDetector {
    /// Creates a new empty detector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every match pattern of a group.
    pub fn add_group(&mut self, group: &Group) {
        for pattern in &group.matches {
            self.matches
                .entry(pattern.to_string())
                .or_default()
                .push(MatchOccurrence {
                    path: group.path.clone(),
                    line: pattern.line,
                });
        }
    }

    /// Finds all patterns declared more than once, sorted by pattern text.
    pub fn find_duplicates(&self) -> Vec<DuplicateMatch> {
        self.matches
            .iter()
            .filter(|(_, occurrences)| occurrences.len() > 1)
            .map(|(pattern, occurrences)| DuplicateMatch {
                pattern: pattern.clone(),
                occurrences: occurrences.clone(),
            })
            .collect()
    }
}
