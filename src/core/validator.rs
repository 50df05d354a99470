// Copyright 2025 bakri (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Semantic validation of parsed groups
//!
//! Runs three independent checks and collects every issue found:
//! 1. **Match uniqueness:** no pattern text may appear twice in a run
//! 2. **Property duplication:** no tag may appear twice in one group
//! 3. **Dimension positivity:** size and resolution hints need both
//!    components above zero
//!
//! Property lines that fail the property grammar are reported too, and
//! the remaining properties of the group are still checked.
//!
//! # Example
//! ```
//! use hwdb_check::core::{parser::parse_hwdb, Validator};
//! use std::path::Path;
//!
//! let groups = parse_hwdb("libinput:name:*Foo*\n LIBINPUT_MODEL_FOO=1\n", Path::new("a.hwdb"))?;
//! let report = Validator::new().validate(&groups);
//! assert!(!report.has_errors());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::duplicates::DuplicateDetector;
use crate::core::parser::ParseError;
use crate::core::property::{PropertyGrammar, RecognizedProperty};
use crate::core::types::{Dimension, Group};

/// Every diagnostic the checker can report
///
/// Structural and unreadable-file issues come from the driver; the
/// others come from `Validator`.
#[derive(Clone, Debug, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// File failed the line grammar
    #[error("Cannot parse {}: {error}", .path.display())]
    Structural { path: PathBuf, error: ParseError },

    /// File could not be read
    #[error("Cannot read {}: {message}", .path.display())]
    Unreadable { path: PathBuf, message: String },

    /// Property line matched no recognised property
    #[error("{}:{line}: Failed to parse: '{text}'", .path.display())]
    PropertyParse { path: PathBuf, line: usize, text: String },

    /// Same tag twice in one group
    #[error("{}:{line}: Property {tag} is duplicated", .path.display())]
    DuplicateProperty { path: PathBuf, line: usize, tag: String },

    /// Same match pattern declared by another group
    #[error(
        "{}:{line}: Match '{pattern}' is duplicated (first declared at {}:{first_line})",
        .path.display(),
        .first_path.display()
    )]
    DuplicateMatch {
        pattern: String,
        path: PathBuf,
        line: usize,
        first_path: PathBuf,
        first_line: usize,
    },

    /// Dimension hint with a zero component
    #[error("{}:{line}: Dimension {dimension} invalid", .path.display())]
    InvalidDimension {
        path: PathBuf,
        line: usize,
        tag: String,
        dimension: Dimension,
    },
}

/// All issues found by one validation pass
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty validation report
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if anything was reported
    pub fn has_errors(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        self.issues.extend(issues);
    }
}

/// Group validator
///
/// Owns the compiled property grammar so one instance can check any
/// number of groups.
#[derive(Debug, Default)]
pub struct Validator {
    grammar: PropertyGrammar,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            grammar: PropertyGrammar::new(),
        }
    }

    /// Validates every group of a run
    ///
    /// Match uniqueness runs over all groups at once; the property
    /// checks run per group. No check stops at the first failure.
    pub fn validate(&self, groups: &[Group]) -> ValidationReport {
        let mut report = ValidationReport::new();

        report.extend(check_match_uniqueness(groups));

        for group in groups {
            report.extend(self.check_properties(group));
        }

        tracing::debug!(
            groups = groups.len(),
            issues = report.issues.len(),
            "validation finished"
        );

        report
    }

    /// Checks one group's property lines
    ///
    /// Tags are tracked for every attempted property, so a duplicate is
    /// reported even when one of the copies failed to parse.
    pub fn check_properties(&self, group: &Group) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut seen_tags = HashSet::new();

        for prop in &group.properties {
            if !seen_tags.insert(prop.tag.as_str()) {
                issues.push(ValidationIssue::DuplicateProperty {
                    path: group.path.clone(),
                    line: prop.line,
                    tag: prop.tag.clone(),
                });
            }

            let text = prop.without_comment();
            match self.grammar.parse(&text) {
                Ok(RecognizedProperty::Dimension { kind, value }) => {
                    if !value.is_positive() {
                        issues.push(ValidationIssue::InvalidDimension {
                            path: group.path.clone(),
                            line: prop.line,
                            tag: kind.tag().to_string(),
                            dimension: value,
                        });
                    }
                }
                Ok(RecognizedProperty::ModelFlag { .. }) => {}
                Err(e) => {
                    issues.push(ValidationIssue::PropertyParse {
                        path: group.path.clone(),
                        line: prop.line,
                        text: e.text,
                    });
                }
            }
        }

        issues
    }
}

/// Reports one issue per extra declaration of a match pattern
pub fn check_match_uniqueness(groups: &[Group]) -> Vec<ValidationIssue> {
    let mut detector = DuplicateDetector::new();
    for group in groups {
        detector.add_group(group);
    }

    detector
        .find_duplicates()
        .into_iter()
        .flat_map(|duplicate| {
            let Some(first) = duplicate.occurrences.first().cloned() else {
                return Vec::new();
            };
            duplicate
                .extra_occurrences()
                .iter()
                .map(|extra| ValidationIssue::DuplicateMatch {
                    pattern: duplicate.pattern.clone(),
                    path: extra.path.clone(),
                    line: extra.line,
                    first_path: first.path.clone(),
                    first_line: first.line,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
