// Copyright 2025 Eric Jingryd (tidynest@proton.me)
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

//! Validation run driver
//!
//! A `ValidationRun` is fed one file at a time. Each file is read and
//! parsed immediately, producing a `FileReport` with its summary counts
//! and any file-fatal issue. Once every file is in, `finish()` validates
//! the union of all parsed groups and returns the final `RunReport`.
//!
//! - **Unreadable files** and **structural errors** contribute zero groups
//! - **Property, dimension and duplicate issues** are collected, never fatal
//! - **Exit status** is 1 if anything at all was reported
//!
//! # Example
//!
//! ```no_run
//! use hwdb_check::run::ValidationRun;
//! use std::path::Path;
//!
//! let mut run = ValidationRun::new();
//! for path in ["50-system-lenovo.hwdb", "50-system-apple.hwdb"] {
//!     let file = run.add_file(Path::new(path));
//!     println!("{}", file.summary);
//! }
//!
//! let report = run.finish();
//! std::process::exit(report.exit_code());
//! ```

pub mod error;

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{parse_hwdb, Group, ValidationIssue, Validator};

pub use error::RunError;

/// Per-file counts printed after parsing
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub groups: usize,
    pub matches: usize,
    pub properties: usize,
}

impl FileSummary {
    /// Summary of a file that contributed no groups
    pub fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            groups: 0,
            matches: 0,
            properties: 0,
        }
    }

    pub fn from_groups(path: &Path, groups: &[Group]) -> Self {
        Self {
            path: path.to_path_buf(),
            groups: groups.len(),
            matches: groups.iter().map(Group::match_count).sum(),
            properties: groups.iter().map(Group::property_count).sum(),
        }
    }
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} match groups, {} matches, {} properties",
            self.path.display(),
            self.groups,
            self.matches,
            self.properties
        )
    }
}

/// Outcome of reading and parsing one file
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileReport {
    pub summary: FileSummary,

    /// Unreadable or structural issue; `None` if the file parsed
    pub error: Option<ValidationIssue>,
}

/// Accumulates files for one run
///
/// The only run-wide state is held here: the groups parsed so far and
/// the per-file reports. Nothing is global, so independent runs can be
/// driven side by side in tests.
#[derive(Debug, Default)]
pub struct ValidationRun {
    validator: Validator,
    groups: Vec<Group>,
    files: Vec<FileReport>,
}

impl ValidationRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads, parses and records one file
    ///
    /// A leading `~` in the path is expanded before reading. The summary
    /// keeps the path as given.
    pub fn add_file(&mut self, path: &Path) -> &FileReport {
        let content = expand_path(path).and_then(|expanded| read_source(&expanded));

        match content {
            Ok(content) => self.add_source(path, &content),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read file");
                self.record(FileReport {
                    summary: FileSummary::empty(path),
                    error: Some(ValidationIssue::Unreadable {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    }),
                })
            }
        }
    }

    /// Parses and records text that was already read
    pub fn add_source(&mut self, path: &Path, content: &str) -> &FileReport {
        tracing::debug!(path = %path.display(), bytes = content.len(), "parsing file");

        match parse_hwdb(content, path) {
            Ok(groups) => {
                let summary = FileSummary::from_groups(path, &groups);
                self.groups.extend(groups);
                self.record(FileReport {
                    summary,
                    error: None,
                })
            }
            Err(error) => {
                tracing::debug!(
                    path = %path.display(),
                    line = error.line,
                    complete_groups = error.complete_groups,
                    "structural error, discarding file"
                );
                self.record(FileReport {
                    summary: FileSummary::empty(path),
                    error: Some(ValidationIssue::Structural {
                        path: path.to_path_buf(),
                        error,
                    }),
                })
            }
        }
    }

    fn record(&mut self, report: FileReport) -> &FileReport {
        self.files.push(report);
        &self.files[self.files.len() - 1]
    }

    /// Groups parsed so far, across all files
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    /// Validates every group parsed so far and closes the run
    pub fn finish(self) -> RunReport {
        let validation = self.validator.validate(&self.groups);

        RunReport {
            files: self.files,
            issues: validation.issues,
        }
    }
}

/// Final result of a run
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,

    /// Issues from validating the combined groups
    pub issues: Vec<ValidationIssue>,
}

impl RunReport {
    /// File-level issues followed by validation issues
    pub fn all_issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.files
            .iter()
            .filter_map(|file| file.error.as_ref())
            .chain(self.issues.iter())
    }

    pub fn error_count(&self) -> usize {
        self.all_issues().count()
    }

    /// True if any file or validation issue was reported
    pub fn failed(&self) -> bool {
        self.error_count() > 0
    }

    /// Process exit status for this run
    pub fn exit_code(&self) -> i32 {
        if self.failed() {
            1
        } else {
            0
        }
    }

    /// Renders the report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, RunError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Reads a database file into memory
pub fn read_source(path: &Path) -> Result<String, RunError> {
    fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Expands a leading `~` to the home directory
pub fn expand_path(path: &Path) -> Result<PathBuf, RunError> {
    let raw = path
        .to_str()
        .ok_or_else(|| RunError::InvalidPathEncoding(path.to_path_buf()))?;

    Ok(PathBuf::from(shellexpand::tilde(raw).as_ref()))
}

#[cfg(test)]
mod tests;
