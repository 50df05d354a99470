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

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while driving a validation run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Database file could not be read (missing, unreadable, not UTF-8).
    #[error("{source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Path is not valid UTF-8, so `~` cannot be expanded.
    #[error("Invalid path encoding: {}", .0.display())]
    InvalidPathEncoding(PathBuf),
    /// JSON rendering of the run report failed.
    #[error("Failed to serialise report: {0}")]
    Serialise(#[from] serde_json::Error),
}
