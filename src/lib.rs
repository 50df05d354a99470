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

//! hwdb checker
//!
//! Parser and validator for the libinput hwdb format, a line-oriented
//! database that attaches model flags and dimension hints to classes
//! of input devices.
//!
//! # Format
//!
//! ```text
//! # Comment-only blocks end with a blank line
//!
//! libinput:name:*SynPS/2 Synaptics TouchPad*
//! libinput:touchpad:input:b0003v05ACp0265*
//!  LIBINPUT_MODEL_APPLE_TOUCHPAD=1
//!  LIBINPUT_ATTR_SIZE_HINT=100x60  # mm
//! ```
//!
//! # Architecture
//!
//! - **`core`:** Grammar engine (types, structural parser, property
//!   grammar, duplicate detection, validation)
//! - **`run`:** Driver that reads files, keeps per-file summaries and
//!   validates the combined groups of a run
//!
//! # Error Handling
//!
//! Only structural errors are fatal, and only for the file they occur
//! in. Everything else is collected so a single run reports as many
//! problems as possible:
//!
//! - **Structural:** bad line ordering or an unknown match prefix
//! - **Property parse:** a property matching no known shape
//! - **Duplicate property:** a tag repeated within a group
//! - **Duplicate match:** a pattern repeated anywhere in the run
//! - **Invalid dimension:** a size or resolution hint with a zero component
//!
//! # Examples
//!
//! ## Parsing a file
//!
//! ```no_run
//! use hwdb_check::core::parser::parse_hwdb;
//! use std::path::Path;
//!
//! let content = std::fs::read_to_string("/tmp/60-evdev.hwdb")?;
//! let groups = parse_hwdb(&content, Path::new("/tmp/60-evdev.hwdb"))?;
//! println!("Found {} match groups", groups.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Validating a run
//!
//! ```no_run
//! use hwdb_check::run::ValidationRun;
//! use std::path::Path;
//!
//! let mut run = ValidationRun::new();
//! run.add_file(Path::new("/tmp/60-evdev.hwdb"));
//! run.add_file(Path::new("/tmp/70-touchpad.hwdb"));
//!
//! let report = run.finish();
//! for issue in report.all_issues() {
//!     println!("{}", issue);
//! }
//! ```

pub mod core;
pub mod run;

// Re-export commonly used types for convenience
pub use core::{Group, MatchPattern, PropertyLine, ValidationIssue};
pub use run::{RunReport, ValidationRun};
