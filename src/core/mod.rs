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

//! src/core/mod.rs
//!
//! Core grammar engine
//!
//! This module contains the data structures and algorithms for reading
//! hwdb text, including:
//! - Type definitions for match patterns, property lines and groups
//! - The structural line grammar that assembles groups
//! - The property grammar for model flags and dimension hints
//! - Run-wide duplicate match detection
//! - The validator that collects every issue into a report
//!
//! Everything here works on in-memory text so it can be unit tested
//! without touching the filesystem.

pub mod duplicates;
pub mod parser;
pub mod property;
pub mod types;
pub mod validator;

pub use duplicates::{DuplicateDetector, DuplicateMatch};
pub use parser::{parse_hwdb, ParseError, ParseErrorKind};
pub use property::{PropertyError, PropertyGrammar, RecognizedProperty};
pub use types::*;
pub use validator::{ValidationIssue, ValidationReport, Validator};

#[cfg(test)]
mod tests;
