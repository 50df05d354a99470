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

//! Property value grammar
//!
//! Recognises the catalogue of properties the hwdb files may set:
//!
//! | Tag                              | Value            |
//! |----------------------------------|------------------|
//! | `LIBINPUT_MODEL_[A-Z0-9_]+`      | literal `1`      |
//! | `LIBINPUT_ATTR_SIZE_HINT`        | `WIDTHxHEIGHT`   |
//! | `LIBINPUT_ATTR_RESOLUTION_HINT`  | `WIDTHxHEIGHT`   |
//!
//! Anything else is a `PropertyError`. The grammar is applied to one
//! property at a time, after the inline comment has been stripped.

use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res},
    IResult, Parser,
};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::core::types::Dimension;

/// Property text that matched no recognised shape
#[derive(Clone, Debug, Eq, Error, PartialEq, Serialize)]
#[error("Failed to parse: '{text}'")]
pub struct PropertyError {
    pub text: String,
}

/// The two dimension-hint properties
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum DimensionKind {
    /// `LIBINPUT_ATTR_SIZE_HINT`, physical size in mm
    SizeHint,
    /// `LIBINPUT_ATTR_RESOLUTION_HINT`, units per mm
    ResolutionHint,
}

impl DimensionKind {
    pub const ALL: &'static [DimensionKind] =
        &[DimensionKind::SizeHint, DimensionKind::ResolutionHint];

    pub const fn tag(self) -> &'static str {
        match self {
            DimensionKind::SizeHint => "LIBINPUT_ATTR_SIZE_HINT",
            DimensionKind::ResolutionHint => "LIBINPUT_ATTR_RESOLUTION_HINT",
        }
    }

    /// Look up a dimension property by its exact tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A property that matched the catalogue
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum RecognizedProperty {
    /// `LIBINPUT_MODEL_*=1`
    ModelFlag { name: String },
    /// Size or resolution hint with its parsed value
    Dimension { kind: DimensionKind, value: Dimension },
}

impl RecognizedProperty {
    /// The property tag
    pub fn name(&self) -> &str {
        match self {
            RecognizedProperty::ModelFlag { name } => name,
            RecognizedProperty::Dimension { kind, .. } => kind.tag(),
        }
    }

    /// Dimension value for hint properties
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            RecognizedProperty::ModelFlag { .. } => None,
            RecognizedProperty::Dimension { value, .. } => Some(*value),
        }
    }
}

/// Compiled property catalogue
///
/// Holds the model-flag name pattern so it is compiled once per run
/// rather than once per property.
#[derive(Debug)]
pub struct PropertyGrammar {
    model_flag: Regex,
}

impl Default for PropertyGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyGrammar {
    pub fn new() -> Self {
        Self {
            model_flag: Regex::new(r"^LIBINPUT_MODEL_[_0-9A-Z]+$")
                .expect("model flag pattern should be valid regex"),
        }
    }

    /// Parse `TAG=value` text (comment already stripped)
    ///
    /// # Example
    /// ```ignore
    /// let grammar = PropertyGrammar::new();
    /// let prop = grammar.parse("LIBINPUT_ATTR_SIZE_HINT=10x5")?;
    /// assert_eq!(prop.dimension(), Some(Dimension::new(10, 5)));
    /// ```
    pub fn parse(&self, text: &str) -> Result<RecognizedProperty, PropertyError> {
        let failed = || PropertyError {
            text: text.to_string(),
        };

        let (tag, value) = text.split_once('=').ok_or_else(failed)?;
        self.parse_pair(tag, value).ok_or_else(failed)
    }

    /// Match a (tag, value) pair against the catalogue
    pub fn parse_pair(&self, tag: &str, value: &str) -> Option<RecognizedProperty> {
        if let Some(kind) = DimensionKind::from_tag(tag) {
            let (_, dimension) = all_consuming(parse_dimension).parse(value).ok()?;
            return Some(RecognizedProperty::Dimension {
                kind,
                value: dimension,
            });
        }

        if self.model_flag.is_match(tag) && value == "1" {
            return Some(RecognizedProperty::ModelFlag {
                name: tag.to_string(),
            });
        }

        None
    }
}

/// Remove an inline `#comment` and trailing whitespace
pub fn strip_comment(raw: &str) -> &str {
    raw.split_once('#').map_or(raw, |(head, _)| head).trim_end()
}

/// Parse an unsigned decimal integer that fits in a u32
pub fn parse_integer(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>).parse(input)
}

/// Parse `WIDTHxHEIGHT`
///
/// The separator is a lowercase `x` with no surrounding whitespace.
pub fn parse_dimension(input: &str) -> IResult<&str, Dimension> {
    map((parse_integer, char('x'), parse_integer), |(width, _, height)| {
        Dimension::new(width, height)
    })
    .parse(input)
}
