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

//! src/core/types.rs
//!
//! Core type definitions for the hwdb format
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Category` / `Connection`: The fixed registry of match-line prefixes
//! - `MatchPattern`: A `category:connection:pattern` device key
//! - `PropertyLine`: A raw ` TAG=value#comment` line awaiting semantic parsing
//! - `Group`: Match patterns paired with the property lines that apply to them
//! - `Dimension`: A `WIDTHxHEIGHT` pair extracted from a hint property

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::core::property::strip_comment;

/// Match-line category
///
/// The hwdb format only registers one category today. Each category owns
/// the set of connection kinds that may follow it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// `libinput:` prefix
    Libinput,
}

impl Category {
    /// Every registered category
    pub const ALL: &'static [Category] = &[Category::Libinput];

    /// Keyword as it appears in a match line
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Libinput => "libinput",
        }
    }

    /// Connection kinds registered for this category
    pub const fn connections(self) -> &'static [Connection] {
        match self {
            Category::Libinput => &[Connection::Name, Connection::Touchpad, Connection::Mouse],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection kind following the category in a match line
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Connection {
    /// Matches on the kernel device name
    Name,
    /// Touchpad devices
    Touchpad,
    /// Mouse devices
    Mouse,
}

impl Connection {
    /// Keyword as it appears in a match line
    pub const fn as_str(self) -> &'static str {
        match self {
            Connection::Name => "name",
            Connection::Touchpad => "touchpad",
            Connection::Mouse => "mouse",
        }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `category:connection:pattern` device key
///
/// The pattern part is stored verbatim. Glob characters (`*`, `?`) are
/// not interpreted; two patterns are the same key only if their full
/// text is identical.
///
/// # Example
/// ```ignore
/// let m = MatchPattern::new(Category::Libinput, Connection::Name, "*Synaptics*");
/// assert_eq!(m.to_string(), "libinput:name:*Synaptics*");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct MatchPattern {
    /// Registry category (always `libinput` today)
    pub category: Category,

    /// Connection kind within the category
    pub connection: Connection,

    /// Free-text pattern, never empty
    pub pattern: String,

    /// 1-based line number in the source file
    pub line: usize,
}

impl MatchPattern {
    /// Create a new MatchPattern with `line` unset (0)
    pub fn new(category: Category, connection: Connection, pattern: impl Into<String>) -> Self {
        Self {
            category,
            connection,
            pattern: pattern.into(),
            line: 0,
        }
    }
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.category, self.connection, self.pattern)
    }
}

/// A property line as it appeared in the file, minus the leading space
///
/// `value` keeps everything between `=` and the comment marker, including
/// trailing spaces. `comment` is the text after `#`, if any.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PropertyLine {
    /// 1-based line number in the source file
    pub line: usize,

    /// Property tag (e.g. `LIBINPUT_MODEL_APPLE_TOUCHPAD`)
    pub tag: String,

    /// Raw value text
    pub value: String,

    /// Inline comment without the leading `#`
    pub comment: Option<String>,
}

impl PropertyLine {
    /// `TAG=value` with the inline comment removed and trailing
    /// whitespace trimmed. This is what the property grammar sees.
    pub fn without_comment(&self) -> String {
        strip_comment(&self.to_string()).to_string()
    }
}

impl fmt::Display for PropertyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, self.value)?;

        if let Some(comment) = &self.comment {
            write!(f, "#{}", comment)?;
        }

        Ok(())
    }
}

/// One block of the database: matches followed by properties
///
/// Groups are the unit of property validation. Match uniqueness is
/// checked across every group of a run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Group {
    /// File the group was read from
    pub path: PathBuf,

    /// Line number of the first match line
    pub line: usize,

    /// Match patterns in file order
    pub matches: Vec<MatchPattern>,

    /// Property lines in file order
    pub properties: Vec<PropertyLine>,
}

impl Group {
    /// Number of match patterns in this group
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Number of property lines in this group
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

/// Serialises the group back to hwdb text, one line per match and
/// property. Full-line comments are not kept by the parser, so they do
/// not reappear here.
impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.matches {
            writeln!(f, "{}", m)?;
        }
        for p in &self.properties {
            writeln!(f, " {}", p)?;
        }
        Ok(())
    }
}

/// Width and height from a dimension-hint property
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

impl Dimension {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both components strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
