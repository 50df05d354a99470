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

//! src/core/parser.rs
//!
//! hwdb structural parser
//!
//! This module splits hwdb text into groups. It handles:
//! - Match lines (`libinput:name:*Touchpad*`)
//! - Property lines (` LIBINPUT_MODEL_FOO=1  # note`)
//! - Full-line comments in both the match and the property run
//! - Comment-only blocks terminated by a blank line
//! - Line numbers for error reporting
//!
//! # Architecture
//! Each line is classified with nom combinators, then a small state
//! machine assembles the classified lines into groups:
//!
//! ```text
//! Start ──match──▶ Header ──property──▶ Properties ──blank/EOF──▶ Start
//!   │                ▲ │                    │ ▲
//!   └──comment───────┘ └─blank (no match)─▶ Start (comment-only block)
//! ```
//!
//! Property values are kept as raw text. Their meaning is checked by
//! `core::property` once the whole run has been parsed.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, satisfy, space0},
    combinator::{all_consuming, opt, recognize, rest, value, verify},
    sequence::preceded,
    IResult, Parser,
};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::core::types::{Category, Connection, Group, MatchPattern, PropertyLine};

/// Why a file failed the line grammar
#[derive(Clone, Debug, Eq, Error, PartialEq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum ParseErrorKind {
    #[error("expected a match line, found '{0}'")]
    UnknownMatchPrefix(String),

    #[error("property line before any match line")]
    PropertyBeforeMatch,

    #[error("match lines must be followed by at least one property line")]
    MissingProperties,

    #[error("malformed property line '{0}'")]
    MalformedProperty(String),

    #[error("match line '{0}' must be preceded by a blank line")]
    MissingSeparator(String),

    #[error("unexpected blank line")]
    UnexpectedBlankLine,
}

/// Structural parse error with line number context
///
/// Fatal for the file it occurred in. `complete_groups` counts the
/// groups that were closed before the failure.
#[derive(Clone, Debug, Eq, Error, PartialEq, Serialize)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
    pub complete_groups: usize,
}

/// One line of hwdb text after classification
#[derive(Clone, Debug, PartialEq)]
pub enum Line<'a> {
    /// Empty line, a group separator
    Blank,
    /// `#` at column 0
    Comment,
    /// `#` preceded by spaces, only valid inside a property run
    IndentedComment,
    Match(MatchPattern),
    Property(PropertyLine),
    /// Starts with a space but is not a valid property line
    MalformedProperty(&'a str),
    /// Anything else
    Unrecognised(&'a str),
}

/// Parse a complete hwdb file
///
/// # Arguments
/// * `content` - The full file content as a string
/// * `file_path` - Path stored on every group for diagnostics
///
/// # Returns
/// Groups in file order, or the first structural error
///
/// # Example
/// ```ignore
/// let text = std::fs::read_to_string("60-evdev.hwdb")?;
/// let groups = parse_hwdb(&text, Path::new("60-evdev.hwdb"))?;
/// ```
pub fn parse_hwdb(content: &str, file_path: &Path) -> Result<Vec<Group>, ParseError> {
    let mut builder = GroupBuilder::new(file_path);

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1; // Human-readable numbers start at 1

        builder
            .feed(line_num, classify_line(line))
            .map_err(|kind| builder.error(line_num, kind))?;
    }

    let last_line = content.lines().count();
    builder
        .finish()
        .map_err(|kind| builder.error(last_line, kind))?;

    Ok(builder.groups)
}

/// Where the state machine is between lines
#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    /// Expecting a new group, a comment block or end of input
    Start,
    /// Inside the match run; `saw_match` is false for comment-only so far
    Header { saw_match: bool },
    /// Inside the property run
    Properties,
}

/// Accumulates classified lines into groups
struct GroupBuilder<'p> {
    path: &'p Path,
    state: State,
    groups: Vec<Group>,
    matches: Vec<MatchPattern>,
    properties: Vec<PropertyLine>,
    first_match_line: usize,
}

impl<'p> GroupBuilder<'p> {
    fn new(path: &'p Path) -> Self {
        Self {
            path,
            state: State::Start,
            groups: Vec::new(),
            matches: Vec::new(),
            properties: Vec::new(),
            first_match_line: 0,
        }
    }

    fn error(&self, line: usize, kind: ParseErrorKind) -> ParseError {
        ParseError {
            line,
            kind,
            complete_groups: self.groups.len(),
        }
    }

    fn push_match(&mut self, line_num: usize, mut pattern: MatchPattern) {
        pattern.line = line_num;
        if self.matches.is_empty() {
            self.first_match_line = line_num;
        }
        self.matches.push(pattern);
    }

    fn close_group(&mut self) {
        tracing::trace!(
            line = self.first_match_line,
            matches = self.matches.len(),
            properties = self.properties.len(),
            "closed group"
        );

        self.groups.push(Group {
            path: self.path.to_path_buf(),
            line: self.first_match_line,
            matches: std::mem::take(&mut self.matches),
            properties: std::mem::take(&mut self.properties),
        });
        self.state = State::Start;
    }

    fn feed(&mut self, line_num: usize, line: Line<'_>) -> Result<(), ParseErrorKind> {
        match (self.state, line) {
            // Between groups
            (State::Start, Line::Blank) => Err(ParseErrorKind::UnexpectedBlankLine),
            (State::Start, Line::Comment) => {
                self.state = State::Header { saw_match: false };
                Ok(())
            }
            (State::Start, Line::Match(pattern)) => {
                self.push_match(line_num, pattern);
                self.state = State::Header { saw_match: true };
                Ok(())
            }
            (State::Start, Line::Property(_) | Line::MalformedProperty(_)) => {
                Err(ParseErrorKind::PropertyBeforeMatch)
            }
            (State::Start, Line::IndentedComment) => {
                Err(ParseErrorKind::UnknownMatchPrefix(String::from("indented comment")))
            }
            (State::Start, Line::Unrecognised(text)) => {
                Err(ParseErrorKind::UnknownMatchPrefix(text.to_string()))
            }

            // Match run
            (State::Header { .. }, Line::Comment) => Ok(()),
            (State::Header { .. }, Line::Match(pattern)) => {
                self.push_match(line_num, pattern);
                self.state = State::Header { saw_match: true };
                Ok(())
            }
            (State::Header { saw_match: false }, Line::Blank) => {
                // Comment-only block
                self.state = State::Start;
                Ok(())
            }
            (State::Header { saw_match: true }, Line::Blank) => {
                Err(ParseErrorKind::MissingProperties)
            }
            (State::Header { saw_match: false }, Line::Property(_) | Line::MalformedProperty(_)) => {
                Err(ParseErrorKind::PropertyBeforeMatch)
            }
            (State::Header { saw_match: true }, Line::Property(mut prop)) => {
                prop.line = line_num;
                self.properties.push(prop);
                self.state = State::Properties;
                Ok(())
            }
            (State::Header { saw_match: true }, Line::MalformedProperty(text)) => {
                Err(ParseErrorKind::MalformedProperty(text.to_string()))
            }
            (State::Header { saw_match: false }, Line::IndentedComment) => {
                Err(ParseErrorKind::UnknownMatchPrefix(String::from("indented comment")))
            }
            (State::Header { saw_match: true }, Line::IndentedComment) => {
                // A property run may open with a comment, but still needs a property
                self.state = State::Properties;
                Ok(())
            }
            (State::Header { .. }, Line::Unrecognised(text)) => {
                Err(ParseErrorKind::UnknownMatchPrefix(text.to_string()))
            }

            // Property run
            (State::Properties, Line::Property(mut prop)) => {
                prop.line = line_num;
                self.properties.push(prop);
                Ok(())
            }
            (State::Properties, Line::Comment | Line::IndentedComment) => Ok(()),
            (State::Properties, Line::Blank) => {
                if self.properties.is_empty() {
                    return Err(ParseErrorKind::MissingProperties);
                }
                self.close_group();
                Ok(())
            }
            (State::Properties, Line::MalformedProperty(text)) => {
                Err(ParseErrorKind::MalformedProperty(text.to_string()))
            }
            (State::Properties, Line::Match(pattern)) => {
                Err(ParseErrorKind::MissingSeparator(pattern.to_string()))
            }
            (State::Properties, Line::Unrecognised(text)) => {
                Err(ParseErrorKind::UnknownMatchPrefix(text.to_string()))
            }
        }
    }

    /// End of input closes an open property run. A pending match run
    /// without properties is an error; pending comments are fine.
    fn finish(&mut self) -> Result<(), ParseErrorKind> {
        match self.state {
            State::Start | State::Header { saw_match: false } => {}
            State::Header { saw_match: true } => return Err(ParseErrorKind::MissingProperties),
            State::Properties => {
                if self.properties.is_empty() {
                    return Err(ParseErrorKind::MissingProperties);
                }
                self.close_group();
            }
        }

        Ok(())
    }
}

/// Classify one line of hwdb text
///
/// Match and property lines come back with `line` set to 0; the caller
/// fills in the real line number. The order matters: a line starting with a space is a comment if `#`
/// follows the indentation, otherwise it must be a property line.
pub fn classify_line(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }

    if all_consuming(parse_comment_line).parse(line).is_ok() {
        return Line::Comment;
    }

    if all_consuming(parse_indented_comment).parse(line).is_ok() {
        return Line::IndentedComment;
    }

    if line.starts_with(' ') {
        return match all_consuming(parse_property_line).parse(line) {
            Ok((_, (tag, value, comment))) => Line::Property(PropertyLine {
                line: 0,
                tag: tag.to_string(),
                value: value.to_string(),
                comment: comment.map(str::to_string),
            }),
            Err(_) => Line::MalformedProperty(line),
        };
    }

    match all_consuming(parse_match_line).parse(line) {
        Ok((_, pattern)) => Line::Match(pattern),
        Err(_) => Line::Unrecognised(line),
    }
}

/// Parse a full-line comment starting at column 0
pub fn parse_comment_line(input: &str) -> IResult<&str, &str> {
    preceded(char('#'), rest).parse(input)
}

/// Parse a comment preceded by at least one space
pub fn parse_indented_comment(input: &str) -> IResult<&str, &str> {
    preceded((char(' '), space0, char('#')), rest).parse(input)
}

/// Parse the category keyword of a match line
pub fn parse_category(input: &str) -> IResult<&str, Category> {
    value(Category::Libinput, tag("libinput")).parse(input)
}

/// Parse the connection keyword of a match line
pub fn parse_connection(input: &str) -> IResult<&str, Connection> {
    alt((
        value(Connection::Name, tag("name")),
        value(Connection::Touchpad, tag("touchpad")),
        value(Connection::Mouse, tag("mouse")),
    ))
    .parse(input)
}

/// Characters allowed in the free-text part of a match line
pub fn is_pattern_char(c: char) -> bool {
    c.is_ascii_graphic() || c == ' ' || c == '®'
}

/// Parse a match line
///
/// Format: CATEGORY:CONNECTION:PATTERN
/// Example: libinput:touchpad:input:b0003v05ACp*
///
/// The connection must be registered for the category that precedes it.
pub fn parse_match_line(input: &str) -> IResult<&str, MatchPattern> {
    let (input, category) = parse_category(input)?;
    let (input, _) = char(':').parse(input)?;
    let (input, connection) =
        verify(parse_connection, |c: &Connection| category.connections().contains(c)).parse(input)?;
    let (input, _) = char(':').parse(input)?;
    let (input, pattern) = take_while1(is_pattern_char).parse(input)?;

    Ok((input, MatchPattern::new(category, connection, pattern)))
}

/// Characters allowed in a raw property value
pub fn is_value_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_=:@*.! ".contains(c)
}

/// Parse a property tag: an uppercase letter, then letters, digits or `_`
pub fn parse_property_tag(input: &str) -> IResult<&str, &str> {
    recognize((
        satisfy(|c| c.is_ascii_uppercase()),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

/// Parse a property line
///
/// Format: ` TAG=VALUE[#COMMENT]` with exactly one leading space
///
/// Returns (tag, raw value, comment without `#`)
pub fn parse_property_line(input: &str) -> IResult<&str, (&str, &str, Option<&str>)> {
    let (input, _) = char(' ').parse(input)?;
    let (input, tag_name) = parse_property_tag(input)?;
    let (input, _) = char('=').parse(input)?;
    let (input, raw_value) = take_while1(is_value_char).parse(input)?;
    let (input, comment) = opt(preceded(char('#'), rest)).parse(input)?;

    Ok((input, (tag_name, raw_value, comment)))
}
