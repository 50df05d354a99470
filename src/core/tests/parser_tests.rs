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

//! Parser module tests
//!
//! Tests for the structural hwdb grammar:
//! - Match line parsing (registered prefixes, pattern characters)
//! - Property line parsing (tag, value, inline comment)
//! - Group assembly and comment-only blocks
//! - Structural errors with line numbers

use crate::core::{
    parser::*,
    types::{Category, Connection},
};
use std::path::Path;

fn parse(content: &str) -> Result<Vec<crate::core::Group>, ParseError> {
    parse_hwdb(content, Path::new("test.hwdb"))
}

#[test]
fn test_parse_match_line() {
    let (_, m) = parse_match_line("libinput:touchpad:input:b0003v05ACp*").unwrap();
    assert_eq!(m.category, Category::Libinput);
    assert_eq!(m.connection, Connection::Touchpad);
    assert_eq!(m.pattern, "input:b0003v05ACp*");

    let (_, m) = parse_match_line("libinput:name:*SynPS/2 Synaptics TouchPad*").unwrap();
    assert_eq!(m.connection, Connection::Name);
    assert_eq!(m.pattern, "*SynPS/2 Synaptics TouchPad*");

    let (_, m) = parse_match_line("libinput:mouse:*Logitech® Mouse*").unwrap();
    assert_eq!(m.pattern, "*Logitech® Mouse*");
}

#[test]
fn test_parse_match_line_rejects_unregistered_prefix() {
    assert!(parse_match_line("evdev:name:*Foo*").is_err());
    assert!(parse_match_line("libinput:keyboard:*Foo*").is_err());
    assert!(parse_match_line("libinput:name:").is_err());
    assert!(parse_match_line("libinput:name*Foo*").is_err());
}

#[test]
fn test_parse_property_line() {
    let (_, (tag, value, comment)) = parse_property_line(" LIBINPUT_MODEL_FOO=1").unwrap();
    assert_eq!(tag, "LIBINPUT_MODEL_FOO");
    assert_eq!(value, "1");
    assert_eq!(comment, None);

    let (_, (tag, value, comment)) =
        parse_property_line(" LIBINPUT_ATTR_SIZE_HINT=10x5 # mm").unwrap();
    assert_eq!(tag, "LIBINPUT_ATTR_SIZE_HINT");
    assert_eq!(value, "10x5 ");
    assert_eq!(comment, Some(" mm"));
}

#[test]
fn test_parse_property_line_needs_exactly_one_space() {
    assert!(parse_property_line("LIBINPUT_MODEL_FOO=1").is_err());
    assert!(parse_property_line("  LIBINPUT_MODEL_FOO=1").is_err());
    assert!(parse_property_line(" libinput_model_foo=1").is_err());
    assert!(parse_property_line(" LIBINPUT_MODEL_FOO=").is_err());
}

#[test]
fn test_classify_line() {
    assert_eq!(classify_line(""), Line::Blank);
    assert_eq!(classify_line("# comment"), Line::Comment);
    assert_eq!(classify_line("   # comment"), Line::IndentedComment);
    assert!(matches!(classify_line("libinput:name:X"), Line::Match(_)));
    assert!(matches!(classify_line(" LIBINPUT_MODEL_X=1"), Line::Property(_)));
    assert_eq!(classify_line(" bad line"), Line::MalformedProperty(" bad line"));
    assert_eq!(classify_line("garbage"), Line::Unrecognised("garbage"));
}

#[test]
fn test_parse_single_group() {
    let groups = parse("libinput:name:*Foo*\n LIBINPUT_MODEL_FOO=1\n").unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].line, 1);
    assert_eq!(groups[0].match_count(), 1);
    assert_eq!(groups[0].property_count(), 1);
    assert_eq!(groups[0].properties[0].line, 2);
    assert_eq!(groups[0].path, Path::new("test.hwdb"));
}

#[test]
fn test_parse_multiple_groups() {
    let content = "\
libinput:name:A
libinput:mouse:B
 LIBINPUT_MODEL_A=1

libinput:touchpad:C
 LIBINPUT_MODEL_C=1
 LIBINPUT_ATTR_SIZE_HINT=10x5
";
    let groups = parse(content).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].match_count(), 2);
    assert_eq!(groups[1].line, 5);
    assert_eq!(groups[1].property_count(), 2);
    assert_eq!(groups[1].properties[1].line, 7);
}

#[test]
fn test_comment_only_block_produces_no_group() {
    let content = "\
# This file is part of the hwdb
# Another comment

libinput:name:A
 LIBINPUT_MODEL_A=1
";
    let groups = parse(content).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].line, 4);
}

#[test]
fn test_comments_inside_group_are_skipped() {
    let content = "\
# Describes the next match
libinput:name:A
# Between matches
libinput:name:B
 # Before the property
 LIBINPUT_MODEL_A=1
# Column zero in the property run
 LIBINPUT_ATTR_SIZE_HINT=10x5 # mm
";
    let groups = parse(content).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].match_count(), 2);
    assert_eq!(groups[0].property_count(), 2);
    assert_eq!(groups[0].properties[1].comment.as_deref(), Some(" mm"));
}

#[test]
fn test_empty_and_comment_only_files() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("# just a comment\n").unwrap().is_empty());
    assert!(parse("# just a comment\n\n").unwrap().is_empty());
}

#[test]
fn test_trailing_blank_line_and_missing_newline() {
    assert_eq!(parse("libinput:name:A\n LIBINPUT_MODEL_A=1\n\n").unwrap().len(), 1);
    assert_eq!(parse("libinput:name:A\n LIBINPUT_MODEL_A=1").unwrap().len(), 1);
}

#[test]
fn test_property_before_match() {
    let err = parse(" LIBINPUT_MODEL_A=1\n").unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(err.kind, ParseErrorKind::PropertyBeforeMatch);

    let err = parse("# comment\n LIBINPUT_MODEL_A=1\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, ParseErrorKind::PropertyBeforeMatch);
}

#[test]
fn test_unknown_match_prefix() {
    let err = parse("evdev:name:A\n LIBINPUT_MODEL_A=1\n").unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(
        err.kind,
        ParseErrorKind::UnknownMatchPrefix("evdev:name:A".to_string())
    );
}

#[test]
fn test_unknown_prefix_after_properties() {
    let err = parse("libinput:name:A\n LIBINPUT_MODEL_A=1\nevdev:name:X\n").unwrap_err();
    assert_eq!(err.line, 3);
    assert_eq!(
        err.kind,
        ParseErrorKind::UnknownMatchPrefix("evdev:name:X".to_string())
    );
}

#[test]
fn test_match_lines_carry_their_line_numbers() {
    let groups = parse("# header\nlibinput:name:A\n# note\nlibinput:name:B\n LIBINPUT_MODEL_A=1\n").unwrap();
    let lines: Vec<usize> = groups[0].matches.iter().map(|m| m.line).collect();
    assert_eq!(lines, vec![2, 4]);
}

#[test]
fn test_double_blank_line_is_fatal() {
    let content = "\
libinput:name:A
 LIBINPUT_MODEL_A=1


libinput:name:B
 LIBINPUT_MODEL_B=1
";
    let err = parse(content).unwrap_err();

    assert_eq!(err.line, 4);
    assert_eq!(err.kind, ParseErrorKind::UnexpectedBlankLine);
    assert_eq!(err.complete_groups, 1);
}

#[test]
fn test_match_without_properties() {
    let err = parse("libinput:name:A\n\nlibinput:name:B\n LIBINPUT_MODEL_B=1\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.kind, ParseErrorKind::MissingProperties);

    let err = parse("libinput:name:A\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingProperties);

    let err = parse("libinput:name:A\n # only a comment\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingProperties);
}

#[test]
fn test_match_after_properties_needs_blank_line() {
    let err = parse("libinput:name:A\n LIBINPUT_MODEL_A=1\nlibinput:name:B\n").unwrap_err();
    assert_eq!(err.line, 3);
    assert!(matches!(err.kind, ParseErrorKind::MissingSeparator(_)));
}

#[test]
fn test_malformed_property_line() {
    let err = parse("libinput:name:A\n  LIBINPUT_MODEL_A=1\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(matches!(err.kind, ParseErrorKind::MalformedProperty(_)));
}

#[test]
fn test_unknown_tag_is_structurally_valid() {
    // Catalogue membership is checked by the validator, not the parser
    let groups = parse("libinput:name:A\n LIBINPUT_FOO=1\n").unwrap();
    assert_eq!(groups[0].properties[0].tag, "LIBINPUT_FOO");
}

#[test]
fn test_parse_error_display() {
    let err = parse("libinput:name:A\n\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 2: match lines must be followed by at least one property line"
    );
}
