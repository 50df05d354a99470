//! Group serialisation tests
//!
//! Parsing then printing a group must give back the input lines, minus
//! any full-line comments.

use crate::core::parser::parse_hwdb;
use std::path::Path;

fn roundtrip(content: &str) -> String {
    let groups = parse_hwdb(content, Path::new("test.hwdb")).unwrap();
    groups
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_group_roundtrip_without_comments() {
    let content = "\
libinput:name:*SynPS/2 Synaptics TouchPad*
libinput:touchpad:input:b0003v05ACp*
 LIBINPUT_MODEL_SYNAPTICS_SERIAL_TOUCHPAD=1
 LIBINPUT_ATTR_SIZE_HINT=100x60  # measured

libinput:mouse:*Logitech*
 LIBINPUT_ATTR_RESOLUTION_HINT=40x40
";

    assert_eq!(roundtrip(content), content);
}

#[test]
fn test_group_roundtrip_drops_comment_lines() {
    let content = "\
# header

# above the match
libinput:name:A
 # above the property
 LIBINPUT_MODEL_A=1
";
    let expected: String = content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#') && !line.is_empty())
        .map(|line| format!("{}\n", line))
        .collect();

    assert_eq!(roundtrip(content), expected);
}
