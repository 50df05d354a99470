//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Structural parser tests
//! - Validator tests (uniqueness, duplication, dimensions)
//! - Type tests (serialisation back to hwdb text)

#[cfg(test)]
mod parser_tests;
#[cfg(test)]
mod types_tests;
