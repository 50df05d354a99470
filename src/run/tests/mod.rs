//! Run driver tests
//!
//! Contains test suites for the file-level driver:
//! - Per-file summaries and exit status
//! - Cross-file duplicate detection
//! - Unreadable and structurally broken files
