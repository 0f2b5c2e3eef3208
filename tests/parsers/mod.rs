//! Parser integration tests organized by log format
//!
//! Each format has its own test module with tests for:
//! - Parsing of fixture files
//! - Transform rules applied while parsing
//! - Edge cases and error handling

pub mod skysense_tests;
