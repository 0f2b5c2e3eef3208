//! Integration tests covering file loading and the detection pipeline

pub mod file_loading_tests;
pub mod pipeline_tests;
