//! Integration tests for mediafind
//!
//! Tests are organized by component:
//! - catalog_test: classification, rendering and preview selection
//! - itunes_test: iTunes Search API client tests
//! - shell_test: interactive conversations against a mock API
//! - cli_test: argument parsing and one-shot commands

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
