//! Tests for ensemble configuration.
//!
//! - `validation_tests` - parameter bounds
//! - `toml_tests` - file and string loading
