//! Tests for consensus policies.

mod policy_tests;
