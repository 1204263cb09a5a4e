//! Crate-internal test suites.

mod property_tests;
