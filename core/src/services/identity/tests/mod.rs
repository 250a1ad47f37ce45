//! Tests for the identity service

mod service_tests;
