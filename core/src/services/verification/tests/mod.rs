//! Tests for the verification code gate
