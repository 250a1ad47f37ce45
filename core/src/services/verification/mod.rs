//! Verification code gate
//!
//! Issues and checks short-lived one-time codes scoped by purpose and
//! recipient address. The codes live in an external TTL cache behind the
//! [`CodeStore`] trait; delivery goes through the [`MailService`] trait.

mod config;
mod service;
mod traits;
mod types;

pub mod mock;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use service::VerificationCodeGate;
pub use traits::{CodeStore, MailService};
pub use types::CodePurpose;
