//! Credential digesting

mod hasher;

pub use hasher::CredentialHasher;
