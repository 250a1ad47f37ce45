//! Repository interfaces for durable storage collaborators

pub mod user;

pub use user::{MockUserRepository, UserFilter, UserRepository};
