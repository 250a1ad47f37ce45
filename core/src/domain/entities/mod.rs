//! Domain entities

pub mod permission;
pub mod role;
pub mod user;

pub use permission::Permission;
pub use role::Role;
pub use user::User;
