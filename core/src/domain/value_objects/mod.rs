//! Value objects: views and outcomes exposed at the service boundary

pub mod auth_view;
pub mod outcome;
pub mod profile_changes;
pub mod user_views;

pub use auth_view::AuthenticatedUser;
pub use outcome::WriteOutcome;
pub use profile_changes::ProfileChanges;
pub use user_views::{UserDetail, UserListItem, UserPage, UserSummary};
