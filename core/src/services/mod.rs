//! Business services

pub mod credential;
pub mod identity;
pub mod permission;
pub mod verification;

pub use credential::CredentialHasher;
pub use identity::IdentityService;
pub use permission::PermissionAggregator;
pub use verification::{CodePurpose, CodeStore, MailService, VerificationCodeGate, VerificationConfig};
