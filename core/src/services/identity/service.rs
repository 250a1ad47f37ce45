//! Identity service implementation

use std::collections::HashMap;
use std::sync::Arc;

use tracing;
use uuid::Uuid;

use gp_shared::types::Pagination;

use crate::domain::entities::{Permission, User};
use crate::domain::value_objects::{
    AuthenticatedUser, UserDetail, UserListItem, UserPage, UserSummary, WriteOutcome,
};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{UserFilter, UserRepository};
use crate::services::credential::CredentialHasher;
use crate::services::permission::PermissionAggregator;
use crate::services::verification::{CodePurpose, CodeStore, MailService, VerificationCodeGate};

use super::types::{RegisterRequest, UpdatePasswordRequest, UpdateProfileRequest};

/// Identity service orchestrating the account lifecycle
///
/// Write paths that sit behind the code gate (register, password update,
/// profile update) soft-fail on storage errors: the error is logged and
/// reduced to [`WriteOutcome::Failure`]. Read paths and freeze propagate
/// storage errors as-is.
pub struct IdentityService<R, C, M>
where
    R: UserRepository,
    C: CodeStore,
    M: MailService,
{
    /// User repository for durable lookups and writes
    user_repository: Arc<R>,
    /// Gate issuing and checking one-time codes
    code_gate: Arc<VerificationCodeGate<C>>,
    /// Outbound channel delivering issued codes
    mail_service: Arc<M>,
}

impl<R, C, M> IdentityService<R, C, M>
where
    R: UserRepository,
    C: CodeStore,
    M: MailService,
{
    /// Create a new identity service
    pub fn new(
        user_repository: Arc<R>,
        code_gate: Arc<VerificationCodeGate<C>>,
        mail_service: Arc<M>,
    ) -> Self {
        Self {
            user_repository,
            code_gate,
            mail_service,
        }
    }

    /// Issue a verification code and deliver it by mail
    ///
    /// The code is stored before delivery is attempted; a delivery failure
    /// surfaces as `DomainError::Mail` but does not remove the stored code.
    ///
    /// # Returns
    /// The mail provider's message id.
    pub async fn send_verification_code(
        &self,
        purpose: CodePurpose,
        address: &str,
    ) -> DomainResult<String> {
        let code = self.code_gate.issue(purpose, address).await?;

        let body = format!("<p>Your verification code is {code}</p>");
        let message_id = self
            .mail_service
            .send(address, purpose.mail_subject(), &body)
            .await
            .map_err(|e| {
                tracing::error!(
                    purpose = purpose.as_str(),
                    address = address,
                    error = %e,
                    event = "code_delivery_failed",
                    "Failed to deliver verification code"
                );
                DomainError::Mail { message: e }
            })?;

        Ok(message_id)
    }

    /// Register a new non-admin account
    ///
    /// Steps: check the register code for the request email, reject a
    /// username already taken in the non-admin namespace, digest the
    /// password, persist.
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<WriteOutcome> {
        self.code_gate
            .verify(CodePurpose::Register, &request.email, &request.code)
            .await?;

        let existing = self
            .user_repository
            .find_by_username(&request.username, false)
            .await?;
        if existing.is_some() {
            return Err(AuthError::DuplicateUser.into());
        }

        let user = User::new(
            request.username,
            CredentialHasher::hash(&request.password),
            request.email,
            request.nickname,
        );

        let username = user.username.clone();
        let outcome = self.save_soft(user, "register").await?;
        if outcome.is_success() {
            tracing::info!(username = %username, event = "user_registered", "Registered new user");
        }
        Ok(outcome)
    }

    /// Authenticate a user within one admin namespace
    ///
    /// # Returns
    /// * `Ok(AuthenticatedUser)` - identity fields plus role names and
    ///   aggregated permission names; never the password digest
    /// * `Err(AuthError::UserNotFound)` - no such username in the namespace
    /// * `Err(AuthError::BadCredential)` - digest mismatch
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        as_admin: bool,
    ) -> DomainResult<AuthenticatedUser> {
        let user = self
            .user_repository
            .find_by_username(username, as_admin)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !CredentialHasher::matches(password, &user.password_digest) {
            tracing::warn!(
                username = username,
                as_admin = as_admin,
                event = "login_rejected",
                "Password mismatch"
            );
            return Err(AuthError::BadCredential.into());
        }

        let (roles, permissions) = self.resolve_access(&user).await?;
        Ok(AuthenticatedUser::new(&user, roles, permissions))
    }

    /// Look up a user by id within one admin namespace
    pub async fn find_by_id(&self, user_id: Uuid, as_admin: bool) -> DomainResult<UserSummary> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .filter(|u| u.is_admin == as_admin)
            .ok_or(AuthError::UserNotFound)?;

        let (roles, permissions) = self.resolve_access(&user).await?;
        Ok(UserSummary::new(&user, roles, permissions))
    }

    /// Full profile of a single user, without the password digest
    pub async fn find_detail_by_id(&self, user_id: Uuid) -> DomainResult<UserDetail> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(UserDetail::from(&user))
    }

    /// Replace a user's password, gated by an update-password code
    pub async fn update_password(
        &self,
        user_id: Uuid,
        request: UpdatePasswordRequest,
    ) -> DomainResult<WriteOutcome> {
        self.code_gate
            .verify(CodePurpose::UpdatePassword, &request.email, &request.code)
            .await?;

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.set_password_digest(CredentialHasher::hash(&request.password));
        self.save_soft(user, "update_password").await
    }

    /// Apply a partial profile update, gated by an update-profile code
    ///
    /// Absent fields are left unchanged.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> DomainResult<WriteOutcome> {
        self.code_gate
            .verify(CodePurpose::UpdateProfile, &request.email, &request.code)
            .await?;

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.apply_profile(&request.changes());
        self.save_soft(user, "update_profile").await
    }

    /// Freeze an account
    ///
    /// Recorded state only: this core keeps accepting logins for frozen
    /// accounts; enforcement belongs to the caller. No code gate.
    pub async fn freeze(&self, user_id: Uuid) -> DomainResult<()> {
        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.freeze();
        self.user_repository.save(user).await?;

        tracing::info!(user_id = %user_id, event = "user_frozen", "Froze user account");
        Ok(())
    }

    /// Paginated user search
    ///
    /// Present filters match as substrings and are ANDed. The returned
    /// total counts every match before pagination.
    ///
    /// # Errors
    /// `AuthError::InvalidPage` when `pagination.page < 1`.
    pub async fn search(
        &self,
        filter: UserFilter,
        pagination: Pagination,
    ) -> DomainResult<UserPage> {
        if pagination.page < 1 {
            return Err(AuthError::InvalidPage {
                page_no: pagination.page as i64,
            }
            .into());
        }

        let (users, total_count) = self
            .user_repository
            .find_page(&filter, pagination.offset(), pagination.limit())
            .await?;

        Ok(UserPage {
            users: users.iter().map(UserListItem::from).collect(),
            total_count,
        })
    }

    /// Resolve role names and aggregated permission names for a user
    async fn resolve_access(&self, user: &User) -> DomainResult<(Vec<String>, Vec<String>)> {
        let roles = self.user_repository.load_roles(&user.role_ids).await?;

        let permission_ids: Vec<Uuid> = roles
            .iter()
            .flat_map(|role| role.permission_ids.iter().copied())
            .collect();
        let permissions = self.user_repository.load_permissions(&permission_ids).await?;
        let permissions_by_id: HashMap<Uuid, Permission> =
            permissions.into_iter().map(|p| (p.id, p)).collect();

        let permission_names = PermissionAggregator::aggregate(&roles, &permissions_by_id);
        let role_names = roles.into_iter().map(|role| role.name).collect();

        Ok((role_names, permission_names))
    }

    /// Persist a gated write, reducing storage errors to a soft outcome
    ///
    /// A uniqueness violation raised by the store is re-surfaced as the
    /// domain rejection it represents instead of being swallowed.
    async fn save_soft(&self, user: User, action: &'static str) -> DomainResult<WriteOutcome> {
        match self.user_repository.save(user).await {
            Ok(_) => Ok(WriteOutcome::Success),
            Err(DomainError::Auth(err)) => Err(err.into()),
            Err(e) => {
                tracing::error!(
                    action = action,
                    error = %e,
                    event = "write_failed",
                    "Storage failure on gated write"
                );
                Ok(WriteOutcome::Failure)
            }
        }
    }
}
