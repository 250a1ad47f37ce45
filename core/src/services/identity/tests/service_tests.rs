//! Unit tests for the identity service

use std::sync::Arc;

use uuid::Uuid;

use gp_shared::types::Pagination;

use crate::domain::entities::{Permission, Role, User};
use crate::domain::value_objects::WriteOutcome;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{MockUserRepository, UserFilter, UserRepository};
use crate::services::credential::CredentialHasher;
use crate::services::identity::{
    IdentityService, RegisterRequest, UpdatePasswordRequest, UpdateProfileRequest,
};
use crate::services::verification::mock::{MockCodeStore, MockMailService};
use crate::services::verification::{CodePurpose, VerificationCodeGate, VerificationConfig};

struct Fixture {
    repo: Arc<MockUserRepository>,
    store: Arc<MockCodeStore>,
    gate: Arc<VerificationCodeGate<MockCodeStore>>,
    mail: Arc<MockMailService>,
    service: IdentityService<MockUserRepository, MockCodeStore, MockMailService>,
}

fn fixture() -> Fixture {
    fixture_with_mail(MockMailService::new(false))
}

fn fixture_with_mail(mail: MockMailService) -> Fixture {
    let repo = Arc::new(MockUserRepository::new());
    let store = Arc::new(MockCodeStore::new(false));
    let gate = Arc::new(VerificationCodeGate::new(
        store.clone(),
        VerificationConfig::default(),
    ));
    let mail = Arc::new(mail);
    let service = IdentityService::new(repo.clone(), gate.clone(), mail.clone());
    Fixture {
        repo,
        store,
        gate,
        mail,
        service,
    }
}

fn register_request(username: &str, email: &str, code: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        password: "pw1".to_string(),
        email: email.to_string(),
        nickname: username.to_string(),
        code: code.to_string(),
    }
}

async fn seed_user(fx: &Fixture, username: &str, password: &str, is_admin: bool) -> User {
    let mut user = User::new(
        username.to_string(),
        CredentialHasher::hash(password),
        format!("{username}@example.com"),
        username.to_string(),
    );
    user.is_admin = is_admin;
    fx.repo.insert_user(user.clone()).await;
    user
}

fn expect_auth_err<T: std::fmt::Debug>(result: Result<T, DomainError>, expected: AuthError) {
    match result.unwrap_err() {
        DomainError::Auth(err) => assert_eq!(err, expected),
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_register_succeeds_with_valid_code() {
    let fx = fixture();
    let code = fx.gate.issue(CodePurpose::Register, "a@x.com").await.unwrap();

    let outcome = fx
        .service
        .register(register_request("alice", "a@x.com", &code))
        .await
        .unwrap();
    assert_eq!(outcome, WriteOutcome::Success);

    let stored = fx
        .repo
        .find_by_username("alice", false)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.email, "a@x.com");
    assert!(!stored.is_admin);
    assert!(!stored.is_frozen);
    // The plaintext is never persisted.
    assert_ne!(stored.password_digest, "pw1");
    assert_eq!(stored.password_digest, CredentialHasher::hash("pw1"));
}

#[tokio::test]
async fn test_register_rejects_missing_code_as_expired() {
    let fx = fixture();

    expect_auth_err(
        fx.service
            .register(register_request("alice", "a@x.com", "123456"))
            .await,
        AuthError::CodeExpired,
    );
}

#[tokio::test]
async fn test_register_rejects_wrong_code_as_mismatch() {
    let fx = fixture();
    let code = fx.gate.issue(CodePurpose::Register, "a@x.com").await.unwrap();
    let wrong = if code == "999999" { "999998" } else { "999999" };

    expect_auth_err(
        fx.service
            .register(register_request("alice", "a@x.com", wrong))
            .await,
        AuthError::CodeMismatch,
    );
}

#[tokio::test]
async fn test_register_rejects_duplicate_username_even_with_fresh_code() {
    let fx = fixture();

    let code = fx.gate.issue(CodePurpose::Register, "a@x.com").await.unwrap();
    fx.service
        .register(register_request("alice", "a@x.com", &code))
        .await
        .unwrap();

    let fresh = fx.gate.issue(CodePurpose::Register, "b@x.com").await.unwrap();
    expect_auth_err(
        fx.service
            .register(register_request("alice", "b@x.com", &fresh))
            .await,
        AuthError::DuplicateUser,
    );
}

#[tokio::test]
async fn test_register_duplicate_check_is_scoped_to_non_admin_namespace() {
    let fx = fixture();
    seed_user(&fx, "alice", "admin-pw", true).await;

    let code = fx.gate.issue(CodePurpose::Register, "a@x.com").await.unwrap();
    let outcome = fx
        .service
        .register(register_request("alice", "a@x.com", &code))
        .await
        .unwrap();
    assert_eq!(outcome, WriteOutcome::Success);
}

#[tokio::test]
async fn test_register_storage_failure_soft_fails() {
    let fx = fixture();
    let code = fx.gate.issue(CodePurpose::Register, "a@x.com").await.unwrap();

    fx.repo.set_fail_writes(true);
    let outcome = fx
        .service
        .register(register_request("alice", "a@x.com", &code))
        .await
        .unwrap();
    assert_eq!(outcome, WriteOutcome::Failure);
}

#[tokio::test]
async fn test_register_does_not_consume_the_code() {
    let fx = fixture();
    let code = fx.gate.issue(CodePurpose::Register, "a@x.com").await.unwrap();

    fx.service
        .register(register_request("alice", "a@x.com", &code))
        .await
        .unwrap();

    // The same code still gates a second registration for the address.
    let outcome = fx
        .service
        .register(register_request("bob", "a@x.com", &code))
        .await
        .unwrap();
    assert_eq!(outcome, WriteOutcome::Success);
}

#[tokio::test]
async fn test_login_builds_view_with_roles_and_aggregated_permissions() {
    let fx = fixture();

    let read = Permission::new("doc:read".to_string(), "read".to_string());
    let write = Permission::new("doc:write".to_string(), "write".to_string());
    let admin = Permission::new("doc:admin".to_string(), "admin".to_string());
    let editors = Role::new("editors".to_string(), vec![read.id, write.id]);
    let owners = Role::new("owners".to_string(), vec![write.id, admin.id]);

    fx.repo.insert_permission(read.clone()).await;
    fx.repo.insert_permission(write.clone()).await;
    fx.repo.insert_permission(admin.clone()).await;
    fx.repo.insert_role(editors.clone()).await;
    fx.repo.insert_role(owners.clone()).await;

    let mut user = seed_user(&fx, "alice", "correct-pw", false).await;
    user.role_ids = vec![editors.id, owners.id];
    user.phone_number = Some("13233333333".to_string());
    fx.repo.insert_user(user.clone()).await;

    let view = fx.service.login("alice", "correct-pw", false).await.unwrap();

    assert_eq!(view.id, user.id);
    assert_eq!(view.username, "alice");
    assert_eq!(view.phone_number.as_deref(), Some("13233333333"));
    assert_eq!(view.created_at_ms, user.created_at.timestamp_millis());
    assert!(!view.is_frozen);
    assert!(!view.is_admin);
    assert_eq!(view.roles, vec!["editors", "owners"]);
    // Overlapping grants are deduplicated, first occurrence wins.
    assert_eq!(view.permissions, vec!["read", "write", "admin"]);
}

#[tokio::test]
async fn test_login_namespace_isolation() {
    let fx = fixture();
    seed_user(&fx, "alice", "correct-pw", true).await;

    // The username exists only in the admin namespace.
    expect_auth_err(
        fx.service.login("alice", "correct-pw", false).await,
        AuthError::UserNotFound,
    );
    assert!(fx.service.login("alice", "correct-pw", true).await.is_ok());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let fx = fixture();
    seed_user(&fx, "alice", "correct-pw", false).await;

    expect_auth_err(
        fx.service.login("alice", "wrong-pw", false).await,
        AuthError::BadCredential,
    );
}

#[tokio::test]
async fn test_find_by_id_checks_namespace() {
    let fx = fixture();
    let user = seed_user(&fx, "alice", "pw", false).await;

    let summary = fx.service.find_by_id(user.id, false).await.unwrap();
    assert_eq!(summary.username, "alice");
    assert!(!summary.is_admin);
    assert!(summary.roles.is_empty());

    expect_auth_err(
        fx.service.find_by_id(user.id, true).await,
        AuthError::UserNotFound,
    );
}

#[tokio::test]
async fn test_find_detail_by_id() {
    let fx = fixture();
    let user = seed_user(&fx, "alice", "pw", false).await;

    let detail = fx.service.find_detail_by_id(user.id).await.unwrap();
    assert_eq!(detail.id, user.id);
    assert_eq!(detail.email, "alice@example.com");

    expect_auth_err(
        fx.service.find_detail_by_id(Uuid::new_v4()).await,
        AuthError::UserNotFound,
    );
}

#[tokio::test]
async fn test_update_password_flow() {
    let fx = fixture();
    let user = seed_user(&fx, "alice", "old-pw", false).await;

    // The code address is the one in the request, not the account's email.
    let code = fx
        .gate
        .issue(CodePurpose::UpdatePassword, "other@x.com")
        .await
        .unwrap();
    let outcome = fx
        .service
        .update_password(
            user.id,
            UpdatePasswordRequest {
                email: "other@x.com".to_string(),
                code,
                password: "new-pw".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome, WriteOutcome::Success);

    assert!(fx.service.login("alice", "new-pw", false).await.is_ok());
    expect_auth_err(
        fx.service.login("alice", "old-pw", false).await,
        AuthError::BadCredential,
    );
}

#[tokio::test]
async fn test_update_password_unknown_user() {
    let fx = fixture();
    let code = fx
        .gate
        .issue(CodePurpose::UpdatePassword, "a@x.com")
        .await
        .unwrap();

    expect_auth_err(
        fx.service
            .update_password(
                Uuid::new_v4(),
                UpdatePasswordRequest {
                    email: "a@x.com".to_string(),
                    code,
                    password: "new-pw".to_string(),
                },
            )
            .await,
        AuthError::UserNotFound,
    );
}

#[tokio::test]
async fn test_update_password_rejects_code_from_other_purpose() {
    let fx = fixture();
    let user = seed_user(&fx, "alice", "pw", false).await;

    // A register code lives under a different key, so the update check
    // sees no outstanding code at all.
    let code = fx.gate.issue(CodePurpose::Register, "a@x.com").await.unwrap();
    expect_auth_err(
        fx.service
            .update_password(
                user.id,
                UpdatePasswordRequest {
                    email: "a@x.com".to_string(),
                    code,
                    password: "new-pw".to_string(),
                },
            )
            .await,
        AuthError::CodeExpired,
    );
}

#[tokio::test]
async fn test_update_profile_nickname_only_keeps_avatar() {
    let fx = fixture();
    let mut user = seed_user(&fx, "alice", "pw", false).await;
    user.avatar_url = Some("pic.png".to_string());
    fx.repo.insert_user(user.clone()).await;

    let code = fx
        .gate
        .issue(CodePurpose::UpdateProfile, "a@x.com")
        .await
        .unwrap();
    fx.service
        .update_profile(
            user.id,
            UpdateProfileRequest {
                email: "a@x.com".to_string(),
                code,
                nickname: Some("Allie".to_string()),
                avatar_url: None,
            },
        )
        .await
        .unwrap();

    let stored = fx.repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.nickname, "Allie");
    assert_eq!(stored.avatar_url.as_deref(), Some("pic.png"));
}

#[tokio::test]
async fn test_update_profile_avatar_only_keeps_nickname() {
    let fx = fixture();
    let user = seed_user(&fx, "alice", "pw", false).await;

    let code = fx
        .gate
        .issue(CodePurpose::UpdateProfile, "a@x.com")
        .await
        .unwrap();
    fx.service
        .update_profile(
            user.id,
            UpdateProfileRequest {
                email: "a@x.com".to_string(),
                code,
                nickname: None,
                avatar_url: Some("new.png".to_string()),
            },
        )
        .await
        .unwrap();

    let stored = fx.repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.nickname, "alice");
    assert_eq!(stored.avatar_url.as_deref(), Some("new.png"));
}

#[tokio::test]
async fn test_freeze_sets_flag_and_login_stays_allowed() {
    let fx = fixture();
    let user = seed_user(&fx, "alice", "pw", false).await;

    fx.service.freeze(user.id).await.unwrap();

    let stored = fx.repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.is_frozen);

    // Freezing is recorded state only; enforcement is the caller's.
    let view = fx.service.login("alice", "pw", false).await.unwrap();
    assert!(view.is_frozen);
}

#[tokio::test]
async fn test_freeze_unknown_user() {
    let fx = fixture();
    expect_auth_err(
        fx.service.freeze(Uuid::new_v4()).await,
        AuthError::UserNotFound,
    );
}

#[tokio::test]
async fn test_search_counts_matches_before_pagination() {
    let fx = fixture();
    for i in 0..15 {
        seed_user(&fx, &format!("alice{i:02}"), "pw", false).await;
    }
    seed_user(&fx, "bob", "pw", false).await;

    let page = fx
        .service
        .search(
            UserFilter {
                username: Some("ali".to_string()),
                ..Default::default()
            },
            Pagination::new(2, 10),
        )
        .await
        .unwrap();

    assert_eq!(page.users.len(), 5);
    assert_eq!(page.total_count, 15);
}

#[tokio::test]
async fn test_search_rejects_page_zero() {
    let fx = fixture();
    expect_auth_err(
        fx.service
            .search(UserFilter::default(), Pagination::new(0, 10))
            .await,
        AuthError::InvalidPage { page_no: 0 },
    );
}

#[tokio::test]
async fn test_search_filters_are_anded() {
    let fx = fixture();
    seed_user(&fx, "alice", "pw", false).await;
    seed_user(&fx, "alina", "pw", false).await;

    let page = fx
        .service
        .search(
            UserFilter {
                username: Some("ali".to_string()),
                email: Some("alice@".to_string()),
                ..Default::default()
            },
            Pagination::new(1, 10),
        )
        .await
        .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.users[0].username, "alice");
}

#[tokio::test]
async fn test_send_verification_code_delivers_mail() {
    let fx = fixture();

    let message_id = fx
        .service
        .send_verification_code(CodePurpose::Register, "a@x.com")
        .await
        .unwrap();
    assert!(message_id.starts_with("mock-mail-"));

    let stored = fx.store.stored("register_a@x.com").unwrap();
    let mail = fx.mail.last_mail_to("a@x.com").unwrap();
    assert_eq!(mail.subject, "Registration verification code");
    assert!(mail.html_body.contains(&stored));
}

#[tokio::test]
async fn test_send_verification_code_mail_failure_leaves_code_stored() {
    let fx = fixture_with_mail(MockMailService::new(true));

    let err = fx
        .service
        .send_verification_code(CodePurpose::Register, "a@x.com")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Mail { .. }));

    // The code was stored before delivery was attempted and is not
    // rolled back.
    assert!(fx.store.stored("register_a@x.com").is_some());
}
