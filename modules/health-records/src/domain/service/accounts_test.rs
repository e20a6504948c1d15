use std::sync::Arc;

use chrono::Duration;
use secrecy::SecretString;

use caremap_auth::{TokenService, password};

use crate::domain::error::DomainError;
use crate::domain::model::Registration;
use crate::domain::service::AccountsService;
use crate::domain::service::test_support::{InMemoryUsers, user};

fn tokens() -> Arc<TokenService> {
    Arc::new(TokenService::new(
        &SecretString::from("accounts-test-secret"),
        Duration::minutes(60),
        Duration::days(1),
    ))
}

fn registration(email: &str) -> Registration {
    Registration {
        name: "Alice".to_owned(),
        email: email.to_owned(),
        password: "s3cret-pass".to_owned(),
    }
}

#[tokio::test]
async fn register_stores_hashed_password() {
    let svc = AccountsService::new(InMemoryUsers::new(), tokens());

    let created = svc.register(registration("alice@example.com")).await.unwrap();

    assert_eq!(created.email, "alice@example.com");
    assert_eq!(created.name, "Alice");
    assert_ne!(created.password_hash, "s3cret-pass");
    assert!(password::verify_password("s3cret-pass", &created.password_hash).unwrap());
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let repo = InMemoryUsers::new();
    let svc = AccountsService::new(repo, tokens());

    svc.register(registration("alice@example.com")).await.unwrap();
    let err = svc
        .register(registration("alice@example.com"))
        .await
        .unwrap_err();

    match err {
        DomainError::Validation { field, message } => {
            assert_eq!(field, "email");
            assert_eq!(message, "A user with this email already exists.");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn register_rejects_short_password() {
    let svc = AccountsService::new(InMemoryUsers::new(), tokens());

    let mut reg = registration("alice@example.com");
    reg.password = "short".to_owned();

    assert!(matches!(
        svc.register(reg).await,
        Err(DomainError::Validation { field, .. }) if field == "password"
    ));
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let svc = AccountsService::new(InMemoryUsers::new(), tokens());

    for email in ["not-an-email", "@example.com", "alice@nodot", "a b@example.com"] {
        assert!(
            matches!(
                svc.register(registration(email)).await,
                Err(DomainError::Validation { ref field, .. }) if field == "email"
            ),
            "expected rejection for {email}"
        );
    }
}

#[tokio::test]
async fn login_issues_verifiable_pair() {
    let tokens = tokens();
    let hash = password::hash_password("s3cret-pass").unwrap();
    let account = user("alice@example.com", &hash);
    let svc = AccountsService::new(InMemoryUsers::with(vec![account.clone()]), tokens.clone());

    let pair = svc.login("alice@example.com", "s3cret-pass").await.unwrap();

    let claims = tokens.verify_access(&pair.access).unwrap();
    assert_eq!(claims.sub, account.id);
    assert_eq!(claims.email, "alice@example.com");
    assert!(tokens.verify_refresh(&pair.refresh).is_ok());
}

#[tokio::test]
async fn login_with_wrong_password_is_generic_unauthorized() {
    let hash = password::hash_password("s3cret-pass").unwrap();
    let svc = AccountsService::new(
        InMemoryUsers::with(vec![user("alice@example.com", &hash)]),
        tokens(),
    );

    let err = svc.login("alice@example.com", "wrong-pass").await.unwrap_err();
    match err {
        DomainError::Unauthorized(message) => {
            assert_eq!(message, "No active account found with the given credentials");
        }
        other => panic!("expected unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn login_with_unknown_email_matches_wrong_password_error() {
    let hash = password::hash_password("s3cret-pass").unwrap();
    let svc = AccountsService::new(
        InMemoryUsers::with(vec![user("alice@example.com", &hash)]),
        tokens(),
    );

    let unknown = svc.login("bob@example.com", "s3cret-pass").await.unwrap_err();
    let wrong = svc.login("alice@example.com", "wrong-pass").await.unwrap_err();

    // Same message either way: the email's existence is not disclosed.
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn refresh_mints_new_access_token() {
    let tokens = tokens();
    let hash = password::hash_password("s3cret-pass").unwrap();
    let account = user("alice@example.com", &hash);
    let svc = AccountsService::new(InMemoryUsers::with(vec![account.clone()]), tokens.clone());

    let pair = svc.login("alice@example.com", "s3cret-pass").await.unwrap();
    let access = svc.refresh(&pair.refresh).await.unwrap();

    let claims = tokens.verify_access(&access).unwrap();
    assert_eq!(claims.sub, account.id);
}

#[tokio::test]
async fn refresh_rejects_access_token() {
    let hash = password::hash_password("s3cret-pass").unwrap();
    let svc = AccountsService::new(
        InMemoryUsers::with(vec![user("alice@example.com", &hash)]),
        tokens(),
    );

    let pair = svc.login("alice@example.com", "s3cret-pass").await.unwrap();

    assert!(matches!(
        svc.refresh(&pair.access).await,
        Err(DomainError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn refresh_rejects_garbage_token() {
    let svc = AccountsService::new(InMemoryUsers::new(), tokens());

    assert!(matches!(
        svc.refresh("not.a.token").await,
        Err(DomainError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn refresh_rejects_token_for_deleted_user() {
    let tokens = tokens();
    let svc = AccountsService::new(InMemoryUsers::new(), tokens.clone());

    // Token is valid, but no matching account exists.
    let refresh = tokens.issue_refresh(uuid::Uuid::new_v4()).unwrap();

    assert!(matches!(
        svc.refresh(&refresh).await,
        Err(DomainError::Unauthorized(_))
    ));
}
