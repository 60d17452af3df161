//! Crate-level tests: use cases and the HTTP router against an in-memory
//! repository.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use kernel::id::AdminId;
use platform::password::HashCost;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{admin_password::AdminPassword, email::Email};
use crate::error::{AuthError, AuthResult};
use crate::presentation::{AuthAppState, auth_router};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Default)]
pub(crate) struct MemoryAdminRepository {
    admins: Mutex<Vec<AdminAccount>>,
    /// Saved right after the next `find_by_email` has taken its snapshot
    concurrent_password_change: Mutex<Option<AdminPassword>>,
}

impl MemoryAdminRepository {
    fn change_password_after_next_lookup(&self, password: AdminPassword) {
        *self.concurrent_password_change.lock().unwrap() = Some(password);
    }

    fn remove(&self, admin_id: &AdminId) {
        self.admins.lock().unwrap().retain(|a| &a.admin_id != admin_id);
    }

    fn get(&self, email: &str) -> Option<AdminAccount> {
        self.admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email.as_str() == email)
            .cloned()
    }
}

impl AdminRepository for MemoryAdminRepository {
    async fn create(&self, admin: &AdminAccount) -> AuthResult<()> {
        let mut admins = self.admins.lock().unwrap();
        if admins.iter().any(|a| a.email == admin.email) {
            return Err(AuthError::DuplicateEmail);
        }
        admins.push(admin.clone());
        Ok(())
    }

    async fn create_if_none_exist(&self, admin: &AdminAccount) -> AuthResult<bool> {
        let mut admins = self.admins.lock().unwrap();
        if !admins.is_empty() {
            return Ok(false);
        }
        admins.push(admin.clone());
        Ok(true)
    }

    async fn has_any(&self) -> AuthResult<bool> {
        Ok(!self.admins.lock().unwrap().is_empty())
    }

    async fn find_by_id(&self, admin_id: &AdminId) -> AuthResult<Option<AdminAccount>> {
        let admins = self.admins.lock().unwrap();
        Ok(admins.iter().find(|a| &a.admin_id == admin_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<AdminAccount>> {
        let mut admins = self.admins.lock().unwrap();
        let snapshot = admins.iter().find(|a| &a.email == email).cloned();

        if let Some(password) = self.concurrent_password_change.lock().unwrap().take() {
            if let Some(existing) = admins.iter_mut().find(|a| &a.email == email) {
                existing.set_password(password);
            }
        }

        Ok(snapshot)
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let admins = self.admins.lock().unwrap();
        Ok(admins.iter().any(|a| &a.email == email))
    }

    async fn record_login(&self, admin_id: &AdminId, at: DateTime<Utc>) -> AuthResult<()> {
        let mut admins = self.admins.lock().unwrap();
        if let Some(existing) = admins.iter_mut().find(|a| &a.admin_id == admin_id) {
            existing.last_login_at = Some(at);
            existing.updated_at = at;
        }
        Ok(())
    }

    async fn update_password(
        &self,
        admin_id: &AdminId,
        password: &AdminPassword,
        at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let mut admins = self.admins.lock().unwrap();
        let existing = admins
            .iter_mut()
            .find(|a| &a.admin_id == admin_id)
            .ok_or(AuthError::AdminNotFound)?;
        existing.password = password.clone();
        existing.updated_at = at;
        Ok(())
    }

    async fn upgrade_password(
        &self,
        admin_id: &AdminId,
        current: &AdminPassword,
        upgraded: &AdminPassword,
        at: DateTime<Utc>,
    ) -> AuthResult<bool> {
        let mut admins = self.admins.lock().unwrap();
        match admins
            .iter_mut()
            .find(|a| &a.admin_id == admin_id && &a.password == current)
        {
            Some(existing) => {
                existing.password = upgraded.clone();
                existing.updated_at = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn test_config() -> AuthConfig {
    AuthConfig::new(vec![42u8; 32])
        .unwrap()
        .with_hash_cost(HashCost::minimal())
}

struct TestApp {
    repo: Arc<MemoryAdminRepository>,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        Self::with_config(test_config())
    }

    fn with_config(config: AuthConfig) -> Self {
        let repo = Arc::new(MemoryAdminRepository::default());
        let state = AuthAppState::new(repo.clone(), Arc::new(config));
        Self {
            repo,
            router: auth_router(state),
        }
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn register(&self, token: Option<&str>, email: &str, role: Option<&str>) -> (StatusCode, Value) {
        let mut body = json!({ "email": email, "password": "123123" });
        if let Some(role) = role {
            body["role"] = json!(role);
        }
        self.send("POST", "/register", token, Some(body)).await
    }

    async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            "POST",
            "/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    async fn token_for(&self, email: &str) -> String {
        let (status, body) = self.login(email, "123123").await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Bootstrap admin plus its token
    async fn with_root(&self) -> String {
        let (status, _) = self.register(None, "root@example.com", None).await;
        assert_eq!(status, StatusCode::CREATED);
        self.token_for("root@example.com").await
    }
}

// ============================================================================
// Registration
// ============================================================================

mod register_tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_registration_without_token() {
        let app = TestApp::new();
        let (status, body) = app.register(None, "Root@Example.com", None).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Admin account created successfully");
        assert_eq!(body["admin"]["email"], "root@example.com");
        assert_eq!(body["admin"]["role"], "admin");
        assert!(body["admin"]["id"].is_string());
        assert!(body["admin"].get("password").is_none());
    }

    #[tokio::test]
    async fn test_second_registration_requires_token() {
        let app = TestApp::new();
        app.with_root().await;

        let (status, body) = app.register(None, "other@example.com", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "UNAUTHORIZED");
        assert!(app.repo.get("other@example.com").is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_must_be_admin() {
        let app = TestApp::new();
        let (status, body) = app.register(None, "sup@example.com", Some("supervisor")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_admin_registers_supervisor() {
        let app = TestApp::new();
        let token = app.with_root().await;

        let (status, body) = app
            .register(Some(&token), "sup@example.com", Some("supervisor"))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["admin"]["role"], "supervisor");
    }

    #[tokio::test]
    async fn test_supervisor_cannot_register() {
        let app = TestApp::new();
        let token = app.with_root().await;
        app.register(Some(&token), "sup@example.com", Some("supervisor"))
            .await;
        let sup_token = app.token_for("sup@example.com").await;

        let (status, body) = app.register(Some(&sup_token), "new@example.com", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_invalid_token_on_register_is_rejected() {
        let app = TestApp::new();
        let (status, _) = app.register(Some("garbage"), "root@example.com", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let app = TestApp::new();
        let token = app.with_root().await;

        let (status, body) = app.register(Some(&token), "ROOT@example.com", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "DUPLICATE_EMAIL");
        assert_eq!(body["message"], "Admin with this email already exists");
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let app = TestApp::new();
        let token = app.with_root().await;

        let (status, _) = app.register(Some(&token), "not-an-email", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.register(Some(&token), "x@example.com", Some("root")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app
            .send(
                "POST",
                "/register",
                Some(&token),
                Some(json!({ "email": "y@example.com", "password": "12345" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Password must be at least 6 characters");
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let app = TestApp::new();
        let request = Request::builder()
            .method("POST")
            .uri("/register")
            .header("content-type", "application/json")
            .body(Body::from("{\"email\": "))
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_open_registration() {
        let app = TestApp::with_config(test_config().with_open_registration(true));
        app.with_root().await;

        let (status, body) = app
            .register(None, "sup@example.com", Some("supervisor"))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["admin"]["role"], "supervisor");
    }
}

// ============================================================================
// Login and sessions
// ============================================================================

mod login_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_success() {
        let app = TestApp::new();
        app.register(None, "root@example.com", None).await;

        let (status, body) = app.login("ROOT@example.com", "123123").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["admin"]["email"], "root@example.com");
        assert_eq!(body["admin"]["role"], "admin");
        assert!(body["admin"]["department"].is_null());
        assert_eq!(body["token"].as_str().unwrap().split('.').count(), 3);

        let stored = app.repo.get("root@example.com").unwrap();
        assert!(stored.last_login_at.is_some());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_identical() {
        let app = TestApp::new();
        app.register(None, "root@example.com", None).await;

        let wrong_password = app.login("root@example.com", "wrong-password").await;
        let unknown_email = app.login("nobody@example.com", "123123").await;
        let malformed_email = app.login("nobody", "123123").await;

        assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password, unknown_email);
        assert_eq!(wrong_password, malformed_email);
        assert_eq!(wrong_password.1["error"], "INVALID_CREDENTIALS");
        assert_eq!(wrong_password.1["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_failed_login_does_not_touch_last_login() {
        let app = TestApp::new();
        app.register(None, "root@example.com", None).await;
        app.login("root@example.com", "nope-nope").await;

        let stored = app.repo.get("root@example.com").unwrap();
        assert!(stored.last_login_at.is_none());
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let app = TestApp::new();
        let (status, body) = app
            .send("POST", "/login", None, Some(json!({ "email": "a@b.com" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please provide email and password");
    }

    #[tokio::test]
    async fn test_profile_requires_token() {
        let app = TestApp::new();
        app.with_root().await;

        let (status, body) = app.send("GET", "/profile", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Not authorized to access this route");

        let (status, _) = app.send("GET", "/profile", Some("a.b.c"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profile() {
        let app = TestApp::new();
        let token = app.with_root().await;

        let (status, body) = app.send("GET", "/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["admin"]["email"], "root@example.com");
        assert!(body["admin"]["lastLogin"].is_string());
    }

    #[tokio::test]
    async fn test_supervisor_can_view_profile() {
        let app = TestApp::new();
        let token = app.with_root().await;
        app.register(Some(&token), "sup@example.com", Some("supervisor"))
            .await;
        let sup_token = app.token_for("sup@example.com").await;

        let (status, body) = app.send("GET", "/profile", Some(&sup_token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["admin"]["role"], "supervisor");
    }

    #[tokio::test]
    async fn test_token_for_deleted_account() {
        let app = TestApp::new();
        let token = app.with_root().await;
        let admin = app.repo.get("root@example.com").unwrap();
        app.repo.remove(&admin.admin_id);

        let (status, _) = app.send("GET", "/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token() {
        let app = TestApp::with_config(
            test_config().with_session_ttl(std::time::Duration::from_millis(0)),
        );
        app.register(None, "root@example.com", None).await;
        let token = app.token_for("root@example.com").await;

        let (status, _) = app.send("GET", "/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

// ============================================================================
// Password change
// ============================================================================

mod change_password_tests {
    use super::*;

    async fn change(app: &TestApp, token: &str, current: &str, new: &str) -> (StatusCode, Value) {
        app.send(
            "PUT",
            "/change-password",
            Some(token),
            Some(json!({ "currentPassword": current, "newPassword": new })),
        )
        .await
    }

    #[tokio::test]
    async fn test_change_password() {
        let app = TestApp::new();
        let token = app.with_root().await;

        let (status, body) = change(&app, &token, "123123", "456456").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Password updated successfully");

        let (status, _) = app.login("root@example.com", "123123").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = app.login("root@example.com", "456456").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_current_password() {
        let app = TestApp::new();
        let token = app.with_root().await;

        let (status, body) = change(&app, &token, "not-it", "456456").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "INVALID_CREDENTIALS");
        assert_eq!(body["message"], "Current password is incorrect");
    }

    #[tokio::test]
    async fn test_new_password_policy() {
        let app = TestApp::new();
        let token = app.with_root().await;

        let (status, body) = change(&app, &token, "123123", "abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");

        let (status, _) = app.login("root@example.com", "123123").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_change_password_requires_token() {
        let app = TestApp::new();
        app.with_root().await;
        let (status, _) = app
            .send(
                "PUT",
                "/change-password",
                None,
                Some(json!({ "currentPassword": "123123", "newPassword": "456456" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

// ============================================================================
// Use cases
// ============================================================================

mod use_case_tests {
    use super::*;
    use crate::application::{
        ChangePasswordInput, ChangePasswordUseCase, RegisterInput, RegisterUseCase, SignInInput,
        SignInUseCase, VerifySessionUseCase, authorize,
    };
    use crate::domain::value_object::admin_password::RawPassword;
    use crate::domain::value_object::admin_role::{AdminRole, Capability};

    fn input(email: &str, role: Option<&str>) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            password: "123123".to_string(),
            role: role.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_sign_in_token_verifies_to_same_account() {
        let repo = Arc::new(MemoryAdminRepository::default());
        let config = Arc::new(test_config());

        let registered = RegisterUseCase::new(repo.clone(), config.clone())
            .execute(input("root@example.com", None), None)
            .await
            .unwrap();

        let signed_in = SignInUseCase::new(repo.clone(), config.clone())
            .execute(SignInInput {
                email: "root@example.com".into(),
                password: "123123".into(),
            })
            .await
            .unwrap();

        let verified = VerifySessionUseCase::new(repo, config)
            .execute(&signed_in.token)
            .await
            .unwrap();

        assert_eq!(verified.admin_id, registered.admin.admin_id);
        assert_eq!(verified.role, AdminRole::Admin);
    }

    #[tokio::test]
    async fn test_authorize_by_role() {
        let repo = Arc::new(MemoryAdminRepository::default());
        let config = Arc::new(test_config());
        let use_case = RegisterUseCase::new(repo.clone(), config);

        let root = use_case
            .execute(input("root@example.com", None), None)
            .await
            .unwrap()
            .admin;
        let supervisor = use_case
            .execute(input("sup@example.com", Some("supervisor")), Some(&root))
            .await
            .unwrap()
            .admin;

        assert!(authorize(&root, Capability::UpdateFeedback).is_ok());
        assert!(matches!(
            authorize(&supervisor, Capability::UpdateFeedback),
            Err(AuthError::Forbidden)
        ));
        assert!(authorize(&supervisor, Capability::ChangeOwnPassword).is_ok());
    }

    #[tokio::test]
    async fn test_sign_in_upgrades_stale_hash_cost() {
        let repo = Arc::new(MemoryAdminRepository::default());
        let cheap = Arc::new(test_config());

        RegisterUseCase::new(repo.clone(), cheap)
            .execute(input("root@example.com", None), None)
            .await
            .unwrap();

        let stronger = HashCost {
            iterations: 2,
            ..HashCost::minimal()
        };
        let config = Arc::new(test_config().with_hash_cost(stronger));
        SignInUseCase::new(repo.clone(), config)
            .execute(SignInInput {
                email: "root@example.com".into(),
                password: "123123".into(),
            })
            .await
            .unwrap();

        let stored = repo.get("root@example.com").unwrap();
        assert!(!stored.password.needs_rehash(&stronger));
    }

    fn hash(raw: &str) -> AdminPassword {
        let raw = RawPassword::candidate(raw.to_string());
        AdminPassword::from_raw(&raw, None, &HashCost::minimal()).unwrap()
    }

    async fn sign_in_during_password_change(config: AuthConfig) -> AdminAccount {
        let repo = Arc::new(MemoryAdminRepository::default());
        RegisterUseCase::new(repo.clone(), Arc::new(test_config()))
            .execute(
                RegisterInput {
                    email: "root@example.com".to_string(),
                    password: "oldpass".to_string(),
                    role: None,
                },
                None,
            )
            .await
            .unwrap();

        repo.change_password_after_next_lookup(hash("newpass"));

        SignInUseCase::new(repo.clone(), Arc::new(config))
            .execute(SignInInput {
                email: "root@example.com".into(),
                password: "oldpass".into(),
            })
            .await
            .unwrap();

        repo.get("root@example.com").unwrap()
    }

    #[tokio::test]
    async fn test_sign_in_keeps_concurrent_password_change() {
        let stored = sign_in_during_password_change(test_config()).await;

        let new = RawPassword::candidate("newpass".to_string());
        let old = RawPassword::candidate("oldpass".to_string());
        assert!(stored.password.verify(&new, None));
        assert!(!stored.password.verify(&old, None));
        assert!(stored.last_login_at.is_some());
    }

    #[tokio::test]
    async fn test_hash_upgrade_skipped_after_concurrent_password_change() {
        let stronger = HashCost {
            iterations: 2,
            ..HashCost::minimal()
        };
        let stored = sign_in_during_password_change(test_config().with_hash_cost(stronger)).await;

        let new = RawPassword::candidate("newpass".to_string());
        let old = RawPassword::candidate("oldpass".to_string());
        assert!(stored.password.verify(&new, None));
        assert!(!stored.password.verify(&old, None));
        assert!(stored.password.needs_rehash(&stronger));
    }

    #[tokio::test]
    async fn test_change_password_keeps_last_login() {
        let repo = Arc::new(MemoryAdminRepository::default());
        let config = Arc::new(test_config());
        let admin = RegisterUseCase::new(repo.clone(), config.clone())
            .execute(input("root@example.com", None), None)
            .await
            .unwrap()
            .admin;

        let login_at = chrono::Utc::now() + chrono::Duration::minutes(5);
        repo.record_login(&admin.admin_id, login_at).await.unwrap();

        ChangePasswordUseCase::new(repo.clone(), config)
            .execute(
                &admin.admin_id,
                ChangePasswordInput {
                    current_password: "123123".to_string(),
                    new_password: "456456".to_string(),
                },
            )
            .await
            .unwrap();

        let stored = repo.get("root@example.com").unwrap();
        assert_eq!(stored.last_login_at, Some(login_at));
        assert!(
            stored
                .password
                .verify(&RawPassword::candidate("456456".to_string()), None)
        );
    }

    #[tokio::test]
    async fn test_unknown_email_rejected_like_wrong_password() {
        let repo = Arc::new(MemoryAdminRepository::default());
        let config = Arc::new(test_config());
        RegisterUseCase::new(repo.clone(), config.clone())
            .execute(input("root@example.com", None), None)
            .await
            .unwrap();

        let use_case = SignInUseCase::new(repo, config.clone());
        for email in ["nobody@example.com", "root@example.com"] {
            let result = use_case
                .execute(SignInInput {
                    email: email.into(),
                    password: "wrong-password".into(),
                })
                .await;
            assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        }

        // The unknown email was checked against the cached decoy hash
        let decoy = config.decoy_password().unwrap();
        assert!(std::ptr::eq(decoy, config.decoy_password().unwrap()));
    }
}
