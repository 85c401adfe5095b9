mod common;

use clinica_app::error::AppError;
use clinica_app::pages::auth::{login, refresh_session, register_tenant, sign_out};
use clinica_audit::events::AuditAction;
use clinica_auth::error::AuthError;
use clinica_auth::provider::AuthProvider;
use clinica_core::forms::auth::{LoginDraft, TenantRegistrationDraft};
use clinica_core::routes::Route;
use clinica_core::tables;
use serde_json::json;
use uuid::Uuid;

use common::{Harness, EMAIL, PASSWORD};

fn registration() -> TenantRegistrationDraft {
    TenantRegistrationDraft {
        name: "Clínica Sorriso".to_string(),
        industry: "odontologia".to_string(),
        email: "admin@sorriso.test".to_string(),
        password: "segredo123".to_string(),
    }
}

fn credentials(email: &str, password: &str) -> LoginDraft {
    LoginDraft {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn login_starts_the_session_and_opens_the_dashboard() {
    let (h, tenant_id) = Harness::signed_in().await;

    assert!(h.ctx.session().is_authenticated());
    assert_eq!(h.ctx.session().tenant_id().unwrap(), tenant_id);
    assert_eq!(h.ctx.navigator().current().route, Route::Dashboard);
    assert!(
        h.audit
            .events()
            .iter()
            .any(|e| e.action == AuditAction::SignIn)
    );
}

#[tokio::test]
async fn wrong_password_shows_login_error_and_stays_anonymous() {
    let (mut h, _) = Harness::signed_in().await;
    sign_out(&h.ctx).await;
    h.drain_toasts();

    let err = login(&h.ctx, &credentials(EMAIL, "errada123")).await.unwrap_err();

    assert!(matches!(err, AppError::Auth(AuthError::InvalidCredentials)));
    assert!(!h.ctx.session().is_authenticated());
    let toasts = h.drain_toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Erro no login");
    assert!(toasts[0].is_failure());
}

#[tokio::test]
async fn malformed_login_is_rejected_before_the_provider() {
    let mut h = Harness::new();

    let err = login(&h.ctx, &credentials("not-an-email", "123")).await.unwrap_err();

    let AppError::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.get("email"), Some("Email inválido"));
    assert!(errors.contains("password"));
    assert!(h.drain_toasts().is_empty());
}

#[tokio::test]
async fn tenant_falls_back_to_the_profile_row() {
    let h = Harness::new();
    let user = h
        .auth
        .add_user("sem.metadados@clinica.test", PASSWORD, Default::default())
        .await;
    let tenant_id = Uuid::new_v4();
    {
        use clinica_storage::backend::Backend;
        h.backend
            .insert(
                tables::PROFILES,
                json!({
                    "id": user.id,
                    "empresa_id": tenant_id,
                    "nome": "Dra. Lima",
                    "cargo": "Dentista",
                }),
            )
            .await
            .unwrap();
    }

    let active = login(&h.ctx, &credentials("sem.metadados@clinica.test", PASSWORD))
        .await
        .unwrap();

    assert_eq!(active.tenant_id, tenant_id);
}

#[tokio::test]
async fn login_without_any_tenant_fails() {
    let mut h = Harness::new();
    h.auth
        .add_user("orfao@clinica.test", PASSWORD, Default::default())
        .await;

    let err = login(&h.ctx, &credentials("orfao@clinica.test", PASSWORD))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MissingContext(_)));
    assert!(!h.ctx.session().is_authenticated());
    assert_eq!(h.drain_toasts()[0].title, "Erro no login");
}

#[tokio::test]
async fn registered_administrator_can_sign_in() {
    let mut h = Harness::new();

    let tenant = register_tenant(&h.ctx, &registration()).await.unwrap();

    assert_eq!(tenant.name, "Clínica Sorriso");
    let toasts = h.drain_toasts();
    assert_eq!(toasts[0].title, "Sucesso");
    assert!(!h.ctx.session().is_authenticated());

    let active = login(&h.ctx, &credentials("admin@sorriso.test", "segredo123"))
        .await
        .unwrap();
    assert_eq!(active.tenant_id, tenant.id);
    assert_eq!(
        active.session.user.metadata.role.as_deref(),
        Some("Administrador")
    );
}

#[tokio::test]
async fn duplicate_registration_reports_an_error() {
    let mut h = Harness::new();
    register_tenant(&h.ctx, &registration()).await.unwrap();
    h.drain_toasts();

    let err = register_tenant(&h.ctx, &registration()).await.unwrap_err();

    assert!(matches!(err, AppError::Auth(AuthError::AlreadyRegistered(_))));
    let toasts = h.drain_toasts();
    assert!(toasts[0].is_failure());
    assert!(toasts[0].description.contains("registrar a empresa"));
}

#[tokio::test]
async fn registration_requires_name_and_industry() {
    let h = Harness::new();
    let draft = TenantRegistrationDraft {
        name: " ".to_string(),
        industry: String::new(),
        ..registration()
    };

    let err = register_tenant(&h.ctx, &draft).await.unwrap_err();

    let AppError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert!(errors.contains("name"));
    assert!(errors.contains("industry"));
    assert!(h.backend.rows(tables::TENANTS).await.is_empty());
}

#[tokio::test]
async fn sign_out_clears_the_session_and_guards_private_routes() {
    let (h, _) = Harness::signed_in().await;

    sign_out(&h.ctx).await;

    assert!(!h.ctx.session().is_authenticated());
    assert_eq!(h.ctx.navigator().current().route, Route::Login);
    assert_eq!(h.ctx.navigate(Route::Patients, None), Route::Login);
    assert!(
        h.audit
            .events()
            .iter()
            .any(|e| e.action == AuditAction::SignOut)
    );
}

#[tokio::test]
async fn authenticated_users_skip_the_login_page() {
    let (h, _) = Harness::signed_in().await;

    assert_eq!(h.ctx.navigate(Route::Login, None), Route::Dashboard);
    assert_eq!(h.ctx.navigate(Route::Root, None), Route::Dashboard);
    assert_eq!(h.ctx.navigate(Route::Products, None), Route::Products);
}

#[tokio::test]
async fn session_changes_are_observable() {
    let (h, _) = Harness::signed_in().await;
    let mut rx = h.ctx.session().subscribe();
    assert!(rx.borrow_and_update().is_some());

    sign_out(&h.ctx).await;

    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_none());
}

#[tokio::test]
async fn refresh_replaces_the_session_and_keeps_the_tenant() {
    let (mut h, tenant_id) = Harness::signed_in().await;
    let before = h.ctx.session().current().unwrap();

    let refreshed = refresh_session(&h.ctx).await.unwrap();

    assert_eq!(refreshed.tenant_id, tenant_id);
    assert_ne!(refreshed.session.refresh_token, before.session.refresh_token);
    assert_eq!(refreshed.session.user.id, before.session.user.id);
    let current = h.ctx.session().current().unwrap();
    assert_eq!(current.session.refresh_token, refreshed.session.refresh_token);
    assert_eq!(h.ctx.session().tenant_id().unwrap(), tenant_id);
    assert_eq!(h.ctx.navigator().current().route, Route::Dashboard);
    assert!(h.drain_toasts().is_empty());
}

#[tokio::test]
async fn rejected_refresh_signs_the_user_out() {
    let (mut h, _) = Harness::signed_in().await;
    let stale = h.ctx.session().current().unwrap();
    h.auth.refresh(&stale.session.refresh_token).await.unwrap();

    let err = refresh_session(&h.ctx).await.unwrap_err();

    assert!(matches!(err, AppError::Auth(AuthError::InvalidToken(_))));
    assert!(!h.ctx.session().is_authenticated());
    assert_eq!(h.ctx.navigator().current().route, Route::Login);
    let toasts = h.drain_toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Sessão expirada");
    assert!(toasts[0].is_failure());
}

#[tokio::test]
async fn refresh_without_a_session_is_missing_context() {
    let h = Harness::new();
    let err = refresh_session(&h.ctx).await.unwrap_err();
    assert!(matches!(err, AppError::MissingContext(_)));
}
