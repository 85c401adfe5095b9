use clinica_auth::error::AuthError;
use clinica_auth::jwt::{self, SessionClaims, AUDIENCE};
use clinica_auth::session::{AuthUser, UserMetadata};
use uuid::Uuid;

fn claims(exp_offset_secs: i64) -> SessionClaims {
    let now = jiff::Timestamp::now().as_second();
    SessionClaims {
        sub: Uuid::new_v4(),
        exp: now + exp_offset_secs,
        iat: now,
        aud: Some(AUDIENCE.to_string()),
        email: Some("ana@clinica.com".to_string()),
        role: Some("authenticated".to_string()),
        user_metadata: UserMetadata::default(),
    }
}

#[test]
fn issued_tokens_validate_with_the_same_secret() {
    let original = claims(3600);
    let token = jwt::issue_token(&original, b"secret").unwrap();
    assert_eq!(jwt::validate_token(&token, b"secret").unwrap(), original);
    assert!(jwt::validate_token(&token, b"other").is_err());
}

#[test]
fn expired_tokens_are_reported_as_expired() {
    let token = jwt::issue_token(&claims(-3600), b"secret").unwrap();
    assert!(matches!(
        jwt::validate_token(&token, b"secret").unwrap_err(),
        AuthError::TokenExpired
    ));
}

#[test]
fn claims_can_be_read_without_the_secret() {
    let original = claims(-3600);
    let token = jwt::issue_token(&original, b"secret").unwrap();
    assert_eq!(jwt::read_claims(&token).unwrap().sub, original.sub);
}

#[test]
fn auth_user_reads_service_metadata() {
    let tenant = Uuid::new_v4();
    let user: AuthUser = serde_json::from_value(serde_json::json!({
        "id": Uuid::new_v4(),
        "email": "ana@clinica.com",
        "aud": "authenticated",
        "user_metadata": { "empresa_id": tenant, "nome": "Ana", "cargo": "Administrador" },
    }))
    .unwrap();
    assert_eq!(user.metadata.tenant_id, Some(tenant));
    assert_eq!(user.metadata.name.as_deref(), Some("Ana"));

    let bare: AuthUser = serde_json::from_value(serde_json::json!({ "id": Uuid::new_v4() })).unwrap();
    assert_eq!(bare.metadata, UserMetadata::default());
}
