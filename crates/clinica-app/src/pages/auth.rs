use tracing::{info, warn};
use uuid::Uuid;

use clinica_audit::events::AuditAction;
use clinica_auth::flows::SignUpResult;
use clinica_auth::provider::AuthProvider;
use clinica_auth::session::{ProfileAttributes, Session};
use clinica_core::forms::auth::{
    validate_login, validate_tenant_registration, LoginDraft, TenantRegistrationDraft,
};
use clinica_core::models::profile::{Profile, ADMIN_ROLE};
use clinica_core::models::tenant::Tenant;
use clinica_core::routes::Route;
use clinica_core::tables::{self, column};
use clinica_storage::backend::Backend;
use clinica_storage::query::Query;
use clinica_storage::rows;

use crate::context::{ActiveSession, AppContext};
use crate::error::AppError;
use crate::notify::Notification;

/// Sign in, resolve the tenant, start the session and open the dashboard.
pub async fn login<B: Backend, A: AuthProvider>(
    ctx: &AppContext<B, A>,
    draft: &LoginDraft,
) -> Result<ActiveSession, AppError> {
    let credentials = validate_login(draft)?;

    let result = async {
        let session = ctx
            .auth()
            .sign_in(&credentials.email, &credentials.password)
            .await?;
        ctx.backend().authorize(Some(&session.access_token));
        let tenant_id = resolve_tenant(ctx, &session).await?;
        Ok::<_, AppError>((session, tenant_id))
    }
    .await;

    let (session, tenant_id) = match result {
        Ok(found) => found,
        Err(e) => {
            ctx.backend().authorize(None);
            warn!(error = %e, "login failed");
            ctx.notify(Notification::failure("Erro no login", e.user_message()));
            return Err(e);
        }
    };

    ctx.session().start(session.clone(), tenant_id);
    ctx.audit(AuditAction::SignIn, tables::PROFILES, session.user.id);
    ctx.navigate(Route::Dashboard, None);
    Ok(ActiveSession { session, tenant_id })
}

/// The tenant recorded on the user, else the one on the user's profile row.
async fn resolve_tenant<B: Backend, A: AuthProvider>(
    ctx: &AppContext<B, A>,
    session: &Session,
) -> Result<Uuid, AppError> {
    if let Some(tenant_id) = session.tenant_id() {
        return Ok(tenant_id);
    }
    let query = Query::table(tables::PROFILES)
        .eq(column::ID, session.user.id)
        .limit(1);
    let profiles: Vec<Profile> = rows::select_rows(ctx.backend(), &query).await?;
    profiles
        .first()
        .map(|profile| profile.tenant_id)
        .ok_or(AppError::MissingContext("ID da empresa"))
}

/// Create a tenant and its administrator account. The administrator must
/// then sign in; no session is started here.
pub async fn register_tenant<B: Backend, A: AuthProvider>(
    ctx: &AppContext<B, A>,
    draft: &TenantRegistrationDraft,
) -> Result<Tenant, AppError> {
    let registration = validate_tenant_registration(draft)?;

    let result = async {
        let tenant: Tenant =
            rows::insert_row(ctx.backend(), tables::TENANTS, &registration.tenant).await?;
        let attrs = ProfileAttributes {
            tenant_id: tenant.id,
            name: registration.tenant.name.clone(),
            role: ADMIN_ROLE.to_string(),
        };
        let signed_up = ctx
            .auth()
            .sign_up(&registration.admin.email, &registration.admin.password, &attrs)
            .await?;
        Ok::<_, AppError>((tenant, signed_up))
    }
    .await;

    match result {
        Ok((tenant, signed_up)) => {
            ctx.audit(AuditAction::Create, tables::TENANTS, tenant.id);
            let description = match signed_up {
                SignUpResult::Session(_) => {
                    "Empresa e usuário administrador registrados com sucesso. Por favor, faça login."
                }
                SignUpResult::ConfirmationRequired { .. } => {
                    "Empresa registrada. Confirme o email do administrador e faça login."
                }
            };
            info!(tenant_id = %tenant.id, "tenant registered");
            ctx.notify(Notification::success("Sucesso", description));
            Ok(tenant)
        }
        Err(e) => {
            ctx.report("registrar a empresa", &e);
            Err(e)
        }
    }
}

/// Exchange the refresh token for a new session under the same tenant.
///
/// A rejected refresh ends the session: it is cleared, the backend drops
/// its token and the user is sent to the login page.
pub async fn refresh_session<B: Backend, A: AuthProvider>(
    ctx: &AppContext<B, A>,
) -> Result<ActiveSession, AppError> {
    let active = ctx
        .session()
        .current()
        .ok_or(AppError::MissingContext("Sessão"))?;

    match ctx.auth().refresh(&active.session.refresh_token).await {
        Ok(session) => {
            ctx.backend().authorize(Some(&session.access_token));
            ctx.session().start(session.clone(), active.tenant_id);
            info!(user_id = %session.user.id, "session refreshed");
            Ok(ActiveSession {
                session,
                tenant_id: active.tenant_id,
            })
        }
        Err(e) => {
            let e = AppError::from(e);
            warn!(error = %e, "session refresh failed");
            ctx.session().clear();
            ctx.backend().authorize(None);
            ctx.navigate(Route::Login, None);
            ctx.notify(Notification::failure(
                "Sessão expirada",
                "Faça login novamente para continuar.",
            ));
            Err(e)
        }
    }
}

/// End the session and return to the login page. Revocation failures are
/// logged; the local session is cleared regardless.
pub async fn sign_out<B: Backend, A: AuthProvider>(ctx: &AppContext<B, A>) {
    if let Some(active) = ctx.session().current() {
        if let Err(e) = ctx.auth().sign_out(&active.session).await {
            warn!(error = %e, "remote sign-out failed");
        }
        ctx.audit(AuditAction::SignOut, tables::PROFILES, active.session.user.id);
    }
    ctx.session().clear();
    ctx.backend().authorize(None);
    ctx.navigate(Route::Login, None);
}
