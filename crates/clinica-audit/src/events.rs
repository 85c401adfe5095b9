use std::fmt;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::AuditError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    SignIn,
    SignOut,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
            AuditAction::SignIn => "sign_in",
            AuditAction::SignOut => "sign_out",
        })
    }
}

/// A structured audit event for one data mutation or session change.
///
/// Events are logged via `tracing`; the backend keeps its own row history,
/// these add who did what from which tenant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub tenant_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub at: jiff::Timestamp,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: AuditAction,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            action,
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            tenant_id: None,
            user_id: None,
            at: jiff::Timestamp::now(),
            details: None,
        }
    }

    pub fn by(mut self, tenant_id: Uuid, user_id: Uuid) -> Self {
        self.tenant_id = Some(tenant_id);
        self.user_id = Some(user_id);
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn to_json(&self) -> Result<serde_json::Value, AuditError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.tenant_id = ?self.tenant_id,
            audit.user_id = ?self.user_id,
            "audit event"
        );
    }
}
