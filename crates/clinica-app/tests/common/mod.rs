#![allow(dead_code)]

use std::sync::Arc;

use jiff::tz::{self, TimeZone};
use serde_json::{json, Value};
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

use clinica_app::context::AppContext;
use clinica_app::notify::{toast_channel, Notification};
use clinica_app::pages::auth;
use clinica_audit::sink::RecordingSink;
use clinica_auth::memory::MemoryAuthProvider;
use clinica_auth::session::UserMetadata;
use clinica_core::forms::auth::LoginDraft;
use clinica_core::tables;
use clinica_storage::backend::Backend;
use clinica_storage::memory::MemoryBackend;

pub const EMAIL: &str = "recepcao@clinica.test";
pub const PASSWORD: &str = "segredo123";

pub struct Harness {
    pub ctx: AppContext<MemoryBackend, MemoryAuthProvider>,
    pub backend: Arc<MemoryBackend>,
    pub auth: Arc<MemoryAuthProvider>,
    pub audit: Arc<RecordingSink>,
    pub toasts: UnboundedReceiver<Notification>,
}

impl Harness {
    pub fn new() -> Self {
        let backend = Arc::new(MemoryBackend::new());
        let auth = Arc::new(MemoryAuthProvider::new(b"test-secret".to_vec()));
        let audit = Arc::new(RecordingSink::new());
        let (sender, toasts) = toast_channel();
        let ctx = AppContext::new(backend.clone(), auth.clone(), Arc::new(sender))
            .with_audit(audit.clone())
            .with_time_zone(TimeZone::fixed(tz::offset(-3)));
        Self {
            ctx,
            backend,
            auth,
            audit,
            toasts,
        }
    }

    /// A harness with a signed-in user of a fresh tenant.
    pub async fn signed_in() -> (Self, Uuid) {
        let mut h = Self::new();
        let tenant_id = Uuid::new_v4();
        h.auth
            .add_user(
                EMAIL,
                PASSWORD,
                UserMetadata {
                    tenant_id: Some(tenant_id),
                    name: Some("Recepção".to_string()),
                    role: Some("Recepcionista".to_string()),
                },
            )
            .await;
        let draft = LoginDraft {
            email: EMAIL.to_string(),
            password: PASSWORD.to_string(),
        };
        auth::login(&h.ctx, &draft)
            .await
            .expect("login should succeed");
        h.drain_toasts();
        (h, tenant_id)
    }

    pub fn drain_toasts(&mut self) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(toast) = self.toasts.try_recv() {
            out.push(toast);
        }
        out
    }

    pub async fn seed_patient(&self, tenant_id: Uuid, name: &str) -> Uuid {
        let row = self
            .backend
            .insert(tables::PATIENTS, patient_row(tenant_id, name))
            .await
            .expect("seed insert");
        row["id"].as_str().and_then(|id| id.parse().ok()).expect("id")
    }
}

pub fn patient_row(tenant_id: Uuid, name: &str) -> Value {
    json!({
        "empresa_id": tenant_id,
        "nome": name,
        "data_nascimento": "1985-02-20",
        "cpf": "000.000.000-00",
        "sexo": "feminino",
        "telefone": "(11) 90000-0000",
        "cep": "01001-000",
        "endereco": "Rua Um",
        "numero": "1",
        "bairro": "Centro",
        "cidade": "São Paulo",
    })
}
