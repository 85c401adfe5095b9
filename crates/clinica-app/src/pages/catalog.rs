//! Profiles, plans and products: plain list pages with create, edit and
//! delete, sharing one implementation.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use clinica_audit::events::AuditAction;
use clinica_auth::provider::AuthProvider;
use clinica_core::forms::FormMode;
use clinica_core::models::plan::{Plan, PlanInput};
use clinica_core::models::product::{Product, ProductInput};
use clinica_core::models::profile::{Profile, ProfileInput};
use clinica_core::tables::{self, column};
use clinica_storage::backend::Backend;
use clinica_storage::query::Query;
use clinica_storage::rows::{self, tenant_scoped};

use crate::context::AppContext;
use crate::error::AppError;
use crate::notify::Notification;

/// A row type listed and edited by a [`CatalogPage`].
pub trait CatalogEntry: DeserializeOwned + Clone + Send + Sync {
    type Input: Serialize + Send + Sync;

    const TABLE: &'static str;
    /// Capitalised noun for toast titles, e.g. `"Perfil"`.
    const LABEL: &'static str;
    const ORDER_BY: &'static str;
    const ASCENDING: bool = true;
    /// Global tables (plans) are visible to every tenant.
    const TENANT_SCOPED: bool = true;

    fn id(&self) -> Uuid;

    /// Overwrite the input's tenant with the session's.
    fn scope(input: &mut Self::Input, tenant_id: Uuid);
}

impl CatalogEntry for Profile {
    type Input = ProfileInput;
    const TABLE: &'static str = tables::PROFILES;
    const LABEL: &'static str = "Perfil";
    const ORDER_BY: &'static str = column::NAME;

    fn id(&self) -> Uuid {
        self.id
    }

    fn scope(input: &mut ProfileInput, tenant_id: Uuid) {
        input.tenant_id = tenant_id;
    }
}

impl CatalogEntry for Plan {
    type Input = PlanInput;
    const TABLE: &'static str = tables::PLANS;
    const LABEL: &'static str = "Plano";
    const ORDER_BY: &'static str = column::PRICE;
    const TENANT_SCOPED: bool = false;

    fn id(&self) -> Uuid {
        self.id
    }

    fn scope(_input: &mut PlanInput, _tenant_id: Uuid) {}
}

impl CatalogEntry for Product {
    type Input = ProductInput;
    const TABLE: &'static str = tables::PRODUCTS;
    const LABEL: &'static str = "Produto";
    const ORDER_BY: &'static str = column::NAME;

    fn id(&self) -> Uuid {
        self.id
    }

    fn scope(input: &mut ProductInput, tenant_id: Uuid) {
        input.tenant_id = tenant_id;
    }
}

pub type ProfilesPage = CatalogPage<Profile>;
pub type PlansPage = CatalogPage<Plan>;
pub type ProductsPage = CatalogPage<Product>;

#[derive(Debug)]
pub struct CatalogPage<R> {
    items: Vec<R>,
    form: Option<FormMode<R>>,
}

impl<R: CatalogEntry> Default for CatalogPage<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CatalogEntry> CatalogPage<R> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            form: None,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn form(&self) -> Option<&FormMode<R>> {
        self.form.as_ref()
    }

    pub fn open_new(&mut self) {
        self.form = Some(FormMode::Create);
    }

    pub fn open_edit(&mut self, item: R) {
        self.form = Some(FormMode::Edit(item));
    }

    pub fn cancel(&mut self) {
        self.form = None;
    }

    fn scoped<B: Backend, A: AuthProvider>(ctx: &AppContext<B, A>) -> Result<Query, AppError> {
        if R::TENANT_SCOPED {
            Ok(tenant_scoped(R::TABLE, ctx.session().tenant_id()?))
        } else {
            ctx.session().user_id()?;
            Ok(Query::table(R::TABLE))
        }
    }

    pub async fn fetch<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
    ) -> Result<(), AppError> {
        let result = async {
            let query = Self::scoped(ctx)?.order(R::ORDER_BY, R::ASCENDING);
            Ok::<_, AppError>(rows::select_rows(ctx.backend(), &query).await?)
        }
        .await;

        match result {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(e) => {
                ctx.report(&format!("buscar os registros de {}", R::TABLE), &e);
                Err(e)
            }
        }
    }

    /// Create or update depending on the open form, then refetch.
    pub async fn save<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
        mut input: R::Input,
    ) -> Result<R, AppError> {
        let Some(mode) = self.form.as_ref() else {
            return Err(AppError::Unknown("no form is open".to_string()));
        };
        let editing = mode.existing().map(R::id);

        let result = async {
            let scoped = Self::scoped(ctx)?;
            if R::TENANT_SCOPED {
                R::scope(&mut input, ctx.session().tenant_id()?);
            }
            let saved: R = match editing {
                None => rows::insert_row(ctx.backend(), R::TABLE, &input).await?,
                Some(id) => {
                    let query = scoped.eq(column::ID, id);
                    let mut updated: Vec<R> =
                        rows::update_rows(ctx.backend(), &query, &input).await?;
                    updated.swap_remove(0)
                }
            };
            Ok::<_, AppError>(saved)
        }
        .await;

        let (action, verb) = match editing {
            Some(_) => (AuditAction::Update, "atualizado"),
            None => (AuditAction::Create, "criado"),
        };
        let saved = match result {
            Ok(saved) => saved,
            Err(e) => {
                let infinitive = if editing.is_some() { "atualizar" } else { "criar" };
                ctx.report(&format!("{infinitive} o registro"), &e);
                return Err(e);
            }
        };

        ctx.audit(action, R::TABLE, saved.id());
        ctx.notify(Notification::success(
            format!("{} {verb}", R::LABEL),
            format!("O registro foi {verb} com sucesso."),
        ));
        self.form = None;
        let _ = self.fetch(ctx).await;
        Ok(saved)
    }

    pub async fn delete<B: Backend, A: AuthProvider>(
        &mut self,
        ctx: &AppContext<B, A>,
        id: Uuid,
    ) -> Result<(), AppError> {
        let result = async {
            let query = Self::scoped(ctx)?.eq(column::ID, id);
            Ok::<_, AppError>(rows::delete_rows(ctx.backend(), &query).await?)
        }
        .await;

        if let Err(e) = result {
            ctx.report("excluir o registro", &e);
            return Err(e);
        }

        ctx.audit(AuditAction::Delete, R::TABLE, id);
        ctx.notify(Notification::success(
            format!("{} excluído", R::LABEL),
            "O registro foi excluído com sucesso.",
        ));
        let _ = self.fetch(ctx).await;
        Ok(())
    }
}
