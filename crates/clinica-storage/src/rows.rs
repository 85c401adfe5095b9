//! Typed helpers over [`Backend`]: rows in and out as domain structs.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use clinica_core::tables::column;

use crate::backend::Backend;
use crate::error::StorageError;
use crate::query::Query;

/// Rows of `table` owned by `tenant_id`.
pub fn tenant_scoped(table: &str, tenant_id: Uuid) -> Query {
    Query::table(table).eq(column::TENANT_ID, tenant_id)
}

/// The single row `id` of `table`, restricted to `tenant_id`.
pub fn tenant_row(table: &str, tenant_id: Uuid, id: Uuid) -> Query {
    tenant_scoped(table, tenant_id).eq(column::ID, id)
}

pub async fn select_rows<B, T>(backend: &B, query: &Query) -> Result<Vec<T>, StorageError>
where
    B: Backend,
    T: DeserializeOwned,
{
    let rows = backend.select(query).await?;
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(StorageError::from))
        .collect()
}

pub async fn insert_row<B, I, T>(backend: &B, table: &str, input: &I) -> Result<T, StorageError>
where
    B: Backend,
    I: Serialize,
    T: DeserializeOwned,
{
    let row = serde_json::to_value(input)?;
    let stored = backend.insert(table, row).await?;
    Ok(serde_json::from_value(stored)?)
}

/// Update the rows selected by `query`. Fails with `NotFound` when none matched.
pub async fn update_rows<B, P, T>(
    backend: &B,
    query: &Query,
    patch: &P,
) -> Result<Vec<T>, StorageError>
where
    B: Backend,
    P: Serialize,
    T: DeserializeOwned,
{
    let patch = serde_json::to_value(patch)?;
    let rows = backend.update(query, patch).await?;
    if rows.is_empty() {
        return Err(not_found(query));
    }
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(StorageError::from))
        .collect()
}

/// Delete the rows selected by `query`. Fails with `NotFound` when none matched.
pub async fn delete_rows<B: Backend>(backend: &B, query: &Query) -> Result<usize, StorageError> {
    let removed = backend.delete(query).await?;
    if removed == 0 {
        return Err(not_found(query));
    }
    Ok(removed)
}

fn not_found(query: &Query) -> StorageError {
    let id = query
        .filters()
        .iter()
        .find(|f| f.column == column::ID)
        .map(|f| f.value.clone())
        .unwrap_or_default();
    StorageError::NotFound {
        table: query.table_name().to_string(),
        id,
    }
}
