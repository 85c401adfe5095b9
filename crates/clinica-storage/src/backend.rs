use std::future::Future;

use serde_json::Value;

use crate::error::StorageError;
use crate::query::Query;

/// A relational row store addressed by table name.
///
/// Rows travel as JSON objects keyed by column name. Implementations apply
/// the query's filters, ordering and limit; there is no transaction
/// boundary and the last write wins.
pub trait Backend: Send + Sync {
    /// Rows of `query.table_name()` matching every filter, in query order.
    fn select(&self, query: &Query) -> impl Future<Output = Result<Vec<Value>, StorageError>> + Send;

    /// Insert one row. Returns the stored row with backend-assigned columns.
    fn insert(
        &self,
        table: &str,
        row: Value,
    ) -> impl Future<Output = Result<Value, StorageError>> + Send;

    /// Merge `patch` into every matching row. Returns the updated rows.
    fn update(
        &self,
        query: &Query,
        patch: Value,
    ) -> impl Future<Output = Result<Vec<Value>, StorageError>> + Send;

    /// Delete every matching row. Returns how many were removed.
    fn delete(&self, query: &Query) -> impl Future<Output = Result<usize, StorageError>> + Send;

    /// Act as the signed-in user from now on, or anonymously with `None`.
    fn authorize(&self, _access_token: Option<&str>) {}
}
