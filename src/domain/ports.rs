use crate::domain::model::ListQuery;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The hosted tabular store. Rows travel as raw JSON; typing happens in the
/// loader so every backend stays schema-agnostic.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Value>>;

    /// Returns the created rows when the backend echoes them back.
    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>>;
}

pub trait StoreSettings: Send + Sync {
    fn store_url(&self) -> &str;
    fn anon_key(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
}
