use crate::domain::model::ListQuery;
use crate::domain::ports::DataStore;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-process store with the same list/insert contract as the hosted one.
/// Inserts are visible to the very next list. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    unreachable: Arc<AtomicBool>,
    next_id: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, table: &str, rows: Vec<Value>) {
        let mut tables = self.tables.lock().await;
        tables.entry(table.to_string()).or_default().extend(rows);
    }

    pub async fn rows(&self, table: &str) -> Vec<Value> {
        let tables = self.tables.lock().await;
        tables.get(table).cloned().unwrap_or_default()
    }

    /// Simulates the store going offline (or coming back).
    pub fn set_reachable(&self, reachable: bool) {
        self.unreachable.store(!reachable, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> Result<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(SiteError::StoreError {
                status: 503,
                message: "data store unreachable".to_string(),
            });
        }
        Ok(())
    }
}

fn created_at(row: &Value) -> Option<DateTime<Utc>> {
    row.get("created_at")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Value>> {
        self.check_reachable()?;
        let mut rows = self.rows(query.table).await;

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let (ka, kb) = (a.get(order.column), b.get(order.column));
                let cmp = if order.column == "created_at" {
                    created_at(a).cmp(&created_at(b))
                } else {
                    ka.map(Value::to_string).cmp(&kb.map(Value::to_string))
                };
                if order.ascending {
                    cmp
                } else {
                    cmp.reverse()
                }
            });
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>> {
        self.check_reachable()?;

        let mut created = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut fields) = row else {
                return Err(SiteError::StoreError {
                    status: 400,
                    message: format!("rows inserted into {} must be objects", table),
                });
            };
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            fields
                .entry("id")
                .or_insert_with(|| Value::String(format!("{}-{}", table, id)));
            fields
                .entry("created_at")
                .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
            created.push(Value::Object(fields));
        }

        self.seed(table, created.clone()).await;
        Ok(created)
    }
}
