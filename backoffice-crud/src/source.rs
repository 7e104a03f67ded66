//! Data source abstraction.
//!
//! The orchestrator talks to records only through [`DataSource`], so the
//! in-memory [`MemorySource`] can be swapped for a real backend without
//! touching the table, form or modal logic.

use async_trait::async_trait;
use backoffice_model::{value_text, Collection, Record, RecordId};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::Latency;
use crate::error::{CrudError, CrudResult};

/// Field stamped with the creation date of new records.
pub const CREATED_AT: &str = "createdAt";

/// Record storage behind a page.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Returns every record, newest first.
    async fn list(&self) -> CrudResult<Vec<Record>>;

    /// Stores a new record and returns it with its assigned id.
    async fn create(&self, fields: Map<String, Value>) -> CrudResult<Record>;

    /// Merges `fields` into an existing record and returns the result.
    async fn update(&self, id: &RecordId, fields: Map<String, Value>) -> CrudResult<Record>;

    async fn delete(&self, id: &RecordId) -> CrudResult<()>;
}

/// Server-side search used by tables in remote search mode.
#[async_trait]
pub trait ExternalSearch: Send + Sync {
    /// Records matching `term`. A blank term returns everything.
    async fn search(&self, term: &str) -> CrudResult<Vec<Record>>;
}

/// In-memory data source with simulated round-trip latency.
#[derive(Debug)]
pub struct MemorySource {
    records: RwLock<Collection>,
    latency: Latency,
    defaults: Map<String, Value>,
    fail_next: AtomicBool,
}

impl MemorySource {
    pub fn new(records: Vec<Record>, latency: Latency) -> Self {
        Self {
            records: RwLock::new(Collection::from_records(records)),
            latency,
            defaults: Map::new(),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Fields stamped onto new records unless the caller provides them.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.defaults = defaults;
        self
    }

    /// Makes the next operation fail after its delay.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Current contents, without delay.
    pub async fn snapshot(&self) -> Collection {
        self.records.read().await.clone()
    }

    async fn round_trip(&self, delay: Duration, op: &str) -> CrudResult<()> {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.fail_next.swap(false, Ordering::SeqCst) {
            debug!(op, "simulated failure");
            return Err(CrudError::Source(format!("{op} failed")));
        }
        Ok(())
    }
}

/// Today's date as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[async_trait]
impl DataSource for MemorySource {
    async fn list(&self) -> CrudResult<Vec<Record>> {
        self.round_trip(self.latency.list, "list").await?;
        Ok(self.records.read().await.records().to_vec())
    }

    async fn create(&self, fields: Map<String, Value>) -> CrudResult<Record> {
        self.round_trip(self.latency.create, "create").await?;
        let mut records = self.records.write().await;

        let mut values = self.defaults.clone();
        values.insert(CREATED_AT.into(), Value::String(today()));
        values.extend(fields);

        let record = Record::new(records.next_id(), values);
        if !records.prepend(record.clone()) {
            return Err(CrudError::Duplicate(record.id));
        }
        debug!(id = %record.id, "record created");
        Ok(record)
    }

    async fn update(&self, id: &RecordId, fields: Map<String, Value>) -> CrudResult<Record> {
        self.round_trip(self.latency.update, "update").await?;
        let mut records = self.records.write().await;
        let record = records
            .replace(id, &fields)
            .cloned()
            .ok_or_else(|| CrudError::NotFound(id.clone()))?;
        debug!(%id, "record updated");
        Ok(record)
    }

    async fn delete(&self, id: &RecordId) -> CrudResult<()> {
        self.round_trip(self.latency.delete, "delete").await?;
        let mut records = self.records.write().await;
        records
            .remove(id)
            .ok_or_else(|| CrudError::NotFound(id.clone()))?;
        debug!(%id, "record deleted");
        Ok(())
    }
}

#[async_trait]
impl ExternalSearch for MemorySource {
    async fn search(&self, term: &str) -> CrudResult<Vec<Record>> {
        self.round_trip(self.latency.search, "search").await?;
        let needle = term.trim().to_lowercase();
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|record| {
                needle.is_empty()
                    || record.id.to_string().contains(&needle)
                    || record.fields.values().any(|value| {
                        value_text(value).is_some_and(|t| t.to_lowercase().contains(&needle))
                    })
            })
            .cloned()
            .collect())
    }
}
