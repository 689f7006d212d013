use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{SheetGateway, Table};
use crate::StoreError;

/// In-process sheet store. Backs tests and local runs without Google credentials.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    tables: Mutex<HashMap<String, Table>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(self, worksheet: impl Into<String>, table: Table) -> Self {
        self.insert(worksheet, table);
        self
    }

    pub fn insert(&self, worksheet: impl Into<String>, table: Table) {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(worksheet.into(), table);
    }

    pub fn table(&self, worksheet: &str) -> Option<Table> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(worksheet)
            .cloned()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every following call fail as if the remote store were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Http {
                status: 503,
                body: "service unavailable".to_owned(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl SheetGateway for MemoryGateway {
    async fn read(&self, worksheet: &str) -> Result<Table, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        self.table(worksheet)
            .ok_or_else(|| StoreError::Http {
                status: 400,
                body: format!("Unable to parse range: {worksheet}"),
            })
    }

    async fn write(&self, worksheet: &str, table: &Table) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.insert(worksheet, table.clone());

        Ok(())
    }
}
