use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;

use crate::dynamodb::Item;
use crate::store::PropertyStore;

type Rows = BTreeMap<String, Item>;

/// Process-local store keyed by table name, then by partition key value.
///
/// Reads and writes can be switched to fail so callers can observe how store
/// failures surface. Every successful or attempted write is counted.
#[derive(Debug)]
pub struct InMemoryStore {
    partition_key: String,
    tables: Mutex<HashMap<String, Rows>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn new(partition_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            tables: Mutex::new(HashMap::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    fn key_of(&self, item: &Item) -> Result<String> {
        item.get_string(&self.partition_key)
            .cloned()
            .ok_or_else(|| anyhow!("missing string key attribute '{}'", self.partition_key))
    }

    fn check_reads(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("read capacity exceeded"));
        }
        Ok(())
    }

    fn check_writes(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("write capacity exceeded"));
        }
        Ok(())
    }
}

#[cfg(test)]
impl InMemoryStore {
    /// Makes every subsequent scan and get fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent put and delete fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of put and delete calls that reached the store.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Stores `item` as-is, bypassing the write counter.
    pub fn seed(&self, table_name: &str, item: Item) -> Result<()> {
        let key = self.key_of(&item)?;
        self.tables
            .lock()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?
            .entry(table_name.to_string())
            .or_default()
            .insert(key, item);
        Ok(())
    }
}

#[async_trait]
impl PropertyStore for InMemoryStore {
    async fn scan(&self, table_name: &str) -> Result<Vec<Item>> {
        self.check_reads()?;
        let tables = self
            .tables
            .lock()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        let items: Vec<Item> = tables
            .get(table_name)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default();
        debug!("Scanned {} items from '{table_name}'", items.len());
        Ok(items)
    }

    async fn get_item(&self, table_name: &str, key: Item) -> Result<Option<Item>> {
        self.check_reads()?;
        let key = self.key_of(&key)?;
        let tables = self
            .tables
            .lock()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        Ok(tables.get(table_name).and_then(|rows| rows.get(&key)).cloned())
    }

    async fn put_item(&self, table_name: &str, item: Item) -> Result<()> {
        self.check_writes()?;
        let key = self.key_of(&item)?;
        self.tables
            .lock()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?
            .entry(table_name.to_string())
            .or_default()
            .insert(key, item);
        debug!("Item added to '{table_name}'");
        Ok(())
    }

    async fn delete_item(&self, table_name: &str, key: Item) -> Result<()> {
        self.check_writes()?;
        let key = self.key_of(&key)?;
        if let Some(rows) = self
            .tables
            .lock()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?
            .get_mut(table_name)
        {
            rows.remove(&key);
        }
        debug!("Item deleted from '{table_name}'");
        Ok(())
    }
}
