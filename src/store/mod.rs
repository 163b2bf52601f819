//! # Store Module
//!
//! The capability the property service needs from its backing table: one
//! full scan, one point lookup, one put and one delete. Each call is a single
//! request against the table named by the caller; nothing here retries.
//!
//! Two backends implement it:
//!
//! - [`DynamoDb`](crate::dynamodb::DynamoDb): the AWS SDK client.
//! - [`InMemoryStore`]: a process-local table used for local runs and as the
//!   substitute store in tests.

mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::dynamodb::Item;

pub use memory::InMemoryStore;

#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Returns every item in the table, unfiltered.
    async fn scan(&self, table_name: &str) -> Result<Vec<Item>>;

    /// Returns the item whose primary key matches `key`, if any.
    async fn get_item(&self, table_name: &str, key: Item) -> Result<Option<Item>>;

    /// Writes `item`, replacing any item with the same primary key.
    async fn put_item(&self, table_name: &str, item: Item) -> Result<()>;

    /// Removes the item whose primary key matches `key`. Absent keys are not an error.
    async fn delete_item(&self, table_name: &str, key: Item) -> Result<()>;
}
