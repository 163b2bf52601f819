use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::{
    operation::{create_table::CreateTableOutput, scan::ScanOutput},
    types::{
        AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
        TableStatus,
    },
    Client,
};
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

use crate::dynamodb::{Item, Table};
use crate::store::PropertyStore;

const TABLE_ACTIVE_MAX_ATTEMPTS: usize = 60;
const TABLE_ACTIVE_POLL_DELAY: Duration = Duration::from_secs(2);

/// DynamoDB client wrapper backing the property table.
///
/// Request-path operations (scan, get, put, delete) are exposed through
/// [`PropertyStore`]; each maps onto one SDK call, except scan which follows
/// `LastEvaluatedKey` until the table is exhausted. Table management is only
/// used at startup.
///
/// # Example
///
/// ```rust
/// let config = aws_config::load_from_env().await;
/// let ddb = DynamoDb::new(&config);
///
/// let table = Table::new("props", "id");
/// if ddb.create_table_if_not_exists(&table).await?.is_some() {
///     ddb.wait_for_table_active(table.name()).await?;
/// }
///
/// let item = Item::new()
///     .set_string("id", "123")
///     .set_string("name", "2 Main Road")
///     .set_number("rent", 899.5);
/// ddb.put_item("props", item).await?;
/// ```
///
/// # Error Handling
///
/// Methods return `anyhow::Result`; SDK errors are passed through with the
/// table name attached as context.
#[derive(Debug, Clone)]
pub struct DynamoDb {
    client: Client,
}

impl DynamoDb {
    /// Creates a new `DynamoDb` instance.
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// Verifies authentication by attempting to list tables.
    pub async fn check_auth(&self) -> Result<()> {
        self.client.list_tables().send().await.map_err(|e| {
            error!("Authentication failed: {}", e);
            anyhow!("Authentication failed")
        })?;
        info!("Authentication successful");
        Ok(())
    }

    /// Creates a table if it doesn't exist.
    pub async fn create_table_if_not_exists(
        &self,
        table: &Table,
    ) -> Result<Option<CreateTableOutput>> {
        if self.table_exists(table.name()).await? {
            info!("Table '{}' exists", table.name());
            return Ok(None);
        }

        let attribute_definition = AttributeDefinition::builder()
            .attribute_name(table.partition_key())
            .attribute_type(ScalarAttributeType::S)
            .build()?;

        let key_schema = KeySchemaElement::builder()
            .attribute_name(table.partition_key())
            .key_type(KeyType::Hash)
            .build()?;

        let output = self
            .client
            .create_table()
            .table_name(table.name())
            .billing_mode(BillingMode::PayPerRequest)
            .attribute_definitions(attribute_definition)
            .key_schema(key_schema)
            .send()
            .await
            .with_context(|| format!("failed to create table '{}'", table.name()))?;
        info!("Table '{}' created", table.name());
        Ok(Some(output))
    }

    /// Polls the table description until the table reports `ACTIVE`.
    ///
    /// A freshly created table rejects item operations while it is `CREATING`.
    pub async fn wait_for_table_active(&self, table_name: &str) -> Result<()> {
        for _ in 0..TABLE_ACTIVE_MAX_ATTEMPTS {
            let status = self
                .client
                .describe_table()
                .table_name(table_name)
                .send()
                .await?
                .table
                .and_then(|table| table.table_status);

            if status == Some(TableStatus::Active) {
                info!("Table '{table_name}' is active");
                return Ok(());
            }
            debug!("Table '{table_name}' status: {status:?}");
            sleep(TABLE_ACTIVE_POLL_DELAY).await;
        }

        Err(anyhow!("timed out waiting for table '{table_name}' to become active"))
    }

    /// Checks if a table exists.
    pub async fn table_exists(&self, table_name: &str) -> Result<bool> {
        let mut start_table_name = None;

        loop {
            let tables = self
                .client
                .list_tables()
                .set_exclusive_start_table_name(start_table_name)
                .send()
                .await?;

            if tables.table_names().iter().any(|name| name == table_name) {
                return Ok(true);
            }

            start_table_name = tables.last_evaluated_table_name;
            if start_table_name.is_none() {
                return Ok(false);
            }
        }
    }
}

#[async_trait]
impl PropertyStore for DynamoDb {
    async fn scan(&self, table_name: &str) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut last_evaluated_key = None;

        loop {
            let response: ScanOutput = self
                .client
                .scan()
                .table_name(table_name)
                .set_exclusive_start_key(last_evaluated_key)
                .send()
                .await
                .with_context(|| format!("scan of '{table_name}' failed"))?;

            if let Some(new_items) = response.items {
                items.extend(new_items.into_iter().map(Item::from));
            }

            last_evaluated_key = response.last_evaluated_key;

            if last_evaluated_key.is_none() {
                break;
            }
        }

        debug!("Scanned {} items from '{table_name}'", items.len());
        Ok(items)
    }

    async fn get_item(&self, table_name: &str, key: Item) -> Result<Option<Item>> {
        let response = self
            .client
            .get_item()
            .table_name(table_name)
            .set_key(Some(key.into_attributes()))
            .send()
            .await
            .with_context(|| format!("get item from '{table_name}' failed"))?;

        Ok(response.item.map(Item::from))
    }

    async fn put_item(&self, table_name: &str, item: Item) -> Result<()> {
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item.into_attributes()))
            .send()
            .await
            .with_context(|| format!("put item into '{table_name}' failed"))?;

        debug!("Item added to '{table_name}'");
        Ok(())
    }

    async fn delete_item(&self, table_name: &str, key: Item) -> Result<()> {
        self.client
            .delete_item()
            .table_name(table_name)
            .set_key(Some(key.into_attributes()))
            .send()
            .await
            .with_context(|| format!("delete item from '{table_name}' failed"))?;

        debug!("Item deleted from '{table_name}'");
        Ok(())
    }
}
