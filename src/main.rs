mod config;
mod dynamodb;
mod error;
mod logging;
mod property;
mod router;
mod service;
mod store;


use std::sync::Arc;

use anyhow::Result;
use lambda_http::service_fn;
use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::dynamodb::{DynamoDb, Table};
use crate::property::ID_ATTRIBUTE;
use crate::service::PropertyService;
use crate::store::{InMemoryStore, PropertyStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    logging::init_logging(config.log_level)?;

    let store = build_store(&config).await?;
    let service = PropertyService::new(store, config.table_name.as_str());
    info!(
        table = service.table_name(),
        store = ?config.store,
        "Property service ready"
    );

    lambda_http::run(service_fn(|request| router::function_handler(&service, request)))
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

async fn build_store(config: &Config) -> Result<Arc<dyn PropertyStore>> {
    match config.store {
        StoreBackend::Memory => Ok(Arc::new(InMemoryStore::new(ID_ATTRIBUTE))),
        StoreBackend::DynamoDb => {
            let sdk_config = aws_config::load_from_env().await;
            let ddb = DynamoDb::new(&sdk_config);

            if config.ensure_table {
                ddb.check_auth().await?;
                let table = Table::new(config.table_name.as_str(), ID_ATTRIBUTE);
                if ddb.create_table_if_not_exists(&table).await?.is_some() {
                    ddb.wait_for_table_active(table.name()).await?;
                }
            }

            Ok(Arc::new(ddb))
        }
    }
}
