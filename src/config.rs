use anyhow::{anyhow, Context, Result};
use std::str::FromStr;
use tracing::Level;

const DEFAULT_TABLE_NAME: &str = "props";

/// Which backend holds the property table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dynamodb" => Ok(StoreBackend::DynamoDb),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!("unknown store backend '{other}' (expected dynamodb or memory)")),
        }
    }
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub table_name: String,
    pub store: StoreBackend,
    pub log_level: Level,
    /// Create the table at startup when it is missing.
    pub ensure_table: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            store: StoreBackend::DynamoDb,
            log_level: Level::INFO,
            ensure_table: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(table_name) = lookup("TABLE_NAME").filter(|v| !v.is_empty()) {
            config.table_name = table_name;
        }
        if let Some(store) = lookup("PROPERTY_STORE") {
            config.store = store.parse().context("invalid PROPERTY_STORE")?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = level
                .parse()
                .map_err(|e| anyhow!("invalid LOG_LEVEL '{level}': {e}"))?;
        }
        if let Some(ensure) = lookup("ENSURE_TABLE") {
            config.ensure_table = ensure
                .parse()
                .with_context(|| format!("invalid ENSURE_TABLE '{ensure}'"))?;
        }

        Ok(config)
    }
}
