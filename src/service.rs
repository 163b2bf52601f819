use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::dynamodb::Item;
use crate::error::{Result, ServiceError};
use crate::property::{Property, ID_ATTRIBUTE};
use crate::store::PropertyStore;

/// CRUD operations over the property table.
///
/// Every operation validates its input first and then makes exactly one
/// store call. Store failures are returned as a [`ServiceError`]; nothing is
/// retried.
#[derive(Clone)]
pub struct PropertyService {
    store: Arc<dyn PropertyStore>,
    table_name: String,
}

impl PropertyService {
    pub fn new(store: Arc<dyn PropertyStore>, table_name: impl Into<String>) -> Self {
        Self {
            store,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Lists every property in the table. An empty table yields an empty list.
    pub async fn list_all(&self) -> Result<Vec<Property>> {
        debug!("List properties");
        let items = self
            .store
            .scan(&self.table_name)
            .await
            .map_err(ServiceError::query)?;

        let properties = items
            .iter()
            .map(|item| item.to_record::<Property>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(properties)
    }

    /// Looks up the property stored under `id`.
    pub async fn get_by_id(&self, id: &str) -> Result<Property> {
        if id.is_empty() {
            return Err(ServiceError::invalid("Id missing"));
        }
        debug!("Get property with id: {id}");

        let item = self
            .store
            .get_item(&self.table_name, key(id))
            .await
            .map_err(ServiceError::query)?
            .ok_or_else(|| ServiceError::NotFound { id: id.to_string() })?;

        Ok(item.to_record()?)
    }

    /// Persists a new property under a freshly minted id.
    ///
    /// Any id supplied by the caller is discarded.
    pub async fn create(&self, mut property: Property) -> Result<Property> {
        if property.name.is_empty() {
            return Err(ServiceError::invalid("Name missing"));
        }

        property.id = Uuid::new_v4().to_string();
        info!("Create property with id: {}", property.id);
        self.persist(property).await
    }

    /// Replaces the property stored under `id` with `property`.
    ///
    /// `id` must be non-empty and equal to `property.id`, and the name must be set.
    pub async fn update(&self, id: &str, property: Property) -> Result<Property> {
        if id.is_empty() || id != property.id {
            return Err(ServiceError::invalid("Id missing or mismatched"));
        }
        if property.name.is_empty() {
            return Err(ServiceError::invalid("Name missing"));
        }

        info!("Update property with id: {id}");
        self.persist(property).await
    }

    /// Deletes the property stored under `id`. Deleting an absent id succeeds.
    pub async fn delete(&self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(ServiceError::invalid("Id missing"));
        }

        info!("Delete property with id: {id}");
        self.store
            .delete_item(&self.table_name, key(id))
            .await
            .map_err(ServiceError::persistence)
    }

    // The store does not echo the written item back, so the input is returned.
    async fn persist(&self, property: Property) -> Result<Property> {
        let item = Item::from_record(&property)?;
        self.store
            .put_item(&self.table_name, item)
            .await
            .map_err(ServiceError::persistence)?;
        Ok(property)
    }
}

fn key(id: &str) -> Item {
    Item::new().set_string(ID_ATTRIBUTE, id)
}
