use aws_sdk_dynamodb::types::AttributeValue;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

/// A single record as the store sees it: attribute names mapped to values.
///
/// Items are used both for whole records (put, scan, get results) and for
/// keys (get, delete), where only the partition key attribute is set.
///
/// # Example
///
/// ```
/// let key = Item::new().set_string("id", "fefd41e1-a66f-4e18-bb81-710587ac4574");
///
/// let record = Item::new()
///     .set_string("id", "fefd41e1-a66f-4e18-bb81-710587ac4574")
///     .set_string("name", "Test Property")
///     .set_number("rent", 999.99);
/// ```
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Item {
    pub(crate) attributes: HashMap<String, AttributeValue>,
}

impl Item {
    /// Creates a new empty `Item`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes a record into its attribute map.
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, serde_dynamo::Error> {
        let attributes: HashMap<String, AttributeValue> = serde_dynamo::to_item(record)?;
        Ok(Self { attributes })
    }

    /// Deserializes the attribute map into a record.
    pub fn to_record<T: DeserializeOwned>(&self) -> Result<T, serde_dynamo::Error> {
        serde_dynamo::from_item(self.attributes.clone())
    }

    /// Sets a string attribute.
    pub fn set_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(key.into(), AttributeValue::S(value.into()));
        self
    }

    /// Gets the value of an attribute as a string.
    ///
    /// Returns `None` if the attribute doesn't exist or is not a string.
    pub fn get_string(&self, key: &str) -> Option<&String> {
        self.attributes.get(key).and_then(|av| av.as_s().ok())
    }

    pub fn into_attributes(self) -> HashMap<String, AttributeValue> {
        self.attributes
    }
}

#[cfg(test)]
impl Item {
    /// Sets a number attribute.
    ///
    /// DynamoDB transports numbers as strings, so the value is stored in its decimal form.
    pub fn set_number(mut self, key: impl Into<String>, value: impl Into<f64>) -> Self {
        self.attributes
            .insert(key.into(), AttributeValue::N(value.into().to_string()));
        self
    }

    /// Sets an arbitrary attribute value.
    pub fn set(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Gets the value of an attribute as a number (f64).
    ///
    /// Returns `None` if the attribute doesn't exist, is not a number, or can't be parsed as f64.
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.attributes
            .get(key)
            .and_then(|av| av.as_n().ok())
            .and_then(|n| n.parse().ok())
    }
}

impl From<HashMap<String, AttributeValue>> for Item {
    fn from(attributes: HashMap<String, AttributeValue>) -> Self {
        Self { attributes }
    }
}
