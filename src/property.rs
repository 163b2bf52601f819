use serde::{Deserialize, Serialize};

/// Name of the partition key attribute of the property table.
pub const ID_ATTRIBUTE: &str = "id";

/// A rentable property, stored as one item keyed by `id`.
///
/// Every field defaults when absent so that request bodies such as
/// `{"name": "2 Main Road"}` decode; validation happens in the service.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rent: f64,
}

#[cfg(test)]
impl Property {
    pub fn new(name: impl Into<String>, rent: f64) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            rent,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_decode_to_defaults() {
        let property: Property = serde_json::from_str(r#"{"name":"2 Main Road"}"#).unwrap();
        assert_eq!(property, Property::new("2 Main Road", 0.0));
    }

    #[test]
    fn encodes_fields_in_declaration_order() {
        let property = Property::new("123 Fake Street", 1200.0).with_id("abc");
        assert_eq!(
            serde_json::to_string(&property).unwrap(),
            r#"{"id":"abc","name":"123 Fake Street","rent":1200.0}"#
        );
    }
}
