//! # DynamoDB Module
//!
//! The DynamoDB backend of the property store.
//!
//! ## Components
//!
//! - `DynamoDb`: A client wrapper implementing [`PropertyStore`](crate::store::PropertyStore)
//!   plus the table bootstrap used at startup.
//! - `Item`: A DynamoDB item, converted to and from records with `serde_dynamo`.
//! - `Table`: The key layout of a table.
//!
//! ## Usage
//!
//! Credentials and region are read by `aws_config` from the standard environment:
//!
//! - `AWS_ACCESS_KEY_ID`: Your AWS access key ID.
//! - `AWS_SECRET_ACCESS_KEY`: Your AWS secret access key.
//! - `AWS_REGION`: The AWS region where your DynamoDB tables are located.
//!
//! Optionally, you can also set:
//! - `AWS_SESSION_TOKEN`: If you're using temporary credentials.
//! - `AWS_ENDPOINT_URL`: For using a custom endpoint (e.g., DynamoDB Local).

mod client;
mod item;
mod table;

pub use client::DynamoDb;
pub use item::Item;
pub use table::Table;
