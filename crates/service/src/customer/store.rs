use async_trait::async_trait;
use serde_json::Value;

use super::Customer;
use crate::errors::ServiceError;

/// Operations every customer resource exposes over HTTP.
///
/// Write operations take the raw request body so that the field allow-list
/// runs inside the store, identically for every implementation.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError>;
    async fn find_one(&self, id: i32) -> Result<Customer, ServiceError>;
    async fn create(&self, data: Value) -> Result<Customer, ServiceError>;
    async fn update(&self, id: i32, data: Value) -> Result<Customer, ServiceError>;
}

/// Stores that also support deletion. The in-memory store does not.
#[async_trait]
pub trait RemovableCustomerStore: CustomerStore {
    async fn remove(&self, id: i32) -> Result<Customer, ServiceError>;
}
