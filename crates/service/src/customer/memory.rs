use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{seed, CreateCustomerDto, Customer, CustomerStore, UpdateCustomerDto};
use crate::errors::ServiceError;

#[derive(Debug)]
struct Inner {
    customers: Vec<Customer>,
    next_id: i32,
}

/// Process-local customer list with a monotonic id counter.
///
/// Records keep insertion order. Nothing is persisted, and there is no delete.
#[derive(Debug)]
pub struct InMemoryCustomerStore {
    inner: RwLock<Inner>,
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self { Self::new() }
}

impl InMemoryCustomerStore {
    /// Empty store; the first customer gets id 1.
    pub fn new() -> Self {
        Self { inner: RwLock::new(Inner { customers: Vec::new(), next_id: 1 }) }
    }

    /// Store pre-populated with `count` generated customers, inserted through `create`.
    pub async fn seeded(count: usize) -> Result<Arc<Self>, ServiceError> {
        let store = Self::new();
        for body in seed::random_customers(count) {
            store.create(body).await?;
        }
        info!(count, "seeded in-memory customers");
        Ok(Arc::new(store))
    }

    pub async fn find_all(&self) -> Vec<Customer> {
        self.inner.read().await.customers.clone()
    }

    pub async fn find_one(&self, id: i32) -> Result<Customer, ServiceError> {
        let inner = self.inner.read().await;
        inner
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::customer_not_found(id))
    }

    pub async fn create(&self, data: Value) -> Result<Customer, ServiceError> {
        let new = CreateCustomerDto::from_body(data)?.into_new_customer()?;

        let mut inner = self.inner.write().await;
        let customer = Customer { id: inner.next_id, name: new.name, email: new.email };
        inner.next_id += 1;
        inner.customers.push(customer.clone());
        debug!(customer_id = customer.id, "customer created in memory");
        Ok(customer)
    }

    pub async fn update(&self, id: i32, data: Value) -> Result<Customer, ServiceError> {
        let patch = UpdateCustomerDto::from_body(data)?;
        patch.validate()?;

        let mut inner = self.inner.write().await;
        let customer = inner
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ServiceError::customer_not_found(id))?;
        patch.apply(customer);
        debug!(customer_id = id, "customer updated in memory");
        Ok(customer.clone())
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> { Ok(self.find_all().await) }
    async fn find_one(&self, id: i32) -> Result<Customer, ServiceError> { self.find_one(id).await }
    async fn create(&self, data: Value) -> Result<Customer, ServiceError> { self.create(data).await }
    async fn update(&self, id: i32, data: Value) -> Result<Customer, ServiceError> { self.update(id, data).await }
}
