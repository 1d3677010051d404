use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument};

use super::{CreateCustomerDto, Customer, CustomerRepository, CustomerStore, RemovableCustomerStore, UpdateCustomerDto};
use crate::errors::ServiceError;

/// Application service for the database-backed customer resource.
/// Validation, existence checks and zero-row handling live here; the
/// repository only runs statements.
pub struct CustomerService<R: CustomerRepository> {
    repo: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip_all)]
    pub async fn create(&self, data: Value) -> Result<Customer, ServiceError> {
        let new = CreateCustomerDto::from_body(data)?.into_new_customer()?;
        let created = self
            .repo
            .insert(&new.name, &new.email)
            .await?
            .ok_or_else(|| ServiceError::bad_request("Create customer failed"))?;
        info!(customer_id = created.id, "customer created");
        Ok(created)
    }

    /// Unlike the in-memory store, an empty table is an error here.
    pub async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
        let all = self.repo.find_all().await?;
        if all.is_empty() {
            return Err(ServiceError::NotFound("No customers found".into()));
        }
        Ok(all)
    }

    pub async fn find_one(&self, id: i32) -> Result<Customer, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::customer_not_found(id))
    }

    #[instrument(skip(self, data))]
    pub async fn update(&self, id: i32, data: Value) -> Result<Customer, ServiceError> {
        let existing = self.find_one(id).await?;

        let patch = UpdateCustomerDto::from_body(data)?;
        patch.validate()?;

        let updated = self
            .repo
            .update_by_id(existing.id, patch.name.as_deref(), patch.email.as_deref())
            .await?
            .ok_or_else(|| ServiceError::bad_request("Failed to update customer"))?;
        info!(customer_id = updated.id, "customer updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: i32) -> Result<Customer, ServiceError> {
        let existing = self.find_one(id).await?;
        let affected = self.repo.delete_by_id(existing.id).await?;
        if affected == 0 {
            return Err(ServiceError::bad_request("Failed to delete customer"));
        }
        info!(customer_id = existing.id, "customer removed");
        Ok(existing)
    }
}

#[async_trait]
impl<R: CustomerRepository> CustomerStore for CustomerService<R> {
    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> { self.find_all().await }
    async fn find_one(&self, id: i32) -> Result<Customer, ServiceError> { self.find_one(id).await }
    async fn create(&self, data: Value) -> Result<Customer, ServiceError> { self.create(data).await }
    async fn update(&self, id: i32, data: Value) -> Result<Customer, ServiceError> { self.update(id, data).await }
}

#[async_trait]
impl<R: CustomerRepository> RemovableCustomerStore for CustomerService<R> {
    async fn remove(&self, id: i32) -> Result<Customer, ServiceError> { self.remove(id).await }
}
