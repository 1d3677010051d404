use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set, Unchanged};

use models::customer;

use super::Customer;
use crate::errors::ServiceError;

/// Single-statement persistence primitives for the `Customer` table.
///
/// Writes report "nothing happened" as `None` / `0` instead of an error so the
/// service decides how to surface it.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn insert(&self, name: &str, email: &str) -> Result<Option<Customer>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError>;
    async fn update_by_id(&self, id: i32, name: Option<&str>, email: Option<&str>) -> Result<Option<Customer>, ServiceError>;
    async fn delete_by_id(&self, id: i32) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn insert(&self, name: &str, email: &str) -> Result<Option<Customer>, ServiceError> {
        let am = customer::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            ..Default::default()
        };
        match am.insert(&self.db).await {
            Ok(m) => Ok(Some(m)),
            Err(DbErr::RecordNotInserted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
        let rows = customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError> {
        Ok(customer::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn update_by_id(&self, id: i32, name: Option<&str>, email: Option<&str>) -> Result<Option<Customer>, ServiceError> {
        if name.is_none() && email.is_none() {
            return self.find_by_id(id).await;
        }
        let mut am = customer::ActiveModel { id: Unchanged(id), ..Default::default() };
        if let Some(n) = name { am.name = Set(n.to_string()); }
        if let Some(e) = email { am.email = Set(e.to_string()); }
        match am.update(&self.db).await {
            Ok(m) => Ok(Some(m)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, ServiceError> {
        let res = customer::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected)
    }
}

/// In-memory repository for service tests; `detached` makes every write a no-op
/// as if the row had vanished between the lookup and the write.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCustomerRepository {
        rows: Mutex<Vec<Customer>>,
        pub detached: bool,
    }

    impl MockCustomerRepository {
        pub fn with_rows(rows: Vec<Customer>, detached: bool) -> Self {
            Self { rows: Mutex::new(rows), detached }
        }
    }

    #[async_trait]
    impl CustomerRepository for MockCustomerRepository {
        async fn insert(&self, name: &str, email: &str) -> Result<Option<Customer>, ServiceError> {
            if self.detached { return Ok(None); }
            let mut rows = self.rows.lock().unwrap();
            let id = rows.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            let c = Customer { id, name: name.into(), email: email.into() };
            rows.push(c.clone());
            Ok(Some(c))
        }

        async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError> {
            Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
        }

        async fn update_by_id(&self, id: i32, name: Option<&str>, email: Option<&str>) -> Result<Option<Customer>, ServiceError> {
            if self.detached { return Ok(None); }
            let mut rows = self.rows.lock().unwrap();
            let Some(c) = rows.iter_mut().find(|c| c.id == id) else { return Ok(None) };
            if let Some(n) = name { c.name = n.into(); }
            if let Some(e) = email { c.email = e.into(); }
            Ok(Some(c.clone()))
        }

        async fn delete_by_id(&self, id: i32) -> Result<u64, ServiceError> {
            if self.detached { return Ok(0); }
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|c| c.id != id);
            Ok((before - rows.len()) as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn seaorm_repository_crud() -> Result<(), anyhow::Error> {
        let repo = SeaOrmCustomerRepository { db: get_db().await? };

        assert!(repo.find_all().await?.is_empty());

        let a = repo.insert("John Doe", "john.doe@example.com").await?.unwrap();
        let b = repo.insert("Ann", "ann@example.com").await?.unwrap();
        assert!(b.id > a.id);
        assert_eq!(repo.find_by_id(a.id).await?, Some(a.clone()));

        let updated = repo.update_by_id(a.id, Some("Jane Doe"), None).await?.unwrap();
        assert_eq!(updated.name, "Jane Doe");
        assert_eq!(updated.email, "john.doe@example.com");

        let untouched = repo.update_by_id(b.id, None, None).await?.unwrap();
        assert_eq!(untouched, b);

        assert!(repo.update_by_id(999, Some("Nobody"), None).await?.is_none());

        assert_eq!(repo.delete_by_id(a.id).await?, 1);
        assert_eq!(repo.delete_by_id(a.id).await?, 0);
        assert!(repo.find_by_id(a.id).await?.is_none());

        let ids: Vec<i32> = repo.find_all().await?.into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![b.id]);
        Ok(())
    }
}
