use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name should not be empty".into()));
    }
    Ok(())
}

/// Shape check only: one `@`, something before it, and a dotted domain after it.
pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    let invalid = || errors::ModelError::Validation("email must be an email".into());
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::MigratorTrait;
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    #[test]
    fn accepts_plain_addresses() {
        for ok in ["john.doe@example.com", "a@b.io", "first+tag@mail.example.org"] {
            assert!(validate_email(ok).is_ok(), "{ok}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "john", "@example.com", "john@", "john@example", "john@.com", "john@example.", "jo hn@example.com", "a@b@c.com", "a@b..com"] {
            assert!(validate_email(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn name_must_have_content() {
        assert!(validate_name("John").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[tokio::test]
    async fn table_assigns_increasing_ids() -> anyhow::Result<()> {
        let db = crate::db::connect_with_config(&crate::db::sqlite_memory_config()).await?;
        migration::Migrator::up(&db, None).await?;

        let first = ActiveModel { name: Set("Ann".into()), email: Set("ann@example.com".into()), ..Default::default() }
            .insert(&db)
            .await?;
        let second = ActiveModel { name: Set("Bob".into()), email: Set("bob@example.com".into()), ..Default::default() }
            .insert(&db)
            .await?;
        assert!(first.id >= 1);
        assert!(second.id > first.id);

        let all = Entity::find().all(&db).await?;
        assert_eq!(all.len(), 2);
        Ok(())
    }
}
