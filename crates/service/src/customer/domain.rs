use serde::Deserialize;
use serde_json::Value;

use models::customer::{validate_email, validate_name};

use crate::dto::{validate_dto_fields, CUSTOMER_FIELDS};
use crate::errors::ServiceError;

/// A stored customer. Both stores hand out the entity model directly.
pub use models::customer::Model as Customer;

/// Body of a create request, after the allow-list check.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCustomerDto {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Body of an update request; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCustomerDto {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Fully validated input for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}

fn from_body<T: serde::de::DeserializeOwned>(data: Value) -> Result<T, ServiceError> {
    validate_dto_fields(&data, CUSTOMER_FIELDS)?;
    serde_json::from_value(data).map_err(|e| ServiceError::bad_request(e.to_string()))
}

impl CreateCustomerDto {
    pub fn from_body(data: Value) -> Result<Self, ServiceError> { from_body(data) }

    /// Both fields are required and must be non-empty.
    pub fn into_new_customer(self) -> Result<NewCustomer, ServiceError> {
        let (name, email) = match (self.name, self.email) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => (name, email),
            _ => return Err(ServiceError::bad_request("Invalid customer data.")),
        };
        validate_name(&name)?;
        validate_email(&email)?;
        Ok(NewCustomer { name, email })
    }
}

impl UpdateCustomerDto {
    pub fn from_body(data: Value) -> Result<Self, ServiceError> { from_body(data) }

    /// Check only the fields that are present.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(name) = &self.name { validate_name(name)?; }
        if let Some(email) = &self.email { validate_email(email)?; }
        Ok(())
    }

    pub fn apply(self, customer: &mut Customer) {
        if let Some(name) = self.name { customer.name = name; }
        if let Some(email) = self.email { customer.email = email; }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_both_fields() {
        for body in [json!({"name": "John"}), json!({"email": "j@example.com"}), json!({"name": "", "email": "j@example.com"})] {
            let err = CreateCustomerDto::from_body(body).unwrap().into_new_customer().unwrap_err();
            assert_eq!(err.to_string(), "Invalid customer data.");
        }
    }

    #[test]
    fn create_checks_email_shape() {
        let err = CreateCustomerDto::from_body(json!({"name": "John", "email": "nope"}))
            .unwrap()
            .into_new_customer()
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[test]
    fn wrong_json_types_are_bad_requests() {
        let err = CreateCustomerDto::from_body(json!({"name": 5, "email": "j@example.com"})).unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[test]
    fn update_applies_only_present_fields() {
        let mut c = Customer { id: 3, name: "John Doe".into(), email: "john.doe@example.com".into() };
        let patch = UpdateCustomerDto::from_body(json!({"name": "Jane Doe"})).unwrap();
        patch.validate().unwrap();
        patch.apply(&mut c);
        assert_eq!(c, Customer { id: 3, name: "Jane Doe".into(), email: "john.doe@example.com".into() });
    }
}
