//! Customer resource: DTOs, the store contract, and both store implementations.

pub mod domain;
pub mod store;
pub mod memory;
pub mod seed;
pub mod repository;
pub mod service;

pub use domain::{CreateCustomerDto, Customer, NewCustomer, UpdateCustomerDto};
pub use memory::InMemoryCustomerStore;
pub use repository::{CustomerRepository, SeaOrmCustomerRepository};
pub use service::CustomerService;
pub use store::{CustomerStore, RemovableCustomerStore};

use crate::errors::ServiceError;

/// Coerce a path segment into a customer id. Text that is not an integer can
/// never match a record, so it is reported the same way as an absent id.
pub fn parse_customer_id(raw: &str) -> Result<i32, ServiceError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ServiceError::customer_not_found(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(parse_customer_id("7").unwrap(), 7);
        assert_eq!(parse_customer_id(" 12 ").unwrap(), 12);
    }

    #[test]
    fn garbage_ids_are_not_found() {
        match parse_customer_id("abc") {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "Customer with ID abc not found."),
            other => panic!("unexpected {other:?}"),
        }
    }
}
