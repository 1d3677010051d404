//! Service layer for the customer resources.
//! - `dto` holds the field allow-list shared by every write path.
//! - `customer` holds the store contract and its in-memory and database-backed implementations.

pub mod errors;
pub mod dto;
pub mod customer;
#[cfg(test)]
pub mod test_support;
