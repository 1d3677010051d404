//! Allow-list checking for raw request bodies.
//!
//! Bodies arrive as `serde_json::Value` so that keys a typed DTO would
//! silently drop are still visible here.

use serde_json::Value;

use crate::errors::ServiceError;

/// Fields a customer body may carry, on create and on update.
pub const CUSTOMER_FIELDS: &[&str] = &["name", "email"];

/// Reject anything that is not a JSON object, or that has keys outside `allowed_fields`.
///
/// The error message lists the offending keys in the order the client sent them.
pub fn validate_dto_fields(dto: &Value, allowed_fields: &[&str]) -> Result<(), ServiceError> {
    let Some(obj) = dto.as_object() else {
        return Err(ServiceError::bad_request("Invalid DTO: Expected an object."));
    };

    let invalid_fields: Vec<&str> = obj
        .keys()
        .map(String::as_str)
        .filter(|field| !allowed_fields.contains(field))
        .collect();

    if !invalid_fields.is_empty() {
        return Err(ServiceError::bad_request(format!("Invalid fields: {}", invalid_fields.join(", "))));
    }
    Ok(())
}
