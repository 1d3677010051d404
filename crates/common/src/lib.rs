//! Pieces shared by every crate in the workspace: tracing setup and the
//! small response types that do not belong to a domain.

pub mod types;
pub mod utils;
