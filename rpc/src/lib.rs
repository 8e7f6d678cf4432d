//! HTTP surface of the withdrawer.

pub use api::{endpoint, Config, LIST_LIMIT};
pub use error::ApiError;
pub use validation::{validate, ValidatedRequest, ValidationError};

mod api;
mod error;
mod validation;
