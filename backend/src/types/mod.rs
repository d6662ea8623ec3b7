//! Environment configuration and universal error handling

mod environment;
mod error;

pub use environment::Environment;
pub use error::{ApiErrorResponse, AppError};
