//! Request and response types shared by the HTTP handlers

pub mod error;
pub mod json;
pub mod params;
pub mod response;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use params::{parse_param, PageParams};
pub use response::ApiResponse;
