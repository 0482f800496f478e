//! Success envelope shared by every endpoint

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::json::Json;

/// `{"success": true, "message"?: ..., "data"?: ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// Success with only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_skips_absent_fields() {
        let json = serde_json::to_string(&ApiResponse::ok(3)).unwrap();
        assert_eq!(json, r#"{"success":true,"data":3}"#);

        let json = serde_json::to_string(&ApiResponse::message("Removed")).unwrap();
        assert_eq!(json, r#"{"success":true,"message":"Removed"}"#);

        let json =
            serde_json::to_string(&ApiResponse::ok("x").with_message("Created")).unwrap();
        assert_eq!(json, r#"{"success":true,"message":"Created","data":"x"}"#);
    }
}
