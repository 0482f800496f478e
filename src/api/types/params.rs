//! Query string helpers shared by list endpoints

use std::str::FromStr;

use serde::Deserialize;

use super::error::ApiError;
use crate::domain::pagination::PageRequest;

/// Parses one query value, naming the parameter on failure
pub fn parse_param<T: FromStr>(name: &str, value: &str) -> Result<T, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid value '{}' for '{}'", value, name)))
}

/// `?page=&limit=` as sent by the client
///
/// Values are kept as strings so a malformed number yields the standard
/// error envelope instead of a plain-text rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageParams {
    pub fn to_page_request(&self) -> Result<PageRequest, ApiError> {
        let page = self
            .page
            .as_deref()
            .map(|v| parse_param("page", v))
            .transpose()?;
        let limit = self
            .limit
            .as_deref()
            .map(|v| parse_param("limit", v))
            .transpose()?;

        Ok(PageRequest::from_optional(page, limit)?)
    }
}
