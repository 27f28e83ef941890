//! Success envelope shared by every endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{message, data, count?}`.
///
/// Reads carry `message: null`; mutations carry a confirmation message;
/// listings add the total `count` of matching records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl<T> ApiResponse<T> {
    /// Plain read result, no message.
    pub fn data(data: T) -> Self {
        Self {
            message: None,
            data: Some(data),
            count: None,
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            data: Some(data),
            count: None,
        }
    }

    pub fn listed(data: T, count: u64) -> Self {
        Self {
            message: None,
            data: Some(data),
            count: Some(count),
        }
    }
}
