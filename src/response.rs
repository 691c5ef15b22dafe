//! Various response objects returned from Zoho.
//!
//! The record and file operations on [`Client`](crate::Client) return the raw HTTP response.
//! These types are what a caller usually deserializes that response into.

use crate::params::Document;
use serde::Deserialize;
use std::fmt;

/// Wrapper around a successful read, listing, or related-list response.
#[derive(Debug, Deserialize)]
pub struct ApiGetResponse<T> {
    pub data: Vec<T>,
    pub info: Option<ApiGetResponseInfo>,
}

/// Meta data sent back with list responses.
#[derive(Debug, Deserialize)]
pub struct ApiGetResponseInfo {
    pub count: Option<usize>,
    pub more_records: Option<bool>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// One entry of a record's attachment listing.
///
/// Only the identifier and file name are lifted out; everything else Zoho sends
/// (`Size`, `Created_Time`, `$file_id`, ...) stays in `fields`.
#[derive(Debug, Deserialize)]
pub struct Attachment {
    pub id: String,

    #[serde(rename = "File_Name")]
    pub file_name: Option<String>,

    #[serde(flatten)]
    pub fields: Document,
}

/// Body returned by create, update, patch and delete requests.
#[derive(Debug, Deserialize)]
pub struct ApiSuccessResponse {
    pub data: Vec<ApiSuccessResponseDataItem>,
}

#[derive(Debug, Deserialize)]
pub struct ApiSuccessResponseDataItem {
    pub code: String,
    pub details: ResponseDataItemDetails,
    pub message: String,
    pub status: String,
}

// The order of the variants matter here, because `serde` will try to match each variant,
// starting from the top.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ResponseDataItemDetails {
    Success(ResponseDataItemDetailsSuccess),
    Error(ResponseDataItemDetailsError),
}

#[derive(Debug, Deserialize)]
pub struct ResponseDataItemDetailsError {
    pub api_name: Option<String>,
    pub expected_data_type: Option<String>,
    pub index: Option<usize>,
}

/// Response details object returned when a record was successfully inserted or updated.
#[derive(Debug, Deserialize)]
pub struct ResponseDataItemDetailsSuccess {
    #[serde(alias = "Modified_Time")]
    pub modified_time: String,

    #[serde(alias = "Created_Time")]
    pub created_time: Option<String>,

    pub id: String,
}

/// Error payload Zoho sends back from a CRM endpoint. `code` identifies the type of error
/// (`INVALID_TOKEN`, `INVALID_URL_PATTERN`, ...), `message` *might* have more information.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub status: String,
}

impl fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
