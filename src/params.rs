//! Parameters for each [`Client`](crate::Client) operation.
//!
//! Every struct lists what the operation needs; `validate` runs before any request is built,
//! so a missing identifier never reaches the network.

use crate::client_error::{ClientError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A record's fields, in insertion order. Module fields are defined per organization, so
/// no schema is imposed here.
pub type Document = Map<String, Value>;

/// Convert anything serializable into a [`Document`]. Only JSON objects qualify.
///
/// ```
/// use serde_json::json;
/// use zoho_crm_client::to_document;
///
/// let lead = to_document(&json!({"Company": "Acme Corp", "Last_Name": "Doe"}))?;
/// assert_eq!(lead["Company"], "Acme Corp");
/// # Ok::<(), zoho_crm_client::ClientError>(())
/// ```
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> Result<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(ClientError::InvalidArgument(format!(
            "record data must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reject empty or whitespace-only identifiers.
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidArgument(format!("{} is required", field)));
    }

    Ok(())
}

/// Insert a record with `POST /{module}`.
#[derive(Debug, Clone)]
pub struct CreateRecord {
    pub module: String,
    pub data: Document,
}

impl CreateRecord {
    pub fn new(module: impl Into<String>, data: Document) -> Self {
        Self { module: module.into(), data }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require("module name", &self.module)
    }
}

/// Read one record, or the module's default listing when `id` is `None`.
#[derive(Debug, Clone)]
pub struct ReadRecord {
    pub module: String,
    pub id: Option<String>,
}

impl ReadRecord {
    pub fn all(module: impl Into<String>) -> Self {
        Self { module: module.into(), id: None }
    }

    pub fn one(module: impl Into<String>, id: impl Into<String>) -> Self {
        Self { module: module.into(), id: Some(id.into()) }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require("module name", &self.module)?;

        // an explicit id must be usable; pass `None` to list
        match &self.id {
            Some(id) => require("record id", id),
            None => Ok(()),
        }
    }
}

/// Replace a record with `PUT /{module}/{id}`.
#[derive(Debug, Clone)]
pub struct UpdateRecord {
    pub module: String,
    pub id: String,
    pub data: Document,
}

impl UpdateRecord {
    pub fn new(module: impl Into<String>, id: impl Into<String>, data: Document) -> Self {
        Self { module: module.into(), id: id.into(), data }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require("module name", &self.module)?;
        require("record id", &self.id)
    }
}

/// Change some fields of a record with `PATCH /{module}/{id}`.
#[derive(Debug, Clone)]
pub struct PatchRecord {
    pub module: String,
    pub id: String,
    pub data: Document,
}

impl PatchRecord {
    pub fn new(module: impl Into<String>, id: impl Into<String>, data: Document) -> Self {
        Self { module: module.into(), id: id.into(), data }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require("module name", &self.module)?;
        require("record id", &self.id)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteRecord {
    pub module: String,
    pub id: String,
}

impl DeleteRecord {
    pub fn new(module: impl Into<String>, id: impl Into<String>) -> Self {
        Self { module: module.into(), id: id.into() }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require("module name", &self.module)?;
        require("record id", &self.id)
    }
}

/// Where an attachment's content comes from.
#[derive(Debug, Clone)]
pub enum AttachmentSource {
    /// A local file, streamed as the multipart `file` part.
    Path(PathBuf),
    /// A public URL Zoho fetches itself (`attachmentUrl`).
    Url(String),
}

/// Attach a file to a record with `POST /{module}/{record_id}/Attachments`.
#[derive(Debug, Clone)]
pub struct AttachFile {
    pub module: String,
    pub record_id: String,
    pub source: AttachmentSource,
}

impl AttachFile {
    pub fn path(module: impl Into<String>, record_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            module: module.into(),
            record_id: record_id.into(),
            source: AttachmentSource::Path(path.into()),
        }
    }

    pub fn url(module: impl Into<String>, record_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            record_id: record_id.into(),
            source: AttachmentSource::Url(url.into()),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require("module name", &self.module)?;
        require("record id", &self.record_id)?;

        match &self.source {
            AttachmentSource::Path(path) if path.as_os_str().is_empty() => {
                Err(ClientError::InvalidArgument(String::from("file path is required")))
            }
            AttachmentSource::Url(url) => require("attachment URL", url),
            AttachmentSource::Path(_) => Ok(()),
        }
    }
}

/// Download one attachment, or list them all when `fetch_all` is set.
///
/// `fetch_all` wins over `file_id`.
#[derive(Debug, Clone)]
pub struct FetchFile {
    pub module: String,
    pub record_id: String,
    pub file_id: Option<String>,
    pub fetch_all: bool,
}

impl FetchFile {
    pub fn all(module: impl Into<String>, record_id: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            record_id: record_id.into(),
            file_id: None,
            fetch_all: true,
        }
    }

    pub fn one(module: impl Into<String>, record_id: impl Into<String>, file_id: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            record_id: record_id.into(),
            file_id: Some(file_id.into()),
            fetch_all: false,
        }
    }

    /// The file id to download, or `None` for the listing.
    pub(crate) fn validate(&self) -> Result<Option<&str>> {
        require("module name", &self.module)?;
        require("record id", &self.record_id)?;

        if self.fetch_all {
            return Ok(None);
        }

        match self.file_id.as_deref() {
            Some(file_id) if !file_id.trim().is_empty() => Ok(Some(file_id)),
            _ => Err(ClientError::InvalidArgument(String::from(
                "file id must be provided when fetch_all is false",
            ))),
        }
    }
}

/// Read a related list (`Notes`, `Contacts`, ...) with `GET /{module}/{record_id}/{name}`.
#[derive(Debug, Clone)]
pub struct FetchRelatedList {
    pub module: String,
    pub record_id: String,
    pub name: String,
}

impl FetchRelatedList {
    pub fn new(module: impl Into<String>, record_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            record_id: record_id.into(),
            name: name.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require("module name", &self.module)?;
        require("record id", &self.record_id)?;
        require("related list name", &self.name)
    }
}
