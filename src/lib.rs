//! # zoho-crm-client
//!
//! Blocking client for v2 of the Zoho CRM API.
//!
//! Two pieces do the work:
//!
//! - [`TokenManager`] turns a refresh token into short-lived access tokens, caching each one
//!   until it expires. One manager can be shared by many threads; only one refresh is ever
//!   in flight.
//! - [`Client`] sends record CRUD and attachment requests under a versioned base URL and
//!   returns the HTTP response as Zoho sent it.
//!
//! You can read more information about the Zoho API here:
//! [https://www.zoho.com/crm/developer/docs/api/v2/oauth-overview.html](https://www.zoho.com/crm/developer/docs/api/v2/oauth-overview.html)
//!
//! ### Example
//!
//! ```no_run
//! use serde_json::json;
//! use zoho_crm_client::{to_document, Client, CreateRecord, FetchFile, TokenManager};
//!
//! let manager = TokenManager::new(
//!     "united states",
//!     "YOUR_REFRESH_TOKEN",
//!     "YOUR_CLIENT_ID",
//!     "YOUR_CLIENT_SECRET",
//!     "refresh_token",
//! )?;
//! let client = Client::new("https://www.zohoapis.com/crm/v2")?;
//!
//! let lead = to_document(&json!({"Company": "Acme Corp", "Last_Name": "Doe"}))?;
//! let response = client.create_record(&CreateRecord::new("Leads", lead), &manager)?;
//! println!("{}: {}", response.status(), response.text()?);
//!
//! // a token obtained elsewhere works too
//! let token = manager.access_token()?;
//! let file = client.fetch_file(&FetchFile::one("Leads", "4150868000001", "4150868000002"), &token)?;
//! std::fs::write("contract.pdf", file.bytes()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod client_error;
mod config;
mod domain;
mod params;
pub mod response;
mod token_manager;
mod token_record;

#[cfg(test)]
mod test_support;

pub use client::{auth_headers, Client};
pub use client_error::{ClientError, Result};
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use domain::Domain;
pub use params::{
    to_document, AttachFile, AttachmentSource, CreateRecord, DeleteRecord, Document, FetchFile,
    FetchRelatedList, PatchRecord, ReadRecord, UpdateRecord,
};
pub use reqwest::blocking::Response;
pub use token_manager::{abbreviate_token, Credential, TokenManager, TokenSource, GRANT_TYPE};
pub use token_record::TokenRecord;
