//! Zoho data-center regions and their accounts (authorization) servers.

use crate::client_error::{ClientError, Result};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// The data center a Zoho organization lives in.
///
/// Each region has its own accounts server; a refresh token issued in one region is not
/// accepted by another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Domain {
    UnitedStates,
    Europe,
    India,
    Australia,
    Japan,
    Canada,
    /// Any other accounts server, such as a proxy or a local mock.
    Custom(Url),
}

impl Domain {
    /// Use an explicit accounts server instead of one of the known regions.
    pub fn custom(accounts_url: &str) -> Result<Domain> {
        let url = Url::parse(accounts_url).map_err(|error| {
            ClientError::Configuration(format!("invalid accounts URL {:?}: {}", accounts_url, error))
        })?;

        if url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "accounts URL {:?} cannot be used as a base",
                accounts_url
            )));
        }

        Ok(Domain::Custom(url))
    }

    /// Base URL of the accounts server, without a trailing slash.
    pub fn accounts_url(&self) -> &str {
        match self {
            Domain::UnitedStates => "https://accounts.zoho.com",
            Domain::Europe => "https://accounts.zoho.eu",
            Domain::India => "https://accounts.zoho.in",
            Domain::Australia => "https://accounts.zoho.com.au",
            Domain::Japan => "https://accounts.zoho.jp",
            Domain::Canada => "https://accounts.zohocloud.ca",
            Domain::Custom(url) => url.as_str().trim_end_matches('/'),
        }
    }

    /// Full URL of the OAuth token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}/oauth/v2/token", self.accounts_url())
    }
}

impl FromStr for Domain {
    type Err = ClientError;

    /// Accepts the region name ("united states", "europe", ...) or Zoho's domain suffix
    /// ("com", "eu", ...), case-insensitively.
    fn from_str(name: &str) -> Result<Domain> {
        match name.trim().to_lowercase().as_str() {
            "united states" | "us" | "com" => Ok(Domain::UnitedStates),
            "europe" | "eu" => Ok(Domain::Europe),
            "india" | "in" => Ok(Domain::India),
            "australia" | "au" | "com.au" => Ok(Domain::Australia),
            "japan" | "jp" => Ok(Domain::Japan),
            "canada" | "ca" => Ok(Domain::Canada),
            _ => Err(ClientError::Configuration(format!("unsupported Zoho domain {:?}", name))),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::UnitedStates => f.write_str("united states"),
            Domain::Europe => f.write_str("europe"),
            Domain::India => f.write_str("india"),
            Domain::Australia => f.write_str("australia"),
            Domain::Japan => f.write_str("japan"),
            Domain::Canada => f.write_str("canada"),
            Domain::Custom(url) => write!(f, "{}", url),
        }
    }
}
