//! Client configuration and credential handling

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Host used when `AA_HOST` is not set
pub const DEFAULT_HOST: &str = "https://api.aleph-alpha.com";

/// How the client authenticates
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credentials
{   /// Use this bearer token directly
    Token(String)
  , /// Exchange email and password for a token once, at construction
    Login
    {   email: String
      , password: String
    }
}

impl fmt::Debug for Credentials
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   match self
        {   Credentials::Token(_) => {
              f.debug_tuple("Token").field(&"<redacted>").finish()
            }
          , Credentials::Login { email, .. } => {
              f.debug_struct("Login")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish()
            }
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig
{   /// API base URL
    pub host: String
  , pub credentials: Credentials
}

impl ClientConfig
{   pub fn new(
      host: impl Into<String>
    , credentials: Credentials
    ) -> Self
    {   ClientConfig
        {   host: host.into()
          , credentials
        }
    }

    pub fn with_token(
      host: impl Into<String>
    , token: impl Into<String>
    ) -> Self
    {   ClientConfig::new(host, Credentials::Token(token.into()))
    }

    pub fn with_login(
      host: impl Into<String>
    , email: impl Into<String>
    , password: impl Into<String>
    ) -> Self
    {   ClientConfig::new(
          host
        , Credentials::Login
          {   email: email.into()
            , password: password.into()
          }
        )
    }

    /// Load configuration from `AA_HOST`, `AA_TOKEN`, `AA_EMAIL` and
    /// `AA_PASSWORD`. A token takes precedence over a login.
    pub fn from_env() -> Result<Self, Error>
    {   let host = std::env::var("AA_HOST")
          .unwrap_or_else(|_| DEFAULT_HOST.to_string());
        debug!("Loading client configuration for host: {}", host);

        if let Ok(token) = std::env::var("AA_TOKEN")
        {   return Ok(ClientConfig::with_token(host, token));
        }

        match (std::env::var("AA_EMAIL"), std::env::var("AA_PASSWORD"))
        {   (Ok(email), Ok(password)) => {
              Ok(ClientConfig::with_login(host, email, password))
            }
          , _ => Err(Error::InvalidConfiguration(
              "set AA_TOKEN or both AA_EMAIL and AA_PASSWORD".to_string()
            ))
        }
    }

    /// Host with a trailing `/`, ready for path suffixes
    pub fn normalized_host(&self) -> Result<String, Error>
    {   let host = self.host.trim();
        if host.is_empty()
        {   return Err(Error::InvalidConfiguration(
              "host must not be empty".to_string()
            ));
        }
        if host.ends_with('/')
        {   Ok(host.to_string())
        } else
        {   Ok(format!("{}/", host))
        }
    }
}
