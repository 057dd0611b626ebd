use std::fmt;

use serde_json::Value;

/// Error type for every client operation
///
/// Validation failures are raised before any request is sent. The HTTP
/// status variants carry the status code and the decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Error
{   /// A caller supplied parameter failed a type or range check
    InvalidParameter
    {   parameter: String
      , message: String
    }
  , /// Invalid client configuration
    InvalidConfiguration(String)
  , /// Credential exchange failed while constructing the client
    Authentication(String)
  , /// Status 400
    BadRequest
    {   status: u16
      , body: Value
    }
  , /// Status 401
    Permission
    {   status: u16
      , body: Value
    }
  , /// Status 402
    QuotaExceeded
    {   status: u16
      , body: Value
    }
  , /// Status 408, reported by the server
    Timeout
    {   status: u16
      , body: Value
    }
  , /// Any other non-200 status
    Service
    {   status: u16
      , body: Value
    }
  , /// HTTP transport error
    HttpError(String)
  , /// Failed to parse API response
    ParseError(String)
  , /// Failed to read a local file
    Io(String)
}

impl Error
{   pub(crate) fn invalid(
      parameter: &str
    , message: impl Into<String>
    ) -> Self
    {   Error::InvalidParameter
        {   parameter: parameter.to_string()
          , message: message.into()
        }
    }

    /// Status code returned by the server, if the error came from one
    pub fn status(&self) -> Option<u16>
    {   match self
        {   Error::BadRequest { status, .. }
          | Error::Permission { status, .. }
          | Error::QuotaExceeded { status, .. }
          | Error::Timeout { status, .. }
          | Error::Service { status, .. } => Some(*status)
          , _ => None
        }
    }

    /// Decoded response body, if the error came from the server
    pub fn body(&self) -> Option<&Value>
    {   match self
        {   Error::BadRequest { body, .. }
          | Error::Permission { body, .. }
          | Error::QuotaExceeded { body, .. }
          | Error::Timeout { body, .. }
          | Error::Service { body, .. } => Some(body)
          , _ => None
        }
    }

    pub fn is_validation(&self) -> bool
    {   matches!(self, Error::InvalidParameter { .. })
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::InvalidParameter { parameter, message } => {
              write!(f, "Invalid parameter {}: {}", parameter, message)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Authentication(msg) => {
              write!(f, "Authentication failed: {}", msg)
            }
          , Error::BadRequest { status, body } => {
              write!(f, "Invalid request ({}): {}", status, body)
            }
          , Error::Permission { status, body } => {
              write!(f, "Permission denied ({}): {}", status, body)
            }
          , Error::QuotaExceeded { status, body } => {
              write!(f, "Quota exceeded ({}): {}", status, body)
            }
          , Error::Timeout { status, body } => {
              write!(f, "Server timed out ({}): {}", status, body)
            }
          , Error::Service { status, body } => {
              write!(f, "Service error ({}): {}", status, body)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::Io(msg) => {
              write!(f, "I/O error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error
{   fn from(e: std::io::Error) -> Self
    {   Error::Io(e.to_string())
    }
}
