//! Blocking HTTP transport and status code translation

use std::time::Duration;

use log::{debug, error, trace};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::Error;

/// Identifies this client to the server
pub const CLIENT_USER_AGENT: &str
  = concat!("Aleph-Alpha-Rust-Client-", env!("CARGO_PKG_VERSION"));

/// Timeout for the version and token calls. Every other call waits for
/// the server indefinitely.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Map a status code and raw body to the decoded body or an error
///
/// | status | result |
/// |--------|--------|
/// | 200 | decoded body |
/// | 400 | [`Error::BadRequest`] |
/// | 401 | [`Error::Permission`] |
/// | 402 | [`Error::QuotaExceeded`] |
/// | 408 | [`Error::Timeout`] |
/// | other | [`Error::Service`] |
pub fn translate_response(
  status: u16
, body: &str
) -> Result<Value, Error>
{   if status == 200
    {   return serde_json::from_str(body).map_err(|e| {
          error!("Parse error: {}", e);
          Error::ParseError(e.to_string())
        });
    }
    Err(status_error(status, body))
}

fn status_error(status: u16, body: &str) -> Error
{   let body = decode_error_body(body);
    error!("API returned status {}: {}", status, body);
    match status
    {   400 => Error::BadRequest { status, body }
      , 401 => Error::Permission { status, body }
      , 402 => Error::QuotaExceeded { status, body }
      , 408 => Error::Timeout { status, body }
      , _ => Error::Service { status, body }
    }
}

/// Error bodies are usually JSON; anything else is kept as a string
fn decode_error_body(body: &str) -> Value
{   if body.trim().is_empty()
    {   return Value::Null;
    }
    serde_json::from_str(body)
      .unwrap_or_else(|_| Value::String(body.to_string()))
}

fn http_error(e: reqwest::Error) -> Error
{   error!("HTTP error: {}", e);
    Error::HttpError(e.to_string())
}

/// HTTP client with the user agent set and no overall timeout
pub(crate) fn build_http_client() -> Result<Client, Error>
{   Client::builder()
      .user_agent(CLIENT_USER_AGENT)
      .timeout(None::<Duration>)
      .build()
      .map_err(http_error)
}

/// Headers sent with every authenticated request
pub(crate) fn request_headers(token: &str) -> Result<HeaderMap, Error>
{   let mut bearer
      = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| {
          Error::InvalidConfiguration(
            "token contains characters not allowed in a header".to_string()
          )
        })?;
    bearer.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
    Ok(headers)
}

/// Server version string, e.g. `1.2.0`
pub(crate) fn fetch_version(
  http: &Client
, host: &str
) -> Result<String, Error>
{   debug!("Fetching server version from {}", host);
    let response = http
      .get(format!("{}version", host))
      .timeout(DEFAULT_TIMEOUT)
      .send()
      .map_err(http_error)?;

    let status = response.status().as_u16();
    trace!("Version response status: {}", status);
    let body = response.text().map_err(http_error)?;

    if status != 200
    {   return Err(status_error(status, &body));
    }
    Ok(body.trim().to_string())
}

/// Exchange email and password for a bearer token
pub(crate) fn fetch_token(
  http: &Client
, host: &str
, email: &str
, password: &str
) -> Result<String, Error>
{   debug!("Requesting token for: {}", email);
    let response = http
      .post(format!("{}get_token", host))
      .timeout(DEFAULT_TIMEOUT)
      .json(&json!({ "email": email, "password": password }))
      .send()
      .map_err(|e| {
        error!("Token request failed: {}", e);
        Error::Authentication(e.to_string())
      })?;

    let status = response.status().as_u16();
    trace!("Token response status: {}", status);
    if status != 200
    {   error!("Token request rejected with status {}", status);
        return Err(Error::Authentication(
          format!("cannot get token (status {})", status)
        ));
    }

    let body: Value = response.json().map_err(|e| {
      error!("Token response unreadable: {}", e);
      Error::Authentication(e.to_string())
    })?;

    body.get("token")
      .and_then(Value::as_str)
      .map(str::to_string)
      .ok_or_else(|| {
        error!("Token response has no token field");
        Error::Authentication("cannot get token".to_string())
      })
}

/// Sends requests against one host with a fixed set of headers
///
/// Never retries: every failure goes straight back to the caller.
#[derive(Debug, Clone)]
pub struct Transport
{   http: Client
  , host: String
  , headers: HeaderMap
}

impl Transport
{   pub(crate) fn new(
      http: Client
    , host: String
    , headers: HeaderMap
    ) -> Self
    {   Transport
        {   http
          , host
          , headers
        }
    }

    pub fn host(&self) -> &str
    {   &self.host
    }

    pub fn headers(&self) -> &HeaderMap
    {   &self.headers
    }

    pub fn get(&self, path: &str) -> Result<Value, Error>
    {   debug!("GET {}{}", self.host, path);
        let response = self.http
          .get(format!("{}{}", self.host, path))
          .headers(self.headers.clone())
          .send()
          .map_err(http_error)?;
        Transport::finish(response)
    }

    /// GET returning the raw body text of a 200 response
    pub fn get_text(&self, path: &str) -> Result<String, Error>
    {   debug!("GET {}{}", self.host, path);
        let response = self.http
          .get(format!("{}{}", self.host, path))
          .headers(self.headers.clone())
          .send()
          .map_err(http_error)?;

        let status = response.status().as_u16();
        trace!("Response status: {}", status);
        let body = response.text().map_err(http_error)?;
        if status != 200
        {   return Err(status_error(status, &body));
        }
        Ok(body.trim().to_string())
    }

    pub fn post<T: Serialize + ?Sized>(
      &self
    , path: &str
    , payload: &T
    ) -> Result<Value, Error>
    {   debug!("POST {}{}", self.host, path);
        if log::log_enabled!(log::Level::Trace)
        {   trace!(
              "Request payload: {}",
              serde_json::to_string(payload).unwrap_or_default()
            );
        }

        let response = self.http
          .post(format!("{}{}", self.host, path))
          .headers(self.headers.clone())
          .json(payload)
          .send()
          .map_err(http_error)?;
        Transport::finish(response)
    }

    fn finish(response: Response) -> Result<Value, Error>
    {   let status = response.status().as_u16();
        trace!("Response status: {}", status);
        let body = response.text().map_err(http_error)?;
        translate_response(status, &body)
    }
}
