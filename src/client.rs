use log::{debug, error, info, warn};
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::config::{ClientConfig, Credentials};
use crate::error::Error;
use crate::explanation::ExplanationRequest;
use crate::request::{
  ApiRequest, CompletionRequest, DetokenizationRequest, EmbeddingRequest
, EvaluationRequest, QaRequest, TokenizationRequest
};
use crate::response::{
  CompletionResponse, DetokenizationResponse, EmbeddingResponse
, EvaluationResponse, ModelDescription, QaResponse, TokenizationResponse
};
use crate::transport::{self, Transport};

/// Major release of the API this client speaks
pub const EXPECTED_API_RELEASE: &str = "1";

/// Blocking client for one API host
///
/// Construction checks the server version and, when no token is given,
/// exchanges email and password for one. The configuration is fixed
/// afterwards.
#[derive(Debug, Clone)]
pub struct AlephAlphaClient
{   transport: Transport
}

impl AlephAlphaClient
{   pub fn new(config: ClientConfig) -> Result<Self, Error>
    {   let host = config.normalized_host()?;
        debug!("Creating AlephAlphaClient for {}", host);

        let http = transport::build_http_client()?;

        let version = transport::fetch_version(&http, &host)?;
        if !version.starts_with(EXPECTED_API_RELEASE)
        {   warn!(
              "Expected API version {}.x.x, got {}. Please update client.",
              EXPECTED_API_RELEASE, version
            );
        }

        let token = match config.credentials
        {   Credentials::Token(token) => token
          , Credentials::Login { email, password } => {
              transport::fetch_token(&http, &host, &email, &password)?
            }
        };

        let headers = transport::request_headers(&token)?;
        Ok(AlephAlphaClient
        {   transport: Transport::new(http, host, headers)
        })
    }

    pub fn with_token(
      host: impl Into<String>
    , token: impl Into<String>
    ) -> Result<Self, Error>
    {   AlephAlphaClient::new(ClientConfig::with_token(host, token))
    }

    pub fn with_login(
      host: impl Into<String>
    , email: impl Into<String>
    , password: impl Into<String>
    ) -> Result<Self, Error>
    {   AlephAlphaClient::new(
          ClientConfig::with_login(host, email, password)
        )
    }

    /// Base URL, always ending in `/`
    pub fn host(&self) -> &str
    {   self.transport.host()
    }

    pub fn request_headers(&self) -> &HeaderMap
    {   self.transport.headers()
    }

    pub fn get_version(&self) -> Result<String, Error>
    {   debug!("get_version");
        self.transport.get_text("version")
    }

    /// Models currently served, with their hostings
    pub fn available_models(&self)
      -> Result<Vec<ModelDescription>, Error>
    {   debug!("available_models");
        let body = self.transport.get("models_available")?;
        decode(body)
    }

    /// Validate `request`, post it and decode the typed response
    pub fn execute<R: ApiRequest>(
      &self
    , model: &str
    , hosting: &str
    , request: &R
    ) -> Result<R::Response, Error>
    {   let payload = request.payload(model, hosting)?;
        let body = self.transport.post(R::ENDPOINT, &payload)?;
        decode(body)
    }

    pub fn tokenize(
      &self
    , model: &str
    , request: &TokenizationRequest
    ) -> Result<TokenizationResponse, Error>
    {   debug!("tokenize for model: {}", model);
        self.execute(model, "", request)
    }

    pub fn detokenize(
      &self
    , model: &str
    , request: &DetokenizationRequest
    ) -> Result<DetokenizationResponse, Error>
    {   debug!(
          "detokenize {} tokens for model: {}",
          request.token_ids.len(), model
        );
        self.execute(model, "", request)
    }

    pub fn complete(
      &self
    , model: &str
    , hosting: &str
    , request: &CompletionRequest
    ) -> Result<CompletionResponse, Error>
    {   debug!("complete for model: {} on {}", model, hosting);
        let response: CompletionResponse
          = self.execute(model, hosting, request)?;
        if response.optimized_prompt.is_some()
        {   info!(
              "We optimized your prompt before sending it to the model. \
               The optimized prompt is available in `optimized_prompt`. \
               Set disable_optimizations to leave prompts untouched."
            );
        }
        Ok(response)
    }

    pub fn embed(
      &self
    , model: &str
    , hosting: &str
    , request: &EmbeddingRequest
    ) -> Result<EmbeddingResponse, Error>
    {   debug!(
          "embed for model: {} layers {:?} pooling {:?}",
          model, request.layers, request.pooling
        );
        self.execute(model, hosting, request)
    }

    pub fn evaluate(
      &self
    , model: &str
    , hosting: &str
    , request: &EvaluationRequest
    ) -> Result<EvaluationResponse, Error>
    {   debug!("evaluate for model: {}", model);
        self.execute(model, hosting, request)
    }

    pub fn qa(
      &self
    , model: &str
    , hosting: &str
    , request: &QaRequest
    ) -> Result<QaResponse, Error>
    {   debug!(
          "qa for model: {} over {} documents",
          model, request.documents.len()
        );
        self.execute(model, hosting, request)
    }

    /// Post the body rendered by `request` and return the decoded
    /// response untouched
    pub fn explain(
      &self
    , model: &str
    , request: &ExplanationRequest
    , hosting: Option<&str>
    ) -> Result<Value, Error>
    {   debug!("explain for model: {}", model);
        let body = request.render_as_body(model, hosting)?;
        self.transport.post("explain", &body)
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: Value)
  -> Result<T, Error>
{   serde_json::from_value(body).map_err(|e| {
      error!("Unexpected response shape: {}", e);
      Error::ParseError(e.to_string())
    })
}
