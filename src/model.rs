//! A client bound to one model name and hosting

use crate::client::AlephAlphaClient;
use crate::error::Error;
use crate::request::{
  CompletionRequest, DetokenizationRequest, EmbeddingRequest
, EvaluationRequest, QaRequest, TokenizationRequest, DEFAULT_HOSTING
};
use crate::response::{
  CompletionResponse, DetokenizationResponse, EmbeddingResponse
, EvaluationResponse, QaResponse, TokenizationResponse
};

#[derive(Debug, Clone)]
pub struct AlephAlphaModel<'a>
{   client: &'a AlephAlphaClient
  , model_name: String
  , hosting: String
}

impl<'a> AlephAlphaModel<'a>
{   pub fn new(
      client: &'a AlephAlphaClient
    , model_name: impl Into<String>
    ) -> Self
    {   AlephAlphaModel
        {   client
          , model_name: model_name.into()
          , hosting: DEFAULT_HOSTING.to_string()
        }
    }

    pub fn with_hosting(mut self, hosting: impl Into<String>) -> Self
    {   self.hosting = hosting.into();
        self
    }

    pub fn model_name(&self) -> &str
    {   &self.model_name
    }

    pub fn hosting(&self) -> &str
    {   &self.hosting
    }

    pub fn complete(&self, request: &CompletionRequest)
      -> Result<CompletionResponse, Error>
    {   self.client.complete(&self.model_name, &self.hosting, request)
    }

    pub fn tokenize(&self, request: &TokenizationRequest)
      -> Result<TokenizationResponse, Error>
    {   self.client.tokenize(&self.model_name, request)
    }

    pub fn detokenize(&self, request: &DetokenizationRequest)
      -> Result<DetokenizationResponse, Error>
    {   self.client.detokenize(&self.model_name, request)
    }

    pub fn embed(&self, request: &EmbeddingRequest)
      -> Result<EmbeddingResponse, Error>
    {   self.client.embed(&self.model_name, &self.hosting, request)
    }

    pub fn evaluate(&self, request: &EvaluationRequest)
      -> Result<EvaluationResponse, Error>
    {   self.client.evaluate(&self.model_name, &self.hosting, request)
    }

    pub fn qa(&self, request: &QaRequest)
      -> Result<QaResponse, Error>
    {   self.client.qa(&self.model_name, &self.hosting, request)
    }
}
