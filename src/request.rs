//! Request types for every endpoint and their validation

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::Error;
use crate::prompt::Prompt;
use crate::response::{
  CompletionResponse, DetokenizationResponse, EmbeddingResponse
, EvaluationResponse, QaResponse, TokenizationResponse
};
use crate::validate;

/// Hosting used when the caller does not pick one
pub const DEFAULT_HOSTING: &str = "cloud";

/// A request that can be posted to one endpoint of the API
pub trait ApiRequest: Serialize
{   /// Path below the host
    const ENDPOINT: &'static str;
    /// Whether the payload carries a `hosting` field
    const HOSTED: bool = true;

    type Response: DeserializeOwned;

    /// Check every parameter. Runs before any request is sent.
    fn validate(&self) -> Result<(), Error>;

    /// Validate and wrap the request with the model name and hosting
    fn payload<'a>(
      &'a self
    , model: &'a str
    , hosting: &'a str
    ) -> Result<Payload<'a, Self>, Error>
    where Self: Sized
    {   validate::non_empty_str("model", model)?;
        self.validate()?;
        Ok(Payload
        {   model
          , hosting: if Self::HOSTED { Some(hosting) } else { None }
          , request: self
        })
    }
}

/// JSON body sent to the server
///
/// Unset optional parameters serialize as `null` so every call of an
/// operation sends the same set of keys.
#[derive(Debug, Serialize)]
pub struct Payload<'a, R>
{   pub model: &'a str
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub hosting: Option<&'a str>
  , #[serde(flatten)]
    pub request: &'a R
}

// ===== Tokenization =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenizationRequest
{   pub prompt: String
  , /// Return token strings
    pub tokens: bool
  , /// Return token ids
    pub token_ids: bool
}

impl TokenizationRequest
{   pub fn new(prompt: impl Into<String>) -> Self
    {   TokenizationRequest
        {   prompt: prompt.into()
          , tokens: true
          , token_ids: true
        }
    }

    pub fn tokens(mut self, tokens: bool) -> Self
    {   self.tokens = tokens;
        self
    }

    pub fn token_ids(mut self, token_ids: bool) -> Self
    {   self.token_ids = token_ids;
        self
    }
}

impl ApiRequest for TokenizationRequest
{   const ENDPOINT: &'static str = "tokenize";
    const HOSTED: bool = false;
    type Response = TokenizationResponse;

    fn validate(&self) -> Result<(), Error>
    {   Ok(())
    }
}

// ===== Detokenization =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetokenizationRequest
{   pub token_ids: Vec<u32>
}

impl DetokenizationRequest
{   pub fn new(token_ids: Vec<u32>) -> Self
    {   DetokenizationRequest { token_ids }
    }
}

impl ApiRequest for DetokenizationRequest
{   const ENDPOINT: &'static str = "detokenize";
    const HOSTED: bool = false;
    type Response = DetokenizationResponse;

    fn validate(&self) -> Result<(), Error>
    {   Ok(())
    }
}

// ===== Completion =====

/// Sampling parameters for `complete`
///
/// The float setters take anything that widens to `f64`, so
/// `.temperature(1)` sends `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest
{   pub prompt: Prompt
  , pub maximum_tokens: Option<u32>
  , pub temperature: Option<f64>
  , pub top_k: Option<u32>
  , pub top_p: Option<f64>
  , pub presence_penalty: Option<f64>
  , pub frequency_penalty: Option<f64>
  , pub repetition_penalties_include_prompt: Option<bool>
  , pub use_multiplicative_presence_penalty: Option<bool>
  , /// Candidates generated server side, must exceed `n`
    pub best_of: Option<u32>
  , pub n: u32
  , /// Token id to additive logit bias
    pub logit_bias: Option<BTreeMap<u32, f64>>
  , pub log_probs: Option<u32>
  , pub stop_sequences: Option<Vec<String>>
  , pub tokens: Option<bool>
  , pub disable_optimizations: Option<bool>
}

impl Default for CompletionRequest
{   fn default() -> Self
    {   CompletionRequest
        {   prompt: Prompt::default()
          , maximum_tokens: Some(64)
          , temperature: Some(0.0)
          , top_k: Some(0)
          , top_p: Some(0.0)
          , presence_penalty: Some(0.0)
          , frequency_penalty: Some(0.0)
          , repetition_penalties_include_prompt: Some(false)
          , use_multiplicative_presence_penalty: Some(false)
          , best_of: None
          , n: 1
          , logit_bias: None
          , log_probs: None
          , stop_sequences: None
          , tokens: Some(false)
          , disable_optimizations: Some(false)
        }
    }
}

impl CompletionRequest
{   pub fn new(prompt: impl Into<Prompt>) -> Self
    {   CompletionRequest
        {   prompt: prompt.into()
          , ..CompletionRequest::default()
        }
    }

    pub fn maximum_tokens(mut self, maximum_tokens: u32) -> Self
    {   self.maximum_tokens = Some(maximum_tokens);
        self
    }

    pub fn temperature(mut self, temperature: impl Into<f64>) -> Self
    {   self.temperature = Some(temperature.into());
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self
    {   self.top_k = Some(top_k);
        self
    }

    pub fn top_p(mut self, top_p: impl Into<f64>) -> Self
    {   self.top_p = Some(top_p.into());
        self
    }

    pub fn presence_penalty(mut self, penalty: impl Into<f64>) -> Self
    {   self.presence_penalty = Some(penalty.into());
        self
    }

    pub fn frequency_penalty(mut self, penalty: impl Into<f64>) -> Self
    {   self.frequency_penalty = Some(penalty.into());
        self
    }

    pub fn repetition_penalties_include_prompt(mut self, flag: bool) -> Self
    {   self.repetition_penalties_include_prompt = Some(flag);
        self
    }

    pub fn use_multiplicative_presence_penalty(mut self, flag: bool) -> Self
    {   self.use_multiplicative_presence_penalty = Some(flag);
        self
    }

    pub fn best_of(mut self, best_of: u32) -> Self
    {   self.best_of = Some(best_of);
        self
    }

    pub fn n(mut self, n: u32) -> Self
    {   self.n = n;
        self
    }

    pub fn logit_bias(mut self, token_id: u32, bias: impl Into<f64>) -> Self
    {   self.logit_bias
          .get_or_insert_with(BTreeMap::new)
          .insert(token_id, bias.into());
        self
    }

    pub fn log_probs(mut self, log_probs: u32) -> Self
    {   self.log_probs = Some(log_probs);
        self
    }

    pub fn stop_sequences(mut self, stop_sequences: Vec<String>) -> Self
    {   self.stop_sequences = Some(stop_sequences);
        self
    }

    pub fn tokens(mut self, tokens: bool) -> Self
    {   self.tokens = Some(tokens);
        self
    }

    pub fn disable_optimizations(mut self, disable: bool) -> Self
    {   self.disable_optimizations = Some(disable);
        self
    }
}

impl ApiRequest for CompletionRequest
{   const ENDPOINT: &'static str = "complete";
    type Response = CompletionResponse;

    fn validate(&self) -> Result<(), Error>
    {   validate::positive("maximum_tokens", self.maximum_tokens)?;
        validate::unit_interval("temperature", self.temperature)?;
        validate::unit_interval("top_p", self.top_p)?;
        validate::finite("presence_penalty", self.presence_penalty)?;
        validate::finite("frequency_penalty", self.frequency_penalty)?;
        validate::positive("n", Some(self.n))?;

        if let Some(best_of) = self.best_of
        {   if best_of <= self.n
            {   return Err(Error::invalid(
                  "best_of",
                  format!(
                    "must be greater than n ({}), got {}",
                    self.n, best_of
                  )
                ));
            }
        }

        if let Some(bias) = &self.logit_bias
        {   for (token_id, value) in bias
            {   validate::finite(
                  &format!("logit_bias[{}]", token_id),
                  Some(*value)
                )?;
            }
        }
        Ok(())
    }
}

// ===== Embedding =====

/// Aggregation of per-token vectors into one vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pooling
{   Mean
  , Max
  , LastToken
  , AbsMax
}

impl Pooling
{   pub const ALL: [Pooling; 4] = [
      Pooling::Mean
    , Pooling::Max
    , Pooling::LastToken
    , Pooling::AbsMax
    ];

    pub fn as_str(&self) -> &'static str
    {   match self
        {   Pooling::Mean => "mean"
          , Pooling::Max => "max"
          , Pooling::LastToken => "last_token"
          , Pooling::AbsMax => "abs_max"
        }
    }
}

impl fmt::Display for Pooling
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.write_str(self.as_str())
    }
}

impl FromStr for Pooling
{   type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   Pooling::ALL
          .iter()
          .copied()
          .find(|p| p.as_str() == s)
          .ok_or_else(|| Error::invalid(
            "pooling",
            format!(
              "unknown pooling operation '{}', expected one of mean, max, last_token, abs_max",
              s
            )
          ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRequest
{   pub prompt: Prompt
  , /// Layer indices, negative values count back from the last layer
    pub layers: Vec<i32>
  , pub pooling: Vec<Pooling>
  , pub tokens: bool
  , /// Embedding type, e.g. symmetric or asymmetric
    #[serde(rename = "type")]
    pub embedding_type: Option<String>
}

impl EmbeddingRequest
{   pub fn new(
      prompt: impl Into<Prompt>
    , layers: Vec<i32>
    , pooling: Vec<Pooling>
    ) -> Self
    {   EmbeddingRequest
        {   prompt: prompt.into()
          , layers
          , pooling
          , tokens: false
          , embedding_type: None
        }
    }

    /// Build a request from pooling names such as `"mean"`
    pub fn with_pooling_names<S: AsRef<str>>(
      prompt: impl Into<Prompt>
    , layers: Vec<i32>
    , pooling: &[S]
    ) -> Result<Self, Error>
    {   let pooling = pooling
          .iter()
          .map(|name| name.as_ref().parse())
          .collect::<Result<Vec<Pooling>, Error>>()?;
        Ok(EmbeddingRequest::new(prompt, layers, pooling))
    }

    pub fn tokens(mut self, tokens: bool) -> Self
    {   self.tokens = tokens;
        self
    }

    pub fn embedding_type(mut self, embedding_type: impl Into<String>) -> Self
    {   self.embedding_type = Some(embedding_type.into());
        self
    }
}

impl ApiRequest for EmbeddingRequest
{   const ENDPOINT: &'static str = "embed";
    type Response = EmbeddingResponse;

    fn validate(&self) -> Result<(), Error>
    {   self.prompt.require_non_empty("prompt")?;
        validate::non_empty_list("layers", &self.layers)?;
        validate::non_empty_list("pooling", &self.pooling)
    }
}

// ===== Evaluation =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest
{   pub prompt: Prompt
  , pub completion_expected: String
}

impl EvaluationRequest
{   pub fn new(
      prompt: impl Into<Prompt>
    , completion_expected: impl Into<String>
    ) -> Self
    {   EvaluationRequest
        {   prompt: prompt.into()
          , completion_expected: completion_expected.into()
        }
    }
}

impl ApiRequest for EvaluationRequest
{   const ENDPOINT: &'static str = "evaluate";
    type Response = EvaluationResponse;

    fn validate(&self) -> Result<(), Error>
    {   validate::non_empty_str(
          "completion_expected",
          &self.completion_expected
        )
    }
}

// ===== Question answering =====

/// Question over a set of documents
///
/// Long documents are split server side: first at blank lines, then at
/// the median sentence, then at whitespace, until every chunk is shorter
/// than `max_chunk_size` or nothing is left to split on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaRequest
{   pub query: String
  , pub documents: Vec<Document>
  , pub maximum_tokens: u32
  , pub max_chunk_size: u32
  , pub disable_optimizations: bool
  , /// Upper limit on returned answers
    pub max_answers: u32
  , /// Answers scoring below this are dropped
    pub min_score: f64
}

impl QaRequest
{   pub fn new(
      query: impl Into<String>
    , documents: Vec<Document>
    ) -> Self
    {   QaRequest
        {   query: query.into()
          , documents
          , maximum_tokens: 64
          , max_chunk_size: 175
          , disable_optimizations: false
          , max_answers: 0
          , min_score: 0.0
        }
    }

    pub fn maximum_tokens(mut self, maximum_tokens: u32) -> Self
    {   self.maximum_tokens = maximum_tokens;
        self
    }

    pub fn max_chunk_size(mut self, max_chunk_size: u32) -> Self
    {   self.max_chunk_size = max_chunk_size;
        self
    }

    pub fn disable_optimizations(mut self, disable: bool) -> Self
    {   self.disable_optimizations = disable;
        self
    }

    pub fn max_answers(mut self, max_answers: u32) -> Self
    {   self.max_answers = max_answers;
        self
    }

    pub fn min_score(mut self, min_score: impl Into<f64>) -> Self
    {   self.min_score = min_score.into();
        self
    }
}

impl ApiRequest for QaRequest
{   const ENDPOINT: &'static str = "qa";
    type Response = QaResponse;

    fn validate(&self) -> Result<(), Error>
    {   validate::non_empty_str("query", &self.query)?;
        validate::non_empty_list("documents", &self.documents)?;
        validate::positive("maximum_tokens", Some(self.maximum_tokens))?;
        validate::positive("max_chunk_size", Some(self.max_chunk_size))?;
        validate::finite("min_score", Some(self.min_score))
    }
}
