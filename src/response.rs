//! Typed response bodies

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::request::Pooling;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenizationResponse
{   #[serde(default)]
    pub tokens: Option<Vec<String>>
  , #[serde(default)]
    pub token_ids: Option<Vec<u32>>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetokenizationResponse
{   pub result: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse
{   pub model_version: String
  , pub completions: Vec<CompletionResult>
  , /// Present when the server rewrote the prompt before sampling.
    /// `complete` also logs this at info level; check the field when no
    /// logger is installed. Pass `disable_optimizations(true)` to keep
    /// prompts untouched.
    #[serde(default)]
    pub optimized_prompt: Option<Value>
}

impl CompletionResponse
{   /// Text of the first completion
    pub fn first_completion(&self) -> Option<&str>
    {   self.completions
          .first()
          .and_then(|c| c.completion.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResult
{   #[serde(default)]
    pub completion: Option<String>
  , #[serde(default)]
    pub log_probs: Option<Vec<HashMap<String, Option<f64>>>>
  , #[serde(default)]
    pub completion_tokens: Option<Vec<String>>
  , #[serde(default)]
    pub finish_reason: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse
{   pub model_version: String
  , /// Keyed by `layer_<index>`, then by pooling name
    #[serde(default)]
    pub embeddings: Option<HashMap<String, HashMap<String, Vec<f32>>>>
  , #[serde(default)]
    pub tokens: Option<Vec<String>>
}

impl EmbeddingResponse
{   pub fn embedding(&self, layer: i32, pooling: Pooling) -> Option<&[f32]>
    {   self.embeddings
          .as_ref()?
          .get(&format!("layer_{}", layer))?
          .get(pooling.as_str())
          .map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResponse
{   pub model_version: String
  , pub result: EvaluationResult
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationResult
{   pub log_probability: Option<f64>
  , pub log_perplexity: Option<f64>
  , pub log_perplexity_per_token: Option<f64>
  , pub log_perplexity_per_character: Option<f64>
  , pub correct_greedy: Option<bool>
  , pub token_count: Option<u32>
  , pub character_count: Option<u32>
  , pub completion: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaResponse
{   pub model_version: String
  , pub answers: Vec<QaAnswer>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaAnswer
{   pub answer: String
  , pub score: f64
  , #[serde(default)]
    pub evidence: Option<String>
}

/// Entry of `models_available`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescription
{   pub name: String
  , #[serde(default)]
    pub description: Option<String>
  , #[serde(default)]
    pub hostings: Vec<String>
  , #[serde(default)]
    pub image_support: bool
  , #[serde(default)]
    pub max_context_size: Option<u32>
}
