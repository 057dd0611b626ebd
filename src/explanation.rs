//! Explanation requests render their own body

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Error;
use crate::prompt::Prompt;
use crate::validate;

/// Which parts of `prompt` drive the model towards `target`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationRequest
{   pub prompt: Prompt
  , pub target: String
  , pub directional: bool
  , pub suppression_factor: f64
  , pub conceptual_suppression_threshold: Option<f64>
  , pub normalize: Option<bool>
  , pub square_outputs: Option<bool>
  , pub prompt_explain_indices: Option<Vec<u32>>
}

impl ExplanationRequest
{   pub fn new(
      prompt: impl Into<Prompt>
    , target: impl Into<String>
    ) -> Self
    {   ExplanationRequest
        {   prompt: prompt.into()
          , target: target.into()
          , directional: false
          , suppression_factor: 0.1
          , conceptual_suppression_threshold: None
          , normalize: None
          , square_outputs: None
          , prompt_explain_indices: None
        }
    }

    pub fn directional(mut self, directional: bool) -> Self
    {   self.directional = directional;
        self
    }

    pub fn suppression_factor(mut self, factor: impl Into<f64>) -> Self
    {   self.suppression_factor = factor.into();
        self
    }

    pub fn conceptual_suppression_threshold(
      mut self
    , threshold: impl Into<f64>
    ) -> Self
    {   self.conceptual_suppression_threshold = Some(threshold.into());
        self
    }

    pub fn normalize(mut self, normalize: bool) -> Self
    {   self.normalize = Some(normalize);
        self
    }

    pub fn square_outputs(mut self, square: bool) -> Self
    {   self.square_outputs = Some(square);
        self
    }

    pub fn prompt_explain_indices(mut self, indices: Vec<u32>) -> Self
    {   self.prompt_explain_indices = Some(indices);
        self
    }

    /// JSON body for the `explain` endpoint
    pub fn render_as_body(
      &self
    , model: &str
    , hosting: Option<&str>
    ) -> Result<Value, Error>
    {   validate::non_empty_str("model", model)?;
        validate::non_empty_str("target", &self.target)?;
        validate::finite("suppression_factor", Some(self.suppression_factor))?;
        validate::finite(
          "conceptual_suppression_threshold",
          self.conceptual_suppression_threshold
        )?;

        Ok(json!({
          "model": model,
          "prompt": self.prompt,
          "hosting": hosting,
          "target": self.target,
          "directional": self.directional,
          "suppression_factor": self.suppression_factor,
          "conceptual_suppression_threshold": self.conceptual_suppression_threshold,
          "normalize": self.normalize,
          "square_outputs": self.square_outputs,
          "prompt_explain_indices": self.prompt_explain_indices,
        }))
    }
}
