//! Text and multimodal prompts

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A prompt is either plain text or an ordered list of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prompt
{   Text(String)
  , Items(Vec<PromptItem>)
}

impl Prompt
{   pub fn from_text(text: impl Into<String>) -> Self
    {   Prompt::Text(text.into())
    }

    pub fn from_items(items: Vec<PromptItem>) -> Self
    {   Prompt::Items(items)
    }

    pub fn is_empty(&self) -> bool
    {   match self
        {   Prompt::Text(text) => text.is_empty()
          , Prompt::Items(items) => items.is_empty()
        }
    }

    /// Reject prompts that would not produce a single token
    pub fn require_non_empty(&self, parameter: &str) -> Result<(), Error>
    {   match self
        {   Prompt::Text(text) if text.is_empty() => {
              Err(Error::invalid(
                parameter,
                "prompt must contain at least one character"
              ))
            }
          , Prompt::Items(items) if items.is_empty() => {
              Err(Error::invalid(
                parameter,
                "prompt must contain at least one item"
              ))
            }
          , _ => Ok(())
        }
    }
}

impl Default for Prompt
{   fn default() -> Self
    {   Prompt::Text(String::new())
    }
}

impl From<&str> for Prompt
{   fn from(s: &str) -> Self
    {   Prompt::Text(s.to_string())
    }
}

impl From<String> for Prompt
{   fn from(s: String) -> Self
    {   Prompt::Text(s)
    }
}

impl From<Vec<PromptItem>> for Prompt
{   fn from(items: Vec<PromptItem>) -> Self
    {   Prompt::Items(items)
    }
}

/// One element of a multimodal prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PromptItem
{   Text
    {   data: String
    }
  , Image(ImagePrompt)
}

impl PromptItem
{   pub fn text(data: impl Into<String>) -> Self
    {   PromptItem::Text { data: data.into() }
    }
}

impl From<&str> for PromptItem
{   fn from(s: &str) -> Self
    {   PromptItem::text(s)
    }
}

impl From<ImagePrompt> for PromptItem
{   fn from(image: ImagePrompt) -> Self
    {   PromptItem::Image(image)
    }
}

/// Base64 encoded image, optionally cropped to a square
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePrompt
{   pub data: String
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>
}

impl ImagePrompt
{   pub fn from_bytes(bytes: &[u8]) -> Self
    {   ImagePrompt
        {   data: STANDARD.encode(bytes)
          , x: None
          , y: None
          , size: None
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error>
    {   let path = path.as_ref();
        debug!("Reading image prompt from {}", path.display());
        let bytes = std::fs::read(path)?;
        Ok(ImagePrompt::from_bytes(&bytes))
    }

    /// Crop to the square at (`x`, `y`) with side length `size`
    pub fn with_crop(mut self, x: u32, y: u32, size: u32) -> Self
    {   self.x = Some(x);
        self.y = Some(y);
        self.size = Some(size);
        self
    }
}
