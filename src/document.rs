//! Documents for question answering

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::prompt::PromptItem;

/// A document passed to `qa`. The client does not look inside it.
///
/// Serializes as `{"docx": ..}`, `{"text": ..}` or `{"prompt": [..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Document
{   /// Base64 encoded docx file
    Docx(String)
  , Text(String)
  , Prompt(Vec<PromptItem>)
}

impl Document
{   pub fn from_docx_bytes(bytes: &[u8]) -> Self
    {   Document::Docx(STANDARD.encode(bytes))
    }

    pub fn from_docx_file(path: impl AsRef<Path>) -> Result<Self, Error>
    {   let path = path.as_ref();
        debug!("Reading docx document from {}", path.display());
        let bytes = std::fs::read(path)?;
        Ok(Document::from_docx_bytes(&bytes))
    }

    pub fn from_text(text: impl Into<String>) -> Self
    {   Document::Text(text.into())
    }

    pub fn from_prompt(items: Vec<PromptItem>) -> Self
    {   Document::Prompt(items)
    }
}
