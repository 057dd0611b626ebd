pub mod error;
pub mod config;
pub mod prompt;
pub mod document;
mod validate;
pub mod request;
pub mod explanation;
pub mod response;
pub mod transport;
pub mod client;
pub mod model;

/*

blocking client for the aleph alpha inference api. every call
validates its parameters, sends exactly one http request and maps
the status code to a typed result or an Error. nothing is retried,
nothing is cached, and the client holds no state besides its
host and headers.

aleph-alpha-client/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports
│   ├── error.rs        # Error enum, status code variants
│   ├── config.rs       # Host + credentials, env loading
│   ├── prompt.rs       # Text / multimodal prompts
│   ├── document.rs     # Documents for qa
│   ├── validate.rs     # Range checks
│   ├── request.rs      # One request type per endpoint
│   ├── explanation.rs  # Explanation request, renders its own body
│   ├── response.rs     # Typed response bodies
│   ├── transport.rs    # reqwest blocking + status translation
│   ├── client.rs       # AlephAlphaClient
│   └── model.rs        # Client bound to a model + hosting
└── tests/

*/

pub use client::{AlephAlphaClient, EXPECTED_API_RELEASE};
pub use config::{ClientConfig, Credentials};
pub use document::Document;
pub use error::Error;
pub use explanation::ExplanationRequest;
pub use model::AlephAlphaModel;
pub use prompt::{ImagePrompt, Prompt, PromptItem};
pub use request::{
  ApiRequest, CompletionRequest, DetokenizationRequest, EmbeddingRequest
, EvaluationRequest, Pooling, QaRequest, TokenizationRequest
, DEFAULT_HOSTING
};
pub use response::{
  CompletionResponse, CompletionResult, DetokenizationResponse
, EmbeddingResponse, EvaluationResponse, EvaluationResult
, ModelDescription, QaAnswer, QaResponse, TokenizationResponse
};
pub use transport::translate_response;
