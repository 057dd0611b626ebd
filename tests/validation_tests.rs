use aleph_alpha_client::{
  translate_response, ApiRequest, ClientConfig, CompletionRequest
, Credentials, DetokenizationRequest, Document, EmbeddingRequest, Error
, EvaluationRequest, ExplanationRequest, ImagePrompt, Pooling, Prompt
, PromptItem, QaRequest, TokenizationRequest, DEFAULT_HOSTING
};
use aleph_alpha_client::config::DEFAULT_HOST;
use serde_json::{json, Value};

fn payload_of<R: ApiRequest>(request: &R) -> Value
{   let payload = request
      .payload("luminous-base", DEFAULT_HOSTING)
      .expect("request should validate");
    serde_json::to_value(&payload).unwrap()
}

fn rejected_parameter<R: ApiRequest>(request: &R) -> String
{   match request.payload("luminous-base", DEFAULT_HOSTING)
    {   Err(Error::InvalidParameter { parameter, .. }) => parameter
      , Err(other) => panic!("expected validation error, got {:?}", other)
      , Ok(_) => panic!("request should have been rejected")
    }
}

// ===== Completion =====

#[test]
fn integer_sampling_parameters_widen_to_floats()
{   let request = CompletionRequest::new("Hi")
      .temperature(1)
      .top_p(0)
      .presence_penalty(2)
      .frequency_penalty(1u8);
    let payload = payload_of(&request);

    for key in ["temperature", "top_p", "presence_penalty", "frequency_penalty"]
    {   assert!(payload[key].is_f64(), "{} should be a float", key);
    }
    assert_eq!(payload["temperature"].as_f64(), Some(1.0));
    assert!(serde_json::to_string(&payload).unwrap().contains("\"temperature\":1.0"));
}

#[test]
fn unset_optional_parameters_are_sent_as_null()
{   let payload = payload_of(&CompletionRequest::new("Hi"));
    let object = payload.as_object().unwrap();

    for key in ["best_of", "logit_bias", "log_probs", "stop_sequences"]
    {   assert!(object.contains_key(key), "{} missing", key);
        assert!(object[key].is_null());
    }
    assert_eq!(payload["model"], "luminous-base");
    assert_eq!(payload["hosting"], "cloud");
    assert_eq!(payload["n"], 1);
}

#[test]
fn empty_prompt_is_allowed_for_completion()
{   let payload = payload_of(&CompletionRequest::default());
    assert_eq!(payload["prompt"], "");
}

#[test]
fn best_of_must_exceed_n()
{   assert_eq!(
      rejected_parameter(&CompletionRequest::new("Hi").best_of(1)),
      "best_of"
    );
    assert_eq!(
      rejected_parameter(&CompletionRequest::new("Hi").n(3).best_of(3)),
      "best_of"
    );
    assert_eq!(
      rejected_parameter(&CompletionRequest::new("Hi").n(3).best_of(2)),
      "best_of"
    );

    let payload = payload_of(&CompletionRequest::new("Hi").n(2).best_of(3));
    assert_eq!(payload["best_of"], 3);
}

#[test]
fn n_and_maximum_tokens_must_be_positive()
{   assert_eq!(rejected_parameter(&CompletionRequest::new("Hi").n(0)), "n");
    assert_eq!(
      rejected_parameter(&CompletionRequest::new("Hi").maximum_tokens(0)),
      "maximum_tokens"
    );

    let mut request = CompletionRequest::new("Hi");
    request.maximum_tokens = None;
    assert!(payload_of(&request)["maximum_tokens"].is_null());
}

#[test]
fn temperature_and_top_p_stay_in_unit_interval()
{   assert_eq!(
      rejected_parameter(&CompletionRequest::new("Hi").temperature(1.5)),
      "temperature"
    );
    assert_eq!(
      rejected_parameter(&CompletionRequest::new("Hi").top_p(-0.1)),
      "top_p"
    );
    assert_eq!(
      rejected_parameter(&CompletionRequest::new("Hi").temperature(f64::NAN)),
      "temperature"
    );
    payload_of(&CompletionRequest::new("Hi").temperature(1).top_p(0.9));
}

#[test]
fn penalties_must_be_finite()
{   assert_eq!(
      rejected_parameter(
        &CompletionRequest::new("Hi").presence_penalty(f64::INFINITY)
      ),
      "presence_penalty"
    );
    assert_eq!(
      rejected_parameter(
        &CompletionRequest::new("Hi").frequency_penalty(f64::NAN)
      ),
      "frequency_penalty"
    );
}

#[test]
fn logit_bias_is_checked_per_entry()
{   let request = CompletionRequest::new("Hi")
      .logit_bias(5, 1)
      .logit_bias(7, -2.5);
    assert_eq!(
      payload_of(&request)["logit_bias"],
      json!({ "5": 1.0, "7": -2.5 })
    );

    let request = request.logit_bias(9, f64::NAN);
    assert_eq!(rejected_parameter(&request), "logit_bias[9]");
}

#[test]
fn stop_sequences_are_sent_as_strings()
{   let request = CompletionRequest::new("Q: hi\nA:")
      .stop_sequences(vec!["Q:".to_string(), "\n".to_string()]);
    assert_eq!(payload_of(&request)["stop_sequences"], json!(["Q:", "\n"]));
}

#[test]
fn model_name_is_required()
{   match CompletionRequest::new("Hi").payload("", DEFAULT_HOSTING)
    {   Err(Error::InvalidParameter { parameter, .. }) => {
          assert_eq!(parameter, "model")
        }
      , other => panic!("expected validation error, got {:?}", other.is_ok())
    }
}

// ===== Tokenization =====

#[test]
fn tokenization_payload_has_no_hosting()
{   let payload = payload_of(&TokenizationRequest::new("Hello"));
    assert_eq!(
      payload,
      json!({
        "model": "luminous-base",
        "prompt": "Hello",
        "tokens": true,
        "token_ids": true
      })
    );

    let payload = payload_of(&TokenizationRequest::new(""));
    assert_eq!(payload["prompt"], "");

    let payload = payload_of(&DetokenizationRequest::new(vec![3, 4]));
    assert_eq!(
      payload,
      json!({ "model": "luminous-base", "token_ids": [3, 4] })
    );
}

// ===== Embedding =====

#[test]
fn pooling_names_round_through_strings()
{   for pooling in Pooling::ALL
    {   assert_eq!(pooling.as_str().parse::<Pooling>().unwrap(), pooling);
        assert_eq!(
          serde_json::to_value(pooling).unwrap(),
          json!(pooling.to_string())
        );
    }
    assert_eq!("last_token".parse::<Pooling>().unwrap(), Pooling::LastToken);

    match "median".parse::<Pooling>()
    {   Err(Error::InvalidParameter { parameter, message }) => {
          assert_eq!(parameter, "pooling");
          assert!(message.contains("median"));
        }
      , other => panic!("unexpected {:?}", other)
    }
}

#[test]
fn embedding_request_from_pooling_names()
{   let request = EmbeddingRequest::with_pooling_names(
      "abc", vec![0, -1], &["mean", "abs_max"]
    ).unwrap();
    assert_eq!(request.pooling, vec![Pooling::Mean, Pooling::AbsMax]);

    let payload = payload_of(&request.embedding_type("symmetric"));
    assert_eq!(payload["layers"], json!([0, -1]));
    assert_eq!(payload["type"], "symmetric");

    assert!(EmbeddingRequest::with_pooling_names(
      "abc", vec![0], &["mean", "sum"]
    ).is_err());
}

#[test]
fn embedding_needs_a_non_empty_prompt()
{   let request = EmbeddingRequest::new("", vec![-1], vec![Pooling::Mean]);
    match request.validate()
    {   Err(Error::InvalidParameter { parameter, message }) => {
          assert_eq!(parameter, "prompt");
          assert_eq!(message, "prompt must contain at least one character");
        }
      , other => panic!("unexpected {:?}", other)
    }

    let request = EmbeddingRequest::new(
      Prompt::from_items(vec![]), vec![-1], vec![Pooling::Mean]
    );
    assert_eq!(rejected_parameter(&request), "prompt");
}

#[test]
fn embedding_needs_layers_and_pooling()
{   assert_eq!(
      rejected_parameter(&EmbeddingRequest::new("a", vec![], vec![Pooling::Max])),
      "layers"
    );
    assert_eq!(
      rejected_parameter(&EmbeddingRequest::new("a", vec![1], vec![])),
      "pooling"
    );
}

// ===== Evaluation =====

#[test]
fn evaluation_needs_expected_completion()
{   assert_eq!(
      rejected_parameter(&EvaluationRequest::new("hello", "")),
      "completion_expected"
    );
    let payload = payload_of(&EvaluationRequest::new("", "world"));
    assert_eq!(payload["completion_expected"], "world");
}

// ===== Question answering =====

#[test]
fn qa_parameters_are_checked_independently()
{   let docs = vec![Document::from_text("text")];

    assert_eq!(rejected_parameter(&QaRequest::new("q", vec![])), "documents");
    assert_eq!(rejected_parameter(&QaRequest::new("", docs.clone())), "query");
    assert_eq!(
      rejected_parameter(&QaRequest::new("q", docs.clone()).maximum_tokens(0)),
      "maximum_tokens"
    );
    assert_eq!(
      rejected_parameter(&QaRequest::new("q", docs.clone()).max_chunk_size(0)),
      "max_chunk_size"
    );
    assert_eq!(
      rejected_parameter(&QaRequest::new("q", docs.clone()).min_score(f64::NAN)),
      "min_score"
    );

    let payload = payload_of(&QaRequest::new("q", docs).min_score(1));
    assert_eq!(payload["min_score"].as_f64(), Some(1.0));
    assert_eq!(payload["max_chunk_size"], 175);
    assert_eq!(payload["max_answers"], 0);
}

#[test]
fn documents_serialize_by_kind()
{   assert_eq!(
      serde_json::to_value(Document::from_docx_bytes(b"PK")).unwrap(),
      json!({ "docx": "UEs=" })
    );
    assert_eq!(
      serde_json::to_value(Document::from_text("t")).unwrap(),
      json!({ "text": "t" })
    );
    assert_eq!(
      serde_json::to_value(Document::from_prompt(vec![
        PromptItem::text("see"),
        PromptItem::Image(ImagePrompt::from_bytes(b"img")),
      ])).unwrap(),
      json!({ "prompt": [
        { "type": "text", "data": "see" },
        { "type": "image", "data": "aW1n" }
      ] })
    );
}

#[test]
fn files_are_read_and_encoded()
{   let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("cat.png");
    let docx_path = dir.path().join("notes.docx");
    std::fs::write(&image_path, b"img").unwrap();
    std::fs::write(&docx_path, b"PK").unwrap();

    assert_eq!(
      ImagePrompt::from_file(&image_path).unwrap(),
      ImagePrompt::from_bytes(b"img")
    );
    assert_eq!(
      Document::from_docx_file(&docx_path).unwrap(),
      Document::Docx("UEs=".to_string())
    );
}

#[test]
fn missing_files_are_io_errors()
{   let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.bin");

    assert!(matches!(ImagePrompt::from_file(&missing), Err(Error::Io(_))));
    assert!(matches!(Document::from_docx_file(&missing), Err(Error::Io(_))));
}

// ===== Prompts =====

#[test]
fn multimodal_prompt_items_are_tagged()
{   let prompt = Prompt::from_items(vec![
      PromptItem::Image(ImagePrompt::from_bytes(b"img").with_crop(1, 2, 64)),
      PromptItem::text("caption"),
    ]);
    assert_eq!(
      serde_json::to_value(&prompt).unwrap(),
      json!([
        { "type": "image", "data": "aW1n", "x": 1, "y": 2, "size": 64 },
        { "type": "text", "data": "caption" }
      ])
    );

    let uncropped = serde_json::to_value(ImagePrompt::from_bytes(b"img")).unwrap();
    assert_eq!(uncropped, json!({ "data": "aW1n" }));
}

// ===== Explanation =====

#[test]
fn explanation_renders_its_own_body()
{   let body = ExplanationRequest::new("Hello", " world")
      .directional(true)
      .render_as_body("luminous-base", Some("cloud"))
      .unwrap();
    assert_eq!(body["model"], "luminous-base");
    assert_eq!(body["prompt"], "Hello");
    assert_eq!(body["hosting"], "cloud");
    assert_eq!(body["directional"], true);
    assert!(body["normalize"].is_null());

    let body = ExplanationRequest::new("Hello", " world")
      .render_as_body("luminous-base", None)
      .unwrap();
    assert!(body.as_object().unwrap().contains_key("hosting"));
    assert!(body["hosting"].is_null());

    assert!(ExplanationRequest::new("Hello", "")
      .render_as_body("luminous-base", None)
      .unwrap_err()
      .is_validation());
}

// ===== Configuration =====

#[test]
fn host_is_normalized_once()
{   let config = ClientConfig::with_token("http://x", "t");
    assert_eq!(config.normalized_host().unwrap(), "http://x/");

    let config = ClientConfig::with_token("http://x/", "t");
    assert_eq!(config.normalized_host().unwrap(), "http://x/");

    assert!(matches!(
      ClientConfig::with_token("  ", "t").normalized_host(),
      Err(Error::InvalidConfiguration(_))
    ));
}

/// All cases share one test because the environment is process wide
#[test]
fn config_from_env()
{   for var in ["AA_HOST", "AA_TOKEN", "AA_EMAIL", "AA_PASSWORD"]
    {   std::env::remove_var(var);
    }

    assert!(matches!(
      ClientConfig::from_env(),
      Err(Error::InvalidConfiguration(_))
    ));

    std::env::set_var("AA_EMAIL", "me@x");
    assert!(matches!(
      ClientConfig::from_env(),
      Err(Error::InvalidConfiguration(_))
    ));

    std::env::set_var("AA_PASSWORD", "hunter2");
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(
      config.credentials,
      Credentials::Login
      {   email: "me@x".to_string()
        , password: "hunter2".to_string()
      }
    );

    std::env::set_var("AA_TOKEN", "tok");
    std::env::set_var("AA_HOST", "http://localhost:8080");
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.host, "http://localhost:8080");
    assert_eq!(config.credentials, Credentials::Token("tok".to_string()));

    for var in ["AA_HOST", "AA_TOKEN", "AA_EMAIL", "AA_PASSWORD"]
    {   std::env::remove_var(var);
    }
}

#[test]
fn debug_output_hides_secrets()
{   let config = ClientConfig::with_login("http://x", "me@x", "hunter2");
    let shown = format!("{:?}", config);
    assert!(shown.contains("me@x"));
    assert!(!shown.contains("hunter2"));

    let shown = format!("{:?}", Credentials::Token("abc123".to_string()));
    assert!(!shown.contains("abc123"));
}

// ===== Status translation =====

#[test]
fn success_body_is_returned_unchanged()
{   let body = json!({ "completions": [{ "completion": "x" }], "n": 1.5 });
    assert_eq!(
      translate_response(200, &body.to_string()).unwrap(),
      body
    );
}

#[test]
fn status_codes_map_to_error_kinds()
{   let body = r#"{"error":"x"}"#;
    assert!(matches!(translate_response(400, body), Err(Error::BadRequest { .. })));
    assert!(matches!(translate_response(401, body), Err(Error::Permission { .. })));
    assert!(matches!(translate_response(402, body), Err(Error::QuotaExceeded { .. })));
    assert!(matches!(translate_response(408, body), Err(Error::Timeout { .. })));
    assert!(matches!(translate_response(500, body), Err(Error::Service { .. })));
    assert!(matches!(translate_response(201, body), Err(Error::Service { .. })));

    let err = translate_response(402, body).unwrap_err();
    assert_eq!(err.status(), Some(402));
    assert_eq!(err.body(), Some(&json!({ "error": "x" })));
}

#[test]
fn undecodable_bodies_are_kept()
{   let err = translate_response(500, "").unwrap_err();
    assert_eq!(err.body(), Some(&Value::Null));

    let err = translate_response(502, "<html>bad gateway</html>").unwrap_err();
    assert_eq!(err.body(), Some(&json!("<html>bad gateway</html>")));

    assert!(matches!(
      translate_response(200, "not json"),
      Err(Error::ParseError(_))
    ));
}
