use super::*;
use serde_json::json;
use tabwise_protocols::types::TabId;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

fn credentials() -> GeminiCredentials {
    GeminiCredentials {
        api_key: "test-key".to_string(),
        model: None,
    }
}

fn tabs() -> Vec<TabMetadata> {
    vec![
        TabMetadata {
            id: TabId(1),
            index: 0,
            title: "Rust docs".to_string(),
            url: "https://doc.rust-lang.org/std/".to_string(),
        },
        TabMetadata {
            id: TabId(2),
            index: 1,
            title: "Weather".to_string(),
            url: "https://weather.example.com/today".to_string(),
        },
    ]
}

fn candidate_with(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

#[test]
fn test_provider_defaults() {
    let provider = GeminiProvider::new(&credentials());
    assert_eq!(provider.id(), "gemini");
    assert_eq!(provider.model(), DEFAULT_MODEL);

    let custom = GeminiProvider::new(&GeminiCredentials {
        api_key: "k".to_string(),
        model: Some("gemini-1.5-pro".to_string()),
    });
    assert_eq!(custom.model(), "gemini-1.5-pro");
}

#[tokio::test]
async fn test_group_tabs_success() {
    let mock_server = MockServer::start().await;
    let grouping = r#"{"groups":[{"name":"Dev Docs","tabIndices":[0]},{"name":"Daily Weather","tabIndices":[1]}]}"#;

    Mock::given(matchers::method("POST"))
        .and(matchers::path(GENERATE_PATH))
        .and(matchers::header("x-goog-api-key", "test-key"))
        .and(matchers::body_partial_json(json!({
            "generationConfig": {"responseMimeType": "application/json"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(candidate_with(grouping)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::with_base_url(&credentials(), mock_server.uri());
    let raw = provider.group_tabs(&tabs(), None).await.unwrap();

    assert_eq!(raw["groups"][0]["name"], "Dev Docs");
    assert_eq!(raw["groups"][1]["tabIndices"][0], 1);
}

#[tokio::test]
async fn test_request_carries_tabs_and_custom_prompt() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(candidate_with(r#"{"groups":[]}"#)))
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::with_base_url(&credentials(), mock_server.uri());
    provider
        .group_tabs(&tabs(), Some("separate work from leisure"))
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let system = body["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
    let user = body["contents"][0]["parts"][0]["text"].as_str().unwrap();

    assert!(system.ends_with("User instructions:\nseparate work from leisure"));
    assert!(user.contains("Total tabs: 2"));
    assert!(user.contains("0. Rust docs [doc.rust-lang.org]"));
    assert!(user.contains("1. Weather [weather.example.com]"));
}

#[tokio::test]
async fn test_fenced_json_in_candidate() {
    let mock_server = MockServer::start().await;
    let text = "Here you go:\n```json\n{\"groups\":[{\"name\":\"A\",\"tabIndices\":[0,1]}]}\n```";

    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(candidate_with(text)))
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::with_base_url(&credentials(), mock_server.uri());
    let raw = provider.group_tabs(&tabs(), None).await.unwrap();
    assert_eq!(raw["groups"][0]["name"], "A");
}

#[tokio::test]
async fn test_no_candidates_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#),
        )
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::with_base_url(&credentials(), mock_server.uri());
    let err = provider.group_tabs(&tabs(), None).await.unwrap_err();
    match err {
        ProviderError::InvalidResponse(message) => assert!(message.contains("SAFETY")),
        other => panic!("Expected InvalidResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn test_prose_only_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(candidate_with("I cannot help")))
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::with_base_url(&credentials(), mock_server.uri());
    let err = provider.group_tabs(&tabs(), None).await.unwrap_err();
    assert!(err.to_string().starts_with("INVALID_RESPONSE"));
}

#[tokio::test]
async fn test_bad_api_key() {
    let mock_server = MockServer::start().await;
    let error_body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;

    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string(error_body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::with_base_url(&credentials(), mock_server.uri());
    let err = provider.group_tabs(&tabs(), None).await.unwrap_err();
    match err {
        ProviderError::InvalidCredentials(message) => assert!(message.contains("API key not valid")),
        other => panic!("Expected InvalidCredentials, got {other:?}"),
    }
}

#[tokio::test]
async fn test_status_mapping() {
    for (status, expected) in [(401, "UNAUTHORIZED"), (403, "FORBIDDEN"), (429, "RATE_LIMIT"), (503, "HTTP 503")] {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream says no"))
            .mount(&mock_server)
            .await;

        let provider = GeminiProvider::with_base_url(&credentials(), mock_server.uri());
        let err = provider.group_tabs(&tabs(), None).await.unwrap_err();
        assert!(
            err.to_string().starts_with(expected),
            "status {status} gave {err}"
        );
        assert!(err.to_string().contains("upstream says no"));
    }
}

#[tokio::test]
async fn test_connection_ok() {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/models/gemini-2.0-flash"))
        .and(matchers::header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"name":"models/gemini-2.0-flash"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::with_base_url(&credentials(), mock_server.uri());
    provider.test_connection().await.unwrap();
}

#[tokio::test]
async fn test_connection_unreachable() {
    let provider = GeminiProvider::with_base_url(&credentials(), "http://127.0.0.1:9".to_string());
    let err = provider.test_connection().await.unwrap_err();
    assert!(matches!(err, ProviderError::Network(_) | ProviderError::Timeout(_)));
}

#[tokio::test]
async fn test_network_error_does_not_leak_key() {
    let provider = GeminiProvider::with_base_url(
        &GeminiCredentials {
            api_key: "SUPERSECRETKEY".to_string(),
            model: None,
        },
        "http://127.0.0.1:1/v1beta".to_string(),
    );
    let err = provider.group_tabs(&tabs(), None).await.unwrap_err();
    assert!(matches!(err, ProviderError::Network(_)), "got {err:?}");
    assert!(!err.to_string().contains("SUPERSECRETKEY"));
    assert!(!err.to_string().contains("127.0.0.1"));
}
