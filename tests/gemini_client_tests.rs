// Gemini client tests against a mock HTTP server
// Author: kelexine (https://github.com/kelexine)

use gem2gpt::gemini::{GeminiClient, GenerativeModel};
use gem2gpt::translation::{OutputFormat, PromptBundle};
use gem2gpt::{EncodedImage, VisionAdapter, VisionConfig, VisionError};
use mockito::Matcher;
use serde_json::json;

const PNG_DATA: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";
const ENDPOINT: &str = "/models/gemini-1.5-flash:generateContent";

fn config(base_url: String, api_key: Option<&str>) -> VisionConfig {
    VisionConfig {
        api_key: api_key.map(str::to_string),
        api_base_url: base_url,
        timeout_seconds: 5,
        ..VisionConfig::default()
    }
}

fn text_response(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 600, "candidatesTokenCount": 20, "totalTokenCount": 620}
    })
    .to_string()
}

#[tokio::test]
async fn test_missing_api_key_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .expect(0)
        .create_async()
        .await;

    let result = VisionAdapter::from_config(&config(server.url(), None));
    assert!(matches!(result, Err(VisionError::Config(ref m)) if m.contains("GOOGLE_API_KEY")));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_analyze_images_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .match_header("x-goog-api-key", "AIzaTestKey")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {"text": "System Instructions: Be brief\n\n"},
                    {"text": "Here are some character profile pages, for your reference:"},
                    {"text": "\nPrompt: Summarise\n"},
                    {"inlineData": {"mimeType": "image/png", "data": PNG_DATA}}
                ]
            }]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(text_response("A quiet opening."))
        .create_async()
        .await;

    let adapter = VisionAdapter::from_config(&config(server.url(), Some("AIzaTestKey"))).unwrap();
    let completion = adapter
        .analyze_images(&[], &[EncodedImage::new(PNG_DATA)], "Summarise", "Be brief")
        .await
        .unwrap();

    assert_eq!(completion.content(), Some("A quiet opening."));
    assert_eq!(completion.usage.total_tokens, 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_json_mode_is_requested() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": {"responseMimeType": "application/json"}
        })))
        .with_status(200)
        .with_body(text_response(r#"{"important_pages": [{"page": 1, "kind": "profile"}]}"#))
        .create_async()
        .await;

    let adapter = VisionAdapter::from_config(&config(server.url(), Some("AIzaTestKey"))).unwrap();
    let result = adapter
        .detect_important_pages(&[], &[], &[EncodedImage::new(PNG_DATA)], "Find", "JSON")
        .await
        .unwrap();

    assert_eq!(result.parsed_response, vec![json!({"page": 1, "kind": "profile"})]);
    assert_eq!(result.total_tokens, 0);
    mock.assert_async().await;
}

fn error_kind(error: &VisionError) -> &'static str {
    match error {
        VisionError::GeminiApi(_) => "api",
        VisionError::InvalidCredentials(_) => "credentials",
        VisionError::TooManyRequests(_) => "rate_limit",
        VisionError::ServiceUnavailable(_) => "unavailable",
        _ => "other",
    }
}

#[tokio::test]
async fn test_http_status_mapping() {
    let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;

    for (status, expected) in [(400, "api"), (403, "credentials"), (429, "rate_limit"), (503, "unavailable")] {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", ENDPOINT)
            .with_status(status)
            .with_body(body)
            .create_async()
            .await;

        let client = GeminiClient::new(&config(server.url(), Some("AIzaTestKey"))).unwrap();
        let request = PromptBundle::new().text("hi").into_request(OutputFormat::FreeText);
        let err = client.generate_content(request).await.unwrap_err();

        assert_eq!(error_kind(&err), expected, "unexpected error for HTTP {}: {:?}", status, err);
        assert!(err.to_string().contains("API key not valid"));
    }
}

#[tokio::test]
async fn test_panels_swallow_http_failure() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT)
        .with_status(500)
        .with_body("internal")
        .create_async()
        .await;

    let adapter = VisionAdapter::from_config(&config(server.url(), Some("AIzaTestKey"))).unwrap();
    let result = adapter
        .get_important_panels(&[], &[EncodedImage::new(PNG_DATA)], "Pick", "JSON")
        .await
        .unwrap();

    assert!(result.parsed_response.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unparseable_envelope_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body("<html>proxy error</html>")
        .create_async()
        .await;

    let adapter = VisionAdapter::from_config(&config(server.url(), Some("AIzaTestKey"))).unwrap();
    let err = adapter
        .analyze_images(&[], &[EncodedImage::new(PNG_DATA)], "Narrate", "Be vivid")
        .await
        .unwrap_err();
    assert!(matches!(err, VisionError::GeminiApi(_)));
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    // Nothing listens on port 1
    let unreachable = VisionConfig {
        connect_timeout_seconds: 2,
        ..config("http://127.0.0.1:1".to_string(), Some("AIzaTestKey"))
    };
    let adapter = VisionAdapter::from_config(&unreachable).unwrap();

    let err = adapter
        .analyze_images(&[], &[EncodedImage::new(PNG_DATA)], "Narrate", "Be vivid")
        .await
        .unwrap_err();
    assert!(matches!(err, VisionError::Http(_)), "unexpected error: {:?}", err);
    assert!(err.is_remote());

    let result = adapter
        .get_important_panels(&[], &[EncodedImage::new(PNG_DATA)], "Pick", "JSON")
        .await
        .unwrap();
    assert!(result.parsed_response.is_empty());
}
