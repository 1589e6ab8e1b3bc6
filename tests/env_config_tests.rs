// Configuration read from the process environment
// Author: kelexine (https://github.com/kelexine)

use gem2gpt::{EncodedImage, VisionConfig, VisionError};
use serde_json::json;
use std::env;
use std::sync::{Mutex, MutexGuard};

const PNG_DATA: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";
const MISSING: &str = "/nonexistent/gem2gpt/config.toml";

const VARS: [&str; 4] = [
    "GOOGLE_API_KEY",
    "GEMINI_MODEL_NAME",
    "GEM2GPT_MODEL",
    "GEM2GPT_API_BASE_URL",
];

// The environment is process-wide; every test in this binary holds this lock.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clean_env() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    for var in VARS {
        env::remove_var(var);
    }
    guard
}

#[tokio::test]
async fn test_missing_or_blank_key_fails_free_functions() {
    let _guard = clean_env();
    let pages = [EncodedImage::new(PNG_DATA)];

    let err = gem2gpt::analyze_images(&[], &pages, "Narrate", "Be vivid")
        .await
        .unwrap_err();
    assert!(matches!(err, VisionError::Config(ref m) if m.contains("GOOGLE_API_KEY")));

    env::set_var("GOOGLE_API_KEY", "   ");
    let err = gem2gpt::analyze_images(&[], &pages, "Narrate", "Be vivid")
        .await
        .unwrap_err();
    assert!(matches!(err, VisionError::Config(_)));

    // The panel operation only swallows remote failures
    let err = gem2gpt::get_important_panels(&[], &pages, "Pick", "JSON")
        .await
        .unwrap_err();
    assert!(matches!(err, VisionError::Config(_)));

    env::remove_var("GOOGLE_API_KEY");
}

#[test]
fn test_model_name_variable_wins_over_prefixed() {
    let _guard = clean_env();
    env::set_var("GOOGLE_API_KEY", "AIzaFromEnv");
    env::set_var("GEM2GPT_MODEL", "gemini-from-prefix");
    env::set_var("GEMINI_MODEL_NAME", "gemini-override");

    let config = VisionConfig::load_from(MISSING).unwrap();
    assert_eq!(config.model, "gemini-override");
    assert_eq!(config.api_key.as_deref(), Some("AIzaFromEnv"));

    env::set_var("GEMINI_MODEL_NAME", "");
    let config = VisionConfig::load_from(MISSING).unwrap();
    assert_eq!(config.model, "gemini-from-prefix");

    env::remove_var("GEMINI_MODEL_NAME");
    env::remove_var("GEM2GPT_MODEL");
    let config = VisionConfig::load_from(MISSING).unwrap();
    assert_eq!(config.model, "gemini-1.5-flash");

    for var in VARS {
        env::remove_var(var);
    }
}

#[tokio::test]
async fn test_free_function_reads_environment_at_call_time() {
    let _guard = clean_env();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-env:generateContent")
        .match_header("x-goog-api-key", "AIzaFromEnv")
        .with_status(200)
        .with_body(
            json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "{\"important_pages\": [3]}"}]}
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    env::set_var("GEM2GPT_API_BASE_URL", server.url());
    env::set_var("GEMINI_MODEL_NAME", "gemini-env");
    env::set_var("GOOGLE_API_KEY", "AIzaFromEnv");

    let result = gem2gpt::detect_important_pages(&[], &[], &[EncodedImage::new(PNG_DATA)], "Find", "JSON")
        .await
        .unwrap();
    assert_eq!(result.parsed_response, vec![json!(3)]);
    mock.assert_async().await;

    for var in VARS {
        env::remove_var(var);
    }
}
