//! Integration tests for `GeminiClient` using wiremock HTTP mocks.

use chrono::{NaiveDate, NaiveTime};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zendestiny_core::{BaziResult, Gender, Language, Pillar};
use zendestiny_fortune::{ChatSession, FortuneError, GeminiClient};

const MODEL: &str = "gemini-2.5-flash";

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url("test-key", MODEL, 30, base_url)
        .expect("client construction should not fail")
}

fn chart() -> BaziResult {
    let day_pillar = Pillar::from_chars('甲', '子');
    BaziResult {
        year_pillar: Pillar::from_chars('庚', '午'),
        month_pillar: Pillar::from_chars('壬', '午'),
        day_pillar,
        hour_pillar: Pillar::from_chars('戊', '辰'),
        day_master: day_pillar.stem,
        da_yun: Vec::new(),
        gender: Gender::Male,
        birth_date: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
        birth_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
        birth_place: "Shanghai".to_string(),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
}

fn endpoint() -> String {
    format!("/v1beta/models/{MODEL}:generateContent")
}

fn stream_endpoint() -> String {
    format!("/v1beta/models/{MODEL}:streamGenerateContent")
}

fn sse_body(texts: &[&str]) -> String {
    texts
        .iter()
        .map(|t| format!("data: {}\n\n", text_response(t)))
        .collect()
}

fn text_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            { "content": { "role": "model", "parts": [{ "text": text }] } }
        ]
    })
}

#[tokio::test]
async fn generate_fortune_parses_the_structured_payload() {
    let server = MockServer::start().await;

    let payload = serde_json::json!({
        "score": 88,
        "summary": "Strong Wood day.",
        "analysis": "The Day Master is well supported.",
        "advice": "Take the initiative.",
        "luckyColor": "Green",
        "luckyDirection": "East"
    });
    Mock::given(method("POST"))
        .and(path(endpoint()))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&payload.to_string())))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fortune = client
        .generate_fortune(&chart(), Language::En, today())
        .await
        .expect("should parse fortune");

    assert_eq!(fortune.score, 88);
    assert_eq!(fortune.lucky_color, "Green");
    assert_eq!(fortune.lucky_direction, "East");
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint()))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .generate_fortune(&chart(), Language::En, today())
        .await
        .unwrap_err();
    assert!(matches!(err, FortuneError::Api(_)), "got {err:?}");
}

#[tokio::test]
async fn unparsable_fortune_text_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint()))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("not json at all")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .generate_fortune(&chart(), Language::En, today())
        .await
        .unwrap_err();
    assert!(matches!(err, FortuneError::Deserialize { .. }), "got {err:?}");
}

#[tokio::test]
async fn empty_candidate_list_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .generate_fortune(&chart(), Language::En, today())
        .await
        .unwrap_err();
    assert!(matches!(err, FortuneError::Api(_)), "got {err:?}");
}

#[tokio::test]
async fn chat_session_keeps_history_across_turns() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint()))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("The omens are good.")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let chart = chart();
    let mut session = ChatSession::new(&client, &chart, Language::En, 2026);

    assert!(session.greeting().contains("Shanghai"));
    assert_eq!(session.turn_count(), 0);

    let reply = session.send("What about my career?").await.unwrap();
    assert_eq!(reply, "The omens are good.");
    assert_eq!(session.turn_count(), 2);

    session.send("And wealth?").await.unwrap();
    assert_eq!(session.turn_count(), 4);
}

#[tokio::test]
async fn streamed_chat_turn_delivers_chunks_incrementally() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(stream_endpoint()))
        .and(query_param("alt", "sse"))
        .and(query_param("key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(sse_body(&["The omens ", "are good."]), "text/event-stream"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let chart = chart();
    let mut session = ChatSession::new(&client, &chart, Language::En, 2026);

    let mut chunks: Vec<String> = Vec::new();
    let reply = session
        .send_streamed("What about my career?", |chunk| chunks.push(chunk.to_string()))
        .await
        .unwrap();

    assert_eq!(chunks, vec!["The omens ", "are good."]);
    assert_eq!(reply, "The omens are good.");
    assert_eq!(session.turn_count(), 2);
}

#[tokio::test]
async fn failed_stream_leaves_the_session_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(stream_endpoint()))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let chart = chart();
    let mut session = ChatSession::new(&client, &chart, Language::En, 2026);

    assert!(session.send_streamed("hello?", |_| {}).await.is_err());
    assert_eq!(session.turn_count(), 0);
}

#[tokio::test]
async fn stream_with_no_text_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(stream_endpoint()))
        .respond_with(ResponseTemplate::new(200).set_body_raw("\n\n", "text/event-stream"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let chart = chart();
    let mut session = ChatSession::new(&client, &chart, Language::En, 2026);

    let err = session.send_streamed("hello?", |_| {}).await.unwrap_err();
    assert!(matches!(err, FortuneError::Api(_)), "got {err:?}");
    assert_eq!(session.turn_count(), 0);
}

#[tokio::test]
async fn failed_chat_turn_is_not_recorded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint()))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let chart = chart();
    let mut session = ChatSession::new(&client, &chart, Language::En, 2026);

    assert!(session.send("hello?").await.is_err());
    assert_eq!(session.turn_count(), 0);
}
