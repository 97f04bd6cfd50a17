//! Handler tests for the chat and health endpoints, driven through the router
//! with a scripted provider in place of GigaChat.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{ header, Request, StatusCode };
use axum::Router;
use gigachat_relay::agent::AIAgent;
use gigachat_relay::llm::chat::{ ChatClient, CompletionResponse, ProviderError };
use gigachat_relay::server::api::router;
use http_body_util::BodyExt;
use serde_json::{ json, Value };
use std::sync::{ Arc, Mutex };
use tower::ServiceExt;

enum Script {
    Reply(String),
    Fail,
}

struct ScriptedClient {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self { script, prompts: Mutex::new(Vec::new()) })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.script {
            Script::Reply(text) => Ok(CompletionResponse { response: text.clone() }),
            Script::Fail => Err(ProviderError::EmptyCompletion),
        }
    }

    fn get_model(&self) -> String {
        "GigaChat-2".to_string()
    }
}

fn app(client: Arc<ScriptedClient>) -> Router {
    let origins = vec!["http://localhost:3000".to_string()];
    router(AIAgent::new(client), &origins)
}

async fn post_chat(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn json_reply_is_returned_unmodified() {
    let reply = json!({
        "reply": "Отличная идея!",
        "artifactUpdate": { "id": "idea", "content": "Кофейня у дома", "isCompleted": true },
        "suggestedAction": "Опишите целевую аудиторию"
    });
    let client = ScriptedClient::new(Script::Reply(reply.to_string()));
    let body = json!({ "history": [{ "role": "user", "text": "Хочу открыть кофейню" }] });

    let (status, value) = post_chat(app(client), &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, reply);
}

#[tokio::test]
async fn plain_text_reply_is_wrapped() {
    let client = ScriptedClient::new(Script::Reply("Расскажите подробнее".into()));
    let body = json!({ "history": [{ "role": "user", "text": "Привет" }] });

    let (status, value) = post_chat(app(client), &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        value,
        json!({ "reply": "Расскажите подробнее", "artifactUpdate": null, "suggestedAction": null })
    );
}

#[tokio::test]
async fn provider_failure_returns_error_envelope() {
    let client = ScriptedClient::new(Script::Fail);
    let body = json!({ "history": [{ "role": "user", "text": "Привет" }] });

    let (status, value) = post_chat(app(client), &body.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let reply = value["reply"].as_str().unwrap();
    assert!(reply.starts_with("Произошла ошибка: "));
    assert!(reply.contains("no choices"));
    assert_eq!(value["artifactUpdate"], Value::Null);
    assert_eq!(value["suggestedAction"], Value::Null);
}

#[tokio::test]
async fn malformed_body_returns_error_envelope() {
    let client = ScriptedClient::new(Script::Reply("unused".into()));

    let (status, value) = post_chat(app(client.clone()), "not json").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(value["reply"].as_str().unwrap().starts_with("Произошла ошибка: "));
    assert!(client.prompts().is_empty());
}

#[tokio::test]
async fn prompt_carries_instruction_transcript_and_question() {
    let client = ScriptedClient::new(Script::Reply("ok".into()));
    let body = json!({
        "history": [
            { "role": "user", "text": "Идея: кофейня" },
            { "role": "model", "text": "Кто ваши клиенты?" },
            { "role": "user", "text": "Студенты" }
        ],
        "systemInstruction": "Ты бизнес-ментор"
    });

    post_chat(app(client.clone()), &body.to_string()).await;

    let prompts = client.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(
        prompts[0],
        "СИСТЕМНАЯ ИНСТРУКЦИЯ:\nТы бизнес-ментор\n\n\nИСТОРИЯ ДИАЛОГА:\nПользователь: Идея: кофейня\nAI: Кто ваши клиенты?\n\nТЕКУЩИЙ ВОПРОС ПОЛЬЗОВАТЕЛЯ:\nСтуденты"
    );
}

#[tokio::test]
async fn empty_history_sends_greeting() {
    let client = ScriptedClient::new(Script::Reply("Здравствуйте!".into()));

    let (status, _) = post_chat(app(client.clone()), "{}").await;

    assert_eq!(status, StatusCode::OK);
    assert!(client.prompts()[0].ends_with("Привет!"));
}

#[tokio::test]
async fn health_reports_model_without_calling_provider() {
    let client = ScriptedClient::new(Script::Fail);
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app(client.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value, json!({ "status": "ok", "model": "GigaChat-2" }));
    assert!(client.prompts().is_empty());
}

#[tokio::test]
async fn cors_allows_listed_origin_only() {
    let client = ScriptedClient::new(Script::Fail);
    let preflight = |origin: &str| {
        Request::builder()
            .method("OPTIONS")
            .uri("/api/chat")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    };

    let allowed = app(client.clone()).oneshot(preflight("http://localhost:3000")).await.unwrap();
    assert_eq!(
        allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );

    let denied = app(client).oneshot(preflight("https://evil.example.com")).await.unwrap();
    assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn cors_preflight_mirrors_requested_headers() {
    let client = ScriptedClient::new(Script::Fail);
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/chat")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-request-id")
        .body(Body::empty())
        .unwrap();

    let response = app(client).oneshot(request).await.unwrap();

    let allowed = response.headers().get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap();
    assert!(allowed.to_str().unwrap().contains("x-request-id"));
}
