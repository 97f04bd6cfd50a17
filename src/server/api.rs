use axum::{
    extract::{ rejection::JsonRejection, State },
    http::{ HeaderValue, Method, StatusCode },
    response::{ IntoResponse, Response },
    routing::{ get, post },
    Json,
    Router,
};
use log::{ error, warn };
use serde::Serialize;
use tower_http::cors::{ AllowHeaders, AllowOrigin, CorsLayer };

use crate::agent::{ AIAgent, AgentReply };
use crate::error::RelayError;
use crate::models::chat::{ ChatRequest, ChatResponse };

#[derive(Clone)]
struct AppState {
    agent: AIAgent,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        error!("Error: {}", self);
        let body = ChatResponse::from_text(format!("Произошла ошибка: {}", self));
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
}

pub fn router(agent: AIAgent, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .layer(cors_layer(allowed_origins))
        .with_state(AppState { agent })
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>
) -> Result<Json<AgentReply>, RelayError> {
    let Json(request) = payload.map_err(|e| RelayError::InvalidRequest(e.body_text()))?;
    let reply = state.agent.respond(&request).await?;
    Ok(Json(reply))
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.agent.model(),
    })
}
