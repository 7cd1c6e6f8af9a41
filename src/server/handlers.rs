use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::error;

use crate::config::ProviderConfig;
use crate::prompt::{build_prompt, PromptStyle};
use crate::protocol::{ErrorResponse, PuzzleRequest, PuzzleResponse, StatusResponse};
use crate::provider::{Provider, ProviderError, SamplingOptions};

/// Shared application state. Everything here is read-only after startup.
pub struct AppState {
    pub provider: Arc<dyn Provider>,
    pub provider_config: Arc<ProviderConfig>,
    pub prompt_style: PromptStyle,
    pub sampling: SamplingOptions,
}

/// Failures surfaced by the puzzle endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API Key not configured")]
    NotConfigured,

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotConfigured | Self::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// JSON body extractor. Parses regardless of `Content-Type` and rejects with
/// the `{detail}` error shape.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidBody(e.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}

/// Liveness handler.
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Puzzle API is running".to_string(),
    })
}

/// Render the prompt for the requested topic and relay the provider's text
/// untouched.
pub async fn generate_puzzle(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<PuzzleRequest>,
) -> Result<Json<PuzzleResponse>, ApiError> {
    if !state.provider_config.has_credential() {
        error!("rejecting puzzle request: provider API key not configured");
        return Err(ApiError::NotConfigured);
    }

    let prompt = build_prompt(&request.topic, state.prompt_style);

    match state.provider.generate(&prompt, &state.sampling).await {
        Ok(puzzle) => Ok(Json(PuzzleResponse { puzzle })),
        Err(e) => {
            error!(
                provider = state.provider.name(),
                model = state.provider.model(),
                error = %e,
                "puzzle generation failed"
            );
            Err(e.into())
        }
    }
}
