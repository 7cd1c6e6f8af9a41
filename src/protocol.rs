use serde::{Deserialize, Serialize};

/// Body of `POST /generate-puzzle`.
#[derive(Debug, Deserialize)]
pub struct PuzzleRequest {
    pub topic: String,
}

/// Raw provider text, relayed without parsing.
#[derive(Debug, Serialize)]
pub struct PuzzleResponse {
    pub puzzle: String,
}

/// Error response returned by the API.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,
}
