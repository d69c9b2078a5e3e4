/*
 * Responsibility
 * - Hand an admitted request to the upstream (next stage of the pipeline)
 * - Only reached when the admission middleware emitted "proceed"
 */
use axum::{extract::Request, extract::State, response::Response};

use crate::error::AppError;
use crate::state::AppState;

pub async fn forward(State(state): State<AppState>, req: Request) -> Result<Response, AppError> {
    Ok(state.upstream.forward(req).await?)
}
