use crate::{error::AppError, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::Uri,
    Json,
};
use events::{command_definitions, CommandDefinition, Interaction, Response};
use std::sync::Arc;

/// # GET /api/commands
/// The slash commands an adapter should register with the platform.
pub async fn get_commands() -> Json<Vec<CommandDefinition>> {
    Json(command_definitions())
}

/// # POST /api/interactions
/// Feeds one platform interaction to the bot and returns its reply.
pub async fn post_interaction(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Interaction>, JsonRejection>,
) -> Result<Json<Response>, AppError> {
    let Json(interaction) = payload?;
    let response = state.bot.handle(interaction).await;
    Ok(Json(response))
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
