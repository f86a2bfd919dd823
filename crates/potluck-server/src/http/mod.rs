pub mod auth;
mod routes;

pub use routes::create_router;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use potluck_core::{PotluckError, RecipeStore};
use std::sync::Arc;

use crate::slack::SlackClient;

/// Shared application state. Every collaborator is an explicitly constructed,
/// injected handle; the vote machine itself carries no state at all.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecipeStore>,
    pub slack: SlackClient,
    pub signing_secret: String,
    pub max_recipe_id: u32,
}

/// Error type for HTTP handlers, mapping the core taxonomy to status codes.
pub struct AppError(PotluckError);

impl From<PotluckError> for AppError {
    fn from(err: PotluckError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PotluckError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            PotluckError::EmptyStore | PotluckError::NoRecipeAtOrBelow(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.0.to_string()).into_response()
    }
}
