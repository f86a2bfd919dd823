use super::{auth, AppError, AppState};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use potluck_core::{
    apply_vote, render, select_random, Block, PotluckError, VoteAction, VoteOutcome, Voter,
};
use serde::Deserialize;
use std::collections::HashMap;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

/// Fallback text shown in notifications where blocks don't render.
const SUGGESTION_TEXT: &str = "Here is your suggestion!";

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/slack/suggest", post(suggest))
        .route("/slack/interact", post(interact))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Authenticate an inbound webhook: freshness window plus signature over the
/// raw body. Both handlers short-circuit with 401 when this fails; nothing
/// past this point runs on an unverified request.
fn authorized(headers: &HeaderMap, body: &[u8], secret: &str) -> bool {
    let timestamp = header_str(headers, "x-slack-request-timestamp");
    let signature = header_str(headers, "x-slack-signature");

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;

    if !auth::fresh(timestamp, now) {
        warn!("Rejected webhook: stale or unparseable timestamp");
        return false;
    }
    if !auth::verify(timestamp, body, signature, secret.as_bytes()) {
        warn!("Rejected webhook: invalid signature");
        return false;
    }
    true
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// `POST /slack/suggest`, the slash-command entry point: pick a recipe at random
/// and post it to the requesting channel.
async fn suggest(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    if !authorized(&headers, &body, &state.signing_secret) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let params: HashMap<String, String> = form_urlencoded::parse(&body).into_owned().collect();
    let Some(channel) = params.get("channel_id") else {
        return AppError::from(PotluckError::MalformedPayload(
            "missing channel_id".to_string(),
        ))
        .into_response();
    };

    let recipe = match select_random(&state.store, state.max_recipe_id) {
        Ok(recipe) => recipe,
        Err(e) => return AppError::from(e).into_response(),
    };
    let blocks = render(&recipe);

    // The 200 to Slack is owed regardless of whether the post lands; failures
    // are logged with enough context to diagnose.
    if let Err(e) = state
        .slack
        .post_message(channel, SUGGESTION_TEXT, &blocks)
        .await
    {
        error!(channel = %channel, error = %e, "chat.postMessage failed");
    }

    StatusCode::OK.into_response()
}

/// The fields this bot needs from a `block_actions` interaction callback.
/// Slack sends far more; everything else is ignored.
#[derive(Deserialize)]
struct InteractionPayload {
    actions: Vec<ActionRef>,
    message: EchoedMessage,
    channel: ChannelRef,
    user: UserRef,
}

#[derive(Deserialize)]
struct ActionRef {
    action_id: String,
}

/// The prior outbound message, echoed back by Slack. Its blocks are the
/// authoritative voting-state snapshot.
#[derive(Deserialize)]
struct EchoedMessage {
    ts: String,
    blocks: Vec<Block>,
}

#[derive(Deserialize)]
struct ChannelRef {
    id: String,
}

#[derive(Deserialize)]
struct UserRef {
    id: String,
    name: String,
}

fn parse_interaction(body: &[u8]) -> Result<InteractionPayload, PotluckError> {
    let params: HashMap<String, String> = form_urlencoded::parse(body).into_owned().collect();
    let payload = params
        .get("payload")
        .ok_or_else(|| PotluckError::MalformedPayload("missing payload field".to_string()))?;

    serde_json::from_str(payload).map_err(|e| PotluckError::MalformedPayload(e.to_string()))
}

/// `POST /slack/interact`, the button-press callback: run the vote machine over
/// the echoed document and update the message in place (or replace it with a
/// fresh suggestion on a "no").
async fn interact(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    if !authorized(&headers, &body, &state.signing_secret) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let payload = match parse_interaction(&body) {
        Ok(payload) => payload,
        Err(e) => return AppError::from(e).into_response(),
    };

    let Some(action) = payload
        .actions
        .first()
        .and_then(|a| VoteAction::from_action_id(&a.action_id))
    else {
        // Not a vote button (e.g. the View link): acknowledge and move on.
        return StatusCode::OK.into_response();
    };

    let voter = Voter {
        id: payload.user.id,
        name: payload.user.name,
    };
    let channel = payload.channel.id;
    let ts = payload.message.ts;

    let next = match apply_vote(payload.message.blocks, action, &voter) {
        VoteOutcome::Unchanged => return StatusCode::OK.into_response(),
        VoteOutcome::Updated(blocks) => blocks,
        VoteOutcome::Replace => {
            // Dissent discards the document; the same message slot gets a
            // freshly selected suggestion.
            match select_random(&state.store, state.max_recipe_id) {
                Ok(recipe) => render(&recipe),
                Err(e) => return AppError::from(e).into_response(),
            }
        }
    };

    if let Err(e) = state
        .slack
        .update_message(&channel, &ts, SUGGESTION_TEXT, &next)
        .await
    {
        error!(channel = %channel, ts = %ts, action = ?action, error = %e, "chat.update failed");
    }

    StatusCode::OK.into_response()
}
