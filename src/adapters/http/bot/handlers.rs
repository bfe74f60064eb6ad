//! HTTP handlers for the channel endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::application::{TurnDispatcher, TurnError};
use crate::domain::conversation::{Activity, OutboundMessage};
use crate::domain::dialog::templates;
use crate::ports::MessageSink;

use super::dto::{ActivityRequest, ErrorResponse, HealthResponse, TurnResponse};
use super::reply_collector::ReplyCollector;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct BotHandlers {
    dispatcher: Arc<TurnDispatcher>,
}

impl BotHandlers {
    pub fn new(dispatcher: Arc<TurnDispatcher>) -> Self {
        Self { dispatcher }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/messages - Handle one channel activity
///
/// A turn that fails is answered with an apology and the conversation's
/// dialog is dropped, so the user can start over with the next message.
pub async fn post_activity(
    State(handlers): State<BotHandlers>,
    Json(req): Json<ActivityRequest>,
) -> Response {
    let activity = match Activity::try_from(req) {
        Ok(activity) => activity,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let replies = ReplyCollector::new();
    if let Err(e) = handlers.dispatcher.handle_turn(&activity, &replies).await {
        recover_from_failed_turn(&handlers, &activity, &replies, e).await;
    }

    let response = TurnResponse {
        conversation_id: activity.conversation_id.to_string(),
        messages: replies.into_replies(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn recover_from_failed_turn(
    handlers: &BotHandlers,
    activity: &Activity,
    sink: &ReplyCollector,
    cause: TurnError,
) {
    let conversation_id = &activity.conversation_id;
    error!(conversation_id = %conversation_id, error = %cause, "Turn failed");

    if let Err(e) = sink
        .send(conversation_id, OutboundMessage::text(templates::SERVICE_APOLOGY))
        .await
    {
        warn!(conversation_id = %conversation_id, error = %e, "Failed to queue apology");
    }
    if let Err(e) = handlers.dispatcher.reset_dialog(conversation_id).await {
        warn!(conversation_id = %conversation_id, error = %e, "Failed to reset dialog");
    }
}
