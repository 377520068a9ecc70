use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::sync::watch;
use tracing::{debug, warn};

use common::{Error, ZeroLagMacdParams};

use super::api::{error_body, IndicatorResponse, ParamsOverride};
use crate::AppState;

pub fn ws_router() -> Router<AppState> {
    Router::new().route("/ws/zlmacd", get(ws_zlmacd_handler))
}

/// Latest request received from the client.
#[derive(Debug, Clone)]
enum Pending {
    Compute(ZeroLagMacdParams),
    Reject(String),
}

/// WebSocket endpoint for interactive tuning.
///
/// Each text frame is a (partial) parameter object; each reply is the full
/// indicator response or `{ "error": .. }`. The session computes once on
/// connect with the server defaults.
async fn ws_zlmacd_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    // Only the most recent request is kept; older ones are overwritten.
    let (pending_tx, mut pending_rx) = watch::channel::<Option<Pending>>(None);
    let _ = pending_tx.send(Some(Pending::Compute(state.defaults)));

    let defaults = state.defaults;
    let reader = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            let pending = match msg {
                Message::Text(text) => match serde_json::from_str::<ParamsOverride>(&text) {
                    Ok(overrides) => Pending::Compute(overrides.apply(defaults)),
                    Err(e) => Pending::Reject(format!("invalid parameters: {e}")),
                },
                Message::Close(_) => break,
                _ => continue,
            };
            if pending_tx.send(Some(pending)).is_err() {
                break;
            }
        }
    });

    while pending_rx.changed().await.is_ok() {
        let latest = pending_rx.borrow_and_update().clone();
        let Some(pending) = latest else {
            continue;
        };

        let reply = match pending {
            Pending::Reject(reason) => json!({ "error": reason }),
            Pending::Compute(params) => {
                let result = compute(&state, params).await;
                if pending_rx.has_changed().unwrap_or(false) {
                    debug!("Discarding superseded indicator computation");
                    continue;
                }
                result
            }
        };

        if sender.send(Message::Text(reply.to_string())).await.is_err() {
            break;
        }
    }

    reader.abort();
}

async fn compute(state: &AppState, params: ZeroLagMacdParams) -> Value {
    let samples = match state.source.load().await {
        Ok(samples) => samples,
        Err(e) => {
            warn!(error = %e, "WebSocket price source failed");
            return error_body(&e);
        }
    };

    let joined =
        tokio::task::spawn_blocking(move || IndicatorResponse::compute(&samples, params)).await;

    match joined {
        Ok(Ok(response)) => serde_json::to_value(response)
            .unwrap_or_else(|e| error_body(&Error::Json(e))),
        Ok(Err(e)) => {
            warn!(error = %e, "WebSocket indicator request rejected");
            error_body(&e)
        }
        Err(e) => error_body(&Error::Other(format!("indicator task failed: {e}"))),
    }
}
