use antemortem_db::repositories::CameraConfigRepo;
use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use crate::state::AppState;

/// HTTP handler that upgrades `/api/camera/stream/{camera_id}` to a
/// WebSocket delivering a paced stream of binary JPEG frames.
pub async fn camera_stream_handler(
    ws: WebSocketUpgrade,
    Path(camera_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_camera(socket, state, camera_id))
}

/// Drive one camera stream after upgrade.
///
/// The camera must have an active stored configuration; otherwise the
/// socket is closed immediately with a policy-violation code (1008). A
/// capture session is started (or joined, if one is already live) and
/// frames are sent at the configured framerate until the consumer
/// disconnects or capture fails. The session is stopped on every exit
/// path.
async fn stream_camera(mut socket: WebSocket, state: AppState, camera_id: String) {
    let config = match CameraConfigRepo::find_by_camera_id(&state.pool, &camera_id).await {
        Ok(Some(config)) if config.is_active => config,
        Ok(_) => {
            tracing::warn!(camera_id = %camera_id, "Stream requested for unconfigured camera");
            close_with_policy(socket, "camera not configured").await;
            return;
        }
        Err(e) => {
            tracing::error!(camera_id = %camera_id, error = %e, "Camera config lookup failed");
            close_with_policy(socket, "camera lookup failed").await;
            return;
        }
    };

    let settings = match state.camera_manager.start(&camera_id, &config.settings).await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(camera_id = %camera_id, error = %e, "Failed to start capture session");
            close_with_policy(socket, "capture start failed").await;
            return;
        }
    };

    tracing::info!(
        camera_id = %camera_id,
        framerate = settings.framerate,
        "Camera stream started"
    );

    let mut interval = tokio::time::interval(settings.frame_interval());
    // A slow consumer should drop frames, not accumulate a backlog.
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match state.camera_manager.get_frame(&camera_id).await {
                    Ok(jpeg) => {
                        if socket.send(Message::Binary(jpeg.into())).await.is_err() {
                            tracing::debug!(camera_id = %camera_id, "Stream consumer disconnected");
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(camera_id = %camera_id, error = %e, "Frame capture failed, ending stream");
                        break;
                    }
                }
            }
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!(camera_id = %camera_id, error = %e, "Stream receive error");
                        break;
                    }
                }
            }
        }
    }

    state.camera_manager.stop(&camera_id).await;
    tracing::info!(camera_id = %camera_id, "Camera stream stopped");
}

async fn close_with_policy(mut socket: WebSocket, reason: &'static str) {
    let frame = CloseFrame {
        code: close_code::POLICY,
        reason: reason.into(),
    };
    let _ = socket.send(Message::Close(Some(frame))).await;
}
