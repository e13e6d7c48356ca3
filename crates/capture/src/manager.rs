//! Camera session registry and frame access.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tokio::time::timeout;

use crate::error::CaptureError;
use crate::frame::encode_jpeg;
use crate::settings::CaptureSettings;
use crate::source::{CaptureBackend, CaptureSource};

/// Default deadline for acquiring the per-camera slot or completing a read.
const DEFAULT_READ_TIMEOUT_MS: u64 = 5000;

/// JPEG quality for encoded frames.
const JPEG_QUALITY: u8 = 80;

/// An open capture session for one camera.
struct CameraSession {
    source: Arc<Mutex<Box<dyn CaptureSource>>>,
    settings: CaptureSettings,
    opened_at: Instant,
}

/// Owns every open capture handle and serializes access per camera.
///
/// Thread-safe via interior locks; designed to be wrapped in `Arc` and
/// shared across the application. The registry lock is held only for map
/// bookkeeping; frame reads serialize on a per-session mutex so one slow
/// camera cannot stall the others.
pub struct CameraManager {
    sessions: RwLock<HashMap<String, CameraSession>>,
    backend: Box<dyn CaptureBackend>,
    read_timeout: Duration,
}

impl CameraManager {
    /// Create a manager over the given backend with the default read timeout.
    pub fn new(backend: Box<dyn CaptureBackend>) -> Self {
        Self::with_read_timeout(backend, Duration::from_millis(DEFAULT_READ_TIMEOUT_MS))
    }

    /// Create a manager with an explicit read timeout.
    pub fn with_read_timeout(backend: Box<dyn CaptureBackend>, read_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            backend,
            read_timeout,
        }
    }

    /// Start a capture session for a camera.
    ///
    /// No-op if the camera is already active; the active session's settings
    /// are returned unchanged in that case. Otherwise the settings JSON is
    /// parsed, the camera id is interpreted as a numeric device index, and
    /// the backend opens a capture handle which is registered in the
    /// session map.
    pub async fn start(
        &self,
        camera_id: &str,
        settings: &serde_json::Value,
    ) -> Result<CaptureSettings, CaptureError> {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get(camera_id) {
            tracing::debug!(camera_id = %camera_id, "Capture session already active");
            return Ok(session.settings);
        }

        let parsed = CaptureSettings::parse(settings)?;
        let device_index = device_index(camera_id)?;
        let source = self.backend.open(device_index, &parsed)?;

        sessions.insert(
            camera_id.to_string(),
            CameraSession {
                source: Arc::new(Mutex::new(source)),
                settings: parsed,
                opened_at: Instant::now(),
            },
        );
        tracing::info!(
            camera_id = %camera_id,
            width = parsed.width,
            height = parsed.height,
            framerate = parsed.framerate,
            "Capture session started"
        );
        Ok(parsed)
    }

    /// Stop a capture session. No-op if the camera is not active.
    ///
    /// The device handle is released when the last reference to the source
    /// drops, which an in-flight read may briefly delay.
    pub async fn stop(&self, camera_id: &str) {
        let removed = self.sessions.write().await.remove(camera_id);
        if let Some(session) = removed {
            tracing::info!(
                camera_id = %camera_id,
                session_secs = session.opened_at.elapsed().as_secs(),
                "Capture session stopped"
            );
        }
    }

    /// Stop every capture session. Used during shutdown.
    pub async fn stop_all(&self) {
        let mut sessions = self.sessions.write().await;
        let count = sessions.len();
        sessions.clear();
        if count > 0 {
            tracing::info!(count, "Stopped all capture sessions");
        }
    }

    /// Capture a single frame from an active camera, JPEG-encoded.
    ///
    /// Reads serialize on the per-camera slot. Waiting longer than the read
    /// timeout, for the slot or for the read itself, surfaces as
    /// [`CaptureError::Timeout`]. A read that overruns the deadline keeps
    /// its slot until it returns, so follow-up calls time out rather than
    /// doubling up on the device.
    pub async fn get_frame(&self, camera_id: &str) -> Result<Vec<u8>, CaptureError> {
        let source = {
            let sessions = self.sessions.read().await;
            let session = sessions
                .get(camera_id)
                .ok_or_else(|| CaptureError::NotActive(camera_id.to_string()))?;
            Arc::clone(&session.source)
        };

        let guard = timeout(self.read_timeout, source.lock_owned())
            .await
            .map_err(|_| {
                tracing::warn!(camera_id = %camera_id, "Timed out waiting for capture slot");
                CaptureError::Timeout
            })?;

        let read = tokio::task::spawn_blocking(move || {
            let mut source = guard;
            let frame = source.read_frame()?;
            encode_jpeg(&frame, JPEG_QUALITY)
        });

        match timeout(self.read_timeout, read).await {
            Err(_) => {
                tracing::warn!(camera_id = %camera_id, "Frame read timed out");
                Err(CaptureError::Timeout)
            }
            Ok(Err(join_err)) => Err(CaptureError::Failure(format!(
                "capture task failed: {join_err}"
            ))),
            Ok(Ok(result)) => result,
        }
    }

    /// Whether a capture session is currently open for the camera.
    pub async fn is_active(&self, camera_id: &str) -> bool {
        self.sessions.read().await.contains_key(camera_id)
    }

    /// Number of currently open capture sessions.
    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Interpret a camera id as a numeric device index.
fn device_index(camera_id: &str) -> Result<u32, CaptureError> {
    camera_id.parse().map_err(|_| {
        CaptureError::InvalidSettings(format!(
            "camera id '{camera_id}' is not a numeric device index"
        ))
    })
}
