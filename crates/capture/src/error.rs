/// Errors surfaced by the capture layer.
///
/// `Timeout` is deliberately distinct from `Failure`: a timed-out read says
/// nothing about the device, only that the deadline passed while waiting
/// for the per-camera slot or the read itself.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Invalid camera settings: {0}")]
    InvalidSettings(String),

    #[error("Camera not active: {0}")]
    NotActive(String),

    #[error("Frame capture failed: {0}")]
    Failure(String),

    #[error("Frame capture timed out")]
    Timeout,
}
