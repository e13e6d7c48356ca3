//! Parsing of stored camera settings into typed capture parameters.

use std::time::Duration;

use crate::error::CaptureError;

/// Typed capture parameters extracted from a camera's settings JSON.
///
/// The settings object must carry `resolution` as `"WIDTHxHEIGHT"` and a
/// positive integer `framerate`; any extra keys are ignored here and pass
/// through storage untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSettings {
    pub width: u32,
    pub height: u32,
    pub framerate: u32,
}

impl CaptureSettings {
    /// Parse capture parameters out of a settings JSON object.
    pub fn parse(settings: &serde_json::Value) -> Result<Self, CaptureError> {
        let resolution = settings
            .get("resolution")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| CaptureError::InvalidSettings("missing 'resolution'".to_string()))?;

        let (width, height) = resolution.split_once('x').ok_or_else(|| {
            CaptureError::InvalidSettings(format!(
                "resolution '{resolution}' is not WIDTHxHEIGHT"
            ))
        })?;

        let width: u32 = width.trim().parse().map_err(|_| {
            CaptureError::InvalidSettings(format!("invalid resolution width '{width}'"))
        })?;
        let height: u32 = height.trim().parse().map_err(|_| {
            CaptureError::InvalidSettings(format!("invalid resolution height '{height}'"))
        })?;
        if width == 0 || height == 0 {
            return Err(CaptureError::InvalidSettings(
                "resolution dimensions must be positive".to_string(),
            ));
        }

        let framerate = settings
            .get("framerate")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| {
                CaptureError::InvalidSettings("missing or non-integer 'framerate'".to_string())
            })?;
        let framerate = u32::try_from(framerate).map_err(|_| {
            CaptureError::InvalidSettings(format!("framerate {framerate} out of range"))
        })?;
        if framerate == 0 {
            return Err(CaptureError::InvalidSettings(
                "framerate must be positive".to_string(),
            ));
        }

        Ok(Self {
            width,
            height,
            framerate,
        })
    }

    /// Pacing interval between frames at the configured framerate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.framerate))
    }
}
