//! Capture device seam and the built-in synthetic source.

use crate::error::CaptureError;
use crate::frame::Frame;
use crate::settings::CaptureSettings;

/// An open capture handle for one camera.
///
/// `read_frame` is a blocking call; the manager runs it on the blocking
/// thread pool. Dropping the source releases the underlying device.
pub trait CaptureSource: Send {
    fn read_frame(&mut self) -> Result<Frame, CaptureError>;
}

/// Opens capture handles for numeric device indices.
///
/// Deployments with real hardware implement this over their driver of
/// choice (V4L2, OpenCV, vendor SDK); everything above the trait stays
/// unchanged.
pub trait CaptureBackend: Send + Sync {
    fn open(
        &self,
        device_index: u32,
        settings: &CaptureSettings,
    ) -> Result<Box<dyn CaptureSource>, CaptureError>;
}

/// Backend that fabricates frames in memory. Default for environments
/// without camera hardware; also used by the test suites.
pub struct SyntheticBackend;

impl CaptureBackend for SyntheticBackend {
    fn open(
        &self,
        device_index: u32,
        settings: &CaptureSettings,
    ) -> Result<Box<dyn CaptureSource>, CaptureError> {
        Ok(Box::new(SyntheticSource {
            device_index,
            width: settings.width,
            height: settings.height,
            tick: 0,
        }))
    }
}

/// Deterministic moving test pattern at the configured resolution.
struct SyntheticSource {
    device_index: u32,
    width: u32,
    height: u32,
    tick: u64,
}

impl CaptureSource for SyntheticSource {
    fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        self.tick = self.tick.wrapping_add(1);
        let (w, h) = (self.width as usize, self.height as usize);
        let shift = (self.tick % 256) as u8;
        let seed = self.device_index as u8;

        let mut data = vec![0u8; w * h * 3];
        for y in 0..h {
            for x in 0..w {
                let i = (y * w + x) * 3;
                data[i] = (x as u8).wrapping_add(shift);
                data[i + 1] = (y as u8).wrapping_add(shift);
                data[i + 2] = ((x + y) as u8).wrapping_add(seed);
            }
        }

        Ok(Frame {
            data,
            width: self.width,
            height: self.height,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        })
    }
}
