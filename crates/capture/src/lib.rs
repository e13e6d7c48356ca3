//! Camera session management for the antemortem inspection backend.
//!
//! A [`CameraManager`] owns every open capture handle and serializes access
//! per camera. The actual device layer sits behind the [`CaptureBackend`] /
//! [`CaptureSource`] traits so deployments can plug in a real driver; the
//! default [`SyntheticBackend`] produces a deterministic test pattern and
//! needs no hardware.

pub mod error;
pub mod frame;
pub mod manager;
pub mod settings;
pub mod source;

pub use error::CaptureError;
pub use frame::{encode_jpeg, Frame};
pub use manager::CameraManager;
pub use settings::CaptureSettings;
pub use source::{CaptureBackend, CaptureSource, SyntheticBackend};
