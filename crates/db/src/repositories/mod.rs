//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&DbPool` as the first argument. Missing rows surface as
//! `Ok(None)` (or `Ok(false)` for delete-style operations), never as
//! errors.

pub mod camera_config_repo;
pub mod detection_repo;
pub mod image_repo;
pub mod inspection_repo;

pub use camera_config_repo::CameraConfigRepo;
pub use detection_repo::DetectionRepo;
pub use image_repo::ImageRepo;
pub use inspection_repo::InspectionRepo;
