//! Request handlers, grouped by resource.

pub mod camera;
pub mod detection;
pub mod image;
pub mod inspection;
