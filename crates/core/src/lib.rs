//! Shared domain types for the antemortem inspection backend.
//!
//! Everything here is storage- and transport-agnostic: primitive aliases,
//! the domain error enum, inspection status values, and the lesion
//! detection domain (findings, settings, detector strategy seam).

pub mod detection;
pub mod error;
pub mod inspection;
pub mod types;
