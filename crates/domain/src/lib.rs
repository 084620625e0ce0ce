//! Domain layer for the Campal backend.
//!
//! This crate contains:
//! - Domain models (District, Church, Registration)
//! - Admission pricing rules
//! - Request/response DTOs shared with the API layer

pub mod models;
pub mod services;
