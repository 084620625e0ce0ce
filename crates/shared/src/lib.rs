//! Shared utilities and common types for the Campal backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Check-in token generation
//! - Common validation logic (names, birth dates, ages)
//! - Offset pagination helpers

pub mod pagination;
pub mod token;
pub mod validation;
