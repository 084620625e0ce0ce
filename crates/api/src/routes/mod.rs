//! HTTP route handlers.

pub mod checkin;
pub mod churches;
pub mod districts;
pub mod health;
pub mod registrations;
pub mod reports;
