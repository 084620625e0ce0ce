//! Application services.

pub mod bootstrap;
pub mod report_export;
