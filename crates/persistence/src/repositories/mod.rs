//! Repository implementations for database operations.

pub mod church;
pub mod district;
pub mod registration;

pub use church::ChurchRepository;
pub use district::DistrictRepository;
pub use registration::{RegistrationFilter, RegistrationRepository};
