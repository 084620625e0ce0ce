//! Entity definitions (database row mappings).

pub mod church;
pub mod district;
pub mod registration;

pub use church::{ChurchEntity, ChurchWithDistrictEntity};
pub use district::DistrictEntity;
pub use registration::{
    PaymentMethodDb, PaymentStatusDb, RegistrationEntity, RegistrationStatsRow,
    RegistrationWithNamesEntity,
};
