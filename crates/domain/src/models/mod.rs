//! Domain model definitions.

pub mod church;
pub mod district;
pub mod registration;

pub use church::{Church, ChurchSummary, CreateChurchRequest, ListChurchesQuery, ListChurchesResponse};
pub use district::{CreateDistrictRequest, District, ListDistrictsResponse};
pub use registration::{
    CheckinConfirmation, CheckinParticipant, CreateRegistrationRequest,
    CreateRegistrationResponse, ListRegistrationsQuery, ListRegistrationsResponse, PaymentMethod,
    PaymentStatus, Registration, RegistrationStats, RegistrationSummary, UpdatePaymentRequest,
    UpdatePaymentResponse,
};
