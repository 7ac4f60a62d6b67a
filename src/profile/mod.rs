pub mod model;
pub mod patch;

pub use model::{
    BankDetail, Insurance, Profile, Tax, DEFAULT_COUNTRY, DEFAULT_DISABILITY,
    DEFAULT_PAYMENT_METHOD,
};
pub use patch::{BankDetailPatch, FormSection, InsurancePatch, ProfilePatch, TaxPatch};
