//! # shc-fhir — FHIR immunization bundles for SMART Health Cards
//!
//! Models a patient's COVID-19 immunization record and produces the two
//! JSON documents a SMART Health Card is built from:
//!
//! - **FHIR `Bundle`** ([`ImmunizationBundle`]) — a `collection` bundle
//!   holding one `Patient` resource and one-to-three `Immunization`
//!   resources, addressed by `resource:N` local references.
//! - **JWS payload** ([`HealthCardPayload`]) — the verifiable-credential
//!   envelope (`iss`, `nbf`, `vc`) wrapping the bundle, ready for
//!   compression and signing by `shc-jws`.
//!
//! ## Invariants
//!
//! - [`VaccineType`] is a closed enumeration; the CVX mapping is total.
//!   Unknown vaccine strings are rejected at parse time and can never
//!   reach serialization.
//! - An [`ImmunizationBundle`] always holds between one and three
//!   immunizations, in caller-supplied dose order. The constructor is
//!   the only way to build one.

pub mod bundle;
pub mod model;
pub mod payload;

// Re-export primary types.
pub use model::{FhirError, Immunization, ImmunizationBundle, Patient, PatientName, VaccineType};
pub use payload::{HealthCardPayload, CREDENTIAL_TYPES, FHIR_VERSION};
