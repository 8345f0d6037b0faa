//! # Immunization record model
//!
//! In-memory representation of a patient and their COVID-19
//! immunization events. These types are constructed from externally
//! validated input, are immutable afterwards, and are serialized
//! exactly once per signing request (see [`crate::bundle`]).

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from record construction and vaccine-type parsing.
#[derive(Error, Debug)]
pub enum FhirError {
    /// The vaccine type string is not in the supported set.
    #[error("unsupported vaccine type: {0}")]
    UnknownVaccineType(String),

    /// A bundle must contain at least one immunization.
    #[error("bundle must contain at least one immunization")]
    NoImmunizations,

    /// A bundle holds first, second, and third doses at most.
    #[error("bundle holds at most 3 immunizations, got {0}")]
    TooManyImmunizations(usize),
}

/// The supported COVID-19 vaccine products.
///
/// Serde renames match the wire strings accepted from web forms and
/// issuance requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaccineType {
    Pfizer,
    Moderna,
    JohnsonAndJohnson,
    AstraZeneca,
    Sinopharm,
    #[serde(rename = "COVAXIN")]
    Covaxin,
}

impl VaccineType {
    /// The CDC CVX code identifying this vaccine product.
    ///
    /// The mapping is total over the enum, so a card can never be
    /// issued with an unmapped product.
    pub fn cvx_code(&self) -> &'static str {
        match self {
            VaccineType::Pfizer => "208",
            VaccineType::Moderna => "207",
            VaccineType::JohnsonAndJohnson => "212",
            VaccineType::AstraZeneca => "210",
            VaccineType::Sinopharm => "510",
            VaccineType::Covaxin => "502",
        }
    }
}

impl FromStr for VaccineType {
    type Err = FhirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pfizer" => Ok(VaccineType::Pfizer),
            "Moderna" => Ok(VaccineType::Moderna),
            "JohnsonAndJohnson" => Ok(VaccineType::JohnsonAndJohnson),
            "AstraZeneca" => Ok(VaccineType::AstraZeneca),
            "Sinopharm" => Ok(VaccineType::Sinopharm),
            "COVAXIN" => Ok(VaccineType::Covaxin),
            other => Err(FhirError::UnknownVaccineType(other.to_string())),
        }
    }
}

impl std::fmt::Display for VaccineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaccineType::Pfizer => write!(f, "Pfizer"),
            VaccineType::Moderna => write!(f, "Moderna"),
            VaccineType::JohnsonAndJohnson => write!(f, "JohnsonAndJohnson"),
            VaccineType::AstraZeneca => write!(f, "AstraZeneca"),
            VaccineType::Sinopharm => write!(f, "Sinopharm"),
            VaccineType::Covaxin => write!(f, "COVAXIN"),
        }
    }
}

/// A patient's name: family name plus one or more given names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientName {
    /// Family (last) name.
    pub family: String,
    /// Given names, in order.
    pub given: Vec<String>,
}

/// An individual who has received immunizations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    /// The patient's name.
    pub name: PatientName,
    /// Date of birth (calendar date, no time component).
    pub birth_date: NaiveDate,
}

/// One COVID-19 immunization performed on a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Immunization {
    /// The date the dose was administered.
    pub date_performed: NaiveDate,
    /// The administering entity, e.g. a hospital or clinic.
    pub performer: String,
    /// Lot number of the administered vaccine batch.
    pub lot_number: String,
    /// The vaccine product.
    pub vaccine_type: VaccineType,
}

/// One patient plus their ordered immunization events (first dose
/// first). Always holds between one and three events.
///
/// Built once per signing request from validated input; immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImmunizationBundle {
    patient: Patient,
    immunizations: Vec<Immunization>,
}

impl ImmunizationBundle {
    /// Construct a bundle, enforcing the one-to-three dose invariant.
    ///
    /// The immunization order is preserved as given.
    pub fn new(patient: Patient, immunizations: Vec<Immunization>) -> Result<Self, FhirError> {
        if immunizations.is_empty() {
            return Err(FhirError::NoImmunizations);
        }
        if immunizations.len() > 3 {
            return Err(FhirError::TooManyImmunizations(immunizations.len()));
        }
        Ok(Self {
            patient,
            immunizations,
        })
    }

    /// The patient this bundle describes.
    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    /// The immunization events, in dose order.
    pub fn immunizations(&self) -> &[Immunization] {
        &self.immunizations
    }
}
