//! # FHIR `Bundle` wire serialization
//!
//! Serializes an [`ImmunizationBundle`] as a FHIR `Bundle` resource of
//! type `collection`: entry 0 is the `Patient`, entries 1..N the
//! `Immunization` resources in dose order, each referring back to the
//! patient via the synthetic local reference `resource:0`.
//!
//! The wire shape is rigid — dedicated wire structs with serde renames
//! keep the JSON field names independent of the Rust model.

use serde::ser::Serializer;
use serde::Serialize;

use crate::model::{Immunization, ImmunizationBundle, Patient};

/// Coding system URL for CVX vaccine codes.
const CVX_SYSTEM: &str = "https://hl7.org/fhir/sid/cvx";

#[derive(Serialize)]
struct BundleWire<'a> {
    #[serde(rename = "resourceType")]
    resource_type: &'static str,
    #[serde(rename = "type")]
    bundle_type: &'static str,
    entry: Vec<EntryWire<'a>>,
}

#[derive(Serialize)]
struct EntryWire<'a> {
    #[serde(rename = "fullUrl")]
    full_url: String,
    resource: ResourceWire<'a>,
}

#[derive(Serialize)]
#[serde(tag = "resourceType")]
enum ResourceWire<'a> {
    Patient {
        name: [NameWire<'a>; 1],
        #[serde(rename = "birthDate")]
        birth_date: String,
    },
    Immunization {
        status: &'static str,
        #[serde(rename = "vaccineCode")]
        vaccine_code: VaccineCodeWire,
        patient: ReferenceWire,
        #[serde(rename = "occurrenceDateTime")]
        occurrence_date_time: String,
        performer: [PerformerWire<'a>; 1],
        #[serde(rename = "lotNumber")]
        lot_number: &'a str,
    },
}

#[derive(Serialize)]
struct NameWire<'a> {
    family: &'a str,
    given: &'a [String],
}

#[derive(Serialize)]
struct VaccineCodeWire {
    coding: [CodingWire; 1],
}

#[derive(Serialize)]
struct CodingWire {
    system: &'static str,
    code: &'static str,
}

#[derive(Serialize)]
struct ReferenceWire {
    reference: String,
}

#[derive(Serialize)]
struct PerformerWire<'a> {
    actor: ActorWire<'a>,
}

#[derive(Serialize)]
struct ActorWire<'a> {
    display: &'a str,
}

fn patient_entry(patient: &Patient) -> EntryWire<'_> {
    EntryWire {
        full_url: "resource:0".to_string(),
        resource: ResourceWire::Patient {
            name: [NameWire {
                family: &patient.name.family,
                given: &patient.name.given,
            }],
            birth_date: patient.birth_date.format("%Y-%m-%d").to_string(),
        },
    }
}

fn immunization_entry(index: usize, immunization: &Immunization) -> EntryWire<'_> {
    EntryWire {
        full_url: format!("resource:{index}"),
        resource: ResourceWire::Immunization {
            status: "completed",
            vaccine_code: VaccineCodeWire {
                coding: [CodingWire {
                    system: CVX_SYSTEM,
                    code: immunization.vaccine_type.cvx_code(),
                }],
            },
            patient: ReferenceWire {
                reference: "resource:0".to_string(),
            },
            occurrence_date_time: immunization.date_performed.format("%Y-%m-%d").to_string(),
            performer: [PerformerWire {
                actor: ActorWire {
                    display: &immunization.performer,
                },
            }],
            lot_number: &immunization.lot_number,
        },
    }
}

impl Serialize for ImmunizationBundle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut entries = Vec::with_capacity(self.immunizations().len() + 1);
        entries.push(patient_entry(self.patient()));
        for (i, immunization) in self.immunizations().iter().enumerate() {
            entries.push(immunization_entry(i + 1, immunization));
        }

        BundleWire {
            resource_type: "Bundle",
            bundle_type: "collection",
            entry: entries,
        }
        .serialize(serializer)
    }
}
