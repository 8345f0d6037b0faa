//! # JWS payload construction
//!
//! Wraps an [`ImmunizationBundle`] in the verifiable-credential
//! envelope a SMART Health Card signs: issuer, not-before instant, the
//! fixed credential type URLs, and the `fhirVersion`/`fhirBundle`
//! credential subject.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::ImmunizationBundle;

/// FHIR release the bundle shape conforms to.
pub const FHIR_VERSION: &str = "4.0.1";

/// The credential type URLs carried by every immunization card.
pub const CREDENTIAL_TYPES: [&str; 3] = [
    "https://smarthealth.cards#health-card",
    "https://smarthealth.cards#immunization",
    "https://smarthealth.cards#covid19",
];

/// The pre-compression JWS payload of a SMART Health Card.
///
/// Serializes as `{"iss": ..., "nbf": ..., "vc": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthCardPayload {
    iss: String,
    nbf: i64,
    vc: VcClaims,
}

#[derive(Debug, Clone, Serialize)]
struct VcClaims {
    #[serde(rename = "type")]
    credential_types: [&'static str; 3],
    #[serde(rename = "credentialSubject")]
    credential_subject: CredentialSubject,
}

#[derive(Debug, Clone, Serialize)]
struct CredentialSubject {
    #[serde(rename = "fhirVersion")]
    fhir_version: &'static str,
    #[serde(rename = "fhirBundle")]
    fhir_bundle: ImmunizationBundle,
}

impl HealthCardPayload {
    /// Build the payload for `bundle`, issued by `issuer`.
    ///
    /// `issued_at` pins the `nbf` claim; `None` stamps the current
    /// time, which is the production behavior — every signing request
    /// gets a fresh timestamp.
    pub fn new(
        bundle: ImmunizationBundle,
        issuer: impl Into<String>,
        issued_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            iss: issuer.into(),
            nbf: issued_at.unwrap_or_else(Utc::now).timestamp(),
            vc: VcClaims {
                credential_types: CREDENTIAL_TYPES,
                credential_subject: CredentialSubject {
                    fhir_version: FHIR_VERSION,
                    fhir_bundle: bundle,
                },
            },
        }
    }

    /// Compact JSON bytes, ready for DEFLATE compression and signing.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::Value;

    use crate::model::{Immunization, Patient, PatientName, VaccineType};

    fn test_bundle() -> ImmunizationBundle {
        let patient = Patient {
            name: PatientName {
                family: "Salk".to_string(),
                given: vec!["Jonas".to_string()],
            },
            birth_date: NaiveDate::from_ymd_opt(1914, 10, 28).unwrap(),
        };
        let immunization = Immunization {
            date_performed: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
            performer: "MyLocalHospital".to_string(),
            lot_number: "LN01234".to_string(),
            vaccine_type: VaccineType::Pfizer,
        };
        ImmunizationBundle::new(patient, vec![immunization]).unwrap()
    }

    #[test]
    fn payload_envelope_shape() {
        let payload = HealthCardPayload::new(test_bundle(), "https://example.com", None);
        let val: Value = serde_json::to_value(&payload).unwrap();

        assert_eq!(val["iss"], "https://example.com");
        assert!(val["nbf"].is_i64());
        assert_eq!(
            val["vc"]["type"],
            serde_json::json!([
                "https://smarthealth.cards#health-card",
                "https://smarthealth.cards#immunization",
                "https://smarthealth.cards#covid19"
            ])
        );
        assert_eq!(val["vc"]["credentialSubject"]["fhirVersion"], "4.0.1");
        assert_eq!(
            val["vc"]["credentialSubject"]["fhirBundle"]["resourceType"],
            "Bundle"
        );
    }

    #[test]
    fn pinned_issued_at_lands_in_nbf() {
        let at = DateTime::from_timestamp(1_622_548_800, 0).unwrap();
        let payload = HealthCardPayload::new(test_bundle(), "https://example.com", Some(at));
        let val: Value = serde_json::to_value(&payload).unwrap();
        assert_eq!(val["nbf"], 1_622_548_800_i64);
    }

    #[test]
    fn default_nbf_is_current_time() {
        let before = Utc::now().timestamp();
        let payload = HealthCardPayload::new(test_bundle(), "https://example.com", None);
        let after = Utc::now().timestamp();
        let val: Value = serde_json::to_value(&payload).unwrap();
        let nbf = val["nbf"].as_i64().unwrap();
        assert!(nbf >= before && nbf <= after);
    }

    #[test]
    fn json_bytes_are_compact() {
        let payload = HealthCardPayload::new(test_bundle(), "https://example.com", None);
        let bytes = payload.to_json_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains('\n'));
        assert!(!text.contains(": "));
    }

    #[test]
    fn bundle_roundtrips_through_payload() {
        let payload = HealthCardPayload::new(test_bundle(), "https://example.com", None);
        let val: Value = serde_json::to_value(&payload).unwrap();
        let fhir = &val["vc"]["credentialSubject"]["fhirBundle"];
        assert_eq!(fhir["entry"][0]["resource"]["name"][0]["family"], "Salk");
        assert_eq!(fhir["entry"][0]["resource"]["birthDate"], "1914-10-28");
        assert_eq!(fhir["entry"].as_array().unwrap().len(), 2);
    }
}
