//! # Web-form extraction and validation
//!
//! Turns the issuance form into a validated [`ImmunizationBundle`] or a
//! descriptive client fault. Rules: the patient and the entire first
//! immunization are required; the second immunization is all-or-nothing;
//! the third may only accompany a second and is itself all-or-nothing.
//! All values are trimmed before the emptiness checks.

use chrono::NaiveDate;
use serde::Deserialize;

use shc_fhir::{Immunization, ImmunizationBundle, Patient, PatientName, VaccineType};

use crate::error::AppError;

/// The raw issuance form. Every field is optional at the HTTP layer;
/// validation decides what is actually required.
#[derive(Debug, Default, Deserialize)]
pub struct IssueForm {
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub given_names: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,

    #[serde(default)]
    pub first_immunization_performer: Option<String>,
    #[serde(default)]
    pub first_immunization_lot_number: Option<String>,
    #[serde(default)]
    pub first_immunization_vaccine_type: Option<String>,
    #[serde(default)]
    pub first_immunization_date: Option<String>,

    #[serde(default)]
    pub second_immunization_performer: Option<String>,
    #[serde(default)]
    pub second_immunization_lot_number: Option<String>,
    #[serde(default)]
    pub second_immunization_vaccine_type: Option<String>,
    #[serde(default)]
    pub second_immunization_date: Option<String>,

    #[serde(default)]
    pub third_immunization_performer: Option<String>,
    #[serde(default)]
    pub third_immunization_lot_number: Option<String>,
    #[serde(default)]
    pub third_immunization_vaccine_type: Option<String>,
    #[serde(default)]
    pub third_immunization_date: Option<String>,
}

/// One dose's worth of trimmed form fields.
struct DoseFields<'a> {
    performer: &'a str,
    lot_number: &'a str,
    vaccine_type: &'a str,
    date: &'a str,
}

impl DoseFields<'_> {
    fn any_present(&self) -> bool {
        !self.performer.is_empty()
            || !self.lot_number.is_empty()
            || !self.vaccine_type.is_empty()
            || !self.date.is_empty()
    }

    fn all_present(&self) -> bool {
        !self.performer.is_empty()
            && !self.lot_number.is_empty()
            && !self.vaccine_type.is_empty()
            && !self.date.is_empty()
    }
}

fn trimmed(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or("")
}

fn parse_dose(ordinal: &str, fields: &DoseFields<'_>) -> Result<Immunization, AppError> {
    let date = NaiveDate::parse_from_str(fields.date, "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!("invalid {ordinal} immunization date"))
    })?;

    let vaccine_type: VaccineType = fields.vaccine_type.parse().map_err(|_| {
        AppError::Validation(format!("invalid {ordinal} immunization vaccine type"))
    })?;

    Ok(Immunization {
        date_performed: date,
        performer: fields.performer.to_string(),
        lot_number: fields.lot_number.to_string(),
        vaccine_type,
    })
}

/// Validate the form and build the immunization bundle.
pub fn parse(form: &IssueForm) -> Result<ImmunizationBundle, AppError> {
    let family_name = trimmed(&form.family_name);
    let given_names = trimmed(&form.given_names);
    let birth_date = trimmed(&form.date_of_birth);

    let first = DoseFields {
        performer: trimmed(&form.first_immunization_performer),
        lot_number: trimmed(&form.first_immunization_lot_number),
        vaccine_type: trimmed(&form.first_immunization_vaccine_type),
        date: trimmed(&form.first_immunization_date),
    };
    let second = DoseFields {
        performer: trimmed(&form.second_immunization_performer),
        lot_number: trimmed(&form.second_immunization_lot_number),
        vaccine_type: trimmed(&form.second_immunization_vaccine_type),
        date: trimmed(&form.second_immunization_date),
    };
    let third = DoseFields {
        performer: trimmed(&form.third_immunization_performer),
        lot_number: trimmed(&form.third_immunization_lot_number),
        vaccine_type: trimmed(&form.third_immunization_vaccine_type),
        date: trimmed(&form.third_immunization_date),
    };

    if family_name.is_empty()
        || given_names.is_empty()
        || birth_date.is_empty()
        || !first.all_present()
    {
        return Err(AppError::Validation(
            "patient information or first immunization information missing".to_string(),
        ));
    }

    if second.any_present() && !second.all_present() {
        return Err(AppError::Validation(
            "second immunization information only partially complete".to_string(),
        ));
    }

    if third.any_present() && !second.any_present() {
        return Err(AppError::Validation(
            "third immunization information provided while second immunization is blank"
                .to_string(),
        ));
    }

    if third.any_present() && !third.all_present() {
        return Err(AppError::Validation(
            "third immunization information only partially complete".to_string(),
        ));
    }

    let birth_date = NaiveDate::parse_from_str(birth_date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("invalid patient birth date".to_string()))?;

    let patient = Patient {
        name: PatientName {
            family: family_name.to_string(),
            given: given_names.split_whitespace().map(str::to_string).collect(),
        },
        birth_date,
    };

    let mut immunizations = vec![parse_dose("first", &first)?];
    if second.any_present() {
        immunizations.push(parse_dose("second", &second)?);
    }
    if third.any_present() {
        immunizations.push(parse_dose("third", &third)?);
    }

    Ok(ImmunizationBundle::new(patient, immunizations)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_form() -> IssueForm {
        IssueForm {
            family_name: Some("Salk".to_string()),
            given_names: Some("Jonas".to_string()),
            date_of_birth: Some("1914-10-28".to_string()),
            first_immunization_performer: Some("MyLocalHospital".to_string()),
            first_immunization_lot_number: Some("LN01234".to_string()),
            first_immunization_vaccine_type: Some("Pfizer".to_string()),
            first_immunization_date: Some("2021-06-01".to_string()),
            ..Default::default()
        }
    }

    fn with_second(mut form: IssueForm) -> IssueForm {
        form.second_immunization_performer = Some("MyLocalHospital".to_string());
        form.second_immunization_lot_number = Some("LN05678".to_string());
        form.second_immunization_vaccine_type = Some("Pfizer".to_string());
        form.second_immunization_date = Some("2021-06-22".to_string());
        form
    }

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn minimal_valid_form_parses() {
        let bundle = parse(&full_form()).unwrap();
        assert_eq!(bundle.patient().name.family, "Salk");
        assert_eq!(bundle.immunizations().len(), 1);
    }

    #[test]
    fn missing_patient_field_is_rejected() {
        let mut form = full_form();
        form.family_name = None;
        let msg = validation_message(parse(&form).unwrap_err());
        assert!(msg.contains("patient information or first immunization"));
    }

    #[test]
    fn missing_first_dose_field_is_rejected() {
        let mut form = full_form();
        form.first_immunization_lot_number = Some("   ".to_string());
        let msg = validation_message(parse(&form).unwrap_err());
        assert!(msg.contains("first immunization information missing"));
    }

    #[test]
    fn fields_are_trimmed() {
        let mut form = full_form();
        form.family_name = Some("  Salk  ".to_string());
        form.given_names = Some("  Jonas  Edward ".to_string());
        let bundle = parse(&form).unwrap();
        assert_eq!(bundle.patient().name.family, "Salk");
        assert_eq!(
            bundle.patient().name.given,
            vec!["Jonas".to_string(), "Edward".to_string()]
        );
    }

    #[test]
    fn partial_second_dose_is_rejected() {
        let mut form = full_form();
        form.second_immunization_performer = Some("SomeClinic".to_string());
        let msg = validation_message(parse(&form).unwrap_err());
        assert!(msg.contains("second immunization information only partially complete"));
    }

    #[test]
    fn complete_second_dose_is_accepted() {
        let bundle = parse(&with_second(full_form())).unwrap();
        assert_eq!(bundle.immunizations().len(), 2);
        assert_eq!(bundle.immunizations()[1].lot_number, "LN05678");
    }

    #[test]
    fn third_dose_without_second_is_rejected() {
        let mut form = full_form();
        form.third_immunization_performer = Some("SomeClinic".to_string());
        form.third_immunization_lot_number = Some("LN9".to_string());
        form.third_immunization_vaccine_type = Some("Pfizer".to_string());
        form.third_immunization_date = Some("2021-12-01".to_string());
        let msg = validation_message(parse(&form).unwrap_err());
        assert!(msg.contains("while second immunization is blank"));
    }

    #[test]
    fn partial_third_dose_is_rejected() {
        let mut form = with_second(full_form());
        form.third_immunization_performer = Some("SomeClinic".to_string());
        let msg = validation_message(parse(&form).unwrap_err());
        assert!(msg.contains("third immunization information only partially complete"));
    }

    #[test]
    fn three_complete_doses_are_accepted() {
        let mut form = with_second(full_form());
        form.third_immunization_performer = Some("SomeClinic".to_string());
        form.third_immunization_lot_number = Some("LN9".to_string());
        form.third_immunization_vaccine_type = Some("Moderna".to_string());
        form.third_immunization_date = Some("2021-12-01".to_string());
        let bundle = parse(&form).unwrap();
        assert_eq!(bundle.immunizations().len(), 3);
        assert_eq!(
            bundle.immunizations()[2].vaccine_type,
            shc_fhir::VaccineType::Moderna
        );
    }

    #[test]
    fn bad_birth_date_is_rejected() {
        let mut form = full_form();
        form.date_of_birth = Some("28/10/1914".to_string());
        let msg = validation_message(parse(&form).unwrap_err());
        assert_eq!(msg, "invalid patient birth date");
    }

    #[test]
    fn bad_dose_date_is_rejected_with_ordinal() {
        let mut form = with_second(full_form());
        form.second_immunization_date = Some("June 22".to_string());
        let msg = validation_message(parse(&form).unwrap_err());
        assert_eq!(msg, "invalid second immunization date");
    }

    #[test]
    fn unknown_vaccine_type_is_rejected_with_ordinal() {
        let mut form = full_form();
        form.first_immunization_vaccine_type = Some("Sputnik".to_string());
        let msg = validation_message(parse(&form).unwrap_err());
        assert_eq!(msg, "invalid first immunization vaccine type");
    }
}
