//! # Offline card issuance
//!
//! Reads a JSON immunization record, runs the signing pipeline, and
//! writes one PNG per QR chunk into the output directory. The compact
//! JWS is printed to stdout for inspection.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Deserialize;

use shc_fhir::{
    HealthCardPayload, Immunization, ImmunizationBundle, Patient, PatientName, VaccineType,
};
use shc_jws::{sign_and_serialize, Es256KeyPair};

use crate::{ISSUER_ENV, SIGNING_KEY_ENV};

/// Arguments for `shc issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Path to the JSON immunization record.
    #[arg(long)]
    pub input: PathBuf,

    /// Directory to write the QR PNG file(s) into.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Issuer URL embedded in the card. Falls back to $SHC_ISSUER.
    #[arg(long)]
    pub issuer: Option<String>,
}

/// A JSON immunization record, as read from `--input`.
#[derive(Debug, Deserialize)]
pub struct RecordFile {
    pub patient: PatientRecord,
    pub immunizations: Vec<DoseRecord>,
}

#[derive(Debug, Deserialize)]
pub struct PatientRecord {
    pub family_name: String,
    pub given_names: Vec<String>,
    pub birth_date: chrono::NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct DoseRecord {
    pub date: chrono::NaiveDate,
    pub performer: String,
    pub lot_number: String,
    pub vaccine_type: VaccineType,
}

impl RecordFile {
    fn into_bundle(self) -> anyhow::Result<ImmunizationBundle> {
        let patient = Patient {
            name: PatientName {
                family: self.patient.family_name,
                given: self.patient.given_names,
            },
            birth_date: self.patient.birth_date,
        };

        let immunizations = self
            .immunizations
            .into_iter()
            .map(|dose| Immunization {
                date_performed: dose.date,
                performer: dose.performer,
                lot_number: dose.lot_number,
                vaccine_type: dose.vaccine_type,
            })
            .collect();

        ImmunizationBundle::new(patient, immunizations).context("invalid immunization record")
    }
}

/// Run the pipeline for a parsed record and write the PNG files.
///
/// Returns the written paths, in chunk order.
pub fn issue_record(
    record: RecordFile,
    key: &Es256KeyPair,
    issuer: &str,
    out_dir: &Path,
) -> anyhow::Result<(String, Vec<PathBuf>)> {
    let bundle = record.into_bundle()?;
    let payload = HealthCardPayload::new(bundle, issuer, None);
    let payload_bytes = payload.to_json_bytes().context("payload serialization")?;

    let jws = sign_and_serialize(&payload_bytes, key).context("signing")?;
    let chunks = shc_qr::encode(&jws).context("chunk encoding")?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        let png = shc_qr::render_png(&chunk.payload).context("QR rendering")?;
        let path = out_dir.join(format!("{}.png", chunk.index));
        std::fs::write(&path, png)
            .with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }

    tracing::info!(
        chunks = written.len(),
        out_dir = %out_dir.display(),
        "issued health card"
    );
    Ok((jws, written))
}

/// Load inputs from disk and environment, then issue.
pub fn run_issue(args: &IssueArgs) -> anyhow::Result<u8> {
    let key = Es256KeyPair::from_env(SIGNING_KEY_ENV)?;

    let issuer = match &args.issuer {
        Some(issuer) => issuer.clone(),
        None => std::env::var(ISSUER_ENV)
            .with_context(|| format!("--issuer not given and {ISSUER_ENV} not set"))?,
    };

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let record: RecordFile =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", args.input.display()))?;

    let (jws, written) = issue_record(record, &key, &issuer, &args.out)?;
    println!("{jws}");
    for path in &written {
        eprintln!("wrote {}", path.display());
    }

    Ok(0)
}
