//! Certificate records as they arrive from the registration workflow.
//!
//! Only the identifying fields that feed the fingerprint live here; the
//! authoritative record is the civil registry database row, keyed by `id`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::crypto::sha256_hex;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BirthCertificate {
    /// Registry row id of the certificate.
    pub id: u64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: NaiveDate,
    pub sex: String,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub registration_no: u64,
    pub registration_date: NaiveDate,
    pub birth_place: Option<String>,
    pub municipality_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeathCertificate {
    /// Registry row id of the certificate.
    pub id: u64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_death: NaiveDate,
    pub sex: String,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub registration_no: u64,
    pub registration_date: NaiveDate,
    pub death_place: Option<String>,
    pub municipality_id: u64,
}

impl BirthCertificate {
    /// Deterministic fingerprint over the identifying fields, in fixed
    /// order. Missing optional fields render as the empty string, dates as
    /// `YYYY-MM-DD`. Two certificates agreeing on every contributing field
    /// fingerprint identically and count as one ledger entry.
    pub fn fingerprint(&self) -> String {
        let data = format!(
            "{}{}{}{}{}{}{}{}{}{}{}",
            self.first_name,
            opt(&self.middle_name),
            opt(&self.last_name),
            self.date_of_birth.format("%Y-%m-%d"),
            self.sex,
            opt(&self.father_name),
            opt(&self.mother_name),
            self.registration_no,
            self.registration_date.format("%Y-%m-%d"),
            opt(&self.birth_place),
            self.municipality_id,
        );
        sha256_hex(data.as_bytes())
    }
}

impl DeathCertificate {
    /// Same derivation as [`BirthCertificate::fingerprint`], with the death
    /// date and place contributing instead. The Birth/Death tag travels
    /// next to the fingerprint on the ledger, never inside the digest.
    pub fn fingerprint(&self) -> String {
        let data = format!(
            "{}{}{}{}{}{}{}{}{}{}{}",
            self.first_name,
            opt(&self.middle_name),
            opt(&self.last_name),
            self.date_of_death.format("%Y-%m-%d"),
            self.sex,
            opt(&self.father_name),
            opt(&self.mother_name),
            self.registration_no,
            self.registration_date.format("%Y-%m-%d"),
            opt(&self.death_place),
            self.municipality_id,
        );
        sha256_hex(data.as_bytes())
    }
}

fn opt(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}
