//! End-to-end ledger lifecycle against a real on-disk store: append,
//! reopen, verify, and recover from a damaged document.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use certledger::{
    BirthCertificate, CertificateKind, CorruptPolicy, LedgerConfig, LedgerError, LedgerService,
};
use chrono::NaiveDate;
use tempfile::TempDir;

fn ledger_path(dir: &TempDir) -> PathBuf {
    dir.path().join("ledger.json")
}

fn service_at(dir: &TempDir, on_corrupt: CorruptPolicy) -> LedgerService {
    LedgerService::new(LedgerConfig {
        ledger_path: ledger_path(dir),
        on_corrupt,
    })
}

fn sample_birth() -> BirthCertificate {
    BirthCertificate {
        id: 1,
        first_name: "John".into(),
        middle_name: Some("William".into()),
        last_name: Some("Doe".into()),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
        sex: "Male".into(),
        father_name: Some("Robert Doe".into()),
        mother_name: Some("Mary Doe".into()),
        registration_no: 12345,
        registration_date: NaiveDate::from_ymd_opt(1990, 6, 1).unwrap(),
        birth_place: Some("City Hospital".into()),
        municipality_id: 1,
    }
}

#[test]
fn append_survives_reopen() -> Result<()> {
    let dir = TempDir::new()?;
    {
        let service = service_at(&dir, CorruptPolicy::Reset);
        assert_eq!(service.append_certificate("h1", CertificateKind::Birth, 1)?, "h1");
        assert_eq!(service.append_certificate("h1", CertificateKind::Birth, 1)?, "h1");
        assert_eq!(service.append_certificate("h2", CertificateKind::Death, 2)?, "h2");
    }

    // A new service instance over the same file sees the same chain.
    let service = service_at(&dir, CorruptPolicy::Reset);
    let stats = service.stats()?;
    assert_eq!(stats.total_blocks, 3);
    assert_eq!(stats.birth_count, 1);
    assert_eq!(stats.death_count, 1);
    assert!(stats.is_valid);

    let hit = service.verify_fingerprint("h2")?;
    assert!(hit.is_valid && hit.exists_on_ledger);
    assert_eq!(hit.block.map(|b| b.index), Some(2));

    let miss = service.verify_fingerprint("h9")?;
    assert!(!miss.is_valid && !miss.exists_on_ledger);
    Ok(())
}

#[test]
fn verify_finds_block_deep_in_the_chain() -> Result<()> {
    let dir = TempDir::new()?;
    let service = service_at(&dir, CorruptPolicy::Reset);
    for (i, fp) in ["h1", "h2", "h3", "h4"].iter().enumerate() {
        service.append_certificate(fp, CertificateKind::Birth, i as u64 + 1)?;
    }

    let result = service.verify_fingerprint("h3")?;
    assert!(result.is_valid);
    assert_eq!(result.block.map(|b| b.index), Some(3));
    Ok(())
}

#[test]
fn certificate_round_trip_and_field_sensitivity() -> Result<()> {
    let dir = TempDir::new()?;
    let service = service_at(&dir, CorruptPolicy::Reset);

    let certificate = sample_birth();
    let fingerprint = service.append_birth(&certificate)?;
    assert_eq!(fingerprint, certificate.fingerprint());

    let result = service.verify_birth(&certificate)?;
    assert!(result.is_valid && result.exists_on_ledger);

    // One field off, and the recomputed fingerprint misses the ledger.
    let mut altered = certificate;
    altered.registration_no += 1;
    let result = service.verify_birth(&altered)?;
    assert!(!result.is_valid && !result.exists_on_ledger);
    Ok(())
}

#[test]
fn garbage_document_resets_to_genesis_silently() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(ledger_path(&dir), "not a ledger")?;

    let service = service_at(&dir, CorruptPolicy::Reset);
    let stats = service.stats()?;
    assert_eq!(stats.total_blocks, 1);
    assert!(stats.is_valid);

    // The damaged file was overwritten with the fresh chain.
    let reopened = service_at(&dir, CorruptPolicy::Fail);
    assert_eq!(reopened.stats()?.total_blocks, 1);
    Ok(())
}

#[test]
fn truncated_document_resets_to_genesis() -> Result<()> {
    let dir = TempDir::new()?;
    {
        let service = service_at(&dir, CorruptPolicy::Reset);
        service.append_certificate("h1", CertificateKind::Birth, 1)?;
        service.append_certificate("h2", CertificateKind::Death, 2)?;
    }
    let json = fs::read_to_string(ledger_path(&dir))?;
    fs::write(ledger_path(&dir), &json[..json.len() / 2])?;

    let service = service_at(&dir, CorruptPolicy::Reset);
    let stats = service.stats()?;
    assert_eq!(stats.total_blocks, 1);
    assert!(!service.verify_fingerprint("h1")?.exists_on_ledger);
    Ok(())
}

#[test]
fn corrupt_document_errors_under_fail_policy() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(ledger_path(&dir), "not a ledger")?;

    let service = service_at(&dir, CorruptPolicy::Fail);
    assert!(matches!(service.stats(), Err(LedgerError::Corrupt(_))));
    // The damaged document is left untouched for inspection.
    assert_eq!(fs::read_to_string(ledger_path(&dir))?, "not a ledger");
    Ok(())
}
