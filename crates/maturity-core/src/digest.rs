//! # Report Digest
//!
//! Deterministic fingerprint of an [`AssessmentReport`].
//!
//! The report is serialized to a canonical `postcard` byte stream (all
//! collections are ordered vectors, so the bytes are stable) and folded into
//! a 64-bit checksum. Two passes over unchanged inputs produce the same
//! digest, which is how callers verify that a pass was side-effect free.

use crate::{AssessmentReport, MaturityError};

/// Magic bytes prefixed to the canonical report stream.
pub const DIGEST_MAGIC: [u8; 4] = *b"MTRX";

/// Canonical report format version.
pub const DIGEST_VERSION: u8 = 1;

/// Canonical bytes of a report: `[magic] [version] [postcard(report)]`.
///
/// # Errors
///
/// Returns `MaturityError::SerializationError` if serialization fails.
pub fn canonical_report_bytes(report: &AssessmentReport) -> Result<Vec<u8>, MaturityError> {
    let body = postcard::to_allocvec(report)
        .map_err(|e| MaturityError::SerializationError(format!("Report: {}", e)))?;

    let mut bytes = Vec::with_capacity(DIGEST_MAGIC.len() + 1 + body.len());
    bytes.extend_from_slice(&DIGEST_MAGIC);
    bytes.push(DIGEST_VERSION);
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Fold bytes into a 64-bit checksum.
///
/// Position-sensitive XOR-rotate mixing. Not cryptographic: it detects
/// accidental differences between passes, not tampering.
#[must_use]
pub fn checksum_bytes(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        hash = hash.rotate_left(5) ^ (*byte as u64).rotate_left((i % 64) as u32);
    }
    hash ^= (bytes.len() as u64).rotate_left(3);
    hash
}

/// Checksum of a report's canonical bytes.
///
/// # Errors
///
/// Returns `MaturityError::SerializationError` if serialization fails.
pub fn report_checksum(report: &AssessmentReport) -> Result<u64, MaturityError> {
    canonical_report_bytes(report).map(|bytes| checksum_bytes(&bytes))
}

/// BLAKE3 hex digest of a report's canonical bytes.
///
/// # Requires
///
/// This function is only available with the `crypto-hash` feature enabled.
#[cfg(feature = "crypto-hash")]
pub fn report_crypto_hash(report: &AssessmentReport) -> Result<String, MaturityError> {
    let bytes = canonical_report_bytes(report)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AssessableItem, AssessmentRecords, AssessmentResponse, AssessmentSnapshot, Function,
        FunctionId, ImplementationStatus, ItemId, MaturityStage, Pillar, PillarId,
    };

    fn snapshot(status: ImplementationStatus) -> AssessmentSnapshot {
        AssessmentSnapshot::new(
            vec![Pillar::new(PillarId(1), "Visibility")],
            vec![Function::new(FunctionId(1), PillarId(1), "Logging")],
            AssessmentRecords::Flat {
                items: vec![AssessableItem::new(
                    ItemId(1),
                    FunctionId(1),
                    MaturityStage::Traditional,
                )],
                responses: vec![AssessmentResponse::new(ItemId(1), status)],
            },
        )
    }

    #[test]
    fn canonical_bytes_carry_header() {
        let report = snapshot(ImplementationStatus::FullyImplemented).report();
        let bytes = canonical_report_bytes(&report).expect("bytes");
        assert_eq!(&bytes[..4], &DIGEST_MAGIC);
        assert_eq!(bytes[4], DIGEST_VERSION);
    }

    #[test]
    fn checksum_is_deterministic() {
        let snapshot = snapshot(ImplementationStatus::FullyImplemented);
        let first = report_checksum(&snapshot.report()).expect("checksum");
        let second = report_checksum(&snapshot.report()).expect("checksum");
        assert_eq!(first, second);
    }

    #[test]
    fn checksum_detects_changed_inputs() {
        let done = report_checksum(&snapshot(ImplementationStatus::FullyImplemented).report())
            .expect("checksum");
        let partial =
            report_checksum(&snapshot(ImplementationStatus::PartiallyImplemented).report())
                .expect("checksum");
        assert_ne!(done, partial);
    }

    #[test]
    fn checksum_is_order_sensitive() {
        assert_ne!(checksum_bytes(&[1, 2]), checksum_bytes(&[2, 1]));
        assert_eq!(checksum_bytes(&[]), 0);
    }

    #[cfg(feature = "crypto-hash")]
    #[test]
    fn crypto_hash_is_hex() {
        let report = snapshot(ImplementationStatus::FullyImplemented).report();
        let hash = report_crypto_hash(&report).expect("hash");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
