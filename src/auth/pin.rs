use sha2::{Digest, Sha256};

use crate::error::{BankError, BankResult};

/// Hash a PIN into its lowercase SHA-256 hex digest. The digest is
/// unsalted, so equal PINs always produce equal digests.
pub fn hash_pin(pin: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pin.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a candidate PIN against a stored digest. The raw PIN is
/// re-hashed and only digests are compared.
pub fn verify_pin(pin: &str, digest: &str) -> bool {
    hash_pin(pin) == digest
}

/// A well-formed PIN is exactly four ASCII digits.
pub fn validate_pin_format(pin: &str) -> BankResult<()> {
    if pin.len() == 4 && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(BankError::InvalidPinFormat)
    }
}
