use crate::error::GemelosError;
use crate::hash::HashFunction;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressStatus {
    Raw,
    Hashed,
}

/// A raw identity plus its fixed-width hashed image and canonical binary
/// string. Begins `Raw`; `hash` is idempotent and monotonic — once
/// `Hashed`, the image never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    raw: String,
    hashed: Vec<u8>,
    binary: String,
    status: AddressStatus,
}

impl Address {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            hashed: Vec::new(),
            binary: String::new(),
            status: AddressStatus::Raw,
        }
    }

    /// Hashes `raw` into the canonical fixed-width image, guarding against
    /// configuration drift between `hash_fn` and `order_bits`. A no-op if
    /// already `Hashed`.
    pub fn hash(&mut self, hash_fn: HashFunction, order_bits: u32) -> Result<(), GemelosError> {
        if self.status == AddressStatus::Hashed {
            return Ok(());
        }
        let expected = (order_bits as usize) / 8;
        let digest = hash_fn.digest(self.raw.as_bytes());
        if digest.len() != expected {
            return Err(GemelosError::HashLengthMismatch {
                expected,
                actual: digest.len(),
            });
        }
        self.binary = to_binary_string(&digest, order_bits as usize);
        self.hashed = digest;
        self.status = AddressStatus::Hashed;
        Ok(())
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn status(&self) -> AddressStatus {
        self.status
    }

    pub fn hashed(&self) -> &[u8] {
        &self.hashed
    }

    /// Zero-padded, big-endian bit string of length exactly `order_bits`.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// First `h` characters of `binary()`.
    pub fn head(&self, h: usize) -> &str {
        &self.binary[..h]
    }

    /// Last `b` characters of `binary()` — the full-final-`b`-bits slice,
    /// not the off-by-one `binary[L-1-b..L-1]` some prototypes used.
    pub fn boot(&self, b: usize) -> &str {
        &self.binary[self.binary.len() - b..]
    }

    /// The hash image interpreted as an unsigned integer, for ring
    /// distance ordering.
    pub fn as_integer(&self) -> BigUint {
        BigUint::from_bytes_be(&self.hashed)
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.hashed == other.hashed
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hashed.hash(state);
    }
}

fn to_binary_string(bytes: &[u8], bits: usize) -> String {
    let mut s = String::with_capacity(bits);
    for byte in bytes {
        s.push_str(&format!("{byte:08b}"));
    }
    s.truncate(bits);
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn begins_raw_and_unhashed() {
        let addr = Address::new("10.0.0.1");
        assert_eq!(addr.status(), AddressStatus::Raw);
        assert!(addr.hashed().is_empty());
    }

    #[test]
    fn hash_produces_canonical_binary_of_order_length() {
        let mut addr = Address::new("10.0.0.1");
        addr.hash(HashFunction::Sha1, 160).unwrap();
        assert_eq!(addr.status(), AddressStatus::Hashed);
        assert_eq!(addr.binary().len(), 160);
        assert!(addr.binary().chars().all(|c| c == '0' || c == '1'));
    }

    #[test]
    fn hash_is_idempotent() {
        let mut addr = Address::new("10.0.0.1");
        addr.hash(HashFunction::Sha256, 256).unwrap();
        let first = addr.binary().to_string();
        // re-hashing with a mismatched function is still a no-op once Hashed
        addr.hash(HashFunction::Sha512, 512).unwrap();
        assert_eq!(addr.binary(), first);
        assert_eq!(addr.status(), AddressStatus::Hashed);
    }

    #[test]
    fn hash_length_mismatch_is_rejected() {
        let mut addr = Address::new("10.0.0.1");
        let err = addr.hash(HashFunction::Sha1, 256).unwrap_err();
        assert_eq!(
            err,
            GemelosError::HashLengthMismatch {
                expected: 32,
                actual: 20
            }
        );
    }

    #[test]
    fn head_and_boot_use_full_final_slice() {
        let mut addr = Address::new("10.0.0.1");
        addr.hash(HashFunction::Sha256, 256).unwrap();
        let binary = addr.binary().to_string();
        assert_eq!(addr.head(4), &binary[..4]);
        assert_eq!(addr.boot(4), &binary[252..256]);
    }

    #[test]
    fn equality_and_hash_are_over_hashed_bytes_not_raw() {
        let mut a = Address::new("host-a");
        let mut b = Address::new("host-b");
        a.hash(HashFunction::Sha256, 256).unwrap();
        b.hash(HashFunction::Sha256, 256).unwrap();
        assert_ne!(a, b);
        let mut c = Address::new("host-a");
        c.hash(HashFunction::Sha256, 256).unwrap();
        assert_eq!(a, c);
    }
}
