use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

/// The hash family used to derive a node's canonical binary representation.
///
/// The overlay's correctness never depends on which member is chosen, only
/// on its output length matching the network's configured address order
/// (`HashFunction::output_bits() == addressOrder`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HashFunction {
    Sha1,
    Sha256,
    Sha512,
}

impl HashFunction {
    pub fn output_bytes(self) -> usize {
        match self {
            HashFunction::Sha1 => 20,
            HashFunction::Sha256 => 32,
            HashFunction::Sha512 => 64,
        }
    }

    pub fn output_bits(self) -> usize {
        self.output_bytes() * 8
    }

    pub fn digest(self, raw: &[u8]) -> Vec<u8> {
        match self {
            HashFunction::Sha1 => {
                let mut hasher = Sha1::new();
                hasher.update(raw);
                hasher.finalize().to_vec()
            }
            HashFunction::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(raw);
                hasher.finalize().to_vec()
            }
            HashFunction::Sha512 => {
                let mut hasher = Sha512::new();
                hasher.update(raw);
                hasher.finalize().to_vec()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn output_lengths_match_declared_bits() {
        for hf in [HashFunction::Sha1, HashFunction::Sha256, HashFunction::Sha512] {
            assert_eq!(hf.digest(b"10.0.0.1").len(), hf.output_bytes());
            assert_eq!(hf.output_bits(), hf.output_bytes() * 8);
        }
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(
            HashFunction::Sha256.digest(b"hello"),
            HashFunction::Sha256.digest(b"hello")
        );
    }
}
