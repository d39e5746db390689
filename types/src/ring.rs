use num_bigint::BigUint;
use num_traits::One;

/// Integer additive group modulo `2^order`.
///
/// Used only to derive a cheap, deterministic, same-on-both-sides ordering
/// key for "numerically closest" selection within a club — correctness of
/// the overlay does not depend on this being a true ring distance.
#[derive(Debug, Clone)]
pub struct Ring {
    order: u32,
    modulus: BigUint,
}

impl Ring {
    pub fn new(order: u32) -> Self {
        let modulus = BigUint::one() << order;
        Self { order, modulus }
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    /// `low_64_bits(|((b - a) mod M)|)`, ties broken elsewhere by first-seen
    /// order. `a` and `b` must already be reduced into `[0, M)` (they come
    /// from hash digests of the configured output length).
    pub fn distance_key(&self, a: &BigUint, b: &BigUint) -> u64 {
        let diff = if b >= a {
            (b - a) % &self.modulus
        } else {
            (&self.modulus - (a - b)) % &self.modulus
        };
        let bytes = diff.to_bytes_be();
        let mut buf = [0u8; 8];
        let take = bytes.len().min(8);
        buf[8 - take..].copy_from_slice(&bytes[bytes.len() - take..]);
        u64::from_be_bytes(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn modulus_is_power_of_two() {
        let ring = Ring::new(8);
        assert_eq!(ring.modulus, BigUint::from(256u32));
    }

    #[test]
    fn distance_is_symmetric_in_magnitude() {
        let ring = Ring::new(16);
        let a = BigUint::from(10u32);
        let b = BigUint::from(20u32);
        // (b - a) mod M and (a - b) mod M are complements, not equal in
        // general; only identical points give a zero distance both ways.
        assert_eq!(ring.distance_key(&a, &a), 0);
        assert_eq!(ring.distance_key(&b, &b), 0);
        assert_ne!(ring.distance_key(&a, &b), ring.distance_key(&b, &a));
    }

    #[test]
    fn distance_wraps_around_modulus() {
        let ring = Ring::new(4); // M = 16
        let a = BigUint::from(15u32);
        let b = BigUint::from(1u32);
        // (1 - 15) mod 16 == 2
        assert_eq!(ring.distance_key(&a, &b), 2);
    }

    #[test]
    fn short_rings_still_produce_a_key() {
        let ring = Ring::new(4);
        let a = BigUint::from(3u32);
        let b = BigUint::from(7u32);
        assert_eq!(ring.distance_key(&a, &b), 4);
    }
}
