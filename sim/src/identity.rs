use rand::Rng;

/// Synthesizes `count` IPv4-shaped candidate identities for population.
///
/// Random identity generation is deliberately a private implementation
/// detail of the simulator rather than a reusable library surface: nothing
/// about the overlay's correctness depends on identities looking like IP
/// addresses, and a production deployment would source real peer
/// identities externally instead of synthesizing them.
pub(crate) fn synthetic_identities(count: usize, rng: &mut impl Rng) -> Vec<String> {
    (0..count)
        .map(|_| {
            let octets: [u8; 4] = rng.gen();
            format!(
                "{}.{}.{}.{}",
                octets[0], octets[1], octets[2], octets[3]
            )
        })
        .collect()
}
