//! Identifier generation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Generate a random UUID v4 string.
///
/// ChaCha20Rng is seeded from OS entropy on every call so identifiers are not
/// predictable from one another.
#[must_use]
pub fn new_id() -> String {
    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}
