//! Sample input generation for trying out the codec.
//!
//! When no input file is given in compress mode, we generate data with
//! mixed compressibility: runs of a single byte, text-like sections over
//! a narrow alphabet, and incompressible random sections. That spread
//! makes the compression ratio in the stats output meaningful.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate sample data with mixed compressibility.
///
/// Deterministic for a given `(seed, size_bytes)` pair.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    let mut remaining = size_bytes;
    while remaining > 0 {
        let section = remaining.min(rng.gen_range(512..=4096));

        match rng.gen_range(0..3u8) {
            // Highly compressible: a run of one byte.
            0 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(section));
            }
            // Moderately compressible: skewed text-like alphabet.
            1 => {
                const ALPHABET: &[u8] = b"etaoin shrdlu";
                for _ in 0..section {
                    // Square the draw to skew toward the head.
                    let r: f64 = rng.gen();
                    let idx = ((r * r) * ALPHABET.len() as f64) as usize;
                    data.push(ALPHABET[idx.min(ALPHABET.len() - 1)]);
                }
            }
            // Incompressible: uniform random bytes.
            _ => {
                for _ in 0..section {
                    data.push(rng.gen());
                }
            }
        }

        remaining -= section;
    }

    data
}
