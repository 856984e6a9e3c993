//! Linear cryptanalysis of the FEAL-4 block cipher: recovers the six 32-bit
//! round subkeys from a corpus of known plaintext-ciphertext pairs.

extern crate failure;
extern crate log;
extern crate rayon;

mod approx;
mod attack;
mod cipher;
mod data;
mod keys;
mod utils;

pub use self::attack::Attack;
pub use self::data::{Data, Pair};
pub use self::keys::Keys;

#[inline]
pub fn progress(done: usize, total: usize) {
    print!(
        "\r{:.2} % ({} / {})",
        done as f32 / total as f32 * 100.0,
        done,
        total
    );
}
