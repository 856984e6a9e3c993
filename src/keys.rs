use crate::cipher;
use crate::data::{Data, Pair};
use std::fmt;

/// A full set of six recovered round subkeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keys {
    subkeys: [u32; 6],
}

impl Keys {
    pub fn new(subkeys: [u32; 6]) -> Keys {
        Keys { subkeys }
    }

    /// Complete a confirmed (k0..k3) prefix to the full tuple. Given the
    /// first four subkeys, k4 and k5 are pinned down by the cipher equations
    /// of a single known pair.
    pub fn derive(rounds: [u32; 4], pair: &Pair) -> Keys {
        let [k0, k1, k2, k3] = rounds;
        let y0 = cipher::f(pair.plain_left ^ pair.plain_right ^ k0);
        let y1 = cipher::f(pair.plain_left ^ y0 ^ k1);
        let y2 = cipher::f(pair.plain_left ^ pair.plain_right ^ y1 ^ k2);
        let y3 = cipher::f(pair.plain_left ^ y0 ^ y2 ^ k3);

        let k4 = pair.plain_left ^ pair.plain_right ^ y1 ^ y3 ^ pair.cipher_left;
        let k5 = pair.plain_right ^ y1 ^ y3 ^ y0 ^ y2 ^ pair.cipher_right;
        Keys {
            subkeys: [k0, k1, k2, k3, k4, k5],
        }
    }

    pub fn subkeys(&self) -> &[u32; 6] {
        &self.subkeys
    }

    /// Trial-decrypt every ciphertext in the corpus and compare against its
    /// stored plaintext.
    pub fn decrypts_all(&self, data: &Data) -> bool {
        data.pairs.iter().all(|pair| {
            let mut block = [0u8; 8];
            block[..4].copy_from_slice(&pair.cipher_left.to_be_bytes());
            block[4..].copy_from_slice(&pair.cipher_right.to_be_bytes());
            cipher::decrypt_block(&mut block, &self.subkeys);

            block[..4] == pair.plain_left.to_be_bytes() && block[4..] == pair.plain_right.to_be_bytes()
        })
    }
}

impl fmt::Display for Keys {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "0x{:08x}\t0x{:08x}\t0x{:08x}\t0x{:08x}\t0x{:08x}\t0x{:08x}",
            self.subkeys[0],
            self.subkeys[1],
            self.subkeys[2],
            self.subkeys[3],
            self.subkeys[4],
            self.subkeys[5],
        )
    }
}
