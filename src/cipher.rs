//! FEAL-4 block primitive, used as the trial-decryption oracle once the
//! search has produced a full subkey tuple.

fn word(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn s0(a: u8, b: u8) -> u8 {
    a.wrapping_add(b).rotate_left(2)
}

fn s1(a: u8, b: u8) -> u8 {
    a.wrapping_add(b).wrapping_add(1).rotate_left(2)
}

/// The FEAL round function.
#[inline]
pub fn f(x: u32) -> u32 {
    let [x0, x1, x2, x3] = x.to_be_bytes();
    let y1 = s1(x1 ^ x0, x2 ^ x3);
    let y0 = s0(x0, y1);
    let y2 = s0(y1, x2 ^ x3);
    let y3 = s1(y2, x3);
    u32::from_be_bytes([y0, y1, y2, y3])
}

/// Decrypt one 8-byte block in place under the six round subkeys.
pub fn decrypt_block(block: &mut [u8; 8], subkeys: &[u32; 6]) {
    let mut right = word(&block[0..4]) ^ subkeys[4];
    let mut left = right ^ word(&block[4..8]) ^ subkeys[5];

    for round in 0..4 {
        let swapped = left;
        left = right ^ f(left ^ subkeys[3 - round]);
        right = swapped;
    }
    right ^= left;

    block[..4].copy_from_slice(&left.to_be_bytes());
    block[4..].copy_from_slice(&right.to_be_bytes());
}

/// Encrypt one 8-byte block in place; the exact inverse of `decrypt_block`.
pub fn encrypt_block(block: &mut [u8; 8], subkeys: &[u32; 6]) {
    let mut left = word(&block[0..4]);
    let mut right = left ^ word(&block[4..8]);

    for round in 0..4 {
        let swapped = left;
        left = right;
        right = swapped ^ f(left ^ subkeys[round]);
    }

    block[..4].copy_from_slice(&(right ^ subkeys[4]).to_be_bytes());
    block[4..].copy_from_slice(&(left ^ right ^ subkeys[5]).to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn f_vectors() {
        // t1 = 01^02, t2 = 03^04, then the four chained S-box applications
        assert_eq!(f(0x0102_0304), 0xb42c_cc47);
        // the zero word is not a fixed point: S1(0,0) = ROL2(1) = 4
        assert_eq!(f(0x0000_0000), 0x1004_1044);
    }

    #[test]
    fn decrypt_inverts_encrypt() {
        let subkeys = [
            0x63ca_b942, 0x00a0_c541, 0x4674_095a, 0x6420_4c03, 0x4b37_d10a, 0xd0a2_4877,
        ];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let block: [u8; 8] = rng.gen();
            let mut scratch = block;
            encrypt_block(&mut scratch, &subkeys);
            assert_ne!(scratch, block);
            decrypt_block(&mut scratch, &subkeys);
            assert_eq!(scratch, block);
        }
    }

    #[test]
    fn encrypt_inverts_decrypt() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..100 {
            let subkeys: [u32; 6] = rng.gen();
            let block: [u8; 8] = rng.gen();
            let mut scratch = block;
            decrypt_block(&mut scratch, &subkeys);
            encrypt_block(&mut scratch, &subkeys);
            assert_eq!(scratch, block);
        }
    }
}
