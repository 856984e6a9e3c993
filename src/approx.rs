//! The per-level linear approximations behind the candidate filters.
//!
//! Each predicate computes, for one pair, the parity of an XOR of selected
//! S-numbered bits of the block halves and of F outputs chained under the
//! already-confirmed subkey prefix. The attack never cares which parity the
//! correct key produces, only that it is the same for every pair.

use crate::cipher::f;
use crate::data::Pair;
use crate::utils::{bit, xor3, xor4};

/// Predicate shape shared by all levels: one pair, the confirmed subkey
/// prefix, and the candidate for the level under search.
pub type Approx = fn(&Pair, &[u32], u32) -> u32;

// Round outputs chained from the plaintext halves under a confirmed prefix.
fn y0(pair: &Pair, k0: u32) -> u32 {
    f(pair.plain_left ^ pair.plain_right ^ k0)
}

fn y1(pair: &Pair, keys: &[u32]) -> u32 {
    f(pair.plain_left ^ y0(pair, keys[0]) ^ keys[1])
}

fn y2(pair: &Pair, keys: &[u32]) -> u32 {
    f(pair.plain_left ^ pair.plain_right ^ y1(pair, keys) ^ keys[2])
}

/// S5,13,21(L0⊕R0⊕L4) ⊕ S15(L0⊕L4⊕R4) ⊕ S15 of F(L0⊕R0⊕κ)
pub fn k0_inner(pair: &Pair, _prefix: &[u32], candidate: u32) -> u32 {
    let guess = f(pair.plain_left ^ pair.plain_right ^ candidate);
    xor3(pair.plain_left ^ pair.plain_right ^ pair.cipher_left, 5, 13, 21)
        ^ bit(pair.plain_left ^ pair.cipher_left ^ pair.cipher_right, 15)
        ^ bit(guess, 15)
}

/// S13(L0⊕R0⊕L4) ⊕ S7,15,23,31(L0⊕L4⊕R4) ⊕ S7,15,23,31 of F(L0⊕R0⊕κ)
pub fn k0_outer(pair: &Pair, _prefix: &[u32], candidate: u32) -> u32 {
    let guess = f(pair.plain_left ^ pair.plain_right ^ candidate);
    bit(pair.plain_left ^ pair.plain_right ^ pair.cipher_left, 13)
        ^ xor4(pair.plain_left ^ pair.cipher_left ^ pair.cipher_right, 7, 15, 23, 31)
        ^ xor4(guess, 7, 15, 23, 31)
}

/// S5,13,21(L0⊕L4⊕R4) ⊕ S15 of F(L0⊕Y0⊕κ)
pub fn k1_inner(pair: &Pair, prefix: &[u32], candidate: u32) -> u32 {
    let guess = f(pair.plain_left ^ y0(pair, prefix[0]) ^ candidate);
    xor3(pair.plain_left ^ pair.cipher_left ^ pair.cipher_right, 5, 13, 21) ^ bit(guess, 15)
}

/// S13(L0⊕L4⊕R4) ⊕ S7,15,23,31 of F(L0⊕Y0⊕κ)
pub fn k1_outer(pair: &Pair, prefix: &[u32], candidate: u32) -> u32 {
    let guess = f(pair.plain_left ^ y0(pair, prefix[0]) ^ candidate);
    bit(pair.plain_left ^ pair.cipher_left ^ pair.cipher_right, 13) ^ xor4(guess, 7, 15, 23, 31)
}

/// S5,13,21(L0⊕R0⊕L4) ⊕ S15 of F(L0⊕R0⊕Y1⊕κ)
pub fn k2_inner(pair: &Pair, prefix: &[u32], candidate: u32) -> u32 {
    let guess = f(pair.plain_left ^ pair.plain_right ^ y1(pair, prefix) ^ candidate);
    xor3(pair.plain_left ^ pair.plain_right ^ pair.cipher_left, 5, 13, 21) ^ bit(guess, 15)
}

/// S13(L0⊕R0⊕L4) ⊕ S7,15,23,31 of F(L0⊕R0⊕Y1⊕κ)
pub fn k2_outer(pair: &Pair, prefix: &[u32], candidate: u32) -> u32 {
    let guess = f(pair.plain_left ^ pair.plain_right ^ y1(pair, prefix) ^ candidate);
    bit(pair.plain_left ^ pair.plain_right ^ pair.cipher_left, 13) ^ xor4(guess, 7, 15, 23, 31)
}

/// S5,13,21(L0⊕L4⊕R4) ⊕ S15(L0⊕R0⊕L4) ⊕ S15 of F(L0⊕Y0⊕Y2⊕κ)
pub fn k3_inner(pair: &Pair, prefix: &[u32], candidate: u32) -> u32 {
    let guess = f(pair.plain_left ^ y0(pair, prefix[0]) ^ y2(pair, prefix) ^ candidate);
    xor3(pair.plain_left ^ pair.cipher_left ^ pair.cipher_right, 5, 13, 21)
        ^ bit(pair.plain_left ^ pair.plain_right ^ pair.cipher_left, 15)
        ^ bit(guess, 15)
}

/// S13(L0⊕L4⊕R4) ⊕ S7,15,23,31(L0⊕R0⊕L4) ⊕ S7,15,23,31 of F(L0⊕Y0⊕Y2⊕κ)
pub fn k3_outer(pair: &Pair, prefix: &[u32], candidate: u32) -> u32 {
    let guess = f(pair.plain_left ^ y0(pair, prefix[0]) ^ y2(pair, prefix) ^ candidate);
    bit(pair.plain_left ^ pair.cipher_left ^ pair.cipher_right, 13)
        ^ xor4(pair.plain_left ^ pair.plain_right ^ pair.cipher_left, 7, 15, 23, 31)
        ^ xor4(guess, 7, 15, 23, 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Data;

    // subkeys behind example/known.txt
    const SUBKEYS: [u32; 6] = [
        0x63ca_b942, 0x00a0_c541, 0x4674_095a, 0x6420_4c03, 0x4b37_d10a, 0xd0a2_4877,
    ];

    #[test]
    fn s_numbering_counts_from_the_msb() {
        assert_eq!(bit(0x8000_0000, 0), 1);
        assert_eq!(bit(0x0001_0000, 15), 1);
        assert_eq!(bit(0x0000_0001, 31), 1);
        assert_eq!(xor3(0x0400_0000, 5, 13, 21), 1);
        assert_eq!(xor4(0x0101_0101, 7, 15, 23, 31), 0);
    }

    #[test]
    fn parities_agree_on_every_pair_under_the_true_key() {
        let data = Data::new("./example/known.txt").unwrap();
        let levels: [(Approx, usize); 4] = [
            (k0_outer, 0),
            (k1_outer, 1),
            (k2_outer, 2),
            (k3_outer, 3),
        ];

        for &(approx, level) in &levels {
            let first = approx(&data.pairs[0], &SUBKEYS[..level], SUBKEYS[level]);
            for pair in &data.pairs {
                assert_eq!(approx(pair, &SUBKEYS[..level], SUBKEYS[level]), first);
            }
        }
    }
}
