use crate::approx::{self, Approx};
use crate::data::Data;
use crate::keys::Keys;
use crate::progress;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

const INNER_KEY_BITS: u32 = 12;
const OUTER_KEY_BITS: u32 = 20;

/// Candidates for the low six bits of the two middle subkey bytes.
pub const INNER_KEY_SPACE: u32 = 1 << INNER_KEY_BITS;
/// Candidates for the outer bytes plus the remaining middle-byte bits.
pub const OUTER_KEY_SPACE: u32 = 1 << OUTER_KEY_BITS;

// inner and outer approximation applied at each search depth
const APPROXIMATIONS: [(Approx, Approx); 4] = [
    (approx::k0_inner, approx::k0_outer),
    (approx::k1_inner, approx::k1_outer),
    (approx::k2_inner, approx::k2_outer),
    (approx::k3_inner, approx::k3_outer),
];

/// Spread a 12-bit candidate over the low six bits of the two middle bytes.
pub fn inner_key(candidate: u32) -> u32 {
    ((candidate >> 6) & 0x3f) << 16 | (candidate & 0x3f) << 8
}

/// Complete a surviving middle-byte key with the outer bytes and the two
/// missing high bits of each middle byte.
pub fn outer_key(candidate: u32, inner: u32) -> u32 {
    let a0 = (((candidate & 0xf) >> 2) << 6) + ((inner >> 16) & 0xff);
    let a1 = ((candidate & 0x3) << 6) + ((inner >> 8) & 0xff);
    let b0 = (candidate >> 12) & 0xff;
    let b3 = (candidate >> 4) & 0xff;
    let b1 = b0 ^ a0;
    let b2 = b3 ^ a1;
    b0 << 24 | b1 << 16 | b2 << 8 | b3
}

/// Cascaded search for the four round subkeys, outside-in.
///
/// The corpus is borrowed read-only and every candidate prefix lives on the
/// recursion stack, so the top-level sweep fans out over worker threads with
/// nothing shared but the reporter state.
pub struct Attack<'a> {
    data: &'a Data,
    accepted: Mutex<Vec<Keys>>,
    swept: AtomicUsize,
    stop: AtomicBool,
}

impl<'a> Attack<'a> {
    /// Emission cap on accepted key tuples.
    pub const MAX_VALID_KEYS: usize = 256;

    pub fn new(data: &Data) -> Attack {
        Attack {
            data,
            accepted: Mutex::new(Vec::new()),
            swept: AtomicUsize::new(0),
            stop: AtomicBool::new(false),
        }
    }

    /// Run the attack to completion or to the emission cap, printing each
    /// accepted tuple as it is found, and return them in discovery order.
    pub fn carry_out(self) -> Vec<Keys> {
        (0..INNER_KEY_SPACE).into_par_iter().for_each(|candidate| {
            if !self.stop.load(Ordering::Relaxed) {
                self.search_candidate(0, [0; 4], candidate);
            }
            let done = self.swept.fetch_add(1, Ordering::Relaxed) + 1;
            progress(done, INNER_KEY_SPACE as usize);
        });
        println!();

        self.accepted.into_inner().unwrap()
    }

    fn search_level(&self, level: usize, prefix: [u32; 4]) {
        for candidate in 0..INNER_KEY_SPACE {
            if self.stop.load(Ordering::Relaxed) {
                return;
            }
            self.search_candidate(level, prefix, candidate);
        }
    }

    // Filter one 12-bit middle-byte candidate, then sweep the 20-bit space
    // that completes it to full subkeys for the current level.
    fn search_candidate(&self, level: usize, prefix: [u32; 4], candidate: u32) {
        let (inner_approx, outer_approx) = APPROXIMATIONS[level];

        let inner = inner_key(candidate);
        if !self.consistent(inner_approx, &prefix[..level], inner) {
            return;
        }

        for outer in 0..OUTER_KEY_SPACE {
            if self.stop.load(Ordering::Relaxed) {
                return;
            }
            let subkey = outer_key(outer, inner);
            if !self.consistent(outer_approx, &prefix[..level], subkey) {
                continue;
            }

            let mut extended = prefix;
            extended[level] = subkey;
            if level == 3 {
                self.validate(extended);
            } else {
                self.search_level(level + 1, extended);
            }
        }
    }

    // A candidate survives only if its approximation parity agrees on every
    // known pair.
    fn consistent(&self, approximation: Approx, prefix: &[u32], candidate: u32) -> bool {
        let first = approximation(&self.data.pairs[0], prefix, candidate);
        self.data.pairs[1..]
            .iter()
            .all(|pair| approximation(pair, prefix, candidate) == first)
    }

    // Complete a confirmed four-subkey prefix and trial-decrypt the whole
    // corpus with the resulting tuple.
    fn validate(&self, rounds: [u32; 4]) {
        let keys = Keys::derive(rounds, &self.data.pairs[0]);
        if !keys.decrypts_all(self.data) {
            return;
        }

        let mut accepted = self.accepted.lock().unwrap();
        if accepted.len() >= Attack::MAX_VALID_KEYS {
            return;
        }
        println!("{}", keys);
        accepted.push(keys);
        if accepted.len() == Attack::MAX_VALID_KEYS {
            self.stop.store(true, Ordering::Relaxed);
        }
    }
}
