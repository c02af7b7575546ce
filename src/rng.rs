//! Pseudorandom generator capability used by the table builder.

use crate::state::{init_state_vector, StateVector, MAT1, MAT2, TMAT};

/// Minimal stepping interface the builder relies on.
///
/// `next_output` always advances; there is no way to peek.
pub trait IdGenerator {
    /// Consume one step, discarding its output.
    fn advance(&mut self);
    /// Advance and return the next 32-bit output.
    fn next_output(&mut self) -> u32;
}

const MASK: u32 = 0x7fff_ffff;
const SH0: u32 = 1;
const SH1: u32 = 10;
const SH8: u32 = 8;
const PRE_LOOP: usize = 8;

/// TinyMT32 with the parameter set used by the 3DS titles.
#[derive(Debug, Clone)]
pub struct TinyMt {
    status: StateVector,
}

impl TinyMt {
    pub fn new(seed: u32) -> Self {
        let mut status = init_state_vector(seed);
        if status[0] & MASK == 0 && status[1] == 0 && status[2] == 0 && status[3] == 0 {
            status = [b'T' as u32, b'I' as u32, b'N' as u32, b'Y' as u32];
        }
        let mut rng = Self { status };
        for _ in 0..PRE_LOOP {
            rng.next_state();
        }
        rng
    }

    /// Current internal state.
    pub fn state(&self) -> StateVector {
        self.status
    }

    fn next_state(&mut self) {
        let s = &mut self.status;
        let mut y = s[3];
        let mut x = (s[0] & MASK) ^ s[1] ^ s[2];
        x ^= x << SH0;
        y ^= (y >> SH0) ^ x;
        s[0] = s[1];
        s[1] = s[2];
        s[2] = x ^ (y << SH1);
        s[3] = y;
        if y & 1 == 1 {
            s[1] ^= MAT1;
            s[2] ^= MAT2;
        }
    }

    fn temper(&self) -> u32 {
        let s = &self.status;
        let t1 = s[0].wrapping_add(s[2] >> SH8);
        let mut t0 = s[3] ^ t1;
        if t1 & 1 == 1 {
            t0 ^= TMAT;
        }
        t0
    }
}

impl IdGenerator for TinyMt {
    fn advance(&mut self) {
        self.next_state();
    }

    fn next_output(&mut self) -> u32 {
        self.next_state();
        self.temper()
    }
}
