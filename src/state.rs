//! Seed to TinyMT state vector expansion.
//!
//! The mapping must stay bit-for-bit identical to the one used by the
//! external tools that produce and consume seed tables, so it is kept as a
//! standalone pure function rather than folded into the generator.

/// Four-word TinyMT internal state, index 0 first.
pub type StateVector = [u32; 4];

/// TinyMT32 `mat1` parameter.
pub const MAT1: u32 = 0x8f70_11ee;
/// TinyMT32 `mat2` parameter.
pub const MAT2: u32 = 0xfc78_ff1f;
/// TinyMT32 tempering parameter.
pub const TMAT: u32 = 0x3793_fdff;

const INIT_MULTIPLIER: u32 = 0x6C07_8965;
const MIN_LOOP: u32 = 8;

/// Expand `seed` into the initial four-word state.
///
/// Note that the fourth mixing round rewrites word 0, so the returned
/// `state[0]` is generally not equal to `seed`.
pub fn init_state_vector(seed: u32) -> StateVector {
    let mut state = [seed, MAT1, MAT2, TMAT];
    for j in 1..MIN_LOOP {
        let a = state[((j - 1) & 3) as usize];
        state[(j & 3) as usize] ^= j.wrapping_add(INIT_MULTIPLIER.wrapping_mul(a ^ (a >> 30)));
    }
    state
}

/// Render a state vector most-significant word first, e.g.
/// `[EB60F0C2,8C7AF4CE,41199C5D,059FD2A9]`.
pub fn format_state_vector(state: &StateVector) -> String {
    format!(
        "[{:08X},{:08X},{:08X},{:08X}]",
        state[3], state[2], state[1], state[0]
    )
}
