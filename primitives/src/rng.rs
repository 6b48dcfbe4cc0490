//! Deterministic slot selection for the presale.
//!
//! The seed is derived from inputs visible to anyone observing the call, so the
//! selection is predictable. This is good enough for spreading sales over the
//! inventory; it is not a source of unbiased or secret randomness.

use codec::{Decode, Encode};
use scale_info::TypeInfo;

/// Source of pseudo-random numbers for picking inventory slots.
pub trait SaleRng {
    fn next_u64(&mut self) -> u64;

    /// A number in `[0, max)`. Returns 0 when `max` is 0.
    fn gen_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(max)) as u32
    }
}

/// xorshift64 generator.
#[derive(Debug, Clone, Encode, Decode, TypeInfo)]
pub struct XorShiftRng {
    state: u64,
}

impl XorShiftRng {
    /// Zero would lock the generator at zero, so it is replaced by a fixed odd constant.
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    /// Fold a 128-bit digest into a seed.
    pub fn seed_from_digest(digest: [u8; 16]) -> Self {
        let mut low = [0u8; 8];
        let mut high = [0u8; 8];
        low.copy_from_slice(&digest[..8]);
        high.copy_from_slice(&digest[8..]);
        Self::seed_from_u64(u64::from_le_bytes(low) ^ u64::from_le_bytes(high))
    }
}

impl SaleRng for XorShiftRng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}
