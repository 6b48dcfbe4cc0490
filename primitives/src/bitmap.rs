//! Presale inventory bitmap.
//!
//! One bit per slot, `1` meaning available. Slot `s` lives in word `s / 64` at bit
//! `s % 64`, least significant bit first. Bits only ever go from available to sold.

/// Bits per inventory word.
pub const WORD_BITS: u32 = u64::BITS;

/// Number of words needed to hold `slots` bits.
pub const fn words_for(slots: u32) -> u32 {
    slots.div_ceil(WORD_BITS)
}

fn locate(slot: u16) -> (usize, u64) {
    let slot = u32::from(slot);
    ((slot / WORD_BITS) as usize, 1u64 << (slot % WORD_BITS))
}

/// Whether `slot` is still available. Slots beyond the bitmap are not.
pub fn is_available(words: &[u64], slot: u16) -> bool {
    let (index, bit) = locate(slot);
    words.get(index).is_some_and(|word| word & bit != 0)
}

/// Total number of available slots.
pub fn count_available(words: &[u64]) -> u32 {
    words.iter().map(|word| word.count_ones()).sum()
}

/// Mark the contiguous run `start..start + len` available.
///
/// Bits that fall outside `words` are ignored.
pub fn mark_available(words: &mut [u64], start: u16, len: u16) {
    let end = u32::from(start) + u32::from(len);
    for slot in u32::from(start)..end {
        let Ok(slot) = u16::try_from(slot) else { break };
        let (index, bit) = locate(slot);
        match words.get_mut(index) {
            Some(word) => *word |= bit,
            None => break,
        }
    }
}

/// Clear `slot`. Returns `false` if it was not available.
pub fn take(words: &mut [u64], slot: u16) -> bool {
    let (index, bit) = locate(slot);
    match words.get_mut(index) {
        Some(word) if *word & bit != 0 => {
            *word &= !bit;
            true
        },
        _ => false,
    }
}

/// Clear the `n`-th available slot (zero based, in slot order) and return it.
pub fn take_nth_available(words: &mut [u64], mut n: u32) -> Option<u16> {
    for (index, word) in words.iter_mut().enumerate() {
        let available = word.count_ones();
        if n >= available {
            n -= available;
            continue;
        }
        let mut remaining = *word;
        for _ in 0..n {
            // Drop the lowest set bit.
            remaining &= remaining - 1;
        }
        let bit = remaining.trailing_zeros();
        *word &= !(1u64 << bit);
        return u16::try_from(index as u32 * WORD_BITS + bit).ok();
    }
    None
}
