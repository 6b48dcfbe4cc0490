//! Shared types for the collectible card ledger.
//!
//! Everything in here is `no_std` compatible and free of storage access, so the
//! pallets can share one definition of capability bits, battle statistics, the
//! packed wire encodings, the presale inventory bitmap and the price curve.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod bitmap;
pub mod capability;
pub mod packed;
pub mod pricing;
pub mod rng;
pub mod stats;
pub mod traits;

pub use capability::{Capability, Role, ALL_CAPABILITIES};
pub use packed::{PackedCard, PresaleSummary};
pub use pricing::{PriceCurve, StepPriceCurve};
pub use rng::{SaleRng, XorShiftRng};
pub use stats::{BattleStats, Outcome, StatsDelta, StatsError};
pub use traits::{BattleRecorder, CapabilityInspect, CardMinter};

use codec::Encode;

/// Unique identifier of a card. Zero is never minted.
pub type CardId = u16;

/// Free-form attribute bitfield of a card.
pub type Attributes = u32;

/// Bits of [`Attributes`] that may be set. The packed card encoding reserves 24 bits.
pub const ATTRIBUTE_MASK: Attributes = 0x00FF_FFFF;

/// Returns `true` if every bit of `mask` falls inside [`ATTRIBUTE_MASK`].
pub fn attributes_in_range(mask: Attributes) -> bool {
    mask & !ATTRIBUTE_MASK == 0
}

/// The zero identity: an account whose SCALE encoding is all zero bytes.
///
/// It never holds a grant, never owns a card and is never a valid recipient.
pub fn is_zero_account<AccountId: Encode>(who: &AccountId) -> bool {
    who.using_encoded(|bytes| bytes.iter().all(|b| *b == 0))
}
