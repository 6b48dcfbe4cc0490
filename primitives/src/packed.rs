//! Fixed-width integer encodings used at the external boundary.
//!
//! Both encodings are a single `U256`, most significant field first. Callers
//! decompose them by shifting and masking at the widths below.
//!
//! Card, from the least significant bit:
//!
//! | field         | offset | width |
//! |---------------|--------|-------|
//! | last outcome  | 0      | 8     |
//! | losses        | 8      | 16    |
//! | wins          | 24     | 16    |
//! | games played  | 40     | 16    |
//! | attributes    | 56     | 24    |
//! | owner         | 80     | 160   |
//! | id            | 240    | 16    |
//!
//! Presale summary: next price (0, 64), current price (64, 64), last price (128, 64),
//! left (192, 16), sold (208, 16).

use crate::{Attributes, BattleStats, CardId, Outcome};
use codec::Encode;
use frame::deps::sp_core::U256;

const OUTCOME_OFFSET: usize = 0;
const LOSSES_OFFSET: usize = 8;
const WINS_OFFSET: usize = 24;
const GAMES_OFFSET: usize = 40;
const ATTRIBUTES_OFFSET: usize = 56;
const OWNER_OFFSET: usize = 80;
const ID_OFFSET: usize = 240;

/// Bytes of the owner encoding kept in the packed card.
pub const OWNER_KEY_LEN: usize = 20;

const NEXT_PRICE_OFFSET: usize = 0;
const CURRENT_PRICE_OFFSET: usize = 64;
const LAST_PRICE_OFFSET: usize = 128;
const LEFT_OFFSET: usize = 192;
const SOLD_OFFSET: usize = 208;

fn field(value: u64, offset: usize) -> U256 {
    U256::from(value) << offset
}

fn extract(packed: U256, offset: usize, width: usize) -> u64 {
    let mask = (U256::one() << width) - U256::one();
    ((packed >> offset) & mask).low_u64()
}

/// First [`OWNER_KEY_LEN`] bytes of an account's SCALE encoding, zero padded.
pub fn owner_key<AccountId: Encode>(who: &AccountId) -> [u8; OWNER_KEY_LEN] {
    let mut key = [0u8; OWNER_KEY_LEN];
    who.using_encoded(|bytes| {
        let len = bytes.len().min(OWNER_KEY_LEN);
        key[..len].copy_from_slice(&bytes[..len]);
    });
    key
}

/// Structured view of a packed card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedCard {
    pub id: CardId,
    pub owner: [u8; OWNER_KEY_LEN],
    pub attributes: Attributes,
    pub stats: BattleStats,
}

impl PackedCard {
    pub fn new<AccountId: Encode>(
        id: CardId,
        owner: &AccountId,
        attributes: Attributes,
        stats: BattleStats,
    ) -> Self {
        Self { id, owner: owner_key(owner), attributes, stats }
    }

    pub fn pack(&self) -> U256 {
        // Owner key bytes are little endian, byte `i` lands at bit `OWNER_OFFSET + 8 * i`.
        let owner = self
            .owner
            .iter()
            .enumerate()
            .fold(U256::zero(), |acc, (i, byte)| {
                acc | field(u64::from(*byte), OWNER_OFFSET + 8 * i)
            });

        field(u64::from(self.id), ID_OFFSET)
            | owner
            | field(u64::from(self.attributes & crate::ATTRIBUTE_MASK), ATTRIBUTES_OFFSET)
            | field(u64::from(self.stats.games_played), GAMES_OFFSET)
            | field(u64::from(self.stats.wins), WINS_OFFSET)
            | field(u64::from(self.stats.losses), LOSSES_OFFSET)
            | field(u64::from(self.stats.last_outcome.as_u8()), OUTCOME_OFFSET)
    }

    /// Decompose a packed card. Returns `None` if the outcome byte is not a known value.
    pub fn unpack(packed: U256) -> Option<Self> {
        let mut owner = [0u8; OWNER_KEY_LEN];
        for (i, byte) in owner.iter_mut().enumerate() {
            *byte = extract(packed, OWNER_OFFSET + 8 * i, 8) as u8;
        }
        Some(Self {
            id: extract(packed, ID_OFFSET, 16) as CardId,
            owner,
            attributes: extract(packed, ATTRIBUTES_OFFSET, 24) as Attributes,
            stats: BattleStats {
                games_played: extract(packed, GAMES_OFFSET, 16) as u16,
                wins: extract(packed, WINS_OFFSET, 16) as u16,
                losses: extract(packed, LOSSES_OFFSET, 16) as u16,
                last_outcome: Outcome::from_u8(extract(packed, OUTCOME_OFFSET, 8) as u8)?,
            },
        })
    }
}

/// Combined presale state as reported to callers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PresaleSummary {
    pub sold: u16,
    pub left: u16,
    pub last_price: u64,
    pub current_price: u64,
    pub next_price: u64,
}

impl PresaleSummary {
    pub fn pack(&self) -> U256 {
        field(u64::from(self.sold), SOLD_OFFSET)
            | field(u64::from(self.left), LEFT_OFFSET)
            | field(self.last_price, LAST_PRICE_OFFSET)
            | field(self.current_price, CURRENT_PRICE_OFFSET)
            | field(self.next_price, NEXT_PRICE_OFFSET)
    }

    pub fn unpack(packed: U256) -> Self {
        Self {
            sold: extract(packed, SOLD_OFFSET, 16) as u16,
            left: extract(packed, LEFT_OFFSET, 16) as u16,
            last_price: extract(packed, LAST_PRICE_OFFSET, 64),
            current_price: extract(packed, CURRENT_PRICE_OFFSET, 64),
            next_price: extract(packed, NEXT_PRICE_OFFSET, 64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_fields_land_at_documented_offsets() {
        let stats = BattleStats {
            games_played: 0x0102,
            wins: 0x0304,
            losses: 0x0506,
            last_outcome: Outcome::Victory,
        };
        let packed = PackedCard::new(0xBEEF, &0u64, 0x00AB_CDEF, stats).pack();

        assert_eq!(packed >> 240usize, U256::from(0xBEEFu64));
        assert_eq!(packed.low_u64() & 0xFF, 3);
        assert_eq!((packed >> 8usize).low_u64() & 0xFFFF, 0x0506);
        assert_eq!((packed >> 24usize).low_u64() & 0xFFFF, 0x0304);
        assert_eq!((packed >> 40usize).low_u64() & 0xFFFF, 0x0102);
        assert_eq!((packed >> 56usize).low_u64() & 0xFF_FFFF, 0xAB_CDEF);
    }

    #[test]
    fn small_owner_reads_back_as_integer() {
        let packed = PackedCard::new(1, &42u64, 0, BattleStats::default()).pack();
        assert_eq!((packed >> 80usize).low_u64(), 42);

        let card = PackedCard::unpack(packed).unwrap();
        assert_eq!(card.id, 1);
        assert_eq!(card.owner, owner_key(&42u64));
    }

    #[test]
    fn wide_owner_is_truncated_to_key_length() {
        let owner = [7u8; 32];
        let card = PackedCard::new(9, &owner, 0, BattleStats::default());
        assert_eq!(card.owner, [7u8; OWNER_KEY_LEN]);
        assert_eq!(PackedCard::unpack(card.pack()), Some(card));
    }

    #[test]
    fn unknown_outcome_byte_is_rejected() {
        assert_eq!(PackedCard::unpack(U256::from(9u64)), None);
    }

    #[test]
    fn summary_layout() {
        let summary = PresaleSummary {
            sold: 3,
            left: 17,
            last_price: 10,
            current_price: 12,
            next_price: u64::MAX,
        };
        let packed = summary.pack();
        assert_eq!(packed >> 208usize, U256::from(3u64));
        assert_eq!((packed >> 192usize).low_u64() & 0xFFFF, 17);
        assert_eq!((packed >> 128usize).low_u64(), 10);
        assert_eq!((packed >> 64usize).low_u64(), 12);
        assert_eq!(packed.low_u64(), u64::MAX);
        assert_eq!(PresaleSummary::unpack(packed), summary);
    }
}
