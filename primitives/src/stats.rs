//! Battle statistics of a card and the deltas applied to them.
//!
//! Counters never decrease and never wrap: applying a delta that would push any of
//! them past `u16::MAX` is an error, not a truncation.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

/// Result of the most recent game, from the card's own perspective.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Encode,
    Decode,
    DecodeWithMemTracking,
    TypeInfo,
    MaxEncodedLen,
)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// No game recorded yet.
    #[default]
    Undefined,
    Defeat,
    Draw,
    Victory,
}

impl Outcome {
    /// The same game seen from the opponent's side.
    pub const fn mirror(self) -> Self {
        match self {
            Outcome::Victory => Outcome::Defeat,
            Outcome::Defeat => Outcome::Victory,
            other => other,
        }
    }

    /// Wire value used by the packed card encoding.
    pub const fn as_u8(self) -> u8 {
        match self {
            Outcome::Undefined => 0,
            Outcome::Defeat => 1,
            Outcome::Draw => 2,
            Outcome::Victory => 3,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Outcome::Undefined),
            1 => Some(Outcome::Defeat),
            2 => Some(Outcome::Draw),
            3 => Some(Outcome::Victory),
            _ => None,
        }
    }
}

/// Errors raised while building or applying a [`StatsDelta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo)]
pub enum StatsError {
    /// The delta is internally inconsistent (no games, too many results, bad outcome).
    Malformed,
    /// A counter would exceed its maximum representable value.
    Overflow,
}

/// Battle statistics stored with every card.
///
/// Invariant: `wins + losses <= games_played`.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Encode,
    Decode,
    DecodeWithMemTracking,
    TypeInfo,
    MaxEncodedLen,
)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleStats {
    pub games_played: u16,
    pub wins: u16,
    pub losses: u16,
    pub last_outcome: Outcome,
}

impl BattleStats {
    /// Add `delta` to these statistics, failing instead of wrapping.
    pub fn checked_apply(&self, delta: &StatsDelta) -> Result<Self, StatsError> {
        Ok(Self {
            games_played: self
                .games_played
                .checked_add(delta.games_played)
                .ok_or(StatsError::Overflow)?,
            wins: self.wins.checked_add(delta.wins).ok_or(StatsError::Overflow)?,
            losses: self.losses.checked_add(delta.losses).ok_or(StatsError::Overflow)?,
            last_outcome: delta.last_outcome,
        })
    }
}

/// A cumulative change to one card's statistics.
///
/// Only the constructors below produce deltas, so every delta satisfies
/// `games_played > 0`, `wins + losses <= games_played` and carries a defined outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsDelta {
    games_played: u16,
    wins: u16,
    losses: u16,
    last_outcome: Outcome,
}

impl StatsDelta {
    /// One game with the given outcome.
    pub fn single(outcome: Outcome) -> Result<Self, StatsError> {
        let (wins, losses) = match outcome {
            Outcome::Undefined => return Err(StatsError::Malformed),
            Outcome::Victory => (1, 0),
            Outcome::Defeat => (0, 1),
            Outcome::Draw => (0, 0),
        };
        Ok(Self { games_played: 1, wins, losses, last_outcome: outcome })
    }

    /// Several games at once.
    ///
    /// Checks, in order: at least one game, results fit inside the games played, and
    /// `last_outcome` agrees with the win/loss split.
    pub fn batch(
        wins: u16,
        losses: u16,
        games_played: u16,
        last_outcome: Outcome,
    ) -> Result<Self, StatsError> {
        if games_played == 0 {
            return Err(StatsError::Malformed);
        }
        let decided = u32::from(wins) + u32::from(losses);
        if decided > u32::from(games_played) {
            return Err(StatsError::Malformed);
        }
        let has_draws = decided < u32::from(games_played);
        let consistent = match (wins, losses) {
            (0, 0) => last_outcome == Outcome::Draw,
            (_, 0) => last_outcome == Outcome::Victory,
            (0, _) => last_outcome == Outcome::Defeat,
            _ => match last_outcome {
                Outcome::Victory | Outcome::Defeat => true,
                Outcome::Draw => has_draws,
                Outcome::Undefined => false,
            },
        };
        if !consistent {
            return Err(StatsError::Malformed);
        }
        Ok(Self { games_played, wins, losses, last_outcome })
    }

    /// The opponent's delta: wins and losses swap, the outcome is mirrored.
    pub fn mirrored(&self) -> Self {
        Self {
            games_played: self.games_played,
            wins: self.losses,
            losses: self.wins,
            last_outcome: self.last_outcome.mirror(),
        }
    }

    pub fn games_played(&self) -> u16 {
        self.games_played
    }

    pub fn wins(&self) -> u16 {
        self.wins
    }

    pub fn losses(&self) -> u16 {
        self.losses
    }

    pub fn last_outcome(&self) -> Outcome {
        self.last_outcome
    }
}
