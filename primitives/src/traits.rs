//! Interfaces between the pallets.
//!
//! The ledger owns card storage. Other pallets act on it only through these
//! capability-scoped operator traits, and the ledger checks the operator's own
//! role before applying anything.

use crate::{BattleStats, Capability, CardId, Role, StatsDelta};
use frame::prelude::DispatchResult;

/// Read access to the role table.
pub trait CapabilityInspect<AccountId> {
    fn role_of(who: &AccountId) -> Role;

    fn has_capability(who: &AccountId, capability: Capability) -> bool {
        capability.granted_by(Self::role_of(who))
    }
}

/// Minting on behalf of users. Implemented by the card ledger.
pub trait CardMinter<AccountId> {
    fn exists(id: CardId) -> bool;

    /// Ids `1..=reserved_ids()` can only be minted through this interface.
    fn reserved_ids() -> CardId;

    /// Create card `id` owned by `owner`. `operator` must hold `CreateCards`.
    fn mint(operator: &AccountId, owner: &AccountId, id: CardId) -> DispatchResult;
}

/// Statistic updates from game results. Implemented by the card ledger.
pub trait BattleRecorder<AccountId> {
    /// Current statistics of `id`, or `None` if the card does not exist.
    fn battle_stats(id: CardId) -> Option<BattleStats>;

    /// Apply `delta` to card `id`. `operator` must hold `RecordBattles`.
    fn record_battle(operator: &AccountId, id: CardId, delta: StatsDelta) -> DispatchResult;
}
