//! # Battles Pallet
//!
//! Records game results between two cards into the ledger's battle statistics.
//!
//! Results are always given from the first card's perspective; the second card
//! receives the mirrored delta. The pallet acts on the ledger under its own
//! `PalletId` account, so that account must hold `RecordBattles` in the role table,
//! in addition to the caller.
//!
//! Every precondition is checked for both cards before either is written.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

#[cfg(test)]
mod mock;


pub mod weights;

const LOG_TARGET: &str = "runtime::ccl-battles";

#[frame::pallet]
pub mod pallet {
    use crate::weights::WeightInfo;
    use ccl_primitives::{
        BattleRecorder, BattleStats, Capability, CapabilityInspect, CardId, Outcome, StatsDelta,
        StatsError,
    };
    use frame::prelude::*;

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::config]
    pub trait Config: frame_system::Config {
        /// Because this pallet emits events, it depends on the runtime's definition of an event.
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Role table consulted for the caller.
        type Capabilities: CapabilityInspect<Self::AccountId>;

        /// The card ledger that owns the statistics.
        type Cards: BattleRecorder<Self::AccountId>;

        /// Pallet ID used to derive the operator account presented to the ledger.
        #[pallet::constant]
        type PalletId: Get<frame::deps::frame_support::PalletId>;

        /// Weight information for extrinsics in this pallet.
        type WeightInfo: WeightInfo;
    }

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// One game between two cards was recorded.
        BattleCompleted { reporter: T::AccountId, id_a: CardId, id_b: CardId, outcome: Outcome },
        /// A batch of games between two cards was recorded.
        BattlesCompleted {
            reporter: T::AccountId,
            id_a: CardId,
            id_b: CardId,
            wins: u16,
            losses: u16,
            games_played: u16,
            last_outcome: Outcome,
        },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// The caller lacks `RecordBattles`.
        PermissionDenied,
        /// Same card on both sides, or an inconsistent result.
        InvalidArgument,
        /// One of the cards does not exist.
        NotFound,
        /// A statistic would exceed its maximum representable value.
        ArithmeticOverflow,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Record one game. `outcome` is from `id_a`'s perspective.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::battle_complete())]
        pub fn battle_complete(
            origin: OriginFor<T>,
            id_a: CardId,
            id_b: CardId,
            outcome: Outcome,
        ) -> DispatchResult {
            let reporter = ensure_signed(origin)?;
            Self::ensure_reporter(&reporter)?;
            ensure!(id_a != id_b, Error::<T>::InvalidArgument);
            let delta = StatsDelta::single(outcome).map_err(Error::<T>::from)?;

            Self::apply(id_a, id_b, delta)?;

            Self::deposit_event(Event::BattleCompleted { reporter, id_a, id_b, outcome });
            Ok(())
        }

        /// Record several games at once. Counts are from `id_a`'s perspective.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::battles_complete())]
        pub fn battles_complete(
            origin: OriginFor<T>,
            id_a: CardId,
            id_b: CardId,
            wins: u16,
            losses: u16,
            games_played: u16,
            last_outcome: Outcome,
        ) -> DispatchResult {
            let reporter = ensure_signed(origin)?;
            Self::ensure_reporter(&reporter)?;
            ensure!(id_a != id_b, Error::<T>::InvalidArgument);
            let delta = StatsDelta::batch(wins, losses, games_played, last_outcome)
                .map_err(Error::<T>::from)?;

            Self::apply(id_a, id_b, delta)?;

            Self::deposit_event(Event::BattlesCompleted {
                reporter,
                id_a,
                id_b,
                wins,
                losses,
                games_played,
                last_outcome,
            });
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        /// Operator account this pallet presents to the ledger.
        pub fn account_id() -> T::AccountId {
            use frame::deps::sp_runtime::traits::AccountIdConversion;
            T::PalletId::get().into_account_truncating()
        }

        fn ensure_reporter(who: &T::AccountId) -> DispatchResult {
            ensure!(
                T::Capabilities::has_capability(who, Capability::RecordBattles),
                Error::<T>::PermissionDenied
            );
            Ok(())
        }

        fn apply(id_a: CardId, id_b: CardId, delta: StatsDelta) -> DispatchResult {
            let mirrored = delta.mirrored();
            let stats_a = T::Cards::battle_stats(id_a).ok_or(Error::<T>::NotFound)?;
            let stats_b = T::Cards::battle_stats(id_b).ok_or(Error::<T>::NotFound)?;
            Self::ensure_fits(&stats_a, &delta)?;
            Self::ensure_fits(&stats_b, &mirrored)?;

            let operator = Self::account_id();
            T::Cards::record_battle(&operator, id_a, delta)?;
            T::Cards::record_battle(&operator, id_b, mirrored)?;

            log::debug!(
                target: crate::LOG_TARGET,
                "recorded {} game(s) between {id_a} and {id_b}",
                delta.games_played(),
            );
            Ok(())
        }

        fn ensure_fits(stats: &BattleStats, delta: &StatsDelta) -> DispatchResult {
            stats.checked_apply(delta).map(|_| ()).map_err(|e| Error::<T>::from(e).into())
        }
    }

    impl<T> From<StatsError> for Error<T> {
        fn from(error: StatsError) -> Self {
            match error {
                StatsError::Malformed => Error::<T>::InvalidArgument,
                StatsError::Overflow => Error::<T>::ArithmeticOverflow,
            }
        }
    }
}
