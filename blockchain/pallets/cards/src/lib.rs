//! # Cards Pallet
//!
//! Ledger of collectible cards. Each card has an id, a holder, a free-form
//! attribute bitfield, battle statistics and the block it was minted in.
//!
//! Minting and attribute or statistic updates check the caller's role through
//! `Config::Capabilities`. Other pallets reach card storage only through the
//! [`CardMinter`] and [`BattleRecorder`] operator interfaces, which check the
//! operator's own role in the same way.
//!
//! `transfer` and `approve` are authorised by ownership instead: the holder, or
//! the holder's approved delegate, needs no role bit to move a card.
//!
//! Ids `1..=ReservedIds` belong to an operator such as the presale and can only
//! be minted through [`CardMinter`].
//!
//! Cards are never destroyed. After minting, a card only changes holder, attributes
//! or statistics.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

#[cfg(test)]
mod mock;


pub mod weights;

const LOG_TARGET: &str = "runtime::ccl-cards";

#[frame::pallet]
pub mod pallet {
    use crate::weights::WeightInfo;
    use ccl_primitives::{
        attributes_in_range, is_zero_account, Attributes, BattleRecorder, BattleStats, Capability,
        CapabilityInspect, CardId, CardMinter, PackedCard, StatsDelta, StatsError,
    };
    use frame::deps::sp_core::U256;
    use frame::prelude::*;

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::config]
    pub trait Config: frame_system::Config {
        /// Because this pallet emits events, it depends on the runtime's definition of an event.
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Role table consulted before every mutation.
        type Capabilities: CapabilityInspect<Self::AccountId>;

        /// Maximum number of cards a single account may hold.
        #[pallet::constant]
        type MaxCardsPerOwner: Get<u32>;

        /// Ids `1..=ReservedIds` are minted only through the `CardMinter` interface.
        #[pallet::constant]
        type ReservedIds: Get<CardId>;

        /// Weight information for extrinsics in this pallet.
        type WeightInfo: WeightInfo;
    }

    /// A card record.
    #[derive(
        Encode,
        Decode,
        TypeInfo,
        CloneNoBound,
        PartialEqNoBound,
        RuntimeDebugNoBound,
        MaxEncodedLen,
    )]
    #[scale_info(skip_type_params(T))]
    pub struct Card<T: Config> {
        /// Current holder. Never the zero identity.
        pub owner: T::AccountId,
        /// Attribute bitfield, limited to `ATTRIBUTE_MASK`.
        pub attributes: Attributes,
        /// Battle statistics.
        pub stats: BattleStats,
        /// Block number at mint.
        pub created_at: BlockNumberFor<T>,
    }

    /// Cards by id.
    #[pallet::storage]
    pub type Cards<T: Config> = StorageMap<_, Blake2_128Concat, CardId, Card<T>, OptionQuery>;

    /// Ids held by each account, ascending.
    #[pallet::storage]
    pub type Holdings<T: Config> = StorageMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        BoundedVec<CardId, T::MaxCardsPerOwner>,
        ValueQuery,
    >;

    /// Account allowed to transfer a card on its holder's behalf.
    #[pallet::storage]
    pub type Approvals<T: Config> =
        StorageMap<_, Blake2_128Concat, CardId, T::AccountId, OptionQuery>;

    /// Number of cards ever minted.
    #[pallet::storage]
    pub type TotalSupply<T: Config> = StorageValue<_, u32, ValueQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// A card was minted.
        Created { id: CardId, owner: T::AccountId },
        /// A card changed holder.
        Transferred { id: CardId, from: T::AccountId, to: T::AccountId },
        /// The approved delegate of a card was set or cleared.
        Approval { id: CardId, owner: T::AccountId, delegate: Option<T::AccountId> },
        /// A card's attribute bitfield changed.
        AttributesUpdated { id: CardId, attributes: Attributes },
        /// Game results were added to a card's statistics.
        BattleRecorded { id: CardId, stats: BattleStats },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// The caller or operator lacks the required capability.
        PermissionDenied,
        /// The card does not exist.
        NotFound,
        /// Zero id, zero identity, self-transfer or an attribute mask out of range.
        InvalidArgument,
        /// A card with this id already exists.
        AlreadyExists,
        /// A counter would exceed its maximum representable value.
        ArithmeticOverflow,
        /// The recipient already holds `MaxCardsPerOwner` cards.
        TooManyCards,
        /// The id is reserved for operator mints.
        ReservedId,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn integrity_test() {
            assert!(T::MaxCardsPerOwner::get() > 0, "MaxCardsPerOwner must be non-zero");
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Mint card `id` to `owner`. Requires `CreateCards` and an id above `ReservedIds`.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::mint())]
        pub fn mint(origin: OriginFor<T>, owner: T::AccountId, id: CardId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_capability(&who, Capability::CreateCards)?;
            ensure!(id > T::ReservedIds::get(), Error::<T>::ReservedId);
            Self::do_mint(&owner, id)
        }

        /// Move card `id` to `to`. The caller must be the holder or its approved delegate;
        /// no role bit is consulted.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, id: CardId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let card = Cards::<T>::get(id).ok_or(Error::<T>::NotFound)?;
            let approved = Approvals::<T>::get(id).is_some_and(|delegate| delegate == who);
            ensure!(card.owner == who || approved, Error::<T>::PermissionDenied);
            ensure!(!is_zero_account(&to), Error::<T>::InvalidArgument);
            ensure!(to != card.owner, Error::<T>::InvalidArgument);

            Self::do_transfer(id, card, to)
        }

        /// Set or clear the single account allowed to transfer card `id`.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn approve(
            origin: OriginFor<T>,
            delegate: Option<T::AccountId>,
            id: CardId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let card = Cards::<T>::get(id).ok_or(Error::<T>::NotFound)?;
            ensure!(card.owner == who, Error::<T>::PermissionDenied);

            match &delegate {
                Some(account) => {
                    ensure!(!is_zero_account(account), Error::<T>::InvalidArgument);
                    ensure!(*account != who, Error::<T>::InvalidArgument);
                    Approvals::<T>::insert(id, account);
                },
                None => Approvals::<T>::remove(id),
            }

            Self::deposit_event(Event::Approval { id, owner: who, delegate });
            Ok(())
        }

        /// Replace the attribute bitfield. Requires `ManageAttributes`.
        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::update_attributes())]
        pub fn set_attributes(
            origin: OriginFor<T>,
            id: CardId,
            mask: Attributes,
        ) -> DispatchResult {
            Self::update_attributes(origin, id, mask, |_, mask| mask)
        }

        /// Set the bits of `mask`. Requires `ManageAttributes`.
        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::update_attributes())]
        pub fn add_attributes(
            origin: OriginFor<T>,
            id: CardId,
            mask: Attributes,
        ) -> DispatchResult {
            Self::update_attributes(origin, id, mask, |current, mask| current | mask)
        }

        /// Clear the bits of `mask`. Requires `ManageAttributes`.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::update_attributes())]
        pub fn remove_attributes(
            origin: OriginFor<T>,
            id: CardId,
            mask: Attributes,
        ) -> DispatchResult {
            Self::update_attributes(origin, id, mask, |current, mask| current & !mask)
        }
    }

    impl<T: Config> Pallet<T> {
        /// Holder of `id`. Absence is an error, not a sentinel.
        pub fn owner_of(id: CardId) -> Result<T::AccountId, DispatchError> {
            Cards::<T>::get(id).map(|card| card.owner).ok_or_else(|| Error::<T>::NotFound.into())
        }

        pub fn exists(id: CardId) -> bool {
            Cards::<T>::contains_key(id)
        }

        pub fn balance_of(who: &T::AccountId) -> u32 {
            Holdings::<T>::get(who).len() as u32
        }

        pub fn total_supply() -> u32 {
            TotalSupply::<T>::get()
        }

        /// Ids currently held by `who`, ascending.
        pub fn collection_of(who: &T::AccountId) -> impl Iterator<Item = CardId> {
            Holdings::<T>::get(who).into_iter()
        }

        pub fn approved(id: CardId) -> Option<T::AccountId> {
            Approvals::<T>::get(id)
        }

        /// The card as a single `U256` (see `ccl_primitives::packed` for the layout).
        pub fn packed(id: CardId) -> Result<U256, DispatchError> {
            let card = Cards::<T>::get(id).ok_or(Error::<T>::NotFound)?;
            Ok(PackedCard::new(id, &card.owner, card.attributes, card.stats).pack())
        }

        fn ensure_capability(who: &T::AccountId, capability: Capability) -> DispatchResult {
            ensure!(T::Capabilities::has_capability(who, capability), Error::<T>::PermissionDenied);
            Ok(())
        }

        pub(crate) fn do_mint(owner: &T::AccountId, id: CardId) -> DispatchResult {
            ensure!(id != 0, Error::<T>::InvalidArgument);
            ensure!(!is_zero_account(owner), Error::<T>::InvalidArgument);
            ensure!(!Cards::<T>::contains_key(id), Error::<T>::AlreadyExists);
            let supply = TotalSupply::<T>::get()
                .checked_add(1)
                .ok_or(Error::<T>::ArithmeticOverflow)?;

            Holdings::<T>::try_mutate(owner, |held| Self::hold(held, id))?;
            Cards::<T>::insert(
                id,
                Card {
                    owner: owner.clone(),
                    attributes: 0,
                    stats: BattleStats::default(),
                    created_at: frame_system::Pallet::<T>::block_number(),
                },
            );
            TotalSupply::<T>::put(supply);

            log::debug!(target: crate::LOG_TARGET, "minted card {id} to {owner:?}");
            Self::deposit_event(Event::Created { id, owner: owner.clone() });
            Ok(())
        }

        fn do_transfer(id: CardId, mut card: Card<T>, to: T::AccountId) -> DispatchResult {
            let from = card.owner.clone();
            Holdings::<T>::try_mutate(&to, |held| Self::hold(held, id))?;
            Holdings::<T>::mutate_exists(&from, |maybe_held| {
                if let Some(held) = maybe_held {
                    if let Ok(index) = held.binary_search(&id) {
                        held.remove(index);
                    }
                    if held.is_empty() {
                        *maybe_held = None;
                    }
                }
            });

            card.owner = to.clone();
            Cards::<T>::insert(id, card);
            Approvals::<T>::remove(id);

            log::debug!(target: crate::LOG_TARGET, "card {id} moved from {from:?} to {to:?}");
            Self::deposit_event(Event::Transferred { id, from, to });
            Ok(())
        }

        fn hold(
            held: &mut BoundedVec<CardId, T::MaxCardsPerOwner>,
            id: CardId,
        ) -> DispatchResult {
            let index = held.binary_search(&id).err().ok_or(Error::<T>::AlreadyExists)?;
            held.try_insert(index, id).map_err(|_| Error::<T>::TooManyCards)?;
            Ok(())
        }

        fn update_attributes(
            origin: OriginFor<T>,
            id: CardId,
            mask: Attributes,
            apply: impl FnOnce(Attributes, Attributes) -> Attributes,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_capability(&who, Capability::ManageAttributes)?;
            ensure!(attributes_in_range(mask), Error::<T>::InvalidArgument);

            let attributes = Cards::<T>::try_mutate(id, |maybe_card| -> Result<_, DispatchError> {
                let card = maybe_card.as_mut().ok_or(Error::<T>::NotFound)?;
                card.attributes = apply(card.attributes, mask);
                Ok(card.attributes)
            })?;

            Self::deposit_event(Event::AttributesUpdated { id, attributes });
            Ok(())
        }
    }

    impl<T: Config> CardMinter<T::AccountId> for Pallet<T> {
        fn exists(id: CardId) -> bool {
            Cards::<T>::contains_key(id)
        }

        fn reserved_ids() -> CardId {
            T::ReservedIds::get()
        }

        fn mint(operator: &T::AccountId, owner: &T::AccountId, id: CardId) -> DispatchResult {
            Self::ensure_capability(operator, Capability::CreateCards)?;
            Self::do_mint(owner, id)
        }
    }

    impl<T: Config> BattleRecorder<T::AccountId> for Pallet<T> {
        fn battle_stats(id: CardId) -> Option<BattleStats> {
            Cards::<T>::get(id).map(|card| card.stats)
        }

        fn record_battle(operator: &T::AccountId, id: CardId, delta: StatsDelta) -> DispatchResult {
            Self::ensure_capability(operator, Capability::RecordBattles)?;

            let stats = Cards::<T>::try_mutate(id, |maybe_card| -> Result<_, DispatchError> {
                let card = maybe_card.as_mut().ok_or(Error::<T>::NotFound)?;
                card.stats = card.stats.checked_apply(&delta).map_err(Error::<T>::from)?;
                Ok(card.stats)
            })?;

            log::trace!(target: crate::LOG_TARGET, "card {id} stats now {stats:?}");
            Self::deposit_event(Event::BattleRecorded { id, stats });
            Ok(())
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
