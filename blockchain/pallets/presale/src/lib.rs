//! # Presale Pallet
//!
//! Primary sale of a fixed inventory of cards.
//!
//! ## Lifecycle
//!
//! `Uninitialized -> Initializing -> Ready -> Exhausted`. A presale manager calls
//! [`Pallet::init`] until every inventory slot is marked available, at which point the
//! market opens. Purchases are accepted only while `Ready`; selling the last slot
//! closes the market for good.
//!
//! ## Pricing
//!
//! Unit prices follow `Config::Prices`, a monotonic function of the number of units
//! already sold. A multi-unit purchase prices each unit at the curve value just before
//! it is sold. [`Pallet::buy_specific`] uses the flat `Config::SpecificPrice` instead.
//!
//! ## Selection
//!
//! Random purchases draw slots without replacement from the availability bitmap.
//! The seed mixes the runtime randomness source with the payer, the sold counter and
//! the block number. Anyone who can see those inputs can predict the draw.
//!
//! Slot `s` sells card id `s + 1`. Cards are minted through `Config::Cards` under
//! this pallet's account, which must hold `CreateCards`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
mod mock;


mod impls;
pub mod weights;

const LOG_TARGET: &str = "runtime::ccl-presale";

#[frame::pallet]
pub mod pallet {
    use crate::weights::WeightInfo;
    use ccl_primitives::{
        bitmap, is_zero_account, Capability, CapabilityInspect, CardId, CardMinter, PriceCurve,
    };
    use frame::deps::sp_runtime::traits::{SaturatedConversion, Saturating, Zero};
    use frame::prelude::*;
    use frame::traits::{fungible, tokens::Preservation, Randomness};

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::config]
    pub trait Config: frame_system::Config {
        /// Because this pallet emits events, it depends on the runtime's definition of an event.
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Currency used for payments, change and withdrawals.
        type Currency: fungible::Inspect<Self::AccountId> + fungible::Mutate<Self::AccountId>;

        /// Role table consulted for managers and withdrawals.
        type Capabilities: CapabilityInspect<Self::AccountId>;

        /// The card ledger that mints sold cards.
        type Cards: CardMinter<Self::AccountId>;

        /// Source of randomness mixed into the slot selection seed.
        type Randomness: Randomness<Self::Hash, BlockNumberFor<Self>>;

        /// Unit price as a function of the sold counter.
        type Prices: PriceCurve;

        /// Number of inventory slots.
        #[pallet::constant]
        type Capacity: Get<u16>;

        /// Bound on the bitmap length in 64-bit words. Must cover `Capacity`.
        #[pallet::constant]
        type MaxInventoryWords: Get<u32>;

        /// Largest batch of slots `init` marks per call.
        #[pallet::constant]
        type MaxInitBatch: Get<u16>;

        /// Largest number of cards bought in one random purchase. At least 3.
        #[pallet::constant]
        type MaxPurchase: Get<u16>;

        /// Flat price of `buy_specific`.
        #[pallet::constant]
        type SpecificPrice: Get<u64>;

        /// Pallet ID used to derive the account that receives payments and mints cards.
        #[pallet::constant]
        type PalletId: Get<frame::deps::frame_support::PalletId>;

        /// Weight information for extrinsics in this pallet.
        type WeightInfo: WeightInfo;
    }

    /// Type alias for the balance type from the configured Currency.
    pub type BalanceOf<T> = <<T as Config>::Currency as fungible::Inspect<
        <T as frame_system::Config>::AccountId,
    >>::Balance;

    #[derive(
        Encode,
        Decode,
        DecodeWithMemTracking,
        TypeInfo,
        MaxEncodedLen,
        Clone,
        Copy,
        PartialEq,
        Eq,
        RuntimeDebug,
        Default,
    )]
    pub enum MarketPhase {
        #[default]
        Uninitialized,
        /// Some but not all slots have been marked.
        Initializing,
        /// Open for purchases.
        Ready,
        /// Every slot is sold.
        Exhausted,
    }

    /// Prices derived from the sold counter, refreshed after every sale.
    #[derive(
        Encode, Decode, TypeInfo, MaxEncodedLen, Clone, Copy, PartialEq, Eq, RuntimeDebug, Default,
    )]
    pub struct PriceWindow {
        /// Price of the most recent sale. Zero before the first one.
        pub last: u64,
        /// Price of the next unit.
        pub current: u64,
        /// Price of the unit after the next one.
        pub next: u64,
    }

    #[pallet::storage]
    pub type CurrentPhase<T: Config> = StorageValue<_, MarketPhase, ValueQuery>;

    /// Availability bitmap, one bit per slot, LSB first within each word.
    #[pallet::storage]
    pub type Inventory<T: Config> =
        StorageValue<_, BoundedVec<u64, T::MaxInventoryWords>, ValueQuery>;

    /// Number of slots marked by `init` so far.
    #[pallet::storage]
    pub type MarkedSlots<T: Config> = StorageValue<_, u16, ValueQuery>;

    /// Number of completed `init` calls.
    #[pallet::storage]
    pub type InitRounds<T: Config> = StorageValue<_, u32, ValueQuery>;

    #[pallet::storage]
    pub type Sold<T: Config> = StorageValue<_, u16, ValueQuery>;

    #[pallet::storage]
    pub type CurrentPrices<T: Config> = StorageValue<_, PriceWindow, ValueQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// `init` marked the slots `start..start + count` available.
        InventoryMarked { round: u32, start: u16, count: u16 },
        /// Every slot is marked; purchases are open.
        MarketReady { capacity: u16 },
        /// Cards were sold. `change` was returned to the payer.
        Purchased {
            payer: T::AccountId,
            recipient: T::AccountId,
            quantity: u16,
            total_price: BalanceOf<T>,
            change: BalanceOf<T>,
        },
        /// Counters and prices after a sale or opening.
        StateChanged { sold: u16, left: u16, last_price: u64, current_price: u64, next_price: u64 },
        /// Proceeds left the market account.
        Withdrawn { to: T::AccountId, amount: BalanceOf<T> },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// The caller lacks the required capability.
        PermissionDenied,
        /// Bad batch size, purchase count or recipient.
        InvalidArgument,
        /// Every slot is already marked.
        AlreadyInitialized,
        /// The market is not open yet.
        NotReady,
        /// Every slot is sold.
        Exhausted,
        /// The payment is below the required price.
        InsufficientPayment,
        /// The requested slot was already sold.
        AlreadySold,
        /// The requested card id is outside the inventory.
        NotFound,
        /// The price of the purchase does not fit in a `u64`.
        ArithmeticOverflow,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn integrity_test() {
            let capacity = T::Capacity::get();
            assert!(capacity > 0, "Capacity must be non-zero");
            assert!(
                bitmap::words_for(u32::from(capacity)) <= T::MaxInventoryWords::get(),
                "MaxInventoryWords must cover Capacity"
            );
            assert!(T::MaxInitBatch::get() > 0, "MaxInitBatch must be non-zero");
            assert!(T::MaxPurchase::get() >= 3, "MaxPurchase must allow buying three");
            assert!(
                capacity <= T::Cards::reserved_ids(),
                "the ledger must reserve every id the presale sells"
            );
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Mark the next `batch_size` slots available. Requires `ManagePresale`.
        ///
        /// The call that marks the last slot opens the market.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::init())]
        pub fn init(origin: OriginFor<T>, batch_size: u16) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_capability(&who, Capability::ManagePresale)?;
            ensure!(
                matches!(
                    CurrentPhase::<T>::get(),
                    MarketPhase::Uninitialized | MarketPhase::Initializing
                ),
                Error::<T>::AlreadyInitialized
            );
            ensure!(
                batch_size > 0 && batch_size <= T::MaxInitBatch::get(),
                Error::<T>::InvalidArgument
            );

            let capacity = T::Capacity::get();
            let start = MarkedSlots::<T>::get();
            let count = batch_size.min(capacity.saturating_sub(start));

            let mut words = Inventory::<T>::get().into_inner();
            if words.is_empty() {
                words.resize(bitmap::words_for(u32::from(capacity)) as usize, 0);
            }
            bitmap::mark_available(&mut words, start, count);
            Inventory::<T>::put(BoundedVec::truncate_from(words));

            let marked = start.saturating_add(count);
            let round = InitRounds::<T>::mutate(|rounds| {
                *rounds = rounds.saturating_add(1);
                *rounds
            });
            MarkedSlots::<T>::put(marked);
            Self::deposit_event(Event::InventoryMarked { round, start, count });

            if marked >= capacity {
                CurrentPhase::<T>::put(MarketPhase::Ready);
                Self::refresh_prices(0);
                log::info!(target: crate::LOG_TARGET, "presale open after {round} round(s)");
                Self::deposit_event(Event::MarketReady { capacity });
                Self::deposit_state_changed();
            } else {
                CurrentPhase::<T>::put(MarketPhase::Initializing);
            }
            Ok(())
        }

        /// Buy one random card for the caller.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::buy_random(1))]
        pub fn buy_one_random(origin: OriginFor<T>, payment: BalanceOf<T>) -> DispatchResult {
            let payer = ensure_signed(origin)?;
            Self::do_buy_random(&payer, &payer, 1, payment)
        }

        /// Buy three random cards for the caller.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::buy_random(3))]
        pub fn buy_three_random(origin: OriginFor<T>, payment: BalanceOf<T>) -> DispatchResult {
            let payer = ensure_signed(origin)?;
            Self::do_buy_random(&payer, &payer, 3, payment)
        }

        /// Buy `count` random cards for `recipient`. The caller pays.
        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::buy_random(u32::from(*count)))]
        pub fn buy_random_for(
            origin: OriginFor<T>,
            recipient: T::AccountId,
            count: u16,
            payment: BalanceOf<T>,
        ) -> DispatchResult {
            let payer = ensure_signed(origin)?;
            Self::do_buy_random(&payer, &recipient, count, payment)
        }

        /// Buy the still-available card `id` for the caller at `SpecificPrice`.
        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::buy_specific())]
        pub fn buy_specific(
            origin: OriginFor<T>,
            id: CardId,
            payment: BalanceOf<T>,
        ) -> DispatchResult {
            let payer = ensure_signed(origin)?;
            Self::ensure_ready()?;
            ensure!(id > 0 && id <= T::Capacity::get(), Error::<T>::NotFound);

            let slot = id - 1;
            let mut words = Inventory::<T>::get().into_inner();
            ensure!(bitmap::take(&mut words, slot), Error::<T>::AlreadySold);

            let required: BalanceOf<T> = T::SpecificPrice::get().saturated_into();
            ensure!(payment >= required, Error::<T>::InsufficientPayment);

            let market = Self::account_id();
            Self::collect(&payer, &market, payment)?;
            T::Cards::mint(&market, &payer, id)?;
            Self::commit_sale(words, 1);
            let change = Self::refund(&market, &payer, payment, required)?;

            Self::deposit_event(Event::Purchased {
                payer: payer.clone(),
                recipient: payer,
                quantity: 1,
                total_price: required,
                change,
            });
            Self::deposit_state_changed();
            Ok(())
        }

        /// Move `amount` of proceeds to `to`. Requires `WithdrawFunds`.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::withdraw())]
        pub fn withdraw(
            origin: OriginFor<T>,
            to: T::AccountId,
            amount: BalanceOf<T>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_capability(&who, Capability::WithdrawFunds)?;
            ensure!(!is_zero_account(&to), Error::<T>::InvalidArgument);

            <T::Currency as fungible::Mutate<T::AccountId>>::transfer(
                &Self::account_id(),
                &to,
                amount,
                Preservation::Expendable,
            )?;

            log::debug!(target: crate::LOG_TARGET, "withdrew {amount:?} to {to:?}");
            Self::deposit_event(Event::Withdrawn { to, amount });
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        fn do_buy_random(
            payer: &T::AccountId,
            recipient: &T::AccountId,
            count: u16,
            payment: BalanceOf<T>,
        ) -> DispatchResult {
            Self::ensure_ready()?;
            ensure!(count > 0 && count <= T::MaxPurchase::get(), Error::<T>::InvalidArgument);
            let market = Self::account_id();
            ensure!(!is_zero_account(recipient), Error::<T>::InvalidArgument);
            ensure!(*recipient != market, Error::<T>::InvalidArgument);

            let sold = Sold::<T>::get();
            ensure!(count <= Self::left(), Error::<T>::InvalidArgument);
            let required: BalanceOf<T> = T::Prices::batch_cost(sold, count)
                .ok_or(Error::<T>::ArithmeticOverflow)?
                .saturated_into();
            ensure!(payment >= required, Error::<T>::InsufficientPayment);

            Self::collect(payer, &market, payment)?;

            let mut words = Inventory::<T>::get().into_inner();
            let slots = Self::draw_slots(&mut words, payer, sold, count)?;
            for slot in &slots {
                T::Cards::mint(&market, recipient, slot.saturating_add(1))?;
            }
            Self::commit_sale(words, count);

            let change = Self::refund(&market, payer, payment, required)?;

            Self::deposit_event(Event::Purchased {
                payer: payer.clone(),
                recipient: recipient.clone(),
                quantity: count,
                total_price: required,
                change,
            });
            Self::deposit_state_changed();
            Ok(())
        }

        fn ensure_capability(who: &T::AccountId, capability: Capability) -> DispatchResult {
            ensure!(T::Capabilities::has_capability(who, capability), Error::<T>::PermissionDenied);
            Ok(())
        }

        fn ensure_ready() -> DispatchResult {
            match CurrentPhase::<T>::get() {
                MarketPhase::Ready => Ok(()),
                MarketPhase::Exhausted => Err(Error::<T>::Exhausted.into()),
                MarketPhase::Uninitialized | MarketPhase::Initializing => {
                    Err(Error::<T>::NotReady.into())
                },
            }
        }

        fn collect(
            payer: &T::AccountId,
            market: &T::AccountId,
            payment: BalanceOf<T>,
        ) -> DispatchResult {
            <T::Currency as fungible::Mutate<T::AccountId>>::transfer(
                payer,
                market,
                payment,
                Preservation::Expendable,
            )?;
            Ok(())
        }

        /// Return `payment - required` to the payer. Runs after the sale is committed.
        fn refund(
            market: &T::AccountId,
            payer: &T::AccountId,
            payment: BalanceOf<T>,
            required: BalanceOf<T>,
        ) -> Result<BalanceOf<T>, DispatchError> {
            let change = payment.saturating_sub(required);
            if !change.is_zero() {
                <T::Currency as fungible::Mutate<T::AccountId>>::transfer(
                    market,
                    payer,
                    change,
                    Preservation::Expendable,
                )?;
            }
            Ok(change)
        }
    }
}
