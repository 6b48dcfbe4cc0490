use crate::pallet::*;
use alloc::vec::Vec;
use ccl_primitives::{bitmap, PresaleSummary, PriceCurve, SaleRng, XorShiftRng};
use frame::deps::sp_core::U256;
use frame::prelude::*;
use frame::traits::Randomness;

const SEED_CONTEXT: &[u8] = b"ccl/presale";

impl<T: Config> Pallet<T> {
    /// Account that receives payments and mints sold cards.
    pub fn account_id() -> T::AccountId {
        use frame::deps::sp_runtime::traits::AccountIdConversion;
        T::PalletId::get().into_account_truncating()
    }

    pub fn phase() -> MarketPhase {
        CurrentPhase::<T>::get()
    }

    /// Whether every slot has been marked. Stays true once the market is exhausted.
    pub fn initialized() -> bool {
        matches!(Self::phase(), MarketPhase::Ready | MarketPhase::Exhausted)
    }

    pub fn sold() -> u16 {
        Sold::<T>::get()
    }

    pub fn left() -> u16 {
        T::Capacity::get().saturating_sub(Self::sold())
    }

    pub fn prices() -> PriceWindow {
        CurrentPrices::<T>::get()
    }

    pub fn summary() -> PresaleSummary {
        let prices = Self::prices();
        PresaleSummary {
            sold: Self::sold(),
            left: Self::left(),
            last_price: prices.last,
            current_price: prices.current,
            next_price: prices.next,
        }
    }

    /// [`Self::summary`] in its packed `U256` form.
    pub fn packed_summary() -> U256 {
        Self::summary().pack()
    }

    /// The availability bitmap words. Empty before the first `init`.
    pub fn bitmap() -> Vec<u64> {
        Inventory::<T>::get().into_inner()
    }

    /// Price of the next `count` random units, or `None` if they cannot be bought.
    pub fn quote(count: u16) -> Option<u64> {
        if count == 0 || count > Self::left() {
            return None;
        }
        T::Prices::batch_cost(Self::sold(), count)
    }

    /// Clear `count` distinct available slots chosen by the seeded generator.
    pub(crate) fn draw_slots(
        words: &mut [u64],
        payer: &T::AccountId,
        sold: u16,
        count: u16,
    ) -> Result<Vec<u16>, DispatchError> {
        let mut rng = XorShiftRng::seed_from_digest(Self::selection_seed(payer, sold));
        (0..count)
            .map(|_| {
                let n = rng.gen_range(bitmap::count_available(words));
                bitmap::take_nth_available(words, n).ok_or_else(|| Error::<T>::Exhausted.into())
            })
            .collect()
    }

    fn selection_seed(payer: &T::AccountId, sold: u16) -> [u8; 16] {
        let (random, _) = T::Randomness::random(SEED_CONTEXT);
        let mut seed_data = Vec::new();
        seed_data.extend_from_slice(&random.encode());
        seed_data.extend_from_slice(&payer.encode());
        seed_data.extend_from_slice(&sold.encode());
        seed_data.extend_from_slice(&frame_system::Pallet::<T>::block_number().encode());
        frame::hashing::blake2_128(&seed_data)
    }

    /// Store the updated bitmap, advance the sold counter and refresh prices.
    pub(crate) fn commit_sale(words: Vec<u64>, count: u16) {
        Inventory::<T>::put(BoundedVec::truncate_from(words));
        let sold = Sold::<T>::mutate(|sold| {
            *sold = sold.saturating_add(count);
            *sold
        });
        Self::refresh_prices(sold);

        if sold >= T::Capacity::get() {
            CurrentPhase::<T>::put(MarketPhase::Exhausted);
            log::info!(target: crate::LOG_TARGET, "presale sold out at {sold} unit(s)");
        }
    }

    pub(crate) fn refresh_prices(sold: u16) {
        let (last, current, next) = T::Prices::window(sold);
        CurrentPrices::<T>::put(PriceWindow { last, current, next });
    }

    pub(crate) fn deposit_state_changed() {
        let summary = Self::summary();
        log::trace!(target: crate::LOG_TARGET, "presale state {summary:?}");
        Self::deposit_event(Event::StateChanged {
            sold: summary.sold,
            left: summary.left,
            last_price: summary.last_price,
            current_price: summary.current_price,
            next_price: summary.next_price,
        });
    }
}
