//! Weight functions for pallet-ccl-presale.
//!
//! This file is intended to be regenerated with the benchmark CLI once benchmark
//! scenarios exist for this pallet.

#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame::{deps::frame_support::weights::constants::RocksDbWeight, prelude::*};

/// Weight functions needed for pallet-ccl-presale.
pub trait WeightInfo {
    fn init() -> Weight;
    fn buy_random(n: u32, ) -> Weight;
    fn buy_specific() -> Weight;
    fn withdraw() -> Weight;
}

/// Weights for pallet-ccl-presale using runtime database weights.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    /// Storage: `Access::Roles` (r:1 w:0)
    /// Storage: `Presale::CurrentPhase` (r:1 w:1)
    /// Storage: `Presale::Inventory` (r:1 w:1)
    /// Storage: `Presale::MarkedSlots` (r:1 w:1)
    /// Storage: `Presale::InitRounds` (r:1 w:1)
    /// Storage: `Presale::CurrentPrices` (r:0 w:1)
    fn init() -> Weight {
        Weight::from_parts(30_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(5))
            .saturating_add(T::DbWeight::get().writes(5))
    }

    /// Storage: `System::Account` (r:2 w:2)
    /// Storage: `Presale::Inventory` (r:1 w:1)
    /// Storage: `Presale::Sold` (r:1 w:1)
    /// Storage: `Cards::Cards` (r:n w:n)
    /// The range of component `n` is `[1, 5]`.
    fn buy_random(n: u32, ) -> Weight {
        Weight::from_parts(60_000_000, 0)
            .saturating_add(Weight::from_parts(25_000_000, 0).saturating_mul(n.into()))
            .saturating_add(T::DbWeight::get().reads(6))
            .saturating_add(T::DbWeight::get().reads((3_u64).saturating_mul(n.into())))
            .saturating_add(T::DbWeight::get().writes(6))
            .saturating_add(T::DbWeight::get().writes((3_u64).saturating_mul(n.into())))
    }

    fn buy_specific() -> Weight {
        Weight::from_parts(80_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(9))
            .saturating_add(T::DbWeight::get().writes(9))
    }

    fn withdraw() -> Weight {
        Weight::from_parts(35_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(2))
    }
}

// For backwards compatibility and tests.
impl WeightInfo for () {
    fn init() -> Weight {
        Weight::from_parts(30_000_000, 0)
            .saturating_add(RocksDbWeight::get().reads(5))
            .saturating_add(RocksDbWeight::get().writes(5))
    }

    fn buy_random(n: u32, ) -> Weight {
        Weight::from_parts(60_000_000, 0)
            .saturating_add(Weight::from_parts(25_000_000, 0).saturating_mul(n.into()))
            .saturating_add(RocksDbWeight::get().reads(6))
            .saturating_add(RocksDbWeight::get().reads((3_u64).saturating_mul(n.into())))
            .saturating_add(RocksDbWeight::get().writes(6))
            .saturating_add(RocksDbWeight::get().writes((3_u64).saturating_mul(n.into())))
    }

    fn buy_specific() -> Weight {
        Weight::from_parts(80_000_000, 0)
            .saturating_add(RocksDbWeight::get().reads(9))
            .saturating_add(RocksDbWeight::get().writes(9))
    }

    fn withdraw() -> Weight {
        Weight::from_parts(35_000_000, 0)
            .saturating_add(RocksDbWeight::get().reads(3))
            .saturating_add(RocksDbWeight::get().writes(2))
    }
}
