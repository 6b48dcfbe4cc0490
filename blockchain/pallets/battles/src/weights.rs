//! Weight functions for pallet-ccl-battles.
//!
//! This file is intended to be regenerated with the benchmark CLI once benchmark
//! scenarios exist for this pallet.

#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame::{deps::frame_support::weights::constants::RocksDbWeight, prelude::*};

/// Weight functions needed for pallet-ccl-battles.
pub trait WeightInfo {
    fn battle_complete() -> Weight;
    fn battles_complete() -> Weight;
}

/// Weights for pallet-ccl-battles using runtime database weights.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    /// Storage: `Access::Roles` (r:2 w:0)
    /// Storage: `Cards::Cards` (r:2 w:2)
    fn battle_complete() -> Weight {
        Weight::from_parts(30_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(4))
            .saturating_add(T::DbWeight::get().writes(2))
    }

    /// Storage: `Access::Roles` (r:2 w:0)
    /// Storage: `Cards::Cards` (r:2 w:2)
    fn battles_complete() -> Weight {
        Weight::from_parts(32_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(4))
            .saturating_add(T::DbWeight::get().writes(2))
    }
}

// For backwards compatibility and tests.
impl WeightInfo for () {
    fn battle_complete() -> Weight {
        Weight::from_parts(30_000_000, 0)
            .saturating_add(RocksDbWeight::get().reads(4))
            .saturating_add(RocksDbWeight::get().writes(2))
    }

    fn battles_complete() -> Weight {
        Weight::from_parts(32_000_000, 0)
            .saturating_add(RocksDbWeight::get().reads(4))
            .saturating_add(RocksDbWeight::get().writes(2))
    }
}
