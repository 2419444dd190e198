//! Weights for pallet-guarded-token.
//!
//! Hand-estimated from the storage accesses of each call until benchmark
//! output replaces them.

#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
    fn transfer() -> Weight;
    fn mint() -> Weight;
    fn toggle_fees() -> Weight;
    fn toggle_trading() -> Weight;
    fn set_dev_wallet() -> Weight;
    fn set_whitelist() -> Weight;
    fn set_blacklist() -> Weight;
    fn set_excluded_from_fees() -> Weight;
    fn set_max_tx_amount() -> Weight;
    fn set_max_wallet_amount() -> Weight;
    fn set_fee_percent() -> Weight;
    fn disable_anti_bot() -> Weight;
}

/// Weights using the runtime's configured database weights.
pub struct SubstrateWeight<T>(PhantomData<T>);

impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    // Worst case: fees on, anti-bot window open, both legs written.
    fn transfer() -> Weight {
        Weight::from_parts(45_000_000, 3_600).saturating_add(T::DbWeight::get().reads_writes(21, 5))
    }
    fn mint() -> Weight {
        Weight::from_parts(12_000_000, 3_500).saturating_add(T::DbWeight::get().reads_writes(3, 2))
    }
    fn toggle_fees() -> Weight {
        Weight::from_parts(8_000_000, 1_500).saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn toggle_trading() -> Weight {
        Weight::from_parts(9_000_000, 1_500).saturating_add(T::DbWeight::get().reads_writes(1, 2))
    }
    fn set_dev_wallet() -> Weight {
        Weight::from_parts(8_000_000, 1_500).saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn set_whitelist() -> Weight {
        Weight::from_parts(9_000_000, 1_500).saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn set_blacklist() -> Weight {
        Weight::from_parts(9_000_000, 1_500).saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn set_excluded_from_fees() -> Weight {
        Weight::from_parts(9_000_000, 1_500).saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn set_max_tx_amount() -> Weight {
        Weight::from_parts(8_000_000, 1_500).saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn set_max_wallet_amount() -> Weight {
        Weight::from_parts(8_000_000, 1_500).saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn set_fee_percent() -> Weight {
        Weight::from_parts(8_000_000, 1_500).saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
    fn disable_anti_bot() -> Weight {
        Weight::from_parts(8_000_000, 1_500).saturating_add(T::DbWeight::get().reads_writes(1, 1))
    }
}

// For tests and runtimes that have not run benchmarks.
impl WeightInfo for () {
    fn transfer() -> Weight {
        Weight::from_parts(45_000_000, 3_600).saturating_add(RocksDbWeight::get().reads_writes(21, 5))
    }
    fn mint() -> Weight {
        Weight::from_parts(12_000_000, 3_500).saturating_add(RocksDbWeight::get().reads_writes(3, 2))
    }
    fn toggle_fees() -> Weight {
        Weight::from_parts(8_000_000, 1_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn toggle_trading() -> Weight {
        Weight::from_parts(9_000_000, 1_500).saturating_add(RocksDbWeight::get().reads_writes(1, 2))
    }
    fn set_dev_wallet() -> Weight {
        Weight::from_parts(8_000_000, 1_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn set_whitelist() -> Weight {
        Weight::from_parts(9_000_000, 1_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn set_blacklist() -> Weight {
        Weight::from_parts(9_000_000, 1_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn set_excluded_from_fees() -> Weight {
        Weight::from_parts(9_000_000, 1_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn set_max_tx_amount() -> Weight {
        Weight::from_parts(8_000_000, 1_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn set_max_wallet_amount() -> Weight {
        Weight::from_parts(8_000_000, 1_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn set_fee_percent() -> Weight {
        Weight::from_parts(8_000_000, 1_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn disable_anti_bot() -> Weight {
        Weight::from_parts(8_000_000, 1_500).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
}
