//! Benchmarking setup for pallet-guarded-token

use super::*;

#[allow(unused)]
use crate::Pallet as GuardedToken;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

/// Installs a fresh owner and returns it.
fn set_owner<T: Config>() -> T::AccountId {
    let owner: T::AccountId = account("owner", 0, 0);
    Owner::<T>::put(&owner);
    owner
}

#[benchmarks]
mod benchmarks {
    use super::*;

    // Worst case: fee leg plus net leg, anti-automation window open.
    #[benchmark]
    fn transfer() {
        let caller: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, 0);
        let dev_wallet: T::AccountId = account("dev_wallet", 0, 0);

        DevWallet::<T>::put(&dev_wallet);
        FeesEnabled::<T>::put(true);
        FeePercent::<T>::put(policy::MAX_FEE_PERCENT);
        TradingEnabled::<T>::put(true);
        AntiBotEnabled::<T>::put(true);
        LaunchHeight::<T>::put(frame_system::Pallet::<T>::block_number());
        MaxTxAmount::<T>::put(u128::MAX);
        MaxWalletAmount::<T>::put(u128::MAX);
        Balances::<T>::insert(&caller, 10_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), recipient.clone(), 1_000_000);

        assert_eq!(Balances::<T>::get(&recipient), 900_000);
        assert_eq!(Balances::<T>::get(&dev_wallet), 100_000);
        assert!(LastTxHeight::<T>::contains_key(&caller));
    }

    #[benchmark]
    fn mint() {
        let owner = set_owner::<T>();
        let recipient: T::AccountId = account("recipient", 0, 0);
        let amount: u128 = 1_000_000;
        let before = Balances::<T>::get(&recipient);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), recipient.clone(), amount);

        assert_eq!(Balances::<T>::get(&recipient), before + amount);
    }

    #[benchmark]
    fn toggle_fees() {
        let owner = set_owner::<T>();
        FeesEnabled::<T>::put(true);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), false);

        assert_eq!(FeesEnabled::<T>::get(), false);
    }

    #[benchmark]
    fn toggle_trading() {
        let owner = set_owner::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), true);

        assert_eq!(TradingEnabled::<T>::get(), true);
        assert_eq!(LaunchHeight::<T>::get(), frame_system::Pallet::<T>::block_number());
    }

    #[benchmark]
    fn set_dev_wallet() {
        let owner = set_owner::<T>();
        let wallet: T::AccountId = account("dev_wallet", 1, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), wallet.clone());

        assert_eq!(DevWallet::<T>::get(), Some(wallet));
    }

    #[benchmark]
    fn set_whitelist() {
        let owner = set_owner::<T>();
        let target: T::AccountId = whitelisted_caller();

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), target.clone(), true);

        assert_eq!(Whitelist::<T>::get(&target), true);
    }

    #[benchmark]
    fn set_blacklist() {
        let owner = set_owner::<T>();
        let target: T::AccountId = whitelisted_caller();

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), target.clone(), true);

        assert_eq!(Blacklist::<T>::get(&target), true);
    }

    #[benchmark]
    fn set_excluded_from_fees() {
        let owner = set_owner::<T>();
        let target: T::AccountId = whitelisted_caller();

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), target.clone(), true);

        assert_eq!(ExcludedFromFees::<T>::get(&target), true);
    }

    #[benchmark]
    fn set_max_tx_amount() {
        let owner = set_owner::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), 1_000);

        assert_eq!(MaxTxAmount::<T>::get(), 1_000);
    }

    #[benchmark]
    fn set_max_wallet_amount() {
        let owner = set_owner::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), 1_000);

        assert_eq!(MaxWalletAmount::<T>::get(), 1_000);
    }

    #[benchmark]
    fn set_fee_percent() {
        let owner = set_owner::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), policy::MAX_FEE_PERCENT);

        assert_eq!(FeePercent::<T>::get(), policy::MAX_FEE_PERCENT);
    }

    #[benchmark]
    fn disable_anti_bot() {
        let owner = set_owner::<T>();
        AntiBotEnabled::<T>::put(true);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner));

        assert_eq!(AntiBotEnabled::<T>::get(), false);
    }

    impl_benchmark_test_suite!(GuardedToken, crate::mock::new_test_ext(), crate::mock::Test);
}
