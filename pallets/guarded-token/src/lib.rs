#![cfg_attr(not(feature = "std"), no_std)]
// Allow deprecated getters for MVP (storage is read through the generated getters)
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

//! # Guarded Token Pallet
//!
//! A fungible token whose every transfer passes a fixed policy pipeline before
//! any balance moves: blacklist and trading gate, launch-window anti-automation,
//! per-transfer and per-wallet caps, then a percentage fee routed to the dev
//! wallet. See [`policy`] for the stages themselves.
//!
//! The owner set at genesis is the only account allowed to change the policy.

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*, PalletId};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_runtime::traits::AccountIdConversion;
use sp_std::prelude::*;

pub use pallet::*;
pub use weights::WeightInfo;

pub mod policy;
pub mod weights;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

use policy::{PolicyConfig, PolicyState, Rejection, TransferInstruction, TransferRequest};

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

pub const LOG_TARGET: &str = "runtime::guarded-token";

/// Smallest units per whole token (18 decimals).
pub const UNIT: u128 = 1_000_000_000_000_000_000;

/// Supply minted to the owner at genesis.
pub const INITIAL_SUPPLY: u128 = 1_000_000_000 * UNIT;

pub const DEFAULT_FEE_PERCENT: u8 = 2;

pub type PolicyConfigOf<T> =
    PolicyConfig<<T as frame_system::Config>::AccountId, BlockNumberFor<T>>;

pub type TransferInstructionOf<T> =
    TransferInstruction<<T as frame_system::Config>::AccountId, BlockNumberFor<T>>;

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// The null account. Never a valid dev wallet; transfers into it are
        /// burns and skip the wallet cap.
        #[pallet::constant]
        type ZeroAccount: Get<Self::AccountId>;

        /// Derives the pallet's own account, excluded from fees at genesis.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    #[pallet::type_value]
    pub fn DefaultFeePercent() -> u8 {
        DEFAULT_FEE_PERCENT
    }

    #[pallet::type_value]
    pub fn DefaultProtectionBlocks<T: Config>() -> BlockNumberFor<T> {
        3u32.into()
    }

    /// Token name (e.g., "Guarded Token")
    #[pallet::storage]
    #[pallet::getter(fn token_name)]
    pub type TokenName<T> = StorageValue<_, BoundedVec<u8, ConstU32<64>>, ValueQuery>;

    /// Token symbol (e.g., "GRD")
    #[pallet::storage]
    #[pallet::getter(fn token_symbol)]
    pub type TokenSymbol<T> = StorageValue<_, BoundedVec<u8, ConstU32<16>>, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn decimals)]
    pub type Decimals<T> = StorageValue<_, u8, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn total_supply)]
    pub type TotalSupply<T> = StorageValue<_, u128, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn balance_of)]
    pub type Balances<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// The only account allowed to change policy.
    #[pallet::storage]
    #[pallet::getter(fn owner)]
    pub type Owner<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Fee recipient. Never the zero account.
    #[pallet::storage]
    #[pallet::getter(fn dev_wallet)]
    pub type DevWallet<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Percent of each non-exempt transfer taken as fee, at most
    /// [`policy::MAX_FEE_PERCENT`].
    #[pallet::storage]
    #[pallet::getter(fn fee_percent)]
    pub type FeePercent<T> = StorageValue<_, u8, ValueQuery, DefaultFeePercent>;

    #[pallet::storage]
    #[pallet::getter(fn fees_enabled)]
    pub type FeesEnabled<T> = StorageValue<_, bool, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn trading_enabled)]
    pub type TradingEnabled<T> = StorageValue<_, bool, ValueQuery>;

    /// Cleared once by the owner and never set again.
    #[pallet::storage]
    #[pallet::getter(fn anti_bot_enabled)]
    pub type AntiBotEnabled<T> = StorageValue<_, bool, ValueQuery>;

    /// Block at which trading was last switched on. Zero until the first launch.
    #[pallet::storage]
    #[pallet::getter(fn launch_height)]
    pub type LaunchHeight<T: Config> = StorageValue<_, BlockNumberFor<T>, ValueQuery>;

    /// Length of the anti-automation window after launch.
    #[pallet::storage]
    #[pallet::getter(fn protection_blocks)]
    pub type ProtectionBlocks<T: Config> =
        StorageValue<_, BlockNumberFor<T>, ValueQuery, DefaultProtectionBlocks<T>>;

    #[pallet::storage]
    #[pallet::getter(fn max_tx_amount)]
    pub type MaxTxAmount<T> = StorageValue<_, u128, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn max_wallet_amount)]
    pub type MaxWalletAmount<T> = StorageValue<_, u128, ValueQuery>;

    /// Accounts allowed to trade before launch.
    #[pallet::storage]
    #[pallet::getter(fn is_whitelisted)]
    pub type Whitelist<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    /// Accounts barred from sending or receiving. Wins over the whitelist.
    #[pallet::storage]
    #[pallet::getter(fn is_blacklisted)]
    pub type Blacklist<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn is_excluded_from_fees)]
    pub type ExcludedFromFees<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    /// Last block an account took part in a transfer. Only written inside the
    /// anti-automation window.
    #[pallet::storage]
    #[pallet::getter(fn last_tx_height)]
    pub type LastTxHeight<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, BlockNumberFor<T>, OptionQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Net amount moved from sender to recipient
        Transferred { from: T::AccountId, to: T::AccountId, amount: u128 },
        /// Fee leg of a transfer, paid to the dev wallet
        FeeCharged { from: T::AccountId, dev_wallet: T::AccountId, amount: u128 },
        Minted { to: T::AccountId, amount: u128 },
        FeesToggled { enabled: bool },
        TradingToggled { enabled: bool },
        DevWalletUpdated { wallet: T::AccountId },
        WhitelistUpdated { account: T::AccountId, status: bool },
        BlacklistUpdated { account: T::AccountId, status: bool },
        FeeExclusionUpdated { account: T::AccountId, status: bool },
        MaxTxAmountUpdated { amount: u128 },
        MaxWalletAmountUpdated { amount: u128 },
        FeePercentUpdated { percent: u8 },
        AntiBotDisabled,
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Sender or recipient is blacklisted
        BlacklistedParty,
        /// Trading is off and neither party is whitelisted or the owner
        TradingDisabled,
        /// Party already transferred in this block during the launch window
        RateLimited,
        TxLimitExceeded,
        WalletLimitExceeded,
        /// Caller is not the owner
        Unauthorized,
        /// The zero account is not allowed here
        ZeroAddress,
        /// Fee percent above 10
        FeeTooHigh,
        InsufficientBalance,
        Overflow,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::do_transfer(sender, to, amount)
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::mint())]
        pub fn mint(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            Self::ensure_owner(origin)?;
            Self::mint_into(&to, amount)?;
            Self::deposit_event(Event::Minted { to, amount });
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::toggle_fees())]
        pub fn toggle_fees(origin: OriginFor<T>, enabled: bool) -> DispatchResult {
            Self::ensure_owner(origin)?;
            FeesEnabled::<T>::put(enabled);
            Self::deposit_event(Event::FeesToggled { enabled });
            Ok(())
        }

        /// Switching trading on (again) restarts the anti-automation window at
        /// the current block.
        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::toggle_trading())]
        pub fn toggle_trading(origin: OriginFor<T>, enabled: bool) -> DispatchResult {
            Self::ensure_owner(origin)?;
            TradingEnabled::<T>::put(enabled);
            if enabled {
                let now = frame_system::Pallet::<T>::block_number();
                LaunchHeight::<T>::put(now);
                log::info!(target: LOG_TARGET, "trading enabled at block {now:?}");
            }
            Self::deposit_event(Event::TradingToggled { enabled });
            Ok(())
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::set_dev_wallet())]
        pub fn set_dev_wallet(origin: OriginFor<T>, wallet: T::AccountId) -> DispatchResult {
            Self::ensure_owner(origin)?;
            ensure!(wallet != T::ZeroAccount::get(), Error::<T>::ZeroAddress);
            DevWallet::<T>::put(&wallet);
            Self::deposit_event(Event::DevWalletUpdated { wallet });
            Ok(())
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::set_whitelist())]
        pub fn set_whitelist(
            origin: OriginFor<T>,
            account: T::AccountId,
            status: bool,
        ) -> DispatchResult {
            Self::ensure_owner(origin)?;
            if status {
                Whitelist::<T>::insert(&account, true);
            } else {
                Whitelist::<T>::remove(&account);
            }
            Self::deposit_event(Event::WhitelistUpdated { account, status });
            Ok(())
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::set_blacklist())]
        pub fn set_blacklist(
            origin: OriginFor<T>,
            account: T::AccountId,
            status: bool,
        ) -> DispatchResult {
            Self::ensure_owner(origin)?;
            if status {
                Blacklist::<T>::insert(&account, true);
            } else {
                Blacklist::<T>::remove(&account);
            }
            Self::deposit_event(Event::BlacklistUpdated { account, status });
            Ok(())
        }

        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::set_excluded_from_fees())]
        pub fn set_excluded_from_fees(
            origin: OriginFor<T>,
            account: T::AccountId,
            status: bool,
        ) -> DispatchResult {
            Self::ensure_owner(origin)?;
            if status {
                ExcludedFromFees::<T>::insert(&account, true);
            } else {
                ExcludedFromFees::<T>::remove(&account);
            }
            Self::deposit_event(Event::FeeExclusionUpdated { account, status });
            Ok(())
        }

        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::set_max_tx_amount())]
        pub fn set_max_tx_amount(origin: OriginFor<T>, amount: u128) -> DispatchResult {
            Self::ensure_owner(origin)?;
            MaxTxAmount::<T>::put(amount);
            Self::deposit_event(Event::MaxTxAmountUpdated { amount });
            Ok(())
        }

        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::set_max_wallet_amount())]
        pub fn set_max_wallet_amount(origin: OriginFor<T>, amount: u128) -> DispatchResult {
            Self::ensure_owner(origin)?;
            MaxWalletAmount::<T>::put(amount);
            Self::deposit_event(Event::MaxWalletAmountUpdated { amount });
            Ok(())
        }

        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::set_fee_percent())]
        pub fn set_fee_percent(origin: OriginFor<T>, percent: u8) -> DispatchResult {
            Self::ensure_owner(origin)?;
            ensure!(percent <= policy::MAX_FEE_PERCENT, Error::<T>::FeeTooHigh);
            FeePercent::<T>::put(percent);
            Self::deposit_event(Event::FeePercentUpdated { percent });
            Ok(())
        }

        /// There is no way back: anti-automation stays off for good.
        #[pallet::call_index(11)]
        #[pallet::weight(T::WeightInfo::disable_anti_bot())]
        pub fn disable_anti_bot(origin: OriginFor<T>) -> DispatchResult {
            Self::ensure_owner(origin)?;
            AntiBotEnabled::<T>::put(false);
            log::info!(target: LOG_TARGET, "anti-bot protection disabled");
            Self::deposit_event(Event::AntiBotDisabled);
            Ok(())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Deploying account: becomes owner and receives the initial supply
        pub owner: Option<T::AccountId>,
        /// Fee recipient, must not be the zero account
        pub dev_wallet: Option<T::AccountId>,
        pub token_name: Vec<u8>,
        pub token_symbol: Vec<u8>,
        pub decimals: u8,
        /// Overrides the default three-block anti-automation window
        pub protection_blocks: Option<BlockNumberFor<T>>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let name: BoundedVec<u8, ConstU32<64>> =
                self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
            TokenName::<T>::put(name);

            let symbol: BoundedVec<u8, ConstU32<16>> =
                self.token_symbol.clone().try_into().expect("Token symbol too long (max 16 bytes)");
            TokenSymbol::<T>::put(symbol);

            Decimals::<T>::put(self.decimals);

            let dev_wallet = self.dev_wallet.clone().expect("Dev wallet must be configured");
            assert!(dev_wallet != T::ZeroAccount::get(), "Dev wallet cannot be the zero account");
            DevWallet::<T>::put(&dev_wallet);

            if let Some(ref owner) = self.owner {
                Owner::<T>::put(owner);
                Balances::<T>::insert(owner, INITIAL_SUPPLY);
                TotalSupply::<T>::put(INITIAL_SUPPLY);
                ExcludedFromFees::<T>::insert(owner, true);
            }
            ExcludedFromFees::<T>::insert(Pallet::<T>::account_id(), true);
            ExcludedFromFees::<T>::insert(&dev_wallet, true);

            MaxTxAmount::<T>::put(INITIAL_SUPPLY / 100);
            MaxWalletAmount::<T>::put(INITIAL_SUPPLY / 50);
            FeePercent::<T>::put(DEFAULT_FEE_PERCENT);
            FeesEnabled::<T>::put(true);
            TradingEnabled::<T>::put(false);
            AntiBotEnabled::<T>::put(true);

            if let Some(blocks) = self.protection_blocks {
                ProtectionBlocks::<T>::put(blocks);
            }
        }
    }
}

impl<T> From<Rejection> for Error<T> {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::BlacklistedParty => Error::BlacklistedParty,
            Rejection::TradingDisabled => Error::TradingDisabled,
            Rejection::RateLimited => Error::RateLimited,
            Rejection::TxLimitExceeded => Error::TxLimitExceeded,
            Rejection::WalletLimitExceeded => Error::WalletLimitExceeded,
        }
    }
}

/// Reads policy state straight from pallet storage.
struct StorageState<T>(PhantomData<T>);

impl<T: Config> PolicyState<T::AccountId, BlockNumberFor<T>> for StorageState<T> {
    fn is_blacklisted(&self, who: &T::AccountId) -> bool {
        Blacklist::<T>::get(who)
    }

    fn is_whitelisted(&self, who: &T::AccountId) -> bool {
        Whitelist::<T>::get(who)
    }

    fn is_excluded_from_fees(&self, who: &T::AccountId) -> bool {
        ExcludedFromFees::<T>::get(who)
    }

    fn last_tx_height(&self, who: &T::AccountId) -> Option<BlockNumberFor<T>> {
        LastTxHeight::<T>::get(who)
    }

    fn balance_of(&self, who: &T::AccountId) -> u128 {
        Balances::<T>::get(who)
    }
}

impl<T: Config> Pallet<T> {
    /// The pallet's own account.
    pub fn account_id() -> T::AccountId {
        T::PalletId::get().into_account_truncating()
    }

    /// Guard shared by every admin call. Signed non-owners get `Unauthorized`;
    /// unsigned and root origins get `BadOrigin`.
    pub fn ensure_owner(origin: OriginFor<T>) -> Result<T::AccountId, DispatchError> {
        let who = ensure_signed(origin)?;
        ensure!(Owner::<T>::get().as_ref() == Some(&who), Error::<T>::Unauthorized);
        Ok(who)
    }

    pub fn policy_config() -> Result<PolicyConfigOf<T>, DispatchError> {
        let dev_wallet = DevWallet::<T>::get().ok_or(Error::<T>::ZeroAddress)?;
        Ok(PolicyConfig {
            owner: Owner::<T>::get(),
            dev_wallet,
            zero_account: T::ZeroAccount::get(),
            fee_percent: FeePercent::<T>::get(),
            fees_enabled: FeesEnabled::<T>::get(),
            trading_enabled: TradingEnabled::<T>::get(),
            anti_bot_enabled: AntiBotEnabled::<T>::get(),
            launch_height: LaunchHeight::<T>::get(),
            protection_blocks: ProtectionBlocks::<T>::get(),
            max_tx_amount: MaxTxAmount::<T>::get(),
            max_wallet_amount: MaxWalletAmount::<T>::get(),
        })
    }

    /// Evaluates a transfer at the current block without committing anything.
    pub fn preview_transfer(
        sender: T::AccountId,
        recipient: T::AccountId,
        amount: u128,
    ) -> Result<TransferInstructionOf<T>, DispatchError> {
        let config = Self::policy_config()?;
        let now = frame_system::Pallet::<T>::block_number();
        let request = TransferRequest { sender, recipient, amount, now };
        policy::evaluate(&config, &StorageState::<T>(PhantomData), &request)
            .map_err(|rejection| Error::<T>::from(rejection).into())
    }

    /// Runs the policy pipeline and, on success, applies the fee leg, the net
    /// leg and the anti-automation stamp as one unit.
    pub fn do_transfer(sender: T::AccountId, recipient: T::AccountId, amount: u128) -> DispatchResult {
        let config = Self::policy_config()?;
        let now = frame_system::Pallet::<T>::block_number();
        let request = TransferRequest { sender, recipient, amount, now };

        let instruction = policy::evaluate(&config, &StorageState::<T>(PhantomData), &request)
            .map_err(|rejection| {
                log::debug!(
                    target: LOG_TARGET,
                    "transfer of {amount} at block {now:?} rejected: {rejection:?}"
                );
                Error::<T>::from(rejection)
            })?;

        frame_support::storage::with_storage_layer(|| Self::commit(&request, &instruction))
    }

    fn commit(
        request: &TransferRequest<T::AccountId, BlockNumberFor<T>>,
        instruction: &TransferInstructionOf<T>,
    ) -> DispatchResult {
        let TransferRequest { sender, recipient, .. } = request;

        if instruction.fee > 0 {
            Self::credit_and_debit(sender, &instruction.dev_wallet, instruction.fee)?;
            Self::deposit_event(Event::FeeCharged {
                from: sender.clone(),
                dev_wallet: instruction.dev_wallet.clone(),
                amount: instruction.fee,
            });
        }
        Self::credit_and_debit(sender, recipient, instruction.net)?;

        if let Some(height) = instruction.stamp {
            LastTxHeight::<T>::insert(sender, height);
            LastTxHeight::<T>::insert(recipient, height);
        }

        Self::deposit_event(Event::Transferred {
            from: sender.clone(),
            to: recipient.clone(),
            amount: instruction.net,
        });
        Ok(())
    }

    /// Moves `amount` from `from` to `to`, or nothing at all.
    fn credit_and_debit(from: &T::AccountId, to: &T::AccountId, amount: u128) -> DispatchResult {
        frame_support::storage::with_storage_layer(|| -> DispatchResult {
            let remaining =
                Balances::<T>::get(from).checked_sub(amount).ok_or(Error::<T>::InsufficientBalance)?;
            Balances::<T>::insert(from, remaining);
            Balances::<T>::try_mutate(to, |balance| -> DispatchResult {
                *balance = balance.checked_add(amount).ok_or(Error::<T>::Overflow)?;
                Ok(())
            })
        })
    }

    fn mint_into(to: &T::AccountId, amount: u128) -> DispatchResult {
        let supply = TotalSupply::<T>::get().checked_add(amount).ok_or(Error::<T>::Overflow)?;
        let balance = Balances::<T>::get(to).checked_add(amount).ok_or(Error::<T>::Overflow)?;
        TotalSupply::<T>::put(supply);
        Balances::<T>::insert(to, balance);
        Ok(())
    }

    /// Checks the fee cap, the dev wallet and that balances add up to the
    /// total supply.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), DispatchError> {
        ensure!(
            FeePercent::<T>::get() <= policy::MAX_FEE_PERCENT,
            DispatchError::Other("fee percent above maximum")
        );

        let dev_wallet = DevWallet::<T>::get().ok_or(DispatchError::Other("dev wallet unset"))?;
        ensure!(
            dev_wallet != T::ZeroAccount::get(),
            DispatchError::Other("dev wallet is the zero account")
        );

        let held = Balances::<T>::iter_values().fold(0u128, |acc, b| acc.saturating_add(b));
        ensure!(
            held == TotalSupply::<T>::get(),
            DispatchError::Other("balances do not sum to total supply")
        );
        Ok(())
    }
}
