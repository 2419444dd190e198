//! Transfer policy pipeline.
//!
//! Every transfer runs through four stages in a fixed order:
//!
//! 1. [`access_gate`]: blacklist, then the trading switch
//! 2. [`anti_automation_guard`]: one transfer per account per block during launch
//! 3. [`limit_enforcer`]: per-transfer cap, then post-transfer wallet cap
//! 4. [`fee_calculator`]: splits the amount into fee and net legs
//!
//! The first stage that rejects ends evaluation. Stages never write; [`evaluate`]
//! returns a [`TransferInstruction`] that the pallet commits in one storage layer.

use sp_runtime::{traits::Saturating, PerThing, Percent, RuntimeDebug};

/// Highest fee percentage the owner may configure.
pub const MAX_FEE_PERCENT: u8 = 10;

/// Why the policy refused a transfer.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum Rejection {
    /// Sender or recipient is blacklisted.
    BlacklistedParty,
    /// Trading is off and neither party is whitelisted or the owner.
    TradingDisabled,
    /// A party already transferred in this block during the launch window.
    RateLimited,
    /// Amount is above the per-transfer cap.
    TxLimitExceeded,
    /// Recipient would end up holding more than the wallet cap.
    WalletLimitExceeded,
}

/// Scalar policy parameters, read once per transfer.
#[derive(Clone, PartialEq, Eq, RuntimeDebug)]
pub struct PolicyConfig<AccountId, BlockNumber> {
    pub owner: Option<AccountId>,
    pub dev_wallet: AccountId,
    pub zero_account: AccountId,
    pub fee_percent: u8,
    pub fees_enabled: bool,
    pub trading_enabled: bool,
    pub anti_bot_enabled: bool,
    pub launch_height: BlockNumber,
    pub protection_blocks: BlockNumber,
    pub max_tx_amount: u128,
    pub max_wallet_amount: u128,
}

impl<AccountId, BlockNumber> PolicyConfig<AccountId, BlockNumber>
where
    AccountId: PartialEq,
    BlockNumber: Copy + PartialOrd + Saturating,
{
    pub fn is_owner(&self, who: &AccountId) -> bool {
        self.owner.as_ref() == Some(who)
    }

    /// Whether `now` falls inside the post-launch anti-automation window.
    pub fn anti_bot_window_active(&self, now: BlockNumber) -> bool {
        self.anti_bot_enabled &&
            self.trading_enabled &&
            now < self.launch_height.saturating_add(self.protection_blocks)
    }
}

/// Per-account lookups the stages need.
pub trait PolicyState<AccountId, BlockNumber> {
    fn is_blacklisted(&self, who: &AccountId) -> bool;
    fn is_whitelisted(&self, who: &AccountId) -> bool;
    fn is_excluded_from_fees(&self, who: &AccountId) -> bool;
    fn last_tx_height(&self, who: &AccountId) -> Option<BlockNumber>;
    fn balance_of(&self, who: &AccountId) -> u128;
}

#[derive(Clone, PartialEq, Eq, RuntimeDebug)]
pub struct TransferRequest<AccountId, BlockNumber> {
    pub sender: AccountId,
    pub recipient: AccountId,
    pub amount: u128,
    pub now: BlockNumber,
}

/// Outcome of a successful evaluation.
///
/// `fee + net == amount`. When `fee` is zero the transfer is a single leg of
/// `net`. `stamp` is the block to record for both parties, if the
/// anti-automation window was active.
#[derive(Clone, PartialEq, Eq, RuntimeDebug)]
pub struct TransferInstruction<AccountId, BlockNumber> {
    pub fee: u128,
    pub net: u128,
    pub dev_wallet: AccountId,
    pub stamp: Option<BlockNumber>,
}

pub fn access_gate<AccountId, BlockNumber, S>(
    config: &PolicyConfig<AccountId, BlockNumber>,
    state: &S,
    sender: &AccountId,
    recipient: &AccountId,
) -> Result<(), Rejection>
where
    AccountId: PartialEq,
    BlockNumber: Copy + PartialOrd + Saturating,
    S: PolicyState<AccountId, BlockNumber>,
{
    if state.is_blacklisted(sender) || state.is_blacklisted(recipient) {
        return Err(Rejection::BlacklistedParty);
    }
    if config.trading_enabled {
        return Ok(());
    }

    let privileged = |who: &AccountId| state.is_whitelisted(who) || config.is_owner(who);
    if privileged(sender) || privileged(recipient) {
        Ok(())
    } else {
        Err(Rejection::TradingDisabled)
    }
}

/// Returns the block to stamp on both parties when the window is active.
pub fn anti_automation_guard<AccountId, BlockNumber, S>(
    config: &PolicyConfig<AccountId, BlockNumber>,
    state: &S,
    sender: &AccountId,
    recipient: &AccountId,
    now: BlockNumber,
) -> Result<Option<BlockNumber>, Rejection>
where
    AccountId: PartialEq,
    BlockNumber: Copy + PartialOrd + Saturating,
    S: PolicyState<AccountId, BlockNumber>,
{
    if !config.anti_bot_window_active(now) {
        return Ok(None);
    }

    let seen_this_block = |who: &AccountId| state.last_tx_height(who) == Some(now);
    if seen_this_block(sender) || seen_this_block(recipient) {
        return Err(Rejection::RateLimited);
    }
    Ok(Some(now))
}

pub fn limit_enforcer<AccountId, BlockNumber, S>(
    config: &PolicyConfig<AccountId, BlockNumber>,
    state: &S,
    sender: &AccountId,
    recipient: &AccountId,
    amount: u128,
) -> Result<(), Rejection>
where
    AccountId: PartialEq,
    BlockNumber: Copy + PartialOrd + Saturating,
    S: PolicyState<AccountId, BlockNumber>,
{
    // Fee exclusion does not lift the caps; only the owner does.
    if config.is_owner(sender) || config.is_owner(recipient) {
        return Ok(());
    }
    if amount > config.max_tx_amount {
        return Err(Rejection::TxLimitExceeded);
    }

    // Transfers into the zero account are burns.
    let uncapped = *recipient == config.dev_wallet || *recipient == config.zero_account;
    if !uncapped && state.balance_of(recipient).saturating_add(amount) > config.max_wallet_amount {
        return Err(Rejection::WalletLimitExceeded);
    }
    Ok(())
}

/// Splits `amount` into `(fee, net)`. The fee rounds down.
pub fn fee_calculator<AccountId, BlockNumber, S>(
    config: &PolicyConfig<AccountId, BlockNumber>,
    state: &S,
    sender: &AccountId,
    recipient: &AccountId,
    amount: u128,
) -> (u128, u128)
where
    S: PolicyState<AccountId, BlockNumber>,
{
    if !config.fees_enabled ||
        state.is_excluded_from_fees(sender) ||
        state.is_excluded_from_fees(recipient)
    {
        return (0, amount);
    }

    let fee = Percent::from_percent(config.fee_percent).mul_floor(amount);
    (fee, amount.saturating_sub(fee))
}

/// Runs every stage in order and produces the legs to commit.
pub fn evaluate<AccountId, BlockNumber, S>(
    config: &PolicyConfig<AccountId, BlockNumber>,
    state: &S,
    request: &TransferRequest<AccountId, BlockNumber>,
) -> Result<TransferInstruction<AccountId, BlockNumber>, Rejection>
where
    AccountId: PartialEq + Clone,
    BlockNumber: Copy + PartialOrd + Saturating,
    S: PolicyState<AccountId, BlockNumber>,
{
    let TransferRequest { sender, recipient, amount, now } = request;

    access_gate(config, state, sender, recipient)?;
    let stamp = anti_automation_guard(config, state, sender, recipient, *now)?;
    limit_enforcer(config, state, sender, recipient, *amount)?;
    let (fee, net) = fee_calculator(config, state, sender, recipient, *amount);

    Ok(TransferInstruction { fee, net, dev_wallet: config.dev_wallet.clone(), stamp })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    const OWNER: u64 = 1;
    const ALICE: u64 = 2;
    const BOB: u64 = 3;
    const DEV: u64 = 9;
    const ZERO: u64 = 0;

    #[derive(Default)]
    struct MemoryState {
        blacklist: BTreeSet<u64>,
        whitelist: BTreeSet<u64>,
        excluded: BTreeSet<u64>,
        last_tx: BTreeMap<u64, u64>,
        balances: BTreeMap<u64, u128>,
    }

    impl PolicyState<u64, u64> for MemoryState {
        fn is_blacklisted(&self, who: &u64) -> bool {
            self.blacklist.contains(who)
        }
        fn is_whitelisted(&self, who: &u64) -> bool {
            self.whitelist.contains(who)
        }
        fn is_excluded_from_fees(&self, who: &u64) -> bool {
            self.excluded.contains(who)
        }
        fn last_tx_height(&self, who: &u64) -> Option<u64> {
            self.last_tx.get(who).copied()
        }
        fn balance_of(&self, who: &u64) -> u128 {
            self.balances.get(who).copied().unwrap_or_default()
        }
    }

    fn config() -> PolicyConfig<u64, u64> {
        PolicyConfig {
            owner: Some(OWNER),
            dev_wallet: DEV,
            zero_account: ZERO,
            fee_percent: 2,
            fees_enabled: true,
            trading_enabled: true,
            anti_bot_enabled: true,
            launch_height: 10,
            protection_blocks: 3,
            max_tx_amount: 1_000,
            max_wallet_amount: 2_000,
        }
    }

    fn request(sender: u64, recipient: u64, amount: u128, now: u64) -> TransferRequest<u64, u64> {
        TransferRequest { sender, recipient, amount, now }
    }

    // ------------------------------------------------------------------
    // Access gate
    // ------------------------------------------------------------------

    #[test]
    fn blacklist_overrides_whitelist_and_owner() {
        let mut state = MemoryState::default();
        state.blacklist.insert(ALICE);
        state.whitelist.insert(ALICE);

        assert_eq!(access_gate(&config(), &state, &ALICE, &BOB), Err(Rejection::BlacklistedParty));
        assert_eq!(access_gate(&config(), &state, &OWNER, &ALICE), Err(Rejection::BlacklistedParty));
    }

    #[test]
    fn blacklist_is_checked_before_trading_switch() {
        let mut state = MemoryState::default();
        state.blacklist.insert(BOB);
        let config = PolicyConfig { trading_enabled: false, ..config() };

        assert_eq!(access_gate(&config, &state, &ALICE, &BOB), Err(Rejection::BlacklistedParty));
    }

    #[test]
    fn trading_disabled_admits_only_whitelisted_or_owner() {
        let mut state = MemoryState::default();
        let config = PolicyConfig { trading_enabled: false, ..config() };

        assert_eq!(access_gate(&config, &state, &ALICE, &BOB), Err(Rejection::TradingDisabled));
        assert_eq!(access_gate(&config, &state, &OWNER, &BOB), Ok(()));
        assert_eq!(access_gate(&config, &state, &BOB, &OWNER), Ok(()));

        state.whitelist.insert(BOB);
        assert_eq!(access_gate(&config, &state, &ALICE, &BOB), Ok(()));
        assert_eq!(access_gate(&config, &state, &BOB, &ALICE), Ok(()));
    }

    // ------------------------------------------------------------------
    // Anti-automation guard
    // ------------------------------------------------------------------

    #[test]
    fn window_covers_protection_blocks_after_launch() {
        let config = config();
        assert!(config.anti_bot_window_active(10));
        assert!(config.anti_bot_window_active(12));
        assert!(!config.anti_bot_window_active(13));

        assert!(!PolicyConfig { anti_bot_enabled: false, ..config.clone() }
            .anti_bot_window_active(10));
        assert!(!PolicyConfig { trading_enabled: false, ..config }.anti_bot_window_active(10));
    }

    #[test]
    fn guard_rejects_second_transfer_in_same_block() {
        let mut state = MemoryState::default();
        state.last_tx.insert(ALICE, 11);

        assert_eq!(
            anti_automation_guard(&config(), &state, &ALICE, &BOB, 11),
            Err(Rejection::RateLimited)
        );
        assert_eq!(
            anti_automation_guard(&config(), &state, &BOB, &ALICE, 11),
            Err(Rejection::RateLimited)
        );
        assert_eq!(anti_automation_guard(&config(), &state, &ALICE, &BOB, 12), Ok(Some(12)));
    }

    #[test]
    fn guard_is_inert_outside_window() {
        let mut state = MemoryState::default();
        state.last_tx.insert(ALICE, 20);

        assert_eq!(anti_automation_guard(&config(), &state, &ALICE, &BOB, 20), Ok(None));
    }

    // ------------------------------------------------------------------
    // Limit enforcer
    // ------------------------------------------------------------------

    #[test]
    fn tx_cap_applies_before_wallet_cap() {
        let mut state = MemoryState::default();
        state.balances.insert(BOB, 1_990);

        assert_eq!(
            limit_enforcer(&config(), &state, &ALICE, &BOB, 1_001),
            Err(Rejection::TxLimitExceeded)
        );
        assert_eq!(
            limit_enforcer(&config(), &state, &ALICE, &BOB, 11),
            Err(Rejection::WalletLimitExceeded)
        );
        assert_eq!(limit_enforcer(&config(), &state, &ALICE, &BOB, 10), Ok(()));
    }

    #[test]
    fn owner_dev_wallet_and_zero_account_are_uncapped() {
        let mut state = MemoryState::default();
        state.balances.insert(DEV, 1_999_999);
        state.balances.insert(ZERO, 1_999_999);

        assert_eq!(limit_enforcer(&config(), &state, &OWNER, &BOB, u128::MAX), Ok(()));
        assert_eq!(limit_enforcer(&config(), &state, &ALICE, &OWNER, u128::MAX), Ok(()));
        assert_eq!(limit_enforcer(&config(), &state, &ALICE, &DEV, 1_000), Ok(()));
        assert_eq!(limit_enforcer(&config(), &state, &ALICE, &ZERO, 1_000), Ok(()));
    }

    #[test]
    fn fee_exclusion_does_not_lift_caps() {
        let mut state = MemoryState::default();
        state.excluded.insert(ALICE);

        assert_eq!(
            limit_enforcer(&config(), &state, &ALICE, &BOB, 1_001),
            Err(Rejection::TxLimitExceeded)
        );
    }

    // ------------------------------------------------------------------
    // Fee calculator
    // ------------------------------------------------------------------

    #[test]
    fn fee_rounds_down_and_sums_to_amount() {
        let state = MemoryState::default();

        assert_eq!(fee_calculator(&config(), &state, &ALICE, &BOB, 1_000), (20, 980));
        assert_eq!(fee_calculator(&config(), &state, &ALICE, &BOB, 99), (1, 98));
        assert_eq!(fee_calculator(&config(), &state, &ALICE, &BOB, 49), (0, 49));

        for amount in [0u128, 1, 50, 777, 12_345, u128::MAX] {
            let (fee, net) = fee_calculator(&config(), &state, &ALICE, &BOB, amount);
            assert_eq!(fee + net, amount);
            assert_eq!(fee, amount / 100 * 2 + amount % 100 * 2 / 100);
        }
    }

    #[test]
    fn no_fee_when_disabled_or_excluded() {
        let mut state = MemoryState::default();
        let disabled = PolicyConfig { fees_enabled: false, ..config() };
        assert_eq!(fee_calculator(&disabled, &state, &ALICE, &BOB, 1_000), (0, 1_000));

        state.excluded.insert(BOB);
        assert_eq!(fee_calculator(&config(), &state, &ALICE, &BOB, 1_000), (0, 1_000));
        assert_eq!(fee_calculator(&config(), &state, &BOB, &ALICE, 1_000), (0, 1_000));
    }

    // ------------------------------------------------------------------
    // Pipeline ordering
    // ------------------------------------------------------------------

    #[test]
    fn first_failing_stage_wins() {
        let mut state = MemoryState::default();
        state.blacklist.insert(BOB);
        state.last_tx.insert(ALICE, 10);

        // Blacklisted, rate limited and over the cap: blacklist is reported.
        assert_eq!(
            evaluate(&config(), &state, &request(ALICE, BOB, 5_000, 10)),
            Err(Rejection::BlacklistedParty)
        );

        state.blacklist.clear();
        assert_eq!(
            evaluate(&config(), &state, &request(ALICE, BOB, 5_000, 10)),
            Err(Rejection::RateLimited)
        );
        assert_eq!(
            evaluate(&config(), &state, &request(ALICE, BOB, 5_000, 11)),
            Err(Rejection::TxLimitExceeded)
        );
    }

    #[test]
    fn evaluate_returns_split_and_stamp() {
        let state = MemoryState::default();

        assert_eq!(
            evaluate(&config(), &state, &request(ALICE, BOB, 1_000, 11)),
            Ok(TransferInstruction { fee: 20, net: 980, dev_wallet: DEV, stamp: Some(11) })
        );
        assert_eq!(
            evaluate(&config(), &state, &request(ALICE, BOB, 1_000, 13)),
            Ok(TransferInstruction { fee: 20, net: 980, dev_wallet: DEV, stamp: None })
        );
    }
}
