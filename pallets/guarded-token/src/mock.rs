use crate as pallet_guarded_token;
use frame_support::{
    derive_impl, parameter_types,
    traits::{ConstU32, ConstU64},
    PalletId,
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage,
};

pub use crate::UNIT;

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        GuardedToken: pallet_guarded_token,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Nonce = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = ConstU64<250>;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = ();
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

/// Deploying account: owner and holder of the initial supply.
pub const OWNER: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
pub const CHARLIE: u64 = 4;
pub const DAVE: u64 = 5;
pub const DEV_WALLET: u64 = 9;
pub const ZERO: u64 = 0;

parameter_types! {
    pub const ZeroAccount: u64 = ZERO;
    pub const GuardedTokenPalletId: PalletId = PalletId(*b"py/guard");
}

impl pallet_guarded_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type ZeroAccount = ZeroAccount;
    type PalletId = GuardedTokenPalletId;
    type WeightInfo = ();
}

fn genesis(dev_wallet: u64) -> pallet_guarded_token::GenesisConfig<Test> {
    pallet_guarded_token::GenesisConfig::<Test> {
        owner: Some(OWNER),
        dev_wallet: Some(dev_wallet),
        token_name: b"Guarded Token".to_vec(),
        token_symbol: b"GRD".to_vec(),
        decimals: 18,
        protection_blocks: None,
    }
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    new_test_ext_with_dev_wallet(DEV_WALLET)
}

pub fn new_test_ext_with_dev_wallet(dev_wallet: u64) -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    genesis(dev_wallet).assimilate_storage(&mut t).unwrap();

    // Events are only recorded from block 1 onwards.
    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}
