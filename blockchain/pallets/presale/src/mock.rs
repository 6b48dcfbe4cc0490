use frame::{
    deps::frame_support::weights::constants::RocksDbWeight,
    prelude::*,
    runtime::prelude::*,
    testing_prelude::*,
};
use ccl_primitives::{Capability, StepPriceCurve};
use frame::traits::{ConstU16, ConstU64};
use polkadot_sdk::pallet_balances;

pub const ADMIN: u64 = 1;
pub const MANAGER: u64 = 2;
pub const TREASURER: u64 = 3;
pub const ALICE: u64 = 10;
pub const BOB: u64 = 11;
pub const POOR: u64 = 12;

pub const CAPACITY: u16 = 20;
pub const INIT_BATCH: u16 = 8;
pub const SPECIFIC_PRICE: u64 = 50;
pub const STARTING_BALANCE: u64 = 10_000;

// Configure a mock runtime to test the pallet.
#[frame_construct_runtime]
mod test_runtime {
    #[runtime::runtime]
    #[runtime::derive(
        RuntimeCall,
        RuntimeEvent,
        RuntimeError,
        RuntimeOrigin,
        RuntimeFreezeReason,
        RuntimeHoldReason,
        RuntimeSlashReason,
        RuntimeLockId,
        RuntimeTask,
        RuntimeViewFunction
    )]
    pub struct Test;

    #[runtime::pallet_index(0)]
    pub type System = frame_system;
    #[runtime::pallet_index(1)]
    pub type Balances = pallet_balances;
    #[runtime::pallet_index(2)]
    pub type Access = pallet_ccl_access;
    #[runtime::pallet_index(3)]
    pub type Cards = pallet_ccl_cards;
    #[runtime::pallet_index(4)]
    pub type Presale = crate;
}

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Nonce = u64;
    type Block = MockBlock<Test>;
    type BlockHashCount = ConstU64<250>;
    type DbWeight = RocksDbWeight;
    type AccountData = pallet_balances::AccountData<u64>;
}

impl pallet_balances::Config for Test {
    type Balance = u64;
    type RuntimeEvent = RuntimeEvent;
    type DustRemoval = ();
    type ExistentialDeposit = ConstU64<1>;
    type AccountStore = System;
    type MaxLocks = ConstU32<50>;
    type MaxReserves = ConstU32<50>;
    type ReserveIdentifier = [u8; 8];
    type WeightInfo = ();
    type RuntimeHoldReason = RuntimeHoldReason;
    type RuntimeFreezeReason = RuntimeFreezeReason;
    type FreezeIdentifier = RuntimeFreezeReason;
    type MaxFreezes = ConstU32<0>;
    type DoneSlashHandler = ();
}

impl pallet_ccl_access::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
}

impl pallet_ccl_cards::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Capabilities = Access;
    type MaxCardsPerOwner = ConstU32<32>;
    type ReservedIds = ConstU16<CAPACITY>;
    type WeightInfo = ();
}

pub struct MockRandomness;
impl
    frame::deps::frame_support::traits::Randomness<
        <Test as frame_system::Config>::Hash,
        BlockNumberFor<Test>,
    > for MockRandomness
{
    fn random(_subject: &[u8]) -> (<Test as frame_system::Config>::Hash, BlockNumberFor<Test>) {
        (Default::default(), 0)
    }
}

pub struct Milestones;
impl Get<&'static [(u16, u64)]> for Milestones {
    fn get() -> &'static [(u16, u64)] {
        &[(10, 5), (15, 10)]
    }
}

/// 10 per unit, +2 every 5 sales, +5 at 10 sold and +10 at 15 sold.
pub type TestCurve = StepPriceCurve<ConstU64<10>, ConstU16<5>, ConstU64<2>, Milestones>;

frame::deps::frame_support::parameter_types! {
    pub const PresalePalletId: frame::deps::frame_support::PalletId =
        frame::deps::frame_support::PalletId(*b"salemkt0");
}

impl crate::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Currency = Balances;
    type Capabilities = Access;
    type Cards = Cards;
    type Randomness = MockRandomness;
    type Prices = TestCurve;
    type Capacity = ConstU16<CAPACITY>;
    type MaxInventoryWords = ConstU32<1>;
    type MaxInitBatch = ConstU16<INIT_BATCH>;
    type MaxPurchase = ConstU16<5>;
    type SpecificPrice = ConstU64<SPECIFIC_PRICE>;
    type PalletId = PresalePalletId;
    type WeightInfo = ();
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> TestState {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_balances::GenesisConfig::<Test> {
        balances: vec![
            (ADMIN, STARTING_BALANCE),
            (ALICE, STARTING_BALANCE),
            (BOB, STARTING_BALANCE),
            (POOR, 5),
        ],
        dev_accounts: None,
    }
    .assimilate_storage(&mut t)
    .unwrap();

    pallet_ccl_access::GenesisConfig::<Test> {
        admins: vec![ADMIN],
        grants: vec![
            (MANAGER, Capability::ManagePresale.bit()),
            (TREASURER, Capability::WithdrawFunds.bit()),
            (Presale::account_id(), Capability::CreateCards.bit()),
        ],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext: TestState = t.into();
    // Events are not recorded at block zero.
    ext.execute_with(|| System::set_block_number(1));
    ext
}

/// Test externalities with the market already open.
pub fn ready_test_ext() -> TestState {
    let mut ext = new_test_ext();
    ext.execute_with(|| {
        while !Presale::initialized() {
            assert_ok!(Presale::init(RuntimeOrigin::signed(MANAGER), INIT_BATCH));
        }
    });
    ext
}
