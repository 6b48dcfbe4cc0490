use frame::{
    deps::frame_support::weights::constants::RocksDbWeight,
    prelude::*,
    runtime::prelude::*,
    testing_prelude::*,
};
use ccl_primitives::Capability;
use frame::traits::ConstU16;

pub const ADMIN: u64 = 1;
pub const REFEREE: u64 = 2;
pub const ALICE: u64 = 10;
pub const BOB: u64 = 11;

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
    pub type Access = pallet_ccl_access;
    #[runtime::pallet_index(2)]
    pub type Cards = pallet_ccl_cards;
    #[runtime::pallet_index(3)]
    pub type Battles = crate;
}

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = MockBlock<Test>;
    type DbWeight = RocksDbWeight;
}

impl pallet_ccl_access::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
}

impl pallet_ccl_cards::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Capabilities = Access;
    type MaxCardsPerOwner = ConstU32<16>;
    type ReservedIds = ConstU16<0>;
    type WeightInfo = ();
}

frame::deps::frame_support::parameter_types! {
    pub const BattlesPalletId: frame::deps::frame_support::PalletId =
        frame::deps::frame_support::PalletId(*b"battlreg");
}

impl crate::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Capabilities = Access;
    type Cards = Cards;
    type PalletId = BattlesPalletId;
    type WeightInfo = ();
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> TestState {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_ccl_access::GenesisConfig::<Test> {
        admins: vec![ADMIN],
        grants: vec![
            (REFEREE, Capability::RecordBattles.bit()),
            (Battles::account_id(), Capability::RecordBattles.bit()),
        ],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext: TestState = t.into();
    ext.execute_with(|| {
        // Events are not recorded at block zero.
        System::set_block_number(1);
        for (id, owner) in [(1, ALICE), (2, BOB), (3, ALICE)] {
            assert_ok!(Cards::mint(RuntimeOrigin::signed(ADMIN), owner, id));
        }
    });
    ext
}
