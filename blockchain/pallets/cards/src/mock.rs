use frame::{
    deps::frame_support::weights::constants::RocksDbWeight,
    prelude::*,
    runtime::prelude::*,
    testing_prelude::*,
};
use ccl_primitives::Capability;

pub const ADMIN: u64 = 1;
pub const MINTER: u64 = 2;
pub const CURATOR: u64 = 3;
pub const RECORDER: u64 = 4;
pub const ALICE: u64 = 10;
pub const BOB: u64 = 11;
pub const CHARLIE: u64 = 12;

pub const MAX_CARDS_PER_OWNER: u32 = 4;

frame::deps::frame_support::parameter_types! {
    pub storage ReservedIds: u16 = 0;
}

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
    pub type Cards = crate;
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

impl crate::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Capabilities = Access;
    type MaxCardsPerOwner = ConstU32<MAX_CARDS_PER_OWNER>;
    type ReservedIds = ReservedIds;
    type WeightInfo = ();
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> TestState {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_ccl_access::GenesisConfig::<Test> {
        admins: vec![ADMIN],
        grants: vec![
            (MINTER, Capability::CreateCards.bit()),
            (CURATOR, Capability::ManageAttributes.bit()),
            (RECORDER, Capability::RecordBattles.bit()),
        ],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext: TestState = t.into();
    // Events are not recorded at block zero.
    ext.execute_with(|| System::set_block_number(1));
    ext
}
