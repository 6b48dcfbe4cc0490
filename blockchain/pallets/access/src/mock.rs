use frame::{
    deps::frame_support::weights::constants::RocksDbWeight,
    prelude::*,
    runtime::prelude::*,
    testing_prelude::*,
};
use ccl_primitives::Capability;

pub const ADMIN: u64 = 1;
pub const MINTER: u64 = 2;
pub const ALICE: u64 = 3;

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
    pub type Access = crate;
}

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = MockBlock<Test>;
    type DbWeight = RocksDbWeight;
}

impl crate::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> TestState {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    crate::GenesisConfig::<Test> {
        admins: vec![ADMIN],
        grants: vec![(MINTER, Capability::CreateCards.bit())],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext: TestState = t.into();
    // Events are not recorded at block zero.
    ext.execute_with(|| System::set_block_number(1));
    ext
}
