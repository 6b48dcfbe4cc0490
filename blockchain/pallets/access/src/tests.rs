use crate::{mock::*, Error, Event, Roles};
use ccl_primitives::{Capability, CapabilityInspect, ALL_CAPABILITIES};
use frame::deps::sp_runtime::traits::BadOrigin;
use frame::testing_prelude::*;

#[test]
fn genesis_admin_holds_everything() {
    new_test_ext().execute_with(|| {
        assert_eq!(Access::role_of(&ADMIN), ALL_CAPABILITIES);
        assert!(Access::has_capability(&ADMIN, Capability::ManageRoles));
        assert!(Access::has_capability(&MINTER, Capability::CreateCards));
        assert!(!Access::has_capability(&MINTER, Capability::ManageRoles));
        assert_eq!(Access::role_of(&ALICE), 0);
    });
}

#[test]
fn grant_unions_bits() {
    new_test_ext().execute_with(|| {
        let battles = Capability::RecordBattles.bit();
        assert_ok!(Access::grant(RuntimeOrigin::signed(ADMIN), MINTER, battles));

        let expected = Capability::CreateCards.bit() | battles;
        assert_eq!(Roles::<Test>::get(MINTER), expected);
        System::assert_last_event(
            Event::RoleGranted { who: MINTER, granted: battles, role: expected }.into(),
        );

        // Granting an already held bit is idempotent.
        assert_ok!(Access::grant(RuntimeOrigin::signed(ADMIN), MINTER, battles));
        assert_eq!(Roles::<Test>::get(MINTER), expected);
    });
}

#[test]
fn only_role_managers_may_grant_or_revoke() {
    new_test_ext().execute_with(|| {
        let bit = Capability::CreateCards.bit();
        assert_noop!(
            Access::grant(RuntimeOrigin::signed(MINTER), ALICE, bit),
            Error::<Test>::PermissionDenied
        );
        assert_noop!(
            Access::revoke(RuntimeOrigin::signed(ALICE), MINTER, bit),
            Error::<Test>::PermissionDenied
        );
        assert_noop!(Access::grant(RuntimeOrigin::none(), ALICE, bit), BadOrigin);

        // A delegated role manager can grant in turn.
        assert_ok!(Access::grant(
            RuntimeOrigin::signed(ADMIN),
            ALICE,
            Capability::ManageRoles.bit()
        ));
        assert_ok!(Access::grant(RuntimeOrigin::signed(ALICE), 4, bit));
        assert!(Access::has_capability(&4, Capability::CreateCards));
    });
}

#[test]
fn zero_identity_and_empty_mask_are_rejected() {
    new_test_ext().execute_with(|| {
        assert_noop!(
            Access::grant(RuntimeOrigin::signed(ADMIN), 0, Capability::CreateCards.bit()),
            Error::<Test>::InvalidArgument
        );
        assert_noop!(
            Access::grant(RuntimeOrigin::signed(ADMIN), ALICE, 0),
            Error::<Test>::InvalidArgument
        );
        assert_noop!(
            Access::revoke(RuntimeOrigin::signed(ADMIN), 0, ALL_CAPABILITIES),
            Error::<Test>::InvalidArgument
        );
        assert_eq!(Access::role_of(&0), 0);
    });
}

#[test]
fn revoke_clears_bits_and_entry() {
    new_test_ext().execute_with(|| {
        let both = Capability::ManageAttributes.bit() | Capability::RecordBattles.bit();
        assert_ok!(Access::grant(RuntimeOrigin::signed(ADMIN), ALICE, both));

        assert_ok!(Access::revoke(
            RuntimeOrigin::signed(ADMIN),
            ALICE,
            Capability::RecordBattles.bit()
        ));
        assert!(Access::has_capability(&ALICE, Capability::ManageAttributes));
        assert!(!Access::has_capability(&ALICE, Capability::RecordBattles));

        assert_ok!(Access::revoke(RuntimeOrigin::signed(ADMIN), ALICE, both));
        assert!(!Roles::<Test>::contains_key(ALICE));
        System::assert_last_event(Event::RoleRevoked { who: ALICE, revoked: both, role: 0 }.into());
    });
}

#[test]
fn capability_inspect_reads_the_table() {
    new_test_ext().execute_with(|| {
        assert_eq!(
            <Access as CapabilityInspect<u64>>::role_of(&MINTER),
            Capability::CreateCards.bit()
        );
        assert!(<Access as CapabilityInspect<u64>>::has_capability(
            &MINTER,
            Capability::CreateCards
        ));
        assert!(!<Access as CapabilityInspect<u64>>::has_capability(
            &ALICE,
            Capability::CreateCards
        ));
    });
}
