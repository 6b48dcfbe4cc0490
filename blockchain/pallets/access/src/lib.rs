//! # Access Pallet
//!
//! Role table for the collectible card ledger. Every account maps to a bitmask of
//! [`Capability`] bits; the other pallets consult it through
//! [`CapabilityInspect`] before any mutation.
//!
//! Only holders of `ManageRoles` may grant or revoke. The genesis admins start with
//! every capability. The zero identity never holds a grant.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
mod mock;

#[cfg(test)]
mod tests;

pub mod weights;

const LOG_TARGET: &str = "runtime::ccl-access";

#[frame::pallet]
pub mod pallet {
    use crate::weights::WeightInfo;
    use alloc::vec::Vec;
    use ccl_primitives::{is_zero_account, Capability, CapabilityInspect, Role, ALL_CAPABILITIES};
    use frame::prelude::*;

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::config]
    pub trait Config: frame_system::Config {
        /// Because this pallet emits events, it depends on the runtime's definition of an event.
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Weight information for extrinsics in this pallet.
        type WeightInfo: WeightInfo;
    }

    /// Capability bitmask per account. Accounts without any bit have no entry.
    #[pallet::storage]
    pub type Roles<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, Role, ValueQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Capabilities were added to an account.
        RoleGranted { who: T::AccountId, granted: Role, role: Role },
        /// Capabilities were removed from an account.
        RoleRevoked { who: T::AccountId, revoked: Role, role: Role },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// The caller does not hold `ManageRoles`.
        PermissionDenied,
        /// Empty bitmask or zero identity.
        InvalidArgument,
    }

    #[pallet::genesis_config]
    #[derive(DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Accounts that start with every capability.
        pub admins: Vec<T::AccountId>,
        /// Additional explicit grants, e.g. operator pallet accounts.
        pub grants: Vec<(T::AccountId, Role)>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let admins = self.admins.iter().map(|who| (who, ALL_CAPABILITIES));
            let grants = self.grants.iter().map(|(who, role)| (who, *role));
            for (who, role) in admins.chain(grants) {
                assert!(!is_zero_account(who), "the zero identity cannot hold a role");
                Roles::<T>::mutate(who, |current| *current |= role);
            }
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Add `capabilities` to `who`'s role.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::grant())]
        pub fn grant(
            origin: OriginFor<T>,
            who: T::AccountId,
            capabilities: Role,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::ensure_capability(&caller, Capability::ManageRoles)?;
            ensure!(capabilities != 0, Error::<T>::InvalidArgument);
            ensure!(!is_zero_account(&who), Error::<T>::InvalidArgument);

            let role = Roles::<T>::mutate(&who, |current| {
                *current |= capabilities;
                *current
            });

            log::debug!(target: crate::LOG_TARGET, "granted {capabilities:#x}, role now {role:#x}");
            Self::deposit_event(Event::RoleGranted { who, granted: capabilities, role });
            Ok(())
        }

        /// Remove `capabilities` from `who`'s role.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::revoke())]
        pub fn revoke(
            origin: OriginFor<T>,
            who: T::AccountId,
            capabilities: Role,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::ensure_capability(&caller, Capability::ManageRoles)?;
            ensure!(capabilities != 0, Error::<T>::InvalidArgument);
            ensure!(!is_zero_account(&who), Error::<T>::InvalidArgument);

            let role = Roles::<T>::get(&who) & !capabilities;
            if role == 0 {
                Roles::<T>::remove(&who);
            } else {
                Roles::<T>::insert(&who, role);
            }

            log::debug!(target: crate::LOG_TARGET, "revoked {capabilities:#x}, role now {role:#x}");
            Self::deposit_event(Event::RoleRevoked { who, revoked: capabilities, role });
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        pub fn role_of(who: &T::AccountId) -> Role {
            Roles::<T>::get(who)
        }

        pub fn has_capability(who: &T::AccountId, capability: Capability) -> bool {
            capability.granted_by(Self::role_of(who))
        }

        fn ensure_capability(who: &T::AccountId, capability: Capability) -> DispatchResult {
            ensure!(Self::has_capability(who, capability), Error::<T>::PermissionDenied);
            Ok(())
        }
    }

    impl<T: Config> CapabilityInspect<T::AccountId> for Pallet<T> {
        fn role_of(who: &T::AccountId) -> Role {
            Roles::<T>::get(who)
        }
    }
}
