//! Capability bits of the role table.
//!
//! A role is the bitwise union of the capabilities granted to an account. Each
//! capability is a single bit and is checked independently.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

/// Permission bitmask held by an account.
pub type Role = u32;

/// Every bit set. Granted to the genesis admins.
pub const ALL_CAPABILITIES: Role = Role::MAX;

/// A single capability bit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Encode,
    Decode,
    DecodeWithMemTracking,
    TypeInfo,
    MaxEncodedLen,
)]
pub enum Capability {
    /// Grant and revoke roles.
    ManageRoles,
    /// Mint new cards.
    CreateCards,
    /// Set, add or remove card attributes.
    ManageAttributes,
    /// Record battle outcomes into card statistics.
    RecordBattles,
    /// Initialize the presale inventory.
    ManagePresale,
    /// Move presale proceeds out of the market account.
    WithdrawFunds,
}

impl Capability {
    pub const fn bit(self) -> Role {
        match self {
            Capability::ManageRoles => 1 << 0,
            Capability::CreateCards => 1 << 1,
            Capability::ManageAttributes => 1 << 2,
            Capability::RecordBattles => 1 << 3,
            Capability::ManagePresale => 1 << 4,
            Capability::WithdrawFunds => 1 << 5,
        }
    }

    /// Whether `role` carries this capability.
    pub const fn granted_by(self, role: Role) -> bool {
        role & self.bit() != 0
    }
}

impl From<Capability> for Role {
    fn from(capability: Capability) -> Role {
        capability.bit()
    }
}
