//! # Action Entities
//!
//! The five action kinds of the attorney protocol, as one sum type.
//!
//! | Kind | Signed by | Extra tokens tracked |
//! |------|-----------|----------------------|
//! | `JoinNetwork` | author | - |
//! | `UpdateInfo` | signer | signer (if ≠ author) |
//! | `GrantPowerOfAttorney` | author | attorney |
//! | `RevokePowerOfAttorney` | author | attorney |
//! | `Void` | signer | signer (if ≠ author) |

use std::fmt;

use serde::Serialize;
use shared_crypto::{Signature, Token};

/// Kind discriminator byte carried at offset 14.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum ActionKind {
    Void = 0,
    JoinNetwork = 1,
    UpdateInfo = 2,
    GrantPowerOfAttorney = 3,
    RevokePowerOfAttorney = 4,
}

impl ActionKind {
    /// All kinds in discriminator order.
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Void,
        ActionKind::JoinNetwork,
        ActionKind::UpdateInfo,
        ActionKind::GrantPowerOfAttorney,
        ActionKind::RevokePowerOfAttorney,
    ];

    /// Wire discriminator.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Parse a wire discriminator.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.get(byte as usize).copied()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Void => "void",
            ActionKind::JoinNetwork => "join_network",
            ActionKind::UpdateInfo => "update_info",
            ActionKind::GrantPowerOfAttorney => "grant_power_of_attorney",
            ActionKind::RevokePowerOfAttorney => "revoke_power_of_attorney",
        };
        f.write_str(name)
    }
}

/// 4-byte protocol tag at offset 10.
///
/// The first byte is the axé family marker; the remaining three name the
/// sub-protocol. Native attorney actions use [`ProtocolCode::ATTORNEY`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ProtocolCode(pub [u8; 4]);

impl ProtocolCode {
    /// Family marker byte shared by every axé protocol.
    pub const AXE_FAMILY: u8 = 1;

    /// Tag of the attorney protocol itself.
    pub const ATTORNEY: ProtocolCode = ProtocolCode([Self::AXE_FAMILY, 0, 0, 0]);

    pub fn is_axe_family(&self) -> bool {
        self.0[0] == Self::AXE_FAMILY
    }
}

impl Default for ProtocolCode {
    fn default() -> Self {
        Self::ATTORNEY
    }
}

impl fmt::Debug for ProtocolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProtocolCode({})", hex::encode(self.0))
    }
}

/// Claim a handle and enter the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinNetwork {
    pub epoch: u64,
    pub author: Token,
    /// Human-readable caption; globally unique.
    pub handle: String,
    /// JSON document describing the member.
    pub details: String,
    pub signature: Signature,
}

/// Replace a member's details, optionally signed by an attorney.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateInfo {
    pub epoch: u64,
    pub author: Token,
    pub details: String,
    pub signer: Token,
    pub signature: Signature,
}

/// Delegate signing power from `author` to `attorney`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantPowerOfAttorney {
    pub epoch: u64,
    pub author: Token,
    /// Opaque hint identifying the attorney's key material. May be empty.
    #[serde(serialize_with = "hex::serde::serialize")]
    pub fingerprint: Vec<u8>,
    pub attorney: Token,
    pub signature: Signature,
}

/// Withdraw a previously granted delegation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevokePowerOfAttorney {
    pub epoch: u64,
    pub author: Token,
    pub attorney: Token,
    pub signature: Signature,
}

/// Generic action of an outer protocol. This layer only authorizes the
/// author/signer pair; the payload is interpreted elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Void {
    pub epoch: u64,
    pub protocol: ProtocolCode,
    pub author: Token,
    #[serde(serialize_with = "hex::serde::serialize")]
    pub data: Vec<u8>,
    pub signer: Token,
    pub signature: Signature,
}

/// Any attorney action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    JoinNetwork(JoinNetwork),
    UpdateInfo(UpdateInfo),
    GrantPowerOfAttorney(GrantPowerOfAttorney),
    RevokePowerOfAttorney(RevokePowerOfAttorney),
    Void(Void),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::JoinNetwork(_) => ActionKind::JoinNetwork,
            Action::UpdateInfo(_) => ActionKind::UpdateInfo,
            Action::GrantPowerOfAttorney(_) => ActionKind::GrantPowerOfAttorney,
            Action::RevokePowerOfAttorney(_) => ActionKind::RevokePowerOfAttorney,
            Action::Void(_) => ActionKind::Void,
        }
    }

    pub fn epoch(&self) -> u64 {
        match self {
            Action::JoinNetwork(a) => a.epoch,
            Action::UpdateInfo(a) => a.epoch,
            Action::GrantPowerOfAttorney(a) => a.epoch,
            Action::RevokePowerOfAttorney(a) => a.epoch,
            Action::Void(a) => a.epoch,
        }
    }

    pub fn author(&self) -> &Token {
        match self {
            Action::JoinNetwork(a) => &a.author,
            Action::UpdateInfo(a) => &a.author,
            Action::GrantPowerOfAttorney(a) => &a.author,
            Action::RevokePowerOfAttorney(a) => &a.author,
            Action::Void(a) => &a.author,
        }
    }

    /// Token whose private key must have produced the signature.
    pub fn signer(&self) -> &Token {
        match self {
            Action::UpdateInfo(a) => &a.signer,
            Action::Void(a) => &a.signer,
            Action::JoinNetwork(a) => &a.author,
            Action::GrantPowerOfAttorney(a) => &a.author,
            Action::RevokePowerOfAttorney(a) => &a.author,
        }
    }

    pub fn signature(&self) -> &Signature {
        match self {
            Action::JoinNetwork(a) => &a.signature,
            Action::UpdateInfo(a) => &a.signature,
            Action::GrantPowerOfAttorney(a) => &a.signature,
            Action::RevokePowerOfAttorney(a) => &a.signature,
            Action::Void(a) => &a.signature,
        }
    }

    /// Every token that participates in this action, author first.
    pub fn tokens(&self) -> Vec<Token> {
        match self {
            Action::JoinNetwork(a) => vec![a.author],
            Action::GrantPowerOfAttorney(a) => vec![a.author, a.attorney],
            Action::RevokePowerOfAttorney(a) => vec![a.author, a.attorney],
            Action::UpdateInfo(UpdateInfo { author, signer, .. })
            | Action::Void(Void { author, signer, .. }) => {
                if author == signer {
                    vec![*author]
                } else {
                    vec![*author, *signer]
                }
            }
        }
    }
}

impl From<JoinNetwork> for Action {
    fn from(value: JoinNetwork) -> Self {
        Action::JoinNetwork(value)
    }
}

impl From<UpdateInfo> for Action {
    fn from(value: UpdateInfo) -> Self {
        Action::UpdateInfo(value)
    }
}

impl From<GrantPowerOfAttorney> for Action {
    fn from(value: GrantPowerOfAttorney) -> Self {
        Action::GrantPowerOfAttorney(value)
    }
}

impl From<RevokePowerOfAttorney> for Action {
    fn from(value: RevokePowerOfAttorney) -> Self {
        Action::RevokePowerOfAttorney(value)
    }
}

impl From<Void> for Action {
    fn from(value: Void) -> Self {
        Action::Void(value)
    }
}
