//! Signed action builders shared by benchmarks and integration tests.

use ax_01_action_codec::{
    GrantPowerOfAttorney, JoinNetwork, ProtocolCode, RevokePowerOfAttorney, UpdateInfo, Void,
};
use shared_crypto::{PrivateKey, Signature, Token};

/// Deterministic key for test actor `seed`.
pub fn key(seed: u8) -> PrivateKey {
    PrivateKey::from_seed([seed; 32])
}

pub fn join(author: &PrivateKey, handle: &str, details: &str) -> Vec<u8> {
    let mut action = JoinNetwork {
        epoch: 1,
        author: author.token(),
        handle: handle.to_string(),
        details: details.to_string(),
        signature: Signature::EMPTY,
    };
    action.sign(author);
    action.to_bytes()
}

pub fn update(author: &Token, signer: &PrivateKey, details: &str) -> Vec<u8> {
    let mut action = UpdateInfo {
        epoch: 1,
        author: *author,
        details: details.to_string(),
        signer: signer.token(),
        signature: Signature::EMPTY,
    };
    action.sign(signer);
    action.to_bytes()
}

pub fn grant(author: &PrivateKey, attorney: &Token) -> Vec<u8> {
    let mut action = GrantPowerOfAttorney {
        epoch: 1,
        author: author.token(),
        fingerprint: attorney.as_bytes()[..8].to_vec(),
        attorney: *attorney,
        signature: Signature::EMPTY,
    };
    action.sign(author);
    action.to_bytes()
}

pub fn revoke(author: &PrivateKey, attorney: &Token) -> Vec<u8> {
    let mut action = RevokePowerOfAttorney {
        epoch: 1,
        author: author.token(),
        attorney: *attorney,
        signature: Signature::EMPTY,
    };
    action.sign(author);
    action.to_bytes()
}

pub fn void(epoch: u64, author: &Token, signer: &PrivateKey, data: &[u8]) -> Vec<u8> {
    let mut action = Void {
        epoch,
        protocol: ProtocolCode([ProtocolCode::AXE_FAMILY, 0, 1, 0]),
        author: *author,
        data: data.to_vec(),
        signer: signer.token(),
        signature: Signature::EMPTY,
    };
    action.sign(signer);
    action.to_bytes()
}
