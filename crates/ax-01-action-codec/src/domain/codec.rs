//! # Action Codec
//!
//! Encode, decode, and sign attorney actions.
//!
//! ## Decode Order
//!
//! 1. Header and discriminator
//! 2. Variant fields in fixed order
//! 3. Embedded JSON (`details`) must parse
//! 4. Signed prefix ends exactly before the signature field
//! 5. Signature verified against the signer's token over that prefix
//! 6. No trailing bytes
//!
//! Any failure yields a [`DecodeError`]; a partially decoded action is never
//! returned.

use shared_crypto::{PrivateKey, Signature, Token};

use super::entities::{
    Action, ActionKind, GrantPowerOfAttorney, JoinNetwork, ProtocolCode, RevokePowerOfAttorney,
    UpdateInfo, Void,
};
use super::errors::DecodeError;
use super::wire::{
    WireReader, WireWriter, FORMAT_VERSION, HEADER_SIZE, KIND_OFFSET, PROTOCOL_OFFSET,
    VOID_INSTRUCTION, VOID_TAIL_SIZE,
};

/// Cheap pre-check: read only the header and discriminator.
///
/// Returns `None` if the buffer is shorter than the header, the header
/// bytes are not the canonical family tag, or the discriminator is unknown.
pub fn kind(data: &[u8]) -> Option<ActionKind> {
    if data.len() < HEADER_SIZE {
        return None;
    }
    if data[0] != FORMAT_VERSION
        || data[1] != VOID_INSTRUCTION
        || data[PROTOCOL_OFFSET] != ProtocolCode::AXE_FAMILY
    {
        return None;
    }
    ActionKind::from_byte(data[KIND_OFFSET])
}

/// Header test for attorney actions other than Void. Does not parse the
/// body, so a `true` result is no guarantee the action decodes.
pub fn is_attorney_non_void(data: &[u8]) -> bool {
    if data.len() < HEADER_SIZE {
        return false;
    }
    data[0] == FORMAT_VERSION
        && data[1] == VOID_INSTRUCTION
        && data[PROTOCOL_OFFSET..KIND_OFFSET] == ProtocolCode::ATTORNEY.0
        && data[KIND_OFFSET] != ActionKind::Void.as_byte()
}

/// Tokens a caller should index this action under, or an empty list if
/// the bytes do not decode.
pub fn get_tokens(data: &[u8]) -> Vec<Token> {
    Action::decode(data)
        .map(|action| action.tokens())
        .unwrap_or_default()
}

fn check_details(details: &str) -> Result<(), DecodeError> {
    if is_valid_json(details) {
        Ok(())
    } else {
        Err(DecodeError::InvalidDetails)
    }
}

/// Whether `text` parses as a single JSON value.
pub fn is_valid_json(text: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok()
}

fn verify(
    signer: &Token,
    data: &[u8],
    signed_len: usize,
    signature: &Signature,
) -> Result<(), DecodeError> {
    if signer.verify(&data[..signed_len], signature) {
        Ok(())
    } else {
        Err(DecodeError::BadSignature)
    }
}

impl JoinNetwork {
    /// Bytes covered by the signature.
    pub fn signed_payload(&self) -> Vec<u8> {
        let mut writer =
            WireWriter::with_header(self.epoch, ProtocolCode::ATTORNEY, ActionKind::JoinNetwork);
        writer.put_token(&self.author);
        writer.put_string(&self.handle);
        writer.put_string(&self.details);
        writer.into_bytes()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.signed_payload();
        bytes.extend_from_slice(self.signature.as_bytes());
        bytes
    }

    pub fn sign(&mut self, key: &PrivateKey) {
        self.signature = key.sign(&self.signed_payload());
    }

    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = WireReader::new(data);
        let header = reader.expect_header(ActionKind::JoinNetwork)?;
        let author = reader.read_token("author")?;
        let handle = reader.read_string("handle")?;
        let details = reader.read_string("details")?;
        check_details(&details)?;
        let signed_len = reader.position();
        let signature = reader.read_signature()?;
        reader.finish()?;
        verify(&author, data, signed_len, &signature)?;
        Ok(Self {
            epoch: header.epoch,
            author,
            handle,
            details,
            signature,
        })
    }
}

impl UpdateInfo {
    /// Bytes covered by the signature.
    pub fn signed_payload(&self) -> Vec<u8> {
        let mut writer =
            WireWriter::with_header(self.epoch, ProtocolCode::ATTORNEY, ActionKind::UpdateInfo);
        writer.put_token(&self.author);
        writer.put_string(&self.details);
        writer.put_token(&self.signer);
        writer.into_bytes()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.signed_payload();
        bytes.extend_from_slice(self.signature.as_bytes());
        bytes
    }

    /// Sign with the signer's key (the author's own key, or an attorney's).
    pub fn sign(&mut self, key: &PrivateKey) {
        self.signature = key.sign(&self.signed_payload());
    }

    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = WireReader::new(data);
        let header = reader.expect_header(ActionKind::UpdateInfo)?;
        let author = reader.read_token("author")?;
        let details = reader.read_string("details")?;
        check_details(&details)?;
        let signer = reader.read_token("signer")?;
        let signed_len = reader.position();
        let signature = reader.read_signature()?;
        reader.finish()?;
        verify(&signer, data, signed_len, &signature)?;
        Ok(Self {
            epoch: header.epoch,
            author,
            details,
            signer,
            signature,
        })
    }
}

impl GrantPowerOfAttorney {
    /// Bytes covered by the signature.
    pub fn signed_payload(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_header(
            self.epoch,
            ProtocolCode::ATTORNEY,
            ActionKind::GrantPowerOfAttorney,
        );
        writer.put_token(&self.author);
        writer.put_bytes(&self.fingerprint);
        writer.put_token(&self.attorney);
        writer.into_bytes()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.signed_payload();
        bytes.extend_from_slice(self.signature.as_bytes());
        bytes
    }

    pub fn sign(&mut self, key: &PrivateKey) {
        self.signature = key.sign(&self.signed_payload());
    }

    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = WireReader::new(data);
        let header = reader.expect_header(ActionKind::GrantPowerOfAttorney)?;
        let author = reader.read_token("author")?;
        let fingerprint = reader.read_bytes("fingerprint")?;
        let attorney = reader.read_token("attorney")?;
        let signed_len = reader.position();
        let signature = reader.read_signature()?;
        reader.finish()?;
        verify(&author, data, signed_len, &signature)?;
        Ok(Self {
            epoch: header.epoch,
            author,
            fingerprint,
            attorney,
            signature,
        })
    }
}

impl RevokePowerOfAttorney {
    /// Bytes covered by the signature.
    pub fn signed_payload(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_header(
            self.epoch,
            ProtocolCode::ATTORNEY,
            ActionKind::RevokePowerOfAttorney,
        );
        writer.put_token(&self.author);
        writer.put_token(&self.attorney);
        writer.into_bytes()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.signed_payload();
        bytes.extend_from_slice(self.signature.as_bytes());
        bytes
    }

    pub fn sign(&mut self, key: &PrivateKey) {
        self.signature = key.sign(&self.signed_payload());
    }

    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = WireReader::new(data);
        let header = reader.expect_header(ActionKind::RevokePowerOfAttorney)?;
        let author = reader.read_token("author")?;
        let attorney = reader.read_token("attorney")?;
        let signed_len = reader.position();
        let signature = reader.read_signature()?;
        reader.finish()?;
        verify(&author, data, signed_len, &signature)?;
        Ok(Self {
            epoch: header.epoch,
            author,
            attorney,
            signature,
        })
    }
}

impl Void {
    /// Bytes covered by the signature.
    pub fn signed_payload(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_header(self.epoch, self.protocol, ActionKind::Void);
        writer.put_token(&self.author);
        writer.put_raw(&self.data);
        writer.put_token(&self.signer);
        writer.into_bytes()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.signed_payload();
        bytes.extend_from_slice(self.signature.as_bytes());
        bytes
    }

    /// Sign with the signer's key (the author's own key, or an attorney's).
    pub fn sign(&mut self, key: &PrivateKey) {
        self.signature = key.sign(&self.signed_payload());
    }

    /// The payload has no length prefix: it runs from just after the author
    /// token up to the fixed-size signer and signature tail.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = WireReader::new(data);
        let header = reader.expect_header(ActionKind::Void)?;
        let author = reader.read_token("author")?;
        let payload = reader.read_until_tail(VOID_TAIL_SIZE, "data")?;
        let signer = reader.read_token("signer")?;
        let signed_len = reader.position();
        let signature = reader.read_signature()?;
        reader.finish()?;
        verify(&signer, data, signed_len, &signature)?;
        Ok(Self {
            epoch: header.epoch,
            protocol: header.protocol,
            author,
            data: payload,
            signer,
            signature,
        })
    }
}

impl Action {
    /// Dispatch on the discriminator and run the matching decoder.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let Some(kind) = kind(data) else {
            // Re-read to report the precise header failure.
            let header = WireReader::new(data).read_header()?;
            return Err(DecodeError::UnknownKind(header.kind.as_byte()));
        };
        Ok(match kind {
            ActionKind::JoinNetwork => JoinNetwork::decode(data)?.into(),
            ActionKind::UpdateInfo => UpdateInfo::decode(data)?.into(),
            ActionKind::GrantPowerOfAttorney => GrantPowerOfAttorney::decode(data)?.into(),
            ActionKind::RevokePowerOfAttorney => RevokePowerOfAttorney::decode(data)?.into(),
            ActionKind::Void => Void::decode(data)?.into(),
        })
    }

    /// Canonical encoding, signature included.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Action::JoinNetwork(a) => a.to_bytes(),
            Action::UpdateInfo(a) => a.to_bytes(),
            Action::GrantPowerOfAttorney(a) => a.to_bytes(),
            Action::RevokePowerOfAttorney(a) => a.to_bytes(),
            Action::Void(a) => a.to_bytes(),
        }
    }

    /// Exact prefix over which the signature is computed.
    pub fn signed_payload(&self) -> Vec<u8> {
        match self {
            Action::JoinNetwork(a) => a.signed_payload(),
            Action::UpdateInfo(a) => a.signed_payload(),
            Action::GrantPowerOfAttorney(a) => a.signed_payload(),
            Action::RevokePowerOfAttorney(a) => a.signed_payload(),
            Action::Void(a) => a.signed_payload(),
        }
    }

    /// Sign with `key`, which must belong to [`Action::signer`] for the
    /// result to decode.
    pub fn sign(&mut self, key: &PrivateKey) {
        match self {
            Action::JoinNetwork(a) => a.sign(key),
            Action::UpdateInfo(a) => a.sign(key),
            Action::GrantPowerOfAttorney(a) => a.sign(key),
            Action::RevokePowerOfAttorney(a) => a.sign(key),
            Action::Void(a) => a.sign(key),
        }
    }

    /// Whether the signature verifies over the canonical signed prefix.
    pub fn verify_signature(&self) -> bool {
        self.signer()
            .verify(&self.signed_payload(), self.signature())
    }
}
