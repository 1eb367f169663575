//! # Canonical Byte Layout
//!
//! ```text
//! offset  size  field
//! 0       1     format version (0)
//! 1       1     instruction family (0 = void instruction of the outer log)
//! 2       8     epoch, u64 big-endian
//! 10      4     protocol tag (byte 10 = axé family marker 1)
//! 14      1     kind discriminator
//! 15      ..    variant fields, signature last
//! ```
//!
//! Strings and byte blobs carry a u32 big-endian length prefix. Tokens and
//! signatures are fixed-width raw bytes.

use shared_crypto::{Signature, Token, SIGNATURE_SIZE, TOKEN_SIZE};

use super::entities::{ActionKind, ProtocolCode};
use super::errors::DecodeError;

/// The only format version this codec reads or writes.
pub const FORMAT_VERSION: u8 = 0;

/// Outer-log instruction tag for void (protocol-defined) instructions.
pub const VOID_INSTRUCTION: u8 = 0;

/// Offset of the protocol tag.
pub const PROTOCOL_OFFSET: usize = 10;

/// Offset of the kind discriminator.
pub const KIND_OFFSET: usize = 14;

/// Header length: version, instruction, epoch, protocol tag, kind.
pub const HEADER_SIZE: usize = KIND_OFFSET + 1;

/// Bytes after a Void payload: signer token and signature.
pub const VOID_TAIL_SIZE: usize = TOKEN_SIZE + SIGNATURE_SIZE;

/// Fields of a parsed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub epoch: u64,
    pub protocol: ProtocolCode,
    pub kind: ActionKind,
}

/// Append-only encoder.
#[derive(Debug, Default)]
pub struct WireWriter {
    bytes: Vec<u8>,
}

impl WireWriter {
    /// Start an action with its full header.
    pub fn with_header(epoch: u64, protocol: ProtocolCode, kind: ActionKind) -> Self {
        let mut writer = Self {
            bytes: Vec::with_capacity(256),
        };
        writer.put_u8(FORMAT_VERSION);
        writer.put_u8(VOID_INSTRUCTION);
        writer.put_u64(epoch);
        writer.put_raw(&protocol.0);
        writer.put_u8(kind.as_byte());
        writer
    }

    pub fn put_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn put_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_token(&mut self, token: &Token) {
        self.bytes.extend_from_slice(token.as_bytes());
    }

    pub fn put_signature(&mut self, signature: &Signature) {
        self.bytes.extend_from_slice(signature.as_bytes());
    }

    /// Length-prefixed byte blob.
    ///
    /// # Panics
    ///
    /// If `data` is longer than a `u32` length prefix can describe.
    pub fn put_bytes(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(&length_prefix(data.len()));
        self.bytes.extend_from_slice(data);
    }

    /// Length-prefixed UTF-8 string.
    pub fn put_string(&mut self, value: &str) {
        self.put_bytes(value.as_bytes());
    }

    /// Bytes with no length prefix.
    pub fn put_raw(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Big-endian `u32` length prefix. Fields are bounded by the outer log's
/// block size, so a longer one is a caller bug rather than input to reject.
fn length_prefix(len: usize) -> [u8; 4] {
    match u32::try_from(len) {
        Ok(len) => len.to_be_bytes(),
        Err(_) => panic!("field of {len} bytes exceeds the u32 length prefix"),
    }
}

/// Cursor over an encoded action. Every read is bounds-checked.
#[derive(Debug)]
pub struct WireReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current offset. Everything before it has been consumed.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    fn take(&mut self, needed: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < needed {
            return Err(DecodeError::Truncated {
                field,
                offset: self.position,
                needed,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.position..self.position + needed];
        self.position += needed;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    /// Read and check the header. The kind is returned as found; callers
    /// decide whether it is the one they expect.
    pub fn read_header(&mut self) -> Result<Header, DecodeError> {
        if self.data.len() < HEADER_SIZE {
            return Err(DecodeError::TooShort {
                len: self.data.len(),
                min: HEADER_SIZE,
            });
        }
        let [version] = self.take_array::<1>("version")?;
        if version != FORMAT_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        let [instruction] = self.take_array::<1>("instruction")?;
        if instruction != VOID_INSTRUCTION {
            return Err(DecodeError::NotVoidInstruction(instruction));
        }
        let epoch = u64::from_be_bytes(self.take_array("epoch")?);
        let protocol = ProtocolCode(self.take_array("protocol")?);
        if !protocol.is_axe_family() {
            return Err(DecodeError::ForeignProtocol(protocol.0));
        }
        let [kind_byte] = self.take_array::<1>("kind")?;
        let kind = ActionKind::from_byte(kind_byte).ok_or(DecodeError::UnknownKind(kind_byte))?;
        Ok(Header {
            epoch,
            protocol,
            kind,
        })
    }

    /// Read the header and require a specific kind. Non-void kinds must
    /// also carry exactly the attorney protocol tag.
    pub fn expect_header(&mut self, expected: ActionKind) -> Result<Header, DecodeError> {
        let header = self.read_header()?;
        if header.kind != expected {
            return Err(DecodeError::KindMismatch {
                expected,
                found: header.kind.as_byte(),
            });
        }
        if expected != ActionKind::Void && header.protocol != ProtocolCode::ATTORNEY {
            return Err(DecodeError::ForeignProtocol(header.protocol.0));
        }
        Ok(header)
    }

    pub fn read_token(&mut self, field: &'static str) -> Result<Token, DecodeError> {
        Ok(Token::from_bytes(self.take_array(field)?))
    }

    pub fn read_signature(&mut self) -> Result<Signature, DecodeError> {
        Ok(Signature::from_bytes(self.take_array("signature")?))
    }

    pub fn read_bytes(&mut self, field: &'static str) -> Result<Vec<u8>, DecodeError> {
        let len = u32::from_be_bytes(self.take_array(field)?) as usize;
        Ok(self.take(len, field)?.to_vec())
    }

    pub fn read_string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        String::from_utf8(self.read_bytes(field)?).map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    /// Take everything up to `tail` bytes before the end of the buffer.
    pub fn read_until_tail(
        &mut self,
        tail: usize,
        field: &'static str,
    ) -> Result<Vec<u8>, DecodeError> {
        if self.remaining() < tail {
            return Err(DecodeError::Truncated {
                field,
                offset: self.position,
                needed: tail,
                available: self.remaining(),
            });
        }
        let len = self.remaining() - tail;
        Ok(self.take(len, field)?.to_vec())
    }

    /// Require that the whole buffer has been consumed.
    pub fn finish(self) -> Result<(), DecodeError> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(DecodeError::TrailingBytes(extra)),
        }
    }
}
