//! Wire framing: a command word followed by CRC-protected payload words going
//! out, and CRC-protected words coming back.

use crate::SCD4xError;
use crate::command::Command;
use crate::crc::crc8;

/// Bytes per word on the wire: two data bytes and a checksum.
pub const WORD_LEN: usize = 3;
/// Largest payload any command carries.
pub const MAX_ARGS: usize = 1;
/// Largest response any command produces.
pub const MAX_RESPONSE_WORDS: usize = 3;

const MAX_FRAME_LEN: usize = 2 + MAX_ARGS * WORD_LEN;

/// An outgoing frame ready to be written to the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame {
    buf: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl CommandFrame {
    pub fn new(command: Command, args: &[u16]) -> Result<Self, SCD4xError> {
        if args.len() > MAX_ARGS {
            return Err(SCD4xError::InvalidArgument);
        }
        let mut buf = [0u8; MAX_FRAME_LEN];
        buf[..2].copy_from_slice(&command.to_be_bytes());
        let mut len = 2;
        for &arg in args {
            buf[len..len + WORD_LEN].copy_from_slice(&encode_word(arg));
            len += WORD_LEN;
        }
        Ok(Self { buf, len })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

pub fn encode_word(word: u16) -> [u8; WORD_LEN] {
    let [msb, lsb] = word.to_be_bytes();
    [msb, lsb, crc8(msb, lsb)]
}

pub fn decode_word(chunk: &[u8; WORD_LEN]) -> Result<u16, SCD4xError> {
    if crc8(chunk[0], chunk[1]) != chunk[2] {
        return Err(SCD4xError::Crc);
    }
    Ok(u16::from_be_bytes([chunk[0], chunk[1]]))
}

/// Decodes `out.len()` words from `bytes`.
///
/// Every checksum is verified before anything is written to `out`, so a
/// single bad word leaves `out` untouched.
pub fn decode_words(bytes: &[u8], out: &mut [u16]) -> Result<(), SCD4xError> {
    if bytes.len() != out.len() * WORD_LEN {
        return Err(SCD4xError::InvalidArgument);
    }
    let chunks = bytes.chunks_exact(WORD_LEN);
    if chunks.clone().any(|c| crc8(c[0], c[1]) != c[2]) {
        return Err(SCD4xError::Crc);
    }
    for (word, chunk) in out.iter_mut().zip(chunks) {
        *word = u16::from_be_bytes([chunk[0], chunk[1]]);
    }
    Ok(())
}
