//! Wire format of the 7941W-style USB card reader.
//!
//! The host writes a fixed 6-byte read command and the reader answers with a
//! fixed 2405-byte frame. Byte 3 of the answer is a validity marker (`0x81`
//! when a card was read) and bytes 5..9 carry the card identifier.
//!
//! There is no checksum in the answer. A corrupted frame whose marker byte
//! still reads `0x81` decodes as a valid read; this is an accepted risk of the
//! reader's protocol and is not patched over here.

use crate::domain::model::{CardIdentifier, ReadOutcome};

pub const READ_COMMAND: [u8; 6] = [0xab, 0xba, 0x00, 0x10, 0x00, 0x10];
pub const RESPONSE_LEN: usize = 2405;
pub const MARKER_OFFSET: usize = 3;
pub const MARKER_VALID: u8 = 0x81;
pub const IDENTIFIER_OFFSET: usize = 5;
pub const IDENTIFIER_LEN: usize = 4;

pub fn encode_read_command() -> [u8; 6] {
    READ_COMMAND
}

pub fn decode_response(bytes: &[u8]) -> ReadOutcome {
    if bytes.len() != RESPONSE_LEN {
        return ReadOutcome::NoData;
    }
    if bytes[MARKER_OFFSET] != MARKER_VALID {
        return ReadOutcome::InvalidFrame;
    }

    let mut id = [0u8; IDENTIFIER_LEN];
    id.copy_from_slice(&bytes[IDENTIFIER_OFFSET..IDENTIFIER_OFFSET + IDENTIFIER_LEN]);
    ReadOutcome::Valid(CardIdentifier::from_bytes(id))
}

/// Builds the answer the reader gives for `id`; the rest of the frame is zero.
/// Used by loopback channels and tests.
pub fn encode_response(id: [u8; 4]) -> Vec<u8> {
    let mut frame = vec![0u8; RESPONSE_LEN];
    frame[0] = 0xcd;
    frame[1] = 0xdc;
    frame[MARKER_OFFSET] = MARKER_VALID;
    frame[IDENTIFIER_OFFSET..IDENTIFIER_OFFSET + IDENTIFIER_LEN].copy_from_slice(&id);
    frame
}
