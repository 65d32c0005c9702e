use thiserror::Error;

use crate::encoding::{Charset, UnitWidth};

/// Failure of a lookup, decode, encode or cursor movement.
///
/// Codecs return these as-is. Nothing in this crate replaces an invalid
/// sequence or an unrepresentable character with a placeholder; callers
/// decide whether to substitute, skip or abort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum CodecError {
    #[error("unknown charset `{name}`")]
    UnknownCharset { name: String },

    /// `len` units starting at `pos` do not form a character.
    #[error("invalid unit sequence of length {len} at unit {pos}")]
    InvalidSequence { pos: usize, len: usize },

    /// The buffer ends inside the sequence starting at `pos`.
    #[error("truncated sequence at unit {pos}: only {available} unit(s) left")]
    TruncatedSequence { pos: usize, available: usize },

    /// `ch` is the character value as carried by the dynamic path.
    #[error("character {ch:#x} is not representable in {charset}")]
    UnrepresentableCharacter { charset: Charset, ch: u32 },

    #[error("output buffer too small: {needed} unit(s) needed at unit {pos}, {available} left")]
    BufferTooSmall {
        pos: usize,
        needed: usize,
        available: usize,
    },

    #[error("cursor moved out of bounds: unit {pos} of {len}")]
    OutOfBounds { pos: usize, len: usize },

    #[error("{charset} works on {expected:?} units, got {found:?}")]
    UnitWidthMismatch {
        charset: Charset,
        expected: UnitWidth,
        found: UnitWidth,
    },

    #[error("stream state of {found} passed to a {expected} codec")]
    ForeignState { expected: Charset, found: Charset },
}

impl CodecError {
    /// Whether more input could turn this error into a successful decode.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, CodecError::TruncatedSequence { .. })
    }
}
