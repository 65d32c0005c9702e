use std::marker::PhantomData;

use crate::encoding::{Charset, Checkpoint, Codec, CodecError, Cursor, CursorMut, Stateless};

/// A byte to Unicode table for a single-byte code page.
///
/// [`Fixed`](crate::encoding::Fixed) codecs report raw byte values; wrapping
/// a table in [`Mapped`] gives a codec that reports Unicode characters
/// instead.
pub trait MappingTable: 'static {
    const CHARSET: Charset;
    const IS_ASCII_SUPERSET: bool;
    const IS_ASCII_PLUS_C1_SUPERSET: bool = false;

    fn to_unicode(byte: u8) -> Option<char>;
    fn from_unicode(ch: char) -> Option<u8>;
}

/// Table-driven codec over a [`MappingTable`].
pub struct Mapped<T>(PhantomData<fn() -> T>);

impl<T: MappingTable> Codec for Mapped<T> {
    const CHARSET: Charset = T::CHARSET;
    const IS_ASCII_SUPERSET: bool = T::IS_ASCII_SUPERSET;
    const IS_ASCII_PLUS_C1_SUPERSET: bool = T::IS_ASCII_PLUS_C1_SUPERSET;

    type Char = char;
    type Unit = u8;
    type State = Stateless<Self>;

    fn decode(cur: &mut Cursor<'_, u8>, _state: &mut Self::State) -> Result<char, CodecError> {
        let byte = cur.peek().ok_or_else(|| cur.out_of_bounds())?;
        let ch = T::to_unicode(byte).ok_or_else(|| cur.invalid(1))?;
        cur.advance(1)?;
        Ok(ch)
    }

    fn encode(
        out: &mut CursorMut<'_, u8>,
        ch: char,
        _state: &mut Self::State,
    ) -> Result<(), CodecError> {
        let byte = T::from_unicode(ch).ok_or(CodecError::UnrepresentableCharacter {
            charset: T::CHARSET,
            ch: u32::from(ch),
        })?;
        out.push(byte)
    }

    fn skip_forward_char(
        cur: &mut Cursor<'_, u8>,
        _state: &mut Self::State,
    ) -> Result<(), CodecError> {
        cur.advance(1)
    }

    fn skip_backward_char(
        cur: &mut Cursor<'_, u8>,
        _state: &mut Self::State,
        _checkpoint: &Checkpoint<Self::State>,
    ) -> Result<(), CodecError> {
        cur.retreat(1)
    }

    fn char_length(cur: &Cursor<'_, u8>, _state: &Self::State) -> Result<usize, CodecError> {
        let byte = cur.peek().ok_or_else(|| cur.out_of_bounds())?;
        T::to_unicode(byte).map(|_| 1).ok_or_else(|| cur.invalid(1))
    }

    fn max_characters(n_units: usize) -> usize {
        n_units
    }

    fn typ_characters(n_units: usize) -> usize {
        n_units
    }

    fn max_units(n_characters: usize) -> usize {
        n_characters
    }

    fn typ_units(n_characters: usize) -> usize {
        n_characters
    }
}

/// ISO-8859-1, where every byte is the code point of the same value.
pub struct Latin1Table;

impl MappingTable for Latin1Table {
    const CHARSET: Charset = Charset::ISO_8859_1;
    const IS_ASCII_SUPERSET: bool = true;
    const IS_ASCII_PLUS_C1_SUPERSET: bool = true;

    fn to_unicode(byte: u8) -> Option<char> {
        Some(char::from(byte))
    }

    fn from_unicode(ch: char) -> Option<u8> {
        u8::try_from(ch).ok()
    }
}
