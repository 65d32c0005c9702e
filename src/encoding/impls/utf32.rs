use crate::encoding::{Charset, Checkpoint, Codec, CodecError, Cursor, CursorMut, Stateless};

/// UTF-32 serialized to bytes in a fixed byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Utf32<const LE: bool>;

#[allow(non_camel_case_types)]
pub type UTF_32BE = Utf32<false>;
#[allow(non_camel_case_types)]
pub type UTF_32LE = Utf32<true>;

impl<const LE: bool> Utf32<LE> {
    fn scan(cur: &Cursor<'_, u8>) -> Result<char, CodecError> {
        let bytes = cur.remaining();
        if bytes.is_empty() {
            return Err(cur.out_of_bounds());
        }
        let Some(&word) = bytes.first_chunk::<4>() else {
            return Err(cur.truncated());
        };
        let unicode = if LE {
            u32::from_le_bytes(word)
        } else {
            u32::from_be_bytes(word)
        };
        char::from_u32(unicode).ok_or_else(|| cur.invalid(4))
    }
}

impl<const LE: bool> Codec for Utf32<LE> {
    const CHARSET: Charset = if LE {
        Charset::UTF_32LE
    } else {
        Charset::UTF_32BE
    };
    const IS_ASCII_SUPERSET: bool = false;
    const IS_ASCII_PLUS_C1_SUPERSET: bool = false;

    type Char = char;
    type Unit = u8;
    type State = Stateless<Self>;

    fn decode(cur: &mut Cursor<'_, u8>, _state: &mut Self::State) -> Result<char, CodecError> {
        let ch = Self::scan(cur)?;
        cur.advance(4)?;
        Ok(ch)
    }

    fn encode(
        out: &mut CursorMut<'_, u8>,
        ch: char,
        _state: &mut Self::State,
    ) -> Result<(), CodecError> {
        let bytes = if LE {
            u32::from(ch).to_le_bytes()
        } else {
            u32::from(ch).to_be_bytes()
        };
        out.push_all(&bytes)
    }

    fn skip_backward_char(
        cur: &mut Cursor<'_, u8>,
        _state: &mut Self::State,
        _checkpoint: &Checkpoint<Self::State>,
    ) -> Result<(), CodecError> {
        cur.retreat(4)
    }

    fn char_length(cur: &Cursor<'_, u8>, _state: &Self::State) -> Result<usize, CodecError> {
        Self::scan(cur).map(|_| 4)
    }

    fn max_characters(n_units: usize) -> usize {
        n_units / 4
    }

    fn typ_characters(n_units: usize) -> usize {
        n_units / 4
    }

    fn max_units(n_characters: usize) -> usize {
        n_characters.saturating_mul(4)
    }

    fn typ_units(n_characters: usize) -> usize {
        n_characters.saturating_mul(4)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_decode() {
        let mut state = Stateless::new();
        let mut cur = Cursor::new(&b"\x00\x01\xf3\x7a\x7a\xf3\x01\x00"[..]);
        assert_eq!(UTF_32BE::decode(&mut cur, &mut state), Ok('🍺'));
        assert_eq!(cur.position(), 4);

        let mut state = Stateless::new();
        let mut cur = Cursor::at(&b"\x00\x01\xf3\x7a\x7a\xf3\x01\x00"[..], 4).unwrap();
        assert_eq!(UTF_32LE::decode(&mut cur, &mut state), Ok('🍺'));
    }

    #[test]
    fn test_errors() {
        let mut state = Stateless::new();
        for bytes in [&b"\x00\x00\xd8\x00"[..], b"\x00\x11\x00\x00"] {
            let mut cur = Cursor::new(bytes);
            assert_eq!(
                UTF_32BE::decode(&mut cur, &mut state),
                Err(CodecError::InvalidSequence { pos: 0, len: 4 })
            );
            assert_eq!(cur.position(), 0);
        }
        let cur = Cursor::new(&b"\x00\x00\x00"[..]);
        assert_eq!(
            UTF_32BE::char_length(&cur, &state),
            Err(CodecError::TruncatedSequence {
                pos: 0,
                available: 3
            })
        );
    }

    #[test]
    fn test_encode_and_skip() {
        let mut buf = [0u8; 8];
        let mut out = CursorMut::new(&mut buf[..]);
        UTF_32LE::encode(&mut out, 'A', &mut Stateless::new()).unwrap();
        UTF_32LE::encode(&mut out, 'あ', &mut Stateless::new()).unwrap();
        assert_eq!(out.written(), b"A\x00\x00\x00\x42\x30\x00\x00");

        let mut cur = Cursor::at(&buf[..], 8).unwrap();
        let mut state = Stateless::new();
        UTF_32LE::skip_backward_char(&mut cur, &mut state, &Checkpoint::start()).unwrap();
        assert_eq!(cur.position(), 4);
        UTF_32LE::skip_forward_char(&mut cur, &mut state).unwrap();
        assert_eq!(cur.position(), 8);
    }
}
