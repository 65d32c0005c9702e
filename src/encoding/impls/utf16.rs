use crate::encoding::{Charset, Checkpoint, Codec, CodecError, Cursor, CursorMut, Stateless};

/// UTF-16 serialized to bytes in a fixed byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Utf16<const LE: bool>;

#[allow(non_camel_case_types)]
pub type UTF_16BE = Utf16<false>;
#[allow(non_camel_case_types)]
pub type UTF_16LE = Utf16<true>;

impl<const LE: bool> Codec for Utf16<LE> {
    const CHARSET: Charset = if LE {
        Charset::UTF_16LE
    } else {
        Charset::UTF_16BE
    };
    const IS_ASCII_SUPERSET: bool = false;
    const IS_ASCII_PLUS_C1_SUPERSET: bool = false;

    type Char = char;
    type Unit = u8;
    type State = Stateless<Self>;

    fn decode(cur: &mut Cursor<'_, u8>, _state: &mut Self::State) -> Result<char, CodecError> {
        decode_with(cur, LE)
    }

    fn encode(
        out: &mut CursorMut<'_, u8>,
        ch: char,
        _state: &mut Self::State,
    ) -> Result<(), CodecError> {
        let (buf, len) = encode_with(ch, LE);
        out.push_all(&buf[..len])
    }

    fn skip_forward_char(
        cur: &mut Cursor<'_, u8>,
        _state: &mut Self::State,
    ) -> Result<(), CodecError> {
        let (len, _) = scan(cur, LE)?;
        cur.advance(len)
    }

    fn skip_backward_char(
        cur: &mut Cursor<'_, u8>,
        _state: &mut Self::State,
        _checkpoint: &Checkpoint<Self::State>,
    ) -> Result<(), CodecError> {
        let end = cur.position();
        if end < 2 {
            return Err(cur.out_of_bounds());
        }
        let units = cur.units();
        let last = unit(LE, &units[end - 2..end]);
        let start = if (0xDC00..0xE000).contains(&last)
            && end >= 4
            && (0xD800..0xDC00).contains(&unit(LE, &units[end - 4..end - 2]))
        {
            end - 4
        } else {
            end - 2
        };
        cur.set_position(start)
    }

    fn char_length(cur: &Cursor<'_, u8>, _state: &Self::State) -> Result<usize, CodecError> {
        scan(cur, LE).map(|(len, _)| len)
    }

    fn max_characters(n_units: usize) -> usize {
        n_units / 2
    }

    fn typ_characters(n_units: usize) -> usize {
        n_units / 2
    }

    fn max_units(n_characters: usize) -> usize {
        n_characters.saturating_mul(4)
    }

    fn typ_units(n_characters: usize) -> usize {
        n_characters.saturating_mul(2)
    }
}

/// Byte order of a `UTF-16` stream, fixed by its byte order mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BomState {
    #[default]
    Undetermined,
    BigEndian,
    LittleEndian,
}

impl BomState {
    fn is_le(self) -> bool {
        self == BomState::LittleEndian
    }
}

/// UTF-16 with an optional leading byte order mark; big-endian without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(non_camel_case_types)]
pub struct UTF_16;

impl Codec for UTF_16 {
    const CHARSET: Charset = Charset::UTF_16;
    const IS_ASCII_SUPERSET: bool = false;
    const IS_ASCII_PLUS_C1_SUPERSET: bool = false;

    type Char = char;
    type Unit = u8;
    type State = BomState;

    fn consume_shifts(cur: &mut Cursor<'_, u8>, state: &mut BomState) -> Result<(), CodecError> {
        if *state != BomState::Undetermined {
            return Ok(());
        }
        match (cur.peek(), cur.peek_at(1)) {
            (None, _) => {}
            // Possibly the first half of a mark; decide once more input is here.
            (Some(0xFE | 0xFF), None) => {}
            (Some(0xFE), Some(0xFF)) => {
                cur.advance(2)?;
                *state = BomState::BigEndian;
            }
            (Some(0xFF), Some(0xFE)) => {
                cur.advance(2)?;
                *state = BomState::LittleEndian;
            }
            _ => *state = BomState::BigEndian,
        }
        Ok(())
    }

    fn decode(cur: &mut Cursor<'_, u8>, state: &mut BomState) -> Result<char, CodecError> {
        Self::consume_shifts(cur, state)?;
        decode_with(cur, state.is_le())
    }

    fn encode(out: &mut CursorMut<'_, u8>, ch: char, state: &mut BomState) -> Result<(), CodecError> {
        let (buf, len) = encode_with(ch, state.is_le());
        if *state == BomState::Undetermined {
            let mut with_bom = [0xFE, 0xFF, 0, 0, 0, 0];
            with_bom[2..2 + len].copy_from_slice(&buf[..len]);
            out.push_all(&with_bom[..2 + len])?;
            *state = BomState::BigEndian;
            return Ok(());
        }
        out.push_all(&buf[..len])
    }

    fn skip_forward_char(cur: &mut Cursor<'_, u8>, state: &mut BomState) -> Result<(), CodecError> {
        let start = cur.position();
        Self::consume_shifts(cur, state)?;
        if cur.is_at_end() && cur.position() > start {
            return Ok(());
        }
        let (len, _) = scan(cur, state.is_le())?;
        cur.advance(len)
    }

    fn char_length(cur: &Cursor<'_, u8>, state: &BomState) -> Result<usize, CodecError> {
        let mut probe = *cur;
        let mut state = *state;
        Self::consume_shifts(&mut probe, &mut state)?;
        if probe.is_at_end() && probe.position() > cur.position() {
            return Ok(probe.position() - cur.position());
        }
        let (len, _) = scan(&probe, state.is_le())?;
        Ok(probe.position() - cur.position() + len)
    }

    fn max_characters(n_units: usize) -> usize {
        n_units / 2
    }

    fn typ_characters(n_units: usize) -> usize {
        n_units / 2
    }

    fn max_units(n_characters: usize) -> usize {
        n_characters.saturating_mul(4).saturating_add(2)
    }

    fn typ_units(n_characters: usize) -> usize {
        n_characters.saturating_mul(2).saturating_add(2)
    }
}

fn decode_with(cur: &mut Cursor<'_, u8>, le: bool) -> Result<char, CodecError> {
    let (len, unicode) = scan(cur, le)?;
    let ch = char::from_u32(unicode).ok_or_else(|| cur.invalid(len))?;
    cur.advance(len)?;
    Ok(ch)
}

fn encode_with(ch: char, le: bool) -> ([u8; 4], usize) {
    let mut units = [0u16; 2];
    let units = ch.encode_utf16(&mut units);
    let mut buf = [0u8; 4];
    for (i, &u) in units.iter().enumerate() {
        let bytes = if le { u.to_le_bytes() } else { u.to_be_bytes() };
        buf[2 * i..2 * i + 2].copy_from_slice(&bytes);
    }
    (buf, units.len() * 2)
}

/// Byte length and scalar value of the character at the cursor.
fn scan(cur: &Cursor<'_, u8>, le: bool) -> Result<(usize, u32), CodecError> {
    let bytes = cur.remaining();
    if bytes.is_empty() {
        return Err(cur.out_of_bounds());
    }
    if bytes.len() < 2 {
        return Err(cur.truncated());
    }
    match unit(le, bytes) {
        unicode @ (0x0000..=0xD7FF | 0xE000..=0xFFFF) => Ok((2, unicode)),
        hi @ 0xD800..=0xDBFF => {
            if bytes.len() < 4 {
                return Err(cur.truncated());
            }
            let lo = unit(le, &bytes[2..]);
            if !(0xDC00..0xE000).contains(&lo) {
                return Err(cur.invalid(2));
            }
            Ok((4, 0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00)))
        }
        _ => Err(cur.invalid(2)),
    }
}

fn unit(le: bool, bytes: &[u8]) -> u32 {
    if le {
        (u32::from(bytes[1]) << 8) | u32::from(bytes[0])
    } else {
        (u32::from(bytes[0]) << 8) | u32::from(bytes[1])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn decode_all<C: Codec<Unit = u8, Char = char>>(bytes: &[u8]) -> Result<String, CodecError> {
        let mut cur = Cursor::new(bytes);
        let mut state = C::State::default();
        let mut s = String::new();
        loop {
            C::consume_shifts(&mut cur, &mut state)?;
            if cur.is_at_end() {
                return Ok(s);
            }
            s.push(C::decode(&mut cur, &mut state)?);
        }
    }

    #[test]
    fn test_byte_orders() {
        assert_eq!(decode_all::<UTF_16BE>(b"\x30\x42\x00A").as_deref(), Ok("あA"));
        assert_eq!(decode_all::<UTF_16LE>(b"\x42\x30A\x00").as_deref(), Ok("あA"));
        assert_eq!(
            decode_all::<UTF_16BE>(b"\xd8\x3c\xdf\x7a").as_deref(),
            Ok("🍺")
        );
    }

    #[test]
    fn test_bom() {
        assert_eq!(decode_all::<UTF_16>(b"\xfe\xff\x30\x42").as_deref(), Ok("あ"));
        assert_eq!(decode_all::<UTF_16>(b"\xff\xfe\x42\x30").as_deref(), Ok("あ"));
        assert_eq!(decode_all::<UTF_16>(b"\x30\x42").as_deref(), Ok("あ"));
        assert_eq!(decode_all::<UTF_16>(b"").as_deref(), Ok(""));
    }

    #[test]
    fn test_bom_counts_towards_first_char() {
        let bytes = b"\xff\xfe\x42\x30A\x00";
        let mut cur = Cursor::new(&bytes[..]);
        let mut state = BomState::default();
        assert_eq!(UTF_16::char_length(&cur, &state), Ok(4));
        UTF_16::skip_forward_char(&mut cur, &mut state).unwrap();
        assert_eq!(cur.position(), 4);
        assert_eq!(state, BomState::LittleEndian);

        cur.set_position(6).unwrap();
        let mut state = BomState::Undetermined;
        UTF_16::skip_backward_char(&mut cur, &mut state, &Checkpoint::start()).unwrap();
        assert_eq!((cur.position(), state), (4, BomState::LittleEndian));
        UTF_16::skip_backward_char(&mut cur, &mut state, &Checkpoint::start()).unwrap();
        assert_eq!(cur.position(), 2);
        assert!(UTF_16::skip_backward_char(&mut cur, &mut state, &Checkpoint::start()).is_err());
    }

    #[test]
    fn test_skip_backward_from_checkpoint_at_cursor() {
        let bytes = b"\xfe\xff\x00A\x00B";
        let mut cur = Cursor::at(&bytes[..], 4).unwrap();
        let mut state = BomState::BigEndian;
        let checkpoint = Checkpoint {
            pos: 4,
            state: BomState::BigEndian,
        };
        UTF_16::skip_backward_char(&mut cur, &mut state, &checkpoint).unwrap();
        assert_eq!((cur.position(), state), (2, BomState::BigEndian));
    }

    #[test]
    fn test_lone_bom_is_one_step() {
        let bytes = b"\xff\xfe";
        let mut cur = Cursor::new(&bytes[..]);
        let mut state = BomState::default();
        assert_eq!(UTF_16::char_length(&cur, &state), Ok(2));
        UTF_16::skip_forward_char(&mut cur, &mut state).unwrap();
        assert!(cur.is_at_end());
        assert_eq!(state, BomState::LittleEndian);
        assert_eq!(decode_all::<UTF_16>(&bytes[..]).as_deref(), Ok(""));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            decode_all::<UTF_16BE>(b"\x00A\xd8\x3c"),
            Err(CodecError::TruncatedSequence {
                pos: 2,
                available: 2
            })
        );
        assert_eq!(
            decode_all::<UTF_16BE>(b"\x00"),
            Err(CodecError::TruncatedSequence {
                pos: 0,
                available: 1
            })
        );
        assert_eq!(
            decode_all::<UTF_16BE>(b"\xdc\x00\x00A"),
            Err(CodecError::InvalidSequence { pos: 0, len: 2 })
        );
        assert_eq!(
            decode_all::<UTF_16LE>(b"\x3c\xd8A\x00"),
            Err(CodecError::InvalidSequence { pos: 0, len: 2 })
        );
    }

    #[test]
    fn test_skip_backward_over_pair() {
        let bytes = b"\x00A\xd8\x3c\xdf\x7a";
        let mut cur = Cursor::at(&bytes[..], 6).unwrap();
        let mut state = Stateless::new();
        UTF_16BE::skip_backward_char(&mut cur, &mut state, &Checkpoint::start()).unwrap();
        assert_eq!(cur.position(), 2);
        UTF_16BE::skip_backward_char(&mut cur, &mut state, &Checkpoint::start()).unwrap();
        assert_eq!(cur.position(), 0);
    }

    #[test]
    fn test_encode_writes_bom_once() {
        let mut buf = [0u8; 8];
        let mut out = CursorMut::new(&mut buf[..]);
        let mut state = BomState::default();
        UTF_16::encode(&mut out, 'あ', &mut state).unwrap();
        UTF_16::encode(&mut out, 'A', &mut state).unwrap();
        assert_eq!(out.written(), b"\xfe\xff\x30\x42\x00A");

        let mut out = CursorMut::new(&mut buf[..]);
        UTF_16LE::encode(&mut out, '🍺', &mut Stateless::new()).unwrap();
        assert_eq!(out.written(), b"\x3c\xd8\x7a\xdf");
    }
}
