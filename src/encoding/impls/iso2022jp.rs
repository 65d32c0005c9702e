use crate::encoding::{Charset, CodePoint, CodecError, Codec, Cursor, CursorMut};

/// Graphic set designated to G0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JisSet {
    #[default]
    Ascii,
    Roman,
    Jis0208,
}

/// A character of ISO-2022-JP, tagged with the set it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JisChar {
    Ascii(u8),
    /// JIS X 0201 Roman.
    Roman(u8),
    /// JIS X 0208 row and cell bytes.
    Kanji(u8, u8),
}

impl JisChar {
    pub fn set(self) -> JisSet {
        match self {
            JisChar::Ascii(_) => JisSet::Ascii,
            JisChar::Roman(_) => JisSet::Roman,
            JisChar::Kanji(..) => JisSet::Jis0208,
        }
    }
}

impl CodePoint for JisChar {
    fn to_u32(self) -> u32 {
        match self {
            JisChar::Ascii(b) => u32::from(b),
            JisChar::Roman(b) => 0x100 | u32::from(b),
            JisChar::Kanji(hi, lo) => 0x1_0000 | u32::from(hi) << 8 | u32::from(lo),
        }
    }

    fn from_u32(value: u32) -> Option<Self> {
        let low = (value & 0xFF) as u8;
        match value >> 8 {
            0 => Some(JisChar::Ascii(low)),
            1 => Some(JisChar::Roman(low)),
            0x100..=0x1FF => Some(JisChar::Kanji(((value >> 8) & 0xFF) as u8, low)),
            _ => None,
        }
    }
}

/// Shift state of an ISO-2022-JP stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Iso2022JpState {
    g0: JisSet,
}

impl Iso2022JpState {
    pub fn active_set(&self) -> JisSet {
        self.g0
    }
}

const ESC: u8 = 0x1B;

const ESCAPES: &[(&[u8], JisSet)] = &[
    (b"\x1b(B", JisSet::Ascii),
    (b"\x1b(J", JisSet::Roman),
    (b"\x1b$@", JisSet::Jis0208),
    (b"\x1b$B", JisSet::Jis0208),
];

fn escape_for(set: JisSet) -> &'static [u8] {
    match set {
        JisSet::Ascii => b"\x1b(B",
        JisSet::Roman => b"\x1b(J",
        JisSet::Jis0208 => b"\x1b$B",
    }
}

fn is_graphic(b: u8) -> bool {
    (0x21..=0x7E).contains(&b)
}

/// ISO-2022-JP (RFC 1468) without the 2022-JP-2 extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(non_camel_case_types)]
pub struct ISO_2022_JP;

impl ISO_2022_JP {
    fn scan(cur: &Cursor<'_, u8>, set: JisSet) -> Result<(usize, JisChar), CodecError> {
        let b0 = cur.peek().ok_or_else(|| cur.out_of_bounds())?;
        match set {
            JisSet::Ascii | JisSet::Roman if b0 >= 0x80 => Err(cur.invalid(1)),
            JisSet::Ascii => Ok((1, JisChar::Ascii(b0))),
            JisSet::Roman => Ok((1, JisChar::Roman(b0))),
            JisSet::Jis0208 => {
                if !is_graphic(b0) {
                    return Err(cur.invalid(1));
                }
                match cur.peek_at(1) {
                    None => Err(cur.truncated()),
                    Some(b1) if is_graphic(b1) => Ok((2, JisChar::Kanji(b0, b1))),
                    Some(_) => Err(cur.invalid(1)),
                }
            }
        }
    }
}

impl Codec for ISO_2022_JP {
    const CHARSET: Charset = Charset::ISO_2022_JP;
    // Bytes that look like ASCII mean something else after ESC $ B.
    const IS_ASCII_SUPERSET: bool = false;
    const IS_ASCII_PLUS_C1_SUPERSET: bool = false;

    type Char = JisChar;
    type Unit = u8;
    type State = Iso2022JpState;

    fn consume_shifts(
        cur: &mut Cursor<'_, u8>,
        state: &mut Iso2022JpState,
    ) -> Result<(), CodecError> {
        while cur.peek() == Some(ESC) {
            let rest = cur.remaining();
            if let Some(&(seq, set)) = ESCAPES.iter().find(|(seq, _)| rest.starts_with(seq)) {
                cur.advance(seq.len())?;
                state.g0 = set;
            } else if ESCAPES.iter().any(|(seq, _)| seq.starts_with(rest)) {
                return Err(cur.truncated());
            } else {
                return Err(cur.invalid(1));
            }
        }
        Ok(())
    }

    fn decode(cur: &mut Cursor<'_, u8>, state: &mut Iso2022JpState) -> Result<JisChar, CodecError> {
        Self::consume_shifts(cur, state)?;
        let (len, ch) = Self::scan(cur, state.g0)?;
        cur.advance(len)?;
        Ok(ch)
    }

    fn skip_forward_char(
        cur: &mut Cursor<'_, u8>,
        state: &mut Iso2022JpState,
    ) -> Result<(), CodecError> {
        let start = cur.position();
        Self::consume_shifts(cur, state)?;
        if cur.is_at_end() && cur.position() > start {
            return Ok(());
        }
        let (len, _) = Self::scan(cur, state.g0)?;
        cur.advance(len)
    }

    fn encode(
        out: &mut CursorMut<'_, u8>,
        ch: JisChar,
        state: &mut Iso2022JpState,
    ) -> Result<(), CodecError> {
        let unrepresentable = || CodecError::UnrepresentableCharacter {
            charset: Self::CHARSET,
            ch: ch.to_u32(),
        };
        let mut buf = [0u8; 5];
        let mut len = 0;
        if state.g0 != ch.set() {
            let seq = escape_for(ch.set());
            buf[..seq.len()].copy_from_slice(seq);
            len = seq.len();
        }
        match ch {
            JisChar::Ascii(b) | JisChar::Roman(b) => {
                if b >= 0x80 || b == ESC {
                    return Err(unrepresentable());
                }
                buf[len] = b;
                len += 1;
            }
            JisChar::Kanji(hi, lo) => {
                if !is_graphic(hi) || !is_graphic(lo) {
                    return Err(unrepresentable());
                }
                buf[len..len + 2].copy_from_slice(&[hi, lo]);
                len += 2;
            }
        }
        out.push_all(&buf[..len])?;
        state.g0 = ch.set();
        Ok(())
    }

    fn finish_encode(
        out: &mut CursorMut<'_, u8>,
        state: &mut Iso2022JpState,
    ) -> Result<(), CodecError> {
        if state.g0 != JisSet::Ascii {
            out.push_all(escape_for(JisSet::Ascii))?;
            state.g0 = JisSet::Ascii;
        }
        Ok(())
    }

    fn char_length(cur: &Cursor<'_, u8>, state: &Iso2022JpState) -> Result<usize, CodecError> {
        let mut probe = *cur;
        let mut state = *state;
        Self::consume_shifts(&mut probe, &mut state)?;
        if probe.is_at_end() && probe.position() > cur.position() {
            return Ok(probe.position() - cur.position());
        }
        let (len, _) = Self::scan(&probe, state.g0)?;
        Ok(probe.position() - cur.position() + len)
    }

    fn max_characters(n_units: usize) -> usize {
        n_units
    }

    fn typ_characters(n_units: usize) -> usize {
        n_units.div_ceil(2)
    }

    fn max_units(n_characters: usize) -> usize {
        n_characters.saturating_mul(5).saturating_add(3)
    }

    fn typ_units(n_characters: usize) -> usize {
        n_characters.saturating_mul(2).saturating_add(6)
    }
}
