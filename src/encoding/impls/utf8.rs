use std::ops::RangeInclusive;

use crate::encoding::{Charset, Checkpoint, Codec, CodecError, Cursor, CursorMut, Stateless};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(non_camel_case_types)]
pub struct UTF_8;

impl Codec for UTF_8 {
    const CHARSET: Charset = Charset::UTF_8;
    const IS_ASCII_SUPERSET: bool = true;
    const IS_ASCII_PLUS_C1_SUPERSET: bool = false;

    type Char = char;
    type Unit = u8;
    type State = Stateless<Self>;

    fn decode(cur: &mut Cursor<'_, u8>, _state: &mut Self::State) -> Result<char, CodecError> {
        let len = scan(cur)?;
        let bytes = &cur.remaining()[..len];
        let b0 = bytes[0];
        let unicode = match len {
            1 => b0 as u32,
            2 => ((b0 & 0x1F) as u32) << 6 | (bytes[1] & 0x3F) as u32,
            3 => {
                ((b0 & 0x0F) as u32) << 12
                    | ((bytes[1] & 0x3F) as u32) << 6
                    | (bytes[2] & 0x3F) as u32
            }
            _ => {
                ((b0 & 0x07) as u32) << 18
                    | ((bytes[1] & 0x3F) as u32) << 12
                    | ((bytes[2] & 0x3F) as u32) << 6
                    | (bytes[3] & 0x3F) as u32
            }
        };
        let ch = char::from_u32(unicode).ok_or_else(|| cur.invalid(len))?;
        cur.advance(len)?;
        Ok(ch)
    }

    fn encode(
        out: &mut CursorMut<'_, u8>,
        ch: char,
        _state: &mut Self::State,
    ) -> Result<(), CodecError> {
        let mut buf = [0; 4];
        out.push_all(ch.encode_utf8(&mut buf).as_bytes())
    }

    fn skip_forward_char(
        cur: &mut Cursor<'_, u8>,
        _state: &mut Self::State,
    ) -> Result<(), CodecError> {
        let len = scan(cur)?;
        cur.advance(len)
    }

    fn skip_backward_char(
        cur: &mut Cursor<'_, u8>,
        _state: &mut Self::State,
        _checkpoint: &Checkpoint<Self::State>,
    ) -> Result<(), CodecError> {
        let end = cur.position();
        if end == 0 {
            return Err(cur.out_of_bounds());
        }
        let units = cur.units();
        let lowest = end.saturating_sub(4);
        let mut start = end - 1;
        while start > lowest && is_cont(units[start]) {
            start -= 1;
        }
        let probe = Cursor::at(units, start)?;
        match scan(&probe) {
            Ok(len) if start + len == end => cur.set_position(start),
            _ => Err(CodecError::InvalidSequence {
                pos: end - 1,
                len: 1,
            }),
        }
    }

    fn char_length(cur: &Cursor<'_, u8>, _state: &Self::State) -> Result<usize, CodecError> {
        scan(cur)
    }

    fn max_characters(n_units: usize) -> usize {
        n_units
    }

    fn typ_characters(n_units: usize) -> usize {
        n_units
    }

    fn max_units(n_characters: usize) -> usize {
        n_characters.saturating_mul(4)
    }

    fn typ_units(n_characters: usize) -> usize {
        n_characters.saturating_add(n_characters / 4)
    }
}

/// Length of the well-formed sequence at the cursor.
fn scan(cur: &Cursor<'_, u8>) -> Result<usize, CodecError> {
    let bytes = cur.remaining();
    let b0 = *bytes.first().ok_or_else(|| cur.out_of_bounds())?;
    if b0 < 0x80 {
        return Ok(1);
    }
    let (len, second) = lead(b0).ok_or_else(|| cur.invalid(1))?;
    for i in 1..len {
        let b = match bytes.get(i) {
            Some(&b) => b,
            None => return Err(cur.truncated()),
        };
        let ok = if i == 1 {
            second.contains(&b)
        } else {
            is_cont(b)
        };
        if !ok {
            return Err(cur.invalid(i));
        }
    }
    Ok(len)
}

/// Sequence length and allowed second byte for a lead byte, excluding
/// overlong forms, surrogates and values above U+10FFFF.
fn lead(b0: u8) -> Option<(usize, RangeInclusive<u8>)> {
    match b0 {
        0xC2..=0xDF => Some((2, 0x80..=0xBF)),
        0xE0 => Some((3, 0xA0..=0xBF)),
        0xE1..=0xEC | 0xEE..=0xEF => Some((3, 0x80..=0xBF)),
        0xED => Some((3, 0x80..=0x9F)),
        0xF0 => Some((4, 0x90..=0xBF)),
        0xF1..=0xF3 => Some((4, 0x80..=0xBF)),
        0xF4 => Some((4, 0x80..=0x8F)),
        _ => None,
    }
}

fn is_cont(b: u8) -> bool {
    b & 0xC0 == 0x80
}
