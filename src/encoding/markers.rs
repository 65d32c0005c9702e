use crate::encoding::{Codec, CodePoint, CodecError, Cursor, Unit};

/// How much of the common ASCII / ISO-8859 range a fixed charset shares.
///
/// The three levels are nested, so a charset can never claim the ISO-8859
/// common range without also being an ASCII superset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compat {
    None,
    Ascii,
    Iso8859Common,
}

impl Compat {
    pub const fn is_ascii_superset(self) -> bool {
        !matches!(self, Compat::None)
    }

    pub const fn is_ascii_plus_c1_superset(self) -> bool {
        matches!(self, Compat::Iso8859Common)
    }

    pub const fn of<C: Codec>() -> Compat {
        if C::IS_ASCII_PLUS_C1_SUPERSET {
            Compat::Iso8859Common
        } else if C::IS_ASCII_SUPERSET {
            Compat::Ascii
        } else {
            Compat::None
        }
    }
}

/// Finds the first character equal to the ASCII character `needle`.
///
/// ASCII-superset charsets with one unit per character are searched unit by
/// unit without decoding; everything else is decoded character by
/// character.
pub fn scan_ascii<C: Codec>(units: &[C::Unit], needle: u8) -> Result<Option<usize>, CodecError> {
    debug_assert!(needle.is_ascii());
    if C::IS_ASCII_SUPERSET && C::max_units(1) == 1 {
        let needle = C::Unit::widen(needle);
        return Ok(units.iter().position(|&u| u == needle));
    }

    let mut cur = Cursor::new(units);
    let mut state = C::State::default();
    loop {
        C::consume_shifts(&mut cur, &mut state)?;
        if cur.is_at_end() {
            return Ok(None);
        }
        let pos = cur.position();
        if C::decode(&mut cur, &mut state)?.to_u32() == u32::from(needle) {
            return Ok(Some(pos));
        }
    }
}
