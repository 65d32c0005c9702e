use std::marker::PhantomData;

use crate::encoding::{CodecError, Cursor, CursorMut, Unit};

/// Shared implementation for charsets where one unit is one character and
/// the character value is the unit value.
///
/// Only the unit width varies; the charset-specific codec types generated
/// in [`table`] delegate here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fixed<U>(PhantomData<U>);

impl<U: Unit> Fixed<U> {
    #[inline]
    pub fn decode(cur: &mut Cursor<'_, U>) -> Result<U, CodecError> {
        cur.next_unit()
    }

    #[inline]
    pub fn encode(out: &mut CursorMut<'_, U>, ch: U) -> Result<(), CodecError> {
        out.push(ch)
    }

    #[inline]
    pub fn skip_forward_char(cur: &mut Cursor<'_, U>) -> Result<(), CodecError> {
        cur.advance(1)
    }

    #[inline]
    pub fn skip_backward_char(cur: &mut Cursor<'_, U>) -> Result<(), CodecError> {
        cur.retreat(1)
    }

    #[inline]
    pub fn char_length(cur: &Cursor<'_, U>) -> Result<usize, CodecError> {
        if cur.is_at_end() {
            return Err(cur.out_of_bounds());
        }
        Ok(1)
    }

    /// Worst and typical case coincide: all four estimators are this.
    #[inline]
    pub const fn identity(n: usize) -> usize {
        n
    }
}

macro_rules! fixed_codecs {
    ($($name:ident: $unit:ty, $compat:ident;)*) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            #[allow(non_camel_case_types)]
            pub struct $name;

            impl Codec for $name {
                const CHARSET: Charset = Charset::$name;
                const IS_ASCII_SUPERSET: bool = Compat::$compat.is_ascii_superset();
                const IS_ASCII_PLUS_C1_SUPERSET: bool =
                    Compat::$compat.is_ascii_plus_c1_superset();

                type Char = $unit;
                type Unit = $unit;
                type State = Stateless<$name>;

                fn decode(
                    cur: &mut Cursor<'_, $unit>,
                    _state: &mut Self::State,
                ) -> Result<$unit, CodecError> {
                    Fixed::decode(cur)
                }

                fn encode(
                    out: &mut CursorMut<'_, $unit>,
                    ch: $unit,
                    _state: &mut Self::State,
                ) -> Result<(), CodecError> {
                    Fixed::encode(out, ch)
                }

                fn skip_forward_char(
                    cur: &mut Cursor<'_, $unit>,
                    _state: &mut Self::State,
                ) -> Result<(), CodecError> {
                    Fixed::skip_forward_char(cur)
                }

                fn skip_backward_char(
                    cur: &mut Cursor<'_, $unit>,
                    _state: &mut Self::State,
                    _checkpoint: &Checkpoint<Self::State>,
                ) -> Result<(), CodecError> {
                    Fixed::skip_backward_char(cur)
                }

                fn char_length(
                    cur: &Cursor<'_, $unit>,
                    _state: &Self::State,
                ) -> Result<usize, CodecError> {
                    Fixed::char_length(cur)
                }

                fn max_characters(n_units: usize) -> usize {
                    Fixed::<$unit>::identity(n_units)
                }

                fn typ_characters(n_units: usize) -> usize {
                    Fixed::<$unit>::identity(n_units)
                }

                fn max_units(n_characters: usize) -> usize {
                    Fixed::<$unit>::identity(n_characters)
                }

                fn typ_units(n_characters: usize) -> usize {
                    Fixed::<$unit>::identity(n_characters)
                }
            }
        )*

        /// Every fixed charset with its unit width and compatibility level.
        pub const FIXED_CHARSETS: &[(Charset, UnitWidth, Compat)] = &[
            $((Charset::$name, <$unit as Unit>::WIDTH, Compat::$compat),)*
        ];

        pub(crate) fn register_fixed(builder: &mut RegistryBuilder) {
            $(builder.register::<$name>();)*
        }
    };
}

pub mod table;
