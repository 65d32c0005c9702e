use std::{fmt, hash::Hash};

use num_traits::{AsPrimitive, PrimInt, Unsigned};

/// Width of one storage unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnitWidth {
    U8,
    U16,
    U32,
}

impl UnitWidth {
    pub const fn bits(self) -> u32 {
        match self {
            UnitWidth::U8 => 8,
            UnitWidth::U16 => 16,
            UnitWidth::U32 => 32,
        }
    }
}

/// Element type of an encoded buffer.
pub trait Unit:
    PrimInt + Unsigned + AsPrimitive<u32> + Default + Hash + fmt::Debug + Send + Sync + 'static
{
    const WIDTH: UnitWidth;

    fn widen(byte: u8) -> Self;
    fn erase(units: &[Self]) -> Units<'_>;
    fn unerase(units: Units<'_>) -> Option<&[Self]>;
    fn unerase_mut(units: UnitsMut<'_>) -> Option<&mut [Self]>;
}

macro_rules! impl_unit {
    ($t:ty, $width:ident) => {
        impl Unit for $t {
            const WIDTH: UnitWidth = UnitWidth::$width;

            fn widen(byte: u8) -> Self {
                byte as $t
            }

            fn erase(units: &[Self]) -> Units<'_> {
                Units::$width(units)
            }

            fn unerase(units: Units<'_>) -> Option<&[Self]> {
                match units {
                    Units::$width(units) => Some(units),
                    _ => None,
                }
            }

            fn unerase_mut(units: UnitsMut<'_>) -> Option<&mut [Self]> {
                match units {
                    UnitsMut::$width(units) => Some(units),
                    _ => None,
                }
            }
        }
    };
}

impl_unit!(u8, U8);
impl_unit!(u16, U16);
impl_unit!(u32, U32);

/// A unit slice whose width is only known at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Units<'a> {
    U8(&'a [u8]),
    U16(&'a [u16]),
    U32(&'a [u32]),
}

impl<'a> Units<'a> {
    pub fn width(&self) -> UnitWidth {
        match self {
            Units::U8(_) => UnitWidth::U8,
            Units::U16(_) => UnitWidth::U16,
            Units::U32(_) => UnitWidth::U32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Units::U8(units) => units.len(),
            Units::U16(units) => units.len(),
            Units::U32(units) => units.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a, U: Unit> From<&'a [U]> for Units<'a> {
    fn from(units: &'a [U]) -> Self {
        U::erase(units)
    }
}

/// Mutable counterpart of [`Units`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum UnitsMut<'a> {
    U8(&'a mut [u8]),
    U16(&'a mut [u16]),
    U32(&'a mut [u32]),
}

impl<'a> UnitsMut<'a> {
    pub fn width(&self) -> UnitWidth {
        match self {
            UnitsMut::U8(_) => UnitWidth::U8,
            UnitsMut::U16(_) => UnitWidth::U16,
            UnitsMut::U32(_) => UnitWidth::U32,
        }
    }

    pub fn reborrow(&mut self) -> UnitsMut<'_> {
        match self {
            UnitsMut::U8(units) => UnitsMut::U8(units),
            UnitsMut::U16(units) => UnitsMut::U16(units),
            UnitsMut::U32(units) => UnitsMut::U32(units),
        }
    }
}

impl<'a> From<&'a mut [u8]> for UnitsMut<'a> {
    fn from(units: &'a mut [u8]) -> Self {
        UnitsMut::U8(units)
    }
}

impl<'a> From<&'a mut [u16]> for UnitsMut<'a> {
    fn from(units: &'a mut [u16]) -> Self {
        UnitsMut::U16(units)
    }
}

impl<'a> From<&'a mut [u32]> for UnitsMut<'a> {
    fn from(units: &'a mut [u32]) -> Self {
        UnitsMut::U32(units)
    }
}

/// A character value as produced by a codec.
///
/// `to_u32` must be injective so that the dynamic path can carry any
/// character as a `u32` and get the same value back through `from_u32`.
pub trait CodePoint: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    fn to_u32(self) -> u32;
    fn from_u32(value: u32) -> Option<Self>;
}

impl CodePoint for u8 {
    fn to_u32(self) -> u32 {
        self.into()
    }
    fn from_u32(value: u32) -> Option<Self> {
        value.try_into().ok()
    }
}

impl CodePoint for u16 {
    fn to_u32(self) -> u32 {
        self.into()
    }
    fn from_u32(value: u32) -> Option<Self> {
        value.try_into().ok()
    }
}

impl CodePoint for u32 {
    fn to_u32(self) -> u32 {
        self
    }
    fn from_u32(value: u32) -> Option<Self> {
        Some(value)
    }
}

impl CodePoint for char {
    fn to_u32(self) -> u32 {
        self.into()
    }
    fn from_u32(value: u32) -> Option<Self> {
        char::from_u32(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erase_roundtrip_keeps_width() {
        let bytes = [1u8, 2, 3];
        let words = [0x41u16, 0x42];
        assert_eq!(Units::from(&bytes[..]).width(), UnitWidth::U8);
        assert_eq!(Units::from(&words[..]).len(), 2);
        assert_eq!(u8::unerase(Units::from(&bytes[..])), Some(&bytes[..]));
        assert_eq!(u16::unerase(Units::from(&bytes[..])), None);
    }

    #[test]
    fn test_code_point_limits() {
        assert_eq!(<u8 as CodePoint>::from_u32(0x100), None);
        assert_eq!(<u16 as CodePoint>::from_u32(0xFFFF), Some(0xFFFF));
        assert_eq!(<char as CodePoint>::from_u32(0xD800), None);
        assert_eq!('あ'.to_u32(), 0x3042);
    }
}
