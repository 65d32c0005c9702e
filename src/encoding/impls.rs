mod iso2022jp;
mod utf16;
mod utf32;
mod utf8;

use crate::encoding::RegistryBuilder;

pub use iso2022jp::{Iso2022JpState, JisChar, JisSet, ISO_2022_JP};
pub use utf16::{BomState, Utf16, UTF_16, UTF_16BE, UTF_16LE};
pub use utf32::{Utf32, UTF_32BE, UTF_32LE};
pub use utf8::UTF_8;

/// Registers every codec this crate ships.
pub(crate) fn register_builtins(builder: &mut RegistryBuilder) {
    crate::encoding::fixed::table::register_fixed(builder);
    builder
        .register::<UTF_8>()
        .register::<UTF_16BE>()
        .register::<UTF_16LE>()
        .register::<UTF_16>()
        .register::<UTF_32BE>()
        .register::<UTF_32LE>()
        .register::<ISO_2022_JP>();
}
