mod boundary;
mod catalog;
mod config;
mod cursor;
mod error;
mod fixed;
mod iface;
mod impls;
mod mapped;
mod markers;
mod registry;
mod state;
mod stream;
mod unit;


pub use boundary::BoundaryIndex;
pub use catalog::Charset;
pub use config::CodecConfig;
pub use cursor::{Cursor, CursorMut};
pub use error::CodecError;
pub use fixed::Fixed;
pub use iface::{rescan_backward, Codec};
pub use mapped::{Latin1Table, Mapped, MappingTable};
pub use markers::{scan_ascii, Compat};
pub use registry::{DynState, Erased, ErasedCodec, Registry, RegistryBuilder};
pub use state::{Checkpoint, Stateless};
pub use stream::{decode_all, encode_all, Decoder, Encoder};
pub use unit::{CodePoint, Unit, UnitWidth, Units, UnitsMut};

/// Codec types, one per supported charset.
pub mod codecs {
    pub use super::fixed::table::*;
    pub use super::impls::{
        BomState, Iso2022JpState, JisChar, JisSet, Utf16, Utf32, ISO_2022_JP, UTF_16, UTF_16BE,
        UTF_16LE, UTF_32BE, UTF_32LE, UTF_8,
    };
}
