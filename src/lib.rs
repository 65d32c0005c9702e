pub mod encoding;

pub use encoding::{
    codecs, Charset, Checkpoint, Codec, CodecError, Cursor, CursorMut, ErasedCodec, Registry,
};
