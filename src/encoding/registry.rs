use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use crate::encoding::{
    Charset, Checkpoint, CodePoint, Codec, CodecError, Cursor, CursorMut, Unit, UnitWidth, Units,
    UnitsMut,
};

/// Object-safe form of [`Codec`], for charsets chosen at runtime.
///
/// Buffers are passed with their unit width attached, positions are plain
/// unit indices updated in place, and characters travel as `u32`.
pub trait ErasedCodec: Send + Sync {
    fn charset(&self) -> Charset;
    fn unit_width(&self) -> UnitWidth;
    fn is_ascii_superset(&self) -> bool;
    fn is_ascii_plus_c1_superset(&self) -> bool;

    /// A fresh initial state for one decode or encode pass.
    fn new_state(&self) -> DynState;
    /// Copies `state`, for keeping as a checkpoint.
    fn clone_state(&self, state: &DynState) -> Result<DynState, CodecError>;

    fn consume_shifts(
        &self,
        units: Units<'_>,
        pos: &mut usize,
        state: &mut DynState,
    ) -> Result<(), CodecError>;
    fn decode(&self, units: Units<'_>, pos: &mut usize, state: &mut DynState)
        -> Result<u32, CodecError>;
    fn encode(
        &self,
        out: UnitsMut<'_>,
        pos: &mut usize,
        ch: u32,
        state: &mut DynState,
    ) -> Result<(), CodecError>;
    fn finish_encode(
        &self,
        out: UnitsMut<'_>,
        pos: &mut usize,
        state: &mut DynState,
    ) -> Result<(), CodecError>;
    fn skip_forward_char(
        &self,
        units: Units<'_>,
        pos: &mut usize,
        state: &mut DynState,
    ) -> Result<(), CodecError>;
    /// Stateful charsets rescan from `checkpoint`, a position at or before
    /// `*pos` and the state in effect there, or from the start of `units`.
    fn skip_backward_char(
        &self,
        units: Units<'_>,
        pos: &mut usize,
        state: &mut DynState,
        checkpoint: Option<(usize, &DynState)>,
    ) -> Result<(), CodecError>;
    fn char_length(&self, units: Units<'_>, pos: usize, state: &DynState)
        -> Result<usize, CodecError>;

    fn max_characters(&self, n_units: usize) -> usize;
    fn typ_characters(&self, n_units: usize) -> usize;
    fn max_units(&self, n_characters: usize) -> usize;
    fn typ_units(&self, n_characters: usize) -> usize;
}

/// Stream state of a dynamically chosen codec.
pub struct DynState {
    charset: Charset,
    inner: Box<dyn Any + Send + Sync>,
}

impl DynState {
    pub fn new<C: Codec>(state: C::State) -> Self {
        DynState {
            charset: C::CHARSET,
            inner: Box::new(state),
        }
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    fn foreign<C: Codec>(&self) -> CodecError {
        CodecError::ForeignState {
            expected: C::CHARSET,
            found: self.charset,
        }
    }

    pub fn downcast_ref<C: Codec>(&self) -> Result<&C::State, CodecError> {
        if self.charset != C::CHARSET {
            return Err(self.foreign::<C>());
        }
        self.inner
            .downcast_ref::<C::State>()
            .ok_or_else(|| self.foreign::<C>())
    }

    pub fn downcast_mut<C: Codec>(&mut self) -> Result<&mut C::State, CodecError> {
        let err = self.foreign::<C>();
        if self.charset != C::CHARSET {
            return Err(err);
        }
        self.inner.downcast_mut::<C::State>().ok_or(err)
    }
}

impl fmt::Debug for DynState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynState")
            .field("charset", &self.charset)
            .finish_non_exhaustive()
    }
}

/// Adapts a statically known codec to [`ErasedCodec`].
pub struct Erased<C>(PhantomData<fn() -> C>);

impl<C> Erased<C> {
    pub const fn new() -> Self {
        Erased(PhantomData)
    }
}

impl<C> Default for Erased<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn unerase<C: Codec>(units: Units<'_>) -> Result<&[C::Unit], CodecError> {
    let found = units.width();
    C::Unit::unerase(units).ok_or(CodecError::UnitWidthMismatch {
        charset: C::CHARSET,
        expected: C::Unit::WIDTH,
        found,
    })
}

fn unerase_mut<C: Codec>(units: UnitsMut<'_>) -> Result<&mut [C::Unit], CodecError> {
    let found = units.width();
    C::Unit::unerase_mut(units).ok_or(CodecError::UnitWidthMismatch {
        charset: C::CHARSET,
        expected: C::Unit::WIDTH,
        found,
    })
}

/// Runs `f` on a typed cursor at `*pos` and writes the final position back,
/// also on error.
fn with_cursor<C: Codec, T>(
    units: Units<'_>,
    pos: &mut usize,
    f: impl FnOnce(&mut Cursor<'_, C::Unit>) -> Result<T, CodecError>,
) -> Result<T, CodecError> {
    let mut cur = Cursor::at(unerase::<C>(units)?, *pos)?;
    let result = f(&mut cur);
    *pos = cur.position();
    result
}

fn with_cursor_mut<C: Codec, T>(
    out: UnitsMut<'_>,
    pos: &mut usize,
    f: impl FnOnce(&mut CursorMut<'_, C::Unit>) -> Result<T, CodecError>,
) -> Result<T, CodecError> {
    let mut out = CursorMut::at(unerase_mut::<C>(out)?, *pos)?;
    let result = f(&mut out);
    *pos = out.position();
    result
}

impl<C: Codec> ErasedCodec for Erased<C> {
    fn charset(&self) -> Charset {
        C::CHARSET
    }

    fn unit_width(&self) -> UnitWidth {
        C::Unit::WIDTH
    }

    fn is_ascii_superset(&self) -> bool {
        C::IS_ASCII_SUPERSET
    }

    fn is_ascii_plus_c1_superset(&self) -> bool {
        C::IS_ASCII_PLUS_C1_SUPERSET
    }

    fn new_state(&self) -> DynState {
        DynState::new::<C>(C::State::default())
    }

    fn clone_state(&self, state: &DynState) -> Result<DynState, CodecError> {
        Ok(DynState::new::<C>(state.downcast_ref::<C>()?.clone()))
    }

    fn consume_shifts(
        &self,
        units: Units<'_>,
        pos: &mut usize,
        state: &mut DynState,
    ) -> Result<(), CodecError> {
        let state = state.downcast_mut::<C>()?;
        with_cursor::<C, _>(units, pos, |cur| C::consume_shifts(cur, state))
    }

    fn decode(
        &self,
        units: Units<'_>,
        pos: &mut usize,
        state: &mut DynState,
    ) -> Result<u32, CodecError> {
        let state = state.downcast_mut::<C>()?;
        with_cursor::<C, _>(units, pos, |cur| C::decode(cur, state)).map(CodePoint::to_u32)
    }

    fn encode(
        &self,
        out: UnitsMut<'_>,
        pos: &mut usize,
        ch: u32,
        state: &mut DynState,
    ) -> Result<(), CodecError> {
        let state = state.downcast_mut::<C>()?;
        let ch = C::Char::from_u32(ch).ok_or(CodecError::UnrepresentableCharacter {
            charset: C::CHARSET,
            ch,
        })?;
        with_cursor_mut::<C, _>(out, pos, |out| C::encode(out, ch, state))
    }

    fn finish_encode(
        &self,
        out: UnitsMut<'_>,
        pos: &mut usize,
        state: &mut DynState,
    ) -> Result<(), CodecError> {
        let state = state.downcast_mut::<C>()?;
        with_cursor_mut::<C, _>(out, pos, |out| C::finish_encode(out, state))
    }

    fn skip_forward_char(
        &self,
        units: Units<'_>,
        pos: &mut usize,
        state: &mut DynState,
    ) -> Result<(), CodecError> {
        let state = state.downcast_mut::<C>()?;
        with_cursor::<C, _>(units, pos, |cur| C::skip_forward_char(cur, state))
    }

    fn skip_backward_char(
        &self,
        units: Units<'_>,
        pos: &mut usize,
        state: &mut DynState,
        checkpoint: Option<(usize, &DynState)>,
    ) -> Result<(), CodecError> {
        let checkpoint = match checkpoint {
            Some((at, saved)) => Checkpoint {
                pos: at,
                state: saved.downcast_ref::<C>()?.clone(),
            },
            None => Checkpoint::start(),
        };
        let state = state.downcast_mut::<C>()?;
        with_cursor::<C, _>(units, pos, |cur| C::skip_backward_char(cur, state, &checkpoint))
    }

    fn char_length(
        &self,
        units: Units<'_>,
        pos: usize,
        state: &DynState,
    ) -> Result<usize, CodecError> {
        let state = state.downcast_ref::<C>()?;
        let cur = Cursor::at(unerase::<C>(units)?, pos)?;
        C::char_length(&cur, state)
    }

    fn max_characters(&self, n_units: usize) -> usize {
        C::max_characters(n_units)
    }

    fn typ_characters(&self, n_units: usize) -> usize {
        C::typ_characters(n_units)
    }

    fn max_units(&self, n_characters: usize) -> usize {
        C::max_units(n_characters)
    }

    fn typ_units(&self, n_characters: usize) -> usize {
        C::typ_units(n_characters)
    }
}

/// Collects codecs before freezing them into a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<Charset, Arc<dyn ErasedCodec>>,
    default: Option<Charset>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder preloaded with every codec this crate ships.
    pub fn with_builtins() -> Self {
        let mut builder = Self::new();
        crate::encoding::impls::register_builtins(&mut builder);
        builder
    }

    pub fn register<C: Codec>(&mut self) -> &mut Self {
        self.register_erased(Arc::new(Erased::<C>::new()))
    }

    /// Adds `codec`, replacing any codec already registered for its charset.
    pub fn register_erased(&mut self, codec: Arc<dyn ErasedCodec>) -> &mut Self {
        let charset = codec.charset();
        if self.entries.insert(charset, codec).is_some() {
            tracing::warn!(%charset, "replacing registered codec");
        }
        self
    }

    pub fn default_charset(&mut self, charset: Charset) -> &mut Self {
        self.default = Some(charset);
        self
    }

    pub fn build(&mut self) -> Registry {
        let registry = Registry {
            entries: std::mem::take(&mut self.entries),
            default: self.default.take(),
        };
        tracing::debug!(
            entries = registry.entries.len(),
            default = ?registry.default,
            "built codec registry"
        );
        registry
    }
}

/// Immutable table from charset to codec.
///
/// Lookups take `&self` only, so a registry can be shared between threads
/// without locking.
pub struct Registry {
    entries: BTreeMap<Charset, Arc<dyn ErasedCodec>>,
    default: Option<Charset>,
}

impl Registry {
    /// The registry of every codec this crate ships, built on first use.
    pub fn builtin() -> &'static Registry {
        static BUILTIN: OnceLock<Registry> = OnceLock::new();
        BUILTIN.get_or_init(|| RegistryBuilder::with_builtins().build())
    }

    pub fn lookup(&self, charset: Charset) -> Result<&dyn ErasedCodec, CodecError> {
        match self.entries.get(&charset) {
            Some(codec) => Ok(codec.as_ref()),
            None => {
                tracing::debug!(%charset, "no codec registered");
                Err(CodecError::UnknownCharset {
                    name: charset.name().to_owned(),
                })
            }
        }
    }

    pub fn lookup_name(&self, name: &str) -> Result<&dyn ErasedCodec, CodecError> {
        self.lookup(Charset::from_name(name)?)
    }

    pub(crate) fn entry(&self, charset: Charset) -> Option<&Arc<dyn ErasedCodec>> {
        self.entries.get(&charset)
    }

    pub fn contains(&self, charset: Charset) -> bool {
        self.entries.contains_key(&charset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered codecs in charset id order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ErasedCodec> + '_ {
        self.entries.values().map(|codec| codec.as_ref())
    }

    pub fn default_charset(&self) -> Option<Charset> {
        self.default
    }

    pub fn default_codec(&self) -> Option<&dyn ErasedCodec> {
        self.default.and_then(|charset| self.lookup(charset).ok())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("charsets", &self.entries.keys().collect::<Vec<_>>())
            .field("default", &self.default)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::encoding::codecs::{JisSet, ISO_2022_JP, ISO_8859_1, UCS_2, UTF_8};
    use crate::encoding::{Latin1Table, Mapped};

    #[test]
    fn test_unregistered_charset_is_an_error() {
        let registry = Registry::builtin();
        assert!(matches!(
            registry.lookup(Charset::Shift_JIS),
            Err(CodecError::UnknownCharset { name }) if name == "Shift_JIS"
        ));
        assert!(matches!(
            registry.lookup_name("x-no-such"),
            Err(CodecError::UnknownCharset { .. })
        ));
        assert!(registry.lookup_name("utf-8").is_ok());
    }

    #[test]
    fn test_dynamic_decode_matches_static() {
        let codec = Registry::builtin().lookup(Charset::UTF_8).unwrap();
        assert_eq!(codec.unit_width(), UnitWidth::U8);
        let text = "aあ";
        let mut state = codec.new_state();
        let mut pos = 0;
        let units = Units::from(text.as_bytes());
        assert_eq!(codec.char_length(units, pos, &state), Ok(1));
        assert_eq!(codec.decode(units, &mut pos, &mut state), Ok(0x61));
        assert_eq!(codec.decode(units, &mut pos, &mut state), Ok(0x3042));
        assert_eq!(pos, 4);
        codec.skip_backward_char(units, &mut pos, &mut state, None).unwrap();
        assert_eq!(pos, 1);
    }

    #[test]
    fn test_dynamic_skip_backward_from_checkpoint() {
        let codec = Registry::builtin().lookup(Charset::ISO_2022_JP).unwrap();
        let text = b"\x1b$B\x30\x21\x30\x22\x30\x23";
        let units = Units::from(&text[..]);
        let mut pos = 0;
        let mut state = codec.new_state();
        codec.skip_forward_char(units, &mut pos, &mut state).unwrap();
        let (saved_pos, saved) = (pos, codec.clone_state(&state).unwrap());
        codec.skip_forward_char(units, &mut pos, &mut state).unwrap();
        codec.skip_forward_char(units, &mut pos, &mut state).unwrap();
        assert_eq!(pos, 9);

        for expected in [7, 5, 3] {
            codec
                .skip_backward_char(units, &mut pos, &mut state, Some((saved_pos, &saved)))
                .unwrap();
            assert_eq!(pos, expected);
            assert_eq!(
                state.downcast_ref::<ISO_2022_JP>().map(|s| s.active_set()),
                Ok(JisSet::Jis0208)
            );
        }

        let foreign = Registry::builtin().lookup(Charset::UTF_8).unwrap().new_state();
        assert_eq!(
            codec.skip_backward_char(units, &mut pos, &mut state, Some((0, &foreign))),
            Err(CodecError::ForeignState {
                expected: Charset::ISO_2022_JP,
                found: Charset::UTF_8,
            })
        );
        assert_eq!(pos, 3);
    }

    #[test]
    fn test_dynamic_encode() {
        let codec = Registry::builtin().lookup(Charset::ISO_2022_JP).unwrap();
        let mut buf = [0u8; 16];
        let mut pos = 0;
        let mut state = codec.new_state();
        codec
            .encode((&mut buf[..]).into(), &mut pos, 0x1_3021, &mut state)
            .unwrap();
        codec
            .finish_encode((&mut buf[..]).into(), &mut pos, &mut state)
            .unwrap();
        assert_eq!(&buf[..pos], b"\x1b$B\x30\x21\x1b(B");

        let codec = Registry::builtin().lookup(Charset::UTF_8).unwrap();
        let mut state = codec.new_state();
        assert_eq!(
            codec.encode((&mut buf[..]).into(), &mut 0, 0xD800, &mut state),
            Err(CodecError::UnrepresentableCharacter {
                charset: Charset::UTF_8,
                ch: 0xD800,
            })
        );
    }

    #[test]
    fn test_misuse_is_reported() {
        let registry = Registry::builtin();
        let ucs2 = registry.lookup(Charset::UCS_2).unwrap();
        let utf8 = registry.lookup(Charset::UTF_8).unwrap();
        let mut pos = 0;

        let mut state = ucs2.new_state();
        assert_eq!(
            ucs2.decode(Units::from(&b"AB"[..]), &mut pos, &mut state),
            Err(CodecError::UnitWidthMismatch {
                charset: Charset::UCS_2,
                expected: UnitWidth::U16,
                found: UnitWidth::U8,
            })
        );

        let mut state = utf8.new_state();
        assert_eq!(
            ucs2.decode(Units::from(&[0x41u16][..]), &mut pos, &mut state),
            Err(CodecError::ForeignState {
                expected: Charset::UCS_2,
                found: Charset::UTF_8,
            })
        );
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_state_types_are_distinct() {
        let state = DynState::new::<ISO_8859_1>(Default::default());
        assert!(state.downcast_ref::<ISO_8859_1>().is_ok());
        assert!(state.downcast_ref::<UCS_2>().is_err());
        // Same charset, different codec type.
        assert!(state.downcast_ref::<Mapped<Latin1Table>>().is_err());
        assert_eq!(
            DynState::new::<UTF_8>(Default::default()).charset(),
            Charset::UTF_8
        );
        assert!(DynState::new::<ISO_2022_JP>(Default::default())
            .downcast_ref::<UTF_8>()
            .is_err());
    }

    #[test]
    fn test_builder_replaces_and_sets_default() {
        let mut builder = RegistryBuilder::with_builtins();
        builder
            .register::<Mapped<Latin1Table>>()
            .default_charset(Charset::ISO_8859_1);
        let registry = builder.build();
        assert_eq!(registry.len(), Registry::builtin().len());

        let codec = registry.default_codec().unwrap();
        let mut state = codec.new_state();
        let mut buf = [0u8; 1];
        // The mapped codec works on Unicode scalar values.
        assert!(codec
            .encode((&mut buf[..]).into(), &mut 0, 'é' as u32, &mut state)
            .is_ok());
        assert_eq!(buf, [0xE9]);
        assert!(matches!(
            codec.encode((&mut buf[..]).into(), &mut 0, 0x3C9, &mut state),
            Err(CodecError::UnrepresentableCharacter { .. })
        ));
    }

    #[test]
    fn test_iter_is_ordered_by_id() {
        let ids: Vec<_> = Registry::builtin().iter().map(|c| c.charset().id()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert!(Registry::builtin().contains(Charset::UTF_16));
        assert!(!Registry::builtin().contains(Charset::Windows_936));
        assert!(Registry::builtin().default_codec().is_none());
        assert!(Registry::builtin().entry(Charset::US_ASCII).is_some());
    }
}
