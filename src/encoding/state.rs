use std::{any::type_name, fmt, hash, marker::PhantomData};

/// Shift state of a codec that has none.
///
/// The type parameter is the codec itself, so two stateless codecs never
/// share a state type even though every value is the same empty value.
pub struct Stateless<C>(PhantomData<fn() -> C>);

impl<C> Stateless<C> {
    pub const fn new() -> Self {
        Stateless(PhantomData)
    }
}

impl<C> Default for Stateless<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for Stateless<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Stateless<C> {}

impl<C> PartialEq for Stateless<C> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<C> Eq for Stateless<C> {}

impl<C> hash::Hash for Stateless<C> {
    fn hash<H: hash::Hasher>(&self, _state: &mut H) {}
}

impl<C> fmt::Debug for Stateless<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stateless<{}>", type_name::<C>())
    }
}

/// A position known to be a character boundary together with the shift
/// state in effect there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checkpoint<S> {
    pub pos: usize,
    pub state: S,
}

impl<S: Default> Checkpoint<S> {
    /// The start of the buffer in the initial state.
    pub fn start() -> Self {
        Checkpoint {
            pos: 0,
            state: S::default(),
        }
    }
}

impl<S: Default> Default for Checkpoint<S> {
    fn default() -> Self {
        Self::start()
    }
}
