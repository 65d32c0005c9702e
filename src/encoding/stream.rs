use crate::encoding::{Checkpoint, Codec, CodecError, Cursor, CursorMut};

/// Decodes a buffer character by character, carrying one shift state.
///
/// Yields the first error and then stops.
pub struct Decoder<'a, C: Codec> {
    cur: Cursor<'a, C::Unit>,
    state: C::State,
    failed: bool,
}

impl<'a, C: Codec> Decoder<'a, C> {
    pub fn new(units: &'a [C::Unit]) -> Self {
        Decoder {
            cur: Cursor::new(units),
            state: C::State::default(),
            failed: false,
        }
    }

    /// Resumes decoding from a known boundary.
    pub fn with_checkpoint(
        units: &'a [C::Unit],
        checkpoint: Checkpoint<C::State>,
    ) -> Result<Self, CodecError> {
        Ok(Decoder {
            cur: Cursor::at(units, checkpoint.pos)?,
            state: checkpoint.state,
            failed: false,
        })
    }

    pub fn position(&self) -> usize {
        self.cur.position()
    }

    pub fn state(&self) -> &C::State {
        &self.state
    }

    /// The current position and state, usable to resume later.
    pub fn checkpoint(&self) -> Checkpoint<C::State> {
        Checkpoint {
            pos: self.cur.position(),
            state: self.state.clone(),
        }
    }
}

impl<C: Codec> Iterator for Decoder<'_, C> {
    type Item = Result<C::Char, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = C::consume_shifts(&mut self.cur, &mut self.state).and_then(|()| {
            if self.cur.is_at_end() {
                return Ok(None);
            }
            C::decode(&mut self.cur, &mut self.state).map(Some)
        });
        match result {
            Ok(ch) => ch.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<C: Codec> std::iter::FusedIterator for Decoder<'_, C> {}

/// Encodes characters into a caller-owned buffer, carrying one shift state.
pub struct Encoder<'a, C: Codec> {
    out: CursorMut<'a, C::Unit>,
    state: C::State,
}

impl<'a, C: Codec> Encoder<'a, C> {
    pub fn new(units: &'a mut [C::Unit]) -> Self {
        Encoder {
            out: CursorMut::new(units),
            state: C::State::default(),
        }
    }

    pub fn push(&mut self, ch: C::Char) -> Result<(), CodecError> {
        C::encode(&mut self.out, ch, &mut self.state)
    }

    pub fn position(&self) -> usize {
        self.out.position()
    }

    /// Restores the initial shift state and returns the number of units
    /// written.
    pub fn finish(mut self) -> Result<usize, CodecError> {
        C::finish_encode(&mut self.out, &mut self.state)?;
        Ok(self.out.position())
    }
}

pub fn decode_all<C: Codec>(units: &[C::Unit]) -> Result<Vec<C::Char>, CodecError> {
    let mut chars = Vec::with_capacity(C::typ_characters(units.len()));
    for ch in Decoder::<C>::new(units) {
        chars.push(ch?);
    }
    Ok(chars)
}

pub fn encode_all<C: Codec>(chars: &[C::Char]) -> Result<Vec<C::Unit>, CodecError> {
    let mut units = vec![C::Unit::default(); C::max_units(chars.len())];
    let mut encoder = Encoder::<C>::new(&mut units);
    for &ch in chars {
        encoder.push(ch)?;
    }
    let len = encoder.finish()?;
    units.truncate(len);
    Ok(units)
}
