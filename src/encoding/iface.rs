use std::fmt;

use crate::encoding::{Charset, Checkpoint, CodePoint, CodecError, Cursor, CursorMut, Unit};

/// Conversion between character values and storage units for one charset.
///
/// Every operation works on caller-owned buffers through a cursor and never
/// keeps a reference past the call. Per-stream shift state lives in a
/// separate `State` value owned by the caller, one per decode or encode
/// pass.
///
/// A character boundary is the position where a character's own units
/// start, after any shift sequences in front of it. On error the cursor is
/// left at the start of the offending sequence.
pub trait Codec: Sized + 'static {
    const CHARSET: Charset;

    /// Units 0..=127 decode to the ASCII characters with the same values.
    const IS_ASCII_SUPERSET: bool;

    /// Additionally, units 128..=160 decode to the characters shared by the
    /// whole ISO-8859 family (C1 controls and NBSP).
    const IS_ASCII_PLUS_C1_SUPERSET: bool;

    type Char: CodePoint;
    type Unit: Unit;
    type State: Clone + Default + Eq + fmt::Debug + Send + Sync + 'static;

    /// Consumes state-transition sequences at the cursor, such as escape
    /// sequences or a byte order mark.
    fn consume_shifts(
        _cur: &mut Cursor<'_, Self::Unit>,
        _state: &mut Self::State,
    ) -> Result<(), CodecError> {
        Ok(())
    }

    fn decode(
        cur: &mut Cursor<'_, Self::Unit>,
        state: &mut Self::State,
    ) -> Result<Self::Char, CodecError>;

    fn encode(
        out: &mut CursorMut<'_, Self::Unit>,
        ch: Self::Char,
        state: &mut Self::State,
    ) -> Result<(), CodecError>;

    /// Returns the stream to the initial shift state.
    fn finish_encode(
        _out: &mut CursorMut<'_, Self::Unit>,
        _state: &mut Self::State,
    ) -> Result<(), CodecError> {
        Ok(())
    }

    /// Moves past the next character. A run of shift sequences that reaches
    /// the end of the buffer is skipped as a step of its own.
    fn skip_forward_char(
        cur: &mut Cursor<'_, Self::Unit>,
        state: &mut Self::State,
    ) -> Result<(), CodecError> {
        Self::decode(cur, state).map(|_| ())
    }

    /// Moves to the start of the previous character and sets `state` to the
    /// state in effect there. `checkpoint` must lie at or before the cursor.
    fn skip_backward_char(
        cur: &mut Cursor<'_, Self::Unit>,
        state: &mut Self::State,
        checkpoint: &Checkpoint<Self::State>,
    ) -> Result<(), CodecError> {
        rescan_backward::<Self>(cur, state, checkpoint)
    }

    /// Number of units `skip_forward_char` from the cursor would move past,
    /// leading shift sequences included. Error positions point at the
    /// offending sequence, as `decode` leaves them.
    fn char_length(cur: &Cursor<'_, Self::Unit>, state: &Self::State) -> Result<usize, CodecError>;

    fn max_characters(n_units: usize) -> usize;
    fn typ_characters(n_units: usize) -> usize;
    fn max_units(n_characters: usize) -> usize;
    fn typ_units(n_characters: usize) -> usize;
}

/// Finds the previous character by scanning forward from `checkpoint`.
///
/// Shift state cannot be recovered by looking at units backwards, so this is
/// what stateful codecs use. A checkpoint that yields no character before
/// the cursor, including one at or after it, falls back to the buffer start.
pub fn rescan_backward<C: Codec>(
    cur: &mut Cursor<'_, C::Unit>,
    state: &mut C::State,
    checkpoint: &Checkpoint<C::State>,
) -> Result<(), CodecError> {
    let target = cur.position();
    let mut prev = None;
    if checkpoint.pos < target {
        prev = last_start_before::<C>(cur.units(), checkpoint.clone(), target)?;
    }
    if prev.is_none() && checkpoint.pos > 0 {
        prev = last_start_before::<C>(cur.units(), Checkpoint::start(), target)?;
    }
    match prev {
        Some((pos, prev_state)) => {
            cur.set_position(pos)?;
            *state = prev_state;
            Ok(())
        }
        None => Err(cur.out_of_bounds()),
    }
}

fn last_start_before<C: Codec>(
    units: &[C::Unit],
    from: Checkpoint<C::State>,
    target: usize,
) -> Result<Option<(usize, C::State)>, CodecError> {
    let mut scan = Cursor::at(units, from.pos)?;
    let mut scan_state = from.state;
    let mut prev = None;
    loop {
        C::consume_shifts(&mut scan, &mut scan_state)?;
        let start = scan.position();
        if start >= target || scan.is_at_end() {
            break;
        }
        prev = Some((start, scan_state.clone()));
        C::skip_forward_char(&mut scan, &mut scan_state)?;
    }
    Ok(prev)
}
