use crate::encoding::CodecError;

/// Read position in a caller-owned unit buffer.
///
/// Positions are unit indices in `0..=len`. Moves that would leave that
/// range fail with [`CodecError::OutOfBounds`] and leave the cursor alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor<'a, U> {
    units: &'a [U],
    pos: usize,
}

impl<'a, U: Copy> Cursor<'a, U> {
    pub fn new(units: &'a [U]) -> Self {
        Self { units, pos: 0 }
    }

    pub fn at(units: &'a [U], pos: usize) -> Result<Self, CodecError> {
        let mut cur = Self::new(units);
        cur.set_position(pos)?;
        Ok(cur)
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) -> Result<(), CodecError> {
        if pos > self.units.len() {
            return Err(CodecError::OutOfBounds {
                pos,
                len: self.units.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// The whole buffer, including units before the cursor.
    pub const fn units(&self) -> &'a [U] {
        self.units
    }

    pub const fn len(&self) -> usize {
        self.units.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.units.len()
    }

    pub fn remaining(&self) -> &'a [U] {
        &self.units[self.pos..]
    }

    pub const fn available(&self) -> usize {
        self.units.len() - self.pos
    }

    pub fn peek(&self) -> Option<U> {
        self.units.get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<U> {
        self.units.get(self.pos.checked_add(offset)?).copied()
    }

    pub fn next_unit(&mut self) -> Result<U, CodecError> {
        let unit = self.peek().ok_or_else(|| self.out_of_bounds())?;
        self.pos += 1;
        Ok(unit)
    }

    pub fn advance(&mut self, n: usize) -> Result<(), CodecError> {
        if n > self.available() {
            return Err(self.out_of_bounds());
        }
        self.pos += n;
        Ok(())
    }

    pub fn retreat(&mut self, n: usize) -> Result<(), CodecError> {
        if n > self.pos {
            return Err(self.out_of_bounds());
        }
        self.pos -= n;
        Ok(())
    }

    pub(crate) fn out_of_bounds(&self) -> CodecError {
        CodecError::OutOfBounds {
            pos: self.pos,
            len: self.units.len(),
        }
    }

    pub(crate) fn invalid(&self, len: usize) -> CodecError {
        CodecError::InvalidSequence { pos: self.pos, len }
    }

    pub(crate) fn truncated(&self) -> CodecError {
        CodecError::TruncatedSequence {
            pos: self.pos,
            available: self.available(),
        }
    }
}

/// Write position in a caller-owned unit buffer.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct CursorMut<'a, U> {
    units: &'a mut [U],
    pos: usize,
}

impl<'a, U: Copy> CursorMut<'a, U> {
    pub fn new(units: &'a mut [U]) -> Self {
        Self { units, pos: 0 }
    }

    pub fn at(units: &'a mut [U], pos: usize) -> Result<Self, CodecError> {
        if pos > units.len() {
            return Err(CodecError::OutOfBounds {
                pos,
                len: units.len(),
            });
        }
        Ok(Self { units, pos })
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub const fn capacity(&self) -> usize {
        self.units.len()
    }

    pub const fn available(&self) -> usize {
        self.units.len() - self.pos
    }

    pub fn written(&self) -> &[U] {
        &self.units[..self.pos]
    }

    pub fn push(&mut self, unit: U) -> Result<(), CodecError> {
        self.push_all(&[unit])
    }

    /// Writes all of `units` or, if they do not fit, nothing.
    pub fn push_all(&mut self, units: &[U]) -> Result<(), CodecError> {
        if units.len() > self.available() {
            return Err(CodecError::BufferTooSmall {
                pos: self.pos,
                needed: units.len(),
                available: self.available(),
            });
        }
        self.units[self.pos..self.pos + units.len()].copy_from_slice(units);
        self.pos += units.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves() {
        let units = [10u16, 20, 30];
        let mut cur = Cursor::new(&units[..]);
        assert_eq!(cur.next_unit(), Ok(10));
        assert_eq!(cur.peek(), Some(20));
        assert_eq!(cur.peek_at(1), Some(30));
        assert_eq!(cur.peek_at(2), None);
        cur.advance(2).unwrap();
        assert!(cur.is_at_end());
        assert_eq!(
            cur.next_unit(),
            Err(CodecError::OutOfBounds { pos: 3, len: 3 })
        );
        cur.retreat(3).unwrap();
        assert_eq!(cur.position(), 0);
        assert!(cur.retreat(1).is_err());
        assert_eq!(cur.position(), 0);
        assert!(Cursor::at(&units[..], 4).is_err());
    }

    #[test]
    fn test_cursor_mut_is_all_or_nothing() {
        let mut buf = [0u8; 3];
        let mut out = CursorMut::new(&mut buf[..]);
        out.push_all(&[1, 2]).unwrap();
        assert_eq!(
            out.push_all(&[3, 4]),
            Err(CodecError::BufferTooSmall {
                pos: 2,
                needed: 2,
                available: 1
            })
        );
        assert_eq!(out.written(), &[1, 2]);
        out.push(3).unwrap();
        assert_eq!(out.available(), 0);
        assert_eq!(buf, [1, 2, 3]);
    }
}
