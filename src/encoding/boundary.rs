use std::fmt;

use bit_vec::BitVec;

use crate::encoding::{Checkpoint, Codec, CodecError, Cursor};

/// Character boundaries of one buffer, recorded in a single forward pass.
///
/// Boundaries are kept as one bit per unit, split into chunks that each
/// start at a character boundary with the shift state in effect there, so
/// stepping backward in stateful text only has to rescan one chunk.
pub struct BoundaryIndex<C: Codec> {
    entries: Vec<BoundaryEntry<C::State>>,
    len: usize,
    chars: usize,
}

struct BoundaryEntry<S> {
    checkpoint: Checkpoint<S>,
    chars_before: usize,
    starts: BitVec,
}

impl<C: Codec> BoundaryIndex<C> {
    pub fn new(units: &[C::Unit]) -> Result<Self, CodecError> {
        Self::with_chunk_size(units, 64)
    }

    pub fn with_chunk_size(units: &[C::Unit], chunk_size: usize) -> Result<Self, CodecError> {
        let chunk_size = chunk_size.max(1);
        let mut entries = Vec::new();
        let mut entry = BoundaryEntry {
            checkpoint: Checkpoint::start(),
            chars_before: 0,
            starts: BitVec::new(),
        };
        let mut cur = Cursor::new(units);
        let mut state = C::State::default();
        let mut chars = 0;
        loop {
            C::consume_shifts(&mut cur, &mut state)?;
            if cur.is_at_end() {
                break;
            }
            let pos = cur.position();
            if pos - entry.checkpoint.pos >= chunk_size {
                let next = BoundaryEntry {
                    checkpoint: Checkpoint {
                        pos,
                        state: state.clone(),
                    },
                    chars_before: chars,
                    starts: BitVec::new(),
                };
                entries.push(std::mem::replace(&mut entry, next));
            }
            let rel = pos - entry.checkpoint.pos;
            while entry.starts.len() < rel {
                entry.starts.push(false);
            }
            entry.starts.push(true);
            C::skip_forward_char(&mut cur, &mut state)?;
            chars += 1;
        }
        entries.push(entry);
        Ok(BoundaryIndex {
            entries,
            len: units.len(),
            chars,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn char_count(&self) -> usize {
        self.chars
    }

    fn entry_index(&self, pos: usize) -> usize {
        self.entries
            .partition_point(|entry| entry.checkpoint.pos <= pos)
            .max(1)
            - 1
    }

    /// Whether a character starts at `pos`. The end of the buffer counts.
    pub fn is_boundary(&self, pos: usize) -> bool {
        if pos >= self.len {
            return pos == self.len;
        }
        let entry = &self.entries[self.entry_index(pos)];
        entry.starts.get(pos - entry.checkpoint.pos) == Some(true)
    }

    /// The last boundary before `pos`.
    pub fn prev_boundary(&self, pos: usize) -> Option<usize> {
        if pos > self.len {
            return Some(self.len);
        }
        let index = self.entry_index(pos);
        let mut rel_end = pos - self.entries[index].checkpoint.pos;
        for entry in self.entries[..=index].iter().rev() {
            let rel_end = std::mem::replace(&mut rel_end, usize::MAX).min(entry.starts.len());
            if let Some(rel) = (0..rel_end).rev().find(|&i| entry.starts[i]) {
                return Some(entry.checkpoint.pos + rel);
            }
        }
        None
    }

    /// The first boundary after `pos`.
    pub fn next_boundary(&self, pos: usize) -> Option<usize> {
        if pos >= self.len {
            return None;
        }
        let index = self.entry_index(pos);
        let mut rel_start = pos - self.entries[index].checkpoint.pos + 1;
        for entry in &self.entries[index..] {
            let rel_start = std::mem::replace(&mut rel_start, 0);
            if let Some(rel) = (rel_start..entry.starts.len()).find(|&i| entry.starts[i]) {
                return Some(entry.checkpoint.pos + rel);
            }
        }
        Some(self.len)
    }

    /// The closest recorded boundary at or before `pos`, with its state.
    pub fn checkpoint_before(&self, pos: usize) -> &Checkpoint<C::State> {
        &self.entries[self.entry_index(pos)].checkpoint
    }

    /// Index of the character starting at `pos`.
    pub fn char_index(&self, pos: usize) -> Option<usize> {
        if !self.is_boundary(pos) {
            return None;
        }
        if pos == self.len {
            return Some(self.chars);
        }
        let entry = &self.entries[self.entry_index(pos)];
        let rel = pos - entry.checkpoint.pos;
        Some(entry.chars_before + (0..rel).filter(|&i| entry.starts[i]).count())
    }

    /// Start of the character with the given index.
    pub fn position_of(&self, char_index: usize) -> Option<usize> {
        if char_index >= self.chars {
            return (char_index == self.chars).then_some(self.len);
        }
        let index = self
            .entries
            .partition_point(|entry| entry.chars_before <= char_index)
            .max(1)
            - 1;
        let entry = &self.entries[index];
        let mut left = char_index - entry.chars_before;
        entry.starts.iter().enumerate().find_map(|(rel, start)| {
            if !start {
                return None;
            }
            if left == 0 {
                return Some(entry.checkpoint.pos + rel);
            }
            left -= 1;
            None
        })
    }
}

impl<C: Codec> fmt::Debug for BoundaryIndex<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryIndex")
            .field("charset", &C::CHARSET)
            .field("len", &self.len)
            .field("chars", &self.chars)
            .field("chunks", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::encoding::codecs::{Iso2022JpState, JisSet, ISO_2022_JP, UTF_8};

    #[test]
    fn test_utf8_boundaries() {
        let text = "aω🍺あ";
        let index = BoundaryIndex::<UTF_8>::with_chunk_size(text.as_bytes(), 4).unwrap();
        let boundaries: Vec<_> = (0..=text.len()).filter(|&p| index.is_boundary(p)).collect();
        assert_eq!(boundaries, vec![0, 1, 3, 7, 10]);
        assert_eq!(index.char_count(), 4);
        assert_eq!(index.prev_boundary(7), Some(3));
        assert_eq!(index.prev_boundary(5), Some(3));
        assert_eq!(index.prev_boundary(0), None);
        assert_eq!(index.next_boundary(3), Some(7));
        assert_eq!(index.next_boundary(8), Some(10));
        assert_eq!(index.next_boundary(10), None);
        assert_eq!(index.char_index(7), Some(3));
        assert_eq!(index.char_index(8), None);
        assert_eq!(index.position_of(2), Some(3));
        assert_eq!(index.position_of(4), Some(10));
        assert_eq!(index.position_of(5), None);
    }

    #[test]
    fn test_shifted_text_skips_escapes() {
        let text = b"A\x1b$B\x30\x21\x30\x22\x30\x23\x1b(BZ";
        let index = BoundaryIndex::<ISO_2022_JP>::with_chunk_size(text, 3).unwrap();
        let boundaries: Vec<_> = (0..=text.len()).filter(|&p| index.is_boundary(p)).collect();
        assert_eq!(boundaries, vec![0, 4, 6, 8, 13, 14]);
        assert_eq!(index.prev_boundary(13), Some(8));
        assert_eq!(index.next_boundary(0), Some(4));

        let checkpoint = index.checkpoint_before(9);
        assert_eq!(checkpoint.pos, 8);
        assert_eq!(checkpoint.state.active_set(), JisSet::Jis0208);
    }

    #[test]
    fn test_step_back_from_checkpoint() {
        let text = b"\x1b$B\x30\x21\x30\x22\x30\x23\x30\x24";
        let index = BoundaryIndex::<ISO_2022_JP>::with_chunk_size(text, 4).unwrap();
        let mut cur = Cursor::at(&text[..], text.len()).unwrap();
        let mut state = Default::default();
        let mut stops = Vec::new();
        while cur.position() > 3 {
            let checkpoint = index.checkpoint_before(cur.position() - 1).clone();
            ISO_2022_JP::skip_backward_char(&mut cur, &mut state, &checkpoint).unwrap();
            stops.push(cur.position());
        }
        assert_eq!(stops, vec![9, 7, 5, 3]);
    }

    #[test]
    fn test_step_back_from_chunk_start() {
        let text = b"\x1b$B\x30\x21\x30\x22\x30\x23\x30\x24";
        let index = BoundaryIndex::<ISO_2022_JP>::with_chunk_size(text, 4).unwrap();
        let mut cur = Cursor::at(&text[..], text.len()).unwrap();
        let mut state = Iso2022JpState::default();
        let mut stops = Vec::new();
        while cur.position() > 3 {
            let checkpoint = index.checkpoint_before(cur.position()).clone();
            ISO_2022_JP::skip_backward_char(&mut cur, &mut state, &checkpoint).unwrap();
            stops.push((cur.position(), state.active_set()));
        }
        assert_eq!(index.checkpoint_before(9).pos, 9);
        assert_eq!(
            stops,
            vec![
                (9, JisSet::Jis0208),
                (7, JisSet::Jis0208),
                (5, JisSet::Jis0208),
                (3, JisSet::Jis0208),
            ]
        );
    }

    #[test]
    fn test_empty_and_error() {
        let index = BoundaryIndex::<UTF_8>::new(b"").unwrap();
        assert!(index.is_empty());
        assert!(index.is_boundary(0));
        assert_eq!(index.prev_boundary(0), None);

        assert!(matches!(
            BoundaryIndex::<UTF_8>::new(b"ok\xe3\x81"),
            Err(CodecError::TruncatedSequence { pos: 2, .. })
        ));
    }
}
