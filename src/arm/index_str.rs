//! Byte cursor over a mangled symbol.

use super::error::{Error, Result};

/// Tracks how far into the original input the parse has advanced. The
/// cursor only ever moves forward; bounded lookahead goes through `peek`
/// and friends rather than backtracking.
#[derive(Clone, Copy)]
pub(super) struct IndexStr<'a> {
    string: &'a [u8],
    idx: usize,
}

impl<'a> IndexStr<'a> {
    #[inline]
    pub fn new(string: &'a [u8]) -> IndexStr<'a> {
        IndexStr { string, idx: 0 }
    }

    /// The bytes that have not been consumed yet.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.string[self.idx..]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx == self.string.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.remaining().first().copied()
    }

    #[inline]
    pub fn peek_second(&self) -> Option<u8> {
        self.remaining().get(1).copied()
    }

    /// Pop the next byte off the front.
    #[inline]
    pub fn next(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.idx += 1;
        Some(byte)
    }

    /// Skip over `n` bytes, clamping at the end of the input.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.idx = usize::min(self.idx + n, self.string.len());
    }

    /// Consume the given bytes if the remaining input starts with them.
    pub fn eat_slice(&mut self, slice: &[u8]) -> bool {
        let matches = self.remaining().get(..slice.len()) == Some(slice);
        self.idx += slice.len() * (matches as usize);
        matches
    }

    /// Offset of the first occurrence of `needle` in the remaining input.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        self.remaining()
            .windows(needle.len())
            .position(|window| window == needle)
    }

    /// Split `n` bytes off the front, or `None` when not enough remain.
    pub fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let taken = self.remaining().get(..n)?;
        self.idx += n;
        Some(taken)
    }

    /// Greedy decimal integer of at least one digit.
    pub fn base10(&mut self) -> Result<usize> {
        let mut digits = 0;
        let mut value = 0usize;

        while let Some(c @ b'0'..=b'9') = self.peek() {
            self.idx += 1;
            value = value
                .checked_mul(10)
                .and_then(|value| value.checked_add((c - b'0') as usize))
                .ok_or(Error::BadLength)?;
            digits += 1;
        }

        if digits == 0 {
            return Err(Error::BadLength);
        }

        Ok(value)
    }

    /// A single decimal digit.
    pub fn digit(&mut self) -> Result<usize> {
        match self.peek() {
            Some(c @ b'0'..=b'9') => {
                self.idx += 1;
                Ok((c - b'0') as usize)
            }
            Some(_) => Err(Error::BadLength),
            None => Err(Error::UnexpectedEnd),
        }
    }
}
