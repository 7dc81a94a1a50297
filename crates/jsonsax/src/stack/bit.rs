use super::{Container, NestingStack, Overflow};

const WORD_BITS: usize = u64::BITS as usize;

/// One bit per level, packed into `WORDS` machine words.
///
/// A set bit marks an array, a clear bit an object. Capacity is
/// `64 * WORDS` levels.
#[derive(Debug, Clone)]
pub struct BitStack<const WORDS: usize> {
    words: [u64; WORDS],
    len: usize,
}

impl<const WORDS: usize> Default for BitStack<WORDS> {
    fn default() -> Self {
        Self {
            words: [0; WORDS],
            len: 0,
        }
    }
}

impl<const WORDS: usize> BitStack<WORDS> {
    pub const CAPACITY: usize = WORDS * WORD_BITS;

    #[inline]
    fn bit(&self, index: usize) -> bool {
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }
}

impl<const WORDS: usize> NestingStack for BitStack<WORDS> {
    #[inline]
    fn push(&mut self, container: Container) -> Result<(), Overflow> {
        if self.len == Self::CAPACITY {
            return Err(Overflow);
        }
        let word = &mut self.words[self.len / WORD_BITS];
        let mask = 1u64 << (self.len % WORD_BITS);
        if container.bit() {
            *word |= mask;
        } else {
            *word &= !mask;
        }
        self.len += 1;
        Ok(())
    }

    #[inline]
    fn pop(&mut self) -> Option<Container> {
        self.len = self.len.checked_sub(1)?;
        Some(Container::from_bit(self.bit(self.len)))
    }

    #[inline]
    fn peek(&self) -> Option<Container> {
        self.len
            .checked_sub(1)
            .map(|i| Container::from_bit(self.bit(i)))
    }

    #[inline]
    fn depth(&self) -> usize {
        self.len
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.len == Self::CAPACITY
    }

    fn clear(&mut self) {
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crosses_word_boundary() {
        let mut s = BitStack::<2>::default();
        for i in 0..70 {
            let c = if i % 3 == 0 { Container::Array } else { Container::Object };
            s.push(c).unwrap();
        }
        assert_eq!(s.depth(), 70);
        for i in (0..70).rev() {
            let c = if i % 3 == 0 { Container::Array } else { Container::Object };
            assert_eq!(s.pop(), Some(c), "level {i}");
        }
        assert!(s.is_empty());
    }

    #[test]
    fn stale_bits_are_overwritten() {
        let mut s = BitStack::<1>::default();
        s.push(Container::Array).unwrap();
        s.pop();
        s.push(Container::Object).unwrap();
        assert_eq!(s.peek(), Some(Container::Object));
    }
}
