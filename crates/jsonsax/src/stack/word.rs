use super::{Container, NestingStack, Overflow};

/// Nesting context in a single `u64`.
///
/// The lowest bit is the innermost level. A marker bit sits just above the
/// outermost level, so the depth is the marker's position and no separate
/// length is needed. This caps the stack at 63 levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordStack {
    bits: u64,
}

impl WordStack {
    pub const CAPACITY: usize = 63;

    const MARKER: u64 = 1;
    const TOP_BIT: u64 = 1 << 63;
}

impl Default for WordStack {
    fn default() -> Self {
        Self { bits: Self::MARKER }
    }
}

impl NestingStack for WordStack {
    #[inline]
    fn push(&mut self, container: Container) -> Result<(), Overflow> {
        if self.bits & Self::TOP_BIT != 0 {
            return Err(Overflow);
        }
        self.bits = (self.bits << 1) | u64::from(container.bit());
        Ok(())
    }

    #[inline]
    fn pop(&mut self) -> Option<Container> {
        let top = self.peek()?;
        self.bits >>= 1;
        Some(top)
    }

    #[inline]
    fn peek(&self) -> Option<Container> {
        if self.bits == Self::MARKER {
            None
        } else {
            Some(Container::from_bit(self.bits & 1 == 1))
        }
    }

    #[inline]
    fn depth(&self) -> usize {
        (u64::BITS - 1 - self.bits.leading_zeros()) as usize
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.bits & Self::TOP_BIT != 0
    }

    fn clear(&mut self) {
        self.bits = Self::MARKER;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_exactly_63_levels() {
        let mut s = WordStack::default();
        for _ in 0..WordStack::CAPACITY {
            s.push(Container::Object).unwrap();
        }
        assert_eq!(s.depth(), 63);
        assert_eq!(s.push(Container::Object), Err(Overflow));
        for _ in 0..WordStack::CAPACITY {
            assert_eq!(s.pop(), Some(Container::Object));
        }
        assert_eq!(s.pop(), None);
        assert_eq!(s.depth(), 0);
    }
}
