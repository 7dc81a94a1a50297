use super::{Container, NestingStack, Overflow};

/// Run-length compressed byte stack.
///
/// Each entry byte holds the container kind in its high bit and a run count
/// in the low seven bits. Pushing the same kind as the innermost entry bumps
/// its count instead of consuming a new byte, so `[[[[[[` costs one entry.
/// A run holds at most [`MAX_RUN`](Self::MAX_RUN) levels before a fresh entry
/// is started.
#[derive(Debug, Clone)]
pub struct RunLengthStack<const N: usize> {
    entries: [u8; N],
    len: usize,
    depth: usize,
}

impl<const N: usize> Default for RunLengthStack<N> {
    fn default() -> Self {
        Self {
            entries: [0; N],
            len: 0,
            depth: 0,
        }
    }
}

impl<const N: usize> RunLengthStack<N> {
    pub const MAX_RUN: u8 = 0x7F;

    const KIND_BIT: u8 = 0x80;

    #[inline]
    fn kind(entry: u8) -> Container {
        Container::from_bit(entry & Self::KIND_BIT != 0)
    }

    #[inline]
    fn run(entry: u8) -> u8 {
        entry & Self::MAX_RUN
    }

    /// Number of entry bytes in use.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.len
    }
}

impl<const N: usize> NestingStack for RunLengthStack<N> {
    #[inline]
    fn push(&mut self, container: Container) -> Result<(), Overflow> {
        if let Some(top) = self.len.checked_sub(1).map(|i| &mut self.entries[i]) {
            if Self::kind(*top) == container && Self::run(*top) < Self::MAX_RUN {
                *top += 1;
                self.depth += 1;
                return Ok(());
            }
        }
        let slot = self.entries.get_mut(self.len).ok_or(Overflow)?;
        *slot = if container.bit() { Self::KIND_BIT | 1 } else { 1 };
        self.len += 1;
        self.depth += 1;
        Ok(())
    }

    #[inline]
    fn pop(&mut self) -> Option<Container> {
        let i = self.len.checked_sub(1)?;
        let top = &mut self.entries[i];
        let kind = Self::kind(*top);
        *top -= 1;
        if Self::run(*top) == 0 {
            self.len = i;
        }
        self.depth -= 1;
        Some(kind)
    }

    #[inline]
    fn peek(&self) -> Option<Container> {
        self.len.checked_sub(1).map(|i| Self::kind(self.entries[i]))
    }

    #[inline]
    fn depth(&self) -> usize {
        self.depth
    }

    /// With every entry in use only a push extending the innermost run can
    /// still succeed.
    #[inline]
    fn is_full(&self) -> bool {
        self.len == N
    }

    fn clear(&mut self) {
        self.len = 0;
        self.depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_kind_shares_one_entry() {
        let mut s = RunLengthStack::<1>::default();
        for _ in 0..10 {
            s.push(Container::Array).unwrap();
        }
        assert_eq!(s.entries(), 1);
        assert_eq!(s.depth(), 10);
        assert_eq!(s.push(Container::Object), Err(Overflow));
        assert_eq!(s.depth(), 10);
    }

    #[test]
    fn alternating_kinds_use_an_entry_each() {
        let mut s = RunLengthStack::<4>::default();
        for c in [Container::Object, Container::Array, Container::Array, Container::Object] {
            s.push(c).unwrap();
        }
        assert_eq!(s.entries(), 3);
        assert_eq!(s.pop(), Some(Container::Object));
        assert_eq!(s.pop(), Some(Container::Array));
        assert_eq!(s.entries(), 2);
        assert_eq!(s.pop(), Some(Container::Array));
        assert_eq!(s.pop(), Some(Container::Object));
        assert_eq!(s.pop(), None);
    }

    #[test]
    fn run_limit_starts_a_new_entry() {
        let mut s = RunLengthStack::<2>::default();
        for _ in 0..=RunLengthStack::<2>::MAX_RUN {
            s.push(Container::Object).unwrap();
        }
        assert_eq!(s.entries(), 2);
        assert_eq!(s.depth(), 128);
    }
}
