use super::{Container, NestingStack, Overflow};

/// One byte per level.
#[derive(Debug, Clone)]
pub struct ByteStack<const N: usize> {
    levels: [Container; N],
    len: usize,
}

impl<const N: usize> Default for ByteStack<N> {
    fn default() -> Self {
        Self {
            levels: [Container::Object; N],
            len: 0,
        }
    }
}

impl<const N: usize> NestingStack for ByteStack<N> {
    #[inline]
    fn push(&mut self, container: Container) -> Result<(), Overflow> {
        let slot = self.levels.get_mut(self.len).ok_or(Overflow)?;
        *slot = container;
        self.len += 1;
        Ok(())
    }

    #[inline]
    fn pop(&mut self) -> Option<Container> {
        self.len = self.len.checked_sub(1)?;
        Some(self.levels[self.len])
    }

    #[inline]
    fn peek(&self) -> Option<Container> {
        self.len.checked_sub(1).map(|i| self.levels[i])
    }

    #[inline]
    fn depth(&self) -> usize {
        self.len
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.len == N
    }

    fn clear(&mut self) {
        self.len = 0;
    }
}
