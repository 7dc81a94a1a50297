use super::{Container, NestingStack, Overflow};

/// One nibble per level, two levels per byte.
///
/// Each level stores a 4-bit tag, so up to 16 distinct states fit at half the
/// footprint of [`ByteStack`](super::ByteStack). The raw tag interface backs
/// [`StateStack`](super::StateStack); the [`NestingStack`] impl stores
/// [`Container`] discriminants.
#[derive(Debug, Clone)]
pub struct NibbleStack<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> Default for NibbleStack<N> {
    fn default() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }
}

impl<const N: usize> NibbleStack<N> {
    pub const CAPACITY: usize = N * 2;

    #[inline]
    fn get(&self, index: usize) -> u8 {
        (self.bytes[index / 2] >> ((index % 2) * 4)) & 0x0F
    }

    /// Pushes a 4-bit tag. Bits above the low nibble are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Overflow`] when all `2 * N` slots are in use.
    #[inline]
    pub fn push_tag(&mut self, tag: u8) -> Result<(), Overflow> {
        if self.len == Self::CAPACITY {
            return Err(Overflow);
        }
        let shift = (self.len % 2) * 4;
        let byte = &mut self.bytes[self.len / 2];
        *byte = (*byte & !(0x0F << shift)) | ((tag & 0x0F) << shift);
        self.len += 1;
        Ok(())
    }

    #[inline]
    pub fn pop_tag(&mut self) -> Option<u8> {
        self.len = self.len.checked_sub(1)?;
        Some(self.get(self.len))
    }

    #[inline]
    #[must_use]
    pub fn peek_tag(&self) -> Option<u8> {
        self.len.checked_sub(1).map(|i| self.get(i))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == Self::CAPACITY
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl<const N: usize> NestingStack for NibbleStack<N> {
    #[inline]
    fn push(&mut self, container: Container) -> Result<(), Overflow> {
        self.push_tag(container as u8)
    }

    #[inline]
    fn pop(&mut self) -> Option<Container> {
        self.pop_tag().map(|t| Container::from_bit(t == Container::Array as u8))
    }

    #[inline]
    fn peek(&self) -> Option<Container> {
        self.peek_tag()
            .map(|t| Container::from_bit(t == Container::Array as u8))
    }

    #[inline]
    fn depth(&self) -> usize {
        self.len
    }

    #[inline]
    fn is_full(&self) -> bool {
        NibbleStack::is_full(self)
    }

    fn clear(&mut self) {
        NibbleStack::clear(self);
    }
}
