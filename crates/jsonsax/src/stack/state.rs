use super::{NibbleStack, Overflow};

/// Context of one nesting level.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ParseState {
    /// Outside of any container. Only ever the bottom frame.
    #[default]
    Bad = 0,
    /// Inside an object, expecting a key.
    ObjectKey = 1,
    /// Inside an object, after a key and before its value.
    ObjectValue = 2,
    /// Inside an array, expecting an item.
    ArrayItem = 3,
}

impl ParseState {
    #[inline]
    fn from_tag(tag: u8) -> Self {
        match tag & 0x3 {
            0 => ParseState::Bad,
            1 => ParseState::ObjectKey,
            2 => ParseState::ObjectValue,
            _ => ParseState::ArrayItem,
        }
    }
}

/// The scanner's nesting stack: one [`ParseState`] per open level.
///
/// The innermost frame is kept unpacked in `top`; the frames beneath it are
/// nibble-packed, two per byte, in `MAX_DEPTH` bytes. The [`ParseState::Bad`]
/// sentinel is never stored: an empty stack reads as the sentinel. That makes
/// `MAX_DEPTH + 1` bytes of frame storage, enough for `2 * MAX_DEPTH + 1`
/// container frames on top of the sentinel.
#[derive(Debug, Clone)]
pub struct StateStack<const MAX_DEPTH: usize> {
    below: NibbleStack<MAX_DEPTH>,
    top: ParseState,
}

impl<const MAX_DEPTH: usize> Default for StateStack<MAX_DEPTH> {
    fn default() -> Self {
        Self {
            below: NibbleStack::default(),
            top: ParseState::Bad,
        }
    }
}

impl<const MAX_DEPTH: usize> StateStack<MAX_DEPTH> {
    /// Container frames the stack can hold, not counting the sentinel.
    pub const CAPACITY: usize = 2 * MAX_DEPTH + 1;

    /// The innermost frame, or the sentinel when no container is open.
    #[inline]
    #[must_use]
    pub fn top(&self) -> ParseState {
        self.top
    }

    /// Number of frames including the sentinel; never less than one.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        if self.top == ParseState::Bad {
            1
        } else {
            self.below.len() + 2
        }
    }

    /// Whether only the sentinel remains.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top == ParseState::Bad
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.top != ParseState::Bad && self.below.is_full()
    }

    /// Pushes a frame.
    ///
    /// # Errors
    ///
    /// Returns [`Overflow`] without modifying the stack when it is full.
    #[inline]
    pub fn try_push(&mut self, state: ParseState) -> Result<(), Overflow> {
        debug_assert_ne!(state, ParseState::Bad, "the sentinel is implicit");
        if self.top != ParseState::Bad {
            self.below.push_tag(self.top as u8)?;
        }
        self.top = state;
        Ok(())
    }

    /// Pushes a frame, dropping it silently when the stack is full.
    #[inline]
    pub fn push_saturating(&mut self, state: ParseState) {
        let _ = self.try_push(state);
    }

    /// Pops the innermost frame. Returns `None` when only the sentinel is
    /// left, which stays in place.
    #[inline]
    pub fn pop(&mut self) -> Option<ParseState> {
        if self.top == ParseState::Bad {
            return None;
        }
        let popped = self.top;
        self.top = self
            .below
            .pop_tag()
            .map_or(ParseState::Bad, ParseState::from_tag);
        Some(popped)
    }

    /// Pops the innermost frame; a pop on the sentinel is a no-op.
    #[inline]
    pub fn pop_saturating(&mut self) {
        let _ = self.pop();
    }

    /// Rewrites the innermost frame in place.
    #[inline]
    pub fn replace_top(&mut self, state: ParseState) {
        debug_assert_ne!(self.top, ParseState::Bad, "cannot rewrite the sentinel");
        self.top = state;
    }

    pub fn reset(&mut self) {
        self.below.clear();
        self.top = ParseState::Bad;
    }
}
