//! Bounded nesting-context stacks.
//!
//! The scanner tracks where it is in a document with a flat, fixed-capacity
//! stack of small tags. [`StateStack`] is the one the scanner uses: it stores
//! the full four-valued [`ParseState`] per level. The remaining types
//! implement the narrower [`NestingStack`] contract, which only records
//! whether each open container is an object or an array, and trade space for
//! time in different ways:
//!
//! | Encoding            | Bits per level | Notes                                    |
//! |---------------------|----------------|------------------------------------------|
//! | [`ByteStack`]       | 8              | baseline, one plain store per push       |
//! | [`BitStack`]        | 1              | densest, words of 64 levels              |
//! | [`WordStack`]       | 1              | single register, capped at 63 levels     |
//! | [`NibbleStack`]     | 4              | up to 16 distinct tags per level         |
//! | [`RunLengthStack`]  | 8 per run      | repeated container types share one entry |
//!
//! None of them allocate, and none of them recurse.

mod bit;
mod byte;
mod nibble;
mod run_length;
mod state;
mod word;

pub use bit::BitStack;
pub use byte::ByteStack;
pub use nibble::NibbleStack;
pub use run_length::RunLengthStack;
pub use state::{ParseState, StateStack};
use thiserror::Error;
pub use word::WordStack;

/// The kind of an open container.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Container {
    Object = 0,
    Array = 1,
}

impl Container {
    #[inline]
    pub(crate) fn from_bit(bit: bool) -> Self {
        if bit { Container::Array } else { Container::Object }
    }

    #[inline]
    pub(crate) fn bit(self) -> bool {
        matches!(self, Container::Array)
    }
}

/// Returned when pushing onto a stack that has no room left.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("nesting stack is full")]
pub struct Overflow;

/// A bounded stack of container kinds.
///
/// Every implementation has a fixed capacity chosen at compile time and never
/// allocates.
pub trait NestingStack {
    /// Pushes a container, failing without modifying the stack when full.
    ///
    /// # Errors
    ///
    /// Returns [`Overflow`] when the container cannot be recorded.
    fn push(&mut self, container: Container) -> Result<(), Overflow>;

    /// Removes and returns the innermost container.
    fn pop(&mut self) -> Option<Container>;

    /// Returns the innermost container without removing it.
    fn peek(&self) -> Option<Container>;

    /// Number of open containers.
    fn depth(&self) -> usize;

    /// Whether the next push may fail.
    fn is_full(&self) -> bool;

    /// Removes every container.
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.depth() == 0
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use quickcheck::{Arbitrary, Gen, QuickCheck};

    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Push(Container),
        Pop,
    }

    impl Arbitrary for Op {
        fn arbitrary(g: &mut Gen) -> Self {
            // Bias toward pushes so runs get long enough to hit capacity.
            match u8::arbitrary(g) % 5 {
                0 | 1 => Op::Pop,
                2 => Op::Push(Container::Object),
                _ => Op::Push(Container::Array),
            }
        }
    }

    /// Replays `ops` against `stack` and an unbounded `Vec` model, comparing
    /// every observable result. Pushes the stack rejects are dropped from the
    /// model too.
    fn agrees_with_model<S: NestingStack>(mut stack: S, ops: &[Op]) -> bool {
        let mut model = Vec::new();
        for op in ops {
            match *op {
                Op::Push(c) => {
                    if stack.push(c).is_ok() {
                        model.push(c);
                    }
                }
                Op::Pop => {
                    if stack.pop() != model.pop() {
                        return false;
                    }
                }
            }
            if stack.peek() != model.last().copied() || stack.depth() != model.len() {
                return false;
            }
        }
        true
    }

    fn tests() -> u64 {
        if is_ci::cached() { 10_000 } else { 1_000 }
    }

    #[test]
    fn encodings_agree_with_vec_model() {
        #[allow(clippy::needless_pass_by_value)]
        fn prop(ops: Vec<Op>) -> bool {
            agrees_with_model(ByteStack::<8>::default(), &ops)
                && agrees_with_model(BitStack::<1>::default(), &ops)
                && agrees_with_model(WordStack::default(), &ops)
                && agrees_with_model(NibbleStack::<4>::default(), &ops)
                && agrees_with_model(RunLengthStack::<3>::default(), &ops)
        }

        QuickCheck::new()
            .tests(tests())
            .quickcheck(prop as fn(Vec<Op>) -> bool);
    }

    #[test]
    fn push_on_full_stack_leaves_it_untouched() {
        fn fill<S: NestingStack>(mut stack: S) {
            while stack.push(Container::Array).is_ok() {}
            let depth = stack.depth();
            assert_eq!(stack.push(Container::Array), Err(Overflow));
            assert_eq!(stack.depth(), depth);
            assert_eq!(stack.peek(), Some(Container::Array));
            assert!(stack.is_full());
        }

        fill(ByteStack::<3>::default());
        fill(BitStack::<2>::default());
        fill(WordStack::default());
        fill(NibbleStack::<2>::default());
        fill(RunLengthStack::<2>::default());
    }
}
