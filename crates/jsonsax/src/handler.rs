//! The consumer interface.
//!
//! A [`Handler`] declares which events it cares about by overriding the
//! corresponding methods. Every method has an empty default body and the
//! scanner is generic over the handler, so a callback that is not overridden
//! is inlined away: there is no runtime test for its presence.
//!
//! Validation is a capability too, but it changes what the scanner does, so
//! it is declared separately through [`Handler::VALIDATE`]. Without it the
//! scanner assumes well-formed input and performs none of the structural or
//! literal checks, and [`Handler::on_error`] is never called.

use crate::{
    error::Error,
    literal::{BoolLiteral, Literal, NullLiteral, NumericLiteral, StringLiteral},
};

/// Scan control handed to every callback.
///
/// The scanner keeps its cursor here; a handler can read the position or
/// stop the scan.
#[derive(Debug)]
pub struct Control {
    pub(crate) pos: usize,
    pub(crate) end: usize,
    pub(crate) terminated: bool,
}

impl Control {
    pub(crate) fn new(end: usize) -> Self {
        Self {
            pos: 0,
            end,
            terminated: false,
        }
    }

    /// Stops the scan.
    ///
    /// The remaining input is truncated to nothing; the scanner finishes the
    /// token it is dispatching and exits before reading another one. No
    /// end-of-input validation runs after a termination.
    #[inline]
    pub fn terminate(&mut self) {
        self.end = self.pos;
        self.terminated = true;
    }

    #[inline]
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Byte offset of the token being dispatched.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }
}

/// Receiver of scan events.
///
/// Events arrive synchronously in document order. A container's
/// `on_new_*` call precedes its first child and its `on_*_end` call follows
/// the last one.
///
/// Values are delivered through a per-kind method whose default forwards to
/// the catch-all: `on_string_value` and friends to [`on_value`], and
/// `on_string_array` and friends to [`on_array`]. Override whichever
/// granularity is convenient.
///
/// ```
/// use jsonsax::{Control, Handler, Parser, StringLiteral};
///
/// #[derive(Default)]
/// struct Keys(Vec<String>);
///
/// impl<'src> Handler<'src> for Keys {
///     fn on_key(&mut self, key: StringLiteral<'src>, _: &mut Control) {
///         self.0.push(key.to_string());
///     }
/// }
///
/// let mut keys = Keys::default();
/// Parser::<8>::new().parse(br#"{"a":1,"b":{"c":null}}"#, &mut keys);
/// assert_eq!(keys.0, ["a", "b", "c"]);
/// ```
///
/// [`on_value`]: Handler::on_value
/// [`on_array`]: Handler::on_array
#[allow(unused_variables)]
pub trait Handler<'src> {
    /// Enables input validation and [`on_error`](Handler::on_error).
    const VALIDATE: bool = false;

    fn on_new_object(&mut self, ctl: &mut Control) {}

    fn on_new_array(&mut self, ctl: &mut Control) {}

    fn on_object_end(&mut self, ctl: &mut Control) {}

    fn on_array_end(&mut self, ctl: &mut Control) {}

    /// An object key.
    fn on_key(&mut self, key: StringLiteral<'src>, ctl: &mut Control) {}

    /// Any scalar in value position of an object.
    fn on_value(&mut self, value: Literal<'src>, ctl: &mut Control) {}

    #[inline]
    fn on_string_value(&mut self, value: StringLiteral<'src>, ctl: &mut Control) {
        self.on_value(Literal::String(value), ctl);
    }

    #[inline]
    fn on_number_value(&mut self, value: NumericLiteral<'src>, ctl: &mut Control) {
        self.on_value(Literal::Number(value), ctl);
    }

    #[inline]
    fn on_bool_value(&mut self, value: BoolLiteral, ctl: &mut Control) {
        self.on_value(Literal::Bool(value), ctl);
    }

    #[inline]
    fn on_null_value(&mut self, value: NullLiteral, ctl: &mut Control) {
        self.on_value(Literal::Null(value), ctl);
    }

    /// Any scalar item of an array.
    fn on_array(&mut self, item: Literal<'src>, ctl: &mut Control) {}

    #[inline]
    fn on_string_array(&mut self, item: StringLiteral<'src>, ctl: &mut Control) {
        self.on_array(Literal::String(item), ctl);
    }

    #[inline]
    fn on_number_array(&mut self, item: NumericLiteral<'src>, ctl: &mut Control) {
        self.on_array(Literal::Number(item), ctl);
    }

    #[inline]
    fn on_bool_array(&mut self, item: BoolLiteral, ctl: &mut Control) {
        self.on_array(Literal::Bool(item), ctl);
    }

    #[inline]
    fn on_null_array(&mut self, item: NullLiteral, ctl: &mut Control) {
        self.on_array(Literal::Null(item), ctl);
    }

    /// A validation failure. Only called when [`VALIDATE`](Handler::VALIDATE)
    /// is set. Scanning continues afterwards unless the handler terminates.
    fn on_error(&mut self, error: Error, ctl: &mut Control) {}
}

/// A handler that ignores every event. Scanning with it only walks the
/// input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ignore;

impl Handler<'_> for Ignore {}
