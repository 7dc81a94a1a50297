//! Routing of scalar literals to handler callbacks.
//!
//! The innermost frame decides what a literal means: a string in key
//! position is a key, anything in value position is an object member, and
//! anything in an array is an item. The scanner applies the returned
//! [`Transition`] to its stack.

use crate::{
    handler::{Control, Handler},
    literal::Literal,
    stack::ParseState,
};

/// Stack effect of a dispatched literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    Stay,
    Push(ParseState),
    Pop,
    /// The literal has no place in the current frame and was not delivered.
    Orphan,
}

#[inline(always)]
pub(crate) fn literal<'src, H: Handler<'src>>(
    handler: &mut H,
    state: ParseState,
    literal: Literal<'src>,
    ctl: &mut Control,
) -> Transition {
    match (state, literal) {
        (ParseState::ObjectKey, Literal::String(key)) => {
            handler.on_key(key, ctl);
            Transition::Push(ParseState::ObjectValue)
        }
        (ParseState::ObjectValue, value) => {
            match value {
                Literal::String(v) => handler.on_string_value(v, ctl),
                Literal::Number(v) => handler.on_number_value(v, ctl),
                Literal::Bool(v) => handler.on_bool_value(v, ctl),
                Literal::Null(v) => handler.on_null_value(v, ctl),
            }
            Transition::Pop
        }
        (ParseState::ArrayItem, item) => {
            match item {
                Literal::String(v) => handler.on_string_array(v, ctl),
                Literal::Number(v) => handler.on_number_array(v, ctl),
                Literal::Bool(v) => handler.on_bool_array(v, ctl),
                Literal::Null(v) => handler.on_null_array(v, ctl),
            }
            Transition::Stay
        }
        (ParseState::ObjectKey | ParseState::Bad, _) => Transition::Orphan,
    }
}

/// Stack effect of a literal that was rejected and not dispatched. A value
/// slot is still consumed so the enclosing object stays in step.
#[inline]
pub(crate) fn skipped(state: ParseState) -> Transition {
    match state {
        ParseState::ObjectValue => Transition::Pop,
        _ => Transition::Stay,
    }
}
