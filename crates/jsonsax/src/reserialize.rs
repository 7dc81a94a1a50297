//! Writing scan events back out as compact JSON.
//!
//! The scanner accepts single-quoted strings and blanks anywhere; the
//! [`Reserializer`] normalizes both, so a scan followed by a reserialize
//! yields standard, whitespace-free JSON text for well-formed input.

use bstr::BString;
use thiserror::Error;

use crate::{
    handler::{Control, Handler},
    literal::{Literal, StringLiteral},
    stack::{ByteStack, Container, NestingStack},
};

/// Why a [`Reserializer`] could not produce balanced output.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserializeError {
    #[error("input ended with {0} containers open")]
    Unclosed(usize),
    #[error("nesting overflow at byte {0}")]
    Overflow(usize),
    #[error("close at byte {0} does not match an open container")]
    Mismatched(usize),
}

/// A handler that rebuilds the document it is fed.
///
/// Container context is tracked with any [`NestingStack`]; the choice only
/// changes how deep the document may nest. Only the first structural
/// problem is kept, and writing carries on past it.
///
/// ```
/// use jsonsax::{Parser, Reserializer};
///
/// let mut out: Reserializer = Reserializer::new();
/// Parser::<8>::new().parse(b"{ 'a' : [1, true], 'b' : null }", &mut out);
/// assert_eq!(out.finish().unwrap(), r#"{"a":[1,true],"b":null}"#);
/// ```
#[derive(Debug, Clone)]
pub struct Reserializer<S = ByteStack<64>> {
    out: BString,
    stack: S,
    /// Whether the innermost container has no children yet.
    first: bool,
    /// A key was written and its value has not been.
    after_key: bool,
    error: Option<ReserializeError>,
}

impl<S: NestingStack + Default> Default for Reserializer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: NestingStack + Default> Reserializer<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: BString::default(),
            stack: S::default(),
            first: true,
            after_key: false,
            error: None,
        }
    }

    /// Returns the text written so far.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem seen, or
    /// [`ReserializeError::Unclosed`] when containers are still open.
    pub fn finish(self) -> Result<BString, ReserializeError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        match self.stack.depth() {
            0 => Ok(self.out),
            open => Err(ReserializeError::Unclosed(open)),
        }
    }

    fn fail(&mut self, error: ReserializeError) {
        self.error.get_or_insert(error);
    }

    /// Writes the separator owed before a key, an array item or a root.
    fn separate(&mut self) {
        if self.after_key {
            self.after_key = false;
            return;
        }
        if !self.first && !self.stack.is_empty() {
            self.out.push(b',');
        }
        self.first = false;
    }

    fn open(&mut self, container: Container, ctl: &Control) {
        self.separate();
        self.out.push(match container {
            Container::Object => b'{',
            Container::Array => b'[',
        });
        if self.stack.push(container).is_err() {
            self.fail(ReserializeError::Overflow(ctl.offset()));
        }
        self.first = true;
    }

    fn close(&mut self, container: Container, ctl: &Control) {
        if self.stack.pop() != Some(container) {
            self.fail(ReserializeError::Mismatched(ctl.offset()));
        }
        self.out.push(match container {
            Container::Object => b'}',
            Container::Array => b']',
        });
        self.first = false;
        self.after_key = false;
    }

    fn scalar(&mut self, literal: Literal<'_>) {
        match literal {
            Literal::String(s) => write_string(&mut self.out, s.as_bytes()),
            Literal::Number(n) => self.out.extend_from_slice(n.as_bytes()),
            Literal::Bool(b) => self
                .out
                .extend_from_slice(if b.value { b"true" } else { b"false" }),
            Literal::Null(_) => self.out.extend_from_slice(b"null"),
        }
    }
}

/// Writes a string span between double quotes. A bare `"` from a
/// single-quoted string gains a backslash and `\'` loses one; every other
/// escape is copied as is.
fn write_string(out: &mut BString, span: &[u8]) {
    out.push(b'"');
    let mut escaped = false;
    for &b in span {
        if escaped {
            if b != b'\'' {
                out.push(b'\\');
            }
            out.push(b);
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else {
            if b == b'"' {
                out.push(b'\\');
            }
            out.push(b);
        }
    }
    out.push(b'"');
}

impl<'src, S: NestingStack + Default> Handler<'src> for Reserializer<S> {
    fn on_new_object(&mut self, ctl: &mut Control) {
        self.open(Container::Object, ctl);
    }

    fn on_new_array(&mut self, ctl: &mut Control) {
        self.open(Container::Array, ctl);
    }

    fn on_object_end(&mut self, ctl: &mut Control) {
        self.close(Container::Object, ctl);
    }

    fn on_array_end(&mut self, ctl: &mut Control) {
        self.close(Container::Array, ctl);
    }

    fn on_key(&mut self, key: StringLiteral<'src>, _: &mut Control) {
        self.separate();
        write_string(&mut self.out, key.as_bytes());
        self.out.push(b':');
        self.after_key = true;
    }

    fn on_value(&mut self, value: Literal<'src>, _: &mut Control) {
        self.after_key = false;
        self.scalar(value);
    }

    fn on_array(&mut self, item: Literal<'src>, _: &mut Control) {
        self.separate();
        self.scalar(item);
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        Parser,
        stack::{BitStack, RunLengthStack, WordStack},
    };

    fn reserialize<S: NestingStack + Default>(input: &[u8]) -> Result<BString, ReserializeError> {
        let mut out = Reserializer::<S>::new();
        Parser::<16>::new().parse(input, &mut out);
        out.finish()
    }

    #[rstest]
    #[case::compact(br#"{"a":[1,2.5,-3],"b":{"c":null}}"#, r#"{"a":[1,2.5,-3],"b":{"c":null}}"#)]
    #[case::blanks(b" [ true ,\n false ] ", "[true,false]")]
    #[case::single_quotes(br"{'a':'it\'s'}", r#"{"a":"it's"}"#)]
    #[case::embedded_double_quote(br#"['say "hi"']"#, r#"["say \"hi\""]"#)]
    #[case::escapes_kept(br#"["a\\b\n\"c"]"#, r#"["a\\b\n\"c"]"#)]
    #[case::empty_containers(b"[{},[],{}]", "[{},[],{}]")]
    #[case::two_roots(b"{} []", "{}[]")]
    fn writes_compact_double_quoted_json(#[case] input: &[u8], #[case] expected: &str) {
        assert_eq!(reserialize::<ByteStack<8>>(input).unwrap(), expected);
    }

    #[test]
    fn every_encoding_tracks_nesting() {
        let input = br#"[{"a":[[{"b":[]}]]},[[[]]]]"#;
        let expected = reserialize::<ByteStack<8>>(input).unwrap();
        assert_eq!(reserialize::<BitStack<1>>(input).unwrap(), expected);
        assert_eq!(reserialize::<WordStack>(input).unwrap(), expected);
        assert_eq!(reserialize::<RunLengthStack<8>>(input).unwrap(), expected);
    }

    #[rstest]
    #[case::unclosed(b"[[1]", ReserializeError::Unclosed(1))]
    #[case::mismatched(b"[}", ReserializeError::Mismatched(1))]
    #[case::overflow(b"[[[", ReserializeError::Overflow(2))]
    fn structural_problems(#[case] input: &[u8], #[case] expected: ReserializeError) {
        assert_eq!(reserialize::<ByteStack<2>>(input), Err(expected));
    }
}
