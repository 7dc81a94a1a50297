//! Zero-copy views of scalar literals.
//!
//! String and number literals are handed to the handler as spans of the
//! caller's input. Nothing is decoded: string spans still contain their
//! escape sequences, and number spans are the raw digits.

use core::{fmt, str::Utf8Error};

use bstr::BStr;

/// The bytes between a string's quotes, escapes untouched.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringLiteral<'src> {
    span: &'src [u8],
}

/// The raw text of a number: a leading `-` or digit followed by digits, `.`
/// and `e`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericLiteral<'src> {
    span: &'src [u8],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoolLiteral {
    pub value: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NullLiteral;

/// Any scalar literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Literal<'src> {
    String(StringLiteral<'src>),
    Number(NumericLiteral<'src>),
    Bool(BoolLiteral),
    Null(NullLiteral),
}

macro_rules! span_literal {
    ($ty:ident) => {
        impl<'src> $ty<'src> {
            #[inline]
            pub(crate) fn new(span: &'src [u8]) -> Self {
                Self { span }
            }

            /// The span inside the input buffer.
            #[inline]
            #[must_use]
            pub fn as_bytes(&self) -> &'src [u8] {
                self.span
            }

            #[inline]
            #[must_use]
            pub fn as_bstr(&self) -> &'src BStr {
                BStr::new(self.span)
            }

            /// The span as text.
            ///
            /// # Errors
            ///
            /// Fails when the span is not valid UTF-8; the scanner passes
            /// payload bytes through unchecked.
            #[inline]
            pub fn to_str(&self) -> Result<&'src str, Utf8Error> {
                core::str::from_utf8(self.span)
            }

            #[inline]
            #[must_use]
            pub fn len(&self) -> usize {
                self.span.len()
            }

            #[inline]
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.span.is_empty()
            }
        }

        impl fmt::Debug for $ty<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($ty)).field(&self.as_bstr()).finish()
            }
        }

        impl fmt::Display for $ty<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self.as_bstr(), f)
            }
        }
    };
}

span_literal!(StringLiteral);
span_literal!(NumericLiteral);

impl<'src> From<StringLiteral<'src>> for Literal<'src> {
    fn from(v: StringLiteral<'src>) -> Self {
        Literal::String(v)
    }
}

impl<'src> From<NumericLiteral<'src>> for Literal<'src> {
    fn from(v: NumericLiteral<'src>) -> Self {
        Literal::Number(v)
    }
}

impl From<BoolLiteral> for Literal<'_> {
    fn from(v: BoolLiteral) -> Self {
        Literal::Bool(v)
    }
}

impl From<NullLiteral> for Literal<'_> {
    fn from(v: NullLiteral) -> Self {
        Literal::Null(v)
    }
}

/// The three bare words the scanner recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    Null,
    True,
    False,
}

impl Keyword {
    #[inline]
    pub(crate) fn from_lead(byte: u8) -> Option<Self> {
        match byte {
            b'n' => Some(Keyword::Null),
            b't' => Some(Keyword::True),
            b'f' => Some(Keyword::False),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn text(self) -> &'static [u8] {
        match self {
            Keyword::Null => b"null",
            Keyword::True => b"true",
            Keyword::False => b"false",
        }
    }

    #[inline]
    pub(crate) fn literal(self) -> Literal<'static> {
        match self {
            Keyword::Null => Literal::Null(NullLiteral),
            Keyword::True => Literal::Bool(BoolLiteral { value: true }),
            Keyword::False => Literal::Bool(BoolLiteral { value: false }),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn debug_renders_bytes_as_text() {
        let s = StringLiteral::new(b"a\\c");
        assert_eq!(format!("{s:?}"), r#"StringLiteral("a\\c")"#);
        let n = NumericLiteral::new(b"-3");
        assert_eq!(format!("{n}"), "-3");
    }

    #[test]
    fn to_str_rejects_invalid_utf8() {
        assert!(StringLiteral::new(b"\xff").to_str().is_err());
        assert_eq!(StringLiteral::new("é".as_bytes()).to_str(), Ok("é"));
    }

    #[test]
    fn keywords_match_their_lead_byte() {
        for kw in [Keyword::Null, Keyword::True, Keyword::False] {
            assert_eq!(Keyword::from_lead(kw.text()[0]), Some(kw));
        }
        assert_eq!(Keyword::from_lead(b'x'), None);
    }
}
