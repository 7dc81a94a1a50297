//! The byte-level driver.
//!
//! [`Parser::parse`] walks the input once, left to right, with no lookbehind
//! beyond the backslash run before a quote. Each structural byte mutates the
//! [`StateStack`] and each literal goes through the dispatcher to the
//! handler. Nothing is allocated and nothing is buffered: the scan keeps a
//! cursor, an end offset and the stack.
//!
//! Whether a check runs is decided at compile time by
//! [`Handler::VALIDATE`]. The unchecked path trusts its input and never
//! reports, but it still cannot leave the stack's bounds: pushes onto a full
//! stack and pops of the sentinel are dropped.

use core::ffi::CStr;

use crate::{
    DEFAULT_MAX_DEPTH,
    dispatch::{self, Transition},
    error::{Error, ErrorKind},
    handler::{Control, Handler},
    literal::{Keyword, NumericLiteral, StringLiteral},
    stack::{Container, ParseState, StateStack},
    trace,
};

/// A reusable scanner with room for a fixed nesting depth.
///
/// The parser owns nothing but its stack, which is reset by every call to
/// [`parse`](Parser::parse). See [`StateStack`] for how `MAX_DEPTH` maps to
/// the number of open containers.
#[derive(Debug, Clone, Default)]
pub struct Parser<const MAX_DEPTH: usize = DEFAULT_MAX_DEPTH> {
    stack: StateStack<MAX_DEPTH>,
}

impl<const MAX_DEPTH: usize> Parser<MAX_DEPTH> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `input`, reporting events to `handler`.
    ///
    /// The input ends at its first NUL byte or at the end of the slice,
    /// whichever comes first. Literal spans handed to the handler borrow
    /// from `input`.
    pub fn parse<'src, H: Handler<'src>>(&mut self, input: &'src [u8], handler: &mut H) {
        self.stack.reset();
        let end = memchr::memchr(0, input).unwrap_or(input.len());
        trace!("scan: {} bytes", end);
        Scan {
            input,
            stack: &mut self.stack,
            handler,
            ctl: Control::new(end),
            overflow: 0,
        }
        .run();
    }

    /// Scans a NUL-terminated string.
    pub fn parse_cstr<'src, H: Handler<'src>>(&mut self, input: &'src CStr, handler: &mut H) {
        self.parse(input.to_bytes(), handler);
    }

    /// Frames left on the stack by the last scan, the sentinel included. A
    /// well-formed document leaves exactly one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// State of one `parse` call.
struct Scan<'p, 'src, H, const MAX_DEPTH: usize> {
    input: &'src [u8],
    stack: &'p mut StateStack<MAX_DEPTH>,
    handler: &'p mut H,
    ctl: Control,
    /// Containers opened on a full stack. Their closes are matched against
    /// this count before the stack is popped. Nothing is tracked for an
    /// overflowed container, so its children are routed by the innermost
    /// frame that did fit: members of an object opened inside a full array
    /// arrive as array items.
    overflow: usize,
}

#[inline]
fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Bytes that may follow a keyword or a number.
#[inline]
fn is_separator(byte: u8) -> bool {
    is_blank(byte) || matches!(byte, b'}' | b']' | b',')
}

#[inline]
fn is_number_tail(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'.' | b'e')
}

/// Offset of the quote closing a string whose payload starts at `body`.
///
/// A delimiter preceded by an odd run of backslashes is escaped. The run is
/// counted back to `body` at most, so the opening quote is never part of it.
pub fn find_closing(input: &[u8], body: usize, end: usize, quote: u8) -> Option<usize> {
    let mut from = body;
    while let Some(i) = memchr::memchr(quote, &input[from..end]) {
        let at = from + i;
        let backslashes = input[body..at].iter().rev().take_while(|&&b| b == b'\\').count();
        if backslashes % 2 == 0 {
            return Some(at);
        }
        from = at + 1;
    }
    None
}

impl<'src, H: Handler<'src>, const MAX_DEPTH: usize> Scan<'_, 'src, H, MAX_DEPTH> {
    fn run(&mut self) {
        loop {
            self.skip_blanks();
            if self.ctl.pos >= self.ctl.end {
                break;
            }
            let byte = self.input[self.ctl.pos];
            trace!("{:>6} {:?} in {:?}", self.ctl.pos, char::from(byte), self.stack.top());
            match byte {
                b'{' => self.open(Container::Object),
                b'[' => self.open(Container::Array),
                b'}' => self.close(Container::Object),
                b']' => self.close(Container::Array),
                b',' => self.comma(),
                b':' => self.ctl.pos += 1,
                b'"' | b'\'' => self.string(byte),
                b'n' | b't' | b'f' => self.keyword(byte),
                b'-' | b'0'..=b'9' => self.number(),
                _ => {
                    if H::VALIDATE {
                        self.error(self.ctl.pos, ErrorKind::Unspecified);
                    }
                    self.ctl.pos += 1;
                }
            }
        }

        if H::VALIDATE && !self.ctl.terminated && (self.overflow > 0 || !self.stack.is_empty()) {
            self.error(self.ctl.end, ErrorKind::Malformed);
        }
        trace!("done with {} frames", self.stack.len());
    }

    #[inline]
    fn skip_blanks(&mut self) {
        while self.ctl.pos < self.ctl.end && is_blank(self.input[self.ctl.pos]) {
            self.ctl.pos += 1;
        }
    }

    /// Reports `kind` at `offset`. The cursor is moved to `offset` for the
    /// duration of the callback so a termination truncates there.
    fn error(&mut self, offset: usize, kind: ErrorKind) {
        trace!("error: {:?} at {}", kind, offset);
        let resume = self.ctl.pos;
        self.ctl.pos = offset;
        self.handler.on_error(Error::new(offset, kind), &mut self.ctl);
        self.ctl.pos = resume;
    }

    fn open(&mut self, container: Container) {
        let start = self.ctl.pos;
        let state = match container {
            Container::Object => {
                self.handler.on_new_object(&mut self.ctl);
                ParseState::ObjectKey
            }
            Container::Array => {
                self.handler.on_new_array(&mut self.ctl);
                ParseState::ArrayItem
            }
        };
        if self.stack.top() == ParseState::ObjectValue {
            // The container is the member's value: the value frame becomes
            // the container's frame.
            self.stack.replace_top(state);
        } else if self.stack.try_push(state).is_err() {
            self.overflow += 1;
            if H::VALIDATE {
                self.error(start, ErrorKind::TooDeep);
            }
        }
        self.ctl.pos = start + 1;
    }

    fn close(&mut self, container: Container) {
        let start = self.ctl.pos;
        if H::VALIDATE && self.overflow == 0 && self.stack.is_empty() {
            self.error(start, ErrorKind::Malformed);
        } else {
            match container {
                Container::Object => self.handler.on_object_end(&mut self.ctl),
                Container::Array => self.handler.on_array_end(&mut self.ctl),
            }
            if self.overflow > 0 {
                self.overflow -= 1;
            } else {
                self.stack.pop_saturating();
            }
        }
        self.ctl.pos = start + 1;
    }

    fn comma(&mut self) {
        if H::VALIDATE && self.stack.is_empty() {
            self.error(self.ctl.pos, ErrorKind::Malformed);
        }
        self.ctl.pos += 1;
    }

    fn string(&mut self, quote: u8) {
        let start = self.ctl.pos;
        let body = start + 1;
        let Some(close) = find_closing(self.input, body, self.ctl.end, quote) else {
            if H::VALIDATE {
                self.error(start, ErrorKind::Malformed);
            }
            self.ctl.pos = self.ctl.end;
            return;
        };
        let literal = StringLiteral::new(&self.input[body..close]);
        let transition =
            dispatch::literal(self.handler, self.stack.top(), literal.into(), &mut self.ctl);
        self.apply(transition, start);
        self.ctl.pos = close + 1;
    }

    fn keyword(&mut self, lead: u8) {
        let start = self.ctl.pos;
        let Some(keyword) = Keyword::from_lead(lead) else {
            return self.number();
        };
        let text = keyword.text();
        let after = start + text.len();
        let matched = self.input[start..self.ctl.end].starts_with(text)
            && after < self.ctl.end
            && is_separator(self.input[after]);

        if matched {
            let transition =
                dispatch::literal(self.handler, self.stack.top(), keyword.literal(), &mut self.ctl);
            self.apply(transition, start);
            self.ctl.pos = after;
        } else if H::VALIDATE {
            self.error(start, ErrorKind::UnexpectedCharacter);
            self.reject(start);
        } else {
            self.number();
        }
    }

    fn number(&mut self) {
        let start = self.ctl.pos;
        let mut end = start + 1;
        while end < self.ctl.end && is_number_tail(self.input[end]) {
            end += 1;
        }
        if H::VALIDATE && !(end < self.ctl.end && is_separator(self.input[end])) {
            self.error(end, ErrorKind::UnexpectedCharacter);
            self.reject(end);
            return;
        }
        let literal = NumericLiteral::new(&self.input[start..end]);
        let transition =
            dispatch::literal(self.handler, self.stack.top(), literal.into(), &mut self.ctl);
        self.apply(transition, start);
        self.ctl.pos = end;
    }

    /// Skips a rejected literal up to the next separator. It is not
    /// delivered, but a value slot it occupied is still closed.
    fn reject(&mut self, from: usize) {
        let mut pos = from;
        while pos < self.ctl.end && !is_separator(self.input[pos]) {
            pos += 1;
        }
        self.apply(dispatch::skipped(self.stack.top()), from);
        self.ctl.pos = pos;
    }

    #[inline]
    fn apply(&mut self, transition: Transition, offset: usize) {
        match transition {
            Transition::Stay => {}
            // A key on a full stack leaves the object expecting a key, so its
            // value is orphaned rather than tracked as overflow.
            Transition::Push(state) => {
                if H::VALIDATE {
                    if self.stack.try_push(state).is_err() {
                        self.error(offset, ErrorKind::TooDeep);
                    }
                } else {
                    self.stack.push_saturating(state);
                }
            }
            Transition::Pop => self.stack.pop_saturating(),
            Transition::Orphan => {
                if H::VALIDATE {
                    self.error(offset, ErrorKind::Malformed);
                }
            }
        }
    }
}
