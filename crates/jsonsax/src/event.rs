//! An owned log of scan events.
//!
//! [`Recorder`] is the handler to reach for when the events need to outlive
//! the input buffer, or when it is simpler to look at a whole scan at once
//! than to react to each callback.
//!
//! ```
//! use jsonsax::{Event, Parser, Recorder, Scalar};
//!
//! let mut recorder = Recorder::new();
//! Parser::<4>::new().parse(br#"{"a":"b"}"#, &mut recorder);
//! assert_eq!(
//!     recorder.into_events(),
//!     [
//!         Event::NewObject,
//!         Event::Key { text: "a".into() },
//!         Event::Value { value: Scalar::String("b".into()) },
//!         Event::ObjectEnd,
//!     ]
//! );
//! ```

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::{
    error::Error,
    handler::{Control, Handler},
    literal::{Literal, StringLiteral},
};

/// An owned copy of a scalar literal. Span text that is not valid UTF-8 is
/// replaced lossily.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    String(String),
    Number(String),
    Bool(bool),
    Null,
}

/// One handler callback.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    NewObject,
    NewArray,
    ObjectEnd,
    ArrayEnd,
    Key { text: String },
    /// A scalar member of an object.
    Value { value: Scalar },
    /// A scalar item of an array.
    Item { value: Scalar },
    Error { error: Error },
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl From<Literal<'_>> for Scalar {
    fn from(literal: Literal<'_>) -> Self {
        match literal {
            Literal::String(s) => Scalar::String(lossy(s.as_bytes())),
            Literal::Number(n) => Scalar::Number(lossy(n.as_bytes())),
            Literal::Bool(b) => Scalar::Bool(b.value),
            Literal::Null(_) => Scalar::Null,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "\"{s}\""),
            Scalar::Number(n) => f.write_str(n),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Null => f.write_str("null"),
        }
    }
}

/// One event per line in snapshots: brackets for containers, then
/// `key`, `value`, `item` or `error` followed by the payload.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::NewObject => f.write_str("{"),
            Event::NewArray => f.write_str("["),
            Event::ObjectEnd => f.write_str("}"),
            Event::ArrayEnd => f.write_str("]"),
            Event::Key { text } => write!(f, "key \"{text}\""),
            Event::Value { value } => write!(f, "value {value}"),
            Event::Item { value } => write!(f, "item {value}"),
            Event::Error { error } => write!(f, "error {error}"),
        }
    }
}

/// A handler that records every event it receives.
///
/// `Recorder<true>` also validates the input and records errors in line
/// with the other events.
#[derive(Debug, Clone, Default)]
pub struct Recorder<const V: bool = false> {
    events: Vec<Event>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that enables validation.
    #[must_use]
    pub fn validating() -> Recorder<true> {
        Recorder::default()
    }
}

impl<const V: bool> Recorder<V> {
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// The recorded errors, in order.
    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.events.iter().filter_map(|e| match e {
            Event::Error { error } => Some(error),
            _ => None,
        })
    }

    /// The log rendered one event per line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&event.to_string());
            out.push('\n');
        }
        out
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<'src, const V: bool> Handler<'src> for Recorder<V> {
    const VALIDATE: bool = V;

    fn on_new_object(&mut self, _: &mut Control) {
        self.events.push(Event::NewObject);
    }

    fn on_new_array(&mut self, _: &mut Control) {
        self.events.push(Event::NewArray);
    }

    fn on_object_end(&mut self, _: &mut Control) {
        self.events.push(Event::ObjectEnd);
    }

    fn on_array_end(&mut self, _: &mut Control) {
        self.events.push(Event::ArrayEnd);
    }

    fn on_key(&mut self, key: StringLiteral<'src>, _: &mut Control) {
        self.events.push(Event::Key {
            text: lossy(key.as_bytes()),
        });
    }

    fn on_value(&mut self, value: Literal<'src>, _: &mut Control) {
        self.events.push(Event::Value {
            value: value.into(),
        });
    }

    fn on_array(&mut self, item: Literal<'src>, _: &mut Control) {
        self.events.push(Event::Item { value: item.into() });
    }

    fn on_error(&mut self, error: Error, _: &mut Control) {
        self.events.push(Event::Error { error });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;

    #[test]
    fn records_numeric_items_in_order() {
        let mut recorder = Recorder::new();
        Parser::<4>::new().parse(b"[1,2.5,-3]", &mut recorder);
        insta::assert_snapshot!(recorder.render(), @r"
        [
        item 1
        item 2.5
        item -3
        ]
        ");
    }

    #[test]
    fn validating_recorder_logs_errors_in_line() {
        let mut recorder = Recorder::validating();
        Parser::<4>::new().parse(b"{}}", &mut recorder);
        insta::assert_snapshot!(recorder.render(), @r"
        {
        }
        error malformed structure at byte 2
        ");
        assert_eq!(recorder.errors().count(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_the_log_with_kind_tags() {
        let mut recorder = Recorder::validating();
        Parser::<4>::new().parse(b"[1,null]}", &mut recorder);
        insta::assert_snapshot!(
            serde_json::to_string(recorder.events()).unwrap(),
            @r#"[{"kind":"NewArray"},{"kind":"Item","value":{"Number":"1"}},{"kind":"Item","value":"Null"},{"kind":"ArrayEnd"},{"kind":"Error","error":{"offset":8,"kind":"Malformed"}}]"#
        );
    }

    #[test]
    fn non_utf8_text_is_replaced() {
        let mut recorder = Recorder::new();
        Parser::<4>::new().parse(b"[\"\xff\"]", &mut recorder);
        assert_eq!(
            recorder.events()[1],
            Event::Item {
                value: Scalar::String("\u{fffd}".into())
            }
        );
    }
}
