#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use jsonsax::{Parser, Recorder, Reserializer, StateStack, fuzzing::find_closing};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

/// A document in the subset of JSON the scanner reads without loss:
/// numbers never carry an exponent and the root is always a container.
#[derive(Debug)]
struct ArbitraryValue(Value);

fn number(u: &mut Unstructured<'_>) -> arbitrary::Result<serde_json::Number> {
    let n: i32 = u.arbitrary()?;
    Ok(if u.arbitrary()? {
        serde_json::Number::from(n)
    } else {
        serde_json::Number::from_f64(f64::from(n) + 0.5).ok_or(arbitrary::Error::IncorrectFormat)?
    })
}

fn value(u: &mut Unstructured<'_>, depth: usize) -> arbitrary::Result<Value> {
    let kinds = if depth == 0 { 4 } else { 6 };
    Ok(match u.choose_index(kinds)? {
        0 => Value::Null,
        1 => Value::Bool(u.arbitrary()?),
        2 => Value::Number(number(u)?),
        3 => Value::String(u.arbitrary()?),
        4 => container(u, depth, false)?,
        _ => container(u, depth, true)?,
    })
}

fn container(u: &mut Unstructured<'_>, depth: usize, object: bool) -> arbitrary::Result<Value> {
    let len = u.choose_index(6)?;
    Ok(if object {
        let mut map = Map::new();
        for _ in 0..len {
            map.insert(u.arbitrary()?, value(u, depth - 1)?);
        }
        Value::Object(map)
    } else {
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(value(u, depth - 1)?);
        }
        Value::Array(items)
    })
}

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let object = u.arbitrary()?;
        Ok(ArbitraryValue(container(u, 6, object)?))
    }
}

/// Any bytes: neither mode may panic or leave the stack's bounds.
fn raw(data: &[u8]) {
    let mut parser = Parser::<2>::new();
    parser.parse(data, &mut Recorder::validating());
    assert!(parser.depth() <= StateStack::<2>::CAPACITY + 1);
    parser.parse(data, &mut Recorder::new());
    assert!(parser.depth() <= StateStack::<2>::CAPACITY + 1);

    if let Some((&quote, rest)) = data.split_first() {
        if let Some(close) = find_closing(data, 1, data.len(), quote) {
            assert_eq!(data[close], quote);
            let run = rest[..close - 1].iter().rev().take_while(|&&b| b == b'\\').count();
            assert_eq!(run % 2, 0);
        }
    }
}

/// Well-formed documents: clean validation and a byte-exact round trip.
fn structured(data: &[u8]) {
    let Ok(ArbitraryValue(value)) = ArbitraryValue::arbitrary(&mut Unstructured::new(data)) else {
        return;
    };
    let text = serde_json::to_string(&value).expect("serializable value");

    let mut parser = Parser::<8>::new();
    let mut recorder = Recorder::validating();
    parser.parse(text.as_bytes(), &mut recorder);
    assert_eq!(recorder.errors().count(), 0, "{text}\n{}", recorder.render());

    let mut out: Reserializer = Reserializer::new();
    parser.parse(text.as_bytes(), &mut out);
    assert_eq!(out.finish().expect("balanced"), text.as_str());
}

fuzz_target!(|data: &[u8]| {
    match data.split_first() {
        Some((flags, rest)) if flags & 1 == 0 => raw(rest),
        Some((_, rest)) => structured(rest),
        None => {}
    }
});
