//! Pulls one field out of a large document and stops reading as soon as it
//! has it.
//!
//! A handler that only needs the top-level `"status"` member tracks the
//! object depth itself, copies the value when it sees it, and terminates the
//! scan. Everything after the member is never looked at, so the cost does
//! not depend on how much of the document follows.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonsax --example first_key
//! ```

use jsonsax::{Control, Error, Handler, Literal, Parser, StringLiteral};

#[derive(Default)]
struct Status {
    depth: usize,
    want_value: bool,
    found: Option<String>,
    events: usize,
    error: Option<Error>,
}

impl<'src> Handler<'src> for Status {
    const VALIDATE: bool = true;

    fn on_new_object(&mut self, _: &mut Control) {
        self.depth += 1;
        self.events += 1;
    }

    fn on_new_array(&mut self, _: &mut Control) {
        self.depth += 1;
        self.events += 1;
    }

    fn on_object_end(&mut self, _: &mut Control) {
        self.depth -= 1;
        self.events += 1;
    }

    fn on_array_end(&mut self, _: &mut Control) {
        self.depth -= 1;
        self.events += 1;
    }

    fn on_key(&mut self, key: StringLiteral<'src>, _: &mut Control) {
        self.events += 1;
        self.want_value = self.depth == 1 && key.as_bytes() == b"status";
    }

    fn on_value(&mut self, value: Literal<'src>, ctl: &mut Control) {
        self.events += 1;
        if self.want_value {
            self.found = Some(match value {
                Literal::String(s) => s.to_string(),
                Literal::Number(n) => n.to_string(),
                Literal::Bool(b) => b.value.to_string(),
                Literal::Null(_) => "null".to_owned(),
            });
            ctl.terminate();
        }
    }

    fn on_array(&mut self, _: Literal<'src>, _: &mut Control) {
        self.events += 1;
    }

    fn on_error(&mut self, error: Error, ctl: &mut Control) {
        self.error = Some(error);
        ctl.terminate();
    }
}

fn main() {
    let mut document = String::from(r#"{"meta":{"status":"nested, ignored"},"status":"ready","rows":["#);
    for i in 0..100_000 {
        if i > 0 {
            document.push(',');
        }
        document.push_str(r#"{"id":1,"values":[1,2,3]}"#);
    }
    document.push_str("]}");

    let mut status = Status::default();
    Parser::<8>::new().parse(document.as_bytes(), &mut status);

    match (status.found, status.error) {
        (Some(found), _) => println!(
            "status = {found} after {} events ({} bytes unread)",
            status.events,
            document.len() - document.find(r#""ready""#).unwrap_or(0)
        ),
        (None, Some(error)) => eprintln!("invalid document: {error}"),
        (None, None) => eprintln!("no status member"),
    }
}
