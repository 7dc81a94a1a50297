//! An allocation-free, event-driven JSON scanner.
//!
//! [`Parser`] walks a byte buffer once and reports what it sees to a
//! [`Handler`]: containers opening and closing, object keys, and scalar
//! values or array items as zero-copy [literal views](Literal). No tree is
//! built and nothing is decoded; strings keep their escapes and numbers are
//! raw spans.
//!
//! Nesting is tracked in a fixed-size [`StateStack`] sized by the parser's
//! `MAX_DEPTH` parameter. The [`stack`] module also carries other encodings
//! of a bounded nesting stack behind the [`NestingStack`] trait.
//!
//! ```
//! use jsonsax::{Control, Handler, Literal, Parser};
//!
//! struct Sum(f64);
//!
//! impl<'src> Handler<'src> for Sum {
//!     fn on_array(&mut self, item: Literal<'src>, _: &mut Control) {
//!         if let Literal::Number(n) = item {
//!             self.0 += n.to_str().unwrap().parse::<f64>().unwrap();
//!         }
//!     }
//! }
//!
//! let mut sum = Sum(0.0);
//! Parser::<4>::new().parse(b"[1, 2.5, -3]", &mut sum);
//! assert_eq!(sum.0, 0.5);
//! ```
//!
//! # Features
//!
//! - `record` (default): [`Recorder`], a handler that keeps an owned log of
//!   events.
//! - `reserialize` (default): [`Reserializer`], a handler that writes the
//!   events back out as compact JSON.
//! - `serde`: `Serialize` for errors and recorded events.

#![no_std]
extern crate alloc;

#[cfg(any(test, trace_scanner))]
extern crate std;

/// Prints a scan trace line when built with `--cfg trace_scanner`.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(trace_scanner)]
        std::eprintln!($($arg)*);
    };
}
pub(crate) use trace;

mod dispatch;
mod error;
mod handler;
mod literal;
mod scanner;
pub mod stack;

#[cfg(feature = "record")]
mod event;
#[cfg(feature = "reserialize")]
mod reserialize;


/// Nesting storage, in bytes, of a [`Parser`] without an explicit depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;

pub use error::{Error, ErrorKind};
#[cfg(feature = "record")]
pub use event::{Event, Recorder, Scalar};
pub use handler::{Control, Handler, Ignore};
pub use literal::{BoolLiteral, Literal, NullLiteral, NumericLiteral, StringLiteral};
#[cfg(feature = "reserialize")]
pub use reserialize::{ReserializeError, Reserializer};
pub use scanner::Parser;
pub use stack::{Container, NestingStack, Overflow, ParseState, StateStack};

#[cfg(feature = "fuzzing")]
#[doc(hidden)]
pub mod fuzzing {
    //! Internals exposed to the fuzz targets.
    pub use crate::scanner::find_closing;
}
