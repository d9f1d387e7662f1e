//! # tapecalc
//!
//! An incremental expression editor and evaluator for calculator front ends.
//!
//! Tapecalc maintains a sequence of typed tokens representing a partially- or
//! fully-entered arithmetic formula. It accepts one editing action at a time
//! (digit, operator, parenthesis, Ans, backspace, equals) and after each
//! action can produce the live rendering of the formula and the value of its
//! evaluable tail. Completed calculations land on a bounded history tape.
//!
//! ## Example
//!
//! ```rust
//! use tapecalc::prelude::*;
//!
//! let mut session = Session::in_memory();
//! session.press_digit('2');
//! session.press_binary(BinaryOp::Add);
//! session.press_digit('3');
//! session.press_binary(BinaryOp::Mul);
//! session.press_digit('4');
//!
//! assert_eq!(session.formula().to_string(), "2+3×4");
//! assert_eq!(session.press_eq().unwrap(), Some(14.0));
//! assert_eq!(session.history().len(), 1);
//! ```
//!
//! The engine itself lives in [`tapecalc_core`]; persistence in
//! [`tapecalc_store`]. This crate re-exports both and adds the
//! [`Session`] orchestration plus display formatting.

pub mod format;
pub mod prelude;
pub mod session;

pub use format::format_number;
pub use session::Session;

// Re-export engine types
pub use tapecalc_core::{
    evaluate, to_postfix, BinaryOp, Directive, EvalContext, Formula, Fragment, FragmentClass,
    Number, Precedence, Symbol, Token, UnaryOp,
};

// Re-export persistence types
pub use tapecalc_store::{
    FileStore, History, HistoryEntry, KeyValueStore, MemoryStore, DEFAULT_CAPACITY,
};
