//! Convenience re-exports for typical use.
//!
//! ```rust
//! use tapecalc::prelude::*;
//!
//! let mut session = Session::in_memory();
//! session.press_digit('7');
//! assert_eq!(session.preview(), 7.0);
//! ```

pub use crate::format::format_number;
pub use crate::session::Session;
pub use tapecalc_core::{
    evaluate, BinaryOp, EvalContext, Formula, Fragment, FragmentClass, Symbol, Token, UnaryOp,
};
pub use tapecalc_store::{FileStore, History, HistoryEntry, KeyValueStore, MemoryStore};
