//! # tapecalc-store
//!
//! Persistence for the tapecalc calculator: a string key-value storage
//! boundary and the bounded calculation history kept behind it.
//!
//! History records use the token codec from [`tapecalc_core::codec`]; a
//! record that fails to decode is dropped on load without disturbing the
//! rest of the tape.
//!
//! ## Example
//!
//! ```rust
//! use tapecalc_core::{BinaryOp, Formula};
//! use tapecalc_store::History;
//!
//! let mut history = History::in_memory();
//!
//! let mut f = Formula::new();
//! f.push_digit('2');
//! f.push_binary(BinaryOp::Add);
//! f.push_digit('3');
//! f.push_eq();
//!
//! let id = history.push(f.tokens(), 5.0).unwrap();
//! assert_eq!(history.last_answer(), 5.0);
//! assert_eq!(history.get(id).unwrap().unwrap().answer, 5.0);
//! ```

pub mod error;
pub mod history;
pub mod kv;

pub use error::{Error, Result};
pub use history::{History, HistoryEntry, DEFAULT_CAPACITY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
