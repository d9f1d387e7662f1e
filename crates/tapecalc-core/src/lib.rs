//! # tapecalc-core
//!
//! The calculator engine behind tapecalc: an incremental expression editor
//! and evaluator.
//!
//! A [`Formula`] owns an ordered sequence of typed [`Token`]s. Each editing
//! keystroke is routed to the last token, which answers with a directive the
//! formula applies to its sequence; after every edit the caller can render
//! the formula as markup fragments and evaluate the live-preview window.
//!
//! ## Example
//!
//! ```rust
//! use tapecalc_core::{evaluate, BinaryOp, EvalContext, Formula};
//!
//! let mut f = Formula::new();
//! f.push_digit('2');
//! f.push_binary(BinaryOp::Add);
//! f.push_digit('3');
//! f.push_binary(BinaryOp::Mul);
//! f.push_digit('4');
//! f.push_eq();
//!
//! assert_eq!(f.to_string(), "2+3×4=");
//! assert_eq!(evaluate(f.preview_window(), &EvalContext::default()), 14.0);
//! ```

pub mod codec;
pub mod error;
pub mod eval;
pub mod formula;
pub mod render;
pub mod token;

// Re-exports for convenience
pub use codec::{decode_token, decode_tokens, encode_token, encode_tokens};
pub use error::{Error, Result};
pub use eval::{evaluate, to_postfix, EvalContext};
pub use formula::Formula;
pub use render::{Fragment, FragmentClass};
pub use token::{BinaryOp, Directive, Number, Precedence, Symbol, Token, UnaryOp};
