//! A calculator session: one live formula plus its history tape.
//!
//! The session is the orchestration layer a front end talks to. It routes
//! keystrokes into the formula automaton, evaluates the live preview with
//! the last answer in scope, and commits finished calculations to history.

use tapecalc_core::{evaluate, BinaryOp, EvalContext, Formula, Fragment, Symbol, UnaryOp};
use tapecalc_store::{History, HistoryEntry, KeyValueStore, MemoryStore, Result};

use crate::format::format_number;

/// One user's calculator: the live formula and the bounded history behind it.
///
/// Single-threaded and synchronous: each keystroke is fully processed before
/// the next is accepted.
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    formula: Formula,
    history: History<S>,
}

impl Session<MemoryStore> {
    /// A session with a fresh volatile history.
    pub fn in_memory() -> Self {
        Session::new(History::in_memory())
    }
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(history: History<S>) -> Self {
        Session {
            formula: Formula::new(),
            history,
        }
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn history(&self) -> &History<S> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History<S> {
        &mut self.history
    }

    // === Keystrokes ===
    //
    // Each returns true when the formula changed; a rejected keystroke is a
    // silent no-op.

    pub fn press_digit(&mut self, digit: char) -> bool {
        self.formula.push_digit(digit)
    }

    pub fn press_binary(&mut self, op: BinaryOp) -> bool {
        self.formula.push_binary(op)
    }

    pub fn press_unary(&mut self, op: UnaryOp) -> bool {
        self.formula.push_unary(op)
    }

    pub fn press_ans(&mut self) -> bool {
        self.formula.push_symbol(Symbol::Ans)
    }

    pub fn press_open(&mut self) -> bool {
        self.formula.push_open()
    }

    pub fn press_close(&mut self) -> bool {
        self.formula.push_close()
    }

    pub fn press_backspace(&mut self) -> bool {
        self.formula.backspace()
    }

    /// All-clear: empty the live formula. History is untouched.
    pub fn press_clear(&mut self) {
        self.formula.clear();
    }

    /// Press equals: finalize the formula, commit `(snapshot, answer)` to
    /// history, and return the answer. `Ok(None)` when there was nothing to
    /// finalize.
    pub fn press_eq(&mut self) -> Result<Option<f64>> {
        if !self.formula.push_eq() {
            return Ok(None);
        }
        let answer = evaluate(self.formula.preview_window(), &self.context());
        let id = self.history.push(self.formula.tokens(), answer)?;
        log::debug!("committed calculation {id}: {} {answer}", self.formula);
        Ok(Some(answer))
    }

    /// The value currently shown on the display: the evaluation of the live
    /// preview window.
    pub fn preview(&self) -> f64 {
        evaluate(self.formula.preview_window(), &self.context())
    }

    /// [`preview`](Session::preview), formatted for the display.
    pub fn preview_text(&self) -> String {
        format_number(self.preview())
    }

    /// The live formula as markup fragments.
    pub fn display(&self) -> Vec<Fragment> {
        self.formula.fragments()
    }

    /// Recalled history entries, oldest first.
    pub fn tape(&self) -> Vec<HistoryEntry> {
        self.history.entries()
    }

    /// Replace the live formula with a stored calculation. Returns `false`
    /// for unknown IDs.
    pub fn recall(&mut self, id: u64) -> Result<bool> {
        match self.history.get(id)? {
            Some(entry) => {
                self.formula = Formula::from_tokens(entry.tokens);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn context(&self) -> EvalContext {
        EvalContext::new(self.history.last_answer())
    }
}
