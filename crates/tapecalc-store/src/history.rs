//! Bounded, insertion-ordered calculation history.
//!
//! Each committed calculation is stored as one record (the encoded formula
//! snapshot plus its numeric answer) under its own key, with the list of
//! live record IDs kept under a single well-known index key. The list is
//! capped; pushing past the cap evicts the oldest record.

use serde_json::{json, Value};
use tapecalc_core::codec::{decode_tokens, encode_tokens};
use tapecalc_core::Token;

use crate::error::{Error, Result};
use crate::kv::{KeyValueStore, MemoryStore};

/// How many calculations are kept before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 64;

const INDEX_KEY: &str = "tape.history.index";

fn record_key(id: u64) -> String {
    format!("tape.history.entry.{id}")
}

/// One recalled calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: u64,
    /// Deep copy of the committed formula, equals marker included.
    pub tokens: Vec<Token>,
    pub answer: f64,
}

/// The calculation tape: a bounded list of `(formula snapshot, answer)`
/// records behind a [`KeyValueStore`].
#[derive(Debug)]
pub struct History<S: KeyValueStore> {
    store: S,
    capacity: usize,
    ids: Vec<u64>,
}

impl History<MemoryStore> {
    /// A fresh volatile history with the default capacity.
    pub fn in_memory() -> Self {
        History {
            store: MemoryStore::new(),
            capacity: DEFAULT_CAPACITY,
            ids: Vec::new(),
        }
    }
}

impl<S: KeyValueStore> History<S> {
    /// Load history from a store with the default capacity.
    pub fn open(store: S) -> Result<Self> {
        Self::with_capacity(store, DEFAULT_CAPACITY)
    }

    /// Load history from a store, keeping at most `capacity` records.
    ///
    /// Records that are missing or fail to decode are dropped individually,
    /// with a warning, rather than failing the whole load. If the stored
    /// list is longer than `capacity`, the oldest records are evicted.
    pub fn with_capacity(store: S, capacity: usize) -> Result<Self> {
        let mut history = History {
            store,
            capacity,
            ids: Vec::new(),
        };
        history.load()?;
        Ok(history)
    }

    fn load(&mut self) -> Result<()> {
        let stored: Vec<u64> = match self.store.get(INDEX_KEY)? {
            Some(text) => serde_json::from_str(&text)?,
            None => Vec::new(),
        };

        let stored_len = stored.len();
        let mut kept = Vec::with_capacity(stored_len);
        for id in stored {
            match self.read_record(id) {
                Ok(Some(_)) => kept.push(id),
                Ok(None) => {
                    log::warn!("history record {id} is missing, dropping it");
                }
                Err(err) => {
                    log::warn!("history record {id} failed to decode ({err}), dropping it");
                    self.store.remove(&record_key(id))?;
                }
            }
        }

        let mut dirty = kept.len() != stored_len;
        self.ids = kept;
        while self.ids.len() > self.capacity {
            self.evict_oldest()?;
            dirty = true;
        }
        if dirty {
            self.write_index()?;
        }
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Live record IDs, oldest first.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// Commit a calculation. Returns the new record's ID.
    ///
    /// The snapshot is encoded (deep copy), so later edits to the live
    /// formula never reach stored history. Pushing past capacity evicts the
    /// oldest record first.
    pub fn push(&mut self, tokens: &[Token], answer: f64) -> Result<u64> {
        let id = self.ids.last().map_or(0, |last| last + 1);
        let record = json!([encode_tokens(tokens), answer]);
        self.store.set(&record_key(id), &record.to_string())?;
        self.ids.push(id);
        while self.ids.len() > self.capacity {
            self.evict_oldest()?;
        }
        self.write_index()?;
        Ok(id)
    }

    /// Fetch one record by ID.
    pub fn get(&self, id: u64) -> Result<Option<HistoryEntry>> {
        if !self.ids.contains(&id) {
            return Ok(None);
        }
        self.read_record(id)
    }

    /// Delete one record and its index slot. Returns `false` for unknown IDs.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        let Some(at) = self.ids.iter().position(|&i| i == id) else {
            return Ok(false);
        };
        self.store.remove(&record_key(id))?;
        self.ids.remove(at);
        self.write_index()?;
        Ok(true)
    }

    /// All live records, oldest first. A record that fails to read is
    /// skipped with a warning.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        let mut out = Vec::with_capacity(self.ids.len());
        for &id in &self.ids {
            match self.read_record(id) {
                Ok(Some(entry)) => out.push(entry),
                Ok(None) => log::warn!("history record {id} disappeared"),
                Err(err) => log::warn!("history record {id} failed to read: {err}"),
            }
        }
        out
    }

    /// The most recent committed answer, or zero when history is empty.
    pub fn last_answer(&self) -> f64 {
        for &id in self.ids.iter().rev() {
            match self.read_record(id) {
                Ok(Some(entry)) => return entry.answer,
                Ok(None) => {}
                Err(err) => log::warn!("history record {id} failed to read: {err}"),
            }
        }
        0.0
    }

    fn read_record(&self, id: u64) -> Result<Option<HistoryEntry>> {
        let Some(text) = self.store.get(&record_key(id))? else {
            return Ok(None);
        };
        let value: Value = serde_json::from_str(&text)?;
        let pair = value
            .as_array()
            .filter(|a| a.len() == 2)
            .ok_or_else(|| Error::CorruptRecord {
                id,
                detail: format!("expected [formula, answer], got: {value}"),
            })?;
        let tokens = decode_tokens(&pair[0])?;
        let answer = pair[1].as_f64().ok_or_else(|| Error::CorruptRecord {
            id,
            detail: format!("answer is not a number: {}", pair[1]),
        })?;
        Ok(Some(HistoryEntry { id, tokens, answer }))
    }

    fn evict_oldest(&mut self) -> Result<()> {
        let oldest = self.ids.remove(0);
        log::debug!("history at capacity, evicting record {oldest}");
        self.store.remove(&record_key(oldest))
    }

    fn write_index(&mut self) -> Result<()> {
        let text = serde_json::to_string(&self.ids)?;
        self.store.set(INDEX_KEY, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tapecalc_core::{BinaryOp, Formula};

    fn committed(a: char, op: BinaryOp, b: char) -> Formula {
        let mut f = Formula::new();
        f.push_digit(a);
        f.push_binary(op);
        f.push_digit(b);
        assert!(f.push_eq());
        f
    }

    #[test]
    fn test_push_and_get_round_trip() {
        let mut history = History::in_memory();
        let f = committed('2', BinaryOp::Add, '3');
        let id = history.push(f.tokens(), 5.0).unwrap();

        let entry = history.get(id).unwrap().unwrap();
        assert_eq!(entry.tokens, f.tokens());
        assert_eq!(entry.answer, 5.0);
        assert_eq!(history.last_answer(), 5.0);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut history = History::in_memory();
        let f = committed('1', BinaryOp::Add, '1');
        let a = history.push(f.tokens(), 2.0).unwrap();
        let b = history.push(f.tokens(), 2.0).unwrap();
        assert!(b > a);
        assert_eq!(history.ids(), &[a, b]);
    }

    #[test]
    fn test_eviction_drops_oldest_and_its_record() {
        let mut history = History::in_memory();
        let f = committed('1', BinaryOp::Add, '1');
        for i in 0..65 {
            history.push(f.tokens(), f64::from(i)).unwrap();
        }

        assert_eq!(history.len(), 64);
        assert_eq!(history.ids()[0], 1);
        assert_eq!(history.get(0).unwrap(), None);
        assert_eq!(history.last_answer(), 64.0);
    }

    #[test]
    fn test_custom_capacity() {
        let mut history = History::with_capacity(MemoryStore::new(), 2).unwrap();
        let f = committed('1', BinaryOp::Add, '1');
        history.push(f.tokens(), 2.0).unwrap();
        history.push(f.tokens(), 2.0).unwrap();
        history.push(f.tokens(), 2.0).unwrap();
        assert_eq!(history.ids(), &[1, 2]);
    }

    #[test]
    fn test_remove_updates_index_and_record() {
        let mut history = History::in_memory();
        let f = committed('4', BinaryOp::Mul, '2');
        let a = history.push(f.tokens(), 8.0).unwrap();
        let b = history.push(f.tokens(), 8.0).unwrap();

        assert!(history.remove(a).unwrap());
        assert!(!history.remove(a).unwrap());
        assert_eq!(history.ids(), &[b]);
        assert_eq!(history.get(a).unwrap(), None);
    }

    #[test]
    fn test_reload_from_same_store() {
        let mut store = MemoryStore::new();
        {
            let mut history = History::with_capacity(&mut store, 64).unwrap();
            let f = committed('2', BinaryOp::Pow, '5');
            history.push(f.tokens(), 32.0).unwrap();
        }

        let history = History::open(&mut store).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.last_answer(), 32.0);
    }

    #[test]
    fn test_load_drops_undecodable_record_only() {
        let mut store = MemoryStore::new();
        {
            let mut history = History::open(&mut store).unwrap();
            let f = committed('1', BinaryOp::Add, '2');
            history.push(f.tokens(), 3.0).unwrap();
            history.push(f.tokens(), 3.0).unwrap();
        }
        // Corrupt the first record with a tag no decoder knows.
        store
            .set("tape.history.entry.0", r#"[[["frac", "1/2"]], 0.5]"#)
            .unwrap();

        let history = History::open(&mut store).unwrap();
        assert_eq!(history.ids(), &[1]);
        assert_eq!(history.last_answer(), 3.0);
    }

    #[test]
    fn test_load_drops_missing_record() {
        let mut store = MemoryStore::new();
        {
            let mut history = History::open(&mut store).unwrap();
            let f = committed('1', BinaryOp::Add, '2');
            history.push(f.tokens(), 3.0).unwrap();
            history.push(f.tokens(), 3.0).unwrap();
        }
        store.remove("tape.history.entry.1").unwrap();

        let history = History::open(&mut store).unwrap();
        assert_eq!(history.ids(), &[0]);
    }

    #[test]
    fn test_empty_history_answers_zero() {
        let history = History::in_memory();
        assert_eq!(history.last_answer(), 0.0);
        assert!(history.is_empty());
        assert!(history.entries().is_empty());
    }
}
