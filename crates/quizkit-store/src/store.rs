//! The performance store: availability probing, loading, and write-through
//! recording of graded results.

use chrono::Utc;

use crate::backend::KeyValueStore;
use crate::entry::{Ledger, PerformanceEntry};

/// Namespaced, versioned key the full ledger is persisted under.
pub const STORAGE_KEY: &str = "quizkit.performance.v1";

/// Throwaway key written and removed to probe backend availability.
const PROBE_KEY: &str = "quizkit.storage.probe";

/// Best-effort durable ledger of per-question attempt history.
///
/// All operations are infallible from the caller's point of view: if the
/// backend is unavailable at startup, or a write fails later, the store keeps
/// working against its in-memory ledger for the remainder of the process and
/// simply stops persisting.
pub struct PerformanceStore {
    backend: Box<dyn KeyValueStore>,
    ledger: Ledger,
    available: bool,
}

impl PerformanceStore {
    /// Open the store over `backend`, probing availability and loading any
    /// previously persisted ledger.
    ///
    /// Malformed persisted data is discarded wholesale and replaced with an
    /// empty ledger. That is silent recovery, not an error.
    pub fn new(mut backend: Box<dyn KeyValueStore>) -> Self {
        let available = probe(backend.as_mut());
        if !available {
            tracing::warn!("storage backend unavailable, performance history will not persist");
        }

        let ledger = if available {
            load(backend.as_ref())
        } else {
            Ledger::default()
        };

        Self {
            backend,
            ledger,
            available,
        }
    }

    /// A store with no durable backing at all. Useful for hosts that opt out
    /// of persistence and for tests.
    pub fn ephemeral() -> Self {
        Self {
            backend: Box::new(crate::backend::MemoryStore::new()),
            ledger: Ledger::default(),
            available: false,
        }
    }

    /// Whether recorded results are currently being persisted.
    pub fn is_persistent(&self) -> bool {
        self.available
    }

    /// The attempt history for `question_id`, if any has been recorded.
    pub fn get(&self, question_id: &str) -> Option<&PerformanceEntry> {
        self.ledger.questions.get(question_id)
    }

    /// Record one graded result for `question_id` and persist the ledger.
    ///
    /// Creates the entry on first grading. The full ledger is written through
    /// after every call; there is no batching and no partial persist.
    pub fn record(&mut self, question_id: &str, is_correct: bool) {
        let updated = PerformanceEntry::updated(
            self.ledger.questions.get(question_id),
            is_correct,
            Utc::now(),
        );
        tracing::debug!(
            question = question_id,
            correct = is_correct,
            attempts = updated.attempts,
            streak = updated.streak,
            "recorded result"
        );
        self.ledger
            .questions
            .insert(question_id.to_string(), updated);
        self.persist();
    }

    /// Whether `question_id` deserves a weak-question hint.
    ///
    /// Always false with fewer than 2 recorded attempts; see
    /// [`PerformanceEntry::is_weak`] for the rule.
    pub fn is_weak(&self, question_id: &str) -> bool {
        self.get(question_id).is_some_and(PerformanceEntry::is_weak)
    }

    /// Drop the entire ledger, in memory and in the backend.
    pub fn clear(&mut self) {
        self.ledger = Ledger::default();
        self.persist();
    }

    fn persist(&mut self) {
        if !self.available {
            return;
        }
        let json = match serde_json::to_string(&self.ledger) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("failed to serialize performance ledger: {e}");
                return;
            }
        };
        if let Err(e) = self.backend.set(STORAGE_KEY, &json) {
            tracing::warn!("storage write failed, dropping to in-memory only: {e}");
            self.available = false;
        }
    }
}

/// Check that the backend accepts writes by storing and removing a probe key.
fn probe(backend: &mut dyn KeyValueStore) -> bool {
    backend.set(PROBE_KEY, "1").is_ok() && backend.remove(PROBE_KEY).is_ok()
}

/// Load the persisted ledger, falling back to empty on any failure.
fn load(backend: &dyn KeyValueStore) -> Ledger {
    let raw = match backend.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ledger::default(),
        Err(e) => {
            tracing::warn!("failed to read performance ledger: {e}");
            return Ledger::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(ledger) => ledger,
        Err(e) => {
            tracing::warn!("discarding malformed performance ledger: {e}");
            Ledger::default()
        }
    }
}
