use super::concept::Concept;
use super::engine::{EngineError, EngineStats, RetentionEngine, Revision};
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe handle to a single engine instance.
///
/// Mutations hold the write lock for their whole run, so a revision's
/// neighbour scan or a full decay pass never interleaves with another
/// writer. Queries share the read lock and see a consistent snapshot.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<RetentionEngine>>,
}

impl SharedEngine {
    pub fn new(engine: RetentionEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Runs `f` under the read lock
    pub fn read<R>(&self, f: impl FnOnce(&RetentionEngine) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` under the write lock
    pub fn write<R>(&self, f: impl FnOnce(&mut RetentionEngine) -> R) -> R {
        f(&mut self.inner.write())
    }

    pub fn insert_concept(
        &self,
        name: &str,
        id: &str,
        category: &str,
        initial_weight: f64,
        prerequisites: Vec<String>,
    ) -> Result<(), EngineError> {
        self.inner
            .write()
            .insert_concept(name, id, category, initial_weight, prerequisites)
    }

    pub fn advance_time(&self, days: u32) -> Result<(), EngineError> {
        self.inner.write().advance_time(days)
    }

    pub fn revise_concept(&self, id: &str) -> Result<Revision, EngineError> {
        self.inner.write().revise_concept(id)
    }

    /// Changes lambda and refreshes strengths in one critical section
    pub fn set_decay_rate(&self, rate: f64) -> Result<(), EngineError> {
        let mut engine = self.inner.write();
        engine.set_decay_rate(rate)?;
        engine.refresh_strengths();
        Ok(())
    }

    pub fn next_recommendation(&self) -> Option<String> {
        self.inner.read().next_recommendation().map(str::to_string)
    }

    pub fn top_recommendations(&self, count: usize) -> Vec<String> {
        self.inner.read().top_recommendations(count)
    }

    pub fn concept(&self, id: &str) -> Option<Concept> {
        self.inner.read().concept(id).cloned()
    }

    pub fn stats(&self) -> EngineStats {
        self.inner.read().stats()
    }

    /// Consumes the handle, returning the engine if no other clone is alive
    pub fn into_inner(self) -> Result<RetentionEngine, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<RetentionEngine> for SharedEngine {
    fn from(engine: RetentionEngine) -> Self {
        Self::new(engine)
    }
}
