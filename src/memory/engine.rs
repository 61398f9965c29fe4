use super::concept::Concept;
use super::heap::{HeapError, RevisionHeap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Concept not found: {0}")]
    ConceptNotFound(String),
    #[error("Concept already exists: {0}")]
    DuplicateConcept(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Revision queue is empty")]
    EmptyQueue,
}

impl From<HeapError> for EngineError {
    fn from(err: HeapError) -> Self {
        match err {
            HeapError::EmptyQueue => EngineError::EmptyQueue,
        }
    }
}

/// Tunable constants for the retention model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Exponential decay constant (lambda, per simulated day)
    pub decay_rate: f64,
    /// Strength added to a concept when it is revised
    pub revision_boost: f64,
    /// Strength added to each direct prerequisite-graph neighbour
    pub neighbor_boost: f64,
    /// Concepts below this strength count as urgent
    pub urgent_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decay_rate: 0.15,
            revision_boost: 0.4,
            neighbor_boost: 0.1,
            urgent_threshold: 0.3,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        check_non_negative("decay_rate", self.decay_rate)?;
        check_non_negative("revision_boost", self.revision_boost)?;
        check_non_negative("neighbor_boost", self.neighbor_boost)?;
        check_non_negative("urgent_threshold", self.urgent_threshold)?;
        Ok(())
    }
}

fn check_non_negative(what: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidArgument(format!(
            "{what} must be a finite non-negative number, got {value}"
        )))
    }
}

/// Result of a single revision, including propagated boosts
#[derive(Debug, Clone, PartialEq)]
pub struct Revision {
    pub concept_id: String,
    pub previous_strength: f64,
    pub strength: f64,
    /// `(neighbour id, new strength)` sorted by id
    pub boosted_neighbors: Vec<(String, f64)>,
}

/// Owns every concept and the revision queue for one learner session.
///
/// The engine performs no I/O and is not internally synchronized; wrap it in
/// [`SharedEngine`](super::shared::SharedEngine) when several callers need it.
#[derive(Debug, Clone)]
pub struct RetentionEngine {
    concepts: HashMap<String, Concept>,
    adjacency: HashMap<String, Vec<String>>, // id -> prerequisite ids
    queue: RevisionHeap,
    current_day: u32,
    config: EngineConfig,
    total_revisions: u64,
}

impl RetentionEngine {
    /// Creates an engine with default tuning and the given decay rate
    pub fn new(decay_rate: f64) -> Result<Self, EngineError> {
        Self::with_config(EngineConfig {
            decay_rate,
            ..EngineConfig::default()
        })
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            concepts: HashMap::new(),
            adjacency: HashMap::new(),
            queue: RevisionHeap::new(),
            current_day: 0,
            config,
            total_revisions: 0,
        })
    }

    /// Registers a new concept first seen today
    pub fn insert_concept(
        &mut self,
        name: impl Into<String>,
        id: impl Into<String>,
        category: impl Into<String>,
        initial_weight: f64,
        prerequisites: Vec<String>,
    ) -> Result<(), EngineError> {
        let id = id.into();
        if self.concepts.contains_key(&id) {
            return Err(EngineError::DuplicateConcept(id));
        }
        if !initial_weight.is_finite() || !(0.0..=1.0).contains(&initial_weight) {
            return Err(EngineError::InvalidArgument(format!(
                "initial weight must be within [0, 1], got {initial_weight}"
            )));
        }

        let dangling = prerequisites
            .iter()
            .filter(|p| !self.concepts.contains_key(p.as_str()))
            .count();
        let concept = Concept::new(
            id.clone(),
            name,
            category,
            initial_weight,
            self.current_day,
            prerequisites.clone(),
        );

        debug!(
            concept = %id,
            strength = concept.memory_strength(),
            prerequisites = prerequisites.len(),
            unresolved = dangling,
            "concept inserted"
        );
        self.queue.insert(id.clone(), concept.memory_strength());
        self.adjacency.insert(id.clone(), prerequisites);
        self.concepts.insert(id, concept);
        Ok(())
    }

    /// Moves the simulation clock forward and decays every concept
    pub fn advance_time(&mut self, days: u32) -> Result<(), EngineError> {
        let day = self.current_day.checked_add(days).ok_or_else(|| {
            EngineError::InvalidArgument(format!(
                "advancing {days} days from day {} overflows the clock",
                self.current_day
            ))
        })?;
        self.current_day = day;
        self.refresh_strengths();
        debug!(days, current_day = self.current_day, "simulation clock advanced");
        Ok(())
    }

    /// Recomputes all strengths for the current day and rebuilds the queue
    pub fn refresh_strengths(&mut self) {
        let (day, lambda) = (self.current_day, self.config.decay_rate);
        for concept in self.concepts.values_mut() {
            concept.refresh(day, lambda);
        }
        self.rebuild_queue();
    }

    fn rebuild_queue(&mut self) {
        self.queue.rebuild(
            self.concepts
                .iter()
                .map(|(id, c)| (id.clone(), c.memory_strength())),
        );
        debug_assert_eq!(self.queue.len(), self.concepts.len());
    }

    /// Revises `id` with the configured default boost
    pub fn revise_concept(&mut self, id: &str) -> Result<Revision, EngineError> {
        self.revise_concept_with(id, self.config.revision_boost)
    }

    /// Revises `id` and spreads a smaller boost to its direct neighbours in
    /// the prerequisite graph (either edge direction).
    pub fn revise_concept_with(&mut self, id: &str, boost: f64) -> Result<Revision, EngineError> {
        check_non_negative("boost", boost)?;
        let day = self.current_day;

        let target = self
            .concepts
            .get_mut(id)
            .ok_or_else(|| EngineError::ConceptNotFound(id.to_string()))?;
        let previous_strength = target.memory_strength();
        target.apply_revision(day, boost);
        let strength = target.memory_strength();
        self.queue.update_key(id, strength);

        let neighbors = self.neighbors_of(id);
        let mut boosted_neighbors = Vec::with_capacity(neighbors.len());
        for neighbor_id in neighbors {
            if let Some(neighbor) = self.concepts.get_mut(&neighbor_id) {
                neighbor.apply_neighbor_boost(day, self.config.neighbor_boost);
                let boosted = neighbor.memory_strength();
                self.queue.update_key(&neighbor_id, boosted);
                boosted_neighbors.push((neighbor_id, boosted));
            }
        }

        self.total_revisions += 1;
        debug!(
            concept = %id,
            previous_strength,
            strength,
            neighbors = boosted_neighbors.len(),
            "concept revised"
        );

        Ok(Revision {
            concept_id: id.to_string(),
            previous_strength,
            strength,
            boosted_neighbors,
        })
    }

    /// Existing concepts adjacent to `id`, excluding `id` itself, sorted.
    ///
    /// O(n * d) scan of the adjacency table; a reverse index would make this
    /// O(d) if concept counts grow large.
    fn neighbors_of(&self, id: &str) -> Vec<String> {
        let own = self.adjacency.get(id).map(Vec::as_slice).unwrap_or_default();
        let mut neighbors: Vec<String> = self
            .adjacency
            .iter()
            .filter(|(other, _)| other.as_str() != id)
            .filter(|(other, prereqs)| {
                prereqs.iter().any(|p| p == id) || own.iter().any(|p| p == *other)
            })
            .map(|(other, _)| other.clone())
            .collect();
        neighbors.sort();
        neighbors
    }

    /// Weakest concept, or `None` when nothing is tracked
    pub fn next_recommendation(&self) -> Option<&str> {
        self.queue.peek_min().ok()
    }

    /// Up to `count` ids, weakest first, ties broken by id
    pub fn top_recommendations(&self, count: usize) -> Vec<String> {
        self.ranked()
            .into_iter()
            .take(count)
            .map(|c| c.id().to_string())
            .collect()
    }

    /// Same order as [`top_recommendations`](Self::top_recommendations), full concepts
    pub fn revision_queue(&self, count: usize) -> Vec<&Concept> {
        let mut ranked = self.ranked();
        ranked.truncate(count);
        ranked
    }

    fn ranked(&self) -> Vec<&Concept> {
        let mut all: Vec<&Concept> = self.concepts.values().collect();
        all.sort_by(|a, b| {
            a.memory_strength()
                .total_cmp(&b.memory_strength())
                .then_with(|| a.id().cmp(b.id()))
        });
        all
    }

    /// Replaces lambda; strengths are refreshed only by a later
    /// [`refresh_strengths`](Self::refresh_strengths) or time advance
    pub fn set_decay_rate(&mut self, rate: f64) -> Result<(), EngineError> {
        check_non_negative("decay_rate", rate)?;
        debug!(old = self.config.decay_rate, new = rate, "decay rate changed");
        self.config.decay_rate = rate;
        Ok(())
    }

    /// Applies a metadata edit to one concept
    pub fn edit_concept<F>(&mut self, id: &str, edit: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut ConceptEditor<'_>),
    {
        let concept = self
            .concepts
            .get_mut(id)
            .ok_or_else(|| EngineError::ConceptNotFound(id.to_string()))?;
        edit(&mut ConceptEditor { concept });
        Ok(())
    }

    pub fn concept(&self, id: &str) -> Option<&Concept> {
        self.concepts.get(id)
    }

    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    pub fn average_memory_strength(&self) -> f64 {
        if self.concepts.is_empty() {
            return 0.0;
        }
        self.concepts
            .values()
            .map(Concept::memory_strength)
            .sum::<f64>()
            / self.concepts.len() as f64
    }

    pub fn urgent_count(&self) -> usize {
        self.concepts
            .values()
            .filter(|c| c.memory_strength() < self.config.urgent_threshold)
            .count()
    }

    pub fn total_concepts(&self) -> usize {
        self.concepts.len()
    }

    pub fn total_revisions(&self) -> u64 {
        self.total_revisions
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    pub fn decay_rate(&self) -> f64 {
        self.config.decay_rate
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns statistics about the current retention state
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            total_concepts: self.total_concepts(),
            average_strength: self.average_memory_strength(),
            urgent_count: self.urgent_count(),
            total_revisions: self.total_revisions,
            current_day: self.current_day,
        }
    }
}

impl Default for RetentionEngine {
    fn default() -> Self {
        Self {
            concepts: HashMap::new(),
            adjacency: HashMap::new(),
            queue: RevisionHeap::new(),
            current_day: 0,
            config: EngineConfig::default(),
            total_revisions: 0,
        }
    }
}

/// Restricted mutable view handed out by [`RetentionEngine::edit_concept`].
///
/// Only display metadata can change; decay state and edges stay engine-owned.
pub struct ConceptEditor<'a> {
    concept: &'a mut Concept,
}

impl ConceptEditor<'_> {
    pub fn rename(&mut self, name: impl Into<String>) {
        self.concept.rename(name);
    }

    pub fn recategorize(&mut self, category: impl Into<String>) {
        self.concept.recategorize(category);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStats {
    pub total_concepts: usize,
    pub average_strength: f64,
    pub urgent_count: usize,
    pub total_revisions: u64,
    pub current_day: u32,
}
