use serde::{Deserialize, Serialize};

/// Lowest strength a concept can decay to
pub const MIN_STRENGTH: f64 = 0.1;
/// Fully retained
pub const MAX_STRENGTH: f64 = 1.0;

/// Clamps a raw retention value into `[MIN_STRENGTH, MAX_STRENGTH]`
pub fn clamp_strength(value: f64) -> f64 {
    value.clamp(MIN_STRENGTH, MAX_STRENGTH)
}

/// A single learnable unit tracked by the retention engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    id: String,
    name: String,
    category: String,
    initial_weight: f64,   // Strength snapshot at the last revision
    memory_strength: f64,  // Current retention, 0.1..=1.0
    last_revised_day: u32, // Creation day until first revised
    prerequisites: Vec<String>,
}

impl Concept {
    /// Creates a concept first seen on `day`
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        initial_weight: f64,
        day: u32,
        prerequisites: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            initial_weight,
            memory_strength: clamp_strength(initial_weight),
            last_revised_day: day,
            prerequisites,
        }
    }

    // Getters
    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn category(&self) -> &str { &self.category }
    pub fn initial_weight(&self) -> f64 { self.initial_weight }
    pub fn memory_strength(&self) -> f64 { self.memory_strength }
    pub fn last_revised_day(&self) -> u32 { self.last_revised_day }
    pub fn prerequisites(&self) -> &[String] { &self.prerequisites }

    /// True if `id` is listed as one of this concept's prerequisites
    pub fn depends_on(&self, id: &str) -> bool {
        self.prerequisites.iter().any(|p| p == id)
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn recategorize(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Retention on `current_day` under decay rate `lambda`:
    /// `clamp(initial_weight * e^(-lambda * elapsed), 0.1, 1.0)`
    pub fn compute_memory(&self, current_day: u32, lambda: f64) -> f64 {
        let elapsed = i64::from(current_day) - i64::from(self.last_revised_day);
        clamp_strength(self.initial_weight * (-lambda * elapsed as f64).exp())
    }

    /// Recomputes the stored strength for `current_day`
    pub fn refresh(&mut self, current_day: u32, lambda: f64) {
        self.memory_strength = self.compute_memory(current_day, lambda);
    }

    /// Boosts strength and restarts the decay clock from the boosted value
    pub fn apply_revision(&mut self, current_day: u32, boost: f64) {
        self.memory_strength = (self.memory_strength + boost).min(MAX_STRENGTH);
        self.initial_weight = self.memory_strength;
        self.last_revised_day = current_day;
    }

    /// Spreading-activation bump from a revised neighbour.
    ///
    /// Resets the whole decay baseline like a revision: `initial_weight`
    /// becomes the boosted strength and `last_revised_day` is stamped with
    /// `current_day` even though this concept was not itself studied. Keeping
    /// the old day would let a same-day refresh shrink the boost again.
    pub fn apply_neighbor_boost(&mut self, current_day: u32, boost: f64) {
        self.apply_revision(current_day, boost);
    }
}
