//! Flat, serializable views of engine state for external callers.

use crate::memory::{Concept, EngineStats};
use serde::{Deserialize, Serialize};

/// Rounds to two decimal places for display
fn two_places(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptRecord {
    pub name: String,
    pub id: String,
    pub category: String,
    pub initial_weight: f64,
    pub memory_strength: f64,
    pub last_revised_day: u32,
    pub prerequisites: Vec<String>,
}

impl From<&Concept> for ConceptRecord {
    fn from(concept: &Concept) -> Self {
        Self {
            name: concept.name().to_string(),
            id: concept.id().to_string(),
            category: concept.category().to_string(),
            initial_weight: two_places(concept.initial_weight()),
            memory_strength: two_places(concept.memory_strength()),
            last_revised_day: concept.last_revised_day(),
            prerequisites: concept.prerequisites().to_vec(),
        }
    }
}

/// Dashboard summary; `avg_memory` is a percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub total_concepts: usize,
    pub avg_memory: f64,
    pub urgent_count: usize,
    pub total_revisions: u64,
    pub current_day: u32,
}

impl From<&EngineStats> for StatsRecord {
    fn from(stats: &EngineStats) -> Self {
        Self {
            total_concepts: stats.total_concepts,
            avg_memory: two_places(stats.average_strength * 100.0),
            urgent_count: stats.urgent_count,
            total_revisions: stats.total_revisions,
            current_day: stats.current_day,
        }
    }
}

/// Records for `concepts`, in the order given
pub fn concept_records<'a, I>(concepts: I) -> Vec<ConceptRecord>
where
    I: IntoIterator<Item = &'a Concept>,
{
    concepts.into_iter().map(ConceptRecord::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_concept_record_shape() {
        let concept = Concept::new("bs", "Binary Search", "Algorithms", 0.8537, 2, vec!["arrays".into()]);
        let value = serde_json::to_value(ConceptRecord::from(&concept)).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Binary Search",
                "id": "bs",
                "category": "Algorithms",
                "initial_weight": 0.85,
                "memory_strength": 0.85,
                "last_revised_day": 2,
                "prerequisites": ["arrays"],
            })
        );
    }

    #[test]
    fn test_stats_record_uses_camel_case_percent() {
        let stats = EngineStats {
            total_concepts: 3,
            average_strength: 0.51234,
            urgent_count: 1,
            total_revisions: 4,
            current_day: 9,
        };
        let value = serde_json::to_value(StatsRecord::from(&stats)).unwrap();
        assert_eq!(
            value,
            json!({
                "totalConcepts": 3,
                "avgMemory": 51.23,
                "urgentCount": 1,
                "totalRevisions": 4,
                "currentDay": 9,
            })
        );
    }
}
