//! Built-in introductory algorithms curriculum.

use crate::memory::{EngineError, RetentionEngine};

/// `(name, id, category, weight, prerequisites)`
const CURRICULUM: &[(&str, &str, &str, f64, &[&str])] = &[
    ("Binary Search", "binary_search", "Algorithms", 0.85, &["arrays"]),
    ("Arrays", "arrays", "Data Structures", 0.45, &[]),
    ("Sorting Algorithms", "sorting", "Algorithms", 0.62, &["arrays"]),
    ("Linked Lists", "linked_lists", "Data Structures", 0.28, &[]),
    ("Binary Trees", "trees", "Data Structures", 0.75, &["linked_lists"]),
    ("Hash Tables", "hash_tables", "Data Structures", 0.55, &["arrays"]),
    ("Graph Traversal", "graphs", "Algorithms", 0.35, &["trees"]),
    ("Dynamic Programming", "dp", "Algorithms", 0.90, &["sorting"]),
];

/// Inserts the sample concepts into `engine`
pub fn seed(engine: &mut RetentionEngine) -> Result<(), EngineError> {
    for &(name, id, category, weight, prerequisites) in CURRICULUM {
        let prerequisites = prerequisites.iter().map(|p| p.to_string()).collect();
        engine.insert_concept(name, id, category, weight, prerequisites)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_curriculum() {
        let mut engine = RetentionEngine::default();
        seed(&mut engine).unwrap();
        assert_eq!(engine.total_concepts(), 8);
        assert_eq!(engine.next_recommendation(), Some("linked_lists"));
        assert_eq!(engine.urgent_count(), 1);
        assert_eq!(engine.concept("dp").unwrap().prerequisites(), ["sorting"]);
    }

    #[test]
    fn test_seed_twice_fails() {
        let mut engine = RetentionEngine::default();
        seed(&mut engine).unwrap();
        assert_eq!(
            seed(&mut engine),
            Err(EngineError::DuplicateConcept("binary_search".into()))
        );
    }
}
