use proptest::prelude::*;
use recall::memory::{Concept, RetentionEngine, MAX_STRENGTH, MIN_STRENGTH};

/// A small random curriculum: weights plus prerequisite indices (may dangle)
fn arb_curriculum() -> impl Strategy<Value = Vec<(f64, Vec<usize>)>> {
    prop::collection::vec(
        (0.0f64..=1.0, prop::collection::vec(0usize..24, 0..4)),
        1..20,
    )
}

fn build(curriculum: &[(f64, Vec<usize>)], lambda: f64) -> RetentionEngine {
    let mut engine = RetentionEngine::new(lambda).unwrap();
    for (i, (weight, prereqs)) in curriculum.iter().enumerate() {
        let prereqs = prereqs.iter().map(|p| format!("c{p}")).collect();
        engine
            .insert_concept(format!("Concept {i}"), format!("c{i}"), "Generated", *weight, prereqs)
            .unwrap();
    }
    engine
}

fn strengths(engine: &RetentionEngine) -> Vec<(String, f64)> {
    let mut all: Vec<_> = engine
        .concepts()
        .map(|c| (c.id().to_string(), c.memory_strength()))
        .collect();
    all.sort_by(|a, b| a.0.cmp(&b.0));
    all
}

proptest! {
    #[test]
    fn strengths_stay_in_bounds(
        curriculum in arb_curriculum(),
        lambda in 0.0f64..2.0,
        steps in prop::collection::vec((0u32..40, 0usize..24), 1..10),
    ) {
        let mut engine = build(&curriculum, lambda);
        for (days, revise) in steps {
            engine.advance_time(days).unwrap();
            for c in engine.concepts() {
                prop_assert!((MIN_STRENGTH..=MAX_STRENGTH).contains(&c.memory_strength()));
                prop_assert!(c.last_revised_day() <= engine.current_day());
            }
            let _ = engine.revise_concept(&format!("c{revise}"));
        }
    }

    #[test]
    fn compute_memory_is_non_increasing(
        weight in 0.0f64..=1.0,
        lambda in 0.001f64..3.0,
        days in prop::collection::vec(0u32..500, 2..20),
    ) {
        let concept = Concept::new("c", "C", "Generated", weight, 0, vec![]);
        let mut days = days;
        days.sort_unstable();
        for pair in days.windows(2) {
            prop_assert!(
                concept.compute_memory(pair[1], lambda) <= concept.compute_memory(pair[0], lambda)
            );
        }
    }

    #[test]
    fn next_recommendation_is_global_minimum(
        curriculum in arb_curriculum(),
        days in 0u32..30,
        revisions in prop::collection::vec(0usize..24, 0..8),
    ) {
        let mut engine = build(&curriculum, 0.15);
        engine.advance_time(days).unwrap();
        for r in revisions {
            let _ = engine.revise_concept(&format!("c{r}"));
        }

        let min = engine
            .concepts()
            .map(Concept::memory_strength)
            .fold(f64::INFINITY, f64::min);
        let next = engine.next_recommendation().unwrap();
        prop_assert_eq!(engine.concept(next).unwrap().memory_strength(), min);
    }

    #[test]
    fn top_recommendations_sorted_and_sized(
        curriculum in arb_curriculum(),
        days in 0u32..30,
        k in 0usize..30,
    ) {
        let mut engine = build(&curriculum, 0.15);
        engine.advance_time(days).unwrap();

        let top = engine.top_recommendations(k);
        prop_assert_eq!(top.len(), k.min(engine.total_concepts()));
        let values: Vec<f64> = top
            .iter()
            .map(|id| engine.concept(id).unwrap().memory_strength())
            .collect();
        prop_assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn advance_zero_days_is_idempotent(
        curriculum in arb_curriculum(),
        days in 0u32..30,
    ) {
        let mut engine = build(&curriculum, 0.15);
        engine.advance_time(days).unwrap();
        let before = strengths(&engine);

        engine.advance_time(0).unwrap();
        prop_assert_eq!(strengths(&engine), before);
    }

    #[test]
    fn revision_touches_only_adjacent_concepts(
        curriculum in arb_curriculum(),
        days in 0u32..30,
        target in 0usize..20,
    ) {
        let mut engine = build(&curriculum, 0.15);
        engine.advance_time(days).unwrap();
        let target_id = format!("c{}", target % curriculum.len());
        let target_prereqs = engine.concept(&target_id).unwrap().prerequisites().to_vec();
        let before = strengths(&engine);

        engine.revise_concept(&target_id).unwrap();

        for (id, old) in before {
            let new = engine.concept(&id).unwrap().memory_strength();
            if id == target_id {
                prop_assert!((new - (old + 0.4).min(1.0)).abs() < 1e-12);
                continue;
            }
            let adjacent = engine.concept(&id).unwrap().depends_on(&target_id)
                || target_prereqs.contains(&id);
            if adjacent {
                prop_assert!((new - (old + 0.1).min(1.0)).abs() < 1e-12);
            } else {
                prop_assert_eq!(new, old);
            }
        }
    }
}
