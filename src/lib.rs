//! Spaced-revision engine: tracks how well each concept is remembered under
//! exponential decay and recommends what to review next.
//!
//! ```
//! use recall::RetentionEngine;
//!
//! let mut engine = RetentionEngine::new(0.15).unwrap();
//! engine.insert_concept("Arrays", "arrays", "Data Structures", 0.45, vec![]).unwrap();
//! engine.insert_concept("Sorting", "sorting", "Algorithms", 0.62, vec!["arrays".into()]).unwrap();
//! engine.advance_time(7).unwrap();
//!
//! assert_eq!(engine.next_recommendation(), Some("arrays"));
//! engine.revise_concept("arrays").unwrap();
//! ```

pub mod command;
pub mod config;
pub mod logging;
pub mod memory;
pub mod report;
pub mod sample;

pub use memory::{
    Concept, EngineConfig, EngineError, EngineStats, RetentionEngine, Revision, RevisionHeap,
    SharedEngine,
};
