//! Core logic for tracking concept retention and revision order.

pub mod concept;
pub mod engine;
pub mod heap;
pub mod shared;

pub use concept::{Concept, MAX_STRENGTH, MIN_STRENGTH};
pub use engine::{ConceptEditor, EngineConfig, EngineError, EngineStats, RetentionEngine, Revision};
pub use heap::{HeapError, RevisionHeap};
pub use shared::SharedEngine;
