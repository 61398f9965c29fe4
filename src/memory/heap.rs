//! Binary min-heap of concept ids keyed by memory strength.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeapError {
    #[error("Revision queue is empty")]
    EmptyQueue,
}

#[derive(Debug, Clone, PartialEq)]
struct HeapNode {
    concept_id: String,
    strength: f64,
}

/// Min-priority queue that always surfaces the weakest concept.
///
/// The heap stores only `(id, strength)` pairs; the owner is responsible for
/// keeping it in step with the concept table. Inserting an id twice is not
/// detected.
#[derive(Debug, Clone, Default)]
pub struct RevisionHeap {
    nodes: Vec<HeapNode>,
}

impl RevisionHeap {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn insert(&mut self, concept_id: impl Into<String>, strength: f64) {
        self.nodes.push(HeapNode {
            concept_id: concept_id.into(),
            strength,
        });
        self.sift_up(self.nodes.len() - 1);
    }

    /// Id with the lowest strength, left in place
    pub fn peek_min(&self) -> Result<&str, HeapError> {
        self.nodes
            .first()
            .map(|node| node.concept_id.as_str())
            .ok_or(HeapError::EmptyQueue)
    }

    /// Removes and returns the id with the lowest strength
    pub fn extract_min(&mut self) -> Result<String, HeapError> {
        if self.nodes.is_empty() {
            return Err(HeapError::EmptyQueue);
        }
        let min = self.nodes.swap_remove(0);
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Ok(min.concept_id)
    }

    /// Changes the key of `concept_id` and restores heap order.
    ///
    /// Linear scan to find the entry; returns false if the id is not queued.
    pub fn update_key(&mut self, concept_id: &str, strength: f64) -> bool {
        let Some(index) = self.nodes.iter().position(|n| n.concept_id == concept_id) else {
            return false;
        };

        let old = self.nodes[index].strength;
        self.nodes[index].strength = strength;
        if strength < old {
            self.sift_up(index);
        } else {
            self.sift_down(index);
        }
        true
    }

    /// Replaces the contents and heapifies bottom-up in O(n)
    pub fn rebuild<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        self.nodes.clear();
        self.nodes.extend(
            entries
                .into_iter()
                .map(|(concept_id, strength)| HeapNode { concept_id, strength }),
        );
        for index in (0..self.nodes.len() / 2).rev() {
            self.sift_down(index);
        }
    }

    #[cfg(test)]
    fn strength_of(&self, concept_id: &str) -> Option<f64> {
        self.nodes
            .iter()
            .find(|n| n.concept_id == concept_id)
            .map(|n| n.strength)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.nodes[parent].strength <= self.nodes[index].strength {
                break;
            }
            self.nodes.swap(parent, index);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.nodes.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.nodes[left].strength < self.nodes[smallest].strength {
                smallest = left;
            }
            if right < len && self.nodes[right].strength < self.nodes[smallest].strength {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.nodes.swap(index, smallest);
            index = smallest;
        }
    }

    #[cfg(test)]
    fn is_valid(&self) -> bool {
        (1..self.nodes.len()).all(|i| self.nodes[(i - 1) / 2].strength <= self.nodes[i].strength)
    }
}
