use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use super::{Error, PartitionRef};

/// Groups every partition node of a table by its depth in the forest.
///
/// The layout is rectangular: all nodes at one depth share the same key, so the
/// key name alone is enough to find every partition of that key.
#[derive(Debug, Default)]
pub struct PartitionIndex {
    depths: Vec<Vec<PartitionRef>>,
    key_depths: HashMap<String, usize>,
}

impl PartitionIndex {
    pub fn new(roots: &[PartitionRef]) -> Self {
        let mut depths = Vec::new();
        let mut key_depths = HashMap::new();
        let mut queue: VecDeque<PartitionRef> = roots.iter().map(Arc::clone).collect();

        while !queue.is_empty() {
            let size = queue.len();
            let mut level = Vec::with_capacity(size);

            for _ in 0..size {
                let Some(node) = queue.pop_front() else { break };
                queue.extend(node.children().iter().map(Arc::clone));
                level.push(node);
            }

            if let Some(first) = level.first() {
                key_depths.insert(first.name().to_string(), depths.len());
            }
            depths.push(level);
        }

        Self { depths, key_depths }
    }

    pub fn nodes_at_depth(&self, depth: usize) -> Option<&[PartitionRef]> {
        self.depths.get(depth).map(Vec::as_slice)
    }

    /// All partitions whose key is `name`
    pub fn nodes_for_key(&self, name: &str) -> Result<&[PartitionRef], Error> {
        self.key_depths
            .get(name)
            .and_then(|&depth| self.nodes_at_depth(depth))
            .ok_or_else(|| Error::PartitionKeyNotFound(name.to_string()))
    }

    pub fn depth_count(&self) -> usize {
        self.depths.len()
    }

    /// Partition key names ordered from the outermost level inwards
    pub fn key_names(&self) -> Vec<&str> {
        self.depths
            .iter()
            .filter_map(|level| level.first().map(|n| n.name()))
            .collect()
    }
}
