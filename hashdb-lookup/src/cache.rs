use std::collections::{HashMap, VecDeque};

use crate::codec::Prefix;

/// Read-through cache of decoded index prefixes, keyed by record position.
///
/// Unbounded unless a capacity is given, in which case the least recently
/// used position is evicted first.
///
/// Recency is tracked with a generation stamp per entry. Every use pushes a
/// fresh `(position, generation)` onto `order`; stale pairs are skipped at
/// eviction time and dropped in bulk once they outnumber live entries.
#[derive(Debug, Clone)]
pub struct PrefixCache {
    capacity: Option<usize>,
    map: HashMap<u64, (Prefix, u64)>,
    order: VecDeque<(u64, u64)>,
    generation: u64,
}

impl PrefixCache {
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(Some(capacity))
    }

    pub fn new(capacity: Option<usize>) -> Self {
        Self { capacity, map: HashMap::new(), order: VecDeque::new(), generation: 0 }
    }

    pub fn get(&mut self, position: u64) -> Option<Prefix> {
        let bounded = self.capacity.is_some();
        let generation = self.generation + 1;
        let entry = self.map.get_mut(&position)?;
        let prefix = entry.0;
        if bounded {
            entry.1 = generation;
            self.generation = generation;
            self.order.push_back((position, generation));
            self.compact();
        }
        Some(prefix)
    }

    pub fn insert(&mut self, position: u64, prefix: Prefix) {
        let Some(capacity) = self.capacity else {
            self.map.insert(position, (prefix, 0));
            return;
        };
        if capacity == 0 {
            return;
        }

        self.generation += 1;
        self.map.insert(position, (prefix, self.generation));
        self.order.push_back((position, self.generation));

        while self.map.len() > capacity {
            let Some((evict, generation)) = self.order.pop_front() else { break };
            if self.map.get(&evict).is_some_and(|&(_, current)| current == generation) {
                self.map.remove(&evict);
            }
        }
        self.compact();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drops stale recency stamps once they make up over half of `order`.
    fn compact(&mut self) {
        if self.order.len() <= 2 * self.map.len() + 16 {
            return;
        }
        let map = &self.map;
        self.order
            .retain(|(position, generation)| map.get(position).is_some_and(|&(_, g)| g == *generation));
    }
}

impl Default for PrefixCache {
    fn default() -> Self {
        Self::unbounded()
    }
}
