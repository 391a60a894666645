//! LRU (Least Recently Used) eviction policy
//!
//! Uses an index-linked list for O(1) touch and removal.

use std::collections::HashMap;

use ahash::RandomState;

use crate::error::{CacheError, Result};
use crate::policy::EvictionPolicy;
use crate::traits::{CacheKey, CacheSize};

/// Node in the recency list
#[derive(Clone)]
struct Node<K, Z> {
    key: K,
    size: Z,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Least-recently-used eviction policy.
///
/// Most recently used keys sit at the head of the list, victims are taken
/// from the tail. Not thread-safe on its own: the owning cache serializes all
/// access to it.
#[derive(Clone)]
pub struct LruPolicy<K, Z> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, Z>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    bytes: Z,
}

impl<K, Z> LruPolicy<K, Z>
where
    K: CacheKey,
    Z: CacheSize,
{
    /// Create an empty policy
    pub fn new() -> Self {
        Self {
            map: HashMap::with_hasher(RandomState::new()),
            nodes: Vec::new(),
            head: None,
            tail: None,
            free_list: Vec::new(),
            bytes: Z::ZERO,
        }
    }

    /// Total bytes of all tracked keys
    pub fn tracked_bytes(&self) -> Z {
        self.bytes
    }

    /// Tracked keys from most to least recently used
    pub fn keys_by_recency(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.map.len());
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            match &self.nodes[idx] {
                Some(node) => {
                    keys.push(node.key);
                    cursor = node.next;
                }
                None => break,
            }
        }
        keys
    }

    fn link_front(&mut self, idx: usize) {
        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.nodes[idx] {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Unlink and release a node, returning what it held
    fn remove_node(&mut self, idx: usize) -> Option<Node<K, Z>> {
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.free_list.push(idx);
        self.map.remove(&node.key);
        self.bytes = self.bytes.saturating_sub(node.size);
        Some(node)
    }

    fn alloc_node(&mut self, node: Node<K, Z>) -> usize {
        match self.free_list.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }
}

impl<K, Z> Default for LruPolicy<K, Z>
where
    K: CacheKey,
    Z: CacheSize,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, Z> EvictionPolicy<K, Z> for LruPolicy<K, Z>
where
    K: CacheKey,
    Z: CacheSize,
{
    fn insert(&mut self, key: K, size: Z) -> Result<()> {
        if self.map.contains_key(&key) {
            return Err(CacheError::AlreadyTracked {
                key: format!("{key:?}"),
            });
        }

        let idx = self.alloc_node(Node {
            key,
            size,
            prev: None,
            next: None,
        });
        self.link_front(idx);
        self.map.insert(key, idx);
        self.bytes = self.bytes.saturating_add(size);
        Ok(())
    }

    fn touch(&mut self, key: &K) -> Result<()> {
        let idx = *self.map.get(key).ok_or_else(|| CacheError::Untracked {
            key: format!("{key:?}"),
        })?;

        if self.head != Some(idx) {
            self.unlink(idx);
            self.link_front(idx);
        }
        Ok(())
    }

    fn erase(&mut self, key: &K) -> Result<Z> {
        let idx = *self.map.get(key).ok_or_else(|| CacheError::Untracked {
            key: format!("{key:?}"),
        })?;

        self.remove_node(idx)
            .map(|node| node.size)
            .ok_or_else(|| CacheError::Untracked {
                key: format!("{key:?}"),
            })
    }

    fn evict(&mut self, target: Z) -> Result<Vec<K>> {
        if target > self.bytes {
            return Err(CacheError::EvictionUnderflow {
                requested: target.to_string(),
                available: self.bytes.to_string(),
            });
        }

        let mut victims = Vec::new();
        let mut freed = Z::ZERO;
        while freed < target {
            let Some(tail_idx) = self.tail else {
                break;
            };
            match self.remove_node(tail_idx) {
                Some(node) => {
                    freed = freed.saturating_add(node.size);
                    victims.push(node.key);
                }
                None => break,
            }
        }
        Ok(victims)
    }

    fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.bytes = Z::ZERO;
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> LruPolicy<u32, usize> {
        LruPolicy::new()
    }

    #[test]
    fn test_lru_insert_order() {
        let mut lru = policy();

        lru.insert(1, 10).unwrap();
        lru.insert(2, 20).unwrap();
        lru.insert(3, 30).unwrap();

        assert_eq!(lru.keys_by_recency(), vec![3, 2, 1]);
        assert_eq!(lru.len(), 3);
        assert_eq!(lru.tracked_bytes(), 60);
    }

    #[test]
    fn test_lru_double_insert() {
        let mut lru = policy();

        lru.insert(1, 10).unwrap();
        let err = lru.insert(1, 10).unwrap_err();

        assert!(matches!(err, CacheError::AlreadyTracked { .. }));
        assert_eq!(lru.len(), 1);
        assert_eq!(lru.tracked_bytes(), 10);
    }

    #[test]
    fn test_lru_touch() {
        let mut lru = policy();

        lru.insert(1, 1).unwrap();
        lru.insert(2, 1).unwrap();
        lru.insert(3, 1).unwrap();
        lru.touch(&1).unwrap(); // Move 1 to front

        assert_eq!(lru.keys_by_recency(), vec![1, 3, 2]);

        // Touching the head is a no-op
        lru.touch(&1).unwrap();
        assert_eq!(lru.keys_by_recency(), vec![1, 3, 2]);

        assert!(matches!(
            lru.touch(&9),
            Err(CacheError::Untracked { .. })
        ));
    }

    #[test]
    fn test_lru_erase() {
        let mut lru = policy();

        lru.insert(1, 5).unwrap();
        lru.insert(2, 6).unwrap();
        lru.insert(3, 7).unwrap();

        assert_eq!(lru.erase(&2).unwrap(), 6);
        assert_eq!(lru.keys_by_recency(), vec![3, 1]);
        assert_eq!(lru.tracked_bytes(), 12);
        assert!(lru.erase(&2).is_err());

        // Erase head and tail
        lru.erase(&3).unwrap();
        lru.erase(&1).unwrap();
        assert!(lru.is_empty());
        assert!(lru.keys_by_recency().is_empty());
    }

    #[test]
    fn test_lru_evict_order() {
        let mut lru = policy();

        for key in 0..5 {
            lru.insert(key, 4).unwrap();
        }
        lru.touch(&0).unwrap();

        // 6 bytes needs two 4-byte victims
        let victims = lru.evict(6).unwrap();
        assert_eq!(victims, vec![1, 2]);
        assert_eq!(lru.keys_by_recency(), vec![0, 4, 3]);
        assert_eq!(lru.tracked_bytes(), 12);
    }

    #[test]
    fn test_lru_evict_zero() {
        let mut lru = policy();
        lru.insert(1, 4).unwrap();

        assert!(lru.evict(0).unwrap().is_empty());
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_evict_underflow() {
        let mut lru = policy();
        lru.insert(1, 4).unwrap();
        lru.insert(2, 4).unwrap();

        let err = lru.evict(9).unwrap_err();
        assert!(matches!(err, CacheError::EvictionUnderflow { .. }));
        // Nothing was removed
        assert_eq!(lru.len(), 2);

        assert_eq!(lru.evict(8).unwrap(), vec![1, 2]);
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_reuses_slots() {
        let mut lru = policy();

        lru.insert(1, 1).unwrap();
        lru.insert(2, 1).unwrap();
        lru.erase(&1).unwrap();
        lru.insert(3, 1).unwrap();

        assert_eq!(lru.nodes.len(), 2);
        assert_eq!(lru.keys_by_recency(), vec![3, 2]);
    }

    #[test]
    fn test_lru_clear() {
        let mut lru = policy();

        lru.insert(1, 1).unwrap();
        lru.insert(2, 1).unwrap();
        lru.clear();

        assert_eq!(lru.len(), 0);
        assert!(lru.is_empty());
        assert_eq!(lru.tracked_bytes(), 0);
        lru.insert(1, 1).unwrap();
        assert_eq!(lru.keys_by_recency(), vec![1]);
    }
}
