//! Order List Module
//!
//! Keeps keys in a sequence where the front is the oldest and the back the
//! newest, with O(1) promotion, removal and eviction.

use std::collections::HashMap;
use std::hash::Hash;

/// Slot index meaning "no node".
const NIL: usize = usize::MAX;

struct Node<K> {
    /// `None` while the slot sits on the free list.
    key: Option<K>,
    /// Towards the front (older).
    prev: usize,
    /// Towards the back (newer).
    next: usize,
}

// == Order List ==
/// Doubly linked list of keys stored in an index arena.
///
/// - Front = oldest (next eviction candidate)
/// - Back = newest
///
/// A key -> slot map gives constant-time access to any node, so promoting a
/// key never scans the sequence.
pub struct OrderList<K> {
    nodes: Vec<Node<K>>,
    slots: HashMap<K, usize>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
}

impl<K: Hash + Eq + Clone> OrderList<K> {
    // == Constructor ==
    /// Creates a new empty order list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            slots: HashMap::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        }
    }

    // == Push Back ==
    /// Appends a key at the back (newest position).
    ///
    /// A key that is already tracked is moved to the back instead, so a key
    /// never appears twice.
    pub fn push_back(&mut self, key: K) {
        if self.move_to_back(&key) {
            return;
        }
        let idx = self.alloc(key.clone());
        self.link_back(idx);
        self.slots.insert(key, idx);
    }

    // == Move To Back ==
    /// Moves a tracked key to the back. Returns false if the key is unknown.
    pub fn move_to_back(&mut self, key: &K) -> bool {
        match self.slots.get(key) {
            Some(&idx) => {
                if idx != self.tail {
                    self.unlink(idx);
                    self.link_back(idx);
                }
                true
            }
            None => false,
        }
    }

    // == Pop Front ==
    /// Removes and returns the oldest key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_front(&mut self) -> Option<K> {
        if self.head == NIL {
            return None;
        }
        let idx = self.head;
        self.unlink(idx);
        let key = self.release(idx)?;
        self.slots.remove(&key);
        Some(key)
    }

    // == Remove ==
    /// Removes a key wherever it sits. Returns false if the key is unknown.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.slots.remove(key) {
            Some(idx) => {
                self.unlink(idx);
                self.release(idx);
                true
            }
            None => false,
        }
    }

    /// Returns the oldest key without removing it.
    pub fn front(&self) -> Option<&K> {
        self.nodes.get(self.head).and_then(|node| node.key.as_ref())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Arena Helpers ==
    fn alloc(&mut self, key: K) -> usize {
        let node = Node {
            key: Some(key),
            prev: NIL,
            next: NIL,
        };
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, idx: usize) -> Option<K> {
        self.free.push(idx);
        self.nodes[idx].key.take()
    }

    fn link_back(&mut self, idx: usize) {
        self.nodes[idx].prev = self.tail;
        self.nodes[idx].next = NIL;
        if self.tail == NIL {
            self.head = idx;
        } else {
            self.nodes[self.tail].next = idx;
        }
        self.tail = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;
        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }
}

impl<K: Hash + Eq + Clone> Default for OrderList<K> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Front-to-back iterator over an [`OrderList`].
pub struct Iter<'a, K> {
    list: &'a OrderList<K>,
    cursor: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes.get(self.cursor)?;
        self.cursor = node.next;
        node.key.as_ref()
    }
}
