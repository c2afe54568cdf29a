// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Single entry memoization, keyed by value.
//
// A Memo remembers the last key it saw and the value computed from it.  A lookup with an
// equal key returns the stored value without recomputing, even if the key is a fresh copy
// of the old one.  Clearing only forgets; the next lookup recomputes the same answer.

use std::rc::Rc;

pub struct Memo<K, V> {
    last: Option<(K, Rc<V>)>,
    recomputations: usize,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Memo {
            last: None,
            recomputations: 0,
        }
    }
}

impl<K: PartialEq + Clone, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    // Return the value for key, calling compute only if key differs from the last key.
    // The key is cloned only when it is stored.

    pub fn get<F>(&mut self, key: &K, compute: F) -> Rc<V>
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(v) = self.find(|k| k == key) {
            return v;
        }
        let v = compute(key);
        self.store(key.clone(), v)
    }

    // Return the stored value if the stored key satisfies hit.  This lets a caller look up
    // with borrowed data and build an owned key only on a miss.

    pub fn find<P>(&self, hit: P) -> Option<Rc<V>>
    where
        P: Fn(&K) -> bool,
    {
        match &self.last {
            Some((k, v)) if hit(k) => Some(v.clone()),
            _ => None,
        }
    }

    pub fn store(&mut self, key: K, value: V) -> Rc<V> {
        let v = Rc::new(value);
        self.recomputations += 1;
        self.last = Some((key, v.clone()));
        v
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    // number of times compute has been called
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
