//! ChainedHashMap: fixed bucket directory with singly linked chains.

use crate::error::{CreateError, RehashError};
use crate::hash::{byte_sum, HashFn};
use core::fmt;
use core::mem;
use log::{debug, trace};
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Node<V> {
    key: Box<str>,
    value: V,
    next: Option<DefaultKey>,
}

/// Outcome of `insert_with_resolver`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Insertion {
    /// The key was new; a fresh entry was appended to its chain.
    Inserted,
    /// The key already existed; the resolver chose the stored value.
    Resolved,
}

pub struct ChainedHashMap<V> {
    hash: HashFn,
    buckets: Vec<Option<DefaultKey>>, // chain heads
    nodes: SlotMap<DefaultKey, Node<V>>, // chain nodes, linked through `next`
}

/// Iterator over one bucket's chain, head to tail.
pub struct Chain<'a, V> {
    nodes: &'a SlotMap<DefaultKey, Node<V>>,
    cur: Option<DefaultKey>,
}

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cur?)?;
        self.cur = node.next;
        Some((&*node.key, &node.value))
    }
}

/// Iterator over all entries in bucket order, then chain order.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Option<DefaultKey>>,
    chain: Chain<'a, V>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.chain.next() {
                self.remaining -= 1;
                return Some(item);
            }
            self.chain.cur = *self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// Iterator over mutable values. Visits entries in storage order, which is
/// unrelated to bucket order.
pub struct IterMut<'a, V> {
    it: slotmap::basic::IterMut<'a, DefaultKey, Node<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, n)| (&*n.key, &mut n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<V> ChainedHashMap<V> {
    /// Creates a table with `num_buckets` empty buckets and the additive
    /// byte-sum hash.
    pub fn new(num_buckets: usize) -> Result<Self, CreateError> {
        Self::with_hash_function(num_buckets, byte_sum)
    }

    /// Creates a table with `num_buckets` empty buckets and a custom hash.
    pub fn with_hash_function(num_buckets: usize, hash: HashFn) -> Result<Self, CreateError> {
        if num_buckets < 1 {
            return Err(CreateError::ZeroBuckets);
        }
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(num_buckets)?;
        buckets.resize(num_buckets, None);
        debug!("created chained hash map with {} buckets", num_buckets);
        Ok(Self {
            hash,
            buckets,
            nodes: SlotMap::with_key(),
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// The active hash function.
    pub fn hash_function(&self) -> HashFn {
        self.hash
    }

    /// Raw hash of `key` under the active hash function.
    pub fn hash_of(&self, key: &str) -> u64 {
        (self.hash)(key)
    }

    /// Bucket that `key` maps to under the active hash function.
    pub fn bucket_index(&self, key: &str) -> usize {
        // num_buckets >= 1 and fits in usize, so the remainder does too.
        (self.hash_of(key) % self.buckets.len() as u64) as usize
    }

    /// Walks the chain of bucket `idx`. Returns the matching node, if any,
    /// together with its predecessor; when nothing matches the second
    /// element is the chain tail.
    fn locate(&self, idx: usize, key: &str) -> (Option<DefaultKey>, Option<DefaultKey>) {
        let mut prev = None;
        let mut cur = self.buckets[idx];
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if &*node.key == key {
                return (prev, Some(k));
            }
            prev = Some(k);
            cur = node.next;
        }
        (prev, None)
    }

    /// Points the link after `prev` (or the bucket head) at `to`.
    fn set_link(&mut self, idx: usize, prev: Option<DefaultKey>, to: Option<DefaultKey>) {
        match prev {
            Some(p) => self.nodes[p].next = to,
            None => self.buckets[idx] = to,
        }
    }

    fn append(
        &mut self,
        idx: usize,
        tail: Option<DefaultKey>,
        key: Box<str>,
        value: V,
    ) -> DefaultKey {
        let k = self.nodes.insert(Node {
            key,
            value,
            next: None,
        });
        self.set_link(idx, tail, Some(k));
        k
    }

    fn find(&self, key: &str) -> Option<DefaultKey> {
        self.locate(self.bucket_index(key), key).1
    }

    /// Inserts `value` under a copy of `key`.
    ///
    /// If the key is already present the new value replaces the stored one
    /// and the previous value is handed back; the table never drops it.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let idx = self.bucket_index(key);
        match self.locate(idx, key) {
            (_, Some(k)) => Some(mem::replace(&mut self.nodes[k].value, value)),
            (tail, None) => {
                self.append(idx, tail, key.into(), value);
                trace!("appended {:?} to bucket {}", key, idx);
                None
            }
        }
    }

    /// Inserts `value` under a copy of `key`, consulting `resolve(old, new)`
    /// when the key already exists. The returned value is stored; the one
    /// not returned is the resolver's to drop.
    ///
    /// The entry is unlinked while `resolve` runs, so a panicking resolver
    /// leaves the key absent rather than the table inconsistent.
    pub fn insert_with_resolver<F>(&mut self, key: &str, value: V, resolve: F) -> Insertion
    where
        F: FnOnce(V, V) -> V,
    {
        let idx = self.bucket_index(key);
        match self.locate(idx, key) {
            (prev, Some(k)) => {
                let Some(old) = self.nodes.remove(k) else {
                    unreachable!("chain links only live nodes");
                };
                self.set_link(idx, prev, old.next);
                let value = resolve(old.value, value);
                let nk = self.nodes.insert(Node {
                    key: old.key,
                    value,
                    next: old.next,
                });
                self.set_link(idx, prev, Some(nk));
                Insertion::Resolved
            }
            (tail, None) => {
                self.append(idx, tail, key.into(), value);
                trace!("appended {:?} to bucket {}", key, idx);
                Insertion::Inserted
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).map(|k| &self.nodes[k].value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = self.find(key)?;
        self.nodes.get_mut(k).map(|n| &mut n.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key` and hands its value back. Missing keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.bucket_index(key);
        let (prev, found) = self.locate(idx, key);
        let node = self.nodes.remove(found?)?;
        self.set_link(idx, prev, node.next);
        trace!("removed {:?} from bucket {}", key, idx);
        Some(node.value)
    }

    /// Removes `key`, passing its value to `destroy`. Returns whether an
    /// entry was removed.
    pub fn remove_with<F>(&mut self, key: &str, destroy: F) -> bool
    where
        F: FnOnce(V),
    {
        match self.remove(key) {
            Some(v) => {
                destroy(v);
                true
            }
            None => false,
        }
    }

    /// Unlinks bucket `idx` and moves its entries out in chain order.
    fn take_chain(&mut self, idx: usize, mut sink: impl FnMut(Box<str>, V)) {
        let mut cur = self.buckets[idx].take();
        while let Some(k) = cur {
            let Some(node) = self.nodes.remove(k) else {
                break;
            };
            cur = node.next;
            sink(node.key, node.value);
        }
    }

    /// Removes every entry; the bucket count is kept.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(|b| *b = None);
        self.nodes.clear();
    }

    /// Tears the table down, handing every value to `destroy_value` in
    /// bucket then chain order. Dropping the table instead drops values in
    /// place.
    pub fn destroy<F>(mut self, mut destroy_value: F)
    where
        F: FnMut(V),
    {
        for idx in 0..self.buckets.len() {
            self.take_chain(idx, |_, v| destroy_value(v));
        }
    }

    /// Installs `hash` and relocates every entry to the bucket its key maps
    /// to under it.
    ///
    /// New bucket indices are computed for every key before anything moves,
    /// so a panicking `hash` leaves the table and its old hash untouched.
    /// Entries are then drained into a separate buffer and relinked; no
    /// chain is walked while it is being rewritten. Keys and values are
    /// moved, never copied or dropped, and no resolver runs. All buffers are
    /// reserved up front: on allocation failure nothing has changed.
    pub fn set_hash_function(&mut self, hash: HashFn) -> Result<(), RehashError> {
        if self.is_empty() {
            self.hash = hash;
            return Ok(());
        }

        let num_buckets = self.buckets.len();
        let mut targets: Vec<usize> = Vec::new();
        targets.try_reserve_exact(self.len())?;
        let mut drained: Vec<(Box<str>, V)> = Vec::new();
        drained.try_reserve_exact(self.len())?;
        let mut tails: Vec<Option<DefaultKey>> = Vec::new();
        tails.try_reserve_exact(num_buckets)?;
        tails.resize(num_buckets, None);

        // Same bucket-then-chain order as the drain below.
        targets.extend(
            self.iter()
                .map(|(k, _)| (hash(k) % num_buckets as u64) as usize),
        );

        debug!(
            "rehashing {} entries across {} buckets",
            self.len(),
            num_buckets
        );
        for idx in 0..num_buckets {
            self.take_chain(idx, |k, v| drained.push((k, v)));
        }
        debug_assert!(self.nodes.is_empty());
        debug_assert_eq!(targets.len(), drained.len());

        self.hash = hash;
        for (idx, (key, value)) in targets.into_iter().zip(drained) {
            // Freed slots are reused, so this does not allocate.
            tails[idx] = Some(self.append(idx, tails[idx], key, value));
        }
        debug!("rehash complete");
        Ok(())
    }

    /// Visits every entry once, in bucket then chain order.
    ///
    /// The table is borrowed for the whole walk, so `visit` cannot mutate it.
    pub fn iterate<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V),
    {
        for (k, v) in self.iter() {
            visit(k, v);
        }
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Chain {
                nodes: &self.nodes,
                cur: None,
            },
            remaining: self.len(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            it: self.nodes.iter_mut(),
        }
    }

    /// Entries of bucket `idx`, head first. Out-of-range buckets are empty.
    pub fn chain(&self, idx: usize) -> Chain<'_, V> {
        Chain {
            nodes: &self.nodes,
            cur: self.buckets.get(idx).copied().flatten(),
        }
    }

    /// Approximate footprint: the table header plus one entry-sized unit
    /// per bucket. A diagnostic, not allocator accounting.
    pub fn memory_footprint(&self) -> usize {
        mem::size_of::<Self>() + self.buckets.len() * mem::size_of::<Node<V>>()
    }
}

impl<'a, V> IntoIterator for &'a ChainedHashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainedHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
