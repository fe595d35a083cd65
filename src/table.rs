//! Separately chained hash table.
//!
//! Each bucket owns an optional chain head and every node owns the rest of
//! its chain, so the whole structure is a plain acyclic ownership tree with
//! no shared or counted pointers. Capacity never changes behind the caller's
//! back: growing (or shrinking) the bucket array is an explicit call, never
//! a side effect of insertion.

use crate::hash::bucket_index;
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::hash::Hash;
use std::mem;

/// # Chained Hash Table
///
/// ## Structure
///
/// The **bucket array** holds one optional chain head per index, and `size`
/// counts live entries across every chain.
///
/// Example with `capacity = 4` after inserting four keys, two colliding:
///
/// ```text
///   BUCKETS
/// +---------+
/// | 0 |     |
/// +---------+
/// | 1 |  ---+--> johnny=439
/// +---------+
/// | 2 |  ---+--> altea=553
/// +---------+
/// | 3 |  ---+--> madmax=833 --> leon=886
/// +---------+
/// ```
///
/// ## Placement
///
/// A key's bucket is [`bucket_index`] of its hash code against the *current*
/// capacity. Every mutation keeps that consistent, which is why
/// [`resize`](Self::resize) has to re-place every node it migrates.
///
/// ## Duplicates
///
/// A key is held by exactly one node. Re-inserting an existing key rewrites
/// the node's value in place and hands the previous value back.
pub struct HashTable<K, V> {
    /// The bucket array. Its length is the capacity, not the entry count.
    table: Vec<Bucket<K, V>>,
    size: usize,
}

/// A chain element, exclusively owning its successor.
struct Node<K, V> {
    key: K,
    value: V,
    next: Option<Box<Node<K, V>>>,
}

type Bucket<K, V> = Option<Box<Node<K, V>>>;

#[derive(Debug, PartialEq, Eq)]
pub enum TableError {
    /// Construction or resize asked for a capacity of zero or less.
    InvalidCapacity(isize),
}

/// Entries in bucket order, chain order within a bucket.
pub struct Iter<'t, K, V> {
    buckets: std::slice::Iter<'t, Bucket<K, V>>,
    cursor: Option<&'t Node<K, V>>,
}

const DEFAULT_CAPACITY: usize = 8;

impl<K, V> HashTable<K, V> {
    pub fn new() -> Self {
        Self {
            table: empty_buckets(DEFAULT_CAPACITY),
            size: 0,
        }
    }

    /// Builds a table with the given number of buckets.
    ///
    /// The capacity crosses this boundary signed so that a zero or negative
    /// request is an observable [`TableError::InvalidCapacity`] rather than
    /// an unrepresentable one.
    pub fn with_capacity(capacity: isize) -> crate::Result<Self> {
        if capacity <= 0 {
            return Err(TableError::InvalidCapacity(capacity));
        }

        Ok(Self {
            table: empty_buckets(capacity as usize),
            size: 0,
        })
    }

    /// Number of live entries. A maintained counter, never a recount.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Length of the bucket array.
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Ratio of entries to buckets. The table never acts on this itself;
    /// it is exposed so a policy layer can decide when to call
    /// [`resize`](Self::resize).
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.table.len() as f64
    }

    /// Drops every chain, keeping the bucket array's length.
    pub fn clear(&mut self) {
        self.table.iter_mut().for_each(|bucket| *bucket = None);
        self.size = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.table.iter(),
            cursor: None,
        }
    }

    /// Scans every chain for the given value. Values are not indexed, so
    /// this is a full walk; the same value under several keys is fine and
    /// reports on the first hit.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, held)| held == value)
    }
}

impl<K: Hash + Eq, V> HashTable<K, V> {
    /// Inserts or rewrites the entry for `key`.
    ///
    /// On a fresh key the node is appended at the chain's tail and [`None`]
    /// comes back; on a duplicate the value is replaced in place and the
    /// previous one is returned. Never touches the capacity.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = bucket_index(&key, self.table.len());
        let mut cursor = &mut self.table[index];

        loop {
            match cursor {
                Some(node) if node.key == key => {
                    return Some(mem::replace(&mut node.value, value));
                }
                Some(node) => cursor = &mut node.next,
                None => {
                    *cursor = Some(Box::new(Node::new(key, value)));
                    self.size += 1;
                    return None;
                }
            }
        }
    }

    /// Returns the value held under `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = bucket_index(key, self.table.len());
        let mut cursor = self.table[index].as_deref();

        while let Some(node) = cursor {
            if node.key.borrow() == key {
                return Some(&node.value);
            }
            cursor = node.next.as_deref();
        }

        None
    }

    /// Mutable access to the value held under `key`, if any.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = bucket_index(key, self.table.len());
        let mut cursor = self.table[index].as_deref_mut();

        while let Some(node) = cursor {
            if node.key.borrow() == key {
                return Some(&mut node.value);
            }
            cursor = node.next.as_deref_mut();
        }

        None
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Unlinks the entry for `key` and returns its value.
    ///
    /// The predecessor's link (or the bucket head) is relinked past the
    /// node; an absent key returns [`None`] and changes nothing.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = bucket_index(key, self.table.len());
        let mut cursor = &mut self.table[index];

        loop {
            match cursor {
                Some(node) if node.key.borrow() == key => {
                    let mut unlinked = cursor.take();

                    if let Some(node) = &mut unlinked {
                        *cursor = node.next.take();
                        self.size -= 1;
                    }

                    return unlinked.map(|node| node.value);
                }
                Some(node) => cursor = &mut node.next,
                None => return None,
            }
        }
    }

    /// Replaces the bucket array with one of the given length, re-placing
    /// every node against the new capacity.
    ///
    /// Nodes are relocated, not recreated, and the entry count is untouched.
    /// Chain order within a bucket may change. Shrinking is as valid as
    /// growing; the only rejected targets are zero and below, checked before
    /// anything is moved.
    pub fn resize(&mut self, capacity: isize) -> crate::Result<()> {
        if capacity <= 0 {
            return Err(TableError::InvalidCapacity(capacity));
        }

        let old = mem::replace(&mut self.table, empty_buckets(capacity as usize));

        for head in old {
            let mut cursor = head;

            while let Some(mut node) = cursor {
                cursor = node.next.take();

                let index = bucket_index(&node.key, self.table.len());
                node.next = self.table[index].take();
                self.table[index] = Some(node);
            }
        }

        Ok(())
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    (0..capacity).map(|_| None).collect()
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            next: None,
        }
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t, K, V> Iterator for Iter<'t, K, V> {
    type Item = (&'t K, &'t V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.cursor {
                self.cursor = node.next.as_deref();
                return Some((&node.key, &node.value));
            }

            self.cursor = self.buckets.next()?.as_deref();
        }
    }
}

impl<'t, K, V> IntoIterator for &'t HashTable<K, V> {
    type Item = (&'t K, &'t V);
    type IntoIter = Iter<'t, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One line per bucket: `<index>: <key>=<value> -> <key>=<value>`, with the
/// entries left out on empty buckets. Diagnostic output, but the exact shape
/// is part of the contract.
impl<K: Display, V: Display> Display for HashTable<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.table.iter().enumerate() {
            write!(f, "{index}: ")?;

            let mut cursor = bucket.as_deref();
            while let Some(node) = cursor {
                write!(f, "{key}={value}", key = node.key, value = node.value)?;

                if node.next.is_some() {
                    write!(f, " -> ")?;
                }
                cursor = node.next.as_deref();
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity(capacity) => {
                write!(f, "Invalid capacity {capacity}: it must be positive")
            }
        }
    }
}

impl std::error::Error for TableError {}
