use crate::airport::{AirportCode, AirportEntry};
use crate::record::DelayRecord;
use std::cmp::Ordering;
use std::sync::Arc;

struct Node {
    entry: AirportEntry,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(code: AirportCode) -> Node {
        Node {
            entry: AirportEntry::new(code),
            left: None,
            right: None,
        }
    }
}

/// Unbalanced binary search tree of airports keyed by code.
///
/// Codes compare bytewise. Each node exclusively owns its children, and every
/// walk over the tree is iterative, so already-sorted input (which degrades the
/// tree to a list) costs time but never stack depth.
#[derive(Default)]
pub struct AirportIndex {
    root: Option<Box<Node>>,
    len: usize,
}

impl AirportIndex {
    pub fn new() -> AirportIndex {
        AirportIndex::default()
    }

    /// Number of distinct airport codes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ensures a node for `code` exists. Inserting a known code is a no-op.
    pub fn insert(&mut self, code: &str) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            match code.cmp(node.entry.code()) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
                Ordering::Equal => return,
            }
        }
        *slot = Some(Box::new(Node::new(Arc::from(code))));
        self.len += 1;
    }

    /// Adds `minutes` to `airline` at `code`, creating the airline if needed.
    ///
    /// The airport itself is never created here: if `code` was not inserted
    /// first, the minutes are dropped and `false` is returned. Use
    /// [`AirportIndex::record`] for find-or-insert semantics.
    pub fn accumulate(&mut self, code: &str, airline: &str, minutes: i64) -> bool {
        match self.find_mut(code) {
            Some(entry) => {
                entry.airline_mut(airline).add(minutes);
                true
            }
            None => false,
        }
    }

    /// Inserts the record's airport if absent, then accumulates its minutes.
    pub fn record(&mut self, record: &DelayRecord) {
        self.insert(&record.airport);
        self.accumulate(&record.airport, &record.airline, record.minutes);
    }

    fn find_mut(&mut self, code: &str) -> Option<&mut AirportEntry> {
        let mut cur = self.root.as_deref_mut();
        while let Some(node) = cur {
            match code.cmp(node.entry.code()) {
                Ordering::Less => cur = node.left.as_deref_mut(),
                Ordering::Greater => cur = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.entry),
            }
        }
        None
    }

    /// Fresh in-order walk: airports by ascending code.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder::new(self.root.as_deref())
    }
}

impl Drop for AirportIndex {
    fn drop(&mut self) {
        // unlink nodes one by one instead of letting Box recurse down a long spine
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl Extend<DelayRecord> for AirportIndex {
    fn extend<T: IntoIterator<Item = DelayRecord>>(&mut self, iter: T) {
        iter.into_iter().for_each(|r| self.record(&r));
    }
}

impl FromIterator<DelayRecord> for AirportIndex {
    fn from_iter<T: IntoIterator<Item = DelayRecord>>(iter: T) -> Self {
        let mut index = AirportIndex::new();
        index.extend(iter);
        index
    }
}

impl<'a> IntoIterator for &'a AirportIndex {
    type Item = &'a AirportEntry;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Stack-driven in-order iterator over an [`AirportIndex`].
pub struct InOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> InOrder<'a> {
    fn new(root: Option<&'a Node>) -> InOrder<'a> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut cur: Option<&'a Node>) {
        while let Some(node) = cur {
            self.stack.push(node);
            cur = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a AirportEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        Some(&node.entry)
    }
}
