//! Indexed binary min-heap.
//!
//! Dijkstra and A* need to lower the priority of a vertex that is already on
//! the frontier. A plain `BinaryHeap` can't do that without a linear scan, so
//! this queue keeps an inverse position table next to the heap: "is index `i`
//! queued, and where?" is answered in O(1) and every mutation is O(log n).

/// Errors from [`IndexMinPq`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// Index is not below the queue's capacity
    #[error("index {index} out of range for capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    /// Index is already on the queue
    #[error("index {0} is already in the priority queue")]
    AlreadyPresent(usize),

    /// Index is not on the queue
    #[error("index {0} is not in the priority queue")]
    NotPresent(usize),

    /// Queue has no elements
    #[error("priority queue underflow")]
    Empty,
}

/// An indexed min-priority queue over the indices `0..capacity`.
///
/// Each index present in the queue carries a key; [`del_min`](Self::del_min)
/// returns the index with the smallest key. Ties are broken by heap structure,
/// which is deterministic for a given sequence of operations.
///
/// # Examples
///
/// ```
/// use transit_paths::index_pq::IndexMinPq;
///
/// let mut pq = IndexMinPq::new(4);
/// pq.insert(2, 7.5).unwrap();
/// pq.insert(0, 3.0).unwrap();
/// pq.insert(3, 9.0).unwrap();
/// pq.change_key(3, 1.0).unwrap();
///
/// assert_eq!(pq.del_min(), Ok(3));
/// assert_eq!(pq.del_min(), Ok(0));
/// assert!(pq.contains(2));
/// assert!(!pq.contains(3));
/// ```
#[derive(Debug, Clone)]
pub struct IndexMinPq<K> {
    /// Binary heap of indices, 1-based (slot 0 is unused).
    heap: Vec<usize>,
    /// Inverse of `heap`: `positions[i]` is the heap slot of index `i`.
    positions: Vec<Option<usize>>,
    keys: Vec<Option<K>>,
}

impl<K: PartialOrd> IndexMinPq<K> {
    /// Create an empty queue accepting indices in `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        let mut heap = Vec::with_capacity(capacity + 1);
        heap.push(usize::MAX);
        Self {
            heap,
            positions: vec![None; capacity],
            keys: std::iter::repeat_with(|| None).take(capacity).collect(),
        }
    }

    /// Maximum number of distinct indices.
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Number of indices currently queued.
    pub fn len(&self) -> usize {
        self.heap.len() - 1
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `index` is queued. Out-of-range indices are never queued.
    pub fn contains(&self, index: usize) -> bool {
        self.positions.get(index).is_some_and(Option::is_some)
    }

    /// Key currently associated with `index`, if it is queued.
    pub fn key_of(&self, index: usize) -> Option<&K> {
        self.keys.get(index).and_then(Option::as_ref)
    }

    /// Index with the smallest key, without removing it.
    pub fn min_index(&self) -> Option<usize> {
        self.heap.get(1).copied()
    }

    /// Smallest key, without removing it.
    pub fn min_key(&self) -> Option<&K> {
        self.min_index().and_then(|i| self.key_of(i))
    }

    /// Queue `index` with `key`.
    pub fn insert(&mut self, index: usize, key: K) -> Result<(), QueueError> {
        self.check_range(index)?;
        if self.contains(index) {
            return Err(QueueError::AlreadyPresent(index));
        }

        self.heap.push(index);
        let slot = self.len();
        self.positions[index] = Some(slot);
        self.keys[index] = Some(key);
        self.swim(slot);
        Ok(())
    }

    /// Replace the key of a queued `index`, moving it up or down as needed.
    pub fn change_key(&mut self, index: usize, key: K) -> Result<(), QueueError> {
        self.check_range(index)?;
        let slot = self.positions[index].ok_or(QueueError::NotPresent(index))?;

        self.keys[index] = Some(key);
        self.swim(slot);
        // swim may have moved it; sink from wherever it ended up
        if let Some(slot) = self.positions[index] {
            self.sink(slot);
        }
        Ok(())
    }

    /// Remove and return the index with the smallest key.
    pub fn del_min(&mut self) -> Result<usize, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }

        let last = self.len();
        self.exchange(1, last);
        let min = self.heap.pop().ok_or(QueueError::Empty)?;
        self.positions[min] = None;
        self.keys[min] = None;
        if !self.is_empty() {
            self.sink(1);
        }
        Ok(min)
    }

    fn check_range(&self, index: usize) -> Result<(), QueueError> {
        if index >= self.capacity() {
            return Err(QueueError::IndexOutOfRange {
                index,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    /// True if the key at heap slot `a` is strictly greater than at slot `b`.
    ///
    /// Incomparable keys (NaN) are treated as not greater, which leaves the
    /// heap where it is rather than looping.
    fn greater(&self, a: usize, b: usize) -> bool {
        match (&self.keys[self.heap[a]], &self.keys[self.heap[b]]) {
            (Some(ka), Some(kb)) => ka > kb,
            _ => false,
        }
    }

    fn exchange(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a]] = Some(a);
        self.positions[self.heap[b]] = Some(b);
    }

    fn swim(&mut self, mut slot: usize) {
        while slot > 1 && self.greater(slot / 2, slot) {
            self.exchange(slot, slot / 2);
            slot /= 2;
        }
    }

    fn sink(&mut self, mut slot: usize) {
        let n = self.len();
        while 2 * slot <= n {
            let mut child = 2 * slot;
            if child < n && self.greater(child, child + 1) {
                child += 1;
            }
            if !self.greater(slot, child) {
                break;
            }
            self.exchange(slot, child);
            slot = child;
        }
    }
}
