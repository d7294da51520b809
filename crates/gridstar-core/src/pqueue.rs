use crate::node::Point;

/// Trait for ordering the elements of a [`PriorityQueue`].
pub trait Comparator<T> {
    /// Returns true if `lhs` is strictly less than `rhs`.
    fn less(&self, lhs: &T, rhs: &T) -> bool;
}

/// Orders elements by their `PartialOrd` implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<T: PartialOrd> Comparator<T> for NaturalOrder {
    #[inline(always)]
    fn less(&self, lhs: &T, rhs: &T) -> bool {
        lhs < rhs
    }
}

/// Orders [`Point`]s by total cost (f).
#[derive(Clone, Copy, Debug, Default)]
pub struct TotalCost;

impl Comparator<Point> for TotalCost {
    #[inline(always)]
    fn less(&self, lhs: &Point, rhs: &Point) -> bool {
        lhs.total_cost() < rhs.total_cost()
    }
}

/// Which end of the ordering a [`PriorityQueue`] hands out first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HeapOrder {
    /// Min-heap: the least element is popped first.
    #[default]
    Ascending,
    /// Max-heap: the greatest element is popped first.
    Descending,
}

/// Array-backed binary heap.
///
/// Comparisons are strict, so elements that compare equal are never swapped past each other
/// during a sift. When both children of a node are candidates during sift-down, the left child
/// wins unless the right child is strictly better.
#[derive(Clone, Debug)]
pub struct PriorityQueue<T, C> {
    cmp: C,
    order: HeapOrder,
    heap: Vec<T>,
}

impl<T, C: Comparator<T> + Default> Default for PriorityQueue<T, C> {
    fn default() -> Self {
        PriorityQueue::new(C::default())
    }
}

impl<T, C: Comparator<T>> PriorityQueue<T, C> {
    pub fn new(cmp: C) -> Self {
        Self::with_order(cmp, HeapOrder::Ascending)
    }

    pub fn with_order(cmp: C, order: HeapOrder) -> Self {
        PriorityQueue {
            cmp,
            order,
            heap: vec![],
        }
    }

    pub fn order(&self) -> HeapOrder {
        self.order
    }

    /// Changes between min- and max-heap, re-heapifying the current contents.
    pub fn set_order(&mut self, order: HeapOrder) {
        if self.order == order {
            return;
        }
        self.order = order;
        for index in (0..self.heap.len() / 2).rev() {
            self.sift_down(index);
        }
    }

    pub fn push(&mut self, item: T) {
        self.heap.push(item);
        self.sift_up(self.heap.len() - 1);
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let ret = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(ret)
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Linear scan for an element equal to `item`.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.heap.iter().any(|other| other == item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// The heap's backing array. Heap-ordered, not sorted.
    pub fn as_slice(&self) -> &[T] {
        &self.heap
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.heap.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.heap.iter()
    }

    /// Drains the queue in pop order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(item) = self.pop() {
            out.push(item);
        }
        out
    }

    #[inline(always)]
    fn better(&self, lhs: &T, rhs: &T) -> bool {
        match self.order {
            HeapOrder::Ascending => self.cmp.less(lhs, rhs),
            HeapOrder::Descending => self.cmp.less(rhs, lhs),
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent_index = (index - 1) / 2;
            if !self.better(&self.heap[index], &self.heap[parent_index]) {
                break;
            }
            self.heap.swap(index, parent_index);
            index = parent_index;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = index * 2 + 1;
            let right = left + 1;
            let mut holder = index;
            if left < self.heap.len() && self.better(&self.heap[left], &self.heap[holder]) {
                holder = left;
            }
            if right < self.heap.len() && self.better(&self.heap[right], &self.heap[holder]) {
                holder = right;
            }
            if holder == index {
                break;
            }
            self.heap.swap(index, holder);
            index = holder;
        }
    }
}

impl<T, C: Comparator<T>> Extend<T> for PriorityQueue<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T, C: Comparator<T>> IntoIterator for &'a PriorityQueue<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
