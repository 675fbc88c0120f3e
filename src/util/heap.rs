//! In-place binary heap helpers
//!
//! `std::collections::BinaryHeap` owns its storage and only exposes a
//! push/pop interface. The weighted picker needs to mutate the root in
//! place and re-establish the heap property with a comparator that changes
//! on every call, so it keeps a plain `Vec` and uses these helpers instead.
//!
//! The layout is the usual implicit one: the children of `i` live at
//! `2i + 1` and `2i + 2`. The comparator is an "is less" predicate and the
//! root is the greatest element under it, so `less(parent, child)` is false
//! for every edge of a valid heap.
//!
//! # Example
//!
//! ```
//! use controlled_random::util::heap::{heap_top_updated, make_heap_by};
//!
//! let mut heap = vec![3, 9, 4, 1, 7];
//! make_heap_by(&mut heap, |a, b| a < b);
//! assert_eq!(heap[0], 9);
//!
//! heap[0] = 2;
//! heap_top_updated(&mut heap);
//! assert_eq!(heap[0], 7);
//! ```

/// Restore the heap property after the root of `heap` changed.
///
/// Uses the natural ordering of `T`, producing a max-heap.
#[inline]
pub fn heap_top_updated<T: Ord>(heap: &mut [T]) {
    heap_top_updated_by(heap, |a, b| a < b);
}

/// Restore the heap property after the root of `heap` changed, ordering
/// elements with `less`.
///
/// Only swaps along a single root-to-leaf path are performed, so this is
/// O(log N). Every element other than the root must already satisfy the
/// heap property under `less`; if it doesn't, the result is still a
/// permutation of the input but not necessarily a heap.
#[inline]
pub fn heap_top_updated_by<T, F>(heap: &mut [T], mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    sift_down(heap, 0, &mut less);
}

/// Arrange `heap` into a valid heap under `less`.
pub fn make_heap_by<T, F>(heap: &mut [T], mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = heap.len();
    if len < 2 {
        return;
    }
    for start in (0..len / 2).rev() {
        sift_down(heap, start, &mut less);
    }
}

fn sift_down<T, F>(heap: &mut [T], start: usize, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = heap.len();
    let mut current = start;
    loop {
        let mut child = current * 2 + 1;
        if child >= len {
            break;
        }
        let second = child + 1;
        if second < len && less(&heap[child], &heap[second]) {
            child = second;
        }
        if !less(&heap[current], &heap[child]) {
            break;
        }
        heap.swap(current, child);
        current = child;
    }
}
