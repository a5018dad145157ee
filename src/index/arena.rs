// Copyright 2025 Stockyard Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Slot-vector arena with free-list reuse
//!
//! Nodes live in one growable vector and are addressed by [`NodeId`]
//! handles instead of pointers. A released slot goes onto a free list and
//! is handed out again by the next allocation (LIFO), so insert/remove
//! cycles do not grow the vector without bound.
//!
//! Ids are stable: a slot is cleared in place, never shifted, so every
//! other live id stays valid across `release`. Cloning the arena clones
//! the slot vector and all ids remain meaningful in the copy.

/// Stable handle to an arena slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    /// Slot position inside the arena vector.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Growable slot storage with stable ids.
///
/// `alloc` prefers a vacated slot over growing the vector; `release`
/// drops the value immediately and remembers the slot for reuse.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    /// Vacated slot ids, reused LIFO by `alloc`.
    free: Vec<NodeId>,
}

impl<T> Arena<T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Create an arena with pre-allocated slot capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Store a value, reusing a vacated slot when one exists.
    pub fn alloc(&mut self, value: T) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(value);
                id
            }
            None => {
                debug_assert!(self.slots.len() < u32::MAX as usize);
                let id = NodeId(self.slots.len() as u32);
                self.slots.push(Some(value));
                id
            }
        }
    }

    /// Take the value out of a slot and queue the slot for reuse.
    ///
    /// Panics if the slot is already vacant; releasing the same id twice
    /// is a logic error in the caller.
    pub fn release(&mut self, id: NodeId) -> T {
        let value = self.slots[id.index()]
            .take()
            .expect("release of a vacant arena slot");
        self.free.push(id);
        value
    }

    /// Borrow the value in a live slot.
    #[inline]
    pub fn get(&self, id: NodeId) -> &T {
        self.slots[id.index()].as_ref().expect("vacant arena slot")
    }

    /// Mutably borrow the value in a live slot.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut T {
        self.slots[id.index()].as_mut().expect("vacant arena slot")
    }

    /// Mutably borrow two distinct live slots at once.
    ///
    /// Panics if `a == b`.
    pub fn get2_mut(&mut self, a: NodeId, b: NodeId) -> (&mut T, &mut T) {
        let (i, j) = (a.index(), b.index());
        assert_ne!(i, j, "get2_mut needs two distinct slots");
        if i < j {
            let (lo, hi) = self.slots.split_at_mut(j);
            (
                lo[i].as_mut().expect("vacant arena slot"),
                hi[0].as_mut().expect("vacant arena slot"),
            )
        } else {
            let (lo, hi) = self.slots.split_at_mut(i);
            (
                hi[0].as_mut().expect("vacant arena slot"),
                lo[j].as_mut().expect("vacant arena slot"),
            )
        }
    }

    /// Number of live values.
    #[inline]
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Total slots ever allocated, vacant ones included.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// True when no live values remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live() == 0
    }

    /// Drop every value and forget all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_get() {
        let mut arena = Arena::new();
        let a = arena.alloc("alpha");
        let b = arena.alloc("beta");

        assert_eq!(*arena.get(a), "alpha");
        assert_eq!(*arena.get(b), "beta");
        assert_eq!(arena.live(), 2);
        assert_eq!(arena.slot_count(), 2);
    }

    #[test]
    fn test_release_then_alloc_reuses_slot() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        let c = arena.alloc(3);

        assert_eq!(arena.release(b), 2);
        assert_eq!(arena.live(), 2);

        // Freed slot comes back LIFO, so the vector does not grow
        let d = arena.alloc(4);
        assert_eq!(d, b);
        assert_eq!(arena.slot_count(), 3);
        assert_eq!(*arena.get(d), 4);

        // Ids allocated before the release stay valid
        assert_eq!(*arena.get(a), 1);
        assert_eq!(*arena.get(c), 3);
    }

    #[test]
    fn test_release_order_is_lifo() {
        let mut arena = Arena::new();
        let a = arena.alloc(10);
        let b = arena.alloc(20);
        arena.release(a);
        arena.release(b);

        assert_eq!(arena.alloc(30), b);
        assert_eq!(arena.alloc(40), a);
        assert_eq!(arena.slot_count(), 2);
    }

    #[test]
    fn test_get2_mut_disjoint_borrows() {
        let mut arena = Arena::new();
        let a = arena.alloc(100);
        let b = arena.alloc(200);

        {
            let (x, y) = arena.get2_mut(a, b);
            std::mem::swap(x, y);
        }
        assert_eq!(*arena.get(a), 200);
        assert_eq!(*arena.get(b), 100);

        // Order of arguments does not matter
        {
            let (y, x) = arena.get2_mut(b, a);
            std::mem::swap(x, y);
        }
        assert_eq!(*arena.get(a), 100);
        assert_eq!(*arena.get(b), 200);
    }

    #[test]
    #[should_panic(expected = "distinct slots")]
    fn test_get2_mut_same_slot_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        let _ = arena.get2_mut(a, a);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut arena = Arena::new();
        for i in 0..8 {
            arena.alloc(i);
        }
        arena.clear();

        assert!(arena.is_empty());
        assert_eq!(arena.slot_count(), 0);

        let id = arena.alloc(99);
        assert_eq!(id.index(), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut arena = Arena::new();
        let a = arena.alloc(String::from("original"));
        let copy = arena.clone();

        *arena.get_mut(a) = String::from("changed");
        assert_eq!(*copy.get(a), "original");
        assert_eq!(*arena.get(a), "changed");
    }

    #[test]
    fn test_mutation_in_place() {
        let mut arena = Arena::new();
        let a = arena.alloc(vec![1, 2, 3]);
        arena.get_mut(a).push(4);
        assert_eq!(*arena.get(a), vec![1, 2, 3, 4]);
    }
}
