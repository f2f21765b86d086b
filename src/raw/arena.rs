use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes. Every node is owned by exactly one slot, so
/// dropping or clearing the arena tears the whole tree down without recursion.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            // Reuse a free slot/handle.
            self.slots[h.to_index()] = Some(element);
            h
        } else {
            // Strict less-than keeps the last index representable as a `Handle`.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Returns the element for `handle`, or `None` if the slot is out of range or free.
    #[inline]
    pub(crate) fn try_get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.to_index()).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn try_get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots.get_mut(handle.to_index()).and_then(Option::as_mut)
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn freed_slot_is_reused() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        arena.free(a);
        assert!(arena.try_get(a).is_none());
        let c = arena.alloc(3);
        assert_eq!(a, c);
        assert_eq!(*arena.get(b), 2);
        assert_eq!(*arena.get(c), 3);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn try_get_out_of_range() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(7);
        arena.clear();
        assert!(arena.try_get(a).is_none());
        assert!(arena.try_get_mut(a).is_none());
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn get_freed_handle_panics() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(7);
        arena.free(a);
        let _ = arena.get(a);
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        model.push((handle, value));
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        *arena.get_mut(handle) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        let value1 = arena.take(handle);
                        let (_, value2) = model.swap_remove(index);
                        prop_assert_eq!(value1, value2);
                        prop_assert!(arena.try_get(handle).is_none());
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());

                for &(handle, value) in &model {
                    prop_assert_eq!(arena.try_get(handle).copied(), Some(value));
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        GetMut(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            5 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
