use std::mem;

#[cfg(test)]
use static_assertions::const_assert_eq;

/// An index into the node arena, or "null"
///
/// This type is essentially `Option<usize>`. The value usize::MAX is
/// reserved to represent "null". Every node stores three of these (parent,
/// left, right), so the compact representation matters for cache footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub(crate) struct Ptr(usize);

// A link should cost one word, not the two of `Option<usize>`
#[cfg(test)]
const_assert_eq!(mem::size_of::<Ptr>(), mem::size_of::<usize>());
#[cfg(test)]
const_assert_eq!(mem::size_of::<Option<usize>>(), 2 * mem::size_of::<usize>());

impl Default for Ptr {
    #[inline(always)]
    fn default() -> Self {
        Self::null()
    }
}

impl Ptr {
    #[inline(always)]
    pub fn null() -> Self {
        Ptr(usize::MAX)
    }

    // Methods on this type must be `#[inline]` to help the compiler see that
    // the `Option` values are only intermediate values used to make writing
    // code easier. Instead of checking for `None` and then `usize::MAX`, we
    // want the compiler to just check the latter.
    #[inline(always)]
    pub fn into_index(self) -> Option<usize> {
        let Ptr(index) = self;
        if index == usize::MAX {
            None
        } else {
            Some(index)
        }
    }

    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.0 == usize::MAX
    }
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(T),
    /// A previously removed entry, threaded into the free list
    Vacant {
        /// The next entry in the free list, or `Ptr::null()` if this is the
        /// last one
        next: Ptr,
    },
}

/// An allocation primitive similar to `Vec`, but implemented to reuse space
/// from removed entries.
///
/// Items are kept contiguously in memory, but indexes are not shifted when an
/// individual item is removed. Instead, vacated slots are threaded into a free
/// list (a linked stack stored inline in `slots`) and handed back out by later
/// calls to `push`. Occupancy is tracked per-slot, so resolving a pointer to a
/// removed entry is detected and treated as an internal invariant violation
/// (a panic), not undefined behavior.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    /// The first entry in the free list, or `Ptr::null()` if the free list is
    /// empty
    free_head: Ptr,
    /// The length of the free list
    free_len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::default(),
            free_head: Ptr::null(),
            free_len: 0,
        }
    }
}

impl<T> Arena<T> {
    /// Creates an empty arena
    ///
    /// The arena is initially created with a capacity of 0, so it will not
    /// allocate until it is first pushed into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the number of entries in the arena that contain values
    ///
    /// This is the number of items pushed minus the number of items removed
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_len
    }

    /// Returns true if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the arena can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns a reference to the value at the given pointer
    ///
    /// # Panics
    ///
    /// Panics if the pointer is null, out of bounds, or refers to a removed
    /// entry. Callers are expected to only resolve pointers they were handed
    /// by `push` and have not since passed to `remove`.
    pub fn get(&self, ptr: Ptr) -> &T {
        match ptr.into_index().map(|index| &self.slots[index]) {
            Some(Slot::Occupied(value)) => value,
            _ => panic!("arena pointer did not resolve to an occupied slot"),
        }
    }

    /// Returns a mutable reference to the value at the given pointer
    ///
    /// # Panics
    ///
    /// Same conditions as `get`.
    pub fn get_mut(&mut self, ptr: Ptr) -> &mut T {
        match ptr.into_index().map(move |index| &mut self.slots[index]) {
            Some(Slot::Occupied(value)) => value,
            _ => panic!("arena pointer did not resolve to an occupied slot"),
        }
    }

    /// Pushes a value into the arena and returns the pointer at which it was
    /// inserted.
    ///
    /// The item may be inserted at the end of the backing storage, or in the
    /// space left behind by a previously removed item. Pointers returned from
    /// this method remain valid until the item is removed or the arena is
    /// cleared.
    pub fn push(&mut self, value: T) -> Ptr {
        // Check if we can reuse some space from the free list
        if let Some(index) = self.free_head.into_index() {
            let slot = &mut self.slots[index];
            let next = match *slot {
                Slot::Vacant {next} => next,
                // The free list only ever points at vacant slots
                Slot::Occupied(_) => unreachable!("occupied slot found on the arena free list"),
            };

            self.free_head = next;
            self.free_len -= 1;
            *slot = Slot::Occupied(value);

            return Ptr(index);
        }

        let index = self.slots.len();
        // `usize::MAX` is reserved as the null pointer
        if index == usize::MAX {
            panic!("cannot have more than usize::MAX - 1 entries in arena");
        }

        self.slots.push(Slot::Occupied(value));

        Ptr(index)
    }

    /// Removes an item from the arena, returning its value.
    ///
    /// Note that this method has no effect on the allocated capacity of the
    /// arena. The slot will be reused by future calls to `push`. No other
    /// entries are moved or modified, so their pointers remain valid.
    ///
    /// # Panics
    ///
    /// Panics if the pointer is null, out of bounds, or refers to an entry
    /// that was already removed.
    pub fn remove(&mut self, ptr: Ptr) -> T {
        let index = match ptr.into_index() {
            Some(index) => index,
            None => panic!("attempt to remove the null pointer from an arena"),
        };

        let slot = mem::replace(&mut self.slots[index], Slot::Vacant {
            next: self.free_head,
        });
        let value = match slot {
            Slot::Occupied(value) => value,
            Slot::Vacant {..} => panic!("attempt to remove an already vacant arena slot"),
        };

        self.free_head = ptr;
        self.free_len += 1;

        value
    }

    /// Clears the arena, removing all values.
    ///
    /// Note that this method has no effect on the allocated capacity of the
    /// arena. This invalidates all previous pointers returned from `push`.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = Ptr::null();
        self.free_len = 0;
    }

    /// Reserves capacity for at least `additional` more elements to be
    /// inserted in the arena. Does nothing if capacity is already sufficient.
    pub fn reserve(&mut self, additional: usize) {
        // Slots on the free list will be reused before new capacity is needed
        let reusable = self.free_len;
        self.slots.reserve(additional.saturating_sub(reusable));
    }

    /// Shrinks the capacity of the arena as much as possible.
    ///
    /// It will drop down as close as possible to the length but may still be
    /// greater.
    pub fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit();
    }
}
