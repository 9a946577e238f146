//! `Arena` - a chunked, address-stable object pool with bulk release.
//!
//! Goals:
//! - objects never move once allocated (chunks are boxed and never reallocated)
//! - O(1) allocation and O(1) lookup by slot index
//! - optional hard limit on the number of objects, reported as an error
//! - no per-object free: everything is released when the arena is dropped
//!
//! Slot indices are dense and assigned in allocation order, so iteration yields
//! objects in insertion order.

use crate::error::{AllocError, ArenaError};
use core::{fmt, mem::MaybeUninit, ptr};
use serde::Serialize;

/// A pool of `T` backed by fixed-size chunks of `MaybeUninit<T>`.
pub struct Arena<T, const CHUNK: usize = 64> {
    chunks: Vec<Box<[MaybeUninit<T>; CHUNK]>>,
    len: usize,
    limit: Option<usize>,
}

/// Occupancy snapshot of an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArenaStats {
    /// Number of allocated objects.
    pub len: usize,
    /// Number of slots across all allocated chunks.
    pub capacity: usize,
    /// Number of allocated chunks.
    pub chunks: usize,
    /// Slots per chunk.
    pub chunk_size: usize,
    /// Maximum number of objects, if bounded.
    pub limit: Option<usize>,
    /// Bytes reserved for slots (excluding heap data owned by the objects).
    pub reserved_bytes: usize,
}

impl ArenaStats {
    /// Fraction of reserved slots that hold an object.
    #[inline]
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.len as f64 / self.capacity as f64
    }
}

impl<T, const CHUNK: usize> Arena<T, CHUNK> {
    /// Creates an empty, unbounded arena. No chunk is allocated until the first object.
    pub const fn new() -> Self {
        assert!(CHUNK != 0, "Arena CHUNK must be > 0");
        Self {
            chunks: Vec::new(),
            len: 0,
            limit: None,
        }
    }

    /// Creates an unbounded arena with room for at least `capacity` objects.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_limit(capacity, None)
    }

    /// Creates an arena that refuses to hold more than `limit` objects.
    pub fn with_limit(limit: usize) -> Self {
        Self::with_capacity_and_limit(0, Some(limit))
    }

    /// Creates an arena with a capacity hint and an optional object limit.
    ///
    /// The reservation never exceeds the limit.
    pub fn with_capacity_and_limit(capacity: usize, limit: Option<usize>) -> Self {
        let mut arena = Self::new();
        arena.limit = limit;
        arena.reserve(capacity);
        arena
    }

    /// Returns the number of allocated objects.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been allocated.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the object limit, if any.
    #[inline]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns how many more objects may be allocated (`None` when unbounded).
    #[inline]
    pub fn remaining(&self) -> Option<usize> {
        self.limit.map(|limit| limit.saturating_sub(self.len))
    }

    /// Returns total slot capacity across allocated chunks.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.chunks.len() * CHUNK
    }

    /// Reserves chunks for at least `additional` more objects, clamped to the limit.
    pub fn reserve(&mut self, additional: usize) {
        let mut needed = self.len.saturating_add(additional);
        if let Some(limit) = self.limit {
            needed = needed.min(limit);
        }
        if needed <= self.capacity() {
            return;
        }
        let needed_chunks = needed.div_ceil(CHUNK);
        while self.chunks.len() < needed_chunks {
            self.grow();
        }
    }

    /// Allocates `value` and returns its slot index.
    ///
    /// On exhaustion the value is handed back inside the error and the arena is unchanged.
    pub fn try_alloc(&mut self, value: T) -> Result<usize, AllocError<T>> {
        if let Some(limit) = self.limit {
            if self.len >= limit {
                trace_event!(debug, limit, "arena exhausted");
                return Err(AllocError::new(ArenaError::Exhausted { limit }, value));
            }
        }
        if self.len == self.capacity() {
            self.grow();
        }
        let idx = self.len;
        let (c, o) = index_split::<CHUNK>(idx);
        // SAFETY: the chunk exists (grown above); offset in-bounds; slot uninitialized.
        unsafe {
            self.chunks
                .get_unchecked_mut(c)
                .as_mut_ptr()
                .add(o)
                .write(MaybeUninit::new(value));
        }
        self.len += 1;
        Ok(idx)
    }

    /// Allocates `value` and returns its slot index.
    ///
    /// # Panics
    /// Panics if the arena has reached its limit.
    pub fn alloc(&mut self, value: T) -> usize {
        match self.try_alloc(value) {
            Ok(idx) => idx,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns a shared reference to the object in slot `idx`.
    pub fn get(&self, idx: usize) -> Option<&T> {
        if idx >= self.len {
            return None;
        }
        let (c, o) = index_split::<CHUNK>(idx);
        // SAFETY: idx < len => slot initialized.
        unsafe { Some(self.chunks.get_unchecked(c).get_unchecked(o).assume_init_ref()) }
    }

    /// Returns a mutable reference to the object in slot `idx`.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        if idx >= self.len {
            return None;
        }
        let (c, o) = index_split::<CHUNK>(idx);
        // SAFETY: idx < len => slot initialized.
        unsafe {
            Some(
                self.chunks
                    .get_unchecked_mut(c)
                    .get_unchecked_mut(o)
                    .assume_init_mut(),
            )
        }
    }

    /// Returns an iterator over `&T` in allocation order.
    pub fn iter(&self) -> Iter<'_, T, CHUNK> {
        Iter {
            chunks: self.chunks.iter(),
            current: Default::default(),
            remaining: self.len,
        }
    }

    /// Returns an iterator over `&mut T` in allocation order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T, CHUNK> {
        IterMut {
            chunks: self.chunks.iter_mut(),
            current: Default::default(),
            remaining: self.len,
        }
    }

    /// Returns an occupancy snapshot.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            len: self.len,
            capacity: self.capacity(),
            chunks: self.chunks.len(),
            chunk_size: CHUNK,
            limit: self.limit,
            reserved_bytes: self.capacity() * core::mem::size_of::<T>(),
        }
    }

    fn grow(&mut self) {
        self.chunks.push(new_uninit_chunk::<T, CHUNK>());
        trace_event!(trace, chunks = self.chunks.len(), chunk_size = CHUNK, "arena grew");
    }
}

impl<T, const CHUNK: usize> Default for Arena<T, CHUNK> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const CHUNK: usize> fmt::Debug for Arena<T, CHUNK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const CHUNK: usize> Drop for Arena<T, CHUNK> {
    fn drop(&mut self) {
        // Drop only initialized objects; the chunks are released by `Vec`.
        let mut remaining = self.len;
        for chunk in &mut self.chunks {
            if remaining == 0 {
                break;
            }
            let to_drop = remaining.min(CHUNK);
            // SAFETY: the first `to_drop` slots of this chunk are initialized.
            unsafe {
                let base = chunk.as_mut_ptr().cast::<T>();
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base, to_drop));
            }
            remaining -= to_drop;
        }
    }
}

impl<'a, T, const CHUNK: usize> IntoIterator for &'a Arena<T, CHUNK> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, CHUNK>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `&T` for an [`Arena`].
pub struct Iter<'a, T, const CHUNK: usize> {
    chunks: core::slice::Iter<'a, Box<[MaybeUninit<T>; CHUNK]>>,
    current: core::slice::Iter<'a, MaybeUninit<T>>,
    remaining: usize,
}

impl<'a, T, const CHUNK: usize> Iterator for Iter<'a, T, CHUNK> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            if let Some(slot) = self.current.next() {
                self.remaining -= 1;
                // SAFETY: slots are initialized in chunk order; `remaining` stops us
                // before the first uninitialized slot.
                return Some(unsafe { slot.assume_init_ref() });
            }
            self.current = self.chunks.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, const CHUNK: usize> ExactSizeIterator for Iter<'a, T, CHUNK> {}

impl<'a, T, const CHUNK: usize> Clone for Iter<'a, T, CHUNK> {
    fn clone(&self) -> Self {
        Self {
            chunks: self.chunks.clone(),
            current: self.current.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator over `&mut T` for an [`Arena`].
pub struct IterMut<'a, T, const CHUNK: usize> {
    chunks: core::slice::IterMut<'a, Box<[MaybeUninit<T>; CHUNK]>>,
    current: core::slice::IterMut<'a, MaybeUninit<T>>,
    remaining: usize,
}

impl<'a, T, const CHUNK: usize> Iterator for IterMut<'a, T, CHUNK> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            if let Some(slot) = self.current.next() {
                self.remaining -= 1;
                // SAFETY: see `Iter::next`.
                return Some(unsafe { slot.assume_init_mut() });
            }
            self.current = self.chunks.next()?.iter_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, const CHUNK: usize> ExactSizeIterator for IterMut<'a, T, CHUNK> {}

#[inline(always)]
fn index_split<const CHUNK: usize>(idx: usize) -> (usize, usize) {
    if CHUNK.is_power_of_two() {
        let shift = CHUNK.trailing_zeros();
        (idx >> shift, idx & (CHUNK - 1))
    } else {
        (idx / CHUNK, idx % CHUNK)
    }
}

fn new_uninit_chunk<T, const CHUNK: usize>() -> Box<[MaybeUninit<T>; CHUNK]> {
    // Avoid creating a potentially large array on the stack.
    //
    // SAFETY: an uninitialized `[MaybeUninit<T>; CHUNK]` is valid; slots are written
    // individually and only the initialized prefix is ever read or dropped.
    unsafe { Box::<[MaybeUninit<T>; CHUNK]>::new_uninit().assume_init() }
}
