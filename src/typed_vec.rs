//! Typed arenas.
//!
//! Everything in this crate that would be a pointer in a garbage-collected
//! implementation (events, segments, rings, and so on) lives in an arena and
//! is addressed by a typed integer handle. The handles are `Copy`, cheap to
//! compare, and impossible to mix up across arenas.

use std::marker::PhantomData;

/// A typed index into a [`TypedVec`].
pub(crate) trait Idx: Copy + Eq {
    fn new(i: usize) -> Self;
    fn get(self) -> usize;
}

/// Declares an index newtype, with a short prefix for debug output.
macro_rules! typed_idx {
    ($(#[$attr:meta])* $name:ident, $prefix:expr) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub(crate) struct $name(pub(crate) usize);

        impl crate::typed_vec::Idx for $name {
            fn new(i: usize) -> Self {
                $name(i)
            }

            fn get(self) -> usize {
                self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }
    };
}

/// A vector that can only be indexed by its associated handle type.
#[derive(Clone)]
pub(crate) struct TypedVec<I, T> {
    inner: Vec<T>,
    marker: PhantomData<I>,
}

impl<I: Idx, T> TypedVec<I, T> {
    /// The handle that the next `push` will return.
    pub fn next_idx(&self) -> I {
        I::new(self.inner.len())
    }

    /// Adds a new element, returning its handle.
    pub fn push(&mut self, elt: T) -> I {
        self.inner.push(elt);
        I::new(self.inner.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates over all handles into this arena.
    #[allow(dead_code)]
    pub fn indices(&self) -> impl Iterator<Item = I> {
        (0..self.inner.len()).map(I::new)
    }
}

impl<I, T> Default for TypedVec<I, T> {
    fn default() -> Self {
        Self {
            inner: Vec::new(),
            marker: PhantomData,
        }
    }
}

impl<I: Idx, T> std::ops::Index<I> for TypedVec<I, T> {
    type Output = T;

    fn index(&self, index: I) -> &T {
        &self.inner[index.get()]
    }
}

impl<I: Idx, T> std::ops::IndexMut<I> for TypedVec<I, T> {
    fn index_mut(&mut self, index: I) -> &mut T {
        &mut self.inner[index.get()]
    }
}

impl<I: Idx + std::fmt::Debug, T: std::fmt::Debug> std::fmt::Debug for TypedVec<I, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (i, t) in self.inner.iter().enumerate() {
            map.entry(&I::new(i), t);
        }
        map.finish()
    }
}
