use alloc::boxed::Box;
use core::cell::{Cell, RefCell, RefMut};
use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::math::WorldVector;

/// Temporary vectors used while evaluating a single geometric predicate.
///
/// The contents are meaningless between uses; every user must write a slot before
/// reading it.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct Scratch {
    /// General-purpose vector slots.
    pub vectors: [WorldVector; 4],
    /// Slots for a set of three basis vectors.
    pub axes: [WorldVector; 3],
}

/// A stack of [`Scratch`] frames confined to one thread.
///
/// [`ScratchPool::acquire()`] hands out the next free frame as a [`ScratchGuard`], which
/// returns it to the pool when dropped. Guards must be dropped in the reverse of the
/// order they were acquired, which ordinary scoping guarantees.
pub struct ScratchPool {
    frames: Box<[RefCell<Scratch>]>,
    depth: Cell<usize>,
}

impl ScratchPool {
    /// Number of frames in a pool created by [`ScratchPool::new()`].
    ///
    /// Predicates never nest more than a couple of levels, so this leaves headroom for
    /// callers that hold a frame of their own.
    pub const DEFAULT_CAPACITY: usize = 5;

    /// Creates a pool with [`Self::DEFAULT_CAPACITY`] frames.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a pool with the given number of frames.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: (0..capacity).map(|_| RefCell::new(Scratch::default())).collect(),
            depth: Cell::new(0),
        }
    }

    /// Takes the next free frame.
    ///
    /// Panics if every frame is already in use. That can only happen if guards are being
    /// kept alive longer than a single computation, which is a bug in the caller.
    #[inline]
    #[track_caller]
    pub fn acquire(&self) -> ScratchGuard<'_> {
        let level = self.depth.get();
        let Some(frame) = self.frames.get(level) else {
            panic!(
                "scratch pool exhausted: all {} frames in use",
                self.frames.len()
            );
        };
        let scratch = frame.borrow_mut();
        self.depth.set(level + 1);
        ScratchGuard {
            pool: self,
            level,
            scratch,
        }
    }

    /// Returns the number of frames currently acquired.
    #[inline]
    pub fn in_use(&self) -> usize {
        self.depth.get()
    }

    /// Returns the total number of frames.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.frames.len()
    }
}

impl Default for ScratchPool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScratchPool {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScratchPool")
            .field("capacity", &self.capacity())
            .field("in_use", &self.in_use())
            .finish_non_exhaustive()
    }
}

/// Exclusive access to one frame of a [`ScratchPool`], released on drop.
pub struct ScratchGuard<'pool> {
    pool: &'pool ScratchPool,
    level: usize,
    scratch: RefMut<'pool, Scratch>,
}

impl Deref for ScratchGuard<'_> {
    type Target = Scratch;
    #[inline]
    fn deref(&self) -> &Scratch {
        &self.scratch
    }
}

impl DerefMut for ScratchGuard<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Scratch {
        &mut self.scratch
    }
}

impl Drop for ScratchGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        debug_assert_eq!(
            self.pool.depth.get(),
            self.level + 1,
            "scratch frames released out of order"
        );
        self.pool.depth.set(self.level);
    }
}

impl fmt::Debug for ScratchGuard<'_> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScratchGuard")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::vec3;

    #[test]
    fn nested_acquire_and_release() {
        let pool = ScratchPool::with_capacity(2);
        {
            let mut outer = pool.acquire();
            outer.vectors[0] = vec3(1., 2., 3.);
            assert_eq!(pool.in_use(), 1);
            {
                let _inner = pool.acquire();
                assert_eq!(pool.in_use(), 2);
            }
            assert_eq!(pool.in_use(), 1);
            assert_eq!(outer.vectors[0], vec3(1., 2., 3.));
        }
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn released_on_early_return() {
        fn uses_scratch(pool: &ScratchPool, bail: bool) -> Option<f32> {
            let mut s = pool.acquire();
            s.vectors[1] = vec3(0., 1., 0.);
            if bail {
                return None;
            }
            Some(s.vectors[1].y)
        }
        let pool = ScratchPool::new();
        assert_eq!(uses_scratch(&pool, true), None);
        assert_eq!(pool.in_use(), 0);
        assert_eq!(uses_scratch(&pool, false), Some(1.0));
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    #[should_panic = "scratch pool exhausted: all 1 frames in use"]
    fn exhaustion_panics() {
        let pool = ScratchPool::with_capacity(1);
        let _a = pool.acquire();
        let _b = pool.acquire();
    }
}
