//! Explicit allocation context for mesh storage.
//!
//! Every [`IndexBuffer`] is created inside an [`Arena`] and charges the bytes
//! it reserves to that arena. The arena is a cheap handle; cloning it yields
//! another handle to the same accounting, not a new arena.
//!
//! Propagation rules:
//! - [`Clone`] on a buffer (or mesh) copies into the source's arena.
//! - `clone_in(&arena)` copies into a caller-chosen arena.
//! - Moving a buffer keeps its arena.

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::mesh::Index;

#[derive(Default)]
struct ArenaStats {
    name: String,
    live_bytes: AtomicUsize,
    peak_bytes: AtomicUsize,
    allocations: AtomicUsize,
}

/// A handle to an allocation context.
#[derive(Clone, Default)]
pub struct Arena {
    stats: Arc<ArenaStats>,
}

impl Arena {
    /// Create a new arena with a descriptive name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            stats: Arc::new(ArenaStats {
                name: name.into(),
                ..ArenaStats::default()
            }),
        }
    }

    /// The arena's name.
    pub fn name(&self) -> &str {
        &self.stats.name
    }

    /// Bytes currently reserved by buffers living in this arena.
    pub fn live_bytes(&self) -> usize {
        self.stats.live_bytes.load(Ordering::Relaxed)
    }

    /// Highest value [`Arena::live_bytes`] has reached.
    pub fn peak_bytes(&self) -> usize {
        self.stats.peak_bytes.load(Ordering::Relaxed)
    }

    /// Number of reservations made in this arena.
    pub fn allocation_count(&self) -> usize {
        self.stats.allocations.load(Ordering::Relaxed)
    }

    /// Whether two handles refer to the same arena.
    pub fn same_arena(&self, other: &Arena) -> bool {
        Arc::ptr_eq(&self.stats, &other.stats)
    }

    fn charge(&self, bytes: usize) {
        if bytes == 0 {
            return;
        }
        self.stats.allocations.fetch_add(1, Ordering::Relaxed);
        let live = self.stats.live_bytes.fetch_add(bytes, Ordering::Relaxed) + bytes;
        self.stats.peak_bytes.fetch_max(live, Ordering::Relaxed);
    }

    fn refund(&self, bytes: usize) {
        if bytes > 0 {
            self.stats.live_bytes.fetch_sub(bytes, Ordering::Relaxed);
        }
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("name", &self.stats.name)
            .field("live_bytes", &self.live_bytes())
            .field("peak_bytes", &self.peak_bytes())
            .finish()
    }
}

/// A flat array of [`Index`] values owned by an [`Arena`].
///
/// This is the storage unit of the mesh topology tables. It derefs to a
/// plain `&[Index]` so external collaborators can read it directly.
pub struct IndexBuffer {
    data: Vec<Index>,
    charged: usize,
    arena: Arena,
}

impl IndexBuffer {
    /// Create an empty buffer in the given arena.
    pub fn new_in(arena: &Arena) -> Self {
        Self {
            data: Vec::new(),
            charged: 0,
            arena: arena.clone(),
        }
    }

    /// Take ownership of `data`, charging its capacity to `arena`.
    pub fn from_vec_in(data: Vec<Index>, arena: &Arena) -> Self {
        let charged = data.capacity() * std::mem::size_of::<Index>();
        arena.charge(charged);
        Self {
            data,
            charged,
            arena: arena.clone(),
        }
    }

    /// Create a buffer of `len` copies of `value`.
    pub fn filled_in(len: usize, value: Index, arena: &Arena) -> Self {
        Self::from_vec_in(vec![value; len], arena)
    }

    /// Replace the contents, keeping the arena.
    pub fn assign(&mut self, data: Vec<Index>) {
        *self = Self::from_vec_in(data, &self.arena);
    }

    /// Drop all contents and release the reservation, keeping the arena.
    pub fn clear(&mut self) {
        self.assign(Vec::new());
    }

    /// Copy this buffer into another arena.
    pub fn clone_in(&self, arena: &Arena) -> Self {
        Self::from_vec_in(self.data.clone(), arena)
    }

    /// The arena this buffer lives in.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The contents as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Index] {
        &self.data
    }
}

impl Deref for IndexBuffer {
    type Target = [Index];

    #[inline]
    fn deref(&self) -> &[Index] {
        &self.data
    }
}

impl Clone for IndexBuffer {
    fn clone(&self) -> Self {
        self.clone_in(&self.arena)
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        self.arena.refund(self.charged);
    }
}

impl fmt::Debug for IndexBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}
