//! Slot storage with stable typed ids.
//!
//! Removing an element leaves a hole that the next insertion reuses, so ids
//! of surviving elements never move while the half-edge structure is being
//! edited.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Id types usable as arena keys.
pub trait ArenaId: Copy + Eq {
    /// Build an id from a slot index.
    fn from_slot(slot: u32) -> Self;
    /// Slot index of this id.
    fn slot(self) -> usize;
}

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl ArenaId for $name {
            #[inline]
            fn from_slot(slot: u32) -> Self {
                Self(slot)
            }

            #[inline]
            fn slot(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

arena_id!(
    /// Vertex handle
    VertexId
);
arena_id!(
    /// Half-edge handle
    EdgeId
);
arena_id!(
    /// Face handle
    FaceId
);

/// Free-list backed storage.
#[derive(Clone)]
pub struct Arena<I: ArenaId, T> {
    slots: Vec<Option<T>>,
    free: Vec<u32>,
    len: usize,
    _id: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            _id: PhantomData,
        }
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty arena with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no element is live.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Id the next call to [`Arena::insert`] will return.
    pub fn next_id(&self) -> I {
        match self.free.last() {
            Some(&slot) => I::from_slot(slot),
            None => I::from_slot(self.slots.len() as u32),
        }
    }

    /// Store a value and return its id.
    pub fn insert(&mut self, value: T) -> I {
        self.len += 1;
        if let Some(slot) = self.free.pop() {
            self.slots[slot as usize] = Some(value);
            I::from_slot(slot)
        } else {
            self.slots.push(Some(value));
            I::from_slot((self.slots.len() - 1) as u32)
        }
    }

    /// Remove a value, freeing its slot.
    pub fn remove(&mut self, id: I) -> Option<T> {
        let value = self.slots.get_mut(id.slot())?.take()?;
        self.len -= 1;
        self.free.push(id.slot() as u32);
        Some(value)
    }

    /// Whether `id` refers to a live element.
    #[inline]
    pub fn contains(&self, id: I) -> bool {
        self.get(id).is_some()
    }

    #[inline]
    pub fn get(&self, id: I) -> Option<&T> {
        self.slots.get(id.slot())?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.slots.get_mut(id.slot())?.as_mut()
    }

    /// Live ids in slot order.
    pub fn ids(&self) -> impl Iterator<Item = I> + '_ {
        self.iter().map(|(id, _)| id)
    }

    /// Live elements in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, value)| value.as_ref().map(|v| (I::from_slot(slot as u32), v)))
    }

    /// Mutable live elements in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (I, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(slot, value)| value.as_mut().map(|v| (I::from_slot(slot as u32), v)))
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    #[inline]
    fn index(&self, id: I) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("stale arena id {}", id.slot()),
        }
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    #[inline]
    fn index_mut(&mut self, id: I) -> &mut T {
        let slot = id.slot();
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("stale arena id {slot}"),
        }
    }
}

impl<I: ArenaId + fmt::Debug, T: fmt::Debug> fmt::Debug for Arena<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
