use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Key into an [`Arena`] carrying a slot index and a generation counter so a
/// stale key from a removed entry can never alias the slot's next occupant.
pub trait SlotKey: Copy + Eq {
    fn from_parts(index: u32, generation: u32) -> Self;
    fn index(self) -> usize;
    fn generation(self) -> u32;
}

macro_rules! slot_key {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name {
            index: u32,
            generation: u32,
        }

        impl SlotKey for $name {
            fn from_parts(index: u32, generation: u32) -> Self {
                Self { index, generation }
            }

            fn index(self) -> usize {
                self.index as usize
            }

            fn generation(self) -> u32 {
                self.generation
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::from_parts(u32::MAX, 0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}v{}", self.index, self.generation)
            }
        }
    };
}

slot_key! {
    /// Handle to a particle owned by an engine instance.
    ParticleId
}

slot_key! {
    /// Handle to a constraint owned by an engine instance.
    ConstraintId
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Generational slot arena. Insertion hands out typed keys; removal bumps the
/// slot generation so outstanding keys for the old occupant stop resolving.
#[derive(Debug, Clone)]
pub struct Arena<K, T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
    _key: PhantomData<K>,
}

impl<K: SlotKey, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SlotKey, T> Arena<K, T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            _key: PhantomData,
        }
    }

    pub fn insert(&mut self, value: T) -> K {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return K::from_parts(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        K::from_parts(index, 0)
    }

    pub fn contains(&self, key: K) -> bool {
        self.slots
            .get(key.index())
            .map(|slot| slot.generation == key.generation() && slot.value.is_some())
            .unwrap_or(false)
    }

    pub fn get(&self, key: K) -> Option<&T> {
        let slot = self.slots.get(key.index())?;
        if slot.generation != key.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        let slot = self.slots.get_mut(key.index())?;
        if slot.generation != key.generation() {
            return None;
        }
        slot.value.as_mut()
    }

    /// Disjoint mutable access to two entries. Returns `None` for identical
    /// indices or when either key is stale.
    pub fn pair_mut(&mut self, a: K, b: K) -> Option<(&mut T, &mut T)> {
        if a.index() == b.index() || !self.contains(a) || !self.contains(b) {
            return None;
        }

        let (low, high, swapped) = if a.index() < b.index() {
            (a.index(), b.index(), false)
        } else {
            (b.index(), a.index(), true)
        };

        let (head, tail) = self.slots.split_at_mut(high);
        let first = head[low].value.as_mut()?;
        let second = tail[0].value.as_mut()?;

        if swapped {
            Some((second, first))
        } else {
            Some((first, second))
        }
    }

    pub fn remove(&mut self, key: K) -> Option<T> {
        let slot = self.slots.get_mut(key.index())?;
        if slot.generation != key.generation() || slot.value.is_none() {
            return None;
        }

        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(key.index() as u32);
        self.live -= 1;
        slot.value.take()
    }

    /// Drops every entry while invalidating all outstanding keys.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index as u32);
        }
        self.free.reverse();
        self.live = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|value| (K::from_parts(index as u32, slot.generation), value))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| {
                let generation = slot.generation;
                slot.value
                    .as_mut()
                    .map(move |value| (K::from_parts(index as u32, generation), value))
            })
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_key_stops_resolving_after_slot_reuse() {
        let mut arena: Arena<ParticleId, &str> = Arena::new();
        let first = arena.insert("first");
        assert_eq!(arena.remove(first), Some("first"));

        let second = arena.insert("second");
        assert_eq!(first.index(), second.index());
        assert!(arena.get(first).is_none());
        assert_eq!(arena.get(second), Some(&"second"));
    }

    #[test]
    fn pair_mut_rejects_identical_slots() {
        let mut arena: Arena<ParticleId, i32> = Arena::new();
        let a = arena.insert(1);
        assert!(arena.pair_mut(a, a).is_none());

        let b = arena.insert(2);
        let (left, right) = arena.pair_mut(b, a).expect("distinct live keys");
        assert_eq!((*left, *right), (2, 1));
    }

    #[test]
    fn clear_invalidates_outstanding_keys() {
        let mut arena: Arena<ConstraintId, u8> = Arena::new();
        let key = arena.insert(7);
        arena.clear();
        assert!(arena.is_empty());
        assert!(arena.get(key).is_none());

        let reused = arena.insert(9);
        assert_eq!(reused.index(), key.index());
        assert_ne!(reused.generation(), key.generation());
    }
}
