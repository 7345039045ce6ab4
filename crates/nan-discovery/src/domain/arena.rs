//! Generation-checked instance arena
//!
//! Freed slots are reused, but each reuse bumps the slot generation so an
//! id handed out before a cancel never resolves to the new occupant. A slot
//! whose generation cannot be bumped any further is retired.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a Publish or Subscribe instance on one device
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId {
    slot: u16,
    generation: u16,
}

/// Handle of a Publish instance
pub type PublishId = InstanceId;
/// Handle of a Subscribe instance
pub type SubscribeId = InstanceId;

impl InstanceId {
    pub const fn new(slot: u16, generation: u16) -> Self {
        Self { slot, generation }
    }

    pub fn slot(&self) -> u16 {
        self.slot
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }

    /// 1-based instance number as exposed on the air
    pub fn number(&self) -> u32 {
        u32::from(self.slot) + 1
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.number(), self.generation)
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u16,
    value: Option<T>,
}

/// Fixed-capacity arena keyed by [`InstanceId`]
#[derive(Debug)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u16>,
    capacity: usize,
    len: usize,
    retired: usize,
}

impl<T> Arena<T> {
    /// `capacity` is clamped to the 16-bit slot space
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            capacity: capacity.min(u16::MAX as usize),
            len: 0,
            retired: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots permanently taken out of service
    pub fn retired(&self) -> usize {
        self.retired
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `value`, or hand it back when the arena is full
    pub fn insert(&mut self, value: T) -> Result<InstanceId, T> {
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            entry.value = Some(value);
            self.len += 1;
            return Ok(InstanceId::new(slot, entry.generation));
        }

        if self.slots.len() >= self.capacity {
            return Err(value);
        }

        let slot = self.slots.len() as u16;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        self.len += 1;
        Ok(InstanceId::new(slot, 0))
    }

    pub fn get(&self, id: InstanceId) -> Option<&T> {
        self.slots
            .get(id.slot as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.value.as_ref())
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut T> {
        self.slots
            .get_mut(id.slot as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.value.as_mut())
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    /// Remove and return the value, retiring `id` for good
    pub fn remove(&mut self, id: InstanceId) -> Option<T> {
        let entry = self.slots.get_mut(id.slot as usize)?;
        if entry.generation != id.generation {
            return None;
        }
        let value = entry.value.take()?;
        self.len -= 1;
        // A slot whose generation is exhausted is retired, never reused
        if let Some(next) = entry.generation.checked_add(1) {
            entry.generation = next;
            self.free.push(id.slot);
        } else {
            self.retired += 1;
        }
        Some(value)
    }

    pub fn ids(&self) -> Vec<InstanceId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.value
                .as_ref()
                .map(|v| (InstanceId::new(i as u16, s.generation), v))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (InstanceId, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, s)| {
            let generation = s.generation;
            s.value
                .as_mut()
                .map(move |v| (InstanceId::new(i as u16, generation), v))
        })
    }
}
