//! Fixed-capacity entity storage
//!
//! Slots are addressed by generational handles so a stale handle never
//! aliases an entity spawned later into the same slot. Freed slots go on a
//! free list and are reused first.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Stable reference to a live entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle {
    pub index: u32,
    pub generation: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    capacity: usize,
    live: usize,
}

impl EntityArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            capacity,
            live: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn is_full(&self) -> bool {
        self.live >= self.capacity
    }

    /// Store an entity. Returns `None` (and drops the entity) when full.
    pub fn insert(&mut self, entity: Entity) -> Option<EntityHandle> {
        if self.is_full() {
            return None;
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entity: None,
                });
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.entity = Some(entity);
        self.live += 1;

        Some(EntityHandle {
            index,
            generation: slot.generation,
        })
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.entity.as_ref())
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.entity.as_mut())
    }

    /// Free a slot, invalidating every handle to it
    pub fn remove(&mut self, handle: EntityHandle) -> Option<Entity> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let entity = slot.entity.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        Some(entity)
    }

    /// Remove every entity whose `active` flag is cleared; returns how many
    pub fn sweep_inactive(&mut self) -> usize {
        let dead: Vec<EntityHandle> = self
            .iter()
            .filter(|(_, e)| !e.active)
            .map(|(h, _)| h)
            .collect();
        for handle in &dead {
            self.remove(*handle);
        }
        dead.len()
    }

    pub fn clear(&mut self) {
        let handles: Vec<EntityHandle> = self.iter().map(|(h, _)| h).collect();
        for handle in handles {
            self.remove(handle);
        }
    }

    /// Live entities in slot order
    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &Entity)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.entity.as_ref().map(|e| {
                (
                    EntityHandle {
                        index: i as u32,
                        generation: slot.generation,
                    },
                    e,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityHandle, &mut Entity)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| {
            let generation = slot.generation;
            slot.entity.as_mut().map(|e| {
                (
                    EntityHandle {
                        index: i as u32,
                        generation,
                    },
                    e,
                )
            })
        })
    }

    /// Active entities only
    pub fn active(&self) -> impl Iterator<Item = &Entity> {
        self.iter().map(|(_, e)| e).filter(|e| e.active)
    }
}
