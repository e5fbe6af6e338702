//! Entity descriptions and live entity handles.

use serde::{Deserialize, Serialize};

use crate::block::NbtCompound;
use crate::core::types::{BlockVector, DVec3, Result};

/// A position and orientation within a world.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub position: DVec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Location {
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_rotation(position: DVec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Block position containing this location.
    pub fn block_position(&self) -> BlockVector {
        BlockVector::new(
            self.position.x.floor() as i32,
            self.position.y.floor() as i32,
            self.position.z.floor() as i32,
        )
    }
}

/// Entity type identifier (registry key).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct EntityType(pub String);

impl EntityType {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Immutable description used to spawn an entity or restore a removed one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseEntity {
    entity_type: EntityType,
    nbt: Option<NbtCompound>,
}

impl BaseEntity {
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            nbt: None,
        }
    }

    pub fn with_nbt(entity_type: EntityType, nbt: NbtCompound) -> Self {
        Self {
            entity_type,
            nbt: Some(nbt),
        }
    }

    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    pub fn nbt(&self) -> Option<&NbtCompound> {
        self.nbt.as_ref()
    }

    pub fn has_nbt(&self) -> bool {
        self.nbt.is_some()
    }
}

/// A live handle to a spawned entity.
///
/// Handles stay valid across other edits to the store; once the entity is
/// removed or the backing world unloads, accessors fail instead of returning
/// stale data.
pub trait Entity {
    /// Current location of the entity.
    fn location(&self) -> Result<Location>;

    /// Snapshot usable to respawn the entity, if the store can produce one.
    fn state(&self) -> Result<Option<BaseEntity>>;

    /// Move the entity. Returns false if the move was refused.
    fn set_location(&mut self, location: Location) -> Result<bool>;

    /// Remove the entity from the store. Returns false if already gone.
    fn remove(&mut self) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_position_floors() {
        let location = Location::new(DVec3::new(1.7, -0.2, 3.0));
        assert_eq!(location.block_position(), BlockVector::new(1, -1, 3));
    }

    #[test]
    fn test_base_entity_description() {
        let description = BaseEntity::new(EntityType::new("armor_stand"));
        assert_eq!(description.entity_type().id(), "armor_stand");
        assert!(!description.has_nbt());
    }
}
