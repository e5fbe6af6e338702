//! In-memory reference world: a shared store with unload detection.

use std::collections::HashMap;
use std::mem;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::biome::Biome;
use crate::block::{BaseBlock, BlockState, LazyBlock};
use crate::core::error::EditError;
use crate::core::types::{BlockVector, ColumnVector, Result};
use crate::entity::{BaseEntity, Entity, Location};
use crate::extent::Extent;
use crate::operation::{BoxedOperation, Operation, Progress};
use crate::region::Region;

use super::side_effect::SideEffectSet;
use super::World;

/// Deferred side-effect positions processed per advance step.
const APPLY_BATCH: usize = 16;

#[derive(Default)]
struct WorldData {
    blocks: HashMap<BlockVector, BaseBlock>,
    biomes: HashMap<ColumnVector, Biome>,
    entities: HashMap<u64, EntityRecord>,
    next_entity_id: u64,
    // Simulated engine bookkeeping, observable in tests
    physics_updates: u64,
    neighbor_notifications: u64,
}

struct EntityRecord {
    location: Location,
    state: BaseEntity,
}

impl WorldData {
    fn apply_effects(&mut self, effects: SideEffectSet) {
        if effects.contains(SideEffectSet::PHYSICS) {
            self.physics_updates += 1;
        }
        if effects.contains(SideEffectSet::NEIGHBORS) {
            // One notification per face
            self.neighbor_notifications += 6;
        }
    }
}

/// Owner of an in-memory world store.
///
/// Handles reference the store weakly; dropping the owner unloads the
/// world, and outstanding handles fail with `WorldUnavailable` instead of
/// serving stale data. Several handles may share one store, one per edit
/// session.
pub struct LocalWorld {
    name: String,
    minimum: BlockVector,
    maximum: BlockVector,
    data: Arc<RwLock<WorldData>>,
}

impl LocalWorld {
    pub fn new(name: impl Into<String>, first: BlockVector, second: BlockVector) -> Self {
        Self {
            name: name.into(),
            minimum: first.min(second),
            maximum: first.max(second),
            data: Arc::new(RwLock::new(WorldData::default())),
        }
    }

    /// Session handle applying the default side effects on every write.
    pub fn handle(&self) -> LocalWorldHandle {
        self.handle_with(SideEffectSet::defaults())
    }

    /// Session handle with an explicit side-effect policy; an empty set
    /// defers effects to the handle's finalize operation.
    pub fn handle_with(&self, side_effects: SideEffectSet) -> LocalWorldHandle {
        LocalWorldHandle {
            name: self.name.clone(),
            minimum: self.minimum,
            maximum: self.maximum,
            data: Arc::downgrade(&self.data),
            side_effects,
            deferred: Mutex::new(Vec::new()),
        }
    }

    /// Physics updates applied so far.
    pub fn physics_updates(&self) -> u64 {
        self.data.read().physics_updates
    }

    /// Neighbor notifications issued so far.
    pub fn neighbor_notifications(&self) -> u64 {
        self.data.read().neighbor_notifications
    }
}

/// Session-facing handle to a [`LocalWorld`] store; the terminal extent of
/// a chain.
pub struct LocalWorldHandle {
    name: String,
    minimum: BlockVector,
    maximum: BlockVector,
    data: Weak<RwLock<WorldData>>,
    side_effects: SideEffectSet,
    /// Positions written while side effects were suppressed; drained when
    /// the finalize operation is captured.
    deferred: Mutex<Vec<BlockVector>>,
}

impl LocalWorldHandle {
    /// Effects this adapter can apply; lighting and AI are not modeled.
    const SUPPORTED: SideEffectSet = SideEffectSet::PHYSICS.union(SideEffectSet::NEIGHBORS);

    fn store(&self) -> Result<Arc<RwLock<WorldData>>> {
        self.data.upgrade().ok_or(EditError::WorldUnavailable)
    }

    fn check_bounds(&self, position: BlockVector) -> Result<()> {
        let inside = position.x >= self.minimum.x && position.x <= self.maximum.x
            && position.y >= self.minimum.y && position.y <= self.maximum.y
            && position.z >= self.minimum.z && position.z <= self.maximum.z;
        if inside {
            Ok(())
        } else {
            Err(EditError::OutOfBounds { position })
        }
    }

    fn check_column(&self, column: ColumnVector) -> Result<()> {
        let inside = column.x >= self.minimum.x && column.x <= self.maximum.x
            && column.y >= self.minimum.z && column.y <= self.maximum.z;
        if inside {
            Ok(())
        } else {
            Err(EditError::OutOfBounds {
                position: BlockVector::new(column.x, self.minimum.y, column.y),
            })
        }
    }

    fn contains_location(&self, location: Location) -> bool {
        self.check_bounds(location.block_position()).is_ok()
    }

    fn write_block(
        &mut self,
        position: BlockVector,
        block: BaseBlock,
        effects: SideEffectSet,
    ) -> Result<bool> {
        self.check_bounds(position)?;
        let store = self.store()?;
        let mut data = store.write();

        let previous = data.blocks.get(&position);
        let unchanged = match previous {
            Some(existing) => *existing == block,
            None => block == BaseBlock::new(BlockState::AIR),
        };
        if unchanged {
            return Ok(false);
        }

        data.blocks.insert(position, block);
        if effects.is_empty() {
            drop(data);
            self.deferred.get_mut().push(position);
        } else {
            data.apply_effects(effects & Self::SUPPORTED);
        }
        Ok(true)
    }
}

impl Extent for LocalWorldHandle {
    fn get_block(&self, position: BlockVector) -> Result<BaseBlock> {
        self.check_bounds(position)?;
        let store = self.store()?;
        let data = store.read();
        Ok(data
            .blocks
            .get(&position)
            .cloned()
            .unwrap_or_else(|| BaseBlock::new(BlockState::AIR)))
    }

    fn get_lazy_block(&self, position: BlockVector) -> Result<LazyBlock<'_>> {
        self.check_bounds(position)?;
        let store = self.store()?;
        let state = store
            .read()
            .blocks
            .get(&position)
            .map(|block| block.state())
            .unwrap_or(BlockState::AIR);
        Ok(LazyBlock::new(state, self, position))
    }

    fn set_block(&mut self, position: BlockVector, block: BaseBlock) -> Result<bool> {
        let effects = self.side_effects;
        self.write_block(position, block, effects)
    }

    fn get_biome(&self, column: ColumnVector) -> Result<Biome> {
        self.check_column(column)?;
        let store = self.store()?;
        let biome = store.read().biomes.get(&column).copied().unwrap_or_default();
        Ok(biome)
    }

    fn set_biome(&mut self, column: ColumnVector, biome: Biome) -> Result<bool> {
        self.check_column(column)?;
        let store = self.store()?;
        let mut data = store.write();
        let previous = data.biomes.get(&column).copied().unwrap_or_default();
        if previous == biome {
            return Ok(false);
        }
        data.biomes.insert(column, biome);
        Ok(true)
    }

    fn create_entity(
        &mut self,
        location: Location,
        entity: BaseEntity,
    ) -> Result<Option<Box<dyn Entity>>> {
        if !self.contains_location(location) {
            // Spawn refused, not an error
            return Ok(None);
        }
        let store = self.store()?;
        let mut data = store.write();
        let id = data.next_entity_id;
        data.next_entity_id += 1;
        data.entities.insert(
            id,
            EntityRecord {
                location,
                state: entity,
            },
        );
        Ok(Some(Box::new(LocalEntity {
            data: self.data.clone(),
            id,
        })))
    }

    fn entities(&self) -> Result<Vec<Box<dyn Entity>>> {
        let store = self.store()?;
        let data = store.read();
        let mut ids: Vec<u64> = data.entities.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids
            .into_iter()
            .map(|id| {
                Box::new(LocalEntity {
                    data: self.data.clone(),
                    id,
                }) as Box<dyn Entity>
            })
            .collect())
    }

    fn entities_in_region(&self, region: &dyn Region) -> Result<Vec<Box<dyn Entity>>> {
        let store = self.store()?;
        let data = store.read();
        let mut ids: Vec<u64> = data
            .entities
            .iter()
            .filter(|(_, record)| region.contains(record.location.block_position()))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        Ok(ids
            .into_iter()
            .map(|id| {
                Box::new(LocalEntity {
                    data: self.data.clone(),
                    id,
                }) as Box<dyn Entity>
            })
            .collect())
    }

    fn minimum_point(&self) -> BlockVector {
        self.minimum
    }

    fn maximum_point(&self) -> BlockVector {
        self.maximum
    }

    fn interleave_operation(&self) -> Option<BoxedOperation> {
        None
    }

    fn finalize_operation(&self) -> Option<BoxedOperation> {
        let mut deferred = self.deferred.lock();
        if deferred.is_empty() {
            return None;
        }
        Some(Box::new(SideEffectApplier {
            data: self.data.clone(),
            positions: mem::take(&mut *deferred),
            effects: Self::SUPPORTED,
            cursor: 0,
        }))
    }
}

impl World for LocalWorldHandle {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_loaded(&self) -> bool {
        self.data.upgrade().is_some()
    }

    fn set_block_with(
        &mut self,
        position: BlockVector,
        block: BaseBlock,
        side_effects: SideEffectSet,
    ) -> Result<bool> {
        self.write_block(position, block, side_effects)
    }

    fn apply_side_effects(
        &mut self,
        _position: BlockVector,
        _previous: BlockState,
        requested: SideEffectSet,
    ) -> Result<SideEffectSet> {
        let store = self.store()?;
        let applied = requested & Self::SUPPORTED;
        store.write().apply_effects(applied);
        Ok(applied)
    }
}

/// Live handle to an entity in a [`LocalWorld`] store.
struct LocalEntity {
    data: Weak<RwLock<WorldData>>,
    id: u64,
}

impl LocalEntity {
    fn store(&self) -> Result<Arc<RwLock<WorldData>>> {
        self.data.upgrade().ok_or(EditError::WorldUnavailable)
    }
}

impl Entity for LocalEntity {
    fn location(&self) -> Result<Location> {
        let store = self.store()?;
        let data = store.read();
        data.entities
            .get(&self.id)
            .map(|record| record.location)
            .ok_or_else(|| EditError::Operation("entity no longer exists".to_string()))
    }

    fn state(&self) -> Result<Option<BaseEntity>> {
        let store = self.store()?;
        let data = store.read();
        Ok(data.entities.get(&self.id).map(|record| record.state.clone()))
    }

    fn set_location(&mut self, location: Location) -> Result<bool> {
        let store = self.store()?;
        let mut data = store.write();
        match data.entities.get_mut(&self.id) {
            Some(record) => {
                record.location = location;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&mut self) -> Result<bool> {
        let store = self.store()?;
        let mut data = store.write();
        Ok(data.entities.remove(&self.id).is_some())
    }
}

/// Applies deferred side effects after a bulk edit, in bounded batches.
pub struct SideEffectApplier {
    data: Weak<RwLock<WorldData>>,
    positions: Vec<BlockVector>,
    effects: SideEffectSet,
    cursor: usize,
}

impl SideEffectApplier {
    /// Positions not yet processed.
    pub fn remaining(&self) -> usize {
        self.positions.len() - self.cursor
    }
}

impl Operation for SideEffectApplier {
    fn resume(&mut self) -> Result<Progress> {
        if self.cursor >= self.positions.len() {
            return Ok(Progress::Complete);
        }
        let store = self.data.upgrade().ok_or(EditError::WorldUnavailable)?;
        let end = (self.cursor + APPLY_BATCH).min(self.positions.len());
        let mut data = store.write();
        for _position in &self.positions[self.cursor..end] {
            data.apply_effects(self.effects);
        }
        drop(data);
        self.cursor = end;
        if self.cursor >= self.positions.len() {
            log::trace!(
                "applied deferred side effects for {} positions",
                self.positions.len()
            );
            Ok(Progress::Complete)
        } else {
            Ok(Progress::More)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::entity::EntityType;
    use crate::operation::complete;
    use crate::region::{CuboidRegion, EllipsoidRegion, Region};

    use super::*;

    fn world() -> LocalWorld {
        LocalWorld::new("test", BlockVector::splat(-16), BlockVector::splat(16))
    }

    #[test]
    fn test_set_block_reports_actual_change() {
        let world = world();
        let mut handle = world.handle();
        let position = BlockVector::new(1, 2, 3);

        assert!(handle
            .set_block(position, BaseBlock::new(BlockState::STONE))
            .unwrap());
        assert!(!handle
            .set_block(position, BaseBlock::new(BlockState::STONE))
            .unwrap());
        assert!(handle
            .set_block(position, BaseBlock::new(BlockState::AIR))
            .unwrap());
    }

    #[test]
    fn test_out_of_bounds_is_a_distinct_error() {
        let world = world();
        let handle = world.handle();
        let result = handle.get_block(BlockVector::new(100, 0, 0));
        assert!(matches!(result, Err(EditError::OutOfBounds { .. })));
    }

    #[test]
    fn test_unloaded_world_fails_all_access() {
        let world = world();
        let mut handle = world.handle();
        handle
            .set_block(BlockVector::ZERO, BaseBlock::new(BlockState::STONE))
            .unwrap();
        drop(world);

        assert!(!handle.is_loaded());
        assert!(matches!(
            handle.get_block(BlockVector::ZERO),
            Err(EditError::WorldUnavailable)
        ));
        assert!(matches!(
            handle.set_block(BlockVector::ZERO, BaseBlock::new(BlockState::AIR)),
            Err(EditError::WorldUnavailable)
        ));
    }

    #[test]
    fn test_lazy_block_resolves_payload_on_demand() {
        let world = world();
        let mut handle = world.handle();
        let position = BlockVector::new(0, 1, 0);
        let mut nbt = crate::block::NbtCompound::new();
        nbt.insert("lines".to_string(), serde_json::Value::from(4));
        handle
            .set_block(position, BaseBlock::with_nbt(BlockState::GLASS, nbt))
            .unwrap();

        let lazy = handle.get_lazy_block(position).unwrap();
        assert_eq!(lazy.state(), BlockState::GLASS);
        let full = lazy.full_block().unwrap();
        assert!(full.has_nbt());
    }

    #[test]
    fn test_immediate_side_effects_touch_counters() {
        let world = world();
        let mut handle = world.handle();
        handle
            .set_block(BlockVector::ZERO, BaseBlock::new(BlockState::STONE))
            .unwrap();
        assert_eq!(world.physics_updates(), 1);
        assert_eq!(world.neighbor_notifications(), 6);
    }

    #[test]
    fn test_suppressed_side_effects_run_in_finalize_operation() {
        let world = LocalWorld::new("test", BlockVector::splat(-32), BlockVector::splat(32));
        let mut handle = world.handle_with(SideEffectSet::none());
        for x in 0..20 {
            handle
                .set_block(BlockVector::new(x, 0, 0), BaseBlock::new(BlockState::SAND))
                .unwrap();
        }
        assert_eq!(world.physics_updates(), 0);

        let operation = handle.finalize_operation().unwrap();
        complete(operation).unwrap();
        assert_eq!(world.physics_updates(), 20);
        assert_eq!(world.neighbor_notifications(), 120);
    }

    #[test]
    fn test_finalize_capture_drains_deferred_positions() {
        let world = world();
        let mut handle = world.handle_with(SideEffectSet::none());

        handle
            .set_block(BlockVector::new(0, 0, 0), BaseBlock::new(BlockState::SAND))
            .unwrap();
        complete(handle.finalize_operation().unwrap()).unwrap();
        assert_eq!(world.physics_updates(), 1);

        // A second batch applies only its own effects, not batch 1's again
        handle
            .set_block(BlockVector::new(1, 0, 0), BaseBlock::new(BlockState::SAND))
            .unwrap();
        complete(handle.finalize_operation().unwrap()).unwrap();
        assert_eq!(world.physics_updates(), 2);

        // Nothing deferred now, so there is no third operation
        assert!(handle.finalize_operation().is_none());
    }

    #[test]
    fn test_apply_side_effects_reports_supported_subset() {
        let world = world();
        let mut handle = world.handle();
        let applied = handle
            .apply_side_effects(BlockVector::ZERO, BlockState::AIR, SideEffectSet::defaults())
            .unwrap();
        assert_eq!(applied, SideEffectSet::PHYSICS | SideEffectSet::NEIGHBORS);
        assert!(!applied.contains(SideEffectSet::LIGHTING));
    }

    #[test]
    fn test_entity_spawn_and_refusal() {
        let world = world();
        let mut handle = world.handle();

        let spawned = handle
            .create_entity(
                Location::new(crate::core::types::DVec3::new(1.5, 2.0, 3.5)),
                BaseEntity::new(EntityType::new("item")),
            )
            .unwrap();
        assert!(spawned.is_some());

        let refused = handle
            .create_entity(
                Location::new(crate::core::types::DVec3::new(500.0, 0.0, 0.0)),
                BaseEntity::new(EntityType::new("item")),
            )
            .unwrap();
        assert!(refused.is_none());
    }

    #[test]
    fn test_entity_handle_is_live() {
        let world = world();
        let mut handle = world.handle();
        let mut entity = handle
            .create_entity(
                Location::new(crate::core::types::DVec3::new(0.5, 0.5, 0.5)),
                BaseEntity::new(EntityType::new("armor_stand")),
            )
            .unwrap()
            .unwrap();

        let moved = entity
            .set_location(Location::new(crate::core::types::DVec3::new(3.5, 0.5, 0.5)))
            .unwrap();
        assert!(moved);
        assert_eq!(
            entity.location().unwrap().block_position(),
            BlockVector::new(3, 0, 0)
        );

        assert!(entity.remove().unwrap());
        assert!(entity.state().unwrap().is_none());
        assert!(handle.entities().unwrap().is_empty());
    }

    #[test]
    fn test_region_filter_uses_precise_containment() {
        let world = world();
        let mut handle = world.handle();

        // One entity inside the sphere, one inside only the bounding box
        for (x, z) in [(1.5, 0.5), (2.5, 2.5)] {
            handle
                .create_entity(
                    Location::new(crate::core::types::DVec3::new(x, 0.5, z)),
                    BaseEntity::new(EntityType::new("item")),
                )
                .unwrap()
                .unwrap();
        }

        let sphere = EllipsoidRegion::sphere(BlockVector::ZERO, 2.0);
        assert!(sphere.contains(BlockVector::new(1, 0, 0)));
        assert!(!sphere.contains(BlockVector::new(2, 0, 2)));

        let all = handle.entities().unwrap();
        let filtered = handle.entities_in_region(&sphere).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(filtered.len(), 1);
        assert_eq!(
            filtered[0].location().unwrap().block_position(),
            BlockVector::new(1, 0, 0)
        );

        let cuboid = CuboidRegion::new(BlockVector::splat(-16), BlockVector::splat(16));
        assert_eq!(handle.entities_in_region(&cuboid).unwrap().len(), 2);
    }
}
