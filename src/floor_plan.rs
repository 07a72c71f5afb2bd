use std::collections::HashMap;

use crate::error::LoadError;
use crate::floor::Floor;

/// Floors of a building in document order, addressable by level.
#[derive(Debug, Clone, Default)]
pub struct FloorPlan {
    floors: Vec<Floor>,
    levels: HashMap<i32, usize>,
}

impl FloorPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_floor(&mut self, floor: Floor) -> Result<(), LoadError> {
        let level = floor.level();
        if self.levels.contains_key(&level) {
            return Err(LoadError::DuplicateFloor { level });
        }
        self.levels.insert(level, self.floors.len());
        self.floors.push(floor);
        Ok(())
    }

    pub fn floor(&self, level: i32) -> Option<&Floor> {
        self.levels.get(&level).map(|&index| &self.floors[index])
    }

    pub fn floor_mut(&mut self, level: i32) -> Option<&mut Floor> {
        let index = *self.levels.get(&level)?;
        self.floors.get_mut(index)
    }

    pub fn floors(&self) -> impl Iterator<Item = &Floor> {
        self.floors.iter()
    }

    pub fn levels(&self) -> Vec<i32> {
        self.floors.iter().map(Floor::level).collect()
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    pub fn tile_count(&self) -> usize {
        self.floors.iter().map(Floor::len).sum()
    }
}
