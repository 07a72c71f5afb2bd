use std::collections::HashMap;

use crate::error::LoadError;
use crate::tile::{Direction, Tile, TileId, TilePos};

/// All tiles of one level.
///
/// Tiles live in an arena in insertion order and are indexed by position.
/// Neighbor links and the home tile are [`TileId`] handles into that arena.
#[derive(Debug, Clone)]
pub struct Floor {
    level: i32,
    tiles: Vec<Tile>,
    index: HashMap<TilePos, TileId>,
    home: Option<TileId>,
    resolved: bool,
}

impl Floor {
    pub fn new(level: i32) -> Self {
        Self {
            level,
            tiles: Vec::new(),
            index: HashMap::new(),
            home: None,
            resolved: false,
        }
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn add_tile(&mut self, tile: Tile) -> Result<TileId, LoadError> {
        if self.resolved {
            return Err(LoadError::FloorSealed { level: self.level });
        }
        let pos = tile.pos();
        if self.index.contains_key(&pos) {
            return Err(LoadError::DuplicateCell {
                level: self.level,
                x: pos.x,
                y: pos.y,
            });
        }
        let id = TileId(self.tiles.len());
        self.tiles.push(tile);
        self.index.insert(pos, id);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn tile_id(&self, x: i32, y: i32) -> Option<TileId> {
        self.index.get(&TilePos::new(x, y)).copied()
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.tile_id(x, y).map(|id| &self.tiles[id.0])
    }

    /// Mutable access for tile contents such as dirt. Position and links stay fixed.
    pub fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        let id = self.tile_id(x, y)?;
        self.tiles.get_mut(id.0)
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    /// Tiles in insertion order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn home_tile(&self) -> Option<&Tile> {
        self.home.and_then(|id| self.get(id))
    }

    /// Resolved neighbor of the tile at `pos`, if the link was set.
    pub fn neighbor(&self, pos: TilePos, direction: Direction) -> Option<&Tile> {
        let tile = self.tile(pos.x, pos.y)?;
        tile.neighbor(direction).and_then(|id| self.get(id))
    }

    /// Every resolved neighbor of the tile at `pos`.
    pub fn neighbors(&self, pos: TilePos) -> Vec<(Direction, &Tile)> {
        Direction::ALL
            .iter()
            .filter_map(|direction| {
                self.neighbor(pos, *direction)
                    .map(|tile| (*direction, tile))
            })
            .collect()
    }

    pub fn total_dirt(&self) -> u64 {
        self.tiles.iter().map(|tile| tile.dirt() as u64).sum()
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub(crate) fn set_home(&mut self, id: TileId) {
        self.home = Some(id);
    }

    pub(crate) fn seal(&mut self) {
        self.resolved = true;
    }
}
