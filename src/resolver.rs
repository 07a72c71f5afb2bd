//! Adjacency resolution for a fully loaded floor.

use log::{debug, warn};

use crate::floor::Floor;
use crate::tile::{Direction, TileId};

/// Sets every tile's neighbor links and the floor's home tile, then seals the floor.
///
/// Each direction is decided from the tile's own path code: an open edge links to
/// whatever tile sits at the adjacent coordinate, a wall never links. Missing
/// neighbors are left unset. When several tiles are chargers the last one in
/// insertion order becomes the home tile.
///
/// Calling this on a floor that is already resolved does nothing.
pub fn resolve(floor: &mut Floor) {
    if floor.is_resolved() {
        debug!("floor {} already resolved", floor.level());
        return;
    }

    let mut links = Vec::new();
    let mut home: Option<TileId> = None;

    for (index, tile) in floor.tiles().enumerate() {
        let id = TileId(index);

        if tile.is_charger() {
            if let Some(previous) = home.and_then(|previous| floor.get(previous)) {
                warn!(
                    "floor {}: charger at {} replaces home tile at {}",
                    floor.level(),
                    tile.pos(),
                    previous.pos()
                );
            }
            home = Some(id);
        }

        for direction in Direction::ALL {
            if !tile.path(direction).is_passable() {
                continue;
            }
            let Some(target) = tile.pos().step(direction) else {
                continue;
            };
            if let Some(neighbor) = floor.tile_id(target.x, target.y) {
                links.push((id, direction, neighbor));
            }
        }
    }

    let link_count = links.len();
    let tiles = floor.tiles_mut();
    for (id, direction, neighbor) in links {
        tiles[id.0].link(direction, neighbor);
    }
    if let Some(home) = home {
        floor.set_home(home);
    }
    floor.seal();

    debug!(
        "floor {}: {} tiles, {} links, home {:?}",
        floor.level(),
        floor.len(),
        link_count,
        floor.home_tile().map(|tile| tile.pos())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{Paths, Tile, TilePos};

    fn tile(x: i32, y: i32, ps: &str) -> Tile {
        Tile::new(TilePos::new(x, y), 1, Paths::parse(ps).unwrap(), 0, false)
    }

    fn charger(x: i32, y: i32) -> Tile {
        Tile::new(TilePos::new(x, y), 1, Paths::parse("2222").unwrap(), 0, true)
    }

    fn floor_of(tiles: Vec<Tile>) -> Floor {
        let mut floor = Floor::new(0);
        for tile in tiles {
            floor.add_tile(tile).unwrap();
        }
        resolve(&mut floor);
        floor
    }

    fn linked(floor: &Floor, x: i32, y: i32, direction: Direction) -> Option<TilePos> {
        floor
            .neighbor(TilePos::new(x, y), direction)
            .map(|tile| tile.pos())
    }

    #[test]
    fn open_edges_link_in_all_four_directions() {
        let floor = floor_of(vec![
            tile(1, 1, "0000"),
            tile(2, 1, "2222"),
            tile(0, 1, "2222"),
            tile(1, 2, "2222"),
            tile(1, 0, "2222"),
        ]);

        assert_eq!(linked(&floor, 1, 1, Direction::Right), Some(TilePos::new(2, 1)));
        assert_eq!(linked(&floor, 1, 1, Direction::Left), Some(TilePos::new(0, 1)));
        assert_eq!(linked(&floor, 1, 1, Direction::Up), Some(TilePos::new(1, 2)));
        assert_eq!(linked(&floor, 1, 1, Direction::Down), Some(TilePos::new(1, 0)));
        assert_eq!(floor.neighbors(TilePos::new(1, 1)).len(), 4);
        assert!(floor.neighbors(TilePos::new(2, 1)).is_empty());
    }

    #[test]
    fn walls_block_existing_neighbors() {
        let floor = floor_of(vec![tile(0, 0, "2000"), tile(1, 0, "0000")]);
        assert_eq!(linked(&floor, 0, 0, Direction::Right), None);
        assert_eq!(linked(&floor, 1, 0, Direction::Left), Some(TilePos::new(0, 0)));
    }

    #[test]
    fn border_tiles_keep_links_unset() {
        let floor = floor_of(vec![tile(0, 0, "0000")]);
        for direction in Direction::ALL {
            assert_eq!(linked(&floor, 0, 0, direction), None);
        }
    }

    #[test]
    fn holes_in_the_layout_are_not_errors() {
        let floor = floor_of(vec![tile(0, 0, "0000"), tile(2, 0, "0000")]);
        assert_eq!(linked(&floor, 0, 0, Direction::Right), None);
        assert_eq!(linked(&floor, 2, 0, Direction::Left), None);
    }

    #[test]
    fn each_side_of_an_edge_resolves_independently() {
        let floor = floor_of(vec![tile(0, 0, "0222"), tile(1, 0, "2122")]);
        assert_eq!(linked(&floor, 0, 0, Direction::Right), Some(TilePos::new(1, 0)));
        assert_eq!(linked(&floor, 1, 0, Direction::Left), Some(TilePos::new(0, 0)));

        let floor = floor_of(vec![tile(0, 0, "0222"), tile(1, 0, "2222")]);
        assert_eq!(linked(&floor, 0, 0, Direction::Right), Some(TilePos::new(1, 0)));
        assert_eq!(linked(&floor, 1, 0, Direction::Left), None);
    }

    #[test]
    fn open_edges_at_the_coordinate_limits_do_not_wrap() {
        let floor = floor_of(vec![
            tile(i32::MAX, 0, "0222"),
            tile(i32::MIN, 0, "2022"),
            tile(0, i32::MAX, "2202"),
            tile(0, i32::MIN, "2220"),
        ]);

        assert_eq!(linked(&floor, i32::MAX, 0, Direction::Right), None);
        assert_eq!(linked(&floor, i32::MIN, 0, Direction::Left), None);
        assert_eq!(linked(&floor, 0, i32::MAX, Direction::Up), None);
        assert_eq!(linked(&floor, 0, i32::MIN, Direction::Down), None);
    }

    #[test]
    fn single_charger_becomes_home() {
        let floor = floor_of(vec![tile(0, 0, "0000"), charger(1, 0)]);
        assert_eq!(floor.home_tile().unwrap().pos(), TilePos::new(1, 0));
    }

    #[test]
    fn last_charger_in_insertion_order_wins() {
        let floor = floor_of(vec![charger(3, 3), tile(0, 0, "0000"), charger(-1, 7)]);
        assert_eq!(floor.home_tile().unwrap().pos(), TilePos::new(-1, 7));

        let floor = floor_of(vec![charger(-1, 7), charger(3, 3)]);
        assert_eq!(floor.home_tile().unwrap().pos(), TilePos::new(3, 3));
    }

    #[test]
    fn floor_without_charger_has_no_home() {
        let floor = floor_of(vec![tile(0, 0, "0000")]);
        assert!(floor.home_tile().is_none());
    }

    #[test]
    fn resolving_twice_keeps_links() {
        let mut floor = floor_of(vec![tile(0, 0, "0222"), tile(1, 0, "2022")]);
        resolve(&mut floor);
        assert_eq!(linked(&floor, 0, 0, Direction::Right), Some(TilePos::new(1, 0)));
        assert!(floor.is_resolved());
    }

    #[test]
    fn link_set_iff_own_code_open_and_target_present() {
        let codes = ["0", "1", "2", "5"];
        let mut tiles = Vec::new();
        let mut index = 0;
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) == (2, 2) {
                    continue;
                }
                let ps: String = (0..4).map(|k| codes[(index + k * 3) % codes.len()]).collect();
                tiles.push(tile(x, y, &ps));
                index += 1;
            }
        }
        let floor = floor_of(tiles);

        for tile in floor.tiles() {
            for direction in Direction::ALL {
                let target = tile.pos().step(direction).unwrap();
                let expected = tile.path(direction).is_passable()
                    && floor.tile(target.x, target.y).is_some();
                let actual = floor.neighbor(tile.pos(), direction).map(|t| t.pos());
                assert_eq!(actual.is_some(), expected, "{} {direction}", tile.pos());
                if expected {
                    assert_eq!(actual, Some(target));
                }
            }
        }
    }
}
