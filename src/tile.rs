//! Grid cells and the per-edge path encoding.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path codes below this value mean the edge is open.
pub const PASSABLE_BELOW: u8 = 2;

/// Position of a tile on its floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighboring coordinate one step in `direction`, or `None` past the `i32` range.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction, listed in the order the `ps` attribute encodes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Grid offset. Up is +y, down is -y.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Left => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Right => "right",
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

/// Single decimal digit describing one edge of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathCode(u8);

impl PathCode {
    pub const OPEN: PathCode = PathCode(0);
    pub const WALL: PathCode = PathCode(2);

    pub fn from_digit(digit: char) -> Option<Self> {
        digit.to_digit(10).map(|value| PathCode(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_passable(self) -> bool {
        self.0 < PASSABLE_BELOW
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// The four path codes of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paths {
    pub right: PathCode,
    pub left: PathCode,
    pub up: PathCode,
    pub down: PathCode,
}

impl Paths {
    pub fn new(right: PathCode, left: PathCode, up: PathCode, down: PathCode) -> Self {
        Self {
            right,
            left,
            up,
            down,
        }
    }

    pub fn all(code: PathCode) -> Self {
        Self::new(code, code, code, code)
    }

    /// Parses the `[right][left][up][down]` form, e.g. `"0212"`.
    /// Anything but exactly four decimal digits is rejected.
    pub fn parse(encoded: &str) -> Option<Self> {
        let mut digits = encoded.chars().map(PathCode::from_digit);
        let paths = Self::new(
            digits.next()??,
            digits.next()??,
            digits.next()??,
            digits.next()??,
        );
        if digits.next().is_some() {
            return None;
        }
        Some(paths)
    }

    pub fn get(&self, direction: Direction) -> PathCode {
        match direction {
            Direction::Right => self.right,
            Direction::Left => self.left,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    pub fn encode(&self) -> String {
        Direction::ALL
            .iter()
            .map(|direction| self.get(*direction).as_char())
            .collect()
    }
}

/// Index of a tile inside its floor's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub(crate) usize);

impl TileId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pos: TilePos,
    surface: i32,
    paths: Paths,
    dirt: u32,
    charger: bool,
    neighbors: [Option<TileId>; 4],
}

impl Tile {
    pub fn new(pos: TilePos, surface: i32, paths: Paths, dirt: u32, charger: bool) -> Self {
        Self {
            pos,
            surface,
            paths,
            dirt,
            charger,
            neighbors: [None; 4],
        }
    }

    pub fn pos(&self) -> TilePos {
        self.pos
    }

    pub fn x(&self) -> i32 {
        self.pos.x
    }

    pub fn y(&self) -> i32 {
        self.pos.y
    }

    pub fn surface(&self) -> i32 {
        self.surface
    }

    pub fn paths(&self) -> Paths {
        self.paths
    }

    pub fn path(&self, direction: Direction) -> PathCode {
        self.paths.get(direction)
    }

    pub fn dirt(&self) -> u32 {
        self.dirt
    }

    pub fn set_dirt(&mut self, dirt: u32) {
        self.dirt = dirt;
    }

    pub fn is_charger(&self) -> bool {
        self.charger
    }

    /// Resolved neighbor handle. Look it up through the owning floor.
    pub fn neighbor(&self, direction: Direction) -> Option<TileId> {
        self.neighbors[direction.index()]
    }

    pub fn right_tile(&self) -> Option<TileId> {
        self.neighbor(Direction::Right)
    }

    pub fn left_tile(&self) -> Option<TileId> {
        self.neighbor(Direction::Left)
    }

    pub fn up_tile(&self) -> Option<TileId> {
        self.neighbor(Direction::Up)
    }

    pub fn down_tile(&self) -> Option<TileId> {
        self.neighbor(Direction::Down)
    }

    pub(crate) fn link(&mut self, direction: Direction, neighbor: TileId) {
        let slot = &mut self.neighbors[direction.index()];
        debug_assert!(slot.is_none(), "{direction} link of {} set twice", self.pos);
        *slot = Some(neighbor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_parse_in_right_left_up_down_order() {
        let paths = Paths::parse("0129").unwrap();
        assert_eq!(paths.get(Direction::Right).value(), 0);
        assert_eq!(paths.get(Direction::Left).value(), 1);
        assert_eq!(paths.get(Direction::Up).value(), 2);
        assert_eq!(paths.get(Direction::Down).value(), 9);
        assert_eq!(paths.encode(), "0129");
    }

    #[test]
    fn paths_reject_short_long_and_non_digit_input() {
        assert!(Paths::parse("").is_none());
        assert!(Paths::parse("012").is_none());
        assert!(Paths::parse("01234").is_none());
        assert!(Paths::parse("01a2").is_none());
        assert!(Paths::parse("-122").is_none());
    }

    #[test]
    fn passability_threshold() {
        assert!(PathCode::from_digit('0').unwrap().is_passable());
        assert!(PathCode::from_digit('1').unwrap().is_passable());
        assert!(!PathCode::from_digit('2').unwrap().is_passable());
        assert!(!PathCode::from_digit('7').unwrap().is_passable());
    }

    #[test]
    fn step_follows_grid_axes() {
        let origin = TilePos::new(4, 4);
        assert_eq!(origin.step(Direction::Right), Some(TilePos::new(5, 4)));
        assert_eq!(origin.step(Direction::Left), Some(TilePos::new(3, 4)));
        assert_eq!(origin.step(Direction::Up), Some(TilePos::new(4, 5)));
        assert_eq!(origin.step(Direction::Down), Some(TilePos::new(4, 3)));
    }

    #[test]
    fn step_stops_at_the_edge_of_the_coordinate_range() {
        let max = TilePos::new(i32::MAX, i32::MAX);
        assert_eq!(max.step(Direction::Right), None);
        assert_eq!(max.step(Direction::Up), None);
        assert_eq!(max.step(Direction::Left), Some(TilePos::new(i32::MAX - 1, i32::MAX)));

        let min = TilePos::new(i32::MIN, i32::MIN);
        assert_eq!(min.step(Direction::Left), None);
        assert_eq!(min.step(Direction::Down), None);
        assert_eq!(min.step(Direction::Right), Some(TilePos::new(i32::MIN + 1, i32::MIN)));
    }

    #[test]
    fn new_tiles_have_no_links() {
        let tile = Tile::new(TilePos::new(2, 3), 4, Paths::all(PathCode::OPEN), 0, true);
        for direction in Direction::ALL {
            assert_eq!(tile.neighbor(direction), None);
        }
        assert!(tile.is_charger());
    }
}
