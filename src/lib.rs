pub mod config;
pub mod document;
pub mod dump;
pub mod error;
pub mod floor;
pub mod floor_plan;
pub mod loader;
pub mod resolver;
pub mod tile;

pub use config::{Settings, SettingsLoader};
pub use document::{Document, Element};
pub use dump::DumpFormat;
pub use error::{DocumentError, DumpError, LoadError};
pub use floor::Floor;
pub use floor_plan::FloorPlan;
pub use loader::{load_floor_plan, load_from_path, load_from_str};
pub use resolver::resolve;
pub use tile::{Direction, PathCode, Paths, Tile, TileId, TilePos};
