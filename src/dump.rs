//! Writes a floor plan back out, either in the loader's XML schema or as a
//! JSON snapshot that also carries the resolved links.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use crate::error::DumpError;
use crate::floor::Floor;
use crate::floor_plan::FloorPlan;
use crate::loader::FLOOR_TAG;
use crate::tile::{Direction, Tile, TilePos};

pub const ROOT_TAG: &str = "floorplan";
pub const CELL_TAG: &str = "cell";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DumpFormat {
    #[default]
    Xml,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanSnapshot {
    pub floors: Vec<FloorSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSnapshot {
    pub level: i32,
    pub home: Option<TilePos>,
    pub total_dirt: u64,
    pub tiles: Vec<TileSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub x: i32,
    pub y: i32,
    pub surface: i32,
    pub paths: String,
    pub dirt: u32,
    pub charger: bool,
    pub neighbors: NeighborSnapshot,
}

/// Coordinates of the resolved neighbors; `None` where no link was set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborSnapshot {
    pub right: Option<TilePos>,
    pub left: Option<TilePos>,
    pub up: Option<TilePos>,
    pub down: Option<TilePos>,
}

impl FloorPlanSnapshot {
    pub fn capture(plan: &FloorPlan) -> Self {
        Self {
            floors: plan.floors().map(FloorSnapshot::capture).collect(),
        }
    }
}

impl FloorSnapshot {
    fn capture(floor: &Floor) -> Self {
        let neighbor = |tile: &Tile, direction: Direction| {
            tile.neighbor(direction)
                .and_then(|id| floor.get(id))
                .map(Tile::pos)
        };
        Self {
            level: floor.level(),
            home: floor.home_tile().map(Tile::pos),
            total_dirt: floor.total_dirt(),
            tiles: floor
                .tiles()
                .map(|tile| TileSnapshot {
                    x: tile.x(),
                    y: tile.y(),
                    surface: tile.surface(),
                    paths: tile.paths().encode(),
                    dirt: tile.dirt(),
                    charger: tile.is_charger(),
                    neighbors: NeighborSnapshot {
                        right: neighbor(tile, Direction::Right),
                        left: neighbor(tile, Direction::Left),
                        up: neighbor(tile, Direction::Up),
                        down: neighbor(tile, Direction::Down),
                    },
                })
                .collect(),
        }
    }
}

pub fn to_json(plan: &FloorPlan) -> Result<String, DumpError> {
    Ok(serde_json::to_string_pretty(&FloorPlanSnapshot::capture(plan))?)
}

/// Serialises the plan in the same schema the loader reads. Tiles keep their
/// insertion order, so reloading the output reproduces the same plan.
pub fn to_xml(plan: &FloorPlan) -> Result<String, DumpError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write(&mut writer, Event::Start(BytesStart::new(ROOT_TAG)))?;

    for floor in plan.floors() {
        let level = floor.level().to_string();
        let mut start = BytesStart::new(FLOOR_TAG);
        start.push_attribute(("level", level.as_str()));

        if floor.is_empty() {
            write(&mut writer, Event::Empty(start))?;
            continue;
        }
        write(&mut writer, Event::Start(start))?;
        for tile in floor.tiles() {
            write(&mut writer, Event::Empty(cell_element(tile)))?;
        }
        write(&mut writer, Event::End(BytesEnd::new(FLOOR_TAG)))?;
    }

    write(&mut writer, Event::End(BytesEnd::new(ROOT_TAG)))?;
    String::from_utf8(writer.into_inner()).map_err(|err| DumpError::Xml(err.to_string()))
}

pub fn render(plan: &FloorPlan, format: DumpFormat) -> Result<String, DumpError> {
    match format {
        DumpFormat::Xml => to_xml(plan),
        DumpFormat::Json => to_json(plan),
    }
}

pub fn save(plan: &FloorPlan, path: impl AsRef<Path>, format: DumpFormat) -> Result<(), DumpError> {
    let text = render(plan, format)?;
    fs::write(path, text)?;
    Ok(())
}

fn cell_element(tile: &Tile) -> BytesStart<'static> {
    let mut cell = BytesStart::new(CELL_TAG);
    cell.push_attribute(("xs", tile.x().to_string().as_str()));
    cell.push_attribute(("ys", tile.y().to_string().as_str()));
    cell.push_attribute(("ss", tile.surface().to_string().as_str()));
    cell.push_attribute(("ps", tile.paths().encode().as_str()));
    cell.push_attribute(("ds", tile.dirt().to_string().as_str()));
    cell.push_attribute(("cs", if tile.is_charger() { "1" } else { "0" }));
    cell
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), DumpError> {
    writer
        .write_event(event)
        .map_err(|err| DumpError::Xml(err.to_string()))
}
