//! Builds a [`FloorPlan`] from a parsed document.
//!
//! Every element tagged `floor` becomes a [`Floor`]; each of its child elements
//! is one cell with the attributes `xs`, `ys`, `ss`, `ps`, `ds` and `cs`.

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::document::{Document, Element};
use crate::error::LoadError;
use crate::floor::Floor;
use crate::floor_plan::FloorPlan;
use crate::resolver::resolve;
use crate::tile::{Paths, Tile, TilePos};

pub const FLOOR_TAG: &str = "floor";

/// Walks every floor element in document order and returns the fully linked plan.
/// The first malformed floor or cell aborts the whole load.
pub fn load_floor_plan(document: &Document) -> Result<FloorPlan, LoadError> {
    if document.root().is_none() {
        return Err(LoadError::InvalidInput);
    }

    let mut plan = FloorPlan::new();
    for element in document.elements_by_tag(FLOOR_TAG) {
        let level: i32 = attribute(element, "level")?;
        let floor = load_floor(level, element)?;
        plan.add_floor(floor)?;
    }

    debug!(
        "loaded {} floors with {} tiles",
        plan.len(),
        plan.tile_count()
    );
    Ok(plan)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<FloorPlan, LoadError> {
    let document = Document::from_path(path)?;
    load_floor_plan(&document)
}

pub fn load_from_str(xml: &str) -> Result<FloorPlan, LoadError> {
    let document = Document::parse_str(xml)?;
    load_floor_plan(&document)
}

fn load_floor(level: i32, element: &Element) -> Result<Floor, LoadError> {
    let mut floor = Floor::new(level);
    for cell in element.children() {
        floor.add_tile(parse_cell(cell)?)?;
    }
    resolve(&mut floor);
    Ok(floor)
}

fn parse_cell(cell: &Element) -> Result<Tile, LoadError> {
    let x = attribute(cell, "xs")?;
    let y = attribute(cell, "ys")?;
    let surface = attribute(cell, "ss")?;
    let paths = paths_attribute(cell, "ps")?;
    let dirt = attribute(cell, "ds")?;
    let charge: i32 = attribute(cell, "cs")?;

    Ok(Tile::new(TilePos::new(x, y), surface, paths, dirt, charge == 1))
}

fn attribute<T>(element: &Element, name: &'static str) -> Result<T, LoadError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = required(element, name)?;
    raw.parse::<T>()
        .map_err(|err| malformed(element, name, format!("cannot parse '{raw}': {err}")))
}

fn paths_attribute(element: &Element, name: &'static str) -> Result<Paths, LoadError> {
    let raw = required(element, name)?;
    Paths::parse(raw).ok_or_else(|| {
        malformed(
            element,
            name,
            format!("expected four decimal digits, found '{raw}'"),
        )
    })
}

fn required<'a>(element: &'a Element, name: &'static str) -> Result<&'a str, LoadError> {
    element
        .attribute(name)
        .ok_or_else(|| malformed(element, name, "missing".to_string()))
}

fn malformed(element: &Element, attribute: &'static str, reason: String) -> LoadError {
    LoadError::MalformedAttribute {
        element: element.name().to_string(),
        attribute,
        reason,
    }
}
