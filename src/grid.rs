use alloc::vec;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::util::{get_index, Vector};

/// Handle to an image the host registered with the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureId(pub u16);

/// Which way a door panel runs. A `NorthSouth` panel lies along the y axis and
/// is recessed to the middle of its tile on the x axis; `EastWest` is the
/// reverse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorOrientation {
    #[default]
    NorthSouth,
    EastWest,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tile {
    pub blocking: bool,
    pub door: bool,
    pub orientation: DoorOrientation,
    pub locked: bool,
    pub wall_texture: Option<TextureId>,
    pub floor_texture: Option<TextureId>,
    pub ceiling_texture: Option<TextureId>,
    pub door_texture: Option<TextureId>,
    #[serde(skip)]
    pub seen: bool,
}

impl Tile {
    pub fn wall(texture: TextureId) -> Tile {
        Tile {
            blocking: true,
            wall_texture: Some(texture),
            ..Tile::default()
        }
    }

    pub fn floor(floor: Option<TextureId>, ceiling: Option<TextureId>) -> Tile {
        Tile {
            floor_texture: floor,
            ceiling_texture: ceiling,
            ..Tile::default()
        }
    }

    /// A closed door.
    pub fn door(orientation: DoorOrientation, texture: TextureId, locked: bool) -> Tile {
        Tile {
            blocking: true,
            door: true,
            orientation,
            locked,
            door_texture: Some(texture),
            ..Tile::default()
        }
    }
}

/// Result of poking at a tile to open or close it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorAction {
    Opened,
    Closed,
    Locked,
    NotADoor,
}

/// Rectangular map of tiles. Coordinates outside the grid have no tile; they
/// never block movement and they end any ray that reaches them.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// An open grid with no textures.
    pub fn new(width: usize, height: usize) -> TileGrid {
        TileGrid {
            width,
            height,
            tiles: vec![Tile::default(); width * height],
        }
    }

    /// Builds a grid from row-major tiles.
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<Tile>) -> Result<TileGrid, LevelError> {
        if width == 0 || height == 0 {
            return Err(LevelError::EmptyGrid);
        }
        if tiles.len() != width * height {
            return Err(LevelError::TileCountMismatch {
                expected: width * height,
                found: tiles.len(),
            });
        }
        Ok(TileGrid { width, height, tiles })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(get_index(x as usize, y as usize, self.width))
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        let i = self.index(x, y)?;
        Some(&mut self.tiles[i])
    }

    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = tile;
        }
    }

    pub fn tile_at_point(&self, point: Vector) -> Option<&Tile> {
        let (x, y) = point.tile();
        self.get(x, y)
    }

    pub fn is_blocking(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(false, |t| t.blocking)
    }

    /// Whether something walking into `point` must stop. Off the grid counts
    /// as blocked, unlike [`TileGrid::is_blocking`] which rays use.
    pub fn point_blocked(&self, point: Vector) -> bool {
        self.tile_at_point(point).map_or(true, |t| t.blocking)
    }

    pub fn mark_seen(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.get_mut(x, y) {
            tile.seen = true;
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Opens a closed door or closes an open one. Locked doors stay shut.
    pub fn toggle_door(&mut self, x: i32, y: i32) -> DoorAction {
        match self.get_mut(x, y) {
            Some(tile) if tile.door => {
                if tile.locked {
                    DoorAction::Locked
                } else if tile.blocking {
                    tile.blocking = false;
                    DoorAction::Opened
                } else {
                    tile.blocking = true;
                    DoorAction::Closed
                }
            }
            _ => DoorAction::NotADoor,
        }
    }

    pub fn unlock(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.get_mut(x, y) {
            tile.locked = false;
        }
    }
}
