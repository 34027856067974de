//! Grid traversal for the renderer and for AI.
//!
//! Every query here walks the tile grid with the same Amanatides & Woo
//! stepper, [`GridWalker`]. Ray lengths are measured in multiples of the ray
//! direction, so for a camera ray `facing + plane * offset` (with a unit
//! `facing`) the length at a wall is the perpendicular distance from the
//! camera plane, which keeps the view free of fisheye.

use libm::{fabsf, floorf};

use crate::constants::{HUGE_STEP, MAX_RAY_DISTANCE};
use crate::grid::{DoorOrientation, TextureId, Tile, TileGrid};
use crate::util::Vector;

/// Which family of grid lines a ray crossed last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Stepped along x, so the face is a vertical (north/south running) wall.
    Vertical = 0,
    /// Stepped along y.
    Horizontal = 1,
}

/// Position and view basis of whoever is looking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vector,
    pub facing: Vector,
    /// Perpendicular to `facing`; its length sets the field of view.
    pub plane: Vector,
}

impl Camera {
    /// Ray direction for a screen column, `offset` running -1 (left) to 1 (right).
    pub fn ray_direction(&self, offset: f32) -> Vector {
        self.facing + self.plane * offset
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Perpendicular distance, or `MAX_RAY_DISTANCE` when nothing was hit.
    pub distance: f32,
    pub side: Side,
    /// Where along the struck face the ray landed, 0..1.
    pub wall_fraction: f32,
    pub direction: Vector,
    /// Texture of the struck face; `None` means "use the default wall".
    pub texture: Option<TextureId>,
    /// Tile that was struck.
    pub tile: Option<(i32, i32)>,
    pub door: bool,
}

impl RayHit {
    fn miss(direction: Vector, side: Side) -> RayHit {
        RayHit {
            distance: MAX_RAY_DISTANCE,
            side,
            wall_fraction: 0.0,
            direction,
            texture: None,
            tile: None,
            door: false,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.tile.is_some()
    }
}

fn unit_step(component: f32) -> f32 {
    if component == 0.0 {
        HUGE_STEP
    } else {
        fabsf(1.0 / component)
    }
}

fn fraction(value: f32) -> f32 {
    value - floorf(value)
}

/// Steps a ray from tile to tile, always crossing whichever grid line is
/// nearest next.
#[derive(Clone, Copy, Debug)]
pub struct GridWalker {
    map_x: i32,
    map_y: i32,
    step_x: i32,
    step_y: i32,
    side_dist_x: f32,
    side_dist_y: f32,
    delta_x: f32,
    delta_y: f32,
    side: Side,
}

impl GridWalker {
    pub fn new(origin: Vector, direction: Vector) -> GridWalker {
        let (map_x, map_y) = origin.tile();
        let delta_x = unit_step(direction.x);
        let delta_y = unit_step(direction.y);

        let (step_x, side_dist_x) = if direction.x < 0.0 {
            (-1, (origin.x - map_x as f32) * delta_x)
        } else {
            (1, (map_x as f32 + 1.0 - origin.x) * delta_x)
        };
        let (step_y, side_dist_y) = if direction.y < 0.0 {
            (-1, (origin.y - map_y as f32) * delta_y)
        } else {
            (1, (map_y as f32 + 1.0 - origin.y) * delta_y)
        };

        GridWalker {
            map_x,
            map_y,
            step_x,
            step_y,
            side_dist_x,
            side_dist_y,
            delta_x,
            delta_y,
            side: Side::Vertical,
        }
    }

    pub fn tile(&self) -> (i32, i32) {
        (self.map_x, self.map_y)
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Moves into the next tile and returns the ray length at which it was
    /// entered.
    pub fn step(&mut self) -> f32 {
        if self.side_dist_x < self.side_dist_y {
            self.map_x += self.step_x;
            self.side_dist_x += self.delta_x;
            self.side = Side::Vertical;
            self.side_dist_x - self.delta_x
        } else {
            self.map_y += self.step_y;
            self.side_dist_y += self.delta_y;
            self.side = Side::Horizontal;
            self.side_dist_y - self.delta_y
        }
    }

    /// Ray length at which the current tile will be left.
    pub fn exit_distance(&self) -> f32 {
        self.side_dist_x.min(self.side_dist_y)
    }
}

/// Casts a camera ray for one screen column. Every tile the ray passes
/// through, including the one it stops on, is marked seen.
pub fn cast_wall_ray(grid: &mut TileGrid, camera: &Camera, camera_offset: f32) -> RayHit {
    cast_ray(grid, camera.position, camera.ray_direction(camera_offset))
}

pub fn cast_ray(grid: &mut TileGrid, origin: Vector, direction: Vector) -> RayHit {
    let mut walker = GridWalker::new(origin, direction);
    let (x, y) = walker.tile();
    grid.mark_seen(x, y);

    loop {
        let entered = walker.step();
        if entered > MAX_RAY_DISTANCE {
            return RayHit::miss(direction, walker.side());
        }

        let (x, y) = walker.tile();
        let Some(tile) = grid.get_mut(x, y) else {
            return RayHit::miss(direction, walker.side());
        };
        tile.seen = true;

        if !tile.blocking {
            continue;
        }

        if tile.door {
            match door_face(tile, &walker, origin, direction, entered) {
                Some(hit) => return hit,
                None => continue,
            }
        }

        let along = match walker.side() {
            Side::Vertical => origin.y + entered * direction.y,
            Side::Horizontal => origin.x + entered * direction.x,
        };
        return RayHit {
            distance: entered,
            side: walker.side(),
            wall_fraction: fraction(along),
            direction,
            texture: tile.wall_texture,
            tile: Some((x, y)),
            door: false,
        };
    }
}

/// Tests a closed door's panel, which sits half a tile into its cell. The ray
/// only hits it if it crosses the panel's plane before leaving the cell.
fn door_face(tile: &Tile, walker: &GridWalker, origin: Vector, direction: Vector, entered: f32) -> Option<RayHit> {
    let (x, y) = walker.tile();
    let (plane_offset, side) = match tile.orientation {
        DoorOrientation::NorthSouth => {
            if direction.x == 0.0 {
                return None;
            }
            ((x as f32 + 0.5 - origin.x) / direction.x, Side::Vertical)
        }
        DoorOrientation::EastWest => {
            if direction.y == 0.0 {
                return None;
            }
            ((y as f32 + 0.5 - origin.y) / direction.y, Side::Horizontal)
        }
    };

    if plane_offset < entered || plane_offset >= walker.exit_distance() {
        return None;
    }

    let along = match side {
        Side::Vertical => origin.y + plane_offset * direction.y,
        Side::Horizontal => origin.x + plane_offset * direction.x,
    };
    Some(RayHit {
        distance: plane_offset,
        side,
        wall_fraction: fraction(along),
        direction,
        texture: tile.door_texture.or(tile.wall_texture),
        tile: Some((x, y)),
        door: true,
    })
}

/// True when nothing blocking lies between `from` and `to`. Succeeds as soon
/// as the ray enters the target's tile. Never touches `seen`.
pub fn has_line_of_sight(grid: &TileGrid, from: Vector, to: Vector) -> bool {
    let target = to.tile();
    if from.tile() == target {
        return true;
    }

    // Lengths are in units of `to - from`; by 1.0 the target has been reached.
    let mut walker = GridWalker::new(from, to - from);
    loop {
        let entered = walker.step();
        if entered > 1.0 {
            return true;
        }
        let (x, y) = walker.tile();
        if (x, y) == target {
            return true;
        }
        if !grid.in_bounds(x, y) || grid.is_blocking(x, y) {
            return false;
        }
    }
}

/// How far an entity could walk in a direction before meeting a wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Probe {
    pub distance: f32,
    pub direction: Vector,
}

/// Walks a normalized ray until it meets a blocking tile or passes
/// `max_distance`, in which case `max_distance` is reported.
pub fn move_ray(grid: &TileGrid, origin: Vector, direction: Vector, max_distance: f32) -> Probe {
    let direction = direction.normalize();
    if direction == Vector::ZERO {
        return Probe { distance: 0.0, direction };
    }

    let mut walker = GridWalker::new(origin, direction);
    loop {
        let entered = walker.step();
        if entered > max_distance {
            return Probe { distance: max_distance, direction };
        }
        let (x, y) = walker.tile();
        if !grid.in_bounds(x, y) || grid.is_blocking(x, y) {
            return Probe { distance: entered, direction };
        }
    }
}
