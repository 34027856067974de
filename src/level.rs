use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::grid::TileGrid;
use crate::state::{EnemyKind, PickupKind, SceneryKind};
use crate::util::Vector;

/// Starting heading. North is toward smaller y.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compass {
    #[default]
    North,
    East,
    South,
    West,
}

impl Compass {
    pub fn facing(self) -> Vector {
        match self {
            Compass::North => Vector::new(0.0, -1.0),
            Compass::East => Vector::new(1.0, 0.0),
            Compass::South => Vector::new(0.0, 1.0),
            Compass::West => Vector::new(-1.0, 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpawnKind {
    Enemy(EnemyKind),
    Pickup { kind: PickupKind, amount: i32 },
    Scenery(SceneryKind),
    Portal,
}

/// One object placement from a level file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub kind: SpawnKind,
    pub position: Vector,
}

impl Spawn {
    pub fn new(kind: SpawnKind, position: Vector) -> Spawn {
        Spawn { kind, position }
    }

    /// Places the object in the middle of tile `(x, y)`.
    pub fn at_tile(kind: SpawnKind, x: i32, y: i32) -> Spawn {
        Spawn::new(kind, Vector::new(x as f32 + 0.5, y as f32 + 0.5))
    }
}

/// Everything a level loader hands over to build a [`crate::World`].
#[derive(Clone, Debug, PartialEq)]
pub struct LevelData {
    pub grid: TileGrid,
    pub start: Vector,
    pub start_facing: Compass,
    pub spawns: Vec<Spawn>,
}

impl LevelData {
    pub fn new(grid: TileGrid, start: Vector, start_facing: Compass) -> LevelData {
        LevelData {
            grid,
            start,
            start_facing,
            spawns: Vec::new(),
        }
    }

    pub fn with_spawn(mut self, spawn: Spawn) -> LevelData {
        self.spawns.push(spawn);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_are_centred_in_their_tile() {
        let spawn = Spawn::at_tile(SpawnKind::Portal, 3, 7);
        assert_eq!(spawn.position, Vector::new(3.5, 7.5));
    }

    #[test]
    fn spawn_lists_deserialize() {
        let spawns: Vec<Spawn> = serde_json::from_str(
            r#"[
                {"kind":{"Enemy":"Blob"},"position":{"x":2.5,"y":3.5}},
                {"kind":{"Pickup":{"kind":"Ammo","amount":20}},"position":{"x":1.0,"y":1.0}},
                {"kind":"Portal","position":{"x":9.5,"y":9.5}}
            ]"#,
        )
        .unwrap();
        assert_eq!(spawns.len(), 3);
        assert_eq!(spawns[0].kind, SpawnKind::Enemy(EnemyKind::Blob));
        assert_eq!(
            spawns[1].kind,
            SpawnKind::Pickup {
                kind: PickupKind::Ammo,
                amount: 20
            }
        );
    }

    #[test]
    fn compass_points_are_unit_length() {
        for c in [Compass::North, Compass::East, Compass::South, Compass::West] {
            assert!((c.facing().length() - 1.0).abs() < 1e-6);
        }
    }
}
