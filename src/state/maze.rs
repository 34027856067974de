use alloc::vec;
use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::grid::{TextureId, Tile, TileGrid};
use crate::level::{Compass, LevelData, Spawn, SpawnKind};
use crate::util::Vector;

/// Cells next to `index` in a `width` x `height` maze: up, down, left, right.
fn find_neighbors(index: usize, width: usize, height: usize) -> [Option<usize>; 4] {
    let num_cells = width * height;

    let up = if index < num_cells - width {
        Some(index + width)
    } else {
        None
    };

    let down = if index > width - 1 {
        Some(index - width)
    } else {
        None
    };

    let left = if index % width != 0 {
        Some(index - 1)
    } else {
        None
    };

    let right = if (index + 1) % width != 0 {
        Some(index + 1)
    } else {
        None
    };

    [up, down, left, right]
}

/// Depth-first backtracker from `start`: steps into a random unvisited
/// neighbour, carving the passage, and backs up along `stack` once a cell has
/// none left.
fn carve_passages(
    start: usize,
    width: usize,
    height: usize,
    visited: &mut [bool],
    passages: &mut Vec<(usize, usize)>,
    rng: &mut SmallRng,
) {
    let mut stack = vec![start];
    visited[start] = true;

    while let Some(&index) = stack.last() {
        let unvisited: heapless::Vec<usize, 4> = find_neighbors(index, width, height)
            .into_iter()
            .flatten() // Option implements IntoIter
            .filter(|&n| !visited[n])
            .collect();

        match unvisited.choose(rng) {
            Some(&next) => {
                visited[next] = true;
                passages.push((index, next));
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// Tile coordinates of maze cell `index`. Cells sit on odd tiles with wall
/// tiles between them.
fn cell_tile(index: usize, width: usize) -> (i32, i32) {
    let (cx, cy) = (index % width, index / width);
    ((2 * cx + 1) as i32, (2 * cy + 1) as i32)
}

/// A `width` x `height` cell maze carved into a `(2w+1)` x `(2h+1)` tile grid.
/// The player starts in the first cell facing its first passage, and the
/// exit portal sits in the last cell.
pub fn maze_level(
    width: usize,
    height: usize,
    seed: u64,
    wall: TextureId,
    floor: Option<TextureId>,
    ceiling: Option<TextureId>,
) -> LevelData {
    let width = width.max(1);
    let height = height.max(1);
    let num_cells = width * height;

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut visited = vec![false; num_cells];
    let mut passages = Vec::with_capacity(num_cells);
    carve_passages(0, width, height, &mut visited, &mut passages, &mut rng);

    let mut grid = TileGrid::new(2 * width + 1, 2 * height + 1);
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            grid.set(x, y, Tile::wall(wall));
        }
    }
    let open = Tile::floor(floor, ceiling);
    for index in 0..num_cells {
        let (x, y) = cell_tile(index, width);
        grid.set(x, y, open.clone());
    }
    for &(a, b) in passages.iter() {
        let (ax, ay) = cell_tile(a, width);
        let (bx, by) = cell_tile(b, width);
        grid.set((ax + bx) / 2, (ay + by) / 2, open.clone());
    }

    let start_facing = match passages.first() {
        Some(&(_, next)) if next == 1 => Compass::East,
        Some(_) => Compass::South,
        None => Compass::East,
    };
    let (sx, sy) = cell_tile(0, width);
    let (ex, ey) = cell_tile(num_cells - 1, width);
    log::debug!("Carved a {width}x{height} maze with {} passages", passages.len());

    LevelData::new(grid, Vector::new(sx as f32 + 0.5, sy as f32 + 0.5), start_facing)
        .with_spawn(Spawn::at_tile(SpawnKind::Portal, ex, ey))
}
