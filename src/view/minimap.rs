use crate::color::{Rgba, MAP_DOOR, MAP_FLOOR, MAP_PLAYER, MAP_WALL};
use crate::constants::{MINI_MAP_MARGIN, MINI_MAP_PIXEL, MINI_MAP_TILES};
use crate::grid::TileGrid;
use crate::util::Vector;
use crate::view::FrameBuffer;

/// Draws the tiles around `center` into the bottom-left corner of the frame.
/// Tiles no wall ray has reached yet stay hidden.
pub fn draw_mini_map(frame: &mut FrameBuffer, grid: &TileGrid, center: Vector) {
    let (cx, cy) = center.tile();
    let half = (MINI_MAP_TILES / 2) as i32;
    let top = frame
        .height()
        .saturating_sub(MINI_MAP_MARGIN + MINI_MAP_TILES * MINI_MAP_PIXEL);

    for ty in 0..MINI_MAP_TILES {
        for tx in 0..MINI_MAP_TILES {
            let (dx, dy) = (tx as i32 - half, ty as i32 - half);
            let Some(tile) = grid.get(cx + dx, cy + dy) else {
                continue;
            };
            if !tile.seen {
                continue;
            }

            let color = if dx == 0 && dy == 0 {
                MAP_PLAYER
            } else if tile.door {
                MAP_DOOR
            } else if tile.blocking {
                MAP_WALL
            } else {
                MAP_FLOOR
            };
            draw_chunky_pixel(frame, MINI_MAP_MARGIN + tx * MINI_MAP_PIXEL, top + ty * MINI_MAP_PIXEL, color);
        }
    }
}

fn draw_chunky_pixel(frame: &mut FrameBuffer, x: usize, y: usize, color: Rgba) {
    for dy in 0..MINI_MAP_PIXEL {
        for dx in 0..MINI_MAP_PIXEL {
            frame.set_pixel(x + dx, y + dy, color);
        }
    }
}
