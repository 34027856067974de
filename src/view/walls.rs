use alloc::vec::Vec;

use crate::config::Config;
use crate::grid::TileGrid;
use crate::ray::{cast_wall_ray, Camera, RayHit, Side};
use crate::view::{FrameBuffer, TextureSource};

/// Casts one ray per screen column, left to right.
pub fn get_wall_view(grid: &mut TileGrid, camera: &Camera, width: usize) -> Vec<RayHit> {
    (0..width)
        .map(|x| {
            let offset = 2.0 * x as f32 / width as f32 - 1.0;
            cast_wall_ray(grid, camera, offset)
        })
        .collect()
}

/// Mirrors the texel column so a texture reads left to right from either side
/// of a wall.
fn flip_texture(hit: &RayHit) -> bool {
    match hit.side {
        Side::Vertical => hit.direction.x > 0.0,
        Side::Horizontal => hit.direction.y < 0.0,
    }
}

pub fn draw_walls(frame: &mut FrameBuffer, hits: &[RayHit], textures: &dyn TextureSource, config: &Config) {
    for (x, hit) in hits.iter().enumerate() {
        draw_wall_column(frame, x, hit, textures, config);
    }
}

fn draw_wall_column(frame: &mut FrameBuffer, x: usize, hit: &RayHit, textures: &dyn TextureSource, config: &Config) {
    if !hit.is_hit() {
        return;
    }
    let id = hit.texture.unwrap_or(config.default_wall_texture);
    let Some(texture) = textures.texture(id) else {
        return;
    };

    let height = frame.height() as f32;
    let line_height = height / hit.distance.max(0.0001);
    let top = (height - line_height) / 2.0;
    let start = top.max(0.0) as usize;
    let end = ((height + line_height) / 2.0).min(height) as usize;

    let texture_width = texture.frame_width();
    let mut texture_x = ((hit.wall_fraction * texture_width as f32) as usize).min(texture_width - 1);
    if flip_texture(hit) {
        texture_x = texture_width - texture_x - 1;
    }

    for y in start..end {
        let v = (y as f32 - top) / line_height;
        let texture_y = (v * texture.height() as f32) as usize;
        let mut color = texture.pixel(texture_x, texture_y);
        if hit.side == Side::Vertical {
            color = color.halved();
        }
        if config.fake_light {
            color = color.fake_light(hit.distance, config.max_light_distance);
        }
        frame.set_pixel(x, y, color);
    }
}
