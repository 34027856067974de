use core::f32::consts::PI;

use libm::atan2f;

use crate::config::Config;
use crate::grid::TileGrid;
use crate::ray::Camera;
use crate::view::{FrameBuffer, TextureSource};

/// Fills the top half of the frame with the sky. A sky texture is treated as
/// a panorama wrapped once around the player; without one the sky is a flat
/// colour.
pub fn draw_sky(frame: &mut FrameBuffer, camera: &Camera, textures: &dyn TextureSource, config: &Config) {
    let (width, height) = (frame.width(), frame.height());
    let horizon = height / 2;
    let sky = config.sky_texture.and_then(|id| textures.texture(id));

    for x in 0..width {
        let Some(texture) = sky else {
            for y in 0..horizon {
                frame.set_pixel(x, y, config.sky_color);
            }
            continue;
        };
        let ray = camera.ray_direction(2.0 * x as f32 / width as f32 - 1.0);
        let heading = (atan2f(ray.y, ray.x) + PI) / (2.0 * PI);
        let texture_x = (heading * texture.width() as f32) as usize;
        for y in 0..horizon {
            let texture_y = y * texture.height() / horizon.max(1);
            frame.set_pixel(x, y, texture.pixel(texture_x, texture_y));
        }
    }
}

/// Affine floor and ceiling mapping, one screen row at a time. Each row below
/// the horizon sees the floor at a single distance; the matching ceiling row
/// is mirrored above the horizon. Tiles without a floor or ceiling texture
/// leave whatever was drawn before.
pub fn draw_floor_and_ceiling(
    frame: &mut FrameBuffer,
    grid: &TileGrid,
    camera: &Camera,
    textures: &dyn TextureSource,
    config: &Config,
) {
    let (width, height) = (frame.width(), frame.height());
    let half = height as f32 / 2.0;
    let left = camera.ray_direction(-1.0);
    let right = camera.ray_direction(1.0);

    for y in height / 2..height {
        let row_distance = half / (y as f32 - half + 1.0);
        let step = (right - left) * (row_distance / width as f32);
        let mut point = camera.position + left * row_distance;

        for x in 0..width {
            let (cell_x, cell_y) = point.tile();
            if let Some(tile) = grid.get(cell_x, cell_y) {
                let u = point.x - cell_x as f32;
                let v = point.y - cell_y as f32;

                if let Some(texture) = tile.floor_texture.and_then(|id| textures.texture(id)) {
                    let mut color = texture.sample(u, v);
                    if config.fake_light {
                        color = color.fake_light(row_distance, config.max_light_distance);
                    }
                    frame.set_pixel(x, y, color);
                }
                if let Some(texture) = tile.ceiling_texture.and_then(|id| textures.texture(id)) {
                    let mut color = texture.sample(u, v);
                    if config.fake_light {
                        color = color.fake_light(row_distance, config.max_light_distance);
                    }
                    frame.set_pixel(x, height - y - 1, color);
                }
            }
            point = point + step;
        }
    }
}
