use alloc::vec::Vec;

use libm::fabsf;

use crate::config::Config;
use crate::entity::Sprite;
use crate::grid::TextureId;
use crate::ray::Camera;
use crate::view::{FrameBuffer, TextureSource};

/// A sprite projected into screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteView {
    pub texture: TextureId,
    pub frame: usize,
    /// Screen column of the sprite's centre.
    pub screen_x: i32,
    /// Depth along the view direction, comparable with the z-buffer.
    pub depth: f32,
    /// Width and height on screen.
    pub size: i32,
    /// Vertical shift on screen; positive is down.
    pub offset_y: i32,
    /// Squared distance from the camera.
    pub distance: f32,
}

/// Projects every sprite in front of the camera and returns them farthest
/// first, ready to paint over each other.
pub fn get_sprite_view<'a>(
    sprites: impl Iterator<Item = &'a Sprite>,
    camera: &Camera,
    width: usize,
    height: usize,
) -> Vec<SpriteView> {
    let (facing, plane) = (camera.facing, camera.plane);
    let det = plane.x * facing.y - facing.x * plane.y;
    if det == 0.0 {
        return Vec::new();
    }
    let inv_det = 1.0 / det;

    let mut views: Vec<SpriteView> = sprites
        .filter_map(|sprite| {
            let relative = sprite.position - camera.position;
            let transform_x = inv_det * (facing.y * relative.x - facing.x * relative.y);
            let transform_y = inv_det * (-plane.y * relative.x + plane.x * relative.y);
            if transform_y <= 0.0 {
                return None;
            }
            let screen_x = ((width as f32 / 2.0) * (1.0 + transform_x / transform_y)) as i32;
            let size = fabsf(height as f32 / transform_y) as i32;
            Some(SpriteView {
                texture: sprite.texture,
                frame: sprite.frame() as usize,
                screen_x,
                depth: transform_y,
                size,
                offset_y: (sprite.height_offset * height as f32 / transform_y) as i32,
                distance: relative.length_squared(),
            })
        })
        .collect();

    views.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    views
}

/// Paints sprites in order, column by column, skipping columns where the wall
/// is nearer than the sprite.
pub fn draw_sprites(
    frame: &mut FrameBuffer,
    z_buffer: &[f32],
    views: &[SpriteView],
    textures: &dyn TextureSource,
    config: &Config,
) {
    let width = frame.width() as i64;
    let height = frame.height() as i64;

    for view in views {
        let Some(texture) = textures.texture(view.texture) else {
            continue;
        };
        if view.size <= 0 {
            continue;
        }
        let frame_width = texture.frame_width() as f32;
        let texture_height = texture.height() as f32;

        // A sprite right against the camera projects to a size near i32::MAX.
        let size = view.size as i64;
        let left = view.screen_x as i64 - size / 2;
        let top = height / 2 - size / 2 + view.offset_y as i64;

        for stripe in left.max(0)..(left + size).min(width) {
            let column = stripe as usize;
            if view.depth >= z_buffer.get(column).copied().unwrap_or(0.0) {
                continue;
            }
            let texture_x = ((stripe - left) as f32 / size as f32 * frame_width) as usize;
            for y in top.max(0)..(top + size).min(height) {
                let texture_y = ((y - top) as f32 / size as f32 * texture_height) as usize;
                let mut color = texture.frame_pixel(view.frame, texture_x, texture_y);
                if config.fake_light {
                    color = color.fake_light(view.depth, config.max_light_distance);
                }
                frame.set_pixel(column, y as usize, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgba, BLACK};
    use crate::util::Vector;
    use crate::view::{Texture, TextureStore};

    fn camera() -> Camera {
        Camera {
            position: Vector::new(0.0, 0.0),
            facing: Vector::new(1.0, 0.0),
            plane: Vector::new(0.0, 0.66),
        }
    }

    fn sprite_at(x: f32, y: f32) -> Sprite {
        let mut sprite = Sprite::new(TextureId(7));
        sprite.position = Vector::new(x, y);
        sprite
    }

    #[test]
    fn sprites_are_sorted_far_to_near_and_culled_behind() {
        let sprites = [sprite_at(2.0, 0.0), sprite_at(6.0, 0.5), sprite_at(-3.0, 0.0), sprite_at(4.0, -1.0)];
        let views = get_sprite_view(sprites.iter(), &camera(), 64, 48);
        assert_eq!(views.len(), 3);
        assert!(views.windows(2).all(|w| w[0].distance >= w[1].distance));
        assert!((views[2].depth - 2.0).abs() < 1e-4);
        assert_eq!(views[2].screen_x, 32);
    }

    #[test]
    fn sprites_to_the_right_land_right_of_centre() {
        let views = get_sprite_view([sprite_at(3.0, 1.0)].iter(), &camera(), 64, 48);
        assert!(views[0].screen_x > 32);
    }

    #[test]
    fn walls_hide_sprites_behind_them() {
        let mut textures = TextureStore::new();
        let red = Rgba::opaque(255, 0, 0);
        textures.insert(TextureId(7), Texture::solid(4, 4, red));
        let views = get_sprite_view([sprite_at(2.0, 0.0)].iter(), &camera(), 16, 16);

        let mut frame = FrameBuffer::new(16, 16);
        let far_walls = [10.0; 16];
        draw_sprites(&mut frame, &far_walls, &views, &textures, &Config::default());
        assert_eq!(frame.get_pixel(8, 8), Some(red));

        let mut frame = FrameBuffer::new(16, 16);
        let near_walls = [1.0; 16];
        draw_sprites(&mut frame, &near_walls, &views, &textures, &Config::default());
        assert_eq!(frame.get_pixel(8, 8), Some(BLACK));
    }

    #[test]
    fn sprites_against_the_camera_fill_the_screen() {
        let mut textures = TextureStore::new();
        let red = Rgba::opaque(255, 0, 0);
        textures.insert(TextureId(7), Texture::solid(32, 32, red));
        let views = get_sprite_view([sprite_at(1e-6, -0.3)].iter(), &camera(), 256, 192);
        assert_eq!(views.len(), 1);
        assert!(views[0].size > 100_000_000);

        let mut frame = FrameBuffer::new(256, 192);
        draw_sprites(&mut frame, &[10.0; 256], &views, &textures, &Config::default());
        assert_eq!(frame.get_pixel(0, 0), Some(red));
        assert_eq!(frame.get_pixel(255, 191), Some(red));
    }
}
