//! Software renderer: draws a [`World`] into an RGBA [`FrameBuffer`].
//!
//! A frame is built back to front: sky, floor and ceiling, one wall column
//! per screen column (which also fills the per-column z-buffer), billboarded
//! sprites clipped against that z-buffer, the mini-map when the player has
//! it open, and finally the screen flash.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use crate::color::{Rgba, BLACK};
use crate::config::Config;
use crate::constants::MAX_RAY_DISTANCE;
use crate::grid::TextureId;
use crate::state::World;

pub mod floor;
pub mod minimap;
pub mod sprites;
pub mod walls;

pub use floor::{draw_floor_and_ceiling, draw_sky};
pub use minimap::draw_mini_map;
pub use sprites::{draw_sprites, get_sprite_view, SpriteView};
pub use walls::{draw_walls, get_wall_view};

/// An image made of square animation frames laid side by side. A plain wall
/// or floor image is a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Texture {
    /// `None` when the pixel count does not match or the image is empty.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgba>) -> Option<Texture> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return None;
        }
        Some(Texture {
            width,
            height,
            pixels,
        })
    }

    pub fn solid(width: usize, height: usize, color: Rgba) -> Texture {
        Texture {
            width: width.max(1),
            height: height.max(1),
            pixels: vec![color; width.max(1) * height.max(1)],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn frame_width(&self) -> usize {
        self.height.min(self.width)
    }

    pub fn frame_count(&self) -> usize {
        self.width / self.frame_width()
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[x + y * self.width]
    }

    /// Pixel `(x, y)` of animation frame `frame`, wrapping past the last frame.
    pub fn frame_pixel(&self, frame: usize, x: usize, y: usize) -> Rgba {
        let frame_width = self.frame_width();
        let frame = frame % self.frame_count();
        self.pixel(frame * frame_width + x.min(frame_width - 1), y)
    }

    /// Samples the first frame at `(u, v)` in 0..1.
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        let size = self.frame_width();
        let x = (u.clamp(0.0, 1.0) * size as f32) as usize;
        let y = (v.clamp(0.0, 1.0) * self.height as f32) as usize;
        self.frame_pixel(0, x, y)
    }
}

/// Where the renderer finds images. A missing id is skipped, never fatal.
pub trait TextureSource {
    fn texture(&self, id: TextureId) -> Option<&Texture>;
}

#[derive(Clone, Debug, Default)]
pub struct TextureStore {
    textures: BTreeMap<TextureId, Texture>,
}

impl TextureStore {
    pub fn new() -> TextureStore {
        TextureStore::default()
    }

    pub fn insert(&mut self, id: TextureId, texture: Texture) -> Option<Texture> {
        self.textures.insert(id, texture)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureSource for TextureStore {
    fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(&id)
    }
}

/// Off-screen RGBA pixels, row major.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> FrameBuffer {
        FrameBuffer {
            width,
            height,
            pixels: vec![BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.iter_mut().for_each(|p| *p = color);
    }

    /// Writes one pixel. Transparent colours and out-of-range coordinates
    /// leave the buffer untouched.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        if color.is_transparent() || x >= self.width || y >= self.height {
            return;
        }
        self.pixels[x + y * self.width] = color;
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[x + y * self.width])
    }

    /// Mixes `color` into every pixel.
    pub fn tint(&mut self, color: Rgba, amount: f32) {
        for pixel in self.pixels.iter_mut() {
            *pixel = color.blend(*pixel, amount);
        }
    }
}

pub struct Renderer {
    frame: FrameBuffer,
    z_buffer: Vec<f32>,
}

impl Renderer {
    pub fn new(config: &Config) -> Renderer {
        Renderer {
            frame: FrameBuffer::new(config.screen_width, config.screen_height),
            z_buffer: vec![MAX_RAY_DISTANCE; config.screen_width],
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Wall distance per screen column from the last frame.
    pub fn z_buffer(&self) -> &[f32] {
        &self.z_buffer
    }

    /// Draws one frame. Takes the world mutably because casting marks tiles
    /// as seen.
    pub fn render(&mut self, world: &mut World, textures: &dyn TextureSource, config: &Config) {
        let camera = world.camera();
        let (width, height) = (self.frame.width(), self.frame.height());

        self.frame.fill(BLACK);
        draw_sky(&mut self.frame, &camera, textures, config);
        draw_floor_and_ceiling(&mut self.frame, world.grid(), &camera, textures, config);

        let hits = get_wall_view(world.grid_mut(), &camera, width);
        for (slot, hit) in self.z_buffer.iter_mut().zip(hits.iter()) {
            *slot = hit.distance;
        }
        draw_walls(&mut self.frame, &hits, textures, config);

        let views = get_sprite_view(world.sprites(), &camera, width, height);
        draw_sprites(&mut self.frame, &self.z_buffer, &views, textures, config);

        if world.player.show_map {
            draw_mini_map(&mut self.frame, world.grid(), world.player.position);
        }

        if config.screen_flash {
            if let Some(flash) = world.player.flash {
                self.frame.tint(flash.color, flash.strength() * 0.5);
            }
        }
    }
}
